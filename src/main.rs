use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::BufReader;

use stacksearch::cli::{Cli, Command};
use stacksearch::cms::CmsClient;
use stacksearch::config::{CONFIG, Config};
use stacksearch::dispatcher::{SearchClient, Submission};
use stacksearch::frontend;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else if cli.quiet {
        tracing::Level::WARN
    } else {
        tracing::Level::INFO
    };
    // Initialize tracing subscriber (also picks up `log` records from the library)
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let mut config: Config = (*CONFIG).clone();
    if let Some(base_url) = cli.base_url {
        config.api_base_url = base_url;
    }
    if let Some(secs) = cli.search_timeout {
        config.search_timeout = std::time::Duration::from_secs(secs);
    }

    match cli.command.unwrap_or(Command::Interactive) {
        Command::Interactive => {
            let client = SearchClient::new(&config);
            frontend::interactive(&client, BufReader::new(tokio::io::stdin()))
                .await
                .context("failed to read stdin")
        }
        Command::Search { query, json } => search_once(SearchClient::new(&config), &query, json).await,
        Command::Sync => {
            let client = SearchClient::new(&config);
            frontend::sync_once(&client)
                .await
                .context("content sync failed")
        }
        Command::Health => {
            let client = SearchClient::new(&config);
            let health = client
                .backend()
                .health()
                .await
                .context("health check failed")?;
            println!(
                "{} ({} {})",
                health.status.as_deref().unwrap_or("ok"),
                health.service.as_deref().unwrap_or("unknown service"),
                health.version.as_deref().unwrap_or(""),
            );
            Ok(())
        }
        Command::Entries { content_type } => {
            let cms = CmsClient::new(&config.cms)?;
            let entries = cms
                .entries(&content_type)
                .await
                .with_context(|| format!("failed to fetch {content_type} entries"))?;
            println!("{}", serde_json::to_string_pretty(&entries)?);
            Ok(())
        }
    }
}

async fn search_once(client: SearchClient, query: &str, json: bool) -> Result<()> {
    let warmup = client.warmup();
    let outcome = client.search(query).await;
    warmup.abort();

    if outcome == Submission::Skipped {
        anyhow::bail!("query must not be empty");
    }
    if json {
        let state = client.snapshot().await;
        let out = serde_json::json!({
            "query": state.query,
            "results": state.results,
            "expanded_queries": state.expanded_queries,
            "notice": state.notice.as_ref().map(|n| n.message.clone()),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        print!("{}", client.view().await);
    }
    Ok(())
}
