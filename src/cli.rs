use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "stacksearch", version, about = "Semantic product search from the terminal")]
pub struct Cli {
    /// Search backend base URL (overrides SEARCH_API_BASE_URL)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Search timeout in seconds (overrides SEARCH_TIMEOUT_SECS)
    #[arg(long, global = true)]
    pub search_timeout: Option<u64>,

    /// Log debug output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Read queries from stdin (`:sync`, `:health`, `:quit` are commands)
    Interactive,
    /// Run a single search and print the results
    Search {
        query: String,
        /// Print the resulting state as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Ask the backend to re-index content from the CMS
    Sync,
    /// Probe the backend's health endpoint
    Health,
    /// List entries straight from the CMS delivery API
    Entries {
        #[arg(long, default_value = "product")]
        content_type: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_interactive() {
        let cli = Cli::parse_from(["stacksearch"]);
        assert!(cli.command.is_none());
        assert!(cli.base_url.is_none());
    }

    #[test]
    fn test_search_with_overrides() {
        let cli = Cli::parse_from([
            "stacksearch",
            "search",
            "red sneakers",
            "--base-url",
            "http://example.test",
            "--search-timeout",
            "5",
        ]);
        assert_eq!(cli.base_url.as_deref(), Some("http://example.test"));
        assert_eq!(cli.search_timeout, Some(5));
        match cli.command {
            Some(Command::Search { query, json }) => {
                assert_eq!(query, "red sneakers");
                assert!(!json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_verbose_and_quiet_conflict() {
        assert!(Cli::try_parse_from(["stacksearch", "-v", "-q"]).is_err());
    }
}
