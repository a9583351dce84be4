//! Terminal front-end: the REPL and the one-shot sync command.

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::task::JoinSet;

use crate::api::error::RequestError;
use crate::dispatcher::{SearchClient, Submission};

pub const SYNC_DONE: &str = "Content sync completed successfully!";

/// Reads commands from `input` until EOF or `:quit`. Every search and sync runs
/// as its own task; all of them are awaited before returning.
pub async fn interactive<R>(client: &SearchClient, input: R) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    client.warmup();
    println!("Type a query to search. Commands: :sync, :health, :quit");

    let mut tasks = JoinSet::new();
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        while tasks.try_join_next().is_some() {}

        match line.trim() {
            "" => continue,
            ":quit" | ":q" => break,
            ":health" => {
                client.warmup();
            }
            ":sync" => {
                let client = client.clone();
                tasks.spawn(async move {
                    if client.sync().await.is_ok() {
                        println!("{SYNC_DONE}");
                    }
                    print!("{}", client.view().await);
                });
            }
            query => {
                let client = client.clone();
                let query = query.to_string();
                tasks.spawn(async move {
                    if client.search(&query).await == Submission::Applied {
                        print!("{}", client.view().await);
                    }
                });
            }
        }
    }

    if !tasks.is_empty() {
        log::debug!("waiting for {} pending operations", tasks.len());
    }
    while let Some(res) = tasks.join_next().await {
        if let Err(e) = res {
            log::error!("operation task failed: {e}");
        }
    }
    Ok(())
}

/// Triggers a sync and prints the outcome. The error is handed back so the
/// caller can exit non-zero.
pub async fn sync_once(client: &SearchClient) -> Result<(), RequestError> {
    match client.sync().await {
        Ok(_) => {
            println!("{SYNC_DONE}");
            Ok(())
        }
        Err(e) => {
            print!("{}", client.view().await);
            Err(e)
        }
    }
}
