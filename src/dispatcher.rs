use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::api::BackendClient;
use crate::api::error::{RequestError, SearchFailure};
use crate::api::models::{SearchRequest, SyncAck};
use crate::config::Config;
use crate::render::View;
use crate::state::UiState;

/// What happened to a submitted query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Blank query: nothing was sent and nothing changed.
    Skipped,
    /// The response landed in the UI state.
    Applied,
    /// A newer search was submitted before this one completed.
    Superseded,
}

/// Drives the search screen: warms the backend up, dispatches searches and
/// triggers content syncs, all against one shared `UiState`.
///
/// The state lock is only taken to apply a transition, never across a
/// network call, so warmup, search and sync can all be in flight at once.
#[derive(Debug, Clone)]
pub struct SearchClient {
    backend: BackendClient,
    state: Arc<Mutex<UiState>>,
}

impl SearchClient {
    pub fn new(config: &Config) -> Self {
        Self::with_backend(BackendClient::new(config))
    }

    pub fn with_backend(backend: BackendClient) -> Self {
        Self {
            backend,
            state: Arc::new(Mutex::new(UiState::new())),
        }
    }

    pub fn backend(&self) -> &BackendClient {
        &self.backend
    }

    pub async fn snapshot(&self) -> UiState {
        self.state.lock().await.clone()
    }

    pub async fn view(&self) -> View {
        View::project(&*self.state.lock().await)
    }

    /// Pings `/health` in the background. The outcome is logged and never
    /// touches the UI state.
    pub fn warmup(&self) -> JoinHandle<()> {
        let backend = self.backend.clone();
        tokio::spawn(async move {
            log::info!("warming up search backend at {}", backend.base_url());
            match backend.health().await {
                Ok(health) => log::info!(
                    "search backend is up (status: {}, service: {}, version: {})",
                    health.status.as_deref().unwrap_or("?"),
                    health.service.as_deref().unwrap_or("?"),
                    health.version.as_deref().unwrap_or("?"),
                ),
                Err(e) => log::warn!("warmup health check failed: {:#}", e),
            }
        })
    }

    pub async fn search(&self, query: &str) -> Submission {
        let Some(request) = SearchRequest::new(query) else {
            return Submission::Skipped;
        };
        let ticket = self.state.lock().await.search_started(&request.query);
        log::info!("searching for {:?}", request.query);

        let result = self.backend.search(&request).await;

        let mut state = self.state.lock().await;
        let applied = match result {
            Ok(response) => {
                log::info!(
                    "search for {:?} returned {} results",
                    request.query,
                    response.results.as_ref().map_or(0, Vec::len)
                );
                if response.is_demo_mode() {
                    log::warn!("search backend answered in demo mode");
                }
                state.search_succeeded(ticket, response)
            }
            Err(e) => {
                log_search_error(&e);
                state.search_failed(ticket, &SearchFailure::from(&e))
            }
        };
        if applied {
            Submission::Applied
        } else {
            log::debug!("discarding stale response for {:?}", request.query);
            Submission::Superseded
        }
    }

    /// Asks the backend to refresh its index from the CMS.
    pub async fn sync(&self) -> Result<SyncAck, RequestError> {
        self.state.lock().await.sync_started();
        log::info!("triggering content sync");

        let result = self.backend.sync().await;

        let mut state = self.state.lock().await;
        match &result {
            Ok(ack) => {
                log::info!(
                    "content sync finished (status: {})",
                    ack.status.as_deref().unwrap_or("ok")
                );
                state.sync_succeeded();
            }
            Err(e) => {
                log::error!("sync error: {:#}", e);
                state.sync_failed();
            }
        }
        result
    }
}

fn log_search_error(e: &RequestError) {
    match e {
        RequestError::Timeout => log::warn!("search timed out, backend may be cold-starting"),
        other => log::error!("search error: {:#}", other),
    }
}
