use std::time::Duration;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use crate::config::Config;

pub mod error;
pub mod models;

use error::RequestError;
use models::{ErrorPayload, HealthStatus, SearchRequest, SearchResponse, SyncAck};

/// Thin HTTP client for the search backend's three endpoints.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: Client,
    base_url: String,
    health_timeout: Duration,
    search_timeout: Duration,
    sync_timeout: Duration,
    sync_content_type: String,
}

impl BackendClient {
    pub fn new(config: &Config) -> Self {
        Self {
            http: Client::new(),
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            health_timeout: config.health_timeout,
            search_timeout: config.search_timeout,
            sync_timeout: config.sync_timeout,
            sync_content_type: config.sync_content_type.clone(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `GET /health`. Any 2xx counts; the body is parsed if it looks familiar.
    pub async fn health(&self) -> Result<HealthStatus, RequestError> {
        let res = self
            .http
            .get(self.url("/health"))
            .timeout(self.health_timeout)
            .send()
            .await?;
        let res = check_status(res).await?;
        Ok(lenient_json(res).await)
    }

    /// `POST /search` with a JSON body and the extended cold-start timeout.
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, RequestError> {
        let res = self
            .http
            .post(self.url("/search"))
            .timeout(self.search_timeout)
            .json(request)
            .send()
            .await?;
        let res = check_status(res).await?;
        Ok(res.json::<SearchResponse>().await?)
    }

    /// `POST /sync?content_type=...`, no body.
    pub async fn sync(&self) -> Result<SyncAck, RequestError> {
        let res = self
            .http
            .post(self.url("/sync"))
            .query(&[("content_type", self.sync_content_type.as_str())])
            .timeout(self.sync_timeout)
            .send()
            .await?;
        let res = check_status(res).await?;
        Ok(lenient_json(res).await)
    }
}

async fn check_status(res: Response) -> Result<Response, RequestError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    // The body is best-effort; a timeout while reading it still counts as a timeout.
    let payload = match res.json::<ErrorPayload>().await {
        Ok(payload) => Some(payload),
        Err(e) if e.is_timeout() => return Err(RequestError::Timeout),
        Err(_) => None,
    };
    Err(RequestError::Status { status, payload })
}

async fn lenient_json<T: DeserializeOwned + Default>(res: Response) -> T {
    res.json::<T>().await.unwrap_or_else(|e| {
        log::debug!("ignoring unexpected response body: {e:#}");
        T::default()
    })
}
