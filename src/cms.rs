//! Read-only access to the CMS delivery API. The search flow never calls this;
//! it backs the `entries` subcommand for inspecting what a sync would index.

use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::config::CmsConfig;

#[derive(Debug, Error)]
pub enum CmsError {
    #[error("missing CMS credential: {0}")]
    MissingCredential(&'static str),

    #[error("CMS returned {0}")]
    Status(reqwest::StatusCode),

    #[error("CMS request failed: {0}")]
    Request(#[from] reqwest::Error),
}

#[derive(Debug, Deserialize)]
struct EntriesResponse {
    #[serde(default)]
    entries: Vec<Value>,
}

#[derive(Debug, Clone)]
pub struct CmsClient {
    http: Client,
    base_url: String,
    api_key: String,
    delivery_token: String,
    environment: String,
}

impl CmsClient {
    pub fn new(config: &CmsConfig) -> Result<Self, CmsError> {
        let api_key = config
            .api_key
            .clone()
            .ok_or(CmsError::MissingCredential("CONTENTSTACK_STACK_API_KEY"))?;
        let delivery_token = config
            .delivery_token
            .clone()
            .ok_or(CmsError::MissingCredential("CONTENTSTACK_DELIVERY_TOKEN"))?;
        Ok(Self {
            http: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            delivery_token,
            environment: config.environment.clone(),
        })
    }

    pub fn entries_url(&self, content_type: &str) -> String {
        format!("{}/content_types/{}/entries", self.base_url, content_type)
    }

    pub async fn entries(&self, content_type: &str) -> Result<Vec<Value>, CmsError> {
        let res = self
            .http
            .get(self.entries_url(content_type))
            .query(&[("environment", self.environment.as_str())])
            .header("api_key", &self.api_key)
            .header("access_token", &self.delivery_token)
            .send()
            .await?;
        if !res.status().is_success() {
            return Err(CmsError::Status(res.status()));
        }
        let body: EntriesResponse = res.json().await?;
        log::info!(
            "fetched {} {content_type} entries from {}",
            body.entries.len(),
            self.environment
        );
        Ok(body.entries)
    }
}
