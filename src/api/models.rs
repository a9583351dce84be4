use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Number of results requested per search.
pub const TOP_K: u32 = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    pub top_k: u32,
    pub rewrite: bool,
}

impl SearchRequest {
    /// Builds a request for `query`, or `None` if it is blank after trimming.
    pub fn new(query: &str) -> Option<SearchRequest> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }
        Some(SearchRequest {
            query: query.to_string(),
            top_k: TOP_K,
            rewrite: true,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Option<Vec<SearchResult>>,
    #[serde(default)]
    pub expanded_queries: Option<Vec<String>>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub total_results: Option<usize>,
}

impl SearchResponse {
    pub const DEMO_MODE: &'static str = "demo_mode";

    pub fn is_demo_mode(&self) -> bool {
        self.status.as_deref() == Some(Self::DEMO_MODE)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default, deserialize_with = "string_or_number")]
    pub product_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Anything other than a JSON number (e.g. `"$89.99"`) is treated as absent.
    #[serde(default, deserialize_with = "number_or_none")]
    pub price: Option<f64>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub query_used: Option<String>,
    #[serde(default)]
    pub metadata: ResultMetadata,
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

fn number_or_none<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(Value::deserialize(deserializer)?.as_f64())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultMetadata {
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Body the backend sends alongside a non-2xx status.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ErrorPayload {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorPayload {
    /// The text to show the user: `error` wins over `message`, blanks are skipped.
    pub fn text(&self) -> Option<&str> {
        [self.error.as_deref(), self.message.as_deref()]
            .into_iter()
            .flatten()
            .find(|s| !s.trim().is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct HealthStatus {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SyncAck {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub content_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_query_builds_no_request() {
        assert!(SearchRequest::new("").is_none());
        assert!(SearchRequest::new("   \t\n").is_none());
    }

    #[test]
    fn test_request_is_trimmed_with_fixed_knobs() {
        let req = SearchRequest::new("  red sneakers ").unwrap();
        assert_eq!(req.query, "red sneakers");
        assert_eq!(req.top_k, 10);
        assert!(req.rewrite);

        let body = serde_json::to_value(&req).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"query": "red sneakers", "top_k": 10, "rewrite": true})
        );
    }

    #[test]
    fn test_response_tolerates_missing_fields() {
        let resp: SearchResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.results.is_none());
        assert!(resp.expanded_queries.is_none());
        assert!(!resp.is_demo_mode());
    }

    #[test]
    fn test_result_parses_backend_shape() {
        let raw = r#"{
            "product_id": "demo_001",
            "name": "Demo Product",
            "title": "Search Result",
            "description": "",
            "price": 99.99,
            "category": "Demo",
            "brand": "Sample",
            "image_url": "",
            "score": 0.85,
            "query_used": "shoes"
        }"#;
        let result: SearchResult = serde_json::from_str(raw).unwrap();
        assert_eq!(result.product_id, "demo_001");
        assert_eq!(result.price, Some(99.99));
        assert_eq!(result.metadata, ResultMetadata::default());
    }

    #[test]
    fn test_result_tolerates_string_price_and_missing_id() {
        let raw = r#"{
            "results": [
                {"title": "Red High-Top Sneakers", "price": "$89.99", "score": 0.95},
                {"product_id": 7, "name": "Blue Runner", "price": null, "score": 0.5}
            ],
            "expanded_queries": ["red sneakers", "crimson trainers"]
        }"#;
        let resp: SearchResponse = serde_json::from_str(raw).unwrap();
        let results = resp.results.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].product_id, "");
        assert_eq!(results[0].title.as_deref(), Some("Red High-Top Sneakers"));
        assert_eq!(results[0].price, None);
        assert_eq!(results[1].product_id, "7");
        assert_eq!(results[1].price, None);
    }

    #[test]
    fn test_error_payload_prefers_error_field() {
        let payload: ErrorPayload =
            serde_json::from_str(r#"{"error": "Search service error", "message": "boom"}"#)
                .unwrap();
        assert_eq!(payload.text(), Some("Search service error"));

        let payload: ErrorPayload = serde_json::from_str(r#"{"message": "boom"}"#).unwrap();
        assert_eq!(payload.text(), Some("boom"));

        let payload: ErrorPayload = serde_json::from_str(r#"{"error": " "}"#).unwrap();
        assert_eq!(payload.text(), None);
    }
}
