use reqwest::StatusCode;
use thiserror::Error;

use super::models::ErrorPayload;

/// Anything that can go wrong talking to the search backend.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("request timed out")]
    Timeout,

    #[error("backend returned {status}")]
    Status {
        status: StatusCode,
        payload: Option<ErrorPayload>,
    },

    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("could not decode response: {0}")]
    Decode(#[source] reqwest::Error),
}

impl From<reqwest::Error> for RequestError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            RequestError::Timeout
        } else if e.is_decode() {
            RequestError::Decode(e)
        } else {
            RequestError::Transport(e)
        }
    }
}

/// How a failed search is presented to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchFailure {
    /// The backend is probably still cold-starting.
    #[error("timed out")]
    Timeout,
    /// The backend explained itself; shown verbatim.
    #[error("{0}")]
    Backend(String),
    /// Anything else. The detail is for logs only.
    #[error("unknown failure: {0}")]
    Unknown(String),
}

impl From<&RequestError> for SearchFailure {
    fn from(e: &RequestError) -> Self {
        match e {
            RequestError::Timeout => SearchFailure::Timeout,
            RequestError::Status {
                payload: Some(payload),
                ..
            } => match payload.text() {
                Some(text) => SearchFailure::Backend(text.to_string()),
                None => SearchFailure::Unknown(e.to_string()),
            },
            other => SearchFailure::Unknown(other.to_string()),
        }
    }
}
