//! UI state for the search screen and the transitions that mutate it.
//!
//! Every lifecycle event has its own function so each can be exercised
//! without a network or a terminal. `SearchClient` is the only caller outside
//! of tests.

use crate::api::error::SearchFailure;
use crate::api::models::{SearchResponse, SearchResult};

pub const DEMO_MODE_NOTICE: &str = "Showing demo results - search service is initializing";
pub const TIMEOUT_NOTICE: &str =
    "The search service may still be starting up. Please try again in a moment.";
pub const SEARCH_FAILED: &str = "Search failed. Please try again.";
pub const SYNC_FAILED: &str = "Sync failed. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    /// Non-fatal: demo mode or a cold-starting backend.
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Identifies one search submission. Only the latest ticket may land results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTicket(u64);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiState {
    /// The last submitted query, trimmed.
    pub query: String,
    pub results: Vec<SearchResult>,
    pub expanded_queries: Vec<String>,
    pub notice: Option<Notice>,
    pub searching: bool,
    pub syncing: bool,
    generation: u64,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn loading(&self) -> bool {
        self.searching || self.syncing
    }

    /// Text of the current notice, empty when there is none.
    pub fn error(&self) -> &str {
        self.notice.as_ref().map(|n| n.message.as_str()).unwrap_or("")
    }

    pub fn search_started(&mut self, query: &str) -> SearchTicket {
        self.generation += 1;
        self.query = query.to_string();
        self.searching = true;
        self.results.clear();
        self.expanded_queries.clear();
        self.notice = None;
        SearchTicket(self.generation)
    }

    fn is_current(&self, ticket: SearchTicket) -> bool {
        ticket.0 == self.generation
    }

    /// Returns false if a newer search has been submitted since `ticket`.
    pub fn search_succeeded(&mut self, ticket: SearchTicket, response: SearchResponse) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        if response.is_demo_mode() {
            let message = response
                .message
                .clone()
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| DEMO_MODE_NOTICE.to_string());
            self.notice = Some(Notice::info(message));
        }
        self.results = response.results.unwrap_or_default();
        self.expanded_queries = response.expanded_queries.unwrap_or_default();
        self.searching = false;
        true
    }

    /// Returns false if a newer search has been submitted since `ticket`.
    pub fn search_failed(&mut self, ticket: SearchTicket, failure: &SearchFailure) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.notice = Some(match failure {
            SearchFailure::Timeout => Notice::info(TIMEOUT_NOTICE),
            SearchFailure::Backend(text) => Notice::error(text.clone()),
            SearchFailure::Unknown(_) => Notice::error(SEARCH_FAILED),
        });
        self.searching = false;
        true
    }

    pub fn sync_started(&mut self) {
        self.syncing = true;
        self.notice = None;
    }

    pub fn sync_succeeded(&mut self) {
        self.syncing = false;
    }

    pub fn sync_failed(&mut self) {
        self.syncing = false;
        self.notice = Some(Notice::error(SYNC_FAILED));
    }
}
