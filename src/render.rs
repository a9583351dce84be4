use std::fmt;

use crate::api::models::SearchResult;
use crate::state::{Notice, NoticeLevel, UiState};

/// Everything the screen shows, derived from a `UiState` and nothing else.
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub loading: bool,
    pub banner: Option<Notice>,
    /// Only populated when the backend expanded the query into two or more variants.
    pub expanded_queries: Vec<String>,
    pub cards: Vec<ResultCard>,
    pub empty_state: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultCard {
    pub product_id: String,
    pub heading: String,
    pub score: String,
    pub description: Option<String>,
    pub price: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub content_type: Option<String>,
    pub found_via: Option<String>,
    pub link: Option<String>,
}

impl View {
    pub fn project(state: &UiState) -> View {
        let loading = state.loading();
        let expanded_queries = if state.expanded_queries.len() > 1 {
            state.expanded_queries.clone()
        } else {
            Vec::new()
        };
        let cards: Vec<ResultCard> = state
            .results
            .iter()
            .map(|r| ResultCard::project(r, &state.query))
            .collect();
        let empty_state =
            cards.is_empty() && !loading && !state.query.is_empty() && state.notice.is_none();

        View {
            loading,
            banner: state.notice.clone(),
            expanded_queries,
            cards,
            empty_state,
        }
    }
}

fn non_empty(s: &Option<String>) -> Option<String> {
    s.as_ref().filter(|s| !s.is_empty()).cloned()
}

impl ResultCard {
    pub fn project(result: &SearchResult, submitted_query: &str) -> ResultCard {
        let heading = non_empty(&result.name)
            .or_else(|| non_empty(&result.title))
            .unwrap_or_else(|| format!("Product {}", result.product_id));
        let found_via = non_empty(&result.query_used).filter(|q| q != submitted_query);

        ResultCard {
            product_id: result.product_id.clone(),
            heading,
            score: format!("Score: {:.1}%", result.score * 100.0),
            description: non_empty(&result.description),
            price: result.price.filter(|p| *p > 0.0).map(|p| format!("${p}")),
            category: non_empty(&result.category),
            brand: non_empty(&result.brand),
            content_type: non_empty(&result.metadata.content_type),
            found_via,
            link: non_empty(&result.metadata.url),
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.loading {
            writeln!(f, "... working")?;
        }
        if let Some(notice) = &self.banner {
            match notice.level {
                NoticeLevel::Info => writeln!(f, "[info] {}", notice.message)?,
                NoticeLevel::Error => writeln!(f, "[error] {}", notice.message)?,
            }
        }
        if !self.expanded_queries.is_empty() {
            writeln!(f, "Search expanded to: {}", self.expanded_queries.join(" | "))?;
        }
        if !self.cards.is_empty() {
            writeln!(f, "Search Results ({})", self.cards.len())?;
            for card in &self.cards {
                write!(f, "{card}")?;
            }
        }
        if self.empty_state {
            writeln!(f, "Continue exploring")?;
            writeln!(
                f,
                "Try searching with different keywords to discover more products."
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for ResultCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "  {}  ({})", self.heading, self.score)?;
        if let Some(description) = &self.description {
            writeln!(f, "  {description}")?;
        }
        let details: Vec<&str> = [&self.price, &self.category, &self.brand]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .collect();
        if !details.is_empty() {
            writeln!(f, "  {}", details.join("  "))?;
        }
        match &self.content_type {
            Some(ct) => writeln!(f, "  ID: {}  {ct}", self.product_id)?,
            None => writeln!(f, "  ID: {}", self.product_id)?,
        }
        if let Some(q) = &self.found_via {
            writeln!(f, "  Found via: \"{q}\"")?;
        }
        if let Some(link) = &self.link {
            writeln!(f, "  View Product -> {link}")?;
        }
        Ok(())
    }
}
