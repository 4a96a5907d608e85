//! Common types for the search module

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SearchError;
use crate::store::Article;

/// Search engine mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    /// Substring keyword matching only (no embedding model required)
    #[default]
    Lexical,
    /// Embedding similarity only (degrades to lexical when unavailable)
    Semantic,
    /// Both matchers fused by positional score
    Hybrid,
}

/// Sort order for advanced search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// The lexical composite: featured, then views, then recency
    #[default]
    Relevance,
    DateDesc,
    DateAsc,
    /// View count descending
    Popular,
    /// Title ascending, case-insensitive
    Title,
}

/// A ranked search query.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    /// Raw query text; may be empty
    pub text: String,
    /// Restrict candidates to one category
    pub category: Option<String>,
    pub mode: SearchMode,
    /// 1-based page number
    pub page: usize,
    /// Items per page; `None` uses the engine's configured default
    pub page_size: Option<usize>,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            category: None,
            mode: SearchMode::default(),
            page: 1,
            page_size: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_mode(mut self, mode: SearchMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Reject malformed paging before any candidate work happens.
    pub fn validate(&self) -> Result<(), SearchError> {
        validate_requested_paging(self.page, self.page_size)
    }
}

/// Advanced search with field filters and explicit sort order.
#[derive(Debug, Clone, Default)]
pub struct AdvancedQuery {
    /// Optional query text matched against title, description and full text
    pub text: Option<String>,
    /// Case-insensitive author substring
    pub author: Option<String>,
    pub category: Option<String>,
    /// Inclusive lower bound on `created_at`
    pub date_from: Option<DateTime<Utc>>,
    /// Inclusive upper bound on `created_at`
    pub date_to: Option<DateTime<Utc>>,
    pub sort: SortOrder,
    pub page: usize,
    /// Items per page; `None` uses the engine's configured default
    pub page_size: Option<usize>,
}

impl AdvancedQuery {
    pub fn new() -> Self {
        Self {
            page: 1,
            ..Default::default()
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_date_range(
        mut self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Self {
        self.date_from = from;
        self.date_to = to;
        self
    }

    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn validate(&self) -> Result<(), SearchError> {
        validate_requested_paging(self.page, self.page_size)
    }
}

/// Query-level check: a query may leave `page_size` to the engine default,
/// but an explicit zero is still rejected.
pub(crate) fn validate_requested_paging(
    page: usize,
    page_size: Option<usize>,
) -> Result<(), SearchError> {
    validate_paging(page, page_size.unwrap_or(1))
}

pub(crate) fn validate_paging(page: usize, page_size: usize) -> Result<(), SearchError> {
    if page < 1 {
        return Err(SearchError::InvalidQuery("page must be >= 1".to_string()));
    }
    if page_size == 0 {
        return Err(SearchError::InvalidQuery(
            "page_size must be > 0".to_string(),
        ));
    }
    Ok(())
}

/// A candidate article with its relevance score.
///
/// Transient: created during one query evaluation and discarded with the
/// response. Scores are never cached across queries.
#[derive(Debug, Clone, Copy)]
pub struct ScoredCandidate<'a> {
    pub article: &'a Article,
    pub score: f32,
}
