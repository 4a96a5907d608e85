//! Error types for search operations
//!
//! Embedding and model faults never surface here: they are absorbed at the
//! gateway and converted into mode degradation. Only malformed caller
//! input and candidate-store failures reach the caller.

use thiserror::Error;

/// Caller-visible error type for the search engine.
#[derive(Error, Debug)]
pub enum SearchError {
    /// Malformed query parameters (page < 1, zero page size)
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// The candidate store failed to produce a candidate set
    #[error("Candidate store error: {0}")]
    Store(#[from] anyhow::Error),
}

/// Result type alias for search operations
pub type Result<T> = std::result::Result<T, SearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = SearchError::InvalidQuery("page must be >= 1".to_string());
        assert_eq!(error.to_string(), "Invalid query: page must be >= 1");

        let error: SearchError = anyhow::anyhow!("connection refused").into();
        assert!(error.to_string().contains("connection refused"));
    }
}
