//! Paging over a fully-ranked in-memory list
//!
//! One pager for all three search modes: pure slicing plus metadata,
//! derived per query and never stored.

use serde::{Deserialize, Serialize};

use super::types::validate_paging;
use crate::error::SearchError;
use crate::store::Article;

/// One page of a ranked result set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedPage {
    pub items: Vec<Article>,
    /// 1-based page number as requested
    pub page: usize,
    pub page_size: usize,
    /// Total matches across all pages
    pub total_count: usize,
    pub page_count: usize,
    pub has_prev: bool,
    pub has_next: bool,
}

/// Slice a ranked list into one page.
///
/// An out-of-range `page` yields empty `items` with still-correct
/// metadata. `page < 1` and `page_size == 0` are caller errors, rejected
/// rather than clamped; the calling layer owns any coercion.
pub fn paginate(
    ranked: &[&Article],
    page: usize,
    page_size: usize,
) -> Result<RankedPage, SearchError> {
    validate_paging(page, page_size)?;

    let total_count = ranked.len();
    let page_count = (total_count + page_size - 1) / page_size;

    let start = (page - 1).saturating_mul(page_size);
    let items = if start >= total_count {
        Vec::new()
    } else {
        let end = (start + page_size).min(total_count);
        ranked[start..end].iter().map(|a| (*a).clone()).collect()
    };

    Ok(RankedPage {
        items,
        page,
        page_size,
        total_count,
        page_count,
        has_prev: page > 1,
        has_next: page < page_count,
    })
}
