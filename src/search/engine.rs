//! Unified search engine
//!
//! Dispatches a query to the lexical and/or semantic matchers, fuses in
//! hybrid mode, and pages the result. Semantic unavailability degrades the
//! mode for that query only: a search always returns a page, possibly
//! empty, and never surfaces an embedding fault.

use tracing::{debug, warn};

use super::embedding::Embedder;
use super::hybrid::ScoreFusion;
use super::keyword::{matches_core_fields, sort_composite, LexicalSearch};
use super::pagination::{paginate, RankedPage};
use super::types::{AdvancedQuery, SearchMode, SearchQuery, SortOrder};
use super::vector::SemanticSearch;
use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::store::{Article, CandidateFilter, CandidateSource};

/// Hybrid search engine over a candidate source and an embedder.
pub struct SearchEngine<S, E> {
    store: S,
    embedder: E,
    config: SearchConfig,
    lexical: LexicalSearch,
    semantic: SemanticSearch,
    fusion: ScoreFusion,
}

impl<S: CandidateSource, E: Embedder> SearchEngine<S, E> {
    pub fn new(store: S, embedder: E) -> Self {
        Self::with_config(store, embedder, SearchConfig::default())
    }

    pub fn with_config(store: S, embedder: E, config: SearchConfig) -> Self {
        let lexical = LexicalSearch::new(config.field_weights.clone());
        let semantic = SemanticSearch::new(&config);
        let fusion = ScoreFusion::new(&config);
        Self {
            store,
            embedder,
            config,
            lexical,
            semantic,
            fusion,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Evaluate a ranked, paginated query.
    ///
    /// Every query recomputes from a fresh candidate snapshot; nothing is
    /// cached across calls.
    pub async fn search(&self, query: &SearchQuery) -> Result<RankedPage, SearchError> {
        query.validate()?;

        let filter = CandidateFilter::published().with_category(query.category.clone());
        let candidates = self.store.fetch_candidates(&filter).await?;
        debug!(
            "Search mode {:?}: {} candidates for {:?}",
            query.mode,
            candidates.len(),
            filter.category
        );

        let ranked: Vec<&Article> = match query.mode {
            SearchMode::Lexical => self.lexical.rank(&query.text, &candidates),
            SearchMode::Semantic => {
                match self.semantic.rank(&self.embedder, &query.text, &candidates) {
                    Some(scored) => scored.into_iter().map(|c| c.article).collect(),
                    None => {
                        warn!("Query embedding unavailable, degrading to lexical search");
                        self.lexical.rank(&query.text, &candidates)
                    }
                }
            }
            SearchMode::Hybrid => {
                let lexical = self.lexical.rank(&query.text, &candidates);
                let semantic = self
                    .semantic
                    .rank(&self.embedder, &query.text, &candidates)
                    .unwrap_or_default();
                self.fusion
                    .fuse(&lexical, &semantic)
                    .into_iter()
                    .map(|c| c.article)
                    .collect()
            }
        };

        let page_size = query.page_size.unwrap_or(self.config.page_size);
        paginate(&ranked, query.page, page_size)
    }

    /// Completion terms for a prefix, drawn from published titles and tags.
    pub async fn suggestions(
        &self,
        prefix: &str,
        limit: usize,
    ) -> Result<Vec<String>, SearchError> {
        let candidates = self
            .store
            .fetch_candidates(&CandidateFilter::published())
            .await?;
        Ok(self.lexical.suggest_terms(&candidates, prefix, limit))
    }

    /// Published articles similar to a reference article.
    ///
    /// Uses the reference's content embedding, falling back to its title
    /// embedding; returns an empty list when the reference has neither.
    /// The reference itself is dropped before ranking so it never consumes
    /// one of the result slots.
    pub async fn related(&self, reference: &Article) -> Result<Vec<Article>, SearchError> {
        let Some(reference_vec) = reference
            .content_embedding
            .as_deref()
            .or(reference.title_embedding.as_deref())
        else {
            return Ok(Vec::new());
        };

        let filter = CandidateFilter::published()
            .with_category(Some(reference.category.clone()));
        let candidates: Vec<Article> = self
            .store
            .fetch_candidates(&filter)
            .await?
            .into_iter()
            .filter(|a| a.id != reference.id)
            .collect();

        Ok(self
            .semantic
            .related(
                reference_vec,
                &candidates,
                self.config.related_threshold,
                self.config.related_limit,
            )
            .into_iter()
            .map(|c| c.article.clone())
            .collect())
    }

    /// Filtered search with an explicit sort order.
    pub async fn advanced_search(&self, query: &AdvancedQuery) -> Result<RankedPage, SearchError> {
        query.validate()?;

        let filter = CandidateFilter::published().with_category(query.category.clone());
        let candidates = self.store.fetch_candidates(&filter).await?;

        let terms = query
            .text
            .as_deref()
            .map(LexicalSearch::tokenize)
            .unwrap_or_default();
        let author = query.author.as_deref().map(str::to_lowercase);

        let mut matched: Vec<&Article> = candidates
            .iter()
            .filter(|a| terms.is_empty() || matches_core_fields(a, &terms))
            .filter(|a| {
                author
                    .as_deref()
                    .is_none_or(|needle| a.author.to_lowercase().contains(needle))
            })
            .filter(|a| query.date_from.is_none_or(|from| a.created_at >= from))
            .filter(|a| query.date_to.is_none_or(|to| a.created_at <= to))
            .collect();

        match query.sort {
            SortOrder::Relevance => sort_composite(&mut matched),
            SortOrder::DateDesc => matched.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            SortOrder::DateAsc => matched.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
            SortOrder::Popular => matched.sort_by(|a, b| b.view_count.cmp(&a.view_count)),
            SortOrder::Title => matched
                .sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase())),
        }

        let page_size = query.page_size.unwrap_or(self.config.page_size);
        paginate(&matched, query.page, page_size)
    }
}
