//! Semantic matching over precomputed article embeddings
//!
//! A linear cosine-similarity scan over the candidate set, not an ANN
//! index. Per-article score is the max-with-boost combination of the
//! available field similarities: `max(title_sim * title_boost,
//! content_sim)`, which favors any strong single-field match and does not
//! penalize articles missing one embedding.

use std::cmp::Ordering;

use tracing::{debug, warn};

use super::embedding::Embedder;
use super::similarity::cosine_similarity;
use super::types::ScoredCandidate;
use crate::config::SearchConfig;
use crate::store::Article;

/// Semantic matcher scoring candidates against a query embedding.
pub struct SemanticSearch {
    threshold: f32,
    title_boost: f32,
    dimension: usize,
}

impl SemanticSearch {
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            threshold: config.similarity_threshold,
            title_boost: config.title_boost,
            dimension: config.embedding_dim,
        }
    }

    /// Rank candidates by similarity to the query.
    ///
    /// `None` means the query could not be embedded; the engine degrades
    /// the mode, this matcher never falls back on its own. Candidates with
    /// no usable embedding are excluded rather than scored zero.
    pub fn rank<'a, E: Embedder>(
        &self,
        embedder: &E,
        query: &str,
        candidates: &'a [Article],
    ) -> Option<Vec<ScoredCandidate<'a>>> {
        let query_vector = embedder.embed(query)?;

        let mut scored: Vec<ScoredCandidate> = candidates
            .iter()
            .filter_map(|article| {
                let score = self.score(&query_vector, article)?;
                (score > self.threshold).then_some(ScoredCandidate { article, score })
            })
            .collect();

        sort_scored(&mut scored);
        debug!(
            "Semantic scan: {} of {} candidates above threshold {}",
            scored.len(),
            candidates.len(),
            self.threshold
        );
        Some(scored)
    }

    /// Articles similar to a reference embedding.
    ///
    /// Inclusive threshold, unlike query search: a related article at
    /// exactly the cutoff still counts.
    pub fn related<'a>(
        &self,
        reference: &[f32],
        candidates: &'a [Article],
        threshold: f32,
        limit: usize,
    ) -> Vec<ScoredCandidate<'a>> {
        let mut scored: Vec<ScoredCandidate> = candidates
            .iter()
            .filter_map(|article| {
                let score = self.score(reference, article)?;
                (score >= threshold).then_some(ScoredCandidate { article, score })
            })
            .collect();

        sort_scored(&mut scored);
        scored.truncate(limit);
        scored
    }

    /// Best available field similarity; `None` when the article has no
    /// embedding of the expected dimension.
    fn score(&self, query: &[f32], article: &Article) -> Option<f32> {
        let mut best: Option<f32> = None;

        if let Some(title_vec) = &article.title_embedding {
            if title_vec.len() == self.dimension {
                let sim = cosine_similarity(query, title_vec) * self.title_boost;
                best = Some(sim);
            } else {
                warn!(
                    "Skipping title embedding of article {}: dimension {} != {}",
                    article.id,
                    title_vec.len(),
                    self.dimension
                );
            }
        }

        if let Some(content_vec) = &article.content_embedding {
            if content_vec.len() == self.dimension {
                let sim = cosine_similarity(query, content_vec);
                best = Some(best.map_or(sim, |b| b.max(sim)));
            } else {
                warn!(
                    "Skipping content embedding of article {}: dimension {} != {}",
                    article.id,
                    content_vec.len(),
                    self.dimension
                );
            }
        }

        best
    }
}

/// Score descending, ties by recency.
fn sort_scored(scored: &mut [ScoredCandidate]) {
    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| b.article.created_at.cmp(&a.article.created_at))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    /// Embedder stub returning fixed vectors keyed by text.
    struct StubEmbedder {
        vector: Option<Vec<f32>>,
    }

    impl Embedder for StubEmbedder {
        fn dimension(&self) -> usize {
            4
        }

        fn embed(&self, text: &str) -> Option<Vec<f32>> {
            if text.trim().is_empty() {
                return None;
            }
            self.vector.clone()
        }
    }

    fn config() -> SearchConfig {
        SearchConfig::new().with_embedding_dim(4)
    }

    fn article(title: &str, title_vec: Option<Vec<f32>>, content_vec: Option<Vec<f32>>) -> Article {
        let mut a = Article::new(title, "energy").published();
        a.title_embedding = title_vec;
        a.content_embedding = content_vec;
        a
    }

    #[test]
    fn test_rank_scores_and_thresholds() {
        let candidates = vec![
            // title similarity 1.0 -> boosted to 1.2
            article("aligned", Some(vec![1.0, 0.0, 0.0, 0.0]), None),
            // orthogonal, score 0 <= 0.3 -> dropped
            article("orthogonal", Some(vec![0.0, 1.0, 0.0, 0.0]), None),
            // content-only, similarity 1.0 unboosted
            article("content only", None, Some(vec![1.0, 0.0, 0.0, 0.0])),
            // no embeddings at all -> excluded, never scored zero-and-kept
            article("bare", None, None),
        ];

        let embedder = StubEmbedder {
            vector: Some(vec![1.0, 0.0, 0.0, 0.0]),
        };
        let search = SemanticSearch::new(&config());
        let results = search.rank(&embedder, "sunlight", &candidates).unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].article.title, "aligned");
        assert!((results[0].score - 1.2).abs() < 1e-6);
        assert_eq!(results[1].article.title, "content only");
        assert!((results[1].score - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_rank_none_when_query_unembeddable() {
        let candidates = vec![article("a", Some(vec![1.0, 0.0, 0.0, 0.0]), None)];
        let embedder = StubEmbedder { vector: None };
        let search = SemanticSearch::new(&config());

        assert!(search.rank(&embedder, "anything", &candidates).is_none());
    }

    #[test]
    fn test_wrong_dimension_embedding_is_skipped() {
        let candidates = vec![article("bad dims", Some(vec![1.0, 0.0]), None)];
        let embedder = StubEmbedder {
            vector: Some(vec![1.0, 0.0, 0.0, 0.0]),
        };
        let search = SemanticSearch::new(&config());

        let results = search.rank(&embedder, "query", &candidates).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_ties_broken_by_recency() {
        let mut older = article("older", Some(vec![1.0, 0.0, 0.0, 0.0]), None);
        older.created_at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut newer = article("newer", Some(vec![1.0, 0.0, 0.0, 0.0]), None);
        newer.created_at = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();

        let candidates = vec![older, newer];
        let embedder = StubEmbedder {
            vector: Some(vec![1.0, 0.0, 0.0, 0.0]),
        };
        let search = SemanticSearch::new(&config());

        let results = search.rank(&embedder, "query", &candidates).unwrap();
        assert_eq!(results[0].article.title, "newer");
    }

    #[test]
    fn test_related_inclusive_threshold_and_limit() {
        let candidates = vec![
            article("exact", Some(vec![1.0, 0.0, 0.0, 0.0]), None),
            article("half", Some(vec![1.0, 1.0, 0.0, 0.0]), None),
        ];
        let search = SemanticSearch::new(&config());
        let reference = vec![1.0, 0.0, 0.0, 0.0];

        // cos(reference, half) = 1/sqrt(2) ~ 0.707; boosted ~ 0.8485
        let results = search.related(&reference, &candidates, 0.848, 10);
        assert_eq!(results.len(), 2);

        let results = search.related(&reference, &candidates, 0.9, 10);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].article.title, "exact");

        let results = search.related(&reference, &candidates, 0.0, 1);
        assert_eq!(results.len(), 1);
    }
}
