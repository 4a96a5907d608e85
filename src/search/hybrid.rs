//! Positional-decay fusion of lexical and semantic rankings
//!
//! The lexical matcher produces an order but no numeric score, so fusion
//! works on rank positions (the reciprocal-rank-fusion family) rather
//! than raw scores: each item earns `1.0 - rank_index * decay`, clamped
//! at zero, and the two lists are blended with fixed weights. An article
//! found by only one matcher keeps a zero for the missing term, so a
//! both-list match typically outranks a single-list one.

use std::collections::HashMap;

use uuid::Uuid;

use super::types::ScoredCandidate;
use crate::config::SearchConfig;
use crate::store::Article;

/// Rank-based fusion of the two matcher outputs.
pub struct ScoreFusion {
    decay: f32,
    lexical_weight: f32,
    semantic_weight: f32,
}

impl ScoreFusion {
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            decay: config.decay,
            lexical_weight: config.lexical_weight,
            semantic_weight: config.semantic_weight,
        }
    }

    /// Positional score for a 0-based rank: `1.0 - rank * decay`, floored
    /// at zero so long lists never go negative.
    pub fn positional_score(&self, rank: usize) -> f32 {
        (1.0 - rank as f32 * self.decay).max(0.0)
    }

    /// Fuse the ranked lists into one deduplicated ordering.
    ///
    /// Each article id appears exactly once. Sorted descending by combined
    /// score; ties keep first-seen order (lexical list first), which the
    /// stable sort preserves.
    pub fn fuse<'a>(
        &self,
        lexical: &[&'a Article],
        semantic: &[ScoredCandidate<'a>],
    ) -> Vec<ScoredCandidate<'a>> {
        let mut order: Vec<(&Article, f32, f32)> = Vec::new();
        let mut seen: HashMap<Uuid, usize> = HashMap::new();

        for (rank, article) in lexical.iter().enumerate() {
            let slot = order.len();
            seen.insert(article.id, slot);
            order.push((article, self.positional_score(rank), 0.0));
        }

        for (rank, candidate) in semantic.iter().enumerate() {
            let score = self.positional_score(rank);
            match seen.get(&candidate.article.id) {
                Some(&slot) => order[slot].2 = score,
                None => {
                    seen.insert(candidate.article.id, order.len());
                    order.push((candidate.article, 0.0, score));
                }
            }
        }

        let mut fused: Vec<ScoredCandidate> = order
            .into_iter()
            .map(|(article, lex, sem)| ScoredCandidate {
                article,
                score: lex * self.lexical_weight + sem * self.semantic_weight,
            })
            .collect();

        fused.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        fused
    }
}
