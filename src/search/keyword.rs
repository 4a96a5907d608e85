//! Lexical substring matching over the candidate set
//!
//! A linear scan, not an inverted index: the candidate set is whatever the
//! store returned for the filter, and every candidate is tested against
//! every query term. Lexical relevance is not numerically scored; ranking
//! is the composite (featured, views, recency) order.

use std::collections::BTreeSet;

use tracing::debug;

use crate::config::FieldWeights;
use crate::store::Article;

/// Lexical matcher with configurable field participation.
pub struct LexicalSearch {
    weights: FieldWeights,
}

impl LexicalSearch {
    pub fn new(weights: FieldWeights) -> Self {
        Self { weights }
    }

    /// Split text into lowercase word tokens (alphanumeric/underscore runs).
    pub fn tokenize(text: &str) -> Vec<String> {
        text.to_lowercase()
            .split(|c: char| !(c.is_alphanumeric() || c == '_'))
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Rank candidates for a query.
    ///
    /// A candidate matches when any token appears as a substring of any
    /// participating field (OR of terms, OR of fields). A query with no
    /// word tokens returns the whole candidate set in composite order:
    /// deliberate policy so an all-punctuation query browses the corpus
    /// instead of dead-ending on zero results.
    pub fn rank<'a>(&self, query: &str, candidates: &'a [Article]) -> Vec<&'a Article> {
        let terms = Self::tokenize(query);

        let mut matched: Vec<&Article> = if terms.is_empty() {
            debug!("Query has no word tokens, returning unfiltered candidates");
            candidates.iter().collect()
        } else {
            candidates
                .iter()
                .filter(|a| self.matches(a, &terms))
                .collect()
        };

        sort_composite(&mut matched);
        matched
    }

    /// True when any term is a substring of any participating field.
    pub fn matches(&self, article: &Article, terms: &[String]) -> bool {
        let mut fields: Vec<String> = Vec::with_capacity(5);
        if self.weights.title > 0.0 {
            fields.push(article.title.to_lowercase());
        }
        if self.weights.description > 0.0 {
            fields.push(article.description.to_lowercase());
        }
        if self.weights.tags > 0.0 {
            fields.push(article.tags.to_lowercase());
        }
        if self.weights.full_text > 0.0 {
            if let Some(full_text) = &article.full_text {
                fields.push(full_text.to_lowercase());
            }
        }
        if self.weights.author > 0.0 {
            fields.push(article.author.to_lowercase());
        }

        terms
            .iter()
            .any(|term| fields.iter().any(|field| field.contains(term)))
    }

    /// Completion terms drawn from titles and tags.
    ///
    /// Words longer than 2 characters that start with the lowercased
    /// prefix, deduplicated and sorted. Prefixes shorter than 2 characters
    /// return nothing.
    pub fn suggest_terms(
        &self,
        candidates: &[Article],
        prefix: &str,
        limit: usize,
    ) -> Vec<String> {
        let prefix = prefix.trim().to_lowercase();
        if prefix.len() < 2 {
            return Vec::new();
        }

        let mut terms = BTreeSet::new();
        for article in candidates {
            for source in [article.title.as_str(), article.tags.as_str()] {
                for word in Self::tokenize(source) {
                    if word.len() > 2 && word.starts_with(&prefix) {
                        terms.insert(word);
                    }
                }
            }
        }

        terms.into_iter().take(limit).collect()
    }
}

impl Default for LexicalSearch {
    fn default() -> Self {
        Self::new(FieldWeights::default())
    }
}

/// Advanced-search text predicate: title, description and full text only.
pub fn matches_core_fields(article: &Article, terms: &[String]) -> bool {
    let title = article.title.to_lowercase();
    let description = article.description.to_lowercase();
    let full_text = article.full_text.as_deref().map(str::to_lowercase);

    terms.iter().any(|term| {
        title.contains(term)
            || description.contains(term)
            || full_text.as_deref().is_some_and(|f| f.contains(term))
    })
}

/// Composite relevance order: featured first, then views, then recency.
pub(crate) fn sort_composite(articles: &mut [&Article]) {
    articles.sort_by(|a, b| {
        b.is_featured
            .cmp(&a.is_featured)
            .then_with(|| b.view_count.cmp(&a.view_count))
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
}
