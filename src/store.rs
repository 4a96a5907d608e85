//! Article corpus model and candidate access
//!
//! The search engine never owns or mutates the corpus. It reads candidate
//! sets through the [`CandidateSource`] capability; whatever backs that
//! capability (a database, a cache, [`MemoryStore`]) is responsible for
//! persistence, CRUD and bounding the candidate set size.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A published (or draft) article in the corpus.
///
/// Embeddings are precomputed by the ingestion pipeline and may be absent;
/// the search engine treats every field as read-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    /// Comma-separated tags
    pub tags: String,
    pub author: String,
    pub category: String,
    pub full_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_embedding: Option<Vec<f32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_embedding: Option<Vec<f32>>,
    pub is_published: bool,
    pub is_featured: bool,
    pub view_count: u64,
    pub created_at: DateTime<Utc>,
}

impl Article {
    pub fn new(title: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: String::new(),
            tags: String::new(),
            author: String::new(),
            category: category.into(),
            full_text: None,
            title_embedding: None,
            content_embedding: None,
            is_published: false,
            is_featured: false,
            view_count: 0,
            created_at: Utc::now(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags.join(", ");
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    pub fn with_full_text(mut self, full_text: impl Into<String>) -> Self {
        self.full_text = Some(full_text.into());
        self
    }

    pub fn with_title_embedding(mut self, embedding: Vec<f32>) -> Self {
        self.title_embedding = Some(embedding);
        self
    }

    pub fn with_content_embedding(mut self, embedding: Vec<f32>) -> Self {
        self.content_embedding = Some(embedding);
        self
    }

    pub fn with_view_count(mut self, views: u64) -> Self {
        self.view_count = views;
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn published(mut self) -> Self {
        self.is_published = true;
        self
    }

    pub fn featured(mut self) -> Self {
        self.is_featured = true;
        self
    }

    /// Tags split out of the comma-separated column.
    pub fn tag_list(&self) -> Vec<&str> {
        self.tags
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect()
    }
}

/// Filter passed to [`CandidateSource::fetch_candidates`].
#[derive(Debug, Clone, Default)]
pub struct CandidateFilter {
    pub published: bool,
    pub category: Option<String>,
}

impl CandidateFilter {
    /// Published articles only, any category.
    pub fn published() -> Self {
        Self {
            published: true,
            category: None,
        }
    }

    pub fn with_category(mut self, category: Option<String>) -> Self {
        self.category = category;
        self
    }
}

/// Read-only candidate access consumed by the search engine.
///
/// Implementations return a snapshot of whatever matches the filter at one
/// point in time; the engine makes no transactional assumptions about
/// concurrent writes to the corpus.
#[allow(async_fn_in_trait)]
pub trait CandidateSource {
    async fn fetch_candidates(&self, filter: &CandidateFilter) -> Result<Vec<Article>>;
}

/// In-memory candidate source.
///
/// Reference implementation for tests and small corpora; production
/// deployments implement [`CandidateSource`] over their own store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    articles: Vec<Article>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, article: Article) {
        self.articles.push(article);
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}

impl CandidateSource for MemoryStore {
    async fn fetch_candidates(&self, filter: &CandidateFilter) -> Result<Vec<Article>> {
        Ok(self
            .articles
            .iter()
            .filter(|a| a.is_published == filter.published)
            .filter(|a| {
                filter
                    .category
                    .as_deref()
                    .is_none_or(|c| a.category == c)
            })
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_builder() {
        let article = Article::new("Solar Power Advances", "energy")
            .with_description("Breakthroughs in photovoltaics")
            .with_tags(vec!["solar".to_string(), "energy".to_string()])
            .with_author("J. Doe")
            .published()
            .featured();

        assert_eq!(article.title, "Solar Power Advances");
        assert_eq!(article.tag_list(), vec!["solar", "energy"]);
        assert!(article.is_published);
        assert!(article.is_featured);
        assert_eq!(article.view_count, 0);
    }

    #[tokio::test]
    async fn test_memory_store_filters() {
        let mut store = MemoryStore::new();
        store.insert(Article::new("Published Energy", "energy").published());
        store.insert(Article::new("Draft Energy", "energy"));
        store.insert(Article::new("Published Tech", "tech").published());

        let all_published = store
            .fetch_candidates(&CandidateFilter::published())
            .await
            .unwrap();
        assert_eq!(all_published.len(), 2);

        let energy_only = store
            .fetch_candidates(
                &CandidateFilter::published().with_category(Some("energy".to_string())),
            )
            .await
            .unwrap();
        assert_eq!(energy_only.len(), 1);
        assert_eq!(energy_only[0].title, "Published Energy");
    }
}
