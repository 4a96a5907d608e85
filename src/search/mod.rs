//! Hybrid retrieval and ranking
//!
//! Lexical substring matching and embedding similarity over an in-memory
//! candidate set, fused by positional score in hybrid mode and paged into
//! a [`RankedPage`].

pub mod embedding;
pub mod engine;
pub mod hybrid;
pub mod keyword;
pub mod pagination;
pub mod similarity;
pub mod types;
pub mod vector;

pub use embedding::{Embedder, FastembedEmbedder};
pub use engine::SearchEngine;
pub use hybrid::ScoreFusion;
pub use keyword::LexicalSearch;
pub use pagination::{paginate, RankedPage};
pub use similarity::{cosine_similarity, norm};
pub use types::{AdvancedQuery, ScoredCandidate, SearchMode, SearchQuery, SortOrder};
pub use vector::SemanticSearch;
