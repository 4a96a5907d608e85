pub mod config;
pub mod error;
pub mod search;
pub mod store;

pub use config::{FieldWeights, SearchConfig};
pub use error::SearchError;
pub use search::{
    AdvancedQuery, Embedder, FastembedEmbedder, LexicalSearch, RankedPage, ScoreFusion,
    ScoredCandidate, SearchEngine, SearchMode, SearchQuery, SemanticSearch, SortOrder,
};
pub use store::{Article, CandidateFilter, CandidateSource, MemoryStore};
