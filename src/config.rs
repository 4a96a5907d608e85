//! Engine configuration
//!
//! All ranking constants live here: fusion weights, positional decay,
//! similarity threshold, lexical field weights and the embedding window.
//! Configuration is fixed for the life of the engine; there is no dynamic
//! reconfiguration.

/// Per-field participation weights for lexical matching.
///
/// Lexical relevance is not numerically scored, so a weight only gates
/// whether a field is searched at all: a field with weight 0 is excluded
/// from matching.
#[derive(Debug, Clone)]
pub struct FieldWeights {
    pub title: f32,
    pub description: f32,
    pub tags: f32,
    pub full_text: f32,
    pub author: f32,
}

impl Default for FieldWeights {
    fn default() -> Self {
        Self {
            title: 1.0,
            description: 1.0,
            tags: 1.0,
            full_text: 1.0,
            author: 1.0,
        }
    }
}

/// Configuration for the hybrid search engine.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Items per result page when the query does not request a size
    pub page_size: usize,
    /// Expected embedding dimension; vectors of any other length are skipped
    pub embedding_dim: usize,
    /// Maximum whitespace tokens fed to the embedding model
    pub max_embed_tokens: usize,
    /// Minimum combined similarity for a semantic match (strict: score must exceed it)
    pub similarity_threshold: f32,
    /// Multiplier applied to title similarity in max-with-boost scoring
    pub title_boost: f32,
    /// Positional score decay per rank in hybrid fusion
    pub decay: f32,
    /// Weight of the lexical positional score in hybrid fusion
    pub lexical_weight: f32,
    /// Weight of the semantic positional score in hybrid fusion
    pub semantic_weight: f32,
    /// Minimum best-field similarity for related-article lookup (inclusive)
    pub related_threshold: f32,
    /// Maximum related articles returned
    pub related_limit: usize,
    /// Lexical field participation weights
    pub field_weights: FieldWeights,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            page_size: 12,
            embedding_dim: 384,
            max_embed_tokens: 512,
            similarity_threshold: 0.3,
            title_boost: 1.2,
            decay: 0.1,
            lexical_weight: 0.6,
            semantic_weight: 0.4,
            related_threshold: 0.5,
            related_limit: 10,
            field_weights: FieldWeights::default(),
        }
    }
}

impl SearchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_embedding_dim(mut self, dim: usize) -> Self {
        self.embedding_dim = dim;
        self
    }

    pub fn with_max_embed_tokens(mut self, max_tokens: usize) -> Self {
        self.max_embed_tokens = max_tokens;
        self
    }

    pub fn with_related_limit(mut self, limit: usize) -> Self {
        self.related_limit = limit;
        self
    }

    pub fn with_similarity_threshold(mut self, threshold: f32) -> Self {
        self.similarity_threshold = threshold;
        self
    }

    pub fn with_fusion_weights(mut self, lexical: f32, semantic: f32) -> Self {
        self.lexical_weight = lexical;
        self.semantic_weight = semantic;
        self
    }

    pub fn with_decay(mut self, decay: f32) -> Self {
        self.decay = decay;
        self
    }

    pub fn with_field_weights(mut self, weights: FieldWeights) -> Self {
        self.field_weights = weights;
        self
    }
}
