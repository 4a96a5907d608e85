//! Embedding generation for semantic search
//!
//! The gateway wraps the embedding model behind a fail-soft contract: any
//! model fault, failed initialization or blank input yields `None`, never
//! an error. Callers react to `None` by degrading the query to lexical
//! matching.

use std::sync::OnceLock;

use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use tracing::{info, warn};

use crate::config::SearchConfig;

/// Embedding capability consumed by the semantic matcher.
pub trait Embedder {
    /// Dimension of the vectors this embedder produces.
    fn dimension(&self) -> usize;

    /// Embed one text. `None` on blank input or any model failure.
    fn embed(&self, text: &str) -> Option<Vec<f32>>;

    /// Embed several texts, one result per input in input order. An
    /// element failing (blank input, model fault) yields `None` in its
    /// position without affecting the others.
    fn embed_batch(&self, texts: &[&str]) -> Vec<Option<Vec<f32>>> {
        texts.iter().map(|t| self.embed(t)).collect()
    }
}

/// Embedding model wrapper with a lazy, process-lifetime model handle.
///
/// The handle is initialized at most once: concurrent first callers
/// coordinate on the `OnceLock`, and an initialization failure is cached
/// (and logged once) so later calls return `None` without retrying the
/// expensive load. After initialization the handle is read-only; fastembed
/// inference takes `&self`, so concurrent `embed` calls may proceed in
/// parallel.
pub struct FastembedEmbedder {
    model_name: EmbeddingModel,
    dimension: usize,
    max_tokens: usize,
    model: OnceLock<Option<TextEmbedding>>,
}

impl FastembedEmbedder {
    /// Default model: AllMiniLML6V2 (384 dimensions).
    pub fn new() -> Self {
        Self::with_model(EmbeddingModel::AllMiniLML6V2)
    }

    /// Default model with the truncation window taken from the engine
    /// configuration.
    pub fn from_config(config: &SearchConfig) -> Self {
        Self::new().with_max_tokens(config.max_embed_tokens)
    }

    /// Create with a specific model.
    pub fn with_model(model_name: EmbeddingModel) -> Self {
        let dimension = match model_name {
            EmbeddingModel::MultilingualE5Small => 384,
            EmbeddingModel::MultilingualE5Base => 768,
            EmbeddingModel::MultilingualE5Large => 1024,
            EmbeddingModel::AllMiniLML6V2 => 384,
            EmbeddingModel::BGESmallENV15 => 384,
            EmbeddingModel::BGEBaseENV15 => 768,
            _ => 384, // default
        };

        Self {
            model_name,
            dimension,
            max_tokens: 512,
            model: OnceLock::new(),
        }
    }

    /// Override the truncation window (whitespace tokens).
    pub fn with_max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Lazily initialized model handle; `None` forever after a failed load.
    fn model(&self) -> Option<&TextEmbedding> {
        self.model
            .get_or_init(|| {
                info!("Loading embedding model: {:?}", self.model_name);

                let mut options = InitOptions::default();
                options.model_name = self.model_name.clone();
                options.show_download_progress = false;

                match TextEmbedding::try_new(options) {
                    Ok(model) => Some(model),
                    Err(e) => {
                        warn!("Failed to load embedding model, semantic search disabled: {e}");
                        None
                    }
                }
            })
            .as_ref()
    }

    /// Collapse runs of whitespace and truncate to the token window.
    fn preprocess(&self, text: &str) -> String {
        text.split_whitespace()
            .take(self.max_tokens)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for FastembedEmbedder {
    fn default() -> Self {
        Self::new()
    }
}

impl Embedder for FastembedEmbedder {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn embed(&self, text: &str) -> Option<Vec<f32>> {
        let cleaned = self.preprocess(text);
        if cleaned.is_empty() {
            return None;
        }

        let model = self.model()?;
        match model.embed(vec![cleaned], None) {
            Ok(mut embeddings) if !embeddings.is_empty() => Some(embeddings.remove(0)),
            Ok(_) => None,
            Err(e) => {
                warn!("Embedding generation failed: {e}");
                None
            }
        }
    }

    fn embed_batch(&self, texts: &[&str]) -> Vec<Option<Vec<f32>>> {
        let cleaned: Vec<Option<String>> = texts
            .iter()
            .map(|t| {
                let c = self.preprocess(t);
                (!c.is_empty()).then_some(c)
            })
            .collect();

        let inputs: Vec<&str> = cleaned.iter().flatten().map(String::as_str).collect();
        if inputs.is_empty() {
            return vec![None; texts.len()];
        }

        let Some(model) = self.model() else {
            return vec![None; texts.len()];
        };

        match model.embed(inputs, None) {
            Ok(vectors) => {
                // Scatter results back to the positions of non-blank inputs
                let mut vectors = vectors.into_iter();
                cleaned
                    .iter()
                    .map(|c| c.as_ref().and_then(|_| vectors.next()))
                    .collect()
            }
            Err(e) => {
                warn!("Batch embedding generation failed: {e}");
                vec![None; texts.len()]
            }
        }
    }
}
