//! Configuration types for the generation service.

use serde::{Deserialize, Serialize};

use crate::{
    DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE, DEFAULT_CURATION_BATCH_SIZE,
    DEFAULT_CURATION_DELAY_MS, DEFAULT_CURATION_TEMPERATURE, DEFAULT_CURATION_THRESHOLD,
    DEFAULT_GENERATION_BATCH_SIZE, DEFAULT_GENERATION_TEMPERATURE, DEFAULT_MAX_SEQ_LEN,
};

/// Configuration for the summarization and QA generation stages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Maximum chunk size in characters
    pub chunk_size: usize,

    /// Characters of overlap between consecutive chunks
    pub overlap: usize,

    /// Prompt sets per gateway batch
    pub batch_size: usize,

    /// Sampling temperature for generation calls
    pub temperature: f32,

    /// Maximum working length for a single completion input, in characters
    pub max_seq_len: usize,

    /// Whether to ingest chunks into the vector store during summarization
    pub enable_rag: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            overlap: DEFAULT_CHUNK_OVERLAP,
            batch_size: DEFAULT_GENERATION_BATCH_SIZE,
            temperature: DEFAULT_GENERATION_TEMPERATURE,
            max_seq_len: DEFAULT_MAX_SEQ_LEN,
            enable_rag: false,
        }
    }
}

impl GenerationConfig {
    /// Load generation settings from environment variables.
    pub fn from_env() -> Self {
        Self {
            chunk_size: std::env::var("CHUNK_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_CHUNK_SIZE),
            overlap: std::env::var("CHUNK_OVERLAP")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_CHUNK_OVERLAP),
            batch_size: std::env::var("GENERATION_BATCH_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_GENERATION_BATCH_SIZE),
            temperature: std::env::var("GENERATION_TEMPERATURE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_GENERATION_TEMPERATURE),
            max_seq_len: std::env::var("MAX_SEQ_LEN")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_MAX_SEQ_LEN),
            enable_rag: std::env::var("ENABLE_RAG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(false),
        }
    }
}

/// Configuration for the curation stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurationConfig {
    /// QA pairs per rating call
    pub batch_size: usize,

    /// Sampling temperature for rating calls
    pub temperature: f32,

    /// Minimum rating a pair must reach to be retained
    pub threshold: f64,

    /// Delay between rating batches, in milliseconds
    pub batch_delay_ms: u64,
}

impl Default for CurationConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_CURATION_BATCH_SIZE,
            temperature: DEFAULT_CURATION_TEMPERATURE,
            threshold: DEFAULT_CURATION_THRESHOLD,
            batch_delay_ms: DEFAULT_CURATION_DELAY_MS,
        }
    }
}

impl CurationConfig {
    /// Load curation settings from environment variables.
    pub fn from_env() -> Self {
        Self {
            batch_size: std::env::var("CURATION_BATCH_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_CURATION_BATCH_SIZE),
            temperature: std::env::var("CURATION_TEMPERATURE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_CURATION_TEMPERATURE),
            threshold: std::env::var("CURATION_THRESHOLD")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_CURATION_THRESHOLD),
            batch_delay_ms: std::env::var("CURATION_DELAY_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_CURATION_DELAY_MS),
        }
    }
}

/// Connection settings for the completion gateway.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Base URL of the OpenAI-compatible completion endpoint
    pub base_url: String,

    /// Model identifier passed on every request
    pub model: String,

    /// Bearer token, if the endpoint requires one
    pub api_key: Option<String>,

    /// Maximum tokens requested per completion
    pub max_tokens: u32,
}

impl LlmConfig {
    /// Load gateway settings from environment variables.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("LLM_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8000".to_string()),
            model: std::env::var("LLM_MODEL")
                .unwrap_or_else(|_| "meta-llama/Llama-3.1-8B-Instruct".to_string()),
            api_key: std::env::var("LLM_API_KEY").ok(),
            max_tokens: std::env::var("LLM_MAX_TOKENS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(4096),
        }
    }
}

/// Top-level service configuration.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Generation stage settings
    pub generation: GenerationConfig,

    /// Curation stage settings
    pub curation: CurationConfig,

    /// Completion gateway settings
    pub llm: LlmConfig,

    /// URL of the vector-store service, if RAG ingestion is wired up
    pub vector_store_url: Option<String>,

    /// Target collection for RAG ingestion
    pub vector_collection: String,
}

impl ServiceConfig {
    /// Load the full service configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            generation: GenerationConfig::from_env(),
            curation: CurationConfig::from_env(),
            llm: LlmConfig::from_env(),
            vector_store_url: std::env::var("VECTOR_STORE_URL").ok(),
            vector_collection: std::env::var("VECTOR_COLLECTION")
                .unwrap_or_else(|_| "qaforge".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_defaults_match_documented_values() {
        let config = GenerationConfig::default();
        assert_eq!(config.chunk_size, 4000);
        assert_eq!(config.overlap, 200);
        assert_eq!(config.batch_size, 32);
        assert_eq!(config.max_seq_len, 4000);
        assert!(!config.enable_rag);
    }

    #[test]
    fn curation_defaults_match_documented_values() {
        let config = CurationConfig::default();
        assert_eq!(config.batch_size, 8);
        assert_eq!(config.threshold, 7.0);
        assert_eq!(config.batch_delay_ms, 500);
    }
}
