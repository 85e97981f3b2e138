//! QA Dataset Generation Library
//!
//! Turns long-form documents into curated question-answer training pairs:
//! boundary-aware chunking, batched map-reduce summarization, proportional
//! QA pair generation, and rating-based curation over any OpenAI-compatible
//! completion backend.

pub mod api;
pub mod batch;
pub mod chunking;
pub mod jobs;
pub mod llm;
pub mod output;
pub mod parsing;
pub mod pipeline;
pub mod prompts;
pub mod types;

pub use batch::{BatchExecutor, BatchFailure, BatchObserver, BatchOptions, BatchReport};
pub use chunking::split_into_chunks;
pub use llm::{CompletionClient, LlmError, Message, OpenAiClient, PromptSet, Role};
pub use pipeline::{Curator, DatasetPipeline, PipelineError, QaGenerator, Summarizer};
pub use prompts::PromptLibrary;
pub use types::{CurationMetrics, GenerationOutput, QaPair, RatedQaPair};

/// Re-export commonly used types.
pub mod prelude {
    pub use crate::batch::*;
    pub use crate::chunking::split_into_chunks;
    pub use crate::llm::{CompletionClient, Message, PromptSet, Role};
    pub use crate::pipeline::*;
    pub use crate::prompts::PromptLibrary;
    pub use crate::types::*;
}

/// Default chunk size in characters
pub const DEFAULT_CHUNK_SIZE: usize = 4000;

/// Default overlap between consecutive chunks in characters
pub const DEFAULT_CHUNK_OVERLAP: usize = 200;

/// Default number of QA pairs requested per document
pub const DEFAULT_NUM_PAIRS: usize = 25;

/// Default prompt sets per generation batch
pub const DEFAULT_GENERATION_BATCH_SIZE: usize = 32;

/// Default sampling temperature for generation calls
pub const DEFAULT_GENERATION_TEMPERATURE: f32 = 0.7;

/// Default QA pairs per rating batch
pub const DEFAULT_CURATION_BATCH_SIZE: usize = 8;

/// Default sampling temperature for rating calls
pub const DEFAULT_CURATION_TEMPERATURE: f32 = 0.1;

/// Default quality threshold on the rating scale
pub const DEFAULT_CURATION_THRESHOLD: f64 = 7.0;

/// Default maximum working length for a completion input, in characters
pub const DEFAULT_MAX_SEQ_LEN: usize = 4000;

/// Default delay between rating batches, in milliseconds
pub const DEFAULT_CURATION_DELAY_MS: u64 = 500;
