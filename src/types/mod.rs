//! Core types for the generation service.

mod api;
mod config;
mod qa;

pub use api::{
    CurateRequest, CurateResponse, CuratedDataset, DatasetResult, GenerateJobStatus,
    GenerateJobStatusResponse, StartGenerateJobRequest, StartGenerateJobResponse,
};
pub use config::{CurationConfig, GenerationConfig, LlmConfig, ServiceConfig};
pub use qa::{ChunkSummary, CurationMetrics, GenerationOutput, QaPair, RatedQaPair};
