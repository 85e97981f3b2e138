//! Request/response types for the generation service API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{CurationMetrics, QaPair, RatedQaPair};
use crate::DEFAULT_NUM_PAIRS;

/// Request to start a document-to-dataset generation job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartGenerateJobRequest {
    /// Full document text to process
    pub text: String,

    /// Original filename, carried into RAG metadata when enabled
    #[serde(default)]
    pub filename: Option<String>,

    /// Target number of QA pairs for the whole document
    #[serde(default = "default_num_pairs")]
    pub num_pairs: usize,

    /// Whether to run curation after generation
    #[serde(default)]
    pub curate: bool,

    /// Curation threshold override; falls back to the configured value
    #[serde(default)]
    pub threshold: Option<f64>,
}

fn default_num_pairs() -> usize {
    DEFAULT_NUM_PAIRS
}

/// Response to a job submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartGenerateJobResponse {
    /// ID of the created job
    pub job_id: Uuid,

    /// Whether the job was accepted for processing
    pub accepted: bool,

    /// Optional rejection or informational message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Lifecycle state of a generation job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerateJobStatus {
    /// Accepted, not yet started
    Pending,
    /// Pipeline is running
    Running,
    /// Finished with a result
    Completed,
    /// Aborted with an error
    Failed,
}

impl std::fmt::Display for GenerateJobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerateJobStatus::Pending => write!(f, "pending"),
            GenerateJobStatus::Running => write!(f, "running"),
            GenerateJobStatus::Completed => write!(f, "completed"),
            GenerateJobStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Status snapshot of a generation job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateJobStatusResponse {
    pub job_id: Uuid,
    pub status: GenerateJobStatus,
    pub filename: Option<String>,
    pub requested_pairs: usize,
    pub generated_pairs: usize,
    pub error: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    /// Present once the job has completed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<DatasetResult>,
}

/// Final output of a generation job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetResult {
    /// Consolidated document summary
    pub summary: String,

    /// Generated QA pairs, uncurated
    pub qa_pairs: Vec<QaPair>,

    /// Curated subset and metrics, when curation was requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub curated: Option<CuratedDataset>,
}

/// Pairs surviving curation together with the run's metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CuratedDataset {
    pub pairs: Vec<RatedQaPair>,
    pub metrics: CurationMetrics,
}

/// Request to curate a set of QA pairs synchronously.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurateRequest {
    /// Pairs to rate and filter
    pub pairs: Vec<QaPair>,

    /// Threshold override; falls back to the configured value
    #[serde(default)]
    pub threshold: Option<f64>,
}

/// Response with the curated pairs and metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurateResponse {
    pub pairs: Vec<RatedQaPair>,
    pub metrics: CurationMetrics,
}
