//! QA pair and curation types.

use serde::{Deserialize, Serialize};

/// A generated question-answer pair.
///
/// Pairs are the fundamental unit of the training dataset. They are
/// created by the QA parser and remain immutable until curation assigns
/// them a rating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QaPair {
    /// The question text
    pub question: String,

    /// The answer text, grounded in the source chunk
    pub answer: String,
}

/// A QA pair with the quality rating assigned during curation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatedQaPair {
    /// The question text
    pub question: String,

    /// The answer text
    pub answer: String,

    /// Numeric quality rating on the scale defined by the rating prompt
    pub rating: f64,
}

/// A per-chunk summary produced by the map step of summarization.
///
/// `chunk_index` records which chunk the summary belongs to so that
/// surviving summaries can be re-associated with their chunk texts even
/// when failed batches leave holes in the sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkSummary {
    /// 0-based index of the source chunk
    pub chunk_index: usize,

    /// Summary text for that chunk
    pub text: String,
}

/// The uncurated output of one document-to-dataset run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationOutput {
    /// Consolidated document summary
    pub summary: String,

    /// Generated QA pairs in chunk order
    pub qa_pairs: Vec<QaPair>,
}

/// Aggregate retention metrics for one curation run.
///
/// Recomputed each run over the pre-filter pair count; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurationMetrics {
    /// Number of pairs submitted for rating
    pub total: usize,

    /// Number of pairs retained after threshold filtering
    pub filtered: usize,

    /// `filtered / total`, or 0 when no pairs were submitted
    pub retention_rate: f64,

    /// Mean rating over every rated pair, or 0 when no pairs were submitted
    pub avg_score: f64,
}

impl CurationMetrics {
    /// Metrics for an empty curation run.
    pub fn empty() -> Self {
        Self {
            total: 0,
            filtered: 0,
            retention_rate: 0.0,
            avg_score: 0.0,
        }
    }

    /// Compute metrics from the original pair count, the retained count,
    /// and the accumulated score of every rated pair.
    pub fn from_run(total: usize, filtered: usize, total_score: f64) -> Self {
        if total == 0 {
            return Self::empty();
        }
        Self {
            total,
            filtered,
            retention_rate: filtered as f64 / total as f64,
            avg_score: total_score / total as f64,
        }
    }
}
