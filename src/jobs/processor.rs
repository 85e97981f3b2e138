//! Job processor for async dataset generation.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{error, info};
use uuid::Uuid;

use super::store::JobStore;
use crate::pipeline::DatasetPipeline;
use crate::types::{CuratedDataset, DatasetResult, StartGenerateJobRequest};

/// Runs generation jobs in the background and keeps the shared store
/// up to date.
pub struct JobProcessor {
    pipeline: Arc<DatasetPipeline>,
}

impl JobProcessor {
    pub fn new(pipeline: Arc<DatasetPipeline>) -> Self {
        Self { pipeline }
    }

    /// Process one generation job to completion, recording progress and
    /// the final result (or error) in the store.
    pub async fn process_job(
        &self,
        job_id: Uuid,
        request: StartGenerateJobRequest,
        job_store: Arc<RwLock<JobStore>>,
    ) {
        info!(
            job_id = %job_id,
            doc_len = request.text.len(),
            num_pairs = request.num_pairs,
            curate = request.curate,
            "Starting generation job"
        );

        {
            let mut store = job_store.write().await;
            store.start_job(job_id);
        }

        let output = match self
            .pipeline
            .process(&request.text, request.filename.as_deref(), request.num_pairs)
            .await
        {
            Ok(output) => output,
            Err(e) => {
                error!(job_id = %job_id, error = %e, "Generation job failed");
                let mut store = job_store.write().await;
                store.fail_job(job_id, e.to_string());
                return;
            }
        };

        {
            let mut store = job_store.write().await;
            store.update_job_progress(job_id, output.qa_pairs.len());
        }

        let curated = if request.curate {
            let (pairs, metrics) = self
                .pipeline
                .curate(&output.qa_pairs, request.threshold)
                .await;
            Some(CuratedDataset { pairs, metrics })
        } else {
            None
        };

        let result = DatasetResult {
            summary: output.summary,
            qa_pairs: output.qa_pairs,
            curated,
        };

        info!(
            job_id = %job_id,
            pairs = result.qa_pairs.len(),
            curated = result.curated.is_some(),
            "Generation job complete"
        );

        let mut store = job_store.write().await;
        store.complete_job(job_id, result);
    }
}
