//! Batched execution of prompt sets against the completion gateway.

use std::sync::Arc;

use tracing::{info, warn};

use crate::llm::{CompletionClient, PromptSet};
use crate::parsing::ResponseParser;

/// Options governing one batched run.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Maximum prompt sets per gateway call
    pub batch_size: usize,
    /// Sampling temperature for every call in the run
    pub temperature: f32,
}

/// Outcome accounting for one batched run.
///
/// Failures are carried here as data rather than propagated: a failed
/// batch contributes zero outputs and one [`BatchFailure`] entry.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// Prompt sets submitted across all batches
    pub total_prompt_sets: usize,
    /// Batches attempted
    pub total_batches: usize,
    /// Batches whose outputs made it into the result
    pub completed_batches: usize,
    /// Batches dropped by a gateway or parse failure
    pub failed_batches: usize,
    /// One entry per dropped batch
    pub failures: Vec<BatchFailure>,
}

/// A failed batch and the error that sank it.
#[derive(Debug, Clone)]
pub struct BatchFailure {
    pub batch_index: usize,
    pub error: String,
}

/// Observer notified after each batch settles, successfully or not.
///
/// `advanced` is the number of prompt sets the batch covered. Progress is
/// observability only; the default no-op implementation is always valid.
pub trait BatchObserver: Send + Sync {
    fn on_batch_complete(&self, batch_index: usize, advanced: usize);
}

/// Observer that does nothing.
pub struct NoopObserver;

impl BatchObserver for NoopObserver {
    fn on_batch_complete(&self, _batch_index: usize, _advanced: usize) {}
}

/// Drives prompt sets through the gateway in consecutive fixed-size
/// batches, isolating failures per batch.
///
/// Batches run strictly in order; no batch starts before the previous
/// gateway call has returned. Within a batch, per-response parsing is
/// applied in submission order and outputs are flattened into the result.
pub struct BatchExecutor {
    client: Arc<dyn CompletionClient>,
    options: BatchOptions,
    observer: Arc<dyn BatchObserver>,
}

impl BatchExecutor {
    /// Create an executor over the given gateway.
    pub fn new(client: Arc<dyn CompletionClient>, options: BatchOptions) -> Self {
        Self {
            client,
            options,
            observer: Arc::new(NoopObserver),
        }
    }

    /// Attach a progress observer.
    pub fn with_observer(mut self, observer: Arc<dyn BatchObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Run all prompt sets, returning the flattened outputs of surviving
    /// batches plus the per-batch report.
    pub async fn run<P: ResponseParser>(
        &self,
        prompt_sets: Vec<PromptSet>,
        parser: &P,
    ) -> (Vec<P::Output>, BatchReport) {
        let total = prompt_sets.len();
        let batch_size = self.options.batch_size.max(1);
        let total_batches = (total + batch_size - 1) / batch_size;

        let mut outputs = Vec::new();
        let mut report = BatchReport {
            total_prompt_sets: total,
            total_batches,
            ..Default::default()
        };

        for (batch_index, batch) in prompt_sets.chunks(batch_size).enumerate() {
            let batch_start = batch_index * batch_size;

            match self.run_batch(batch_start, batch, parser).await {
                Ok(mut batch_outputs) => {
                    outputs.append(&mut batch_outputs);
                    report.completed_batches += 1;
                }
                Err(e) => {
                    warn!(
                        batch_index,
                        batch_len = batch.len(),
                        error = %e,
                        "Batch failed, continuing with the next one"
                    );
                    report.failed_batches += 1;
                    report.failures.push(BatchFailure {
                        batch_index,
                        error: e.to_string(),
                    });
                }
            }

            self.observer.on_batch_complete(batch_index, batch.len());
        }

        info!(
            total_batches,
            completed = report.completed_batches,
            failed = report.failed_batches,
            outputs = outputs.len(),
            "Batch run complete"
        );

        (outputs, report)
    }

    /// Run one batch: a single gateway call, then per-response parsing.
    /// Any error drops the whole batch's contribution.
    async fn run_batch<P: ResponseParser>(
        &self,
        batch_start: usize,
        batch: &[PromptSet],
        parser: &P,
    ) -> anyhow::Result<Vec<P::Output>> {
        let responses = self
            .client
            .complete_batch(batch, self.options.temperature, self.options.batch_size)
            .await?;

        let mut outputs = Vec::new();
        for (offset, response) in responses.iter().enumerate() {
            let mut parsed = parser.parse(batch_start + offset, response)?;
            outputs.append(&mut parsed);
        }
        Ok(outputs)
    }
}
