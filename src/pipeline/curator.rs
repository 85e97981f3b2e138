//! Rating-based curation of generated QA pairs.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::llm::{CompletionClient, Message};
use crate::parsing::parse_ratings;
use crate::prompts::PromptLibrary;
use crate::types::{CurationConfig, CurationMetrics, QaPair, RatedQaPair};

/// Rates QA pairs in fixed-size batches and filters them by a quality
/// threshold.
///
/// Each batch is serialized to JSON and rated with a single completion
/// call. Failed batches are skipped; metrics are computed once at the
/// end over the original input count.
pub struct Curator {
    client: Arc<dyn CompletionClient>,
    prompts: Arc<PromptLibrary>,
    config: CurationConfig,
}

impl Curator {
    pub fn new(
        client: Arc<dyn CompletionClient>,
        prompts: Arc<PromptLibrary>,
        config: CurationConfig,
    ) -> Self {
        Self {
            client,
            prompts,
            config,
        }
    }

    /// Rate `qa_pairs` and retain those scoring at least `threshold`
    /// (falling back to the configured threshold when omitted).
    pub async fn curate(
        &self,
        qa_pairs: &[QaPair],
        threshold: Option<f64>,
    ) -> (Vec<RatedQaPair>, CurationMetrics) {
        if qa_pairs.is_empty() {
            return (Vec::new(), CurationMetrics::empty());
        }

        let threshold = threshold.unwrap_or(self.config.threshold);
        let batch_size = self.config.batch_size.max(1);
        let total_batches = (qa_pairs.len() + batch_size - 1) / batch_size;

        info!(
            pairs = qa_pairs.len(),
            total_batches, threshold, "Rating QA pairs"
        );

        let mut retained = Vec::new();
        let mut total_score = 0.0;

        for (batch_index, batch) in qa_pairs.chunks(batch_size).enumerate() {
            match self.rate_batch(batch).await {
                Ok(rated) => {
                    for pair in rated {
                        total_score += pair.rating;
                        if pair.rating >= threshold {
                            retained.push(pair);
                        }
                    }
                }
                Err(e) => {
                    warn!(
                        batch_index,
                        error = %e,
                        "Rating batch failed, skipping its pairs"
                    );
                }
            }

            // Back off between rating calls to stay under provider limits
            if self.config.batch_delay_ms > 0 && batch_index + 1 < total_batches {
                tokio::time::sleep(Duration::from_millis(self.config.batch_delay_ms)).await;
            }
        }

        let metrics = CurationMetrics::from_run(qa_pairs.len(), retained.len(), total_score);

        info!(
            kept = metrics.filtered,
            total = metrics.total,
            avg_score = metrics.avg_score,
            "Curation complete"
        );

        (retained, metrics)
    }

    /// Rate one batch with a single completion call.
    async fn rate_batch(&self, batch: &[QaPair]) -> anyhow::Result<Vec<RatedQaPair>> {
        let payload = serde_json::to_string_pretty(batch)?;
        let prompt = self.prompts.qa_rating_prompt(&payload);
        let messages = vec![Message::system(prompt)];

        let response = self
            .client
            .complete(&messages, self.config.temperature)
            .await?;

        Ok(parse_ratings(&response)?)
    }
}
