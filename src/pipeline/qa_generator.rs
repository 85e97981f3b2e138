//! Map-only QA pair generation.

use std::sync::Arc;

use tracing::info;

use crate::batch::{BatchExecutor, BatchOptions, BatchReport};
use crate::chunking::{split_into_chunks, truncate_chars};
use crate::llm::{CompletionClient, Message, PromptSet};
use crate::parsing::QaPairParser;
use crate::prompts::PromptLibrary;
use crate::types::{GenerationConfig, QaPair};

/// Characters of the document summary included as context in every QA
/// generation prompt.
const SUMMARY_CONTEXT_CHARS: usize = 1000;

/// Generates QA pairs chunk by chunk, apportioning a global target count
/// across chunks.
pub struct QaGenerator {
    client: Arc<dyn CompletionClient>,
    prompts: Arc<PromptLibrary>,
    config: GenerationConfig,
}

impl QaGenerator {
    pub fn new(
        client: Arc<dyn CompletionClient>,
        prompts: Arc<PromptLibrary>,
        config: GenerationConfig,
    ) -> Self {
        Self {
            client,
            prompts,
            config,
        }
    }

    /// Pairs requested from each chunk. Every chunk is asked for at least
    /// one pair, so the realized total may exceed the target when the
    /// chunk count does not divide it.
    pub fn pairs_per_chunk(target_pair_count: usize, chunk_count: usize) -> usize {
        if chunk_count == 0 {
            return target_pair_count.max(1);
        }
        let proportional = (target_pair_count as f64 / chunk_count as f64).round() as usize;
        proportional.max(1)
    }

    /// Generate QA pairs for `text`, aiming for `target_pair_count`
    /// overall. Failed batches contribute nothing; the output keeps
    /// chunk order.
    pub async fn generate(
        &self,
        text: &str,
        summary: &str,
        target_pair_count: usize,
    ) -> (Vec<QaPair>, BatchReport) {
        let chunks = split_into_chunks(text, self.config.chunk_size, self.config.overlap);
        let pairs_per_chunk = Self::pairs_per_chunk(target_pair_count, chunks.len());

        info!(
            chunks = chunks.len(),
            pairs_per_chunk,
            target_pair_count,
            "Generating QA pairs"
        );

        let summary_context = truncate_chars(summary, SUMMARY_CONTEXT_CHARS);

        let prompt_sets: Vec<PromptSet> = chunks
            .iter()
            .map(|chunk| {
                vec![Message::system(self.prompts.qa_generation_prompt(
                    pairs_per_chunk,
                    summary_context,
                    chunk,
                ))]
            })
            .collect();

        let executor = BatchExecutor::new(
            self.client.clone(),
            BatchOptions {
                batch_size: self.config.batch_size,
                temperature: self.config.temperature,
            },
        );
        let (pairs, report) = executor.run(prompt_sets, &QaPairParser).await;

        info!(
            generated = pairs.len(),
            failed_batches = report.failed_batches,
            "QA generation complete"
        );

        (pairs, report)
    }
}
