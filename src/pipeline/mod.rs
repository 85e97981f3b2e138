//! The document-to-dataset pipeline.
//!
//! [`DatasetPipeline`] composes the three stages: summarization,
//! QA pair generation, and (explicitly invoked) curation.

mod curator;
mod qa_generator;
mod summarizer;

pub use curator::Curator;
pub use qa_generator::QaGenerator;
pub use summarizer::Summarizer;

use std::sync::Arc;

use tracing::info;

use crate::llm::{CompletionClient, LlmError};
use crate::output::VectorStoreClient;
use crate::prompts::PromptLibrary;
use crate::types::{
    CurationConfig, CurationMetrics, GenerationConfig, GenerationOutput, QaPair, RatedQaPair,
};

/// Errors that abort a pipeline run.
///
/// Batch-level failures never surface here; they only shrink the output.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("document text is empty")]
    EmptyDocument,

    #[error("completion gateway error: {0}")]
    Llm(#[from] LlmError),
}

/// End-to-end pipeline from document text to a QA dataset.
pub struct DatasetPipeline {
    summarizer: Summarizer,
    generator: QaGenerator,
    curator: Curator,
}

impl DatasetPipeline {
    /// Wire up the pipeline stages over one shared gateway.
    pub fn new(
        client: Arc<dyn CompletionClient>,
        prompts: PromptLibrary,
        generation: GenerationConfig,
        curation: CurationConfig,
        vector_store: Option<Arc<VectorStoreClient>>,
    ) -> Self {
        let prompts = Arc::new(prompts);
        Self {
            summarizer: Summarizer::new(
                client.clone(),
                prompts.clone(),
                generation.clone(),
                vector_store,
            ),
            generator: QaGenerator::new(client.clone(), prompts.clone(), generation),
            curator: Curator::new(client, prompts, curation),
        }
    }

    /// Run summarization then QA generation. Curation is a separate
    /// stage so callers can inspect uncurated output or pick their own
    /// threshold.
    pub async fn process(
        &self,
        text: &str,
        filename: Option<&str>,
        target_pair_count: usize,
    ) -> Result<GenerationOutput, PipelineError> {
        if text.trim().is_empty() {
            return Err(PipelineError::EmptyDocument);
        }

        let summary = self.summarizer.summarize(text, filename).await?;
        let (qa_pairs, _report) = self
            .generator
            .generate(text, &summary, target_pair_count)
            .await;

        info!(
            pairs = qa_pairs.len(),
            summary_len = summary.len(),
            "Pipeline run complete"
        );

        Ok(GenerationOutput { summary, qa_pairs })
    }

    /// Rate and filter pairs; see [`Curator::curate`].
    pub async fn curate(
        &self,
        qa_pairs: &[QaPair],
        threshold: Option<f64>,
    ) -> (Vec<RatedQaPair>, CurationMetrics) {
        self.curator.curate(qa_pairs, threshold).await
    }
}
