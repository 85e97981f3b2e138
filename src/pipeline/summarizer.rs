//! Map-reduce document summarization.

use std::sync::Arc;

use tracing::{error, info, warn};

use super::PipelineError;
use crate::batch::{BatchExecutor, BatchOptions};
use crate::chunking::{split_into_chunks, truncate_chars};
use crate::llm::{CompletionClient, Message, PromptSet};
use crate::output::VectorStoreClient;
use crate::parsing::SummaryParser;
use crate::prompts::PromptLibrary;
use crate::types::{ChunkSummary, GenerationConfig};

/// Sampling temperature for the consolidation call; kept low so the
/// reduce step stays close to the per-chunk material.
const SUMMARY_TEMPERATURE: f32 = 0.1;

/// Characters reserved for the prompt scaffolding around the input when
/// truncating to the configured maximum working length.
const PROMPT_MARGIN: usize = 1000;

/// Produces one consolidated summary per document.
///
/// Short documents are summarized in a single call. Longer documents go
/// through a map step (one summary per chunk, batched) and a reduce step
/// (one call over the joined per-chunk summaries, bounded by
/// `max_seq_len`).
pub struct Summarizer {
    client: Arc<dyn CompletionClient>,
    prompts: Arc<PromptLibrary>,
    config: GenerationConfig,
    vector_store: Option<Arc<VectorStoreClient>>,
}

impl Summarizer {
    /// Create a summarizer. `vector_store` is only used when
    /// `config.enable_rag` is set.
    pub fn new(
        client: Arc<dyn CompletionClient>,
        prompts: Arc<PromptLibrary>,
        config: GenerationConfig,
        vector_store: Option<Arc<VectorStoreClient>>,
    ) -> Self {
        Self {
            client,
            prompts,
            config,
            vector_store,
        }
    }

    /// Summarize `text` into one consolidated summary.
    pub async fn summarize(
        &self,
        text: &str,
        filename: Option<&str>,
    ) -> Result<String, PipelineError> {
        let max_input = self.config.max_seq_len.saturating_sub(PROMPT_MARGIN);
        let chunks = split_into_chunks(text, self.config.chunk_size, self.config.overlap);

        let user_content = if chunks.len() > 1 {
            info!(
                doc_len = text.len(),
                chunks = chunks.len(),
                "Mapping chunk summaries before consolidation"
            );

            let prompt_sets: Vec<PromptSet> = chunks
                .iter()
                .map(|chunk| {
                    vec![
                        Message::system(self.prompts.summary_prompt()),
                        Message::user(chunk.clone()),
                    ]
                })
                .collect();

            let executor = BatchExecutor::new(
                self.client.clone(),
                BatchOptions {
                    batch_size: self.config.batch_size,
                    temperature: self.config.temperature,
                },
            );
            let (summaries, report) = executor.run(prompt_sets, &SummaryParser).await;

            if report.failed_batches > 0 {
                warn!(
                    failed = report.failed_batches,
                    surviving = summaries.len(),
                    "Some summary batches failed; consolidating what survived"
                );
            }

            if self.config.enable_rag {
                self.ingest_chunks(&chunks, &summaries, filename).await;
            }

            let combined = summaries
                .iter()
                .map(|s| s.text.as_str())
                .collect::<Vec<_>>()
                .join("\n");
            truncate_chars(&combined, max_input).to_string()
        } else {
            truncate_chars(text, max_input).to_string()
        };

        let messages = vec![
            Message::system(self.prompts.summary_prompt()),
            Message::user(user_content),
        ];
        let consolidated = self.client.complete(&messages, SUMMARY_TEMPERATURE).await?;

        Ok(consolidated.trim().to_string())
    }

    /// Forward surviving chunks to the vector store with their summaries
    /// as metadata. Sink failures are reported and absorbed; they never
    /// affect the returned summary.
    async fn ingest_chunks(
        &self,
        chunks: &[String],
        summaries: &[ChunkSummary],
        filename: Option<&str>,
    ) {
        let Some(store) = &self.vector_store else {
            warn!("RAG ingestion enabled but no vector store configured");
            return;
        };

        // Failed batches leave holes in the summary sequence; only chunks
        // whose summary survived are written.
        let mut texts = Vec::with_capacity(summaries.len());
        let mut metadatas = Vec::with_capacity(summaries.len());
        for summary in summaries {
            if let Some(chunk) = chunks.get(summary.chunk_index) {
                texts.push(chunk.clone());
                metadatas.push(serde_json::json!({
                    "filename": filename,
                    "summary": summary.text,
                }));
            }
        }

        if let Err(e) = store.reset_collection().await {
            error!(error = %e, "Failed to reset vector collection, skipping ingestion");
            return;
        }

        match store.write_chunks(&texts, &metadatas).await {
            Ok(written) => info!(written, "Ingested chunks into vector store"),
            Err(e) => error!(error = %e, "Failed to write chunks to vector store"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::mock::ScriptedClient;
    use crate::llm::Role;
    use pretty_assertions::assert_eq;

    fn summarizer(client: Arc<ScriptedClient>, config: GenerationConfig) -> Summarizer {
        Summarizer::new(
            client,
            Arc::new(PromptLibrary::default()),
            config,
            None,
        )
    }

    fn small_config() -> GenerationConfig {
        GenerationConfig {
            chunk_size: 50,
            overlap: 5,
            batch_size: 8,
            max_seq_len: 4000,
            ..GenerationConfig::default()
        }
    }

    #[tokio::test]
    async fn single_chunk_documents_skip_the_map_step() {
        let client = Arc::new(ScriptedClient::new());
        client.push_single_ok("  The summary.  ");

        let result = summarizer(client.clone(), GenerationConfig::default())
            .summarize("A short document.", None)
            .await
            .unwrap();

        assert_eq!(result, "The summary.");
        assert!(client.batch_calls().is_empty());

        let singles = client.single_calls();
        assert_eq!(singles.len(), 1);
        assert_eq!(singles[0].temperature, SUMMARY_TEMPERATURE);
        assert_eq!(singles[0].messages[0].role, Role::System);
        assert_eq!(singles[0].messages[1].content, "A short document.");
    }

    #[tokio::test]
    async fn multi_chunk_documents_map_then_reduce() {
        let client = Arc::new(ScriptedClient::new());
        let text = "First sentence here. ".repeat(10);

        let config = small_config();
        let chunk_count = split_into_chunks(&text, config.chunk_size, config.overlap).len();
        assert!(chunk_count > 1);

        let responses: Vec<String> = (0..chunk_count).map(|i| format!("summary {i}")).collect();
        client.push_batch_ok(responses.iter().map(String::as_str).collect());
        client.push_single_ok("consolidated");

        let result = summarizer(client.clone(), config)
            .summarize(&text, None)
            .await
            .unwrap();

        assert_eq!(result, "consolidated");

        // Map step: one prompt set per chunk, system + user messages
        let batches = client.batch_calls();
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].prompt_sets.len(), chunk_count);
        for prompt_set in &batches[0].prompt_sets {
            assert_eq!(prompt_set[0].role, Role::System);
            assert_eq!(prompt_set[1].role, Role::User);
        }

        // Reduce step: joined per-chunk summaries at low temperature
        let singles = client.single_calls();
        assert_eq!(singles.len(), 1);
        assert_eq!(singles[0].temperature, SUMMARY_TEMPERATURE);
        assert!(singles[0].messages[1].content.contains("summary 0\nsummary 1"));
    }

    #[tokio::test]
    async fn reduce_input_is_bounded_by_max_seq_len() {
        let client = Arc::new(ScriptedClient::new());
        let text = "word ".repeat(40); // 200 chars -> several chunks at size 50

        let config = GenerationConfig {
            max_seq_len: 2000,
            ..small_config()
        };
        let chunk_count = split_into_chunks(&text, config.chunk_size, config.overlap).len();
        let long_summary = "s".repeat(5000);
        client.push_batch_ok(vec![long_summary.as_str(); chunk_count]);
        client.push_single_ok("done");

        summarizer(client.clone(), config).summarize(&text, None).await.unwrap();

        let reduce_input = &client.single_calls()[0].messages[1].content;
        assert_eq!(reduce_input.len(), 1000); // max_seq_len - margin
    }

    #[tokio::test]
    async fn failed_map_batches_leave_gaps_not_errors() {
        let client = Arc::new(ScriptedClient::new());
        let text = "First sentence here. ".repeat(10);

        // All map batches fail; reduce still runs over an empty join
        let config = GenerationConfig {
            batch_size: 2,
            ..small_config()
        };
        let chunk_count =
            split_into_chunks(&text, config.chunk_size, config.overlap).len();
        for _ in 0..(chunk_count + 1) / 2 {
            client.push_batch_err("unavailable");
        }
        client.push_single_ok("still consolidated");

        let result = summarizer(client, config).summarize(&text, None).await.unwrap();
        assert_eq!(result, "still consolidated");
    }

    #[tokio::test]
    async fn gateway_failure_on_reduce_propagates() {
        let client = Arc::new(ScriptedClient::new());
        client.push_single_err("over capacity");

        let result = summarizer(client, GenerationConfig::default())
            .summarize("Short text.", None)
            .await;

        assert!(result.is_err());
    }
}
