//! OpenAI-compatible chat-completions client.

use futures::stream::{self, StreamExt, TryStreamExt};
use reqwest::Client;
use serde_json::json;
use tracing::debug;

use super::{CompletionClient, LlmError, Message, PromptSet};
use crate::types::LlmConfig;

/// Client for any endpoint speaking the OpenAI chat-completions protocol
/// (vLLM, llama.cpp server, the hosted APIs).
///
/// The batched capability fans out concurrent single completions, bounded
/// by the caller's batch size, and preserves input order.
pub struct OpenAiClient {
    client: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
    max_tokens: u32,
}

impl OpenAiClient {
    /// Create a client from gateway settings.
    pub fn new(config: &LlmConfig) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(180))
                .build()
                .expect("Failed to create HTTP client"),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
            max_tokens: config.max_tokens,
        }
    }

    async fn chat_completion(
        &self,
        messages: &[Message],
        temperature: f32,
    ) -> Result<String, LlmError> {
        let url = format!("{}/v1/chat/completions", self.base_url);

        let body = json!({
            "model": self.model,
            "messages": messages,
            "temperature": temperature,
            "max_tokens": self.max_tokens,
        });

        debug!(url = %url, messages = messages.len(), "Sending completion request");

        let mut request = self.client.post(&url).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let payload: serde_json::Value = response.json().await?;
        let content = payload["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| {
                LlmError::MalformedResponse("missing choices[0].message.content".into())
            })?
            .to_string();

        Ok(content)
    }
}

#[async_trait::async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(&self, messages: &[Message], temperature: f32) -> Result<String, LlmError> {
        self.chat_completion(messages, temperature).await
    }

    async fn complete_batch(
        &self,
        prompt_sets: &[PromptSet],
        temperature: f32,
        batch_size: usize,
    ) -> Result<Vec<String>, LlmError> {
        let futures: Vec<_> = prompt_sets
            .iter()
            .map(|messages| self.chat_completion(messages, temperature))
            .collect();
        stream::iter(futures)
            .buffered(batch_size.max(1))
            .try_collect()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_stripped_from_base_url() {
        let config = LlmConfig {
            base_url: "http://localhost:8000/".to_string(),
            model: "test-model".to_string(),
            api_key: None,
            max_tokens: 512,
        };
        let client = OpenAiClient::new(&config);
        assert_eq!(client.base_url, "http://localhost:8000");
    }
}
