//! Completion gateway for LLM backends.
//!
//! Every pipeline stage talks to the model through [`CompletionClient`],
//! which exposes exactly two capabilities: complete one prompt set, or
//! complete a batch of prompt sets. Concrete backends implement the trait;
//! the pipeline never depends on a specific provider.

mod openai;

#[cfg(test)]
pub mod mock;

pub use openai::OpenAiClient;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A role-tagged chat message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

/// Message role, serialized in the OpenAI wire convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Message {
    /// Build a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// Build a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// The ordered message sequence sent to the gateway for one unit of work.
pub type PromptSet = Vec<Message>;

/// Errors from the completion gateway.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("completion API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("malformed completion response: {0}")]
    MalformedResponse(String),
}

/// The two capabilities the pipeline consumes from an LLM backend.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Complete a single prompt set and return the raw response text.
    async fn complete(&self, messages: &[Message], temperature: f32) -> Result<String, LlmError>;

    /// Complete a batch of prompt sets, returning one raw response per
    /// input in the same order. Any transport or provider failure fails
    /// the whole batch.
    async fn complete_batch(
        &self,
        prompt_sets: &[PromptSet],
        temperature: f32,
        batch_size: usize,
    ) -> Result<Vec<String>, LlmError>;
}
