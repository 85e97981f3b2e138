//! Scripted gateway for pipeline tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use super::{CompletionClient, LlmError, Message, PromptSet};

/// A [`CompletionClient`] that replays scripted outcomes in order and
/// records every call it receives.
///
/// Tests push one outcome per expected gateway call; an unexpected call
/// panics so over-calling is caught immediately.
#[derive(Default)]
pub struct ScriptedClient {
    batch_outcomes: Mutex<VecDeque<Result<Vec<String>, LlmError>>>,
    single_outcomes: Mutex<VecDeque<Result<String, LlmError>>>,
    batch_calls: Mutex<Vec<RecordedBatchCall>>,
    single_calls: Mutex<Vec<RecordedSingleCall>>,
}

/// One recorded `complete_batch` invocation.
#[derive(Debug, Clone)]
pub struct RecordedBatchCall {
    pub prompt_sets: Vec<PromptSet>,
    pub temperature: f32,
    pub batch_size: usize,
}

/// One recorded `complete` invocation.
#[derive(Debug, Clone)]
pub struct RecordedSingleCall {
    pub messages: Vec<Message>,
    pub temperature: f32,
}

fn api_error(body: &str) -> LlmError {
    LlmError::Api {
        status: 500,
        body: body.to_string(),
    }
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a successful batch response.
    pub fn push_batch_ok(&self, responses: Vec<&str>) {
        self.batch_outcomes
            .lock()
            .unwrap()
            .push_back(Ok(responses.into_iter().map(String::from).collect()));
    }

    /// Script a failed batch call.
    pub fn push_batch_err(&self, body: &str) {
        self.batch_outcomes
            .lock()
            .unwrap()
            .push_back(Err(api_error(body)));
    }

    /// Script a successful single completion.
    pub fn push_single_ok(&self, response: &str) {
        self.single_outcomes
            .lock()
            .unwrap()
            .push_back(Ok(response.to_string()));
    }

    /// Script a failed single completion.
    pub fn push_single_err(&self, body: &str) {
        self.single_outcomes
            .lock()
            .unwrap()
            .push_back(Err(api_error(body)));
    }

    pub fn batch_calls(&self) -> Vec<RecordedBatchCall> {
        self.batch_calls.lock().unwrap().clone()
    }

    pub fn single_calls(&self) -> Vec<RecordedSingleCall> {
        self.single_calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl CompletionClient for ScriptedClient {
    async fn complete(&self, messages: &[Message], temperature: f32) -> Result<String, LlmError> {
        self.single_calls.lock().unwrap().push(RecordedSingleCall {
            messages: messages.to_vec(),
            temperature,
        });
        self.single_outcomes
            .lock()
            .unwrap()
            .pop_front()
            .expect("unscripted complete() call")
    }

    async fn complete_batch(
        &self,
        prompt_sets: &[PromptSet],
        temperature: f32,
        batch_size: usize,
    ) -> Result<Vec<String>, LlmError> {
        self.batch_calls.lock().unwrap().push(RecordedBatchCall {
            prompt_sets: prompt_sets.to_vec(),
            temperature,
            batch_size,
        });
        self.batch_outcomes
            .lock()
            .unwrap()
            .pop_front()
            .expect("unscripted complete_batch() call")
    }
}
