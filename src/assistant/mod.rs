//! Question answering over a transcript.
//!
//! The [`AssistantHandler`] renders the instruction template around the
//! transcript and conversation history and forwards it to a [`ChatBackend`].

mod azure;

pub use azure::AzureChatBackend;

use crate::config::{AssistantPrompts, Prompts};
use crate::error::{Result, VidchatError};
use crate::session::ChatTurn;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Reply the model is told to give for questions unrelated to the video.
pub const OFF_TOPIC_REPLY: &str =
    "I'm sorry, I can't answer that question as it is not relevant to the video content.";

/// Reply the model is told to give when the video does not contain the answer.
pub const NOT_IN_VIDEO_REPLY: &str =
    "I'm sorry, I can't answer that question as the answer is not present in the video content.";

/// A single chat-completion call.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// Optional system message sent before the prompt.
    pub system: Option<String>,
    /// User message.
    pub prompt: String,
    /// Sampling temperature. None uses the backend default.
    pub temperature: Option<f32>,
}

impl CompletionRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            system: None,
            prompt: prompt.into(),
            temperature: None,
        }
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// Trait for chat-completion services.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Run one completion and return the raw response text.
    async fn complete(&self, request: CompletionRequest) -> Result<String>;
}

/// Builds prompts and asks the chat backend.
pub struct AssistantHandler {
    backend: Arc<dyn ChatBackend>,
    prompts: AssistantPrompts,
    temperature: Option<f32>,
}

impl AssistantHandler {
    /// Create a handler using the default instruction template.
    pub fn new(backend: Arc<dyn ChatBackend>) -> Self {
        Self {
            backend,
            prompts: AssistantPrompts::default(),
            temperature: None,
        }
    }

    /// Use a custom instruction template.
    pub fn with_prompts(mut self, prompts: AssistantPrompts) -> Self {
        self.prompts = prompts;
        self
    }

    /// Set the sampling temperature for answers.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Render the instruction template for one question.
    pub fn build_prompt(&self, transcript: &str, question: &str, history: &[ChatTurn]) -> String {
        let history = format_history(history);
        let vars = HashMap::from([
            ("transcript", transcript),
            ("history", history.as_str()),
            ("question", question),
        ]);
        Prompts::render(&self.prompts.template, &vars)
    }

    /// Send a rendered prompt and return the trimmed answer.
    #[instrument(skip(self, prompt), fields(prompt_len = prompt.len()))]
    pub async fn ask(&self, prompt: &str) -> Result<String> {
        let mut request = CompletionRequest::new(prompt);
        request.temperature = self.temperature;

        let answer = self.backend.complete(request).await?;
        let answer = answer.trim();

        if answer.is_empty() {
            return Err(VidchatError::AssistantUnavailable(
                "Empty response from model".to_string(),
            ));
        }

        debug!("Received answer ({} chars)", answer.len());
        Ok(answer.to_string())
    }
}

/// Render history as `Q: ...` / `A: ...` lines, oldest first.
pub fn format_history(history: &[ChatTurn]) -> String {
    history
        .iter()
        .map(|turn| format!("Q: {}\nA: {}", turn.question, turn.answer))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Backend that replays canned replies and records every request.
    #[derive(Default)]
    pub struct ScriptedBackend {
        replies: Mutex<VecDeque<Result<String>>>,
        requests: Mutex<Vec<CompletionRequest>>,
    }

    impl ScriptedBackend {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn reply(self, text: &str) -> Self {
            self.replies.lock().unwrap().push_back(Ok(text.to_string()));
            self
        }

        pub fn fail(self, message: &str) -> Self {
            self.replies
                .lock()
                .unwrap()
                .push_back(Err(VidchatError::AssistantUnavailable(message.to_string())));
            self
        }

        pub fn requests(&self) -> Vec<CompletionRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ChatBackend for ScriptedBackend {
        async fn complete(&self, request: CompletionRequest) -> Result<String> {
            self.requests.lock().unwrap().push(request);
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok("default answer".to_string()))
        }
    }
}
