//! Punctuation restoration and line formatting.

use super::Punctuator;
use crate::assistant::{ChatBackend, CompletionRequest};
use crate::config::PunctuationPrompts;
use crate::error::{Result, VidchatError};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Put a line break after every `". "` and `", "`.
pub fn format_lines(text: &str) -> String {
    text.replace(". ", ".\n").replace(", ", ",\n")
}

/// Punctuation model backed by a chat deployment.
///
/// Text is sent in word batches, one request at a time, at temperature 0.
pub struct LlmPunctuator {
    backend: Arc<dyn ChatBackend>,
    system_prompt: String,
    max_words_per_request: usize,
}

impl LlmPunctuator {
    pub fn new(backend: Arc<dyn ChatBackend>, prompts: &PunctuationPrompts) -> Self {
        Self {
            backend,
            system_prompt: prompts.system.clone(),
            max_words_per_request: 1500,
        }
    }

    /// Set the maximum number of words per request.
    pub fn with_max_words(mut self, max_words: usize) -> Self {
        self.max_words_per_request = max_words.max(1);
        self
    }

    fn batches<'a>(&self, text: &'a str) -> Vec<String> {
        text.split_whitespace()
            .collect::<Vec<&'a str>>()
            .chunks(self.max_words_per_request)
            .map(|words| words.join(" "))
            .collect()
    }
}

#[async_trait]
impl Punctuator for LlmPunctuator {
    #[instrument(skip(self, text), fields(chars = text.len()))]
    async fn restore(&self, text: &str) -> Result<String> {
        let batches = self.batches(text);
        let total = batches.len();
        let mut restored = Vec::with_capacity(total);

        for (i, batch) in batches.into_iter().enumerate() {
            debug!("Restoring punctuation for batch {}/{}", i + 1, total);

            let request = CompletionRequest::new(batch)
                .with_system(self.system_prompt.clone())
                .with_temperature(0.0);

            let output = self
                .backend
                .complete(request)
                .await
                .map_err(|e| VidchatError::Punctuation(e.to_string()))?;

            restored.push(output.trim().to_string());
        }

        Ok(restored.join(" "))
    }
}
