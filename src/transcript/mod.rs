//! Transcript acquisition for vidchat.
//!
//! Turns a video URL into readable text in three steps:
//!
//! 1. [`extract_video_id`] pulls the identifier out of the URL
//! 2. [`TranscriptHandler::fetch_transcript`] downloads English captions and joins them
//! 3. [`TranscriptHandler::restore_punctuation`] runs the punctuation model and
//!    breaks the result into lines

mod punctuation;
mod youtube;

pub use punctuation::{format_lines, LlmPunctuator};
pub use youtube::{extract_video_id, is_valid_video_id, YoutubeTranscriptSource};

use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, instrument};

/// Caption language requested from the transcript source.
pub const TRANSCRIPT_LANGUAGE: &str = "en";

/// One timed caption line.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionEntry {
    /// Spoken text.
    pub text: String,
    /// Start time in seconds.
    pub start: f64,
    /// Duration in seconds.
    pub duration: f64,
}

/// Trait for caption providers.
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// Fetch caption entries for a video in the given language.
    async fn fetch_entries(&self, video_id: &str, language: &str) -> Result<Vec<CaptionEntry>>;
}

/// Trait for punctuation restoration models.
#[async_trait]
pub trait Punctuator: Send + Sync {
    /// Return `text` with sentence and clause punctuation restored.
    async fn restore(&self, text: &str) -> Result<String>;
}

/// Fetches captions and prepares them for reading and prompting.
pub struct TranscriptHandler {
    source: Arc<dyn TranscriptSource>,
    punctuator: Arc<dyn Punctuator>,
}

impl TranscriptHandler {
    pub fn new(source: Arc<dyn TranscriptSource>, punctuator: Arc<dyn Punctuator>) -> Self {
        Self { source, punctuator }
    }

    /// Download English captions and join their text with spaces.
    #[instrument(skip(self))]
    pub async fn fetch_transcript(&self, video_id: &str) -> Result<String> {
        let entries = self
            .source
            .fetch_entries(video_id, TRANSCRIPT_LANGUAGE)
            .await?;

        info!("Joined {} caption entries", entries.len());

        Ok(entries
            .iter()
            .map(|e| e.text.as_str())
            .collect::<Vec<_>>()
            .join(" "))
    }

    /// Restore punctuation, then put each sentence and clause on its own line.
    #[instrument(skip(self, text), fields(chars = text.len()))]
    pub async fn restore_punctuation(&self, text: &str) -> Result<String> {
        if text.trim().is_empty() {
            return Ok(String::new());
        }

        let punctuated = self.punctuator.restore(text).await?;
        Ok(format_lines(&punctuated))
    }
}
