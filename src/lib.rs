//! vidchat - Chat with a YouTube video
//!
//! A terminal tool that fetches a video's English captions, restores
//! punctuation, and answers questions about the content with an Azure OpenAI
//! chat deployment.
//!
//! # Overview
//!
//! vidchat allows you to:
//! - Read a punctuated transcript of a YouTube video
//! - Get a summary, an FAQ or a table of contents
//! - Chat about the video, with earlier answers kept as context
//! - Switch to another video without restarting
//!
//! # Architecture
//!
//! - `config` - Settings and prompt templates
//! - `transcript` - URL parsing, caption retrieval and punctuation
//! - `assistant` - Prompt construction and chat completion
//! - `session` - Transcript and question/answer history
//! - `cli` - Menu controller, terminal input and output
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use vidchat::assistant::{AssistantHandler, AzureChatBackend};
//! use vidchat::config::{Prompts, Settings};
//! use vidchat::transcript::{LlmPunctuator, TranscriptHandler, YoutubeTranscriptSource};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let credentials = vidchat::cli::preflight::check()?;
//!     let backend = Arc::new(AzureChatBackend::new(
//!         &credentials,
//!         &settings.assistant.deployment,
//!         &settings.assistant.api_version,
//!         None,
//!     )?);
//!
//!     let transcripts = TranscriptHandler::new(
//!         Arc::new(YoutubeTranscriptSource::new()?),
//!         Arc::new(LlmPunctuator::new(backend.clone(), &Prompts::default().punctuation)),
//!     );
//!     let raw = transcripts.fetch_transcript("dQw4w9WgXcQ").await?;
//!     let text = transcripts.restore_punctuation(&raw).await?;
//!
//!     let assistant = AssistantHandler::new(backend);
//!     let prompt = assistant.build_prompt(&text, "What is this video about?", &[]);
//!     println!("{}", assistant.ask(&prompt).await?);
//!
//!     Ok(())
//! }
//! ```

pub mod assistant;
pub mod cli;
pub mod config;
pub mod error;
pub mod openai;
pub mod session;
pub mod transcript;

pub use error::{Result, VidchatError};
