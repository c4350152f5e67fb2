//! Error types for vidchat.

use thiserror::Error;

/// Library-level error type for vidchat operations.
#[derive(Error, Debug)]
pub enum VidchatError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Could not find a YouTube video ID in '{0}'")]
    InvalidUrl(String),

    #[error("Invalid or unknown video ID: {0}")]
    InvalidIdentifier(String),

    #[error("Transcript unavailable: {0}")]
    TranscriptUnavailable(String),

    #[error("Punctuation restoration failed: {0}")]
    Punctuation(String),

    #[error("AI assistant unavailable: {0}")]
    AssistantUnavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Result type alias for vidchat operations.
pub type Result<T> = std::result::Result<T, VidchatError>;
