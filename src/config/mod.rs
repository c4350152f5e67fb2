//! Configuration module for vidchat.
//!
//! Handles loading application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{AssistantPrompts, Prompts, PunctuationPrompts};
pub use settings::{
    AssistantSettings, GeneralSettings, PromptSettings, PunctuationSettings, Settings,
    CONFIG_PATH_ENV,
};
