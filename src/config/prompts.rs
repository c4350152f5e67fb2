//! Prompt templates for vidchat.
//!
//! Prompts can be customized by placing TOML files in the custom prompts directory.

use crate::assistant::{NOT_IN_VIDEO_REPLY, OFF_TOPIC_REPLY};
use crate::error::{Result, VidchatError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Prompts {
    pub assistant: AssistantPrompts,
    pub punctuation: PunctuationPrompts,
}

/// Prompt used to answer questions about a transcript.
///
/// Placeholders: `{{transcript}}`, `{{history}}`, `{{question}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantPrompts {
    pub template: String,
}

impl Default for AssistantPrompts {
    fn default() -> Self {
        Self {
            template: r#"You are an expert answering based only on the provided video transcript.
Transcript:

{{transcript}}

Chat history:
{{history}}

Question: {{question}}

Answer in detail using only the transcript and chat history.
If a question is irrelevant to the video, answer with "I'm sorry, I can't answer that question as it is not relevant to the video content."
If the answer is absent in the video, respond with "I'm sorry, I can't answer that question as the answer is not present in the video content.""#
                .to_string(),
        }
    }
}

impl AssistantPrompts {
    /// Check that the template can still carry a question and both fallback replies.
    pub fn validate(&self) -> Result<()> {
        for placeholder in ["{{transcript}}", "{{history}}", "{{question}}"] {
            if !self.template.contains(placeholder) {
                return Err(VidchatError::Config(format!(
                    "assistant prompt template is missing {}",
                    placeholder
                )));
            }
        }
        for reply in [OFF_TOPIC_REPLY, NOT_IN_VIDEO_REPLY] {
            if !self.template.contains(reply) {
                return Err(VidchatError::Config(format!(
                    "assistant prompt template must contain the reply \"{}\"",
                    reply
                )));
            }
        }
        Ok(())
    }
}

/// Prompt used to restore punctuation in raw caption text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PunctuationPrompts {
    pub system: String,
}

impl Default for PunctuationPrompts {
    fn default() -> Self {
        Self {
            system: r#"You restore punctuation in automatically generated video captions.

## Input
Lowercase caption text with little or no punctuation.

## Output
The same text with sentence and clause punctuation and capitalization restored.

## Rules
- Keep every word, in the original order
- Do not add, remove, translate or summarize content
- Insert periods, commas, question marks and exclamation marks where a speaker would pause
- Capitalize the first word of each sentence and proper nouns
- Output only the punctuated text, with no preamble or quotes"#
                .to_string(),
        }
    }
}

impl Prompts {
    /// Load prompts, applying overrides from `custom_dir` when present.
    ///
    /// An assistant template that drops a placeholder or a fallback reply is
    /// rejected.
    pub fn load(custom_dir: Option<&str>) -> Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(dir) = custom_dir {
            let custom_path = PathBuf::from(shellexpand::tilde(dir).to_string());

            let assistant_path = custom_path.join("assistant.toml");
            if assistant_path.exists() {
                let content = std::fs::read_to_string(&assistant_path)?;
                prompts.assistant = toml::from_str(&content)?;
                prompts.assistant.validate()?;
            }

            let punctuation_path = custom_path.join("punctuation.toml");
            if punctuation_path.exists() {
                let content = std::fs::read_to_string(&punctuation_path)?;
                prompts.punctuation = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }

    /// Render a prompt template with the given variables.
    ///
    /// Substitution is a single left-to-right pass, so placeholder-like text
    /// inside a value (a transcript quoting `{{question}}`) is left as is.
    pub fn render(template: &str, vars: &HashMap<&str, &str>) -> String {
        let mut result = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(start) = rest.find("{{") {
            result.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            match after.find("}}") {
                Some(end) => {
                    let key = &after[..end];
                    match vars.get(key) {
                        Some(value) => result.push_str(value),
                        None => {
                            result.push_str("{{");
                            result.push_str(key);
                            result.push_str("}}");
                        }
                    }
                    rest = &after[end + 2..];
                }
                None => {
                    result.push_str(&rest[start..]);
                    rest = "";
                }
            }
        }
        result.push_str(rest);
        result
    }
}
