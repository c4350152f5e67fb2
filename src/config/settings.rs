//! Configuration settings for vidchat.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable that overrides the configuration file location.
pub const CONFIG_PATH_ENV: &str = "VIDCHAT_CONFIG";

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub assistant: AssistantSettings,
    pub punctuation: PunctuationSettings,
    pub prompts: PromptSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
        }
    }
}

/// Azure OpenAI chat deployment used to answer questions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantSettings {
    /// Deployment name on the Azure OpenAI resource.
    pub deployment: String,
    /// Azure OpenAI REST API version.
    pub api_version: String,
    /// Sampling temperature for answers.
    pub temperature: f32,
    /// HTTP timeout in seconds. None keeps the client default.
    pub timeout_seconds: Option<u64>,
}

impl Default for AssistantSettings {
    fn default() -> Self {
        Self {
            deployment: "gpt-4o-mini".to_string(),
            api_version: "2024-08-01-preview".to_string(),
            temperature: 0.7,
            timeout_seconds: None,
        }
    }
}

/// Punctuation restoration settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PunctuationSettings {
    /// Deployment used for restoration. None reuses the assistant deployment.
    pub deployment: Option<String>,
    /// Maximum number of words sent to the model in one request.
    pub max_words_per_request: usize,
}

impl Default for PunctuationSettings {
    fn default() -> Self {
        Self {
            deployment: None,
            max_words_per_request: 1500,
        }
    }
}

impl PunctuationSettings {
    /// Deployment to use, falling back to the assistant deployment.
    pub fn deployment_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.deployment
            .as_deref()
            .filter(|d| !d.is_empty())
            .unwrap_or(fallback)
    }
}

/// Prompt customization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct PromptSettings {
    /// Directory for custom prompts (overrides defaults).
    pub custom_dir: Option<String>,
}

impl Settings {
    /// Load settings from `$VIDCHAT_CONFIG` or the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        let path = std::env::var(CONFIG_PATH_ENV)
            .ok()
            .filter(|p| !p.is_empty())
            .map(|p| Self::expand_path(&p));
        Self::load_from(path.as_ref())
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            settings.validate()?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Reject values the backends cannot work with.
    pub fn validate(&self) -> crate::error::Result<()> {
        use crate::error::VidchatError;

        if self.assistant.deployment.trim().is_empty() {
            return Err(VidchatError::Config(
                "assistant.deployment must not be empty".to_string(),
            ));
        }
        if self.assistant.api_version.trim().is_empty() {
            return Err(VidchatError::Config(
                "assistant.api_version must not be empty".to_string(),
            ));
        }
        if self.punctuation.max_words_per_request == 0 {
            return Err(VidchatError::Config(
                "punctuation.max_words_per_request must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("vidchat")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_backend_contract() {
        let settings = Settings::default();
        assert_eq!(settings.assistant.deployment, "gpt-4o-mini");
        assert_eq!(settings.assistant.api_version, "2024-08-01-preview");
        assert!(settings.assistant.timeout_seconds.is_none());
        assert_eq!(settings.punctuation.deployment_or("gpt-4o-mini"), "gpt-4o-mini");
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let settings = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(settings.general.log_level, "warn");
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[assistant]\ndeployment = \"chat-prod\"\n\n[punctuation]\ndeployment = \"punct\"\nmax_words_per_request = 200"
        )
        .unwrap();

        let settings = Settings::load_from(Some(&file.path().to_path_buf())).unwrap();
        assert_eq!(settings.assistant.deployment, "chat-prod");
        assert_eq!(settings.assistant.api_version, "2024-08-01-preview");
        assert_eq!(settings.punctuation.deployment_or("chat-prod"), "punct");
        assert_eq!(settings.punctuation.max_words_per_request, 200);
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[punctuation]\nmax_words_per_request = 0").unwrap();

        let result = Settings::load_from(Some(&file.path().to_path_buf()));
        assert!(matches!(result, Err(crate::error::VidchatError::Config(_))));
    }
}
