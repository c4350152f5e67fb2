//! Pre-flight checks before entering the menu.
//!
//! Validates that the Azure OpenAI credentials are present so the process
//! fails before any transcript work starts.

use crate::error::{Result, VidchatError};
use crate::openai::AzureCredentials;
use std::path::{Path, PathBuf};

/// Environment variable holding the Azure OpenAI API key.
pub const API_KEY_ENV: &str = "AZURE_OPENAI_API_KEY";

/// Environment variable holding the Azure OpenAI endpoint URL.
pub const ENDPOINT_ENV: &str = "AZURE_OPENAI_ENDPOINT";

/// Load a `.env` file into the process environment.
///
/// Without `path`, `.env` is looked up from the working directory upwards.
/// Variables that are already set keep their values. A missing file is not an
/// error; the loaded file's path is returned when there was one.
pub fn load_env_file(path: Option<&Path>) -> Result<Option<PathBuf>> {
    let loaded = match path {
        Some(path) => dotenvy::from_path(path).map(|_| path.to_path_buf()),
        None => dotenvy::dotenv(),
    };

    match loaded {
        Ok(path) => Ok(Some(path)),
        Err(e) if e.not_found() => Ok(None),
        Err(e) => Err(VidchatError::Config(format!("Failed to load .env file: {}", e))),
    }
}

/// Read the Azure credentials from the process environment.
pub fn check() -> Result<AzureCredentials> {
    check_with(|name| std::env::var(name).ok())
}

/// Read the Azure credentials through `lookup`.
pub fn check_with<F>(lookup: F) -> Result<AzureCredentials>
where
    F: Fn(&str) -> Option<String>,
{
    let api_key = required(&lookup, API_KEY_ENV, "export AZURE_OPENAI_API_KEY='...'")?;
    let endpoint = required(
        &lookup,
        ENDPOINT_ENV,
        "export AZURE_OPENAI_ENDPOINT='https://<resource>.openai.azure.com'",
    )?;

    if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
        return Err(VidchatError::Config(format!(
            "{} must be an http(s) URL, got '{}'",
            ENDPOINT_ENV, endpoint
        )));
    }

    Ok(AzureCredentials { api_key, endpoint })
}

fn required<F>(lookup: &F, name: &str, hint: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        Some(_) => Err(VidchatError::Config(format!(
            "{} is empty. Set it with: {}",
            name, hint
        ))),
        None => Err(VidchatError::Config(format!(
            "{} not set. Set it with: {}",
            name, hint
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_credentials_present() {
        let creds = check_with(lookup(&[
            (API_KEY_ENV, "key"),
            (ENDPOINT_ENV, "https://example.openai.azure.com"),
        ]))
        .unwrap();
        assert_eq!(creds.api_key, "key");
        assert_eq!(creds.endpoint, "https://example.openai.azure.com");
    }

    #[test]
    fn test_missing_key() {
        let err = check_with(lookup(&[(ENDPOINT_ENV, "https://example.openai.azure.com")]))
            .unwrap_err();
        assert!(err.to_string().contains(API_KEY_ENV));
    }

    #[test]
    fn test_empty_endpoint() {
        let err = check_with(lookup(&[(API_KEY_ENV, "key"), (ENDPOINT_ENV, "  ")])).unwrap_err();
        assert!(err.to_string().contains("is empty"));
    }

    #[test]
    fn test_load_env_file_sets_unset_variables() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, "VIDCHAT_TEST_ENV_FILE_VALUE=from-file\n").unwrap();

        let loaded = load_env_file(Some(&path)).unwrap();

        assert_eq!(loaded, Some(path));
        assert_eq!(std::env::var("VIDCHAT_TEST_ENV_FILE_VALUE").unwrap(), "from-file");
    }

    #[test]
    fn test_load_env_file_keeps_existing_variables() {
        std::env::set_var("VIDCHAT_TEST_ENV_FILE_KEPT", "from-env");
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, "VIDCHAT_TEST_ENV_FILE_KEPT=from-file\n").unwrap();

        load_env_file(Some(&path)).unwrap();

        assert_eq!(std::env::var("VIDCHAT_TEST_ENV_FILE_KEPT").unwrap(), "from-env");
    }

    #[test]
    fn test_missing_env_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load_env_file(Some(&dir.path().join(".env"))).unwrap(), None);
    }

    #[test]
    fn test_endpoint_must_be_url() {
        let err = check_with(lookup(&[(API_KEY_ENV, "key"), (ENDPOINT_ENV, "example")])).unwrap_err();
        assert!(matches!(err, VidchatError::Config(_)));
    }
}
