//! Azure OpenAI client configuration.

use async_openai::{config::AzureConfig, Client};
use std::time::Duration;

/// Credentials for an Azure OpenAI resource.
#[derive(Clone)]
pub struct AzureCredentials {
    pub api_key: String,
    pub endpoint: String,
}

impl std::fmt::Debug for AzureCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AzureCredentials")
            .field("api_key", &"***")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

/// Create a client bound to one deployment and API version.
///
/// Without a timeout the HTTP client's own defaults apply.
pub fn create_client(
    credentials: &AzureCredentials,
    deployment: &str,
    api_version: &str,
    timeout: Option<Duration>,
) -> crate::error::Result<Client<AzureConfig>> {
    let config = AzureConfig::new()
        .with_api_base(credentials.endpoint.trim_end_matches('/'))
        .with_api_key(credentials.api_key.as_str())
        .with_deployment_id(deployment)
        .with_api_version(api_version);

    let client = Client::with_config(config);

    match timeout {
        Some(timeout) => {
            let http_client = reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .map_err(|e| {
                    crate::error::VidchatError::Config(format!(
                        "Failed to create HTTP client: {}",
                        e
                    ))
                })?;
            Ok(client.with_http_client(http_client))
        }
        None => Ok(client),
    }
}
