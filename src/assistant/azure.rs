//! Azure OpenAI chat-completion backend.

use super::{ChatBackend, CompletionRequest};
use crate::error::{Result, VidchatError};
use crate::openai::{create_client, AzureCredentials};
use async_openai::config::AzureConfig;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
};
use async_openai::Client;
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Chat backend bound to one Azure OpenAI deployment.
pub struct AzureChatBackend {
    client: Client<AzureConfig>,
    deployment: String,
}

impl AzureChatBackend {
    /// Create a backend for `deployment` at a fixed API version.
    pub fn new(
        credentials: &AzureCredentials,
        deployment: &str,
        api_version: &str,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        Ok(Self {
            client: create_client(credentials, deployment, api_version, timeout)?,
            deployment: deployment.to_string(),
        })
    }

    /// Deployment this backend sends requests to.
    pub fn deployment(&self) -> &str {
        &self.deployment
    }

    fn build_messages(request: &CompletionRequest) -> Result<Vec<ChatCompletionRequestMessage>> {
        let mut messages: Vec<ChatCompletionRequestMessage> = Vec::with_capacity(2);

        if let Some(system) = &request.system {
            messages.push(
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(system.clone())
                    .build()
                    .map_err(|e| VidchatError::AssistantUnavailable(e.to_string()))?
                    .into(),
            );
        }

        messages.push(
            ChatCompletionRequestUserMessageArgs::default()
                .content(request.prompt.clone())
                .build()
                .map_err(|e| VidchatError::AssistantUnavailable(e.to_string()))?
                .into(),
        );

        Ok(messages)
    }
}

#[async_trait]
impl ChatBackend for AzureChatBackend {
    #[instrument(skip(self, request), fields(deployment = %self.deployment))]
    async fn complete(&self, request: CompletionRequest) -> Result<String> {
        let messages = Self::build_messages(&request)?;

        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(&self.deployment).messages(messages);
        if let Some(temperature) = request.temperature {
            args.temperature(temperature);
        }
        let chat_request = args
            .build()
            .map_err(|e| VidchatError::AssistantUnavailable(e.to_string()))?;

        debug!("Sending chat completion request");

        let response = self.client.chat().create(chat_request).await.map_err(|e| {
            warn!("Chat completion failed: {}", e);
            VidchatError::AssistantUnavailable(format!("Chat API error: {}", e))
        })?;

        response
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .ok_or_else(|| VidchatError::AssistantUnavailable("Empty response from model".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_messages_with_system() {
        let request = CompletionRequest::new("question").with_system("rules");
        let messages = AzureChatBackend::build_messages(&request).unwrap();

        assert_eq!(messages.len(), 2);
        assert!(matches!(messages[0], ChatCompletionRequestMessage::System(_)));
        assert!(matches!(messages[1], ChatCompletionRequestMessage::User(_)));
    }

    #[test]
    fn test_build_messages_prompt_only() {
        let request = CompletionRequest::new("question");
        let messages = AzureChatBackend::build_messages(&request).unwrap();

        assert_eq!(messages.len(), 1);
        assert!(matches!(messages[0], ChatCompletionRequestMessage::User(_)));
    }

    #[test]
    fn test_backend_creation() {
        let credentials = AzureCredentials {
            api_key: "key".to_string(),
            endpoint: "https://example.openai.azure.com/".to_string(),
        };
        let backend =
            AzureChatBackend::new(&credentials, "gpt-4o-mini", "2024-08-01-preview", None).unwrap();
        assert_eq!(backend.deployment(), "gpt-4o-mini");
    }
}
