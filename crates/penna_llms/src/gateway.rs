//! Shared HTTP call path for all chat shapes.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::error::{LlmError, Result};
use crate::providers::{AnthropicShape, OpenAiShape};
use crate::shape::ChatShape;
use crate::types::{ChatMessage, GatewayConfig, ProviderKind};

/// Opaque `complete(messages) -> text` capability consumed by the engines.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String>;
}

/// Uniform request/response contract over one provider shape. Enforces the
/// credential check before any I/O and a per-call timeout; dropping the
/// in-flight future on timeout is the abort mechanism.
pub struct Gateway {
    config: GatewayConfig,
    shape: Box<dyn ChatShape>,
    client: Client,
}

impl Gateway {
    /// Create a gateway with the shape implied by the configured provider.
    pub fn new(config: GatewayConfig) -> Result<Self> {
        let shape: Box<dyn ChatShape> = match config.provider {
            ProviderKind::OpenAi | ProviderKind::Custom => Box::new(OpenAiShape),
            ProviderKind::Anthropic => Box::new(AnthropicShape),
        };
        Ok(Self::with_shape(config, shape))
    }

    /// Create a gateway with an explicit shape (for bespoke providers).
    pub fn with_shape(config: GatewayConfig, shape: Box<dyn ChatShape>) -> Self {
        Self {
            config,
            shape,
            client: Client::new(),
        }
    }

    pub fn provider_id(&self) -> &'static str {
        self.shape.provider_id()
    }

    fn timeout_secs(&self) -> u64 {
        self.config.timeout.as_secs().max(1)
    }

    /// Tiny probe request that proves credentials and connectivity without
    /// burning tokens. Used by the CLI configuration test.
    pub async fn ping(&self) -> Result<()> {
        if self.config.api_key.trim().is_empty() {
            return Err(LlmError::MissingApiKey(
                self.shape.provider_id().to_string(),
            ));
        }
        let probe_config = GatewayConfig {
            max_tokens: 5,
            ..self.config.clone()
        };
        let headers = self.shape.build_headers(&probe_config)?;
        let body = self
            .shape
            .shape_request(&probe_config, &[ChatMessage::user("hello")]);
        let send = async {
            let response = self
                .client
                .post(&probe_config.endpoint)
                .headers(headers)
                .json(&body)
                .send()
                .await?;
            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(LlmError::Protocol {
                    status: status.as_u16(),
                    body,
                });
            }
            Ok(())
        };
        match timeout(self.config.timeout, send).await {
            Ok(result) => result,
            Err(_) => Err(LlmError::Timeout(self.timeout_secs())),
        }
    }

    async fn dispatch(&self, messages: &[ChatMessage]) -> Result<String> {
        let headers = self.shape.build_headers(&self.config)?;
        let body = self.shape.shape_request(&self.config, messages);
        debug!(
            provider = self.shape.provider_id(),
            model = %self.config.model,
            messages = messages.len(),
            "dispatching completion request"
        );

        let response = self
            .client
            .post(&self.config.endpoint)
            .headers(headers)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(provider = self.shape.provider_id(), %status, "provider returned error status");
            return Err(LlmError::Protocol {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: Value = response.json().await?;
        self.shape.parse_response(&parsed)
    }
}

#[async_trait]
impl CompletionClient for Gateway {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        if self.config.api_key.trim().is_empty() {
            return Err(LlmError::MissingApiKey(
                self.shape.provider_id().to_string(),
            ));
        }

        match timeout(self.config.timeout, self.dispatch(messages)).await {
            Ok(result) => result,
            Err(_) => Err(LlmError::Timeout(self.timeout_secs())),
        }
    }
}

// Keep the trait usable behind Arc in the engines.
#[async_trait]
impl<T: CompletionClient + ?Sized> CompletionClient for std::sync::Arc<T> {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        (**self).complete(messages).await
    }
}

#[allow(unused)]
fn assert_object_safe(_: &dyn CompletionClient) {}
