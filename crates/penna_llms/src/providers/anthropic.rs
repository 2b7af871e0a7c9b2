//! Anthropic messages shape: system messages lifted into a top-level
//! `system` field, remaining messages mapped onto the user/assistant
//! two-role schema, response text at `content[0].text`.

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde_json::{json, Value};

use crate::error::{LlmError, Result};
use crate::shape::ChatShape;
use crate::types::{ChatMessage, GatewayConfig, Role};

pub const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Debug, Default)]
pub struct AnthropicShape;

impl ChatShape for AnthropicShape {
    fn provider_id(&self) -> &'static str {
        "anthropic"
    }

    fn build_headers(&self, config: &GatewayConfig) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            "x-api-key",
            HeaderValue::from_str(&config.api_key)
                .map_err(|_| LlmError::MissingApiKey(self.provider_id().to_string()))?,
        );
        headers.insert("anthropic-version", HeaderValue::from_static(ANTHROPIC_VERSION));
        Ok(headers)
    }

    fn shape_request(&self, config: &GatewayConfig, messages: &[ChatMessage]) -> Value {
        let system: String = messages
            .iter()
            .filter(|m| m.role == Role::System)
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");

        let mapped: Vec<Value> = messages
            .iter()
            .filter(|m| m.role != Role::System)
            .map(|m| {
                let role = match m.role {
                    Role::User => "user",
                    _ => "assistant",
                };
                json!({ "role": role, "content": m.content })
            })
            .collect();

        json!({
            "model": config.model,
            "max_tokens": config.max_tokens,
            "temperature": config.temperature,
            "system": system,
            "messages": mapped,
        })
    }

    fn parse_response(&self, body: &Value) -> Result<String> {
        body.pointer("/content/0/text")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .ok_or_else(|| LlmError::MalformedResponse("missing content[0].text".to_string()))
    }
}
