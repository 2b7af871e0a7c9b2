//! OpenAI-compatible chat shape: flat message list, bearer auth, response
//! text at `choices[0].message.content`. Also used for custom endpoints
//! that speak the same schema.

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde_json::{json, Value};

use crate::error::{LlmError, Result};
use crate::shape::ChatShape;
use crate::types::{ChatMessage, GatewayConfig};

#[derive(Debug, Default)]
pub struct OpenAiShape;

impl ChatShape for OpenAiShape {
    fn provider_id(&self) -> &'static str {
        "openai"
    }

    fn build_headers(&self, config: &GatewayConfig) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let bearer = format!("Bearer {}", config.api_key);
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&bearer)
                .map_err(|_| LlmError::MissingApiKey(self.provider_id().to_string()))?,
        );
        Ok(headers)
    }

    fn shape_request(&self, config: &GatewayConfig, messages: &[ChatMessage]) -> Value {
        let messages: Vec<Value> = messages
            .iter()
            .map(|m| json!({ "role": m.role.as_str(), "content": m.content }))
            .collect();

        json!({
            "model": config.model,
            "messages": messages,
            "temperature": config.temperature,
            "max_tokens": config.max_tokens,
        })
    }

    fn parse_response(&self, body: &Value) -> Result<String> {
        body.pointer("/choices/0/message/content")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .ok_or_else(|| {
                LlmError::MalformedResponse("missing choices[0].message.content".to_string())
            })
    }
}
