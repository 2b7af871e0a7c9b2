//! Provider request-shaping strategy.

use reqwest::header::HeaderMap;
use serde_json::Value;

use crate::error::Result;
use crate::types::{ChatMessage, GatewayConfig};

/// Shapes a unified message list into one provider's wire format and pulls
/// the response text back out. The gateway is agnostic to which shape is
/// active; new providers add a shape rather than branching the call path.
pub trait ChatShape: Send + Sync {
    fn provider_id(&self) -> &'static str;

    /// Request headers, including the credential scheme.
    fn build_headers(&self, config: &GatewayConfig) -> Result<HeaderMap>;

    /// Serialize the request body for this provider.
    fn shape_request(&self, config: &GatewayConfig, messages: &[ChatMessage]) -> Value;

    /// Extract the completion text from a parsed response body.
    fn parse_response(&self, body: &Value) -> Result<String>;
}
