//! penna_llms — uniform chat-completion gateway over pluggable providers.
//!
//! One `Gateway` owns the HTTP call path (credential check, timeout, status
//! and body validation); a [`ChatShape`] strategy handles the
//! provider-specific request shaping and response parsing. Adding a provider
//! means adding a shape, never branching inside the call path.
//!
//! ```rust,no_run
//! use penna_llms::{ChatMessage, CompletionClient, Gateway, GatewayConfig, ProviderKind};
//!
//! # async fn run() -> penna_llms::Result<()> {
//! let config = GatewayConfig::for_provider(ProviderKind::OpenAi, "sk-...");
//! let gateway = Gateway::new(config)?;
//! let text = gateway.complete(&[ChatMessage::user("hello")]).await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod gateway;
pub mod providers;
pub mod shape;
pub mod types;


pub use error::{LlmError, Result};
pub use gateway::{CompletionClient, Gateway};
pub use providers::{AnthropicShape, OpenAiShape};
pub use shape::ChatShape;
pub use types::{ChatMessage, GatewayConfig, ProviderKind, Role};
