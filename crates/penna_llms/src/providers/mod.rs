pub mod anthropic;
pub mod openai;

pub use anthropic::AnthropicShape;
pub use openai::OpenAiShape;
