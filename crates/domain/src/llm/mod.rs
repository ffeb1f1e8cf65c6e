/// Chat completion wire types
pub mod messages;

/// Chat model capability
pub mod model;

/// OpenAI-compatible HTTP client
pub mod openai;

pub use messages::{ChatMessage, CompletionRequest, Role};
pub use model::ChatModel;
pub use openai::OpenAiClient;

/// Test doubles
#[cfg(any(test, feature = "fixtures"))]
pub mod testing;
