/// Chat relay
pub mod relay;

/// Input DTOs
pub mod inputs;

pub use inputs::{ChatInput, ChatOutput};
pub use relay::{ChatRelay, SYSTEM_PROMPT};
