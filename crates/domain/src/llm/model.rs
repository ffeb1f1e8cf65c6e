use async_trait::async_trait;

use crate::errors::Error;

use super::CompletionRequest;

/// A language model that answers a list of role-tagged messages with text.
///
/// Implementations are built once at startup and shared behind an `Arc`, so
/// tests can hand the relay and the extractor a double instead.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Returns the content of the first choice.
    ///
    /// Fails with [`Error::Upstream`] when the call errors or the model
    /// produces no choices.
    async fn complete(&self, request: CompletionRequest) -> Result<String, Error>;
}
