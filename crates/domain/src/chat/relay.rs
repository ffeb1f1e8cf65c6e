use std::sync::Arc;

use tracing::info;

use crate::{
    errors::Error,
    llm::{ChatMessage, ChatModel, CompletionRequest},
};

pub const SYSTEM_PROMPT: &str = "You are a helpful pharmacy assistant.";

/// Forwards a user message to the chat model and hands back its reply.
pub struct ChatRelay {
    model: Arc<dyn ChatModel>,
    model_name: String,
}

impl ChatRelay {
    pub fn new(model: Arc<dyn ChatModel>, model_name: impl Into<String>) -> Self {
        Self {
            model,
            model_name: model_name.into(),
        }
    }

    pub async fn reply(&self, message: Option<&str>) -> Result<String, Error> {
        let message = match message {
            Some(m) if !m.trim().is_empty() => m,
            _ => return Err(Error::invalid_input("Message is required")),
        };

        let request = CompletionRequest::new(
            self.model_name.as_str(),
            vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(message)],
        );
        let reply = self.model.complete(request).await?;

        info!(chars = reply.len(), "relayed chat reply");
        Ok(reply)
    }
}
