use async_trait::async_trait;
use tracing::{error, info};

use crate::errors::Error;

use super::{messages::CompletionResponse, ChatModel, CompletionRequest};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Client for an OpenAI-compatible `/chat/completions` endpoint.
#[derive(Clone)]
pub struct OpenAiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl OpenAiClient {
    /// `base_url` should be like `https://api.openai.com/v1` (no trailing slash needed).
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl ChatModel for OpenAiClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String, Error> {
        let url = format!("{}/chat/completions", self.base_url);

        info!(model = %request.model, messages = request.messages.len(), "calling chat completions");
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            error!(status = status.as_u16(), "chat completions returned an error");
            return Err(Error::upstream(format!(
                "chat completions returned {}: {}",
                status.as_u16(),
                body
            )));
        }

        let parsed: CompletionResponse = resp.json().await?;
        parsed
            .into_first_content()
            .ok_or_else(|| Error::upstream("chat completions returned no choices"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::ChatMessage;
    use axum::{http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};

    /// Serves `router` on an ephemeral port and returns its base URL.
    async fn spawn_upstream(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}/v1")
    }

    fn hello() -> CompletionRequest {
        CompletionRequest::new("gpt-3.5-turbo", vec![ChatMessage::user("hello")])
    }

    #[tokio::test]
    async fn returns_first_choice_content() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|headers: axum::http::HeaderMap, Json(body): Json<Value>| async move {
                assert_eq!(headers["authorization"], "Bearer test-key");
                assert_eq!(body["model"], "gpt-3.5-turbo");
                assert_eq!(body["messages"][0]["content"], "hello");
                Json(json!({
                    "choices": [
                        { "message": { "content": "hi there" } },
                        { "message": { "content": "ignored" } }
                    ]
                }))
            }),
        );
        let client = OpenAiClient::new("test-key", spawn_upstream(router).await);

        let reply = client.complete(hello()).await.unwrap();

        assert_eq!(reply, "hi there");
    }

    #[tokio::test]
    async fn empty_choices_is_upstream_error() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|| async { Json(json!({ "choices": [] })) }),
        );
        let client = OpenAiClient::new("k", spawn_upstream(router).await);

        let err = client.complete(hello()).await.unwrap_err();

        assert!(matches!(err, Error::Upstream { .. }));
    }

    #[tokio::test]
    async fn unparseable_envelope_is_upstream_error() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|| async { (StatusCode::OK, "not json") }),
        );
        let client = OpenAiClient::new("k", spawn_upstream(router).await);

        let err = client.complete(hello()).await.unwrap_err();

        assert!(matches!(err, Error::Upstream { .. }));
    }

    #[tokio::test]
    async fn error_status_carries_body() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|| async { (StatusCode::UNAUTHORIZED, "bad key") }),
        );
        let client = OpenAiClient::new("k", spawn_upstream(router).await);

        let err = client.complete(hello()).await.unwrap_err();

        match err {
            Error::Upstream { message } => {
                assert!(message.contains("401"));
                assert!(message.contains("bad key"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn unreachable_upstream_is_upstream_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let client = OpenAiClient::new("k", format!("http://{addr}/v1"));

        let err = client.complete(hello()).await.unwrap_err();

        assert!(matches!(err, Error::Upstream { .. }));
    }
}
