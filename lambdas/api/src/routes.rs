use std::sync::Arc;

use axum::{
    extract::{
        multipart::MultipartRejection, rejection::JsonRejection, DefaultBodyLimit, Multipart,
        State,
    },
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use domain::{
    chat::{ChatInput, ChatOutput},
    prescriptions::sheet,
    ChatRelay, Error, PrescriptionExtractor,
};
use serde_json::{json, Value};
use ulid::Ulid;

const MISSING_PDF: &str = "No PDF file uploaded";
const PDF_TOO_LARGE: &str = "PDF file is too large";
const PDF_FAILED: &str = "Failed to process PDF";
const MISSING_MESSAGE: &str = "Message is required";
const BODY_TOO_LARGE: &str = "Request body is too large";
const CHAT_FAILED: &str = "Failed to get a reply from the assistant";

#[derive(Clone)]
pub struct AppState {
    pub chat: Arc<ChatRelay>,
    pub extractor: Arc<PrescriptionExtractor>,
}

pub fn router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/chat", post(chat))
        .route("/upload", post(upload))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state)
}

fn status_of(err: &Error) -> StatusCode {
    if err.is_client_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

// Relay a chat message
#[tracing::instrument(skip_all, fields(request_id = %Ulid::new()))]
async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatInput>, JsonRejection>,
) -> Result<impl IntoResponse, (StatusCode, Json<Value>)> {
    let Json(input) = payload.map_err(|e| {
        tracing::error!("Rejected chat body: {}", e.body_text());
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            (e.status(), Json(json!({ "error": BODY_TOO_LARGE })))
        } else {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": MISSING_MESSAGE })),
            )
        }
    })?;

    let reply = state
        .chat
        .reply(input.message.as_deref())
        .await
        .map_err(|e| {
            tracing::error!("Chat error: {}", e);
            let status = status_of(&e);
            let message = if status == StatusCode::BAD_REQUEST {
                MISSING_MESSAGE
            } else {
                CHAT_FAILED
            };
            (status, Json(json!({ "error": message })))
        })?;

    Ok(Json(ChatOutput { reply }))
}

// Convert an uploaded prescription PDF into a coding spreadsheet
#[tracing::instrument(skip_all, fields(request_id = %Ulid::new()))]
async fn upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let reject = |status: StatusCode, reason: String| {
        tracing::error!("Rejected upload: {}", reason);
        if status == StatusCode::PAYLOAD_TOO_LARGE {
            (status, PDF_TOO_LARGE.to_string())
        } else {
            (StatusCode::BAD_REQUEST, MISSING_PDF.to_string())
        }
    };

    let mut multipart = multipart.map_err(|e| reject(e.status(), e.body_text()))?;

    let mut pdf = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| reject(e.status(), e.body_text()))?
    {
        if field.name() == Some("pdf") {
            pdf = Some(
                field
                    .bytes()
                    .await
                    .map_err(|e| reject(e.status(), e.body_text()))?,
            );
            break;
        }
    }

    let pdf = match pdf {
        Some(data) if !data.is_empty() => data,
        _ => {
            return Err(reject(
                StatusCode::BAD_REQUEST,
                "missing pdf field".to_string(),
            ))
        }
    };

    let workbook = state.extractor.to_spreadsheet(&pdf).await.map_err(|e| {
        tracing::error!("PDF Processing Error: {}", e);
        let status = status_of(&e);
        if status == StatusCode::BAD_REQUEST {
            (status, MISSING_PDF.to_string())
        } else {
            (status, PDF_FAILED.to_string())
        }
    })?;

    tracing::info!("Returning spreadsheet ({} bytes)", workbook.len());

    Ok((
        [
            (header::CONTENT_TYPE, sheet::CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", sheet::FILE_NAME),
            ),
        ],
        workbook,
    ))
}

async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}
