//! HTTP surface for docmedic.
//!
//! This module exposes a compact Axum router with a handful of endpoints:
//!
//! - `POST /summarize` – Extract text from an uploaded document (base64 payload),
//!   classify it, and request a summary from the remote collaborator. Failures are
//!   reported in-band (`success: false`), mirroring the non-throwing orchestrator.
//! - `POST /chat` – Forward a free-form assistant prompt to the remote collaborator.
//! - `GET /metrics` – Observe extraction and summarization counters.
//! - `GET /commands` – Machine-readable command catalog for quick discovery by tools/hosts.

use crate::extraction::SourceFile;
use crate::gemini::RemoteServiceError;
use crate::metrics::MetricsSnapshot;
use crate::summarize::{SummaryApi, SummaryOutcome};
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

/// Build the HTTP router exposing the summarization API surface.
pub fn create_router<S>(service: Arc<S>) -> Router
where
    S: SummaryApi + 'static,
{
    Router::new()
        .route("/summarize", post(summarize_document::<S>))
        .route("/chat", post(chat::<S>))
        .route("/metrics", get(get_metrics::<S>))
        .route("/commands", get(get_commands))
        .with_state(service)
}

/// Request body for the `POST /summarize` endpoint.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummarizeRequest {
    /// Original file name; drives category classification and the extension fallback.
    file_name: String,
    /// Declared MIME type of the upload (may be empty).
    #[serde(default)]
    content_type: String,
    /// Base64-encoded file contents.
    data: String,
    /// Optional category hint consulted when the filename yields no keyword match.
    #[serde(default)]
    category_hint: Option<String>,
}

/// Caller-facing result shape consumed by the presentation layer.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SummarizeResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    extracted_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    document_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    file_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Summarize an uploaded document.
///
/// Always answers HTTP 200 with the tagged outcome; only malformed requests
/// (undecodable payloads) are rejected at the HTTP layer.
async fn summarize_document<S>(
    State(service): State<Arc<S>>,
    Json(request): Json<SummarizeRequest>,
) -> Result<Json<SummarizeResponse>, ApiError>
where
    S: SummaryApi,
{
    let request_id = uuid::Uuid::new_v4();
    let bytes = BASE64.decode(request.data.as_bytes()).map_err(|error| {
        ApiError(
            StatusCode::BAD_REQUEST,
            format!("invalid base64 payload: {error}"),
        )
    })?;

    tracing::info!(
        %request_id,
        file = %request.file_name,
        content_type = %request.content_type,
        bytes = bytes.len(),
        "Summarize request received"
    );

    let file = SourceFile {
        name: request.file_name,
        media_type: request.content_type,
        bytes,
    };
    let outcome = service.summarize(file, request.category_hint).await;

    let response = match outcome {
        SummaryOutcome::Success {
            summary,
            extracted_text_preview,
            document_type,
            source_file_name,
        } => SummarizeResponse {
            success: true,
            summary: Some(summary),
            extracted_text: Some(extracted_text_preview),
            document_type: Some(document_type.label().to_string()),
            file_name: Some(source_file_name),
            error: None,
        },
        SummaryOutcome::Failure { reason } => {
            tracing::info!(%request_id, reason = %reason, "Summarize request failed");
            SummarizeResponse {
                success: false,
                summary: None,
                extracted_text: None,
                document_type: None,
                file_name: None,
                error: Some(reason),
            }
        }
    };
    Ok(Json(response))
}

/// Request body for the `POST /chat` endpoint.
#[derive(Deserialize)]
struct ChatRequest {
    /// Prompt text passed through to the remote collaborator.
    message: String,
}

/// Response body for the `POST /chat` endpoint.
#[derive(Serialize)]
struct ChatResponseBody {
    response: String,
}

/// Forward a prompt to the remote collaborator.
async fn chat<S>(
    State(service): State<Arc<S>>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponseBody>, ApiError>
where
    S: SummaryApi,
{
    let response = service.chat(request.message).await?;
    Ok(Json(ChatResponseBody { response }))
}

/// Return a concise metrics snapshot with pipeline counters.
async fn get_metrics<S>(State(service): State<Arc<S>>) -> Json<MetricsSnapshot>
where
    S: SummaryApi,
{
    Json(service.metrics_snapshot())
}

/// Descriptor for a single command in the discovery catalog.
#[derive(Serialize)]
struct CommandDescriptor {
    name: &'static str,
    method: &'static str,
    path: &'static str,
    description: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    request_example: Option<serde_json::Value>,
}

/// Response body for `GET /commands`.
#[derive(Serialize)]
struct CommandsResponse {
    commands: Vec<CommandDescriptor>,
}

/// Enumerate supported HTTP commands for discovery/UX in hosts and tools.
async fn get_commands() -> Json<CommandsResponse> {
    Json(CommandsResponse {
        commands: vec![
            CommandDescriptor {
                name: "summarize",
                method: "POST",
                path: "/summarize",
                description: "Extract text from an uploaded document and request a structured summary. Response returns { \"success\": boolean, \"summary\"?: string, \"error\"?: string }.",
                request_example: Some(json!({
                    "fileName": "lab_result_march.pdf",
                    "contentType": "application/pdf",
                    "data": "<base64 file contents>",
                    "categoryHint": "lab"
                })),
            },
            CommandDescriptor {
                name: "chat",
                method: "POST",
                path: "/chat",
                description: "Forward a free-form assistant prompt to the remote collaborator.",
                request_example: Some(json!({
                    "message": "What are the common interactions of ibuprofen?"
                })),
            },
            CommandDescriptor {
                name: "metrics",
                method: "GET",
                path: "/metrics",
                description: "Return extraction and summarization counters useful for observability dashboards.",
                request_example: None,
            },
        ],
    })
}

struct ApiError(StatusCode, String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

impl From<RemoteServiceError> for ApiError {
    fn from(inner: RemoteServiceError) -> Self {
        Self(StatusCode::BAD_GATEWAY, inner.to_string())
    }
}
