//! Thin adapter for the remote text-generation collaborator.
//!
//! The collaborator is treated as an opaque text-in/text-out service behind
//! `POST {API_BASE}/api/gemini`. The same adapter serves the summarization
//! orchestrator and the free-form assistant prompts (symptom analysis, drug
//! interactions, treatment plans) issued by the UI.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

/// Sentinel summary used when the collaborator returns neither known field.
pub const MISSING_SUMMARY_SENTINEL: &str = "A summary could not be generated for this document.";

/// Errors raised by the remote chat adapter.
#[derive(Debug, Error)]
pub enum RemoteServiceError {
    /// HTTP layer failed before receiving a response.
    #[error("Gemini request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// Collaborator responded with a non-2xx status.
    #[error("Gemini API error: {status}: {body}")]
    UnexpectedStatus {
        /// HTTP status returned by the collaborator.
        status: reqwest::StatusCode,
        /// Textual body captured for diagnostics.
        body: String,
    },
}

/// Interface implemented by remote chat collaborators.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Submit a prompt and return the collaborator's normalized reply.
    async fn send_message(&self, message: &str) -> Result<String, RemoteServiceError>;
}

/// Reply shape accepted from the collaborator.
///
/// Deployed backends answer with `response`; older ones used `message`. The
/// normalization precedence is `response`, then `message`, then the fixed
/// sentinel.
#[derive(Debug, Deserialize)]
pub(crate) struct ChatResponse {
    #[serde(default)]
    response: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

pub(crate) fn normalize_reply(reply: ChatResponse) -> String {
    reply
        .response
        .or(reply.message)
        .unwrap_or_else(|| MISSING_SUMMARY_SENTINEL.to_string())
}

/// HTTP client for the deployed assistant backend.
pub struct GeminiClient {
    pub(crate) client: Client,
    pub(crate) base_url: String,
}

impl GeminiClient {
    /// Construct a client against an explicit base URL.
    pub fn new(base_url: String) -> Self {
        let client = Client::builder()
            .user_agent("docmedic/0.1")
            .build()
            .expect("Failed to construct reqwest::Client for Gemini");
        Self { client, base_url }
    }

    /// Construct a client using the configured base URL.
    pub fn from_config() -> Self {
        Self::new(crate::config::get_config().gemini_api_base.clone())
    }

    fn endpoint(&self) -> String {
        format!("{}/api/gemini", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl ChatClient for GeminiClient {
    async fn send_message(&self, message: &str) -> Result<String, RemoteServiceError> {
        let response = self
            .client
            .post(self.endpoint())
            .json(&json!({ "message": message }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let error = RemoteServiceError::UnexpectedStatus { status, body };
            tracing::error!(error = %error, "Gemini request failed");
            return Err(error);
        }

        let reply: ChatResponse = response.json().await?;
        Ok(normalize_reply(reply))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::{Method::POST, MockServer};

    fn client_for(server: &MockServer) -> GeminiClient {
        GeminiClient {
            client: Client::builder()
                .user_agent("docmedic-test")
                .build()
                .expect("client"),
            base_url: server.base_url(),
        }
    }

    #[tokio::test]
    async fn prefers_the_response_field() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/api/gemini")
                    .json_body(serde_json::json!({ "message": "Summarize" }));
                then.status(200).json_body(serde_json::json!({
                    "response": "From response",
                    "message": "From message"
                }));
            })
            .await;

        let reply = client_for(&server)
            .send_message("Summarize")
            .await
            .expect("reply");
        mock.assert_async().await;
        assert_eq!(reply, "From response");
    }

    #[tokio::test]
    async fn falls_back_to_the_message_field() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/gemini");
                then.status(200)
                    .json_body(serde_json::json!({ "message": "From message" }));
            })
            .await;

        let reply = client_for(&server)
            .send_message("Summarize")
            .await
            .expect("reply");
        assert_eq!(reply, "From message");
    }

    #[tokio::test]
    async fn empty_reply_yields_the_sentinel() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/gemini");
                then.status(200).json_body(serde_json::json!({}));
            })
            .await;

        let reply = client_for(&server)
            .send_message("Summarize")
            .await
            .expect("reply");
        assert_eq!(reply, MISSING_SUMMARY_SENTINEL);
    }

    #[tokio::test]
    async fn error_status_carries_status_and_body() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/gemini");
                then.status(500).body("internal error");
            })
            .await;

        let error = client_for(&server)
            .send_message("Summarize")
            .await
            .expect_err("error response");
        let detail = error.to_string();
        assert!(detail.contains("500"), "missing status: {detail}");
        assert!(detail.contains("internal error"), "missing body: {detail}");
    }
}
