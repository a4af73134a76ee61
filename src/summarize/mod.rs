//! Summarization orchestrator: extraction, classification, prompt building,
//! and remote collaborator calls behind a non-throwing outcome.

pub mod prompt;

use crate::classify::{DocumentCategory, classify};
use crate::extraction::detect::{FileKind, detect_kind};
use crate::extraction::{ExtractionService, SourceFile};
use crate::gemini::{ChatClient, RemoteServiceError};
use crate::metrics::{MetricsSnapshot, PipelineMetrics};
use crate::summarize::prompt::{build_summary_prompt, extracted_text_preview, truncate_for_prompt};
use async_trait::async_trait;
use std::sync::Arc;

/// Reason reported when extraction yields no usable text.
pub const EMPTY_TEXT_REASON: &str = "no readable text found in the document";

/// Tagged result of a summarization request. There is no partial or streaming
/// variant; every failure carries a human-readable reason.
#[derive(Debug, Clone)]
pub enum SummaryOutcome {
    /// The collaborator produced a summary.
    Success {
        /// Normalized summary text.
        summary: String,
        /// First 500 characters of the extracted text, with ellipsis.
        extracted_text_preview: String,
        /// Category derived from the filename and hint.
        document_type: DocumentCategory,
        /// Name of the summarized file.
        source_file_name: String,
    },
    /// The request failed at some stage; the reason is user-presentable.
    Failure {
        /// Human-readable failure description.
        reason: String,
    },
}

/// Abstraction over the summarization pipeline used by the HTTP surface.
#[async_trait]
pub trait SummaryApi: Send + Sync {
    /// Extract, classify, and summarize a document. Never raises.
    async fn summarize(&self, file: SourceFile, category_hint: Option<String>) -> SummaryOutcome;

    /// Forward a free-form prompt to the remote collaborator.
    async fn chat(&self, message: String) -> Result<String, RemoteServiceError>;

    /// Retrieve the current metrics snapshot for diagnostics.
    fn metrics_snapshot(&self) -> MetricsSnapshot;
}

/// Coordinates the full summarization pipeline.
///
/// Owns the extraction service and the chat adapter; construct once near
/// process start and share through an `Arc`.
pub struct SummaryService {
    extraction: ExtractionService,
    chat_client: Box<dyn ChatClient>,
    metrics: Arc<PipelineMetrics>,
}

impl SummaryService {
    /// Build a new summarization service over the given collaborators.
    pub fn new(
        extraction: ExtractionService,
        chat_client: Box<dyn ChatClient>,
        metrics: Arc<PipelineMetrics>,
    ) -> Self {
        Self {
            extraction,
            chat_client,
            metrics,
        }
    }

    /// Run the pipeline: extract text, refuse empty output locally, truncate,
    /// prompt the collaborator, and package the outcome.
    pub async fn summarize(
        &self,
        file: SourceFile,
        category_hint: Option<String>,
    ) -> SummaryOutcome {
        let outcome = self.run(&file, category_hint.as_deref()).await;
        self.metrics
            .record_summary(matches!(outcome, SummaryOutcome::Success { .. }));
        outcome
    }

    async fn run(&self, file: &SourceFile, category_hint: Option<&str>) -> SummaryOutcome {
        let used_ocr = detect_kind(file) == Some(FileKind::Image);
        let extracted = match self.extraction.extract(file).await {
            Ok(result) => result,
            Err(error) => {
                tracing::warn!(file = %file.name, error = %error, "Extraction failed");
                return SummaryOutcome::Failure {
                    reason: error.to_string(),
                };
            }
        };
        self.metrics.record_extraction(used_ocr);

        if extracted.text.trim().is_empty() {
            tracing::info!(file = %file.name, "Extraction yielded no usable text; skipping remote call");
            return SummaryOutcome::Failure {
                reason: EMPTY_TEXT_REASON.to_string(),
            };
        }

        let document_type = classify(&file.name, category_hint);
        let document_text = truncate_for_prompt(&extracted.text);
        let prompt = build_summary_prompt(&document_text, document_type);

        tracing::info!(
            file = %file.name,
            document_type = %document_type,
            prompt_chars = prompt.chars().count(),
            "Requesting summary"
        );

        match self.chat_client.send_message(&prompt).await {
            Ok(summary) => SummaryOutcome::Success {
                summary,
                extracted_text_preview: extracted_text_preview(&extracted.text),
                document_type,
                source_file_name: extracted.source_file_name,
            },
            Err(error) => {
                tracing::warn!(file = %file.name, error = %error, "Remote summarization failed");
                SummaryOutcome::Failure {
                    reason: error.to_string(),
                }
            }
        }
    }
}

#[async_trait]
impl SummaryApi for SummaryService {
    async fn summarize(&self, file: SourceFile, category_hint: Option<String>) -> SummaryOutcome {
        SummaryService::summarize(self, file, category_hint).await
    }

    async fn chat(&self, message: String) -> Result<String, RemoteServiceError> {
        self.chat_client.send_message(&message).await
    }

    fn metrics_snapshot(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}
