//! Structured-document parsing strategy backed by `lopdf`.

use crate::extraction::types::EngineError;
use crate::extraction::worker::WorkerDisposition;
use async_trait::async_trait;
use lopdf::Document;

/// Interface implemented by structured-document text engines.
#[async_trait]
pub trait PdfTextEngine: Send + Sync {
    /// Parse the byte stream into pages and return their concatenated text,
    /// joined with newlines in document order.
    async fn extract_text(
        &self,
        bytes: &[u8],
        worker: &WorkerDisposition,
    ) -> Result<String, EngineError>;
}

/// Production engine parsing PDFs in-process with `lopdf`.
///
/// With a resolved worker the parse runs on the blocking pool, off the async
/// executor; a failed offload is the worker-attributable error class. With the
/// worker disabled the parse runs inline (degraded synchronous mode).
pub struct LopdfTextEngine;

impl LopdfTextEngine {
    fn parse_pages(bytes: &[u8]) -> Result<String, EngineError> {
        let document = Document::load_mem(bytes).map_err(|error| {
            EngineError::invalid_document(format!("failed to parse PDF: {error}"))
        })?;

        let mut pages = Vec::new();
        for page_number in document.get_pages().keys() {
            let page_text = document.extract_text(&[*page_number]).map_err(|error| {
                EngineError::other(format!(
                    "failed to extract text from page {page_number}: {error}"
                ))
            })?;
            pages.push(page_text.trim().to_string());
        }
        Ok(pages.join("\n"))
    }
}

#[async_trait]
impl PdfTextEngine for LopdfTextEngine {
    async fn extract_text(
        &self,
        bytes: &[u8],
        worker: &WorkerDisposition,
    ) -> Result<String, EngineError> {
        match worker {
            WorkerDisposition::Remote(url) => {
                tracing::debug!(worker = %url, "Parsing PDF with worker offload");
                let owned = bytes.to_vec();
                tokio::task::spawn_blocking(move || Self::parse_pages(&owned))
                    .await
                    .map_err(|error| {
                        EngineError::worker(format!("worker parse task failed: {error}"))
                    })?
            }
            WorkerDisposition::Disabled => {
                tracing::debug!("Parsing PDF synchronously without worker");
                Self::parse_pages(bytes)
            }
        }
    }
}
