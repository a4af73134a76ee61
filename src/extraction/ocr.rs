//! Optical-character-recognition strategy backed by a `tesseract` subprocess.

use crate::extraction::types::EngineError;
use async_trait::async_trait;
use tokio::process::Command;

/// Fixed language model used for all recognitions.
pub const OCR_LANGUAGE: &str = "eng";

/// Interface implemented by OCR engines.
#[async_trait]
pub trait OcrEngine: Send + Sync {
    /// Recognize text in a raster image, trimmed of surrounding whitespace.
    async fn recognize(&self, image: &[u8]) -> Result<String, EngineError>;
}

/// Production engine shelling out to the `tesseract` binary.
///
/// The image is staged in a temporary directory; tesseract sniffs the format
/// from the file contents. Engine failures are surfaced as-is, never retried.
pub struct TesseractOcrEngine;

#[async_trait]
impl OcrEngine for TesseractOcrEngine {
    async fn recognize(&self, image: &[u8]) -> Result<String, EngineError> {
        let dir = tempfile::tempdir().map_err(|error| {
            EngineError::other(format!("failed to create temp dir for OCR input: {error}"))
        })?;
        let input_path = dir.path().join("input");
        tokio::fs::write(&input_path, image).await.map_err(|error| {
            EngineError::other(format!("failed to stage OCR input file: {error}"))
        })?;

        let output = Command::new("tesseract")
            .arg(&input_path)
            .arg("stdout")
            .arg("-l")
            .arg(OCR_LANGUAGE)
            .arg("--psm")
            .arg("6")
            .output()
            .await
            .map_err(|error| {
                EngineError::other(format!("failed to launch tesseract: {error}"))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(EngineError::other(format!(
                "tesseract exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
        tracing::debug!(chars = text.len(), "OCR pass completed");
        Ok(text)
    }
}
