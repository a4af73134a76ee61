//! Core data types and error definitions for the extraction pipeline.

use thiserror::Error;

/// An uploaded file handed to the extraction pipeline.
///
/// The pipeline borrows the file per call and keeps no long-term ownership of
/// the payload.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Original file name as supplied by the uploader.
    pub name: String,
    /// Declared MIME type, possibly empty or wrong; the filename extension is
    /// consulted as a fallback.
    pub media_type: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

/// Plain text produced by a successful extraction.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Extracted text, trimmed of surrounding whitespace. May be empty; the
    /// caller decides whether empty output is an error.
    pub text: String,
    /// Name of the file the text was extracted from.
    pub source_file_name: String,
}

/// Failure classes reported by engine adapters.
///
/// The pipeline's retry decision is a structural match on this kind rather
/// than substring sniffing of error text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineErrorKind {
    /// Failure attributable to the rendering-worker resource; retried once
    /// with the worker forcibly disabled.
    Worker,
    /// Input bytes are not a parsable structured document.
    InvalidDocument,
    /// Any other engine failure. Not retried.
    Other,
}

/// Error raised by a PDF or OCR engine adapter.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct EngineError {
    /// Structural classification used for retry and error-mapping decisions.
    pub kind: EngineErrorKind,
    /// Human-readable detail.
    pub message: String,
}

impl EngineError {
    /// Build a worker-attributable engine error.
    pub fn worker(message: impl Into<String>) -> Self {
        Self {
            kind: EngineErrorKind::Worker,
            message: message.into(),
        }
    }

    /// Build an invalid-document engine error.
    pub fn invalid_document(message: impl Into<String>) -> Self {
        Self {
            kind: EngineErrorKind::InvalidDocument,
            message: message.into(),
        }
    }

    /// Build an unclassified engine error.
    pub fn other(message: impl Into<String>) -> Self {
        Self {
            kind: EngineErrorKind::Other,
            message: message.into(),
        }
    }
}

/// Errors surfaced by the extraction pipeline.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// Neither a structured-document signature nor an image signature was
    /// detected for the input.
    #[error("Unsupported file type for '{file_name}' ({media_type}): expected a PDF or an image")]
    UnsupportedType {
        /// Name of the rejected file.
        file_name: String,
        /// Declared media type of the rejected file, or `(none)`.
        media_type: String,
    },
    /// The structured-document parser could not parse the byte stream.
    #[error("File is not a valid PDF document: {0}")]
    CorruptInput(String),
    /// The worker or OCR engine failed for a reason other than corrupt input.
    #[error("Extraction engine failed: {0}")]
    Engine(String),
}
