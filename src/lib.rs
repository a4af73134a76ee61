#![deny(missing_docs)]

//! Core library for the docmedic document summarization service.

/// HTTP routing and REST handlers.
pub mod api;
/// Document category classification heuristics.
pub mod classify;
/// Environment-driven configuration management.
pub mod config;
/// Document-to-text extraction pipeline.
pub mod extraction;
/// Remote chat collaborator adapter.
pub mod gemini;
/// Structured logging and tracing setup.
pub mod logging;
/// Extraction and summarization counters.
pub mod metrics;
/// Summarization request builder and orchestrator.
pub mod summarize;
