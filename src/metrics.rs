use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters describing extraction and summarization activity.
#[derive(Default)]
pub struct PipelineMetrics {
    documents_extracted: AtomicU64,
    ocr_documents: AtomicU64,
    summaries_generated: AtomicU64,
    summaries_failed: AtomicU64,
}

impl PipelineMetrics {
    /// Create an empty metrics accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful text extraction, noting whether OCR was the strategy used.
    pub fn record_extraction(&self, used_ocr: bool) {
        self.documents_extracted.fetch_add(1, Ordering::Relaxed);
        if used_ocr {
            self.ocr_documents.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record a summarization outcome.
    pub fn record_summary(&self, success: bool) {
        if success {
            self.summaries_generated.fetch_add(1, Ordering::Relaxed);
        } else {
            self.summaries_failed.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Return a snapshot of the current counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            documents_extracted: self.documents_extracted.load(Ordering::Relaxed),
            ocr_documents: self.ocr_documents.load(Ordering::Relaxed),
            summaries_generated: self.summaries_generated.load(Ordering::Relaxed),
            summaries_failed: self.summaries_failed.load(Ordering::Relaxed),
        }
    }
}

/// Immutable view of pipeline counters used for reporting.
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct MetricsSnapshot {
    /// Number of documents successfully reduced to text since startup.
    pub documents_extracted: u64,
    /// Subset of extractions that went through the OCR strategy.
    pub ocr_documents: u64,
    /// Number of summaries produced by the remote collaborator.
    pub summaries_generated: u64,
    /// Number of summarization requests that ended in a failure outcome.
    pub summaries_failed: u64,
}
