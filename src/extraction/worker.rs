//! Resolution of the optional rendering-worker resource.
//!
//! The PDF engine can offload parsing when a versioned worker script is
//! reachable. Candidate mirrors are probed with lightweight HEAD requests on
//! first use; the first reachable URL is cached for the process lifetime. When
//! none respond, extraction proceeds in a degraded synchronous mode.

use reqwest::Client;
use tokio::sync::OnceCell;

/// Versioned worker-script mirrors probed in order.
pub const DEFAULT_WORKER_URLS: [&str; 3] = [
    "https://cdnjs.cloudflare.com/ajax/libs/pdf.js/4.4.168/pdf.worker.min.mjs",
    "https://unpkg.com/pdfjs-dist@4.4.168/build/pdf.worker.min.mjs",
    "https://cdn.jsdelivr.net/npm/pdfjs-dist@4.4.168/build/pdf.worker.min.mjs",
];

/// Worker availability handed to the PDF engine for a single parse attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerDisposition {
    /// A worker script is reachable at this URL; the engine may offload.
    Remote(String),
    /// No worker available (or forcibly disabled); parse inline.
    Disabled,
}

/// Probes worker candidates once and caches the outcome.
///
/// Safe to share across concurrent extractions: racing callers converge on the
/// same resolved state, and the candidate list is never re-probed afterwards.
pub struct WorkerResolver {
    client: Client,
    candidates: Vec<String>,
    state: OnceCell<WorkerDisposition>,
}

impl WorkerResolver {
    /// Build a resolver over an ordered candidate URL list.
    pub fn new(candidates: Vec<String>) -> Self {
        let client = Client::builder()
            .user_agent("docmedic/0.1")
            .build()
            .expect("Failed to construct reqwest::Client for worker probing");
        Self {
            client,
            candidates,
            state: OnceCell::new(),
        }
    }

    /// Build a resolver using the configured override or the default mirrors.
    pub fn from_config() -> Self {
        let candidates = crate::config::get_config()
            .pdf_worker_urls
            .clone()
            .unwrap_or_else(|| DEFAULT_WORKER_URLS.iter().map(|url| url.to_string()).collect());
        Self::new(candidates)
    }

    /// Build a resolver that never probes and always reports `Disabled`.
    pub fn disabled() -> Self {
        let resolver = Self::new(Vec::new());
        resolver
            .state
            .set(WorkerDisposition::Disabled)
            .expect("fresh OnceCell");
        resolver
    }

    /// Resolve the worker disposition, probing candidates on first call only.
    pub async fn resolve(&self) -> WorkerDisposition {
        self.state
            .get_or_init(|| async { self.probe_candidates().await })
            .await
            .clone()
    }

    async fn probe_candidates(&self) -> WorkerDisposition {
        for url in &self.candidates {
            match self.client.head(url).send().await {
                Ok(response) if response.status().is_success() => {
                    tracing::info!(url = %url, "Rendering worker resolved");
                    return WorkerDisposition::Remote(url.clone());
                }
                Ok(response) => {
                    tracing::debug!(url = %url, status = %response.status(), "Worker candidate rejected");
                }
                Err(error) => {
                    tracing::debug!(url = %url, error = %error, "Worker candidate unreachable");
                }
            }
        }
        tracing::warn!("No rendering worker reachable; PDF parsing falls back to synchronous mode");
        WorkerDisposition::Disabled
    }
}
