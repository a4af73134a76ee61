//! Document-to-text extraction pipeline: strategy dispatch, worker handling,
//! and error mapping.

pub mod detect;
pub mod ocr;
pub mod pdf;
pub mod types;
pub mod worker;

pub use types::{EngineError, EngineErrorKind, ExtractionError, ExtractionResult, SourceFile};
pub use worker::{WorkerDisposition, WorkerResolver};

use crate::extraction::detect::{FileKind, detect_kind};
use crate::extraction::ocr::{OcrEngine, TesseractOcrEngine};
use crate::extraction::pdf::{LopdfTextEngine, PdfTextEngine};
use std::sync::Arc;

/// Coordinates the extraction strategies behind a single `extract` entry point.
///
/// The service owns the engine adapters and a handle to the shared worker
/// resolver. Construct it once near process start and share it through an
/// `Arc`; individual extractions are independent.
pub struct ExtractionService {
    pdf_engine: Box<dyn PdfTextEngine>,
    ocr_engine: Box<dyn OcrEngine>,
    worker: Arc<WorkerResolver>,
}

impl ExtractionService {
    /// Build a service over explicit engine adapters.
    pub fn new(
        pdf_engine: Box<dyn PdfTextEngine>,
        ocr_engine: Box<dyn OcrEngine>,
        worker: Arc<WorkerResolver>,
    ) -> Self {
        Self {
            pdf_engine,
            ocr_engine,
            worker,
        }
    }

    /// Build a service with the production engines (lopdf + tesseract).
    pub fn with_default_engines(worker: Arc<WorkerResolver>) -> Self {
        Self::new(Box::new(LopdfTextEngine), Box::new(TesseractOcrEngine), worker)
    }

    /// Extract plain text from a file, choosing a strategy by declared media
    /// type first and filename extension second.
    ///
    /// Empty output is not an error here; the summarization layer decides how
    /// to treat unusable text.
    pub async fn extract(&self, file: &SourceFile) -> Result<ExtractionResult, ExtractionError> {
        match detect_kind(file) {
            Some(FileKind::Document) => self.extract_document(file).await,
            Some(FileKind::Image) => {
                tracing::info!(file = %file.name, "Extracting text via OCR");
                let text = self
                    .ocr_engine
                    .recognize(&file.bytes)
                    .await
                    .map_err(map_engine_error)?;
                Ok(self.finish(file, text))
            }
            None => Err(ExtractionError::UnsupportedType {
                file_name: file.name.clone(),
                media_type: if file.media_type.is_empty() {
                    "(none)".into()
                } else {
                    file.media_type.clone()
                },
            }),
        }
    }

    async fn extract_document(
        &self,
        file: &SourceFile,
    ) -> Result<ExtractionResult, ExtractionError> {
        let disposition = self.worker.resolve().await;
        tracing::info!(file = %file.name, worker = ?disposition, "Extracting text from PDF");

        match self.pdf_engine.extract_text(&file.bytes, &disposition).await {
            Ok(text) => Ok(self.finish(file, text)),
            Err(error) if error.kind == EngineErrorKind::Worker => {
                tracing::warn!(
                    file = %file.name,
                    error = %error,
                    "Worker-attributable parse failure; retrying with worker disabled"
                );
                let text = self
                    .pdf_engine
                    .extract_text(&file.bytes, &WorkerDisposition::Disabled)
                    .await
                    .map_err(map_engine_error)?;
                Ok(self.finish(file, text))
            }
            Err(error) => Err(map_engine_error(error)),
        }
    }

    fn finish(&self, file: &SourceFile, text: String) -> ExtractionResult {
        ExtractionResult {
            text: text.trim().to_string(),
            source_file_name: file.name.clone(),
        }
    }
}

fn map_engine_error(error: EngineError) -> ExtractionError {
    match error.kind {
        EngineErrorKind::InvalidDocument => ExtractionError::CorruptInput(error.message),
        EngineErrorKind::Worker | EngineErrorKind::Other => {
            ExtractionError::Engine(error.message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct StubPdfEngine {
        // One scripted result per expected call, consumed in order.
        results: Mutex<Vec<Result<String, EngineError>>>,
        dispositions: Mutex<Vec<WorkerDisposition>>,
    }

    impl StubPdfEngine {
        fn new(results: Vec<Result<String, EngineError>>) -> Self {
            Self {
                results: Mutex::new(results),
                dispositions: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl PdfTextEngine for StubPdfEngine {
        async fn extract_text(
            &self,
            _bytes: &[u8],
            worker: &WorkerDisposition,
        ) -> Result<String, EngineError> {
            self.dispositions.lock().unwrap().push(worker.clone());
            self.results.lock().unwrap().remove(0)
        }
    }

    struct StubOcrEngine {
        result: Result<String, EngineError>,
        calls: Mutex<usize>,
    }

    #[async_trait]
    impl OcrEngine for StubOcrEngine {
        async fn recognize(&self, _image: &[u8]) -> Result<String, EngineError> {
            *self.calls.lock().unwrap() += 1;
            self.result.clone()
        }
    }

    fn file(name: &str, media_type: &str) -> SourceFile {
        SourceFile {
            name: name.into(),
            media_type: media_type.into(),
            bytes: vec![1, 2, 3],
        }
    }

    fn service(
        pdf: StubPdfEngine,
        ocr: StubOcrEngine,
        worker: WorkerResolver,
    ) -> ExtractionService {
        ExtractionService::new(Box::new(pdf), Box::new(ocr), Arc::new(worker))
    }

    fn idle_ocr() -> StubOcrEngine {
        StubOcrEngine {
            result: Ok(String::new()),
            calls: Mutex::new(0),
        }
    }

    #[tokio::test]
    async fn pdf_files_dispatch_to_the_document_strategy() {
        let pdf = StubPdfEngine::new(vec![Ok("  page text  ".into())]);
        let service = service(pdf, idle_ocr(), WorkerResolver::disabled());

        let result = service
            .extract(&file("report.pdf", "application/pdf"))
            .await
            .expect("extraction");
        assert_eq!(result.text, "page text");
        assert_eq!(result.source_file_name, "report.pdf");
    }

    #[tokio::test]
    async fn image_files_dispatch_to_ocr() {
        let pdf = StubPdfEngine::new(vec![]);
        let ocr = StubOcrEngine {
            result: Ok("recognized".into()),
            calls: Mutex::new(0),
        };
        let service = service(pdf, ocr, WorkerResolver::disabled());

        let result = service
            .extract(&file("scan.png", "image/png"))
            .await
            .expect("extraction");
        assert_eq!(result.text, "recognized");
    }

    #[tokio::test]
    async fn unsupported_files_are_rejected() {
        let service = service(
            StubPdfEngine::new(vec![]),
            idle_ocr(),
            WorkerResolver::disabled(),
        );

        let error = service
            .extract(&file("notes.txt", "text/plain"))
            .await
            .expect_err("unsupported");
        assert!(matches!(error, ExtractionError::UnsupportedType { .. }));
    }

    #[tokio::test]
    async fn worker_failures_retry_once_with_worker_disabled() {
        let pdf = StubPdfEngine::new(vec![
            Err(EngineError::worker("offload lost")),
            Ok("recovered text".into()),
        ]);
        let service = ExtractionService::new(
            Box::new(pdf),
            Box::new(idle_ocr()),
            Arc::new(WorkerResolver::disabled()),
        );

        let result = service
            .extract(&file("report.pdf", "application/pdf"))
            .await
            .expect("retry succeeds");
        assert_eq!(result.text, "recovered text");
    }

    #[tokio::test]
    async fn retry_passes_the_disabled_disposition() {
        let pdf = StubPdfEngine::new(vec![
            Err(EngineError::worker("offload lost")),
            Err(EngineError::other("still broken")),
        ]);
        let dispositions_handle = Arc::new(pdf);
        // Box the Arc-backed stub through a forwarding adapter so we can
        // inspect recorded dispositions after the call.
        struct Forward(Arc<StubPdfEngine>);
        #[async_trait]
        impl PdfTextEngine for Forward {
            async fn extract_text(
                &self,
                bytes: &[u8],
                worker: &WorkerDisposition,
            ) -> Result<String, EngineError> {
                self.0.extract_text(bytes, worker).await
            }
        }

        let service = ExtractionService::new(
            Box::new(Forward(dispositions_handle.clone())),
            Box::new(idle_ocr()),
            Arc::new(WorkerResolver::disabled()),
        );

        let error = service
            .extract(&file("report.pdf", "application/pdf"))
            .await
            .expect_err("second failure surfaces");
        assert!(matches!(error, ExtractionError::Engine(_)));

        let dispositions = dispositions_handle.dispositions.lock().unwrap();
        assert_eq!(dispositions.len(), 2);
        assert_eq!(dispositions[1], WorkerDisposition::Disabled);
    }

    #[tokio::test]
    async fn invalid_documents_map_to_corrupt_input_without_retry() {
        let pdf = StubPdfEngine::new(vec![Err(EngineError::invalid_document("bad xref"))]);
        let service = service(pdf, idle_ocr(), WorkerResolver::disabled());

        let error = service
            .extract(&file("report.pdf", "application/pdf"))
            .await
            .expect_err("corrupt input");
        assert!(matches!(error, ExtractionError::CorruptInput(_)));
    }

    #[tokio::test]
    async fn ocr_failures_surface_without_retry() {
        let ocr = StubOcrEngine {
            result: Err(EngineError::other("engine crashed")),
            calls: Mutex::new(0),
        };
        let service = service(StubPdfEngine::new(vec![]), ocr, WorkerResolver::disabled());

        let error = service
            .extract(&file("scan.jpg", "image/jpeg"))
            .await
            .expect_err("ocr failure");
        assert!(matches!(error, ExtractionError::Engine(_)));
    }
}
