//! Strategy selection for the extraction pipeline.
//!
//! The declared media type wins; the filename extension is only consulted when
//! the media type matches neither strategy.

use crate::extraction::types::SourceFile;

/// Extraction strategy selected for an input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// Paginated structured-document format handled by the PDF parser.
    Document,
    /// Raster image handled by the OCR engine.
    Image,
}

const IMAGE_EXTENSIONS: [&str; 8] = ["png", "jpg", "jpeg", "gif", "bmp", "tif", "tiff", "webp"];

/// Pick the extraction strategy for a file, or `None` when neither applies.
pub fn detect_kind(file: &SourceFile) -> Option<FileKind> {
    let media_type = file.media_type.to_ascii_lowercase();
    if media_type.contains("pdf") {
        return Some(FileKind::Document);
    }
    if media_type.starts_with("image/") {
        return Some(FileKind::Image);
    }

    match extension(&file.name)?.as_str() {
        "pdf" => Some(FileKind::Document),
        ext if IMAGE_EXTENSIONS.contains(&ext) => Some(FileKind::Image),
        _ => None,
    }
}

fn extension(name: &str) -> Option<String> {
    let (_, ext) = name.rsplit_once('.')?;
    if ext.is_empty() {
        None
    } else {
        Some(ext.to_ascii_lowercase())
    }
}
