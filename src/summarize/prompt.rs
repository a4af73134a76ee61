//! Prompt construction and text shaping for the summarization request.

use crate::classify::DocumentCategory;

/// Maximum number of extracted-text characters embedded in a prompt.
pub const MAX_DOCUMENT_CHARS: usize = 8000;

/// Marker appended when the embedded text was truncated.
pub const TRUNCATION_MARKER: &str = "...";

/// Number of characters kept in the extracted-text preview.
pub const PREVIEW_CHARS: usize = 500;

/// Bound text to the prompt character budget, appending the truncation marker
/// when the budget is exceeded. Text within budget is embedded unmodified.
pub fn truncate_for_prompt(text: &str) -> String {
    if text.chars().count() <= MAX_DOCUMENT_CHARS {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(MAX_DOCUMENT_CHARS).collect();
    truncated.push_str(TRUNCATION_MARKER);
    truncated
}

/// Build the five-section summarization prompt around the (already truncated)
/// document text.
pub fn build_summary_prompt(document_text: &str, category: DocumentCategory) -> String {
    format!(
        "You are a medical assistant. Analyze the following {category} and provide:\n\
         1. Document type identification\n\
         2. Key information (patient details, dates, values)\n\
         3. Main findings\n\
         4. Recommendations\n\
         5. Important notes\n\n\
         Document content:\n{document_text}"
    )
}

/// First 500 characters of the extracted text, with an ellipsis suffix.
pub fn extracted_text_preview(text: &str) -> String {
    let mut preview: String = text.chars().take(PREVIEW_CHARS).collect();
    preview.push_str(TRUNCATION_MARKER);
    preview
}
