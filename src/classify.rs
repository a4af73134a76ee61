//! Document category classification.
//!
//! A pure keyword heuristic over the filename, with a caller-supplied hint as
//! fallback. Filename keywords always win; the hint is consulted only when no
//! keyword group matches.

use std::fmt;

/// Fixed medical document categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentCategory {
    /// Laboratory results and test panels.
    LabReport,
    /// Prescriptions and medication lists.
    Prescription,
    /// Imaging output (X-ray, MRI, CT, other scans).
    MedicalScan,
    /// Narrative reports and discharge summaries.
    MedicalReport,
    /// Anything that matches none of the above.
    MedicalDocument,
}

impl DocumentCategory {
    /// Human-readable label embedded in prompts and API responses.
    pub fn label(self) -> &'static str {
        match self {
            Self::LabReport => "lab report",
            Self::Prescription => "prescription",
            Self::MedicalScan => "medical scan",
            Self::MedicalReport => "medical report",
            Self::MedicalDocument => "medical document",
        }
    }
}

impl fmt::Display for DocumentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// Keyword groups tested in priority order against the lowercased filename.
const KEYWORD_GROUPS: [(&[&str], DocumentCategory); 4] = [
    (&["lab", "test", "result"], DocumentCategory::LabReport),
    (
        &["prescription", "rx", "medication"],
        DocumentCategory::Prescription,
    ),
    (&["scan", "xray", "mri", "ct"], DocumentCategory::MedicalScan),
    (&["report", "summary"], DocumentCategory::MedicalReport),
];

/// Classify a document by filename keywords, falling back to the hint table.
///
/// Total and deterministic: every `(file_name, hint)` pair maps to exactly one
/// category, defaulting to [`DocumentCategory::MedicalDocument`].
pub fn classify(file_name: &str, hint: Option<&str>) -> DocumentCategory {
    let name = file_name.to_lowercase();
    for (keywords, category) in KEYWORD_GROUPS {
        if keywords.iter().any(|keyword| name.contains(keyword)) {
            return category;
        }
    }

    match hint.map(str::to_lowercase).as_deref() {
        Some("lab") => DocumentCategory::LabReport,
        Some("prescription") => DocumentCategory::Prescription,
        Some("imaging") => DocumentCategory::MedicalScan,
        _ => DocumentCategory::MedicalDocument,
    }
}
