//! PDF inspection helpers.

use anyhow::Result;
use glyph_redactor::{RedactionService, Rule};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

// MuPDF font loading is not safe to run from several test threads at once
static MUPDF_LOCK: Mutex<()> = Mutex::new(());

/// Serializes MuPDF access across tests in one binary.
pub fn mupdf_guard() -> MutexGuard<'static, ()> {
    MUPDF_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Word-mode text of every page, joined by newlines.
pub fn extract_text(pdf_path: &Path) -> Result<String> {
    let pages = RedactionService::with_secure_strategy()
        .search_text(pdf_path)
        .map_err(|e| anyhow::anyhow!("Failed to extract text: {}", e))?;
    Ok(pages.join("\n"))
}

/// Number of regions the given rules still find in a PDF.
pub fn count_regions(pdf_path: &Path, rules: &[Rule]) -> Result<usize> {
    let plan = RedactionService::with_secure_strategy().locate(pdf_path, rules)?;
    Ok(plan.total_redactions())
}

/// Validates that a PDF is loadable and has basic structure.
pub fn is_valid_pdf(pdf_path: &Path) -> bool {
    ::lopdf::Document::load(pdf_path).is_ok()
}
