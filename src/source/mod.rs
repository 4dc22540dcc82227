//! Glyph sources: where page content comes from.
//!
//! The locator only reads [`PageContent`]; a source is responsible for
//! materializing it per page, in page units with a bottom-left origin.

pub mod pdf;

pub use pdf::{read_page_rotations, MuPdfGlyphSource};

use std::path::{Path, PathBuf};

use crate::domain::PageContent;
use crate::error::{RedactorError, RedactorResult};

/// Yields positioned glyphs page by page.
pub trait GlyphSource {
    /// Identity of the underlying document, recorded in the plan.
    fn source_path(&self) -> &Path;

    fn page_count(&self) -> usize;

    /// Loads the page at the 0-based `index`.
    fn page(&self, index: usize) -> RedactorResult<PageContent>;
}

/// Pages already held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryGlyphSource {
    path: PathBuf,
    pages: Vec<PageContent>,
}

impl MemoryGlyphSource {
    pub fn new(path: impl Into<PathBuf>, pages: Vec<PageContent>) -> Self {
        Self {
            path: path.into(),
            pages,
        }
    }

    pub fn pages(&self) -> &[PageContent] {
        &self.pages
    }
}

impl GlyphSource for MemoryGlyphSource {
    fn source_path(&self) -> &Path {
        &self.path
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page(&self, index: usize) -> RedactorResult<PageContent> {
        self.pages
            .get(index)
            .cloned()
            .ok_or_else(|| RedactorError::InvalidInput {
                parameter: "page".to_string(),
                reason: format!(
                    "page index {} out of range ({} pages)",
                    index,
                    self.pages.len()
                ),
            })
    }
}
