//! MuPDF-backed glyph source.
//!
//! Characters come from MuPDF's structured text page. MuPDF reports
//! coordinates with a top-left origin and y growing downwards; everything
//! leaving this module is flipped to page units with a bottom-left origin.
//! Page rotation is read from the page tree with LoPDF, following
//! `/Rotate` inheritance through `/Parent`.

use std::path::{Path, PathBuf};

use log::debug;
use mupdf::pdf::PdfDocument;
use mupdf::{Quad, Rect as MuRect, TextPageOptions};

use super::GlyphSource;
use crate::domain::{Glyph, PageContent, Word};
use crate::error::{RedactorError, RedactorResult};
use crate::geometry::Rect;

/// Converts between MuPDF page space and bottom-left page units.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PageFrame {
    bounds: MuRect,
}

impl PageFrame {
    pub(crate) fn new(bounds: MuRect) -> Self {
        Self { bounds }
    }

    pub(crate) fn width(&self) -> f32 {
        self.bounds.x1 - self.bounds.x0
    }

    pub(crate) fn height(&self) -> f32 {
        self.bounds.y1 - self.bounds.y0
    }

    pub(crate) fn page_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width(), self.height())
    }

    pub(crate) fn quad_to_rect(&self, quad: &Quad) -> Rect {
        let xs = [quad.ul.x, quad.ur.x, quad.ll.x, quad.lr.x];
        let ys = [quad.ul.y, quad.ur.y, quad.ll.y, quad.lr.y];
        let min_x = xs.iter().copied().fold(f32::INFINITY, f32::min);
        let max_x = xs.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        let min_y = ys.iter().copied().fold(f32::INFINITY, f32::min);
        let max_y = ys.iter().copied().fold(f32::NEG_INFINITY, f32::max);

        Rect::new(
            min_x - self.bounds.x0,
            self.bounds.y1 - max_y,
            max_x - self.bounds.x0,
            self.bounds.y1 - min_y,
        )
    }

    pub(crate) fn to_mupdf(&self, rect: &Rect) -> MuRect {
        MuRect {
            x0: self.bounds.x0 + rect.left,
            y0: self.bounds.y1 - rect.top,
            x1: self.bounds.x0 + rect.right,
            y1: self.bounds.y1 - rect.bottom,
        }
    }
}

/// Glyph source reading a PDF through MuPDF.
pub struct MuPdfGlyphSource {
    path: PathBuf,
    document: PdfDocument,
    page_count: usize,
    rotations: Vec<i32>,
}

impl std::fmt::Debug for MuPdfGlyphSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MuPdfGlyphSource")
            .field("path", &self.path)
            .field("page_count", &self.page_count)
            .field("rotations", &self.rotations)
            .finish()
    }
}

impl MuPdfGlyphSource {
    /// Opens a PDF. A missing file is reported before any page is read.
    pub fn open(path: &Path) -> RedactorResult<Self> {
        if !path.exists() {
            return Err(RedactorError::DocumentNotFound {
                path: path.to_path_buf(),
            });
        }

        let path_str = path.to_str().ok_or_else(|| RedactorError::InvalidInput {
            parameter: "input".to_string(),
            reason: "Path contains invalid UTF-8".to_string(),
        })?;

        let document = PdfDocument::open(path_str).map_err(|e| RedactorError::PdfProcessing {
            message: "Failed to open PDF with MuPDF".to_string(),
            page: None,
            source: Some(Box::new(e)),
        })?;

        let page_count = document
            .page_count()
            .map_err(|e| RedactorError::mupdf("Failed to get page count", e))?
            .max(0) as usize;

        let rotations = read_page_rotations(path)?;
        check_page_counts(path, rotations.len(), page_count)?;

        debug!("opened {} ({} pages)", path.display(), page_count);

        Ok(Self {
            path: path.to_path_buf(),
            document,
            page_count,
            rotations,
        })
    }

    fn rotation(&self, index: usize) -> RedactorResult<i32> {
        self.rotations
            .get(index)
            .copied()
            .ok_or_else(|| RedactorError::PdfProcessing {
                message: "No page tree entry for page".to_string(),
                page: Some(index + 1),
                source: None,
            })
    }
}

impl GlyphSource for MuPdfGlyphSource {
    fn source_path(&self) -> &Path {
        &self.path
    }

    fn page_count(&self) -> usize {
        self.page_count
    }

    fn page(&self, index: usize) -> RedactorResult<PageContent> {
        let number = index + 1;
        let page = self
            .document
            .load_page(index as i32)
            .map_err(|e| RedactorError::PdfProcessing {
                message: format!("Failed to load page {}", number),
                page: Some(number),
                source: Some(Box::new(e)),
            })?;

        let bounds = page
            .bounds()
            .map_err(|e| RedactorError::mupdf(format!("Failed to get bounds for page {}", number), e))?;
        let frame = PageFrame::new(bounds);

        let text_page = page
            .to_text_page(TextPageOptions::empty())
            .map_err(|e| RedactorError::PdfProcessing {
                message: "Failed to extract structured text".to_string(),
                page: Some(number),
                source: Some(Box::new(e)),
            })?;

        let mut glyphs = Vec::new();
        let mut words = Vec::new();

        for block in text_page.blocks() {
            for line in block.lines() {
                let mut word: Option<Word> = None;
                for text_char in line.chars() {
                    let Some(ch) = text_char.char() else {
                        continue;
                    };
                    let bbox = frame.quad_to_rect(&text_char.quad());
                    glyphs.push(Glyph::new(ch, bbox));

                    if ch.is_whitespace() {
                        words.extend(word.take());
                        continue;
                    }
                    if let Some(current) = word.as_mut() {
                        current.text.push(ch);
                        current.bbox = current.bbox.union(&bbox);
                    } else {
                        word = Some(Word::new(ch.to_string(), bbox));
                    }
                }
                words.extend(word);
            }
        }

        debug!(
            "page {}: {} glyphs, {} words",
            number,
            glyphs.len(),
            words.len()
        );

        Ok(PageContent {
            number,
            rotation: self.rotation(index)?,
            width: frame.width(),
            height: frame.height(),
            glyphs,
            words: Some(words),
        })
    }
}

/// Rotation is taken from the page tree, so both readers must see the same
/// pages; a mismatch would leave some pages with an unknown rotation.
fn check_page_counts(path: &Path, page_tree: usize, mupdf: usize) -> RedactorResult<()> {
    if page_tree == mupdf {
        return Ok(());
    }
    Err(RedactorError::PdfProcessing {
        message: format!(
            "{}: page tree lists {} page(s) but MuPDF reports {}",
            path.display(),
            page_tree,
            mupdf
        ),
        page: None,
        source: None,
    })
}

/// Reads each page's effective `/Rotate`, normalized to `0..360`.
pub fn read_page_rotations(path: &Path) -> RedactorResult<Vec<i32>> {
    let document = lopdf::Document::load(path)?;
    document
        .get_pages()
        .values()
        .map(|&id| inherited_rotation(&document, id))
        .collect()
}

fn inherited_rotation(document: &lopdf::Document, page_id: lopdf::ObjectId) -> RedactorResult<i32> {
    let mut node = Some(page_id);
    // page trees are shallow; the bound guards against /Parent cycles
    for _ in 0..64 {
        let Some(id) = node else {
            break;
        };
        let dict = document.get_dictionary(id)?;
        if let Ok(rotate) = dict.get(b"Rotate").and_then(|o| o.as_i64()) {
            return Ok(normalize_rotation(rotate));
        }
        node = dict.get(b"Parent").and_then(|o| o.as_reference()).ok();
    }
    Ok(0)
}

pub(crate) fn normalize_rotation(degrees: i64) -> i32 {
    degrees.rem_euclid(360) as i32
}
