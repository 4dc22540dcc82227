//! Test fixtures: synthetic glyph layouts and PDF builders.
//!
//! Synthetic glyphs are 5 units wide and 10 units tall. Prose advances 6
//! units per character; boxed form digits advance [`BOX_STEP`] units, far
//! beyond the word gap but within the digit-run gap.

use anyhow::Result;
use glyph_redactor::geometry::Rect;
use glyph_redactor::{Glyph, MemoryGlyphSource, PageContent};
use printpdf::*;
use std::fs;
use std::io::BufWriter;
use std::path::Path;

pub const GLYPH_WIDTH: f32 = 5.0;
pub const GLYPH_HEIGHT: f32 = 10.0;
pub const PROSE_ADVANCE: f32 = 6.0;
pub const BOX_STEP: f32 = 15.0;

/// Glyphs for running text starting at `x`, spaces included.
pub fn prose(text: &str, x: f32, baseline: f32) -> Vec<Glyph> {
    laid_out(text, x, baseline, PROSE_ADVANCE)
}

/// One glyph per box, `BOX_STEP` apart.
pub fn boxed(text: &str, x: f32, baseline: f32) -> Vec<Glyph> {
    laid_out(text, x, baseline, BOX_STEP)
}

fn laid_out(text: &str, x: f32, baseline: f32, advance: f32) -> Vec<Glyph> {
    text.chars()
        .enumerate()
        .map(|(i, ch)| {
            let left = x + i as f32 * advance;
            Glyph::new(
                ch,
                Rect::new(left, baseline, left + GLYPH_WIDTH, baseline + GLYPH_HEIGHT),
            )
        })
        .collect()
}

/// Letter-sized page holding the given glyph groups.
pub fn page(number: usize, groups: Vec<Vec<Glyph>>) -> PageContent {
    PageContent::new(number, 612.0, 792.0).with_glyphs(groups.into_iter().flatten().collect())
}

pub fn source(pages: Vec<PageContent>) -> MemoryGlyphSource {
    MemoryGlyphSource::new("synthetic.pdf", pages)
}

/// Builder for creating test PDFs with prose lines and boxed digit fields.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// # use anyhow::Result;
/// # fn main() -> Result<()> {
/// TestPdfBuilder::new()
///     .with_line("Name: ALICE")
///     .with_boxed_digits("1234")
///     .build(Path::new("/tmp/test.pdf"))?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct TestPdfBuilder {
    lines: Vec<String>,
    boxed_fields: Vec<String>,
    font_size: f32,
    page_width: Mm,
    page_height: Mm,
}

impl TestPdfBuilder {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            boxed_fields: Vec::new(),
            font_size: 12.0,
            page_width: Mm(210.0),  // A4 width
            page_height: Mm(297.0), // A4 height
        }
    }

    /// Adds a line of running text.
    pub fn with_line(mut self, text: &str) -> Self {
        self.lines.push(text.to_string());
        self
    }

    /// Adds a field whose characters are drawn one per 10mm box.
    pub fn with_boxed_digits(mut self, digits: &str) -> Self {
        self.boxed_fields.push(digits.to_string());
        self
    }

    pub fn build(self, path: &Path) -> Result<()> {
        let (doc, page, layer) =
            PdfDocument::new("Test Document", self.page_width, self.page_height, "Layer 1");
        let layer = doc.get_page(page).get_layer(layer);
        let font = doc.add_builtin_font(BuiltinFont::Helvetica)?;

        let mut y = 260.0;
        for line in &self.lines {
            layer.use_text(line.as_str(), self.font_size, Mm(20.0), Mm(y), &font);
            y -= 15.0;
        }

        for field in &self.boxed_fields {
            for (i, ch) in field.chars().enumerate() {
                let x = 20.0 + i as f32 * 10.0;
                layer.use_text(ch.to_string(), self.font_size, Mm(x), Mm(y), &font);
            }
            y -= 15.0;
        }

        doc.save(&mut BufWriter::new(fs::File::create(path)?))?;
        Ok(())
    }
}

impl Default for TestPdfBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Sets `/Rotate` on every page of an existing PDF.
pub fn rotate_pages(path: &Path, degrees: i64) -> Result<()> {
    let mut doc = ::lopdf::Document::load(path)?;
    let page_ids: Vec<_> = doc.get_pages().into_values().collect();
    for id in page_ids {
        doc.get_object_mut(id)?
            .as_dict_mut()?
            .set("Rotate", degrees);
    }
    doc.save(path)?;
    Ok(())
}
