//! Line grouping by vertical tolerance, and the page-wide size statistics
//! that drive every threshold.

use crate::domain::{Glyph, PageContent, Token, Word};
use crate::geometry::Rect;

/// Anything with a bounding box on the page.
pub trait Positioned {
    fn bbox(&self) -> Rect;
}

impl Positioned for Glyph {
    fn bbox(&self) -> Rect {
        self.bbox
    }
}

impl Positioned for Word {
    fn bbox(&self) -> Rect {
        self.bbox
    }
}

impl Positioned for Token {
    fn bbox(&self) -> Rect {
        self.bbox
    }
}

impl<T: Positioned> Positioned for &T {
    fn bbox(&self) -> Rect {
        T::bbox(*self)
    }
}

/// Median glyph width and height for one page.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PageMetrics {
    pub median_width: f32,
    pub median_height: f32,
}

impl PageMetrics {
    pub fn from_items<T: Positioned>(items: &[T]) -> Self {
        Self {
            median_width: median(items.iter().map(|i| i.bbox().width())),
            median_height: median(items.iter().map(|i| i.bbox().height())),
        }
    }

    /// Computed once from the page's visible glyphs, falling back to the
    /// source's words when the page carries no glyph-level data.
    /// Whitespace glyphs are left out of both medians.
    pub fn for_page(page: &PageContent) -> Self {
        let visible: Vec<&Glyph> = page
            .glyphs
            .iter()
            .filter(|g| !g.ch.is_whitespace())
            .collect();
        if !visible.is_empty() {
            return Self::from_items(&visible);
        }
        match &page.words {
            Some(words) => Self::from_items(words),
            None => Self::default(),
        }
    }
}

/// Median of the values; zero for an empty input.
pub fn median<I>(values: I) -> f32
where
    I: IntoIterator<Item = f32>,
{
    let mut values: Vec<f32> = values.into_iter().collect();
    if values.is_empty() {
        return 0.0;
    }
    values.sort_by(|a, b| a.total_cmp(b));
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    }
}

/// Groups items into rows, top of the page first, each row left to right.
///
/// An item joins the current row while its bottom lies within `tolerance`
/// of the row's first item.
pub fn group_lines<T: Positioned>(mut items: Vec<T>, tolerance: f32) -> Vec<Vec<T>> {
    // bottom-left origin: larger y is higher on the page
    items.sort_by(|a, b| b.bbox().bottom.total_cmp(&a.bbox().bottom));

    let mut lines: Vec<Vec<T>> = Vec::new();
    let mut reference = f32::NAN;

    for item in items {
        let y = item.bbox().bottom;
        match lines.last_mut() {
            Some(line) if (y - reference).abs() <= tolerance => line.push(item),
            _ => {
                reference = y;
                lines.push(vec![item]);
            }
        }
    }

    for line in &mut lines {
        line.sort_by(|a, b| a.bbox().left.total_cmp(&b.bbox().left));
    }
    lines
}
