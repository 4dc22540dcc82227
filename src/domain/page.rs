//! Page content as exposed by a glyph source, and the tokens rebuilt from it.

use crate::geometry::Rect;

/// A single positioned character.
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    pub ch: char,
    pub bbox: Rect,
}

impl Glyph {
    pub fn new(ch: char, bbox: Rect) -> Self {
        Self { ch, bbox }
    }
}

/// A word as grouped by the glyph source itself.
#[derive(Debug, Clone, PartialEq)]
pub struct Word {
    pub text: String,
    pub bbox: Rect,
}

impl Word {
    pub fn new(text: impl Into<String>, bbox: Rect) -> Self {
        Self {
            text: text.into(),
            bbox,
        }
    }
}

/// A reconstructed text unit: concatenated text plus the union box of its parts.
///
/// Word tokens and digit-run tokens share this shape; which one a token is
/// depends only on how it was built.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub text: String,
    pub bbox: Rect,
}

impl Token {
    pub fn new(text: impl Into<String>, bbox: Rect) -> Self {
        Self {
            text: text.into(),
            bbox,
        }
    }

    /// Appends another token's text and grows the box to cover it.
    pub fn absorb(&mut self, other: &Token) {
        self.text.push_str(&other.text);
        self.bbox = self.bbox.union(&other.bbox);
    }
}

/// Everything the locator needs to know about one page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageContent {
    /// 1-based page number.
    pub number: usize,
    /// Rotation in degrees: 0, 90, 180 or 270.
    pub rotation: i32,
    pub width: f32,
    pub height: f32,
    pub glyphs: Vec<Glyph>,
    /// Source-provided word grouping, if any.
    pub words: Option<Vec<Word>>,
}

impl PageContent {
    pub fn new(number: usize, width: f32, height: f32) -> Self {
        Self {
            number,
            rotation: 0,
            width,
            height,
            glyphs: Vec::new(),
            words: None,
        }
    }

    pub fn with_rotation(mut self, rotation: i32) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_glyphs(mut self, glyphs: Vec<Glyph>) -> Self {
        self.glyphs = glyphs;
        self
    }

    pub fn with_words(mut self, words: Vec<Word>) -> Self {
        self.words = Some(words);
        self
    }

    /// The page rectangle in page units.
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty() && self.words.as_ref().map_or(true, |w| w.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absorb_concatenates_and_unions() {
        let mut a = Token::new("1", Rect::new(0.0, 0.0, 5.0, 10.0));
        a.absorb(&Token::new("2", Rect::new(20.0, 1.0, 25.0, 11.0)));
        assert_eq!(a.text, "12");
        assert_eq!(a.bbox, Rect::new(0.0, 0.0, 25.0, 11.0));
    }

    #[test]
    fn empty_page_detection() {
        let page = PageContent::new(1, 612.0, 792.0);
        assert!(page.is_empty());
        let page = page.with_words(vec![Word::new("x", Rect::new(0.0, 0.0, 1.0, 1.0))]);
        assert!(!page.is_empty());
    }
}
