//! Page tokenization in word mode and fragment-aware mode.
//!
//! When the source supplies pre-grouped words, word mode takes each word
//! as one token and skips the pass-1 gap merge, so neighbouring words are
//! never glued together. Pass 1 runs only over raw glyphs. Fragment-aware
//! mode always starts from glyphs when the page has them.

use log::debug;

use super::lines::{group_lines, PageMetrics};
use super::runs::{build_word_runs, merge_digit_runs, TextItem};
use crate::config::LocatorConfig;
use crate::domain::{PageContent, Token, Word};

/// Which token stream to build for a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenizerMode {
    /// Tight word runs only.
    Word,
    /// Word runs followed by digit-run merging over individual glyphs.
    FragmentAware,
}

/// Builds token streams for one page.
///
/// Page metrics are computed once in [`PageTokenizer::new`] and shared by
/// both modes, so thresholds do not drift between lines or passes.
#[derive(Debug)]
pub struct PageTokenizer<'a> {
    page: &'a PageContent,
    config: &'a LocatorConfig,
    metrics: PageMetrics,
}

impl<'a> PageTokenizer<'a> {
    pub fn new(page: &'a PageContent, config: &'a LocatorConfig) -> Self {
        Self {
            page,
            config,
            metrics: PageMetrics::for_page(page),
        }
    }

    pub fn metrics(&self) -> PageMetrics {
        self.metrics
    }

    /// Vertical tolerance for grouping this page's items into rows.
    pub fn line_tolerance(&self) -> f32 {
        self.config.line_tolerance(self.metrics.median_height)
    }

    pub fn tokenize(&self, mode: TokenizerMode) -> Vec<Token> {
        let tokens = match mode {
            TokenizerMode::Word => self.word_tokens(),
            TokenizerMode::FragmentAware => self.fragment_tokens(),
        };
        debug!(
            "page {}: {} {:?} tokens",
            self.page.number,
            tokens.len(),
            mode
        );
        tokens
    }

    fn word_tokens(&self) -> Vec<Token> {
        match self.source_words() {
            Some(words) => self
                .rows(words)
                .into_iter()
                .flat_map(|row| row.into_iter().map(word_token))
                .collect(),
            None => self.glyph_runs(false),
        }
    }

    fn fragment_tokens(&self) -> Vec<Token> {
        if !self.page.glyphs.is_empty() {
            return self.glyph_runs(true);
        }
        // word-only sources: single-character words can still be bridged
        let max_gap = self.digit_run_gap();
        match self.source_words() {
            Some(words) => self
                .rows(words)
                .into_iter()
                .flat_map(|row| {
                    let tokens = row.into_iter().map(word_token).collect();
                    merge_digit_runs(tokens, max_gap)
                })
                .collect(),
            None => Vec::new(),
        }
    }

    fn glyph_runs(&self, merge_digits: bool) -> Vec<Token> {
        let word_gap = self.word_gap();
        let digit_gap = self.digit_run_gap();

        self.rows(self.page.glyphs.iter().collect())
            .into_iter()
            .flat_map(|row| {
                let tokens = build_word_runs(&row, word_gap);
                if merge_digits {
                    merge_digit_runs(tokens, digit_gap)
                } else {
                    tokens
                }
            })
            .collect()
    }

    fn source_words(&self) -> Option<Vec<&'a Word>> {
        let words = self.page.words.as_ref()?;
        if words.is_empty() {
            return None;
        }
        Some(words.iter().filter(|w| !w.is_whitespace()).collect())
    }

    fn rows<T: TextItem>(&self, items: Vec<T>) -> Vec<Vec<T>> {
        group_lines(items, self.line_tolerance())
    }

    fn word_gap(&self) -> f32 {
        self.config
            .word_gap
            .threshold(self.metrics.median_width, self.metrics.median_height)
    }

    fn digit_run_gap(&self) -> f32 {
        self.config
            .digit_run_gap
            .threshold(self.metrics.median_width, self.metrics.median_height)
    }
}

fn word_token(word: &Word) -> Token {
    Token::new(word.text.clone(), word.bbox)
}

/// Convenience wrapper for one-off tokenization.
pub fn tokenize_page(page: &PageContent, mode: TokenizerMode, config: &LocatorConfig) -> Vec<Token> {
    PageTokenizer::new(page, config).tokenize(mode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Glyph;
    use crate::geometry::Rect;

    fn boxed_digits_page() -> PageContent {
        let mut glyphs = Vec::new();
        for (i, ch) in "1234".chars().enumerate() {
            let left = 100.0 + i as f32 * 15.0;
            glyphs.push(Glyph::new(ch, Rect::new(left, 500.0, left + 5.0, 510.0)));
        }
        PageContent::new(1, 612.0, 792.0).with_glyphs(glyphs)
    }

    fn texts(tokens: &[Token]) -> Vec<String> {
        tokens.iter().map(|t| t.text.clone()).collect()
    }

    #[test]
    fn word_mode_keeps_boxed_digits_separate() {
        let page = boxed_digits_page();
        let config = LocatorConfig::default();
        let tokens = tokenize_page(&page, TokenizerMode::Word, &config);
        assert_eq!(texts(&tokens), vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn fragment_mode_bridges_boxed_digits() {
        let page = boxed_digits_page();
        let config = LocatorConfig::default();
        let tokens = tokenize_page(&page, TokenizerMode::FragmentAware, &config);
        assert_eq!(texts(&tokens), vec!["1234"]);
    }

    #[test]
    fn word_mode_prefers_source_words() {
        let page = boxed_digits_page().with_words(vec![
            Word::new("world", Rect::new(60.0, 700.0, 85.0, 710.0)),
            Word::new("hello", Rect::new(0.0, 700.0, 25.0, 710.0)),
        ]);
        let config = LocatorConfig::default();
        let tokens = tokenize_page(&page, TokenizerMode::Word, &config);
        assert_eq!(texts(&tokens), vec!["hello", "world"]);
    }

    #[test]
    fn touching_source_words_are_not_glued() {
        let page = PageContent::new(1, 612.0, 792.0).with_words(vec![
            Word::new("ACCT", Rect::new(10.0, 100.0, 30.0, 110.0)),
            Word::new("1234", Rect::new(31.0, 100.0, 51.0, 110.0)),
        ]);
        let config = LocatorConfig::default();
        let tokens = tokenize_page(&page, TokenizerMode::Word, &config);
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["ACCT", "1234"]);
    }

    #[test]
    fn empty_page_has_no_tokens() {
        let page = PageContent::new(1, 612.0, 792.0);
        let config = LocatorConfig::default();
        assert!(tokenize_page(&page, TokenizerMode::Word, &config).is_empty());
        assert!(tokenize_page(&page, TokenizerMode::FragmentAware, &config).is_empty());
    }
}
