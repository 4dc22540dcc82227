//! Run building within a single row.
//!
//! Pass 1 merges horizontally adjacent items into word runs under a tight
//! gap threshold. Pass 2 walks the pass-1 tokens and joins neighbouring
//! single-character digit or hyphen tokens under a much looser threshold,
//! bridging characters that sit in separate boxes of a form field.

use super::lines::Positioned;
use crate::domain::{is_decimal_digit, Glyph, Token, Word};

/// An item that contributes text to a run.
pub trait TextItem: Positioned {
    fn append_text(&self, buf: &mut String);

    /// Whitespace items end the current run and are never part of a token.
    fn is_whitespace(&self) -> bool;
}

impl TextItem for Glyph {
    fn append_text(&self, buf: &mut String) {
        buf.push(self.ch);
    }

    fn is_whitespace(&self) -> bool {
        self.ch.is_whitespace()
    }
}

impl TextItem for Word {
    fn append_text(&self, buf: &mut String) {
        buf.push_str(&self.text);
    }

    fn is_whitespace(&self) -> bool {
        self.text.trim().is_empty()
    }
}

impl<T: TextItem> TextItem for &T {
    fn append_text(&self, buf: &mut String) {
        T::append_text(*self, buf)
    }

    fn is_whitespace(&self) -> bool {
        T::is_whitespace(*self)
    }
}

/// Pass 1: merges a left-to-right row into word tokens.
///
/// Consecutive items share a run while `next.left - prev.right <= max_gap`.
pub fn build_word_runs<T: TextItem>(line: &[T], max_gap: f32) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut current: Option<Token> = None;
    let mut prev_right = f32::NEG_INFINITY;

    for item in line {
        if item.is_whitespace() {
            tokens.extend(current.take());
            continue;
        }

        let bbox = item.bbox();
        let joins = bbox.left - prev_right <= max_gap;
        prev_right = bbox.right;

        if let Some(run) = current.as_mut().filter(|_| joins) {
            item.append_text(&mut run.text);
            run.bbox = run.bbox.union(&bbox);
            continue;
        }

        tokens.extend(current.take());
        let mut text = String::new();
        item.append_text(&mut text);
        current = Some(Token::new(text, bbox));
    }

    tokens.extend(current);
    tokens
}

/// A token is eligible for digit-run merging when its text is exactly one
/// Unicode decimal digit or hyphen.
pub fn is_single_digit_eligible(token: &Token) -> bool {
    let mut chars = token.text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => is_decimal_digit(c) || c == '-',
        _ => false,
    }
}

/// Pass 2: joins adjacent eligible tokens whose gap is within `max_gap`.
///
/// Everything else passes through unchanged, so a lone eligible token stays
/// a single-character token.
pub fn merge_digit_runs(tokens: Vec<Token>, max_gap: f32) -> Vec<Token> {
    let mut merged = Vec::with_capacity(tokens.len());
    let mut run: Option<Token> = None;

    for token in tokens {
        if !is_single_digit_eligible(&token) {
            merged.extend(run.take());
            merged.push(token);
            continue;
        }

        if let Some(current) = run
            .as_mut()
            .filter(|r| r.bbox.horizontal_gap(&token.bbox) <= max_gap)
        {
            current.absorb(&token);
            continue;
        }

        merged.extend(run.take());
        run = Some(token);
    }

    merged.extend(run);
    merged
}
