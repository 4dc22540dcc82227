//! Maps a match back onto the tokens it covers and boxes them per row.

use crate::domain::{PageContent, Region, Token};
use crate::geometry::Rect;
use crate::layout::{group_lines, SearchText};
use crate::matching::RuleMatch;

/// Builds one region per visual row touched by the match.
///
/// A match that wraps across a row boundary yields one region per row
/// rather than one box spanning the rows and everything between them.
pub fn build_regions(
    found: &RuleMatch,
    search: &SearchText,
    tokens: &[Token],
    page: &PageContent,
    rule_pattern: &str,
    line_tolerance: f32,
) -> Vec<Region> {
    let covered: Vec<&Token> = search
        .spans_overlapping(found.start, found.end)
        .filter_map(|span| tokens.get(span.token_index))
        .collect();

    group_lines(covered, line_tolerance)
        .iter()
        .filter_map(|row| Rect::union_all(row.iter().map(|t| &t.bbox)))
        .map(|bbox| {
            Region::new(
                page.number,
                bbox,
                found.text.clone(),
                rule_pattern,
                page.rotation,
            )
        })
        .collect()
}
