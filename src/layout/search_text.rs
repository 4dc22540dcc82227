//! Synthesized per-page search strings with a span for every token.

use crate::domain::Token;

/// Delimiter written after every token.
pub const TOKEN_DELIMITER: char = ' ';

/// Half-open byte range `[start, end)` of one token inside a [`SearchText`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenSpan {
    pub start: usize,
    pub end: usize,
    /// Index into the token list the search text was built from.
    pub token_index: usize,
}

impl TokenSpan {
    /// True when the span shares at least one byte with `[start, end)`.
    pub fn overlaps(&self, start: usize, end: usize) -> bool {
        self.end > start && self.start < end
    }
}

/// Tokens joined by [`TOKEN_DELIMITER`], plus each token's span.
///
/// Spans are strictly increasing and separated by exactly one delimiter.
/// Offsets are byte offsets, the unit the matcher reports in.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchText {
    pub text: String,
    pub spans: Vec<TokenSpan>,
}

impl SearchText {
    pub fn build(tokens: &[Token]) -> Self {
        let capacity = tokens.iter().map(|t| t.text.len() + 1).sum();
        let mut text = String::with_capacity(capacity);
        let mut spans = Vec::with_capacity(tokens.len());

        for (token_index, token) in tokens.iter().enumerate() {
            let start = text.len();
            text.push_str(&token.text);
            spans.push(TokenSpan {
                start,
                end: text.len(),
                token_index,
            });
            text.push(TOKEN_DELIMITER);
        }

        Self { text, spans }
    }

    /// Spans overlapping the match range `[start, end)`, in order.
    pub fn spans_overlapping(&self, start: usize, end: usize) -> impl Iterator<Item = &TokenSpan> {
        // spans are sorted, so skip everything that ends before the match
        let first = self.spans.partition_point(|s| s.end <= start);
        self.spans[first..]
            .iter()
            .take_while(move |s| s.start < end)
            .filter(move |s| s.overlaps(start, end))
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;

    fn tokens(words: &[&str]) -> Vec<Token> {
        words
            .iter()
            .map(|w| Token::new(*w, Rect::new(0.0, 0.0, 1.0, 1.0)))
            .collect()
    }

    #[test]
    fn builds_delimited_text_and_spans() {
        let search = SearchText::build(&tokens(&["SSN", "123", "45"]));
        assert_eq!(search.text, "SSN 123 45 ");
        let ranges: Vec<(usize, usize)> = search.spans.iter().map(|s| (s.start, s.end)).collect();
        assert_eq!(ranges, vec![(0, 3), (4, 7), (8, 10)]);
    }

    #[test]
    fn spans_are_separated_by_one_delimiter() {
        let search = SearchText::build(&tokens(&["a", "bc", "déf", "g"]));
        for pair in search.spans.windows(2) {
            assert_eq!(pair[1].start, pair[0].end + TOKEN_DELIMITER.len_utf8());
            assert_eq!(&search.text[pair[0].end..pair[1].start], " ");
        }
    }

    #[test]
    fn deterministic_for_identical_input() {
        let input = tokens(&["x", "y"]);
        assert_eq!(SearchText::build(&input), SearchText::build(&input));
    }

    #[test]
    fn overlap_selection_excludes_delimiter_only_hits() {
        let search = SearchText::build(&tokens(&["ab", "cd", "ef"]));
        let hit: Vec<usize> = search.spans_overlapping(1, 3).map(|s| s.token_index).collect();
        assert_eq!(hit, vec![0]);
        let hit: Vec<usize> = search.spans_overlapping(1, 4).map(|s| s.token_index).collect();
        assert_eq!(hit, vec![0, 1]);
        assert_eq!(search.spans_overlapping(2, 3).count(), 0);
    }

    #[test]
    fn empty_tokens_give_empty_text() {
        let search = SearchText::build(&[]);
        assert!(search.text.is_empty());
        assert!(search.spans.is_empty());
    }
}
