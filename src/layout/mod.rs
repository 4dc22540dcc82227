//! Text reconstruction from glyph geometry.
//!
//! - [`lines`]: row grouping and page statistics
//! - [`runs`]: word runs and digit-run merging
//! - [`tokenizer`]: word mode and fragment-aware mode per page
//! - [`search_text`]: the delimiter-joined string the matcher searches

pub mod lines;
pub mod runs;
pub mod search_text;
pub mod tokenizer;

pub use lines::{group_lines, median, PageMetrics, Positioned};
pub use runs::{build_word_runs, is_single_digit_eligible, merge_digit_runs, TextItem};
pub use search_text::{SearchText, TokenSpan, TOKEN_DELIMITER};
pub use tokenizer::{tokenize_page, PageTokenizer, TokenizerMode};
