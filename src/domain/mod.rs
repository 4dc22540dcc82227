//! Data model for text location: page content, rules, regions and plans.
//!
//! Glyphs and words are read-only inputs; tokens are rebuilt per page and
//! per pass; regions and the plan are the output handed to mask application
//! and persistence.

pub mod page;
pub mod region;
pub mod rule;

pub use page::{Glyph, PageContent, Token, Word};
pub use region::{RedactionPlan, Region};
pub use rule::{is_decimal_digit, looks_like_numeric_literal, looks_like_numeric_regex, RegexOptions, Rule};
