//! Fragment-aware text location and secure PDF redaction.
//!
//! This library finds sensitive text in page-based documents by rebuilding
//! words (and digit runs split across boxed form fields) from positioned
//! glyphs, matching literal or regex rules against the rebuilt text, and
//! mapping each match back to page rectangles. The resulting
//! [`RedactionPlan`] can be saved as JSON or applied with MuPDF, which
//! physically removes the covered text.
//!
//! # Architecture
//!
//! - [`source`]: glyph sources (MuPDF-backed and in-memory)
//! - [`layout`]: line grouping, run building, tokenization, search text
//! - [`matching`]: rule compilation and matching
//! - [`locate`]: region building, deduplication and the locator engine
//! - [`redaction`]: mask application strategies and the service layer
//! - [`persistence`]: plan and rule files
//! - [`error`]: error handling
//!
//! # Quick Start
//!
//! ```no_run
//! use glyph_redactor::{RedactionService, Rule};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let service = RedactionService::with_secure_strategy();
//!
//! let (plan, result) = service.redact(
//!     Path::new("form.pdf"),
//!     Path::new("redacted.pdf"),
//!     &[Rule::literal("123-45-6789"), Rule::regex(r"\d{3}-\d{2}-\d{4}")],
//! )?;
//! assert_eq!(plan.total_redactions(), result.instances_redacted);
//! # Ok(())
//! # }
//! ```
//!
//! # Locating in memory
//!
//! ```
//! use glyph_redactor::geometry::Rect;
//! use glyph_redactor::source::MemoryGlyphSource;
//! use glyph_redactor::{Glyph, LocatorEngine, PageContent, Rule};
//!
//! // four digits in separate boxes, 15 units apart
//! let glyphs = "1234"
//!     .chars()
//!     .enumerate()
//!     .map(|(i, ch)| {
//!         let x = 100.0 + i as f32 * 15.0;
//!         Glyph::new(ch, Rect::new(x, 500.0, x + 5.0, 510.0))
//!     })
//!     .collect();
//! let page = PageContent::new(1, 612.0, 792.0).with_glyphs(glyphs);
//! let source = MemoryGlyphSource::new("form.pdf", vec![page]);
//!
//! let plan = LocatorEngine::default()
//!     .locate(&source, &[Rule::literal("1234")])
//!     .unwrap();
//! assert_eq!(plan.total_redactions(), 1);
//! ```

pub mod config;
pub mod domain;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod locate;
pub mod matching;
pub mod persistence;
pub mod redaction;
pub mod source;

pub use config::{GapPolicy, LocatorConfig};
pub use domain::{Glyph, PageContent, RedactionPlan, Region, RegexOptions, Rule, Token, Word};
pub use error::{RedactorError, RedactorResult};
pub use locate::LocatorEngine;
pub use matching::{CompiledRule, RuleMatch};
pub use persistence::{load_plan, load_rules, save_plan};
pub use redaction::{
    RedactionResult, RedactionService, RedactionStrategy, SecureRedactionStrategy,
};
pub use source::{GlyphSource, MemoryGlyphSource, MuPdfGlyphSource};
