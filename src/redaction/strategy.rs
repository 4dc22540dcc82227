//! Redaction strategy trait and supporting types.
//!
//! A strategy consumes a [`RedactionPlan`] and produces a masked document,
//! allowing for different implementations (secure removal, overlays, ...).

use crate::domain::RedactionPlan;
use crate::error::{RedactorError, RedactorResult};
use std::path::Path;

/// Statistics about a mask application.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RedactionResult {
    /// Number of regions masked
    pub instances_redacted: usize,

    /// Pages processed
    pub pages_processed: usize,

    /// Pages with redactions
    pub pages_modified: usize,

    /// Whether text was physically removed (vs visually obscured)
    pub secure: bool,
}

impl RedactionResult {
    /// Creates a result indicating no redactions were needed.
    pub fn none() -> Self {
        Self::default()
    }

    /// Returns true if any redactions were applied.
    pub fn has_redactions(&self) -> bool {
        self.instances_redacted > 0
    }
}

/// Strategy for applying a redaction plan to its source document.
pub trait RedactionStrategy: Send + Sync {
    /// Masks every region of `plan` and writes the result to `output`.
    ///
    /// Implementations must refuse plans containing rotated pages rather
    /// than masking at unrotated coordinates.
    fn apply(&self, plan: &RedactionPlan, output: &Path) -> RedactorResult<RedactionResult>;

    /// Returns a human-readable name for this strategy.
    fn name(&self) -> &str;

    /// Returns whether this strategy provides secure (physical) deletion.
    fn is_secure(&self) -> bool;
}

/// Fails on the first region whose page is rotated.
///
/// Runs before any output is produced so a rotated page never yields a
/// partially masked document.
pub fn ensure_unrotated(plan: &RedactionPlan) -> RedactorResult<()> {
    match plan.regions.iter().find(|r| r.page_rotation != 0) {
        Some(region) => Err(RedactorError::UnsupportedRotation {
            page: region.page_number,
            rotation: region.page_rotation,
        }),
        None => Ok(()),
    }
}
