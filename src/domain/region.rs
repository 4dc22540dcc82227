//! Located regions and the plan that collects them.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::geometry::Rect;

/// A rectangle on a page slated for redaction, with its provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    /// 1-based page number.
    pub page_number: usize,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub matched_text: String,
    pub rule_pattern: String,
    #[serde(default)]
    pub page_rotation: i32,
}

impl Region {
    pub fn new(
        page_number: usize,
        bbox: Rect,
        matched_text: impl Into<String>,
        rule_pattern: impl Into<String>,
        page_rotation: i32,
    ) -> Self {
        Self {
            page_number,
            x: bbox.left,
            y: bbox.bottom,
            width: bbox.width(),
            height: bbox.height(),
            matched_text: matched_text.into(),
            rule_pattern: rule_pattern.into(),
            page_rotation,
        }
    }

    pub fn bbox(&self) -> Rect {
        Rect::from_origin_size(self.x, self.y, self.width, self.height)
    }

    pub fn set_bbox(&mut self, bbox: Rect) {
        self.x = bbox.left;
        self.y = bbox.bottom;
        self.width = bbox.width();
        self.height = bbox.height();
    }
}

/// The full set of regions computed for one document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RedactionPlan {
    pub source_path: PathBuf,
    pub regions: Vec<Region>,
}

impl RedactionPlan {
    pub fn new(source_path: impl Into<PathBuf>, regions: Vec<Region>) -> Self {
        Self {
            source_path: source_path.into(),
            regions,
        }
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    /// Always equal to the number of regions.
    pub fn total_redactions(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Regions belonging to one page, in plan order.
    pub fn regions_on_page(&self, page_number: usize) -> impl Iterator<Item = &Region> {
        self.regions
            .iter()
            .filter(move |r| r.page_number == page_number)
    }
}
