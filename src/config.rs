//! Tunable thresholds for line grouping, run building, merging and masking.

/// Gap threshold parameters: the largest of a fixed floor and two
/// multiples of the page's median glyph size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GapPolicy {
    pub floor: f32,
    pub width_factor: f32,
    pub height_factor: f32,
}

impl GapPolicy {
    pub const fn new(floor: f32, width_factor: f32, height_factor: f32) -> Self {
        Self {
            floor,
            width_factor,
            height_factor,
        }
    }

    pub fn threshold(&self, median_width: f32, median_height: f32) -> f32 {
        self.floor
            .max(median_width * self.width_factor)
            .max(median_height * self.height_factor)
    }
}

/// Locator configuration. Defaults match ordinary prose and boxed form fields.
#[derive(Debug, Clone, PartialEq)]
pub struct LocatorConfig {
    /// Minimum vertical tolerance when grouping lines.
    pub line_tolerance_floor: f32,
    /// Fraction of the median glyph height used as line tolerance.
    pub line_tolerance_factor: f32,
    /// Pass 1 (word runs).
    pub word_gap: GapPolicy,
    /// Pass 2 (digit runs in boxed fields).
    pub digit_run_gap: GapPolicy,
    /// Two regions merge when their intersection exceeds this share of the smaller one.
    pub merge_overlap_ratio: f32,
    /// Padding added around each region when masking.
    pub mask_padding: f32,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            line_tolerance_floor: 2.0,
            line_tolerance_factor: 0.3,
            word_gap: GapPolicy::new(2.0, 1.5, 0.5),
            digit_run_gap: GapPolicy::new(2.0, 5.0, 2.5),
            merge_overlap_ratio: 0.5,
            mask_padding: 1.0,
        }
    }
}

impl LocatorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_word_gap(mut self, policy: GapPolicy) -> Self {
        self.word_gap = policy;
        self
    }

    pub fn with_digit_run_gap(mut self, policy: GapPolicy) -> Self {
        self.digit_run_gap = policy;
        self
    }

    pub fn with_line_tolerance(mut self, floor: f32, factor: f32) -> Self {
        self.line_tolerance_floor = floor;
        self.line_tolerance_factor = factor;
        self
    }

    pub fn with_merge_overlap_ratio(mut self, ratio: f32) -> Self {
        self.merge_overlap_ratio = ratio;
        self
    }

    pub fn with_mask_padding(mut self, padding: f32) -> Self {
        self.mask_padding = padding;
        self
    }

    pub fn line_tolerance(&self, median_height: f32) -> f32 {
        self.line_tolerance_floor
            .max(median_height * self.line_tolerance_factor)
    }
}
