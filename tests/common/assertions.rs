//! Custom assertions for location and redaction tests.

use glyph_redactor::geometry::Rect;
use glyph_redactor::{RedactionPlan, Region};
use std::path::Path;

use super::pdf_helpers::extract_text;

/// Asserts a region's box equals `expected` within a small tolerance.
pub fn assert_bbox_near(region: &Region, expected: Rect) {
    let actual = region.bbox();
    let close = |a: f32, b: f32| (a - b).abs() < 0.01;
    assert!(
        close(actual.left, expected.left)
            && close(actual.bottom, expected.bottom)
            && close(actual.right, expected.right)
            && close(actual.top, expected.top),
        "region {:?} has box {:?}, expected {:?}",
        region.matched_text,
        actual,
        expected
    );
}

/// Asserts the plan holds exactly the given matched texts, in order.
pub fn assert_matched(plan: &RedactionPlan, expected: &[&str]) {
    let texts: Vec<&str> = plan.regions.iter().map(|r| r.matched_text.as_str()).collect();
    assert_eq!(texts, expected, "unexpected matches in plan {:?}", plan.regions);
    assert_eq!(plan.total_redactions(), plan.regions.len());
}

/// Asserts that a PDF exists, is loadable and still has some text.
pub fn assert_valid_pdf(pdf_path: &Path) {
    assert!(
        pdf_path.exists(),
        "PDF should exist at '{}'",
        pdf_path.display()
    );
    assert!(
        super::pdf_helpers::is_valid_pdf(pdf_path),
        "PDF at '{}' should load",
        pdf_path.display()
    );
}

/// Asserts that `pattern` survives in the PDF's extracted text.
pub fn assert_preserved(pdf_path: &Path, pattern: &str) {
    let text = extract_text(pdf_path).expect("Failed to extract text");
    assert!(
        text.contains(pattern),
        "Pattern '{}' should be preserved but was not found in PDF at '{}'",
        pattern,
        pdf_path.display()
    );
}
