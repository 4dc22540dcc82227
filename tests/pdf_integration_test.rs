//! End-to-end tests against real PDFs rendered with printpdf and read
//! back through MuPDF.

mod common;
use common::*;

use anyhow::Result;
use glyph_redactor::source::read_page_rotations;
use glyph_redactor::{
    load_plan, GlyphSource, MuPdfGlyphSource, RedactionService, RedactorError, Rule,
};
use tempfile::TempDir;

fn form_pdf(dir: &TempDir) -> Result<std::path::PathBuf> {
    let path = dir.path().join("form.pdf");
    TestPdfBuilder::new()
        .with_line("Applicant ALICE")
        .with_boxed_digits("1234")
        .build(&path)?;
    Ok(path)
}

#[test]
fn test_glyph_source_reads_page_content() -> Result<()> {
    let _guard = mupdf_guard();
    let dir = TempDir::new()?;
    let input = form_pdf(&dir)?;

    let source = MuPdfGlyphSource::open(&input)?;
    assert_eq!(source.page_count(), 1);

    let page = source.page(0)?;
    assert_eq!(page.number, 1);
    assert_eq!(page.rotation, 0);
    assert!(page.glyphs.iter().any(|g| g.ch == 'A'));
    assert!(page
        .glyphs
        .iter()
        .all(|g| g.bbox.bottom >= 0.0 && g.bbox.top <= page.height));
    Ok(())
}

#[test]
fn test_boxed_digits_located_in_pdf() -> Result<()> {
    let _guard = mupdf_guard();
    let dir = TempDir::new()?;
    let input = form_pdf(&dir)?;

    let service = RedactionService::with_secure_strategy();
    let plan = service.locate(&input, &[Rule::literal("1234")])?;
    assert_eq!(plan.total_redactions(), 1);
    assert_eq!(plan.regions[0].matched_text, "1234");

    let off = service.locate(&input, &[Rule::literal("1234").with_fragment_aware(false)])?;
    assert!(off.is_empty());
    Ok(())
}

#[test]
fn test_redaction_removes_digits_and_keeps_name() -> Result<()> {
    let _guard = mupdf_guard();
    let dir = TempDir::new()?;
    let input = form_pdf(&dir)?;
    let output = dir.path().join("redacted.pdf");

    let rules = [Rule::literal("1234")];
    let (plan, result) =
        RedactionService::with_secure_strategy().redact(&input, &output, &rules)?;

    assert_eq!(result.instances_redacted, plan.total_redactions());
    assert_eq!(result.pages_modified, 1);
    assert!(result.secure);

    assert_valid_pdf(&output);
    assert_eq!(count_regions(&output, &rules)?, 0);
    assert_preserved(&output, "ALICE");
    Ok(())
}

#[test]
fn test_rotated_page_is_reported_and_refused() -> Result<()> {
    let _guard = mupdf_guard();
    let dir = TempDir::new()?;
    let input = form_pdf(&dir)?;
    rotate_pages(&input, 90)?;
    assert_eq!(read_page_rotations(&input)?, vec![90]);

    let service = RedactionService::with_secure_strategy();
    let plan = service.locate(&input, &[Rule::literal("ALICE")])?;
    assert!(!plan.is_empty());
    assert!(plan.regions.iter().all(|r| r.page_rotation == 90));

    let output = dir.path().join("out.pdf");
    let err = service.apply(&plan, &output).unwrap_err();
    assert!(matches!(
        err,
        RedactorError::UnsupportedRotation { page: 1, rotation: 90 }
    ));
    assert!(!output.exists());
    Ok(())
}

#[test]
fn test_plan_without_rotation_field_is_refused_on_rotated_page() -> Result<()> {
    let _guard = mupdf_guard();
    let dir = TempDir::new()?;
    let input = form_pdf(&dir)?;
    rotate_pages(&input, 90)?;

    let plan_path = dir.path().join("plan.json");
    let json = serde_json::json!({
        "sourcePath": input,
        "regions": [{
            "pageNumber": 1, "x": 50.0, "y": 50.0, "width": 40.0, "height": 12.0,
            "matchedText": "1234", "rulePattern": "1234"
        }]
    });
    std::fs::write(&plan_path, json.to_string())?;

    let plan = load_plan(&plan_path)?;
    assert_eq!(plan.regions[0].page_rotation, 0);

    let output = dir.path().join("out.pdf");
    let err = RedactionService::with_secure_strategy()
        .apply(&plan, &output)
        .unwrap_err();
    assert!(matches!(
        err,
        RedactorError::UnsupportedRotation { page: 1, rotation: 90 }
    ));
    assert!(!output.exists());
    Ok(())
}
