//! Secure redaction strategy using MuPDF.
//!
//! This strategy physically removes text from PDF documents using MuPDF's
//! redaction API, ensuring that redacted content cannot be recovered.

use super::strategy::{ensure_unrotated, RedactionResult, RedactionStrategy};
use crate::domain::{RedactionPlan, Region};
use crate::error::{RedactorError, RedactorResult};
use crate::source::pdf::PageFrame;
use crate::source::read_page_rotations;
use std::collections::BTreeMap;
use std::path::Path;

use log::{debug, info};
use mupdf::pdf::{PdfAnnotationType, PdfDocument, PdfPage};

/// Default padding around each region, in page units.
pub const DEFAULT_MASK_PADDING: f32 = 1.0;

/// Secure redaction strategy that physically removes text using MuPDF.
///
/// For each page with regions, this strategy:
/// 1. Pads every region and clamps it to the page bounds
/// 2. Creates a Redact annotation covering it
/// 3. Applies the page's redactions (text removed, opaque fill drawn)
///
/// **Security**: Redacted text is completely removed and cannot be extracted.
#[derive(Debug, Clone)]
pub struct SecureRedactionStrategy {
    /// Padding added on every side to cover anti-aliased glyph edges
    padding: f32,
}

impl Default for SecureRedactionStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl SecureRedactionStrategy {
    /// Creates a new secure redaction strategy with default settings.
    pub fn new() -> Self {
        Self {
            padding: DEFAULT_MASK_PADDING,
        }
    }

    /// Sets the padding applied around each region.
    pub fn with_padding(mut self, padding: f32) -> Self {
        self.padding = padding;
        self
    }

    pub fn padding(&self) -> f32 {
        self.padding
    }

    /// Groups regions by page, rejecting page numbers the document lacks.
    fn regions_by_page<'a>(
        plan: &'a RedactionPlan,
        page_count: usize,
    ) -> RedactorResult<BTreeMap<usize, Vec<&'a Region>>> {
        let mut by_page: BTreeMap<usize, Vec<&Region>> = BTreeMap::new();
        for region in &plan.regions {
            if region.page_number == 0 || region.page_number > page_count {
                return Err(RedactorError::InvalidInput {
                    parameter: "pageNumber".to_string(),
                    reason: format!(
                        "region on page {} but document has {} page(s)",
                        region.page_number, page_count
                    ),
                });
            }
            by_page.entry(region.page_number).or_default().push(region);
        }
        Ok(by_page)
    }

    /// Checks the document's own `/Rotate` for every page that has regions.
    /// Page numbers past the page tree are left to `regions_by_page`.
    fn ensure_target_pages_unrotated(plan: &RedactionPlan, rotations: &[i32]) -> RedactorResult<()> {
        let rotated = plan.regions.iter().find_map(|region| {
            let index = region.page_number.checked_sub(1)?;
            let rotation = *rotations.get(index)?;
            (rotation != 0).then_some((region.page_number, rotation))
        });
        match rotated {
            Some((page, rotation)) => Err(RedactorError::UnsupportedRotation { page, rotation }),
            None => Ok(()),
        }
    }

    /// Applies redactions to a PDF using MuPDF.
    fn apply_mupdf_redactions(
        &self,
        pdf_doc: &PdfDocument,
        plan: &RedactionPlan,
    ) -> RedactorResult<RedactionResult> {
        let page_count = pdf_doc
            .page_count()
            .map_err(|e| RedactorError::mupdf("Failed to get page count", e))?
            .max(0) as usize;

        let mut result = RedactionResult {
            pages_processed: page_count,
            secure: true,
            ..Default::default()
        };

        for (page_number, regions) in Self::regions_by_page(plan, page_count)? {
            let page = pdf_doc
                .load_page((page_number - 1) as i32)
                .map_err(|e| RedactorError::PdfProcessing {
                    message: format!("Failed to load page {}", page_number),
                    page: Some(page_number),
                    source: Some(Box::new(e)),
                })?;

            let bounds = page.bounds().map_err(|e| {
                RedactorError::mupdf(format!("Failed to get bounds for page {}", page_number), e)
            })?;
            let frame = PageFrame::new(bounds);
            let page_rect = frame.page_rect();

            // Convert to PDF page for annotation support
            let mut pdf_page =
                PdfPage::try_from(page.clone()).map_err(|_| RedactorError::PdfProcessing {
                    message: "Page does not support annotations".to_string(),
                    page: Some(page_number),
                    source: None,
                })?;

            for region in &regions {
                let rect = region
                    .bbox()
                    .padded(self.padding)
                    .clamped_to(&page_rect);

                let annot = pdf_page
                    .create_annotation(PdfAnnotationType::Redact)
                    .map_err(|e| RedactorError::PdfProcessing {
                        message: "Failed to create redaction annotation".to_string(),
                        page: Some(page_number),
                        source: Some(Box::new(e)),
                    })?;

                unsafe {
                    ffi::set_annotation_rect(&annot, frame.to_mupdf(&rect));
                }
            }

            pdf_page
                .redact()
                .map_err(|e| RedactorError::PdfProcessing {
                    message: format!("Failed to apply redactions on page {}", page_number),
                    page: Some(page_number),
                    source: Some(Box::new(e)),
                })?;

            debug!("page {}: masked {} region(s)", page_number, regions.len());
            result.instances_redacted += regions.len();
            result.pages_modified += 1;
        }

        Ok(result)
    }
}

impl RedactionStrategy for SecureRedactionStrategy {
    fn apply(&self, plan: &RedactionPlan, output: &Path) -> RedactorResult<RedactionResult> {
        let input = plan.source_path();
        if !input.exists() {
            return Err(RedactorError::DocumentNotFound {
                path: input.to_path_buf(),
            });
        }

        // Nothing is written when any page is rotated, whether the plan
        // records it or only the document does
        ensure_unrotated(plan)?;
        if !plan.is_empty() {
            let rotations = read_page_rotations(input)?;
            Self::ensure_target_pages_unrotated(plan, &rotations)?;
        }

        // No regions - just copy the file
        if plan.is_empty() {
            std::fs::copy(input, output).map_err(|e| RedactorError::Io {
                path: output.to_path_buf(),
                source: e,
            })?;
            return Ok(RedactionResult {
                secure: true,
                ..RedactionResult::none()
            });
        }

        let input_str = input.to_str().ok_or_else(|| RedactorError::InvalidInput {
            parameter: "input".to_string(),
            reason: "Path contains invalid UTF-8".to_string(),
        })?;

        let pdf_doc = PdfDocument::open(input_str).map_err(|e| RedactorError::PdfProcessing {
            message: "Failed to open PDF with MuPDF".to_string(),
            page: None,
            source: Some(Box::new(e)),
        })?;

        let result = self.apply_mupdf_redactions(&pdf_doc, plan)?;

        let output_str = output.to_str().ok_or_else(|| RedactorError::InvalidInput {
            parameter: "output".to_string(),
            reason: "Path contains invalid UTF-8".to_string(),
        })?;

        pdf_doc
            .save(output_str)
            .map_err(|e| RedactorError::PdfProcessing {
                message: "Failed to save redacted PDF".to_string(),
                page: None,
                source: Some(Box::new(e)),
            })?;

        info!(
            "masked {} region(s) on {} page(s) -> {}",
            result.instances_redacted,
            result.pages_modified,
            output.display()
        );
        Ok(result)
    }

    fn name(&self) -> &str {
        "SecureRedaction"
    }

    fn is_secure(&self) -> bool {
        true
    }
}

/// FFI helpers for MuPDF annotation operations.
mod ffi {
    use mupdf::pdf::PdfAnnotation;
    use mupdf::Rect;

    /// Sets the rectangle for a PDF annotation via FFI.
    ///
    /// # Safety
    /// This function uses unsafe FFI calls to access MuPDF's C API.
    /// The annotation must be valid and the context properly initialized.
    pub unsafe fn set_annotation_rect(annot: &PdfAnnotation, rect: Rect) {
        #[repr(C)]
        struct PdfAnnotRaw {
            inner: *mut mupdf_sys::pdf_annot,
        }

        let annot_raw = std::mem::transmute::<&PdfAnnotation, &PdfAnnotRaw>(annot);
        let ctx = mupdf_sys::mupdf_new_base_context();

        if !ctx.is_null() {
            let fz_rect = mupdf_sys::fz_rect {
                x0: rect.x0,
                y0: rect.y0,
                x1: rect.x1,
                y1: rect.y1,
            };

            mupdf_sys::pdf_set_annot_rect(ctx, annot_raw.inner, fz_rect);
            mupdf_sys::mupdf_drop_base_context(ctx);
        }
    }
}
