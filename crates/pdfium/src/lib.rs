//! PDFium-backed collaborator bindings for the readout engine.
//!
//! Satisfies the `readout-core` source traits with `pdfium-render`:
//! text segments become text blocks (and the table detector's text
//! cells), image page objects become image blocks resolved on demand,
//! and region rasterization renders the full page at the requested
//! zoom and crops. OCR lives in [`ocr`], behind the `tesseract`
//! feature.
//!
//! PDFium reports geometry in points with a bottom-left origin; the
//! adapters convert everything to the engine's top-left origin at
//! this boundary.

mod document;
pub mod ocr;

pub use document::{PdfiumDocument, PdfiumPage};
#[cfg(feature = "tesseract")]
pub use ocr::TesseractOcr;
pub use ocr::DisabledOcr;

use std::path::Path;

use pdfium_render::prelude::*;

use readout_core::{ExtractError, Result};

/// PDFium library binding plus document opening.
///
/// Binds to a `pdfium` dynamic library next to the executable first,
/// then falls back to the system library.
pub struct PdfiumBackend {
    pdfium: Pdfium,
}

impl PdfiumBackend {
    pub fn new() -> Result<Self> {
        let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
            .or_else(|_| Pdfium::bind_to_system_library())
            .map_err(|e| ExtractError::Open(format!("cannot bind pdfium library: {e}")))?;
        Ok(Self {
            pdfium: Pdfium::new(bindings),
        })
    }

    /// Open a PDF document. This is the one fatal error surface of a
    /// run: an unreadable or corrupt file fails here.
    pub fn open(&self, path: &Path) -> Result<PdfiumDocument<'_>> {
        let document = self
            .pdfium
            .load_pdf_from_file(path, None)
            .map_err(|e| ExtractError::Open(format!("{}: {e}", path.display())))?;
        Ok(PdfiumDocument::new(document))
    }
}
