//! OCR engine bindings.
//!
//! Tesseract (via `leptess`) is optional because it needs the native
//! tesseract and leptonica libraries at build time. Without the
//! `tesseract` feature the [`DisabledOcr`] engine fails every call,
//! which the pipeline's marker-line policy turns into visible
//! `[... OCR FAILED]` gaps rather than silently missing text.

use readout_core::{ExtractError, OcrEngine, Result};

/// Tesseract-backed OCR over encoded image bytes.
#[cfg(feature = "tesseract")]
pub struct TesseractOcr {
    language: String,
}

#[cfg(feature = "tesseract")]
impl TesseractOcr {
    pub fn new() -> Self {
        Self::with_language("eng")
    }

    pub fn with_language(language: &str) -> Self {
        Self {
            language: language.to_string(),
        }
    }
}

#[cfg(feature = "tesseract")]
impl Default for TesseractOcr {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "tesseract")]
impl OcrEngine for TesseractOcr {
    fn ocr(&self, image: &[u8]) -> Result<String> {
        let mut engine = leptess::LepTess::new(None, &self.language)
            .map_err(|e| ExtractError::Ocr(format!("tesseract init: {e}")))?;
        // leptess expects encoded image data and decodes it itself.
        engine
            .set_image_from_mem(image)
            .map_err(|e| ExtractError::Ocr(format!("set image: {e}")))?;
        let text = engine
            .get_utf8_text()
            .map_err(|e| ExtractError::Ocr(format!("recognize: {e}")))?;
        Ok(text.trim().to_string())
    }
}

/// Stand-in engine used when OCR support is not compiled in.
#[derive(Clone, Copy, Debug, Default)]
pub struct DisabledOcr;

impl OcrEngine for DisabledOcr {
    fn ocr(&self, _image: &[u8]) -> Result<String> {
        Err(ExtractError::Ocr(
            "ocr support not compiled in (enable the tesseract feature)".to_string(),
        ))
    }
}
