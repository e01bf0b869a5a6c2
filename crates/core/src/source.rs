//! Collaborator trait seams.
//!
//! The engine consumes the PDF content model, table detection, OCR,
//! and rasterization only through these traits. `readout-pdfium`
//! provides the production bindings; tests substitute in-memory
//! fakes.

use crate::error::Result;
use crate::geometry::Rect;
use crate::model::{Block, ImageRef, ResolvedImage, TableRegion, TextCell};

/// An opened document yielding pages by index.
pub trait DocumentSource {
    type Page<'a>: PageSource
    where
        Self: 'a;

    fn page_count(&self) -> usize;

    fn load_page(&self, index: usize) -> Result<Self::Page<'_>>;
}

/// One page of the content model.
pub trait PageSource {
    /// Content blocks in content-model order. Bounding boxes pass
    /// through unmodified.
    fn content_blocks(&self) -> Result<Vec<Block>>;

    /// Positioned text fragments for table detection. Failure here is
    /// page-local; the driver degrades the page to table-free.
    fn text_cells(&self) -> Result<Vec<TextCell>>;

    /// Dereference an image handle to bytes and format. An error
    /// triggers the pipeline's rasterize fallback.
    fn resolve_image(&self, image: &ImageRef) -> Result<ResolvedImage>;

    /// Render the page region clipped to `rect` as PNG bytes, with a
    /// uniform upscaling factor applied to width and height.
    fn render_region(&self, rect: Rect, zoom: f64) -> Result<Vec<u8>>;
}

/// Table-region detection over a page's text cells. Best-effort by
/// contract: implementations return an empty list rather than fail.
pub trait TableDetector {
    fn detect_tables(&self, cells: &[TextCell]) -> Vec<TableRegion>;
}

/// OCR over an encoded raster image.
pub trait OcrEngine {
    fn ocr(&self, image: &[u8]) -> Result<String>;
}
