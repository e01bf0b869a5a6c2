//! Document driver: the per-page extraction loop.
//!
//! Strictly sequential. For each page in order: read content blocks
//! and text cells, detect tables, resolve table-vs-block overlaps,
//! unify and sort items, run the extraction pipeline, then append one
//! blank separator line. A single [`ImageSink`] spans the whole
//! document so image filenames never collide across pages.

use crate::error::Result;
use crate::pipeline::{self, ImageSink, RASTER_ZOOM};
use crate::resolver::{self, TABLE_OVERLAP_THRESHOLD};
use crate::sequencer;
use crate::source::{DocumentSource, OcrEngine, PageSource, TableDetector};

/// Extraction policy knobs. The defaults are the only documented
/// values; they are surfaced here rather than buried in call sites.
#[derive(Clone, Debug)]
pub struct ExtractOptions {
    /// Uniform upscaling factor for region rasterization.
    pub zoom: f64,
    /// Block-exclusion overlap threshold (strict `>`).
    pub overlap_threshold: f64,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            zoom: RASTER_ZOOM,
            overlap_threshold: TABLE_OVERLAP_THRESHOLD,
        }
    }
}

/// Extract the whole document into an ordered sequence of output
/// lines, one blank line after each page's content (including the
/// last page).
///
/// Failures below the page level are swallowed into placeholder
/// output by the pipeline; a page whose content blocks cannot be read
/// contributes only its separator. The only fatal error surface left
/// to the caller is opening the document itself.
pub fn extract_document<D, T, O>(
    document: &D,
    detector: &T,
    ocr: &O,
    sink: &mut ImageSink,
    options: &ExtractOptions,
) -> Result<Vec<String>>
where
    D: DocumentSource,
    T: TableDetector,
    O: OcrEngine,
{
    let page_count = document.page_count();
    let mut out_lines = Vec::new();

    for index in 0..page_count {
        let page_no = index + 1;
        let mut page_lines = Vec::new();

        match document.load_page(index) {
            Ok(page) => {
                extract_page(&page, page_no, detector, ocr, sink, options, &mut page_lines)
            }
            Err(err) => {
                tracing::warn!(page = page_no, %err, "page unavailable, skipping");
            }
        }

        out_lines.append(&mut page_lines);
        // Page separator, kept even for empty or skipped pages.
        out_lines.push(String::new());
    }

    tracing::debug!(
        pages = page_count,
        lines = out_lines.len(),
        images = sink.count(),
        "document extracted"
    );
    Ok(out_lines)
}

fn extract_page<P, T, O>(
    page: &P,
    page_no: usize,
    detector: &T,
    ocr: &O,
    sink: &mut ImageSink,
    options: &ExtractOptions,
    buf: &mut Vec<String>,
) where
    P: PageSource,
    T: TableDetector,
    O: OcrEngine,
{
    let blocks = match page.content_blocks() {
        Ok(blocks) => blocks,
        Err(err) => {
            tracing::warn!(page = page_no, %err, "block read failed, page treated as empty");
            return;
        }
    };

    // Tables are best-effort: a detection failure degrades the page
    // to table-free rather than aborting it.
    let tables = match page.text_cells() {
        Ok(cells) => detector.detect_tables(&cells),
        Err(err) => {
            tracing::warn!(page = page_no, %err, "table detection failed, page treated as table-free");
            Vec::new()
        }
    };

    tracing::debug!(
        page = page_no,
        blocks = blocks.len(),
        tables = tables.len(),
        "page loaded"
    );

    let excluded = resolver::excluded_blocks(&blocks, &tables, options.overlap_threshold);
    let items = sequencer::unify_and_order(blocks, tables, &excluded);
    pipeline::process_items(items, page, page_no, options.zoom, ocr, sink, buf);
}
