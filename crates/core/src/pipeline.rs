//! Per-item extraction pipeline.
//!
//! Dispatches each ordered item to its extraction routine and appends
//! the result to the page buffer. Every branch is fault-isolated: an
//! error in one item becomes a visible placeholder line and
//! processing continues, so one bad image or table never aborts the
//! page or the document. Only the named markers below ever stand in
//! for extracted text.

use std::fs;
use std::path::{Path, PathBuf};

use itertools::Itertools;

use crate::error::Result;
use crate::model::{ImagePayload, Item, ItemContent};
use crate::source::{OcrEngine, PageSource};

/// Marker emitted when OCR fails on an image item.
pub const IMAGE_OCR_FAILED: &str = "[IMAGE OCR FAILED]";
/// Marker emitted when OCR fails on a rasterized drawing.
pub const DRAWING_OCR_FAILED: &str = "[DRAWING OCR FAILED]";
/// Marker emitted when a drawing region cannot be rasterized.
pub const DRAWING_RASTERIZE_FAILED: &str = "[DRAWING RASTERIZE FAILED]";
/// Placeholder for an image item whose routine failed unexpectedly.
pub const IMAGE_EXTRACTION_FAILED: &str = "[IMAGE EXTRACTION FAILED]";
/// Placeholder for a drawing item whose routine failed unexpectedly.
pub const DRAWING_EXTRACTION_FAILED: &str = "[DRAWING EXTRACTION FAILED]";

/// Writes extracted and rasterized images to the output directory
/// with document-unique names.
///
/// The counter is document-wide and increments before naming, so the
/// first file of a document is `page1_img1.*` and no two files ever
/// share a name regardless of how items spread across pages.
pub struct ImageSink {
    outdir: PathBuf,
    seq: usize,
}

impl ImageSink {
    pub fn new(outdir: impl AsRef<Path>) -> Result<Self> {
        let outdir = outdir.as_ref().to_path_buf();
        fs::create_dir_all(&outdir)?;
        Ok(Self { outdir, seq: 0 })
    }

    /// Number of files written so far.
    pub fn count(&self) -> usize {
        self.seq
    }

    /// Persist image bytes as `page{N}_img{K}.{ext}`, returning the
    /// filename. `page_no` is 1-based.
    pub fn save_image(&mut self, page_no: usize, ext: &str, bytes: &[u8]) -> Result<String> {
        self.seq += 1;
        let name = format!("page{page_no}_img{}.{ext}", self.seq);
        fs::write(self.outdir.join(&name), bytes)?;
        Ok(name)
    }

    /// Persist a rasterized drawing as `page{N}_draw{K}.png`.
    pub fn save_drawing(&mut self, page_no: usize, bytes: &[u8]) -> Result<String> {
        self.seq += 1;
        let name = format!("page{page_no}_draw{}.png", self.seq);
        fs::write(self.outdir.join(&name), bytes)?;
        Ok(name)
    }
}

/// Raster zoom applied uniformly to width and height when a region is
/// rendered for OCR.
pub const RASTER_ZOOM: f64 = 2.0;

/// Process one page's ordered items, appending output lines to `buf`.
pub fn process_items<P: PageSource, O: OcrEngine>(
    items: Vec<Item>,
    page: &P,
    page_no: usize,
    zoom: f64,
    ocr: &O,
    sink: &mut ImageSink,
    buf: &mut Vec<String>,
) {
    for item in items {
        match extract_item(&item, page, page_no, zoom, ocr, sink) {
            Ok(lines) => buf.extend(lines),
            Err(err) => {
                tracing::warn!(page = page_no, %err, "item extraction failed");
                buf.push(placeholder_for(&item).to_string());
            }
        }
    }
}

/// Placeholder line for an item whose extraction routine failed.
#[allow(unreachable_patterns)] // future kinds must surface, not drop
fn placeholder_for(item: &Item) -> &'static str {
    match &item.content {
        ItemContent::Image(_) => IMAGE_EXTRACTION_FAILED,
        ItemContent::Drawing => DRAWING_EXTRACTION_FAILED,
        ItemContent::Text(_) | ItemContent::Table(_) => "[EXTRACTION FAILED]",
        _ => "[UNKNOWN ITEM]",
    }
}

#[allow(unreachable_patterns)] // future kinds must surface, not drop
fn extract_item<P: PageSource, O: OcrEngine>(
    item: &Item,
    page: &P,
    page_no: usize,
    zoom: f64,
    ocr: &O,
    sink: &mut ImageSink,
) -> Result<Vec<String>> {
    match &item.content {
        ItemContent::Text(text) => Ok(extract_text(text)),
        ItemContent::Table(rows) => Ok(extract_table(rows)),
        ItemContent::Image(payload) => {
            extract_image(payload, item, page, page_no, zoom, ocr, sink)
        }
        ItemContent::Drawing => extract_drawing(item, page, page_no, zoom, ocr, sink),
        other => {
            tracing::warn!(page = page_no, ?other, "unrecognized item kind");
            Ok(vec!["[UNKNOWN ITEM]".to_string()])
        }
    }
}

fn extract_text(text: &str) -> Vec<String> {
    if text.is_empty() {
        Vec::new()
    } else {
        // Resolved text may carry embedded newlines; it is appended
        // as one entry and split only at final write.
        vec![text.to_string()]
    }
}

/// One line per row, cells joined with a tab. Absent cells render as
/// empty strings; zero rows append nothing.
fn extract_table(rows: &[Vec<Option<String>>]) -> Vec<String> {
    rows.iter()
        .map(|row| {
            row.iter()
                .map(|cell| cell.as_deref().unwrap_or(""))
                .join("\t")
        })
        .collect()
}

fn extract_image<P: PageSource, O: OcrEngine>(
    payload: &ImagePayload,
    item: &Item,
    page: &P,
    page_no: usize,
    zoom: f64,
    ocr: &O,
    sink: &mut ImageSink,
) -> Result<Vec<String>> {
    let resolved = match payload {
        ImagePayload::Inline { bytes, ext } => Some((bytes.clone(), ext.clone())),
        ImagePayload::Reference(image) => match page.resolve_image(image) {
            Ok(resolved) => Some((resolved.bytes, resolved.ext)),
            Err(err) => {
                tracing::warn!(page = page_no, %err, "image resolution failed, rasterizing");
                None
            }
        },
    };

    let (bytes, ext) = match resolved {
        Some((bytes, ext)) if !bytes.is_empty() => (bytes, ext),
        // Broken reference or empty payload: rasterize the item's own
        // region. Still an image item, so it keeps the img name.
        _ => (page.render_region(item.rect, zoom)?, "png".to_string()),
    };

    let name = sink.save_image(page_no, &ext, &bytes)?;
    tracing::debug!(page = page_no, %name, "image written");
    Ok(ocr_lines(ocr, &bytes, IMAGE_OCR_FAILED))
}

fn extract_drawing<P: PageSource, O: OcrEngine>(
    item: &Item,
    page: &P,
    page_no: usize,
    zoom: f64,
    ocr: &O,
    sink: &mut ImageSink,
) -> Result<Vec<String>> {
    let png = match page.render_region(item.rect, zoom) {
        Ok(png) => png,
        Err(err) => {
            // Rasterize failure skips OCR entirely.
            tracing::warn!(page = page_no, %err, "drawing rasterization failed");
            return Ok(vec![DRAWING_RASTERIZE_FAILED.to_string()]);
        }
    };
    let name = sink.save_drawing(page_no, &png)?;
    tracing::debug!(page = page_no, %name, "drawing written");
    Ok(ocr_lines(ocr, &png, DRAWING_OCR_FAILED))
}

/// OCR `bytes` and return the trimmed text as output lines: nothing
/// for empty text, the given marker on engine failure.
fn ocr_lines<O: OcrEngine>(ocr: &O, bytes: &[u8], failure_marker: &str) -> Vec<String> {
    match ocr.ocr(bytes) {
        Ok(text) => {
            let text = text.trim();
            if text.is_empty() {
                Vec::new()
            } else {
                vec![text.to_string()]
            }
        }
        Err(err) => {
            tracing::warn!(%err, "ocr failed");
            vec![failure_marker.to_string()]
        }
    }
}
