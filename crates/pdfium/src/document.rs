//! Document and page adapters over `pdfium-render`.

use std::io::Cursor;

use image::ImageFormat;
use pdfium_render::prelude::*;

use readout_core::{
    Block, BlockContent, DocumentSource, ExtractError, ImagePayload, ImageRef, PageSource, Rect,
    ResolvedImage, Result, TextCell,
};

/// An open PDF document.
pub struct PdfiumDocument<'a> {
    document: PdfDocument<'a>,
}

impl<'a> PdfiumDocument<'a> {
    pub(crate) fn new(document: PdfDocument<'a>) -> Self {
        Self { document }
    }
}

impl<'a> DocumentSource for PdfiumDocument<'a> {
    type Page<'b>
        = PdfiumPage<'b, 'a>
    where
        Self: 'b;

    fn page_count(&self) -> usize {
        usize::from(self.document.pages().len())
    }

    fn load_page(&self, index: usize) -> Result<PdfiumPage<'_, 'a>> {
        let page = self
            .document
            .pages()
            .get(index as u16)
            .map_err(|e| ExtractError::Page {
                page: index,
                msg: e.to_string(),
            })?;
        let height = page.height().value as f64;
        let width = page.width().value as f64;
        Ok(PdfiumPage {
            page,
            document: &self.document,
            width,
            height,
        })
    }
}

/// One page of the content model.
pub struct PdfiumPage<'r, 'a> {
    page: PdfPage<'a>,
    document: &'r PdfDocument<'a>,
    width: f64,
    height: f64,
}

impl PdfiumPage<'_, '_> {
    /// Convert PDFium's bottom-left-origin extents to the engine's
    /// top-left origin.
    fn to_top_left(&self, left: f64, bottom: f64, right: f64, top: f64) -> Rect {
        Rect::new(left, self.height - top, right, self.height - bottom)
    }
}

impl PageSource for PdfiumPage<'_, '_> {
    fn content_blocks(&self) -> Result<Vec<Block>> {
        let text = self.page.text().map_err(|e| ExtractError::Page {
            page: 0,
            msg: format!("text unavailable: {e}"),
        })?;

        let mut blocks = Vec::new();

        // Each text segment is one block: a single line-group with a
        // single span. Bounding boxes pass through unmodified.
        for segment in text.segments().iter() {
            let bounds = segment.bounds();
            let rect = self.to_top_left(
                bounds.left().value as f64,
                bounds.bottom().value as f64,
                bounds.right().value as f64,
                bounds.top().value as f64,
            );
            blocks.push(Block {
                rect,
                content: BlockContent::Text(vec![vec![segment.text()]]),
            });
        }

        for (index, object) in self.page.objects().iter().enumerate() {
            if object.object_type() != PdfPageObjectType::Image {
                continue;
            }
            let Ok(bounds) = object.bounds() else {
                tracing::warn!(index, "image object without bounds, skipped");
                continue;
            };
            let rect = self.to_top_left(
                bounds.left().value as f64,
                bounds.bottom().value as f64,
                bounds.right().value as f64,
                bounds.top().value as f64,
            );
            // An image object we cannot address as an image degrades
            // to a drawing block and gets rasterized instead.
            let content = if object.as_image_object().is_some() {
                BlockContent::Image(ImagePayload::Reference(ImageRef(index as u32)))
            } else {
                BlockContent::Drawing
            };
            blocks.push(Block { rect, content });
        }

        Ok(blocks)
    }

    fn text_cells(&self) -> Result<Vec<TextCell>> {
        let text = self.page.text().map_err(|e| ExtractError::Page {
            page: 0,
            msg: format!("text unavailable: {e}"),
        })?;

        let mut cells = Vec::new();
        for segment in text.segments().iter() {
            let content = segment.text();
            let content = content.trim();
            if content.is_empty() {
                continue;
            }
            let bounds = segment.bounds();
            cells.push(TextCell {
                rect: self.to_top_left(
                    bounds.left().value as f64,
                    bounds.bottom().value as f64,
                    bounds.right().value as f64,
                    bounds.top().value as f64,
                ),
                text: content.to_string(),
            });
        }
        Ok(cells)
    }

    fn resolve_image(&self, image: &ImageRef) -> Result<ResolvedImage> {
        let object = self
            .page
            .objects()
            .iter()
            .nth(image.0 as usize)
            .ok_or_else(|| ExtractError::ImageResolve(format!("no object {}", image.0)))?;
        let image_object = object
            .as_image_object()
            .ok_or_else(|| ExtractError::ImageResolve(format!("object {} is not an image", image.0)))?;
        let decoded = image_object
            .get_processed_image(self.document)
            .map_err(|e| ExtractError::ImageResolve(e.to_string()))?;

        // PDFium decodes to pixels, so resolved images are always
        // re-encoded as PNG.
        let mut bytes = Vec::new();
        decoded
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(|e| ExtractError::ImageResolve(format!("png encode: {e}")))?;
        Ok(ResolvedImage {
            bytes,
            ext: "png".to_string(),
        })
    }

    fn render_region(&self, rect: Rect, zoom: f64) -> Result<Vec<u8>> {
        let pixel_width = (self.width * zoom).round().max(1.0) as i32;
        let pixel_height = (self.height * zoom).round().max(1.0) as i32;

        let bitmap = self
            .page
            .render_with_config(
                &PdfRenderConfig::new()
                    .set_target_width(pixel_width)
                    .set_target_height(pixel_height),
            )
            .map_err(|e| ExtractError::Render(e.to_string()))?;
        let rendered = bitmap.as_image();

        // The rendered bitmap is already top-left origin, matching
        // the engine's rect space; clip in scaled pixel coordinates.
        let x = ((rect.x0 * zoom).floor().max(0.0) as u32).min(rendered.width().saturating_sub(1));
        let y = ((rect.y0 * zoom).floor().max(0.0) as u32).min(rendered.height().saturating_sub(1));
        let w = ((rect.width() * zoom).round() as u32)
            .clamp(1, rendered.width() - x);
        let h = ((rect.height() * zoom).round() as u32)
            .clamp(1, rendered.height() - y);
        let clipped = rendered.crop_imm(x, y, w, h);

        let mut bytes = Vec::new();
        clipped
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(|e| ExtractError::Render(format!("png encode: {e}")))?;
        Ok(bytes)
    }
}
