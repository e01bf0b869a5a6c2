//! End-to-end driver tests over fake collaborators.
//!
//! The fakes stand in for the PDF content model, table detector, OCR
//! engine, and raster renderer, so these tests exercise the whole
//! reconciliation and ordering engine without a PDF backend.

use std::collections::HashMap;

use readout_core::pipeline::{
    DRAWING_OCR_FAILED, DRAWING_RASTERIZE_FAILED, IMAGE_OCR_FAILED, ImageSink,
};
use readout_core::{
    Block, BlockContent, DocumentSource, ExtractError, ExtractOptions, ImagePayload, ImageRef,
    OcrEngine, PageSource, Rect, ResolvedImage, Result, TableDetector, TableRegion, TextCell,
    extract_document,
};

// ============================================================================
// Fake collaborators
// ============================================================================

#[derive(Default)]
struct FakePage {
    blocks: Vec<Block>,
    cells: Vec<TextCell>,
    images: HashMap<u32, ResolvedImage>,
    rendered_png: Vec<u8>,
    fail_cells: bool,
    fail_render: bool,
}

impl PageSource for &FakePage {
    fn content_blocks(&self) -> Result<Vec<Block>> {
        Ok(self.blocks.clone())
    }

    fn text_cells(&self) -> Result<Vec<TextCell>> {
        if self.fail_cells {
            return Err(ExtractError::Page {
                page: 0,
                msg: "cells unavailable".to_string(),
            });
        }
        Ok(self.cells.clone())
    }

    fn resolve_image(&self, image: &ImageRef) -> Result<ResolvedImage> {
        self.images
            .get(&image.0)
            .cloned()
            .ok_or_else(|| ExtractError::ImageResolve(format!("no object {}", image.0)))
    }

    fn render_region(&self, _rect: Rect, _zoom: f64) -> Result<Vec<u8>> {
        if self.fail_render {
            return Err(ExtractError::Render("renderer down".to_string()));
        }
        Ok(self.rendered_png.clone())
    }
}

#[derive(Default)]
struct FakeDocument {
    pages: Vec<FakePage>,
}

impl DocumentSource for FakeDocument {
    type Page<'a> = &'a FakePage;

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn load_page(&self, index: usize) -> Result<Self::Page<'_>> {
        self.pages.get(index).ok_or(ExtractError::Page {
            page: index,
            msg: "out of range".to_string(),
        })
    }
}

/// Returns a fixed table list for every page, ignoring the cells.
struct FixedTables(Vec<TableRegion>);

impl TableDetector for FixedTables {
    fn detect_tables(&self, _cells: &[TextCell]) -> Vec<TableRegion> {
        self.0.clone()
    }
}

/// Maps exact image bytes to OCR text; listed bytes fail, unknown
/// bytes read as empty.
#[derive(Default)]
struct FakeOcr {
    texts: HashMap<Vec<u8>, String>,
    fail_on: Vec<Vec<u8>>,
}

impl OcrEngine for FakeOcr {
    fn ocr(&self, image: &[u8]) -> Result<String> {
        if self.fail_on.iter().any(|b| b == image) {
            return Err(ExtractError::Ocr("engine failure".to_string()));
        }
        Ok(self.texts.get(image).cloned().unwrap_or_default())
    }
}

fn text_block(rect: Rect, text: &str) -> Block {
    Block {
        rect,
        content: BlockContent::Text(vec![vec![text.to_string()]]),
    }
}

fn run<T: TableDetector>(
    document: &FakeDocument,
    detector: &T,
    ocr: &FakeOcr,
) -> (Vec<String>, Vec<String>) {
    let dir = tempfile::tempdir().unwrap();
    let mut sink = ImageSink::new(dir.path()).unwrap();
    let lines = extract_document(
        document,
        detector,
        ocr,
        &mut sink,
        &ExtractOptions::default(),
    )
    .unwrap();
    let mut files: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    files.sort();
    (lines, files)
}

// ============================================================================
// Reading order and reconciliation
// ============================================================================

#[test]
fn test_table_text_image_in_reading_order() {
    // Table above text above image; the table does not overlap the
    // text block, so nothing is excluded.
    let table = TableRegion {
        rect: Rect::new(10.0, 10.0, 200.0, 40.0),
        rows: vec![
            vec![Some("A".to_string()), Some("B".to_string())],
            vec![Some("C".to_string()), Some("D".to_string())],
        ],
    };
    let page = FakePage {
        blocks: vec![
            text_block(Rect::new(10.0, 60.0, 100.0, 70.0), "Hello"),
            Block {
                rect: Rect::new(10.0, 90.0, 100.0, 140.0),
                content: BlockContent::Image(ImagePayload::Inline {
                    bytes: b"IMGBYTES".to_vec(),
                    ext: "png".to_string(),
                }),
            },
        ],
        ..FakePage::default()
    };
    let document = FakeDocument { pages: vec![page] };
    let ocr = FakeOcr {
        texts: HashMap::from([(b"IMGBYTES".to_vec(), "Caption".to_string())]),
        ..FakeOcr::default()
    };

    let (lines, files) = run(&document, &FixedTables(vec![table]), &ocr);

    assert_eq!(lines, vec!["A\tB", "C\tD", "Hello", "Caption", ""]);
    assert_eq!(files, vec!["page1_img1.png"]);
}

#[test]
fn test_text_under_table_is_excluded() {
    // The text block sits entirely inside the table region, so the
    // table's rows replace it.
    let table = TableRegion {
        rect: Rect::new(0.0, 0.0, 200.0, 100.0),
        rows: vec![vec![Some("only".to_string())]],
    };
    let page = FakePage {
        blocks: vec![
            text_block(Rect::new(10.0, 10.0, 100.0, 20.0), "duplicated"),
            text_block(Rect::new(10.0, 150.0, 100.0, 160.0), "outside"),
        ],
        ..FakePage::default()
    };
    let document = FakeDocument { pages: vec![page] };

    let (lines, _) = run(&document, &FixedTables(vec![table]), &FakeOcr::default());

    assert_eq!(lines, vec!["only", "outside", ""]);
}

#[test]
fn test_detector_failure_degrades_to_table_free() {
    // text_cells() errors, so tables never materialize and the text
    // block that would have been excluded is retained.
    let table = TableRegion {
        rect: Rect::new(0.0, 0.0, 200.0, 100.0),
        rows: vec![vec![Some("table".to_string())]],
    };
    let page = FakePage {
        blocks: vec![text_block(Rect::new(10.0, 10.0, 100.0, 20.0), "retained")],
        fail_cells: true,
        ..FakePage::default()
    };
    let document = FakeDocument { pages: vec![page] };

    let (lines, _) = run(&document, &FixedTables(vec![table]), &FakeOcr::default());

    assert_eq!(lines, vec!["retained", ""]);
}

// ============================================================================
// Image fallback and fault isolation
// ============================================================================

#[test]
fn test_broken_reference_falls_back_to_rasterization() {
    // No object 7 on the page: resolution fails, the region is
    // rasterized, and the file keeps the img naming pattern.
    let page = FakePage {
        blocks: vec![Block {
            rect: Rect::new(10.0, 10.0, 100.0, 60.0),
            content: BlockContent::Image(ImagePayload::Reference(ImageRef(7))),
        }],
        rendered_png: b"RENDERED".to_vec(),
        ..FakePage::default()
    };
    let document = FakeDocument { pages: vec![page] };
    let ocr = FakeOcr {
        texts: HashMap::from([(b"RENDERED".to_vec(), "from raster".to_string())]),
        ..FakeOcr::default()
    };

    let dir = tempfile::tempdir().unwrap();
    let mut sink = ImageSink::new(dir.path()).unwrap();
    let lines = extract_document(
        &document,
        &FixedTables(vec![]),
        &ocr,
        &mut sink,
        &ExtractOptions::default(),
    )
    .unwrap();

    assert_eq!(lines, vec!["from raster", ""]);
    let path = dir.path().join("page1_img1.png");
    assert_eq!(std::fs::read(&path).unwrap(), b"RENDERED");
}

#[test]
fn test_ocr_failure_is_isolated_to_one_item() {
    // Five items; OCR fails only for the second image's bytes. The
    // other four items extract normally.
    let page = FakePage {
        blocks: vec![
            text_block(Rect::new(0.0, 10.0, 50.0, 20.0), "one"),
            text_block(Rect::new(0.0, 30.0, 50.0, 40.0), "two"),
            Block {
                rect: Rect::new(0.0, 50.0, 50.0, 60.0),
                content: BlockContent::Image(ImagePayload::Inline {
                    bytes: b"GOOD".to_vec(),
                    ext: "png".to_string(),
                }),
            },
            Block {
                rect: Rect::new(0.0, 70.0, 50.0, 80.0),
                content: BlockContent::Image(ImagePayload::Inline {
                    bytes: b"BAD".to_vec(),
                    ext: "png".to_string(),
                }),
            },
            text_block(Rect::new(0.0, 90.0, 50.0, 100.0), "three"),
        ],
        ..FakePage::default()
    };
    let document = FakeDocument { pages: vec![page] };
    let ocr = FakeOcr {
        texts: HashMap::from([(b"GOOD".to_vec(), "good caption".to_string())]),
        fail_on: vec![b"BAD".to_vec()],
    };

    let (lines, files) = run(&document, &FixedTables(vec![]), &ocr);

    assert_eq!(
        lines,
        vec!["one", "two", "good caption", IMAGE_OCR_FAILED, "three", ""]
    );
    // Both image files were still written.
    assert_eq!(files, vec!["page1_img1.png", "page1_img2.png"]);
}

#[test]
fn test_drawing_rasterize_failure_skips_ocr() {
    let page = FakePage {
        blocks: vec![
            Block {
                rect: Rect::new(0.0, 10.0, 50.0, 20.0),
                content: BlockContent::Drawing,
            },
            text_block(Rect::new(0.0, 30.0, 50.0, 40.0), "after"),
        ],
        fail_render: true,
        ..FakePage::default()
    };
    let document = FakeDocument { pages: vec![page] };

    let (lines, files) = run(&document, &FixedTables(vec![]), &FakeOcr::default());

    assert_eq!(lines, vec![DRAWING_RASTERIZE_FAILED, "after", ""]);
    assert!(files.is_empty());
}

#[test]
fn test_drawing_ocr_failure_uses_drawing_marker() {
    let page = FakePage {
        blocks: vec![Block {
            rect: Rect::new(0.0, 10.0, 50.0, 20.0),
            content: BlockContent::Drawing,
        }],
        rendered_png: b"DRAWPNG".to_vec(),
        ..FakePage::default()
    };
    let document = FakeDocument { pages: vec![page] };
    let ocr = FakeOcr {
        fail_on: vec![b"DRAWPNG".to_vec()],
        ..FakeOcr::default()
    };

    let (lines, files) = run(&document, &FixedTables(vec![]), &ocr);

    assert_eq!(lines, vec![DRAWING_OCR_FAILED, ""]);
    assert_eq!(files, vec!["page1_draw1.png"]);
}

// ============================================================================
// Document-wide behavior
// ============================================================================

#[test]
fn test_counter_is_unique_across_pages() {
    let image = |bytes: &[u8]| Block {
        rect: Rect::new(0.0, 10.0, 50.0, 20.0),
        content: BlockContent::Image(ImagePayload::Inline {
            bytes: bytes.to_vec(),
            ext: "png".to_string(),
        }),
    };
    let drawing = Block {
        rect: Rect::new(0.0, 40.0, 50.0, 50.0),
        content: BlockContent::Drawing,
    };
    let document = FakeDocument {
        pages: vec![
            FakePage {
                blocks: vec![image(b"a"), image(b"b")],
                ..FakePage::default()
            },
            FakePage {
                blocks: vec![image(b"c"), drawing],
                rendered_png: b"PNG".to_vec(),
                ..FakePage::default()
            },
        ],
    };

    let (_, files) = run(&document, &FixedTables(vec![]), &FakeOcr::default());

    assert_eq!(
        files,
        vec![
            "page1_img1.png",
            "page1_img2.png",
            "page2_draw4.png",
            "page2_img3.png",
        ]
    );
}

#[test]
fn test_blank_separator_after_every_page() {
    let document = FakeDocument {
        pages: vec![
            FakePage {
                blocks: vec![text_block(Rect::new(0.0, 10.0, 50.0, 20.0), "p1")],
                ..FakePage::default()
            },
            FakePage::default(),
            FakePage {
                blocks: vec![text_block(Rect::new(0.0, 10.0, 50.0, 20.0), "p3")],
                ..FakePage::default()
            },
        ],
    };

    let (lines, _) = run(&document, &FixedTables(vec![]), &FakeOcr::default());

    assert_eq!(lines, vec!["p1", "", "", "p3", ""]);
}

#[test]
fn test_empty_ocr_text_appends_nothing() {
    let page = FakePage {
        blocks: vec![Block {
            rect: Rect::new(0.0, 10.0, 50.0, 20.0),
            content: BlockContent::Image(ImagePayload::Inline {
                bytes: b"BLANK".to_vec(),
                ext: "png".to_string(),
            }),
        }],
        ..FakePage::default()
    };
    let document = FakeDocument { pages: vec![page] };

    // FakeOcr returns empty text for unknown bytes.
    let (lines, files) = run(&document, &FixedTables(vec![]), &FakeOcr::default());

    assert_eq!(lines, vec![""]);
    assert_eq!(files, vec!["page1_img1.png"]);
}
