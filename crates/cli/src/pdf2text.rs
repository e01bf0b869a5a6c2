//! pdf2text - Extract text, images and tables from a PDF in reading
//! order.
//!
//! Ordinary text is emitted directly, detected tables as
//! tab-separated rows, and embedded or rasterized images are OCR'd
//! into text, all interleaved in top-to-bottom, left-to-right page
//! order. Extracted image files land in the output directory.

use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, Parser};
use tracing_subscriber::EnvFilter;

use readout_core::{ExtractOptions, HeuristicTableDetector, ImageSink, extract_document, output};
use readout_pdfium::PdfiumBackend;

/// Extract text, images and tables from a born-digital PDF in
/// reading order.
#[derive(Parser, Debug)]
#[command(name = "pdf2text")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input PDF file
    input: PathBuf,

    /// Directory to write images and auxiliary files (created if
    /// absent)
    #[arg(long = "out-dir", default_value = "output")]
    out_dir: PathBuf,

    /// Output plain text file
    #[arg(long = "out-text", default_value = "output.txt")]
    out_text: PathBuf,

    /// Also OCR images. Accepted for interface compatibility; images
    /// are always OCR'd.
    #[arg(long = "image-ocr", action = ArgAction::SetTrue)]
    image_ocr: bool,

    /// Use debug logging level
    #[arg(short = 'd', long, action = ArgAction::SetTrue)]
    debug: bool,
}

fn init_tracing(debug: bool) {
    let default = if debug { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(feature = "tesseract")]
fn ocr_engine() -> readout_pdfium::TesseractOcr {
    readout_pdfium::TesseractOcr::new()
}

#[cfg(not(feature = "tesseract"))]
fn ocr_engine() -> readout_pdfium::DisabledOcr {
    readout_pdfium::DisabledOcr
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.debug);
    // Images are always OCR'd; the flag changes nothing.
    let _ = args.image_ocr;

    let backend = PdfiumBackend::new().context("pdfium library unavailable")?;
    let document = backend
        .open(&args.input)
        .with_context(|| format!("cannot open {}", args.input.display()))?;

    let detector = HeuristicTableDetector::new();
    let ocr = ocr_engine();
    let mut sink = ImageSink::new(&args.out_dir)
        .with_context(|| format!("cannot create {}", args.out_dir.display()))?;

    let lines = extract_document(
        &document,
        &detector,
        &ocr,
        &mut sink,
        &ExtractOptions::default(),
    )?;
    output::write_lines(&args.out_text, &lines)
        .with_context(|| format!("cannot write {}", args.out_text.display()))?;

    println!(
        "Wrote text to {}. Extracted images to {}/",
        args.out_text.display(),
        args.out_dir.display()
    );
    Ok(())
}
