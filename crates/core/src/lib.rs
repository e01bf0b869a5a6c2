//! readout - reading-order PDF content extraction engine.
//!
//! Takes three heterogeneous content sources per page (text, image
//! and drawing blocks; detected table regions), resolves overlaps
//! between them (tables take precedence over the blocks they cover),
//! merges them into one spatially-ordered item sequence, and drives a
//! per-item extraction pipeline with isolated per-item failure
//! handling. The PDF content model, table detection, OCR, and
//! rasterization are collaborators behind the traits in [`source`].

pub mod driver;
pub mod error;
pub mod geometry;
pub mod model;
pub mod output;
pub mod pipeline;
pub mod resolver;
pub mod sequencer;
pub mod source;
pub mod tables;

pub use driver::{ExtractOptions, extract_document};
pub use error::{ExtractError, Result};
pub use geometry::Rect;
pub use model::{
    Block, BlockContent, ImagePayload, ImageRef, Item, ItemContent, ResolvedImage, TableRegion,
    TextCell,
};
pub use pipeline::ImageSink;
pub use source::{DocumentSource, OcrEngine, PageSource, TableDetector};
pub use tables::{HeuristicTableDetector, TableDetectorConfig};
