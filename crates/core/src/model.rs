//! Page content data model.
//!
//! Three heterogeneous per-page sources feed the engine: content
//! blocks from the page content model ([`Block`]), detected table
//! regions ([`TableRegion`]), and raw text cells ([`TextCell`]) used
//! by table detection. The sequencer merges the first two into one
//! ordered list of [`Item`]s, which the pipeline consumes.

use crate::geometry::Rect;

/// Opaque handle to externally-stored image bytes, resolvable through
/// [`crate::source::PageSource::resolve_image`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageRef(pub u32);

/// Image byte source, decided once at the adapter boundary.
#[derive(Clone, Debug, PartialEq)]
pub enum ImagePayload {
    /// Raw bytes carried inline by the content model.
    Inline { bytes: Vec<u8>, ext: String },
    /// Reference to externally-stored bytes, resolved at extraction
    /// time. Resolution failure falls back to rasterization.
    Reference(ImageRef),
}

/// Kind-specific payload of a content block.
#[derive(Clone, Debug, PartialEq)]
pub enum BlockContent {
    /// Ordered line-groups, each an ordered sequence of span strings.
    Text(Vec<Vec<String>>),
    Image(ImagePayload),
    /// Vector drawing region; rasterized on demand. Also the graceful
    /// fallback for image blocks with no resolvable payload.
    Drawing,
}

/// One atomic content unit from the page content model.
///
/// Bounding boxes pass through exactly as the content model assigned
/// them; degenerate or overlapping boxes are not validated here.
#[derive(Clone, Debug, PartialEq)]
pub struct Block {
    pub rect: Rect,
    pub content: BlockContent,
}

/// Bytes and format extension of a resolved image reference.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedImage {
    pub bytes: Vec<u8>,
    pub ext: String,
}

/// A detected tabular area with its row/cell matrix. Produced
/// independently of [`Block`]s; an absent cell renders as empty.
#[derive(Clone, Debug, PartialEq)]
pub struct TableRegion {
    pub rect: Rect,
    pub rows: Vec<Vec<Option<String>>>,
}

/// A positioned text fragment used as table-detection input.
#[derive(Clone, Debug, PartialEq)]
pub struct TextCell {
    pub rect: Rect,
    pub text: String,
}

/// Kind-specific payload of a unified item.
///
/// Non-exhaustive so that a future kind reaches the pipeline's
/// diagnostic arm instead of being dropped silently.
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq)]
pub enum ItemContent {
    /// Fully resolved text, possibly with embedded newlines.
    Text(String),
    Table(Vec<Vec<Option<String>>>),
    Image(ImagePayload),
    Drawing,
}

/// The unification of blocks and table regions for ordering and
/// dispatch. Created fresh per page, consumed once, then discarded.
#[derive(Clone, Debug, PartialEq)]
pub struct Item {
    pub rect: Rect,
    pub content: ItemContent,
}
