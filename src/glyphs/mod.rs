//! Glyph identity: code points, ligatures and the per-glyph record

pub mod codepoints;
pub mod ligatures;

use crate::font_source::GlyphId;

pub use codepoints::CodepointAllocator;
pub use ligatures::{build_ligatures, LigaturePlan, LigatureRule};

/// Everything the pipeline decided for one icon glyph
#[derive(Debug, Clone)]
pub struct GlyphSpec {
    pub name: String,
    pub codepoint: u32,
    pub glyph: GlyphId,
    /// Committed advance width in font units
    pub advance: i64,
}
