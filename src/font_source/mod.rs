//! Font construction
//!
//! The pipeline talks to the font it is building only through the
//! `FontBuilder` trait. `UfoFont` is the real backend (SVG import, UFO and
//! TrueType output); `MemoryFont` keeps everything in memory for tests.

pub mod memory;
pub mod metrics;
pub mod svg;
pub mod table;
pub mod ufo;

use crate::core::errors::{FontIoError, ImportError};
use kurbo::{Affine, Rect};
use std::fmt;
use std::path::Path;

pub use memory::MemoryFont;
pub use metrics::FontMetrics;
pub use table::{GlyphRecord, GlyphTable, SubstitutionTable};
pub use ufo::UfoFont;

/// Handle of a glyph inside one font
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GlyphId(pub usize);

/// Handle of a registered substitution table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableId(pub usize);

/// Formats a font can be written in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// UFO 3 source directory
    Ufo,
    /// TrueType binary
    Ttf,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ufo => write!(f, "ufo"),
            Self::Ttf => write!(f, "ttf"),
        }
    }
}

/// The operations the pipeline needs from a font under construction
pub trait FontBuilder {
    fn set_metrics(&mut self, metrics: FontMetrics);

    fn metrics(&self) -> FontMetrics;

    /// Create the glyph for `codepoint`, or return the existing one
    fn glyph(&mut self, codepoint: u32, name: &str) -> GlyphId;

    /// The glyph stored under `codepoint`, if any
    fn glyph_at(&self, codepoint: u32) -> Option<GlyphId>;

    /// Import outline data from a resource into a glyph, without scaling
    fn import_outline(&mut self, glyph: GlyphId, resource: &Path) -> Result<(), ImportError>;

    /// Drop a glyph from the font, freeing its code point
    fn remove_glyph(&mut self, glyph: GlyphId);

    /// Outline bounds in glyph coordinates; `None` for an empty outline
    fn bounding_box(&self, glyph: GlyphId) -> Option<Rect>;

    /// Transform the outline. The advance width is transformed as well and
    /// must be reset by the caller afterwards.
    fn transform(&mut self, glyph: GlyphId, matrix: Affine);

    fn set_advance(&mut self, glyph: GlyphId, width: i64);

    /// Whether the glyph has no visible outline
    fn is_empty(&self, glyph: GlyphId) -> bool;

    /// Register a ligature substitution table under an OpenType feature tag
    fn add_substitution_table(&mut self, feature: &str) -> TableId;

    /// Attach a rule: the `components` sequence is replaced by `glyph`
    fn add_ligature(&mut self, table: TableId, glyph: GlyphId, components: Vec<GlyphId>);

    fn generate(&mut self, path: &Path, format: OutputFormat) -> Result<(), FontIoError>;

    /// Release the font. Called exactly once per run.
    fn close(&mut self);
}
