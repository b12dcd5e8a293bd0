//! Per-glyph layout: viewbox, scale, alignment and advance width
//!
//! Each resolver is a small function of the glyph's resolved parameters,
//! the font metrics and the current viewbox. The pipeline calls them in
//! order for every icon.

pub mod align;
pub mod scale;
pub mod viewbox;
pub mod width;

pub use align::alignment_matrix;
pub use scale::{apply_scale, scale_factor};
pub use viewbox::resolve_viewbox;
pub use width::{advance_width, committed_advance};
