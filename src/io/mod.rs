//! Filesystem-facing pieces: icon discovery, output paths and the text
//! outputs (stylesheet and preview)

pub mod icons;
pub mod paths;
pub mod preview;
pub mod stylesheet;

pub use icons::{scan_icons, IconSource};
pub use preview::render_preview;
pub use stylesheet::{font_face_src, render_stylesheet};
