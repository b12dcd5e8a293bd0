//! Iconforge: SVG icons in, icon font out
pub mod core;
pub mod data;
pub mod font_source;
pub mod geometry;
pub mod glyphs;
pub mod io;
pub mod layout;
pub mod logging;
pub mod pipeline;
