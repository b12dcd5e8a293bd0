//! Font data conversion and UFO I/O

pub mod conversions;
pub mod features;
pub mod ufo;
