//! Pipeline configuration management
//!
//! This module handles all configuration aspects:
//! - Typed layout parameters and their text parsing
//! - The per-glyph override table
//! - The read-only pipeline configuration built from CLI arguments

pub mod overrides;
pub mod params;
pub mod settings;

// Simple, clear re-exports
pub use overrides::{ConfigSource, OverrideTable};
pub use params::{HAlign, Mode, ParamSet, PartialParams, ScalePolicy, VAlign, WidthBound};
pub use settings::{OutputPaths, PipelineConfig, StyleOptions};
