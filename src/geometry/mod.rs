//! Geometric Primitives and Operations

pub mod transform;

// Re-export commonly used items
pub use kurbo::{Affine, Point, Rect};
pub use transform::{rect_from_corner, scale_matrix, transform_rect, translate_matrix};
