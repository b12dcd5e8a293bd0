//! Rectangle and affine transform math
//!
//! Rectangles are `kurbo::Rect` values. Every constructor used here goes
//! through `Rect::from_points`, so the result is always normalized
//! (`x0 <= x1`, `y0 <= y1`) no matter which corners were supplied.

use kurbo::{Affine, Point, Rect};

/// Build a normalized rectangle from a corner and its dimensions.
///
/// Negative dimensions are allowed and simply describe the opposite corner.
pub fn rect_from_corner(x: f64, y: f64, width: f64, height: f64) -> Rect {
    Rect::from_points(Point::new(x, y), Point::new(x + width, y + height))
}

/// Map a rectangle through an affine matrix.
///
/// The corner `(x0, y0)` and the opposite corner `(x0 + w, y0 + h)` are
/// transformed and the pair re-normalized into a new rectangle. For the
/// scale and translate matrices the pipeline produces this is exact; for a
/// rotation it tracks the diagonal, not the bounding box.
pub fn transform_rect(rect: Rect, matrix: Affine) -> Rect {
    let p0 = matrix * Point::new(rect.x0, rect.y0);
    let p1 = matrix * Point::new(rect.x0 + rect.width(), rect.y0 + rect.height());
    Rect::from_points(p0, p1)
}

/// An isotropic scale about the origin.
pub fn scale_matrix(factor: f64) -> Affine {
    Affine::new([factor, 0.0, 0.0, factor, 0.0, 0.0])
}

/// A translation-only matrix.
pub fn translate_matrix(dx: f64, dy: f64) -> Affine {
    Affine::new([1.0, 0.0, 0.0, 1.0, dx, dy])
}
