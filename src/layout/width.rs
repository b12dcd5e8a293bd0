//! Advance width resolution

use crate::core::config::WidthBound;

/// Clamp the post-scale outline width between the bounds.
///
/// The minimum is applied first and the maximum second, so when the minimum
/// exceeds the maximum the maximum wins. The result is not rounded; round it
/// when committing it to the glyph.
pub fn advance_width(
    outline_width: f64,
    minwidth: WidthBound,
    maxwidth: WidthBound,
    units_per_em: f64,
) -> f64 {
    let mut width = outline_width;

    if let Some(min) = minwidth.resolve(units_per_em) {
        if width < min {
            width = min;
        }
    }

    if let Some(max) = maxwidth.resolve(units_per_em) {
        if width > max {
            width = max;
        }
    }

    width
}

/// The advance as stored in the font
pub fn committed_advance(width: f64) -> i64 {
    width.round() as i64
}
