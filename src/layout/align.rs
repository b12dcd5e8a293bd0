//! Alignment resolution
//!
//! Produces the translation that places the (already scaled) viewbox
//! horizontally inside the advance width and vertically against the font
//! metrics. `xmove`/`ymove` are added after the policy offset.

use crate::core::config::{HAlign, ParamSet, VAlign};
use crate::font_source::FontMetrics;
use crate::geometry::translate_matrix;
use kurbo::{Affine, Rect, Vec2};

/// Horizontal offset for `halign`, before `xmove`
pub fn horizontal_offset(halign: HAlign, viewbox: Rect, advance_width: f64) -> f64 {
    match halign {
        HAlign::Center => (advance_width - viewbox.width()) / 2.0 - viewbox.x0,
        HAlign::Left => -viewbox.x0,
        HAlign::Right => advance_width - viewbox.x1,
        HAlign::At(x) => x - viewbox.center().x,
        HAlign::Keep => 0.0,
    }
}

/// Vertical offset for `valign`, before `ymove`
pub fn vertical_offset(valign: VAlign, viewbox: Rect, metrics: &FontMetrics) -> f64 {
    let center_y = viewbox.center().y;
    match valign {
        VAlign::AscDescCenter => (metrics.ascent - metrics.descent) / 2.0 - center_y,
        VAlign::AscentCenter => metrics.ascent / 2.0 - center_y,
        VAlign::Baseline => -viewbox.y0,
        VAlign::Descent => -metrics.descent - viewbox.y0,
        VAlign::At(y) => y - center_y,
        VAlign::Keep => 0.0,
    }
}

/// Total translation for one glyph
pub fn alignment_offset(
    params: &ParamSet,
    viewbox: Rect,
    advance_width: f64,
    metrics: &FontMetrics,
) -> Vec2 {
    Vec2::new(
        horizontal_offset(params.halign, viewbox, advance_width) + params.xmove,
        vertical_offset(params.valign, viewbox, metrics) + params.ymove,
    )
}

/// The translation-only matrix applied after scaling
pub fn alignment_matrix(
    params: &ParamSet,
    viewbox: Rect,
    advance_width: f64,
    metrics: &FontMetrics,
) -> Affine {
    let offset = alignment_offset(params, viewbox, advance_width, metrics);
    translate_matrix(offset.x, offset.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::transform_rect;

    fn metrics() -> FontMetrics {
        FontMetrics::new(1000, Some(800), Some(200))
    }

    #[test]
    fn test_center_in_advance() {
        let viewbox = Rect::new(50.0, 0.0, 450.0, 100.0);
        assert_eq!(horizontal_offset(HAlign::Center, viewbox, 600.0), 50.0);

        let placed = transform_rect(viewbox, translate_matrix(50.0, 0.0));
        assert_eq!((placed.x0, placed.x1), (100.0, 500.0));
    }

    #[test]
    fn test_left_right_and_numeric() {
        let viewbox = Rect::new(50.0, 0.0, 450.0, 100.0);
        assert_eq!(horizontal_offset(HAlign::Left, viewbox, 600.0), -50.0);
        assert_eq!(horizontal_offset(HAlign::Right, viewbox, 600.0), 150.0);
        assert_eq!(horizontal_offset(HAlign::At(300.0), viewbox, 600.0), 50.0);
        assert_eq!(horizontal_offset(HAlign::Keep, viewbox, 600.0), 0.0);
    }

    #[test]
    fn test_vertical_policies() {
        let viewbox = Rect::new(0.0, 100.0, 100.0, 300.0);
        // center at y = 200
        assert_eq!(vertical_offset(VAlign::AscDescCenter, viewbox, &metrics()), 100.0);
        assert_eq!(vertical_offset(VAlign::AscentCenter, viewbox, &metrics()), 200.0);
        assert_eq!(vertical_offset(VAlign::Baseline, viewbox, &metrics()), -100.0);
        assert_eq!(vertical_offset(VAlign::Descent, viewbox, &metrics()), -300.0);
        assert_eq!(vertical_offset(VAlign::At(0.0), viewbox, &metrics()), -200.0);
    }

    #[test]
    fn test_moves_are_added_last() {
        let params = ParamSet {
            halign: HAlign::Left,
            valign: VAlign::Baseline,
            xmove: 10.0,
            ymove: -5.0,
            ..Default::default()
        };
        let viewbox = Rect::new(20.0, 40.0, 120.0, 140.0);
        let matrix = alignment_matrix(&params, viewbox, 100.0, &metrics());
        assert_eq!(matrix.as_coeffs(), [1.0, 0.0, 0.0, 1.0, -10.0, -45.0]);
    }
}
