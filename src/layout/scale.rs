//! Scale resolution
//!
//! Scaling is always isotropic and always about the origin. The outline and
//! the tracked viewbox are transformed together so they stay in sync.

use crate::core::config::ScalePolicy;
use crate::font_source::{FontBuilder, FontMetrics, GlyphId};
use crate::geometry::{scale_matrix, transform_rect};
use kurbo::Rect;
use tracing::debug;

/// The scale factor for `viewbox` under `policy`.
///
/// `None` means no transform is applied: either the policy keeps the
/// imported size, or the viewbox side the policy divides by is zero.
pub fn scale_factor(policy: ScalePolicy, viewbox: Rect, metrics: &FontMetrics) -> Option<f64> {
    let (width, height) = (viewbox.width(), viewbox.height());
    let fit = |target: f64, side: f64| (side > 0.0).then(|| target / side);

    match policy {
        ScalePolicy::InEm => fit(metrics.units_per_em, width.max(height)),
        ScalePolicy::OverEm => fit(metrics.units_per_em, width.min(height)),
        ScalePolicy::InAscent => fit(metrics.ascent, width.max(height)),
        ScalePolicy::OverAscent => fit(metrics.ascent, width.min(height)),
        ScalePolicy::Keep => None,
        ScalePolicy::Factor(factor) => Some(factor),
    }
}

/// Scale the glyph outline and return the viewbox scaled the same way
pub fn apply_scale<B: FontBuilder>(
    builder: &mut B,
    glyph: GlyphId,
    viewbox: Rect,
    factor: Option<f64>,
) -> Rect {
    let Some(factor) = factor else {
        return viewbox;
    };

    let matrix = scale_matrix(factor);
    debug!("scale matrix: {:?}", matrix.as_coeffs());
    builder.transform(glyph, matrix);
    transform_rect(viewbox, matrix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font_source::MemoryFont;
    use kurbo::BezPath;
    use std::path::Path;

    fn metrics() -> FontMetrics {
        FontMetrics::new(1000, Some(800), Some(200))
    }

    #[test]
    fn test_in_em_fits_larger_side() {
        let viewbox = Rect::new(0.0, 0.0, 200.0, 100.0);
        let factor = scale_factor(ScalePolicy::InEm, viewbox, &metrics()).unwrap();
        assert_eq!(factor, 5.0);

        let scaled = transform_rect(viewbox, scale_matrix(factor));
        assert_eq!((scaled.width(), scaled.height()), (1000.0, 500.0));
    }

    #[test]
    fn test_over_policies_fit_smaller_side() {
        let viewbox = Rect::new(0.0, 0.0, 200.0, 100.0);
        assert_eq!(scale_factor(ScalePolicy::OverEm, viewbox, &metrics()), Some(10.0));
        assert_eq!(scale_factor(ScalePolicy::InAscent, viewbox, &metrics()), Some(4.0));
        assert_eq!(scale_factor(ScalePolicy::OverAscent, viewbox, &metrics()), Some(8.0));
    }

    #[test]
    fn test_keep_and_explicit_factor() {
        let viewbox = Rect::new(0.0, 0.0, 200.0, 100.0);
        assert_eq!(scale_factor(ScalePolicy::Keep, viewbox, &metrics()), None);
        assert_eq!(scale_factor(ScalePolicy::Factor(0.5), viewbox, &metrics()), Some(0.5));
    }

    #[test]
    fn test_zero_viewbox_is_not_scaled() {
        assert_eq!(scale_factor(ScalePolicy::InEm, Rect::ZERO, &metrics()), None);
        let flat = Rect::new(0.0, 0.0, 100.0, 0.0);
        assert_eq!(scale_factor(ScalePolicy::OverEm, flat, &metrics()), None);
        assert_eq!(scale_factor(ScalePolicy::InEm, flat, &metrics()), Some(10.0));
    }

    #[test]
    fn test_apply_scale_keeps_outline_and_viewbox_in_sync() {
        let mut font = MemoryFont::new();
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((20.0, 0.0));
        path.line_to((20.0, 10.0));
        path.close_path();
        font.register("icon.svg", vec![path]);
        let id = font.glyph(0xEA01, "icon");
        font.import_outline(id, Path::new("icon.svg")).unwrap();

        let viewbox = Rect::new(0.0, 0.0, 20.0, 10.0);
        let scaled = apply_scale(&mut font, id, viewbox, Some(3.0));
        assert_eq!(scaled, Rect::new(0.0, 0.0, 60.0, 30.0));
        assert_eq!(font.bounding_box(id), Some(scaled));

        let untouched = apply_scale(&mut font, id, scaled, None);
        assert_eq!(untouched, scaled);
        assert_eq!(font.bounding_box(id), Some(scaled));
    }
}
