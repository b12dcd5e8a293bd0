//! Source rectangle of each icon, in glyph space

use crate::font_source::{FontBuilder, FontMetrics, GlyphId};
use crate::geometry::rect_from_corner;
use kurbo::Rect;
use tracing::debug;

/// Remap a declared SVG rectangle (origin top-left, +y down) into glyph
/// space (origin on the baseline, +y up). The SVG origin sits at the ascent.
pub fn svg_to_glyph_space(declared: Rect, metrics: &FontMetrics) -> Rect {
    let height = declared.height();
    let min_y = metrics.ascent - (declared.y0 + height);
    rect_from_corner(declared.x0, min_y, declared.width(), height)
}

/// The viewbox used for scaling and alignment.
///
/// A usable declared rectangle wins; otherwise the imported outline's
/// bounding box is used, which is already in glyph space. An empty outline
/// without a declared rectangle yields a zero rectangle at the origin.
pub fn resolve_viewbox<B: FontBuilder>(
    builder: &B,
    glyph: GlyphId,
    declared: Option<Rect>,
    metrics: &FontMetrics,
) -> Rect {
    match declared.filter(|rect| rect.area() > 0.0) {
        Some(declared) => {
            let viewbox = svg_to_glyph_space(declared, metrics);
            debug!("declared viewbox {:?} adjusted to {:?}", declared, viewbox);
            viewbox
        }
        None => {
            let bbox = builder.bounding_box(glyph).unwrap_or(Rect::ZERO);
            debug!("no usable viewbox, using outline bounds {:?}", bbox);
            bbox
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font_source::MemoryFont;
    use kurbo::BezPath;

    fn metrics() -> FontMetrics {
        FontMetrics::new(1000, Some(800), Some(200))
    }

    #[test]
    fn test_declared_viewbox_is_flipped_below_ascent() {
        let declared = Rect::new(0.0, 0.0, 24.0, 24.0);
        assert_eq!(
            svg_to_glyph_space(declared, &metrics()),
            Rect::new(0.0, 776.0, 24.0, 800.0)
        );
    }

    #[test]
    fn test_declared_offset_is_respected() {
        // min_y from the top shifts the box further down
        let declared = Rect::new(5.0, 10.0, 105.0, 60.0);
        assert_eq!(
            svg_to_glyph_space(declared, &metrics()),
            Rect::new(5.0, 740.0, 105.0, 790.0)
        );
    }

    #[test]
    fn test_missing_viewbox_falls_back_to_outline_bounds() {
        let mut font = MemoryFont::new();
        let mut path = BezPath::new();
        path.move_to((10.0, 20.0));
        path.line_to((110.0, 20.0));
        path.line_to((110.0, 70.0));
        path.close_path();
        font.register("icon.svg", vec![path]);

        let id = font.glyph(0xEA01, "icon");
        font.import_outline(id, std::path::Path::new("icon.svg")).unwrap();

        assert_eq!(
            resolve_viewbox(&font, id, None, &metrics()),
            Rect::new(10.0, 20.0, 110.0, 70.0)
        );
        // A degenerate declared box is treated as missing
        assert_eq!(
            resolve_viewbox(&font, id, Some(Rect::new(0.0, 0.0, 0.0, 10.0)), &metrics()),
            Rect::new(10.0, 20.0, 110.0, 70.0)
        );
    }

    #[test]
    fn test_empty_outline_without_viewbox_is_zero() {
        let mut font = MemoryFont::new();
        let id = font.glyph(0xEA01, "blank");
        assert_eq!(resolve_viewbox(&font, id, None, &metrics()), Rect::ZERO);
    }
}
