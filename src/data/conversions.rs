//! UFO format conversion utilities
//!
//! This module contains conversion logic between the in-memory glyph table
//! (kurbo paths) and the norad UFO format. This is pure data transformation
//! logic - serialization and deserialization between equivalent
//! representations.

use super::features::features_fea;
use crate::font_source::{GlyphRecord, GlyphTable};
use kurbo::{BezPath, PathEl, Point, Rect, Shape};
use norad::{Contour, ContourPoint, Font, PointType};
use tracing::warn;

/// Name of the fallback glyph every font starts with
pub const NOTDEF: &str = ".notdef";

impl GlyphRecord {
    /// Convert to a norad glyph
    pub fn to_norad_glyph(&self) -> norad::Glyph {
        let mut glyph = norad::Glyph::new(&self.name);
        glyph.width = self.advance;

        match char::from_u32(self.codepoint) {
            Some(codepoint) => {
                glyph.codepoints.insert(codepoint);
            }
            None => warn!(
                "{}: {:#X} is not a Unicode scalar value, glyph stored unencoded",
                self.name, self.codepoint
            ),
        }

        glyph.contours = self.outline.iter().flat_map(bezpath_to_contours).collect();
        glyph
    }
}

impl GlyphTable {
    /// Convert to a complete norad font, including the ligature features
    pub fn to_norad_font(&self, family_name: &str) -> Font {
        let mut font = Font::new();
        font.font_info = self.metrics.to_norad_font_info(family_name);

        let layer = font.default_layer_mut();
        if !self.iter().any(|(_, record)| record.name == NOTDEF) {
            let mut notdef = norad::Glyph::new(NOTDEF);
            notdef.width = (self.metrics.units_per_em / 2.0).round();
            layer.insert_glyph(notdef);
        }
        for (_, record) in self.iter() {
            layer.insert_glyph(record.to_norad_glyph());
        }

        font.features = features_fea(self);
        font
    }
}

/// Split a kurbo path into UFO contours.
///
/// Closed subpaths drop their move point: the start is reached by the last
/// segment, so it is either already the final on-curve point or is added
/// back as a line point.
pub fn bezpath_to_contours(path: &BezPath) -> Vec<Contour> {
    let mut contours = Vec::new();
    let mut points: Vec<ContourPoint> = Vec::new();

    for element in path.elements() {
        match *element {
            PathEl::MoveTo(p) => {
                finish_open(&mut points, &mut contours);
                points.push(contour_point(p, PointType::Move));
            }
            PathEl::LineTo(p) => points.push(contour_point(p, PointType::Line)),
            PathEl::QuadTo(c, p) => {
                points.push(contour_point(c, PointType::OffCurve));
                points.push(contour_point(p, PointType::QCurve));
            }
            PathEl::CurveTo(c1, c2, p) => {
                points.push(contour_point(c1, PointType::OffCurve));
                points.push(contour_point(c2, PointType::OffCurve));
                points.push(contour_point(p, PointType::Curve));
            }
            PathEl::ClosePath => finish_closed(&mut points, &mut contours),
        }
    }
    finish_open(&mut points, &mut contours);

    contours
}

fn finish_open(points: &mut Vec<ContourPoint>, contours: &mut Vec<Contour>) {
    // A lone move point draws nothing
    if points.len() > 1 {
        contours.push(Contour::new(std::mem::take(points), None));
    }
    points.clear();
}

fn finish_closed(points: &mut Vec<ContourPoint>, contours: &mut Vec<Contour>) {
    if points.is_empty() {
        return;
    }

    let start = points.remove(0);
    let ends_at_start = points.last().is_some_and(|last| {
        !matches!(last.typ, PointType::OffCurve) && last.x == start.x && last.y == start.y
    });
    if !ends_at_start {
        points.insert(0, ContourPoint::new(start.x, start.y, PointType::Line, false, None, None));
    }

    if points.len() > 1 {
        contours.push(Contour::new(std::mem::take(points), None));
    }
    points.clear();
}

fn contour_point(p: Point, typ: PointType) -> ContourPoint {
    ContourPoint::new(p.x, p.y, typ, false, None, None)
}

/// Bounding box of a norad glyph's contours
pub fn norad_glyph_bounds(glyph: &norad::Glyph) -> Option<Rect> {
    glyph
        .contours
        .iter()
        .filter_map(|contour| match contour.to_kurbo() {
            Ok(path) => Some(path.bounding_box()),
            Err(e) => {
                warn!("{}: skipping unreadable contour: {e}", glyph.name());
                None
            }
        })
        .reduce(|acc, bbox| acc.union(bbox))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font_source::FontMetrics;

    fn triangle() -> BezPath {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((100.0, 0.0));
        path.line_to((50.0, 80.0));
        path.close_path();
        path
    }

    #[test]
    fn test_closed_path_becomes_closed_contour() {
        let contours = bezpath_to_contours(&triangle());
        assert_eq!(contours.len(), 1);

        let points = &contours[0].points;
        assert_eq!(points.len(), 3);
        assert!(points.iter().all(|p| matches!(p.typ, PointType::Line)));
        assert_eq!((points[0].x, points[0].y), (0.0, 0.0));
    }

    #[test]
    fn test_explicitly_closed_curve_keeps_single_start() {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.curve_to((10.0, 20.0), (30.0, 20.0), (40.0, 0.0));
        path.line_to((0.0, 0.0));
        path.close_path();

        let contours = bezpath_to_contours(&path);
        let points = &contours[0].points;
        // off, off, curve, line (the line point is the start)
        assert_eq!(points.len(), 4);
        assert!(matches!(points[0].typ, PointType::OffCurve));
        assert!(matches!(points[3].typ, PointType::Line));
    }

    #[test]
    fn test_open_path_keeps_move() {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.quad_to((5.0, 10.0), (10.0, 0.0));
        path.move_to((20.0, 20.0));

        let contours = bezpath_to_contours(&path);
        assert_eq!(contours.len(), 1);
        assert!(matches!(contours[0].points[0].typ, PointType::Move));
        assert!(matches!(contours[0].points[2].typ, PointType::QCurve));
    }

    #[test]
    fn test_table_to_norad_font() {
        let mut table = GlyphTable::new(FontMetrics::new(1000, Some(800), Some(200)));
        let id = table.glyph(0xEA01, "back");
        table.append_outline(id, vec![triangle()]);
        table.set_advance(id, 640);

        let font = table.to_norad_font("Icons");
        let layer = font.default_layer();
        let glyph = layer.get_glyph("back").unwrap();

        assert_eq!(glyph.width, 640.0);
        assert!(glyph.codepoints.iter().any(|c| c == '\u{EA01}'));
        assert_eq!(glyph.contours.len(), 1);
        assert!(layer.get_glyph(NOTDEF).is_some());
        assert_eq!(font.font_info.family_name.as_deref(), Some("Icons"));
        assert_eq!(
            norad_glyph_bounds(glyph),
            Some(Rect::new(0.0, 0.0, 100.0, 80.0))
        );
    }
}
