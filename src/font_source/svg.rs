//! SVG outline import
//!
//! Reads the filled shapes of an SVG document into kurbo paths and moves
//! them into glyph space: the SVG origin lands on `(0, ascent)` and the
//! y axis is flipped so that +y points up. No scaling is applied.

use crate::core::errors::ImportError;
use crate::geometry::rect_from_corner;
use kurbo::{Affine, BezPath, Circle, Ellipse, Point, Rect, RoundedRect, Shape};
use roxmltree::{Document, Node};
use std::path::Path;
use tracing::debug;

/// Flattening tolerance used when converting circles and ellipses to paths
const SHAPE_TOLERANCE: f64 = 0.1;

/// Containers whose children are never painted directly
const NON_RENDERED: &[&str] = &["defs", "clipPath", "mask", "symbol", "pattern", "marker"];

/// Read an SVG file and return its outlines in glyph coordinates
pub fn import_svg_outline(path: &Path, ascent: f64) -> Result<Vec<BezPath>, ImportError> {
    let text = std::fs::read_to_string(path).map_err(|source| ImportError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_svg_outline(&text, ascent).map_err(|message| ImportError::Parse {
        path: path.to_path_buf(),
        message,
    })
}

/// Parse SVG text into outlines in glyph coordinates
pub fn parse_svg_outline(text: &str, ascent: f64) -> Result<Vec<BezPath>, String> {
    let doc = Document::parse(text).map_err(|e| e.to_string())?;
    let to_glyph_space = Affine::new([1.0, 0.0, 0.0, -1.0, 0.0, ascent]);

    let mut paths = Vec::new();
    for node in doc.root_element().descendants().filter(Node::is_element) {
        if node
            .ancestors()
            .any(|ancestor| NON_RENDERED.contains(&ancestor.tag_name().name()))
        {
            continue;
        }

        let Some(mut path) = element_path(node)? else {
            continue;
        };

        path.apply_affine(to_glyph_space * accumulated_transform(node)?);
        paths.push(path);
    }

    debug!("Imported {} SVG paths", paths.len());
    Ok(paths)
}

/// The declared drawing area of an SVG document, in SVG coordinates.
///
/// Uses `viewBox` when it has four numbers, otherwise `width`/`height` with
/// the origin at zero. Returns `None` when neither is usable.
pub fn declared_viewbox(text: &str) -> Option<Rect> {
    let doc = Document::parse(text).ok()?;
    let root = doc.root_element();

    if let Some(view_box) = root.attribute("viewBox") {
        let parts = parse_numbers(view_box).ok()?;
        if let [x, y, width, height] = parts[..] {
            return Some(rect_from_corner(x, y, width, height));
        }
    }

    let width = root.attribute("width").and_then(parse_length)?;
    let height = root.attribute("height").and_then(parse_length)?;
    Some(rect_from_corner(0.0, 0.0, width, height))
}

fn element_path(node: Node<'_, '_>) -> Result<Option<BezPath>, String> {
    let number = |name: &str| node.attribute(name).and_then(parse_length).unwrap_or(0.0);

    let path = match node.tag_name().name() {
        "path" => {
            let Some(data) = node.attribute("d") else {
                return Ok(None);
            };
            BezPath::from_svg(data).map_err(|e| format!("invalid path data: {e}"))?
        }
        "rect" => {
            let (x, y) = (number("x"), number("y"));
            let (width, height) = (number("width"), number("height"));
            if width <= 0.0 || height <= 0.0 {
                return Ok(None);
            }
            let radius = number("rx").max(number("ry"));
            if radius > 0.0 {
                RoundedRect::new(x, y, x + width, y + height, radius).to_path(SHAPE_TOLERANCE)
            } else {
                Rect::new(x, y, x + width, y + height).to_path(SHAPE_TOLERANCE)
            }
        }
        "circle" => {
            let radius = number("r");
            if radius <= 0.0 {
                return Ok(None);
            }
            Circle::new(Point::new(number("cx"), number("cy")), radius).to_path(SHAPE_TOLERANCE)
        }
        "ellipse" => {
            let (rx, ry) = (number("rx"), number("ry"));
            if rx <= 0.0 || ry <= 0.0 {
                return Ok(None);
            }
            Ellipse::new(Point::new(number("cx"), number("cy")), (rx, ry), 0.0)
                .to_path(SHAPE_TOLERANCE)
        }
        "polygon" | "polyline" => {
            let coords = parse_numbers(node.attribute("points").unwrap_or(""))?;
            let mut points = coords.chunks_exact(2).map(|pair| Point::new(pair[0], pair[1]));
            let Some(first) = points.next() else {
                return Ok(None);
            };
            let mut path = BezPath::new();
            path.move_to(first);
            for point in points {
                path.line_to(point);
            }
            path.close_path();
            path
        }
        _ => return Ok(None),
    };

    Ok(Some(path))
}

/// Product of the `transform` attributes from the root down to `node`
fn accumulated_transform(node: Node<'_, '_>) -> Result<Affine, String> {
    let chain: Vec<Node<'_, '_>> = node.ancestors().filter(Node::is_element).collect();

    chain.iter().rev().try_fold(Affine::IDENTITY, |acc, element| {
        match element.attribute("transform") {
            Some(transform) => Ok(acc * parse_transform(transform)?),
            None => Ok(acc),
        }
    })
}

/// Parse an SVG transform list such as `translate(10 20) scale(2)`
fn parse_transform(text: &str) -> Result<Affine, String> {
    let mut result = Affine::IDENTITY;
    let mut rest = text.trim();

    while !rest.is_empty() {
        let open = rest
            .find('(')
            .ok_or_else(|| format!("malformed transform '{text}'"))?;
        let close = rest[open..]
            .find(')')
            .map(|offset| open + offset)
            .ok_or_else(|| format!("malformed transform '{text}'"))?;
        let name = rest[..open].trim().trim_start_matches(',').trim();
        let args = parse_numbers(&rest[open + 1..close])?;

        let step = match (name, args.as_slice()) {
            ("matrix", [a, b, c, d, e, f]) => Affine::new([*a, *b, *c, *d, *e, *f]),
            ("translate", [x]) => Affine::translate((*x, 0.0)),
            ("translate", [x, y]) => Affine::translate((*x, *y)),
            ("scale", [s]) => Affine::scale(*s),
            ("scale", [sx, sy]) => Affine::scale_non_uniform(*sx, *sy),
            ("rotate", [angle]) => Affine::rotate(angle.to_radians()),
            ("rotate", [angle, cx, cy]) => {
                Affine::rotate_about(angle.to_radians(), Point::new(*cx, *cy))
            }
            ("skewX", [angle]) => Affine::skew(angle.to_radians().tan(), 0.0),
            ("skewY", [angle]) => Affine::skew(0.0, angle.to_radians().tan()),
            _ => return Err(format!("unsupported transform '{name}' in '{text}'")),
        };

        result *= step;
        rest = rest[close + 1..].trim_start();
    }

    Ok(result)
}

fn parse_numbers(text: &str) -> Result<Vec<f64>, String> {
    text.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<f64>()
                .map_err(|_| format!("'{part}' is not a number"))
        })
        .collect()
}

fn parse_length(text: &str) -> Option<f64> {
    text.trim()
        .trim_end_matches("px")
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bbox(paths: &[BezPath]) -> Rect {
        paths
            .iter()
            .map(|path| path.bounding_box())
            .reduce(|a, b| a.union(b))
            .unwrap()
    }

    #[test]
    fn test_viewbox_attribute() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 16"></svg>"#;
        assert_eq!(declared_viewbox(svg), Some(Rect::new(0.0, 0.0, 24.0, 16.0)));

        let svg = r#"<svg viewBox="2,4,10,20"></svg>"#;
        assert_eq!(declared_viewbox(svg), Some(Rect::new(2.0, 4.0, 12.0, 24.0)));
    }

    #[test]
    fn test_viewbox_falls_back_to_width_height() {
        let svg = r#"<svg width="32px" height="48"></svg>"#;
        assert_eq!(declared_viewbox(svg), Some(Rect::new(0.0, 0.0, 32.0, 48.0)));
    }

    #[test]
    fn test_viewbox_missing_or_malformed() {
        assert_eq!(declared_viewbox(r#"<svg></svg>"#), None);
        assert_eq!(declared_viewbox(r#"<svg viewBox="0 0 a b"></svg>"#), None);
        assert_eq!(declared_viewbox("not xml"), None);
    }

    #[test]
    fn test_path_is_flipped_into_glyph_space() {
        let svg = r#"<svg viewBox="0 0 100 100"><path d="M10 10 L90 10 L90 40 Z"/></svg>"#;
        let paths = parse_svg_outline(svg, 800.0).unwrap();
        assert_eq!(paths.len(), 1);
        assert_eq!(bbox(&paths), Rect::new(10.0, 760.0, 90.0, 790.0));
    }

    #[test]
    fn test_group_transforms_accumulate() {
        let svg = r#"<svg>
            <g transform="translate(100 0)">
                <rect x="0" y="0" width="10" height="10" transform="scale(2)"/>
            </g>
        </svg>"#;
        let paths = parse_svg_outline(svg, 0.0).unwrap();
        assert_eq!(bbox(&paths), Rect::new(100.0, -20.0, 120.0, 0.0));
    }

    #[test]
    fn test_defs_are_not_imported() {
        let svg = r#"<svg>
            <defs><circle cx="5" cy="5" r="5"/></defs>
            <polygon points="0,0 10,0 10,10"/>
        </svg>"#;
        let paths = parse_svg_outline(svg, 10.0).unwrap();
        assert_eq!(paths.len(), 1);
    }

    #[test]
    fn test_empty_document_has_no_paths() {
        let paths = parse_svg_outline(r#"<svg viewBox="0 0 10 10"></svg>"#, 800.0).unwrap();
        assert!(paths.is_empty());
    }

    #[test]
    fn test_bad_path_data_is_an_error() {
        let svg = r#"<svg><path d="M 10 10 Q"/></svg>"#;
        assert!(parse_svg_outline(svg, 800.0).is_err());
    }

    #[test]
    fn test_transform_parser() {
        let m = parse_transform("translate(10, 20) scale(2)").unwrap();
        assert_eq!(m * Point::new(1.0, 1.0), Point::new(12.0, 22.0));
        assert!(parse_transform("perspective(3)").is_err());
    }

    #[test]
    fn test_unbalanced_transform_is_an_error() {
        for transform in [")(", "scale)2(", "scale(2", "translate(1) )"] {
            assert!(parse_transform(transform).is_err(), "{transform}");
        }
        let svg = r#"<svg><rect width="10" height="10" transform=")("/></svg>"#;
        assert!(parse_svg_outline(svg, 800.0).is_err());
    }
}
