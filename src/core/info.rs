//! The `info` command: list glyphs of a generated UFO

use crate::core::cli::InfoArgs;
use crate::core::config::params::parse_codepoint;
use crate::core::errors::ConfigError;
use crate::data::conversions::norad_glyph_bounds;
use crate::data::ufo::load_ufo_from_path;
use anyhow::{Context, Result};
use norad::Font;

/// Which glyphs to print. With no criteria every glyph matches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlyphFilter {
    pub charcodes: Option<Vec<u32>>,
    pub start: Option<u32>,
    pub end: Option<u32>,
    pub name: Option<String>,
}

impl GlyphFilter {
    pub fn from_args(args: &InfoArgs) -> Result<Self, ConfigError> {
        let non_empty = |value: &Option<String>| value.clone().filter(|text| !text.trim().is_empty());

        let charcodes = non_empty(&args.charcodes)
            .map(|list| {
                list.split(',')
                    .map(str::trim)
                    .filter(|code| !code.is_empty())
                    .map(|code| parse_codepoint("--charcodes", code))
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?;

        Ok(Self {
            charcodes,
            start: non_empty(&args.start)
                .map(|text| parse_codepoint("--start", &text))
                .transpose()?,
            end: non_empty(&args.end)
                .map(|text| parse_codepoint("--end", &text))
                .transpose()?,
            name: non_empty(&args.name),
        })
    }

    fn matches_all(&self) -> bool {
        self.charcodes.is_none() && self.start.is_none() && self.end.is_none() && self.name.is_none()
    }

    pub fn matches(&self, name: &str, codepoint: Option<u32>) -> bool {
        if self.matches_all() || self.name.as_deref() == Some(name) {
            return true;
        }
        let Some(code) = codepoint else {
            return false;
        };

        if self.charcodes.as_ref().is_some_and(|codes| codes.contains(&code)) {
            return true;
        }
        match (self.start, self.end) {
            (Some(start), end) => code >= start && end.is_none_or(|end| code <= end),
            (None, Some(end)) => code <= end,
            (None, None) => false,
        }
    }
}

/// One printed line per matching glyph, after a metrics header
pub fn describe_font(font: &Font, filter: &GlyphFilter) -> Vec<String> {
    let info = &font.font_info;
    let mut lines = vec![format!(
        "Font em: {}, ascent={}, descent={}",
        info.units_per_em.map_or("N/A".to_string(), |v| v.to_string()),
        info.ascender.map_or("N/A".to_string(), |v| v.to_string()),
        info.descender.map_or("N/A".to_string(), |v| v.to_string()),
    )];

    let mut glyphs: Vec<_> = font.default_layer().iter().collect();
    glyphs.sort_by_key(|glyph| (glyph.codepoints.iter().next().map(u32::from), glyph.name().to_string()));

    for glyph in glyphs {
        let codepoint = glyph.codepoints.iter().next().map(u32::from);
        if !filter.matches(glyph.name(), codepoint) {
            continue;
        }
        let code = codepoint.map_or("-".to_string(), |code| format!("{code:x} ({code})"));
        let bbox = norad_glyph_bounds(glyph).map_or("empty".to_string(), |bbox| {
            format!("({}, {}, {}, {})", bbox.x0, bbox.y0, bbox.x1, bbox.y1)
        });
        lines.push(format!(
            "Char code: {code}, name: {}, advance: {}, bbox: {bbox}",
            glyph.name(),
            glyph.width
        ));
    }

    lines
}

/// Run the `info` command
pub fn run_info(args: &InfoArgs) -> Result<()> {
    let filter = GlyphFilter::from_args(args)?;
    let font = load_ufo_from_path(&args.file)
        .with_context(|| format!("failed to load UFO {}", args.file.display()))?;

    for line in describe_font(&font, &filter) {
        println!("{line}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font_source::{FontMetrics, GlyphTable};
    use kurbo::BezPath;
    use std::path::PathBuf;

    fn args() -> InfoArgs {
        InfoArgs {
            file: PathBuf::from("icons.ufo"),
            charcodes: None,
            start: None,
            end: None,
            name: None,
        }
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = GlyphFilter::from_args(&args()).unwrap();
        assert!(filter.matches(".notdef", None));
        assert!(filter.matches("back", Some(0xEA01)));
    }

    #[test]
    fn test_charcodes_and_range() {
        let filter = GlyphFilter::from_args(&InfoArgs {
            charcodes: Some("ea01, ea05,".to_string()),
            start: Some("EA10".to_string()),
            end: Some("EA12".to_string()),
            ..args()
        })
        .unwrap();

        assert!(filter.matches("a", Some(0xEA01)));
        assert!(filter.matches("b", Some(0xEA05)));
        assert!(filter.matches("c", Some(0xEA11)));
        assert!(!filter.matches("d", Some(0xEA02)));
        assert!(!filter.matches("e", Some(0xEA13)));
        assert!(!filter.matches("f", None));
    }

    #[test]
    fn test_end_only_and_name() {
        let filter = GlyphFilter::from_args(&InfoArgs {
            end: Some("0x7A".to_string()),
            name: Some("home".to_string()),
            ..args()
        })
        .unwrap();

        assert!(filter.matches("uni0061", Some(0x61)));
        assert!(!filter.matches("back", Some(0xEA01)));
        assert!(filter.matches("home", Some(0xEA02)));
    }

    #[test]
    fn test_bad_charcode_is_rejected() {
        let result = GlyphFilter::from_args(&InfoArgs {
            charcodes: Some("ea01,zz".to_string()),
            ..args()
        });
        assert!(matches!(result, Err(ConfigError::InvalidCodepoint { .. })));
    }

    #[test]
    fn test_describe_lists_matching_glyphs() {
        let mut table = GlyphTable::new(FontMetrics::default());
        let back = table.glyph(0xEA01, "back");
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((500.0, 0.0));
        path.line_to((500.0, 400.0));
        path.close_path();
        table.append_outline(back, vec![path]);
        table.set_advance(back, 600);
        table.glyph(0xEA02, "forward");
        let font = table.to_norad_font("Icons");

        let filter = GlyphFilter {
            name: Some("back".to_string()),
            ..Default::default()
        };
        let lines = describe_font(&font, &filter);

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Font em: 1000"));
        assert_eq!(
            lines[1],
            "Char code: ea01 (59905), name: back, advance: 600, bbox: (0, 0, 500, 400)"
        );
    }
}
