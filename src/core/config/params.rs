//! Typed layout parameters
//!
//! Every policy that arrives as text (CLI flag or override table entry) is
//! parsed into one of these types exactly once. Resolvers never see text.

use crate::core::errors::ConfigError;
use std::fmt;
use std::str::FromStr;

/// Highest valid Unicode scalar value
pub const MAX_CODEPOINT: u32 = 0x10FFFF;

/// How an icon's viewbox is scaled into font units
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScalePolicy {
    /// Fit the larger viewbox side into the em
    InEm,
    /// Fit the smaller viewbox side into the em
    OverEm,
    /// Fit the larger viewbox side into the ascent
    InAscent,
    /// Fit the smaller viewbox side into the ascent
    OverAscent,
    /// Leave the outline at its imported size
    Keep,
    /// Explicit multiplier
    Factor(f64),
}

impl FromStr for ScalePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "in_em" => Ok(Self::InEm),
            "over_em" => Ok(Self::OverEm),
            "in_ascent" => Ok(Self::InAscent),
            "over_ascent" => Ok(Self::OverAscent),
            "no" | "" => Ok(Self::Keep),
            other => other
                .parse::<f64>()
                .ok()
                .filter(|factor| factor.is_finite())
                .map(Self::Factor)
                .ok_or_else(|| ConfigError::invalid_number("scale", other)),
        }
    }
}

/// Horizontal placement of the viewbox inside the advance width
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HAlign {
    Center,
    Left,
    Right,
    /// Center the viewbox around this x coordinate
    At(f64),
    /// No horizontal placement besides `xmove`
    Keep,
}

impl FromStr for HAlign {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "center" => Ok(Self::Center),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            "" => Ok(Self::Keep),
            other => parse_finite(other)
                .map(Self::At)
                .ok_or_else(|| ConfigError::unknown_policy("halign", other)),
        }
    }
}

/// Vertical placement of the viewbox relative to the font metrics
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VAlign {
    /// Center between the descent line and the ascent line
    AscDescCenter,
    /// Center between the baseline and the ascent line
    AscentCenter,
    /// Bottom of the viewbox on the baseline
    Baseline,
    /// Bottom of the viewbox on the descent line
    Descent,
    /// Center the viewbox around this y coordinate
    At(f64),
    /// No vertical placement besides `ymove`
    Keep,
}

impl FromStr for VAlign {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "ascdesc_center" => Ok(Self::AscDescCenter),
            "ascent_center" => Ok(Self::AscentCenter),
            "baseline" => Ok(Self::Baseline),
            "descent" => Ok(Self::Descent),
            "" => Ok(Self::Keep),
            other => parse_finite(other)
                .map(Self::At)
                .ok_or_else(|| ConfigError::unknown_policy("valign", other)),
        }
    }
}

/// A lower or upper bound on the advance width
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidthBound {
    Auto,
    Em,
    Units(i64),
}

impl WidthBound {
    /// Parse a bound for the named parameter (`minwidth` or `maxwidth`)
    pub fn parse(field: &str, text: &str) -> Result<Self, ConfigError> {
        match text.trim() {
            "auto" | "" => Ok(Self::Auto),
            "em" => Ok(Self::Em),
            other => other
                .parse::<i64>()
                .map(Self::Units)
                .map_err(|_| ConfigError::invalid_number(field, other)),
        }
    }

    /// The bound in font units, or `None` when unbounded
    pub fn resolve(self, units_per_em: f64) -> Option<f64> {
        match self {
            Self::Auto => None,
            Self::Em => Some(units_per_em),
            Self::Units(units) => Some(units as f64),
        }
    }
}

impl fmt::Display for WidthBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Em => write!(f, "em"),
            Self::Units(units) => write!(f, "{units}"),
        }
    }
}

/// Which ways of referencing a glyph the generated assets support
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Mode {
    /// One CSS class per glyph, using its code point
    #[default]
    Class,
    /// Glyph names typed as text, resolved by ligature substitution
    Ligature,
    /// Both of the above
    Both,
}

impl Mode {
    pub fn uses_classes(self) -> bool {
        matches!(self, Self::Class | Self::Both)
    }

    pub fn uses_ligatures(self) -> bool {
        matches!(self, Self::Ligature | Self::Both)
    }
}

/// The fully resolved parameters for one glyph
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSet {
    pub scale: ScalePolicy,
    pub halign: HAlign,
    pub valign: VAlign,
    pub xmove: f64,
    pub ymove: f64,
    pub minwidth: WidthBound,
    pub maxwidth: WidthBound,
    pub code: Option<u32>,
}

impl Default for ParamSet {
    fn default() -> Self {
        Self {
            scale: ScalePolicy::InEm,
            halign: HAlign::Center,
            valign: VAlign::AscDescCenter,
            xmove: 0.0,
            ymove: 0.0,
            minwidth: WidthBound::Auto,
            maxwidth: WidthBound::Auto,
            code: None,
        }
    }
}

impl ParamSet {
    /// Overlay the set fields of a per-glyph override onto these defaults
    pub fn merged(&self, overrides: &PartialParams) -> ParamSet {
        ParamSet {
            scale: overrides.scale.unwrap_or(self.scale),
            halign: overrides.halign.unwrap_or(self.halign),
            valign: overrides.valign.unwrap_or(self.valign),
            xmove: overrides.xmove.unwrap_or(self.xmove),
            ymove: overrides.ymove.unwrap_or(self.ymove),
            minwidth: overrides.minwidth.unwrap_or(self.minwidth),
            maxwidth: overrides.maxwidth.unwrap_or(self.maxwidth),
            code: overrides.code.or(self.code),
        }
    }
}

/// Per-glyph overrides; `None` means "use the pipeline default"
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialParams {
    pub code: Option<u32>,
    pub scale: Option<ScalePolicy>,
    pub halign: Option<HAlign>,
    pub valign: Option<VAlign>,
    pub xmove: Option<f64>,
    pub ymove: Option<f64>,
    pub minwidth: Option<WidthBound>,
    pub maxwidth: Option<WidthBound>,
}

/// Parse a hexadecimal code point such as `EA01`, `0xEA01` or `U+EA01`
pub fn parse_codepoint(context: &str, text: &str) -> Result<u32, ConfigError> {
    let trimmed = text.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .or_else(|| trimmed.strip_prefix("U+"))
        .or_else(|| trimmed.strip_prefix("u+"))
        .unwrap_or(trimmed);

    u32::from_str_radix(digits, 16)
        .ok()
        .filter(|codepoint| *codepoint <= MAX_CODEPOINT)
        .ok_or_else(|| ConfigError::InvalidCodepoint {
            context: context.to_string(),
            value: text.to_string(),
        })
}

/// Parse a finite float offset such as `xmove`
pub fn parse_offset(field: &str, text: &str) -> Result<f64, ConfigError> {
    parse_finite(text.trim()).ok_or_else(|| ConfigError::invalid_number(field, text))
}

fn parse_finite(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|value| value.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_policy_keywords() {
        assert_eq!("in_em".parse::<ScalePolicy>().unwrap(), ScalePolicy::InEm);
        assert_eq!("over_ascent".parse::<ScalePolicy>().unwrap(), ScalePolicy::OverAscent);
        assert_eq!("no".parse::<ScalePolicy>().unwrap(), ScalePolicy::Keep);
        assert_eq!("".parse::<ScalePolicy>().unwrap(), ScalePolicy::Keep);
        assert_eq!("2.5".parse::<ScalePolicy>().unwrap(), ScalePolicy::Factor(2.5));
    }

    #[test]
    fn test_scale_policy_rejects_garbage() {
        let err = "huge".parse::<ScalePolicy>().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidNumber { ref field, .. } if field == "scale"));
    }

    #[test]
    fn test_alignment_keywords_and_numbers() {
        assert_eq!("left".parse::<HAlign>().unwrap(), HAlign::Left);
        assert_eq!("300".parse::<HAlign>().unwrap(), HAlign::At(300.0));
        assert_eq!("descent".parse::<VAlign>().unwrap(), VAlign::Descent);
        assert_eq!("-12.5".parse::<VAlign>().unwrap(), VAlign::At(-12.5));
        assert_eq!("".parse::<VAlign>().unwrap(), VAlign::Keep);
    }

    #[test]
    fn test_unknown_alignment_is_config_error() {
        assert!(matches!(
            "middle".parse::<HAlign>(),
            Err(ConfigError::UnknownPolicy { .. })
        ));
        assert!(matches!(
            "top".parse::<VAlign>(),
            Err(ConfigError::UnknownPolicy { .. })
        ));
    }

    #[test]
    fn test_width_bounds() {
        assert_eq!(WidthBound::parse("minwidth", "auto").unwrap(), WidthBound::Auto);
        assert_eq!(WidthBound::parse("minwidth", "em").unwrap(), WidthBound::Em);
        assert_eq!(WidthBound::parse("maxwidth", "640").unwrap(), WidthBound::Units(640));
        assert!(WidthBound::parse("maxwidth", "wide").is_err());
        assert_eq!(WidthBound::Em.resolve(1000.0), Some(1000.0));
        assert_eq!(WidthBound::Auto.resolve(1000.0), None);
    }

    #[test]
    fn test_codepoint_prefixes() {
        assert_eq!(parse_codepoint("start", "EA01").unwrap(), 0xEA01);
        assert_eq!(parse_codepoint("start", "0xea01").unwrap(), 0xEA01);
        assert_eq!(parse_codepoint("start", "U+0041").unwrap(), 0x41);
        assert!(parse_codepoint("start", "").is_err());
        assert!(parse_codepoint("start", "-1").is_err());
        assert!(parse_codepoint("start", "110000").is_err());
        assert!(parse_codepoint("start", "zz").is_err());
    }

    #[test]
    fn test_merge_prefers_overrides() {
        let defaults = ParamSet::default();
        let overrides = PartialParams {
            halign: Some(HAlign::Left),
            minwidth: Some(WidthBound::Em),
            code: Some(0xF000),
            ..Default::default()
        };

        let merged = defaults.merged(&overrides);
        assert_eq!(merged.halign, HAlign::Left);
        assert_eq!(merged.minwidth, WidthBound::Em);
        assert_eq!(merged.code, Some(0xF000));
        assert_eq!(merged.scale, defaults.scale);
        assert_eq!(merged.valign, defaults.valign);
    }
}
