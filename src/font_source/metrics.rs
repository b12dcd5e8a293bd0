//! Font metrics
//!
//! Vertical metrics shared by every glyph in a generated font. Descent is
//! stored as a positive distance below the baseline.

/// Font-wide metrics, fixed once the font has been created
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontMetrics {
    pub units_per_em: f64,
    pub ascent: f64,
    pub descent: f64,
}

impl FontMetrics {
    pub fn new(units_per_em: u32, ascent: Option<u32>, descent: Option<u32>) -> Self {
        let em = f64::from(units_per_em);
        // Split the em 80/20 above and below the baseline unless told otherwise
        let default_ascent = (em * 0.8).round();
        let ascent = ascent.map(f64::from).unwrap_or(default_ascent);
        let descent = descent.map(f64::from).unwrap_or((em - ascent).max(0.0));

        Self {
            units_per_em: em,
            ascent,
            descent,
        }
    }

    /// Convert into norad font info fields
    pub fn to_norad_font_info(&self, family_name: &str) -> norad::FontInfo {
        let mut info = norad::FontInfo::default();

        if !family_name.is_empty() {
            info.family_name = Some(family_name.to_string());
        }
        info.style_name = Some("Regular".to_string());

        if let Some(units_per_em) =
            norad::fontinfo::NonNegativeIntegerOrFloat::new(self.units_per_em)
        {
            info.units_per_em = Some(units_per_em);
        }
        info.ascender = Some(self.ascent);
        info.descender = Some(-self.descent);
        info
    }
}

impl Default for FontMetrics {
    fn default() -> Self {
        Self::new(1000, None, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_split() {
        let metrics = FontMetrics::default();
        assert_eq!(metrics.units_per_em, 1000.0);
        assert_eq!(metrics.ascent, 800.0);
        assert_eq!(metrics.descent, 200.0);
    }

    #[test]
    fn test_descent_follows_explicit_ascent() {
        let metrics = FontMetrics::new(2048, Some(1900), None);
        assert_eq!(metrics.ascent, 1900.0);
        assert_eq!(metrics.descent, 148.0);
    }

    #[test]
    fn test_norad_descender_is_negative() {
        let info = FontMetrics::new(1000, Some(750), Some(250)).to_norad_font_info("Icons");
        assert_eq!(info.family_name.as_deref(), Some("Icons"));
        assert_eq!(info.ascender, Some(750.0));
        assert_eq!(info.descender, Some(-250.0));
    }
}
