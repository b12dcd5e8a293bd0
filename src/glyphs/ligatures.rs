//! Ligature substitution table construction
//!
//! Runs after every icon glyph is final. Typing an icon's name then renders
//! the icon: each name character maps to a glyph (a zero-width filler when
//! nothing else lives at that character's code point) and one ligature rule
//! replaces the character sequence with the icon glyph.

use super::GlyphSpec;
use crate::font_source::{FontBuilder, GlyphId};
use std::collections::BTreeSet;
use tracing::debug;

/// OpenType feature the substitution table is registered under
pub const LIGATURE_FEATURE: &str = "liga";

/// Characters that get filler glyphs when used in a glyph name
pub fn is_ligature_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-'
}

/// Glyph name of the filler for `c`
pub fn filler_name(c: char) -> String {
    format!("uni{:04X}", u32::from(c))
}

/// One substitution: `components` in order are replaced by `glyph`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LigatureRule {
    pub name: String,
    pub glyph: GlyphId,
    pub components: Vec<GlyphId>,
}

/// What the ligature pass added to the font
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LigaturePlan {
    /// Characters that received a filler glyph
    pub fillers: BTreeSet<char>,
    pub rules: Vec<LigatureRule>,
    /// Glyph names with a character that has no glyph
    pub skipped: Vec<String>,
}

/// Characters of all glyph names that may need filler glyphs
pub fn ligature_chars<'a>(names: impl IntoIterator<Item = &'a str>) -> BTreeSet<char> {
    names
        .into_iter()
        .flat_map(str::chars)
        .filter(|c| is_ligature_char(*c))
        .collect()
}

/// Create filler glyphs and register one ligature rule per icon glyph
pub fn build_ligatures<B: FontBuilder>(builder: &mut B, glyphs: &[GlyphSpec]) -> LigaturePlan {
    let mut plan = LigaturePlan::default();

    for c in ligature_chars(glyphs.iter().map(|spec| spec.name.as_str())) {
        let codepoint = u32::from(c);
        if builder.glyph_at(codepoint).is_some() {
            continue;
        }
        let filler = builder.glyph(codepoint, &filler_name(c));
        builder.set_advance(filler, 0);
        plan.fillers.insert(c);
    }
    debug!("created {} filler glyphs", plan.fillers.len());

    let table = builder.add_substitution_table(LIGATURE_FEATURE);

    for spec in glyphs {
        let components: Option<Vec<GlyphId>> = spec
            .name
            .chars()
            .map(|c| builder.glyph_at(u32::from(c)))
            .collect();

        match components {
            Some(components) if !components.is_empty() => {
                builder.add_ligature(table, spec.glyph, components.clone());
                plan.rules.push(LigatureRule {
                    name: spec.name.clone(),
                    glyph: spec.glyph,
                    components,
                });
            }
            _ => {
                debug!("{}: no ligature, a character has no glyph", spec.name);
                plan.skipped.push(spec.name.clone());
            }
        }
    }

    plan
}
