//! OpenType feature source for ligature substitution tables
//!
//! Each substitution table becomes lookups inside its feature block. Rules
//! with a single component are single substitutions and cannot share a
//! lookup with ligature rules, so they get a lookup of their own.

use crate::font_source::{GlyphId, GlyphTable};
use std::collections::BTreeMap;
use std::fmt::Write as _;

/// Build `features.fea` text for every substitution table in `table`
pub fn features_fea(table: &GlyphTable) -> String {
    let tables = table.substitution_tables();
    if tables.iter().all(|sub| sub.rules.is_empty()) {
        return String::new();
    }

    let name = |id: GlyphId| {
        table
            .get(id)
            .map(|record| format!("\\{}", record.name))
            .unwrap_or_default()
    };

    // Lookups grouped by feature tag, keeping table order inside each feature
    let mut features: BTreeMap<&str, Vec<String>> = BTreeMap::new();
    for (index, sub) in tables.iter().enumerate() {
        let (singles, ligatures): (Vec<_>, Vec<_>) = sub
            .rules
            .iter()
            .partition(|(_, components)| components.len() == 1);

        let lookups = features.entry(sub.feature.as_str()).or_default();
        for (suffix, rules) in [("single", singles), ("ligature", ligatures)] {
            if rules.is_empty() {
                continue;
            }
            let lookup_name = format!("icon_{suffix}_{index}");
            let mut lookup = format!("    lookup {lookup_name} {{\n");
            for (glyph, components) in rules {
                let sequence: Vec<String> = components.iter().map(|id| name(*id)).collect();
                let _ = writeln!(
                    lookup,
                    "        sub {} by {};",
                    sequence.join(" "),
                    name(*glyph)
                );
            }
            let _ = writeln!(lookup, "    }} {lookup_name};");
            lookups.push(lookup);
        }
    }

    let mut fea = String::from("languagesystem DFLT dflt;\n");
    for (tag, lookups) in features {
        let _ = write!(fea, "\nfeature {tag} {{\n{}}} {tag};\n", lookups.concat());
    }
    fea
}
