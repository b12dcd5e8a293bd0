//! What a pipeline run did

use kurbo::Affine;
use std::path::PathBuf;
use tracing::{info, warn};

/// One icon that became a glyph
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedGlyph {
    pub name: String,
    pub codepoint: u32,
    pub advance: i64,
    /// Scale and alignment, composed, as applied to the imported outline
    pub transform: Affine,
}

/// One icon whose outline could not be imported
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedIcon {
    pub name: String,
    pub path: PathBuf,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunReport {
    /// Icon glyphs in processing order
    pub glyphs: Vec<ProcessedGlyph>,
    pub skipped: Vec<SkippedIcon>,
    /// Glyphs that imported without a visible outline
    pub empty: Vec<String>,
    pub fillers: usize,
    pub ligature_rules: usize,
    /// Glyph names that got no ligature rule
    pub ligatures_skipped: Vec<String>,
    /// Files written, in write order
    pub outputs: Vec<PathBuf>,
}

impl RunReport {
    pub fn codepoint_of(&self, name: &str) -> Option<u32> {
        self.glyphs
            .iter()
            .find(|glyph| glyph.name == name)
            .map(|glyph| glyph.codepoint)
    }

    pub fn advance_of(&self, name: &str) -> Option<i64> {
        self.glyphs
            .iter()
            .find(|glyph| glyph.name == name)
            .map(|glyph| glyph.advance)
    }

    pub fn transform_of(&self, name: &str) -> Option<Affine> {
        self.glyphs
            .iter()
            .find(|glyph| glyph.name == name)
            .map(|glyph| glyph.transform)
    }

    pub fn log_summary(&self) {
        info!(
            "Built {} glyphs ({} skipped, {} empty)",
            self.glyphs.len(),
            self.skipped.len(),
            self.empty.len()
        );
        if self.ligature_rules > 0 || !self.ligatures_skipped.is_empty() {
            info!(
                "Ligatures: {} rules, {} filler glyphs",
                self.ligature_rules, self.fillers
            );
        }
        for icon in &self.skipped {
            warn!("Skipped {}: {}", icon.name, icon.reason);
        }
        for path in &self.outputs {
            info!("Wrote {}", path.display());
        }
    }
}
