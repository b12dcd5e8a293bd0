//! UFO-backed font builder
//!
//! Outlines are imported from SVG files and kept as kurbo paths until
//! generation. A UFO is written with norad; TrueType output compiles a
//! temporary UFO with the `fontc` command line compiler.

use super::svg::import_svg_outline;
use super::{FontBuilder, FontMetrics, GlyphId, GlyphTable, OutputFormat, TableId};
use crate::core::errors::{FontIoError, ImportError};
use crate::data::ufo::save_ufo_to_path;
use kurbo::{Affine, Rect};
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;
use tracing::debug;

/// A font under construction that is written as UFO or TrueType
#[derive(Debug)]
pub struct UfoFont {
    table: GlyphTable,
    family_name: String,
    closed: bool,
}

impl UfoFont {
    pub fn new(family_name: impl Into<String>) -> Self {
        Self {
            table: GlyphTable::default(),
            family_name: family_name.into(),
            closed: false,
        }
    }

    /// The glyphs built so far
    pub fn table(&self) -> &GlyphTable {
        &self.table
    }

    fn compile_ttf(&self, output_path: &Path) -> Result<(), FontIoError> {
        let compile_error = |message: String| FontIoError::Compile {
            path: output_path.to_path_buf(),
            message,
        };

        let temp_dir = TempDir::new().map_err(|source| FontIoError::Write {
            path: output_path.to_path_buf(),
            source,
        })?;
        let ufo_path = temp_dir.path().join("font.ufo");
        save_ufo_to_path(&self.table.to_norad_font(&self.family_name), &ufo_path)?;

        let output = Command::new("fontc")
            .arg("--build-dir")
            .arg(temp_dir.path().join("build"))
            .arg("--output-file")
            .arg(output_path)
            .arg(&ufo_path)
            .output()
            .map_err(|e| compile_error(format!("failed to run fontc: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(compile_error(stderr.trim().to_string()));
        }

        Ok(())
    }
}

impl FontBuilder for UfoFont {
    fn set_metrics(&mut self, metrics: FontMetrics) {
        self.table.metrics = metrics;
    }

    fn metrics(&self) -> FontMetrics {
        self.table.metrics
    }

    fn glyph(&mut self, codepoint: u32, name: &str) -> GlyphId {
        self.table.glyph(codepoint, name)
    }

    fn glyph_at(&self, codepoint: u32) -> Option<GlyphId> {
        self.table.glyph_at(codepoint)
    }

    fn import_outline(&mut self, glyph: GlyphId, resource: &Path) -> Result<(), ImportError> {
        let paths = import_svg_outline(resource, self.table.metrics.ascent)?;
        self.table.append_outline(glyph, paths);
        Ok(())
    }

    fn remove_glyph(&mut self, glyph: GlyphId) {
        self.table.remove(glyph);
    }

    fn bounding_box(&self, glyph: GlyphId) -> Option<Rect> {
        self.table.bounding_box(glyph)
    }

    fn transform(&mut self, glyph: GlyphId, matrix: Affine) {
        self.table.transform(glyph, matrix);
    }

    fn set_advance(&mut self, glyph: GlyphId, width: i64) {
        self.table.set_advance(glyph, width);
    }

    fn is_empty(&self, glyph: GlyphId) -> bool {
        self.table.get(glyph).is_none_or(|record| record.is_empty())
    }

    fn add_substitution_table(&mut self, feature: &str) -> TableId {
        self.table.add_substitution_table(feature)
    }

    fn add_ligature(&mut self, table: TableId, glyph: GlyphId, components: Vec<GlyphId>) {
        self.table.add_ligature(table, glyph, components);
    }

    fn generate(&mut self, path: &Path, format: OutputFormat) -> Result<(), FontIoError> {
        debug!("Generating {} font at {:?}", format, path);
        match format {
            OutputFormat::Ufo => {
                save_ufo_to_path(&self.table.to_norad_font(&self.family_name), path)
            }
            OutputFormat::Ttf => self.compile_ttf(path),
        }
    }

    fn close(&mut self) {
        if !self.closed {
            self.table.clear();
            self.closed = true;
            debug!("Closed font '{}'", self.family_name);
        }
    }
}
