//! In-memory font used to exercise the pipeline without touching disk

use super::{FontBuilder, FontMetrics, GlyphId, GlyphTable, OutputFormat, TableId};
use crate::core::errors::{FontIoError, ImportError};
use kurbo::{Affine, BezPath, Rect};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// A font whose outline "resources" are registered up front.
///
/// Generated outputs are recorded instead of written, and `close` calls are
/// counted so tests can check the font is released exactly once.
#[derive(Debug, Default)]
pub struct MemoryFont {
    pub table: GlyphTable,
    outlines: HashMap<PathBuf, Vec<BezPath>>,
    failing_outputs: Vec<PathBuf>,
    pub generated: Vec<(PathBuf, OutputFormat)>,
    pub close_count: usize,
}

impl MemoryFont {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `paths` the outline imported from `resource`
    pub fn register(&mut self, resource: impl Into<PathBuf>, paths: Vec<BezPath>) {
        self.outlines.insert(resource.into(), paths);
    }

    /// Make generating `path` fail with a write error
    pub fn fail_output(&mut self, path: impl Into<PathBuf>) {
        self.failing_outputs.push(path.into());
    }
}

impl FontBuilder for MemoryFont {
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
        let paths = self
            .outlines
            .get(resource)
            .cloned()
            .ok_or_else(|| ImportError::UnknownResource(resource.display().to_string()))?;
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
        if self.failing_outputs.iter().any(|failing| failing == path) {
            return Err(FontIoError::Write {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            });
        }
        self.generated.push((path.to_path_buf(), format));
        Ok(())
    }

    fn close(&mut self) {
        self.close_count += 1;
    }
}
