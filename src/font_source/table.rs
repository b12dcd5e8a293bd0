//! In-memory glyph storage shared by the font backends

use super::{FontMetrics, GlyphId, TableId};
use kurbo::{Affine, BezPath, Rect, Shape};
use std::collections::HashMap;

/// One glyph of the font under construction
#[derive(Debug, Clone)]
pub struct GlyphRecord {
    pub name: String,
    pub codepoint: u32,
    pub outline: Vec<BezPath>,
    pub advance: f64,
}

impl GlyphRecord {
    pub fn bounding_box(&self) -> Option<Rect> {
        self.outline
            .iter()
            .filter(|path| path.elements().len() > 1)
            .map(|path| path.bounding_box())
            .reduce(|acc, bbox| acc.union(bbox))
    }

    pub fn is_empty(&self) -> bool {
        self.bounding_box().is_none()
    }
}

/// A ligature lookup and its rules, in insertion order
#[derive(Debug, Clone)]
pub struct SubstitutionTable {
    pub feature: String,
    pub rules: Vec<(GlyphId, Vec<GlyphId>)>,
}

/// Glyphs indexed by handle and by code point
#[derive(Debug, Clone, Default)]
pub struct GlyphTable {
    pub metrics: FontMetrics,
    glyphs: Vec<Option<GlyphRecord>>,
    by_codepoint: HashMap<u32, GlyphId>,
    tables: Vec<SubstitutionTable>,
}

impl GlyphTable {
    pub fn new(metrics: FontMetrics) -> Self {
        Self {
            metrics,
            ..Default::default()
        }
    }

    pub fn glyph(&mut self, codepoint: u32, name: &str) -> GlyphId {
        if let Some(id) = self.by_codepoint.get(&codepoint) {
            return *id;
        }

        let id = GlyphId(self.glyphs.len());
        self.glyphs.push(Some(GlyphRecord {
            name: name.to_string(),
            codepoint,
            outline: Vec::new(),
            advance: 0.0,
        }));
        self.by_codepoint.insert(codepoint, id);
        id
    }

    pub fn glyph_at(&self, codepoint: u32) -> Option<GlyphId> {
        self.by_codepoint.get(&codepoint).copied()
    }

    pub fn get(&self, id: GlyphId) -> Option<&GlyphRecord> {
        self.glyphs.get(id.0).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, id: GlyphId) -> Option<&mut GlyphRecord> {
        self.glyphs.get_mut(id.0).and_then(Option::as_mut)
    }

    /// Live glyphs in creation order
    pub fn iter(&self) -> impl Iterator<Item = (GlyphId, &GlyphRecord)> {
        self.glyphs
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|record| (GlyphId(index), record)))
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove a glyph and free its code point. Other handles stay valid.
    pub fn remove(&mut self, id: GlyphId) -> Option<GlyphRecord> {
        let record = self.glyphs.get_mut(id.0)?.take()?;
        if self.by_codepoint.get(&record.codepoint) == Some(&id) {
            self.by_codepoint.remove(&record.codepoint);
        }
        Some(record)
    }

    pub fn append_outline(&mut self, id: GlyphId, paths: Vec<BezPath>) {
        if let Some(record) = self.get_mut(id) {
            record.outline.extend(paths);
        }
    }

    pub fn bounding_box(&self, id: GlyphId) -> Option<Rect> {
        self.get(id).and_then(GlyphRecord::bounding_box)
    }

    pub fn transform(&mut self, id: GlyphId, matrix: Affine) {
        if let Some(record) = self.get_mut(id) {
            for path in &mut record.outline {
                path.apply_affine(matrix);
            }
            // The advance is carried along as a horizontal distance
            let [a, ..] = matrix.as_coeffs();
            record.advance *= a;
        }
    }

    pub fn set_advance(&mut self, id: GlyphId, width: i64) {
        if let Some(record) = self.get_mut(id) {
            record.advance = width as f64;
        }
    }

    pub fn add_substitution_table(&mut self, feature: &str) -> TableId {
        self.tables.push(SubstitutionTable {
            feature: feature.to_string(),
            rules: Vec::new(),
        });
        TableId(self.tables.len() - 1)
    }

    pub fn add_ligature(&mut self, table: TableId, glyph: GlyphId, components: Vec<GlyphId>) {
        if let Some(table) = self.tables.get_mut(table.0) {
            table.rules.push((glyph, components));
        }
    }

    pub fn substitution_tables(&self) -> &[SubstitutionTable] {
        &self.tables
    }

    /// Drop all glyph data
    pub fn clear(&mut self) {
        self.glyphs.clear();
        self.by_codepoint.clear();
        self.tables.clear();
    }
}
