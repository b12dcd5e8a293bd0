//! The icon font build
//!
//! A run moves through fixed stages: the configuration and override table
//! are loaded and checked, the font metrics are set, every icon is turned
//! into a glyph in name order, the optional ligature pass runs, and only
//! then are the stylesheet, preview and fonts written. Any configuration
//! error stops the run before the first file is written.

pub mod report;

use crate::core::cli::BuildArgs;
use crate::core::config::{ConfigSource, OverrideTable, ParamSet, PipelineConfig};
use crate::core::errors::{FontIoError, PipelineError};
use crate::font_source::{FontBuilder, GlyphId, OutputFormat};
use crate::geometry::scale_matrix;
use crate::glyphs::{build_ligatures, CodepointAllocator, GlyphSpec};
use crate::io::icons::{scan_icons, IconSource};
use crate::io::paths::relative_url;
use crate::io::preview::render_preview;
use crate::io::stylesheet::{font_face_src, render_stylesheet};
use crate::layout::{
    advance_width, alignment_matrix, apply_scale, committed_advance, resolve_viewbox, scale_factor,
};
use std::fmt;
use std::fs;
use std::ops::{Deref, DerefMut};
use std::path::Path;
use tracing::{debug, info, warn};

pub use report::{ProcessedGlyph, RunReport, SkippedIcon};

/// Where a run currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Init,
    ConfigLoaded,
    MetricsSet,
    Glyphs,
    LigaturePass,
    Emit,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Init => "init",
            Self::ConfigLoaded => "config loaded",
            Self::MetricsSet => "metrics set",
            Self::Glyphs => "glyphs",
            Self::LigaturePass => "ligature pass",
            Self::Emit => "emit",
            Self::Done => "done",
        };
        f.write_str(name)
    }
}

/// Exclusive use of the font for one run. Closes the font when dropped,
/// whichever way the run ends.
pub struct FontSession<'a, B: FontBuilder> {
    builder: &'a mut B,
}

impl<'a, B: FontBuilder> FontSession<'a, B> {
    pub fn open(builder: &'a mut B) -> Self {
        Self { builder }
    }
}

impl<B: FontBuilder> Deref for FontSession<'_, B> {
    type Target = B;

    fn deref(&self) -> &B {
        self.builder
    }
}

impl<B: FontBuilder> DerefMut for FontSession<'_, B> {
    fn deref_mut(&mut self) -> &mut B {
        self.builder
    }
}

impl<B: FontBuilder> Drop for FontSession<'_, B> {
    fn drop(&mut self) {
        self.builder.close();
    }
}

/// Parse the build arguments and run the whole build against `builder`
pub fn run_build<B: FontBuilder>(
    builder: &mut B,
    args: &BuildArgs,
) -> Result<RunReport, PipelineError> {
    let mut session = FontSession::open(builder);
    let (config, source) = PipelineConfig::from_args(args)?;
    Pipeline::new(&config, &source).run(&mut session)
}

/// Run the build for an already parsed configuration
pub fn run_pipeline<B: FontBuilder>(
    builder: &mut B,
    config: &PipelineConfig,
    source: &ConfigSource,
) -> Result<RunReport, PipelineError> {
    let mut session = FontSession::open(builder);
    Pipeline::new(config, source).run(&mut session)
}

/// One run over a configuration
pub struct Pipeline<'a> {
    config: &'a PipelineConfig,
    source: &'a ConfigSource,
    stage: Stage,
    report: RunReport,
}

impl<'a> Pipeline<'a> {
    pub fn new(config: &'a PipelineConfig, source: &'a ConfigSource) -> Self {
        Self {
            config,
            source,
            stage: Stage::Init,
            report: RunReport::default(),
        }
    }

    fn enter(&mut self, stage: Stage) {
        debug!("stage: {} -> {}", self.stage, stage);
        self.stage = stage;
    }

    pub fn run<B: FontBuilder>(
        mut self,
        session: &mut FontSession<'_, B>,
    ) -> Result<RunReport, PipelineError> {
        let config = self.config;

        config.validate()?;
        let overrides = OverrideTable::load(self.source)?;
        let icons = scan_icons(&config.src_dir)?;
        let pins = overrides.pinned_codepoints(icons.iter().map(|icon| icon.name.as_str()))?;
        let mut allocator = CodepointAllocator::new(config.start, pins);
        debug!(
            "{} overrides, {} icons, first code point {:#X}",
            overrides.len(),
            icons.len(),
            config.start
        );
        self.enter(Stage::ConfigLoaded);

        session.set_metrics(config.metrics);
        self.enter(Stage::MetricsSet);

        self.enter(Stage::Glyphs);
        let mut glyphs = Vec::with_capacity(icons.len());
        for icon in &icons {
            let params = overrides.resolve(&icon.name, &config.defaults);
            let codepoint = allocator.assign(params.code)?;
            if let Some(spec) = self.build_glyph(&mut **session, icon, codepoint, params) {
                glyphs.push(spec);
            }
        }

        if config.mode.uses_ligatures() {
            self.enter(Stage::LigaturePass);
            let plan = build_ligatures(&mut **session, &glyphs);
            self.report.fillers = plan.fillers.len();
            self.report.ligature_rules = plan.rules.len();
            self.report.ligatures_skipped = plan.skipped;
        }

        self.enter(Stage::Emit);
        self.emit(&mut **session, &glyphs)?;

        if config.debug {
            dump_glyphs(&**session, &glyphs);
        }

        self.enter(Stage::Done);
        self.report.log_summary();
        Ok(self.report)
    }

    /// Import one icon and lay it out: viewbox, scale, width, alignment,
    /// then commit the advance. Returns `None` when the import fails.
    fn build_glyph<B: FontBuilder>(
        &mut self,
        builder: &mut B,
        icon: &IconSource,
        codepoint: u32,
        params: ParamSet,
    ) -> Option<GlyphSpec> {
        let metrics = self.config.metrics;
        let glyph = builder.glyph(codepoint, &icon.name);

        if let Err(error) = builder.import_outline(glyph, &icon.path) {
            warn!("{}: import failed, skipping: {}", icon.name, error);
            builder.remove_glyph(glyph);
            self.report.skipped.push(SkippedIcon {
                name: icon.name.clone(),
                path: icon.path.clone(),
                reason: error.to_string(),
            });
            return None;
        }

        if builder.is_empty(glyph) {
            warn!("{}: imported outline is empty", icon.name);
            self.report.empty.push(icon.name.clone());
        }

        let viewbox = resolve_viewbox(builder, glyph, icon.declared_viewbox, &metrics);
        debug!("{}: viewbox {:?}", icon.name, viewbox);

        let factor = scale_factor(params.scale, viewbox, &metrics);
        let viewbox = apply_scale(builder, glyph, viewbox, factor);

        let outline_width = builder.bounding_box(glyph).map_or(0.0, |bbox| bbox.width());
        let advance = advance_width(
            outline_width,
            params.minwidth,
            params.maxwidth,
            metrics.units_per_em,
        );
        debug!("{}: outline width {}, advance {}", icon.name, outline_width, advance);

        let align = alignment_matrix(&params, viewbox, advance, &metrics);
        builder.transform(glyph, align);

        // Transforming also moved the advance, so it is set last
        let advance = committed_advance(advance);
        builder.set_advance(glyph, advance);

        let transform = match factor {
            Some(factor) => align * scale_matrix(factor),
            None => align,
        };
        debug!(
            "{}: code point {:#X}, transform {:?}",
            icon.name,
            codepoint,
            transform.as_coeffs()
        );

        self.report.glyphs.push(ProcessedGlyph {
            name: icon.name.clone(),
            codepoint,
            advance,
            transform,
        });

        Some(GlyphSpec {
            name: icon.name.clone(),
            codepoint,
            glyph,
            advance,
        })
    }

    /// Write the stylesheet, preview and fonts, in that order
    fn emit<B: FontBuilder>(
        &mut self,
        builder: &mut B,
        glyphs: &[GlyphSpec],
    ) -> Result<(), FontIoError> {
        let config = self.config;
        let outputs = &config.outputs;

        if let (Some(css_file), Some(ttf_file)) = (&outputs.css, &outputs.ttf) {
            let sources = [font_face_src(
                css_file,
                ttf_file,
                outputs.css_font_path.as_deref(),
                "truetype",
            )];
            let css = render_stylesheet(&config.style, config.mode, &sources, glyphs);
            self.write_text(css_file, &css)?;

            if let Some(html_file) = &outputs.html {
                let css_url = relative_url(html_file, css_file);
                let html = render_preview(&config.style, config.mode, &css_url, glyphs);
                self.write_text(html_file, &html)?;
            }
        }

        for (path, format) in [
            (&outputs.ufo, OutputFormat::Ufo),
            (&outputs.ttf, OutputFormat::Ttf),
        ] {
            if let Some(path) = path {
                info!("Generating {} font {}", format, path.display());
                builder.generate(path, format)?;
                self.report.outputs.push(path.clone());
            }
        }

        Ok(())
    }

    fn write_text(&mut self, path: &Path, contents: &str) -> Result<(), FontIoError> {
        fs::write(path, contents).map_err(|source| FontIoError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        self.report.outputs.push(path.to_path_buf());
        Ok(())
    }
}

/// Log the final glyph table: name, code point, advance and bounds
fn dump_glyphs<B: FontBuilder>(builder: &B, glyphs: &[GlyphSpec]) {
    let metrics = builder.metrics();
    debug!(
        "em: {}, ascent: {}, descent: {}",
        metrics.units_per_em, metrics.ascent, metrics.descent
    );
    for spec in glyphs {
        debug!(
            "{}, {:#X}, adv_width={}, bbox={:?}",
            spec.name,
            spec.codepoint,
            spec.advance,
            bounds_or_empty(builder, spec.glyph)
        );
    }
}

fn bounds_or_empty<B: FontBuilder>(builder: &B, glyph: GlyphId) -> String {
    builder
        .bounding_box(glyph)
        .map(|bbox| format!("({}, {}, {}, {})", bbox.x0, bbox.y0, bbox.x1, bbox.y1))
        .unwrap_or_else(|| "empty".to_string())
}
