//! Pipeline configuration
//!
//! `PipelineConfig` is built once from the CLI arguments and then passed by
//! reference to every stage. Nothing in the pipeline reads global state.

use super::overrides::ConfigSource;
use super::params::{
    parse_codepoint, parse_offset, HAlign, Mode, ParamSet, ScalePolicy, VAlign, WidthBound,
};
use crate::core::cli::BuildArgs;
use crate::core::errors::ConfigError;
use crate::font_source::FontMetrics;
use crate::io::paths::validate_destination;
use std::path::PathBuf;

/// Naming used in the generated stylesheet and preview
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleOptions {
    pub font_family: String,
    pub generic_class: String,
    pub class_prefix: String,
    pub preview_font_size: String,
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self {
            font_family: "Icon Font".to_string(),
            generic_class: "ico".to_string(),
            class_prefix: "ico-".to_string(),
            preview_font_size: "24px".to_string(),
        }
    }
}

/// Requested output files; `None` means the output is not generated
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputPaths {
    pub css: Option<PathBuf>,
    pub html: Option<PathBuf>,
    pub ufo: Option<PathBuf>,
    pub ttf: Option<PathBuf>,
    /// URL path from the stylesheet to the fonts, overriding the computed one
    pub css_font_path: Option<String>,
}

/// Read-only configuration for one pipeline run
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub src_dir: PathBuf,
    pub start: u32,
    pub metrics: FontMetrics,
    pub defaults: ParamSet,
    pub mode: Mode,
    pub style: StyleOptions,
    pub outputs: OutputPaths,
    pub debug: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            src_dir: PathBuf::from("./src/"),
            start: 0xEA01,
            metrics: FontMetrics::default(),
            defaults: ParamSet::default(),
            mode: Mode::Class,
            style: StyleOptions::default(),
            outputs: OutputPaths::default(),
            debug: false,
        }
    }
}

impl PipelineConfig {
    /// Parse every policy flag into its typed form.
    ///
    /// Returns the configuration together with the override table source;
    /// a file and inline text supplied together is rejected here.
    pub fn from_args(args: &BuildArgs) -> Result<(Self, ConfigSource), ConfigError> {
        let source = ConfigSource::from_options(args.config_file.clone(), args.config_text.clone())?;

        let defaults = ParamSet {
            scale: args.scale.parse::<ScalePolicy>()?,
            halign: args.halign.parse::<HAlign>()?,
            valign: args.valign.parse::<VAlign>()?,
            xmove: parse_offset("xmove", &args.xmove)?,
            ymove: parse_offset("ymove", &args.ymove)?,
            minwidth: WidthBound::parse("minwidth", &args.minwidth)?,
            maxwidth: WidthBound::parse("maxwidth", &args.maxwidth)?,
            code: None,
        };

        let config = Self {
            src_dir: args.src_dir.clone(),
            start: parse_codepoint("--start", &args.start)?,
            metrics: FontMetrics::new(args.em, args.ascent, args.descent),
            defaults,
            mode: args.mode,
            style: StyleOptions {
                font_family: args.font_family.clone(),
                generic_class: args.generic_class.clone(),
                class_prefix: args.class_prefix.clone(),
                preview_font_size: args.preview_font_size.clone(),
            },
            outputs: OutputPaths {
                css: args.css_file.clone(),
                html: args.html_file.clone(),
                ufo: args.ufo_file.clone(),
                ttf: args.ttf_file.clone(),
                css_font_path: args.css_font_path.clone().filter(|path| !path.is_empty()),
            },
            debug: args.debug,
        };

        Ok((config, source))
    }

    /// Check the filesystem-facing parts of the configuration.
    ///
    /// The source directory must exist and every requested output must name
    /// a file inside an existing directory.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.src_dir.is_dir() {
            return Err(ConfigError::MissingSourceDir(self.src_dir.clone()));
        }

        let outputs = &self.outputs;
        for (param, path) in [
            ("--css", &outputs.css),
            ("--html", &outputs.html),
            ("--ufo", &outputs.ufo),
            ("--ttf", &outputs.ttf),
        ] {
            if let Some(path) = path {
                validate_destination(param, path)?;
            }
        }

        if let Some(ttf) = &outputs.ttf {
            if ttf.extension().and_then(|ext| ext.to_str()) != Some("ttf") {
                return Err(ConfigError::InvalidDestination {
                    param: "--ttf".to_string(),
                    path: ttf.clone(),
                    reason: "must end with the .ttf extension".to_string(),
                });
            }
        }

        if outputs.html.is_some() && outputs.css.is_none() {
            return Err(ConfigError::MissingOption(
                "--html requires --css for the preview to link to".to_string(),
            ));
        }

        if outputs.css.is_some() {
            if outputs.ttf.is_none() {
                return Err(ConfigError::MissingOption(
                    "--css requires --ttf so the stylesheet has a font to reference".to_string(),
                ));
            }
            for (flag, value) in [
                ("--font-family", &self.style.font_family),
                ("--generic-class", &self.style.generic_class),
                ("--class-prefix", &self.style.class_prefix),
            ] {
                if value.is_empty() {
                    return Err(ConfigError::MissingOption(format!("{flag} is required")));
                }
            }
        }

        if outputs.ufo.is_none() && outputs.ttf.is_none() {
            return Err(ConfigError::MissingOption(
                "at least one of --ufo or --ttf must be given".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cli::{CliArgs, Command};
    use clap::Parser;

    fn build_args(extra: &[&str]) -> BuildArgs {
        let mut argv = vec!["iconforge", "build"];
        argv.extend_from_slice(extra);
        match CliArgs::try_parse_from(argv).unwrap().command {
            Command::Build(args) => args,
            Command::Info(_) => panic!("expected build command"),
        }
    }

    #[test]
    fn test_defaults_from_cli() {
        let (config, source) = PipelineConfig::from_args(&build_args(&[])).unwrap();
        assert_eq!(config.start, 0xEA01);
        assert_eq!(config.defaults, ParamSet::default());
        assert_eq!(config.metrics, FontMetrics::default());
        assert_eq!(source, ConfigSource::None);
    }

    #[test]
    fn test_policy_flags_are_typed() {
        let (config, _) = PipelineConfig::from_args(&build_args(&[
            "--scale", "1.5", "--halign", "right", "--valign", "baseline", "--minwidth", "em",
            "--ymove", "-20",
        ]))
        .unwrap();
        assert_eq!(config.defaults.scale, ScalePolicy::Factor(1.5));
        assert_eq!(config.defaults.halign, HAlign::Right);
        assert_eq!(config.defaults.valign, VAlign::Baseline);
        assert_eq!(config.defaults.minwidth, WidthBound::Em);
        assert_eq!(config.defaults.ymove, -20.0);
    }

    #[test]
    fn test_bad_flags_are_config_errors() {
        assert!(PipelineConfig::from_args(&build_args(&["--halign", "middle"])).is_err());
        assert!(PipelineConfig::from_args(&build_args(&["--start", "xyz"])).is_err());
        assert!(PipelineConfig::from_args(&build_args(&["--maxwidth", "big"])).is_err());
        assert!(matches!(
            PipelineConfig::from_args(&build_args(&[
                "--config",
                "glyphs.json",
                "--config-text",
                "{}"
            ])),
            Err(ConfigError::ConflictingConfigSources)
        ));
    }

    #[test]
    fn test_validate_requires_existing_source_dir() {
        let config = PipelineConfig {
            src_dir: PathBuf::from("/definitely/not/here"),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingSourceDir(_))
        ));
    }

    #[test]
    fn test_validate_output_combinations() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = PipelineConfig {
            src_dir: dir.path().to_path_buf(),
            ..Default::default()
        };

        // No font output at all
        assert!(config.validate().is_err());

        config.outputs.ttf = Some(dir.path().join("icons.ttf"));
        config.outputs.css = Some(dir.path().join("icons.css"));
        config.outputs.html = Some(dir.path().join("preview.html"));
        assert!(config.validate().is_ok());

        config.outputs.ttf = Some(dir.path().join("icons.woff"));
        assert!(config.validate().is_err());

        config.outputs.ttf = Some(dir.path().join("missing").join("icons.ttf"));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidDestination { .. })
        ));
    }
}
