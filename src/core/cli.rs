//! Command line interface for iconforge
//!
//! Handles parsing command line arguments. Policy flags are kept as text
//! here and parsed into typed values by `PipelineConfig::from_args`, so that
//! a bad value is reported as a configuration error with a non-zero exit.

use crate::core::config::params::Mode;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// iconforge CLI arguments
///
/// Examples:
///   iconforge build --src icons/ --ufo dist/icons.ufo
///   iconforge build --src icons/ --ttf dist/fonts/icons.ttf --css dist/css/icons.css
///   iconforge build --src icons/ --ttf out/icons.ttf --mode both --config glyphs.json
///   iconforge info --file dist/icons.ufo --start EA01 --end EA10
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "iconforge",
    version,
    about = "Build an icon font from a directory of SVG files",
    long_about = "iconforge turns a directory of SVG icons into a font, assigning each icon a private-use code point, and generates a stylesheet and an HTML preview that reference it."
)]
pub struct CliArgs {
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Build a font (and optionally CSS and an HTML preview) from SVG icons
    Build(BuildArgs),
    /// Print glyph information from a generated UFO font
    Info(InfoArgs),
}

#[derive(Args, Debug, Clone)]
pub struct BuildArgs {
    /// Directory containing the SVG icons
    #[clap(
        long = "src",
        default_value = "./src/",
        help = "Directory with the SVG files",
        long_help = "Directory with the SVG files. Every file ending in .svg becomes one glyph named after the file stem. Icons are processed in name order."
    )]
    pub src_dir: PathBuf,

    /// First code point for automatic assignment, in hexadecimal
    #[clap(long = "start", default_value = "EA01")]
    pub start: String,

    /// Units per em of the generated font
    #[clap(long = "em", default_value_t = 1000)]
    pub em: u32,

    /// Ascent in font units; defaults to 80% of the em
    #[clap(long = "ascent")]
    pub ascent: Option<u32>,

    /// Descent in font units (positive); defaults to the rest of the em
    #[clap(long = "descent")]
    pub descent: Option<u32>,

    /// Default scale policy
    #[clap(
        long = "scale",
        default_value = "in_em",
        long_help = "How each icon's viewbox is scaled: in_em, over_em, in_ascent, over_ascent, no (keep imported size) or a number used as a direct multiplier."
    )]
    pub scale: String,

    /// Default horizontal alignment
    #[clap(
        long = "halign",
        default_value = "center",
        long_help = "Horizontal placement of the viewbox: center, left, right, or a number to center the viewbox around that x coordinate."
    )]
    pub halign: String,

    /// Default vertical alignment
    #[clap(
        long = "valign",
        default_value = "ascdesc_center",
        long_help = "Vertical placement of the viewbox: ascdesc_center, ascent_center, baseline, descent, or a number to center the viewbox around that y coordinate."
    )]
    pub valign: String,

    /// Extra horizontal offset applied after alignment
    #[clap(long = "xmove", default_value = "0", allow_hyphen_values = true)]
    pub xmove: String,

    /// Extra vertical offset applied after alignment
    #[clap(long = "ymove", default_value = "0", allow_hyphen_values = true)]
    pub ymove: String,

    /// Minimum advance width: auto, em or a number of font units
    #[clap(long = "minwidth", default_value = "auto")]
    pub minwidth: String,

    /// Maximum advance width: auto, em or a number of font units
    #[clap(long = "maxwidth", default_value = "auto")]
    pub maxwidth: String,

    /// JSON file with per-glyph overrides
    #[clap(
        long = "config",
        long_help = "JSON file mapping glyph names to overrides with the keys code, scale, halign, valign, xmove, ymove, minwidth and maxwidth. Cannot be combined with --config-text."
    )]
    pub config_file: Option<PathBuf>,

    /// Inline JSON with per-glyph overrides
    #[clap(long = "config-text")]
    pub config_text: Option<String>,

    /// How glyphs are referenced from CSS and the preview
    #[clap(long = "mode", value_enum, default_value_t = Mode::Class)]
    pub mode: Mode,

    /// CSS font family name
    #[clap(long = "font-family", default_value = "Icon Font")]
    pub font_family: String,

    /// Generic CSS class shared by every icon element
    #[clap(long = "generic-class", default_value = "ico")]
    pub generic_class: String,

    /// Prefix of the per-icon CSS classes
    #[clap(long = "class-prefix", default_value = "ico-")]
    pub class_prefix: String,

    /// Path of the generated stylesheet
    #[clap(long = "css")]
    pub css_file: Option<PathBuf>,

    /// Path of the generated HTML preview (requires --css)
    #[clap(long = "html")]
    pub html_file: Option<PathBuf>,

    /// Path of the generated UFO font source
    #[clap(long = "ufo")]
    pub ufo_file: Option<PathBuf>,

    /// Path of the generated TrueType font (compiled with fontc)
    #[clap(long = "ttf")]
    pub ttf_file: Option<PathBuf>,

    /// URL path from the stylesheet to the font files
    #[clap(
        long = "css-font-path",
        long_help = "Override the URL path used in @font-face to reach the font files. When empty it is computed from the output paths; pass ./ for the stylesheet's own directory."
    )]
    pub css_font_path: Option<String>,

    /// Default font size of the HTML preview
    #[clap(long = "preview-font-size", default_value = "24px")]
    pub preview_font_size: String,

    /// Print per-glyph layout details
    #[clap(long = "debug", short = 'd')]
    pub debug: bool,
}

#[derive(Args, Debug, Clone)]
pub struct InfoArgs {
    /// UFO font to inspect
    #[clap(long = "file", short = 'f')]
    pub file: PathBuf,

    /// Comma separated list of hex code points to print
    #[clap(long = "charcodes", short = 'c')]
    pub charcodes: Option<String>,

    /// Hex code point from which to start printing
    #[clap(long = "start", short = 's')]
    pub start: Option<String>,

    /// Hex code point at which to stop printing
    #[clap(long = "end", short = 'e')]
    pub end: Option<String>,

    /// Name of a glyph to print
    #[clap(long = "name", short = 'n')]
    pub name: Option<String>,
}

impl CliArgs {
    /// Whether verbose output was requested
    pub fn debug(&self) -> bool {
        match &self.command {
            Command::Build(args) => args.debug,
            Command::Info(_) => false,
        }
    }
}
