//! Stylesheet generation

use super::paths::{file_name, join_url_path, relative_url};
use crate::core::config::{Mode, StyleOptions};
use crate::glyphs::GlyphSpec;
use std::fmt::Write as _;
use std::path::Path;

/// Escape text for use inside a double-quoted CSS string
pub fn escape_css_string(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

/// One `src` entry of the `@font-face` rule.
///
/// The URL is relative to the stylesheet unless `override_path` gives the
/// URL directory of the fonts explicitly.
pub fn font_face_src(
    css_file: &Path,
    font_file: &Path,
    override_path: Option<&str>,
    format: &str,
) -> String {
    let url = match override_path {
        Some(path) => join_url_path(path, &file_name(font_file)),
        None => relative_url(css_file, font_file),
    };
    format!(
        "url(\"{}\") format(\"{}\")",
        escape_css_string(&url),
        escape_css_string(format)
    )
}

/// Render the whole stylesheet
pub fn render_stylesheet(
    style: &StyleOptions,
    mode: Mode,
    sources: &[String],
    glyphs: &[GlyphSpec],
) -> String {
    let family = escape_css_string(&style.font_family);
    let mut css = String::new();

    let _ = write!(
        css,
        "@font-face {{\n  font-family: \"{family}\";\n  src: {};\n}}\n\n",
        sources.join(",\n       ")
    );

    let _ = writeln!(css, ".{} {{", style.generic_class);
    if mode.uses_ligatures() {
        let _ = writeln!(css, "  font-family: \"{family}\";");
        let _ = writeln!(css, "  font-feature-settings: \"liga\";");
    }
    css.push_str(
        "  font-style: normal;\n  text-rendering: auto;\n  display: inline-block;\n  font-variant: normal;\n  -moz-osx-font-smoothing: grayscale;\n  -webkit-font-smoothing: antialiased;\n}\n",
    );

    if mode.uses_classes() {
        for spec in glyphs {
            let _ = write!(
                css,
                "\n.{}{}::before {{\n  content: \"\\{:x}\";\n  font-family: \"{family}\";\n}}\n",
                style.class_prefix, spec.name, spec.codepoint
            );
        }
    }

    css
}
