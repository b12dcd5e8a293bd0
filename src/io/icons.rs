//! Icon directory scanning

use crate::core::errors::ConfigError;
use crate::font_source::svg::declared_viewbox;
use kurbo::Rect;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// One SVG icon waiting to become a glyph
#[derive(Debug, Clone, PartialEq)]
pub struct IconSource {
    /// Glyph name, taken from the file stem
    pub name: String,
    pub path: PathBuf,
    /// The drawing area declared by the SVG, in SVG coordinates
    pub declared_viewbox: Option<Rect>,
}

impl IconSource {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>, declared_viewbox: Option<Rect>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            declared_viewbox,
        }
    }
}

/// All `.svg` files in `dir`, sorted by glyph name
pub fn scan_icons(dir: &Path) -> Result<Vec<IconSource>, ConfigError> {
    let entries = fs::read_dir(dir).map_err(|_| ConfigError::MissingSourceDir(dir.to_path_buf()))?;

    let mut icons: Vec<IconSource> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "svg"))
        .filter_map(|path| {
            let name = path.file_stem()?.to_string_lossy().into_owned();
            if name.is_empty() {
                return None;
            }
            let declared = fs::read_to_string(&path)
                .ok()
                .and_then(|text| declared_viewbox(&text));
            Some(IconSource::new(name, path, declared))
        })
        .collect();

    icons.sort_by(|a, b| a.name.cmp(&b.name));
    debug!("Found {} SVG icons in {:?}", icons.len(), dir);
    Ok(icons)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_sorts_and_filters() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("zoom.svg"), r#"<svg viewBox="0 0 24 24"/>"#).unwrap();
        fs::write(dir.path().join("back.svg"), r#"<svg width="16" height="8"/>"#).unwrap();
        fs::write(dir.path().join("notes.txt"), "not an icon").unwrap();
        fs::write(dir.path().join("broken.svg"), "<svg").unwrap();
        fs::create_dir(dir.path().join("nested.svg")).unwrap();

        let icons = scan_icons(dir.path()).unwrap();
        let names: Vec<&str> = icons.iter().map(|icon| icon.name.as_str()).collect();
        assert_eq!(names, vec!["back", "broken", "zoom"]);

        assert_eq!(icons[0].declared_viewbox, Some(Rect::new(0.0, 0.0, 16.0, 8.0)));
        assert_eq!(icons[1].declared_viewbox, None);
        assert_eq!(icons[2].declared_viewbox, Some(Rect::new(0.0, 0.0, 24.0, 24.0)));
    }

    #[test]
    fn test_missing_dir_is_config_error() {
        assert!(matches!(
            scan_icons(Path::new("/no/such/icons")),
            Err(ConfigError::MissingSourceDir(_))
        ));
    }
}
