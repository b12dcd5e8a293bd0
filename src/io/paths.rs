//! Output path helpers
//!
//! Destination checks run before any glyph is processed, and relative URLs
//! let the generated stylesheet find the fonts and the preview find the
//! stylesheet wherever the outputs are placed.

use crate::core::errors::ConfigError;
use std::path::{Component, Path, PathBuf};

/// Ensure `path` names a file whose parent directory already exists
pub fn validate_destination(param: &str, path: &Path) -> Result<(), ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidDestination {
        param: param.to_string(),
        path: path.to_path_buf(),
        reason: reason.to_string(),
    };

    if path.file_name().is_none() || path.as_os_str().to_string_lossy().ends_with('/') {
        return Err(invalid("does not point to a file"));
    }

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        if !parent.is_dir() {
            return Err(invalid("is in a directory that does not exist"));
        }
    }

    Ok(())
}

/// URL of `to_file` relative to the directory containing `from_file`
pub fn relative_url(from_file: &Path, to_file: &Path) -> String {
    let from_dir = absolute_parent(from_file);
    let to_dir = absolute_parent(to_file);

    let from: Vec<Component<'_>> = from_dir.components().collect();
    let to: Vec<Component<'_>> = to_dir.components().collect();
    let common = from
        .iter()
        .zip(&to)
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<String> = vec!["..".to_string(); from.len() - common];
    parts.extend(
        to[common..]
            .iter()
            .map(|component| component.as_os_str().to_string_lossy().into_owned()),
    );

    join_url_path(&parts.join("/"), &file_name(to_file))
}

/// Join a URL directory and a file name with exactly one separator
pub fn join_url_path(path: &str, file: &str) -> String {
    if path.is_empty() {
        file.to_string()
    } else if path.ends_with('/') {
        format!("{path}{file}")
    } else {
        format!("{path}/{file}")
    }
}

pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn absolute_parent(file: &Path) -> PathBuf {
    let parent = file
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or(Path::new("."));

    parent
        .canonicalize()
        .or_else(|_| std::path::absolute(parent))
        .unwrap_or_else(|_| parent.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url_path() {
        assert_eq!(join_url_path("", "a.ttf"), "a.ttf");
        assert_eq!(join_url_path("./", "a.ttf"), "./a.ttf");
        assert_eq!(join_url_path("../fonts", "a.ttf"), "../fonts/a.ttf");
    }

    #[test]
    fn test_relative_url_between_sibling_dirs() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("css")).unwrap();
        std::fs::create_dir_all(dir.path().join("fonts")).unwrap();

        let css = dir.path().join("css").join("icons.css");
        let ttf = dir.path().join("fonts").join("icons.ttf");
        assert_eq!(relative_url(&css, &ttf), "../fonts/icons.ttf");

        let html = dir.path().join("preview.html");
        assert_eq!(relative_url(&html, &css), "css/icons.css");
        assert_eq!(relative_url(&css, &css), "icons.css");
    }

    #[test]
    fn test_validate_destination() {
        let dir = tempfile::tempdir().unwrap();
        assert!(validate_destination("--css", &dir.path().join("a.css")).is_ok());
        assert!(validate_destination("--css", Path::new("a.css")).is_ok());
        assert!(validate_destination("--css", &dir.path().join("nope").join("a.css")).is_err());
        assert!(validate_destination("--css", Path::new("out/")).is_err());
    }
}
