//! UFO file I/O operations

use crate::core::errors::FontIoError;
use anyhow::Result;
use norad::Font;
use std::path::Path;

/// Load a UFO font file from disk
pub fn load_ufo_from_path(path: impl AsRef<Path>) -> Result<Font> {
    let font = Font::load(path)?;
    Ok(font)
}

/// Save a UFO font to disk, replacing any existing UFO at `path`
pub fn save_ufo_to_path(font: &Font, path: &Path) -> Result<(), FontIoError> {
    if path.exists() {
        std::fs::remove_dir_all(path).map_err(|source| FontIoError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    }

    font.save(path).map_err(|e| FontIoError::Ufo {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
