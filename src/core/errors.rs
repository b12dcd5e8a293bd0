//! Error types for the icon font pipeline
//!
//! Configuration problems are always fatal and are detected before any
//! output is written. Import problems only affect a single icon.

use std::path::PathBuf;
use thiserror::Error;

/// A fatal problem with the pipeline configuration or override table
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} value '{value}' is not a number")]
    InvalidNumber { field: String, value: String },

    #[error("'{value}' is not a valid code point for {context}")]
    InvalidCodepoint { context: String, value: String },

    #[error("unknown {field} policy '{value}'")]
    UnknownPolicy { field: String, value: String },

    #[error("only one of a config file or inline config text may be supplied")]
    ConflictingConfigSources,

    #[error("icon directory {} does not exist or is not a directory", .0.display())]
    MissingSourceDir(PathBuf),

    #[error("{param} ({}) {reason}", path.display())]
    InvalidDestination {
        param: String,
        path: PathBuf,
        reason: String,
    },

    #[error("{0}")]
    MissingOption(String),

    #[error("code point {codepoint:#X} is pinned by both '{first}' and '{second}'")]
    DuplicatePin {
        codepoint: u32,
        first: String,
        second: String,
    },

    #[error("no free code point left at or after {0:#X}")]
    CodepointExhausted(u32),

    #[error("failed to read config file {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse glyph config: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

impl ConfigError {
    pub(crate) fn invalid_number(field: &str, value: &str) -> Self {
        Self::InvalidNumber {
            field: field.to_string(),
            value: value.to_string(),
        }
    }

    pub(crate) fn unknown_policy(field: &str, value: &str) -> Self {
        Self::UnknownPolicy {
            field: field.to_string(),
            value: value.to_string(),
        }
    }
}

/// A single icon could not be imported; the icon is skipped
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse SVG {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("no outline registered for resource {0}")]
    UnknownResource(String),
}

/// Writing a generated artifact failed
#[derive(Debug, Error)]
pub enum FontIoError {
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to save UFO {}: {message}", path.display())]
    Ufo { path: PathBuf, message: String },

    #[error("font compilation failed for {}: {message}", path.display())]
    Compile { path: PathBuf, message: String },
}

/// Anything that aborts a pipeline run
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] FontIoError),
}
