//! Core application functionality
//!
//! This module contains the command line surface, the pipeline
//! configuration and the error types shared by every stage.

pub mod cli;
pub mod config;
pub mod errors;
pub mod info;
pub mod platform;
pub mod runner;

// Re-export commonly used items
pub use cli::CliArgs;
pub use errors::{ConfigError, FontIoError, ImportError, PipelineError};
pub use runner::run_app;
