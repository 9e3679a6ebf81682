//! Error types for uistatlib

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building statistics
#[derive(Error, Debug)]
pub enum UistatError {
    /// A configured path does not exist
    #[error("path does not exist: {0}")]
    PathNotFound(PathBuf),

    /// Failed to read a source file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Invalid exclude/includeOnly regular expression
    #[error("invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// Failed to read the configuration file
    #[error("failed to read config '{path}': {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Configuration file is not valid TOML or has the wrong shape
    #[error("failed to parse config '{path}': {message}")]
    ConfigParse { path: PathBuf, message: String },

    /// Failed to read the bundler module report
    #[error("failed to read module report '{path}': {source}")]
    ReportRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Module report is not valid JSON or has the wrong shape
    #[error("failed to parse module report '{path}': {message}")]
    ReportParse { path: PathBuf, message: String },
}
