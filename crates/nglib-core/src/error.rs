//! Error types for nglib-core.
//!
//! The library reports failures through [`Error`]; the CLI and the cliclack
//! front-end wrap them with `anyhow` context.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the core library.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while collecting answers or materializing a project.
#[derive(Error, Debug)]
pub enum Error {
    /// Reading or writing a file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input source could not supply answers (closed terminal, cancelled prompt).
    #[error("Input source unavailable: {0}")]
    InputUnavailable(String),

    /// The input source returned a batch without an answer for a field.
    #[error("No answer supplied for '{0}'")]
    MissingAnswer(&'static str),

    /// An answer failed its validator and could not be re-requested.
    #[error("Invalid value for '{field}': {message}")]
    InvalidAnswer {
        field: &'static str,
        message: String,
    },

    /// A test framework label that is not one of the fixed choices.
    #[error("Unknown test framework '{0}' (expected 'karma + jasmine' or 'jest')")]
    UnknownTestFramework(String),

    /// The template root directory does not exist.
    #[error("Template directory not found: {0}")]
    TemplateRootMissing(PathBuf),

    /// A catalog glob pattern is malformed.
    #[error("Invalid template pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// Walking a template subtree failed.
    #[error("Failed to walk template directory: {0}")]
    Walk(#[from] walkdir::Error),

    /// The persisted answer file could not be parsed or serialized.
    #[error("Invalid answer store {path}: {source}")]
    State {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// A post-processing hook failed.
    #[error("Hook '{name}' failed: {message}")]
    Hook { name: &'static str, message: String },
}

impl Error {
    /// Wrap an I/O error with the path being accessed.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
