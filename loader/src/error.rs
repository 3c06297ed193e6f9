//! Error types for definition loading.
//!
//! Every variant names the path it failed on so a bad input can be found
//! without re-running.

use std::path::PathBuf;

use fieldgen_core::SchemaError;
use thiserror::Error;

/// Errors that can occur while loading definitions or configuration.
#[derive(Debug, Error)]
pub enum LoadError {
    /// An input path does not exist or cannot be inspected.
    #[error("failed to access '{}': {source}", .path.display())]
    Access {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A directory input could not be listed.
    #[error("finding definition files in '{}' failed: {source}", .path.display())]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A definition document could not be read.
    #[error("error reading file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A definition document is not valid YAML of the expected shape.
    #[error("error parsing file {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// A file could not be written.
    #[error("failed to write file '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A generator configuration file could not be decoded.
    #[error("invalid config '{}': {source}", .path.display())]
    Config {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// No input paths were given.
    #[error("no definition paths were provided")]
    NoInputs,

    /// The loaded definitions do not form a valid schema.
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Convenience alias for results with [`LoadError`].
pub type Result<T> = std::result::Result<T, LoadError>;
