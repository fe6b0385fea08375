//! Crate error types.

use std::path::PathBuf;
use thiserror::Error;

/// Error represents a failure while normalizing a YAML stream or file.
///
/// Localized conditions are deliberately not represented here: a missing
/// input file is reported and skipped by the CLI, a `value` field that fails
/// to parse as JSON keeps its original string, and a scalar that is not a
/// duration passes through unchanged. Only stream-level parse, serialize, and
/// I/O failures surface as errors.
#[derive(Debug, Error)]
pub enum Error {
    /// The input stream is not valid YAML; fatal for that input.
    #[error("failed to parse YAML input: {0}")]
    Parse(#[source] serde_yaml::Error),

    /// Serializing the rewritten document failed.
    #[error("failed to emit YAML output: {0}")]
    Emit(#[source] serde_yaml::Error),

    /// Reading or writing a file failed.
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The requested serialization configuration is not supported by the
    /// YAML backend.
    #[error("unsupported serialization config: {option}")]
    UnsupportedConfig { option: &'static str },
}

impl Error {
    /// Creates an I/O error carrying the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
