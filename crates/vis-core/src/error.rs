//! Core error types.
//!
//! Validation and render failures never appear here: they degrade the session
//! instead of failing it. What remains are generator faults, export and
//! import failures, and configuration problems.

use std::path::PathBuf;
use thiserror::Error;
use vis_engine::GenerateError;

/// A session mutation could not be settled.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The generator failed; the session cannot continue with a stale input.
    #[error("Input generation failed")]
    Generation(#[from] GenerateError),

    /// An imported artifact was rejected before the session was touched.
    #[error("Import failed")]
    Import(#[from] ImportError),
}

impl SessionError {
    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::Generation(source) => format!("The generator failed: {}", source),
            Self::Import(source) => source.user_message(),
        }
    }
}

/// Batch export failure.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Another export is still running.
    #[error("An export is already in progress")]
    Busy,

    /// Case count outside `[1, 10000]`.
    #[error("Case count {count} is outside {min}..={max}")]
    InvalidCount { count: u32, min: u32, max: u32 },

    /// `seed + count - 1` does not fit in a `u64`.
    #[error("Seeds starting at {seed} overflow after fewer than {count} cases")]
    SeedOverflow { seed: u64, count: u32 },

    /// The generator failed for one of the seeds.
    #[error("Generation failed during export")]
    Generation(#[source] GenerateError),

    /// Writing the artifact failed.
    #[error("Failed to write {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The background export task did not complete.
    #[error("Export task failed: {0}")]
    TaskFailed(String),
}

impl ExportError {
    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::Busy => "Wait for the current download to finish.".to_string(),
            Self::InvalidCount { min, max, .. } => {
                format!("Choose between {} and {} cases.", min, max)
            }
            Self::SeedOverflow { .. } => {
                "The starting seed is too large for that many cases.".to_string()
            }
            Self::Generation(source) => format!("The generator failed: {}", source),
            Self::Io { path, source } => {
                format!("Could not write {}: {}", path.display(), source)
            }
            Self::TaskFailed(message) => format!("The export stopped unexpectedly: {}", message),
        }
    }
}

/// An imported artifact could not be parsed. The session is left unchanged.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Artifact is not valid UTF-8")]
    NotUtf8(#[source] std::str::Utf8Error),

    #[error("Artifact does not contain input and output sections")]
    Malformed(#[source] serde_json::Error),
}

impl ImportError {
    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::Io { path, source } => format!("Could not read {}: {}", path.display(), source),
            Self::NotUtf8(_) => "The file is not a text file.".to_string(),
            Self::Malformed(source) => format!(
                "Expected a JSON object with \"input\" and \"output\" strings ({}).",
                source
            ),
        }
    }
}

/// Configuration file could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file: {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize config")]
    Serialize(#[source] toml::ser::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_count_message() {
        let err = ExportError::InvalidCount {
            count: 0,
            min: 1,
            max: 10_000,
        };
        assert_eq!(err.to_string(), "Case count 0 is outside 1..=10000");
        assert_eq!(err.user_message(), "Choose between 1 and 10000 cases.");
    }

    #[test]
    fn test_session_error_from_generate() {
        let err: SessionError = GenerateError::Unavailable("gone".into()).into();
        assert!(matches!(err, SessionError::Generation(_)));
    }
}
