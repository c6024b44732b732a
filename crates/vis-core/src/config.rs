//! Visualizer configuration.
//!
//! Stored as TOML in the platform-specific config folder:
//! - macOS: ~/Library/Application Support/com.turn-visualizer.Turn Visualizer/
//! - Windows: %APPDATA%/turn-visualizer/config/
//! - Linux: ~/.config/turn-visualizer/
//!
//! ```toml
//! [session]
//! seed = 0
//! problem = "A"
//!
//! [export]
//! count = 100
//! out_dir = "in"
//!
//! [engine]
//! generator = ["./tools/gen"]
//! visualizer = ["./tools/vis"]
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use vis_engine::ProcessEngineConfig;
use vis_model::{DEFAULT_CASE_COUNT, Problem};

use crate::error::ConfigError;

const APP_QUALIFIER: &str = "com";
const APP_ORG: &str = "turn-visualizer";
const APP_NAME: &str = "Turn Visualizer";
const CONFIG_FILENAME: &str = "config.toml";

/// Top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualizerConfig {
    pub session: SessionConfig,
    pub export: ExportConfig,
    pub engine: ProcessEngineConfig,
}

/// Initial values for a new session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub seed: u64,
    pub problem: Problem,
}

/// Batch export defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Number of cases when `--count` is not given.
    pub count: u32,
    /// Directory for per-seed files. Unset means print to stdout.
    pub out_dir: Option<PathBuf>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_CASE_COUNT,
            out_dir: None,
        }
    }
}

impl VisualizerConfig {
    /// Platform config file path, if the platform has one.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
            .map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
    }

    /// Load from `path`, failing on a missing or malformed file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Load from `path`, or the default path when `None`.
    ///
    /// Falls back to defaults if the file is absent or cannot be used.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path.map(Path::to_path_buf).or_else(Self::default_path) else {
            tracing::warn!("Could not determine config path, using defaults");
            return Self::default();
        };

        match Self::load_from(&path) {
            Ok(config) => config,
            Err(ConfigError::Io { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                tracing::debug!(path = %path.display(), "No config file, using defaults");
                Self::default()
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load config, using defaults");
                Self::default()
            }
        }
    }

    /// Write to `path`, creating the parent directory if needed.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let content = toml::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), "Saved config");
        Ok(())
    }
}
