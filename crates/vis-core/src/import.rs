//! Import of a saved `(input, output)` case.
//!
//! An imported artifact is a JSON object with two string sections:
//!
//! ```json
//! { "input": "3 4\n1 2 3\n", "output": "R\nL\n" }
//! ```
//!
//! Unknown keys are ignored. Parsing happens entirely before the session is
//! touched, so a malformed artifact changes nothing.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ImportError;

/// The two sections of an imported case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportedCase {
    pub input: String,
    pub output: String,
}

impl ImportedCase {
    /// Parse raw artifact bytes.
    pub fn parse(bytes: &[u8]) -> Result<Self, ImportError> {
        let text = std::str::from_utf8(bytes).map_err(ImportError::NotUtf8)?;
        serde_json::from_str(text).map_err(ImportError::Malformed)
    }

    /// Read and parse the artifact at `path`.
    pub fn read(path: &Path) -> Result<Self, ImportError> {
        let bytes = fs::read(path).map_err(|source| ImportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let case = Self::parse(&bytes)?;
        tracing::debug!(path = %path.display(), "Imported case");
        Ok(case)
    }

    /// Build a case from separate input and output files.
    pub fn read_pair(input: &Path, output: &Path) -> Result<Self, ImportError> {
        Ok(Self {
            input: read_text(input)?,
            output: read_text(output)?,
        })
    }
}

fn read_text(path: &Path) -> Result<String, ImportError> {
    let bytes = fs::read(path).map_err(|source| ImportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    String::from_utf8(bytes).map_err(|e| ImportError::NotUtf8(e.utf8_error()))
}
