use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

/// Failure to obtain a raw result document. Only the file boundary is
/// fallible; everything past parsing degrades instead of erroring.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("transcript is not valid JSON")]
    Parse(#[from] serde_json::Error),
}

/// Parse a raw transcription result from a JSON string. The value is
/// kept opaque here; shape tolerance lives in the normalizer.
pub fn parse_raw_json(json: &str) -> Result<Value, InputError> {
    Ok(serde_json::from_str(json)?)
}

/// Read and parse a raw transcription result file.
pub fn read_raw_file(path: &Path) -> Result<Value, InputError> {
    let content = std::fs::read_to_string(path).map_err(|source| InputError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_raw_json(&content)
}
