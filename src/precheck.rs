// src/precheck.rs

//! Checks the caller runs on user input before starting a pipeline run.
//!
//! The orchestrator assumes these have passed; it never repeats them.

use std::path::Path;

use tracing::debug;

use crate::errors::{LauncherError, Result, ValidationError};
use crate::fs::FileSystem;
use crate::types::PipelineRequest;

/// File that must exist inside the connector folder.
pub const DEFAULT_MARKER_FILE: &str = "asw.csv";

/// Validate a single user-supplied folder path.
///
/// Rules are applied in order and the first failing one wins:
/// empty after trimming, missing on disk, not a directory.
pub fn validate_dir(fs: &dyn FileSystem, path: &str) -> Option<ValidationError> {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return Some(ValidationError::EmptyPath);
    }

    let path = Path::new(trimmed);
    if !fs.exists(path) {
        return Some(ValidationError::NotFound);
    }
    if !fs.is_dir(path) {
        return Some(ValidationError::NotADirectory);
    }
    None
}

/// Validate both folders and the marker file, producing a ready request.
pub fn check_request(
    fs: &dyn FileSystem,
    connector_dir: &str,
    model_dir: &str,
    marker_file: &str,
) -> Result<PipelineRequest> {
    let connector_dir = connector_dir.trim();
    let model_dir = model_dir.trim();

    if let Some(source) = validate_dir(fs, connector_dir) {
        return Err(LauncherError::InvalidPath {
            label: "connector folder",
            source,
        });
    }
    if let Some(source) = validate_dir(fs, model_dir) {
        return Err(LauncherError::InvalidPath {
            label: "model folder",
            source,
        });
    }

    let marker = Path::new(connector_dir).join(marker_file);
    if !fs.exists(&marker) {
        return Err(LauncherError::MissingMarkerFile(marker));
    }

    debug!(connector_dir, model_dir, "input folders passed precheck");
    Ok(PipelineRequest::new(connector_dir, model_dir))
}
