// src/errors.rs

//! Crate-wide error types.

use std::path::PathBuf;

use thiserror::Error;

/// Why a user-supplied folder path was rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("path is empty")]
    EmptyPath,

    #[error("path does not exist")]
    NotFound,

    #[error("path is not a folder")]
    NotADirectory,
}

#[derive(Error, Debug)]
pub enum LauncherError {
    #[error("{label}: {source}")]
    InvalidPath {
        label: &'static str,
        #[source]
        source: ValidationError,
    },

    #[error("required input file not found: {}", .0.display())]
    MissingMarkerFile(PathBuf),

    #[error("pipeline executable {} is missing and cannot be built in packaged mode", .0.display())]
    BuildUnavailable(PathBuf),

    #[error("building the pipeline executable failed: {0}")]
    BuildFailed(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, LauncherError>;
