use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::errors::LauncherError;

/// How the launcher was deployed.
///
/// - `Packaged`: running from a fixed installation; the pipeline executable
///   must already be present next to the launcher.
/// - `Development`: running from a source checkout; a missing executable may
///   be built on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentMode {
    Packaged,
    Development,
}

impl Default for DeploymentMode {
    fn default() -> Self {
        if cfg!(debug_assertions) {
            DeploymentMode::Development
        } else {
            DeploymentMode::Packaged
        }
    }
}

/// The two folders a single pipeline run works on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineRequest {
    pub connector_dir: PathBuf,
    pub model_dir: PathBuf,
}

impl PipelineRequest {
    pub fn new(connector_dir: impl Into<PathBuf>, model_dir: impl Into<PathBuf>) -> Self {
        Self {
            connector_dir: connector_dir.into(),
            model_dir: model_dir.into(),
        }
    }
}

/// A resolved pipeline binary and the directory it must be started from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutableLocation {
    pub executable: PathBuf,
    pub working_dir: PathBuf,
}

/// Completion percentage reported by the pipeline, always within `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ProgressEvent {
    pub percent: u8,
}

impl ProgressEvent {
    /// Build an event from a raw value, clamping it into `0..=100`.
    pub fn clamped(raw: i64) -> Self {
        Self {
            percent: raw.clamp(0, 100) as u8,
        }
    }
}

/// Category of a failed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    BuildUnavailable,
    BuildFailed,
    SpawnFailed,
    ProcessExitNonZero,
    NoOutputProduced,
    StreamUnavailable,
}

/// Final result of one pipeline invocation. Exactly one is produced per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Success { output_path: String },
    Failure { kind: FailureKind, message: String },
}

impl RunOutcome {
    pub fn failure(kind: FailureKind, message: impl Into<String>) -> Self {
        RunOutcome::Failure {
            kind,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, RunOutcome::Success { .. })
    }

    pub fn output_path(&self) -> Option<&Path> {
        match self {
            RunOutcome::Success { output_path } => Some(Path::new(output_path)),
            RunOutcome::Failure { .. } => None,
        }
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            RunOutcome::Success { .. } => None,
            RunOutcome::Failure { kind, .. } => Some(*kind),
        }
    }
}

impl From<LauncherError> for RunOutcome {
    fn from(err: LauncherError) -> Self {
        let kind = match &err {
            LauncherError::BuildUnavailable(_) => FailureKind::BuildUnavailable,
            _ => FailureKind::BuildFailed,
        };
        RunOutcome::failure(kind, err.to_string())
    }
}

impl fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunOutcome::Success { output_path } => write!(f, "{output_path}"),
            RunOutcome::Failure { message, .. } => write!(f, "{message}"),
        }
    }
}
