// src/config/model.rs

use std::path::PathBuf;

use serde::Deserialize;

use crate::precheck::DEFAULT_MARKER_FILE;
use crate::resolve::DEFAULT_EXECUTABLE_NAME;
use crate::resolve::build::BuildCommand;
use crate::types::DeploymentMode;

/// Launcher configuration exactly as read from a TOML file.
///
/// ```toml
/// [launcher]
/// mode = "development"
/// bundle_dir = "python"
/// app_dir = "."
/// executable = "fcu_cli"
/// marker_file = "asw.csv"
///
/// [build]
/// program = "go"
/// args = ["build", "-o", "{executable}", "./cmd/fcu_cli"]
/// ```
///
/// Every section and key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfigFile {
    #[serde(default)]
    pub launcher: LauncherSection,

    #[serde(default)]
    pub build: BuildSection,
}

/// `[launcher]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct LauncherSection {
    /// `"packaged"` or `"development"`. When absent, debug builds run in
    /// development mode and release builds in packaged mode.
    #[serde(default)]
    pub mode: Option<DeploymentMode>,

    /// Directory holding the pipeline executable.
    #[serde(default)]
    pub bundle_dir: Option<PathBuf>,

    /// Installation root used as working directory.
    #[serde(default)]
    pub app_dir: Option<PathBuf>,

    /// Executable file name; the platform suffix is added when missing.
    #[serde(default = "default_executable")]
    pub executable: String,

    /// File that must exist inside the connector folder.
    #[serde(default = "default_marker_file")]
    pub marker_file: String,
}

fn default_executable() -> String {
    DEFAULT_EXECUTABLE_NAME.to_string()
}

fn default_marker_file() -> String {
    DEFAULT_MARKER_FILE.to_string()
}

impl Default for LauncherSection {
    fn default() -> Self {
        Self {
            mode: None,
            bundle_dir: None,
            app_dir: None,
            executable: default_executable(),
            marker_file: default_marker_file(),
        }
    }
}

/// `[build]` section, only used in development mode.
#[derive(Debug, Clone, Deserialize)]
pub struct BuildSection {
    #[serde(default = "default_build_program")]
    pub program: String,

    /// Arguments; `{executable}` expands to the full executable path.
    #[serde(default = "default_build_args")]
    pub args: Vec<String>,
}

fn default_build_program() -> String {
    BuildCommand::default().program
}

fn default_build_args() -> Vec<String> {
    BuildCommand::default().args
}

impl Default for BuildSection {
    fn default() -> Self {
        Self {
            program: default_build_program(),
            args: default_build_args(),
        }
    }
}

/// Validated configuration.
///
/// Only obtainable through `TryFrom<RawConfigFile>` (see `validate.rs`) or
/// the loader, so the invariants checked there always hold.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub launcher: LauncherSection,
    pub build: BuildSection,
    /// Directory that relative `bundle_dir` / `app_dir` are resolved against.
    pub base_dir: PathBuf,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(
        launcher: LauncherSection,
        build: BuildSection,
        base_dir: PathBuf,
    ) -> Self {
        Self {
            launcher,
            build,
            base_dir,
        }
    }

    /// Same config with a different base directory.
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = base_dir.into();
        self
    }
}
