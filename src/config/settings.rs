// src/config/settings.rs

//! Turns a validated [`ConfigFile`] into the concrete values the launcher
//! runs with.

use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::config::model::ConfigFile;
use crate::errors::Result;
use crate::resolve::build::BuildCommand;
use crate::resolve::{InstallLayout, with_exe_suffix};
use crate::types::DeploymentMode;

/// Fully resolved launcher settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LauncherSettings {
    pub mode: DeploymentMode,
    pub layout: InstallLayout,
    pub build: BuildCommand,
    pub marker_file: String,
}

impl ConfigFile {
    /// Resolve settings, with `mode_override` (from the CLI) taking precedence
    /// over the file.
    ///
    /// Directories left unset default to the launcher's own directory in
    /// packaged mode and to the config base directory in development mode.
    pub fn settings(&self, mode_override: Option<DeploymentMode>) -> Result<LauncherSettings> {
        let mode = mode_override
            .or(self.launcher.mode)
            .unwrap_or_default();

        let default_dir = match mode {
            DeploymentMode::Packaged => launcher_dir()?,
            DeploymentMode::Development => self.base_dir.clone(),
        };

        let bundle_dir = self.resolve_dir(self.launcher.bundle_dir.as_deref(), &default_dir);
        let app_dir = self.resolve_dir(self.launcher.app_dir.as_deref(), &default_dir);

        Ok(LauncherSettings {
            mode,
            layout: InstallLayout::new(
                bundle_dir,
                app_dir,
                with_exe_suffix(self.launcher.executable.trim()),
            ),
            build: BuildCommand::new(self.build.program.trim(), self.build.args.iter().cloned()),
            marker_file: self.launcher.marker_file.trim().to_string(),
        })
    }

    fn resolve_dir(&self, configured: Option<&Path>, default_dir: &Path) -> PathBuf {
        match configured {
            Some(dir) if dir.is_absolute() => dir.to_path_buf(),
            Some(dir) => self.base_dir.join(dir),
            None => default_dir.to_path_buf(),
        }
    }
}

/// Directory containing the running launcher binary.
fn launcher_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("locating the launcher executable")?;
    let dir = exe
        .parent()
        .map(Path::to_path_buf)
        .with_context(|| format!("launcher executable {:?} has no parent directory", exe))?;
    Ok(dir)
}
