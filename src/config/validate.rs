// src/config/validate.rs

use std::path::PathBuf;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{LauncherError, Result};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::LauncherError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(
            raw.launcher,
            raw.build,
            PathBuf::from("."),
        ))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_launcher(cfg)?;
    validate_build(cfg)?;
    Ok(())
}

fn validate_launcher(cfg: &RawConfigFile) -> Result<()> {
    let executable = cfg.launcher.executable.trim();
    if executable.is_empty() {
        return Err(LauncherError::ConfigError(
            "[launcher].executable must not be empty".to_string(),
        ));
    }
    if executable.contains(['/', '\\']) {
        return Err(LauncherError::ConfigError(format!(
            "[launcher].executable must be a file name, not a path (got '{executable}'); \
             use bundle_dir for the directory"
        )));
    }

    if cfg.launcher.marker_file.trim().is_empty() {
        return Err(LauncherError::ConfigError(
            "[launcher].marker_file must not be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_build(cfg: &RawConfigFile) -> Result<()> {
    if cfg.build.program.trim().is_empty() {
        return Err(LauncherError::ConfigError(
            "[build].program must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// Validate an already-built config again (e.g. after manual edits in tests).
pub fn validate_config(cfg: &ConfigFile) -> Result<()> {
    let raw = RawConfigFile {
        launcher: cfg.launcher.clone(),
        build: cfg.build.clone(),
    };
    validate_raw_config(&raw)
}
