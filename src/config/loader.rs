// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::Result;

/// Load a configuration file from a given path and return the raw
/// `RawConfigFile`.
///
/// This only performs TOML deserialization; use [`load_and_validate`] to get
/// a checked [`ConfigFile`].
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a configuration file from path and validate it.
///
/// Relative directories in the file are resolved against the file's own
/// directory.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let path = path.as_ref();
    let raw_config = load_from_path(path)?;
    let config = ConfigFile::try_from(raw_config)?.with_base_dir(config_base_dir(path));
    Ok(config)
}

/// Load the config the CLI asked for.
///
/// - An explicit path must exist and be valid.
/// - Without one, [`default_config_path`] is used if present; otherwise all
///   defaults apply, relative to the current directory.
pub fn load_or_default(explicit: Option<&Path>) -> Result<ConfigFile> {
    if let Some(path) = explicit {
        return load_and_validate(path);
    }

    let default_path = default_config_path();
    if default_path.is_file() {
        debug!(path = %default_path.display(), "loading default config file");
        return load_and_validate(&default_path);
    }

    debug!("no config file found; using built-in defaults");
    let config = ConfigFile::try_from(RawConfigFile::default())?.with_base_dir(current_dir());
    Ok(config)
}

/// `Launcher.toml` in the current working directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("Launcher.toml")
}

/// - If the config path has a non-empty parent (e.g. "conf/Launcher.toml"),
///   that directory is the base.
/// - A bare file name falls back to the current working directory.
fn config_base_dir(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => current_dir(),
    }
}

fn current_dir() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}
