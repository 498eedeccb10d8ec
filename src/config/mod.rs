// src/config/mod.rs

//! Configuration loading and validation for fcu-launcher.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk (`loader.rs`).
//! - Validate basic invariants (`validate.rs`).
//! - Resolve the effective mode, install layout and build command
//!   (`settings.rs`).

pub mod loader;
pub mod model;
pub mod settings;
pub mod validate;

pub use loader::{default_config_path, load_and_validate, load_from_path, load_or_default};
pub use model::{BuildSection, ConfigFile, LauncherSection, RawConfigFile};
pub use settings::LauncherSettings;
pub use validate::validate_config;
