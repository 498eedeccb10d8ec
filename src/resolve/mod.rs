// src/resolve/mod.rs

//! Locating (and, in development, building) the pipeline executable.
//!
//! The orchestrator talks to an [`ExecutableResolver`] and never branches on
//! the deployment mode itself. The variant is picked once at startup:
//!
//! - [`PrebuiltOnly`] for packaged installs: the binary must already exist.
//! - [`BuildIfMissing`] for source checkouts: a missing binary is built with
//!   the configured [`BuildCommand`].
//!
//! Both variants accept whatever binary is already on disk. There is no
//! staleness check against the sources.

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::Arc;

use crate::errors::Result;
use crate::fs::FileSystem;
use crate::types::{DeploymentMode, ExecutableLocation};

pub mod build;
pub mod prebuilt;

pub use build::{BuildCommand, BuildIfMissing};
pub use prebuilt::PrebuiltOnly;

/// Default file name of the pipeline executable (without platform suffix).
pub const DEFAULT_EXECUTABLE_NAME: &str = "fcu_cli";

/// Where the pipeline binary lives and where it runs from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallLayout {
    /// Directory holding the pipeline executable.
    pub bundle_dir: PathBuf,
    /// Installation root; working directory for both build and run.
    pub app_dir: PathBuf,
    /// File name of the executable inside `bundle_dir`.
    pub executable_name: String,
}

impl InstallLayout {
    pub fn new(
        bundle_dir: impl Into<PathBuf>,
        app_dir: impl Into<PathBuf>,
        executable_name: impl Into<String>,
    ) -> Self {
        Self {
            bundle_dir: bundle_dir.into(),
            app_dir: app_dir.into(),
            executable_name: executable_name.into(),
        }
    }

    pub fn executable_path(&self) -> PathBuf {
        self.bundle_dir.join(&self.executable_name)
    }

    pub fn location(&self) -> ExecutableLocation {
        ExecutableLocation {
            executable: self.executable_path(),
            working_dir: self.app_dir.clone(),
        }
    }
}

/// Append the platform executable suffix (`.exe` on Windows) unless the name
/// already carries an extension.
pub fn with_exe_suffix(name: &str) -> String {
    let suffix = std::env::consts::EXE_SUFFIX;
    if suffix.is_empty() || std::path::Path::new(name).extension().is_some() {
        name.to_string()
    } else {
        format!("{name}{suffix}")
    }
}

/// Capability that yields a runnable pipeline executable.
pub trait ExecutableResolver: Send + Sync {
    /// Return the executable location, building it first if the variant
    /// allows that. Fails with `BuildUnavailable` or `BuildFailed`.
    fn resolve(&self) -> Pin<Box<dyn Future<Output = Result<ExecutableLocation>> + Send + '_>>;
}

impl ExecutableResolver for Box<dyn ExecutableResolver> {
    fn resolve(&self) -> Pin<Box<dyn Future<Output = Result<ExecutableLocation>> + Send + '_>> {
        (**self).resolve()
    }
}

/// Pick the resolver variant for a deployment mode.
pub fn resolver_for_mode(
    mode: DeploymentMode,
    layout: InstallLayout,
    build: BuildCommand,
    fs: Arc<dyn FileSystem>,
) -> Box<dyn ExecutableResolver> {
    match mode {
        DeploymentMode::Packaged => Box::new(PrebuiltOnly::new(layout, fs)),
        DeploymentMode::Development => Box::new(BuildIfMissing::new(layout, build, fs)),
    }
}
