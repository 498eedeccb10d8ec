// src/resolve/prebuilt.rs

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::errors::{LauncherError, Result};
use crate::fs::FileSystem;
use crate::types::ExecutableLocation;

use super::{ExecutableResolver, InstallLayout};

/// Resolver for packaged installs: never builds anything.
#[derive(Debug, Clone)]
pub struct PrebuiltOnly {
    layout: InstallLayout,
    fs: Arc<dyn FileSystem>,
}

impl PrebuiltOnly {
    pub fn new(layout: InstallLayout, fs: Arc<dyn FileSystem>) -> Self {
        Self { layout, fs }
    }
}

impl ExecutableResolver for PrebuiltOnly {
    fn resolve(&self) -> Pin<Box<dyn Future<Output = Result<ExecutableLocation>> + Send + '_>> {
        Box::pin(async move {
            let location = self.layout.location();
            if self.fs.is_file(&location.executable) {
                debug!(executable = %location.executable.display(), "using bundled executable");
                return Ok(location);
            }

            warn!(
                executable = %location.executable.display(),
                "bundled executable missing; building is disabled in packaged mode"
            );
            Err(LauncherError::BuildUnavailable(location.executable))
        })
    }
}
