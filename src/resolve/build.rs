// src/resolve/build.rs

use std::future::Future;
use std::path::Path;
use std::pin::Pin;
use std::process::Stdio;
use std::sync::Arc;

use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::errors::{LauncherError, Result};
use crate::fs::FileSystem;
use crate::types::ExecutableLocation;

use super::{ExecutableResolver, InstallLayout};

/// Placeholder in build arguments that expands to the executable path.
pub const EXECUTABLE_PLACEHOLDER: &str = "{executable}";

/// Number of trailing build log lines kept in a `BuildFailed` message.
pub const BUILD_LOG_TAIL: usize = 20;

/// Toolchain invocation that produces the pipeline executable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl Default for BuildCommand {
    fn default() -> Self {
        Self {
            program: "go".to_string(),
            args: vec![
                "build".to_string(),
                "-o".to_string(),
                EXECUTABLE_PLACEHOLDER.to_string(),
                "./cmd/fcu_cli".to_string(),
            ],
        }
    }
}

impl BuildCommand {
    pub fn new(program: impl Into<String>, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Arguments with every `{executable}` replaced by `executable`.
    pub fn expanded_args(&self, executable: &Path) -> Vec<String> {
        let exe = executable.to_string_lossy();
        self.args
            .iter()
            .map(|arg| arg.replace(EXECUTABLE_PLACEHOLDER, &exe))
            .collect()
    }
}

/// Resolver for development checkouts: builds the executable when absent.
#[derive(Debug, Clone)]
pub struct BuildIfMissing {
    layout: InstallLayout,
    build: BuildCommand,
    fs: Arc<dyn FileSystem>,
}

impl BuildIfMissing {
    pub fn new(layout: InstallLayout, build: BuildCommand, fs: Arc<dyn FileSystem>) -> Self {
        Self { layout, build, fs }
    }

    async fn run_build(&self, executable: &Path) -> Result<()> {
        let args = self.build.expanded_args(executable);
        info!(
            program = %self.build.program,
            ?args,
            cwd = %self.layout.app_dir.display(),
            "pipeline executable missing; building it"
        );

        let output = Command::new(&self.build.program)
            .args(&args)
            .current_dir(&self.layout.app_dir)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| {
                LauncherError::BuildFailed(format!(
                    "could not start '{}': {e}",
                    self.build.program
                ))
            })?;

        if !output.status.success() {
            let detail = build_failure_detail(&output.stdout, &output.stderr);
            warn!(
                exit_code = output.status.code().unwrap_or(-1),
                "build command failed"
            );
            return Err(LauncherError::BuildFailed(detail));
        }

        debug!("build command finished");
        Ok(())
    }
}

impl ExecutableResolver for BuildIfMissing {
    fn resolve(&self) -> Pin<Box<dyn Future<Output = Result<ExecutableLocation>> + Send + '_>> {
        Box::pin(async move {
            let location = self.layout.location();
            if self.fs.is_file(&location.executable) {
                debug!(executable = %location.executable.display(), "using existing executable");
                return Ok(location);
            }

            self.run_build(&location.executable).await?;

            if !self.fs.is_file(&location.executable) {
                return Err(LauncherError::BuildFailed(format!(
                    "build succeeded but {} was not produced",
                    location.executable.display()
                )));
            }

            info!(executable = %location.executable.display(), "pipeline executable built");
            Ok(location)
        })
    }
}

/// Trailing lines of stderr, or of stdout when stderr is empty.
fn build_failure_detail(stdout: &[u8], stderr: &[u8]) -> String {
    let stderr = String::from_utf8_lossy(stderr);
    let stdout = String::from_utf8_lossy(stdout);
    let text = match stderr.trim() {
        "" => stdout.trim(),
        err => err,
    };

    if text.is_empty() {
        return "unknown error".to_string();
    }

    let lines: Vec<&str> = text.lines().collect();
    let start = lines.len().saturating_sub(BUILD_LOG_TAIL);
    lines[start..].join("\n")
}
