// src/exec/backend.rs

//! Pluggable process backend abstraction.
//!
//! The orchestrator hands a fully built [`Invocation`] to a `ProcessBackend`
//! and gets back exactly one [`RunOutcome`]. Progress observed along the way
//! is forwarded as `RunEvent::Progress` on the given channel.
//!
//! - [`ChildProcessBackend`](super::child::ChildProcessBackend) is the
//!   production implementation that spawns the real executable.
//! - Tests can provide a backend that replays scripted output without
//!   spawning anything.

use std::ffi::OsString;
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;

use tokio::sync::mpsc;

use crate::engine::RunEvent;
use crate::types::{ExecutableLocation, PipelineRequest, RunOutcome};

/// Flag that asks the pipeline to print only protocol lines.
pub const QUIET_FLAG: &str = "--quiet";
pub const CONNECTOR_DIR_FLAG: &str = "--connector-dir";
pub const MODEL_DIR_FLAG: &str = "--model-dir";

/// One concrete process launch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<OsString>,
    pub working_dir: PathBuf,
}

impl Invocation {
    /// `<executable> --quiet --connector-dir <path> --model-dir <path>`,
    /// started from the installation root.
    pub fn for_request(location: &ExecutableLocation, request: &PipelineRequest) -> Self {
        Self {
            program: location.executable.clone(),
            args: vec![
                QUIET_FLAG.into(),
                CONNECTOR_DIR_FLAG.into(),
                request.connector_dir.clone().into_os_string(),
                MODEL_DIR_FLAG.into(),
                request.model_dir.clone().into_os_string(),
            ],
            working_dir: location.working_dir.clone(),
        }
    }
}

/// Trait abstracting how the pipeline executable is run.
pub trait ProcessBackend: Send {
    /// Run the invocation to completion.
    ///
    /// Implementations send `RunEvent::Progress` for each progress line, in
    /// output order, and must not send `Finished` themselves.
    fn run(
        &mut self,
        invocation: Invocation,
        events: mpsc::UnboundedSender<RunEvent>,
    ) -> Pin<Box<dyn Future<Output = RunOutcome> + Send + '_>>;
}
