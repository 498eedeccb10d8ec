use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;

use fcu_launcher::engine::{RunEvent, RunObserver};
use fcu_launcher::errors::{LauncherError, Result};
use fcu_launcher::exec::{Invocation, LineFold, ProcessBackend};
use fcu_launcher::resolve::ExecutableResolver;
use fcu_launcher::types::{ExecutableLocation, RunOutcome};

/// A process backend that:
/// - records every invocation it receives
/// - replays a fixed list of output lines through the real protocol fold
/// - "exits" with the configured code (`None` = killed by a signal).
pub struct FakeProcessBackend {
    lines: Vec<String>,
    exit_code: Option<i32>,
    invocations: Arc<Mutex<Vec<Invocation>>>,
}

impl FakeProcessBackend {
    pub fn new<I, S>(lines: I, exit_code: Option<i32>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            exit_code,
            invocations: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Shared handle to the recorded invocations.
    pub fn invocations(&self) -> Arc<Mutex<Vec<Invocation>>> {
        Arc::clone(&self.invocations)
    }
}

impl ProcessBackend for FakeProcessBackend {
    fn run(
        &mut self,
        invocation: Invocation,
        events: mpsc::UnboundedSender<RunEvent>,
    ) -> Pin<Box<dyn Future<Output = RunOutcome> + Send + '_>> {
        self.invocations.lock().unwrap().push(invocation);
        let lines = self.lines.clone();
        let exit_code = self.exit_code;

        Box::pin(async move {
            let mut fold = LineFold::new();
            for line in &lines {
                if let Some(event) = fold.push(line) {
                    let _ = events.send(RunEvent::Progress(event));
                }
            }
            fold.finish(exit_code)
        })
    }
}

/// What a [`StaticResolver`] answers with.
#[derive(Debug, Clone)]
pub enum StaticResolution {
    Found(ExecutableLocation),
    Unavailable(PathBuf),
    BuildFailed(String),
}

/// Resolver with a canned answer that counts how often it was asked.
#[derive(Debug, Clone)]
pub struct StaticResolver {
    resolution: StaticResolution,
    calls: Arc<AtomicUsize>,
}

impl StaticResolver {
    pub fn new(resolution: StaticResolution) -> Self {
        Self {
            resolution,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn found(executable: impl Into<PathBuf>, working_dir: impl Into<PathBuf>) -> Self {
        Self::new(StaticResolution::Found(ExecutableLocation {
            executable: executable.into(),
            working_dir: working_dir.into(),
        }))
    }

    pub fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

impl ExecutableResolver for StaticResolver {
    fn resolve(&self) -> Pin<Box<dyn Future<Output = Result<ExecutableLocation>> + Send + '_>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let answer = match &self.resolution {
            StaticResolution::Found(location) => Ok(location.clone()),
            StaticResolution::Unavailable(path) => {
                Err(LauncherError::BuildUnavailable(path.clone()))
            }
            StaticResolution::BuildFailed(msg) => Err(LauncherError::BuildFailed(msg.clone())),
        };
        Box::pin(async move { answer })
    }
}

/// One callback received by a [`RecordingObserver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObservedCall {
    Progress(u8),
    Success(String),
    Failure(String),
    Busy(bool),
}

/// Observer that just remembers every callback in order.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    pub calls: Vec<ObservedCall>,
}

impl RunObserver for RecordingObserver {
    fn on_progress(&mut self, percent: u8) {
        self.calls.push(ObservedCall::Progress(percent));
    }

    fn on_success(&mut self, output_path: &str) {
        self.calls.push(ObservedCall::Success(output_path.to_string()));
    }

    fn on_failure(&mut self, message: &str) {
        self.calls.push(ObservedCall::Failure(message.to_string()));
    }

    fn on_busy_change(&mut self, busy: bool) {
        self.calls.push(ObservedCall::Busy(busy));
    }
}
