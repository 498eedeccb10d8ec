// src/engine/orchestrator.rs

use std::fmt;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::info;

use crate::exec::{Invocation, ProcessBackend};
use crate::resolve::ExecutableResolver;
use crate::types::{PipelineRequest, RunOutcome};

use super::RunEvent;

/// Runs the pipeline for one request at a time.
///
/// The folders in the request are expected to have passed
/// [`check_request`](crate::precheck::check_request) already. `execute` takes
/// `&mut self`, so a single orchestrator can never have two runs in flight.
pub struct Orchestrator<R: ExecutableResolver, B: ProcessBackend> {
    resolver: R,
    backend: B,
}

impl<R: ExecutableResolver, B: ProcessBackend> fmt::Debug for Orchestrator<R, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Orchestrator").finish_non_exhaustive()
    }
}

impl<R: ExecutableResolver, B: ProcessBackend> Orchestrator<R, B> {
    pub fn new(resolver: R, backend: B) -> Self {
        Self { resolver, backend }
    }

    /// Resolve the executable, run it, and report through `events`.
    ///
    /// Never fails: every anticipated problem ends up as a
    /// `RunOutcome::Failure`. Send errors on `events` are ignored, so a caller
    /// that goes away does not interrupt the run.
    pub async fn execute(
        &mut self,
        request: &PipelineRequest,
        events: &mpsc::UnboundedSender<RunEvent>,
    ) -> RunOutcome {
        let _ = events.send(RunEvent::BusyChanged(true));

        let outcome = self.resolve_and_run(request, events.clone()).await;
        match &outcome {
            RunOutcome::Success { output_path } => {
                info!(output_path = %output_path, "pipeline run succeeded");
            }
            RunOutcome::Failure { kind, message } => {
                info!(?kind, message = %message, "pipeline run failed");
            }
        }

        let _ = events.send(RunEvent::Finished(outcome.clone()));
        let _ = events.send(RunEvent::BusyChanged(false));
        outcome
    }

    async fn resolve_and_run(
        &mut self,
        request: &PipelineRequest,
        events: mpsc::UnboundedSender<RunEvent>,
    ) -> RunOutcome {
        let location = match self.resolver.resolve().await {
            Ok(location) => location,
            Err(err) => return RunOutcome::from(err),
        };

        let invocation = Invocation::for_request(&location, request);
        self.backend.run(invocation, events).await
    }
}

impl<R, B> Orchestrator<R, B>
where
    R: ExecutableResolver + 'static,
    B: ProcessBackend + 'static,
{
    /// Run `request` on a background Tokio task.
    ///
    /// Returns the event receiver for this run and a handle that yields the
    /// orchestrator back together with the outcome, ready for the next run.
    pub fn spawn(
        mut self,
        request: PipelineRequest,
    ) -> (mpsc::UnboundedReceiver<RunEvent>, JoinHandle<(Self, RunOutcome)>) {
        let (tx, rx) = mpsc::unbounded_channel::<RunEvent>();

        let handle = tokio::spawn(async move {
            let outcome = self.execute(&request, &tx).await;
            (self, outcome)
        });

        (rx, handle)
    }
}
