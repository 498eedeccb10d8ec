// src/engine/observer.rs

//! Callback-style view of the run event channel.

use tokio::sync::mpsc;

use crate::types::RunOutcome;

use super::RunEvent;

/// Presentation callbacks for one pipeline run.
///
/// All calls happen on the task that drains the event channel, never on the
/// worker running the pipeline.
pub trait RunObserver {
    fn on_progress(&mut self, percent: u8);
    fn on_success(&mut self, output_path: &str);
    fn on_failure(&mut self, message: &str);
    fn on_busy_change(&mut self, busy: bool);
}

/// Deliver a single event to `observer`.
///
/// Useful for front ends that poll the channel from their own loop with
/// `try_recv`. The channel is unbounded, so polling slowly never holds up the
/// run.
pub fn dispatch_event<O: RunObserver + ?Sized>(observer: &mut O, event: RunEvent) {
    match event {
        RunEvent::BusyChanged(busy) => observer.on_busy_change(busy),
        RunEvent::Progress(progress) => observer.on_progress(progress.percent),
        RunEvent::Finished(RunOutcome::Success { output_path }) => {
            observer.on_success(&output_path)
        }
        RunEvent::Finished(RunOutcome::Failure { message, .. }) => observer.on_failure(&message),
    }
}

/// Drain `events` into `observer` until the run's sender is dropped.
///
/// Returns the outcome carried by the `Finished` event, if one arrived.
pub async fn drive_observer<O: RunObserver + ?Sized>(
    mut events: mpsc::UnboundedReceiver<RunEvent>,
    observer: &mut O,
) -> Option<RunOutcome> {
    let mut finished = None;
    while let Some(event) = events.recv().await {
        if let RunEvent::Finished(outcome) = &event {
            finished = Some(outcome.clone());
        }
        dispatch_event(observer, event);
    }
    finished
}
