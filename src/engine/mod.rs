// src/engine/mod.rs

//! Orchestration engine for fcu-launcher.
//!
//! The [`Orchestrator`] composes an executable resolver and a process backend
//! into one asynchronous run. It reports back only through [`RunEvent`]s on an
//! unbounded `tokio::sync::mpsc` channel, so the presentation layer can consume them on
//! whatever loop it already has. [`observer`] adapts that channel to plain
//! callbacks.

use crate::types::{ProgressEvent, RunOutcome};

/// Messages flowing from a run to its caller.
///
/// For one run the order is always: `BusyChanged(true)`, zero or more
/// `Progress`, `Finished`, `BusyChanged(false)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunEvent {
    BusyChanged(bool),
    Progress(ProgressEvent),
    Finished(RunOutcome),
}

pub mod observer;
pub mod orchestrator;

pub use observer::{RunObserver, dispatch_event, drive_observer};
pub use orchestrator::Orchestrator;
