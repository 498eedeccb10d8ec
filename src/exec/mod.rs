// src/exec/mod.rs

//! Process execution layer.
//!
//! This module runs the pipeline executable with `tokio::process::Command`
//! and turns its output into progress events and a final outcome.
//!
//! - [`backend`] provides the `ProcessBackend` trait and the `Invocation`
//!   argument contract.
//! - [`child`] is the production backend that spawns the executable and
//!   drains its output.
//! - [`protocol`] holds the pure line classification and fold.

pub mod backend;
pub mod child;
pub mod protocol;

pub use backend::{Invocation, ProcessBackend};
pub use child::ChildProcessBackend;
pub use protocol::{LineFold, OutputLine, classify, reduce_lines};
