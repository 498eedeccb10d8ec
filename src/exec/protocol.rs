// src/exec/protocol.rs

//! The line protocol spoken by the pipeline executable.
//!
//! The child writes plain text lines. `PROGRESS:<int>` lines report progress;
//! every other non-blank line is a *candidate* result line, and the last one
//! seen before a clean exit is taken as the output path. Earlier candidates
//! are treated as transient diagnostics, so a tool that prints anything after
//! its result line would have that line reported instead.
//!
//! Everything here is pure: [`LineFold`] is fed lines one at a time by the
//! process runner, and [`reduce_lines`] folds a whole sequence in one go.

use std::collections::VecDeque;

use crate::types::{FailureKind, ProgressEvent, RunOutcome};

/// Prefix that marks a progress line.
pub const PROGRESS_PREFIX: &str = "PROGRESS:";

/// How many trailing lines are kept for failure diagnostics.
pub const TAIL_LINES: usize = 5;

pub const EXECUTION_FAILED: &str = "execution failed";
pub const OUTPUT_PATH_MISSING: &str = "output path not obtained";

/// Classification of one non-blank output line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputLine {
    /// A progress line. `None` if the value after the prefix was malformed.
    Progress(Option<ProgressEvent>),
    /// Any other line.
    Candidate(String),
}

/// Classify a raw line. Returns `None` for blank lines.
pub fn classify(raw: &str) -> Option<OutputLine> {
    let line = raw.trim();
    if line.is_empty() {
        return None;
    }

    match line.strip_prefix(PROGRESS_PREFIX) {
        Some(value) => Some(OutputLine::Progress(
            value.trim().parse::<i64>().ok().map(ProgressEvent::clamped),
        )),
        None => Some(OutputLine::Candidate(line.to_string())),
    }
}

/// Accumulated protocol state for one run.
#[derive(Debug, Clone, Default)]
pub struct LineFold {
    candidate: Option<String>,
    tail: VecDeque<String>,
}

impl LineFold {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one raw line; returns a progress event if the line carried one.
    pub fn push(&mut self, raw: &str) -> Option<ProgressEvent> {
        let classified = classify(raw)?;

        if self.tail.len() == TAIL_LINES {
            self.tail.pop_front();
        }
        self.tail.push_back(raw.trim().to_string());

        match classified {
            OutputLine::Progress(event) => event,
            OutputLine::Candidate(line) => {
                self.candidate = Some(line);
                None
            }
        }
    }

    /// Most recent candidate line, if any.
    pub fn candidate(&self) -> Option<&str> {
        self.candidate.as_deref()
    }

    /// Retained trailing lines, oldest first.
    pub fn tail(&self) -> impl Iterator<Item = &str> {
        self.tail.iter().map(String::as_str)
    }

    /// Turn the accumulated state and the exit status into the final outcome.
    ///
    /// `exit_code` is `None` when the process was terminated by a signal.
    pub fn finish(self, exit_code: Option<i32>) -> RunOutcome {
        if exit_code != Some(0) {
            let message = if self.tail.is_empty() {
                EXECUTION_FAILED.to_string()
            } else {
                Vec::from(self.tail).join("\n")
            };
            return RunOutcome::failure(FailureKind::ProcessExitNonZero, message);
        }

        match self.candidate {
            Some(output_path) => RunOutcome::Success { output_path },
            None => RunOutcome::failure(FailureKind::NoOutputProduced, OUTPUT_PATH_MISSING),
        }
    }
}

/// Fold a complete line sequence into an outcome, reporting progress as it
/// goes.
pub fn reduce_lines<I, S, F>(lines: I, exit_code: Option<i32>, mut on_progress: F) -> RunOutcome
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    F: FnMut(ProgressEvent),
{
    let mut fold = LineFold::new();
    for line in lines {
        if let Some(event) = fold.push(line.as_ref()) {
            on_progress(event);
        }
    }
    fold.finish(exit_code)
}
