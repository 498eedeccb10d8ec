// src/console.rs

//! Terminal presentation of a pipeline run.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::engine::RunObserver;

const STATUS_RUNNING: &str = "running... this can take a while";
const STATUS_DONE: &str = "done";
const STATUS_FAILED: &str = "failed";

/// Renders run events as a progress bar on stderr, or as plain status lines
/// when the bar is disabled.
///
/// The output path itself is not printed here; the caller writes it to
/// stdout once the run is over.
#[derive(Debug)]
pub struct ConsoleObserver {
    bar: Option<ProgressBar>,
}

impl ConsoleObserver {
    pub fn new(show_bar: bool) -> Self {
        let bar = show_bar.then(|| {
            let bar = ProgressBar::new(100);
            if let Ok(style) =
                ProgressStyle::with_template("{spinner} [{elapsed_precise}] {bar:40} {pos:>3}% {msg}")
            {
                bar.set_style(style);
            }
            bar
        });

        Self { bar }
    }
}

impl RunObserver for ConsoleObserver {
    fn on_progress(&mut self, percent: u8) {
        match &self.bar {
            Some(bar) => bar.set_position(u64::from(percent)),
            None => eprintln!("{STATUS_RUNNING} ({percent}%)"),
        }
    }

    fn on_success(&mut self, _output_path: &str) {
        match &self.bar {
            Some(bar) => bar.finish_with_message(STATUS_DONE),
            None => eprintln!("{STATUS_DONE}"),
        }
    }

    // The message is reported by `main` along with any other error.
    fn on_failure(&mut self, _message: &str) {
        match &self.bar {
            Some(bar) => bar.abandon_with_message(STATUS_FAILED),
            None => eprintln!("{STATUS_FAILED}"),
        }
    }

    fn on_busy_change(&mut self, busy: bool) {
        if !busy {
            return;
        }
        match &self.bar {
            Some(bar) => {
                bar.set_position(0);
                bar.set_message(STATUS_RUNNING);
                bar.enable_steady_tick(Duration::from_millis(120));
            }
            None => eprintln!("{STATUS_RUNNING}"),
        }
    }
}
