// src/lib.rs

pub mod cli;
pub mod config;
pub mod console;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod precheck;
pub mod resolve;
pub mod types;

use std::sync::Arc;

use anyhow::{Result, anyhow};
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::{LauncherSettings, load_or_default};
use crate::console::ConsoleObserver;
use crate::engine::{Orchestrator, drive_observer};
use crate::exec::{ChildProcessBackend, Invocation};
use crate::fs::{FileSystem, RealFileSystem};
use crate::precheck::check_request;
use crate::resolve::resolver_for_mode;
use crate::types::{PipelineRequest, RunOutcome};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading and mode selection
/// - the folder / marker-file precheck
/// - the resolver variant for the deployment mode
/// - the orchestrator running on a background task
/// - the console observer draining run events
///
/// On success the output path is printed to stdout.
pub async fn run(args: CliArgs) -> Result<()> {
    let config = load_or_default(args.config.as_deref())?;
    let settings = config.settings(args.mode.map(Into::into))?;
    info!(mode = ?settings.mode, "launcher settings resolved");

    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);
    let request = check_request(
        fs.as_ref(),
        &args.connector_dir,
        &args.model_dir,
        &settings.marker_file,
    )?;

    if args.dry_run {
        print_dry_run(&settings, &request, fs.as_ref());
        return Ok(());
    }

    let resolver = resolver_for_mode(
        settings.mode,
        settings.layout.clone(),
        settings.build.clone(),
        fs,
    );
    let orchestrator = Orchestrator::new(resolver, ChildProcessBackend::new());

    let (events, handle) = orchestrator.spawn(request);
    let mut console = ConsoleObserver::new(!args.no_progress);
    drive_observer(events, &mut console).await;

    let (_orchestrator, outcome) = handle.await?;
    match outcome {
        RunOutcome::Success { output_path } => {
            println!("{output_path}");
            Ok(())
        }
        RunOutcome::Failure { message, .. } => Err(anyhow!(message)),
    }
}

/// Dry-run output: settings and the command line that would be run.
fn print_dry_run(settings: &LauncherSettings, request: &PipelineRequest, fs: &dyn FileSystem) {
    let location = settings.layout.location();
    let present = fs.is_file(&location.executable);

    println!("fcu-launcher dry-run");
    println!("  mode = {:?}", settings.mode);
    println!("  executable = {}", location.executable.display());
    println!("  executable present = {present}");
    println!("  working dir = {}", location.working_dir.display());
    if !present {
        println!(
            "  build = {} {}",
            settings.build.program,
            settings.build.expanded_args(&location.executable).join(" ")
        );
    }

    let invocation = Invocation::for_request(&location, request);
    let args: Vec<String> = invocation
        .args
        .iter()
        .map(|a| a.to_string_lossy().into_owned())
        .collect();
    println!("  command = {} {}", invocation.program.display(), args.join(" "));

    debug!("dry-run complete (no execution)");
}
