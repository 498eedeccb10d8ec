// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::types::DeploymentMode;

/// Command-line arguments for `fcu-launcher`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "fcu-launcher",
    version,
    about = "Run the FCU analysis pipeline on a connector folder and a model folder.",
    long_about = None
)]
pub struct CliArgs {
    /// Input folder; must contain the marker file (asw.csv by default).
    #[arg(long, value_name = "DIR")]
    pub connector_dir: String,

    /// Model folder passed through to the pipeline.
    #[arg(long, value_name = "DIR")]
    pub model_dir: String,

    /// Path to the launcher config file (TOML).
    ///
    /// Default: `Launcher.toml` in the current working directory, if present.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Deployment mode; overrides `[launcher].mode` from the config file.
    #[arg(long, value_enum, value_name = "MODE")]
    pub mode: Option<ModeArg>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `FCU_LAUNCHER_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Check the inputs and print the resolved invocation without running it.
    #[arg(long)]
    pub dry_run: bool,

    /// Do not draw a progress bar; print plain status lines instead.
    #[arg(long)]
    pub no_progress: bool,
}

/// Deployment mode as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum ModeArg {
    Packaged,
    Development,
}

impl From<ModeArg> for DeploymentMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Packaged => DeploymentMode::Packaged,
            ModeArg::Development => DeploymentMode::Development,
        }
    }
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
