//! Upright CLI
//!
//! Command-line interface for the upright posture monitoring engine.
//! Runs the full monitoring loop against a synthetic capture source and
//! pose provider, which makes it a self-contained way to watch the
//! engine classify, alert, calibrate, and accumulate history.
//!
//! # Usage
//!
//! ```bash
//! # Monitor a synthetic subject for 20 seconds
//! upright run --duration 20
//!
//! # Calibrate first, then monitor, and print statistics as JSON
//! upright run --duration 20 --calibrate --json
//!
//! # Display version information
//! upright version
//! ```

use clap::{Parser, Subcommand};

pub mod run;
pub mod synthetic;

/// Upright Command Line Interface
#[derive(Parser, Debug)]
#[command(name = "upright")]
#[command(author, version, about = "Posture monitoring from body-landmark streams")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the monitoring loop against a synthetic subject
    Run(run::RunArgs),

    /// Display version information
    Version,
}
