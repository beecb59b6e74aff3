//! The `run` subcommand: drive the engine against a synthetic subject.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Args;
use crossbeam_channel::RecvTimeoutError;

use upright_core::MonitorConfig;
use upright_engine::{EngineEvent, PostureMonitor};

use crate::synthetic::{LoggingAlert, SyntheticCamera, WavingSubject};

/// Arguments for the `run` subcommand.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// How long to monitor, in seconds
    #[arg(long, default_value_t = 20)]
    pub duration: u64,

    /// Static good/bad threshold (used until calibration)
    #[arg(long, default_value_t = 0.75)]
    pub threshold: f64,

    /// Strictness multiplier applied to the calibration baseline
    #[arg(long, default_value_t = 0.85)]
    pub strictness: f64,

    /// Cooldown between posture alerts, in seconds
    #[arg(long, default_value_t = 3)]
    pub warning_wait: u64,

    /// Run a calibration pass before monitoring
    #[arg(long)]
    pub calibrate: bool,

    /// Seconds the synthetic subject takes for one upright-to-slouch cycle
    #[arg(long, default_value_t = 8.0)]
    pub slouch_cycle: f64,

    /// Print final statistics as JSON
    #[arg(long)]
    pub json: bool,
}

/// Executes the `run` subcommand.
pub fn execute(args: &RunArgs) -> Result<()> {
    let config = MonitorConfig {
        posture_threshold: args.threshold,
        posture_strictness: args.strictness,
        warning_wait_secs: args.warning_wait,
        ..MonitorConfig::default()
    };

    let mut monitor = PostureMonitor::new(config);
    let events = monitor.subscribe();

    let mut subject = WavingSubject::new(0.92, 0.55, args.slouch_cycle);
    if args.calibrate {
        // Hold upright through the calibration window, then start slouching.
        let hold = monitor.config().calibration_duration_secs + 1;
        subject = subject.with_hold(hold as f64);
    }

    monitor
        .start(SyntheticCamera::new(), subject, LoggingAlert)
        .context("failed to start the monitoring loop")?;

    if args.calibrate {
        monitor.request_calibration();
    }

    let deadline = Instant::now() + Duration::from_secs(args.duration);
    let mut last_status = String::new();
    while Instant::now() < deadline {
        match events.recv_timeout(Duration::from_millis(100)) {
            Ok(EngineEvent::Status { text, .. }) => {
                // Only surface transitions; status arrives at frame rate.
                if text != last_status {
                    println!("status: {text}");
                    last_status = text;
                }
            }
            Ok(EngineEvent::Warning(text)) if !text.is_empty() => {
                println!("warning: {text}");
            }
            Ok(EngineEvent::CalibrationStatus(text)) => {
                println!("calibration: {text}");
            }
            Ok(_) | Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    monitor.stop().context("failed to stop the monitoring loop")?;

    let stats = monitor.statistics();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!();
        println!("monitored:       {:>6.0} s", stats.total_secs);
        println!("good posture:    {:>6.1} %", stats.percent_good);
        println!("longest streak:  {:>6.0} s", stats.longest_streak_secs);
        println!("threshold:       {:>6.3}", stats.active_threshold);
        if monitor.policy().is_calibrated() {
            println!("threshold source: calibrated baseline");
        } else {
            println!("threshold source: static configuration");
        }
    }

    Ok(())
}
