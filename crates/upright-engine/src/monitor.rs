//! The monitoring loop and its presentation-facing handle.
//!
//! [`PostureMonitor`] owns a dedicated worker thread that drives the
//! capture → extraction → classification → alerting → aggregation
//! pipeline. Frame capture and pose estimation are blocking,
//! variable-latency operations, so the worker is the only place they run;
//! every presentation-facing call on the handle is either a snapshot read
//! or a fire-and-forget command serviced asynchronously by the worker.
//!
//! The worker is the sole writer of alert state, calibration state, and
//! the aggregation window. The posture log is the one shared structure:
//! the worker appends fully-built points, readers take snapshots.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{unbounded, Receiver, Sender};
use parking_lot::{Mutex, RwLock};

use upright_core::{
    AlertSink, CaptureError, CaptureSource, EngineError, EngineResult, Frame, MonitorConfig,
    PoseEstimator, PostureStats, ThresholdPolicy, Timestamp, Verdict,
};

use crate::aggregate::SecondAggregator;
use crate::alert::AlertController;
use crate::calibrate::CalibrationSession;
use crate::classify::classify;
use crate::events::{EngineEvent, Subscribers};
use crate::log::SharedPostureLog;
use crate::metric::posture_ratio;
use crate::stats::compute_stats;

/// Initial delay between reconnect attempts.
const RECONNECT_DELAY_INITIAL: Duration = Duration::from_millis(500);
/// Reconnect delay ceiling.
const RECONNECT_DELAY_MAX: Duration = Duration::from_secs(5);

const WARNING_RECONNECTING: &str = "No camera feed, trying to reconnect...";
const WARNING_TOO_DARK: &str = "Too dark, please improve lighting";

/// Lifecycle state of the monitoring loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorState {
    /// Constructed, not yet pulling frames.
    Idle,
    /// Pulling frames and classifying posture.
    Running,
    /// Collecting calibration samples; classification suspended.
    Calibrating,
    /// Capture failed; reconnecting with backoff.
    Disconnected,
    /// Loop exited; terminal.
    Stopped,
}

impl std::fmt::Display for MonitorState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Running => write!(f, "running"),
            Self::Calibrating => write!(f, "calibrating"),
            Self::Disconnected => write!(f, "disconnected"),
            Self::Stopped => write!(f, "stopped"),
        }
    }
}

enum Command {
    Calibrate,
    Stop,
}

/// State shared between the handle and the worker.
struct Shared {
    state: RwLock<MonitorState>,
    policy: RwLock<ThresholdPolicy>,
    subscribers: Mutex<Subscribers>,
}

/// Handle to the posture monitoring engine.
///
/// Construct with a [`MonitorConfig`], subscribe for notifications, then
/// [`start`] the worker with the capture, estimation, and alert
/// collaborators. See the crate-level docs for the full flow.
///
/// [`start`]: PostureMonitor::start
pub struct PostureMonitor {
    config: MonitorConfig,
    shared: Arc<Shared>,
    log: SharedPostureLog,
    command_tx: Sender<Command>,
    command_rx: Option<Receiver<Command>>,
    worker: Option<JoinHandle<()>>,
}

impl PostureMonitor {
    /// Creates an idle monitor.
    ///
    /// The configuration is clamped into its valid ranges; the threshold
    /// policy starts static at `posture_threshold`.
    #[must_use]
    pub fn new(config: MonitorConfig) -> Self {
        let config = config.clamped();
        let (command_tx, command_rx) = unbounded();
        Self {
            shared: Arc::new(Shared {
                state: RwLock::new(MonitorState::Idle),
                policy: RwLock::new(ThresholdPolicy::Static(config.posture_threshold)),
                subscribers: Mutex::new(Subscribers::new()),
            }),
            log: SharedPostureLog::new(config.log_capacity),
            command_tx,
            command_rx: Some(command_rx),
            worker: None,
            config,
        }
    }

    /// Registers a notification subscriber.
    ///
    /// May be called before or after [`start`](PostureMonitor::start).
    pub fn subscribe(&self) -> Receiver<EngineEvent> {
        self.shared.subscribers.lock().subscribe()
    }

    /// Starts the monitoring loop on its worker thread.
    ///
    /// The worker takes ownership of all three collaborators for the
    /// lifetime of the loop.
    ///
    /// # Errors
    ///
    /// Returns an invalid-state error if the monitor was already started.
    pub fn start<C, P, S>(&mut self, capture: C, estimator: P, sink: S) -> EngineResult<()>
    where
        C: CaptureSource + 'static,
        P: PoseEstimator + 'static,
        S: AlertSink + 'static,
    {
        let Some(commands) = self.command_rx.take() else {
            let state = *self.shared.state.read();
            return Err(EngineError::invalid_state("idle", state.to_string()));
        };

        let worker = Worker {
            config: self.config.clone(),
            capture: Box::new(capture),
            estimator: Box::new(estimator),
            sink: Box::new(sink),
            shared: Arc::clone(&self.shared),
            log: self.log.clone(),
            commands,
            alerts: AlertController::new(),
            aggregator: SecondAggregator::new(),
            session: None,
            reconnect_delay: RECONNECT_DELAY_INITIAL,
            last_warning: String::new(),
        };

        let handle = thread::Builder::new()
            .name("posture-monitor".into())
            .spawn(move || worker.run())
            .map_err(|e| EngineError::internal(format!("failed to spawn worker: {e}")))?;
        self.worker = Some(handle);
        Ok(())
    }

    /// Requests a calibration run.
    ///
    /// Fire-and-forget: the worker begins the session at its next tick
    /// and reports the outcome via a calibration-status notification. A
    /// request made while a session is already in progress is ignored.
    pub fn request_calibration(&self) {
        let _ = self.command_tx.send(Command::Calibrate);
    }

    /// Stops the monitoring loop and waits for the worker to exit.
    ///
    /// The worker exits at the end of its current iteration, never
    /// mid-frame, releasing the capture source. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns an internal error if the worker thread panicked.
    pub fn stop(&mut self) -> EngineResult<()> {
        let Some(handle) = self.worker.take() else {
            return Ok(());
        };
        let _ = self.command_tx.send(Command::Stop);
        handle
            .join()
            .map_err(|_| EngineError::internal("monitor worker panicked"))?;
        Ok(())
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> MonitorState {
        *self.shared.state.read()
    }

    /// Currently active threshold policy.
    #[must_use]
    pub fn policy(&self) -> ThresholdPolicy {
        *self.shared.policy.read()
    }

    /// The engine configuration (after clamping).
    #[must_use]
    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Chart-ready posture history as `(relative seconds, ratio)` pairs.
    #[must_use]
    pub fn history(&self) -> Vec<(f64, f64)> {
        self.log.history()
    }

    /// Posture history restricted to the trailing `window_secs`.
    #[must_use]
    pub fn history_window(&self, window_secs: f64) -> Vec<(f64, f64)> {
        self.log.history_window(window_secs)
    }

    /// Summary statistics over the full posture log.
    #[must_use]
    pub fn statistics(&self) -> PostureStats {
        let policy = self.policy();
        compute_stats(&self.log.snapshot(), &policy)
    }
}

impl Drop for PostureMonitor {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}

/// The monitoring loop itself; owns the collaborators on the worker
/// thread.
struct Worker {
    config: MonitorConfig,
    capture: Box<dyn CaptureSource>,
    estimator: Box<dyn PoseEstimator>,
    sink: Box<dyn AlertSink>,
    shared: Arc<Shared>,
    log: SharedPostureLog,
    commands: Receiver<Command>,
    alerts: AlertController,
    aggregator: SecondAggregator,
    session: Option<CalibrationSession>,
    reconnect_delay: Duration,
    last_warning: String,
}

impl Worker {
    fn run(mut self) {
        self.set_state(MonitorState::Running);
        tracing::info!(
            threshold = self.config.posture_threshold,
            "posture monitor started"
        );

        loop {
            if self.drain_commands() {
                break;
            }

            let frame = match self.capture.read_frame() {
                Ok(frame) => frame,
                Err(err) => {
                    self.handle_disconnect(&err);
                    continue;
                }
            };
            self.recover_if_disconnected();

            let now = Timestamp::now();
            if self.session.is_some() {
                self.calibration_tick(&frame, now);
            } else {
                self.monitor_tick(&frame, now);
            }
            self.publish(EngineEvent::FrameReady(frame));
        }

        self.set_state(MonitorState::Stopped);
        tracing::info!("posture monitor stopped");
    }

    /// Services pending commands; returns `true` on a stop request.
    fn drain_commands(&mut self) -> bool {
        while let Ok(command) = self.commands.try_recv() {
            match command {
                Command::Stop => return true,
                Command::Calibrate => self.begin_calibration(),
            }
        }
        false
    }

    fn begin_calibration(&mut self) {
        if self.session.is_some() {
            tracing::debug!("calibration request ignored, session already in progress");
            return;
        }
        let duration = self.config.calibration_duration_secs;
        self.session = Some(CalibrationSession::begin(Timestamp::now(), duration));
        self.set_state(MonitorState::Calibrating);
        self.publish(EngineEvent::CalibrationStatus(
            "Sit upright, calibrating posture...".into(),
        ));
        tracing::info!(duration_secs = duration, "calibration started");
    }

    fn calibration_tick(&mut self, frame: &Frame, now: Timestamp) {
        if let Some(ratio) = self
            .estimator
            .estimate(frame)
            .as_ref()
            .and_then(posture_ratio)
        {
            if let Some(session) = self.session.as_mut() {
                session.add_sample(ratio);
            }
        }

        let elapsed = self
            .session
            .as_ref()
            .is_some_and(|session| session.is_elapsed(now));
        if !elapsed {
            return;
        }
        let Some(session) = self.session.take() else {
            return;
        };
        match session.finish() {
            Ok(baseline) => {
                let strictness = self.config.posture_strictness;
                let policy = ThresholdPolicy::Calibrated {
                    baseline,
                    strictness,
                };
                let threshold = policy.effective_threshold();
                *self.shared.policy.write() = policy;
                self.publish(EngineEvent::CalibrationStatus(format!(
                    "Calibration complete. Baseline {baseline:.3}, threshold {threshold:.3}"
                )));
                tracing::info!(baseline, threshold, "calibration succeeded");
            }
            Err(err) => {
                self.publish(EngineEvent::CalibrationStatus(
                    "Calibration failed: no pose detected.".into(),
                ));
                tracing::warn!(error = %err, "calibration failed");
            }
        }
        self.set_state(MonitorState::Running);
    }

    fn monitor_tick(&mut self, frame: &Frame, now: Timestamp) {
        if self.capture.brightness(frame) < self.config.brightness_threshold {
            self.set_warning(WARNING_TOO_DARK);
        } else {
            self.set_warning("");
        }

        let ratio = self
            .estimator
            .estimate(frame)
            .as_ref()
            .and_then(posture_ratio);
        let verdict = classify(ratio, &self.shared.policy.read());

        let text = match verdict {
            Verdict::Good => "Good Posture",
            Verdict::Bad => "Bad Posture",
            Verdict::Unknown => "No pose detected",
        };
        self.publish(EngineEvent::Status {
            verdict,
            text: text.into(),
        });

        self.alerts
            .maybe_alert(verdict, now, &self.config, self.sink.as_mut());

        if let Some(ratio) = ratio {
            if let Some(point) = self.aggregator.observe(ratio, now) {
                self.log.append(point);
                self.publish(EngineEvent::HistoryUpdated);
            }
        }
    }

    fn handle_disconnect(&mut self, err: &CaptureError) {
        if self.state() != MonitorState::Disconnected {
            self.set_state(MonitorState::Disconnected);
            self.set_warning(WARNING_RECONNECTING);
            tracing::warn!(error = %err, "capture failed, reconnecting");

            // A half-finished calibration cannot survive a lost feed.
            if self.session.take().is_some() {
                self.publish(EngineEvent::CalibrationStatus(
                    "Calibration failed: camera disconnected.".into(),
                ));
            }
        }

        thread::sleep(self.reconnect_delay);
        if let Err(reopen_err) = self.capture.reopen() {
            tracing::debug!(error = %reopen_err, "reopen attempt failed");
        }
        self.reconnect_delay = (self.reconnect_delay * 2).min(RECONNECT_DELAY_MAX);
    }

    fn recover_if_disconnected(&mut self) {
        if self.state() == MonitorState::Disconnected {
            self.set_state(MonitorState::Running);
            self.reconnect_delay = RECONNECT_DELAY_INITIAL;
            self.set_warning("");
            tracing::info!("capture recovered");
        }
    }

    fn state(&self) -> MonitorState {
        *self.shared.state.read()
    }

    fn set_state(&self, state: MonitorState) {
        *self.shared.state.write() = state;
    }

    /// Publishes a warning only when its text changes; an empty string
    /// clears the previous warning.
    fn set_warning(&mut self, text: &str) {
        if self.last_warning != text {
            self.last_warning = text.to_string();
            self.publish(EngineEvent::Warning(text.to_string()));
        }
    }

    fn publish(&self, event: EngineEvent) {
        self.shared.subscribers.lock().publish(&event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monitor_starts_idle_with_static_policy() {
        let monitor = PostureMonitor::new(MonitorConfig::default());
        assert_eq!(monitor.state(), MonitorState::Idle);
        assert_eq!(monitor.policy(), ThresholdPolicy::Static(0.75));
    }

    #[test]
    fn config_is_clamped_at_construction() {
        let monitor = PostureMonitor::new(MonitorConfig {
            posture_threshold: 7.5,
            ..MonitorConfig::default()
        });
        assert!((monitor.config().posture_threshold - 1.0).abs() < f64::EPSILON);
        assert_eq!(monitor.policy(), ThresholdPolicy::Static(1.0));
    }

    #[test]
    fn stop_before_start_is_a_no_op() {
        let mut monitor = PostureMonitor::new(MonitorConfig::default());
        assert!(monitor.stop().is_ok());
        assert_eq!(monitor.state(), MonitorState::Idle);
    }

    #[test]
    fn statistics_on_fresh_monitor_are_zeroed() {
        let monitor = PostureMonitor::new(MonitorConfig::default());
        let stats = monitor.statistics();
        assert!((stats.total_secs - 0.0).abs() < f64::EPSILON);
        assert!((stats.active_threshold - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn state_display_names() {
        assert_eq!(MonitorState::Idle.to_string(), "idle");
        assert_eq!(MonitorState::Calibrating.to_string(), "calibrating");
        assert_eq!(MonitorState::Stopped.to_string(), "stopped");
    }
}
