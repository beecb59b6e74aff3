//! Posture monitoring engine.
//!
//! Continuously derives a scalar posture metric from a live stream of
//! body-landmark estimates, classifies each moment as good or bad posture,
//! raises rate-limited alerts, and maintains a bounded, queryable history
//! of posture quality.
//!
//! # Architecture
//!
//! One tick of the monitoring loop flows one way through the stages:
//!
//! 1. **Metric extraction** ([`metric`]): landmark frame → posture ratio,
//!    or no ratio when the shoulders are not reliably separated.
//! 2. **Classification** ([`classify`]): ratio + threshold policy →
//!    good/bad/unknown verdict.
//! 3. **Alerting** ([`alert`]): debounced alert-sink trigger on sustained
//!    bad posture.
//! 4. **Aggregation** ([`aggregate`], [`log`]): per-second mean ratios
//!    appended to a capacity-bounded history log.
//! 5. **Statistics** ([`stats`]): duration, percent-good, and longest
//!    good streak derived from the log.
//!
//! Calibration ([`calibrate`]) is a side-channel: while a session runs,
//! the loop collects raw ratios instead of classifying, and a successful
//! session switches the threshold policy from static to personalized.
//!
//! The loop itself ([`monitor`]) runs on a dedicated worker thread and
//! publishes observer notifications ([`events`]) so no presentation-facing
//! call ever blocks on capture latency.
//!
//! # Example
//!
//! ```ignore
//! use upright_core::MonitorConfig;
//! use upright_engine::PostureMonitor;
//!
//! let mut monitor = PostureMonitor::new(MonitorConfig::default());
//! let events = monitor.subscribe();
//! monitor.start(capture, estimator, sink)?;
//! monitor.request_calibration();
//! // ... presentation layer consumes `events`, charts `monitor.history()` ...
//! let stats = monitor.statistics();
//! monitor.stop()?;
//! ```

pub mod aggregate;
pub mod alert;
pub mod calibrate;
pub mod classify;
pub mod events;
pub mod log;
pub mod metric;
pub mod monitor;
pub mod stats;

pub use aggregate::SecondAggregator;
pub use alert::AlertController;
pub use calibrate::CalibrationSession;
pub use classify::classify;
pub use events::EngineEvent;
pub use log::{PostureLog, SharedPostureLog};
pub use metric::{posture_ratio, MIN_SHOULDER_SPAN};
pub use monitor::{MonitorState, PostureMonitor};
pub use stats::compute_stats;
