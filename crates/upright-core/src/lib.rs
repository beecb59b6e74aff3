//! Core domain types for the upright posture monitor.
//!
//! This crate defines the data model and the contracts the monitoring
//! engine has with its external collaborators. It contains no monitoring
//! logic of its own.
//!
//! # Contents
//!
//! - **Domain types** ([`types`]): [`LandmarkFrame`], [`Timestamp`],
//!   [`Verdict`], [`ThresholdPolicy`], [`AggregatedPoint`], [`PostureStats`]
//! - **Configuration** ([`config`]): [`MonitorConfig`] with range clamping
//! - **Errors** ([`error`]): [`EngineError`] and friends, all recoverable
//!   by design
//! - **Collaborator traits** ([`traits`]): [`CaptureSource`],
//!   [`PoseEstimator`], [`AlertSink`]

pub mod config;
pub mod error;
pub mod traits;
pub mod types;

pub use config::MonitorConfig;
pub use error::{CalibrationError, CaptureError, EngineError, EngineResult};
pub use traits::{AlertSink, CaptureSource, PoseEstimator};
pub use types::{
    AggregatedPoint, Frame, Landmark, LandmarkFrame, PostureStats, ThresholdPolicy, Timestamp,
    Verdict,
};
