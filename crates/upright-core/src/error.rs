//! Error types for the posture monitoring engine.
//!
//! Errors are modeled with [`thiserror`] and grouped by subsystem:
//!
//! - [`EngineError`]: top-level error type for the engine
//! - [`CaptureError`]: frame capture and reconnect failures
//! - [`CalibrationError`]: calibration session failures
//!
//! The engine is designed to run unattended indefinitely, so every
//! runtime failure is recoverable; [`EngineError::is_recoverable`]
//! returns `false` only for programming or configuration mistakes.

use thiserror::Error;

/// A specialized `Result` type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Top-level error type for the posture monitoring engine.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum EngineError {
    /// Frame capture error
    #[error("capture error: {0}")]
    Capture(#[from] CaptureError),

    /// Calibration error
    #[error("calibration error: {0}")]
    Calibration(#[from] CalibrationError),

    /// Configuration error
    #[error("configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
    },

    /// Operation requires a running engine
    #[error("invalid state: expected {expected}, found {actual}")]
    InvalidState {
        /// Expected state
        expected: String,
        /// Actual state
        actual: String,
    },

    /// Internal error (should not happen in normal operation)
    #[error("internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },
}

impl EngineError {
    /// Creates a new configuration error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Creates a new invalid state error.
    #[must_use]
    pub fn invalid_state(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::InvalidState {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Creates a new internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns `true` if this error is recoverable.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Capture(_) | Self::Calibration(_) => true,
            Self::Configuration { .. } | Self::InvalidState { .. } | Self::Internal { .. } => false,
        }
    }
}

/// Errors from the capture source.
///
/// All capture errors are recoverable: the engine transitions to its
/// disconnected state and retries with backoff.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CaptureError {
    /// The capture device produced no frame
    #[error("failed to read frame: {reason}")]
    ReadFailed {
        /// Device-specific failure description
        reason: String,
    },

    /// The capture device is no longer available
    #[error("capture source disconnected: {reason}")]
    Disconnected {
        /// Device-specific failure description
        reason: String,
    },

    /// Reopening the capture device failed
    #[error("failed to reopen capture source: {reason}")]
    ReopenFailed {
        /// Device-specific failure description
        reason: String,
    },
}

impl CaptureError {
    /// Creates a read failure.
    #[must_use]
    pub fn read_failed(reason: impl Into<String>) -> Self {
        Self::ReadFailed {
            reason: reason.into(),
        }
    }

    /// Creates a disconnect error.
    #[must_use]
    pub fn disconnected(reason: impl Into<String>) -> Self {
        Self::Disconnected {
            reason: reason.into(),
        }
    }

    /// Creates a reopen failure.
    #[must_use]
    pub fn reopen_failed(reason: impl Into<String>) -> Self {
        Self::ReopenFailed {
            reason: reason.into(),
        }
    }
}

/// Errors from a calibration session.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CalibrationError {
    /// The collection window elapsed without a single valid sample
    #[error("no pose detected during the calibration window")]
    NoSamples,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_errors_are_recoverable() {
        let err: EngineError = CaptureError::read_failed("device busy").into();
        assert!(err.is_recoverable());

        let err: EngineError = CaptureError::disconnected("unplugged").into();
        assert!(err.is_recoverable());
    }

    #[test]
    fn calibration_errors_are_recoverable() {
        let err: EngineError = CalibrationError::NoSamples.into();
        assert!(err.is_recoverable());
    }

    #[test]
    fn internal_errors_are_not_recoverable() {
        let err = EngineError::internal("worker channel poisoned");
        assert!(!err.is_recoverable());
    }

    #[test]
    fn error_display_includes_reason() {
        let err = CaptureError::reopen_failed("device 0 missing");
        assert!(err.to_string().contains("device 0 missing"));
    }
}
