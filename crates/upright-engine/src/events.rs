//! Observer notifications published by the monitoring loop.
//!
//! Subscribers receive events over their own channel and consume them on
//! their own schedule (a UI timer, a select loop); the worker never waits
//! on a subscriber. Channels whose receiver has been dropped are pruned
//! on the next publish.

use crossbeam_channel::{unbounded, Receiver, Sender};
use upright_core::{Frame, Verdict};

/// A notification from the monitoring loop.
#[derive(Debug, Clone)]
pub enum EngineEvent {
    /// Per-tick posture status.
    Status {
        /// The classification verdict.
        verdict: Verdict,
        /// Display text, e.g. "Good Posture".
        text: String,
    },
    /// System warning; an empty string clears the previous warning.
    Warning(String),
    /// Calibration progress, success, or failure text.
    CalibrationStatus(String),
    /// A captured frame, forwarded opaquely for display.
    FrameReady(Frame),
    /// A new aggregated point was appended to the history log.
    HistoryUpdated,
}

/// Fan-out of [`EngineEvent`]s to any number of subscribers.
#[derive(Debug, Default)]
pub struct Subscribers {
    senders: Vec<Sender<EngineEvent>>,
}

impl Subscribers {
    /// Creates an empty subscriber set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new subscriber and returns its receiving end.
    pub fn subscribe(&mut self) -> Receiver<EngineEvent> {
        let (tx, rx) = unbounded();
        self.senders.push(tx);
        rx
    }

    /// Sends an event to every live subscriber, dropping dead channels.
    pub fn publish(&mut self, event: &EngineEvent) {
        self.senders.retain(|tx| tx.send(event.clone()).is_ok());
    }

    /// Number of live subscribers as of the last publish.
    #[must_use]
    pub fn len(&self) -> usize {
        self.senders.len()
    }

    /// Whether anyone is subscribed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.senders.is_empty()
    }
}
