//! Bounded posture history log.
//!
//! [`PostureLog`] is a capacity-bounded deque of [`AggregatedPoint`]s in
//! non-decreasing timestamp order; when full, the oldest point is evicted
//! first. [`SharedPostureLog`] wraps it for the one genuine
//! multiple-reader/single-writer contract in the engine: the worker
//! appends, the presentation layer reads point-in-time snapshots on its
//! own schedule. A point is either fully present or fully absent to a
//! reader; partial points are never visible.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::RwLock;
use upright_core::AggregatedPoint;

/// Capacity-bounded, time-ordered log of aggregated posture points.
#[derive(Debug)]
pub struct PostureLog {
    points: VecDeque<AggregatedPoint>,
    capacity: usize,
}

impl PostureLog {
    /// Creates a log holding at most `capacity` points.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            points: VecDeque::with_capacity(capacity.min(4096)),
            capacity,
        }
    }

    /// Appends a point, evicting the oldest when at capacity.
    pub fn push(&mut self, point: AggregatedPoint) {
        if self.points.len() >= self.capacity {
            self.points.pop_front();
        }
        self.points.push_back(point);
    }

    /// Number of stored points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the log is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Maximum number of points retained.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Oldest stored point, if any.
    #[must_use]
    pub fn first(&self) -> Option<&AggregatedPoint> {
        self.points.front()
    }

    /// Most recent stored point, if any.
    #[must_use]
    pub fn last(&self) -> Option<&AggregatedPoint> {
        self.points.back()
    }

    /// All points, oldest first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<AggregatedPoint> {
        self.points.iter().copied().collect()
    }

    /// Removes all points.
    pub fn clear(&mut self) {
        self.points.clear();
    }
}

/// Shared handle to a [`PostureLog`].
///
/// Cheap to clone; the worker holds one clone as the sole writer while
/// any number of readers chart and compute statistics from snapshots.
#[derive(Debug, Clone)]
pub struct SharedPostureLog {
    inner: Arc<RwLock<PostureLog>>,
}

impl SharedPostureLog {
    /// Creates a shared log holding at most `capacity` points.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(PostureLog::new(capacity))),
        }
    }

    /// Appends a fully-built point.
    pub fn append(&self, point: AggregatedPoint) {
        self.inner.write().push(point);
    }

    /// Point-in-time copy of the whole log, oldest first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<AggregatedPoint> {
        self.inner.read().snapshot()
    }

    /// Number of stored points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Whether the log is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Chart-ready history: `(seconds since first point, ratio)` pairs.
    #[must_use]
    pub fn history(&self) -> Vec<(f64, f64)> {
        let points = self.snapshot();
        relative_pairs(&points)
    }

    /// Chart-ready history restricted to the trailing `window_secs`.
    ///
    /// Times are relative to the first point inside the window, matching
    /// what a rolling chart expects.
    #[must_use]
    pub fn history_window(&self, window_secs: f64) -> Vec<(f64, f64)> {
        let points = self.snapshot();
        let Some(last) = points.last() else {
            return Vec::new();
        };
        let cutoff = last.timestamp.as_secs_f64() - window_secs;
        let start = points.partition_point(|p| p.timestamp.as_secs_f64() < cutoff);
        relative_pairs(&points[start..])
    }

    /// Removes all points.
    pub fn clear(&self) {
        self.inner.write().clear();
    }
}

fn relative_pairs(points: &[AggregatedPoint]) -> Vec<(f64, f64)> {
    let Some(first) = points.first() else {
        return Vec::new();
    };
    let origin = first.timestamp;
    points
        .iter()
        .map(|p| (p.timestamp.duration_since(&origin), p.ratio))
        .collect()
}
