//! Cancelable live-location subscription.
//!
//! Bridges a push-based sample channel into a [`TripAccumulator`] on a
//! background task. The subscription must be canceled when the report view
//! is torn down; an uncanceled subscription keeps draining samples
//! indefinitely.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::{EmissionProfile, TelemetrySample, TripAccumulator, TripStats};

/// Point-in-time view of the trip for display.
#[derive(Debug, Clone, PartialEq)]
pub struct TripSnapshot {
    /// Cumulative statistics.
    pub stats: TripStats,
    /// Instantaneous speed display, e.g. `"32.4 km/h"`.
    pub speed_display: String,
    /// Instantaneous speed in km/h.
    pub speed_kph: f64,
}

/// Shared handle to a trip accumulator.
///
/// The accumulator has exactly one writer (the subscription task); the
/// mutex exists so display code can take snapshots concurrently.
#[derive(Debug, Clone)]
pub struct TripTracker {
    inner: Arc<Mutex<TripAccumulator>>,
}

impl TripTracker {
    /// Create a tracker for a vehicle's emission profile.
    pub fn new(profile: EmissionProfile) -> Self {
        Self {
            inner: Arc::new(Mutex::new(TripAccumulator::new(profile))),
        }
    }

    /// Feed one sample and return the updated statistics.
    pub fn record(&self, sample: TelemetrySample) -> TripStats {
        self.inner.lock().record(sample)
    }

    /// Take a point-in-time snapshot for display.
    pub fn snapshot(&self) -> TripSnapshot {
        let acc = self.inner.lock();
        TripSnapshot {
            stats: acc.stats(),
            speed_display: acc.speed_display(),
            speed_kph: acc.last_sample().map(|s| s.speed_kph()).unwrap_or(0.0),
        }
    }
}

/// Handle to a running location subscription.
///
/// Call [`TelemetrySubscription::unsubscribe`] when the report view is torn
/// down. Dropping the handle without unsubscribing leaves the task running
/// until the sample channel closes.
pub struct TelemetrySubscription {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl TelemetrySubscription {
    /// Token that can cancel this subscription from elsewhere (e.g. a
    /// Ctrl-C handler).
    pub fn cancellation(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Whether the subscription task has finished.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Cancel the subscription and wait for the task to stop.
    pub async fn unsubscribe(self) {
        self.cancel.cancel();
        let _ = self.handle.await;
    }

    /// Wait for the subscription to finish on its own (channel closed or
    /// cancellation token triggered externally).
    pub async fn join(self) {
        let _ = self.handle.await;
    }
}

/// Subscribe a tracker to a sample channel.
///
/// Spawns a task that records every received sample into the tracker until
/// the channel closes or the subscription is canceled. Samples arrive
/// strictly sequentially, preserving the single-writer model.
pub fn watch_samples(
    tracker: TripTracker,
    mut samples: mpsc::Receiver<TelemetrySample>,
) -> TelemetrySubscription {
    let cancel = CancellationToken::new();
    let task_cancel = cancel.clone();

    let handle = tokio::spawn(async move {
        loop {
            tokio::select! {
                biased;

                _ = task_cancel.cancelled() => {
                    debug!("Location subscription canceled");
                    break;
                }

                sample = samples.recv() => {
                    match sample {
                        Some(sample) => {
                            tracker.record(sample);
                        }
                        None => {
                            debug!("Sample channel closed");
                            break;
                        }
                    }
                }
            }
        }
    });

    TelemetrySubscription { cancel, handle }
}
