//! Live trip telemetry derived from geolocation samples.
//!
//! Consumes a push-based stream of position samples and accumulates driving
//! statistics for the session: total distance, cumulative CO2 footprint,
//! CO2 and fuel savings against an average-vehicle baseline.
//!
//! # Architecture
//!
//! ```text
//! TelemetrySample ──► TripAccumulator ──► TripStats
//!   (push-based)        (single writer)     (monotonic per session)
//! ```
//!
//! The accumulator is a two-state machine: the first sample only records
//! the starting position, every subsequent sample adds the haversine
//! distance from the previous one. Exactly one subscription writes to the
//! accumulator, so no locking is required beyond the shared handle used by
//! [`watch_samples`].

mod accumulator;
mod sample;
mod watch;

pub use accumulator::{
    leading_number, EmissionProfile, TripAccumulator, TripStats, BASELINE_EMISSION_G_PER_KM,
    DEFAULT_EMISSION_G_PER_KM, DEFAULT_FUEL_KM_PER_LITER,
};
pub use sample::TelemetrySample;
pub use watch::{watch_samples, TelemetrySubscription, TripSnapshot, TripTracker};
