//! EcoEye - Vehicle eco reports with live trip telemetry
//!
//! This library produces generated "eco reports" (fuel efficiency, emissions,
//! driving tips) for a vehicle model and year, degrading gracefully from the
//! live generation backend through its server-side cache down to a bundled
//! static report. Alongside report acquisition it derives live driving
//! statistics (distance, CO2 footprint, savings, eco score) from a stream of
//! geolocation samples.
//!
//! # Architecture
//!
//! ```text
//! VehicleSelection ──► ReportOrchestrator ──► AcquiredReport
//!                        │  health probe          (live / cache hit / fallback)
//!                        │  POST /generate
//!                        │  validate payload
//!                        └─ fallback bundle
//!
//! TelemetrySample ───► TripAccumulator ──► TripStats ──► score/grade
//! ```

pub mod backend;
pub mod client;
pub mod config;
pub mod fallback;
pub mod geo;
pub mod logging;
pub mod orchestrator;
pub mod report;
pub mod score;
pub mod store;
pub mod telemetry;

pub use client::{ApiError, HttpReportApi, ReportApi};
pub use fallback::{FallbackBundle, FallbackError};
pub use orchestrator::{AcquireError, AcquiredReport, FallbackReason, ReportOrchestrator, ReportSource};
pub use report::{EcoReport, EcoTips, VehicleSelection};
pub use telemetry::{TelemetrySample, TripAccumulator, TripStats};
