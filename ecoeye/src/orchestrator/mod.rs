//! Report acquisition orchestration.
//!
//! The canonical acquisition state machine, implemented once and
//! parametrized over the backend API:
//!
//! ```text
//! health probe ──► cache/generate ──► validate ──► live report
//!      │                 │               │
//!      └─────────────────┴───────────────┴──► fallback bundle
//! ```
//!
//! Every failure along the way degrades to the bundled fallback report;
//! only an unusable fallback asset is surfaced as an error. The sequence is
//! single-flight per call with no retries.

use std::path::PathBuf;

use thiserror::Error;
use tracing::{info, warn};

use crate::client::{ApiError, GenerateRequest, ReportApi};
use crate::fallback::{FallbackBundle, FallbackError};
use crate::report::{parse_report_value, EcoReport, VehicleSelection};

/// Why a fallback report was served instead of a live one.
///
/// None of these are errors: each is resolved by the fallback bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// The health probe failed; the backend was never asked to generate.
    Unreachable,
    /// The hourly request limit was exceeded.
    ///
    /// Surfaced distinctly so the user sees the rate-limit message rather
    /// than a generic degradation notice.
    RateLimited,
    /// The backend responded, but the body could not be decoded or the
    /// report payload failed validation.
    MalformedResponse,
    /// The backend reported a server-side failure (5xx) or could not
    /// produce a usable report.
    UpstreamFailure,
}

/// Where an acquired report came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportSource {
    /// Freshly generated by the backend.
    Live {
        /// Estimated generation cost in dollars, if reported.
        cost: Option<String>,
    },
    /// Served from the backend's report cache; no generation cost incurred.
    CacheHit,
    /// Served from the static bundle. Never written back to any cache.
    Fallback {
        /// What failed upstream.
        reason: FallbackReason,
    },
}

impl ReportSource {
    /// Whether this is a fallback report.
    pub fn is_fallback(&self) -> bool {
        matches!(self, ReportSource::Fallback { .. })
    }
}

/// A validated report together with its provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct AcquiredReport {
    /// The validated report.
    pub report: EcoReport,
    /// Live, cache hit, or fallback.
    pub source: ReportSource,
}

/// The single terminal acquisition failure.
#[derive(Debug, Error)]
pub enum AcquireError {
    /// Live acquisition failed and the fallback bundle is unusable.
    #[error("fallback report unavailable: {0}")]
    FallbackUnavailable(#[from] FallbackError),
}

/// Sequences report acquisition against a backend API.
///
/// Generic over [`ReportApi`] so tests can drive the full state machine
/// with mock backends.
pub struct ReportOrchestrator<A: ReportApi> {
    api: A,
    fallback_override: Option<PathBuf>,
}

impl<A: ReportApi> ReportOrchestrator<A> {
    /// Creates an orchestrator using the embedded fallback bundle.
    pub fn new(api: A) -> Self {
        Self {
            api,
            fallback_override: None,
        }
    }

    /// Use an on-disk fallback bundle instead of the embedded asset.
    pub fn with_fallback_override(mut self, path: PathBuf) -> Self {
        self.fallback_override = Some(path);
        self
    }

    /// Access the underlying API client.
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Acquire a report for the selection.
    ///
    /// Always resolves to some report; the only error is an unusable
    /// fallback bundle. The caller can inspect [`AcquiredReport::source`]
    /// to distinguish live reports, cache hits, and the fallback reasons.
    pub async fn acquire(
        &self,
        selection: &VehicleSelection,
    ) -> Result<AcquiredReport, AcquireError> {
        // 1. Health probe. Unreachable backends skip straight to fallback.
        if let Err(e) = self.api.status().await {
            warn!(error = %e, "Backend health probe failed");
            return self.fall_back(FallbackReason::Unreachable).await;
        }

        // 2. Cache-or-generate request.
        let request = GenerateRequest {
            model: selection.model.clone(),
            year: selection.year,
        };
        let response = match self.api.generate(&request).await {
            Ok(response) => response,
            Err(ApiError::RateLimited { message }) => {
                warn!(%message, "Generation rate limited");
                return self.fall_back(FallbackReason::RateLimited).await;
            }
            Err(e) => {
                warn!(error = %e, "Generate request failed");
                let reason = match e {
                    ApiError::MalformedResponse(_) => FallbackReason::MalformedResponse,
                    ApiError::Status { status, .. } if status >= 500 => {
                        FallbackReason::UpstreamFailure
                    }
                    _ => FallbackReason::Unreachable,
                };
                return self.fall_back(reason).await;
            }
        };

        // 3. Validate the payload.
        let payload = match response.report.as_ref() {
            Some(value) if !response.fallback => value,
            _ => {
                warn!(
                    message = response.message.as_deref().unwrap_or("none"),
                    "Backend could not produce a usable report"
                );
                return self.fall_back(FallbackReason::UpstreamFailure).await;
            }
        };
        let report = match parse_report_value(payload) {
            Ok(report) => report,
            Err(e) => {
                warn!(error = %e, "Report payload failed validation");
                return self.fall_back(FallbackReason::MalformedResponse).await;
            }
        };

        let source = if response.cached {
            info!(key = %selection.cache_key(), "Report served from cache");
            ReportSource::CacheHit
        } else {
            info!(key = %selection.cache_key(), cost = ?response.cost, "Report generated");
            ReportSource::Live {
                cost: response.cost,
            }
        };

        Ok(AcquiredReport { report, source })
    }

    /// 4. Load the fallback bundle and tag the outcome.
    async fn fall_back(&self, reason: FallbackReason) -> Result<AcquiredReport, AcquireError> {
        let bundle = FallbackBundle::load_or_bundled(self.fallback_override.as_deref()).await?;
        info!(?reason, "Serving fallback report");

        Ok(AcquiredReport {
            report: bundle.report,
            source: ReportSource::Fallback { reason },
        })
    }
}
