//! Backend API client.
//!
//! This module provides the client-side contract for the report generation
//! backend: a liveness probe, the cache-or-generate endpoint, and the model
//! registry listing. The [`ReportApi`] trait is the seam the orchestrator
//! depends on, allowing mock backends in tests.
//!
//! # Wire Contract
//!
//! - `GET /status` → `{status: "ok", timestamp}`
//! - `POST /generate` `{model, year}` → `{report, cost, cached, fallback, message}`
//! - `GET /models` → map of model slug to years with cached reports
//!
//! HTTP 429 from `/generate` is surfaced as [`ApiError::RateLimited`] so
//! callers can show a specific message instead of a generic failure.

mod http;
mod types;

use std::future::Future;
use std::pin::Pin;

pub use http::HttpReportApi;

#[cfg(test)]
pub use http::tests::MockReportApi;
pub use types::{
    ErrorBody, GenerateRequest, GenerateResponse, ModelsResponse, StatusResponse,
    RATE_LIMIT_MESSAGE,
};

use thiserror::Error;

/// Boxed future type for dyn-compatible async methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Errors surfaced by the backend API client.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// The backend could not be reached (connection refused, DNS, timeout).
    #[error("backend unreachable: {0}")]
    Unreachable(String),

    /// The hourly request limit was exceeded (HTTP 429).
    ///
    /// Distinct from other failures so the caller can show the rate-limit
    /// message rather than silently falling back.
    #[error("rate limited: {message}")]
    RateLimited {
        /// Message returned by the backend, or the fixed default.
        message: String,
    },

    /// The backend answered with a non-success status.
    #[error("backend returned HTTP {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Error detail from the response body, if any.
        message: String,
    },

    /// The response body could not be decoded.
    #[error("malformed backend response: {0}")]
    MalformedResponse(String),
}

/// Client-side contract for the report generation backend.
///
/// Dyn-compatible via `BoxFuture` so orchestrators can hold
/// `Arc<dyn ReportApi>` and tests can inject mocks.
pub trait ReportApi: Send + Sync {
    /// Probe backend liveness.
    fn status(&self) -> BoxFuture<'_, Result<StatusResponse, ApiError>>;

    /// Request a report for a model and year.
    ///
    /// The backend performs the cache lookup keyed by the normalized slug
    /// and year; on a miss it invokes generation and persists the result.
    fn generate(
        &self,
        request: &GenerateRequest,
    ) -> BoxFuture<'_, Result<GenerateResponse, ApiError>>;

    /// List known model slugs and the years with cached reports.
    fn models(&self) -> BoxFuture<'_, Result<ModelsResponse, ApiError>>;
}
