//! Report generation service (server-side collaborator).
//!
//! Implements the semantics behind `POST /generate`: input validation,
//! rate limiting, cache lookup keyed by the normalized slug and year,
//! generation through the upstream model, persistence, and registration in
//! the model-year registry. HTTP routing lives outside this crate; the
//! service is consumed in-process (local/offline mode, scenario tests) or
//! wrapped by whatever transport a deployment uses.
//!
//! # Request Flow
//!
//! ```text
//! validate ─► rate limit ─► cache lookup ─► hit: cached response
//!                               │
//!                              miss ─► generate ─► parse ─► persist ─► response
//!                                                    │
//!                                                unparseable ─► {report: null, fallback: true}
//! ```

mod generator;
mod openai;
mod rate_limit;

pub use generator::{
    build_prompt, estimate_cost, GeneratedText, GeneratorError, ReportGenerator, TokenUsage,
};
pub use openai::OpenAiGenerator;
pub use rate_limit::{HourlyRateLimiter, DEFAULT_HOURLY_LIMIT};

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::client::{GenerateResponse, StatusResponse, RATE_LIMIT_MESSAGE};
use crate::report::{parse_report_value, VehicleSelection};
use crate::store::ReportStore;

/// Earliest model year the service accepts.
const MIN_MODEL_YEAR: i32 = 1900;

/// Latest model year the service accepts.
const MAX_MODEL_YEAR: i32 = 2100;

/// Errors the generation service surfaces to its transport.
///
/// These map to the HTTP statuses of the wire contract: invalid requests
/// to 400, rate limiting to 429, everything else to 500. Unparseable
/// upstream output is not an error; it is answered with a fallback-tagged
/// response body.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The request is missing or has an implausible model/year.
    #[error("{0}")]
    InvalidRequest(String),

    /// The client exhausted its hourly request budget.
    #[error("{message}")]
    RateLimited {
        /// The fixed rate-limit message.
        message: String,
    },

    /// The generation upstream failed.
    #[error("failed to process report: {0}")]
    Generation(#[from] GeneratorError),

    /// Internal serialization failure.
    #[error("internal error: {0}")]
    Internal(String),
}

/// The cache-or-generate service behind the report API.
pub struct GenerationService<G: ReportGenerator> {
    store: Arc<dyn ReportStore>,
    generator: G,
    limiter: HourlyRateLimiter,
}

impl<G: ReportGenerator> GenerationService<G> {
    /// Create a service with the default rate limit.
    pub fn new(store: Arc<dyn ReportStore>, generator: G) -> Self {
        Self::with_limiter(store, generator, HourlyRateLimiter::default())
    }

    /// Create a service with a custom rate limiter.
    pub fn with_limiter(
        store: Arc<dyn ReportStore>,
        generator: G,
        limiter: HourlyRateLimiter,
    ) -> Self {
        Self {
            store,
            generator,
            limiter,
        }
    }

    /// Liveness status, `GET /status`.
    pub fn status(&self) -> StatusResponse {
        StatusResponse::ok()
    }

    /// The model registry, `GET /models`.
    pub async fn model_years(
        &self,
    ) -> Result<std::collections::BTreeMap<String, Vec<i32>>, BackendError> {
        self.store
            .model_years()
            .await
            .map_err(|e| BackendError::Internal(e.to_string()))
    }

    /// Produce a report for the selection, `POST /generate`.
    ///
    /// `client` identifies the requester for rate limiting. Cache hits
    /// return immediately with `cached: true` and no generation cost; on a
    /// miss the upstream model is invoked, the output parsed and (when
    /// valid) persisted along with the model-year registration.
    pub async fn generate(
        &self,
        client: &str,
        selection: &VehicleSelection,
    ) -> Result<GenerateResponse, BackendError> {
        if selection.model.trim().is_empty() {
            return Err(BackendError::InvalidRequest("Missing model or year.".to_string()));
        }
        if !(MIN_MODEL_YEAR..=MAX_MODEL_YEAR).contains(&selection.year) {
            return Err(BackendError::InvalidRequest(format!(
                "Implausible model year: {}",
                selection.year
            )));
        }

        if !self.limiter.try_acquire(client) {
            return Err(BackendError::RateLimited {
                message: RATE_LIMIT_MESSAGE.to_string(),
            });
        }

        let key = selection.cache_key();

        // Cache lookup. Read failures degrade to a miss rather than
        // failing the request.
        match self.store.get(&key).await {
            Ok(Some(cached)) => {
                info!(%key, "Report cache hit");
                let value = serde_json::to_value(&cached)
                    .map_err(|e| BackendError::Internal(e.to_string()))?;
                return Ok(GenerateResponse {
                    report: Some(value),
                    cost: None,
                    cached: true,
                    fallback: false,
                    message: None,
                });
            }
            Ok(None) => {}
            Err(e) => warn!(%key, error = %e, "Report cache read failed"),
        }

        info!(%key, "Report cache miss, generating");
        let prompt = build_prompt(selection);
        let generated = self.generator.generate(&prompt).await?;
        let cost = generated.usage.as_ref().map(estimate_cost);

        let report = match parse_report_value(&serde_json::Value::String(generated.text)) {
            Ok(report) => report,
            Err(e) => {
                warn!(%key, error = %e, "Upstream output rejected");
                return Ok(GenerateResponse {
                    report: None,
                    cost,
                    cached: false,
                    fallback: true,
                    message: Some(format!("Upstream output was not usable: {}", e)),
                });
            }
        };

        // Persist and register. At-least-once with set-union semantics;
        // write failures are logged and the report is still returned.
        if let Err(e) = self.store.put(&key, &report).await {
            warn!(%key, error = %e, "Report cache write failed");
        }
        if let Err(e) = self
            .store
            .register_model_year(&selection.model_slug(), selection.year)
            .await
        {
            warn!(%key, error = %e, "Model-year registration failed");
        }

        let value =
            serde_json::to_value(&report).map_err(|e| BackendError::Internal(e.to_string()))?;

        Ok(GenerateResponse {
            report: Some(value),
            cost,
            cached: false,
            fallback: false,
            message: None,
        })
    }
}
