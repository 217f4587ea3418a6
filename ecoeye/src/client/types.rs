//! Wire types for the backend API.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Fixed message returned when the hourly request limit is exceeded.
pub const RATE_LIMIT_MESSAGE: &str = "You've reached the limit. Please try again in an hour.";

/// Response of `GET /status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    /// `"ok"` when the backend is alive.
    pub status: String,
    /// Server time when the probe was answered.
    pub timestamp: DateTime<Utc>,
}

impl StatusResponse {
    /// A healthy status stamped now.
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Body of `POST /generate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// Model name as entered by the user.
    pub model: String,
    /// Model year.
    pub year: i32,
}

/// Response of `POST /generate`.
///
/// The `report` value is untrusted: it may be an object, a raw JSON string
/// the upstream model produced, or `null` when the upstream output was not
/// parseable (in which case `fallback` is set and `message` explains why).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    /// The report payload, pending validation.
    #[serde(default)]
    pub report: Option<Value>,
    /// Estimated generation cost in dollars, `None` for cache hits.
    #[serde(default)]
    pub cost: Option<String>,
    /// Whether the report was served from the server-side cache.
    #[serde(default)]
    pub cached: bool,
    /// Set when the backend could not produce a usable report.
    #[serde(default)]
    pub fallback: bool,
    /// Human-readable explanation when `fallback` is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Response of `GET /models`: model slug to years with cached reports.
pub type ModelsResponse = BTreeMap<String, Vec<i32>>;

/// Error body returned with 4xx/5xx statuses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Short error description.
    pub error: String,
    /// Optional detail.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}
