//! Static fallback report bundle.
//!
//! The ultimate degradation step of the acquisition pipeline: a bundled
//! JSON document with a default report plus the model list and model-year
//! map used to populate selection UIs when the backend is unreachable.
//!
//! The bundle ships embedded in the binary; an on-disk override can be
//! supplied for customized fallback content. A missing or malformed bundle
//! is the only unrecoverable acquisition failure.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::report::EcoReport;

/// The embedded fallback asset.
const BUNDLED_ASSET: &str = include_str!("../../assets/fallback.json");

/// Errors loading the fallback bundle.
#[derive(Debug, Error)]
pub enum FallbackError {
    /// The fallback asset could not be read.
    #[error("fallback asset unavailable: {0}")]
    Missing(String),

    /// The fallback asset is not a valid bundle document.
    #[error("fallback asset is malformed: {0}")]
    Malformed(String),
}

/// Bundled fallback content: a default report plus offline selection data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FallbackBundle {
    /// The default eco report served when live acquisition fails.
    pub report: EcoReport,
    /// Known model names for selection UIs.
    #[serde(default)]
    pub models: Vec<String>,
    /// Model slug to available years.
    #[serde(default)]
    pub model_year_map: BTreeMap<String, Vec<i32>>,
}

impl FallbackBundle {
    /// Load the bundle embedded in the binary.
    pub fn bundled() -> Result<Self, FallbackError> {
        serde_json::from_str(BUNDLED_ASSET).map_err(|e| FallbackError::Malformed(e.to_string()))
    }

    /// Load a bundle from an on-disk JSON document.
    pub async fn load(path: &Path) -> Result<Self, FallbackError> {
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| FallbackError::Missing(format!("{}: {}", path.display(), e)))?;

        serde_json::from_str(&text).map_err(|e| FallbackError::Malformed(e.to_string()))
    }

    /// Load an on-disk override if configured, otherwise the embedded bundle.
    ///
    /// A configured override that fails to load is reported and the
    /// embedded bundle is used instead; only failure of the embedded asset
    /// itself is terminal.
    pub async fn load_or_bundled(override_path: Option<&Path>) -> Result<Self, FallbackError> {
        if let Some(path) = override_path {
            match Self::load(path).await {
                Ok(bundle) => return Ok(bundle),
                Err(e) => {
                    warn!(error = %e, "Fallback override unusable, using embedded bundle");
                }
            }
        }

        Self::bundled()
    }

    /// Years available for a model slug, if the bundle knows the model.
    pub fn years_for(&self, slug: &str) -> Option<&[i32]> {
        self.model_year_map.get(slug).map(Vec::as_slice)
    }
}
