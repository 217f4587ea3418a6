//! CLI command implementations.

pub mod models;
pub mod report;
pub mod status;
pub mod track;

use ecoeye::client::HttpReportApi;
use ecoeye::config::ConfigFile;

use crate::error::CliError;

/// Build the backend API client from the loaded configuration.
pub fn api_client(config: &ConfigFile) -> Result<HttpReportApi, CliError> {
    HttpReportApi::with_timeout(config.api.url.clone(), config.api.timeout_secs)
        .map_err(|e| CliError::Backend(e.to_string()))
}
