//! CLI error types.

use thiserror::Error;

/// Errors surfaced to the terminal user.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Report acquisition failed terminally.
    #[error("Could not acquire a report: {0}")]
    Acquire(String),

    /// The backend could not be reached.
    #[error("Backend unavailable: {0}")]
    Backend(String),

    /// Reading telemetry input failed.
    #[error("Telemetry input error: {0}")]
    Input(String),

    /// Output serialization failed.
    #[error("Output error: {0}")]
    Output(String),
}
