//! Status command - probe backend availability.

use console::style;
use ecoeye::client::ReportApi;
use ecoeye::config::ConfigFile;

use crate::error::CliError;

/// Run the status command.
pub async fn run(config: &ConfigFile) -> Result<(), CliError> {
    let api = super::api_client(config)?;

    println!("Backend: {}", config.api.url);

    match api.status().await {
        Ok(status) if status.status == "ok" => {
            println!("Status:  {}", style("online").green());
            println!("Time:    {}", status.timestamp.to_rfc3339());
            Ok(())
        }
        Ok(status) => {
            println!("Status:  {}", style(&status.status).yellow());
            Ok(())
        }
        Err(e) => {
            println!("Status:  {}", style("offline").red());
            println!();
            println!("Reports will be served from the fallback bundle.");
            Err(CliError::Backend(e.to_string()))
        }
    }
}
