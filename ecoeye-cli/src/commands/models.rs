//! Models command - list known vehicle models and years.

use clap::Args;
use console::style;
use ecoeye::client::ReportApi;
use ecoeye::config::ConfigFile;
use ecoeye::fallback::FallbackBundle;

use crate::error::CliError;

/// Arguments for the models command.
#[derive(Debug, Args)]
pub struct ModelsArgs {
    /// Emit the listing as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run the models command.
///
/// Lists the backend's model registry; when the backend is unreachable the
/// bundled fallback listing is shown instead.
pub async fn run(config: &ConfigFile, args: ModelsArgs) -> Result<(), CliError> {
    let api = super::api_client(config)?;

    let (listing, offline) = match api.models().await {
        Ok(listing) => (listing, false),
        Err(e) => {
            tracing::warn!(error = %e, "Model listing unavailable, using bundled data");
            let bundle = FallbackBundle::load_or_bundled(config.fallback.path.as_deref())
                .await
                .map_err(|e| CliError::Acquire(e.to_string()))?;
            (bundle.model_year_map, true)
        }
    };

    if args.json {
        let text = serde_json::to_string_pretty(&listing)
            .map_err(|e| CliError::Output(e.to_string()))?;
        println!("{}", text);
        return Ok(());
    }

    if offline {
        println!(
            "{}",
            style("Backend unavailable; showing bundled models.").yellow()
        );
        println!();
    }

    if listing.is_empty() {
        println!("No models known yet.");
        return Ok(());
    }

    for (slug, years) in &listing {
        let years: Vec<String> = years.iter().map(i32::to_string).collect();
        println!("{}  ({})", style(slug).bold(), years.join(", "));
    }

    Ok(())
}
