//! Track command - replay trip telemetry and compute driving statistics.
//!
//! Samples are read as JSON lines, either from a file or from stdin, e.g.
//!
//! ```text
//! {"latitude": 40.7128, "longitude": -74.0060, "speedMps": 12.5}
//! {"latitude": 40.7210, "longitude": -74.0101, "speedMps": 14.0}
//! ```

use std::fs;
use std::io::{self, BufRead};
use std::path::PathBuf;

use clap::Args;
use console::style;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use ecoeye::config::ConfigFile;
use ecoeye::orchestrator::ReportOrchestrator;
use ecoeye::report::VehicleSelection;
use ecoeye::score;
use ecoeye::telemetry::{
    leading_number, watch_samples, EmissionProfile, TelemetrySample, TripTracker,
};

use crate::error::CliError;

/// Arguments for the track command.
#[derive(Debug, Args)]
pub struct TrackArgs {
    /// Vehicle model name, used to acquire the emission profile
    pub model: String,

    /// Model year
    pub year: i32,

    /// Read samples from this JSON-lines file instead of stdin
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Delay between replayed samples in milliseconds
    #[arg(long, default_value_t = 0)]
    pub interval_ms: u64,
}

/// Run the track command.
pub async fn run(config: &ConfigFile, args: TrackArgs) -> Result<(), CliError> {
    let selection = VehicleSelection::new(args.model.clone(), args.year);

    // The report supplies the emission profile and recommended speed;
    // degradation to the fallback bundle keeps tracking usable offline.
    let api = super::api_client(config)?;
    let mut orchestrator = ReportOrchestrator::new(api);
    if let Some(path) = &config.fallback.path {
        orchestrator = orchestrator.with_fallback_override(path.clone());
    }
    let acquired = orchestrator
        .acquire(&selection)
        .await
        .map_err(|e| CliError::Acquire(e.to_string()))?;

    if acquired.source.is_fallback() {
        println!(
            "{}",
            style("Using fallback report data for this trip.").yellow()
        );
    }

    let profile = EmissionProfile::from_report(&acquired.report);
    // A zero recommended speed would treat any driving as deviation
    let recommended_kph = leading_number(&acquired.report.tips.speed).filter(|v| *v > 0.0);

    let samples = read_samples(args.input.as_deref())?;
    if samples.is_empty() {
        return Err(CliError::Input("no telemetry samples provided".to_string()));
    }
    println!(
        "Replaying {} samples for {} {}...",
        samples.len(),
        selection.model,
        selection.year
    );
    println!();

    let tracker = TripTracker::new(profile);
    let (tx, rx) = mpsc::channel(64);
    let subscription = watch_samples(tracker.clone(), rx);

    // Ctrl-C stops the replay and prints the summary for what was driven
    let cancel = subscription.cancellation();
    let handler_cancel = cancel.clone();
    ctrlc::set_handler(move || handler_cancel.cancel())
        .map_err(|e| CliError::Input(e.to_string()))?;

    for sample in samples {
        if cancel.is_cancelled() {
            break;
        }
        if tx.send(sample).await.is_err() {
            break;
        }
        if args.interval_ms > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(args.interval_ms)).await;
        }
    }
    drop(tx);
    subscription.join().await;

    print_summary(&tracker, recommended_kph);
    Ok(())
}

fn read_samples(input: Option<&std::path::Path>) -> Result<Vec<TelemetrySample>, CliError> {
    let text = match input {
        Some(path) => fs::read_to_string(path)
            .map_err(|e| CliError::Input(format!("{}: {}", path.display(), e)))?,
        None => {
            let mut lines = String::new();
            for line in io::stdin().lock().lines() {
                let line = line.map_err(|e| CliError::Input(e.to_string()))?;
                lines.push_str(&line);
                lines.push('\n');
            }
            lines
        }
    };

    let mut samples = Vec::new();
    for (number, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let sample: TelemetrySample = serde_json::from_str(line)
            .map_err(|e| CliError::Input(format!("line {}: {}", number + 1, e)))?;
        samples.push(sample);
    }
    Ok(samples)
}

fn print_summary(tracker: &TripTracker, recommended_kph: Option<f64>) {
    let snapshot = tracker.snapshot();
    let stats = snapshot.stats;

    println!("{}", style("Trip summary").bold());
    println!("{}", "-".repeat(40));
    println!("Distance:    {:.2} km", stats.total_distance_m / 1000.0);
    println!("CO2:         {:.0} g", stats.cumulative_co2_g);
    println!("CO2 saved:   {:.0} g", stats.co2_saved_g);
    println!("Fuel saved:  {:.2} l", stats.fuel_saved_l);
    println!("Last speed:  {}", snapshot.speed_display);

    if let Some(recommended) = recommended_kph {
        let score = score::score(
            snapshot.speed_kph,
            recommended,
            stats.cumulative_co2_g,
            stats.co2_saved_g,
        );
        println!();
        println!(
            "Eco score:   {} ({})",
            style(score).bold(),
            style(score::grade(score)).bold().green()
        );
    }
}
