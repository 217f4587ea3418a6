//! Report command - acquire and display an eco report.

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use ecoeye::client::RATE_LIMIT_MESSAGE;
use ecoeye::config::ConfigFile;
use ecoeye::orchestrator::{AcquiredReport, FallbackReason, ReportOrchestrator, ReportSource};
use ecoeye::report::{EcoReport, VehicleSelection};

use crate::error::CliError;

/// Arguments for the report command.
#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Vehicle model name, e.g. "Tesla Model Y"
    pub model: String,

    /// Model year
    pub year: i32,

    /// Emit the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Print a shareable one-paragraph summary instead of the full report
    #[arg(long)]
    pub share: bool,
}

/// Run the report command.
pub async fn run(config: &ConfigFile, args: ReportArgs) -> Result<(), CliError> {
    let selection = VehicleSelection::new(args.model.clone(), args.year);
    if selection.model.is_empty() {
        return Err(CliError::Acquire("model name must not be empty".to_string()));
    }

    let api = super::api_client(config)?;
    let mut orchestrator = ReportOrchestrator::new(api);
    if let Some(path) = &config.fallback.path {
        orchestrator = orchestrator.with_fallback_override(path.clone());
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(format!("Generating eco report for {} {}...", selection.model, selection.year));
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));

    let acquired = orchestrator
        .acquire(&selection)
        .await
        .map_err(|e| CliError::Acquire(e.to_string()));
    spinner.finish_and_clear();
    let acquired = acquired?;

    if args.json {
        let text = serde_json::to_string_pretty(&acquired.report)
            .map_err(|e| CliError::Output(e.to_string()))?;
        println!("{}", text);
        return Ok(());
    }

    if args.share {
        println!("{}", share_text(&selection, &acquired.report));
        return Ok(());
    }

    print_report(&selection, &acquired);
    Ok(())
}

fn print_report(selection: &VehicleSelection, acquired: &AcquiredReport) {
    let report = &acquired.report;

    println!(
        "{}",
        style(format!("Eco Report: {} {}", selection.model, selection.year)).bold()
    );
    println!("{}", "=".repeat(40));
    println!();
    print_source(&acquired.source);

    println!("Overall grade:   {}", style(&report.overall_grade).bold().green());
    println!("Power type:      {}", report.power_type);
    print_field("Fuel efficiency", &report.fuel_efficiency);
    print_field("Energy use", &report.energy_consumption);
    print_field("Emissions", &report.emissions);
    print_field("CO2", &report.co2);
    print_field("Recyclability", &report.recyclability);
    print_optional("Battery", &report.battery_capacity);
    print_optional("Range", &report.estimated_range);
    print_optional("Charging time", &report.charging_time);
    print_optional("Energy saved", &report.energy_saved);

    println!();
    println!("{}", style("Driving tips").bold());
    print_field("Cruising speed", &report.tips.speed);
    print_field("Tire pressure", &report.tips.tire_pressure);
    print_field("Idling", &report.tips.idling);
    print_field("Passengers", &report.tips.passengers);
    print_field("Tip", &report.tips.fun_fact);
}

fn print_source(source: &ReportSource) {
    match source {
        ReportSource::Live { cost } => {
            let cost = cost.as_deref().unwrap_or("unknown");
            println!("Source:          freshly generated (cost ${})", cost);
        }
        ReportSource::CacheHit => {
            println!("Source:          server cache");
        }
        ReportSource::Fallback { reason } => {
            if *reason == FallbackReason::RateLimited {
                println!("{}", style(RATE_LIMIT_MESSAGE).yellow());
            }
            println!(
                "Source:          {}",
                style(format!("fallback bundle ({})", reason_text(*reason))).yellow()
            );
        }
    }
    println!();
}

fn reason_text(reason: FallbackReason) -> &'static str {
    match reason {
        FallbackReason::Unreachable => "backend unreachable",
        FallbackReason::RateLimited => "rate limited",
        FallbackReason::MalformedResponse => "malformed response",
        FallbackReason::UpstreamFailure => "generation failed",
    }
}

fn print_field(label: &str, value: &str) {
    if !value.is_empty() {
        println!("{:<16} {}", format!("{}:", label), value);
    }
}

fn print_optional(label: &str, value: &Option<String>) {
    if let Some(value) = value {
        print_field(label, value);
    }
}

/// One-paragraph summary suitable for pasting into a chat or post.
fn share_text(selection: &VehicleSelection, report: &EcoReport) -> String {
    let mut text = format!(
        "My {} {} scored an eco grade of {}",
        selection.year, selection.model, report.overall_grade
    );
    if !report.co2.is_empty() {
        text.push_str(&format!(" emitting {}", report.co2));
    }
    if !report.tips.fun_fact.is_empty() {
        text.push_str(&format!(". {}", report.tips.fun_fact));
    } else {
        text.push('.');
    }
    text.push_str(" #EcoEye");
    text
}
