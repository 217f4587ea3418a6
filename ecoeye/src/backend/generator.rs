//! Report generation abstraction and prompt construction.

use thiserror::Error;

use crate::client::BoxFuture;
use crate::report::VehicleSelection;

/// Cost per 1000 prompt tokens in dollars.
const INPUT_COST_PER_1K: f64 = 0.005;

/// Cost per 1000 completion tokens in dollars.
const OUTPUT_COST_PER_1K: f64 = 0.015;

/// Token usage reported by the upstream model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenUsage {
    /// Tokens in the prompt.
    pub prompt_tokens: u64,
    /// Tokens in the completion.
    pub completion_tokens: u64,
}

/// Raw output of one generation call.
#[derive(Debug, Clone)]
pub struct GeneratedText {
    /// The model's text output, expected (but not guaranteed) to be JSON.
    pub text: String,
    /// Token usage, when the upstream reports it.
    pub usage: Option<TokenUsage>,
}

/// Errors from the generation upstream.
#[derive(Debug, Clone, Error)]
pub enum GeneratorError {
    /// The request to the upstream service failed.
    #[error("generation request failed: {0}")]
    Request(String),

    /// The upstream answered without any content.
    #[error("upstream returned no content")]
    Empty,
}

/// The large-language-model call behind report generation.
///
/// Dyn-compatible so the generation service can be tested with scripted
/// generators.
pub trait ReportGenerator: Send + Sync {
    /// Generate report text for the given prompt.
    fn generate(&self, prompt: &str) -> BoxFuture<'_, Result<GeneratedText, GeneratorError>>;
}

/// Builds the fixed report prompt for a vehicle selection.
///
/// The template pins the exact JSON structure the model must emit; the
/// response is still validated before anything trusts it.
pub fn build_prompt(selection: &VehicleSelection) -> String {
    format!(
        r#"You are an eco vehicle analyst. Based on the following car model and year, generate a sustainable vehicle report.
Model: {model}
Year: {year}

Structure the response in JSON format with these keys:

{{
  "overallGrade": "A+ to D (live eco score)",
  "fuelEfficiency": "e.g. 18 km/l or 5.2 L/100km",
  "energyConsumption": "e.g. 14.5 kWh/100km",
  "emissions": "e.g. Euro 6 or Tier 3 standard",
  "powerType": "Gasoline / Diesel / Hybrid / Electric",
  "batteryCapacity": "kWh value (only for hybrid/electric)",
  "co2": "grams per km (g/km)",
  "recyclability": "percentage, e.g. 82%",

  "tips": {{
    "speed": "recommended cruising speed in km/h",
    "tirePressure": "recommended pressure in PSI",
    "idling": "maximum idle time in minutes",
    "funFact": "short and fun eco driving tip",
    "passengers": "recommended passenger range, e.g. 2-3"
  }}
}}

Only output pure JSON."#,
        model = selection.model,
        year = selection.year,
    )
}

/// Estimates the dollar cost of a generation call, formatted to six
/// decimals (e.g. `"0.012500"`).
pub fn estimate_cost(usage: &TokenUsage) -> String {
    let input = usage.prompt_tokens as f64 * INPUT_COST_PER_1K / 1000.0;
    let output = usage.completion_tokens as f64 * OUTPUT_COST_PER_1K / 1000.0;
    format!("{:.6}", input + output)
}
