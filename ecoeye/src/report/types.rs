//! Report and selection types shared across the acquisition pipeline.

use serde::{Deserialize, Serialize};

use super::model_slug;

/// The vehicle a report is requested for.
///
/// Identity key for all caching: the normalized model slug plus the year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleSelection {
    /// Model name as entered by the user (trimmed, non-empty).
    pub model: String,
    /// Model year.
    pub year: i32,
}

impl VehicleSelection {
    /// Create a selection, trimming the model name.
    pub fn new(model: impl Into<String>, year: i32) -> Self {
        Self {
            model: model.into().trim().to_string(),
            year,
        }
    }

    /// Normalized slug for the model name.
    pub fn model_slug(&self) -> String {
        model_slug(&self.model)
    }

    /// Cache key combining slug and year, e.g. `tesla_model_y_2024`.
    pub fn cache_key(&self) -> String {
        format!("{}_{}", self.model_slug(), self.year)
    }
}

/// Eco-driving tips attached to every report.
///
/// All fields are free-form human-readable strings; numeric values (such as
/// the recommended cruising speed) are parsed on demand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EcoTips {
    /// Recommended cruising speed, e.g. "90 km/h".
    #[serde(default)]
    pub speed: String,
    /// Recommended tire pressure, e.g. "33 PSI".
    #[serde(default)]
    pub tire_pressure: String,
    /// Maximum idle time, e.g. "2 minutes".
    #[serde(default)]
    pub idling: String,
    /// Recommended passenger range, e.g. "2-3".
    #[serde(default)]
    pub passengers: String,
    /// Short eco driving tip.
    #[serde(default)]
    pub fun_fact: String,
}

/// A generated (or bundled) eco report for one vehicle.
///
/// Invariant: a well-formed report is a JSON object carrying a `tips`
/// sub-object. Payloads violating this are rejected at the acquisition
/// boundary and replaced by the fallback report. Every other field is a
/// free-form string the generation model filled in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EcoReport {
    /// Overall eco grade, "A+" to "D".
    #[serde(default)]
    pub overall_grade: String,
    /// e.g. "18 km/l" or "5.2 L/100km".
    #[serde(default)]
    pub fuel_efficiency: String,
    /// e.g. "14.5 kWh/100km".
    #[serde(default)]
    pub energy_consumption: String,
    /// e.g. "Euro 6" or "Tier 3 standard".
    #[serde(default)]
    pub emissions: String,
    /// Gasoline / Diesel / Hybrid / Electric.
    #[serde(default)]
    pub power_type: String,
    /// kWh value, only for hybrid/electric vehicles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub battery_capacity: Option<String>,
    /// CO2 emission rate, e.g. "120 g/km".
    #[serde(default)]
    pub co2: String,
    /// Recyclability percentage, e.g. "82%".
    #[serde(default)]
    pub recyclability: String,
    /// Estimated range, e.g. "500 km".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_range: Option<String>,
    /// Charging time, only for hybrid/electric vehicles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charging_time: Option<String>,
    /// Estimated energy saved versus an average vehicle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy_saved: Option<String>,
    /// Driving tips. Presence of this object is the report invariant.
    pub tips: EcoTips,
}

impl EcoReport {
    /// Whether the vehicle is fully electric.
    ///
    /// The power type is free-form text from the generation model, so the
    /// check is case-insensitive.
    pub fn is_electric(&self) -> bool {
        self.power_type.trim().eq_ignore_ascii_case("electric")
    }
}
