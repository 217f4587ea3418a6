//! Trip statistics accumulation.
//!
//! Converts successive position samples into cumulative distance, CO2
//! footprint, and savings figures using the emission profile of the
//! reported vehicle.

use tracing::trace;

use crate::geo;
use crate::report::EcoReport;

use super::TelemetrySample;

/// Emission rate (g/km) assumed when the report's `co2` field is unparsable.
pub const DEFAULT_EMISSION_G_PER_KM: f64 = 120.0;

/// Average-vehicle baseline emission rate (g/km) savings are measured against.
pub const BASELINE_EMISSION_G_PER_KM: f64 = 180.0;

/// Fuel efficiency (km/l) assumed when the report's `fuelEfficiency` field
/// is unparsable.
pub const DEFAULT_FUEL_KM_PER_LITER: f64 = 15.0;

/// Parses the leading numeric value of a free-form figure such as
/// `"120 g/km"`, `"0 g/km"`, or `"18.5 km/l"`.
///
/// Returns `None` when the string does not start with a number (after
/// leading whitespace). Negative values are treated as unparsable; zero is
/// a legitimate rate (an electric vehicle emits 0 g/km), so callers that
/// need a strictly positive figure filter for it themselves.
pub fn leading_number(text: &str) -> Option<f64> {
    let trimmed = text.trim_start();
    let end = trimmed
        .char_indices()
        .take_while(|(i, c)| c.is_ascii_digit() || *c == '.' || (*i == 0 && *c == '-'))
        .map(|(i, c)| i + c.len_utf8())
        .last()?;

    trimmed[..end].parse::<f64>().ok().filter(|v| *v >= 0.0)
}

/// Per-vehicle figures the accumulator needs, parsed once from the report.
///
/// Malformed or missing report fields fall back to the stated defaults
/// rather than failing telemetry updates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmissionProfile {
    /// CO2 emitted per kilometer driven, in grams.
    pub emission_g_per_km: f64,
    /// Kilometers driven per liter of fuel.
    pub fuel_km_per_liter: f64,
    /// Electric vehicles accumulate no fuel savings.
    pub electric: bool,
}

impl Default for EmissionProfile {
    fn default() -> Self {
        Self {
            emission_g_per_km: DEFAULT_EMISSION_G_PER_KM,
            fuel_km_per_liter: DEFAULT_FUEL_KM_PER_LITER,
            electric: false,
        }
    }
}

impl EmissionProfile {
    /// Derive the profile from a report's free-form figures.
    ///
    /// The emission rate accepts zero (electric vehicles emit 0 g/km); the
    /// fuel efficiency must be positive since it divides the distance.
    pub fn from_report(report: &EcoReport) -> Self {
        Self {
            emission_g_per_km: leading_number(&report.co2)
                .unwrap_or(DEFAULT_EMISSION_G_PER_KM),
            fuel_km_per_liter: leading_number(&report.fuel_efficiency)
                .filter(|v| *v > 0.0)
                .unwrap_or(DEFAULT_FUEL_KM_PER_LITER),
            electric: report.is_electric(),
        }
    }
}

/// Cumulative driving statistics for the session.
///
/// Monotonically accumulated across samples; reset only when the session
/// (report view) is torn down.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TripStats {
    /// Total distance driven in meters.
    pub total_distance_m: f64,
    /// Cumulative CO2 emitted in grams.
    pub cumulative_co2_g: f64,
    /// CO2 saved versus the average-vehicle baseline, in grams.
    pub co2_saved_g: f64,
    /// Fuel saved versus the baseline, in liters. Always 0 for electric
    /// vehicles.
    pub fuel_saved_l: f64,
}

/// Accumulates trip statistics from successive position samples.
///
/// Two-state machine: uninitialized (no prior sample) and tracking. The
/// first sample records the starting position without updating distance;
/// each subsequent sample adds the haversine distance from the previous
/// position and recomputes the emission figures.
///
/// There is exactly one writer (the location subscription), so the
/// accumulator itself is not synchronized.
#[derive(Debug, Clone, Default)]
pub struct TripAccumulator {
    profile: EmissionProfile,
    last: Option<TelemetrySample>,
    stats: TripStats,
}

impl TripAccumulator {
    /// Create an accumulator for a vehicle's emission profile.
    pub fn new(profile: EmissionProfile) -> Self {
        Self {
            profile,
            last: None,
            stats: TripStats::default(),
        }
    }

    /// Feed the next position sample and return the updated statistics.
    pub fn record(&mut self, sample: TelemetrySample) -> TripStats {
        if let Some(last) = self.last {
            let km = geo::distance_km(
                last.latitude,
                last.longitude,
                sample.latitude,
                sample.longitude,
            );

            self.stats.total_distance_m += km * 1000.0;
            self.stats.cumulative_co2_g += km * self.profile.emission_g_per_km;
            self.stats.co2_saved_g +=
                km * (BASELINE_EMISSION_G_PER_KM - self.profile.emission_g_per_km);

            if !self.profile.electric {
                self.stats.fuel_saved_l += km / self.profile.fuel_km_per_liter;
            }

            trace!(
                distance_m = self.stats.total_distance_m,
                co2_g = self.stats.cumulative_co2_g,
                "Trip stats updated"
            );
        }

        self.last = Some(sample);
        self.stats
    }

    /// Current cumulative statistics.
    pub fn stats(&self) -> TripStats {
        self.stats
    }

    /// The vehicle profile in use.
    pub fn profile(&self) -> EmissionProfile {
        self.profile
    }

    /// The most recent sample, if any was recorded.
    pub fn last_sample(&self) -> Option<TelemetrySample> {
        self.last
    }

    /// Instantaneous speed display for the most recent sample.
    ///
    /// Recomputed from the current sample's reported speed, independent of
    /// the accumulation logic. `"0 km/h"` before the first sample.
    pub fn speed_display(&self) -> String {
        self.last
            .map(|s| s.speed_display())
            .unwrap_or_else(|| "0 km/h".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(lat: f64, lon: f64) -> TelemetrySample {
        TelemetrySample::new(lat, lon, Some(10.0))
    }

    #[test]
    fn test_leading_number_parses_figures() {
        assert_eq!(leading_number("120 g/km"), Some(120.0));
        assert_eq!(leading_number("18.5 km/l"), Some(18.5));
        assert_eq!(leading_number(" 95g/km"), Some(95.0));
        assert_eq!(leading_number("0 g/km"), Some(0.0));
    }

    #[test]
    fn test_leading_number_rejects_garbage() {
        assert_eq!(leading_number("approximately 120"), None);
        assert_eq!(leading_number(""), None);
        assert_eq!(leading_number("N/A"), None);
        assert_eq!(leading_number("-5"), None);
    }

    #[test]
    fn test_profile_from_report_with_defaults() {
        let mut report = EcoReport::default();
        report.co2 = "not a number".to_string();
        report.fuel_efficiency = String::new();

        let profile = EmissionProfile::from_report(&report);
        assert_eq!(profile.emission_g_per_km, DEFAULT_EMISSION_G_PER_KM);
        assert_eq!(profile.fuel_km_per_liter, DEFAULT_FUEL_KM_PER_LITER);
        assert!(!profile.electric);
    }

    #[test]
    fn test_profile_from_report_parses_figures() {
        let mut report = EcoReport::default();
        report.co2 = "95 g/km".to_string();
        report.fuel_efficiency = "20 km/l".to_string();
        report.power_type = "Electric".to_string();

        let profile = EmissionProfile::from_report(&report);
        assert_eq!(profile.emission_g_per_km, 95.0);
        assert_eq!(profile.fuel_km_per_liter, 20.0);
        assert!(profile.electric);
    }

    #[test]
    fn test_first_sample_records_no_distance() {
        let mut acc = TripAccumulator::new(EmissionProfile::default());
        let stats = acc.record(sample(40.0, -74.0));
        assert_eq!(stats.total_distance_m, 0.0);
        assert_eq!(stats.cumulative_co2_g, 0.0);
    }

    #[test]
    fn test_second_sample_matches_haversine() {
        let mut acc = TripAccumulator::new(EmissionProfile::default());
        acc.record(sample(40.0, -74.0));
        let stats = acc.record(sample(40.001, -74.0));

        let expected = crate::geo::distance_meters(40.0, -74.0, 40.001, -74.0);
        let error = (stats.total_distance_m - expected).abs() / expected;
        assert!(error < 0.01, "Distance off by {:.2}%", error * 100.0);
    }

    #[test]
    fn test_emissions_accumulate_per_km() {
        let profile = EmissionProfile {
            emission_g_per_km: 100.0,
            fuel_km_per_liter: 10.0,
            electric: false,
        };
        let mut acc = TripAccumulator::new(profile);
        acc.record(sample(0.0, 0.0));
        // ~111.2 km north
        let stats = acc.record(sample(1.0, 0.0));

        let km = stats.total_distance_m / 1000.0;
        assert!((stats.cumulative_co2_g - km * 100.0).abs() < 1e-6);
        // Saved against the 180 g/km baseline
        assert!((stats.co2_saved_g - km * 80.0).abs() < 1e-6);
        assert!((stats.fuel_saved_l - km / 10.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_emission_report_accrues_no_co2() {
        let mut report = EcoReport::default();
        report.co2 = "0 g/km".to_string();
        report.power_type = "Electric".to_string();

        let profile = EmissionProfile::from_report(&report);
        assert_eq!(profile.emission_g_per_km, 0.0);

        let mut acc = TripAccumulator::new(profile);
        acc.record(sample(0.0, 0.0));
        let stats = acc.record(sample(1.0, 0.0));

        let km = stats.total_distance_m / 1000.0;
        assert_eq!(stats.cumulative_co2_g, 0.0);
        // Savings are the full baseline rate
        assert!((stats.co2_saved_g - km * BASELINE_EMISSION_G_PER_KM).abs() < 1e-6);
    }

    #[test]
    fn test_zero_fuel_efficiency_falls_back_to_default() {
        let mut report = EcoReport::default();
        report.fuel_efficiency = "0 km/l".to_string();

        let profile = EmissionProfile::from_report(&report);
        assert_eq!(profile.fuel_km_per_liter, DEFAULT_FUEL_KM_PER_LITER);
    }

    #[test]
    fn test_electric_vehicle_saves_no_fuel() {
        let profile = EmissionProfile {
            emission_g_per_km: 0.0,
            fuel_km_per_liter: DEFAULT_FUEL_KM_PER_LITER,
            electric: true,
        };
        let mut acc = TripAccumulator::new(profile);
        acc.record(sample(0.0, 0.0));
        acc.record(sample(0.5, 0.0));
        let stats = acc.record(sample(1.0, 0.0));

        assert!(stats.total_distance_m > 0.0);
        assert_eq!(stats.fuel_saved_l, 0.0);
    }

    #[test]
    fn test_stats_are_monotonic() {
        let mut acc = TripAccumulator::new(EmissionProfile::default());
        acc.record(sample(0.0, 0.0));
        let first = acc.record(sample(0.01, 0.0));
        let second = acc.record(sample(0.02, 0.0));

        assert!(second.total_distance_m > first.total_distance_m);
        assert!(second.cumulative_co2_g > first.cumulative_co2_g);
    }

    #[test]
    fn test_speed_display_tracks_latest_sample() {
        let mut acc = TripAccumulator::new(EmissionProfile::default());
        assert_eq!(acc.speed_display(), "0 km/h");

        acc.record(TelemetrySample::new(0.0, 0.0, Some(5.0)));
        assert_eq!(acc.speed_display(), "18.0 km/h");

        acc.record(TelemetrySample::new(0.0, 0.0, None));
        assert_eq!(acc.speed_display(), "0 km/h");
    }
}
