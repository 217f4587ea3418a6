//! A single geolocation sample.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One position sample from the live location source.
///
/// Samples are ephemeral: the accumulator retains only the most recent one
/// as the "last position" to diff against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetrySample {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Reported ground speed in meters per second, if the source provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed_mps: Option<f64>,
    /// When the sample was taken.
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
}

impl TelemetrySample {
    /// Create a sample taken now.
    pub fn new(latitude: f64, longitude: f64, speed_mps: Option<f64>) -> Self {
        Self {
            latitude,
            longitude,
            speed_mps,
            timestamp: Utc::now(),
        }
    }

    /// Instantaneous speed for display, e.g. `"32.4 km/h"`.
    ///
    /// Derived from the reported speed (m/s converted to km/h, one decimal).
    /// Absent or negative speeds display as `"0 km/h"`.
    pub fn speed_display(&self) -> String {
        match self.speed_mps {
            Some(mps) if mps >= 0.0 => format!("{:.1} km/h", mps * 3.6),
            _ => "0 km/h".to_string(),
        }
    }

    /// Instantaneous speed in km/h, 0 when absent or negative.
    pub fn speed_kph(&self) -> f64 {
        match self.speed_mps {
            Some(mps) if mps >= 0.0 => mps * 3.6,
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed_display_converts_to_kph() {
        let sample = TelemetrySample::new(0.0, 0.0, Some(9.0));
        assert_eq!(sample.speed_display(), "32.4 km/h");
    }

    #[test]
    fn test_speed_display_one_decimal() {
        let sample = TelemetrySample::new(0.0, 0.0, Some(10.0));
        assert_eq!(sample.speed_display(), "36.0 km/h");
    }

    #[test]
    fn test_missing_speed_displays_zero() {
        let sample = TelemetrySample::new(0.0, 0.0, None);
        assert_eq!(sample.speed_display(), "0 km/h");
        assert_eq!(sample.speed_kph(), 0.0);
    }

    #[test]
    fn test_negative_speed_displays_zero() {
        let sample = TelemetrySample::new(0.0, 0.0, Some(-1.0));
        assert_eq!(sample.speed_display(), "0 km/h");
        assert_eq!(sample.speed_kph(), 0.0);
    }

    #[test]
    fn test_deserializes_camel_case_without_timestamp() {
        let sample: TelemetrySample =
            serde_json::from_str(r#"{"latitude": 40.7, "longitude": -74.0, "speedMps": 5.0}"#)
                .unwrap();
        assert_eq!(sample.speed_mps, Some(5.0));
    }
}
