//! Great-circle distance calculations.
//!
//! Provides haversine distance between two geographic coordinates, used by
//! the telemetry accumulator to derive incremental trip distance from
//! successive position samples.

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Calculates the great-circle distance between two coordinates in kilometers.
///
/// Uses the haversine formula with a mean Earth radius of 6371 km. This is a
/// pure function with no failure modes: NaN inputs propagate NaN, and callers
/// must guard against them.
///
/// # Arguments
///
/// * `lat1`, `lon1` - First point in degrees
/// * `lat2`, `lon2` - Second point in degrees
#[inline]
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_KM * c
}

/// Calculates the great-circle distance between two coordinates in meters.
#[inline]
pub fn distance_meters(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    distance_km(lat1, lon1, lat2, lon2) * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_points_have_zero_distance() {
        assert_eq!(distance_km(40.7128, -74.0060, 40.7128, -74.0060), 0.0);
        assert_eq!(distance_km(0.0, 0.0, 0.0, 0.0), 0.0);
    }

    #[test]
    fn test_new_york_to_london() {
        // NYC (40.7128, -74.0060) to London (51.5074, -0.1278) is ~5570 km
        let d = distance_km(40.7128, -74.0060, 51.5074, -0.1278);
        assert!(
            (d - 5570.0).abs() < 10.0,
            "Expected ~5570 km, got {:.1} km",
            d
        );
    }

    #[test]
    fn test_one_degree_of_latitude() {
        // One degree of latitude is ~111.2 km everywhere
        let d = distance_km(10.0, 20.0, 11.0, 20.0);
        assert!(
            (d - 111.2).abs() < 0.5,
            "Expected ~111.2 km, got {:.2} km",
            d
        );
    }

    #[test]
    fn test_distance_meters_scales_km() {
        let km = distance_km(48.8566, 2.3522, 48.8666, 2.3522);
        let m = distance_meters(48.8566, 2.3522, 48.8666, 2.3522);
        assert!((m - km * 1000.0).abs() < 1e-9);
    }

    #[test]
    fn test_nan_propagates() {
        assert!(distance_km(f64::NAN, 0.0, 1.0, 1.0).is_nan());
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_distance_is_non_negative(
                lat1 in -90.0..90.0_f64,
                lon1 in -180.0..180.0_f64,
                lat2 in -90.0..90.0_f64,
                lon2 in -180.0..180.0_f64,
            ) {
                prop_assert!(distance_km(lat1, lon1, lat2, lon2) >= 0.0);
            }

            #[test]
            fn test_distance_is_symmetric(
                lat1 in -90.0..90.0_f64,
                lon1 in -180.0..180.0_f64,
                lat2 in -90.0..90.0_f64,
                lon2 in -180.0..180.0_f64,
            ) {
                let forward = distance_km(lat1, lon1, lat2, lon2);
                let reverse = distance_km(lat2, lon2, lat1, lon1);
                prop_assert!(
                    (forward - reverse).abs() < 1e-9,
                    "Symmetry violated: {} vs {}",
                    forward,
                    reverse
                );
            }

            #[test]
            fn test_distance_to_self_is_zero(
                lat in -90.0..90.0_f64,
                lon in -180.0..180.0_f64,
            ) {
                prop_assert_eq!(distance_km(lat, lon, lat, lon), 0.0);
            }

            #[test]
            fn test_distance_bounded_by_half_circumference(
                lat1 in -90.0..90.0_f64,
                lon1 in -180.0..180.0_f64,
                lat2 in -90.0..90.0_f64,
                lon2 in -180.0..180.0_f64,
            ) {
                // No two points on the sphere are further apart than half the
                // circumference (~20015 km)
                let d = distance_km(lat1, lon1, lat2, lon2);
                prop_assert!(d <= EARTH_RADIUS_KM * std::f64::consts::PI + 1e-6);
            }
        }
    }
}
