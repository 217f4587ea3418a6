//! Live driving-score calculation.
//!
//! Converts current driving behavior (speed relative to the report's
//! recommended cruising speed) and cumulative emission figures into a 0-100
//! eco score and a letter grade. The calculation is a pure function of its
//! inputs; it carries no state between evaluations.

/// Speed deviation (km/h) above which the smaller deduction applies.
const SPEED_BAND_MINOR_KPH: f64 = 5.0;

/// Speed deviation (km/h) above which the larger deduction applies.
const SPEED_BAND_MAJOR_KPH: f64 = 15.0;

/// CO2 savings (grams) that earn the efficiency bonus.
const CO2_SAVED_BONUS_THRESHOLD_G: f64 = 1000.0;

/// Cumulative CO2 (grams) above which the footprint penalty applies.
const CO2_FOOTPRINT_PENALTY_THRESHOLD_G: f64 = 3000.0;

/// Calculates the eco driving score in [0, 100].
///
/// Point deductions and bonuses are evaluated in a fixed order:
///
/// 1. Start at 100.
/// 2. Speed deviation beyond 15 km/h deducts 20 points; beyond 5 km/h
///    deducts 10. Only one of the two bands applies.
/// 3. More than 1000 g of CO2 saved earns a 10 point bonus.
/// 4. More than 3000 g of cumulative CO2 deducts 15 points.
/// 5. The result is clamped to [0, 100].
pub fn score(
    current_speed_kph: f64,
    recommended_speed_kph: f64,
    cumulative_co2_g: f64,
    co2_saved_g: f64,
) -> u8 {
    let mut points: i32 = 100;

    let deviation = (current_speed_kph - recommended_speed_kph).abs();
    if deviation > SPEED_BAND_MAJOR_KPH {
        points -= 20;
    } else if deviation > SPEED_BAND_MINOR_KPH {
        points -= 10;
    }

    if co2_saved_g > CO2_SAVED_BONUS_THRESHOLD_G {
        points += 10;
    }

    if cumulative_co2_g > CO2_FOOTPRINT_PENALTY_THRESHOLD_G {
        points -= 15;
    }

    points.clamp(0, 100) as u8
}

/// Maps a score to its letter grade.
///
/// The mapping is a step function: >=90 "A+", >=80 "A", >=70 "B",
/// >=60 "C", everything below "D".
pub fn grade(score: u8) -> &'static str {
    match score {
        90..=u8::MAX => "A+",
        80..=89 => "A",
        70..=79 => "B",
        60..=69 => "C",
        _ => "D",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_driving_scores_100() {
        assert_eq!(score(80.0, 80.0, 0.0, 0.0), 100);
    }

    #[test]
    fn test_minor_speed_deviation_deducts_10() {
        assert_eq!(score(90.0, 80.0, 0.0, 0.0), 90);
    }

    #[test]
    fn test_major_speed_deviation_deducts_20() {
        assert_eq!(score(100.0, 80.0, 0.0, 0.0), 80);
    }

    #[test]
    fn test_speed_bands_are_not_cumulative() {
        // 20 km/h over triggers only the major band, not both
        let major_only = score(100.0, 80.0, 0.0, 0.0);
        assert_eq!(major_only, 80);
    }

    #[test]
    fn test_deviation_at_band_edges_is_exclusive() {
        // Exactly 5 km/h and exactly 15 km/h over are within their bands
        assert_eq!(score(85.0, 80.0, 0.0, 0.0), 100);
        assert_eq!(score(95.0, 80.0, 0.0, 0.0), 90);
    }

    #[test]
    fn test_co2_savings_bonus() {
        assert_eq!(score(80.0, 80.0, 0.0, 1500.0), 100); // clamped
        assert_eq!(score(100.0, 80.0, 0.0, 1500.0), 90); // -20 +10
    }

    #[test]
    fn test_footprint_penalty() {
        assert_eq!(score(80.0, 80.0, 3500.0, 0.0), 85);
    }

    #[test]
    fn test_all_penalties_combined() {
        // -20 speed, +10 savings, -15 footprint
        assert_eq!(score(100.0, 80.0, 3500.0, 1500.0), 75);
    }

    #[test]
    fn test_slow_deviation_counts_like_fast() {
        // Driving 20 km/h under the recommendation deducts the same as over
        assert_eq!(score(60.0, 80.0, 0.0, 0.0), 80);
    }

    #[test]
    fn test_grade_step_function() {
        assert_eq!(grade(95), "A+");
        assert_eq!(grade(90), "A+");
        assert_eq!(grade(85), "A");
        assert_eq!(grade(80), "A");
        assert_eq!(grade(72), "B");
        assert_eq!(grade(61), "C");
        assert_eq!(grade(40), "D");
        assert_eq!(grade(0), "D");
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_score_always_in_range(
                current in 0.0..300.0_f64,
                recommended in 0.0..200.0_f64,
                co2 in 0.0..100_000.0_f64,
                saved in 0.0..100_000.0_f64,
            ) {
                let s = score(current, recommended, co2, saved);
                prop_assert!(s <= 100);
            }

            #[test]
            fn test_score_non_increasing_in_deviation(
                recommended in 10.0..150.0_f64,
                dev_small in 5.01..15.0_f64,
                dev_large in 15.01..100.0_f64,
                co2 in 0.0..10_000.0_f64,
                saved in 0.0..10_000.0_f64,
            ) {
                // Beyond the 5 km/h band a larger deviation never scores higher
                let small = score(recommended + dev_small, recommended, co2, saved);
                let large = score(recommended + dev_large, recommended, co2, saved);
                prop_assert!(large <= small);
            }

            #[test]
            fn test_score_is_deterministic(
                current in 0.0..300.0_f64,
                recommended in 0.0..200.0_f64,
                co2 in 0.0..100_000.0_f64,
                saved in 0.0..100_000.0_f64,
            ) {
                prop_assert_eq!(
                    score(current, recommended, co2, saved),
                    score(current, recommended, co2, saved)
                );
            }
        }
    }
}
