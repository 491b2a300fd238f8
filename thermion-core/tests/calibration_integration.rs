//! Integration tests for the calibration engine
//!
//! Covers the full lab workflow: estimate Beta from two bath points, fit
//! Steinhart-Hart from a point set, convert raw resistance channels, and
//! check the two models against each other.

use proptest::prelude::*;
use thermion_core::calibration::{
    beta_from_points, beta_temperature, beta_temperature_series, compare_equations,
    convert_if_resistance, fit_steinhart_hart, steinhart_hart_temperature, BetaCoefficients,
};
use thermion_core::constants::RESISTANCE_HEURISTIC_OHM;

/// Calibration table for a 10 kOhm NTC, from a two-bath-plus-chamber run
const CAL_TEMPERATURES: [f64; 5] = [0.0, 25.0, 50.0, 75.0, 100.0];
const CAL_RESISTANCES: [f64; 5] = [32_650.0, 10_000.0, 3_600.0, 1_500.0, 680.0];

#[test]
fn two_bath_beta_estimation_workflow() {
    // Estimate beta from the 25 C and 50 C baths
    let beta = beta_from_points(25.0, 10_000.0, 50.0, 3_600.0).unwrap();
    let coefficients = BetaCoefficients {
        r0: 10_000.0,
        t0: 25.0,
        beta,
    };

    // Both bath points must round-trip tightly
    assert!((beta_temperature(10_000.0, &coefficients) - 25.0).abs() < 0.01);
    assert!((beta_temperature(3_600.0, &coefficients) - 50.0).abs() < 0.01);

    // And the estimate should land near the datasheet value
    assert!((coefficients.beta - 3950.0).abs() < 150.0, "beta = {}", coefficients.beta);
}

#[test]
fn steinhart_hart_fit_matches_calibration_table() {
    let sh = fit_steinhart_hart(&CAL_TEMPERATURES, &CAL_RESISTANCES).unwrap();

    for (&t, &r) in CAL_TEMPERATURES.iter().zip(CAL_RESISTANCES.iter()) {
        let fitted = steinhart_hart_temperature(r, &sh);
        assert!(
            (fitted - t).abs() < 0.5,
            "point ({} C, {} ohm) refit as {} C",
            t,
            r,
            fitted
        );
    }
}

#[test]
fn equations_agree_over_the_calibrated_range() {
    let beta = beta_from_points(25.0, 10_000.0, 50.0, 3_600.0).unwrap();
    let coefficients = BetaCoefficients {
        r0: 10_000.0,
        t0: 25.0,
        beta,
    };
    // Fit Steinhart-Hart to the Beta model's own curve
    let resistances = [20_000.0, 10_000.0, 5_000.0, 3_600.0, 2_000.0];
    let temperatures = beta_temperature_series(&resistances, &coefficients);
    let sh = fit_steinhart_hart(&temperatures, &resistances).unwrap();

    let comparison = compare_equations(&resistances, &coefficients, Some(&sh));
    assert!(comparison.max_difference.unwrap() < 0.5);
    assert_eq!(comparison.difference.as_ref().unwrap().len(), 5);
    assert!((comparison.beta_mean - comparison.steinhart_hart_mean.unwrap()).abs() < 0.5);
}

#[test]
fn raw_channel_conversion_uses_the_heuristic() {
    let coefficients = BetaCoefficients::default();

    // A resistance channel converts; the NaN dropout rides along
    let ohms = [10_000.0, 9_000.0, f64::NAN, 8_000.0];
    let celsius = convert_if_resistance(&ohms, &coefficients, RESISTANCE_HEURISTIC_OHM);
    assert!((celsius[0] - 25.0).abs() < 1e-9);
    assert!(celsius[1] > 25.0);
    assert!(celsius[2].is_nan());

    // A channel already in degrees passes through untouched
    let already_celsius = [24.0, 25.0, 26.0];
    assert_eq!(
        convert_if_resistance(&already_celsius, &coefficients, RESISTANCE_HEURISTIC_OHM),
        already_celsius
    );
}

proptest! {
    /// Steinhart-Hart generalizes the Beta model, so coefficients fit from
    /// points generated by *any* plausible Beta equation must re-evaluate
    /// to the generating temperatures within half a degree.
    #[test]
    fn steinhart_hart_round_trips_beta_curves(
        beta in 3000.0f64..5000.0,
        r0 in 5_000.0f64..50_000.0,
    ) {
        let coefficients = BetaCoefficients { r0, t0: 25.0, beta };
        let resistances: Vec<f64> =
            [3.0, 1.5, 1.0, 0.5, 0.2].iter().map(|f| f * r0).collect();
        let temperatures = beta_temperature_series(&resistances, &coefficients);

        let sh = fit_steinhart_hart(&temperatures, &resistances).unwrap();
        for (&r, &t) in resistances.iter().zip(temperatures.iter()) {
            let refit = steinhart_hart_temperature(r, &sh);
            prop_assert!(
                (refit - t).abs() < 0.5,
                "refit {} C vs generated {} C at {} ohm",
                refit, t, r
            );
        }
    }
}
