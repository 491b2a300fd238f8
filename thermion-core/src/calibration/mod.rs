//! Sensor Calibration Engine
//!
//! ## Overview
//!
//! Resistance-to-temperature conversion for NTC thermistors via two
//! interchangeable models, and coefficient estimation from calibration
//! points measured externally (a bath, a climate chamber, a calibrated
//! reference probe):
//!
//! - **Beta equation**: single-coefficient model, accurate over a limited
//!   range around its reference point:
//!   `1/T = 1/T0 + (1/beta) * ln(R/R0)`
//! - **Steinhart-Hart equation**: three-coefficient model, accurate over
//!   wide ranges: `1/T = a + b*ln(R) + c*ln³(R)`
//!
//! The Beta model is a special case of Steinhart-Hart (`c = 0`), which is
//! why fitting Steinhart-Hart coefficients to Beta-generated points
//! round-trips to within a small fraction of a degree.
//!
//! ## Numeric guards
//!
//! Resistances and resistance ratios are floor-clamped to
//! [`MIN_RESISTANCE_OHM`] before any logarithm, so non-positive readings
//! (open circuits, offset-corrected noise) convert to an extreme-but-finite
//! temperature instead of NaN. A NaN resistance is *not* clamped: it means
//! "no reading" and propagates.
//!
//! ## Error policy
//!
//! Conversions never fail. Fitting fails fast on structural problems:
//! mismatched point arrays, fewer than three points, non-finite or
//! coincident points that make the system singular.

mod matrix;

use alloc::vec::Vec;

use crate::constants::thermistor::{
    DEFAULT_BETA_KELVIN, DEFAULT_R0_OHM, DEFAULT_T0_CELSIUS, KELVIN_OFFSET, MIN_RESISTANCE_OHM,
};
use crate::errors::{ProcessingError, ProcessingResult};
use crate::stats::nan_mean;

/// Beta-model coefficients, immutable once fit
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BetaCoefficients {
    /// Reference resistance in ohms
    pub r0: f64,
    /// Reference temperature in °C
    pub t0: f64,
    /// Beta value in kelvin
    pub beta: f64,
}

impl Default for BetaCoefficients {
    /// The common 10 kΩ @ 25 °C / 3950 K part
    fn default() -> Self {
        Self {
            r0: DEFAULT_R0_OHM,
            t0: DEFAULT_T0_CELSIUS,
            beta: DEFAULT_BETA_KELVIN,
        }
    }
}

/// Steinhart-Hart coefficients, immutable once fit
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SteinhartHartCoefficients {
    /// Constant term (1/K)
    pub a: f64,
    /// `ln(R)` coefficient
    pub b: f64,
    /// `ln³(R)` coefficient
    pub c: f64,
}

/// Floor-clamp before a logarithm; NaN passes through untouched.
fn clamp_floor(value: f64) -> f64 {
    // NaN fails the comparison and is returned as-is
    if value < MIN_RESISTANCE_OHM {
        MIN_RESISTANCE_OHM
    } else {
        value
    }
}

/// Convert one resistance to °C with the Beta equation.
pub fn beta_temperature(resistance_ohm: f64, coefficients: &BetaCoefficients) -> f64 {
    let t0_kelvin = coefficients.t0 + KELVIN_OFFSET;
    let resistance = clamp_floor(resistance_ohm);
    let ratio = clamp_floor(resistance / coefficients.r0);

    let inv_t = 1.0 / t0_kelvin + libm::log(ratio) / coefficients.beta;
    1.0 / inv_t - KELVIN_OFFSET
}

/// Convert a resistance sequence to °C with the Beta equation.
pub fn beta_temperature_series(resistances: &[f64], coefficients: &BetaCoefficients) -> Vec<f64> {
    resistances
        .iter()
        .map(|&r| beta_temperature(r, coefficients))
        .collect()
}

/// Convert one resistance to °C with the Steinhart-Hart equation.
pub fn steinhart_hart_temperature(
    resistance_ohm: f64,
    coefficients: &SteinhartHartCoefficients,
) -> f64 {
    let ln_r = libm::log(clamp_floor(resistance_ohm));
    let inv_t = coefficients.a + coefficients.b * ln_r + coefficients.c * ln_r * ln_r * ln_r;
    1.0 / inv_t - KELVIN_OFFSET
}

/// Convert a resistance sequence to °C with the Steinhart-Hart equation.
pub fn steinhart_hart_temperature_series(
    resistances: &[f64],
    coefficients: &SteinhartHartCoefficients,
) -> Vec<f64> {
    resistances
        .iter()
        .map(|&r| steinhart_hart_temperature(r, coefficients))
        .collect()
}

/// Fit Steinhart-Hart coefficients from calibration points.
///
/// Requires at least three `(°C, Ω)` points in index-aligned slices. The
/// overdetermined system `1/T = a + b*ln(R) + c*ln³(R)` is solved by least
/// squares; more points than three improve the fit. Coincident or
/// non-finite points fail with [`ProcessingError::DegenerateFit`].
pub fn fit_steinhart_hart(
    temperatures: &[f64],
    resistances: &[f64],
) -> ProcessingResult<SteinhartHartCoefficients> {
    if temperatures.len() != resistances.len() {
        return Err(ProcessingError::ShapeMismatch {
            expected: temperatures.len(),
            actual: resistances.len(),
        });
    }
    if temperatures.len() < 3 {
        return Err(ProcessingError::InsufficientCalibrationPoints {
            required: 3,
            available: temperatures.len(),
        });
    }
    if temperatures
        .iter()
        .chain(resistances.iter())
        .any(|v| !v.is_finite())
    {
        return Err(ProcessingError::DegenerateFit {
            reason: "non-finite calibration point",
        });
    }

    let mut rows: Vec<[f64; 3]> = Vec::with_capacity(temperatures.len());
    let mut rhs: Vec<f64> = Vec::with_capacity(temperatures.len());
    for (&t, &r) in temperatures.iter().zip(resistances.iter()) {
        let ln_r = libm::log(clamp_floor(r));
        rows.push([1.0, ln_r, ln_r * ln_r * ln_r]);
        rhs.push(1.0 / (t + KELVIN_OFFSET));
    }

    let solution =
        matrix::least_squares(&rows, &rhs).ok_or(ProcessingError::DegenerateFit {
            reason: "calibration points form a singular system",
        })?;
    let [a, b, c] = solution;

    log_info!("Steinhart-Hart fit: a={:e}, b={:e}, c={:e}", a, b, c);
    Ok(SteinhartHartCoefficients { a, b, c })
}

/// Estimate a Beta value from two calibration points.
///
/// Closed form in kelvin over `(t1, r1)` and `(t2, r2)`:
/// `beta = ln(r1/r2) / (1/T1 - 1/T2)`. The two points must have distinct
/// temperatures and positive resistances; anything else is a
/// [`ProcessingError::DegenerateFit`].
pub fn beta_from_points(t1: f64, r1: f64, t2: f64, r2: f64) -> ProcessingResult<f64> {
    if [t1, r1, t2, r2].iter().any(|v| !v.is_finite()) {
        return Err(ProcessingError::DegenerateFit {
            reason: "non-finite calibration point",
        });
    }
    if r1 <= 0.0 || r2 <= 0.0 {
        return Err(ProcessingError::DegenerateFit {
            reason: "non-positive resistance",
        });
    }
    let t1_kelvin = t1 + KELVIN_OFFSET;
    let t2_kelvin = t2 + KELVIN_OFFSET;
    let inv_t_delta = 1.0 / t1_kelvin - 1.0 / t2_kelvin;
    if inv_t_delta == 0.0 {
        return Err(ProcessingError::DegenerateFit {
            reason: "coincident calibration temperatures",
        });
    }

    let beta = libm::log(r1 / r2) / inv_t_delta;
    log_info!("Beta from two points: {} K", beta);
    Ok(beta)
}

/// Side-by-side evaluation of both equations over one resistance sequence.
///
/// A diagnostic, not a decision procedure: no preference between the
/// models is expressed. Steinhart-Hart fields are `None` when no
/// coefficients were supplied.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EquationComparison {
    /// Beta-equation temperatures, elementwise
    pub beta_temperatures: Vec<f64>,
    /// Mean of the Beta temperatures
    pub beta_mean: f64,
    /// Population std of the Beta temperatures
    pub beta_std: f64,
    /// Steinhart-Hart temperatures, elementwise
    pub steinhart_hart_temperatures: Option<Vec<f64>>,
    /// Mean of the Steinhart-Hart temperatures
    pub steinhart_hart_mean: Option<f64>,
    /// Population std of the Steinhart-Hart temperatures
    pub steinhart_hart_std: Option<f64>,
    /// Elementwise Steinhart-Hart minus Beta
    pub difference: Option<Vec<f64>>,
    /// Largest absolute elementwise difference
    pub max_difference: Option<f64>,
    /// Mean signed elementwise difference
    pub mean_difference: Option<f64>,
}

/// Evaluate both equations over `resistances` and summarize the
/// discrepancy. See [`EquationComparison`].
pub fn compare_equations(
    resistances: &[f64],
    beta: &BetaCoefficients,
    steinhart_hart: Option<&SteinhartHartCoefficients>,
) -> EquationComparison {
    let beta_temperatures = beta_temperature_series(resistances, beta);
    let beta_mean = plain_mean(&beta_temperatures);
    let beta_std = plain_std(&beta_temperatures, beta_mean);

    let mut comparison = EquationComparison {
        beta_temperatures,
        beta_mean,
        beta_std,
        steinhart_hart_temperatures: None,
        steinhart_hart_mean: None,
        steinhart_hart_std: None,
        difference: None,
        max_difference: None,
        mean_difference: None,
    };

    if let Some(sh) = steinhart_hart {
        let sh_temperatures = steinhart_hart_temperature_series(resistances, sh);
        let sh_mean = plain_mean(&sh_temperatures);
        comparison.steinhart_hart_std = Some(plain_std(&sh_temperatures, sh_mean));
        comparison.steinhart_hart_mean = Some(sh_mean);

        let difference: Vec<f64> = sh_temperatures
            .iter()
            .zip(comparison.beta_temperatures.iter())
            .map(|(&s, &b)| s - b)
            .collect();
        comparison.max_difference = Some(
            difference
                .iter()
                .fold(f64::NEG_INFINITY, |m, &d| {
                    // NaN anywhere poisons the maximum, matching the
                    // elementwise NaN propagation of the series themselves
                    if d.is_nan() || m.is_nan() {
                        f64::NAN
                    } else {
                        m.max(libm::fabs(d))
                    }
                }),
        );
        comparison.mean_difference = Some(plain_mean(&difference));
        comparison.difference = Some(difference);
        comparison.steinhart_hart_temperatures = Some(sh_temperatures);
    }

    comparison
}

/// Whether a raw channel looks like resistance rather than temperature.
///
/// Heuristic: plausible temperatures sit below `threshold_ohm` (default
/// [`RESISTANCE_HEURISTIC_OHM`](crate::constants::thermistor::RESISTANCE_HEURISTIC_OHM)),
/// NTC resistances far above it. The mean is taken over valid samples;
/// an all-NaN channel is not classified as resistance.
pub fn is_resistance_series(samples: &[f64], threshold_ohm: f64) -> bool {
    nan_mean(samples).map_or(false, |mean| mean > threshold_ohm)
}

/// Convert a channel to °C if (and only if) it looks like resistance.
///
/// Channels already in °C pass through unchanged. NaN entries propagate
/// either way.
pub fn convert_if_resistance(
    samples: &[f64],
    coefficients: &BetaCoefficients,
    threshold_ohm: f64,
) -> Vec<f64> {
    if is_resistance_series(samples, threshold_ohm) {
        beta_temperature_series(samples, coefficients)
    } else {
        samples.to_vec()
    }
}

/// Mean without NaN skipping: one NaN poisons the result, as it should in
/// a diagnostic that reports on exactly the values it was given.
fn plain_mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn plain_std(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let sq_sum: f64 = values.iter().map(|v| (v - mean) * (v - mean)).sum();
    libm::sqrt(sq_sum / values.len() as f64)
}
