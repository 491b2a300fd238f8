//! Temporal Analyzer
//!
//! Derivative estimation and steady-state detection over filtered data and
//! its timestamp sequence. Timestamps are seconds, monotonically
//! non-decreasing, index-aligned with the samples.

use alloc::vec::Vec;

use crate::errors::{ProcessingError, ProcessingResult};
use crate::stats::nan_std;

/// Outcome of a steady-state scan.
///
/// `index` is the position at which the window standard deviation first
/// dropped below the threshold; `None` when the signal never settled (or
/// the sequence was shorter than the window). `time_to_steady` is the
/// timestamp at that position when one exists.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SteadyStateResult {
    /// First position whose trailing window qualified as settled
    pub index: Option<usize>,
    /// Timestamp at `index`, in seconds
    pub time_to_steady: Option<f64>,
}

impl SteadyStateResult {
    /// Whether the signal reached steady state
    pub fn is_steady(&self) -> bool {
        self.index.is_some()
    }
}

/// Finite-difference rate of change between consecutive samples.
///
/// Returns a sequence of length `n - 1` where
/// `rate[i] = (samples[i+1] - samples[i]) / (timestamps[i+1] - timestamps[i])`.
/// A zero time delta yields NaN at that position ("no valid rate"), never a
/// division error. Fewer than two samples yield an empty sequence.
///
/// Mismatched sequence lengths are a structural violation and fail with
/// [`ProcessingError::ShapeMismatch`].
pub fn derivative(samples: &[f64], timestamps: &[f64]) -> ProcessingResult<Vec<f64>> {
    if samples.len() != timestamps.len() {
        return Err(ProcessingError::ShapeMismatch {
            expected: samples.len(),
            actual: timestamps.len(),
        });
    }
    if samples.len() < 2 {
        return Ok(Vec::new());
    }

    let mut rates = Vec::with_capacity(samples.len() - 1);
    for i in 0..samples.len() - 1 {
        let dt = timestamps[i + 1] - timestamps[i];
        if dt == 0.0 {
            rates.push(f64::NAN);
        } else {
            rates.push((samples[i + 1] - samples[i]) / dt);
        }
    }
    Ok(rates)
}

/// First position at which a trailing window of `window` samples has a
/// NaN-ignoring standard deviation strictly below `threshold`.
///
/// The scan is a first-match linear pass over positions
/// `window..=samples.len()`; position `i` examines `samples[i-window..i]`.
/// Returns `None` when no window qualifies or the sequence is shorter than
/// the window. A strictly constant sequence of at least `window` samples
/// therefore yields `Some(window)`, the first position where a full
/// window exists.
pub fn detect_steady_state(samples: &[f64], window: usize, threshold: f64) -> Option<usize> {
    if window == 0 || samples.len() < window {
        return None;
    }

    for i in window..=samples.len() {
        if let Some(std) = nan_std(&samples[i - window..i]) {
            if std < threshold {
                return Some(i);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derivative_of_ramp() {
        let samples = [0.0, 1.0, 3.0, 6.0];
        let timestamps = [0.0, 1.0, 2.0, 3.0];
        let rates = derivative(&samples, &timestamps).unwrap();
        assert_eq!(rates, [1.0, 2.0, 3.0]);
    }

    #[test]
    fn derivative_of_single_sample_is_empty() {
        assert_eq!(derivative(&[5.0], &[0.0]).unwrap(), Vec::<f64>::new());
        assert_eq!(derivative(&[], &[]).unwrap(), Vec::<f64>::new());
    }

    #[test]
    fn duplicated_timestamp_yields_nan_not_panic() {
        let samples = [0.0, 1.0, 2.0];
        let timestamps = [0.0, 1.0, 1.0];
        let rates = derivative(&samples, &timestamps).unwrap();
        assert_eq!(rates[0], 1.0);
        assert!(rates[1].is_nan());
    }

    #[test]
    fn mismatched_lengths_fail_fast() {
        let err = derivative(&[1.0, 2.0], &[0.0]).unwrap_err();
        assert_eq!(
            err,
            ProcessingError::ShapeMismatch {
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn constant_sequence_settles_at_first_full_window() {
        let data = [3.0; 10];
        assert_eq!(detect_steady_state(&data, 5, 0.1), Some(5));
        // Exactly window-length input still has one full window to check
        assert_eq!(detect_steady_state(&data[..5], 5, 0.1), Some(5));
    }

    #[test]
    fn noisy_then_settled() {
        let mut data: Vec<f64> = (0..20).map(|i| if i % 2 == 0 { 0.0 } else { 10.0 }).collect();
        data.extend(core::iter::repeat(5.0).take(20));
        let idx = detect_steady_state(&data, 10, 0.1).unwrap();
        // First window fully inside the settled tail starts at index 30
        assert_eq!(idx, 30);
    }

    #[test]
    fn never_settles() {
        let data: Vec<f64> = (0..40).map(|i| if i % 2 == 0 { 0.0 } else { 10.0 }).collect();
        assert_eq!(detect_steady_state(&data, 10, 0.1), None);
    }

    #[test]
    fn shorter_than_window() {
        assert_eq!(detect_steady_state(&[1.0, 1.0], 5, 0.1), None);
    }

    #[test]
    fn nan_ignored_within_window() {
        let mut data = alloc::vec![2.0; 12];
        data[3] = f64::NAN;
        assert_eq!(detect_steady_state(&data, 6, 0.1), Some(6));
    }
}
