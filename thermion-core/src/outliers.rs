//! Outlier Filter
//!
//! Flags anomalous samples before any smoothing runs. Detection never
//! removes a sample positionally: flagged entries are overwritten with NaN
//! in a *copy* of the input so that index alignment with the timestamp
//! sequence survives the whole pipeline.
//!
//! ## Methods
//!
//! - **Z-score**: a sample is an outlier when its distance from the mean
//!   exceeds `threshold` standard deviations. Mean and std ignore NaN.
//! - **IQR**: Tukey fences at `1.5 * IQR` beyond the quartiles.
//!
//! ## Degenerate inputs
//!
//! A constant or all-NaN series has zero (or undefined) standard
//! deviation. Nothing is flagged in that case: a divide-by-zero must not
//! manufacture false positives. NaN samples themselves are never flagged;
//! they already carry the "invalid" marker.

use alloc::vec::Vec;

use crate::constants::processing::IQR_FENCE;
use crate::stats::{nan_mean, nan_percentile, nan_std};

/// Outlier classification method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OutlierMethod {
    /// Distance from the mean in standard deviations
    ZScore,
    /// Tukey fences on the interquartile range
    Iqr,
}

impl OutlierMethod {
    /// Parse a configuration-file method name.
    ///
    /// Unrecognized names return `None`; callers treat that as "detect
    /// nothing" rather than an error, preserving the permissive default
    /// external configuration relies on.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "zscore" => Some(Self::ZScore),
            "iqr" => Some(Self::Iqr),
            _ => None,
        }
    }

    /// Canonical configuration name of this method
    pub fn name(&self) -> &'static str {
        match self {
            Self::ZScore => "zscore",
            Self::Iqr => "iqr",
        }
    }
}

/// Detect outliers and mask them with NaN.
///
/// Returns `(cleaned, mask)` where `cleaned` is a copy of `samples` with
/// flagged positions overwritten by NaN, and `mask` marks the flagged
/// indices. The input is never mutated and both outputs keep its length.
pub fn detect_outliers(
    samples: &[f64],
    method: OutlierMethod,
    threshold: f64,
) -> (Vec<f64>, Vec<bool>) {
    let mask = match method {
        OutlierMethod::ZScore => zscore_mask(samples, threshold),
        OutlierMethod::Iqr => iqr_mask(samples),
    };

    let mut cleaned = samples.to_vec();
    let mut flagged = 0usize;
    for (value, &is_outlier) in cleaned.iter_mut().zip(mask.iter()) {
        if is_outlier {
            *value = f64::NAN;
            flagged += 1;
        }
    }
    if flagged > 0 {
        log_info!("flagged {} outliers ({})", flagged, method.name());
    }

    (cleaned, mask)
}

fn zscore_mask(samples: &[f64], threshold: f64) -> Vec<bool> {
    let (mean, std) = match (nan_mean(samples), nan_std(samples)) {
        (Some(mean), Some(std)) => (mean, std),
        _ => return alloc::vec![false; samples.len()],
    };
    if std == 0.0 {
        // Constant series: every z-score would divide by zero
        return alloc::vec![false; samples.len()];
    }

    samples
        .iter()
        // NaN comparisons are false, so invalid samples are never flagged
        .map(|&v| ((v - mean) / std).abs() > threshold)
        .collect()
}

fn iqr_mask(samples: &[f64]) -> Vec<bool> {
    let (q1, q3) = match (nan_percentile(samples, 25.0), nan_percentile(samples, 75.0)) {
        (Some(q1), Some(q3)) => (q1, q3),
        _ => return alloc::vec![false; samples.len()],
    };
    let iqr = q3 - q1;
    let lower = q1 - IQR_FENCE * iqr;
    let upper = q3 + IQR_FENCE * iqr;

    samples.iter().map(|&v| v < lower || v > upper).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zscore_flags_single_spike() {
        let (cleaned, mask) = detect_outliers(&[1.0, 2.0, 3.0, 4.0, 100.0], OutlierMethod::ZScore, 1.5);
        assert_eq!(mask, alloc::vec![false, false, false, false, true]);
        assert!(cleaned[4].is_nan());
        assert_eq!(&cleaned[..4], &[1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn zscore_three_sigma_spike_scenario() {
        // With threshold 3.0 the spike's z-score must exceed 3 sigma of the
        // full series; a long quiet baseline makes that unambiguous.
        let mut data = alloc::vec![20.0; 30];
        for (i, v) in data.iter_mut().enumerate() {
            *v += (i % 3) as f64 * 0.01;
        }
        data.push(500.0);
        let (_, mask) = detect_outliers(&data, OutlierMethod::ZScore, 3.0);
        assert_eq!(mask.iter().filter(|&&m| m).count(), 1);
        assert!(mask[30]);
    }

    #[test]
    fn constant_series_flags_nothing() {
        let (cleaned, mask) = detect_outliers(&[5.0; 8], OutlierMethod::ZScore, 3.0);
        assert!(mask.iter().all(|&m| !m));
        assert_eq!(cleaned, &[5.0; 8]);
    }

    #[test]
    fn all_nan_flags_nothing() {
        let data = [f64::NAN, f64::NAN, f64::NAN];
        let (_, mask) = detect_outliers(&data, OutlierMethod::ZScore, 3.0);
        assert!(mask.iter().all(|&m| !m));
        let (_, mask) = detect_outliers(&data, OutlierMethod::Iqr, 3.0);
        assert!(mask.iter().all(|&m| !m));
    }

    #[test]
    fn nan_samples_are_never_flagged() {
        let (cleaned, mask) =
            detect_outliers(&[1.0, f64::NAN, 1.1, 0.9, 50.0], OutlierMethod::Iqr, 3.0);
        assert!(!mask[1]);
        assert!(mask[4]);
        // Pre-existing NaN survives untouched, flagged value became NaN
        assert!(cleaned[1].is_nan());
        assert!(cleaned[4].is_nan());
    }

    #[test]
    fn iqr_fences() {
        let data = [10.0, 11.0, 12.0, 13.0, 14.0, 15.0, 16.0, 200.0];
        let (_, mask) = detect_outliers(&data, OutlierMethod::Iqr, 3.0);
        assert!(mask[7]);
        assert_eq!(mask.iter().filter(|&&m| m).count(), 1);
    }

    #[test]
    fn mask_matches_new_nan_count() {
        // Flagged count == NaN(cleaned) - NaN(raw)
        let raw = [1.0, f64::NAN, 2.0, 3.0, 4.0, 99.0];
        let (cleaned, mask) = detect_outliers(&raw, OutlierMethod::ZScore, 1.5);
        let flagged = mask.iter().filter(|&&m| m).count();
        let raw_nan = raw.iter().filter(|v| v.is_nan()).count();
        let cleaned_nan = cleaned.iter().filter(|v| v.is_nan()).count();
        assert_eq!(flagged, cleaned_nan - raw_nan);
    }

    #[test]
    fn parse_method_names() {
        assert_eq!(OutlierMethod::parse("zscore"), Some(OutlierMethod::ZScore));
        assert_eq!(OutlierMethod::parse("iqr"), Some(OutlierMethod::Iqr));
        assert_eq!(OutlierMethod::parse("hampel"), None);
    }
}
