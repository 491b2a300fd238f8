//! Statistics Kernel
//!
//! NaN-aware summarization of a sample sequence. The NaN sentinel marks
//! "no valid reading at this index" and every function here skips it
//! instead of letting it poison the result.
//!
//! The kernel is the leaf of the processing stack: the outlier filter, the
//! steady-state detector, and the channel comparator all build on these
//! primitives.
//!
//! ## Degenerate inputs
//!
//! A sequence with zero valid samples has no statistics. That is a defined
//! contract, not an error: [`summarize`] returns `None`, the scalar
//! primitives return `None`, and no function here panics or divides by
//! zero.
//!
//! ## Numeric conventions
//!
//! - Standard deviation is the *population* std (divide by `n`, not
//!   `n - 1`), matching how acquisition-side tooling summarizes channels.
//! - Percentiles use linear interpolation between order statistics.

use alloc::vec::Vec;

/// Summary statistics over the valid (non-NaN) entries of a sequence
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Statistics {
    /// Arithmetic mean
    pub mean: f64,
    /// Population standard deviation
    pub std: f64,
    /// Minimum valid value
    pub min: f64,
    /// Maximum valid value
    pub max: f64,
    /// `max - min`
    pub range: f64,
    /// 50th percentile
    pub median: f64,
    /// 25th percentile
    pub q25: f64,
    /// 75th percentile
    pub q75: f64,
    /// `q75 - q25`
    pub iqr: f64,
    /// Number of valid samples
    pub samples: usize,
    /// `samples / total_length`, in `[0, 1]`
    pub valid_ratio: f64,
}

/// Count the non-NaN entries of a sequence
pub fn valid_count(samples: &[f64]) -> usize {
    samples.iter().filter(|v| !v.is_nan()).count()
}

/// Collect the non-NaN entries of a sequence, preserving order
pub fn valid_values(samples: &[f64]) -> Vec<f64> {
    samples.iter().copied().filter(|v| !v.is_nan()).collect()
}

/// Mean over valid entries; `None` if there are none
pub fn nan_mean(samples: &[f64]) -> Option<f64> {
    let mut sum = 0.0;
    let mut count = 0usize;
    for &v in samples {
        if !v.is_nan() {
            sum += v;
            count += 1;
        }
    }
    if count == 0 {
        return None;
    }
    Some(sum / count as f64)
}

/// Population standard deviation over valid entries; `None` if there are none
pub fn nan_std(samples: &[f64]) -> Option<f64> {
    let mean = nan_mean(samples)?;
    let mut sq_sum = 0.0;
    let mut count = 0usize;
    for &v in samples {
        if !v.is_nan() {
            let diff = v - mean;
            sq_sum += diff * diff;
            count += 1;
        }
    }
    Some(libm::sqrt(sq_sum / count as f64))
}

/// Minimum over valid entries; `None` if there are none
pub fn nan_min(samples: &[f64]) -> Option<f64> {
    samples
        .iter()
        .copied()
        .filter(|v| !v.is_nan())
        .fold(None, |acc, v| match acc {
            Some(m) if m <= v => Some(m),
            _ => Some(v),
        })
}

/// Maximum over valid entries; `None` if there are none
pub fn nan_max(samples: &[f64]) -> Option<f64> {
    samples
        .iter()
        .copied()
        .filter(|v| !v.is_nan())
        .fold(None, |acc, v| match acc {
            Some(m) if m >= v => Some(m),
            _ => Some(v),
        })
}

/// Percentile over valid entries with linear interpolation between order
/// statistics; `q` is in `[0, 100]`. `None` if there are no valid entries.
pub fn nan_percentile(samples: &[f64], q: f64) -> Option<f64> {
    let mut sorted = valid_values(samples);
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(core::cmp::Ordering::Equal));
    Some(percentile_of_sorted(&sorted, q))
}

/// Median over valid entries; `None` if there are none
pub fn nan_median(samples: &[f64]) -> Option<f64> {
    nan_percentile(samples, 50.0)
}

/// Percentile of an already-sorted, NaN-free slice.
///
/// Callers that need several percentiles of the same data sort once and
/// call this repeatedly.
pub(crate) fn percentile_of_sorted(sorted: &[f64], q: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let rank = q / 100.0 * (n - 1) as f64;
    let lo = rank as usize;
    let hi = (lo + 1).min(n - 1);
    let frac = rank - lo as f64;
    sorted[lo] + frac * (sorted[hi] - sorted[lo])
}

/// Summarize a sample sequence over its valid entries.
///
/// Returns `None` when the sequence has zero valid samples, the defined
/// "no statistics" contract for empty or all-NaN input.
pub fn summarize(samples: &[f64]) -> Option<Statistics> {
    let mut sorted = valid_values(samples);
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(core::cmp::Ordering::Equal));

    let n = sorted.len();
    let mean = sorted.iter().sum::<f64>() / n as f64;
    let sq_sum: f64 = sorted.iter().map(|v| (v - mean) * (v - mean)).sum();
    let std = libm::sqrt(sq_sum / n as f64);

    let min = sorted[0];
    let max = sorted[n - 1];
    let q25 = percentile_of_sorted(&sorted, 25.0);
    let q75 = percentile_of_sorted(&sorted, 75.0);

    Some(Statistics {
        mean,
        std,
        min,
        max,
        range: max - min,
        median: percentile_of_sorted(&sorted, 50.0),
        q25,
        q75,
        iqr: q75 - q25,
        samples: n,
        valid_ratio: n as f64 / samples.len() as f64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn summarize_simple_sequence() {
        let stats = summarize(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_eq!(stats.mean, 3.0);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 5.0);
        assert_eq!(stats.range, 4.0);
        assert_eq!(stats.median, 3.0);
        assert_eq!(stats.q25, 2.0);
        assert_eq!(stats.q75, 4.0);
        assert_eq!(stats.iqr, 2.0);
        assert_eq!(stats.samples, 5);
        assert_eq!(stats.valid_ratio, 1.0);
        // Population std of [1..5] is sqrt(2)
        assert!((stats.std - libm::sqrt(2.0)).abs() < 1e-12);
    }

    #[test]
    fn summarize_skips_nan() {
        let stats = summarize(&[1.0, f64::NAN, 3.0, f64::NAN]).unwrap();
        assert_eq!(stats.samples, 2);
        assert_eq!(stats.mean, 2.0);
        assert_eq!(stats.valid_ratio, 0.5);
    }

    #[test]
    fn summarize_empty_and_all_nan() {
        assert!(summarize(&[]).is_none());
        assert!(summarize(&[f64::NAN, f64::NAN]).is_none());
    }

    #[test]
    fn percentile_interpolates() {
        // 25th percentile of [1,2,3,4]: rank 0.75 -> 1.75
        assert_eq!(nan_percentile(&[4.0, 1.0, 3.0, 2.0], 25.0), Some(1.75));
        assert_eq!(nan_percentile(&[4.0, 1.0, 3.0, 2.0], 100.0), Some(4.0));
        assert_eq!(nan_percentile(&[7.0], 50.0), Some(7.0));
    }

    #[test]
    fn nan_primitives() {
        let data = vec![2.0, f64::NAN, 4.0];
        assert_eq!(valid_count(&data), 2);
        assert_eq!(nan_mean(&data), Some(3.0));
        assert_eq!(nan_min(&data), Some(2.0));
        assert_eq!(nan_max(&data), Some(4.0));
        assert_eq!(nan_std(&data), Some(1.0));
        assert_eq!(nan_mean(&[f64::NAN]), None);
        assert_eq!(nan_std(&[]), None);
    }
}
