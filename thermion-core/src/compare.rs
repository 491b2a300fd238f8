//! Channel Comparator
//!
//! Cross-channel statistics over multiple filtered channels: per-channel
//! summaries plus pairwise Pearson correlation, mean difference, and
//! standard-deviation difference. Pairs are restricted to indices valid in
//! *both* sequences; a pair with too few jointly-valid samples is silently
//! omitted: correlation over a handful of points is not meaningful, and
//! that omission is a defined contract rather than an error.
//!
//! Channel enumeration order is preserved: pair entries follow input
//! order, and differences are always first-named minus second-named.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::constants::processing::MIN_JOINT_SAMPLES;
use crate::stats::{summarize, Statistics};

/// Pairwise comparison of two channels over their jointly-valid indices
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PairComparison {
    /// First channel name (minuend of the differences)
    pub first: String,
    /// Second channel name (subtrahend of the differences)
    pub second: String,
    /// Pearson correlation coefficient; NaN when either side is constant
    pub correlation: f64,
    /// Mean of first minus mean of second
    pub mean_difference: f64,
    /// Std of first minus std of second (population)
    pub std_difference: f64,
    /// Number of indices valid in both channels
    pub joint_samples: usize,
}

/// Result of comparing a set of channels
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChannelComparison {
    /// Per-channel statistics in input order; `None` for all-NaN channels
    pub channel_stats: Vec<(String, Option<Statistics>)>,
    /// Pairwise entries for every unordered pair with enough joint samples
    pub pairs: Vec<PairComparison>,
}

/// Compare a set of named channels.
///
/// Channels need not share NaN patterns, but must be index-aligned; pairs
/// of unequal length are compared over the common prefix of indices valid
/// in both. Pairs with `MIN_JOINT_SAMPLES` or fewer joint samples produce
/// no entry.
pub fn compare_channels(channels: &[(&str, &[f64])]) -> ChannelComparison {
    let mut comparison = ChannelComparison::default();

    for (name, data) in channels {
        comparison
            .channel_stats
            .push((name.to_string(), summarize(data)));
    }

    for i in 0..channels.len() {
        for j in i + 1..channels.len() {
            let (first_name, first) = channels[i];
            let (second_name, second) = channels[j];

            let mut a = Vec::new();
            let mut b = Vec::new();
            for (&x, &y) in first.iter().zip(second.iter()) {
                if !x.is_nan() && !y.is_nan() {
                    a.push(x);
                    b.push(y);
                }
            }
            if a.len() <= MIN_JOINT_SAMPLES {
                continue;
            }

            let n = a.len() as f64;
            let mean_a = a.iter().sum::<f64>() / n;
            let mean_b = b.iter().sum::<f64>() / n;

            let mut cov = 0.0;
            let mut var_a = 0.0;
            let mut var_b = 0.0;
            for (&x, &y) in a.iter().zip(b.iter()) {
                let dx = x - mean_a;
                let dy = y - mean_b;
                cov += dx * dy;
                var_a += dx * dx;
                var_b += dy * dy;
            }
            // Constant series: correlation undefined, reported as NaN
            let correlation = cov / libm::sqrt(var_a * var_b);

            comparison.pairs.push(PairComparison {
                first: first_name.to_string(),
                second: second_name.to_string(),
                correlation,
                mean_difference: mean_a - mean_b,
                std_difference: libm::sqrt(var_a / n) - libm::sqrt(var_b / n),
                joint_samples: a.len(),
            });
        }
    }

    comparison
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn ramp(offset: f64, n: usize) -> Vec<f64> {
        (0..n).map(|i| offset + i as f64).collect()
    }

    #[test]
    fn identical_channels_correlate_perfectly() {
        let a = ramp(0.0, 20);
        let result = compare_channels(&[("ch101", &a), ("ch102", &a)]);
        assert_eq!(result.pairs.len(), 1);
        let pair = &result.pairs[0];
        assert!((pair.correlation - 1.0).abs() < 1e-12);
        assert_eq!(pair.mean_difference, 0.0);
        assert_eq!(pair.std_difference, 0.0);
        assert_eq!(pair.joint_samples, 20);
    }

    #[test]
    fn anti_correlated_channels() {
        let a = ramp(0.0, 20);
        let b: Vec<f64> = a.iter().map(|v| 100.0 - v).collect();
        let result = compare_channels(&[("up", &a), ("down", &b)]);
        assert!((result.pairs[0].correlation + 1.0).abs() < 1e-12);
    }

    #[test]
    fn difference_orientation_is_first_minus_second() {
        let a = vec![10.0; 15];
        let b = vec![7.0; 15];
        let result = compare_channels(&[("hot", &a), ("cold", &b)]);
        let pair = &result.pairs[0];
        assert_eq!(pair.first, "hot");
        assert_eq!(pair.second, "cold");
        assert_eq!(pair.mean_difference, 3.0);
        // Constant channels have no dispersion to correlate
        assert!(pair.correlation.is_nan());
    }

    #[test]
    fn too_few_joint_samples_omitted() {
        // 11 indices, one NaN in each channel at different spots: 9 joint
        let mut a = ramp(0.0, 11);
        let mut b = ramp(5.0, 11);
        a[0] = f64::NAN;
        b[1] = f64::NAN;
        let result = compare_channels(&[("a", &a), ("b", &b)]);
        assert!(result.pairs.is_empty());
        // Channel stats are still reported
        assert_eq!(result.channel_stats.len(), 2);
    }

    #[test]
    fn joint_mask_intersects_nan_patterns() {
        let mut a = ramp(0.0, 30);
        let mut b = ramp(0.0, 30);
        a[3] = f64::NAN;
        b[7] = f64::NAN;
        let result = compare_channels(&[("a", &a), ("b", &b)]);
        assert_eq!(result.pairs[0].joint_samples, 28);
    }

    #[test]
    fn all_nan_channel_has_no_stats() {
        let a = vec![f64::NAN; 12];
        let b = ramp(0.0, 12);
        let result = compare_channels(&[("dead", &a), ("live", &b)]);
        assert!(result.channel_stats[0].1.is_none());
        assert!(result.channel_stats[1].1.is_some());
        assert!(result.pairs.is_empty());
    }

    #[test]
    fn three_channels_emit_three_pairs_in_order() {
        let a = ramp(0.0, 20);
        let b = ramp(1.0, 20);
        let c = ramp(2.0, 20);
        let result = compare_channels(&[("a", &a), ("b", &b), ("c", &c)]);
        let names: Vec<(&str, &str)> = result
            .pairs
            .iter()
            .map(|p| (p.first.as_str(), p.second.as_str()))
            .collect();
        assert_eq!(names, vec![("a", "b"), ("a", "c"), ("b", "c")]);
    }
}
