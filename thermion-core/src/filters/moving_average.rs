//! Centered uniform-kernel moving average.
//!
//! Equivalent to a `same`-mode convolution with a kernel of weight
//! `1/window`: interior samples are averaged over a full window, samples
//! within half a window of either edge see a truncated sum over the same
//! divisor, which tapers the edges toward zero exactly as a zero-padded
//! convolution does.

use alloc::vec::Vec;

use super::{compact_valid, scatter_back};

/// Smooth the valid run of `samples` with a centered uniform kernel.
///
/// If fewer than `window` valid samples exist the input passes through
/// unfiltered, the degenerate "cannot filter" case, not an error. NaN
/// positions are preserved structurally.
pub(crate) fn moving_average_filter(samples: &[f64], window: usize) -> Vec<f64> {
    let (values, indices) = compact_valid(samples);
    if values.len() < window || window == 0 {
        return samples.to_vec();
    }

    let n = values.len();
    let half = (window - 1) / 2;
    let mut smoothed = Vec::with_capacity(n);
    for i in 0..n {
        // Index into the full convolution, then clip to the data
        let center = i + half;
        let lo = center.saturating_sub(window - 1);
        let hi = center.min(n - 1);
        let sum: f64 = values[lo..=hi].iter().sum();
        smoothed.push(sum / window as f64);
    }

    scatter_back(samples.len(), &smoothed, &indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interior_is_full_window_mean() {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0];
        let out = moving_average_filter(&data, 3);
        assert_eq!(out[1], 2.0);
        assert_eq!(out[2], 3.0);
        assert_eq!(out[3], 4.0);
        // Edges: truncated sum over the full divisor
        assert_eq!(out[0], (1.0 + 2.0) / 3.0);
        assert_eq!(out[4], (4.0 + 5.0) / 3.0);
    }

    #[test]
    fn too_few_valid_samples_is_identity() {
        let data = [1.0, f64::NAN, 2.0];
        let out = moving_average_filter(&data, 5);
        assert_eq!(out[0], 1.0);
        assert!(out[1].is_nan());
        assert_eq!(out[2], 2.0);
    }

    #[test]
    fn all_nan_stays_all_nan() {
        let data = [f64::NAN; 4];
        let out = moving_average_filter(&data, 3);
        assert!(out.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn nan_gap_preserved_and_excluded() {
        // Valid run is [10, 10, 10, 10] regardless of the gap position
        let data = [10.0, 10.0, f64::NAN, 10.0, 10.0];
        let out = moving_average_filter(&data, 3);
        assert!(out[2].is_nan());
        // Interior of the compacted run is an exact mean
        assert_eq!(out[1], 10.0);
        assert_eq!(out[3], 10.0);
    }
}
