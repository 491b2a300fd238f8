//! Sliding-window median filter.
//!
//! Non-linear smoothing that rejects impulsive noise while preserving
//! edges. The window must be odd for a centered median; even requests are
//! rounded up. Near the sequence edges the window shrinks symmetrically
//! instead of padding, so edge samples are medians of what actually
//! exists.

use alloc::vec::Vec;

use super::{compact_valid, scatter_back};

/// Median-smooth the valid run of `samples`.
///
/// NaN positions are preserved structurally. A window of 1 (or a run
/// shorter than 2) is identity.
pub(crate) fn median_filter(samples: &[f64], window: usize) -> Vec<f64> {
    let (values, indices) = compact_valid(samples);
    let window = window | 1; // force odd for a centered window
    if values.len() < 2 || window <= 1 {
        return samples.to_vec();
    }

    let n = values.len();
    let half = window / 2;
    let mut smoothed = Vec::with_capacity(n);
    let mut scratch: Vec<f64> = Vec::with_capacity(window);
    for i in 0..n {
        // Shrink symmetrically at the edges to keep the median centered
        let reach = half.min(i).min(n - 1 - i);
        scratch.clear();
        scratch.extend_from_slice(&values[i - reach..=i + reach]);
        scratch.sort_by(|a, b| a.partial_cmp(b).unwrap_or(core::cmp::Ordering::Equal));
        smoothed.push(scratch[scratch.len() / 2]);
    }

    scatter_back(samples.len(), &smoothed, &indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_single_spike() {
        let data = [10.0, 10.0, 100.0, 10.0, 10.0];
        let out = median_filter(&data, 3);
        assert_eq!(out, alloc::vec![10.0; 5]);
    }

    #[test]
    fn even_window_rounds_up() {
        // Window 4 behaves as 5; with a run of 5 the center sees everything
        let data = [1.0, 2.0, 9.0, 3.0, 4.0];
        let out = median_filter(&data, 4);
        assert_eq!(out[2], 3.0);
    }

    #[test]
    fn edges_use_shrunk_windows() {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0];
        let out = median_filter(&data, 5);
        // Edge samples are 1-element medians, next-in are 3-element
        assert_eq!(out[0], 1.0);
        assert_eq!(out[1], 2.0);
        assert_eq!(out[2], 3.0);
        assert_eq!(out[4], 5.0);
    }

    #[test]
    fn nan_positions_preserved() {
        let data = [10.0, f64::NAN, 10.0, 100.0, 10.0, 10.0];
        let out = median_filter(&data, 3);
        assert!(out[1].is_nan());
        assert_eq!(out[3], 10.0);
    }

    #[test]
    fn degenerate_run_is_identity() {
        let data = [f64::NAN, 42.0, f64::NAN];
        let out = median_filter(&data, 3);
        assert_eq!(out[1], 42.0);
        assert!(out[0].is_nan() && out[2].is_nan());
    }
}
