//! Smoothing Filter Strategies
//!
//! ## Overview
//!
//! Three interchangeable smoothing strategies applied to cleaned channel
//! data: moving average, sliding-window median, and zero-phase Butterworth
//! low-pass. Which one runs (and whether any runs) is fixed by the
//! [`ProcessorConfig`](crate::config::ProcessorConfig) at pipeline
//! construction.
//!
//! ## NaN discipline
//!
//! All strategies share one rule: the valid (non-NaN) samples are compacted
//! into a contiguous run, the run is filtered, and the results are
//! scattered back to their original indices. NaN positions stay NaN, so
//! index alignment with the timestamp sequence is preserved and a gap in
//! the data never bleeds a poisoned value into its neighbors.
//!
//! ## Failure policy
//!
//! Filtering failures are *visible but not fatal*. [`try_apply`] returns
//! `Result<Vec<f64>, FilterError>` so tests and diagnostics can see exactly
//! why a filter declined to run; [`apply`] collapses any failure to the
//! unfiltered input with a warning, which is the behavior the pipeline
//! contract requires. Degenerate data (too few valid samples for the
//! window) is handled the same way: identity, never an error escaping to
//! the caller.

mod butterworth;
mod median;
mod moving_average;

use alloc::vec::Vec;

use crate::config::{FilterKind, ProcessorConfig};

pub(crate) use butterworth::butterworth_filter;
pub(crate) use median::median_filter;
pub(crate) use moving_average::moving_average_filter;

/// Why a filter declined to run.
///
/// Collapsed to the identity fallback at the public boundary; surfaced by
/// [`try_apply`] so the failure stays observable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterError {
    /// Not enough valid samples for a stable forward-backward pass
    TooFewSamples {
        /// Valid samples the design needs
        required: usize,
        /// Valid samples actually present
        available: usize,
    },
    /// Cutoff at or above the Nyquist frequency (or otherwise unusable)
    InvalidCutoff {
        /// Requested cutoff in Hz
        cutoff_hz: f64,
        /// Nyquist frequency for the configured sample rate
        nyquist_hz: f64,
    },
}

/// Apply the configured filter, surfacing failures.
///
/// `Ok` carries the filtered sequence (same length as the input, NaN
/// positions preserved). `Err` explains why the filter could not run;
/// callers wanting the pipeline's fallback semantics use [`apply`].
pub fn try_apply(samples: &[f64], config: &ProcessorConfig) -> Result<Vec<f64>, FilterError> {
    if !config.filter_enabled {
        return Ok(samples.to_vec());
    }

    match config.filter_kind {
        FilterKind::MovingAverage => Ok(moving_average_filter(samples, config.filter_window)),
        FilterKind::Median => Ok(median_filter(samples, config.filter_window)),
        FilterKind::Butterworth => butterworth_filter(samples, &config.butterworth),
    }
}

/// Apply the configured filter with identity fallback.
///
/// Any [`FilterError`] collapses to an unfiltered copy of the input with a
/// warning diagnostic. This is the orchestrator-facing contract: numeric
/// edge cases degrade, they never raise.
pub fn apply(samples: &[f64], config: &ProcessorConfig) -> Vec<f64> {
    match try_apply(samples, config) {
        Ok(filtered) => filtered,
        Err(_err) => {
            log_warn!(
                "{} filter fell back to unfiltered data: {:?}",
                config.filter_kind.name(),
                _err
            );
            samples.to_vec()
        }
    }
}

/// Split a sequence into its valid values and their source indices.
///
/// The compact/filter/scatter pattern every strategy uses starts here.
pub(crate) fn compact_valid(samples: &[f64]) -> (Vec<f64>, Vec<usize>) {
    let mut values = Vec::new();
    let mut indices = Vec::new();
    for (i, &v) in samples.iter().enumerate() {
        if !v.is_nan() {
            values.push(v);
            indices.push(i);
        }
    }
    (values, indices)
}

/// Scatter filtered values back over a NaN template of the original shape.
pub(crate) fn scatter_back(len: usize, values: &[f64], indices: &[usize]) -> Vec<f64> {
    let mut out = alloc::vec![f64::NAN; len];
    for (&value, &index) in values.iter().zip(indices.iter()) {
        out[index] = value;
    }
    out
}
