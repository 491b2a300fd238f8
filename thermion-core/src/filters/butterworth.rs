//! Zero-phase Butterworth low-pass filter.
//!
//! ## Design
//!
//! An order-N Butterworth low-pass is realized as a cascade of N/2 biquad
//! sections. Each section is designed with the bilinear-transform lowpass
//! prototype; section k takes its quality factor from the Butterworth pole
//! ladder:
//!
//! ```text
//! theta_k = pi * (2k + 1) / (2N)        k = 0 .. N/2 - 1
//! Q_k     = 1 / (2 * cos(theta_k))
//! ```
//!
//! which for N = 2 gives the familiar single section at Q = 1/sqrt(2).
//! Odd orders are rounded up to the next even order.
//!
//! ## Zero phase
//!
//! The cascade runs forward over the sequence, then backward, so the phase
//! lag of the two passes cancels. This needs the full sequence in memory;
//! it is a post-processing filter, not a streaming one. Each pass
//! initializes its delay lines to the DC steady state of its first sample,
//! so a constant sequence passes through *exactly* unchanged and edge
//! transients stay small.
//!
//! ## Failure
//!
//! A cutoff at or above Nyquist, or a valid run too short for a stable
//! forward-backward pass, returns a [`FilterError`]; the dispatch layer
//! collapses that to the unfiltered fallback.

use alloc::vec::Vec;

use super::{compact_valid, scatter_back, FilterError};
use crate::config::ButterworthConfig;
use crate::constants::processing::MAX_BUTTERWORTH_ORDER;

/// Upper bound on cascade length, from the maximum supported order
const MAX_SECTIONS: usize = MAX_BUTTERWORTH_ORDER / 2;

/// Normalized biquad coefficients (a0 = 1)
///
/// Difference equation:
/// `y[n] = b0*x[n] + b1*x[n-1] + b2*x[n-2] - a1*y[n-1] - a2*y[n-2]`
#[derive(Debug, Clone, Copy)]
struct Biquad {
    b0: f64,
    b1: f64,
    b2: f64,
    a1: f64,
    a2: f64,
}

impl Biquad {
    /// Bilinear-transform low-pass section at the given quality factor
    fn lowpass(sample_rate_hz: f64, cutoff_hz: f64, q: f64) -> Self {
        let omega = 2.0 * core::f64::consts::PI * cutoff_hz / sample_rate_hz;
        let cos_omega = libm::cos(omega);
        let sin_omega = libm::sin(omega);
        let alpha = sin_omega / (2.0 * q);

        let a0 = 1.0 + alpha;
        let a1 = -2.0 * cos_omega;
        let a2 = 1.0 - alpha;
        let b0 = (1.0 - cos_omega) / 2.0;
        let b1 = 1.0 - cos_omega;
        let b2 = b0;

        Self {
            b0: b0 / a0,
            b1: b1 / a0,
            b2: b2 / a0,
            a1: a1 / a0,
            a2: a2 / a0,
        }
    }
}

/// Design the section cascade for the configured order.
fn design_cascade(
    config: &ButterworthConfig,
) -> Result<heapless::Vec<Biquad, MAX_SECTIONS>, FilterError> {
    let nyquist_hz = config.sample_rate_hz / 2.0;
    if !(config.cutoff_hz > 0.0) || config.cutoff_hz >= nyquist_hz {
        return Err(FilterError::InvalidCutoff {
            cutoff_hz: config.cutoff_hz,
            nyquist_hz,
        });
    }

    // Round odd orders up; config validation already capped the range
    let order = (config.order + 1) & !1;
    let sections = order / 2;

    let mut cascade = heapless::Vec::new();
    for k in 0..sections {
        let theta = core::f64::consts::PI * (2 * k + 1) as f64 / (2 * order) as f64;
        let q = 1.0 / (2.0 * libm::cos(theta));
        // Capacity equals MAX_SECTIONS, so the push cannot fail
        let _ = cascade.push(Biquad::lowpass(config.sample_rate_hz, config.cutoff_hz, q));
    }
    Ok(cascade)
}

/// Run the cascade forward over `data` in place, starting from DC steady
/// state at the first sample.
fn forward_pass(cascade: &[Biquad], data: &mut [f64]) {
    if data.is_empty() {
        return;
    }
    // Unity DC gain: constant input x0 settles every delay line at x0
    let x0 = data[0];
    let mut state = [[x0; 4]; MAX_SECTIONS]; // [x1, x2, y1, y2] per section

    for sample in data.iter_mut() {
        let mut x = *sample;
        for (section, s) in cascade.iter().zip(state.iter_mut()) {
            let y = section.b0 * x + section.b1 * s[0] + section.b2 * s[1]
                - section.a1 * s[2]
                - section.a2 * s[3];
            s[1] = s[0];
            s[0] = x;
            s[3] = s[2];
            s[2] = y;
            x = y;
        }
        *sample = x;
    }
}

/// Zero-phase Butterworth low-pass over the valid run of `samples`.
///
/// NaN positions are preserved structurally; the valid values are
/// compacted, filtered forward and backward, and scattered back.
pub(crate) fn butterworth_filter(
    samples: &[f64],
    config: &ButterworthConfig,
) -> Result<Vec<f64>, FilterError> {
    let cascade = design_cascade(config)?;

    let (mut values, indices) = compact_valid(samples);
    // Forward-backward settling needs a few time constants of data
    let order = (config.order + 1) & !1;
    let required = 3 * (order + 1) + 1;
    if values.len() < required {
        return Err(FilterError::TooFewSamples {
            required,
            available: values.len(),
        });
    }

    forward_pass(&cascade, &mut values);
    values.reverse();
    forward_pass(&cascade, &mut values);
    values.reverse();

    Ok(scatter_back(samples.len(), &values, &indices))
}
