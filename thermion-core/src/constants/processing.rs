//! Channel-Processing Defaults
//!
//! Filter, outlier-detection, and steady-state parameters. Several of these
//! are *implementation-specific* tuning values carried over from bench
//! practice rather than derived from physics; they are surfaced through
//! [`ProcessorConfig`](crate::config::ProcessorConfig) so callers can
//! override them per deployment.

// ===== SMOOTHING FILTER =====

/// Default smoothing-filter window in samples.
///
/// Five samples at the typical 50 Hz scan rate is a 100 ms window: wide
/// enough to suppress single-sample noise, narrow enough to track a
/// thermal transient.
pub const DEFAULT_FILTER_WINDOW: usize = 5;

/// Default Butterworth cutoff frequency in Hz.
///
/// One decade below the default 50 Hz sample rate. Thermistor signals have
/// essentially no legitimate content above a few Hz (thermal mass).
pub const DEFAULT_BUTTERWORTH_CUTOFF_HZ: f64 = 5.0;

/// Default sample rate assumed by the Butterworth filter, in Hz.
pub const DEFAULT_BUTTERWORTH_SAMPLE_RATE_HZ: f64 = 50.0;

/// Default Butterworth filter order.
pub const DEFAULT_BUTTERWORTH_ORDER: usize = 4;

/// Maximum supported Butterworth order.
///
/// Bounds the biquad cascade so filter state can live in fixed storage.
/// Orders above 8 buy nothing for slow thermal signals.
pub const MAX_BUTTERWORTH_ORDER: usize = 8;

// ===== OUTLIER DETECTION =====

/// Default z-score threshold for outlier detection, in standard deviations.
///
/// Three sigma keeps ~99.7% of genuinely Gaussian noise while catching
/// contact glitches and electrical spikes.
pub const DEFAULT_OUTLIER_THRESHOLD: f64 = 3.0;

/// IQR fence multiplier for the interquartile outlier method.
///
/// The conventional Tukey fence: values outside
/// `[Q1 - 1.5*IQR, Q3 + 1.5*IQR]` are flagged.
pub const IQR_FENCE: f64 = 1.5;

// ===== STEADY-STATE DETECTION =====

/// Default steady-state detection window in samples.
///
/// Implementation-specific: one second of data at the default 50 Hz rate.
/// Not physically derived; override via
/// [`SteadyStateConfig`](crate::config::SteadyStateConfig).
pub const DEFAULT_STEADY_STATE_WINDOW: usize = 50;

/// Default steady-state dispersion threshold (standard deviation).
///
/// Implementation-specific: a window whose std falls below 0.1 units is
/// taken as settled. Not physically derived; override via
/// [`SteadyStateConfig`](crate::config::SteadyStateConfig).
pub const DEFAULT_STEADY_STATE_THRESHOLD: f64 = 0.1;

// ===== CHANNEL COMPARISON =====

/// Minimum number of jointly-valid samples required before a channel pair
/// produces a correlation entry.
///
/// Pairs with `joint_samples <= MIN_JOINT_SAMPLES` are silently omitted:
/// Pearson correlation over a handful of points is noise, not signal.
pub const MIN_JOINT_SAMPLES: usize = 10;
