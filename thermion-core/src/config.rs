//! Processing Configuration
//!
//! The duck-typed "look the key up with a default" configuration style of
//! acquisition scripts becomes one strongly-typed struct here, validated
//! exactly once at pipeline construction. After that the configuration is
//! immutable: a [`ProcessorConfig`] can be shared freely across threads and
//! every channel-processing call reads the same values.
//!
//! Defaults mirror the bench defaults in
//! [`constants::processing`](crate::constants::processing); the
//! steady-state window and threshold are implementation-specific tuning
//! values, deliberately configurable rather than hard-coded.

use crate::constants::processing::{
    DEFAULT_BUTTERWORTH_CUTOFF_HZ, DEFAULT_BUTTERWORTH_ORDER,
    DEFAULT_BUTTERWORTH_SAMPLE_RATE_HZ, DEFAULT_FILTER_WINDOW, DEFAULT_OUTLIER_THRESHOLD,
    DEFAULT_STEADY_STATE_THRESHOLD, DEFAULT_STEADY_STATE_WINDOW, MAX_BUTTERWORTH_ORDER,
};
use crate::errors::{ProcessingError, ProcessingResult};

/// Smoothing strategy applied after outlier removal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FilterKind {
    /// Centered uniform-kernel moving average
    MovingAverage,
    /// Sliding-window median
    Median,
    /// Zero-phase low-pass Butterworth
    Butterworth,
}

impl FilterKind {
    /// Parse a configuration-file filter name.
    ///
    /// Unrecognized names return `None`; callers treat that as "leave the
    /// data unfiltered" (with a diagnostic) rather than an error.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "moving_average" => Some(Self::MovingAverage),
            "median" => Some(Self::Median),
            "butterworth" => Some(Self::Butterworth),
            _ => None,
        }
    }

    /// Canonical configuration name of this filter
    pub fn name(&self) -> &'static str {
        match self {
            Self::MovingAverage => "moving_average",
            Self::Median => "median",
            Self::Butterworth => "butterworth",
        }
    }
}

/// Butterworth design parameters
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ButterworthConfig {
    /// Low-pass cutoff frequency in Hz; must be below Nyquist
    pub cutoff_hz: f64,
    /// Sample rate of the incoming sequence in Hz
    pub sample_rate_hz: f64,
    /// Filter order; odd values are rounded up to the next even order
    pub order: usize,
}

impl Default for ButterworthConfig {
    fn default() -> Self {
        Self {
            cutoff_hz: DEFAULT_BUTTERWORTH_CUTOFF_HZ,
            sample_rate_hz: DEFAULT_BUTTERWORTH_SAMPLE_RATE_HZ,
            order: DEFAULT_BUTTERWORTH_ORDER,
        }
    }
}

/// Steady-state detection parameters
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SteadyStateConfig {
    /// Sliding window length in samples
    pub window: usize,
    /// Window standard deviation below which the signal counts as settled
    pub threshold: f64,
}

impl Default for SteadyStateConfig {
    fn default() -> Self {
        Self {
            window: DEFAULT_STEADY_STATE_WINDOW,
            threshold: DEFAULT_STEADY_STATE_THRESHOLD,
        }
    }
}

/// Immutable per-pipeline configuration.
///
/// Constructed once, validated once, then shared read-only by every
/// processing call. See [`ChannelProcessor::new`] for the validation
/// entry point.
///
/// [`ChannelProcessor::new`]: crate::pipeline::ChannelProcessor::new
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProcessorConfig {
    /// Whether the smoothing stage runs at all; `false` makes it identity
    pub filter_enabled: bool,
    /// Which smoothing strategy to apply
    pub filter_kind: FilterKind,
    /// Window for the moving-average and median filters, in samples
    pub filter_window: usize,
    /// Z-score threshold for the pipeline's outlier stage
    pub outlier_threshold: f64,
    /// Butterworth design parameters (used when `filter_kind` selects it)
    pub butterworth: ButterworthConfig,
    /// Steady-state detection parameters
    pub steady_state: SteadyStateConfig,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            filter_enabled: true,
            filter_kind: FilterKind::MovingAverage,
            filter_window: DEFAULT_FILTER_WINDOW,
            outlier_threshold: DEFAULT_OUTLIER_THRESHOLD,
            butterworth: ButterworthConfig::default(),
            steady_state: SteadyStateConfig::default(),
        }
    }
}

impl ProcessorConfig {
    /// Configuration with the smoothing stage disabled.
    ///
    /// Outlier removal and statistics still run; the filter is identity.
    pub fn unfiltered() -> Self {
        Self {
            filter_enabled: false,
            ..Self::default()
        }
    }

    /// Build a default configuration from an external filter-kind name.
    ///
    /// Unrecognized names disable the smoothing stage with a warning
    /// instead of failing; configuration files rely on this permissive
    /// default, and a typo should cost smoothing, not the whole run.
    pub fn with_filter_name(name: &str) -> Self {
        match FilterKind::parse(name) {
            Some(kind) => Self {
                filter_kind: kind,
                ..Self::default()
            },
            None => {
                log_warn!("unknown filter type: {}", name);
                Self {
                    filter_enabled: false,
                    ..Self::default()
                }
            }
        }
    }

    /// Validate the configuration.
    ///
    /// Called by the pipeline at construction so that every later
    /// processing call can assume a well-formed configuration.
    pub fn validate(&self) -> ProcessingResult<()> {
        if self.filter_window == 0 {
            return Err(ProcessingError::InvalidConfig {
                reason: "filter window must be positive",
            });
        }
        if !(self.outlier_threshold > 0.0) {
            return Err(ProcessingError::InvalidConfig {
                reason: "outlier threshold must be positive",
            });
        }
        if self.butterworth.order == 0 || self.butterworth.order > MAX_BUTTERWORTH_ORDER {
            return Err(ProcessingError::InvalidConfig {
                reason: "butterworth order out of supported range",
            });
        }
        if !(self.butterworth.sample_rate_hz > 0.0) {
            return Err(ProcessingError::InvalidConfig {
                reason: "sample rate must be positive",
            });
        }
        if !(self.butterworth.cutoff_hz > 0.0) {
            return Err(ProcessingError::InvalidConfig {
                reason: "cutoff frequency must be positive",
            });
        }
        if self.steady_state.window == 0 {
            return Err(ProcessingError::InvalidConfig {
                reason: "steady-state window must be positive",
            });
        }
        if !(self.steady_state.threshold > 0.0) {
            return Err(ProcessingError::InvalidConfig {
                reason: "steady-state threshold must be positive",
            });
        }
        Ok(())
    }
}
