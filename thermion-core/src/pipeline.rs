//! Channel Pipeline Orchestrator
//!
//! ## Overview
//!
//! Composes the processing stages into one per-channel contract:
//!
//! ```text
//! raw ─→ outlier removal ─→ smoothing ─→ statistics
//!                                  │
//!                                  ├─→ steady-state detection  (needs timestamps)
//!                                  └─→ derivative / max rate   (needs timestamps)
//! ```
//!
//! Every call receives its own copies and returns a freshly-allocated
//! [`ProcessedChannel`]; the only state a [`ChannelProcessor`] holds is its
//! immutable configuration, so one processor can serve any number of
//! channels from any number of threads with no coordination.
//!
//! ## Error policy
//!
//! Numeric edge cases never raise: an all-NaN channel flows through every
//! stage and comes out with `statistics: None`, empty derivatives, and a
//! not-steady result. The orchestrator fails only on structural
//! violations: a timestamp sequence whose length does not match the
//! samples is a [`ShapeMismatch`](crate::errors::ProcessingError).
//!
//! ## Example
//!
//! ```
//! use thermion_core::{ChannelProcessor, ProcessorConfig};
//!
//! let processor = ChannelProcessor::new(ProcessorConfig::default()).unwrap();
//! let mut samples = vec![25.0; 16];
//! samples[7] = 99.0; // contact glitch
//! let timestamps: Vec<f64> = (0..samples.len()).map(|i| i as f64 * 0.02).collect();
//!
//! let result = processor.process(&samples, Some(&timestamps)).unwrap();
//! assert_eq!(result.outlier_count, 1);
//! assert!(result.statistics.is_some());
//! ```

use alloc::vec::Vec;

use crate::config::ProcessorConfig;
use crate::errors::{ProcessingError, ProcessingResult};
use crate::filters;
use crate::outliers::{detect_outliers, OutlierMethod};
use crate::stats::{self, Statistics};
use crate::temporal::{self, SteadyStateResult};

/// Everything the pipeline derives from one channel's raw data.
///
/// Constructed fresh per [`ChannelProcessor::process`] call, never mutated
/// after return, owned solely by the caller.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProcessedChannel {
    /// Untouched copy of the input
    pub raw: Vec<f64>,
    /// Input with outliers overwritten by NaN
    pub cleaned: Vec<f64>,
    /// Cleaned data after the configured smoothing filter
    pub filtered: Vec<f64>,
    /// Number of samples the outlier stage flagged
    pub outlier_count: usize,
    /// Summary of the filtered data; `None` when nothing valid remained
    pub statistics: Option<Statistics>,
    /// Steady-state scan outcome; `None` when the stage did not run
    pub steady_state: Option<SteadyStateResult>,
    /// Finite-difference rates; `None` when the stage did not run
    pub derivative: Option<Vec<f64>>,
    /// Maximum absolute rate; `None` when no valid rate exists
    pub max_rate: Option<f64>,
}

/// Per-channel processing pipeline with an immutable configuration.
#[derive(Debug, Clone)]
pub struct ChannelProcessor {
    config: ProcessorConfig,
}

impl ChannelProcessor {
    /// Build a processor, validating the configuration up front.
    ///
    /// Validation happens exactly once; every subsequent [`process`] call
    /// assumes a well-formed configuration.
    ///
    /// [`process`]: ChannelProcessor::process
    pub fn new(config: ProcessorConfig) -> ProcessingResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration this processor was built with
    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    /// Run the full pipeline over one channel.
    ///
    /// `timestamps` (seconds, monotonic non-decreasing, index-aligned)
    /// enables the steady-state and derivative stages; without it those
    /// fields are `None`. A timestamp sequence of the wrong length is a
    /// structural violation and fails fast.
    pub fn process(
        &self,
        raw: &[f64],
        timestamps: Option<&[f64]>,
    ) -> ProcessingResult<ProcessedChannel> {
        if let Some(ts) = timestamps {
            if ts.len() != raw.len() {
                return Err(ProcessingError::ShapeMismatch {
                    expected: raw.len(),
                    actual: ts.len(),
                });
            }
        }

        let (cleaned, mask) = detect_outliers(raw, OutlierMethod::ZScore, self.config.outlier_threshold);
        let outlier_count = mask.iter().filter(|&&m| m).count();

        let filtered = filters::apply(&cleaned, &self.config);

        let statistics = stats::summarize(&filtered);

        let steady_state = timestamps.and_then(|ts| {
            if filtered.len() > self.config.steady_state.window {
                let index = temporal::detect_steady_state(
                    &filtered,
                    self.config.steady_state.window,
                    self.config.steady_state.threshold,
                );
                Some(SteadyStateResult {
                    index,
                    time_to_steady: index.and_then(|i| ts.get(i).copied()),
                })
            } else {
                None
            }
        });

        let (derivative, max_rate) = match timestamps {
            Some(ts) if filtered.len() > 1 => {
                // Lengths were validated above, so this cannot fail
                let rates = temporal::derivative(&filtered, ts)?;
                let max_rate = max_abs_rate(&rates);
                (Some(rates), max_rate)
            }
            _ => (None, None),
        };

        Ok(ProcessedChannel {
            raw: raw.to_vec(),
            cleaned,
            filtered,
            outlier_count,
            statistics,
            steady_state,
            derivative,
            max_rate,
        })
    }
}

/// Largest absolute value among the valid rates; `None` for an empty or
/// all-NaN sequence.
fn max_abs_rate(rates: &[f64]) -> Option<f64> {
    let mut max: Option<f64> = None;
    for &r in rates {
        if r.is_nan() {
            continue;
        }
        let magnitude = libm::fabs(r);
        if max.map_or(true, |m| magnitude > m) {
            max = Some(magnitude);
        }
    }
    max
}
