//! Core processing engine for Thermion
//!
//! Turns raw, noisy thermistor channel data into cleaned, filtered,
//! statistically-summarized results, and derives temperature-conversion
//! coefficients from calibration points. The crate is pure computation:
//! instrument I/O, persistence, and plotting live in external
//! collaborators that feed plain numeric arrays in and take structured
//! results out.
//!
//! Key constraints:
//! - NaN is the missing-sample sentinel; index alignment between a channel
//!   and its timestamps is never broken
//! - Numeric edge cases degrade per documented fallbacks, they never panic
//! - Structural misuse (shape mismatches, too few calibration points)
//!   fails fast
//!
//! ```
//! use thermion_core::{ChannelProcessor, ProcessorConfig, calibration};
//!
//! // Convert a resistance channel and process it
//! let ohms = [10_000.0, 9_900.0, f64::NAN, 9_750.0, 9_700.0];
//! let celsius = calibration::convert_if_resistance(
//!     &ohms,
//!     &calibration::BetaCoefficients::default(),
//!     thermion_core::constants::RESISTANCE_HEURISTIC_OHM,
//! );
//!
//! let processor = ChannelProcessor::new(ProcessorConfig::default()).unwrap();
//! let result = processor.process(&celsius, None).unwrap();
//! assert_eq!(result.filtered.len(), ohms.len());
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

extern crate alloc;

// Diagnostics compile to nothing when the `log` feature is off
#[cfg(feature = "log")]
macro_rules! log_warn {
    ($($arg:tt)*) => { log::warn!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_warn {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "log")]
macro_rules! log_info {
    ($($arg:tt)*) => { log::info!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_info {
    ($($arg:tt)*) => {};
}

pub mod calibration;
pub mod compare;
pub mod config;
pub mod constants;
pub mod errors;
pub mod filters;
pub mod outliers;
pub mod pipeline;
pub mod stats;
pub mod temporal;

// Public API
pub use compare::{compare_channels, ChannelComparison, PairComparison};
pub use config::{ButterworthConfig, FilterKind, ProcessorConfig, SteadyStateConfig};
pub use errors::{ProcessingError, ProcessingResult};
pub use outliers::{detect_outliers, OutlierMethod};
pub use pipeline::{ChannelProcessor, ProcessedChannel};
pub use stats::{summarize, Statistics};
pub use temporal::SteadyStateResult;

/// Crate version string
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
