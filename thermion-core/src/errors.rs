//! Error Types for Structural Violations
//!
//! ## Design Philosophy
//!
//! Thermion distinguishes two tiers of failure, and only one of them is an
//! error:
//!
//! 1. **Numeric-degenerate conditions** (all-NaN input, zero variance, a
//!    window larger than the data, zero time deltas, non-positive
//!    resistance) are *defined behavior*, not errors. Each component
//!    documents its fallback: identity pass-through, an empty result, NaN
//!    propagation, an all-false mask. Nothing in this module is involved.
//!
//! 2. **Structural violations** (mismatched sequence lengths, too few
//!    calibration points, invalid configuration, a singular calibration
//!    fit) are programming or usage errors. They fail fast with a variant
//!    from this module and must not be silently absorbed.
//!
//! Errors are kept small and `Copy` (all data inline, messages as
//! `&'static str`) so they can be returned from hot paths and stored
//! without allocation.

use thiserror_no_std::Error;

/// Result type for processing and calibration operations
pub type ProcessingResult<T> = Result<T, ProcessingError>;

/// Structural errors - kept small for embedded use
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ProcessingError {
    /// Two index-aligned sequences have different lengths
    #[error("Sequence length {actual} does not match expected length {expected}")]
    ShapeMismatch {
        /// Length the operation required (usually the sample sequence)
        expected: usize,
        /// Length actually supplied
        actual: usize,
    },

    /// Too few calibration points for the requested fit
    #[error("Calibration requires at least {required} points, have {available}")]
    InsufficientCalibrationPoints {
        /// Minimum number of points the fit needs
        required: usize,
        /// Number of points actually supplied
        available: usize,
    },

    /// Configuration rejected at construction
    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        /// What was wrong with the configuration
        reason: &'static str,
    },

    /// Calibration points produce a singular or non-finite system
    #[error("Degenerate calibration fit: {reason}")]
    DegenerateFit {
        /// Why the fit could not be solved
        reason: &'static str,
    },
}

#[cfg(feature = "defmt")]
impl defmt::Format for ProcessingError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::ShapeMismatch { expected, actual } =>
                defmt::write!(fmt, "Length {} != expected {}", actual, expected),
            Self::InsufficientCalibrationPoints { required, available } =>
                defmt::write!(fmt, "Need {} calibration points, have {}", required, available),
            Self::InvalidConfig { reason } =>
                defmt::write!(fmt, "Invalid config: {}", reason),
            Self::DegenerateFit { reason } =>
                defmt::write!(fmt, "Degenerate fit: {}", reason),
        }
    }
}
