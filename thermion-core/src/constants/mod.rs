//! Constants for Thermion Core
//!
//! Centralized, documented numeric values used throughout the crate. Every
//! default the processing pipeline or the calibration engine relies on is
//! defined here rather than inlined at the point of use.
//!
//! ## Organization
//!
//! Constants are grouped by domain:
//! - **Processing**: filter windows, outlier thresholds, steady-state
//!   detection parameters
//! - **Thermistor**: NTC reference values, unit conversions, numeric guards
//!
//! ## Usage Guidelines
//!
//! 1. Always use these constants instead of magic numbers
//! 2. When adding new constants, document their purpose and provenance
//! 3. Values marked *implementation-specific* have no physical derivation
//!    and are exposed through configuration so callers can override them

/// Filter, outlier, and steady-state parameters for channel processing.
pub mod processing;

/// NTC thermistor reference values and numeric guards for calibration.
pub mod thermistor;

// Re-export commonly used constants for convenience
pub use processing::{
    DEFAULT_FILTER_WINDOW, DEFAULT_OUTLIER_THRESHOLD,
    DEFAULT_STEADY_STATE_WINDOW, DEFAULT_STEADY_STATE_THRESHOLD,
    MIN_JOINT_SAMPLES,
};

pub use thermistor::{
    KELVIN_OFFSET, MIN_RESISTANCE_OHM, RESISTANCE_HEURISTIC_OHM,
    DEFAULT_R0_OHM, DEFAULT_T0_CELSIUS, DEFAULT_BETA_KELVIN,
};
