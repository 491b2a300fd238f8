//! NTC Thermistor Reference Values
//!
//! Unit conversions, numeric guards, and the reference parameters of the
//! 10 kΩ NTC part the defaults are written for.

// ===== UNIT CONVERSION =====

/// Offset between Celsius and Kelvin.
pub const KELVIN_OFFSET: f64 = 273.15;

// ===== NUMERIC GUARDS =====

/// Floor applied to resistances (and resistance ratios) before taking a
/// logarithm, in ohms.
///
/// Non-positive resistances cannot occur physically but do occur in data
/// (open circuit read as negative after offset correction, for instance).
/// Clamping keeps the conversion total instead of producing -inf/NaN from
/// the logarithm. NaN inputs are *not* clamped; they propagate.
pub const MIN_RESISTANCE_OHM: f64 = 0.001;

/// Mean-value threshold used to guess whether a raw channel carries
/// resistance or temperature, in ohms.
///
/// Implementation-specific heuristic: NTC resistances in the supported
/// range are in the hundreds of ohms and up, while plausible temperatures
/// are below 100. A channel whose valid mean exceeds this is treated as
/// resistance. Not physically derived; callers with unusual sensors should
/// pass their own threshold to
/// [`is_resistance_series`](crate::calibration::is_resistance_series).
pub const RESISTANCE_HEURISTIC_OHM: f64 = 100.0;

// ===== DEFAULT NTC PARAMETERS =====

/// Reference resistance of the default NTC part, in ohms (10 kΩ at 25 °C).
pub const DEFAULT_R0_OHM: f64 = 10_000.0;

/// Reference temperature of the default NTC part, in °C.
pub const DEFAULT_T0_CELSIUS: f64 = 25.0;

/// Beta value of the default NTC part, in kelvin.
///
/// 3950 K is the common value for 10 kΩ epoxy-bead NTCs.
pub const DEFAULT_BETA_KELVIN: f64 = 3950.0;
