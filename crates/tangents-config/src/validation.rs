//! Preset and parameter validation.
//!
//! Ranges come from the core parameter table, so a value accepted here
//! always encodes to an in-range raw value. Validation works in display
//! units: percent for resonance, drive, AGR and CV depth, Hz for cutoff.
//!
//! # Example
//!
//! ```rust
//! use tangents_config::{parse_param_value, validate_value};
//! use tangents_core::ParamIndex;
//!
//! let v = parse_param_value("cutoff_hz", "440Hz").unwrap();
//! validate_value(ParamIndex::Cutoff, v).unwrap();
//! assert!(validate_value(ParamIndex::Resonance, 140.0).is_err());
//! ```

use tangents_core::ParamIndex;
use thiserror::Error;

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// Unknown parameter name.
    #[error("unknown parameter '{0}'")]
    UnknownParameter(String),

    /// Parameter value out of range.
    #[error("parameter '{param}' value {value} out of range [{min}, {max}]")]
    OutOfRange {
        /// Name of the parameter.
        param: String,
        /// The value that was out of range.
        value: f32,
        /// Minimum allowed value.
        min: f32,
        /// Maximum allowed value.
        max: f32,
    },

    /// Label not among the parameter's choices.
    #[error("invalid value '{value}' for '{param}' (expected one of: {expected})")]
    UnknownLabel {
        /// Name of the parameter.
        param: String,
        /// The rejected label.
        value: String,
        /// Comma-separated accepted labels.
        expected: String,
    },

    /// Invalid parameter format.
    #[error("invalid format for parameter '{param}': {reason}")]
    InvalidFormat {
        /// Name of the parameter.
        param: String,
        /// Description of the format error.
        reason: String,
    },

    /// Multiple validation errors.
    #[error("multiple validation errors: {}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; "))]
    Multiple(Vec<ValidationError>),
}

impl ValidationError {
    /// Collapse a list of errors: none is `Ok`, one is returned as-is.
    pub fn from_list(mut errors: Vec<ValidationError>) -> ValidationResult<()> {
        match errors.len() {
            0 => Ok(()),
            1 => Err(errors.remove(0)),
            _ => Err(ValidationError::Multiple(errors)),
        }
    }
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Display-unit range of a parameter.
pub fn display_range(param: ParamIndex) -> (f32, f32) {
    let d = param.descriptor();
    (d.display_value(d.min), d.display_value(d.max))
}

/// Check a display-unit value against the parameter's range.
pub fn validate_value(param: ParamIndex, value: f32) -> ValidationResult<()> {
    let (min, max) = display_range(param);
    if value.is_finite() && value >= min && value <= max {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange {
            param: param.descriptor().key.to_string(),
            value,
            min,
            max,
        })
    }
}

/// Parse a parameter value from a string.
///
/// Accepts plain numbers and the unit suffixes `Hz`, `kHz`, `%` and `x`
/// (oversampling factor). `kHz` is scaled to Hz; the others are stripped.
pub fn parse_param_value(param_name: &str, value_str: &str) -> ValidationResult<f32> {
    let s = value_str.trim();
    let invalid = |v: &str| ValidationError::InvalidFormat {
        param: param_name.to_string(),
        reason: format!("cannot parse '{}' as number", v),
    };

    let (number, scale) = if let Some(v) = s.strip_suffix("kHz").or_else(|| s.strip_suffix("khz")) {
        (v, 1000.0)
    } else if let Some(v) = s.strip_suffix("Hz").or_else(|| s.strip_suffix("hz")) {
        (v, 1.0)
    } else if let Some(v) = s.strip_suffix('%') {
        (v, 1.0)
    } else if let Some(v) = s.strip_suffix('x') {
        (v, 1.0)
    } else {
        (s, 1.0)
    };

    number
        .trim()
        .parse::<f32>()
        .map(|v| v * scale)
        .map_err(|_| invalid(number.trim()))
}
