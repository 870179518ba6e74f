//! Error types for structured error handling.
//!
//! Business-rule violations are not errors: they are reported as a list of
//! messages by the parameter validator. [`SamplingError`] covers the two
//! classes that are hard failures:
//! - Configuration errors: an enumeration value the engine does not know
//! - Numerical instability: a sizing formula produced a non-finite value

use thiserror::Error;

/// Categorised sampling errors.
///
/// # Variants
/// - `UnsupportedMethod`: Sampling method outside SRS/SYSTEMATIC/MUS/STRATIFIED
/// - `UnsupportedTestType`: Test type outside SUBSTANTIVE/CONTROL
/// - `UnknownRiskLevel`: Risk level outside low/moderate/high
/// - `UnknownThresholdMode`: Unrecognised threshold mode
/// - `UnknownRiskWeighting`: Unrecognised MUS risk-weighting mode
/// - `NumericalInstability`: Computation produced NaN or infinity
///
/// # Examples
/// ```
/// use sampling_core::types::SamplingError;
///
/// let err = SamplingError::UnsupportedMethod("CLUSTER".to_string());
/// assert_eq!(format!("{}", err), "Unsupported sampling method: CLUSTER");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SamplingError {
    /// Sampling method not supported by this engine version.
    #[error("Unsupported sampling method: {0}")]
    UnsupportedMethod(String),

    /// Test type not supported by this engine version.
    #[error("Unsupported test type: {0}")]
    UnsupportedTestType(String),

    /// Risk level is not one of low, moderate, high.
    #[error("Unknown risk level: {0}")]
    UnknownRiskLevel(String),

    /// Threshold mode is not recognised.
    #[error("Unknown threshold mode: {0}")]
    UnknownThresholdMode(String),

    /// Risk-weighting mode is not recognised.
    #[error("Unknown risk weighting: {0}")]
    UnknownRiskWeighting(String),

    /// Numerical instability during computation.
    #[error("Numerical instability: {0}")]
    NumericalInstability(String),
}

impl SamplingError {
    /// Returns `true` for the configuration-error class (unknown enumeration
    /// values), which indicates a caller/engine version mismatch.
    pub fn is_configuration_error(&self) -> bool {
        !matches!(self, SamplingError::NumericalInstability(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sampling_error_display() {
        assert_eq!(
            SamplingError::UnknownRiskLevel("extreme".to_string()).to_string(),
            "Unknown risk level: extreme"
        );
        assert_eq!(
            SamplingError::NumericalInstability("n is NaN".to_string()).to_string(),
            "Numerical instability: n is NaN"
        );
    }

    #[test]
    fn test_configuration_error_class() {
        assert!(SamplingError::UnsupportedMethod("X".to_string()).is_configuration_error());
        assert!(SamplingError::UnknownThresholdMode("X".to_string()).is_configuration_error());
        assert!(!SamplingError::NumericalInstability("X".to_string()).is_configuration_error());
    }
}
