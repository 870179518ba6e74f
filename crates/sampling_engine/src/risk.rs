//! Risk factor resolution.
//!
//! The assessed risk level scales the base sample size through a direct
//! lookup in the configured [`RiskMatrix`]. No computation and no defaulting:
//! the matrix type carries all three levels.

use sampling_core::types::{RiskLevel, RiskMatrix};

/// Returns the multiplier for `level` from `matrix`.
///
/// # Examples
///
/// ```
/// use sampling_engine::risk::resolve_risk_factor;
/// use sampling_engine::types::{RiskLevel, RiskMatrix};
///
/// let matrix = RiskMatrix::new(0.75, 1.0, 1.5);
/// assert_eq!(resolve_risk_factor(RiskLevel::High, &matrix), 1.5);
/// ```
#[inline]
pub fn resolve_risk_factor(level: RiskLevel, matrix: &RiskMatrix) -> f64 {
    matrix.get(level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_each_level() {
        let matrix = RiskMatrix::new(0.8, 1.0, 1.2);
        assert_eq!(resolve_risk_factor(RiskLevel::Low, &matrix), 0.8);
        assert_eq!(resolve_risk_factor(RiskLevel::Moderate, &matrix), 1.0);
        assert_eq!(resolve_risk_factor(RiskLevel::High, &matrix), 1.2);
    }

    #[test]
    fn test_resolve_uses_matrix_values_verbatim() {
        let matrix = RiskMatrix::new(3.0, 2.0, 1.0);
        assert_eq!(resolve_risk_factor(RiskLevel::Low, &matrix), 3.0);
        assert_eq!(resolve_risk_factor(RiskLevel::High, &matrix), 1.0);
    }
}
