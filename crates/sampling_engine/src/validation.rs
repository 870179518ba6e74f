//! Parameter validation and advisory warnings.
//!
//! [`validate`] returns every business-rule violation as a human-readable
//! message; an empty list means the parameters are valid. It never fails and
//! has no side effects. Whether to proceed despite violations is the caller's
//! decision: [`generate_sample`](crate::generate_sample) does not re-validate.
//!
//! [`advisory_warnings`] and [`population_warnings`] report conditions worth
//! reviewing that do not block execution. Warnings are returned to the caller
//! rather than written to a log.

use std::collections::HashSet;

use sampling_core::math::statistics::{is_supported_confidence, SUPPORTED_CONFIDENCE_LEVELS};
use sampling_core::types::{
    RiskLevel, SamplingMethod, SamplingParams, TestType, ThresholdMode, Transaction,
};

/// Share of materiality above which expected misstatement is flagged.
pub const EXPECTED_MISSTATEMENT_WARNING_RATIO: f64 = 0.5;

/// Share of materiality below which performance materiality is flagged.
pub const PERFORMANCE_MATERIALITY_WARNING_RATIO: f64 = 0.5;

/// Share of the tolerable rate above which the expected deviation rate is flagged.
pub const EXPECTED_DEVIATION_WARNING_RATIO: f64 = 0.5;

/// Relative difference between declared and actual population sums that is flagged.
pub const POPULATION_SUM_TOLERANCE: f64 = 0.005;

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

/// Checks `params` against the business rules.
///
/// # Rules
///
/// - Population size and sum are positive
/// - Substantive tests: materiality > 0, expected misstatement < materiality
/// - Performance materiality, if given, does not exceed materiality
/// - Control tests: tolerable deviation rate > 0, expected rate (if given) below it
/// - Confidence level is 90, 95 or 99
/// - Seed is positive
/// - A threshold mode other than disabled has a positive basis value
/// - Strata bounds are positive finite amounts; risk multipliers are positive
///
/// Risk level, method, test type and threshold mode are typed enumerations,
/// so out-of-range values are rejected when the parameters are parsed.
///
/// # Examples
///
/// ```
/// use sampling_engine::validate;
/// use sampling_engine::types::SamplingParams;
///
/// let params = SamplingParams { seed: 0, ..SamplingParams::default() };
/// let errors = validate(&params);
/// assert!(errors.iter().any(|e| e.contains("Seed")));
/// ```
pub fn validate(params: &SamplingParams) -> Vec<String> {
    let mut errors = Vec::new();

    if params.population_size == 0 {
        errors.push("Population size must be greater than 0".to_string());
    }
    if !(params.population_sum.is_finite() && params.population_sum > 0.0) {
        errors.push("Population sum must be greater than 0".to_string());
    }

    let materiality = positive(params.materiality);

    match params.test_type {
        TestType::Substantive => {
            if materiality.is_none() {
                errors.push("Materiality must be greater than 0 for substantive tests".to_string());
            }
            if let Some(expected) = params.expected_misstatement {
                if expected < 0.0 {
                    errors.push("Expected misstatement cannot be negative".to_string());
                }
                if let Some(materiality) = materiality {
                    if expected >= materiality {
                        errors.push(format!(
                            "Expected misstatement ({}) must be less than materiality ({})",
                            expected, materiality
                        ));
                    }
                }
            }
        }
        TestType::Control => match positive(params.tolerable_deviation_rate) {
            None => errors.push(
                "Tolerable deviation rate must be greater than 0 for control tests".to_string(),
            ),
            Some(tolerable) => {
                if let Some(expected) = params.expected_deviation_rate {
                    if expected < 0.0 {
                        errors.push("Expected deviation rate cannot be negative".to_string());
                    }
                    if expected >= tolerable {
                        errors.push(format!(
                            "Expected deviation rate ({}%) must be less than tolerable deviation rate ({}%)",
                            expected, tolerable
                        ));
                    }
                }
            }
        },
    }

    if let (Some(performance), Some(materiality)) = (params.performance_materiality, materiality) {
        if performance > materiality {
            errors.push(format!(
                "Performance materiality ({}) cannot exceed materiality ({})",
                performance, materiality
            ));
        }
    }

    if !is_supported_confidence(params.confidence_level) {
        errors.push(format!(
            "Confidence level must be one of {:?}, got {}",
            SUPPORTED_CONFIDENCE_LEVELS, params.confidence_level
        ));
    }

    if params.seed == 0 {
        errors.push("Seed must be greater than 0".to_string());
    }

    match params.threshold_mode {
        ThresholdMode::Disabled => {}
        ThresholdMode::PerformanceMateriality => {
            if positive(params.performance_materiality).is_none() {
                errors.push(
                    "Threshold mode 'performance-materiality' requires a positive performance materiality"
                        .to_string(),
                );
            }
        }
        ThresholdMode::TotalMateriality => {
            if materiality.is_none() {
                errors.push(
                    "Threshold mode 'total-materiality' requires a positive materiality".to_string(),
                );
            }
        }
        ThresholdMode::Custom => {
            if positive(params.custom_threshold).is_none() {
                errors.push(
                    "Threshold mode 'custom' requires a positive custom threshold".to_string(),
                );
            }
        }
    }

    if params
        .strata_bounds
        .iter()
        .any(|bound| !(bound.is_finite() && *bound > 0.0))
    {
        errors.push("Strata bounds must be positive finite amounts".to_string());
    }

    for level in [RiskLevel::Low, RiskLevel::Moderate, RiskLevel::High] {
        let multiplier = params.risk_matrix.get(level);
        if !(multiplier.is_finite() && multiplier > 0.0) {
            errors.push(format!(
                "Risk matrix multiplier for '{}' must be a positive number, got {}",
                level, multiplier
            ));
        }
    }

    errors
}

/// Advisory warnings about `params` that do not block execution.
///
/// # Examples
///
/// ```
/// use sampling_engine::advisory_warnings;
/// use sampling_engine::types::SamplingParams;
///
/// let params = SamplingParams {
///     materiality: Some(100.0),
///     expected_misstatement: Some(60.0),
///     ..SamplingParams::default()
/// };
/// assert!(advisory_warnings(&params)[0].contains("50%"));
/// ```
pub fn advisory_warnings(params: &SamplingParams) -> Vec<String> {
    let mut warnings = Vec::new();
    let materiality = positive(params.materiality);

    if let (Some(expected), Some(materiality)) = (params.expected_misstatement, materiality) {
        if expected > EXPECTED_MISSTATEMENT_WARNING_RATIO * materiality && expected < materiality {
            warnings.push(format!(
                "Expected misstatement ({}) exceeds 50% of materiality ({}); the sample will be large",
                expected, materiality
            ));
        }
    }

    if let (Some(performance), Some(materiality)) =
        (positive(params.performance_materiality), materiality)
    {
        if performance < PERFORMANCE_MATERIALITY_WARNING_RATIO * materiality {
            warnings.push(format!(
                "Performance materiality ({}) is below 50% of materiality ({}); unusually strict",
                performance, materiality
            ));
        }
    }

    if let (Some(expected), Some(tolerable)) = (
        params.expected_deviation_rate,
        positive(params.tolerable_deviation_rate),
    ) {
        if expected > EXPECTED_DEVIATION_WARNING_RATIO * tolerable && expected < tolerable {
            warnings.push(format!(
                "Expected deviation rate ({}%) exceeds 50% of tolerable deviation rate ({}%)",
                expected, tolerable
            ));
        }
    }

    if params.method == SamplingMethod::Stratified && params.strata_bounds.is_empty() {
        warnings.push(
            "Stratified method without strata bounds; simple random sampling will be used"
                .to_string(),
        );
    }

    if params.method == SamplingMethod::Mus && params.test_type == TestType::Control {
        warnings.push(
            "Monetary-unit selection for a control test; attribute sizing with PPS selection is unusual"
                .to_string(),
        );
    }

    warnings
}

/// Warnings comparing the supplied population with the declared parameters.
///
/// Flags a population size or sum that differs from the declared values,
/// duplicate transaction identifiers (which break identifier-based sample
/// reconciliation) and risk scores outside [0, 1].
pub fn population_warnings(transactions: &[Transaction], params: &SamplingParams) -> Vec<String> {
    let mut warnings = Vec::new();

    if transactions.len() != params.population_size {
        warnings.push(format!(
            "Declared population size ({}) differs from supplied transactions ({})",
            params.population_size,
            transactions.len()
        ));
    }

    let actual_sum: f64 = transactions.iter().map(Transaction::absolute_amount).sum();
    if params.population_sum > 0.0
        && ((actual_sum - params.population_sum).abs() / params.population_sum)
            > POPULATION_SUM_TOLERANCE
    {
        warnings.push(format!(
            "Declared population sum ({:.2}) differs from absolute sum of transactions ({:.2})",
            params.population_sum, actual_sum
        ));
    }

    let mut seen = HashSet::with_capacity(transactions.len());
    let duplicates: Vec<&str> = transactions
        .iter()
        .filter(|tx| !seen.insert(tx.id.as_str()))
        .map(|tx| tx.id.as_str())
        .collect();
    if !duplicates.is_empty() {
        warnings.push(format!(
            "Duplicate transaction identifiers: {}",
            duplicates.join(", ")
        ));
    }

    let out_of_range = transactions
        .iter()
        .filter(|tx| {
            tx.risk_score
                .map_or(false, |score| !(0.0..=1.0).contains(&score))
        })
        .count();
    if out_of_range > 0 {
        warnings.push(format!(
            "{} transaction(s) have a risk score outside [0, 1]",
            out_of_range
        ));
    }

    warnings
}
