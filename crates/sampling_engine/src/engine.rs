//! Engine entry point and reproducibility check.
//!
//! [`generate_sample`] is a pure function of `(population, params)`: the RNG
//! stream is created from `params.seed` at the start of every call and is
//! consumed only by the selection strategy, so two calls with identical
//! inputs return identical samples.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use sampling_core::rng::AuditRng;
use sampling_core::types::{
    CalculationTrace, ResultMetadata, SampleItem, SamplingParams, SamplingResult, Transaction,
};

use crate::assembler::{assemble, param_hash};
use crate::risk::resolve_risk_factor;
use crate::selection::select_residual;
use crate::sizing::{apply_risk_factor, base_sample_size};
use crate::threshold::{resolve_threshold, split_population};
use crate::Result;

/// Generates an audit sample.
///
/// Parameters are assumed to have passed [`validate`](crate::validate); the
/// engine does not re-check business rules. Conditions noticed while
/// sampling are returned in [`SamplingResult::warnings`].
///
/// # Errors
///
/// Returns [`SamplingError::NumericalInstability`](crate::SamplingError) when
/// a sizing formula produces a non-finite value.
pub fn generate_sample(transactions: &[Transaction], params: &SamplingParams) -> Result<SamplingResult> {
    let mut rng = AuditRng::from_seed(params.seed);
    let mut warnings = Vec::new();

    let threshold = resolve_threshold(params);
    let split = split_population(transactions, threshold);
    debug!(
        threshold = ?threshold,
        targeted = split.targeted.len(),
        residual = split.residual.len(),
        "population split"
    );

    let base = base_sample_size(params, &split.residual)?;
    let risk_factor = resolve_risk_factor(params.risk_level, &params.risk_matrix);
    let final_n = apply_risk_factor(base.n, risk_factor)?;
    debug!(
        base_n = base.n,
        risk_factor,
        final_n,
        fallback = base.used_fallback,
        "sample size computed"
    );

    if base.used_fallback && !split.residual.is_empty() {
        warnings.push(format!(
            "Sizing inputs incomplete for a {} test; fallback sample size of {} used",
            params.test_type, base.n
        ));
    }
    if final_n > split.residual.len() && !split.residual.is_empty() {
        warnings.push(format!(
            "Recommended sample size {} exceeds the residual population of {}; \
             the whole residual population is selected",
            final_n,
            split.residual.len()
        ));
    }

    debug!(method = %params.method, target = final_n, "dispatching selection");
    let selection = select_residual(params, &split.residual, final_n, &mut rng);
    warnings.extend(selection.warnings);

    let targeted: Vec<SampleItem> = split.targeted.into_iter().map(SampleItem::targeted).collect();
    let metadata = ResultMetadata {
        threshold,
        risk_matrix: params.risk_matrix,
        calculation: CalculationTrace {
            base_n: base.n,
            risk_factor,
            final_n,
        },
    };

    let result = assemble(
        params,
        targeted,
        selection.items,
        selection.strata,
        metadata,
        warnings,
    );

    info!(
        seed = params.seed,
        method = %params.method,
        recommended = result.plan.recommended_sample_size,
        actual = result.plan.actual_sample_size,
        coverage = result.plan.coverage_percentage,
        "sample generated"
    );

    Ok(result)
}

/// Outcome of re-running a stored plan.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReproducibilityReport {
    /// Stored and recomputed parameter fingerprints agree.
    pub param_hash_matches: bool,
    /// Stored and current seeds agree.
    pub seed_matches: bool,
    /// The ordered total sample is identical.
    pub sample_matches: bool,
    /// First position at which the ordered samples differ, if any.
    pub first_divergence: Option<usize>,
    /// Size of the stored total sample.
    pub stored_size: usize,
    /// Size of the regenerated total sample.
    pub regenerated_size: usize,
}

impl ReproducibilityReport {
    /// Returns `true` when every check passed.
    pub fn is_reproducible(&self) -> bool {
        self.param_hash_matches && self.seed_matches && self.sample_matches
    }
}

/// Re-runs [`generate_sample`] and compares against a stored result.
///
/// # Errors
///
/// Propagates errors from [`generate_sample`].
pub fn verify_reproducibility(
    stored: &SamplingResult,
    transactions: &[Transaction],
    params: &SamplingParams,
) -> Result<ReproducibilityReport> {
    let regenerated = generate_sample(transactions, params)?;
    let stored_ids = stored.total_ids();
    let regenerated_ids = regenerated.total_ids();

    let first_divergence = stored_ids
        .iter()
        .zip(regenerated_ids.iter())
        .position(|(a, b)| a != b)
        .or_else(|| {
            (stored_ids.len() != regenerated_ids.len())
                .then(|| stored_ids.len().min(regenerated_ids.len()))
        });

    let report = ReproducibilityReport {
        param_hash_matches: stored.plan.param_hash == param_hash(params),
        seed_matches: stored.plan.seed == params.seed,
        sample_matches: first_divergence.is_none(),
        first_divergence,
        stored_size: stored_ids.len(),
        regenerated_size: regenerated_ids.len(),
    };
    debug!(?report, "reproducibility checked");
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use sampling_core::types::{
        RiskLevel, SampleClassification, SamplingError, SamplingMethod, TestType, ThresholdMode,
    };

    fn population(n: usize) -> Vec<Transaction> {
        let date = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        (1..=n)
            .map(|i| Transaction::new(format!("T{:04}", i), date, 100.0 * i as f64))
            .collect()
    }

    fn params_for(population: &[Transaction], method: SamplingMethod) -> SamplingParams {
        SamplingParams {
            method,
            population_size: population.len(),
            population_sum: population.iter().map(Transaction::absolute_amount).sum(),
            materiality: Some(50_000.0),
            expected_misstatement: Some(5_000.0),
            strata_bounds: vec![10_000.0, 30_000.0],
            min_per_stratum: 3,
            seed: 777,
            ..SamplingParams::default()
        }
    }

    #[test]
    fn test_calculation_trace_recorded() {
        let population = population(500);
        let params = SamplingParams {
            risk_level: RiskLevel::High,
            materiality: Some(500_000.0),
            ..params_for(&population, SamplingMethod::Srs)
        };
        let result = generate_sample(&population, &params).unwrap();

        let calc = result.metadata.calculation;
        assert_eq!(calc.risk_factor, 1.2);
        assert_eq!(calc.final_n, ((calc.base_n as f64) * 1.2 - 1e-9).ceil() as usize);
        assert_eq!(result.plan.recommended_sample_size, calc.final_n);
        assert_eq!(result.samples.residual.len(), calc.final_n);
        assert_eq!(result.plan.method, SamplingMethod::Srs);
        assert_eq!(result.plan.test_type, TestType::Substantive);
    }

    #[test]
    fn test_threshold_items_are_targeted_first() {
        let population = population(200);
        let params = SamplingParams {
            threshold_mode: ThresholdMode::Custom,
            custom_threshold: Some(19_000.0),
            ..params_for(&population, SamplingMethod::Systematic)
        };
        let result = generate_sample(&population, &params).unwrap();

        assert_eq!(result.metadata.threshold, Some(19_000.0));
        assert_eq!(result.samples.targeted.len(), 11);
        let targeted = result.samples.targeted.len();
        assert!(result.samples.total[..targeted]
            .iter()
            .all(|item| item.classification == SampleClassification::Targeted));
        assert!(result.samples.residual.iter().all(|item| item.transaction.amount < 19_000.0));
    }

    #[test]
    fn test_every_method_runs() {
        let population = population(300);
        for method in SamplingMethod::all() {
            let result = generate_sample(&population, &params_for(&population, method)).unwrap();
            assert!(!result.samples.total.is_empty(), "{} produced no sample", method);
            assert_eq!(result.strata.is_some(), method == SamplingMethod::Stratified);
        }
    }

    #[test]
    fn test_fallback_and_cap_warnings() {
        let population = population(10);
        let params = SamplingParams {
            materiality: None,
            ..params_for(&population, SamplingMethod::Srs)
        };
        let result = generate_sample(&population, &params).unwrap();
        assert_eq!(result.metadata.calculation.base_n, 30);
        assert_eq!(result.samples.total.len(), 10);
        assert_eq!(result.warnings.len(), 2);
    }

    #[test]
    fn test_non_finite_sizing_is_an_error() {
        let population = population(50);
        let params = SamplingParams {
            confidence_level: 100,
            ..params_for(&population, SamplingMethod::Mus)
        };
        let err = generate_sample(&population, &params).unwrap_err();
        assert!(matches!(err, SamplingError::NumericalInstability(_)));
    }

    #[test]
    fn test_verify_reproducibility() {
        let population = population(400);
        let params = params_for(&population, SamplingMethod::Mus);
        let stored = generate_sample(&population, &params).unwrap();

        let report = verify_reproducibility(&stored, &population, &params).unwrap();
        assert!(report.is_reproducible());
        assert_eq!(report.first_divergence, None);

        let reseeded = SamplingParams {
            seed: 778,
            ..params.clone()
        };
        let report = verify_reproducibility(&stored, &population, &reseeded).unwrap();
        assert!(!report.seed_matches);
        assert!(!report.param_hash_matches);
        assert!(!report.is_reproducible());
    }

    #[test]
    fn test_result_round_trips_through_json() {
        let population = population(120);
        let result =
            generate_sample(&population, &params_for(&population, SamplingMethod::Stratified))
                .unwrap();
        let json = serde_json::to_string(&result).unwrap();
        let parsed: SamplingResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.total_ids(), result.total_ids());
        assert_eq!(parsed.plan.param_hash, result.plan.param_hash);
        assert_eq!(parsed.plan.generated_at, result.plan.generated_at);
        assert_eq!(parsed.summary(), result.summary());
        assert_eq!(parsed.strata.map(|s| s.len()), Some(3));
    }
}
