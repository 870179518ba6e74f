//! High-value threshold split.
//!
//! Items whose absolute amount reaches the threshold are *targeted* (tested
//! in full); the rest form the *residual* population that is sampled
//! statistically. The two sets are disjoint and together form the whole
//! population, preserving the original order within each set.

use sampling_core::types::{SamplingParams, ThresholdMode, Transaction};

/// Population partitioned by the high-value threshold.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ThresholdSplit {
    /// Absolute threshold applied, or `None` when disabled.
    pub threshold: Option<f64>,
    /// Items with `|amount| >= threshold`.
    pub targeted: Vec<Transaction>,
    /// Items with `|amount| < threshold`, or the whole population when disabled.
    pub residual: Vec<Transaction>,
}

/// Determines the absolute threshold from the configured basis.
///
/// Returns `None` when the mode is disabled or the basis value is missing,
/// non-positive or not finite.
pub fn resolve_threshold(params: &SamplingParams) -> Option<f64> {
    let basis = match params.threshold_mode {
        ThresholdMode::Disabled => None,
        ThresholdMode::PerformanceMateriality => params.performance_materiality,
        ThresholdMode::TotalMateriality => params.materiality,
        ThresholdMode::Custom => params.custom_threshold,
    };
    basis.filter(|value| value.is_finite() && *value > 0.0)
}

/// Partitions `transactions` by `|amount| >= threshold`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use sampling_engine::threshold::split_population;
/// use sampling_engine::types::Transaction;
///
/// let date = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
/// let population = vec![
///     Transaction::new("small", date, 10.0),
///     Transaction::new("large", date, -5_000.0),
/// ];
/// let split = split_population(&population, Some(1_000.0));
/// assert_eq!(split.targeted[0].id, "large");
/// assert_eq!(split.residual[0].id, "small");
/// ```
pub fn split_population(transactions: &[Transaction], threshold: Option<f64>) -> ThresholdSplit {
    let Some(threshold) = threshold else {
        return ThresholdSplit {
            threshold: None,
            targeted: Vec::new(),
            residual: transactions.to_vec(),
        };
    };

    let (targeted, residual) = transactions
        .iter()
        .cloned()
        .partition(|tx| tx.absolute_amount() >= threshold);

    ThresholdSplit {
        threshold: Some(threshold),
        targeted,
        residual,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::collections::HashSet;

    fn population() -> Vec<Transaction> {
        let date = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
        vec![
            Transaction::new("T1", date, 500.0),
            Transaction::new("T2", date, 1_000.0),
            Transaction::new("T3", date, -2_000.0),
            Transaction::new("T4", date, 999.99),
            Transaction::new("T5", date, 0.0),
        ]
    }

    #[test]
    fn test_resolve_threshold_by_mode() {
        let base = SamplingParams {
            materiality: Some(10_000.0),
            performance_materiality: Some(7_500.0),
            custom_threshold: Some(2_500.0),
            ..SamplingParams::default()
        };

        assert_eq!(resolve_threshold(&base), None);
        assert_eq!(
            resolve_threshold(&SamplingParams {
                threshold_mode: ThresholdMode::PerformanceMateriality,
                ..base.clone()
            }),
            Some(7_500.0)
        );
        assert_eq!(
            resolve_threshold(&SamplingParams {
                threshold_mode: ThresholdMode::TotalMateriality,
                ..base.clone()
            }),
            Some(10_000.0)
        );
        assert_eq!(
            resolve_threshold(&SamplingParams {
                threshold_mode: ThresholdMode::Custom,
                ..base
            }),
            Some(2_500.0)
        );
    }

    #[test]
    fn test_resolve_threshold_rejects_missing_basis() {
        let params = SamplingParams {
            threshold_mode: ThresholdMode::Custom,
            custom_threshold: Some(-1.0),
            ..SamplingParams::default()
        };
        assert_eq!(resolve_threshold(&params), None);
    }

    #[test]
    fn test_disabled_returns_everything_as_residual() {
        let split = split_population(&population(), None);
        assert!(split.targeted.is_empty());
        assert_eq!(split.residual, population());
        assert_eq!(split.threshold, None);
    }

    #[test]
    fn test_split_is_inclusive_and_uses_absolute_amount() {
        let split = split_population(&population(), Some(1_000.0));
        let targeted: Vec<&str> = split.targeted.iter().map(|t| t.id.as_str()).collect();
        let residual: Vec<&str> = split.residual.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(targeted, vec!["T2", "T3"]);
        assert_eq!(residual, vec!["T1", "T4", "T5"]);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(200))]

            #[test]
            fn test_split_is_a_partition(
                amounts in prop::collection::vec(-1e6f64..1e6, 0..200),
                threshold in 1.0f64..1e6
            ) {
                let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
                let txs: Vec<Transaction> = amounts
                    .iter()
                    .enumerate()
                    .map(|(i, &a)| Transaction::new(format!("T{}", i), date, a))
                    .collect();

                let split = split_population(&txs, Some(threshold));
                prop_assert_eq!(split.targeted.len() + split.residual.len(), txs.len());

                let targeted: HashSet<&str> = split.targeted.iter().map(|t| t.id.as_str()).collect();
                prop_assert!(split.residual.iter().all(|t| !targeted.contains(t.id.as_str())));
                prop_assert!(split.targeted.iter().all(|t| t.amount.abs() >= threshold));
                prop_assert!(split.residual.iter().all(|t| t.amount.abs() < threshold));
            }
        }
    }
}
