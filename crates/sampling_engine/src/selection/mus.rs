//! Monetary-unit (probability-proportional-to-size) selection.
//!
//! Each item occupies a run of monetary units equal to its risk-weighted
//! absolute amount. One point is drawn uniformly inside each of `target`
//! equal intervals over the cumulative total, and the item whose run holds
//! the point is selected. Items larger than the interval may be hit more
//! than once; repeat hits are skipped, so the achieved sample can be smaller
//! than requested.

use std::collections::HashSet;

use sampling_core::rng::AuditRng;
use sampling_core::types::{RiskWeighting, SampleItem, SamplingMethod, Transaction};
use tracing::debug;

use super::{whole_population, Selection, SelectionStrategy};

/// Risk-weighted monetary amount of a transaction.
///
/// `|amount| · (1 + m · riskScore)` where `m` is 0.6 for moderate and 1.0 for
/// high weighting; a missing risk score counts as 0.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use sampling_engine::selection::weighted_amount;
/// use sampling_engine::types::{RiskWeighting, Transaction};
///
/// let date = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
/// let tx = Transaction::new("A", date, -200.0).with_risk_score(0.5);
/// assert_eq!(weighted_amount(&tx, RiskWeighting::Disabled), 200.0);
/// assert_eq!(weighted_amount(&tx, RiskWeighting::Moderate), 260.0);
/// assert_eq!(weighted_amount(&tx, RiskWeighting::High), 300.0);
/// ```
pub fn weighted_amount(transaction: &Transaction, weighting: RiskWeighting) -> f64 {
    let amount = transaction.absolute_amount();
    match weighting.score_multiplier() {
        Some(multiplier) => amount * (1.0 + multiplier * transaction.risk_score_or_zero()),
        None => amount,
    }
}

/// Monetary-unit sampling with optional risk weighting.
#[derive(Copy, Clone, Debug, Default)]
pub struct MonetaryUnit {
    weighting: RiskWeighting,
}

impl MonetaryUnit {
    /// Creates a strategy using `weighting` for item sizes.
    pub fn new(weighting: RiskWeighting) -> Self {
        Self { weighting }
    }
}

impl SelectionStrategy for MonetaryUnit {
    fn method(&self) -> SamplingMethod {
        SamplingMethod::Mus
    }

    fn select(&self, population: &[Transaction], target: usize, rng: &mut AuditRng) -> Selection {
        if target == 0 || population.is_empty() {
            return Selection::default();
        }

        let (pool, weights): (Vec<&Transaction>, Vec<f64>) = population
            .iter()
            .filter(|tx| tx.amount != 0.0)
            .map(|tx| (tx, weighted_amount(tx, self.weighting)))
            .filter(|(_, weight)| weight.is_finite() && *weight > 0.0)
            .unzip();

        if pool.is_empty() {
            return Selection {
                warnings: vec![format!(
                    "MUS selection found no items with a non-zero amount among {} candidates",
                    population.len()
                )],
                ..Selection::default()
            };
        }

        if target >= pool.len() {
            let owned: Vec<Transaction> = pool.into_iter().cloned().collect();
            return Selection::from_items(whole_population(&owned, self.method(), rng));
        }

        let cumulative: Vec<f64> = weights
            .iter()
            .scan(0.0, |running, weight| {
                *running += weight;
                Some(*running)
            })
            .collect();
        let total = cumulative[cumulative.len() - 1];
        let interval = total / target as f64;
        let last = pool.len() - 1;

        let mut seen = HashSet::with_capacity(target);
        let mut items = Vec::with_capacity(target);
        for k in 0..target {
            let point = rng.gen_uniform() * interval + k as f64 * interval;
            let index = cumulative.partition_point(|&c| c < point).min(last);
            if seen.insert(index) {
                items.push(SampleItem::residual(
                    pool[index].clone(),
                    self.method(),
                    Some(items.len() + 1),
                ));
            }
        }

        let mut warnings = Vec::new();
        if items.len() < target {
            debug!(
                requested = target,
                selected = items.len(),
                "MUS interval collisions reduced the sample"
            );
            warnings.push(format!(
                "MUS selected {} distinct items out of {} requested; large items were hit more than once",
                items.len(),
                target
            ));
        }

        Selection {
            items,
            strata: None,
            warnings,
        }
    }
}
