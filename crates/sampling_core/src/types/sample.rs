//! Selected items, strata and the engine result.
//!
//! A [`SamplingResult`] is the sole output of a sampling run. It serialises
//! to and from JSON so that a persisted plan re-loads into an identical
//! structure; open-ended stratum bounds are stored as `None`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::params::{RiskMatrix, SamplingMethod, TestType};
use super::transaction::Transaction;

/// Why an item is in the sample.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SampleClassification {
    /// Above the high-value threshold; tested in full.
    Targeted,
    /// Selected statistically from the residual population.
    Residual,
}

/// A transaction annotated with its selection details.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleItem {
    /// The selected transaction.
    pub transaction: Transaction,
    /// Targeted or residual.
    pub classification: SampleClassification,
    /// Index of the stratum the item was drawn from, if stratified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stratum_index: Option<usize>,
    /// Label of the selection method (`THRESHOLD`, `SRS`, `SYSTEMATIC`, `MUS`).
    pub selection_method: String,
    /// 1-based rank within the selection, when the method defines one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection_rank: Option<usize>,
}

impl SampleItem {
    /// Selection label for items picked by the high-value threshold.
    pub const THRESHOLD_LABEL: &'static str = "THRESHOLD";

    /// Wraps a transaction as a targeted (high-value) item.
    pub fn targeted(transaction: Transaction) -> Self {
        Self {
            transaction,
            classification: SampleClassification::Targeted,
            stratum_index: None,
            selection_method: Self::THRESHOLD_LABEL.to_string(),
            selection_rank: None,
        }
    }

    /// Wraps a transaction as a residual item selected by `method`.
    pub fn residual(transaction: Transaction, method: SamplingMethod, rank: Option<usize>) -> Self {
        Self {
            transaction,
            classification: SampleClassification::Residual,
            stratum_index: None,
            selection_method: method.as_str().to_string(),
            selection_rank: rank,
        }
    }

    /// Tags the item with a stratum index.
    pub fn in_stratum(mut self, index: usize) -> Self {
        self.stratum_index = Some(index);
        self
    }

    /// Identifier of the underlying transaction.
    #[inline]
    pub fn id(&self) -> &str {
        &self.transaction.id
    }
}

/// Amount-bounded partition of the residual population.
///
/// Holds `allocated_sample_size <= transactions.len()` and, when non-empty,
/// `allocated_sample_size >= min(min_sample_size, transactions.len())`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stratum {
    /// Position of the stratum, ascending by amount.
    pub index: usize,
    /// Inclusive lower bound on absolute amount.
    pub lower_bound: f64,
    /// Exclusive upper bound on absolute amount; `None` is unbounded.
    pub upper_bound: Option<f64>,
    /// Member transactions.
    pub transactions: Vec<Transaction>,
    /// Number of items to draw from this stratum.
    pub allocated_sample_size: usize,
    /// Floor requested per stratum.
    pub min_sample_size: usize,
    /// Share of the residual absolute amount held by this stratum.
    pub weight_factor: f64,
}

impl Stratum {
    /// Number of member transactions.
    #[inline]
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// Returns `true` if the stratum has no members.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Effective floor: `min(min_sample_size, len)`.
    #[inline]
    pub fn floor(&self) -> usize {
        self.min_sample_size.min(self.len())
    }

    /// Returns `true` if `|amount|` falls within `[lower_bound, upper_bound)`.
    pub fn contains(&self, amount: f64) -> bool {
        let abs = amount.abs();
        abs >= self.lower_bound && self.upper_bound.map_or(true, |upper| abs < upper)
    }
}

/// Sizing trace recorded for audit documentation.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationTrace {
    /// Base sample size from the sizing formula.
    pub base_n: usize,
    /// Risk multiplier applied to `base_n`.
    pub risk_factor: f64,
    /// `ceil(base_n * risk_factor)`; the size handed to the selection strategy.
    pub final_n: usize,
}

/// Plan-level summary of a sampling run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanSummary {
    /// Final sample size requested from the selection strategy.
    pub recommended_sample_size: usize,
    /// Number of items actually in the sample (targeted plus residual).
    pub actual_sample_size: usize,
    /// Selected absolute amount as a percentage of the population sum.
    pub coverage_percentage: f64,
    /// Selection method.
    pub method: SamplingMethod,
    /// Test type.
    pub test_type: TestType,
    /// Generation timestamp.
    pub generated_at: DateTime<Utc>,
    /// Order-independent fingerprint of the parameters.
    pub param_hash: String,
    /// Seed used for the RNG stream.
    pub seed: u64,
}

/// Three-way sample partition.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SamplePartition {
    /// Items above the threshold.
    pub targeted: Vec<SampleItem>,
    /// Items selected from the residual population.
    pub residual: Vec<SampleItem>,
    /// `targeted` followed by `residual`.
    pub total: Vec<SampleItem>,
}

/// Calculation metadata.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultMetadata {
    /// Absolute threshold used for the split, if any.
    pub threshold: Option<f64>,
    /// Risk matrix in effect.
    pub risk_matrix: RiskMatrix,
    /// Sizing trace.
    pub calculation: CalculationTrace,
}

/// Output of a sampling run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SamplingResult {
    /// Plan summary.
    pub plan: PlanSummary,
    /// Sample partition.
    pub samples: SamplePartition,
    /// Strata detail, present for stratified runs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strata: Option<Vec<Stratum>>,
    /// Calculation metadata.
    pub metadata: ResultMetadata,
    /// Conditions noticed while sampling that the caller should review.
    #[serde(default)]
    pub warnings: Vec<String>,
}

/// Item counts per classification and stratum.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleSummary {
    /// Number of targeted items.
    pub targeted: usize,
    /// Number of residual items.
    pub residual: usize,
    /// Number of items in total.
    pub total: usize,
    /// `(stratum index, items drawn)` for stratified runs.
    pub per_stratum: Vec<(usize, usize)>,
}

impl SamplingResult {
    /// Ordered identifiers of the total sample.
    pub fn total_ids(&self) -> Vec<&str> {
        self.samples.total.iter().map(SampleItem::id).collect()
    }

    /// Counts per classification and per stratum.
    pub fn summary(&self) -> SampleSummary {
        let per_stratum = self
            .strata
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|stratum| {
                let drawn = self
                    .samples
                    .residual
                    .iter()
                    .filter(|item| item.stratum_index == Some(stratum.index))
                    .count();
                (stratum.index, drawn)
            })
            .collect();

        SampleSummary {
            targeted: self.samples.targeted.len(),
            residual: self.samples.residual.len(),
            total: self.samples.total.len(),
            per_stratum,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn tx(id: &str, amount: f64) -> Transaction {
        Transaction::new(id, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(), amount)
    }

    #[test]
    fn test_sample_item_constructors() {
        let targeted = SampleItem::targeted(tx("A", 10_000.0));
        assert_eq!(targeted.classification, SampleClassification::Targeted);
        assert_eq!(targeted.selection_method, "THRESHOLD");

        let residual = SampleItem::residual(tx("B", 5.0), SamplingMethod::Systematic, Some(3))
            .in_stratum(1);
        assert_eq!(residual.classification, SampleClassification::Residual);
        assert_eq!(residual.selection_method, "SYSTEMATIC");
        assert_eq!(residual.selection_rank, Some(3));
        assert_eq!(residual.stratum_index, Some(1));
        assert_eq!(residual.id(), "B");
    }

    #[test]
    fn test_stratum_contains_uses_absolute_amount() {
        let stratum = Stratum {
            index: 0,
            lower_bound: 100.0,
            upper_bound: Some(1_000.0),
            transactions: Vec::new(),
            allocated_sample_size: 0,
            min_sample_size: 2,
            weight_factor: 0.0,
        };
        assert!(stratum.contains(100.0));
        assert!(stratum.contains(-500.0));
        assert!(!stratum.contains(1_000.0));
        assert!(!stratum.contains(99.99));
        assert_eq!(stratum.floor(), 0);
    }

    #[test]
    fn test_unbounded_stratum_serialises_as_null() {
        let stratum = Stratum {
            index: 2,
            lower_bound: 1_000.0,
            upper_bound: None,
            transactions: vec![tx("Z", 5_000.0)],
            allocated_sample_size: 1,
            min_sample_size: 1,
            weight_factor: 1.0,
        };
        let json = serde_json::to_string(&stratum).unwrap();
        assert!(json.contains("\"upperBound\":null"));
        assert!(stratum.contains(f64::MAX));

        let parsed: Stratum = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, stratum);
    }
}
