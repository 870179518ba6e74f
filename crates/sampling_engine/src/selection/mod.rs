//! Selection strategies for the residual population.
//!
//! All strategies draw from a caller-owned [`AuditRng`] and return at most
//! the requested number of distinct items, never more than the population.
//! When the request covers the whole population, the whole population is
//! returned in a seed-dependent order.
//!
//! | Method       | Strategy                 | Rank recorded          |
//! |--------------|--------------------------|------------------------|
//! | `SRS`        | [`SimpleRandom`]         | position after shuffle |
//! | `SYSTEMATIC` | [`Systematic`]           | 1-based draw order     |
//! | `MUS`        | [`MonetaryUnit`]         | 1-based hit order      |
//! | `STRATIFIED` | [`Stratified`]           | position in stratum    |

mod mus;
mod srs;
mod stratified;
mod systematic;

pub use mus::{weighted_amount, MonetaryUnit};
pub use srs::SimpleRandom;
pub use stratified::Stratified;
pub use systematic::Systematic;

use sampling_core::rng::AuditRng;
use sampling_core::types::{SampleItem, SamplingMethod, SamplingParams, Stratum, Transaction};

/// Items chosen by a strategy, with any strata detail and notes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Selection {
    /// Selected residual items, in selection order.
    pub items: Vec<SampleItem>,
    /// Strata detail, for stratified selection.
    pub strata: Option<Vec<Stratum>>,
    /// Conditions the caller should review.
    pub warnings: Vec<String>,
}

impl Selection {
    /// A selection with only items.
    pub fn from_items(items: Vec<SampleItem>) -> Self {
        Self {
            items,
            strata: None,
            warnings: Vec::new(),
        }
    }
}

/// An algorithm that selects items from a residual population.
pub trait SelectionStrategy {
    /// Method label recorded on selected items.
    fn method(&self) -> SamplingMethod;

    /// Selects at most `target` distinct items from `population`.
    fn select(&self, population: &[Transaction], target: usize, rng: &mut AuditRng) -> Selection;
}

/// Returns the whole population in shuffled order, ranked by position.
pub(crate) fn whole_population(
    population: &[Transaction],
    method: SamplingMethod,
    rng: &mut AuditRng,
) -> Vec<SampleItem> {
    let mut order: Vec<usize> = (0..population.len()).collect();
    rng.shuffle(&mut order);
    order
        .into_iter()
        .enumerate()
        .map(|(rank, index)| SampleItem::residual(population[index].clone(), method, Some(rank + 1)))
        .collect()
}

/// Runs the strategy configured by `params.method`.
pub fn select_residual(
    params: &SamplingParams,
    population: &[Transaction],
    target: usize,
    rng: &mut AuditRng,
) -> Selection {
    match params.method {
        SamplingMethod::Srs => SimpleRandom.select(population, target, rng),
        SamplingMethod::Systematic => Systematic.select(population, target, rng),
        SamplingMethod::Mus => MonetaryUnit::new(params.risk_weighting).select(population, target, rng),
        SamplingMethod::Stratified => {
            Stratified::new(params.strata_bounds.clone(), params.min_per_stratum)
                .select(population, target, rng)
        }
    }
}
