//! Stratified selection: allocate per stratum, then SRS inside each.

use sampling_core::rng::AuditRng;
use sampling_core::types::{SamplingMethod, Transaction};
use tracing::debug;

use super::srs::SimpleRandom;
use super::{Selection, SelectionStrategy};
use crate::stratification::{allocate, build_strata, normalise_bounds};

/// Amount-stratified sampling.
///
/// Without usable bounds this degrades to plain SRS over the whole
/// population; items are then labelled `SRS` and no strata are reported.
///
/// Every non-empty stratum keeps its floor `min(min_per_stratum, len)`. When
/// the floors add up to more than `target`, all floors are drawn, so the
/// selection holds more than `target` items and a warning is returned.
#[derive(Clone, Debug, Default)]
pub struct Stratified {
    bounds: Vec<f64>,
    min_per_stratum: usize,
}

impl Stratified {
    /// Creates a strategy over the given amount bounds.
    pub fn new(bounds: Vec<f64>, min_per_stratum: usize) -> Self {
        Self {
            bounds,
            min_per_stratum,
        }
    }
}

impl SelectionStrategy for Stratified {
    fn method(&self) -> SamplingMethod {
        SamplingMethod::Stratified
    }

    fn select(&self, population: &[Transaction], target: usize, rng: &mut AuditRng) -> Selection {
        if normalise_bounds(&self.bounds).is_empty() {
            debug!("no usable strata bounds; falling back to SRS");
            return SimpleRandom.select(population, target, rng);
        }

        let strata = build_strata(population, &self.bounds, self.min_per_stratum);
        let allocation = allocate(strata, target);

        let mut items = Vec::with_capacity(allocation.total_allocated);
        for stratum in allocation.strata.iter().filter(|s| !s.is_empty()) {
            let drawn = SimpleRandom::draw(
                &stratum.transactions,
                stratum.allocated_sample_size,
                self.method(),
                rng,
            );
            debug!(
                stratum = stratum.index,
                members = stratum.len(),
                allocated = stratum.allocated_sample_size,
                "stratum sampled"
            );
            items.extend(drawn.into_iter().map(|item| item.in_stratum(stratum.index)));
        }

        Selection {
            items,
            strata: Some(allocation.strata),
            warnings: allocation.warnings,
        }
    }
}
