//! Simple random sampling.

use sampling_core::rng::AuditRng;
use sampling_core::types::{SampleItem, SamplingMethod, Transaction};

use super::{whole_population, Selection, SelectionStrategy};

/// Full pseudo-random shuffle, then the first `target` items.
#[derive(Copy, Clone, Debug, Default)]
pub struct SimpleRandom;

impl SimpleRandom {
    /// Selects indices of `population` and wraps them as items of `method`.
    ///
    /// Shared with the stratified strategy, which labels its items
    /// differently.
    pub(crate) fn draw(
        population: &[Transaction],
        target: usize,
        method: SamplingMethod,
        rng: &mut AuditRng,
    ) -> Vec<SampleItem> {
        if target == 0 || population.is_empty() {
            return Vec::new();
        }
        if target >= population.len() {
            return whole_population(population, method, rng);
        }

        let mut order: Vec<usize> = (0..population.len()).collect();
        rng.shuffle(&mut order);
        order
            .into_iter()
            .take(target)
            .enumerate()
            .map(|(rank, index)| {
                SampleItem::residual(population[index].clone(), method, Some(rank + 1))
            })
            .collect()
    }
}

impl SelectionStrategy for SimpleRandom {
    fn method(&self) -> SamplingMethod {
        SamplingMethod::Srs
    }

    fn select(&self, population: &[Transaction], target: usize, rng: &mut AuditRng) -> Selection {
        Selection::from_items(Self::draw(population, target, self.method(), rng))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{assert_distinct, ids, population};
    use super::*;

    #[test]
    fn test_selects_exactly_target_distinct_items() {
        let population = population(&[1.0; 100]);
        let mut rng = AuditRng::from_seed(42);
        let selection = SimpleRandom.select(&population, 25, &mut rng);

        assert_eq!(selection.items.len(), 25);
        assert_distinct(&selection.items);
        assert!(selection.items.iter().all(|item| item.selection_method == "SRS"));
        let ranks: Vec<usize> = selection.items.iter().filter_map(|i| i.selection_rank).collect();
        assert_eq!(ranks, (1..=25).collect::<Vec<_>>());
    }

    #[test]
    fn test_deterministic_per_seed() {
        let population = population(&[1.0; 100]);
        let a = SimpleRandom.select(&population, 10, &mut AuditRng::from_seed(7));
        let b = SimpleRandom.select(&population, 10, &mut AuditRng::from_seed(7));
        let c = SimpleRandom.select(&population, 10, &mut AuditRng::from_seed(8));
        assert_eq!(ids(&a.items), ids(&b.items));
        assert_ne!(ids(&a.items), ids(&c.items));
    }

    #[test]
    fn test_target_above_population_returns_everything() {
        let population = population(&[1.0, 2.0, 3.0]);
        let selection = SimpleRandom.select(&population, 10, &mut AuditRng::from_seed(1));
        let mut selected = ids(&selection.items);
        selected.sort();
        assert_eq!(selected, vec!["T0000", "T0001", "T0002"]);
    }

    #[test]
    fn test_zero_target_and_empty_population() {
        let mut rng = AuditRng::from_seed(1);
        assert!(SimpleRandom.select(&population(&[1.0]), 0, &mut rng).items.is_empty());
        assert!(SimpleRandom.select(&[], 5, &mut rng).items.is_empty());
    }
}
