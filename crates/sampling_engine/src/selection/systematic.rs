//! Systematic selection at a fixed interval from a random start.

use sampling_core::rng::AuditRng;
use sampling_core::types::{SampleItem, SamplingMethod, Transaction};

use super::{Selection, SelectionStrategy};

/// Every `floor(N / target)`-th item, starting at a random offset.
#[derive(Copy, Clone, Debug, Default)]
pub struct Systematic;

impl SelectionStrategy for Systematic {
    fn method(&self) -> SamplingMethod {
        SamplingMethod::Systematic
    }

    fn select(&self, population: &[Transaction], target: usize, rng: &mut AuditRng) -> Selection {
        let len = population.len();
        if target == 0 || len == 0 {
            return Selection::default();
        }

        // Covering the population: rotate it so that the order still
        // depends on the seed.
        if target >= len {
            let start = rng.gen_index(len);
            let items = (0..len)
                .map(|k| {
                    let index = (start + k) % len;
                    SampleItem::residual(population[index].clone(), self.method(), Some(k + 1))
                })
                .collect();
            return Selection::from_items(items);
        }

        let interval = len / target;
        let start = rng.gen_index(interval);
        let items = (0..target)
            .map(|k| {
                let index = (start + k * interval) % len;
                SampleItem::residual(population[index].clone(), self.method(), Some(k + 1))
            })
            .collect();
        Selection::from_items(items)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{assert_distinct, population};
    use super::*;

    #[test]
    fn test_items_are_evenly_spaced() {
        let population = population(&[1.0; 100]);
        let selection = Systematic.select(&population, 10, &mut AuditRng::from_seed(3));

        assert_eq!(selection.items.len(), 10);
        assert_distinct(&selection.items);

        let positions: Vec<usize> = selection
            .items
            .iter()
            .map(|item| population.iter().position(|tx| tx.id == item.id()).unwrap())
            .collect();
        assert!(positions[0] < 10);
        assert!(positions.windows(2).all(|w| w[1] - w[0] == 10));
        assert!(selection.items.iter().all(|item| item.selection_method == "SYSTEMATIC"));
    }

    #[test]
    fn test_uneven_interval_stays_in_range() {
        let population = population(&[1.0; 17]);
        for seed in 1..50 {
            let selection = Systematic.select(&population, 5, &mut AuditRng::from_seed(seed));
            assert_eq!(selection.items.len(), 5);
            assert_distinct(&selection.items);
        }
    }

    #[test]
    fn test_ranks_follow_draw_order() {
        let population = population(&[1.0; 30]);
        let selection = Systematic.select(&population, 6, &mut AuditRng::from_seed(9));
        let ranks: Vec<usize> = selection.items.iter().filter_map(|i| i.selection_rank).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_target_covering_population_rotates() {
        let population = population(&[1.0; 8]);
        let selection = Systematic.select(&population, 8, &mut AuditRng::from_seed(11));
        assert_eq!(selection.items.len(), 8);
        assert_distinct(&selection.items);
    }
}
