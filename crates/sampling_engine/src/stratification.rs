//! Amount strata and proportional sample allocation.
//!
//! ## Strata
//!
//! Bounds are sorted ascending and implicitly extended with 0 and +∞, so
//! `k` bounds produce `k + 1` strata `[b_i, b_{i+1})` over absolute amounts.
//!
//! ## Allocation
//!
//! 1. Each stratum first receives its floor `min(minPerStratum, size)`.
//! 2. The remainder is shared in proportion to each stratum's share of the
//!    total absolute amount, rounded to the nearest integer and capped at the
//!    stratum's remaining capacity.
//! 3. Rounding drift is reconciled one item at a time in ascending stratum
//!    order: under-allocation increments strata with spare capacity,
//!    over-allocation decrements strata above their floor, cycling until the
//!    allocated total matches.
//!
//! Allocation is a pure function: it consumes a stratum list and returns a
//! new one.

use sampling_core::types::{Stratum, Transaction};

/// Strata after allocation, with notes for the result.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Allocation {
    /// Strata with `allocated_sample_size` set.
    pub strata: Vec<Stratum>,
    /// Number of items allocated in total.
    pub total_allocated: usize,
    /// Conditions the caller should review.
    pub warnings: Vec<String>,
}

/// Sorts, de-duplicates and drops non-positive or non-finite bounds.
pub fn normalise_bounds(bounds: &[f64]) -> Vec<f64> {
    let mut normalised: Vec<f64> = bounds
        .iter()
        .copied()
        .filter(|bound| bound.is_finite() && *bound > 0.0)
        .collect();
    normalised.sort_by(f64::total_cmp);
    normalised.dedup();
    normalised
}

/// Partitions `population` into amount strata with zero allocation.
///
/// Every transaction lands in exactly one stratum; the result always holds
/// `bounds.len() + 1` strata after normalisation, some possibly empty.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use sampling_engine::stratification::build_strata;
/// use sampling_engine::types::Transaction;
///
/// let date = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
/// let population: Vec<Transaction> = [50.0, 500.0, -5_000.0]
///     .iter()
///     .enumerate()
///     .map(|(i, &a)| Transaction::new(format!("T{}", i), date, a))
///     .collect();
///
/// let strata = build_strata(&population, &[100.0, 1_000.0], 1);
/// assert_eq!(strata.len(), 3);
/// assert_eq!(strata[2].transactions[0].id, "T2");
/// assert_eq!(strata[2].upper_bound, None);
/// ```
pub fn build_strata(population: &[Transaction], bounds: &[f64], min_per_stratum: usize) -> Vec<Stratum> {
    let bounds = normalise_bounds(bounds);

    let mut members: Vec<Vec<Transaction>> = vec![Vec::new(); bounds.len() + 1];
    for tx in population {
        let abs = tx.absolute_amount();
        let index = bounds.partition_point(|&bound| bound <= abs);
        members[index].push(tx.clone());
    }

    let total_amount: f64 = population.iter().map(Transaction::absolute_amount).sum();

    members
        .into_iter()
        .enumerate()
        .map(|(index, transactions)| {
            let amount: f64 = transactions.iter().map(Transaction::absolute_amount).sum();
            Stratum {
                index,
                lower_bound: if index == 0 { 0.0 } else { bounds[index - 1] },
                upper_bound: bounds.get(index).copied(),
                transactions,
                allocated_sample_size: 0,
                min_sample_size: min_per_stratum,
                weight_factor: if total_amount > 0.0 {
                    amount / total_amount
                } else {
                    0.0
                },
            }
        })
        .collect()
}

/// Distributes `total_sample_size` across `strata`.
///
/// The allocated total equals `min(total_sample_size, population)` unless
/// the floors alone exceed it, in which case every floor is kept and the
/// allocated total is the sum of floors (reported as a warning).
///
/// Guarantees for every stratum `floor <= allocated <= len`.
pub fn allocate(strata: Vec<Stratum>, total_sample_size: usize) -> Allocation {
    let mut strata = strata;
    let mut warnings = Vec::new();

    let capacity: usize = strata.iter().map(Stratum::len).sum();
    let floors: Vec<usize> = strata.iter().map(Stratum::floor).collect();
    let floor_total: usize = floors.iter().sum();

    let mut target = total_sample_size.min(capacity);
    if floor_total > target {
        warnings.push(format!(
            "Minimum per stratum requires {} items, above the requested sample size of {}",
            floor_total, target
        ));
        target = floor_total;
    }

    let mut allocated = floors.clone();
    let remainder = target - floor_total;

    if remainder > 0 {
        let amounts: Vec<f64> = strata
            .iter()
            .map(|s| s.transactions.iter().map(Transaction::absolute_amount).sum())
            .collect();
        let amount_total: f64 = amounts.iter().sum();

        // Without any monetary weight, share by spare capacity instead.
        let weights: Vec<f64> = if amount_total > 0.0 && amount_total.is_finite() {
            amounts
        } else {
            strata
                .iter()
                .zip(&floors)
                .map(|(s, floor)| (s.len() - floor) as f64)
                .collect()
        };
        let weight_total: f64 = weights.iter().sum();

        if weight_total > 0.0 {
            for (i, stratum) in strata.iter().enumerate() {
                let share = (remainder as f64 * weights[i] / weight_total).round() as usize;
                allocated[i] += share.min(stratum.len() - allocated[i]);
            }
        }
    }

    reconcile(&strata, &floors, &mut allocated, target);

    for (stratum, size) in strata.iter_mut().zip(&allocated) {
        stratum.allocated_sample_size = *size;
    }

    Allocation {
        strata,
        total_allocated: allocated.iter().sum(),
        warnings,
    }
}

/// Moves the allocated total to `target` one item at a time, ascending index.
fn reconcile(strata: &[Stratum], floors: &[usize], allocated: &mut [usize], target: usize) {
    let mut total: usize = allocated.iter().sum();

    while total < target {
        let before = total;
        for (i, stratum) in strata.iter().enumerate() {
            if total == target {
                break;
            }
            if allocated[i] < stratum.len() {
                allocated[i] += 1;
                total += 1;
            }
        }
        if total == before {
            break;
        }
    }

    while total > target {
        let before = total;
        for i in 0..strata.len() {
            if total == target {
                break;
            }
            if allocated[i] > floors[i] {
                allocated[i] -= 1;
                total -= 1;
            }
        }
        if total == before {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn population(amounts: &[f64]) -> Vec<Transaction> {
        let date = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        amounts
            .iter()
            .enumerate()
            .map(|(i, &amount)| Transaction::new(format!("T{:04}", i), date, amount))
            .collect()
    }

    fn sizes(allocation: &Allocation) -> Vec<usize> {
        allocation
            .strata
            .iter()
            .map(|s| s.allocated_sample_size)
            .collect()
    }

    #[test]
    fn test_normalise_bounds() {
        assert_eq!(
            normalise_bounds(&[1_000.0, 100.0, 100.0, -1.0, f64::INFINITY, 0.0]),
            vec![100.0, 1_000.0]
        );
    }

    #[test]
    fn test_build_strata_bounds_and_weights() {
        let strata = build_strata(&population(&[10.0, 90.0, 100.0, 900.0]), &[100.0], 2);
        assert_eq!(strata.len(), 2);
        assert_eq!(strata[0].lower_bound, 0.0);
        assert_eq!(strata[0].upper_bound, Some(100.0));
        assert_eq!(strata[1].lower_bound, 100.0);
        assert_eq!(strata[0].len(), 2);
        assert_eq!(strata[1].len(), 2);
        assert!((strata[0].weight_factor - 0.1).abs() < 1e-12);
        assert!((strata[1].weight_factor - 0.9).abs() < 1e-12);
        assert!(strata.iter().all(|s| s.min_sample_size == 2));
    }

    #[test]
    fn test_build_strata_without_bounds_is_single_stratum() {
        let strata = build_strata(&population(&[1.0, 2.0]), &[], 0);
        assert_eq!(strata.len(), 1);
        assert_eq!(strata[0].upper_bound, None);
        assert_eq!(strata[0].len(), 2);
    }

    #[test]
    fn test_allocation_proportional_to_amount() {
        // 10 items of 10 and 10 items of 90: remainder split 10% / 90%.
        let mut amounts = vec![10.0; 10];
        amounts.extend(vec![90.0; 10]);
        let strata = build_strata(&population(&amounts), &[50.0], 0);
        let allocation = allocate(strata, 10);
        assert_eq!(sizes(&allocation), vec![1, 9]);
        assert_eq!(allocation.total_allocated, 10);
    }

    #[test]
    fn test_floor_applied_first() {
        let mut amounts = vec![1.0; 10];
        amounts.extend(vec![1_000.0; 10]);
        let strata = build_strata(&population(&amounts), &[500.0], 3);
        let allocation = allocate(strata, 10);
        // Floors 3 + 3, remainder 4 almost entirely to the high stratum.
        assert_eq!(sizes(&allocation), vec![3, 7]);
    }

    #[test]
    fn test_capacity_caps_proportional_share() {
        // High stratum has one item but nearly all amount; overflow goes to index 0.
        let mut amounts = vec![1.0; 20];
        amounts.push(1_000_000.0);
        let strata = build_strata(&population(&amounts), &[100.0], 0);
        let allocation = allocate(strata, 5);
        assert_eq!(sizes(&allocation), vec![4, 1]);
    }

    /// Three strata with equal absolute totals: 5 × 4 | 2 × 10 | 1 × 20.
    fn equal_thirds() -> Vec<Stratum> {
        let amounts = [4.0, 4.0, 4.0, 4.0, 4.0, 10.0, 10.0, 20.0];
        build_strata(&population(&amounts), &[8.0, 15.0], 0)
    }

    #[test]
    fn test_over_allocation_reconciled_by_ascending_index() {
        // Remainder 2 → 0.67 each rounds to 1, 1, 1; the extra item is
        // taken back from stratum 0 first.
        assert_eq!(sizes(&allocate(equal_thirds(), 2)), vec![0, 1, 1]);

        // Remainder 1 over two equal halves → 0.5 rounds up twice.
        let halves = build_strata(&population(&[10.0, 10.0, 20.0]), &[15.0], 0);
        assert_eq!(sizes(&allocate(halves, 1)), vec![0, 1]);
    }

    #[test]
    fn test_under_allocation_reconciled_by_ascending_index() {
        // Remainder 1 → 0.33 each rounds to 0; the missing item goes to stratum 0.
        assert_eq!(sizes(&allocate(equal_thirds(), 1)), vec![1, 0, 0]);
        // Remainder 4 → 1.33 each rounds to 1; stratum 0 absorbs the drift.
        assert_eq!(sizes(&allocate(equal_thirds(), 4)), vec![2, 1, 1]);
    }

    #[test]
    fn test_floors_exceeding_request_are_kept() {
        let strata = build_strata(&population(&[1.0, 2.0, 200.0, 300.0]), &[100.0], 2);
        let allocation = allocate(strata, 1);
        assert_eq!(sizes(&allocation), vec![2, 2]);
        assert_eq!(allocation.total_allocated, 4);
        assert_eq!(allocation.warnings.len(), 1);
    }

    #[test]
    fn test_request_above_population_capped() {
        let strata = build_strata(&population(&[1.0, 2.0, 200.0]), &[100.0], 0);
        let allocation = allocate(strata, 50);
        assert_eq!(sizes(&allocation), vec![2, 1]);
    }

    #[test]
    fn test_zero_amounts_share_by_capacity() {
        let strata = build_strata(&population(&[0.0, 0.0, 0.0, 0.0]), &[10.0], 0);
        let allocation = allocate(strata, 2);
        assert_eq!(allocation.total_allocated, 2);
        assert_eq!(sizes(&allocation), vec![2, 0]);
    }

    #[test]
    fn test_empty_strata_receive_nothing() {
        let strata = build_strata(&population(&[5.0, 6.0, 7.0]), &[100.0, 1_000.0], 4);
        let allocation = allocate(strata, 2);
        assert_eq!(sizes(&allocation), vec![3, 0, 0]);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(300))]

            #[test]
            fn test_allocation_invariants(
                amounts in prop::collection::vec(-1e5f64..1e5, 0..300),
                bounds in prop::collection::vec(1.0f64..1e5, 0..6),
                min_per_stratum in 0usize..10,
                total in 0usize..400
            ) {
                let population = population(&amounts);
                let allocation = allocate(build_strata(&population, &bounds, min_per_stratum), total);

                let floor_total: usize = allocation.strata.iter().map(Stratum::floor).sum();
                let expected = total.min(population.len()).max(floor_total);
                let allocated: usize = allocation.strata.iter().map(|s| s.allocated_sample_size).sum();

                prop_assert_eq!(allocated, expected);
                prop_assert_eq!(allocation.total_allocated, expected);
                for stratum in &allocation.strata {
                    prop_assert!(stratum.allocated_sample_size <= stratum.len());
                    prop_assert!(stratum.allocated_sample_size >= stratum.floor());
                }

                let members: usize = allocation.strata.iter().map(Stratum::len).sum();
                prop_assert_eq!(members, population.len());
            }
        }
    }
}
