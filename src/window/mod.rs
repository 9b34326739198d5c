//! Window primitives: ordered prefix sums and partitioned ranking
//!
//! These replace `SUM(..) OVER (ORDER BY ..)` and
//! `RANK() OVER (PARTITION BY .. ORDER BY .. DESC)` with explicit
//! in-memory algorithms.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::ops::Add;

/// Iterator adapter yielding `(key, running_total)` for each `(key, value)`
///
/// The input must already be sorted by key. Equal keys are not merged: each
/// input element produces one output element, in input order, and the total
/// keeps accumulating across them.
#[derive(Debug, Clone)]
pub struct RunningTotal<I, V> {
    iter: I,
    total: V,
}

impl<I, K, V> Iterator for RunningTotal<I, V>
where
    I: Iterator<Item = (K, V)>,
    V: Copy + Add<Output = V>,
{
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        let (key, value) = self.iter.next()?;
        self.total = self.total + value;
        Some((key, self.total))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<I, K, V> ExactSizeIterator for RunningTotal<I, V>
where
    I: ExactSizeIterator<Item = (K, V)>,
    V: Copy + Add<Output = V>,
{
}

/// Lazy ordered prefix sum over `(key, value)` pairs
pub fn prefix_sum<I, K, V>(items: I) -> RunningTotal<I::IntoIter, V>
where
    I: IntoIterator<Item = (K, V)>,
    V: Copy + Default + Add<Output = V>,
{
    RunningTotal {
        iter: items.into_iter(),
        total: V::default(),
    }
}

/// Competition ranks ("1224" ranking) for metrics sorted best-first
///
/// Equal neighbours share a rank; the next distinct value takes its
/// 1-based position, so `[9, 9, 7]` ranks as `[1, 1, 3]`.
pub fn competition_ranks<M: PartialEq>(sorted_metrics: &[M]) -> Vec<usize> {
    let mut ranks = Vec::with_capacity(sorted_metrics.len());
    for (position, metric) in sorted_metrics.iter().enumerate() {
        let rank = match position.checked_sub(1) {
            Some(prev) if sorted_metrics[prev] == *metric => ranks[prev],
            _ => position + 1,
        };
        ranks.push(rank);
    }
    ranks
}

/// A row annotated with its rank inside its partition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ranked<T> {
    pub rank: usize,
    pub row: T,
}

/// Rank rows within partitions by a metric, descending, keeping `rank <= max_rank`
///
/// Rows sharing a metric value share a rank. `tie_break` only orders rows
/// with equal metrics; it never affects the rank. Partitions are emitted in
/// ascending key order, each sorted by (rank, tie_break).
pub fn partitioned_rank<T, P, M, PF, MF, TB>(
    rows: impl IntoIterator<Item = T>,
    partition_key: PF,
    metric: MF,
    tie_break: TB,
    max_rank: usize,
) -> Vec<Ranked<T>>
where
    P: Ord,
    M: Ord,
    PF: Fn(&T) -> P,
    MF: Fn(&T) -> M,
    TB: Fn(&T, &T) -> Ordering,
{
    let mut partitions: BTreeMap<P, Vec<T>> = BTreeMap::new();
    for row in rows {
        partitions.entry(partition_key(&row)).or_default().push(row);
    }

    let mut ranked = Vec::new();
    for (_, mut members) in partitions {
        members.sort_by(|a, b| metric(b).cmp(&metric(a)).then_with(|| tie_break(a, b)));

        let metrics: Vec<M> = members.iter().map(&metric).collect();
        let ranks = competition_ranks(&metrics);

        ranked.extend(
            members
                .into_iter()
                .zip(ranks)
                .filter(|(_, rank)| *rank <= max_rank)
                .map(|(row, rank)| Ranked { rank, row }),
        );
    }
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_prefix_sum_accumulates() {
        let totals: Vec<_> = prefix_sum(vec![("a", 1), ("b", 2), ("c", 3)]).collect();
        assert_eq!(totals, vec![("a", 1), ("b", 3), ("c", 6)]);
    }

    #[test]
    fn test_prefix_sum_duplicate_keys_keep_order() {
        let totals: Vec<_> = prefix_sum(vec![(1, 5), (1, 7), (2, 1)]).collect();
        assert_eq!(totals, vec![(1, 5), (1, 12), (2, 13)]);
    }

    #[test]
    fn test_prefix_sum_empty() {
        let totals: Vec<(u8, i32)> = prefix_sum(Vec::new()).collect();
        assert!(totals.is_empty());
    }

    #[test]
    fn test_prefix_sum_is_restartable_by_clone() {
        let scan = prefix_sum(vec![(1, 2), (2, 2)]);
        let first: Vec<_> = scan.clone().collect();
        let second: Vec<_> = scan.collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_competition_ranks() {
        assert_eq!(competition_ranks(&[9, 9, 7, 5, 5, 5, 1]), vec![1, 1, 3, 4, 4, 4, 7]);
        assert_eq!(competition_ranks::<i32>(&[]), Vec::<usize>::new());
        assert_eq!(competition_ranks(&[3]), vec![1]);
    }

    #[test]
    fn test_partitioned_rank_filters_by_rank() {
        let rows = vec![
            ("veggie", "Garden", 30),
            ("classic", "Pepperoni", 50),
            ("veggie", "Mushroom", 40),
            ("classic", "Hawaiian", 50),
            ("classic", "Greek", 20),
            ("veggie", "Spinach", 10),
        ];

        let ranked = partitioned_rank(rows, |r| r.0, |r| r.2, |a, b| a.1.cmp(b.1), 2);
        let flat: Vec<_> = ranked.iter().map(|r| (r.row.0, r.row.1, r.rank)).collect();

        assert_eq!(
            flat,
            vec![
                ("classic", "Hawaiian", 1),
                ("classic", "Pepperoni", 1),
                ("veggie", "Mushroom", 1),
                ("veggie", "Garden", 2),
            ]
        );
    }

    #[test]
    fn test_partitioned_rank_skips_after_ties() {
        let rows = vec![("a", 5), ("a", 5), ("a", 4)];
        let ranked = partitioned_rank(rows, |_| (), |r| r.1, |_, _| Ordering::Equal, 3);
        let ranks: Vec<_> = ranked.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 1, 3]);
    }

    proptest! {
        #[test]
        fn test_prefix_sum_non_decreasing_for_non_negative(
            values in prop::collection::vec(0u64..10_000, 0..200),
        ) {
            let totals: Vec<u64> = prefix_sum(values.iter().copied().enumerate())
                .map(|(_, total)| total)
                .collect();

            prop_assert_eq!(totals.len(), values.len());
            prop_assert!(totals.windows(2).all(|w| w[0] <= w[1]));
            prop_assert_eq!(totals.last().copied().unwrap_or(0), values.iter().sum::<u64>());
        }

        #[test]
        fn test_ranks_are_non_decreasing_and_bounded(
            mut values in prop::collection::vec(0u32..20, 1..100),
        ) {
            values.sort_by(|a, b| b.cmp(a));
            let ranks = competition_ranks(&values);

            prop_assert_eq!(ranks[0], 1);
            for (i, rank) in ranks.iter().enumerate() {
                prop_assert!(*rank >= 1 && *rank <= i + 1);
            }
            prop_assert!(ranks.windows(2).all(|w| w[0] <= w[1]));
        }
    }
}
