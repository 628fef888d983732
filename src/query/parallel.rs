//! Parallel aggregation and grouping
//!
//! Records are split into contiguous chunks, each chunk is reduced
//! independently, and partial results are merged:
//! - aggregates merge `Accumulator`s, average is sum / count after merge
//! - groups merge by appending members chunk by chunk, so each group
//!   keeps source order

use std::collections::HashMap;
use std::hash::Hash;

use rayon::prelude::*;

use super::aggregate::{Accumulator, Aggregate, AggregateOp};
use super::engine::{Groups, RecordQuery};

/// Chunk length giving each worker roughly one chunk
fn chunk_len(total: usize) -> usize {
    let workers = rayon::current_num_threads().max(1);
    total.div_ceil(workers).max(1)
}

pub fn par_aggregate<T, F>(records: &[T], value: F, op: AggregateOp) -> Aggregate
where
    T: Sync,
    F: Fn(&T) -> f64 + Sync + Send,
{
    records
        .par_iter()
        .fold(Accumulator::new, |mut acc, r| {
            acc.push(value(r));
            acc
        })
        .reduce(Accumulator::new, Accumulator::merge)
        .finish(op)
}

pub fn par_group_by<T, K, F>(records: &[T], key: F) -> Groups<K, T>
where
    T: Clone + Send + Sync,
    K: Eq + Hash + Send,
    F: Fn(&T) -> K + Sync + Send,
{
    // Indexed collect keeps chunk order
    let partials: Vec<Groups<K, T>> = records
        .par_chunks(chunk_len(records.len()))
        .map(|chunk| {
            let mut groups: Groups<K, T> = HashMap::new();
            for record in chunk {
                groups.entry(key(record)).or_default().push(record.clone());
            }
            groups
        })
        .collect();

    let mut merged: Groups<K, T> = HashMap::new();
    for partial in partials {
        for (k, members) in partial {
            merged.entry(k).or_default().extend(members);
        }
    }
    merged
}

pub fn par_group_aggregate<T, K, FK, FV>(
    records: &[T],
    key: FK,
    value: FV,
    op: AggregateOp,
) -> HashMap<K, Aggregate>
where
    T: Sync,
    K: Eq + Hash + Send,
    FK: Fn(&T) -> K + Sync + Send,
    FV: Fn(&T) -> f64 + Sync + Send,
{
    records
        .par_iter()
        .fold(HashMap::new, |mut accs: HashMap<K, Accumulator>, r| {
            accs.entry(key(r)).or_default().push(value(r));
            accs
        })
        .reduce(HashMap::new, merge_accumulators)
        .into_iter()
        .map(|(k, acc)| (k, acc.finish(op)))
        .collect()
}

fn merge_accumulators<K: Eq + Hash>(
    mut left: HashMap<K, Accumulator>,
    right: HashMap<K, Accumulator>,
) -> HashMap<K, Accumulator> {
    for (k, acc) in right {
        let slot = left.entry(k).or_default();
        *slot = slot.merge(acc);
    }
    left
}

impl<T: Sync> RecordQuery<T> {
    /// Parallel `aggregate`; equal to it within floating-point rounding
    pub fn par_aggregate<F>(&self, value: F, op: AggregateOp) -> Aggregate
    where
        F: Fn(&T) -> f64 + Sync + Send,
    {
        par_aggregate(self.as_slice(), value, op)
    }

    /// Parallel `group_by_aggregate`
    pub fn par_group_aggregate<K, FK, FV>(
        &self,
        key: FK,
        value: FV,
        op: AggregateOp,
    ) -> HashMap<K, Aggregate>
    where
        K: Eq + Hash + Send,
        FK: Fn(&T) -> K + Sync + Send,
        FV: Fn(&T) -> f64 + Sync + Send,
    {
        par_group_aggregate(self.as_slice(), key, value, op)
    }
}

impl<T: Clone + Send + Sync> RecordQuery<T> {
    /// Parallel `group_by`, same groups in the same member order
    pub fn par_group_by<K, F>(&self, key: F) -> Groups<K, T>
    where
        K: Eq + Hash + Send,
        F: Fn(&T) -> K + Sync + Send,
    {
        par_group_by(self.as_slice(), key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::sample_employees;

    #[test]
    fn test_par_sum_matches_sequential() {
        let q = RecordQuery::new(sample_employees());
        let seq = q.aggregate(|e| e.salary(), AggregateOp::Sum).value().unwrap();
        let par = q.par_aggregate(|e| e.salary(), AggregateOp::Sum).value().unwrap();
        assert!((seq - par).abs() < 1e-6);
    }

    #[test]
    fn test_par_average_is_sum_over_count() {
        // Uneven chunks would skew an average of averages
        let values: Vec<f64> = (1..=1001).map(f64::from).collect();
        let q = RecordQuery::new(values);
        let avg = q.par_aggregate(|v| *v, AggregateOp::Average).value().unwrap();
        assert!((avg - 501.0).abs() < 1e-9);
    }

    #[test]
    fn test_par_empty_is_absent() {
        let q: RecordQuery<f64> = RecordQuery::new(Vec::new());
        assert!(q.par_aggregate(|v| *v, AggregateOp::Max).is_absent());
        assert_eq!(q.par_aggregate(|v| *v, AggregateOp::Count), Aggregate::Count(0));
    }

    #[test]
    fn test_par_group_by_preserves_member_order() {
        let values: Vec<u32> = (0..500).collect();
        let q = RecordQuery::new(values);
        let par = q.par_group_by(|v| v % 7);
        let seq = q.group_by(|v| v % 7);
        assert_eq!(par, seq);
    }

    #[test]
    fn test_par_group_aggregate_counts() {
        let q = RecordQuery::new(sample_employees());
        let counts = q.par_group_aggregate(
            |e| e.gender().to_string(),
            |e| e.salary(),
            AggregateOp::Count,
        );
        assert_eq!(counts["Male"], Aggregate::Count(5));
        assert_eq!(counts["Female"], Aggregate::Count(5));
    }
}
