//! Record query engine
//!
//! `RecordQuery` wraps an ordered snapshot of records. Every operation
//! borrows the query and returns a new derived value; the snapshot is
//! never mutated.
//!
//! Ordering guarantees:
//! - filter, project, distinct, limit and partition preserve source order
//! - sort is stable
//! - group iteration order is unspecified, but each group keeps source order

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use rayon::prelude::*;

use crate::model::{FieldValue, Record};

use super::aggregate::{Accumulator, Aggregate, AggregateOp, SummaryStatistics};
use super::errors::{QueryError, QueryResult};
use super::filters::{ensure_field, FieldPredicate};
use super::sorter::{self, SortDirection, SortSpec};

/// Groups keyed by `K`, each in source order
pub type Groups<K, T> = HashMap<K, Vec<T>>;

/// An immutable, ordered sequence of records
#[derive(Debug, Clone, PartialEq)]
pub struct RecordQuery<T> {
    records: Vec<T>,
}

impl<T> RecordQuery<T> {
    pub fn new(records: Vec<T>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Same as `len`, as a terminal count
    pub fn count(&self) -> usize {
        self.records.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.records.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.records
    }

    pub fn into_vec(self) -> Vec<T> {
        self.records
    }

    /// Maps each record to a derived value
    pub fn project<U, F>(&self, f: F) -> RecordQuery<U>
    where
        F: Fn(&T) -> U,
    {
        RecordQuery::new(self.records.iter().map(f).collect())
    }

    /// First record in source order satisfying the predicate
    pub fn find_first<P>(&self, predicate: P) -> Option<&T>
    where
        P: Fn(&T) -> bool,
    {
        self.records.iter().find(|r| predicate(r))
    }

    /// Some record satisfying the predicate, not necessarily the first.
    ///
    /// Searches in parallel and returns whichever match is found first.
    pub fn find_any<P>(&self, predicate: P) -> Option<&T>
    where
        T: Sync,
        P: Fn(&T) -> bool + Sync + Send,
    {
        self.records.par_iter().find_any(|r| predicate(r))
    }

    /// True for empty input
    pub fn all_match<P>(&self, predicate: P) -> bool
    where
        P: Fn(&T) -> bool,
    {
        self.records.iter().all(predicate)
    }

    /// False for empty input
    pub fn any_match<P>(&self, predicate: P) -> bool
    where
        P: Fn(&T) -> bool,
    {
        self.records.iter().any(predicate)
    }

    /// True for empty input
    pub fn none_match<P>(&self, predicate: P) -> bool
    where
        P: Fn(&T) -> bool,
    {
        !self.records.iter().any(predicate)
    }

    /// Reduces a numeric projection.
    ///
    /// Average, min and max over no records are `Aggregate::Absent`.
    pub fn aggregate<F>(&self, value: F, op: AggregateOp) -> Aggregate
    where
        F: Fn(&T) -> f64,
    {
        self.accumulate(value).finish(op)
    }

    /// Count, sum, min, max and average of a numeric projection
    pub fn summary<F>(&self, value: F) -> SummaryStatistics
    where
        F: Fn(&T) -> f64,
    {
        self.accumulate(value).summary()
    }

    fn accumulate<F>(&self, value: F) -> Accumulator
    where
        F: Fn(&T) -> f64,
    {
        self.records.iter().map(value).collect()
    }

    /// Reduces each group instead of materializing it
    pub fn group_by_aggregate<K, FK, FV>(
        &self,
        key: FK,
        value: FV,
        op: AggregateOp,
    ) -> HashMap<K, Aggregate>
    where
        K: Eq + Hash,
        FK: Fn(&T) -> K,
        FV: Fn(&T) -> f64,
    {
        let mut accumulators: HashMap<K, Accumulator> = HashMap::new();
        for record in &self.records {
            accumulators
                .entry(key(record))
                .or_default()
                .push(value(record));
        }
        accumulators
            .into_iter()
            .map(|(k, acc)| (k, acc.finish(op)))
            .collect()
    }

    /// Number of records per group
    pub fn group_count<K, FK>(&self, key: FK) -> HashMap<K, u64>
    where
        K: Eq + Hash,
        FK: Fn(&T) -> K,
    {
        let mut counts: HashMap<K, u64> = HashMap::new();
        for record in &self.records {
            *counts.entry(key(record)).or_insert(0) += 1;
        }
        counts
    }
}

impl<T: Clone> RecordQuery<T> {
    /// Keeps records satisfying the predicate, in source order
    pub fn filter<P>(&self, predicate: P) -> RecordQuery<T>
    where
        P: Fn(&T) -> bool,
    {
        RecordQuery::new(
            self.records
                .iter()
                .filter(|r| predicate(r))
                .cloned()
                .collect(),
        )
    }

    /// Stable sort by key
    pub fn sort_by<K, F>(&self, key: F, direction: SortDirection) -> RecordQuery<T>
    where
        K: PartialOrd,
        F: Fn(&T) -> K,
    {
        let mut records = self.records.clone();
        sorter::sort_by_key(&mut records, key, direction);
        RecordQuery::new(records)
    }

    /// First `n` records
    pub fn limit(&self, n: usize) -> RecordQuery<T> {
        RecordQuery::new(self.records.iter().take(n).cloned().collect())
    }

    /// Records satisfying the predicate, then the rest. Each keeps source
    /// order and every record lands in exactly one side.
    pub fn partition<P>(&self, predicate: P) -> (Vec<T>, Vec<T>)
    where
        P: Fn(&T) -> bool,
    {
        self.records.iter().cloned().partition(|r| predicate(r))
    }

    pub fn group_by<K, F>(&self, key: F) -> Groups<K, T>
    where
        K: Eq + Hash,
        F: Fn(&T) -> K,
    {
        let mut groups: Groups<K, T> = HashMap::new();
        for record in &self.records {
            groups.entry(key(record)).or_default().push(record.clone());
        }
        groups
    }

    /// Groups with a partial key function.
    ///
    /// # Errors
    ///
    /// `UngroupableRecord` with the index of the first record that has no
    /// key; no partial grouping is returned.
    pub fn try_group_by<K, F>(&self, key: F) -> QueryResult<Groups<K, T>>
    where
        K: Eq + Hash,
        F: Fn(&T) -> Option<K>,
    {
        let mut groups: Groups<K, T> = HashMap::new();
        for (index, record) in self.records.iter().enumerate() {
            let k = key(record).ok_or(QueryError::UngroupableRecord { index })?;
            groups.entry(k).or_default().push(record.clone());
        }
        Ok(groups)
    }
}

impl<T: Clone + Eq + Hash> RecordQuery<T> {
    /// Drops repeated values, keeping the first occurrence
    pub fn distinct(&self) -> RecordQuery<T> {
        let mut seen: HashSet<&T> = HashSet::new();
        RecordQuery::new(
            self.records
                .iter()
                .filter(|r| seen.insert(*r))
                .cloned()
                .collect(),
        )
    }
}

/// Field-name based operations, for callers that address fields as text
impl<T: Record + Clone> RecordQuery<T> {
    /// Keeps records matching every predicate.
    ///
    /// # Errors
    ///
    /// `UnknownField` if any predicate names a field `T` does not have.
    pub fn filter_fields(&self, predicates: &[FieldPredicate]) -> QueryResult<RecordQuery<T>> {
        for predicate in predicates {
            predicate.check_field::<T>()?;
        }
        Ok(self.filter(|r| FieldPredicate::matches_all(r, predicates)))
    }

    pub fn sort_by_spec(&self, spec: &SortSpec) -> QueryResult<RecordQuery<T>> {
        spec.check_field::<T>()?;
        let mut records = self.records.clone();
        sorter::sort_by_spec(&mut records, spec);
        Ok(RecordQuery::new(records))
    }

    /// Values of one field, in source order
    pub fn field_values(&self, field: &str) -> QueryResult<Vec<FieldValue>> {
        ensure_field::<T>(field)?;
        Ok(self.records.iter().filter_map(|r| r.field(field)).collect())
    }

    /// Distinct values of one field, in first-seen order
    pub fn distinct_field(&self, field: &str) -> QueryResult<Vec<FieldValue>> {
        let mut distinct: Vec<FieldValue> = Vec::new();
        for value in self.field_values(field)? {
            if !distinct.contains(&value) {
                distinct.push(value);
            }
        }
        Ok(distinct)
    }

    /// Groups by the textual form of a field
    pub fn group_by_field(&self, field: &str) -> QueryResult<Groups<String, T>> {
        ensure_field::<T>(field)?;
        self.try_group_by(|r| r.field(field).map(|v| v.to_string()))
    }

    /// Aggregates a numeric field.
    ///
    /// `Count` accepts any field.
    ///
    /// # Errors
    ///
    /// `UnknownField`, or `NonNumericField` when a value is text.
    pub fn aggregate_field(&self, field: &str, op: AggregateOp) -> QueryResult<Aggregate> {
        let values = self.numeric_values(field, op)?;
        Ok(values.into_iter().collect::<Accumulator>().finish(op))
    }

    /// Aggregates a numeric field within each group of another field
    pub fn group_aggregate_field(
        &self,
        group_field: &str,
        value_field: &str,
        op: AggregateOp,
    ) -> QueryResult<HashMap<String, Aggregate>> {
        let groups = self.group_by_field(group_field)?;
        groups
            .into_iter()
            .map(|(key, members)| {
                let aggregate = RecordQuery::new(members).aggregate_field(value_field, op)?;
                Ok((key, aggregate))
            })
            .collect()
    }

    fn numeric_values(&self, field: &str, op: AggregateOp) -> QueryResult<Vec<f64>> {
        let values = self.field_values(field)?;
        if op == AggregateOp::Count {
            return Ok(vec![0.0; values.len()]);
        }
        values
            .iter()
            .map(|v| {
                v.as_f64().ok_or_else(|| QueryError::NonNumericField {
                    field: field.to_string(),
                    type_name: v.type_name(),
                })
            })
            .collect()
    }
}

impl<T> From<Vec<T>> for RecordQuery<T> {
    fn from(records: Vec<T>) -> Self {
        Self::new(records)
    }
}

impl<T> IntoIterator for RecordQuery<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a RecordQuery<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
