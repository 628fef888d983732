//! Record query engine for recordq
//!
//! Pure, side-effect-free transformations over an ordered, in-memory
//! sequence of records: filter, project, sort, distinct, group,
//! partition, aggregate, find and match.
//!
//! # Guarantees
//!
//! - Input snapshots are never mutated
//! - Filtering and grouping preserve source order
//! - Sorting is stable in both directions
//! - Average, min and max over no records are `Aggregate::Absent`
//! - Empty input is never an error
//!
//! Parallel variants split input into chunks and merge partial results;
//! they agree with the sequential operations up to float rounding.

mod aggregate;
mod engine;
mod errors;
mod filters;
mod parallel;
mod sorter;

pub use aggregate::{Accumulator, Aggregate, AggregateOp, AggregateSpec, SummaryStatistics};
pub use engine::{Groups, RecordQuery};
pub use errors::{QueryError, QueryResult};
pub use filters::{ensure_field, FieldPredicate, FilterOp};
pub use parallel::{par_aggregate, par_group_aggregate, par_group_by};
pub use sorter::{sort_by_key, sort_by_spec, SortDirection, SortSpec};
