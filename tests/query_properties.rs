//! Query Engine Property Tests
//!
//! Properties of the record query engine over the sample employees:
//! - Filtering preserves order and every survivor satisfies the predicate
//! - Partition covers the source exactly once
//! - Aggregates over no records are absent, never NaN
//! - Grouping keys equal the distinct key values
//! - Parallel reductions agree with the sequential ones

use std::collections::HashSet;

use recordq::model::{sample_employees, Employee, FieldValue};
use recordq::query::{
    Aggregate, AggregateOp, FieldPredicate, QueryError, RecordQuery, SortDirection, SortSpec,
};

// =============================================================================
// Helper Functions
// =============================================================================

fn employees() -> RecordQuery<Employee> {
    RecordQuery::new(sample_employees())
}

fn empty() -> RecordQuery<Employee> {
    RecordQuery::new(Vec::new())
}

fn codes(query: &RecordQuery<Employee>) -> Vec<String> {
    query.iter().map(|e| e.employee_code().to_string()).collect()
}

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// =============================================================================
// Filtering Tests
// =============================================================================

/// Every filtered record satisfies the predicate, for thresholds that
/// keep everything, some records, and nothing.
#[test]
fn test_filter_then_all_match() {
    let all = employees();
    for (threshold, expected) in [
        (0.0, 10),
        (60_000.0, 9),
        (75_000.0, 6),
        (80_000.0, 4),
        (1e9, 0),
    ] {
        let kept = all.filter(|e| e.salary() > threshold);
        assert!(kept.all_match(|e| e.salary() > threshold), "threshold {}", threshold);
        assert_eq!(kept.len(), expected, "threshold {}", threshold);

        let (above, rest) = all.partition(|e| e.salary() > threshold);
        let (above, rest) = (RecordQuery::new(above), RecordQuery::new(rest));
        assert_eq!(codes(&above), codes(&kept));
        assert!(rest.none_match(|e| e.salary() > threshold));
        assert_eq!(above.len() + rest.len(), all.len());
    }
}

/// Survivors keep their source order.
#[test]
fn test_filter_preserves_order() {
    let females = employees().filter(|e| e.gender() == "Female");
    assert_eq!(
        codes(&females),
        vec!["EMP002", "EMP004", "EMP006", "EMP008", "EMP010"]
    );
}

/// The source snapshot is not touched by a query.
#[test]
fn test_source_is_unchanged() {
    let source = employees();
    let _ = source.filter(|e| e.salary() > 80_000.0);
    let _ = source.sort_by(|e| e.salary(), SortDirection::Desc);
    assert_eq!(codes(&source)[0], "EMP001");
    assert_eq!(source.len(), 10);
}

/// Declarative predicates agree with closures.
#[test]
fn test_field_predicates_match_closures() {
    let predicates = vec![
        FieldPredicate::eq("job_title", "Software Engineer"),
        FieldPredicate::gte("salary", 75_000.0),
    ];
    let declarative = employees().filter_fields(&predicates).unwrap();
    let closure =
        employees().filter(|e| e.job_title() == "Software Engineer" && e.salary() >= 75_000.0);

    assert_eq!(codes(&declarative), codes(&closure));
}

/// Unknown fields are rejected up front.
#[test]
fn test_unknown_field_in_predicate() {
    let result = employees().filter_fields(&[FieldPredicate::eq("department", "R&D")]);
    assert_eq!(
        result.unwrap_err(),
        QueryError::UnknownField("department".to_string())
    );
}

// =============================================================================
// Partition Tests
// =============================================================================

/// Each record lands in exactly one side.
#[test]
fn test_partition_covers_source_once() {
    let (high, low) = employees().partition(|e| e.salary() > 75_000.0);
    assert_eq!(high.len() + low.len(), 10);

    let high_codes: HashSet<_> = high.iter().map(|e| e.employee_code()).collect();
    let low_codes: HashSet<_> = low.iter().map(|e| e.employee_code()).collect();
    assert!(high_codes.is_disjoint(&low_codes));
}

// =============================================================================
// Sorting Tests
// =============================================================================

/// Descending salary puts the top earner first.
#[test]
fn test_sort_descending() {
    let sorted = employees().sort_by_spec(&SortSpec::desc("salary")).unwrap();
    assert_eq!(codes(&sorted.limit(3)), vec!["EMP005", "EMP009", "EMP002"]);
}

/// Equal keys keep source order in both directions.
#[test]
fn test_sort_is_stable() {
    let by_gender_asc = employees().sort_by(|e| e.gender().to_string(), SortDirection::Asc);
    let by_gender_desc = employees().sort_by(|e| e.gender().to_string(), SortDirection::Desc);

    assert_eq!(codes(&by_gender_asc)[0], "EMP002");
    assert_eq!(codes(&by_gender_desc)[0], "EMP001");
}

// =============================================================================
// Aggregation Tests
// =============================================================================

/// Average equals sum / count.
#[test]
fn test_average_salary() {
    let all = employees();
    let sum = all.aggregate(|e| e.salary(), AggregateOp::Sum).unwrap_or(0.0);
    let avg = all
        .aggregate(|e| e.salary(), AggregateOp::Average)
        .value()
        .unwrap();
    assert!(approx_eq(avg, sum / 10.0));
    assert!(approx_eq(avg, 77_600.0));
}

/// Empty input gives absent average, min and max, and zero count.
#[test]
fn test_empty_aggregates() {
    let none = empty();
    assert_eq!(none.aggregate(|e| e.salary(), AggregateOp::Average), Aggregate::Absent);
    assert_eq!(none.aggregate(|e| e.salary(), AggregateOp::Min), Aggregate::Absent);
    assert_eq!(none.aggregate(|e| e.salary(), AggregateOp::Max), Aggregate::Absent);
    assert_eq!(none.aggregate(|e| e.salary(), AggregateOp::Count), Aggregate::Count(0));
    assert_eq!(none.count(), 0);
}

/// Vacuous truth on empty input.
#[test]
fn test_matching_on_empty() {
    let none = empty();
    assert!(none.all_match(|e| e.salary() > 1e12));
    assert!(none.none_match(|e| e.salary() > 0.0));
    assert!(!none.any_match(|_| true));
    assert!(none.find_first(|_| true).is_none());
}

/// Text fields cannot be summed.
#[test]
fn test_non_numeric_aggregate() {
    let err = employees()
        .aggregate_field("university", AggregateOp::Sum)
        .unwrap_err();
    assert!(matches!(err, QueryError::NonNumericField { .. }));
}

// =============================================================================
// Grouping Tests
// =============================================================================

/// Group keys equal distinct values and sizes sum to the input size.
#[test]
fn test_group_keys_match_distinct() {
    let all = employees();
    let groups = all.group_by_field("gender").unwrap();
    let distinct = all.distinct_field("gender").unwrap();

    let keys: HashSet<String> = groups.keys().cloned().collect();
    let values: HashSet<String> = distinct.iter().map(FieldValue::to_string).collect();
    assert_eq!(keys, values);
    assert_eq!(groups.values().map(Vec::len).sum::<usize>(), 10);
}

/// Per-group average salary.
#[test]
fn test_group_average() {
    let averages = employees()
        .group_aggregate_field("gender", "salary", AggregateOp::Average)
        .unwrap();

    let male = averages["Male"].value().unwrap();
    let female = averages["Female"].value().unwrap();
    assert!(approx_eq(male, 79_000.0));
    assert!(approx_eq(female, 76_200.0));
}

// =============================================================================
// Parallel Agreement Tests
// =============================================================================

/// Parallel aggregates equal sequential ones within rounding.
#[test]
fn test_parallel_aggregate_agrees() {
    let all = employees();
    for op in [
        AggregateOp::Sum,
        AggregateOp::Average,
        AggregateOp::Min,
        AggregateOp::Max,
        AggregateOp::Count,
    ] {
        let seq = all.aggregate(|e| e.salary(), op).value().unwrap();
        let par = all.par_aggregate(|e| e.salary(), op).value().unwrap();
        assert!((seq - par).abs() < 1e-6, "{} disagrees", op);
    }
}

/// Parallel grouping yields the same groups with members in source order.
#[test]
fn test_parallel_group_by_agrees() {
    let all = employees();
    let seq = all.group_by(|e| e.job_title().to_string());
    let par = all.par_group_by(|e| e.job_title().to_string());

    assert_eq!(seq.len(), par.len());
    for (title, members) in &seq {
        let seq_codes: Vec<_> = members.iter().map(|e| e.employee_code()).collect();
        let par_codes: Vec<_> = par[title].iter().map(|e| e.employee_code()).collect();
        assert_eq!(seq_codes, par_codes);
    }
}

/// Parallel per-group counts equal sequential counts.
#[test]
fn test_parallel_group_counts_agree() {
    let all = employees();
    let seq = all.group_count(|e| e.gender().to_string());
    let par = all.par_group_aggregate(|e| e.gender().to_string(), |_| 0.0, AggregateOp::Count);

    for (gender, count) in seq {
        assert_eq!(par[&gender], Aggregate::Count(count));
    }
}
