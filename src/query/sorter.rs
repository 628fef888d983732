//! Stable sorting
//!
//! Ties always keep source order, in both directions: descending
//! reverses the comparator, never the sequence.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::model::Record;

use super::errors::{QueryError, QueryResult};
use super::filters::ensure_field;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    /// Applies the direction to an ascending ordering
    pub fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort specification for a named field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }

    pub fn check_field<R: Record>(&self) -> QueryResult<()> {
        ensure_field::<R>(&self.field)
    }
}

/// Parses `field`, `field:asc` or `field:desc`
impl FromStr for SortSpec {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, direction) = match s.split_once(':') {
            Some((field, dir)) => {
                let direction = match dir.trim().to_ascii_lowercase().as_str() {
                    "asc" => SortDirection::Asc,
                    "desc" => SortDirection::Desc,
                    _ => return Err(QueryError::InvalidSort(s.to_string())),
                };
                (field.trim(), direction)
            }
            None => (s.trim(), SortDirection::Asc),
        };

        if field.is_empty() {
            return Err(QueryError::InvalidSort(s.to_string()));
        }

        Ok(Self {
            field: field.to_string(),
            direction,
        })
    }
}

/// Sorts records by key. Incomparable keys (NaN) are treated as equal.
pub fn sort_by_key<T, K, F>(records: &mut [T], key: F, direction: SortDirection)
where
    K: PartialOrd,
    F: Fn(&T) -> K,
{
    records.sort_by(|a, b| {
        let ordering = key(a).partial_cmp(&key(b)).unwrap_or(Ordering::Equal);
        direction.apply(ordering)
    });
}

/// Sorts records by a named field.
///
/// Records missing the field sort first, then numbers, then text.
pub fn sort_by_spec<R: Record>(records: &mut [R], spec: &SortSpec) {
    records.sort_by(|a, b| {
        let ordering = match (a.field(&spec.field), b.field(&spec.field)) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(av), Some(bv)) => av.sort_cmp(&bv),
        };
        spec.direction.apply(ordering)
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::sample_employees;

    #[test]
    fn test_sort_ascending() {
        let mut values = vec![30, 20, 25];
        sort_by_key(&mut values, |v| *v, SortDirection::Asc);
        assert_eq!(values, vec![20, 25, 30]);
    }

    #[test]
    fn test_sort_descending() {
        let mut values = vec![30, 20, 25];
        sort_by_key(&mut values, |v| *v, SortDirection::Desc);
        assert_eq!(values, vec![30, 25, 20]);
    }

    #[test]
    fn test_sort_stable_both_directions() {
        let pairs = vec![("a", 1), ("b", 0), ("c", 1), ("d", 0)];

        let mut asc = pairs.clone();
        sort_by_key(&mut asc, |p| p.1, SortDirection::Asc);
        assert_eq!(asc, vec![("b", 0), ("d", 0), ("a", 1), ("c", 1)]);

        let mut desc = pairs;
        sort_by_key(&mut desc, |p| p.1, SortDirection::Desc);
        assert_eq!(desc, vec![("a", 1), ("c", 1), ("b", 0), ("d", 0)]);
    }

    #[test]
    fn test_sort_by_spec_string() {
        let mut employees = sample_employees();
        sort_by_spec(&mut employees, &SortSpec::desc("first_name"));
        // Lowercase sorts after uppercase in byte order
        assert_eq!(employees[0].first_name(), "olivia");
        assert_eq!(employees[1].first_name(), "Sarah");
        assert_eq!(employees[2].first_name(), "Robert");
    }

    #[test]
    fn test_parse_sort_spec() {
        assert_eq!("salary".parse::<SortSpec>().unwrap(), SortSpec::asc("salary"));
        assert_eq!(
            "salary:DESC".parse::<SortSpec>().unwrap(),
            SortSpec::desc("salary")
        );
        assert!("salary:up".parse::<SortSpec>().is_err());
        assert!(":asc".parse::<SortSpec>().is_err());
    }
}
