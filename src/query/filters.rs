//! Field predicates
//!
//! Declarative predicates over `Record` fields, for callers that name
//! fields as text (the CLI). Closure predicates on `RecordQuery` do not
//! go through here.
//!
//! No type coercion: text never matches a number. Int and Float compare
//! numerically.

use std::cmp::Ordering;
use std::str::FromStr;

use crate::model::{FieldValue, Record};

use super::errors::{QueryError, QueryResult};

/// Filter operation types
#[derive(Debug, Clone, PartialEq)]
pub enum FilterOp {
    /// field = value
    Eq(FieldValue),
    /// field >= value
    Gte(FieldValue),
    /// field > value
    Gt(FieldValue),
    /// field <= value
    Lte(FieldValue),
    /// field < value
    Lt(FieldValue),
}

impl FilterOp {
    pub fn op_name(&self) -> &'static str {
        match self {
            FilterOp::Eq(_) => "eq",
            FilterOp::Gte(_) => "gte",
            FilterOp::Gt(_) => "gt",
            FilterOp::Lte(_) => "lte",
            FilterOp::Lt(_) => "lt",
        }
    }

    fn operand(&self) -> &FieldValue {
        match self {
            FilterOp::Eq(v)
            | FilterOp::Gte(v)
            | FilterOp::Gt(v)
            | FilterOp::Lte(v)
            | FilterOp::Lt(v) => v,
        }
    }

    fn accepts(&self, ordering: Ordering) -> bool {
        match self {
            FilterOp::Eq(_) => ordering == Ordering::Equal,
            FilterOp::Gte(_) => ordering != Ordering::Less,
            FilterOp::Gt(_) => ordering == Ordering::Greater,
            FilterOp::Lte(_) => ordering != Ordering::Greater,
            FilterOp::Lt(_) => ordering == Ordering::Less,
        }
    }
}

/// A single predicate (field + operation)
#[derive(Debug, Clone, PartialEq)]
pub struct FieldPredicate {
    pub field: String,
    pub op: FilterOp,
}

impl FieldPredicate {
    pub fn eq(field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self {
            field: field.into(),
            op: FilterOp::Eq(value.into()),
        }
    }

    pub fn gte(field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self {
            field: field.into(),
            op: FilterOp::Gte(value.into()),
        }
    }

    pub fn gt(field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self {
            field: field.into(),
            op: FilterOp::Gt(value.into()),
        }
    }

    pub fn lte(field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self {
            field: field.into(),
            op: FilterOp::Lte(value.into()),
        }
    }

    pub fn lt(field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self {
            field: field.into(),
            op: FilterOp::Lt(value.into()),
        }
    }

    /// Checks the field name against a record type
    pub fn check_field<R: Record>(&self) -> QueryResult<()> {
        ensure_field::<R>(&self.field)
    }

    /// Evaluates the predicate. A missing field never matches.
    pub fn matches<R: Record>(&self, record: &R) -> bool {
        let actual = match record.field(&self.field) {
            Some(v) => v,
            None => return false,
        };
        match actual.compare(self.op.operand()) {
            Some(ordering) => self.op.accepts(ordering),
            None => false,
        }
    }

    /// True when the record satisfies every predicate (AND semantics)
    pub fn matches_all<R: Record>(record: &R, predicates: &[FieldPredicate]) -> bool {
        predicates.iter().all(|p| p.matches(record))
    }
}

/// Parses `field=value`, `field>=value`, `field>value`, `field<=value`
/// and `field<value`. Values parse as int, then float, then text.
impl FromStr for FieldPredicate {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || QueryError::InvalidPredicate(s.to_string());

        let at = s.find(['<', '>', '=']).ok_or_else(invalid)?;
        let field = s[..at].trim();
        let rest = &s[at..];

        let symbol = [">=", "<=", ">", "<", "="]
            .into_iter()
            .find(|sym| rest.starts_with(*sym))
            .ok_or_else(invalid)?;

        let raw = rest[symbol.len()..].trim();
        if field.is_empty() || raw.is_empty() {
            return Err(invalid());
        }

        let value = FieldValue::infer(raw);
        let op = match symbol {
            ">=" => FilterOp::Gte(value),
            "<=" => FilterOp::Lte(value),
            ">" => FilterOp::Gt(value),
            "<" => FilterOp::Lt(value),
            _ => FilterOp::Eq(value),
        };

        Ok(Self {
            field: field.to_string(),
            op,
        })
    }
}

/// Fails with `UnknownField` unless `R` exposes `name`
pub fn ensure_field<R: Record>(name: &str) -> QueryResult<()> {
    if R::field_names().contains(&name) {
        Ok(())
    } else {
        Err(QueryError::UnknownField(name.to_string()))
    }
}
