//! Numeric aggregation
//!
//! Every aggregate is derived from one `Accumulator` holding
//! (count, sum, min, max). Accumulators merge associatively, so partial
//! results from independent chunks combine into the same answer as a
//! single pass. Average is always sum / count of the merged accumulator.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::errors::QueryError;

/// Aggregation operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggregateOp {
    Sum,
    Average,
    Min,
    Max,
    Count,
}

impl AggregateOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            AggregateOp::Sum => "sum",
            AggregateOp::Average => "avg",
            AggregateOp::Min => "min",
            AggregateOp::Max => "max",
            AggregateOp::Count => "count",
        }
    }
}

impl fmt::Display for AggregateOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AggregateOp {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sum" => Ok(AggregateOp::Sum),
            "avg" | "average" => Ok(AggregateOp::Average),
            "min" => Ok(AggregateOp::Min),
            "max" => Ok(AggregateOp::Max),
            "count" => Ok(AggregateOp::Count),
            _ => Err(QueryError::InvalidAggregate(s.to_string())),
        }
    }
}

/// Parsed `op:field` aggregate request.
///
/// `count` may omit the field and then counts records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateSpec {
    pub op: AggregateOp,
    pub field: Option<String>,
}

impl FromStr for AggregateSpec {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (op, field) = match s.split_once(':') {
            Some((op, field)) => (op.trim(), Some(field.trim())),
            None => (s.trim(), None),
        };

        let op: AggregateOp = op.parse()?;
        match field {
            Some("") => Err(QueryError::InvalidAggregate(s.to_string())),
            Some(field) => Ok(AggregateSpec {
                op,
                field: Some(field.to_string()),
            }),
            None if op == AggregateOp::Count => Ok(AggregateSpec { op, field: None }),
            None => Err(QueryError::InvalidAggregate(format!(
                "'{}' needs a field, e.g. {}:salary",
                s, op
            ))),
        }
    }
}

/// Result of an aggregation.
///
/// `Absent` is returned by average, min and max over no values; the
/// caller picks whatever fallback it wants to display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Aggregate {
    Value(f64),
    Count(u64),
    Absent,
}

impl Aggregate {
    /// Numeric view; counts convert to f64
    pub fn value(&self) -> Option<f64> {
        match self {
            Aggregate::Value(v) => Some(*v),
            Aggregate::Count(c) => Some(*c as f64),
            Aggregate::Absent => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Aggregate::Absent)
    }

    pub fn unwrap_or(&self, fallback: f64) -> f64 {
        self.value().unwrap_or(fallback)
    }
}

impl fmt::Display for Aggregate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Aggregate::Value(v) => write!(f, "{}", v),
            Aggregate::Count(c) => write!(f, "{}", c),
            Aggregate::Absent => f.write_str("absent"),
        }
    }
}

/// Running (count, sum, min, max) over a stream of values
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Accumulator {
    count: u64,
    sum: f64,
    min: f64,
    max: f64,
}

impl Default for Accumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Accumulator {
    pub fn new() -> Self {
        Self {
            count: 0,
            sum: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    pub fn push(&mut self, value: f64) {
        self.count += 1;
        self.sum += value;
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    /// Combines two partial accumulators
    pub fn merge(self, other: Accumulator) -> Accumulator {
        Accumulator {
            count: self.count + other.count,
            sum: self.sum + other.sum,
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn sum(&self) -> f64 {
        self.sum
    }

    pub fn finish(&self, op: AggregateOp) -> Aggregate {
        match op {
            AggregateOp::Count => Aggregate::Count(self.count),
            AggregateOp::Sum => Aggregate::Value(self.sum),
            _ if self.count == 0 => Aggregate::Absent,
            AggregateOp::Average => Aggregate::Value(self.sum / self.count as f64),
            AggregateOp::Min => Aggregate::Value(self.min),
            AggregateOp::Max => Aggregate::Value(self.max),
        }
    }

    pub fn summary(&self) -> SummaryStatistics {
        SummaryStatistics {
            count: self.count,
            sum: self.sum,
            min: self.finish(AggregateOp::Min).value(),
            max: self.finish(AggregateOp::Max).value(),
            average: self.finish(AggregateOp::Average).value(),
        }
    }
}

impl FromIterator<f64> for Accumulator {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut acc = Accumulator::new();
        for value in iter {
            acc.push(value);
        }
        acc
    }
}

/// Count, sum, min, max and average in one pass
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryStatistics {
    pub count: u64,
    pub sum: f64,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub average: Option<f64>,
}
