//! Named field access for records

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

/// A single field value read from a record.
///
/// No coercion between text and numbers. Int and Float compare
/// numerically with each other.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl FieldValue {
    /// Parses user text as int, then finite float, then text
    pub fn infer(raw: &str) -> FieldValue {
        if let Ok(i) = raw.parse::<i64>() {
            return FieldValue::Int(i);
        }
        if let Ok(f) = raw.parse::<f64>() {
            if f.is_finite() {
                return FieldValue::Float(f);
            }
        }
        FieldValue::Text(raw.to_string())
    }

    /// Numeric view, `None` for text
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Int(i) => Some(*i as f64),
            FieldValue::Float(f) => Some(*f),
            FieldValue::Text(_) => None,
        }
    }

    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldValue::Int(_) => "int",
            FieldValue::Float(_) => "float",
            FieldValue::Text(_) => "text",
        }
    }

    /// Compares two values of compatible type.
    ///
    /// Returns `None` when one side is text and the other numeric, or
    /// when a float comparison involves NaN.
    pub fn compare(&self, other: &FieldValue) -> Option<Ordering> {
        match (self, other) {
            (FieldValue::Int(a), FieldValue::Int(b)) => Some(a.cmp(b)),
            (FieldValue::Text(a), FieldValue::Text(b)) => Some(a.cmp(b)),
            (a, b) => match (a.as_f64(), b.as_f64()) {
                (Some(af), Some(bf)) => af.partial_cmp(&bf),
                _ => None,
            },
        }
    }

    /// Total ordering used for sorting.
    ///
    /// Numbers sort before text; incomparable floats are treated as equal
    /// so the stable sort keeps their source order.
    pub fn sort_cmp(&self, other: &FieldValue) -> Ordering {
        let rank = |v: &FieldValue| -> u8 {
            match v {
                FieldValue::Int(_) | FieldValue::Float(_) => 0,
                FieldValue::Text(_) => 1,
            }
        };
        match rank(self).cmp(&rank(other)) {
            Ordering::Equal => self.compare(other).unwrap_or(Ordering::Equal),
            unequal => unequal,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Float(v) => write!(f, "{}", v),
            FieldValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Int(v)
    }
}

impl From<u32> for FieldValue {
    fn from(v: u32) -> Self {
        FieldValue::Int(i64::from(v))
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Float(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Text(v.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Text(v)
    }
}

/// A record whose fields can be read by name
pub trait Record {
    /// All field names this record type exposes
    fn field_names() -> &'static [&'static str]
    where
        Self: Sized;

    /// Reads a field, `None` if the name is unknown
    fn field(&self, name: &str) -> Option<FieldValue>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_float_compare_numerically() {
        let a = FieldValue::Int(80000);
        let b = FieldValue::Float(80000.0);
        assert_eq!(a.compare(&b), Some(Ordering::Equal));
        assert_eq!(
            FieldValue::Float(1.5).compare(&FieldValue::Int(2)),
            Some(Ordering::Less)
        );
    }

    #[test]
    fn test_infer() {
        assert_eq!(FieldValue::infer("42"), FieldValue::Int(42));
        assert_eq!(FieldValue::infer("98.6"), FieldValue::Float(98.6));
        assert_eq!(FieldValue::infer("inf"), FieldValue::Text("inf".into()));
        assert_eq!(FieldValue::infer("O+"), FieldValue::Text("O+".into()));
    }

    #[test]
    fn test_no_text_number_coercion() {
        let a = FieldValue::Text("123".into());
        let b = FieldValue::Int(123);
        assert_eq!(a.compare(&b), None);
    }

    #[test]
    fn test_sort_cmp_numbers_before_text() {
        let n = FieldValue::Int(5);
        let t = FieldValue::Text("a".into());
        assert_eq!(n.sort_cmp(&t), Ordering::Less);
        assert_eq!(t.sort_cmp(&n), Ordering::Greater);
    }

    #[test]
    fn test_nan_sorts_as_equal() {
        let a = FieldValue::Float(f64::NAN);
        let b = FieldValue::Float(1.0);
        assert_eq!(a.sort_cmp(&b), Ordering::Equal);
    }

    #[test]
    fn test_serializes_untagged() {
        let json = serde_json::to_string(&FieldValue::Text("MIT".into())).unwrap();
        assert_eq!(json, "\"MIT\"");
        let json = serde_json::to_string(&FieldValue::Int(7)).unwrap();
        assert_eq!(json, "7");
    }
}
