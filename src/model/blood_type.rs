//! ABO/Rh blood types

use std::fmt;
use std::str::FromStr;

use super::errors::ValidationError;

/// One of the eight ABO/Rh blood types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BloodType {
    APositive,
    ANegative,
    BPositive,
    BNegative,
    AbPositive,
    AbNegative,
    OPositive,
    ONegative,
}

impl BloodType {
    pub const ALL: [BloodType; 8] = [
        BloodType::APositive,
        BloodType::ANegative,
        BloodType::BPositive,
        BloodType::BNegative,
        BloodType::AbPositive,
        BloodType::AbNegative,
        BloodType::OPositive,
        BloodType::ONegative,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BloodType::APositive => "A+",
            BloodType::ANegative => "A-",
            BloodType::BPositive => "B+",
            BloodType::BNegative => "B-",
            BloodType::AbPositive => "AB+",
            BloodType::AbNegative => "AB-",
            BloodType::OPositive => "O+",
            BloodType::ONegative => "O-",
        }
    }

    /// Labels of every blood type, in `ALL` order
    pub fn labels() -> [&'static str; 8] {
        Self::ALL.map(|b| b.as_str())
    }

    /// Case-insensitive comparison against a label like "ab+"
    pub fn matches_ignore_case(&self, label: &str) -> bool {
        self.as_str().eq_ignore_ascii_case(label)
    }
}

impl fmt::Display for BloodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parsing is exact: "ab+" is rejected
impl FromStr for BloodType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|b| b.as_str() == s)
            .ok_or_else(|| ValidationError::not_member("blood_type", s, &Self::labels()))
    }
}
