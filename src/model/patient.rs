//! Patient record
//!
//! A `Patient` can only be obtained through `Patient::new`, which checks
//! every field before anything is built. Checks run in a fixed order so
//! the reported field is deterministic:
//!
//! 1. patient_id is not blank
//! 2. name is not blank
//! 3. age within `AGE_RANGE`
//! 4. temperature within `TEMPERATURE_RANGE_F` (NaN rejected)
//! 5. blood type is an exact ABO/Rh label

use std::fmt;
use std::ops::RangeInclusive;

use super::blood_type::BloodType;
use super::errors::{ValidationError, ValidationResult};
use super::field::{FieldValue, Record};

/// Accepted ages in years
pub const AGE_RANGE: RangeInclusive<i64> = 0..=150;

/// Accepted body temperatures in °F
pub const TEMPERATURE_RANGE_F: RangeInclusive<f64> = 90.0..=110.0;

/// A validated patient. Immutable once constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct Patient {
    patient_id: String,
    name: String,
    age: u32,
    temperature: f64,
    blood_type: BloodType,
}

impl Patient {
    /// Validates all fields and builds the patient.
    ///
    /// # Errors
    ///
    /// Returns the first `ValidationError` encountered.
    pub fn new(
        patient_id: &str,
        name: &str,
        age: i64,
        temperature: f64,
        blood_type: &str,
    ) -> ValidationResult<Self> {
        if patient_id.trim().is_empty() {
            return Err(ValidationError::blank("patient_id"));
        }
        if name.trim().is_empty() {
            return Err(ValidationError::blank("name"));
        }
        if !AGE_RANGE.contains(&age) {
            return Err(ValidationError::out_of_range(
                "age",
                age,
                *AGE_RANGE.start(),
                *AGE_RANGE.end(),
            ));
        }
        if !TEMPERATURE_RANGE_F.contains(&temperature) {
            return Err(ValidationError::out_of_range(
                "temperature",
                temperature,
                *TEMPERATURE_RANGE_F.start(),
                *TEMPERATURE_RANGE_F.end(),
            ));
        }
        let blood_type: BloodType = blood_type.parse()?;

        Ok(Self {
            patient_id: patient_id.to_string(),
            name: name.to_string(),
            // In range 0..=150, fits u32
            age: age as u32,
            temperature,
            blood_type,
        })
    }

    pub fn patient_id(&self) -> &str {
        &self.patient_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    /// Body temperature in °F
    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn blood_type(&self) -> BloodType {
        self.blood_type
    }
}

impl fmt::Display for Patient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Patient[ID={}, Name={}, Age={}, Temp={:.1}°F, Blood={}]",
            self.patient_id, self.name, self.age, self.temperature, self.blood_type
        )
    }
}

const PATIENT_FIELDS: &[&str] = &["patient_id", "name", "age", "temperature", "blood_type"];

impl Record for Patient {
    fn field_names() -> &'static [&'static str] {
        PATIENT_FIELDS
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        let value = match name {
            "patient_id" => self.patient_id.as_str().into(),
            "name" => self.name.as_str().into(),
            "age" => self.age.into(),
            "temperature" => FieldValue::Float(self.temperature),
            "blood_type" => self.blood_type.as_str().into(),
            _ => return None,
        };
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_patient() {
        let p = Patient::new("P001", "Alice", 34, 98.6, "O+").unwrap();
        assert_eq!(p.patient_id(), "P001");
        assert_eq!(p.age(), 34);
        assert_eq!(p.blood_type(), BloodType::OPositive);
    }

    #[test]
    fn test_bounds_are_inclusive() {
        assert!(Patient::new("P1", "A", 0, 90.0, "A+").is_ok());
        assert!(Patient::new("P1", "A", 150, 110.0, "A+").is_ok());
    }

    #[test]
    fn test_blank_id_and_name() {
        let err = Patient::new("  ", "Alice", 30, 98.6, "A+").unwrap_err();
        assert_eq!(err.field, "patient_id");
        let err = Patient::new("P1", "", 30, 98.6, "A+").unwrap_err();
        assert_eq!(err.field, "name");
    }

    #[test]
    fn test_age_out_of_range() {
        let err = Patient::new("P1", "Alice", 200, 98.6, "A+").unwrap_err();
        assert_eq!(err.field, "age");
        let err = Patient::new("P1", "Alice", -1, 98.6, "A+").unwrap_err();
        assert_eq!(err.field, "age");
    }

    #[test]
    fn test_temperature_out_of_range() {
        let err = Patient::new("P1", "Alice", 30, 89.9, "A+").unwrap_err();
        assert_eq!(err.field, "temperature");
        let err = Patient::new("P1", "Alice", 30, f64::NAN, "A+").unwrap_err();
        assert_eq!(err.field, "temperature");
    }

    #[test]
    fn test_first_failing_field_is_reported() {
        let err = Patient::new("P1", "Alice", 200, 50.0, "Z").unwrap_err();
        assert_eq!(err.field, "age");
    }

    #[test]
    fn test_lowercase_blood_type_rejected() {
        let err = Patient::new("P1", "Alice", 30, 98.6, "o+").unwrap_err();
        assert_eq!(err.field, "blood_type");
    }

    #[test]
    fn test_display_format() {
        let p = Patient::new("P007", "Bond", 45, 98.64, "AB-").unwrap();
        assert_eq!(
            p.to_string(),
            "Patient[ID=P007, Name=Bond, Age=45, Temp=98.6°F, Blood=AB-]"
        );
    }
}
