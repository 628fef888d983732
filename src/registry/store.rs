//! Patient registry
//!
//! Maps a unique patient ID to a validated `Patient`.
//!
//! # Invariants
//!
//! - IDs are unique; a duplicate add leaves the stored patient untouched
//! - All checks run before insertion; a failed add changes nothing
//! - Averages over an empty registry are `EmptyStore`, never NaN
//!
//! Not thread-safe. Share it behind a lock if needed.

use std::collections::HashMap;

use crate::model::{FieldValue, Patient};
use crate::observability::{log_event_with_fields, Event};
use crate::query::{Accumulator, AggregateOp, FieldPredicate, RecordQuery};

use super::errors::{RegistryError, RegistryResult};

/// Patient fields that can be matched against user text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatientField {
    PatientId,
    Name,
    Age,
    Temperature,
    BloodType,
}

impl PatientField {
    /// Name as exposed by `Record::field`
    pub fn name(&self) -> &'static str {
        match self {
            PatientField::PatientId => "patient_id",
            PatientField::Name => "name",
            PatientField::Age => "age",
            PatientField::Temperature => "temperature",
            PatientField::BloodType => "blood_type",
        }
    }

    fn is_numeric(&self) -> bool {
        matches!(self, PatientField::Age | PatientField::Temperature)
    }
}

/// Numeric patient fields that can be averaged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericField {
    Age,
    Temperature,
}

impl NumericField {
    fn read(&self, patient: &Patient) -> f64 {
        match self {
            NumericField::Age => f64::from(patient.age()),
            NumericField::Temperature => patient.temperature(),
        }
    }
}

#[derive(Debug, Default)]
pub struct PatientRegistry {
    patients: HashMap<String, Patient>,
}

impl PatientRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and inserts a patient.
    ///
    /// # Errors
    ///
    /// - `DuplicateIdentifier` if the ID is already registered
    /// - `Validation` if any field is out of its domain
    pub fn add(
        &mut self,
        patient_id: &str,
        name: &str,
        age: i64,
        temperature: f64,
        blood_type: &str,
    ) -> RegistryResult<&Patient> {
        if self.patients.contains_key(patient_id) {
            log_event_with_fields(
                Event::PatientRejected,
                &[("patient_id", patient_id), ("reason", "duplicate")],
            );
            return Err(RegistryError::DuplicateIdentifier(patient_id.to_string()));
        }

        let patient = Patient::new(patient_id, name, age, temperature, blood_type).map_err(|e| {
            log_event_with_fields(
                Event::PatientRejected,
                &[("field", e.field), ("patient_id", patient_id)],
            );
            RegistryError::from(e)
        })?;

        self.insert(patient)
    }

    /// Inserts an already validated patient
    pub fn insert(&mut self, patient: Patient) -> RegistryResult<&Patient> {
        let id = patient.patient_id().to_string();
        if self.patients.contains_key(&id) {
            return Err(RegistryError::DuplicateIdentifier(id));
        }
        log_event_with_fields(Event::PatientAdded, &[("patient_id", id.as_str())]);
        Ok(self.patients.entry(id).or_insert(patient))
    }

    /// Looks up a patient by ID.
    ///
    /// # Errors
    ///
    /// - `InvalidIdentifier` for a blank ID
    /// - `NotFound` for a well-formed ID that is not registered
    pub fn find(&self, patient_id: &str) -> RegistryResult<&Patient> {
        if patient_id.trim().is_empty() {
            return Err(RegistryError::InvalidIdentifier);
        }
        self.patients
            .get(patient_id)
            .ok_or_else(|| RegistryError::NotFound(patient_id.to_string()))
    }

    /// All patients, in map order
    pub fn list_all(&self) -> Vec<&Patient> {
        self.patients.values().collect()
    }

    pub fn len(&self) -> usize {
        self.patients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patients.is_empty()
    }

    /// Snapshot of every patient for the query engine
    pub fn query(&self) -> RecordQuery<Patient> {
        RecordQuery::new(self.patients.values().cloned().collect())
    }

    /// Patients whose blood type equals `label`, ignoring case
    pub fn patients_by_blood_type(&self, label: &str) -> Vec<&Patient> {
        self.filter_by_field(PatientField::BloodType, label)
    }

    /// Patients whose field equals `value`.
    ///
    /// Blood type matches case-insensitively. Text fields match exactly,
    /// numeric fields match numerically.
    pub fn filter_by_field(&self, field: PatientField, value: &str) -> Vec<&Patient> {
        if field == PatientField::BloodType {
            return self
                .patients
                .values()
                .filter(|p| p.blood_type().matches_ignore_case(value.trim()))
                .collect();
        }

        let expected = if field.is_numeric() {
            FieldValue::infer(value.trim())
        } else {
            FieldValue::Text(value.to_string())
        };
        let predicate = FieldPredicate::eq(field.name(), expected);
        self.patients
            .values()
            .filter(|p| predicate.matches(*p))
            .collect()
    }

    /// Mean of a numeric field across all patients.
    ///
    /// # Errors
    ///
    /// `EmptyStore` when no patients are registered.
    pub fn average_numeric_field(&self, field: NumericField) -> RegistryResult<f64> {
        let average = self
            .patients
            .values()
            .map(|p| field.read(p))
            .collect::<Accumulator>()
            .finish(AggregateOp::Average);
        average.value().ok_or(RegistryError::EmptyStore)
    }

    pub fn average_temperature(&self) -> RegistryResult<f64> {
        self.average_numeric_field(NumericField::Temperature)
    }
}
