//! Record types for recordq
//!
//! Two immutable record kinds live here:
//!
//! - `Employee`: plain value, identity by employee code
//! - `Patient`: validated at construction, immutable afterwards
//!
//! Both implement `Record`, which exposes fields by name so the query
//! engine can address them declaratively.

mod blood_type;
mod employee;
mod errors;
mod field;
mod patient;
mod sample;

pub use blood_type::BloodType;
pub use employee::Employee;
pub use errors::{ValidationError, ValidationResult};
pub use field::{FieldValue, Record};
pub use patient::{Patient, AGE_RANGE, TEMPERATURE_RANGE_F};
pub use sample::sample_employees;
