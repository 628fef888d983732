//! Patient registry for recordq
//!
//! A bounded entity store: unique patient IDs mapped to validated,
//! immutable `Patient` records.
//!
//! # Operations
//!
//! - add: uniqueness, then field validation, then insert
//! - find: blank IDs are `InvalidIdentifier`, unknown IDs `NotFound`
//! - list / filter by field (blood type is case-insensitive)
//! - average of a numeric field (`EmptyStore` when empty)
//! - text export, and a best-effort scan of an existing export

mod errors;
mod export;
mod store;

pub use errors::{RegistryError, RegistryResult};
pub use export::{LoadReport, EXPORT_HEADER, EXPORT_SEPARATOR, PATIENT_LINE_PREFIX};
pub use store::{NumericField, PatientField, PatientRegistry};
