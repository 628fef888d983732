//! Observability for recordq
//!
//! Structured JSON logging of typed events.
//!
//! # Principles
//!
//! 1. Observability is read-only
//! 2. No side effects on execution
//! 3. No async or background threads
//! 4. Deterministic output
//!
//! # Usage
//!
//! ```ignore
//! use recordq::observability::{log_event_with_fields, Event, Logger, Severity};
//!
//! Logger::set_min_severity(Severity::Info);
//! log_event_with_fields(Event::PatientAdded, &[("patient_id", "P001")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

/// Log an event at its default severity
pub fn log_event(event: Event) {
    Logger::log(event.severity(), event.as_str(), &[]);
}

/// Log an event with fields at its default severity
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}
