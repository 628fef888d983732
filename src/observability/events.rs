//! Observable events for recordq
//!
//! Events are explicit and typed. Each carries its default severity.

use std::fmt;

use super::logger::Severity;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    /// Interactive session begins
    SessionStart,
    /// Interactive session ends
    SessionEnd,
    /// Configuration loaded
    ConfigLoaded,

    // Registry
    /// Export file scanned at startup
    RegistryLoaded,
    /// No export file, starting empty
    RegistryLoadSkipped,
    /// Export file unreadable, starting empty
    RegistryLoadFailed,
    /// One `Patient[` line seen while scanning
    ExportLineSeen,
    /// Patient inserted
    PatientAdded,
    /// Patient add refused (duplicate or invalid)
    PatientRejected,
    /// Export written
    ExportWritten,
    /// Export could not be written
    ExportFailed,

    // Query
    /// Query executed successfully
    QueryExecuted,
    /// Query rejected (bad field, predicate or aggregate)
    QueryRejected,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::SessionStart => "SESSION_START",
            Event::SessionEnd => "SESSION_END",
            Event::ConfigLoaded => "CONFIG_LOADED",

            Event::RegistryLoaded => "REGISTRY_LOADED",
            Event::RegistryLoadSkipped => "REGISTRY_LOAD_SKIPPED",
            Event::RegistryLoadFailed => "REGISTRY_LOAD_FAILED",
            Event::ExportLineSeen => "EXPORT_LINE_SEEN",
            Event::PatientAdded => "PATIENT_ADDED",
            Event::PatientRejected => "PATIENT_REJECTED",
            Event::ExportWritten => "EXPORT_WRITTEN",
            Event::ExportFailed => "EXPORT_FAILED",

            Event::QueryExecuted => "QUERY_EXECUTED",
            Event::QueryRejected => "QUERY_REJECTED",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Event::ExportLineSeen => Severity::Trace,
            Event::PatientRejected | Event::QueryRejected | Event::RegistryLoadFailed => {
                Severity::Warn
            }
            Event::ExportFailed => Severity::Error,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
