//! Clinic Session Tests
//!
//! Scripted runs of the interactive menu:
//! - Errors are reported and the loop continues
//! - Saving writes the export file
//! - A previous export is scanned on start
//! - End of input ends the session without panicking

use std::fs;
use std::io::Cursor;
use std::path::Path;

use recordq::cli::ClinicSession;
use recordq::registry::{PatientRegistry, EXPORT_HEADER};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn session(data_file: &Path, script: &str) -> ClinicSession<Cursor<String>, Vec<u8>> {
    ClinicSession::new(
        PatientRegistry::new(),
        data_file.to_path_buf(),
        Cursor::new(script.to_string()),
        Vec::new(),
    )
}

fn output(session: ClinicSession<Cursor<String>, Vec<u8>>) -> String {
    String::from_utf8(session.into_output()).unwrap()
}

const ADD_ALICE: &str = "1\nP001\nAlice\n34\n98.6\nO+\n";
const ADD_BOB: &str = "1\nP002\nBob\n58\n101.2\nA-\n";

// =============================================================================
// Menu Flow Tests
// =============================================================================

/// Two adds, list and average, then exit.
#[test]
fn test_full_session() {
    let tmp = TempDir::new().unwrap();
    let script = format!("{}{}3\n4\n7\n", ADD_ALICE, ADD_BOB);
    let mut s = session(&tmp.path().join("data.txt"), &script);

    s.run().unwrap();
    assert_eq!(s.registry().len(), 2);

    let out = output(s);
    assert!(out.contains("All Patients:"));
    let alice = out.find("Patient[ID=P001").unwrap();
    let bob = out.rfind("Patient[ID=P002").unwrap();
    assert!(alice < bob);
    assert!(out.contains("Average patient temperature: 99.90°F"));
    assert!(out.ends_with("Goodbye!\n"));
}

/// A rejected add is reported and the session carries on.
#[test]
fn test_errors_do_not_end_session() {
    let tmp = TempDir::new().unwrap();
    let script = format!("{}{}2\nP404\n2\n\n7\n", ADD_ALICE, "1\nP001\nEve\n20\n98.0\nB+\n");
    let mut s = session(&tmp.path().join("data.txt"), &script);

    s.run().unwrap();
    assert_eq!(s.registry().find("P001").unwrap().name(), "Alice");

    let out = output(s);
    assert!(out.contains("RQ_DUPLICATE_IDENTIFIER"));
    assert!(out.contains("RQ_NOT_FOUND"));
    assert!(out.contains("RQ_INVALID_IDENTIFIER"));
    assert!(out.contains("Goodbye!"));
}

/// Out-of-range temperature never reaches the registry.
#[test]
fn test_invalid_temperature_rejected() {
    let tmp = TempDir::new().unwrap();
    let mut s = session(
        &tmp.path().join("data.txt"),
        "1\nP001\nAlice\n34\n120\nO+\n7\n",
    );

    s.run().unwrap();
    assert!(s.registry().is_empty());
    assert!(output(s).contains("RQ_VALIDATION_FAILED"));
}

/// Closing input without choosing exit still ends cleanly.
#[test]
fn test_end_of_input() {
    let tmp = TempDir::new().unwrap();
    let mut s = session(&tmp.path().join("data.txt"), ADD_ALICE);

    s.run().unwrap();
    assert_eq!(s.registry().len(), 1);
}

// =============================================================================
// Persistence Tests
// =============================================================================

/// Option 6 writes the export to the configured file.
#[test]
fn test_save_writes_export() {
    let tmp = TempDir::new().unwrap();
    let data_file = tmp.path().join("data.txt");
    let mut s = session(&data_file, &format!("{}6\n7\n", ADD_ALICE));

    s.run().unwrap();
    let out = output(s);
    assert!(out.contains("Patient data saved to:"));

    let content = fs::read_to_string(&data_file).unwrap();
    assert!(content.starts_with(EXPORT_HEADER));
    assert!(content.contains("Patient[ID=P001, Name=Alice, Age=34, Temp=98.6°F, Blood=O+]"));
}

/// A previous export is scanned but not loaded back into the registry.
#[test]
fn test_load_existing_export() {
    let tmp = TempDir::new().unwrap();
    let data_file = tmp.path().join("data.txt");

    let mut first = session(&data_file, &format!("{}{}6\n7\n", ADD_ALICE, ADD_BOB));
    first.run().unwrap();

    let mut second = session(&data_file, "7\n");
    second.load_existing().unwrap();
    second.run().unwrap();
    assert!(second.registry().is_empty());
    assert!(output(second).contains("Found 2 patient record(s)"));
}

/// No export yet: the session starts empty and says so.
#[test]
fn test_load_missing_export() {
    let tmp = TempDir::new().unwrap();
    let mut s = session(&tmp.path().join("absent.txt"), "7\n");

    s.load_existing().unwrap();
    s.run().unwrap();
    assert!(output(s).contains("Starting with empty registry"));
}
