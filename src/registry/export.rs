//! Patient text export
//!
//! Format:
//!
//! ```text
//! Patient Data Export
//! ==================
//! Patient[ID=P001, Name=Alice, Age=34, Temp=98.6°F, Blood=O+]
//! ...
//! ```
//!
//! The export is write-mostly. Loading only recognizes lines starting
//! with `Patient[` and reports them; it does not rebuild patients.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::observability::{log_event_with_fields, Event, Logger};

use super::errors::{RegistryError, RegistryResult};
use super::store::PatientRegistry;

pub const EXPORT_HEADER: &str = "Patient Data Export";
pub const EXPORT_SEPARATOR: &str = "==================";
pub const PATIENT_LINE_PREFIX: &str = "Patient[";

/// Outcome of a best-effort load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadReport {
    /// False when the file did not exist
    pub file_found: bool,
    pub lines_read: usize,
    /// Lines starting with `Patient[`
    pub patient_lines: usize,
}

impl PatientRegistry {
    /// Writes the export to any writer
    pub fn export_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "{}", EXPORT_HEADER)?;
        writeln!(writer, "{}", EXPORT_SEPARATOR)?;
        for patient in self.list_all() {
            writeln!(writer, "{}", patient)?;
        }
        writer.flush()
    }

    /// Writes the export to `path`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// `Io` if the file cannot be created or written.
    pub fn save(&self, path: &Path) -> RegistryResult<()> {
        let display = path.display().to_string();
        let file = File::create(path).map_err(|e| RegistryError::io(&display, &e))?;
        let mut writer = BufWriter::new(file);
        self.export_to(&mut writer)
            .map_err(|e| RegistryError::io(&display, &e))?;

        let count = self.len().to_string();
        log_event_with_fields(
            Event::ExportWritten,
            &[("path", display.as_str()), ("patients", count.as_str())],
        );
        Ok(())
    }

    /// Scans an export file.
    ///
    /// A missing file is not an error: the registry simply starts empty.
    /// Patient lines are traced but not parsed back into records.
    ///
    /// # Errors
    ///
    /// `Io` for any read failure other than a missing file.
    pub fn load(&self, path: &Path) -> RegistryResult<LoadReport> {
        let display = path.display().to_string();

        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log_event_with_fields(Event::RegistryLoadSkipped, &[("path", display.as_str())]);
                return Ok(LoadReport::default());
            }
            Err(e) => return Err(RegistryError::io(&display, &e)),
        };
        let mut report = LoadReport {
            file_found: true,
            ..LoadReport::default()
        };

        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| RegistryError::io(&display, &e))?;
            report.lines_read += 1;
            if line.starts_with(PATIENT_LINE_PREFIX) {
                report.patient_lines += 1;
                let line_number = (index + 1).to_string();
                Logger::trace(
                    Event::ExportLineSeen.as_str(),
                    &[("line", line.as_str()), ("line_number", line_number.as_str())],
                );
            }
        }

        let lines = report.lines_read.to_string();
        let patients = report.patient_lines.to_string();
        log_event_with_fields(
            Event::RegistryLoaded,
            &[
                ("lines", lines.as_str()),
                ("path", display.as_str()),
                ("patient_lines", patients.as_str()),
            ],
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_export_layout() {
        let mut reg = PatientRegistry::new();
        reg.add("P001", "Alice", 34, 98.6, "O+").unwrap();

        let mut out = Vec::new();
        reg.export_to(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines,
            vec![
                "Patient Data Export",
                "==================",
                "Patient[ID=P001, Name=Alice, Age=34, Temp=98.6°F, Blood=O+]",
            ]
        );
    }

    #[test]
    fn test_empty_export_has_header_only() {
        let reg = PatientRegistry::new();
        let mut out = Vec::new();
        reg.export_to(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 2);
    }

    #[test]
    fn test_load_missing_file() {
        let tmp = TempDir::new().unwrap();
        let reg = PatientRegistry::new();
        let report = reg.load(&tmp.path().join("absent.txt")).unwrap();
        assert!(!report.file_found);
        assert!(reg.is_empty());
    }

    #[test]
    fn test_load_directory_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let reg = PatientRegistry::new();
        let err = reg.load(tmp.path()).unwrap_err();
        assert_eq!(err.code(), "RQ_REGISTRY_IO");
    }

    #[test]
    fn test_save_then_scan() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("patients.txt");

        let mut reg = PatientRegistry::new();
        reg.add("P001", "Alice", 34, 98.6, "O+").unwrap();
        reg.add("P002", "Bob", 52, 100.4, "AB-").unwrap();
        reg.save(&path).unwrap();

        let fresh = PatientRegistry::new();
        let report = fresh.load(&path).unwrap();
        assert!(report.file_found);
        assert_eq!(report.lines_read, 4);
        assert_eq!(report.patient_lines, 2);
        // Lines are reported, not reconstructed
        assert!(fresh.is_empty());
    }

    #[test]
    fn test_save_into_missing_directory_fails() {
        let tmp = TempDir::new().unwrap();
        let reg = PatientRegistry::new();
        let err = reg.save(&tmp.path().join("no/such/dir/out.txt")).unwrap_err();
        assert_eq!(err.code(), "RQ_REGISTRY_IO");
    }
}
