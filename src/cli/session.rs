//! Interactive clinic menu
//!
//! Reads one line per prompt from any `BufRead` and writes to any
//! `Write`, so a whole session can be replayed from a string.
//!
//! Registry errors are printed as `CODE: message` and the loop keeps
//! going. End of input ends the session cleanly at any prompt.
//!
//! Text answers (ID, name, blood type) are kept as typed; only the menu
//! choice and numeric answers ignore surrounding whitespace.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::model::{BloodType, Patient};
use crate::observability::{log_event, log_event_with_fields, Event};
use crate::registry::{PatientRegistry, RegistryError, RegistryResult};

use super::errors::CliResult;
use super::io::{parse_number, read_line};

const MENU: [&str; 7] = [
    "1. Add Patient",
    "2. Find Patient",
    "3. Display All Patients",
    "4. Calculate Average Temperature",
    "5. Find Patients by Blood Type",
    "6. Save Data",
    "7. Exit",
];

enum Flow {
    Continue,
    Exit,
}

pub struct ClinicSession<R, W> {
    registry: PatientRegistry,
    data_file: PathBuf,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ClinicSession<R, W> {
    pub fn new(registry: PatientRegistry, data_file: PathBuf, input: R, output: W) -> Self {
        Self {
            registry,
            data_file,
            input,
            output,
        }
    }

    pub fn registry(&self) -> &PatientRegistry {
        &self.registry
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Scans the export file. Failures are reported, never fatal.
    pub fn load_existing(&mut self) -> CliResult<()> {
        match self.registry.load(&self.data_file) {
            Ok(report) if !report.file_found => {
                writeln!(
                    self.output,
                    "Patient data file not found. Starting with empty registry."
                )?;
            }
            Ok(report) => {
                writeln!(
                    self.output,
                    "Found {} patient record(s) in {}.",
                    report.patient_lines,
                    self.data_file.display()
                )?;
            }
            Err(e) => {
                let reason = e.to_string();
                log_event_with_fields(Event::RegistryLoadFailed, &[("reason", reason.as_str())]);
                self.report(&e)?;
            }
        }
        Ok(())
    }

    /// Runs the menu until option 7 or end of input
    pub fn run(&mut self) -> CliResult<()> {
        log_event(Event::SessionStart);

        loop {
            self.print_menu()?;
            let Some(line) = self.prompt("Choose option: ")? else {
                break;
            };

            let flow = match parse_number::<u32>("menu option", &line) {
                Ok(choice) => self.dispatch(choice)?,
                Err(e) => {
                    self.report(&e)?;
                    Flow::Continue
                }
            };

            if let Flow::Exit = flow {
                break;
            }
        }

        log_event(Event::SessionEnd);
        Ok(())
    }

    fn dispatch(&mut self, choice: u32) -> CliResult<Flow> {
        match choice {
            1 => self.add_patient(),
            2 => self.find_patient(),
            3 => self.list_patients(),
            4 => self.average_temperature(),
            5 => self.patients_by_blood_type(),
            6 => self.save(),
            7 => {
                writeln!(self.output, "Goodbye!")?;
                Ok(Flow::Exit)
            }
            _ => {
                writeln!(self.output, "Invalid option. Please try again.")?;
                Ok(Flow::Continue)
            }
        }
    }

    fn print_menu(&mut self) -> CliResult<()> {
        writeln!(self.output, "\n=== Patient Registry ===")?;
        for entry in MENU {
            writeln!(self.output, "{}", entry)?;
        }
        Ok(())
    }

    fn prompt(&mut self, label: &str) -> CliResult<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;
        read_line(&mut self.input)
    }

    fn report(&mut self, err: &RegistryError) -> CliResult<()> {
        writeln!(self.output, "{}: {}", err.code(), err)?;
        Ok(())
    }

    fn add_patient(&mut self) -> CliResult<Flow> {
        let Some(id) = self.prompt("Enter Patient ID: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(name) = self.prompt("Enter Patient Name: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(age) = self.prompt("Enter Age: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(temperature) = self.prompt("Enter Temperature (°F): ")? else {
            return Ok(Flow::Exit);
        };
        let blood_prompt = format!("Enter Blood Type ({}): ", BloodType::labels().join(", "));
        let Some(blood_type) = self.prompt(&blood_prompt)? else {
            return Ok(Flow::Exit);
        };

        let added: RegistryResult<String> = parse_number::<i64>("age", &age)
            .and_then(|age| {
                parse_number::<f64>("temperature", &temperature).map(|temp| (age, temp))
            })
            .and_then(|(age, temperature)| {
                self.registry
                    .add(&id, &name, age, temperature, &blood_type)
                    .map(Patient::to_string)
            });

        match added {
            Ok(patient) => writeln!(self.output, "Patient added successfully: {}", patient)?,
            Err(e) => self.report(&e)?,
        }
        Ok(Flow::Continue)
    }

    fn find_patient(&mut self) -> CliResult<Flow> {
        let Some(id) = self.prompt("Enter Patient ID to search: ")? else {
            return Ok(Flow::Exit);
        };

        match self.registry.find(&id).map(Patient::to_string) {
            Ok(patient) => writeln!(self.output, "Patient found: {}", patient)?,
            Err(e) => self.report(&e)?,
        }
        Ok(Flow::Continue)
    }

    fn list_patients(&mut self) -> CliResult<Flow> {
        if self.registry.is_empty() {
            writeln!(self.output, "No patients in the registry.")?;
            return Ok(Flow::Continue);
        }

        let patients = sorted_lines(self.registry.list_all());
        writeln!(self.output, "All Patients:")?;
        writeln!(self.output, "=============")?;
        for line in patients {
            writeln!(self.output, "{}", line)?;
        }
        Ok(Flow::Continue)
    }

    fn average_temperature(&mut self) -> CliResult<Flow> {
        match self.registry.average_temperature() {
            Ok(avg) => writeln!(self.output, "Average patient temperature: {:.2}°F", avg)?,
            Err(e) => self.report(&e)?,
        }
        Ok(Flow::Continue)
    }

    fn patients_by_blood_type(&mut self) -> CliResult<Flow> {
        let Some(label) = self.prompt("Enter Blood Type: ")? else {
            return Ok(Flow::Exit);
        };

        let matches = sorted_lines(self.registry.patients_by_blood_type(&label));
        if matches.is_empty() {
            writeln!(self.output, "No patients found with blood type: {}", label)?;
        } else {
            writeln!(self.output, "Patients with blood type {}:", label)?;
            for line in matches {
                writeln!(self.output, "{}", line)?;
            }
        }
        Ok(Flow::Continue)
    }

    fn save(&mut self) -> CliResult<Flow> {
        match self.registry.save(&self.data_file) {
            Ok(()) => writeln!(
                self.output,
                "Patient data saved to: {}",
                self.data_file.display()
            )?,
            Err(e) => {
                let reason = e.to_string();
                log_event_with_fields(Event::ExportFailed, &[("reason", reason.as_str())]);
                self.report(&e)?;
            }
        }
        Ok(Flow::Continue)
    }
}

/// Display lines ordered by patient ID
fn sorted_lines(mut patients: Vec<&Patient>) -> Vec<String> {
    patients.sort_by(|a, b| a.patient_id().cmp(b.patient_id()));
    patients.into_iter().map(Patient::to_string).collect()
}
