//! CLI module for recordq
//!
//! Provides command-line interface for:
//! - employees: one-shot declarative query, JSON response on stdout
//! - report: full analysis report of the sample employees
//! - clinic: interactive patient registry menu

mod args;
mod commands;
mod config;
mod errors;
mod io;
mod report;
mod session;

pub use args::{Cli, Command, EmployeeQueryArgs};
pub use commands::{clinic, employees, execute_employee_query, report, run, run_command};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{parse_number, read_line, write_error, write_response};
pub use report::write_report;
pub use session::ClinicSession;
