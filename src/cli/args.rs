//! CLI argument definitions using clap
//!
//! Commands:
//! - recordq employees [--filter F]... [--sort S] [--limit N] [--group-by F] [--aggregate A] [--distinct F]
//! - recordq report
//! - recordq clinic [--config <path>] [--data-file <path>]

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// recordq - in-memory record queries and a validated patient registry
#[derive(Parser, Debug)]
#[command(name = "recordq")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Minimum log severity written to stderr (TRACE|INFO|WARN|ERROR|FATAL)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a query against the sample employees and print JSON
    Employees(EmployeeQueryArgs),

    /// Print the full employee analysis report
    Report,

    /// Start the interactive patient registry menu
    Clinic {
        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Export file used for load and save (overrides config)
        #[arg(long)]
        data_file: Option<PathBuf>,
    },
}

/// Declarative query over the sample employees.
///
/// Stages run in order: filter, sort, limit, then one of
/// distinct / group-by / aggregate / list.
#[derive(Args, Debug, Default, Clone)]
pub struct EmployeeQueryArgs {
    /// Predicate such as gender=Male or salary>=80000 (repeatable, ANDed)
    #[arg(long = "filter")]
    pub filters: Vec<String>,

    /// Sort field, optionally with :asc or :desc
    #[arg(long)]
    pub sort: Option<String>,

    /// Keep only the first N records
    #[arg(long)]
    pub limit: Option<usize>,

    /// Distinct values of a field, in first-seen order
    #[arg(long, conflicts_with = "group_by")]
    pub distinct: Option<String>,

    /// Group by a field
    #[arg(long)]
    pub group_by: Option<String>,

    /// Aggregate such as avg:salary, max:salary or count
    #[arg(long)]
    pub aggregate: Option<String>,

    /// Run grouping and aggregation on the parallel path
    #[arg(long)]
    pub parallel: bool,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
