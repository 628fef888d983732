//! CLI command implementations
//!
//! `employees` and `report` run against the built-in sample employees.
//! `clinic` owns a fresh patient registry for the life of the session.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::{json, Value};

use crate::model::{sample_employees, Employee, Record};
use crate::observability::{log_event_with_fields, Event, Logger, Severity};
use crate::query::{
    ensure_field, par_aggregate, par_group_aggregate, Aggregate, AggregateOp, AggregateSpec,
    FieldPredicate, QueryError, QueryResult, RecordQuery, SortSpec,
};
use crate::registry::PatientRegistry;

use super::args::{Cli, Command, EmployeeQueryArgs};
use super::config::Config;
use super::errors::{CliError, CliResult};
use super::io::{write_error, write_response};
use super::report::write_report;
use super::session::ClinicSession;

/// Main CLI entry point
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    let log_level = cli.log_level.as_deref().map(parse_severity).transpose()?;
    run_command(cli.command, log_level)
}

/// Execute a CLI command. An explicit `log_level` wins over config.
pub fn run_command(cmd: Command, log_level: Option<Severity>) -> CliResult<()> {
    if let Some(severity) = log_level {
        Logger::set_min_severity(severity);
    }

    match cmd {
        Command::Employees(args) => employees(&args),
        Command::Report => report(),
        Command::Clinic { config, data_file } => {
            clinic(config.as_deref(), data_file, log_level.is_some())
        }
    }
}

fn parse_severity(level: &str) -> CliResult<Severity> {
    level.parse().map_err(CliError::config_error)
}

/// One-shot declarative query. Query errors become an error response,
/// not a failed process.
pub fn employees(args: &EmployeeQueryArgs) -> CliResult<()> {
    let sample = RecordQuery::new(sample_employees());

    match execute_employee_query(&sample, args) {
        Ok(data) => {
            let parallel = args.parallel.to_string();
            log_event_with_fields(
                Event::QueryExecuted,
                &[("mode", query_mode(args)), ("parallel", parallel.as_str())],
            );
            write_response(data)
        }
        Err(e) => {
            let message = e.to_string();
            log_event_with_fields(
                Event::QueryRejected,
                &[("code", e.code()), ("reason", message.as_str())],
            );
            write_error(e.code(), &message)
        }
    }
}

/// Print the full analysis report to stdout
pub fn report() -> CliResult<()> {
    let sample = RecordQuery::new(sample_employees());
    let stdout = io::stdout();
    write_report(&sample, &mut stdout.lock())?;
    Ok(())
}

/// Interactive clinic session on stdin/stdout
pub fn clinic(
    config_path: Option<&Path>,
    data_file: Option<PathBuf>,
    log_level_overridden: bool,
) -> CliResult<()> {
    let config = Config::load_or_default(config_path)?;
    if !log_level_overridden {
        Logger::set_min_severity(config.severity()?);
    }

    let data_file = data_file.unwrap_or_else(|| config.data_path().to_path_buf());
    let data_display = data_file.display().to_string();
    let load_on_start = config.load_on_start.to_string();
    log_event_with_fields(
        Event::ConfigLoaded,
        &[
            ("data_file", data_display.as_str()),
            ("load_on_start", load_on_start.as_str()),
        ],
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = ClinicSession::new(
        PatientRegistry::new(),
        data_file,
        stdin.lock(),
        stdout.lock(),
    );

    if config.load_on_start {
        session.load_existing()?;
    }
    session.run()
}

fn query_mode(args: &EmployeeQueryArgs) -> &'static str {
    if args.distinct.is_some() {
        "distinct"
    } else if args.group_by.is_some() {
        "group"
    } else if args.aggregate.is_some() {
        "aggregate"
    } else {
        "records"
    }
}

/// Runs filter, sort and limit in that order, then produces exactly one
/// of: distinct values, groups, a single aggregate, or the records.
pub fn execute_employee_query(
    employees: &RecordQuery<Employee>,
    args: &EmployeeQueryArgs,
) -> QueryResult<Value> {
    let predicates = args
        .filters
        .iter()
        .map(|f| f.parse::<FieldPredicate>())
        .collect::<QueryResult<Vec<_>>>()?;
    let aggregate = args
        .aggregate
        .as_deref()
        .map(str::parse::<AggregateSpec>)
        .transpose()?;

    let mut selected = employees.filter_fields(&predicates)?;
    if let Some(sort) = &args.sort {
        selected = selected.sort_by_spec(&sort.parse::<SortSpec>()?)?;
    }
    if let Some(n) = args.limit {
        selected = selected.limit(n);
    }

    if let Some(field) = &args.distinct {
        if aggregate.is_some() {
            return Err(QueryError::InvalidAggregate(
                "--aggregate cannot be combined with --distinct".to_string(),
            ));
        }
        let values = selected.distinct_field(field)?;
        return Ok(json!({ "distinct": field, "values": values }));
    }

    if let Some(group_field) = &args.group_by {
        ensure_field::<Employee>(group_field)?;
        return match aggregate {
            Some(spec) => {
                let groups = group_aggregate(&selected, group_field, &spec, args.parallel)?;
                Ok(json!({
                    "group_by": group_field,
                    "aggregate": spec.op.as_str(),
                    "field": spec.field,
                    "groups": groups,
                }))
            }
            None => {
                let groups: BTreeMap<String, Vec<Employee>> = if args.parallel {
                    selected
                        .par_group_by(|e| group_key(e, group_field))
                        .into_iter()
                        .collect()
                } else {
                    selected.group_by_field(group_field)?.into_iter().collect()
                };
                Ok(json!({ "group_by": group_field, "groups": groups }))
            }
        };
    }

    if let Some(spec) = aggregate {
        let value = aggregate_selected(&selected, &spec, args.parallel)?;
        return Ok(json!({
            "aggregate": spec.op.as_str(),
            "field": spec.field,
            "value": value,
        }));
    }

    Ok(json!({ "count": selected.len(), "records": selected.as_slice() }))
}

fn group_key(employee: &Employee, field: &str) -> String {
    employee
        .field(field)
        .map(|v| v.to_string())
        .unwrap_or_default()
}

fn aggregate_selected(
    selected: &RecordQuery<Employee>,
    spec: &AggregateSpec,
    parallel: bool,
) -> QueryResult<Aggregate> {
    let Some(field) = spec.field.as_deref() else {
        return Ok(Aggregate::Count(selected.len() as u64));
    };
    if !parallel {
        return selected.aggregate_field(field, spec.op);
    }

    let column = keyed_column(selected, None, value_field(field, spec.op)?)?;
    Ok(par_aggregate(&column, |(_, v)| *v, spec.op))
}

fn group_aggregate(
    selected: &RecordQuery<Employee>,
    group_field: &str,
    spec: &AggregateSpec,
    parallel: bool,
) -> QueryResult<BTreeMap<String, Aggregate>> {
    let groups = match (spec.field.as_deref(), parallel) {
        (Some(field), false) => selected.group_aggregate_field(group_field, field, spec.op)?,
        (None, false) => selected
            .group_by_field(group_field)?
            .into_iter()
            .map(|(k, members)| (k, Aggregate::Count(members.len() as u64)))
            .collect(),
        (field, true) => {
            let value = match field {
                Some(field) => value_field(field, spec.op)?,
                None => None,
            };
            let column = keyed_column(selected, Some(group_field), value)?;
            par_group_aggregate(&column, |(k, _)| k.clone(), |(_, v)| *v, spec.op)
        }
    };
    Ok(groups.into_iter().collect())
}

/// Field whose values feed the accumulator; counting needs none
fn value_field(field: &str, op: AggregateOp) -> QueryResult<Option<&str>> {
    ensure_field::<Employee>(field)?;
    Ok(if op == AggregateOp::Count {
        None
    } else {
        Some(field)
    })
}

/// (group key, numeric value) per record, ready for the parallel path
fn keyed_column(
    selected: &RecordQuery<Employee>,
    group_field: Option<&str>,
    value_field: Option<&str>,
) -> QueryResult<Vec<(String, f64)>> {
    selected
        .iter()
        .enumerate()
        .map(|(index, e)| {
            let key = match group_field {
                Some(field) => e
                    .field(field)
                    .ok_or(QueryError::UngroupableRecord { index })?
                    .to_string(),
                None => String::new(),
            };
            let value = match value_field {
                Some(field) => {
                    let v = e
                        .field(field)
                        .ok_or_else(|| QueryError::UnknownField(field.to_string()))?;
                    v.as_f64().ok_or_else(|| QueryError::NonNumericField {
                        field: field.to_string(),
                        type_name: v.type_name(),
                    })?
                }
                None => 0.0,
            };
            Ok((key, value))
        })
        .collect()
}
