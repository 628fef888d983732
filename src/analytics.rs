//! Employee analytics on top of the query engine

use std::collections::HashMap;

use crate::model::Employee;
use crate::query::RecordQuery;

/// Salary bands, lowest first
pub const SALARY_BANDS: [&str; 4] = ["Below 60k", "60k-80k", "80k-100k", "Above 100k"];

/// Band label for a salary. Lower bounds are inclusive.
pub fn salary_band(salary: f64) -> &'static str {
    if salary < 60_000.0 {
        SALARY_BANDS[0]
    } else if salary < 80_000.0 {
        SALARY_BANDS[1]
    } else if salary < 100_000.0 {
        SALARY_BANDS[2]
    } else {
        SALARY_BANDS[3]
    }
}

/// Number of employees per salary band; empty bands are omitted
pub fn salary_range_analysis(employees: &RecordQuery<Employee>) -> HashMap<&'static str, u64> {
    employees.group_count(|e| salary_band(e.salary()))
}

/// Search criteria; `None` matches anything
#[derive(Debug, Clone, Default)]
pub struct EmployeeCriteria<'a> {
    pub job_title: Option<&'a str>,
    pub gender: Option<&'a str>,
    pub min_salary: f64,
}

/// Employees matching every criterion, in source order
pub fn find_employees(
    employees: &RecordQuery<Employee>,
    criteria: &EmployeeCriteria<'_>,
) -> RecordQuery<Employee> {
    employees.filter(|e| {
        criteria.job_title.map_or(true, |t| t == e.job_title())
            && criteria.gender.map_or(true, |g| g == e.gender())
            && e.salary() >= criteria.min_salary
    })
}
