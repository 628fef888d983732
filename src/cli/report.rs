//! Plain-text employee analysis report
//!
//! Every section is computed with the query engine. Groups print in key
//! order; only the find-any line may differ between runs.

use std::collections::{BTreeMap, HashMap};
use std::fmt::Display;
use std::io::{self, Write};

use crate::analytics::{find_employees, salary_range_analysis, EmployeeCriteria, SALARY_BANDS};
use crate::model::Employee;
use crate::query::{Aggregate, AggregateOp, RecordQuery, SortDirection};

fn money(aggregate: Aggregate) -> String {
    match aggregate.value() {
        Some(v) => format!("${:.2}", v),
        None => "n/a".to_string(),
    }
}

fn list<T: Display>(items: impl IntoIterator<Item = T>) -> String {
    let joined: Vec<String> = items.into_iter().map(|i| i.to_string()).collect();
    format!("[{}]", joined.join(", "))
}

fn sorted<K: Ord, V>(map: HashMap<K, V>) -> BTreeMap<K, V> {
    map.into_iter().collect()
}

fn name_of(found: Option<&Employee>) -> String {
    found.map_or_else(|| "None".to_string(), Employee::full_name)
}

pub fn write_report<W: Write>(employees: &RecordQuery<Employee>, out: &mut W) -> io::Result<()> {
    let salary = |e: &Employee| e.salary();

    writeln!(out, "=== Employee Record Query Report ===")?;

    writeln!(out, "\n1. FILTERING")?;
    let male = employees.filter(|e| e.gender() == "Male");
    writeln!(out, "Male Employees: {}", male.len())?;
    let high = employees.filter(|e| e.salary() > 80_000.0);
    writeln!(out, "High Salary Employees (>80k): {}", high.len())?;
    let engineers = employees.filter(|e| e.job_title() == "Software Engineer");
    writeln!(out, "Software Engineers: {}", engineers.len())?;

    writeln!(out, "\n2. MAPPING")?;
    writeln!(out, "Employee Names: {}", list(employees.project(Employee::full_name)))?;
    let domains = employees
        .project(|e| e.email_domain().to_string())
        .distinct();
    writeln!(out, "Email Domains: {}", list(domains))?;
    let upper = employees.project(|e| e.full_name().to_uppercase()).limit(3);
    writeln!(out, "Uppercase Names: {}...", list(upper))?;

    writeln!(out, "\n3. SORTING")?;
    let by_salary = employees.sort_by(salary, SortDirection::Asc);
    match by_salary.iter().next() {
        Some(lowest) => writeln!(
            out,
            "Lowest Salary: {} - ${:.2}",
            lowest.full_name(),
            lowest.salary()
        )?,
        None => writeln!(out, "Lowest Salary: None")?,
    }
    let names_desc = employees
        .sort_by(|e| e.first_name().to_string(), SortDirection::Desc)
        .limit(3)
        .project(|e| e.first_name().to_string());
    writeln!(out, "Names in Descending Order: {}", list(names_desc))?;

    writeln!(out, "\n4. GROUPING")?;
    let groupings: [(&str, fn(&Employee) -> String); 3] = [
        ("Gender", |e| e.gender().to_string()),
        ("Job Title", |e| e.job_title().to_string()),
        ("University", |e| e.university().to_string()),
    ];
    for (label, key) in groupings {
        writeln!(out, "Grouped by {}:", label)?;
        for (k, members) in sorted(employees.group_by(key)) {
            writeln!(out, "  {}: {} employees", k, members.len())?;
        }
    }

    writeln!(out, "\n5. AGGREGATION")?;
    writeln!(out, "Total Salary: {}", money(employees.aggregate(salary, AggregateOp::Sum)))?;
    writeln!(out, "Average Salary: {}", money(employees.aggregate(salary, AggregateOp::Average)))?;
    writeln!(out, "Maximum Salary: {}", money(employees.aggregate(salary, AggregateOp::Max)))?;
    writeln!(out, "Minimum Salary: {}", money(employees.aggregate(salary, AggregateOp::Min)))?;
    writeln!(out, "Total Employees: {}", employees.count())?;

    writeln!(out, "\n6. STATISTICS")?;
    let stats = employees.summary(salary);
    let opt = |v: Option<f64>| v.map_or_else(|| "n/a".to_string(), |v| format!("${:.2}", v));
    writeln!(out, "Salary Statistics:")?;
    writeln!(out, "  Count: {}", stats.count)?;
    writeln!(out, "  Sum: ${:.2}", stats.sum)?;
    writeln!(out, "  Average: {}", opt(stats.average))?;
    writeln!(out, "  Min: {}", opt(stats.min))?;
    writeln!(out, "  Max: {}", opt(stats.max))?;

    writeln!(out, "\n7. PARTITIONING")?;
    let (above, rest) = employees.partition(|e| e.salary() > 75_000.0);
    writeln!(out, "High Salary (>75k): {}", above.len())?;
    writeln!(out, "Low Salary (<=75k): {}", rest.len())?;

    writeln!(out, "\n8. FINDING")?;
    writeln!(
        out,
        "First High Salary Employee: {}",
        name_of(employees.find_first(|e| e.salary() > 80_000.0))
    )?;
    writeln!(
        out,
        "Any MIT Employee: {}",
        name_of(employees.find_any(|e| e.university() == "MIT"))
    )?;

    writeln!(out, "\n9. MATCHING")?;
    writeln!(
        out,
        "All employees have salary > 50k: {}",
        employees.all_match(|e| e.salary() > 50_000.0)
    )?;
    writeln!(
        out,
        "Any Harvard employee: {}",
        employees.any_match(|e| e.university() == "Harvard")
    )?;
    writeln!(
        out,
        "No employee has salary > 100k: {}",
        employees.none_match(|e| e.salary() > 100_000.0)
    )?;

    writeln!(out, "\n10. COMPLEX")?;
    writeln!(out, "Average Salary by Gender:")?;
    let by_gender =
        employees.group_by_aggregate(|e| e.gender().to_string(), salary, AggregateOp::Average);
    for (gender, average) in sorted(by_gender) {
        writeln!(out, "  {}: {}", gender, money(average))?;
    }
    writeln!(out, "Count by Job Title:")?;
    for (title, count) in sorted(employees.group_count(|e| e.job_title().to_string())) {
        writeln!(out, "  {}: {}", title, count)?;
    }
    writeln!(out, "Top 3 Highest Paid:")?;
    for e in employees.sort_by(salary, SortDirection::Desc).limit(3).iter() {
        writeln!(out, "  {} - ${:.2}", e.full_name(), e.salary())?;
    }

    writeln!(out, "\n11. DISTINCT")?;
    let universities = employees
        .project(|e| e.university().to_string())
        .distinct()
        .sort_by(|u| u.clone(), SortDirection::Asc);
    writeln!(out, "Distinct Universities: {}", list(universities))?;
    let titles = employees.project(|e| e.job_title().to_string()).distinct();
    writeln!(out, "Distinct Job Titles: {}", list(titles))?;

    writeln!(out, "\n12. PARALLEL")?;
    writeln!(
        out,
        "Total Salary (Parallel): {}",
        money(employees.par_aggregate(salary, AggregateOp::Sum))
    )?;
    let gender_counts = employees.par_group_aggregate(
        |e| e.gender().to_string(),
        |_| 0.0,
        AggregateOp::Count,
    );
    let rendered = sorted(gender_counts)
        .into_iter()
        .map(|(gender, count)| format!("{}={}", gender, count));
    writeln!(out, "Gender Count (Parallel): {}", list(rendered))?;

    writeln!(out, "\n13. SALARY RANGES")?;
    let ranges = salary_range_analysis(employees);
    for band in SALARY_BANDS {
        if let Some(count) = ranges.get(band) {
            writeln!(out, "  {}: {} employees", band, count)?;
        }
    }

    writeln!(out, "\n14. CUSTOM SEARCH")?;
    let criteria = EmployeeCriteria {
        job_title: Some("Software Engineer"),
        gender: None,
        min_salary: 75_000.0,
    };
    let found = find_employees(employees, &criteria);
    writeln!(
        out,
        "Software Engineers earning >= $75000.00: {}",
        list(found.project(Employee::full_name))
    )?;

    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::sample_employees;

    fn render(employees: Vec<Employee>) -> String {
        let mut out = Vec::new();
        write_report(&RecordQuery::new(employees), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_report_on_sample() {
        let report = render(sample_employees());

        assert!(report.contains("Male Employees: 5"));
        assert!(report.contains("High Salary Employees (>80k): 4"));
        assert!(report.contains("Software Engineers: 4"));
        assert!(report.contains("Email Domains: [company.com]"));
        assert!(report.contains("Lowest Salary: Lisa Davis - $60000.00"));
        assert!(report.contains("Total Salary: $776000.00"));
        assert!(report.contains("Average Salary: $77600.00"));
        assert!(report.contains("High Salary (>75k): 6"));
        assert!(report.contains("First High Salary Employee: Jane Smith"));
        assert!(report.contains("Gender Count (Parallel): [Female=5, Male=5]"));
        assert!(report.contains("  60k-80k: 6 employees"));
        assert!(report.contains("Distinct Universities: [CalTech, Harvard, MIT, RISD, Stanford]"));
    }

    #[test]
    fn test_any_mit_employee_is_from_mit() {
        let report = render(sample_employees());
        let line = report
            .lines()
            .find(|l| l.starts_with("Any MIT Employee: "))
            .unwrap();
        let name = &line["Any MIT Employee: ".len()..];
        assert!(["John Doe", "Sarah Williams", "Emma Taylor"].contains(&name));
    }

    #[test]
    fn test_report_on_empty_input() {
        let report = render(Vec::new());

        assert!(report.contains("Average Salary: n/a"));
        assert!(report.contains("Lowest Salary: None"));
        assert!(report.contains("All employees have salary > 50k: true"));
        assert!(report.contains("Total Employees: 0"));
    }
}
