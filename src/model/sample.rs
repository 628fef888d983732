//! The fixed ten-employee sample set

use super::employee::Employee;

/// Returns the sample employees in id order.
///
/// Five male, five female; salaries total 776000.
pub fn sample_employees() -> Vec<Employee> {
    vec![
        Employee::new(1, "John", "Doe", "john.doe@company.com", "Male", "Software Engineer", "MIT", "EMP001", 75000.0),
        Employee::new(2, "Jane", "Smith", "jane.smith@company.com", "Female", "Product Manager", "Stanford", "EMP002", 85000.0),
        Employee::new(3, "Mike", "Johnson", "mike.johnson@company.com", "Male", "Data Analyst", "Harvard", "EMP003", 65000.0),
        Employee::new(4, "Sarah", "Williams", "sarah.williams@company.com", "Female", "Software Engineer", "MIT", "EMP004", 78000.0),
        Employee::new(5, "David", "Brown", "david.brown@company.com", "Male", "Manager", "Stanford", "EMP005", 95000.0),
        Employee::new(6, "Lisa", "Davis", "lisa.davis@company.com", "Female", "Designer", "RISD", "EMP006", 60000.0),
        Employee::new(7, "Robert", "Wilson", "robert.wilson@company.com", "Male", "Software Engineer", "CalTech", "EMP007", 72000.0),
        Employee::new(8, "Emma", "Taylor", "emma.taylor@company.com", "Female", "Data Scientist", "MIT", "EMP008", 82000.0),
        Employee::new(9, "James", "Anderson", "james.anderson@company.com", "Male", "Product Manager", "Harvard", "EMP009", 88000.0),
        Employee::new(10, "olivia", "Thomas", "olivia.thomas@company.com", "Female", "Software Engineer", "Stanford", "EMP010", 76000.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ten_unique_codes() {
        let employees = sample_employees();
        assert_eq!(employees.len(), 10);
        let codes: HashSet<_> = employees.iter().map(|e| e.employee_code()).collect();
        assert_eq!(codes.len(), 10);
    }

    #[test]
    fn test_salary_total() {
        let total: f64 = sample_employees().iter().map(|e| e.salary()).sum();
        assert_eq!(total, 776000.0);
    }
}
