//! Employee record

use std::hash::{Hash, Hasher};

use serde::Serialize;

use super::field::{FieldValue, Record};

/// An employee.
///
/// Identity is the employee code: two employees with the same code are
/// equal regardless of their other fields.
#[derive(Debug, Clone, Serialize)]
pub struct Employee {
    id: i64,
    first_name: String,
    last_name: String,
    email: String,
    gender: String,
    job_title: String,
    university: String,
    employee_code: String,
    salary: f64,
}

impl Employee {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: i64,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        gender: impl Into<String>,
        job_title: impl Into<String>,
        university: impl Into<String>,
        employee_code: impl Into<String>,
        salary: f64,
    ) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            gender: gender.into(),
            job_title: job_title.into(),
            university: university.into(),
            employee_code: employee_code.into(),
            salary,
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn gender(&self) -> &str {
        &self.gender
    }

    pub fn job_title(&self) -> &str {
        &self.job_title
    }

    pub fn university(&self) -> &str {
        &self.university
    }

    pub fn employee_code(&self) -> &str {
        &self.employee_code
    }

    pub fn salary(&self) -> f64 {
        self.salary
    }

    /// "First Last"
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Everything after the first '@', or the whole address if there is none
    pub fn email_domain(&self) -> &str {
        match self.email.find('@') {
            Some(at) => &self.email[at + 1..],
            None => &self.email,
        }
    }
}

impl PartialEq for Employee {
    fn eq(&self, other: &Self) -> bool {
        self.employee_code == other.employee_code
    }
}

impl Eq for Employee {}

impl Hash for Employee {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.employee_code.hash(state);
    }
}

const EMPLOYEE_FIELDS: &[&str] = &[
    "id",
    "first_name",
    "last_name",
    "full_name",
    "email",
    "email_domain",
    "gender",
    "job_title",
    "university",
    "employee_code",
    "salary",
];

impl Record for Employee {
    fn field_names() -> &'static [&'static str] {
        EMPLOYEE_FIELDS
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        let value = match name {
            "id" => FieldValue::Int(self.id),
            "first_name" => self.first_name.as_str().into(),
            "last_name" => self.last_name.as_str().into(),
            "full_name" => self.full_name().into(),
            "email" => self.email.as_str().into(),
            "email_domain" => self.email_domain().into(),
            "gender" => self.gender.as_str().into(),
            "job_title" => self.job_title.as_str().into(),
            "university" => self.university.as_str().into(),
            "employee_code" => self.employee_code.as_str().into(),
            "salary" => FieldValue::Float(self.salary),
            _ => return None,
        };
        Some(value)
    }
}
