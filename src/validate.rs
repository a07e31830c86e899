//! Field-constraint checks run on an [`Employee`] before persistence.
//!
//! Validation is pure and local: it returns a report of human-readable
//! violations, never an error, and never touches storage. There is no
//! validator for payroll or vacation records — callers check date ordering
//! themselves before submitting those.

use crate::model::Employee;

const MAX_NAME_LEN: usize = 50;
const MAX_AGE: u32 = 120;

/// Outcome of validating a candidate record.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    errors: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    fn fail(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }
}

/// Check the field constraints on a candidate employee.
///
/// Rules: name non-empty and at most 50 characters, age in (0, 120],
/// roll number positive, salary non-negative. Department, position, email,
/// and phone are unconstrained.
pub fn validate_employee(employee: &Employee) -> ValidationReport {
    let mut report = ValidationReport::default();

    if employee.name.trim().is_empty() {
        report.fail("Name is required");
    } else if employee.name.chars().count() > MAX_NAME_LEN {
        report.fail("Name cannot exceed 50 characters");
    }

    if employee.age == 0 {
        report.fail("Invalid age");
    } else if employee.age > MAX_AGE {
        report.fail("Age must be realistic");
    }

    if employee.roll_number == 0 {
        report.fail("Roll number must be positive");
    }

    if employee.salary < rust_decimal::Decimal::ZERO {
        report.fail("Salary cannot be negative");
    }

    report
}
