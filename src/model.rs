//! # Domain Model: Employees, Payroll, Vacations
//!
//! Three record types, each persisted as its own JSON collection:
//!
//! - [`Employee`]: identified by a caller-assigned roll number. Never hard
//!   deleted — `is_active` flips to false and the record stays on disk.
//! - [`PayrollRecord`]: identified by a repository-assigned sequential id.
//!   References an employee by roll number. No update or delete path exists.
//! - [`VacationRecord`]: sequential id, same scheme as payroll. Its `status`
//!   drives the employee's used-day balance (see the repository module).
//!
//! ## External field names
//!
//! Field names on disk are lower camelCase (`rollNumber`, `vacationDaysUsed`),
//! fixed independently of the Rust names via `rename_all`. Fields added after
//! the first release carry serde defaults so older files keep loading.
//!
//! ## Statuses are strings
//!
//! `payment_status` and vacation `status` are deliberately free-form. No
//! transition table is enforced; any string a caller writes is stored. The one
//! value with behavioral weight is [`APPROVED`] — entering or leaving it
//! adjusts the employee's vacation-day balance.
//!
//! ## Caller-side arithmetic
//!
//! Net pay and day counts are computed by the caller and stored as given; the
//! repository never recomputes them. [`net_pay`] and [`day_span`] are the
//! canonical helpers for that.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The one vacation status value the repository reacts to.
pub const APPROVED: &str = "Approved";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub roll_number: u32,
    pub name: String,
    pub age: u32,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub hire_date: Option<NaiveDate>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    pub salary: Decimal,
    #[serde(default = "default_vacation_days")]
    pub vacation_days_available: i32,
    #[serde(default)]
    pub vacation_days_used: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default = "Utc::now")]
    pub created_date: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub last_modified_date: DateTime<Utc>,
}

impl Employee {
    /// New active employee with default balances (8 available, 0 used).
    /// The repository re-stamps the timestamps on add.
    pub fn new(roll_number: u32, name: impl Into<String>, age: u32, salary: Decimal) -> Self {
        let now = Utc::now();
        Self {
            roll_number,
            name: name.into(),
            age,
            department: None,
            position: None,
            hire_date: None,
            email: None,
            phone: None,
            salary,
            vacation_days_available: default_vacation_days(),
            vacation_days_used: 0,
            is_active: true,
            created_date: now,
            last_modified_date: now,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollRecord {
    /// Assigned by the repository on add (max existing + 1, starting at 1).
    #[serde(rename = "payrollID")]
    pub payroll_id: u32,
    pub roll_number: u32,
    pub pay_period_start: NaiveDate,
    pub pay_period_end: NaiveDate,
    pub base_salary: Decimal,
    #[serde(default)]
    pub bonus: Decimal,
    #[serde(default)]
    pub deductions: Decimal,
    pub net_pay: Decimal,
    #[serde(default)]
    pub payment_date: Option<NaiveDate>,
    #[serde(default = "default_pending")]
    pub payment_status: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default = "Utc::now")]
    pub created_date: DateTime<Utc>,
}

impl PayrollRecord {
    /// New pending record with no bonus or deductions; `net_pay` starts at the
    /// base salary. Callers adjusting bonus/deductions recompute via [`net_pay`].
    pub fn new(
        roll_number: u32,
        pay_period_start: NaiveDate,
        pay_period_end: NaiveDate,
        base_salary: Decimal,
    ) -> Self {
        Self {
            payroll_id: 0,
            roll_number,
            pay_period_start,
            pay_period_end,
            base_salary,
            bonus: Decimal::ZERO,
            deductions: Decimal::ZERO,
            net_pay: base_salary,
            payment_date: None,
            payment_status: default_pending(),
            notes: None,
            created_date: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VacationRecord {
    /// Assigned by the repository on add (max existing + 1, starting at 1).
    #[serde(rename = "vacationID")]
    pub vacation_id: u32,
    pub roll_number: u32,
    #[serde(default = "default_annual")]
    pub vacation_type: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub days_count: i32,
    #[serde(default = "default_pending")]
    pub status: String,
    #[serde(default = "Utc::now")]
    pub request_date: DateTime<Utc>,
    #[serde(default)]
    pub approved_by: Option<String>,
    #[serde(default)]
    pub approval_date: Option<NaiveDate>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl VacationRecord {
    /// New pending request. `days_count` is the inclusive span of the dates.
    pub fn new(
        roll_number: u32,
        vacation_type: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            vacation_id: 0,
            roll_number,
            vacation_type: vacation_type.into(),
            start_date,
            end_date,
            days_count: day_span(start_date, end_date) as i32,
            status: default_pending(),
            request_date: Utc::now(),
            approved_by: None,
            approval_date: None,
            reason: None,
            notes: None,
        }
    }
}

/// A record paired with the current name of its referencing employee.
///
/// The name is resolved at read time against the active roster and is never
/// persisted; a dangling roll number (employee since deactivated) annotates as
/// `None`.
#[derive(Debug, Clone)]
pub struct Named<T> {
    pub record: T,
    pub employee_name: Option<String>,
}

/// Net pay as the caller computes it before submission: base + bonus − deductions.
pub fn net_pay(base_salary: Decimal, bonus: Decimal, deductions: Decimal) -> Decimal {
    base_salary + bonus - deductions
}

/// Inclusive day count of a date span (end − start + 1).
/// A single-day vacation spans 1 day.
pub fn day_span(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days() + 1
}

fn default_vacation_days() -> i32 {
    8
}

fn default_true() -> bool {
    true
}

fn default_pending() -> String {
    "Pending".to_string()
}

fn default_annual() -> String {
    "Annual".to_string()
}
