//! # Repository: record lifecycle and cross-entity consistency
//!
//! [`Repository`] is the sole owner and mutator of the three in-memory
//! collections; no other component holds a mutable reference. It is
//! constructed explicitly over a [`StorageBackend`] and passed by reference to
//! callers — there is no global state. Everything is single-threaded and
//! synchronous: each mutation rewrites the whole collection file on the
//! calling thread before returning.
//!
//! ## Lifecycle rules
//!
//! - Employees are soft-deleted: `is_active` flips to false and the record is
//!   retained forever. All standard queries and aggregates filter to active
//!   employees, but `update_employee` reaches inactive records too.
//! - Payroll and vacation records get repository-assigned sequential ids
//!   (max existing + 1, starting at 1) and have no delete path at all.
//! - `add_employee` performs no uniqueness check; callers enforce the
//!   one-active-employee-per-roll-number invariant via [`Repository::employee_exists`]
//!   before adding.
//!
//! ## Vacation-day bookkeeping
//!
//! A vacation record's status drives the referenced employee's used-day
//! balance on the Approved⇄non-Approved edges:
//!
//! - entering "Approved" adds the record's (new) day count;
//! - leaving "Approved" subtracts the day count the record had before the
//!   update — exactly what the earlier approval added, even if the update
//!   also edits the day count.
//!
//! The balance adjustment goes through the employee update path, which
//! persists the employee collection before the vacation collection is
//! persisted. The two writes are not atomic; a failure between them leaves
//! the stores inconsistent, and the write order (employees first) is the only
//! guarantee.
//!
//! ## Read-time annotation
//!
//! Payroll and vacation listings resolve the referencing employee's current
//! name at read time ([`Named`]); nothing about the employee is stored in the
//! referencing record, so a soft-deleted employee simply annotates as `None`.

use crate::error::{Result, RollcallError};
use crate::model::{Employee, Named, PayrollRecord, VacationRecord, APPROVED};
use crate::oplog::{Op, OpEntry, OpLog};
use crate::store::StorageBackend;
use chrono::Utc;
use rust_decimal::Decimal;

const EMPLOYEES: &str = "employees";
const PAYROLL: &str = "payroll";
const VACATIONS: &str = "vacations";

pub struct Repository<B: StorageBackend> {
    backend: B,
    employees: Vec<Employee>,
    payroll: Vec<PayrollRecord>,
    vacations: Vec<VacationRecord>,
    log: OpLog,
}

impl<B: StorageBackend> Repository<B> {
    /// Load all collections from the backend. Absent or corrupt stores yield
    /// empty collections; opening never fails.
    pub fn open(backend: B) -> Self {
        let employees = backend.load_employees();
        let payroll = backend.load_payroll();
        let vacations = backend.load_vacations();
        let log = OpLog::from_entries(backend.load_log());
        Self {
            backend,
            employees,
            payroll,
            vacations,
            log,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    // --- Employee operations ---

    /// Active employees in storage order.
    pub fn active_employees(&self) -> Vec<Employee> {
        self.employees
            .iter()
            .filter(|e| e.is_active)
            .cloned()
            .collect()
    }

    /// First active employee with the given roll number.
    pub fn employee_by_roll(&self, roll_number: u32) -> Option<Employee> {
        self.employees
            .iter()
            .find(|e| e.roll_number == roll_number && e.is_active)
            .cloned()
    }

    /// Active employees whose roll number (as decimal text) contains the term,
    /// or whose name contains it case-insensitively.
    pub fn search_employees(&self, term: &str) -> Vec<Employee> {
        let term_lower = term.to_lowercase();
        self.employees
            .iter()
            .filter(|e| {
                e.is_active
                    && (e.roll_number.to_string().contains(term)
                        || e.name.to_lowercase().contains(&term_lower))
            })
            .cloned()
            .collect()
    }

    /// Append a new employee and persist. Both timestamps are stamped to now.
    ///
    /// No uniqueness check happens here; callers must check
    /// [`Repository::employee_exists`] first or a duplicate roll number will be
    /// stored.
    pub fn add_employee(&mut self, mut employee: Employee) -> Result<()> {
        let now = Utc::now();
        employee.created_date = now;
        employee.last_modified_date = now;

        let detail = format!(
            "Added employee: {} (roll {})",
            employee.name, employee.roll_number
        );
        self.employees.push(employee);
        self.log_op(Op::Insert, EMPLOYEES, detail, true);
        self.persist_employees()
    }

    /// Overwrite every mutable field of the stored employee with the given
    /// roll number, active or not, and persist. The roll number, active flag,
    /// and creation date are not touched.
    pub fn update_employee(&mut self, employee: &Employee) -> Result<()> {
        let existing = self
            .employees
            .iter_mut()
            .find(|e| e.roll_number == employee.roll_number)
            .ok_or(RollcallError::EmployeeNotFound(employee.roll_number))?;

        existing.name = employee.name.clone();
        existing.age = employee.age;
        existing.department = employee.department.clone();
        existing.position = employee.position.clone();
        existing.hire_date = employee.hire_date;
        existing.email = employee.email.clone();
        existing.phone = employee.phone.clone();
        existing.salary = employee.salary;
        existing.vacation_days_available = employee.vacation_days_available;
        existing.vacation_days_used = employee.vacation_days_used;
        existing.last_modified_date = Utc::now();

        let detail = format!(
            "Updated employee: {} (roll {})",
            employee.name, employee.roll_number
        );
        self.log_op(Op::Update, EMPLOYEES, detail, true);
        self.persist_employees()
    }

    /// Soft-delete: flip `is_active` to false on the first match and persist.
    /// The record stays in storage and remains reachable via
    /// [`Repository::update_employee`].
    pub fn delete_employee(&mut self, roll_number: u32) -> Result<()> {
        let employee = self
            .employees
            .iter_mut()
            .find(|e| e.roll_number == roll_number)
            .ok_or(RollcallError::EmployeeNotFound(roll_number))?;
        employee.is_active = false;

        let detail = format!("Deleted employee: {} (roll {})", employee.name, roll_number);
        self.log_op(Op::Delete, EMPLOYEES, detail, true);
        self.persist_employees()
    }

    /// True iff an active employee has this roll number.
    pub fn employee_exists(&self, roll_number: u32) -> bool {
        self.employees
            .iter()
            .any(|e| e.roll_number == roll_number && e.is_active)
    }

    pub fn active_count(&self) -> usize {
        self.employees.iter().filter(|e| e.is_active).count()
    }

    /// Average salary over active employees; zero when there are none.
    pub fn average_salary(&self) -> Decimal {
        let count = self.active_count();
        if count == 0 {
            return Decimal::ZERO;
        }
        self.total_salary() / Decimal::from(count as u64)
    }

    pub fn total_salary(&self) -> Decimal {
        self.employees
            .iter()
            .filter(|e| e.is_active)
            .map(|e| e.salary)
            .sum()
    }

    /// Highest-paid active employee; earliest stored wins ties.
    pub fn top_earner(&self) -> Option<Employee> {
        self.best_active(|candidate, best| candidate.salary > best.salary)
    }

    pub fn oldest_employee(&self) -> Option<Employee> {
        self.best_active(|candidate, best| candidate.age > best.age)
    }

    pub fn youngest_employee(&self) -> Option<Employee> {
        self.best_active(|candidate, best| candidate.age < best.age)
    }

    // --- Payroll operations ---

    /// All payroll records, annotated with the current employee name, ordered
    /// by pay-period start descending.
    pub fn payroll_records(&self) -> Vec<Named<PayrollRecord>> {
        let records = self.payroll.iter().cloned().collect();
        self.annotate_payroll(records)
    }

    /// One employee's payroll records, annotated and ordered as
    /// [`Repository::payroll_records`].
    pub fn payroll_for_employee(&self, roll_number: u32) -> Vec<Named<PayrollRecord>> {
        let records = self
            .payroll
            .iter()
            .filter(|p| p.roll_number == roll_number)
            .cloned()
            .collect();
        self.annotate_payroll(records)
    }

    /// Assign the next sequential id, stamp the creation time, append, and
    /// persist. Returns the assigned id. Date ordering and amounts are the
    /// caller's responsibility, net pay included.
    pub fn add_payroll(&mut self, mut record: PayrollRecord) -> Result<u32> {
        let id = self.payroll.iter().map(|p| p.payroll_id).max().unwrap_or(0) + 1;
        record.payroll_id = id;
        record.created_date = Utc::now();

        let detail = format!("Added payroll record {} (roll {})", id, record.roll_number);
        self.payroll.push(record);
        self.log_op(Op::Insert, PAYROLL, detail, true);
        self.persist_payroll()?;
        Ok(id)
    }

    // --- Vacation operations ---

    /// All vacation records, annotated with the current employee name, ordered
    /// by start date descending.
    pub fn vacation_records(&self) -> Vec<Named<VacationRecord>> {
        let records = self.vacations.iter().cloned().collect();
        self.annotate_vacations(records)
    }

    pub fn vacation_for_employee(&self, roll_number: u32) -> Vec<Named<VacationRecord>> {
        let records = self
            .vacations
            .iter()
            .filter(|v| v.roll_number == roll_number)
            .cloned()
            .collect();
        self.annotate_vacations(records)
    }

    /// Assign the next sequential id, stamp the request time, append, and
    /// persist. A record arriving already "Approved" immediately books its
    /// day count against the employee's used-day balance (persisting the
    /// employee collection first).
    pub fn add_vacation(&mut self, mut record: VacationRecord) -> Result<u32> {
        let id = self
            .vacations
            .iter()
            .map(|v| v.vacation_id)
            .max()
            .unwrap_or(0)
            + 1;
        record.vacation_id = id;
        record.request_date = Utc::now();

        if record.status == APPROVED {
            if let Some(mut employee) = self.employee_by_roll(record.roll_number) {
                employee.vacation_days_used += record.days_count;
                self.update_employee(&employee)?;
            }
        }

        let detail = format!(
            "Added vacation record {} (roll {}, {})",
            id, record.roll_number, record.status
        );
        self.vacations.push(record);
        self.log_op(Op::Insert, VACATIONS, detail, true);
        self.persist_vacations()?;
        Ok(id)
    }

    /// Overwrite the stored record's type, dates, day count, status, approver,
    /// approval date, reason, and notes, then persist.
    ///
    /// Crossing the Approved boundary adjusts the employee's used-day balance:
    /// entering adds the new day count, leaving subtracts the day count the
    /// record had before this update — the amount the earlier approval
    /// actually booked. The employee collection persists before the vacation
    /// collection does; the pair is not atomic.
    pub fn update_vacation(&mut self, record: &VacationRecord) -> Result<()> {
        let index = self
            .vacations
            .iter()
            .position(|v| v.vacation_id == record.vacation_id)
            .ok_or(RollcallError::VacationNotFound(record.vacation_id))?;

        let old_status = self.vacations[index].status.clone();
        let old_days = self.vacations[index].days_count;

        let existing = &mut self.vacations[index];
        existing.vacation_type = record.vacation_type.clone();
        existing.start_date = record.start_date;
        existing.end_date = record.end_date;
        existing.days_count = record.days_count;
        existing.status = record.status.clone();
        existing.approved_by = record.approved_by.clone();
        existing.approval_date = record.approval_date;
        existing.reason = record.reason.clone();
        existing.notes = record.notes.clone();

        if let Some(mut employee) = self.employee_by_roll(record.roll_number) {
            if old_status != APPROVED && record.status == APPROVED {
                employee.vacation_days_used += record.days_count;
                self.update_employee(&employee)?;
            } else if old_status == APPROVED && record.status != APPROVED {
                employee.vacation_days_used -= old_days;
                self.update_employee(&employee)?;
            }
        }

        let detail = format!(
            "Updated vacation record {} (roll {}, {})",
            record.vacation_id, record.roll_number, record.status
        );
        self.log_op(Op::Update, VACATIONS, detail, true);
        self.persist_vacations()
    }

    /// Grant extra available days to one active employee, through the normal
    /// employee update path.
    pub fn add_vacation_days(&mut self, roll_number: u32, days: i32) -> Result<()> {
        let mut employee = self
            .employee_by_roll(roll_number)
            .ok_or(RollcallError::EmployeeNotFound(roll_number))?;
        employee.vacation_days_available += days;
        self.update_employee(&employee)
    }

    /// Grant extra available days to every active employee in one batch,
    /// persisting the employee collection exactly once. Inactive employees are
    /// untouched. Returns how many employees were granted days.
    pub fn add_vacation_days_to_all(&mut self, days: i32) -> Result<usize> {
        let now = Utc::now();
        let mut granted = 0;
        for employee in self.employees.iter_mut().filter(|e| e.is_active) {
            employee.vacation_days_available += days;
            employee.last_modified_date = now;
            granted += 1;
        }

        let detail = format!("Granted {} vacation days to {} active employees", days, granted);
        self.log_op(Op::Update, EMPLOYEES, detail, true);
        self.persist_employees()?;
        Ok(granted)
    }

    // --- Utility ---

    /// Empty all three collections and persist each of them.
    pub fn clear_all_data(&mut self) -> Result<()> {
        self.employees.clear();
        self.payroll.clear();
        self.vacations.clear();

        self.persist_employees()?;
        self.persist_payroll()?;
        self.persist_vacations()
    }

    /// Up to `count` most recent operation-log entries, newest first.
    pub fn recent_log(&self, count: usize) -> &[OpEntry] {
        self.log.recent(count)
    }

    pub fn clear_log(&mut self) {
        self.log.clear();
        let _ = self.backend.save_log(self.log.entries());
    }

    // --- Internals ---

    fn best_active<F>(&self, better: F) -> Option<Employee>
    where
        F: Fn(&Employee, &Employee) -> bool,
    {
        let mut best: Option<&Employee> = None;
        for employee in self.employees.iter().filter(|e| e.is_active) {
            if best.map_or(true, |b| better(employee, b)) {
                best = Some(employee);
            }
        }
        best.cloned()
    }

    fn active_name(&self, roll_number: u32) -> Option<String> {
        self.employees
            .iter()
            .find(|e| e.roll_number == roll_number && e.is_active)
            .map(|e| e.name.clone())
    }

    fn annotate_payroll(&self, records: Vec<PayrollRecord>) -> Vec<Named<PayrollRecord>> {
        let mut named: Vec<Named<PayrollRecord>> = records
            .into_iter()
            .map(|record| Named {
                employee_name: self.active_name(record.roll_number),
                record,
            })
            .collect();
        named.sort_by(|a, b| b.record.pay_period_start.cmp(&a.record.pay_period_start));
        named
    }

    fn annotate_vacations(&self, records: Vec<VacationRecord>) -> Vec<Named<VacationRecord>> {
        let mut named: Vec<Named<VacationRecord>> = records
            .into_iter()
            .map(|record| Named {
                employee_name: self.active_name(record.roll_number),
                record,
            })
            .collect();
        named.sort_by(|a, b| b.record.start_date.cmp(&a.record.start_date));
        named
    }

    fn persist_employees(&mut self) -> Result<()> {
        match self.backend.save_employees(&self.employees) {
            Ok(()) => {
                self.log_op(Op::Save, EMPLOYEES, "Collection written", true);
                Ok(())
            }
            Err(e) => {
                self.log_op(Op::SaveError, EMPLOYEES, e.to_string(), false);
                Err(e)
            }
        }
    }

    fn persist_payroll(&mut self) -> Result<()> {
        match self.backend.save_payroll(&self.payroll) {
            Ok(()) => {
                self.log_op(Op::Save, PAYROLL, "Collection written", true);
                Ok(())
            }
            Err(e) => {
                self.log_op(Op::SaveError, PAYROLL, e.to_string(), false);
                Err(e)
            }
        }
    }

    fn persist_vacations(&mut self) -> Result<()> {
        match self.backend.save_vacations(&self.vacations) {
            Ok(()) => {
                self.log_op(Op::Save, VACATIONS, "Collection written", true);
                Ok(())
            }
            Err(e) => {
                self.log_op(Op::SaveError, VACATIONS, e.to_string(), false);
                Err(e)
            }
        }
    }

    fn log_op(&mut self, op: Op, entity: &str, details: impl Into<String>, success: bool) {
        self.log.push(op, entity, details, success);
        // Diagnostics only: a failing log write must never fail a data write
        let _ = self.backend.save_log(self.log.entries());
    }
}
