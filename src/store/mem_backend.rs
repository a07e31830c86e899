use super::backend::StorageBackend;
use crate::error::{Result, RollcallError};
use crate::model::{Employee, PayrollRecord, VacationRecord};
use crate::oplog::OpEntry;
use std::cell::RefCell;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since the repository is
/// single-threaded. Tracks per-collection save counts so tests can assert how
/// often a mutation persisted, and can simulate write failures to exercise
/// the error path.
#[derive(Default)]
pub struct MemBackend {
    employees: RefCell<Vec<Employee>>,
    payroll: RefCell<Vec<PayrollRecord>>,
    vacations: RefCell<Vec<VacationRecord>>,
    log: RefCell<Vec<OpEntry>>,
    employee_saves: RefCell<usize>,
    payroll_saves: RefCell<usize>,
    vacation_saves: RefCell<usize>,
    simulate_write_error: RefCell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    /// Log saves are unaffected; the repository swallows those anyway.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    pub fn employee_save_count(&self) -> usize {
        *self.employee_saves.borrow()
    }

    pub fn payroll_save_count(&self) -> usize {
        *self.payroll_saves.borrow()
    }

    pub fn vacation_save_count(&self) -> usize {
        *self.vacation_saves.borrow()
    }

    /// Persisted employees as the backend last saw them.
    pub fn persisted_employees(&self) -> Vec<Employee> {
        self.employees.borrow().clone()
    }

    fn check_write(&self) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(RollcallError::Store("Simulated write error".to_string()));
        }
        Ok(())
    }
}

impl StorageBackend for MemBackend {
    fn load_employees(&self) -> Vec<Employee> {
        self.employees.borrow().clone()
    }

    fn save_employees(&self, employees: &[Employee]) -> Result<()> {
        self.check_write()?;
        *self.employees.borrow_mut() = employees.to_vec();
        *self.employee_saves.borrow_mut() += 1;
        Ok(())
    }

    fn load_payroll(&self) -> Vec<PayrollRecord> {
        self.payroll.borrow().clone()
    }

    fn save_payroll(&self, records: &[PayrollRecord]) -> Result<()> {
        self.check_write()?;
        *self.payroll.borrow_mut() = records.to_vec();
        *self.payroll_saves.borrow_mut() += 1;
        Ok(())
    }

    fn load_vacations(&self) -> Vec<VacationRecord> {
        self.vacations.borrow().clone()
    }

    fn save_vacations(&self, records: &[VacationRecord]) -> Result<()> {
        self.check_write()?;
        *self.vacations.borrow_mut() = records.to_vec();
        *self.vacation_saves.borrow_mut() += 1;
        Ok(())
    }

    fn load_log(&self) -> Vec<OpEntry> {
        self.log.borrow().clone()
    }

    fn save_log(&self, entries: &[OpEntry]) -> Result<()> {
        *self.log.borrow_mut() = entries.to_vec();
        Ok(())
    }
}
