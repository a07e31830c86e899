use crate::error::Result;
use crate::model::{Employee, PayrollRecord, VacationRecord};
use crate::oplog::OpEntry;

/// Abstract persistence for the three collections and the operation log.
///
/// Loads never fail: absent or corrupt stores yield empty collections.
/// Saves replace the whole persisted collection and are the only fallible
/// storage operations. Methods take `&self`; implementations that need
/// mutation use interior mutability (the backend may be shared by value
/// inside a single-threaded repository).
pub trait StorageBackend {
    fn load_employees(&self) -> Vec<Employee>;
    fn save_employees(&self, employees: &[Employee]) -> Result<()>;

    fn load_payroll(&self) -> Vec<PayrollRecord>;
    fn save_payroll(&self, records: &[PayrollRecord]) -> Result<()>;

    fn load_vacations(&self) -> Vec<VacationRecord>;
    fn save_vacations(&self, records: &[VacationRecord]) -> Result<()>;

    fn load_log(&self) -> Vec<OpEntry>;
    fn save_log(&self, entries: &[OpEntry]) -> Result<()>;
}
