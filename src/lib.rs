//! # rollcall
//!
//! Employee roster, payroll, and vacation records over local JSON storage.
//!
//! rollcall keeps three collections — employees, payroll records, vacation
//! records — each mirrored between an in-memory list and a JSON file in a
//! per-user data directory. The [`Repository`] is the single entry point:
//! it owns the collections, enforces the record lifecycle (soft-deleted
//! employees, sequential payroll/vacation ids), and keeps the employee
//! vacation-day balance in sync with vacation request approvals. A bounded
//! operation log records every persist for diagnostic display.
//!
//! ```no_run
//! use rollcall::{Employee, FsBackend, Repository};
//! use rust_decimal::Decimal;
//!
//! # fn main() -> rollcall::Result<()> {
//! let backend = FsBackend::from_user_dirs()?;
//! let mut repo = Repository::open(backend);
//!
//! let candidate = Employee::new(42, "Ada Lovelace", 36, Decimal::new(520000, 2));
//! let report = rollcall::validate_employee(&candidate);
//! if report.is_valid() && !repo.employee_exists(42) {
//!     repo.add_employee(candidate)?;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Front ends (a desktop UI, typically) layer on top of this crate; rendering
//! and input handling are not its concern.

pub mod error;
pub mod model;
pub mod oplog;
pub mod repository;
pub mod store;
pub mod validate;

pub use error::{Result, RollcallError};
pub use model::{day_span, net_pay, Employee, Named, PayrollRecord, VacationRecord, APPROVED};
pub use oplog::{Op, OpEntry, OpLog};
pub use repository::Repository;
pub use store::{FsBackend, MemBackend, StorageBackend};
pub use validate::{validate_employee, ValidationReport};
