//! # Storage Layer
//!
//! The [`StorageBackend`] trait abstracts persistence of the three record
//! collections and the operation log, so the repository can run over the
//! filesystem in production and in memory under test.
//!
//! ## Persistence model
//!
//! Every collection is persisted whole: a save serializes the full in-memory
//! sequence and replaces the store — never an append or a patch. There is no
//! incremental write and no transaction; the repository decides write order.
//!
//! ## The load/save asymmetry
//!
//! Saves are fallible and loud: an I/O or serialization failure comes back as
//! an error carrying the cause, and it is the only storage condition the
//! repository propagates to callers.
//!
//! Loads are infallible and quiet: an absent file, unreadable file, or
//! unparseable payload all yield an empty collection. Corrupt data is
//! indistinguishable from no data. That asymmetry is deliberate — the system
//! must come up (empty if need be) no matter what is on disk.
//!
//! ## File format
//!
//! Collections are versioned envelopes:
//!
//! ```json
//! { "version": 1, "records": [ ... ] }
//! ```
//!
//! A legacy bare array (`[ ... ]`) still loads, so files written before the
//! envelope existed keep working.
//!
//! ## Storage layout
//!
//! ```text
//! <data dir>/
//! ├── employees.json
//! ├── payroll.json
//! ├── vacations.json
//! └── oplog.json
//! ```
//!
//! ## Implementations
//!
//! - [`fs_backend::FsBackend`]: JSON files in a data directory, written
//!   atomically (temp file + rename).
//! - [`mem_backend::MemBackend`]: for testing logic without filesystem I/O.

pub mod backend;
pub mod fs_backend;
pub mod mem_backend;

pub use backend::StorageBackend;
pub use fs_backend::FsBackend;
pub use mem_backend::MemBackend;

/// On-disk schema version written into every collection envelope.
pub const SCHEMA_VERSION: u32 = 1;
