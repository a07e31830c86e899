use super::backend::StorageBackend;
use super::SCHEMA_VERSION;
use crate::error::{Result, RollcallError};
use crate::model::{Employee, PayrollRecord, VacationRecord};
use crate::oplog::OpEntry;
use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

const EMPLOYEES_FILE: &str = "employees.json";
const PAYROLL_FILE: &str = "payroll.json";
const VACATIONS_FILE: &str = "vacations.json";
const OPLOG_FILE: &str = "oplog.json";

#[derive(Deserialize)]
struct Envelope<T> {
    #[allow(dead_code)]
    version: u32,
    records: Vec<T>,
}

#[derive(Serialize)]
struct EnvelopeRef<'a, T> {
    version: u32,
    records: &'a [T],
}

/// JSON-file persistence: one file per collection in a single data directory.
pub struct FsBackend {
    data_dir: PathBuf,
}

impl FsBackend {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Backend rooted at the per-user application data directory.
    pub fn from_user_dirs() -> Result<Self> {
        Ok(Self::new(Self::default_data_dir()?))
    }

    /// The OS-appropriate per-user data directory for rollcall.
    pub fn default_data_dir() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("com", "rollcall", "rollcall")
            .ok_or_else(|| RollcallError::Store("Could not determine data directory".to_string()))?;
        Ok(dirs.data_dir().to_path_buf())
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.data_dir.exists() {
            fs::create_dir_all(&self.data_dir).map_err(RollcallError::Io)?;
        }
        Ok(())
    }

    /// Load one collection. Absent file, unreadable file, or unparseable
    /// payload all yield an empty collection; corrupt data is
    /// indistinguishable from no data.
    fn load_collection<T: DeserializeOwned>(&self, file: &str) -> Vec<T> {
        let path = self.data_dir.join(file);
        let Ok(content) = fs::read_to_string(path) else {
            return Vec::new();
        };
        if let Ok(envelope) = serde_json::from_str::<Envelope<T>>(&content) {
            return envelope.records;
        }
        // Legacy layout: a bare array without the version envelope
        serde_json::from_str::<Vec<T>>(&content).unwrap_or_default()
    }

    /// Replace one collection on disk. The temp-file-and-rename dance keeps a
    /// crashed write from truncating the previous contents.
    fn save_collection<T: Serialize>(&self, file: &str, records: &[T]) -> Result<()> {
        self.ensure_dir()?;

        let envelope = EnvelopeRef {
            version: SCHEMA_VERSION,
            records,
        };
        let content = serde_json::to_string_pretty(&envelope).map_err(RollcallError::Serialization)?;

        let target = self.data_dir.join(file);
        let tmp = self.data_dir.join(format!(".{}-{}.tmp", file, process::id()));
        fs::write(&tmp, content).map_err(RollcallError::Io)?;
        fs::rename(&tmp, &target).map_err(RollcallError::Io)?;

        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn load_employees(&self) -> Vec<Employee> {
        self.load_collection(EMPLOYEES_FILE)
    }

    fn save_employees(&self, employees: &[Employee]) -> Result<()> {
        self.save_collection(EMPLOYEES_FILE, employees)
    }

    fn load_payroll(&self) -> Vec<PayrollRecord> {
        self.load_collection(PAYROLL_FILE)
    }

    fn save_payroll(&self, records: &[PayrollRecord]) -> Result<()> {
        self.save_collection(PAYROLL_FILE, records)
    }

    fn load_vacations(&self) -> Vec<VacationRecord> {
        self.load_collection(VACATIONS_FILE)
    }

    fn save_vacations(&self, records: &[VacationRecord]) -> Result<()> {
        self.save_collection(VACATIONS_FILE, records)
    }

    fn load_log(&self) -> Vec<OpEntry> {
        self.load_collection(OPLOG_FILE)
    }

    fn save_log(&self, entries: &[OpEntry]) -> Result<()> {
        self.save_collection(OPLOG_FILE, entries)
    }
}
