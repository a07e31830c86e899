//! Bounded, append-only history of storage operations.
//!
//! Every successful persist emits one entry, and repository mutations emit
//! their own insert/update/delete entries alongside it. The log keeps the 100
//! most recent entries, newest first, and is persisted to its own file. It is
//! diagnostic only: log persistence failures are swallowed so that a broken
//! log file can never fail a data write.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Most recent entries retained, in memory and on disk.
pub const MAX_ENTRIES: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Op {
    Save,
    Insert,
    Update,
    Delete,
    SaveError,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpEntry {
    pub timestamp: DateTime<Utc>,
    pub op: Op,
    /// Collection the operation touched ("employees", "payroll", "vacations").
    pub entity: String,
    pub details: String,
    pub success: bool,
}

impl OpEntry {
    pub fn format(&self) -> String {
        format!(
            "[{}] {:?} - {}: {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.op,
            self.entity,
            self.details
        )
    }
}

/// In-memory view of the log, newest entry first.
#[derive(Debug, Default)]
pub struct OpLog {
    entries: Vec<OpEntry>,
}

impl OpLog {
    /// Rebuild from persisted entries, dropping anything beyond the cap.
    pub fn from_entries(mut entries: Vec<OpEntry>) -> Self {
        entries.truncate(MAX_ENTRIES);
        Self { entries }
    }

    pub fn push(&mut self, op: Op, entity: impl Into<String>, details: impl Into<String>, success: bool) {
        self.entries.insert(
            0,
            OpEntry {
                timestamp: Utc::now(),
                op,
                entity: entity.into(),
                details: details.into(),
                success,
            },
        );
        self.entries.truncate(MAX_ENTRIES);
    }

    /// Up to `count` most recent entries, newest first.
    pub fn recent(&self, count: usize) -> &[OpEntry] {
        &self.entries[..count.min(self.entries.len())]
    }

    pub fn entries(&self) -> &[OpEntry] {
        &self.entries
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newest_first() {
        let mut log = OpLog::default();
        log.push(Op::Insert, "employees", "first", true);
        log.push(Op::Save, "employees", "second", true);

        assert_eq!(log.entries()[0].details, "second");
        assert_eq!(log.entries()[1].details, "first");
    }

    #[test]
    fn test_capped_at_max_entries() {
        let mut log = OpLog::default();
        for i in 0..MAX_ENTRIES + 20 {
            log.push(Op::Save, "payroll", format!("entry {}", i), true);
        }
        assert_eq!(log.len(), MAX_ENTRIES);
        // Oldest entries fell off the back
        assert_eq!(log.entries()[0].details, format!("entry {}", MAX_ENTRIES + 19));
        assert_eq!(log.entries()[MAX_ENTRIES - 1].details, "entry 20");
    }

    #[test]
    fn test_recent_clamps_to_len() {
        let mut log = OpLog::default();
        log.push(Op::Delete, "employees", "only", true);
        assert_eq!(log.recent(50).len(), 1);
        assert_eq!(log.recent(0).len(), 0);
    }

    #[test]
    fn test_from_entries_truncates() {
        let entries: Vec<OpEntry> = (0..150)
            .map(|i| OpEntry {
                timestamp: Utc::now(),
                op: Op::Save,
                entity: "vacations".to_string(),
                details: format!("{}", i),
                success: true,
            })
            .collect();
        let log = OpLog::from_entries(entries);
        assert_eq!(log.len(), MAX_ENTRIES);
        assert_eq!(log.entries()[0].details, "0");
    }

    #[test]
    fn test_clear() {
        let mut log = OpLog::default();
        log.push(Op::Update, "employees", "x", true);
        log.clear();
        assert!(log.is_empty());
    }

    #[test]
    fn test_format_entry() {
        let entry = OpEntry {
            timestamp: Utc::now(),
            op: Op::Insert,
            entity: "employees".to_string(),
            details: "Added Ada".to_string(),
            success: true,
        };
        let line = entry.format();
        assert!(line.contains("Insert"));
        assert!(line.contains("employees: Added Ada"));
    }
}
