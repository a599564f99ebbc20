//! Durable subset of the session state.
//!
//! The persisted contract is an explicit type, not a field filter: a
//! [`SessionSnapshot`] holds exactly the fields that survive a restart,
//! projected from [`SessionState`] on every durable mutation and projected
//! back at startup. Insight caches and the job-match report are deliberately
//! absent from it.
//!
//! [`SnapshotStore`] is the slot the snapshot lives in. The production
//! implementation is a JSON file under the data directory; tests use the
//! in-memory implementation.

use std::cell::RefCell;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::session::state::SessionState;

/// Bumped whenever the snapshot shape changes incompatibly. A stored
/// snapshot with a different version is discarded at load, not migrated.
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub version: u32,
    pub resume_text: Option<String>,
    pub resume_filename: Option<String>,
    pub target_role: Option<String>,
    pub is_analyzed: bool,
    pub analysis_result: Option<String>,
}

impl SessionSnapshot {
    /// Projects the durable subset out of the full state.
    pub fn capture(state: &SessionState) -> Self {
        SessionSnapshot {
            version: SNAPSHOT_VERSION,
            resume_text: state.resume_text.clone(),
            resume_filename: state.resume_filename.clone(),
            target_role: state.target_role.clone(),
            is_analyzed: state.is_analyzed,
            analysis_result: state.analysis_result.clone(),
        }
    }

    /// Rebuilds a full state from the durable subset. Session-only fields
    /// start absent.
    pub fn restore(self) -> SessionState {
        SessionState {
            resume_text: self.resume_text,
            resume_filename: self.resume_filename,
            target_role: self.target_role,
            is_analyzed: self.is_analyzed,
            analysis_result: self.analysis_result,
            ..SessionState::default()
        }
    }
}

/// The durable slot holding one serialized snapshot.
///
/// `load` distinguishes "slot is empty" (`Ok(None)`) from "slot unreadable"
/// (`Err`); the caller treats both as a fresh session, but the latter is
/// worth a log line.
pub trait SnapshotStore: Send {
    fn load(&self) -> Result<Option<SessionSnapshot>>;
    fn save(&self, snapshot: &SessionSnapshot) -> Result<()>;
}

// ────────────────────────────────────────────────────────────────────────────
// JSON file slot
// ────────────────────────────────────────────────────────────────────────────

/// Snapshot slot backed by a JSON file.
pub struct JsonFileSnapshotStore {
    path: PathBuf,
}

impl JsonFileSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileSnapshotStore { path: path.into() }
    }
}

impl SnapshotStore for JsonFileSnapshotStore {
    fn load(&self) -> Result<Option<SessionSnapshot>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = std::fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read session file {}", self.path.display()))?;
        let snapshot: SessionSnapshot = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse session file {}", self.path.display()))?;
        Ok(Some(snapshot))
    }

    fn save(&self, snapshot: &SessionSnapshot) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let raw = serde_json::to_string_pretty(snapshot)?;
        std::fs::write(&self.path, raw)
            .with_context(|| format!("failed to write session file {}", self.path.display()))?;
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// In-memory slot
// ────────────────────────────────────────────────────────────────────────────

/// Snapshot slot held in memory. Used by tests to observe exactly what the
/// store persists, and as the backend for `--no-persist` style sessions.
#[derive(Default)]
pub struct MemorySnapshotStore {
    slot: RefCell<Option<SessionSnapshot>>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: SessionSnapshot) -> Self {
        MemorySnapshotStore {
            slot: RefCell::new(Some(snapshot)),
        }
    }

    /// Returns a copy of the currently stored snapshot, if any.
    pub fn current(&self) -> Option<SessionSnapshot> {
        self.slot.borrow().clone()
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn load(&self) -> Result<Option<SessionSnapshot>> {
        Ok(self.slot.borrow().clone())
    }

    fn save(&self, snapshot: &SessionSnapshot) -> Result<()> {
        *self.slot.borrow_mut() = Some(snapshot.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::insights::SkillGapsInsight;

    fn make_state() -> SessionState {
        SessionState {
            resume_text: Some("resume body".to_string()),
            resume_filename: Some("cv.pdf".to_string()),
            target_role: Some("Engineer".to_string()),
            is_analyzed: true,
            analysis_result: Some("solid".to_string()),
            skill_gaps: Some(SkillGapsInsight::default()),
            ..SessionState::default()
        }
    }

    #[test]
    fn test_capture_excludes_session_only_fields() {
        let snapshot = SessionSnapshot::capture(&make_state());
        let restored = snapshot.restore();
        assert_eq!(restored.resume_text.as_deref(), Some("resume body"));
        assert_eq!(restored.resume_filename.as_deref(), Some("cv.pdf"));
        assert_eq!(restored.target_role.as_deref(), Some("Engineer"));
        assert!(restored.is_analyzed);
        assert_eq!(restored.analysis_result.as_deref(), Some("solid"));
        // skill_gaps was set on the live state but is not durable
        assert!(restored.skill_gaps.is_none());
        assert!(restored.job_match_result.is_none());
    }

    #[test]
    fn test_capture_records_current_schema_version() {
        let snapshot = SessionSnapshot::capture(&SessionState::default());
        assert_eq!(snapshot.version, SNAPSHOT_VERSION);
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileSnapshotStore::new(dir.path().join("session.json"));

        assert!(store.load().unwrap().is_none());

        let snapshot = SessionSnapshot::capture(&make_state());
        store.save(&snapshot).unwrap();
        assert_eq!(store.load().unwrap(), Some(snapshot));
    }

    #[test]
    fn test_file_store_creates_missing_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileSnapshotStore::new(dir.path().join("nested/deep/session.json"));
        store
            .save(&SessionSnapshot::capture(&SessionState::default()))
            .unwrap();
        assert!(store.load().unwrap().is_some());
    }

    #[test]
    fn test_file_store_surfaces_corrupt_json_as_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{not json").unwrap();
        let store = JsonFileSnapshotStore::new(&path);
        assert!(store.load().is_err());
    }
}
