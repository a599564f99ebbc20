//! Session store — single source of truth for the loaded resume, its
//! analysis status, and the per-category insight caches.
//!
//! The store is constructed explicitly in `main` and handed to whatever
//! needs it; nothing here is global. All mutation goes through the setters
//! below. Setters never fail: a mutation is an in-memory assignment, and
//! the follow-up snapshot write is logged on failure rather than surfaced,
//! so callers always observe the new state immediately.
//!
//! Coherency rules enforced by the setters:
//! - loading a new resume drops every cached insight and the job-match
//!   report, along with the previous analysis (they are derived from the
//!   old resume);
//! - `is_analyzed` is true exactly when `analysis_result` is present;
//! - the target role is a user preference, untouched by resume replacement
//!   and cleared only by a full reset.

use tracing::{debug, warn};

use crate::models::insights::{
    CareerPathsInsight, IndustryInsight, InterviewPrepInsight, JobMatchReport, LearningInsight,
    SalaryInsight, SkillGapsInsight,
};
use crate::session::snapshot::{SessionSnapshot, SnapshotStore, SNAPSHOT_VERSION};
use crate::session::state::SessionState;

pub struct SessionStore {
    state: SessionState,
    slot: Box<dyn SnapshotStore>,
}

impl SessionStore {
    /// Builds a store from the durable slot, restoring the persisted subset
    /// when a usable snapshot exists. Absent, unreadable or
    /// version-mismatched snapshots all fall back to a fresh session; none
    /// of them is an error for the caller.
    pub fn load(slot: Box<dyn SnapshotStore>) -> Self {
        let state = match slot.load() {
            Ok(Some(snapshot)) if snapshot.version == SNAPSHOT_VERSION => {
                debug!("restored session snapshot");
                snapshot.restore()
            }
            Ok(Some(snapshot)) => {
                warn!(
                    "discarding session snapshot with schema version {} (current: {})",
                    snapshot.version, SNAPSHOT_VERSION
                );
                SessionState::default()
            }
            Ok(None) => SessionState::default(),
            Err(e) => {
                warn!("failed to load session snapshot, starting fresh: {e:#}");
                SessionState::default()
            }
        };
        SessionStore { state, slot }
    }

    /// Builds an empty store without touching the slot. Used for ephemeral
    /// (`--no-persist`) sessions and tests.
    pub fn empty(slot: Box<dyn SnapshotStore>) -> Self {
        SessionStore {
            state: SessionState::default(),
            slot,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    // ────────────────────────────────────────────────────────────────────
    // Durable mutations
    // ────────────────────────────────────────────────────────────────────

    /// Loads a new resume. Every piece of derived data (analysis plus all
    /// cached insights and the job-match report) is invalidated so the new
    /// resume starts clean; the target role survives.
    pub fn set_resume(&mut self, text: String, filename: String) {
        self.state.resume_text = Some(text);
        self.state.resume_filename = Some(filename);
        self.state.is_analyzed = false;
        self.state.analysis_result = None;
        self.drop_derived();
        self.persist();
    }

    /// Sets or clears the target role. Independent of the resume.
    pub fn set_target_role(&mut self, role: Option<String>) {
        self.state.target_role = role;
        self.persist();
    }

    /// Records an analysis result for the current resume. Sets
    /// `is_analyzed` in the same step so the two can never disagree.
    pub fn set_analysis_result(&mut self, result: String) {
        self.state.analysis_result = Some(result);
        self.state.is_analyzed = true;
        self.persist();
    }

    /// Resets the whole session to its initial state, target role included.
    pub fn clear_all(&mut self) {
        self.state = SessionState::default();
        self.persist();
    }

    // ────────────────────────────────────────────────────────────────────
    // Session-only mutations (insight caches; never persisted)
    // ────────────────────────────────────────────────────────────────────

    pub fn set_career_paths(&mut self, data: CareerPathsInsight) {
        self.state.career_paths = Some(data);
    }

    pub fn set_skill_gaps(&mut self, data: SkillGapsInsight) {
        self.state.skill_gaps = Some(data);
    }

    pub fn set_salary_insights(&mut self, data: SalaryInsight) {
        self.state.salary_insights = Some(data);
    }

    pub fn set_interview_prep(&mut self, data: InterviewPrepInsight) {
        self.state.interview_prep = Some(data);
    }

    pub fn set_learning_resources(&mut self, data: LearningInsight) {
        self.state.learning_resources = Some(data);
    }

    pub fn set_industry_insights(&mut self, data: IndustryInsight) {
        self.state.industry_insights = Some(data);
    }

    pub fn set_job_match_result(&mut self, data: JobMatchReport) {
        self.state.job_match_result = Some(data);
    }

    /// Drops every cached insight and the job-match report without touching
    /// the resume or its analysis. Used to force a refetch.
    pub fn clear_insights(&mut self) {
        self.drop_derived();
    }

    // ────────────────────────────────────────────────────────────────────
    // Internals
    // ────────────────────────────────────────────────────────────────────

    fn drop_derived(&mut self) {
        self.state.career_paths = None;
        self.state.skill_gaps = None;
        self.state.salary_insights = None;
        self.state.interview_prep = None;
        self.state.learning_resources = None;
        self.state.industry_insights = None;
        self.state.job_match_result = None;
    }

    /// Writes the durable subset to the slot. Persistence failure must not
    /// break the in-memory mutation that already happened, so it is logged
    /// and swallowed.
    fn persist(&self) {
        let snapshot = SessionSnapshot::capture(&self.state);
        if let Err(e) = self.slot.save(&snapshot) {
            warn!("failed to persist session snapshot: {e:#}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::snapshot::MemorySnapshotStore;

    fn make_store() -> SessionStore {
        SessionStore::load(Box::new(MemorySnapshotStore::new()))
    }

    /// A store with a resume, role, analysis and every cache populated.
    fn make_populated_store() -> SessionStore {
        let mut store = make_store();
        store.set_resume("resume body".to_string(), "cv.pdf".to_string());
        store.set_target_role(Some("Engineer".to_string()));
        store.set_analysis_result("analysis text".to_string());
        store.set_career_paths(CareerPathsInsight::default());
        store.set_skill_gaps(SkillGapsInsight::default());
        store.set_salary_insights(SalaryInsight::default());
        store.set_interview_prep(InterviewPrepInsight::default());
        store.set_learning_resources(LearningInsight::default());
        store.set_industry_insights(IndustryInsight::default());
        store.set_job_match_result(JobMatchReport::default());
        store
    }

    fn all_caches_absent(state: &SessionState) -> bool {
        state.career_paths.is_none()
            && state.skill_gaps.is_none()
            && state.salary_insights.is_none()
            && state.interview_prep.is_none()
            && state.learning_resources.is_none()
            && state.industry_insights.is_none()
            && state.job_match_result.is_none()
    }

    #[test]
    fn test_initial_state_is_empty() {
        let store = make_store();
        let state = store.state();
        assert!(state.resume_text.is_none());
        assert!(state.resume_filename.is_none());
        assert!(state.target_role.is_none());
        assert!(!state.is_analyzed);
        assert!(state.analysis_result.is_none());
        assert!(all_caches_absent(state));
    }

    #[test]
    fn test_new_resume_invalidates_all_derived_data() {
        let mut store = make_populated_store();
        store.set_resume("second resume".to_string(), "cv2.pdf".to_string());

        let state = store.state();
        assert_eq!(state.resume_text.as_deref(), Some("second resume"));
        assert_eq!(state.resume_filename.as_deref(), Some("cv2.pdf"));
        assert!(!state.is_analyzed);
        assert!(state.analysis_result.is_none());
        assert!(all_caches_absent(state));
    }

    #[test]
    fn test_new_resume_keeps_target_role() {
        let mut store = make_store();
        store.set_target_role(Some("Staff Engineer".to_string()));
        store.set_resume("resume".to_string(), "cv.pdf".to_string());
        assert_eq!(store.state().target_role.as_deref(), Some("Staff Engineer"));
    }

    #[test]
    fn test_analysis_flag_tracks_analysis_result() {
        let mut store = make_store();
        store.set_resume("resume".to_string(), "cv.pdf".to_string());
        assert!(!store.state().is_analyzed);

        store.set_analysis_result("looks good".to_string());
        assert!(store.state().is_analyzed);
        assert!(store.state().analysis_result.is_some());

        // Replacing the resume clears both together.
        store.set_resume("other".to_string(), "cv2.pdf".to_string());
        assert!(!store.state().is_analyzed);
        assert!(store.state().analysis_result.is_none());
    }

    #[test]
    fn test_cache_setters_are_independent() {
        let mut store = make_populated_store();
        store.set_skill_gaps(SkillGapsInsight {
            match_percentage: 55.0,
            ..SkillGapsInsight::default()
        });

        let state = store.state();
        assert_eq!(state.skill_gaps.as_ref().unwrap().match_percentage, 55.0);
        // Everything else is untouched.
        assert!(state.career_paths.is_some());
        assert!(state.salary_insights.is_some());
        assert!(state.interview_prep.is_some());
        assert!(state.learning_resources.is_some());
        assert!(state.industry_insights.is_some());
        assert!(state.job_match_result.is_some());
        assert_eq!(state.resume_text.as_deref(), Some("resume body"));
        assert!(state.is_analyzed);
    }

    #[test]
    fn test_clear_insights_leaves_resume_and_analysis() {
        let mut store = make_populated_store();
        store.clear_insights();

        let state = store.state();
        assert!(all_caches_absent(state));
        assert_eq!(state.resume_text.as_deref(), Some("resume body"));
        assert_eq!(state.resume_filename.as_deref(), Some("cv.pdf"));
        assert_eq!(state.target_role.as_deref(), Some("Engineer"));
        assert!(state.is_analyzed);
        assert_eq!(state.analysis_result.as_deref(), Some("analysis text"));
    }

    #[test]
    fn test_clear_all_returns_to_initial_state() {
        let mut store = make_populated_store();
        store.clear_all();

        let state = store.state();
        assert!(state.resume_text.is_none());
        assert!(state.resume_filename.is_none());
        assert!(state.target_role.is_none());
        assert!(!state.is_analyzed);
        assert!(state.analysis_result.is_none());
        assert!(all_caches_absent(state));
    }

    #[test]
    fn test_set_analysis_result_is_idempotent() {
        let mut store = make_store();
        store.set_resume("resume".to_string(), "cv.pdf".to_string());
        store.set_analysis_result("A".to_string());
        let once = store.state().clone();

        store.set_analysis_result("A".to_string());
        let twice = store.state();
        assert_eq!(twice.analysis_result, once.analysis_result);
        assert_eq!(twice.is_analyzed, once.is_analyzed);
    }

    #[test]
    fn test_target_role_can_be_cleared() {
        let mut store = make_store();
        store.set_target_role(Some("PM".to_string()));
        store.set_target_role(None);
        assert!(store.state().target_role.is_none());
    }

    #[test]
    fn test_reload_restores_durable_subset_only() {
        // First run: populate everything, then capture what the slot holds.
        let snapshot = {
            let mut store = SessionStore::load(Box::new(MemorySnapshotStore::new()));
            store.set_resume("R".to_string(), "f.pdf".to_string());
            store.set_target_role(Some("Engineer".to_string()));
            store.set_analysis_result("A".to_string());
            store.set_skill_gaps(SkillGapsInsight::default());
            store.slot.load().unwrap().expect("snapshot written")
        };

        // Second run over the same slot.
        let store = SessionStore::load(Box::new(MemorySnapshotStore::with_snapshot(snapshot)));
        let state = store.state();
        assert_eq!(state.resume_text.as_deref(), Some("R"));
        assert_eq!(state.resume_filename.as_deref(), Some("f.pdf"));
        assert_eq!(state.target_role.as_deref(), Some("Engineer"));
        assert!(state.is_analyzed);
        assert_eq!(state.analysis_result.as_deref(), Some("A"));
        // Insight caches are session-only.
        assert!(state.skill_gaps.is_none());
    }

    #[test]
    fn test_every_durable_mutation_reaches_the_slot() {
        let mut store = SessionStore::load(Box::new(MemorySnapshotStore::new()));
        store.set_resume("R".to_string(), "f.pdf".to_string());
        store.set_target_role(Some("Engineer".to_string()));

        // Session-only setters must not change the persisted copy.
        store.set_career_paths(CareerPathsInsight::default());

        let persisted = store.slot.load().unwrap().expect("snapshot written");
        assert_eq!(persisted.resume_text.as_deref(), Some("R"));
        assert_eq!(persisted.target_role.as_deref(), Some("Engineer"));
    }

    #[test]
    fn test_version_mismatch_discards_snapshot() {
        let mut snapshot = SessionSnapshot::capture(&SessionState {
            resume_text: Some("old".to_string()),
            ..SessionState::default()
        });
        snapshot.version = SNAPSHOT_VERSION + 1;

        let store = SessionStore::load(Box::new(MemorySnapshotStore::with_snapshot(snapshot)));
        assert!(store.state().resume_text.is_none());
    }
}
