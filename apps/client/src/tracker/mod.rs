//! Bookmark / application tracker.
//!
//! Saved jobs and tracked applications live in a collection store keyed by
//! an anonymous per-install user id. [`TrackerStore`] is the boundary; the
//! hosted service behind the original product is replaced by a local
//! JSON-file implementation, and the command handlers only ever see the
//! trait.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::models::tracker::{ApplicationStatus, ApplicationUpdate, JobApplication, SavedJob};

/// Returns the anonymous user id for this install, generating and
/// persisting one on first use.
pub fn local_user_id(path: &Path) -> Result<String> {
    if let Ok(existing) = std::fs::read_to_string(path) {
        let existing = existing.trim();
        if !existing.is_empty() {
            return Ok(existing.to_string());
        }
    }
    let user_id = format!("anon_{}", Uuid::new_v4());
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(path, &user_id)
        .with_context(|| format!("failed to write user id file {}", path.display()))?;
    debug!("generated anonymous user id");
    Ok(user_id)
}

/// Collection store for bookmarks and applications.
///
/// Listing operations return newest-first (by `saved_at` for bookmarks, by
/// `updated_at` for applications), matching what the pages expect.
#[async_trait]
pub trait TrackerStore: Send + Sync {
    async fn save_job(&self, job: SavedJob) -> Result<SavedJob>;
    async fn unsave_job(&self, job_id: Uuid) -> Result<bool>;
    async fn saved_jobs(&self, user_id: &str) -> Result<Vec<SavedJob>>;
    /// Bookmarks are deduplicated by apply link, not by listing identity.
    async fn is_job_saved(&self, user_id: &str, apply_link: &str) -> Result<bool>;

    async fn create_application(&self, app: JobApplication) -> Result<JobApplication>;
    async fn update_application(
        &self,
        id: Uuid,
        update: ApplicationUpdate,
    ) -> Result<Option<JobApplication>>;
    async fn delete_application(&self, id: Uuid) -> Result<bool>;
    async fn applications(&self, user_id: &str) -> Result<Vec<JobApplication>>;
    async fn applications_by_status(
        &self,
        user_id: &str,
        status: ApplicationStatus,
    ) -> Result<Vec<JobApplication>>;
}

// ────────────────────────────────────────────────────────────────────────────
// JSON file implementation
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Serialize, Deserialize)]
struct TrackerData {
    saved_jobs: Vec<SavedJob>,
    applications: Vec<JobApplication>,
}

/// Tracker collections held in a single JSON file. Each operation reads,
/// mutates and rewrites the file; volumes here are tens of records, not
/// thousands.
pub struct JsonTrackerStore {
    path: PathBuf,
}

impl JsonTrackerStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonTrackerStore { path: path.into() }
    }

    fn read(&self) -> Result<TrackerData> {
        if !self.path.exists() {
            return Ok(TrackerData::default());
        }
        let raw = std::fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read tracker file {}", self.path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse tracker file {}", self.path.display()))
    }

    fn write(&self, data: &TrackerData) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let raw = serde_json::to_string_pretty(data)?;
        std::fs::write(&self.path, raw)
            .with_context(|| format!("failed to write tracker file {}", self.path.display()))?;
        Ok(())
    }
}

#[async_trait]
impl TrackerStore for JsonTrackerStore {
    async fn save_job(&self, job: SavedJob) -> Result<SavedJob> {
        let mut data = self.read()?;
        data.saved_jobs.push(job.clone());
        self.write(&data)?;
        Ok(job)
    }

    async fn unsave_job(&self, job_id: Uuid) -> Result<bool> {
        let mut data = self.read()?;
        let before = data.saved_jobs.len();
        data.saved_jobs.retain(|j| j.id != job_id);
        let removed = data.saved_jobs.len() < before;
        if removed {
            self.write(&data)?;
        }
        Ok(removed)
    }

    async fn saved_jobs(&self, user_id: &str) -> Result<Vec<SavedJob>> {
        let data = self.read()?;
        let mut jobs: Vec<SavedJob> = data
            .saved_jobs
            .into_iter()
            .filter(|j| j.user_id == user_id)
            .collect();
        jobs.sort_by(|a, b| b.saved_at.cmp(&a.saved_at));
        Ok(jobs)
    }

    async fn is_job_saved(&self, user_id: &str, apply_link: &str) -> Result<bool> {
        let data = self.read()?;
        Ok(data
            .saved_jobs
            .iter()
            .any(|j| j.user_id == user_id && j.apply_link == apply_link))
    }

    async fn create_application(&self, app: JobApplication) -> Result<JobApplication> {
        let mut data = self.read()?;
        data.applications.push(app.clone());
        self.write(&data)?;
        Ok(app)
    }

    async fn update_application(
        &self,
        id: Uuid,
        update: ApplicationUpdate,
    ) -> Result<Option<JobApplication>> {
        let mut data = self.read()?;
        let Some(app) = data.applications.iter_mut().find(|a| a.id == id) else {
            return Ok(None);
        };

        if let Some(status) = update.status {
            app.status = status;
        }
        if let Some(applied) = update.applied_date {
            app.applied_date = Some(applied);
        }
        if let Some(interview) = update.interview_date {
            app.interview_date = Some(interview);
        }
        if let Some(notes) = update.notes {
            app.notes = notes;
        }
        if let Some(version) = update.resume_version {
            app.resume_version = version;
        }
        if let Some(letter) = update.cover_letter {
            app.cover_letter = letter;
        }
        app.updated_at = Utc::now();

        let updated = app.clone();
        self.write(&data)?;
        Ok(Some(updated))
    }

    async fn delete_application(&self, id: Uuid) -> Result<bool> {
        let mut data = self.read()?;
        let before = data.applications.len();
        data.applications.retain(|a| a.id != id);
        let removed = data.applications.len() < before;
        if removed {
            self.write(&data)?;
        }
        Ok(removed)
    }

    async fn applications(&self, user_id: &str) -> Result<Vec<JobApplication>> {
        let data = self.read()?;
        let mut apps: Vec<JobApplication> = data
            .applications
            .into_iter()
            .filter(|a| a.user_id == user_id)
            .collect();
        apps.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(apps)
    }

    async fn applications_by_status(
        &self,
        user_id: &str,
        status: ApplicationStatus,
    ) -> Result<Vec<JobApplication>> {
        let mut apps = self.applications(user_id).await?;
        apps.retain(|a| a.status == status);
        Ok(apps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::jobs::Job;
    use chrono::Duration;

    fn make_store(dir: &tempfile::TempDir) -> JsonTrackerStore {
        JsonTrackerStore::new(dir.path().join("tracker.json"))
    }

    fn make_saved_job(user_id: &str, apply_link: &str) -> SavedJob {
        let job = Job {
            job_title: "Engineer".to_string(),
            company: "Acme".to_string(),
            apply_link: apply_link.to_string(),
            ..Job::default()
        };
        SavedJob::from_listing(user_id, &job, String::new())
    }

    fn make_application(user_id: &str) -> JobApplication {
        JobApplication {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            job_title: "Engineer".to_string(),
            company: "Acme".to_string(),
            location: "Remote".to_string(),
            salary: String::new(),
            apply_link: "https://example.com/apply".to_string(),
            status: ApplicationStatus::Saved,
            applied_date: None,
            interview_date: None,
            notes: String::new(),
            resume_version: String::new(),
            cover_letter: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_local_user_id_is_stable_across_calls() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("user_id");
        let first = local_user_id(&path).unwrap();
        let second = local_user_id(&path).unwrap();
        assert!(first.starts_with("anon_"));
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_save_and_list_jobs_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let store = make_store(&dir);

        let mut older = make_saved_job("u1", "https://example.com/a");
        older.saved_at = Utc::now() - Duration::hours(1);
        let newer = make_saved_job("u1", "https://example.com/b");

        store.save_job(older).await.unwrap();
        store.save_job(newer.clone()).await.unwrap();

        let jobs = store.saved_jobs("u1").await.unwrap();
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].id, newer.id);
    }

    #[tokio::test]
    async fn test_saved_jobs_are_scoped_to_user() {
        let dir = tempfile::tempdir().unwrap();
        let store = make_store(&dir);
        store
            .save_job(make_saved_job("u1", "https://example.com/a"))
            .await
            .unwrap();
        store
            .save_job(make_saved_job("u2", "https://example.com/b"))
            .await
            .unwrap();

        assert_eq!(store.saved_jobs("u1").await.unwrap().len(), 1);
        assert!(store.is_job_saved("u1", "https://example.com/a").await.unwrap());
        assert!(!store.is_job_saved("u1", "https://example.com/b").await.unwrap());
    }

    #[tokio::test]
    async fn test_unsave_job_removes_only_that_bookmark() {
        let dir = tempfile::tempdir().unwrap();
        let store = make_store(&dir);
        let keep = store
            .save_job(make_saved_job("u1", "https://example.com/a"))
            .await
            .unwrap();
        let removed = store
            .save_job(make_saved_job("u1", "https://example.com/b"))
            .await
            .unwrap();

        assert!(store.unsave_job(removed.id).await.unwrap());
        assert!(!store.unsave_job(removed.id).await.unwrap());

        let jobs = store.saved_jobs("u1").await.unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].id, keep.id);
    }

    #[tokio::test]
    async fn test_update_application_bumps_updated_at() {
        let dir = tempfile::tempdir().unwrap();
        let store = make_store(&dir);
        let mut app = make_application("u1");
        app.updated_at = Utc::now() - Duration::hours(2);
        let app = store.create_application(app).await.unwrap();

        let updated = store
            .update_application(
                app.id,
                ApplicationUpdate {
                    status: Some(ApplicationStatus::Applied),
                    notes: Some("phone screen booked".to_string()),
                    ..ApplicationUpdate::default()
                },
            )
            .await
            .unwrap()
            .expect("application exists");

        assert_eq!(updated.status, ApplicationStatus::Applied);
        assert_eq!(updated.notes, "phone screen booked");
        assert!(updated.updated_at > app.updated_at);
        // Untouched fields survive.
        assert_eq!(updated.company, "Acme");
    }

    #[tokio::test]
    async fn test_update_missing_application_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = make_store(&dir);
        let result = store
            .update_application(Uuid::new_v4(), ApplicationUpdate::default())
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_applications_by_status_filters() {
        let dir = tempfile::tempdir().unwrap();
        let store = make_store(&dir);

        let mut applied = make_application("u1");
        applied.status = ApplicationStatus::Applied;
        store.create_application(applied).await.unwrap();
        store.create_application(make_application("u1")).await.unwrap();

        let applied = store
            .applications_by_status("u1", ApplicationStatus::Applied)
            .await
            .unwrap();
        assert_eq!(applied.len(), 1);
        assert_eq!(store.applications("u1").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_delete_application() {
        let dir = tempfile::tempdir().unwrap();
        let store = make_store(&dir);
        let app = store.create_application(make_application("u1")).await.unwrap();

        assert!(store.delete_application(app.id).await.unwrap());
        assert!(store.applications("u1").await.unwrap().is_empty());
        assert!(!store.delete_application(app.id).await.unwrap());
    }
}
