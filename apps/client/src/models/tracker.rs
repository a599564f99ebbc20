//! Records held by the bookmark / application tracker.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::jobs::Job;

/// A bookmarked job listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedJob {
    pub id: Uuid,
    pub user_id: String,
    pub job_title: String,
    pub company: String,
    pub location: String,
    pub job_type: String,
    pub salary: String,
    pub date_posted: String,
    pub apply_link: String,
    pub source: String,
    pub notes: String,
    pub saved_at: DateTime<Utc>,
}

impl SavedJob {
    /// Builds a bookmark record from a search listing.
    pub fn from_listing(user_id: &str, job: &Job, notes: String) -> Self {
        SavedJob {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            job_title: job.job_title.clone(),
            company: job.company.clone(),
            location: job.location.clone(),
            job_type: job.job_type.clone(),
            salary: job.salary.clone(),
            date_posted: job.date_posted.clone(),
            apply_link: job.apply_link.clone(),
            source: job.source.clone(),
            notes,
            saved_at: Utc::now(),
        }
    }
}

/// Lifecycle of a tracked application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Saved,
    Applied,
    Interviewing,
    Offered,
    Rejected,
    Withdrawn,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Saved => "saved",
            ApplicationStatus::Applied => "applied",
            ApplicationStatus::Interviewing => "interviewing",
            ApplicationStatus::Offered => "offered",
            ApplicationStatus::Rejected => "rejected",
            ApplicationStatus::Withdrawn => "withdrawn",
        }
    }
}

impl std::str::FromStr for ApplicationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "saved" => Ok(ApplicationStatus::Saved),
            "applied" => Ok(ApplicationStatus::Applied),
            "interviewing" => Ok(ApplicationStatus::Interviewing),
            "offered" => Ok(ApplicationStatus::Offered),
            "rejected" => Ok(ApplicationStatus::Rejected),
            "withdrawn" => Ok(ApplicationStatus::Withdrawn),
            other => Err(format!("unknown application status '{other}'")),
        }
    }
}

/// A tracked job application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobApplication {
    pub id: Uuid,
    pub user_id: String,
    pub job_title: String,
    pub company: String,
    pub location: String,
    pub salary: String,
    pub apply_link: String,
    pub status: ApplicationStatus,
    pub applied_date: Option<DateTime<Utc>>,
    pub interview_date: Option<DateTime<Utc>>,
    pub notes: String,
    pub resume_version: String,
    pub cover_letter: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update applied to an existing application. `None` leaves the
/// field untouched; `updated_at` is always bumped by the store.
#[derive(Debug, Clone, Default)]
pub struct ApplicationUpdate {
    pub status: Option<ApplicationStatus>,
    pub applied_date: Option<DateTime<Utc>>,
    pub interview_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub resume_version: Option<String>,
    pub cover_letter: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_snake_case() {
        let json = serde_json::to_string(&ApplicationStatus::Interviewing).unwrap();
        assert_eq!(json, "\"interviewing\"");
    }

    #[test]
    fn test_status_parses_all_variants() {
        for s in ["saved", "applied", "interviewing", "offered", "rejected", "withdrawn"] {
            let status: ApplicationStatus = s.parse().unwrap();
            assert_eq!(status.as_str(), s);
        }
        assert!("ghosted".parse::<ApplicationStatus>().is_err());
    }

    #[test]
    fn test_from_listing_copies_job_fields() {
        let job = Job {
            job_title: "Platform Engineer".to_string(),
            company: "Acme".to_string(),
            apply_link: "https://example.com/apply/2".to_string(),
            ..Default::default()
        };
        let saved = SavedJob::from_listing("anon_x", &job, String::new());
        assert_eq!(saved.job_title, "Platform Engineer");
        assert_eq!(saved.apply_link, job.apply_link);
        assert_eq!(saved.user_id, "anon_x");
    }
}
