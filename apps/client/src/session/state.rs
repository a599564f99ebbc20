//! In-memory session state.
//!
//! One value of [`SessionState`] exists per running client, owned by the
//! `SessionStore`. Fields split into two groups:
//!
//! - **durable**: résumé identity, target role and the analysis result
//!   (projected into a `SessionSnapshot` and written to disk), and
//! - **session-only**: the insight caches and the job-match report, which
//!   are cheap to refetch and likely stale across runs, so they never
//!   leave memory.

use crate::models::insights::{
    CareerPathsInsight, IndustryInsight, InterviewPrepInsight, JobMatchReport, LearningInsight,
    SalaryInsight, SkillGapsInsight,
};

#[derive(Debug, Clone, Default)]
pub struct SessionState {
    // Resume identity and analysis.
    pub resume_text: Option<String>,
    pub resume_filename: Option<String>,
    pub target_role: Option<String>,
    pub is_analyzed: bool,
    pub analysis_result: Option<String>,

    // Per-category insight caches, each scoped to the current resume.
    pub career_paths: Option<CareerPathsInsight>,
    pub skill_gaps: Option<SkillGapsInsight>,
    pub salary_insights: Option<SalaryInsight>,
    pub interview_prep: Option<InterviewPrepInsight>,
    pub learning_resources: Option<LearningInsight>,
    pub industry_insights: Option<IndustryInsight>,
    pub job_match_result: Option<JobMatchReport>,
}
