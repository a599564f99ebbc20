//! Typed payloads for the backend's career-insight and job-match endpoints.
//!
//! The backend returns one fixed JSON shape per insight category. On an AI
//! failure it returns `{"error": "..."}` with every other field omitted, so
//! each response derives `Default` and deserializes with container-level
//! `#[serde(default)]` — an error-only body decodes to a payload whose
//! `error` field is set and whose data fields are empty.

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Career paths
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CareerPath {
    pub path_name: String,
    pub description: String,
    pub next_role: String,
    pub timeline: String,
    pub requirements: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CareerPathsInsight {
    pub current_level: String,
    pub strengths_for_growth: Vec<String>,
    pub growth_areas: Vec<String>,
    pub career_paths: Vec<CareerPath>,
    pub error: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Skill gaps
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkillGap {
    pub skill: String,
    pub priority: String,
    pub importance: String,
    pub how_to_acquire: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillSet {
    pub technical: Vec<String>,
    pub soft: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillGapsInsight {
    pub match_percentage: f64,
    pub current_skills: SkillSet,
    pub required_skills: SkillSet,
    pub skill_gaps: Vec<SkillGap>,
    pub error: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Salary
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SalaryBand {
    pub low: f64,
    pub high: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrentValueEstimate {
    pub low: f64,
    pub mid: f64,
    pub high: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketRate {
    pub entry_level: SalaryBand,
    pub mid_level: SalaryBand,
    pub senior_level: SalaryBand,
    pub lead_level: SalaryBand,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SalaryFactor {
    pub factor: String,
    pub impact: String,
    pub details: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SalaryInsight {
    pub estimated_current_value: CurrentValueEstimate,
    pub market_rate: MarketRate,
    pub factors_affecting_salary: Vec<SalaryFactor>,
    pub negotiation_tips: Vec<String>,
    pub error: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Interview preparation
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PrepQuestion {
    pub question: String,
    pub category: String,
    pub suggested_approach: String,
    pub resume_points_to_highlight: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoryPrompt {
    pub situation: String,
    pub applicable_questions: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RedFlag {
    pub concern: String,
    pub how_to_address: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InterviewPrepInsight {
    pub likely_questions: Vec<PrepQuestion>,
    pub stories_to_prepare: Vec<StoryPrompt>,
    pub technical_topics_to_review: Vec<String>,
    pub questions_to_ask_interviewer: Vec<String>,
    pub red_flags_to_address: Vec<RedFlag>,
    pub error: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Learning resources
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Course {
    pub title: String,
    pub platform: String,
    pub skill_covered: String,
    pub estimated_duration: String,
    pub priority: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Certification {
    pub name: String,
    pub provider: String,
    pub value: String,
    pub difficulty: String,
    pub estimated_prep_time: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookRecommendation {
    pub title: String,
    pub author: String,
    pub why_recommended: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PortfolioProject {
    pub project: String,
    pub skills_demonstrated: Vec<String>,
    pub portfolio_value: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LearningInsight {
    pub courses: Vec<Course>,
    pub certifications: Vec<Certification>,
    pub books: Vec<BookRecommendation>,
    pub projects_to_build: Vec<PortfolioProject>,
    pub communities_to_join: Vec<String>,
    pub error: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Industry insights
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketOutlook {
    pub demand: String,
    pub competition: String,
    pub summary: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndustryTrend {
    pub trend: String,
    pub impact: String,
    pub opportunity: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmergingRole {
    pub role: String,
    pub description: String,
    pub fit_score: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetCompanyGroup {
    pub company_type: String,
    pub examples: Vec<String>,
    pub why_good_fit: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IndustryInsight {
    pub relevant_industries: Vec<String>,
    pub market_outlook: MarketOutlook,
    pub industry_trends: Vec<IndustryTrend>,
    pub emerging_roles: Vec<EmergingRole>,
    pub companies_to_target: Vec<TargetCompanyGroup>,
    pub error: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Job match
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillMatch {
    pub match_percentage: f64,
    pub matched: Vec<String>,
    pub missing: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillsBreakdown {
    pub technical_skills: SkillMatch,
    pub soft_skills: SkillMatch,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceMatch {
    pub required_years: String,
    pub candidate_years: String,
    pub assessment: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationMatch {
    pub required: String,
    pub candidate_has: String,
    pub assessment: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MissingKeyword {
    pub keyword: String,
    pub importance: String,
    pub suggestion: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchingKeyword {
    pub keyword: String,
    pub found_in_resume: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchStrength {
    pub area: String,
    pub details: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchWeakness {
    pub area: String,
    pub details: String,
    pub how_to_improve: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResumeImprovement {
    pub section: String,
    pub priority: String,
    pub current: String,
    pub suggested: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct JobMatchReport {
    pub match_score: f64,
    pub match_level: String,
    pub summary: String,
    pub skills_breakdown: SkillsBreakdown,
    pub experience_match: ExperienceMatch,
    pub education_match: EducationMatch,
    pub missing_keywords: Vec<MissingKeyword>,
    pub matching_keywords: Vec<MatchingKeyword>,
    pub strengths: Vec<MatchStrength>,
    pub weaknesses: Vec<MatchWeakness>,
    pub resume_improvements: Vec<ResumeImprovement>,
    pub ats_optimization_tips: Vec<String>,
    pub cover_letter_points: Vec<String>,
    pub error: Option<String>,
}
