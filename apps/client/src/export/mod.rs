//! Plain-text report export.
//!
//! Renders analysis, job-match, career-insight, cover-letter and tracker
//! data into a dated text report and writes it next to the user. Rendering
//! works off the typed models, so a report never contains raw JSON.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;

use crate::models::insights::JobMatchReport;
use crate::models::tracker::JobApplication;
use crate::session::SessionState;

const RULE_WIDTH: usize = 40;

fn heading(out: &mut String, title: &str) {
    out.push_str(title);
    out.push('\n');
    out.push_str(&"-".repeat(20));
    out.push('\n');
}

fn numbered(out: &mut String, items: &[String]) {
    for (i, item) in items.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, item));
    }
    out.push('\n');
}

/// Wraps report content with a title banner and generation timestamp.
pub fn render_report(title: &str, content: &str, include_date: bool) -> String {
    let mut out = String::new();
    out.push_str(title);
    out.push('\n');
    out.push_str(&"=".repeat(title.len()));
    out.push('\n');
    if include_date {
        let now = Local::now();
        out.push_str(&format!("Generated: {}\n", now.format("%Y-%m-%d %H:%M")));
    }
    out.push('\n');
    out.push_str(content);
    out
}

pub fn write_report(path: &Path, report: &str) -> Result<()> {
    std::fs::write(path, report)
        .with_context(|| format!("failed to write report to {}", path.display()))?;
    Ok(())
}

/// Resume analysis report body. The analysis itself is free text from the
/// backend; the header adds resume identity and the target role.
pub fn format_analysis(state: &SessionState) -> String {
    let mut out = String::new();
    if let Some(filename) = &state.resume_filename {
        out.push_str(&format!("Resume: {filename}\n"));
    }
    if let Some(role) = &state.target_role {
        out.push_str(&format!("Target role: {role}\n"));
    }
    out.push('\n');
    match &state.analysis_result {
        Some(analysis) => out.push_str(analysis),
        None => out.push_str("No analysis data available."),
    }
    out.push('\n');
    out
}

/// Job-match report body.
pub fn format_job_match(report: &JobMatchReport) -> String {
    let mut out = String::new();

    out.push_str(&format!("MATCH SCORE: {:.0}%", report.match_score));
    if !report.match_level.is_empty() {
        out.push_str(&format!(" ({})", report.match_level));
    }
    out.push('\n');
    out.push_str(&"=".repeat(RULE_WIDTH));
    out.push_str("\n\n");

    if !report.summary.is_empty() {
        heading(&mut out, "MATCH SUMMARY");
        out.push_str(&report.summary);
        out.push_str("\n\n");
    }

    let matched = &report.skills_breakdown.technical_skills.matched;
    if !matched.is_empty() {
        heading(&mut out, "MATCHING SKILLS");
        for skill in matched {
            out.push_str(&format!("+ {skill}\n"));
        }
        out.push('\n');
    }

    let missing = &report.skills_breakdown.technical_skills.missing;
    if !missing.is_empty() {
        heading(&mut out, "SKILLS TO DEVELOP");
        for skill in missing {
            out.push_str(&format!("* {skill}\n"));
        }
        out.push('\n');
    }

    if !report.resume_improvements.is_empty() {
        heading(&mut out, "RESUME IMPROVEMENTS");
        for imp in &report.resume_improvements {
            out.push_str(&format!(
                "[{}] {}: {}\n",
                imp.priority, imp.section, imp.suggested
            ));
        }
        out.push('\n');
    }

    if !report.ats_optimization_tips.is_empty() {
        heading(&mut out, "ATS OPTIMIZATION TIPS");
        numbered(&mut out, &report.ats_optimization_tips);
    }

    out
}

/// Career-insights report body, assembled from whichever caches are set.
pub fn format_career_insights(state: &SessionState) -> String {
    let mut out = String::new();

    if let Some(paths) = &state.career_paths {
        out.push_str("CAREER PATHS\n");
        out.push_str(&"=".repeat(RULE_WIDTH));
        out.push('\n');
        for (i, path) in paths.career_paths.iter().enumerate() {
            out.push_str(&format!("\n{}. {}\n", i + 1, path.path_name));
            if !path.description.is_empty() {
                out.push_str(&format!("   {}\n", path.description));
            }
            if !path.timeline.is_empty() {
                out.push_str(&format!("   Timeline: {}\n", path.timeline));
            }
        }
        out.push('\n');
    }

    if let Some(gaps) = &state.skill_gaps {
        out.push_str("\nSKILL GAPS ANALYSIS\n");
        out.push_str(&"=".repeat(RULE_WIDTH));
        out.push('\n');
        out.push_str(&format!("Match: {:.0}%\n", gaps.match_percentage));
        for gap in &gaps.skill_gaps {
            out.push_str(&format!("\n* {}: {}\n", gap.skill, gap.priority));
            if !gap.how_to_acquire.is_empty() {
                out.push_str(&format!("  -> {}\n", gap.how_to_acquire));
            }
        }
        out.push('\n');
    }

    if let Some(salary) = &state.salary_insights {
        out.push_str("\nSALARY INSIGHTS\n");
        out.push_str(&"=".repeat(RULE_WIDTH));
        out.push('\n');
        let estimate = &salary.estimated_current_value;
        out.push_str(&format!(
            "Estimated value: {:.0} - {:.0} (mid {:.0})\n",
            estimate.low, estimate.high, estimate.mid
        ));
        if !salary.negotiation_tips.is_empty() {
            out.push_str("Negotiation tips:\n");
            for tip in &salary.negotiation_tips {
                out.push_str(&format!("* {tip}\n"));
            }
        }
        out.push('\n');
    }

    if out.is_empty() {
        out.push_str("No career insights cached yet.\n");
    }
    out
}

/// Cover-letter report body.
pub fn format_cover_letter(letter: &str, job_title: Option<&str>, company: Option<&str>) -> String {
    let mut out = String::new();
    if job_title.is_some() || company.is_some() {
        out.push_str("COVER LETTER\n");
        if let Some(title) = job_title {
            out.push_str(&format!("Position: {title}\n"));
        }
        if let Some(company) = company {
            out.push_str(&format!("Company: {company}\n"));
        }
        out.push_str(&"=".repeat(RULE_WIDTH));
        out.push_str("\n\n");
    }
    out.push_str(letter);
    out.push('\n');
    out
}

/// Application-tracker report body.
pub fn format_applications(applications: &[JobApplication]) -> String {
    let mut out = String::new();
    for (i, app) in applications.iter().enumerate() {
        out.push_str(&format!("{}. {} at {}\n", i + 1, app.job_title, app.company));
        out.push_str(&format!("   Status: {}\n", app.status.as_str()));
        if let Some(applied) = &app.applied_date {
            out.push_str(&format!("   Applied: {}\n", applied.format("%Y-%m-%d")));
        }
        if !app.notes.is_empty() {
            out.push_str(&format!("   Notes: {}\n", app.notes));
        }
        out.push('\n');
    }
    if applications.is_empty() {
        out.push_str("No applications tracked.\n");
    }
    out
}

/// File-name-safe slug for per-company exports, e.g.
/// `cover-letter-acme-corp.txt`.
pub fn slugify(input: &str) -> String {
    input
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::insights::{ResumeImprovement, SkillGapsInsight};
    use crate::models::tracker::ApplicationStatus;
    use chrono::Utc;
    use uuid::Uuid;

    #[test]
    fn test_render_report_underlines_title() {
        let report = render_report("Resume Analysis Report", "body", false);
        let mut lines = report.lines();
        assert_eq!(lines.next(), Some("Resume Analysis Report"));
        assert_eq!(lines.next(), Some("======================"));
        assert!(report.ends_with("body"));
        assert!(!report.contains("Generated:"));
    }

    #[test]
    fn test_render_report_with_date_stamps_header() {
        let report = render_report("Report", "body", true);
        assert!(report.contains("Generated: "));
    }

    #[test]
    fn test_format_analysis_without_result() {
        let state = SessionState::default();
        assert!(format_analysis(&state).contains("No analysis data available."));
    }

    #[test]
    fn test_format_job_match_sections() {
        let mut report = JobMatchReport {
            match_score: 81.0,
            match_level: "Strong".to_string(),
            summary: "Solid overlap.".to_string(),
            ..JobMatchReport::default()
        };
        report.skills_breakdown.technical_skills.matched = vec!["Rust".to_string()];
        report.skills_breakdown.technical_skills.missing = vec!["Kubernetes".to_string()];
        report.resume_improvements = vec![ResumeImprovement {
            section: "Experience".to_string(),
            priority: "high".to_string(),
            current: String::new(),
            suggested: "Quantify impact".to_string(),
        }];

        let body = format_job_match(&report);
        assert!(body.contains("MATCH SCORE: 81% (Strong)"));
        assert!(body.contains("+ Rust"));
        assert!(body.contains("* Kubernetes"));
        assert!(body.contains("[high] Experience: Quantify impact"));
    }

    #[test]
    fn test_format_career_insights_empty_state() {
        let body = format_career_insights(&SessionState::default());
        assert!(body.contains("No career insights cached yet."));
    }

    #[test]
    fn test_format_career_insights_includes_cached_sections() {
        let state = SessionState {
            skill_gaps: Some(SkillGapsInsight {
                match_percentage: 70.0,
                ..SkillGapsInsight::default()
            }),
            ..SessionState::default()
        };
        let body = format_career_insights(&state);
        assert!(body.contains("SKILL GAPS ANALYSIS"));
        assert!(body.contains("Match: 70%"));
        assert!(!body.contains("CAREER PATHS"));
    }

    #[test]
    fn test_format_applications_lists_status() {
        let app = JobApplication {
            id: Uuid::new_v4(),
            user_id: "u1".to_string(),
            job_title: "Engineer".to_string(),
            company: "Acme".to_string(),
            location: String::new(),
            salary: String::new(),
            apply_link: String::new(),
            status: ApplicationStatus::Interviewing,
            applied_date: None,
            interview_date: None,
            notes: "onsite next week".to_string(),
            resume_version: String::new(),
            cover_letter: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let body = format_applications(&[app]);
        assert!(body.contains("1. Engineer at Acme"));
        assert!(body.contains("Status: interviewing"));
        assert!(body.contains("Notes: onsite next week"));
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Acme  Corp"), "acme-corp");
    }

    #[test]
    fn test_write_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.txt");
        write_report(&path, "content").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "content");
    }
}
