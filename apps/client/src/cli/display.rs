//! Terminal rendering for fetched payloads.

use colored::Colorize;

use crate::api::{AnswerEvaluation, InterviewQuestion};
use crate::models::insights::{
    CareerPathsInsight, IndustryInsight, InterviewPrepInsight, JobMatchReport, LearningInsight,
    SalaryInsight, SkillGapsInsight,
};
use crate::models::jobs::Job;
use crate::models::tracker::{JobApplication, SavedJob};

/// Prints the backend's own error text when an insight payload carries one.
/// Returns true if an error was shown (the payload has no data to render).
fn insight_error(error: &Option<String>) -> bool {
    if let Some(message) = error {
        println!("{} {}", "backend error:".red(), message);
        return true;
    }
    false
}

pub fn career_paths(insight: &CareerPathsInsight) {
    if insight_error(&insight.error) {
        return;
    }
    if !insight.current_level.is_empty() {
        println!("Current level: {}", insight.current_level.cyan());
    }
    for (i, path) in insight.career_paths.iter().enumerate() {
        println!("\n{}. {}", i + 1, path.path_name.bold());
        println!("   {}", path.description);
        if !path.next_role.is_empty() {
            println!("   Next role: {} ({})", path.next_role, path.timeline);
        }
        for req in &path.requirements {
            println!("   - {req}");
        }
    }
    if !insight.growth_areas.is_empty() {
        println!("\n{}", "Growth areas:".bold());
        for area in &insight.growth_areas {
            println!("- {area}");
        }
    }
}

pub fn skill_gaps(insight: &SkillGapsInsight) {
    if insight_error(&insight.error) {
        return;
    }
    println!("Match: {}%", format!("{:.0}", insight.match_percentage).green());
    for gap in &insight.skill_gaps {
        println!("\n{} ({})", gap.skill.bold(), gap.priority.yellow());
        println!("  {}", gap.importance);
        println!("  How to acquire: {}", gap.how_to_acquire);
    }
}

pub fn salary(insight: &SalaryInsight) {
    if insight_error(&insight.error) {
        return;
    }
    let estimate = &insight.estimated_current_value;
    println!(
        "Estimated value: {} - {} (mid {})",
        format!("{:.0}", estimate.low).green(),
        format!("{:.0}", estimate.high).green(),
        format!("{:.0}", estimate.mid)
    );
    for factor in &insight.factors_affecting_salary {
        println!("- {} [{}]: {}", factor.factor.bold(), factor.impact, factor.details);
    }
    if !insight.negotiation_tips.is_empty() {
        println!("\n{}", "Negotiation tips:".bold());
        for tip in &insight.negotiation_tips {
            println!("- {tip}");
        }
    }
}

pub fn interview_prep(insight: &InterviewPrepInsight) {
    if insight_error(&insight.error) {
        return;
    }
    for (i, q) in insight.likely_questions.iter().enumerate() {
        println!("\n{}. [{}] {}", i + 1, q.category.yellow(), q.question.bold());
        if !q.suggested_approach.is_empty() {
            println!("   Approach: {}", q.suggested_approach);
        }
        for point in &q.resume_points_to_highlight {
            println!("   Highlight: {point}");
        }
    }
    if !insight.technical_topics_to_review.is_empty() {
        println!("\n{}", "Topics to review:".bold());
        for topic in &insight.technical_topics_to_review {
            println!("- {topic}");
        }
    }
    if !insight.questions_to_ask_interviewer.is_empty() {
        println!("\n{}", "Questions to ask:".bold());
        for q in &insight.questions_to_ask_interviewer {
            println!("- {q}");
        }
    }
}

pub fn learning(insight: &LearningInsight) {
    if insight_error(&insight.error) {
        return;
    }
    if !insight.courses.is_empty() {
        println!("{}", "Courses:".bold());
        for course in &insight.courses {
            println!(
                "- {} ({}, {}) [{}]",
                course.title.cyan(),
                course.platform,
                course.estimated_duration,
                course.priority.yellow()
            );
        }
    }
    if !insight.certifications.is_empty() {
        println!("\n{}", "Certifications:".bold());
        for cert in &insight.certifications {
            println!("- {} ({})", cert.name.cyan(), cert.provider);
        }
    }
    if !insight.books.is_empty() {
        println!("\n{}", "Books:".bold());
        for book in &insight.books {
            println!("- {} by {}", book.title.cyan(), book.author);
        }
    }
    if !insight.projects_to_build.is_empty() {
        println!("\n{}", "Projects to build:".bold());
        for project in &insight.projects_to_build {
            println!("- {}", project.project);
        }
    }
}

pub fn industry(insight: &IndustryInsight) {
    if insight_error(&insight.error) {
        return;
    }
    if !insight.relevant_industries.is_empty() {
        println!("Industries: {}", insight.relevant_industries.join(", ").cyan());
    }
    let outlook = &insight.market_outlook;
    if !outlook.summary.is_empty() {
        println!(
            "Outlook: demand {}, competition {}",
            outlook.demand.green(),
            outlook.competition.yellow()
        );
        println!("{}", outlook.summary);
    }
    for trend in &insight.industry_trends {
        println!("\n- {}: {}", trend.trend.bold(), trend.impact);
    }
    for role in &insight.emerging_roles {
        println!("\n{} (fit: {})", role.role.bold(), role.fit_score);
        println!("  {}", role.description);
    }
}

pub fn job_match(report: &JobMatchReport) {
    if insight_error(&report.error) {
        return;
    }
    println!(
        "Match score: {}% ({})",
        format!("{:.0}", report.match_score).green().bold(),
        report.match_level
    );
    if !report.summary.is_empty() {
        println!("\n{}", report.summary);
    }
    let tech = &report.skills_breakdown.technical_skills;
    if !tech.matched.is_empty() {
        println!("\n{}", "Matched skills:".bold());
        for skill in &tech.matched {
            println!("{} {skill}", "+".green());
        }
    }
    if !tech.missing.is_empty() {
        println!("\n{}", "Missing skills:".bold());
        for skill in &tech.missing {
            println!("{} {skill}", "-".red());
        }
    }
    if !report.ats_optimization_tips.is_empty() {
        println!("\n{}", "ATS tips:".bold());
        for tip in &report.ats_optimization_tips {
            println!("- {tip}");
        }
    }
}

pub fn job_listings(jobs: &[Job]) {
    for (i, job) in jobs.iter().enumerate() {
        println!(
            "{}. {} at {} ({})",
            i + 1,
            job.job_title.bold(),
            job.company.cyan(),
            job.location
        );
        if !job.salary.is_empty() {
            println!("   Salary: {}", job.salary);
        }
        println!("   {} | posted {}", job.source, job.date_posted);
        println!("   {}", job.apply_link.underline());
    }
}

pub fn saved_jobs(jobs: &[SavedJob]) {
    for job in jobs {
        println!(
            "{}  {} at {} (saved {})",
            job.id.to_string().dimmed(),
            job.job_title.bold(),
            job.company.cyan(),
            job.saved_at.format("%Y-%m-%d")
        );
        println!("   {}", job.apply_link.underline());
    }
    if jobs.is_empty() {
        println!("No bookmarks yet.");
    }
}

pub fn applications(apps: &[JobApplication]) {
    for app in apps {
        println!(
            "{}  {} at {} [{}]",
            app.id.to_string().dimmed(),
            app.job_title.bold(),
            app.company.cyan(),
            app.status.as_str().yellow()
        );
        if let Some(applied) = &app.applied_date {
            println!("   Applied: {}", applied.format("%Y-%m-%d"));
        }
        if !app.notes.is_empty() {
            println!("   Notes: {}", app.notes);
        }
    }
    if apps.is_empty() {
        println!("No applications tracked.");
    }
}

pub fn interview_questions(questions: &[InterviewQuestion]) {
    for (i, q) in questions.iter().enumerate() {
        println!(
            "\n{}. [{} / {}] {}",
            i + 1,
            q.category.yellow(),
            q.difficulty,
            q.question.bold()
        );
        for tip in &q.tips {
            println!("   Tip: {tip}");
        }
    }
}

pub fn answer_evaluation(evaluation: &AnswerEvaluation) {
    println!("Score: {}/10", format!("{:.0}", evaluation.score).green().bold());
    if !evaluation.strengths.is_empty() {
        println!("\n{}", "Strengths:".bold());
        for s in &evaluation.strengths {
            println!("{} {s}", "+".green());
        }
    }
    if !evaluation.improvements.is_empty() {
        println!("\n{}", "Improvements:".bold());
        for s in &evaluation.improvements {
            println!("{} {s}", "-".yellow());
        }
    }
    if !evaluation.sample_answer.is_empty() {
        println!("\n{}", "Sample answer:".bold());
        println!("{}", evaluation.sample_answer);
    }
}
