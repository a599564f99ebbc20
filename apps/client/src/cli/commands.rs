//! Command handlers. Each handler is one user-facing flow: it checks the
//! session preconditions, talks to the backend through `ApiClient`, records
//! results in the `SessionStore` or `TrackerStore`, and prints.

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Utc;
use colored::Colorize;
use tracing::info;
use uuid::Uuid;

use crate::api::{ApiClient, CoverLetterRequest};
use crate::cli::display;
use crate::config::Config;
use crate::errors::AppError;
use crate::export;
use crate::models::tracker::{ApplicationStatus, ApplicationUpdate, JobApplication, SavedJob};
use crate::session::SessionStore;
use crate::tracker::TrackerStore;

/// Insight categories addressable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum InsightCategory {
    Paths,
    SkillGaps,
    Salary,
    InterviewPrep,
    Learning,
    Industry,
    /// Fetch and show every category.
    All,
}

/// Exportable report targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportTarget {
    Analysis,
    Match,
    Insights,
    Applications,
}

fn require_resume(store: &SessionStore) -> Result<String, AppError> {
    store
        .state()
        .resume_text
        .clone()
        .ok_or_else(|| AppError::Precondition("no resume loaded; run `upload` first".to_string()))
}

// ────────────────────────────────────────────────────────────────────────────
// Resume and analysis
// ────────────────────────────────────────────────────────────────────────────

pub async fn upload(store: &mut SessionStore, api: &ApiClient, path: &Path) -> Result<(), AppError> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("could not read resume file {}", path.display()))?;
    let filename = path
        .file_name()
        .and_then(|f| f.to_str())
        .ok_or_else(|| AppError::Validation("resume path has no file name".to_string()))?;

    let response = api.upload_resume(filename, bytes).await?;
    if response.resume_text.trim().is_empty() {
        return Err(AppError::Validation(
            "backend extracted no text from the file".to_string(),
        ));
    }

    info!("uploaded resume {} ({} chars)", response.filename, response.resume_text.len());
    store.set_resume(response.resume_text, response.filename.clone());
    println!(
        "{} Loaded {}. Previous analysis and insights were cleared.",
        "✓".green(),
        response.filename.cyan()
    );
    Ok(())
}

pub fn set_role(store: &mut SessionStore, role: Option<String>) -> Result<(), AppError> {
    match &role {
        Some(role) if role.trim().is_empty() => {
            return Err(AppError::Validation("target role cannot be blank".to_string()))
        }
        Some(role) => println!("{} Target role set to {}", "✓".green(), role.cyan()),
        None => println!("{} Target role cleared", "✓".green()),
    }
    store.set_target_role(role);
    Ok(())
}

pub async fn analyze(
    store: &mut SessionStore,
    api: &ApiClient,
    role: Option<String>,
) -> Result<(), AppError> {
    let resume_text = require_resume(store)?;
    if let Some(role) = role {
        store.set_target_role(Some(role));
    }
    let target_role = store.state().target_role.clone();

    let response = api
        .analyze_resume(&resume_text, target_role.as_deref())
        .await?;
    if let Some(role) = &response.target_role {
        info!("analysis generated against target role '{role}'");
    }
    store.set_analysis_result(response.analysis.clone());

    println!("{}", response.analysis);
    Ok(())
}

pub fn status(store: &SessionStore, config: &Config) {
    let state = store.state();
    println!("{}", "Session".bold());
    match &state.resume_filename {
        Some(filename) => println!("  Resume: {}", filename.cyan()),
        None => println!("  Resume: {}", "none".dimmed()),
    }
    match &state.target_role {
        Some(role) => println!("  Target role: {}", role.cyan()),
        None => println!("  Target role: {}", "none".dimmed()),
    }
    println!(
        "  Analyzed: {}",
        if state.is_analyzed { "yes".green() } else { "no".yellow() }
    );

    let cached = [
        ("career paths", state.career_paths.is_some()),
        ("skill gaps", state.skill_gaps.is_some()),
        ("salary", state.salary_insights.is_some()),
        ("interview prep", state.interview_prep.is_some()),
        ("learning", state.learning_resources.is_some()),
        ("industry", state.industry_insights.is_some()),
        ("job match", state.job_match_result.is_some()),
    ];
    let cached: Vec<&str> = cached.iter().filter(|(_, c)| *c).map(|(n, _)| *n).collect();
    if cached.is_empty() {
        println!("  Cached insights: {}", "none".dimmed());
    } else {
        println!("  Cached insights: {}", cached.join(", "));
    }
    println!("  Data dir: {}", config.data_dir.display());
}

// ────────────────────────────────────────────────────────────────────────────
// Insights
// ────────────────────────────────────────────────────────────────────────────

/// Fetches and prints insight categories, reading each from the store's
/// cache when already present. `--refresh` drops all cached insights first,
/// forcing a refetch.
pub async fn insights(
    store: &mut SessionStore,
    api: &ApiClient,
    category: InsightCategory,
    refresh: bool,
    location: &str,
) -> Result<(), AppError> {
    let resume_text = require_resume(store)?;
    let target_role = store.state().target_role.clone();
    let role = target_role.as_deref();

    if refresh {
        store.clear_insights();
    }

    let categories = if category == InsightCategory::All {
        vec![
            InsightCategory::Paths,
            InsightCategory::SkillGaps,
            InsightCategory::Salary,
            InsightCategory::InterviewPrep,
            InsightCategory::Learning,
            InsightCategory::Industry,
        ]
    } else {
        vec![category]
    };

    for (i, category) in categories.iter().enumerate() {
        if i > 0 {
            println!();
        }
        match category {
            InsightCategory::Paths => {
                let data = match store.state().career_paths.clone() {
                    Some(cached) => cached,
                    None => {
                        let fetched = api.career_paths(&resume_text, role).await?;
                        store.set_career_paths(fetched.clone());
                        fetched
                    }
                };
                println!("{}", "Career paths".bold().underline());
                display::career_paths(&data);
            }
            InsightCategory::SkillGaps => {
                let data = match store.state().skill_gaps.clone() {
                    Some(cached) => cached,
                    None => {
                        let fetched = api.skill_gaps(&resume_text, role).await?;
                        store.set_skill_gaps(fetched.clone());
                        fetched
                    }
                };
                println!("{}", "Skill gaps".bold().underline());
                display::skill_gaps(&data);
            }
            InsightCategory::Salary => {
                let data = match store.state().salary_insights.clone() {
                    Some(cached) => cached,
                    None => {
                        let fetched = api.salary_insights(&resume_text, role, location).await?;
                        store.set_salary_insights(fetched.clone());
                        fetched
                    }
                };
                println!("{}", "Salary insights".bold().underline());
                display::salary(&data);
            }
            InsightCategory::InterviewPrep => {
                let data = match store.state().interview_prep.clone() {
                    Some(cached) => cached,
                    None => {
                        let fetched = api.interview_prep(&resume_text, role).await?;
                        store.set_interview_prep(fetched.clone());
                        fetched
                    }
                };
                println!("{}", "Interview preparation".bold().underline());
                display::interview_prep(&data);
            }
            InsightCategory::Learning => {
                let data = match store.state().learning_resources.clone() {
                    Some(cached) => cached,
                    None => {
                        let fetched = api.learning_resources(&resume_text, role).await?;
                        store.set_learning_resources(fetched.clone());
                        fetched
                    }
                };
                println!("{}", "Learning resources".bold().underline());
                display::learning(&data);
            }
            InsightCategory::Industry => {
                let data = match store.state().industry_insights.clone() {
                    Some(cached) => cached,
                    None => {
                        let fetched = api.industry_insights(&resume_text, role).await?;
                        store.set_industry_insights(fetched.clone());
                        fetched
                    }
                };
                println!("{}", "Industry insights".bold().underline());
                display::industry(&data);
            }
            InsightCategory::All => unreachable!("expanded above"),
        }
    }
    Ok(())
}

pub async fn job_match(
    store: &mut SessionStore,
    api: &ApiClient,
    description_file: &Path,
) -> Result<(), AppError> {
    let resume_text = require_resume(store)?;
    let job_description = std::fs::read_to_string(description_file)
        .with_context(|| format!("could not read {}", description_file.display()))?;
    if job_description.trim().is_empty() {
        return Err(AppError::Validation("job description file is empty".to_string()));
    }

    let report = api.job_match(&resume_text, &job_description).await?;
    display::job_match(&report);
    store.set_job_match_result(report);
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Job search
// ────────────────────────────────────────────────────────────────────────────

pub struct JobSearchArgs {
    pub term: Option<String>,
    pub location: String,
    pub count: u32,
    pub job_type: Option<String>,
    /// 1-based index of a result to bookmark after the search.
    pub save: Option<usize>,
}

/// Runs a job search, either by search term or (when no term is given)
/// matched against the loaded resume.
pub async fn search_jobs(
    store: &SessionStore,
    api: &ApiClient,
    tracker: &dyn TrackerStore,
    user_id: &str,
    args: JobSearchArgs,
) -> Result<(), AppError> {
    let response = match &args.term {
        Some(term) => {
            api.search_jobs(term, &args.location, args.count, args.job_type.as_deref())
                .await?
        }
        None => {
            let resume_text = require_resume(store)?;
            api.search_jobs_by_resume(
                &resume_text,
                &args.location,
                args.count,
                args.job_type.as_deref(),
            )
            .await?
        }
    };

    println!("{} jobs found\n", response.count.to_string().green());
    display::job_listings(&response.jobs);

    if let Some(index) = args.save {
        if index == 0 || index > response.jobs.len() {
            return Err(AppError::Validation(format!("--save {index} is out of range")));
        }
        let job = &response.jobs[index - 1];
        if tracker.is_job_saved(user_id, &job.apply_link).await? {
            println!("\n{} already bookmarked", "!".yellow());
        } else {
            let saved = tracker
                .save_job(SavedJob::from_listing(user_id, job, String::new()))
                .await?;
            println!(
                "\n{} Bookmarked {} at {}",
                "✓".green(),
                saved.job_title.bold(),
                saved.company.cyan()
            );
        }
    }
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Cover letter / interview / enhancement
// ────────────────────────────────────────────────────────────────────────────

pub struct CoverLetterArgs {
    pub job_title: String,
    pub company: String,
    pub description_file: Option<PathBuf>,
    pub tone: Option<String>,
    pub additional_info: Option<String>,
    pub output: Option<PathBuf>,
}

pub async fn cover_letter(
    store: &SessionStore,
    api: &ApiClient,
    args: CoverLetterArgs,
) -> Result<(), AppError> {
    let resume_text = require_resume(store)?;
    let job_description = match &args.description_file {
        Some(path) => Some(
            std::fs::read_to_string(path)
                .with_context(|| format!("could not read {}", path.display()))?,
        ),
        None => None,
    };

    let response = api
        .generate_cover_letter(&CoverLetterRequest {
            resume_text,
            job_title: args.job_title.clone(),
            company_name: args.company.clone(),
            job_description,
            tone: args.tone,
            additional_info: args.additional_info,
        })
        .await?;

    println!("{}", response.cover_letter);

    if let Some(output) = args.output {
        // A directory target gets a company-slugged file name inside it.
        let path = if output.is_dir() {
            output.join(format!("cover-letter-{}.txt", export::slugify(&args.company)))
        } else {
            output
        };
        let body = export::format_cover_letter(
            &response.cover_letter,
            Some(&args.job_title),
            Some(&args.company),
        );
        let report = export::render_report("Cover Letter", &body, true);
        export::write_report(&path, &report)?;
        println!("\n{} Written to {}", "✓".green(), path.display());
    }
    Ok(())
}

pub async fn interview_questions(store: &SessionStore, api: &ApiClient) -> Result<(), AppError> {
    let resume_text = require_resume(store)?;
    let target_role = store.state().target_role.clone();
    let response = api
        .interview_questions(&resume_text, target_role.as_deref())
        .await?;
    display::interview_questions(&response.questions);
    Ok(())
}

pub async fn evaluate_answer(
    store: &SessionStore,
    api: &ApiClient,
    question: &str,
    answer: &str,
) -> Result<(), AppError> {
    if answer.trim().is_empty() {
        return Err(AppError::Validation("answer cannot be empty".to_string()));
    }
    let target_role = store.state().target_role.clone();
    let evaluation = api
        .evaluate_answer(question, answer, target_role.as_deref())
        .await?;
    display::answer_evaluation(&evaluation);
    Ok(())
}

pub async fn enhance_section(
    store: &SessionStore,
    api: &ApiClient,
    section_type: &str,
    content_file: &Path,
) -> Result<(), AppError> {
    let content = std::fs::read_to_string(content_file)
        .with_context(|| format!("could not read {}", content_file.display()))?;
    if content.trim().is_empty() {
        return Err(AppError::Validation("section content is empty".to_string()));
    }
    let target_role = store.state().target_role.clone();
    let response = api
        .enhance_resume_section(section_type, &content, target_role.as_deref())
        .await?;
    println!("{}", response.enhanced_content);
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Bookmarks and applications
// ────────────────────────────────────────────────────────────────────────────

pub async fn bookmarks_list(tracker: &dyn TrackerStore, user_id: &str) -> Result<(), AppError> {
    let jobs = tracker.saved_jobs(user_id).await?;
    display::saved_jobs(&jobs);
    Ok(())
}

pub async fn bookmarks_remove(tracker: &dyn TrackerStore, id: Uuid) -> Result<(), AppError> {
    if tracker.unsave_job(id).await? {
        println!("{} Bookmark removed", "✓".green());
        Ok(())
    } else {
        Err(AppError::Validation(format!("no bookmark with id {id}")))
    }
}

pub struct NewApplicationArgs {
    pub job_title: String,
    pub company: String,
    pub location: String,
    pub salary: String,
    pub apply_link: String,
    pub status: ApplicationStatus,
    pub notes: String,
}

pub async fn application_add(
    tracker: &dyn TrackerStore,
    user_id: &str,
    args: NewApplicationArgs,
) -> Result<(), AppError> {
    let now = Utc::now();
    let app = tracker
        .create_application(JobApplication {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            job_title: args.job_title,
            company: args.company,
            location: args.location,
            salary: args.salary,
            apply_link: args.apply_link,
            status: args.status,
            applied_date: (args.status == ApplicationStatus::Applied).then_some(now),
            interview_date: None,
            notes: args.notes,
            resume_version: String::new(),
            cover_letter: String::new(),
            created_at: now,
            updated_at: now,
        })
        .await?;
    println!(
        "{} Tracking {} at {} ({})",
        "✓".green(),
        app.job_title.bold(),
        app.company.cyan(),
        app.id.to_string().dimmed()
    );
    Ok(())
}

pub async fn applications_list(
    tracker: &dyn TrackerStore,
    user_id: &str,
    status: Option<ApplicationStatus>,
) -> Result<(), AppError> {
    let apps = match status {
        Some(status) => tracker.applications_by_status(user_id, status).await?,
        None => tracker.applications(user_id).await?,
    };
    display::applications(&apps);
    Ok(())
}

pub async fn application_update(
    tracker: &dyn TrackerStore,
    id: Uuid,
    update: ApplicationUpdate,
) -> Result<(), AppError> {
    match tracker.update_application(id, update).await? {
        Some(app) => {
            println!(
                "{} {} at {} is now {}",
                "✓".green(),
                app.job_title.bold(),
                app.company.cyan(),
                app.status.as_str().yellow()
            );
            Ok(())
        }
        None => Err(AppError::Validation(format!("no application with id {id}"))),
    }
}

pub async fn application_delete(tracker: &dyn TrackerStore, id: Uuid) -> Result<(), AppError> {
    if tracker.delete_application(id).await? {
        println!("{} Application deleted", "✓".green());
        Ok(())
    } else {
        Err(AppError::Validation(format!("no application with id {id}")))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Export / reset / health
// ────────────────────────────────────────────────────────────────────────────

pub async fn export_report(
    store: &SessionStore,
    tracker: &dyn TrackerStore,
    user_id: &str,
    target: ExportTarget,
    output: Option<PathBuf>,
) -> Result<(), AppError> {
    let (default_name, title, body) = match target {
        ExportTarget::Analysis => {
            if !store.state().is_analyzed {
                return Err(AppError::Precondition(
                    "no analysis to export; run `analyze` first".to_string(),
                ));
            }
            (
                "resume-analysis",
                "Resume Analysis Report",
                export::format_analysis(store.state()),
            )
        }
        ExportTarget::Match => {
            let report = store.state().job_match_result.as_ref().ok_or_else(|| {
                AppError::Precondition("no job match to export; run `match` first".to_string())
            })?;
            (
                "job-match-analysis",
                "Job Match Analysis Report",
                export::format_job_match(report),
            )
        }
        ExportTarget::Insights => (
            "career-insights",
            "Career Insights Report",
            export::format_career_insights(store.state()),
        ),
        ExportTarget::Applications => {
            let apps = tracker.applications(user_id).await?;
            (
                "job-applications",
                "Job Applications Tracker",
                export::format_applications(&apps),
            )
        }
    };

    let path = output.unwrap_or_else(|| PathBuf::from(format!("{default_name}.txt")));
    let report = export::render_report(title, &body, true);
    export::write_report(&path, &report)?;
    println!("{} Written to {}", "✓".green(), path.display());
    Ok(())
}

pub fn reset(store: &mut SessionStore, insights_only: bool) {
    if insights_only {
        store.clear_insights();
        println!("{} Cached insights cleared; resume and analysis kept", "✓".green());
    } else {
        store.clear_all();
        println!("{} Session reset", "✓".green());
    }
}

pub async fn health(api: &ApiClient) -> Result<(), AppError> {
    let response = api.health().await?;
    println!("Backend: {}", response.status.green());
    println!("AI service: {}", response.groq_api);
    Ok(())
}
