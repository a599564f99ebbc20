mod api;
mod cli;
mod config;
mod errors;
mod export;
mod models;
mod session;
mod tracker;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

use crate::api::ApiClient;
use crate::cli::commands::{
    self, CoverLetterArgs, ExportTarget, InsightCategory, JobSearchArgs, NewApplicationArgs,
};
use crate::config::Config;
use crate::models::tracker::{ApplicationStatus, ApplicationUpdate};
use crate::session::{JsonFileSnapshotStore, MemorySnapshotStore, SessionStore};
use crate::tracker::{local_user_id, JsonTrackerStore, TrackerStore};

#[derive(Parser)]
#[command(name = "agragrati")]
#[command(about = "Agragrati - AI career assistant\nResume analysis, job search and application tracking from the terminal")]
#[command(version)]
struct Cli {
    /// Run against an in-memory session; nothing is read from or written
    /// to the session file
    #[arg(long, global = true)]
    no_persist: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Upload a resume; the backend extracts its text into the session
    Upload {
        /// Resume file (PDF or text)
        file: PathBuf,
    },
    /// Run the AI analysis on the loaded resume
    Analyze {
        /// Target role to analyze against (also stored in the session)
        #[arg(short, long)]
        role: Option<String>,
    },
    /// Show or change the target role
    Role {
        /// New target role
        role: Option<String>,
        /// Clear the stored role
        #[arg(long, conflicts_with = "role")]
        clear: bool,
    },
    /// Fetch career insights (cached per resume within a session)
    Insights {
        /// Insight category
        #[arg(value_enum)]
        category: InsightCategory,
        /// Drop all cached insights and refetch
        #[arg(long)]
        refresh: bool,
        /// Location used for salary data
        #[arg(long, default_value = "United States")]
        location: String,
    },
    /// Match the loaded resume against a job description
    Match {
        /// File holding the job description text
        description: PathBuf,
    },
    /// Search job listings (by term, or by resume when no term is given)
    Jobs {
        /// Search term; omit to match against the loaded resume
        term: Option<String>,
        #[arg(short, long, default_value = "United States")]
        location: String,
        /// Number of results to request
        #[arg(short = 'n', long, default_value_t = 20)]
        count: u32,
        /// Filter: fulltime, parttime, contract, internship
        #[arg(long)]
        job_type: Option<String>,
        /// Bookmark the n-th result (1-based)
        #[arg(long)]
        save: Option<usize>,
    },
    /// Generate a cover letter for a specific position
    CoverLetter {
        job_title: String,
        company: String,
        /// File holding the job description text
        #[arg(long)]
        description: Option<PathBuf>,
        /// Writing tone, e.g. professional, enthusiastic
        #[arg(long)]
        tone: Option<String>,
        /// Extra context to weave in
        #[arg(long)]
        info: Option<String>,
        /// Also write the letter to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Interview practice
    Interview {
        #[command(subcommand)]
        command: InterviewCommand,
    },
    /// Rewrite one resume section with AI
    Enhance {
        /// Section type, e.g. experience, summary, skills
        section: String,
        /// File holding the section's current text
        file: PathBuf,
    },
    /// Saved-job bookmarks
    Bookmarks {
        #[command(subcommand)]
        command: BookmarksCommand,
    },
    /// Job application tracking
    Applications {
        #[command(subcommand)]
        command: ApplicationsCommand,
    },
    /// Export a text report
    Export {
        #[arg(value_enum)]
        target: ExportTarget,
        /// Output path (defaults to <target>.txt in the working directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show the current session
    Status,
    /// Reset the session
    Reset {
        /// Only drop cached insights, keeping the resume and analysis
        #[arg(long)]
        insights: bool,
    },
    /// Check backend connectivity
    Health,
}

#[derive(Subcommand)]
enum InterviewCommand {
    /// Generate likely interview questions from the loaded resume
    Questions,
    /// Get AI feedback on an answer
    Evaluate { question: String, answer: String },
}

#[derive(Subcommand)]
enum BookmarksCommand {
    /// List bookmarks, newest first
    List,
    /// Remove a bookmark by id
    Remove { id: Uuid },
}

#[derive(Subcommand)]
enum ApplicationsCommand {
    /// Track a new application
    Add {
        job_title: String,
        company: String,
        #[arg(long, default_value = "")]
        location: String,
        #[arg(long, default_value = "")]
        salary: String,
        #[arg(long, default_value = "")]
        apply_link: String,
        /// saved, applied, interviewing, offered, rejected or withdrawn
        #[arg(long, default_value = "saved")]
        status: ApplicationStatus,
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// List applications, most recently updated first
    List {
        /// Only show one status
        #[arg(long)]
        status: Option<ApplicationStatus>,
    },
    /// Update a tracked application
    Update {
        id: Uuid,
        #[arg(long)]
        status: Option<ApplicationStatus>,
        /// Date applied, YYYY-MM-DD
        #[arg(long)]
        applied: Option<String>,
        /// Interview date, YYYY-MM-DD
        #[arg(long)]
        interview: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Stop tracking an application
    Delete { id: Uuid },
}

fn parse_date(label: &str, value: &str) -> Result<chrono::DateTime<chrono::Utc>> {
    let date = chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| anyhow::anyhow!("{label} must be YYYY-MM-DD, got '{value}'"))?;
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| anyhow::anyhow!("invalid {label}"))?;
    Ok(chrono::DateTime::from_naive_utc_and_offset(midnight, chrono::Utc))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("agragrati v{} against {}", env!("CARGO_PKG_VERSION"), config.api_url);

    let api = ApiClient::new(config.api_url.clone());
    let mut store = if cli.no_persist {
        SessionStore::empty(Box::new(MemorySnapshotStore::new()))
    } else {
        SessionStore::load(Box::new(JsonFileSnapshotStore::new(config.session_file())))
    };
    let tracker = JsonTrackerStore::new(config.tracker_file());
    let user_id = local_user_id(&config.user_id_file())?;

    let result = run(cli.command, &config, &api, &mut store, &tracker, &user_id).await;
    if let Err(e) = result {
        eprintln!("{} {e}", "error:".red().bold());
        std::process::exit(1);
    }
    Ok(())
}

async fn run(
    command: Command,
    config: &Config,
    api: &ApiClient,
    store: &mut SessionStore,
    tracker: &dyn TrackerStore,
    user_id: &str,
) -> Result<(), errors::AppError> {
    match command {
        Command::Upload { file } => commands::upload(store, api, &file).await,
        Command::Analyze { role } => commands::analyze(store, api, role).await,
        Command::Role { role, clear } => {
            if clear {
                commands::set_role(store, None)
            } else if role.is_some() {
                commands::set_role(store, role)
            } else {
                match &store.state().target_role {
                    Some(role) => println!("Target role: {}", role.cyan()),
                    None => println!("Target role: {}", "none".dimmed()),
                }
                Ok(())
            }
        }
        Command::Insights {
            category,
            refresh,
            location,
        } => commands::insights(store, api, category, refresh, &location).await,
        Command::Match { description } => commands::job_match(store, api, &description).await,
        Command::Jobs {
            term,
            location,
            count,
            job_type,
            save,
        } => {
            commands::search_jobs(
                store,
                api,
                tracker,
                user_id,
                JobSearchArgs {
                    term,
                    location,
                    count,
                    job_type,
                    save,
                },
            )
            .await
        }
        Command::CoverLetter {
            job_title,
            company,
            description,
            tone,
            info,
            output,
        } => {
            commands::cover_letter(
                store,
                api,
                CoverLetterArgs {
                    job_title,
                    company,
                    description_file: description,
                    tone,
                    additional_info: info,
                    output,
                },
            )
            .await
        }
        Command::Interview { command } => match command {
            InterviewCommand::Questions => commands::interview_questions(store, api).await,
            InterviewCommand::Evaluate { question, answer } => {
                commands::evaluate_answer(store, api, &question, &answer).await
            }
        },
        Command::Enhance { section, file } => {
            commands::enhance_section(store, api, &section, &file).await
        }
        Command::Bookmarks { command } => match command {
            BookmarksCommand::List => commands::bookmarks_list(tracker, user_id).await,
            BookmarksCommand::Remove { id } => commands::bookmarks_remove(tracker, id).await,
        },
        Command::Applications { command } => match command {
            ApplicationsCommand::Add {
                job_title,
                company,
                location,
                salary,
                apply_link,
                status,
                notes,
            } => {
                commands::application_add(
                    tracker,
                    user_id,
                    NewApplicationArgs {
                        job_title,
                        company,
                        location,
                        salary,
                        apply_link,
                        status,
                        notes,
                    },
                )
                .await
            }
            ApplicationsCommand::List { status } => {
                commands::applications_list(tracker, user_id, status).await
            }
            ApplicationsCommand::Update {
                id,
                status,
                applied,
                interview,
                notes,
            } => {
                let update = ApplicationUpdate {
                    status,
                    applied_date: applied
                        .map(|d| parse_date("--applied", &d))
                        .transpose()?,
                    interview_date: interview
                        .map(|d| parse_date("--interview", &d))
                        .transpose()?,
                    notes,
                    ..ApplicationUpdate::default()
                };
                commands::application_update(tracker, id, update).await
            }
            ApplicationsCommand::Delete { id } => commands::application_delete(tracker, id).await,
        },
        Command::Export { target, output } => {
            commands::export_report(store, tracker, user_id, target, output).await
        }
        Command::Status => {
            commands::status(store, config);
            Ok(())
        }
        Command::Reset { insights } => {
            commands::reset(store, insights);
            Ok(())
        }
        Command::Health => commands::health(api).await,
    }
}
