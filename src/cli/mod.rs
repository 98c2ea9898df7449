//! Command-line parsing for the SmartRecruit client.
//!
//! Parsing lives here; dispatch lives in `app`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{ExportFormat, JobStatus, SortOrder};
use crate::views::settings::SettingKey;

pub mod picker;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "sr", version, about = "SmartRecruit console client")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in and store the access token.
    Login(LoginArgs),
    /// Create an account and sign in.
    Register(RegisterArgs),
    /// Forget the stored token.
    Logout,
    /// Show the signed-in user.
    Whoami,
    /// Exchange the stored token for a fresh one.
    Refresh,
    /// Manage job postings.
    #[command(subcommand)]
    Jobs(JobsCommand),
    /// Browse and manage candidates.
    #[command(subcommand)]
    Candidates(CandidatesCommand),
    /// Upload CVs (PDF/DOCX) for processing.
    Upload(UploadArgs),
    /// Run and inspect AI rankings.
    #[command(subcommand)]
    Ranking(RankingCommand),
    /// Recruitment analytics.
    #[command(subcommand)]
    Analytics(AnalyticsCommand),
    /// Public careers page: browse open jobs and apply.
    #[command(subcommand)]
    Careers(CareersCommand),
    /// Ranking weights and processing preferences.
    #[command(subcommand)]
    Settings(SettingsCommand),
    /// Launch the interactive TUI.
    Tui,
}

#[derive(Debug, Args)]
pub struct LoginArgs {
    #[arg(short, long)]
    pub email: String,
    /// Password; prompted for when omitted.
    #[arg(short, long, env = "SR_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

#[derive(Debug, Args)]
pub struct RegisterArgs {
    #[arg(short, long)]
    pub email: String,
    #[arg(short = 'n', long)]
    pub full_name: String,
    #[arg(short, long, env = "SR_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum JobsCommand {
    /// List jobs.
    List(JobListArgs),
    Show { id: i64 },
    Create(JobFields),
    /// Change only the given fields.
    Update {
        id: i64,
        #[command(flatten)]
        fields: JobFields,
    },
    Delete { id: i64 },
}

#[derive(Debug, Args, Default)]
pub struct JobListArgs {
    /// Match title, department or skills.
    #[arg(short, long)]
    pub search: Option<String>,
    #[arg(long, value_enum)]
    pub status: Option<JobStatus>,
    /// One-based page of 10 jobs.
    #[arg(long, default_value_t = 1)]
    pub page: usize,
}

#[derive(Debug, Args, Default, Clone)]
pub struct JobFields {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub department: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub requirements: Option<String>,
    /// Required skill; repeat or comma-separate.
    #[arg(long = "skill", value_delimiter = ',')]
    pub skills: Vec<String>,
    #[arg(long)]
    pub min_experience: Option<u32>,
    #[arg(long)]
    pub education: Option<String>,
    #[arg(long, value_enum)]
    pub status: Option<JobStatus>,
}

#[derive(Debug, Subcommand)]
pub enum CandidatesCommand {
    List(CandidateListArgs),
    Show { id: i64 },
    /// Edit parsed CV fields.
    Update {
        id: i64,
        #[arg(long = "skill", value_delimiter = ',')]
        skills: Vec<String>,
        #[arg(long = "certification", value_delimiter = ',')]
        certifications: Vec<String>,
        #[arg(long)]
        summary: Option<String>,
    },
    Delete { id: i64 },
    /// Download a candidate's data.
    Export {
        id: i64,
        /// Defaults to `candidate-{id}-data.json` in the current directory.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Args)]
pub struct CandidateListArgs {
    #[arg(short, long)]
    pub search: Option<String>,
    /// Filter by skill; repeat or comma-separate.
    #[arg(long = "skill", value_delimiter = ',')]
    pub skills: Vec<String>,
    #[arg(long, default_value_t = 1)]
    pub page: u32,
    /// 10, 25 or 50.
    #[arg(long, default_value_t = 10)]
    pub page_size: u32,
    #[arg(long)]
    pub sort_by: Option<String>,
    #[arg(long, value_enum)]
    pub order: Option<SortOrder>,
}

#[derive(Debug, Args)]
pub struct UploadArgs {
    /// CV files; pick interactively when omitted.
    pub files: Vec<PathBuf>,
    /// Attach the uploads to a job.
    #[arg(short, long)]
    pub job: Option<i64>,
    /// Follow processing until every file finishes.
    #[arg(short, long)]
    pub wait: bool,
}

#[derive(Debug, Subcommand)]
pub enum RankingCommand {
    /// Start ranking every candidate against a job.
    Run { job_id: i64 },
    /// Show a job's ranking.
    Show { job_id: i64 },
    /// Compare two or three candidates for a job.
    Compare {
        job_id: i64,
        #[arg(num_args = 2..=3, required = true)]
        candidate_ids: Vec<i64>,
    },
    Export {
        job_id: i64,
        #[arg(short, long, value_enum, default_value_t = ExportFormat::Csv)]
        format: ExportFormat,
        /// Defaults to `ranking-job-{id}.{csv|pdf}` in the current directory.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Subcommand)]
pub enum AnalyticsCommand {
    Overview,
    /// Daily applicant counts.
    Trend {
        /// Window in days (7..=365).
        #[arg(short, long, default_value_t = 30)]
        days: u32,
    },
    /// Score distribution, optionally for one job.
    Scores {
        #[arg(short, long)]
        job: Option<i64>,
    },
    Sources,
    /// Four-fifths rule audit for a job.
    Bias { job_id: i64 },
}

#[derive(Debug, Subcommand)]
pub enum CareersCommand {
    /// Open positions.
    List {
        #[arg(short, long)]
        search: Option<String>,
    },
    Show { id: i64 },
    /// Apply to an open position.
    Apply(ApplyArgs),
}

#[derive(Debug, Args)]
pub struct ApplyArgs {
    pub job_id: i64,
    #[arg(short = 'n', long)]
    pub full_name: String,
    #[arg(short, long)]
    pub email: String,
    #[arg(short, long, default_value = "")]
    pub phone: String,
    /// CV file (PDF or DOCX, up to 10MB).
    #[arg(long)]
    pub cv: PathBuf,
}

#[derive(Debug, Subcommand)]
pub enum SettingsCommand {
    Show,
    /// Change one or more fields, e.g. `set skill=50 certification=0`.
    Set {
        #[arg(required = true, value_parser = parse_assignment)]
        assignments: Vec<(SettingKey, String)>,
    },
    /// Restore the defaults.
    Reset,
}

fn parse_assignment(raw: &str) -> Result<(SettingKey, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value (got: {raw})"))?;
    let key = <SettingKey as clap::ValueEnum>::from_str(key.trim(), true)?;
    Ok((key, value.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_commands() {
        let cli = Cli::parse_from(["sr", "ranking", "compare", "3", "12", "14"]);
        match cli.command {
            Command::Ranking(RankingCommand::Compare { job_id, candidate_ids }) => {
                assert_eq!(job_id, 3);
                assert_eq!(candidate_ids, [12, 14]);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn compare_takes_two_or_three() {
        assert!(Cli::try_parse_from(["sr", "ranking", "compare", "3", "12"]).is_err());
        assert!(Cli::try_parse_from(["sr", "ranking", "compare", "3", "1", "2", "3", "4"]).is_err());
    }

    #[test]
    fn skills_split_on_commas() {
        let cli = Cli::parse_from(["sr", "jobs", "create", "--title", "QA", "--skill", "a,b", "--skill", "c"]);
        let Command::Jobs(JobsCommand::Create(fields)) = cli.command else {
            panic!("expected jobs create");
        };
        assert_eq!(fields.skills, ["a", "b", "c"]);
    }

    #[test]
    fn settings_assignments() {
        assert_eq!(
            parse_assignment("skill=50").unwrap(),
            (SettingKey::Skill, "50".to_string())
        );
        assert_eq!(
            parse_assignment("auto-process = off").unwrap(),
            (SettingKey::AutoProcess, "off".to_string())
        );
        assert!(parse_assignment("skill").is_err());
        assert!(parse_assignment("colour=red").is_err());
    }
}
