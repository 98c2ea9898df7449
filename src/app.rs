//! Top-level application orchestration.
//!
//! `src/main.rs` stays tiny; this is the real main. It parses arguments,
//! loads configuration, installs logging, and dispatches each subcommand
//! onto the API client and the views.

use std::io::{self, Write};
use std::path::Path;
use std::sync::mpsc;
use std::sync::Arc;

use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal;

use crate::api::{ApiClient, ProgressFn, Transport};
use crate::cli::{
    AnalyticsCommand, ApplyArgs, CandidateListArgs, CandidatesCommand, CareersCommand, Cli,
    Command, JobFields, JobListArgs, JobsCommand, LoginArgs, RankingCommand, RegisterArgs,
    SettingsCommand, UploadArgs,
};
use crate::config::ClientConfig;
use crate::domain::{CandidateFilters, CandidatePatch, JobFilters, JobPatch};
use crate::error::{AppError, EXIT_LOCAL};
use crate::io::{read_settings, save_download, write_settings};
use crate::logging::{self, LogTarget};
use crate::messages::{failure_banner, Locale, Msg};
use crate::poll::spawn_poller;
use crate::report;
use crate::views::analytics::clamp_days;
use crate::views::apply::ApplyWizard;
use crate::views::candidates::{self, PAGE_SIZES};
use crate::views::jobs::{filter_jobs, JobBoard, JobForm};
use crate::views::ranking::{self, RankingView};
use crate::views::session::Session;
use crate::views::settings::RankingSettings;
use crate::views::upload::UploadQueue;

/// Entry point for the `sr` binary.
pub fn run() -> Result<(), AppError> {
    // `sr` and `sr --flag` behave like `sr tui`. Clap needs a subcommand
    // name, so argv is rewritten before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = Cli::parse_from(argv);
    let config = ClientConfig::from_env()?;

    let target = match cli.command {
        Command::Tui => LogTarget::File(config.log_file.clone()),
        _ => LogTarget::Stderr,
    };
    logging::init(&target)?;
    tracing::debug!(api_url = %config.api_url, "configuration loaded");

    let client = Arc::new(ApiClient::from_config(&config)?);
    match cli.command {
        Command::Tui => crate::tui::run(client, &config),
        command => dispatch(command, &client, &config).inspect_err(|err| {
            tracing::warn!(exit_code = err.exit_code(), error = %err, "command failed");
        }),
    }
}

/// Run one non-interactive subcommand.
pub fn dispatch<T: Transport + 'static>(
    command: Command,
    client: &Arc<ApiClient<T>>,
    config: &ClientConfig,
) -> Result<(), AppError> {
    let locale = config.locale;
    match command {
        Command::Login(args) => handle_login(client, args),
        Command::Register(args) => handle_register(client, args),
        Command::Logout => {
            Session::default().logout(client)?;
            println!("Signed out.");
            Ok(())
        }
        Command::Whoami => {
            let session = Session::load(client);
            print!("{}", report::format_user(session.require_user()?));
            Ok(())
        }
        Command::Refresh => {
            let auth = client.refresh_token()?;
            println!("Token refreshed for {}.", auth.user.email);
            Ok(())
        }
        Command::Jobs(cmd) => handle_jobs(client, cmd, locale),
        Command::Candidates(cmd) => handle_candidates(client, cmd, locale),
        Command::Upload(args) => handle_upload(client, args, config),
        Command::Ranking(cmd) => handle_ranking(client, cmd, locale),
        Command::Analytics(cmd) => handle_analytics(client, cmd, locale),
        Command::Careers(cmd) => handle_careers(client, cmd, locale),
        Command::Settings(cmd) => handle_settings(cmd, &config.settings_file, locale),
        Command::Tui => Err(AppError::new(EXIT_LOCAL, "The TUI needs a terminal; run `sr tui`.")),
    }
}

/// Replace a failure with its localized banner, keeping the exit code.
fn banner(msg: Msg, locale: Locale) -> impl FnOnce(AppError) -> AppError {
    move |err| AppError::new(err.exit_code(), failure_banner(&err, msg, locale))
}

fn handle_login<T: Transport>(client: &ApiClient<T>, args: LoginArgs) -> Result<(), AppError> {
    let password = match args.password {
        Some(p) => p,
        None => prompt_password("Password: ")?,
    };
    let mut session = Session::default();
    let user = session.login(client, &args.email, &password)?;
    println!("Signed in as {} ({}).", user.full_name, user.role.as_str());
    Ok(())
}

fn handle_register<T: Transport>(client: &ApiClient<T>, args: RegisterArgs) -> Result<(), AppError> {
    let password = match args.password {
        Some(p) => p,
        None => prompt_password("Password: ")?,
    };
    let mut session = Session::default();
    let user = session.register(client, &args.email, &password, &args.full_name)?;
    println!("Account created. Signed in as {}.", user.full_name);
    Ok(())
}

fn handle_jobs<T: Transport>(client: &ApiClient<T>, cmd: JobsCommand, locale: Locale) -> Result<(), AppError> {
    match cmd {
        JobsCommand::List(args) => list_jobs(client, args, locale),
        JobsCommand::Show { id } => {
            let job = client.get_job(id).map_err(banner(Msg::JobNotFound, locale))?;
            print!("{}", report::format_job(&job));
            Ok(())
        }
        JobsCommand::Create(fields) => {
            let mut form = JobForm::create();
            fill_draft(&mut form, fields)?;
            let (job, msg) = form.submit(client).map_err(banner(Msg::SaveJobFailed, locale))?;
            println!("{} (#{})", msg.text(locale), job.id);
            Ok(())
        }
        JobsCommand::Update { id, fields } => {
            let patch = job_patch(fields);
            if patch.is_empty() {
                return Err(AppError::new(EXIT_LOCAL, "Nothing to update; pass at least one field."));
            }
            let job = client
                .update_job(id, &patch)
                .map_err(banner(Msg::SaveJobFailed, locale))?;
            println!("{} (#{})", Msg::JobUpdated.text(locale), job.id);
            Ok(())
        }
        JobsCommand::Delete { id } => {
            client.delete_job(id).map_err(banner(Msg::DeleteJobFailed, locale))?;
            println!("{}", Msg::JobDeleted.text(locale));
            Ok(())
        }
    }
}

fn list_jobs<T: Transport>(client: &ApiClient<T>, args: JobListArgs, locale: Locale) -> Result<(), AppError> {
    let mut board = JobBoard::new();
    board.set_search(args.search.unwrap_or_default());
    let filters = JobFilters {
        page_size: Some(100),
        search: board.search_filter(),
        status: args.status,
        ..JobFilters::default()
    };
    let page = client.list_jobs(&filters).map_err(banner(Msg::LoadJobsFailed, locale))?;
    board.load(page.items);
    board.set_page(args.page);
    print!("{}", report::format_jobs(board.visible()));
    if board.total_pages() > 1 {
        println!("page {} of {}", board.page(), board.total_pages());
    }
    Ok(())
}

fn fill_draft(form: &mut JobForm, fields: JobFields) -> Result<(), AppError> {
    let title = fields
        .title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::new(EXIT_LOCAL, "A job needs a --title."))?;
    let draft = form.draft_mut();
    draft.title = title;
    draft.department = fields.department.unwrap_or_default();
    draft.description = fields.description.unwrap_or_default();
    draft.requirements = fields.requirements.unwrap_or_default();
    draft.min_experience_years = fields.min_experience.unwrap_or_default();
    draft.education_level = fields.education.unwrap_or_default();
    if let Some(status) = fields.status {
        draft.status = status;
    }
    for skill in &fields.skills {
        form.add_skill(skill);
    }
    Ok(())
}

fn job_patch(fields: JobFields) -> JobPatch {
    let mut form = JobForm::create();
    for skill in &fields.skills {
        form.add_skill(skill);
    }
    let skills = form.draft().skills_required.clone();
    JobPatch {
        title: fields.title,
        department: fields.department,
        description: fields.description,
        requirements: fields.requirements,
        skills_required: (!skills.is_empty()).then_some(skills),
        min_experience_years: fields.min_experience,
        education_level: fields.education,
        status: fields.status,
    }
}

fn handle_candidates<T: Transport>(
    client: &ApiClient<T>,
    cmd: CandidatesCommand,
    locale: Locale,
) -> Result<(), AppError> {
    match cmd {
        CandidatesCommand::List(args) => {
            let filters = candidate_filters(args)?;
            let page = client
                .list_candidates(&filters)
                .map_err(banner(Msg::LoadCandidatesFailed, locale))?;
            print!("{}", report::format_candidates(&page));
            Ok(())
        }
        CandidatesCommand::Show { id } => {
            let candidate = client
                .get_candidate(id)
                .map_err(banner(Msg::LoadCandidatesFailed, locale))?;
            print!("{}", report::format_candidate(&candidate));
            Ok(())
        }
        CandidatesCommand::Update { id, skills, certifications, summary } => {
            let patch = CandidatePatch {
                skills: (!skills.is_empty()).then_some(skills),
                certifications: (!certifications.is_empty()).then_some(certifications),
                summary,
                ..CandidatePatch::default()
            };
            if patch.is_empty() {
                return Err(AppError::new(EXIT_LOCAL, "Nothing to update; pass at least one field."));
            }
            let candidate = client.update_candidate(id, &patch)?;
            print!("{}", report::format_candidate(&candidate));
            Ok(())
        }
        CandidatesCommand::Delete { id } => {
            client
                .delete_candidate(id)
                .map_err(banner(Msg::DeleteCandidateFailed, locale))?;
            println!("{}", Msg::CandidateDeleted.text(locale));
            Ok(())
        }
        CandidatesCommand::Export { id, output } => {
            let blob = client
                .export_candidate(id)
                .map_err(banner(Msg::ExportFailed, locale))?;
            let path = save_download(output.as_deref(), &blob, &candidates::export_file_name(id))?;
            println!("Saved {}", path.display());
            Ok(())
        }
    }
}

fn candidate_filters(args: CandidateListArgs) -> Result<CandidateFilters, AppError> {
    if !PAGE_SIZES.contains(&args.page_size) {
        return Err(AppError::new(
            EXIT_LOCAL,
            format!("Page size must be one of 10, 25 or 50 (got: {}).", args.page_size),
        ));
    }
    Ok(CandidateFilters {
        page: Some(args.page.max(1)),
        page_size: Some(args.page_size),
        search: args.search,
        skills: args.skills,
        sort_by: args.sort_by,
        sort_order: args.order,
    })
}

fn handle_upload<T: Transport + 'static>(
    client: &Arc<ApiClient<T>>,
    args: UploadArgs,
    config: &ClientConfig,
) -> Result<(), AppError> {
    let locale = config.locale;
    let paths = if args.files.is_empty() {
        crate::cli::picker::prompt_for_cv_paths()?
    } else {
        args.files
    };

    let mut queue = UploadQueue::new();
    queue.set_job(args.job);
    let rejected = queue.add_paths(&paths);
    for (path, reason) in &rejected {
        eprintln!("skipped {}: {}", path.display(), reason.as_str());
    }
    if !rejected.is_empty() {
        eprintln!("{}", Msg::FilesRejected.text(locale));
    }

    let progress: ProgressFn = Arc::new(|pct: u8| {
        eprint!("\rUploading... {pct:>3}%");
        if pct >= 100 {
            eprintln!();
        }
    });
    let (sent, tasks) = queue
        .upload(client, Some(progress))
        .map_err(banner(Msg::UploadFailed, locale))?;
    println!("{}", Msg::UploadAccepted(sent).text(locale));

    if args.wait && !tasks.is_empty() {
        let (tx, rx) = mpsc::channel();
        let handles: Vec<_> = tasks
            .into_iter()
            .map(|(_, task_id)| spawn_poller(Arc::clone(client), task_id, config.poll_interval, tx.clone()))
            .collect();
        drop(tx);

        let mut remaining = handles.len();
        while remaining > 0 {
            let Ok(event) = rx.recv() else {
                break;
            };
            let entry = queue.apply_event(&event);
            if event.is_last() {
                remaining -= 1;
                if let Some(entry) = entry {
                    println!("{}: {}", entry.file_name, entry.status.as_str());
                }
            }
        }
        for handle in handles {
            handle.join();
        }
        println!("{} of {} processed.", queue.completed_count(), queue.entries().len());
    }

    print!("{}", report::format_queue(queue.entries()));
    Ok(())
}

fn handle_ranking<T: Transport>(client: &ApiClient<T>, cmd: RankingCommand, locale: Locale) -> Result<(), AppError> {
    match cmd {
        RankingCommand::Run { job_id } => {
            let run = client
                .run_ranking(job_id)
                .map_err(banner(Msg::RunRankingFailed, locale))?;
            println!("{} (task {})", Msg::RankingStarted.text(locale), run.task_id);
            Ok(())
        }
        RankingCommand::Show { job_id } => {
            let rankings = client
                .rankings_for_job(job_id)
                .map_err(banner(Msg::LoadRankingFailed, locale))?;
            print!("{}", report::format_rankings(&rankings));
            Ok(())
        }
        RankingCommand::Compare { job_id, candidate_ids } => {
            let mut view = RankingView::new();
            view.select_job(client, job_id)
                .map_err(banner(Msg::LoadRankingFailed, locale))?;
            for id in candidate_ids {
                view.toggle_compare(id);
            }
            let compared = view.compare(client).map_err(banner(Msg::CompareFailed, locale))?;
            print!("{}", report::format_comparison(compared));
            Ok(())
        }
        RankingCommand::Export { job_id, format, output } => {
            let blob = client
                .export_ranking(job_id, format)
                .map_err(banner(Msg::ExportRankingFailed, locale))?;
            let path = save_download(output.as_deref(), &blob, &ranking::export_file_name(job_id, format))?;
            println!("Saved {}", path.display());
            Ok(())
        }
    }
}

fn handle_analytics<T: Transport>(
    client: &ApiClient<T>,
    cmd: AnalyticsCommand,
    locale: Locale,
) -> Result<(), AppError> {
    let failed = || banner(Msg::LoadAnalyticsFailed, locale);
    let text = match cmd {
        AnalyticsCommand::Overview => report::format_overview(&client.overview().map_err(failed())?),
        AnalyticsCommand::Trend { days } => {
            report::format_trend(&client.applicants_trend(clamp_days(days)).map_err(failed())?)
        }
        AnalyticsCommand::Scores { job } => {
            report::format_scores(&client.score_distribution(job).map_err(failed())?)
        }
        AnalyticsCommand::Sources => report::format_sources(&client.source_breakdown().map_err(failed())?),
        AnalyticsCommand::Bias { job_id } => report::format_bias(&client.bias_report(job_id).map_err(failed())?),
    };
    print!("{text}");
    Ok(())
}

fn handle_careers<T: Transport>(client: &ApiClient<T>, cmd: CareersCommand, locale: Locale) -> Result<(), AppError> {
    match cmd {
        CareersCommand::List { search } => {
            let jobs = client.list_open_jobs().map_err(banner(Msg::LoadJobsFailed, locale))?;
            let shown: Vec<_> = filter_jobs(&jobs, search.as_deref().unwrap_or(""))
                .into_iter()
                .cloned()
                .collect();
            print!("{}", report::format_jobs(&shown));
            Ok(())
        }
        CareersCommand::Show { id } => {
            let job = client.get_public_job(id).map_err(banner(Msg::JobNotFound, locale))?;
            print!("{}", report::format_job(&job));
            Ok(())
        }
        CareersCommand::Apply(args) => apply(client, args, locale),
    }
}

fn apply<T: Transport>(client: &ApiClient<T>, args: ApplyArgs, locale: Locale) -> Result<(), AppError> {
    let job = client
        .get_public_job(args.job_id)
        .map_err(banner(Msg::JobNotFound, locale))?;

    let mut wizard = ApplyWizard::new();
    wizard.select_job(job);
    let form = wizard.form_mut();
    form.full_name = args.full_name;
    form.email = args.email;
    form.phone = args.phone;
    form.set_file_from_disk(args.cv.clone()).map_err(|reason| {
        AppError::new(EXIT_LOCAL, format!("{}: {}", args.cv.display(), reason.as_str()))
    })?;

    let progress: ProgressFn = Arc::new(|pct: u8| {
        eprint!("\rSending... {pct:>3}%");
        if pct >= 100 {
            eprintln!();
        }
    });
    match wizard.submit(client, locale, Some(progress)) {
        Ok(receipt) => {
            print!("{}", report::format_receipt(receipt));
            Ok(())
        }
        Err(err) => {
            let text = wizard
                .form()
                .error()
                .map(str::to_string)
                .unwrap_or_else(|| err.message().to_string());
            Err(AppError::new(err.exit_code(), text))
        }
    }
}

fn handle_settings(cmd: SettingsCommand, path: &Path, locale: Locale) -> Result<(), AppError> {
    match cmd {
        SettingsCommand::Show => {
            print!("{}", report::format_settings(&read_settings(path)?));
            Ok(())
        }
        SettingsCommand::Set { assignments } => {
            let mut settings = read_settings(path)?;
            for (key, value) in &assignments {
                settings.set(*key, value)?;
            }
            settings.check(locale)?;
            write_settings(path, &settings)?;
            println!("{}", Msg::SettingsSaved.text(locale));
            print!("{}", report::format_settings(&settings));
            Ok(())
        }
        SettingsCommand::Reset => {
            write_settings(path, &RankingSettings::default())?;
            println!("{}", Msg::SettingsSaved.text(locale));
            Ok(())
        }
    }
}

/// Read a password without echoing it.
fn prompt_password(prompt: &str) -> Result<String, AppError> {
    eprint!("{prompt}");
    io::stderr()
        .flush()
        .map_err(|e| AppError::new(EXIT_LOCAL, format!("Failed to write prompt: {e}")))?;
    terminal::enable_raw_mode()
        .map_err(|e| AppError::new(EXIT_LOCAL, format!("Failed to read password: {e}")))?;
    let result = read_hidden_line();
    let _ = terminal::disable_raw_mode();
    eprintln!();
    result
}

fn read_hidden_line() -> Result<String, AppError> {
    let mut out = String::new();
    loop {
        let ev = event::read().map_err(|e| AppError::new(EXIT_LOCAL, format!("Failed to read input: {e}")))?;
        let Event::Key(key) = ev else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        match key.code {
            KeyCode::Enter => return Ok(out),
            KeyCode::Esc => return Err(AppError::new(EXIT_LOCAL, "Canceled.")),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Err(AppError::new(EXIT_LOCAL, "Canceled."));
            }
            KeyCode::Backspace => {
                out.pop();
            }
            KeyCode::Char(c) => out.push(c),
            _ => {}
        }
    }
}

/// Rewrite argv so `sr` defaults to `sr tui`.
///
/// - `sr`                     -> `sr tui`
/// - `sr --flag ...`          -> `sr tui --flag ...`
/// - `sr --help/--version/-h` -> unchanged
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    if matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help") {
        return argv;
    }
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
    }
    argv
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::*;
    use crate::api::Method;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    fn test_config(dir: &Path) -> ClientConfig {
        let settings = dir.join("settings.json");
        ClientConfig::from_lookup(|key| match key {
            "SR_SETTINGS_FILE" => Some(settings.display().to_string()),
            _ => None,
        })
        .unwrap()
    }

    #[test]
    fn bare_invocation_opens_tui() {
        assert_eq!(rewrite_args(argv(&["sr"])), argv(&["sr", "tui"]));
        assert_eq!(rewrite_args(argv(&["sr", "-x"])), argv(&["sr", "tui", "-x"]));
        assert_eq!(rewrite_args(argv(&["sr", "--help"])), argv(&["sr", "--help"]));
        assert_eq!(rewrite_args(argv(&["sr", "jobs", "list"])), argv(&["sr", "jobs", "list"]));
    }

    #[test]
    fn failures_become_banners() {
        let dir = tempfile::tempdir().unwrap();
        let client = Arc::new(authed_client("tok"));
        client.transport().push_json(500, "oops");
        let err = dispatch(
            Command::Jobs(JobsCommand::Delete { id: 3 }),
            &client,
            &test_config(dir.path()),
        )
        .unwrap_err();
        assert_eq!(err.message(), "Gagal menghapus lowongan");
        assert_eq!(err.exit_code(), crate::error::EXIT_REMOTE);
    }

    #[test]
    fn update_sends_only_given_fields() {
        let patch = job_patch(JobFields {
            title: Some("QA".to_string()),
            skills: vec![" a ".to_string(), "a".to_string()],
            ..JobFields::default()
        });
        assert_eq!(patch.title.as_deref(), Some("QA"));
        assert_eq!(patch.skills_required, Some(vec!["a".to_string()]));
        assert!(patch.department.is_none());
        assert!(job_patch(JobFields::default()).is_empty());
    }

    #[test]
    fn create_requires_title() {
        let mut form = JobForm::create();
        assert!(fill_draft(&mut form, JobFields::default()).is_err());
        fill_draft(
            &mut form,
            JobFields { title: Some(" Analyst ".to_string()), ..JobFields::default() },
        )
        .unwrap();
        assert_eq!(form.draft().title, "Analyst");
    }

    #[test]
    fn candidate_page_size_is_checked() {
        let args = |size| CandidateListArgs {
            search: None,
            skills: vec![],
            page: 0,
            page_size: size,
            sort_by: None,
            order: None,
        };
        assert!(candidate_filters(args(20)).is_err());
        let filters = candidate_filters(args(25)).unwrap();
        assert_eq!(filters.page, Some(1));
    }

    #[test]
    fn settings_set_validates_total() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let set = |pairs: Vec<(crate::views::settings::SettingKey, &str)>| {
            handle_settings(
                SettingsCommand::Set {
                    assignments: pairs.into_iter().map(|(k, v)| (k, v.to_string())).collect(),
                },
                &path,
                Locale::En,
            )
        };
        use crate::views::settings::SettingKey::*;
        assert!(set(vec![(Skill, "50")]).is_err());
        assert!(!path.exists());
        set(vec![(Skill, "50"), (Certification, "0")]).unwrap();
        assert_eq!(read_settings(&path).unwrap().skill_weight, 50);
    }

    #[test]
    fn compare_loads_then_compares() {
        let dir = tempfile::tempdir().unwrap();
        let client = Arc::new(authed_client("tok"));
        client.transport().push_json(200, "[]");
        client.transport().push_json(200, "[]");
        dispatch(
            Command::Ranking(RankingCommand::Compare { job_id: 3, candidate_ids: vec![1, 2] }),
            &client,
            &test_config(dir.path()),
        )
        .unwrap();
        let reqs = client.transport().requests();
        assert_eq!(reqs.len(), 2);
        assert_eq!(reqs[0].path, "/api/ranking/job/3");
        assert_eq!((reqs[1].method, reqs[1].path.as_str()), (Method::Get, "/api/ranking/compare"));
    }
}
