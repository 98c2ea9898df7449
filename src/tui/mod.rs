//! Ratatui-based terminal UI.
//!
//! Six tabs over the same views the CLI uses: dashboard, jobs, candidates,
//! ranking, upload and the public careers wizard. Most network calls block
//! the event loop. The CV upload request and status polling run on
//! background threads and are drained every tick.

use std::io;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::time::Duration;

use chrono::Datelike;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{BarChart, Block, Borders, Cell, Clear, Gauge, List, ListItem, ListState, Paragraph, Row, Table, TableState, Tabs},
    Terminal,
};

use crate::api::{ApiClient, ProgressFn, Transport};
use crate::config::ClientConfig;
use crate::domain::{ExportFormat, Job, JobFilters, TrendPoint, UploadReceipt};
use crate::error::{AppError, EXIT_LOCAL};
use crate::io::save_download;
use crate::messages::{failure_banner, Locale, Msg};
use crate::poll::{spawn_poller, PollEvent, PollHandle};
use crate::views::analytics::{bias_summary, source_label, AnalyticsView};
use crate::views::apply::{ApplyWizard, WizardStep};
use crate::views::candidates::{display_date, export_file_name, CandidateTable, PAGE_SIZES};
use crate::views::jobs::{filter_jobs, status_label, JobBoard};
use crate::views::ranking::{display_name, ScoreBand, RankingView};
use crate::views::session::Session;
use crate::views::upload::{format_size, EntryStatus, UploadQueue};

mod plotters_chart;

use plotters_chart::{day_label, TrendChart};

/// Start the TUI.
pub fn run<T: Transport + 'static>(client: Arc<ApiClient<T>>, config: &ClientConfig) -> Result<(), AppError> {
    let session = Session::load(&client);
    let user = session.require_user()?.clone();
    tracing::info!(user = %user.email, "tui session started");

    let _guard = TerminalGuard::new()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(EXIT_LOCAL, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(client, config, format!("{} ({})", user.full_name, user.role.as_str()));
    app.refresh_tab();
    app.event_loop(&mut terminal)
}

/// Restores the terminal (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(EXIT_LOCAL, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(EXIT_LOCAL, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Dashboard,
    Jobs,
    Candidates,
    Ranking,
    Upload,
    Careers,
}

impl Tab {
    const ALL: [Tab; 6] = [
        Tab::Dashboard,
        Tab::Jobs,
        Tab::Candidates,
        Tab::Ranking,
        Tab::Upload,
        Tab::Careers,
    ];

    fn title(self) -> &'static str {
        match self {
            Tab::Dashboard => "Dashboard",
            Tab::Jobs => "Lowongan",
            Tab::Candidates => "Kandidat",
            Tab::Ranking => "Ranking",
            Tab::Upload => "Upload CV",
            Tab::Careers => "Karier",
        }
    }

    fn index(self) -> usize {
        Tab::ALL.iter().position(|&t| t == self).unwrap_or(0)
    }

    fn step(self, forward: bool) -> Tab {
        let n = Tab::ALL.len();
        let i = self.index();
        Tab::ALL[if forward { (i + 1) % n } else { (i + n - 1) % n }]
    }
}

/// Field with focus on the application form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ApplyField {
    Name,
    Email,
    Phone,
    Cv,
}

impl ApplyField {
    const ALL: [ApplyField; 4] = [ApplyField::Name, ApplyField::Email, ApplyField::Phone, ApplyField::Cv];

    fn label(self) -> &'static str {
        match self {
            ApplyField::Name => "Nama Lengkap",
            ApplyField::Email => "Email",
            ApplyField::Phone => "Telepon",
            ApplyField::Cv => "CV",
        }
    }

    fn step(self, down: bool) -> ApplyField {
        let i = ApplyField::ALL.iter().position(|&f| f == self).unwrap_or(0);
        ApplyField::ALL[move_cursor(i, ApplyField::ALL.len(), down)]
    }
}

/// Messages from the thread carrying the upload request.
enum UploadEvent {
    Progress(u8),
    Done(Result<UploadReceipt, AppError>),
}

/// The job after `current`, wrapping to the first one.
fn next_job_id(jobs: &[Job], current: Option<i64>) -> Option<i64> {
    let next = current
        .and_then(|id| jobs.iter().position(|j| j.id == id))
        .and_then(|i| jobs.get(i + 1));
    next.or(jobs.first()).map(|j| j.id)
}

/// Cursor movement clamped to `0..len`.
fn move_cursor(cursor: usize, len: usize, down: bool) -> usize {
    if len == 0 {
        return 0;
    }
    if down { (cursor + 1).min(len - 1) } else { cursor.saturating_sub(1) }
}

struct App<T: Transport + 'static> {
    client: Arc<ApiClient<T>>,
    locale: Locale,
    poll_interval: Duration,
    user_label: String,
    tab: Tab,
    status: String,
    /// Search text being typed, when in search mode.
    search_input: Option<String>,

    analytics: AnalyticsView,
    board: JobBoard,
    job_cursor: usize,
    candidates: CandidateTable,
    candidate_cursor: usize,
    ranking: RankingView,
    ranking_cursor: usize,

    queue: UploadQueue,
    cv_files: Vec<PathBuf>,
    cv_cursor: usize,
    /// Files in the request currently out, for the accepted banner.
    upload_sent: usize,
    upload_tx: Sender<UploadEvent>,
    upload_rx: Receiver<UploadEvent>,
    pollers: Vec<PollHandle>,
    events_tx: Sender<PollEvent>,
    events_rx: Receiver<PollEvent>,

    wizard: ApplyWizard,
    career_cursor: usize,
    apply_field: ApplyField,
    /// Index into `cv_files` of the CV picked on the application form.
    apply_cv: Option<usize>,
}

impl<T: Transport + 'static> App<T> {
    fn new(client: Arc<ApiClient<T>>, config: &ClientConfig, user_label: String) -> Self {
        let (events_tx, events_rx) = mpsc::channel();
        let (upload_tx, upload_rx) = mpsc::channel();
        Self {
            client,
            locale: config.locale,
            poll_interval: config.poll_interval,
            user_label,
            tab: Tab::Dashboard,
            status: String::new(),
            search_input: None,
            analytics: AnalyticsView::new(),
            board: JobBoard::new(),
            job_cursor: 0,
            candidates: CandidateTable::new(),
            candidate_cursor: 0,
            ranking: RankingView::new(),
            ranking_cursor: 0,
            queue: UploadQueue::new(),
            cv_files: Vec::new(),
            cv_cursor: 0,
            upload_sent: 0,
            upload_tx,
            upload_rx,
            pollers: Vec::new(),
            events_tx,
            events_rx,
            wizard: ApplyWizard::new(),
            career_cursor: 0,
            apply_field: ApplyField::Name,
            apply_cv: None,
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if self.drain_upload_events() | self.drain_poll_events() {
                needs_redraw = true;
            }
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(EXIT_LOCAL, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(EXIT_LOCAL, format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::new(EXIT_LOCAL, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => needs_redraw = true,
                _ => {}
            }
        }
        for handle in self.pollers.drain(..) {
            handle.cancel();
        }
        Ok(())
    }

    /// Fold progress and the outcome of the upload request into the queue.
    fn drain_upload_events(&mut self) -> bool {
        let mut changed = false;
        while let Ok(event) = self.upload_rx.try_recv() {
            match event {
                UploadEvent::Progress(pct) => self.queue.set_upload_progress(pct),
                UploadEvent::Done(outcome) => self.finish_upload(outcome),
            }
            changed = true;
        }
        changed
    }

    /// Fold pending poller events into the upload queue.
    fn drain_poll_events(&mut self) -> bool {
        let mut changed = false;
        while let Ok(event) = self.events_rx.try_recv() {
            self.queue.apply_event(&event);
            changed = true;
        }
        if changed {
            self.pollers.retain(|h| !h.is_finished());
        }
        changed
    }

    fn fail(&mut self, err: &AppError, msg: Msg) {
        tracing::warn!(error = %err, "{}", msg.text(Locale::En));
        self.status = failure_banner(err, msg, self.locale);
    }

    /// Returns `true` when the app should exit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        if self.search_input.is_some() {
            self.handle_search_key(code);
            return false;
        }
        // The application form takes every key until Esc leaves it.
        if self.tab == Tab::Careers && self.wizard.step() == WizardStep::Details {
            self.handle_apply_form_key(code);
            return false;
        }

        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Tab => self.switch_tab(self.tab.step(true)),
            KeyCode::BackTab => self.switch_tab(self.tab.step(false)),
            KeyCode::Char(c @ '1'..='6') => {
                let i = c as usize - '1' as usize;
                self.switch_tab(Tab::ALL[i]);
            }
            KeyCode::Char('r') => self.refresh_tab(),
            _ => match self.tab {
                Tab::Dashboard => self.handle_dashboard_key(code),
                Tab::Jobs => self.handle_jobs_key(code),
                Tab::Candidates => self.handle_candidates_key(code),
                Tab::Ranking => self.handle_ranking_key(code),
                Tab::Upload => self.handle_upload_key(code),
                Tab::Careers => self.handle_careers_key(code),
            },
        }
        false
    }

    fn switch_tab(&mut self, tab: Tab) {
        if tab != self.tab {
            self.tab = tab;
            self.status.clear();
            self.refresh_tab();
        }
    }

    fn refresh_tab(&mut self) {
        match self.tab {
            Tab::Dashboard => {
                if let Err(err) = self.analytics.load(&self.client) {
                    self.fail(&err, Msg::LoadAnalyticsFailed);
                }
            }
            Tab::Jobs => self.reload_jobs(),
            Tab::Candidates => self.reload_candidates(),
            Tab::Ranking => {
                self.ranking.load_jobs(&self.client);
                if self.ranking.job_id().is_none() {
                    self.cycle_ranking_job(true);
                }
            }
            Tab::Upload => {
                self.cv_files = crate::cli::picker::discover_cv_files();
                self.cv_cursor = self.cv_cursor.min(self.cv_files.len().saturating_sub(1));
                if self.board.jobs().is_empty() {
                    self.reload_jobs();
                }
            }
            Tab::Careers => {
                self.wizard.load_jobs(&self.client);
                self.career_cursor = self.career_cursor.min(self.wizard.jobs().len().saturating_sub(1));
                self.cv_files = crate::cli::picker::discover_cv_files();
                self.apply_cv = None;
            }
        }
    }

    fn handle_search_key(&mut self, code: KeyCode) {
        let Some(input) = self.search_input.as_mut() else {
            return;
        };
        match code {
            KeyCode::Esc => self.search_input = None,
            KeyCode::Backspace => {
                input.pop();
            }
            KeyCode::Char(c) => input.push(c),
            KeyCode::Enter => {
                let text = self.search_input.take().unwrap_or_default();
                match self.tab {
                    Tab::Jobs => {
                        self.board.set_search(text);
                        self.reload_jobs();
                    }
                    Tab::Candidates => {
                        self.candidates.set_search(text);
                        self.reload_candidates();
                    }
                    _ => {}
                }
            }
            _ => {}
        }
    }

    fn handle_dashboard_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('p') => {
                self.analytics.cycle_days();
                self.refresh_tab();
            }
            KeyCode::Char('b') => self.cycle_bias_job(),
            _ => {}
        }
    }

    /// Audit the next job for bias. A failed report only empties the panel.
    fn cycle_bias_job(&mut self) {
        if self.board.jobs().is_empty() {
            self.reload_jobs();
        }
        if let Some(job_id) = next_job_id(self.board.jobs(), self.analytics.bias_job()) {
            self.analytics.load_bias(&self.client, job_id);
        }
    }

    fn reload_jobs(&mut self) {
        let filters = JobFilters {
            page_size: Some(100),
            search: self.board.search_filter(),
            ..JobFilters::default()
        };
        match self.client.list_jobs(&filters) {
            Ok(page) => {
                self.board.load(page.items);
                self.job_cursor = 0;
            }
            Err(err) => self.fail(&err, Msg::LoadJobsFailed),
        }
    }

    fn handle_jobs_key(&mut self, code: KeyCode) {
        let visible = self.board.visible().len();
        match code {
            KeyCode::Char('/') => self.search_input = Some(self.board.search().to_string()),
            KeyCode::Up => self.job_cursor = move_cursor(self.job_cursor, visible, false),
            KeyCode::Down => self.job_cursor = move_cursor(self.job_cursor, visible, true),
            KeyCode::Left => {
                self.board.prev_page();
                self.job_cursor = 0;
            }
            KeyCode::Right => {
                self.board.next_page();
                self.job_cursor = 0;
            }
            KeyCode::Char('R') => {
                let Some(job_id) = self.board.visible().get(self.job_cursor).map(|j| j.id) else {
                    return;
                };
                match self.client.run_ranking(job_id) {
                    Ok(_) => self.status = Msg::RankingStarted.text(self.locale),
                    Err(err) => self.fail(&err, Msg::RunRankingFailed),
                }
            }
            KeyCode::Enter => {
                let Some(job_id) = self.board.visible().get(self.job_cursor).map(|j| j.id) else {
                    return;
                };
                self.tab = Tab::Ranking;
                self.ranking.load_jobs(&self.client);
                self.select_ranking_job(job_id);
            }
            _ => {}
        }
    }

    fn reload_candidates(&mut self) {
        match self.candidates.refresh(&self.client) {
            Ok(()) => {
                self.candidate_cursor = self
                    .candidate_cursor
                    .min(self.candidates.items().len().saturating_sub(1));
            }
            Err(err) => self.fail(&err, Msg::LoadCandidatesFailed),
        }
    }

    fn handle_candidates_key(&mut self, code: KeyCode) {
        let rows = self.candidates.items().len();
        match code {
            KeyCode::Char('/') => self.search_input = Some(self.candidates.search().to_string()),
            KeyCode::Up => self.candidate_cursor = move_cursor(self.candidate_cursor, rows, false),
            KeyCode::Down => self.candidate_cursor = move_cursor(self.candidate_cursor, rows, true),
            KeyCode::Left => {
                self.candidates.prev_page();
                self.reload_candidates();
            }
            KeyCode::Right => {
                self.candidates.next_page();
                self.reload_candidates();
            }
            KeyCode::Char('s') => {
                let i = PAGE_SIZES
                    .iter()
                    .position(|&s| s == self.candidates.page_size())
                    .map_or(0, |i| (i + 1) % PAGE_SIZES.len());
                if self.candidates.set_page_size(PAGE_SIZES[i]).is_ok() {
                    self.candidate_cursor = 0;
                    self.reload_candidates();
                }
            }
            KeyCode::Char('e') => {
                let Some(id) = self.candidates.items().get(self.candidate_cursor).map(|c| c.id) else {
                    return;
                };
                let saved = self
                    .client
                    .export_candidate(id)
                    .and_then(|blob| save_download(None, &blob, &export_file_name(id)));
                match saved {
                    Ok(path) => self.status = format!("Saved {}", path.display()),
                    Err(err) => self.fail(&err, Msg::ExportFailed),
                }
            }
            _ => {}
        }
    }

    fn select_ranking_job(&mut self, job_id: i64) {
        self.ranking_cursor = 0;
        if let Err(err) = self.ranking.select_job(&self.client, job_id) {
            self.fail(&err, Msg::LoadRankingFailed);
        }
    }

    fn cycle_ranking_job(&mut self, forward: bool) {
        self.ranking_cursor = 0;
        if let Err(err) = self.ranking.cycle_job(&self.client, forward) {
            self.fail(&err, Msg::LoadRankingFailed);
        }
    }

    fn handle_ranking_key(&mut self, code: KeyCode) {
        let rows = self.ranking.rankings().len();
        match code {
            KeyCode::Left => self.cycle_ranking_job(false),
            KeyCode::Right => self.cycle_ranking_job(true),
            KeyCode::Up => self.ranking_cursor = move_cursor(self.ranking_cursor, rows, false),
            KeyCode::Down => self.ranking_cursor = move_cursor(self.ranking_cursor, rows, true),
            KeyCode::Char(' ') => {
                if let Some(id) = self.ranking.rankings().get(self.ranking_cursor).map(|r| r.candidate_id) {
                    self.ranking.toggle_compare(id);
                }
            }
            KeyCode::Char('c') => {
                if !self.ranking.can_compare() {
                    self.status = "Pilih 2-3 kandidat untuk dibandingkan".to_string();
                    return;
                }
                let compared = self.ranking.compare(&self.client).map(|_| ());
                if let Err(err) = compared {
                    self.fail(&err, Msg::CompareFailed);
                }
            }
            KeyCode::Char('e') => self.export_ranking(ExportFormat::Csv),
            KeyCode::Char('E') => self.export_ranking(ExportFormat::Pdf),
            _ => {}
        }
    }

    fn export_ranking(&mut self, format: ExportFormat) {
        let saved = self
            .ranking
            .export(&self.client, format)
            .and_then(|(blob, name)| save_download(None, &blob, &name));
        match saved {
            Ok(path) => self.status = format!("Saved {}", path.display()),
            Err(err) => self.fail(&err, Msg::ExportRankingFailed),
        }
    }

    fn handle_upload_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Up => self.cv_cursor = move_cursor(self.cv_cursor, self.cv_files.len(), false),
            KeyCode::Down => self.cv_cursor = move_cursor(self.cv_cursor, self.cv_files.len(), true),
            KeyCode::Enter | KeyCode::Char('a') => {
                let Some(path) = self.cv_files.get(self.cv_cursor).cloned() else {
                    return;
                };
                let rejected = self.queue.add_paths(&[path]);
                if !rejected.is_empty() {
                    self.status = Msg::FilesRejected.text(self.locale);
                }
            }
            KeyCode::Char('A') => {
                let rejected = self.queue.add_paths(&self.cv_files.clone());
                if !rejected.is_empty() {
                    self.status = Msg::FilesRejected.text(self.locale);
                }
            }
            KeyCode::Char('d') => {
                let last_pending = self
                    .queue
                    .entries()
                    .iter()
                    .rposition(|e| e.status == EntryStatus::Pending);
                if let Some(i) = last_pending {
                    self.queue.remove(i);
                }
            }
            KeyCode::Char('j') => self.cycle_upload_job(),
            KeyCode::Char('x') => {
                if !self.queue.clear_finished() {
                    self.status = "Tunggu upload selesai".to_string();
                }
            }
            KeyCode::Char('u') => self.start_upload(),
            _ => {}
        }
    }

    /// No job, then each loaded job in turn.
    fn cycle_upload_job(&mut self) {
        let jobs = self.board.jobs();
        let next = match self.queue.job_id() {
            None => jobs.first().map(|j| j.id),
            Some(id) => jobs
                .iter()
                .position(|j| j.id == id)
                .and_then(|i| jobs.get(i + 1))
                .map(|j| j.id),
        };
        self.queue.set_job(next);
    }

    /// Send the pending files on a worker thread. Progress and the outcome
    /// come back through `upload_rx`.
    fn start_upload(&mut self) {
        let files = match self.queue.prepare_upload() {
            Ok(files) => files,
            Err(err) => {
                self.status = err.message().to_string();
                return;
            }
        };
        self.upload_sent = files.len();
        tracing::info!(files = files.len(), job = ?self.queue.job_id(), "upload started");

        let client = Arc::clone(&self.client);
        let job_id = self.queue.job_id();
        let done_tx = self.upload_tx.clone();
        let progress_tx = self.upload_tx.clone();
        let progress: ProgressFn = Arc::new(move |pct: u8| {
            let _ = progress_tx.send(UploadEvent::Progress(pct));
        });
        std::thread::spawn(move || {
            let outcome = client.upload_resumes(files, job_id, Some(progress));
            let _ = done_tx.send(UploadEvent::Done(outcome));
        });
    }

    fn finish_upload(&mut self, outcome: Result<UploadReceipt, AppError>) {
        match self.queue.finish_upload(outcome) {
            Ok(tasks) => {
                self.status = Msg::UploadAccepted(self.upload_sent).text(self.locale);
                for (_, task_id) in tasks {
                    self.pollers.push(spawn_poller(
                        Arc::clone(&self.client),
                        task_id,
                        self.poll_interval,
                        self.events_tx.clone(),
                    ));
                }
            }
            Err(err) => self.fail(&err, Msg::UploadFailed),
        }
    }

    fn handle_careers_key(&mut self, code: KeyCode) {
        match self.wizard.step() {
            WizardStep::SelectJob => {
                let rows = self.wizard.jobs().len();
                match code {
                    KeyCode::Up => self.career_cursor = move_cursor(self.career_cursor, rows, false),
                    KeyCode::Down => self.career_cursor = move_cursor(self.career_cursor, rows, true),
                    KeyCode::Enter => {
                        if let Some(job) = self.wizard.jobs().get(self.career_cursor).cloned() {
                            self.wizard.select_job(job);
                            self.apply_field = ApplyField::Name;
                            self.status.clear();
                        }
                    }
                    _ => {}
                }
            }
            WizardStep::Done => {
                if matches!(code, KeyCode::Enter | KeyCode::Char('n')) {
                    self.wizard.reset();
                    self.career_cursor = 0;
                    self.apply_cv = None;
                    self.status.clear();
                }
            }
            WizardStep::Details => self.handle_apply_form_key(code),
        }
    }

    fn handle_apply_form_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => self.wizard.back(),
            KeyCode::Up => self.apply_field = self.apply_field.step(false),
            KeyCode::Down | KeyCode::Tab => self.apply_field = self.apply_field.step(true),
            KeyCode::Left if self.apply_field == ApplyField::Cv => self.cycle_apply_cv(false),
            KeyCode::Right if self.apply_field == ApplyField::Cv => self.cycle_apply_cv(true),
            KeyCode::Backspace => {
                if let Some(text) = self.apply_text_mut() {
                    text.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Some(text) = self.apply_text_mut() {
                    text.push(c);
                }
            }
            KeyCode::Enter => self.submit_application(),
            _ => {}
        }
    }

    fn apply_text_mut(&mut self) -> Option<&mut String> {
        let field = self.apply_field;
        let form = self.wizard.form_mut();
        match field {
            ApplyField::Name => Some(&mut form.full_name),
            ApplyField::Email => Some(&mut form.email),
            ApplyField::Phone => Some(&mut form.phone),
            ApplyField::Cv => None,
        }
    }

    fn cycle_apply_cv(&mut self, forward: bool) {
        let n = self.cv_files.len();
        if n == 0 {
            self.status = "Tidak ada file CV di folder ini".to_string();
            return;
        }
        let i = match self.apply_cv {
            None => 0,
            Some(i) if forward => (i + 1) % n,
            Some(i) => (i + n - 1) % n,
        };
        self.apply_cv = Some(i);
        match self.wizard.form_mut().set_file_from_disk(self.cv_files[i].clone()) {
            Ok(()) => self.status.clear(),
            Err(reason) => self.status = reason.as_str().to_string(),
        }
    }

    fn submit_application(&mut self) {
        if !self.wizard.can_submit() {
            self.status = "Lengkapi nama, email dan CV".to_string();
            return;
        }
        let submitted = self
            .wizard
            .submit(&self.client, self.locale, None)
            .map(|receipt| receipt.message.clone());
        match submitted {
            Ok(message) => self.status = message,
            Err(err) => {
                tracing::warn!(error = %err, "application failed");
                self.status = self
                    .wizard
                    .form()
                    .error()
                    .map_or_else(|| failure_banner(&err, Msg::ApplyFailed, self.locale), str::to_string);
            }
        }
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(3)])
            .split(frame.area());

        self.draw_tabs(frame, chunks[0]);
        match self.tab {
            Tab::Dashboard => self.draw_dashboard(frame, chunks[1]),
            Tab::Jobs => self.draw_jobs(frame, chunks[1]),
            Tab::Candidates => self.draw_candidates(frame, chunks[1]),
            Tab::Ranking => self.draw_ranking(frame, chunks[1]),
            Tab::Upload => self.draw_upload(frame, chunks[1]),
            Tab::Careers => self.draw_careers(frame, chunks[1]),
        }
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_tabs(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let titles: Vec<Line> = Tab::ALL
            .iter()
            .enumerate()
            .map(|(i, t)| Line::from(format!("{} {}", i + 1, t.title())))
            .collect();
        let tabs = Tabs::new(titles)
            .select(self.tab.index())
            .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled("SmartRecruit", Style::default().fg(Color::Cyan)))
                    .title(Line::from(self.user_label.as_str()).alignment(Alignment::Right)),
            );
        frame.render_widget(tabs, area);
    }

    fn draw_dashboard(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);

        let cards = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 4); 4])
            .split(rows[0]);
        let o = self.analytics.overview();
        let stat = |title: &'static str, value: String| {
            Paragraph::new(value)
                .alignment(Alignment::Center)
                .style(Style::default().add_modifier(Modifier::BOLD))
                .block(Block::default().title(title).borders(Borders::ALL))
        };
        let or_dash = |v: Option<String>| v.unwrap_or_else(|| "-".to_string());
        frame.render_widget(stat("Total Kandidat", or_dash(o.map(|o| o.total_candidates.to_string()))), cards[0]);
        frame.render_widget(stat("Posisi Terbuka", or_dash(o.map(|o| o.open_positions.to_string()))), cards[1]);
        frame.render_widget(stat("Rata-rata Skor", or_dash(o.map(|o| format!("{:.1}", o.avg_score)))), cards[2]);
        frame.render_widget(stat("Upload Terbaru", or_dash(o.map(|o| o.recent_uploads.to_string()))), cards[3]);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(rows[1]);
        self.draw_trend(frame, body[0]);

        let side = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(40),
                Constraint::Percentage(30),
                Constraint::Percentage(30),
            ])
            .split(body[1]);

        let buckets: Vec<(&str, u64)> = self
            .analytics
            .scores()
            .iter()
            .map(|b| (b.range.as_str(), b.count))
            .collect();
        let bars = BarChart::default()
            .block(Block::default().title("Distribusi Skor").borders(Borders::ALL))
            .data(buckets.as_slice())
            .bar_width(6)
            .bar_gap(1)
            .bar_style(Style::default().fg(Color::Cyan));
        frame.render_widget(bars, side[0]);

        let sources: Vec<ListItem> = self
            .analytics
            .sources()
            .iter()
            .map(|s| ListItem::new(source_label(s)))
            .collect();
        frame.render_widget(
            List::new(sources).block(Block::default().title("Sumber Kandidat").borders(Borders::ALL)),
            side[1],
        );
        self.draw_bias(frame, side[2]);
    }

    fn draw_bias(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines = Vec::new();
        match (self.analytics.bias_job(), self.analytics.bias()) {
            (None, _) => lines.push(Line::from("Tekan b untuk audit bias per lowongan.")),
            (Some(job_id), report) => {
                let title = self
                    .board
                    .jobs()
                    .iter()
                    .find(|j| j.id == job_id)
                    .map_or_else(|| format!("Lowongan #{job_id}"), |j| j.title.clone());
                lines.push(Line::from(Span::styled(title, Style::default().add_modifier(Modifier::BOLD))));
                match report {
                    None => lines.push(Line::from(Span::styled("Belum ada data", Style::default().fg(Color::Yellow)))),
                    Some(report) => {
                        let color = if report.four_fifths_compliant { Color::Green } else { Color::Red };
                        lines.push(Line::from(Span::styled(bias_summary(report), Style::default().fg(color))));
                        lines.push(Line::from(format!("Kandidat: {}", report.total_candidates)));
                        for (group, score) in &report.score_by_demographic {
                            lines.push(Line::from(format!("  {group}: {score:.1}")));
                        }
                        if !report.details.is_empty() {
                            lines.push(Line::from(report.details.clone()));
                        }
                    }
                }
            }
        }
        frame.render_widget(
            Paragraph::new(Text::from(lines)).block(Block::default().title("Audit Bias (b lowongan)").borders(Borders::ALL)),
            area,
        );
    }

    fn draw_trend(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default()
            .title(format!("Tren Pelamar ({} hari, p ganti)", self.analytics.days()))
            .borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let Some((points, x_bounds, y_bounds)) = trend_series(self.analytics.trend()) else {
            frame.render_widget(
                Paragraph::new("Belum ada data").style(Style::default().fg(Color::Yellow)),
                inner,
            );
            return;
        };

        let (chart_rect, insets) = chart_layout(inner);
        frame.render_widget(TrendChart { points: &points, x_bounds, y_bounds }, chart_rect);
        if let Some(insets) = insets {
            draw_axis_ticks(frame, inner, chart_rect, insets, x_bounds, y_bounds);
        }
    }

    fn draw_jobs(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let query = self.search_input.as_deref().unwrap_or(self.board.search());
        let visible = self.board.visible();
        // Live narrowing while typing; the server search runs on Enter.
        let shown = filter_jobs(visible, if self.search_input.is_some() { query } else { "" });
        let rows: Vec<Row> = shown
            .iter()
            .map(|j| {
                Row::new(vec![
                    Cell::from(j.id.to_string()),
                    Cell::from(j.title.clone()),
                    Cell::from(j.department.clone()),
                    Cell::from(status_label(j.status)),
                    Cell::from(j.skills_required.join(", ")),
                ])
            })
            .collect();
        let title = format!(
            "Lowongan (hal. {}/{}) cari: {}",
            self.board.page(),
            self.board.total_pages().max(1),
            if query.is_empty() { "-" } else { query }
        );
        let table = Table::new(
            rows,
            [
                Constraint::Length(5),
                Constraint::Percentage(30),
                Constraint::Percentage(20),
                Constraint::Length(9),
                Constraint::Min(10),
            ],
        )
        .header(header_row(&["id", "Judul", "Departemen", "Status", "Skills"]))
        .block(Block::default().title(title).borders(Borders::ALL))
        .row_highlight_style(Style::default().fg(Color::Black).bg(Color::White));
        let mut state = TableState::default().with_selected(Some(self.job_cursor));
        frame.render_stateful_widget(table, area, &mut state);
    }

    fn draw_candidates(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let rows: Vec<Row> = self
            .candidates
            .items()
            .iter()
            .map(|c| {
                Row::new(vec![
                    Cell::from(c.id.to_string()),
                    Cell::from(c.full_name.clone()),
                    Cell::from(c.email.clone()),
                    Cell::from(display_date(&c.created_at)),
                    Cell::from(c.skills.join(", ")),
                ])
            })
            .collect();
        let search = self.search_input.as_deref().unwrap_or(self.candidates.search());
        let title = format!(
            "Kandidat (hal. {}/{}, {} per hal., total {}) cari: {}",
            self.candidates.page() + 1,
            self.candidates.page_count().max(1),
            self.candidates.page_size(),
            self.candidates.total(),
            if search.is_empty() { "-" } else { search }
        );
        let table = Table::new(
            rows,
            [
                Constraint::Length(5),
                Constraint::Percentage(25),
                Constraint::Percentage(25),
                Constraint::Length(10),
                Constraint::Min(10),
            ],
        )
        .header(header_row(&["id", "Nama", "Email", "Tanggal", "Skills"]))
        .block(Block::default().title(title).borders(Borders::ALL))
        .row_highlight_style(Style::default().fg(Color::Black).bg(Color::White));
        let mut state = TableState::default().with_selected(Some(self.candidate_cursor));
        frame.render_stateful_widget(table, area, &mut state);
    }

    fn draw_ranking(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(9)])
            .split(area);

        let job = self
            .ranking
            .selected_job()
            .map(|j| j.title.clone())
            .unwrap_or_else(|| "-".to_string());
        let rows: Vec<Row> = self
            .ranking
            .rankings()
            .iter()
            .map(|r| {
                let mark = if self.ranking.selection().contains(r.candidate_id) { "[x]" } else { "[ ]" };
                let color = match ScoreBand::of(r.overall_score) {
                    ScoreBand::Good => Color::Green,
                    ScoreBand::Fair => Color::Yellow,
                    ScoreBand::Poor => Color::Red,
                };
                Row::new(vec![
                    Cell::from(mark),
                    Cell::from(r.rank_position.to_string()),
                    Cell::from(display_name(r)),
                    Cell::from(format!("{:.1}", r.overall_score)).style(Style::default().fg(color)),
                    Cell::from(format!("{:.0}", r.skill_score)),
                    Cell::from(format!("{:.0}", r.experience_score)),
                    Cell::from(format!("{:.0}", r.education_score)),
                    Cell::from(format!("{:.0}", r.certification_score)),
                ])
            })
            .collect();
        let table = Table::new(
            rows,
            [
                Constraint::Length(3),
                Constraint::Length(4),
                Constraint::Min(16),
                Constraint::Length(7),
                Constraint::Length(6),
                Constraint::Length(6),
                Constraint::Length(6),
                Constraint::Length(6),
            ],
        )
        .header(header_row(&["", "#", "Kandidat", "Skor", "Skill", "Exp", "Edu", "Cert"]))
        .block(
            Block::default()
                .title(format!("Ranking: {job} ({} dipilih)", self.ranking.selection().len()))
                .borders(Borders::ALL),
        )
        .row_highlight_style(Style::default().fg(Color::Black).bg(Color::White));
        let mut state = TableState::default().with_selected(Some(self.ranking_cursor));
        frame.render_stateful_widget(table, chunks[0], &mut state);

        let compared = self.ranking.comparison();
        let mut lines = Vec::new();
        if compared.is_empty() {
            lines.push(Line::from("Spasi memilih kandidat, c membandingkan (2-3 kandidat)."));
        } else {
            let mut header = format!("{:<20}", "");
            for r in compared {
                header.push_str(&format!("{:>18}", truncate(&display_name(r), 17)));
            }
            lines.push(Line::from(Span::styled(header, Style::default().add_modifier(Modifier::BOLD))));
            for row in crate::views::ranking::radar_rows(compared) {
                let mut line = format!("{:<20}", row.metric);
                for v in &row.values {
                    line.push_str(&format!("{v:>18.1}"));
                }
                lines.push(Line::from(line));
            }
        }
        frame.render_widget(
            Paragraph::new(Text::from(lines)).block(Block::default().title("Perbandingan").borders(Borders::ALL)),
            chunks[1],
        );
    }

    fn draw_upload(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(area);

        let files: Vec<ListItem> = self
            .cv_files
            .iter()
            .map(|p| ListItem::new(crate::cli::picker::pretty_path(p)))
            .collect();
        let list = List::new(files)
            .block(Block::default().title("File CV (Enter tambah, A semua)").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");
        let mut state = ListState::default();
        state.select((!self.cv_files.is_empty()).then_some(self.cv_cursor));
        frame.render_stateful_widget(list, cols[0], &mut state);

        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(cols[1]);

        let job = self
            .queue
            .job_id()
            .and_then(|id| self.board.jobs().iter().find(|j| j.id == id))
            .map(|j| j.title.clone())
            .unwrap_or_else(|| "tanpa lowongan".to_string());
        let label = if self.queue.is_uploading() {
            format!("mengupload {}%", self.queue.upload_progress())
        } else {
            "siap".to_string()
        };
        let gauge = Gauge::default()
            .block(Block::default().title(format!("Lowongan: {job} (j ganti)")).borders(Borders::ALL))
            .gauge_style(Style::default().fg(Color::Cyan))
            .percent(u16::from(self.queue.upload_progress()))
            .label(label);
        frame.render_widget(gauge, right[0]);

        let rows: Vec<Row> = self
            .queue
            .entries()
            .iter()
            .map(|e| {
                let color = match e.status {
                    EntryStatus::Completed => Color::Green,
                    EntryStatus::Failed => Color::Red,
                    EntryStatus::Pending => Color::Gray,
                    EntryStatus::Uploading | EntryStatus::Processing => Color::Yellow,
                };
                Row::new(vec![
                    Cell::from(e.file_name.clone()),
                    Cell::from(format_size(e.size)),
                    Cell::from(e.status.as_str()).style(Style::default().fg(color)),
                    Cell::from(format!("{:.0}%", e.progress)),
                    Cell::from(e.error.clone().unwrap_or_default()),
                ])
            })
            .collect();
        let title = format!(
            "Antrian ({} selesai dari {})",
            self.queue.completed_count(),
            self.queue.entries().len()
        );
        let table = Table::new(
            rows,
            [
                Constraint::Percentage(35),
                Constraint::Length(9),
                Constraint::Length(11),
                Constraint::Length(5),
                Constraint::Min(10),
            ],
        )
        .header(header_row(&["File", "Ukuran", "Status", "%", "Pesan"]))
        .block(Block::default().title(title).borders(Borders::ALL));
        frame.render_widget(table, right[1]);
    }

    fn draw_careers(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);

        let steps: Vec<Line> = WizardStep::ALL
            .iter()
            .enumerate()
            .map(|(i, s)| Line::from(format!("{}. {}", i + 1, s.label())))
            .collect();
        let current = WizardStep::ALL.iter().position(|&s| s == self.wizard.step()).unwrap_or(0);
        let stepper = Tabs::new(steps)
            .select(current)
            .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .block(Block::default().title("Lamar Pekerjaan").borders(Borders::ALL));
        frame.render_widget(stepper, rows[0]);

        match self.wizard.step() {
            WizardStep::SelectJob => {
                let jobs: Vec<ListItem> = self
                    .wizard
                    .jobs()
                    .iter()
                    .map(|j| ListItem::new(format!("{} ({})", j.title, j.department)))
                    .collect();
                let empty = jobs.is_empty();
                let list = List::new(jobs)
                    .block(Block::default().title("Posisi Terbuka").borders(Borders::ALL))
                    .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
                    .highlight_symbol("» ");
                let mut state = ListState::default();
                state.select((!empty).then_some(self.career_cursor));
                frame.render_stateful_widget(list, rows[1], &mut state);
            }
            WizardStep::Details => self.draw_apply_form(frame, rows[1]),
            WizardStep::Done => {
                let mut lines = Vec::new();
                if let Some(receipt) = self.wizard.receipt() {
                    lines.push(Line::from(Span::styled(receipt.message.clone(), Style::default().fg(Color::Green))));
                    lines.push(Line::from(format!("Posisi: {}", receipt.job_title)));
                }
                lines.push(Line::from("Enter untuk melamar posisi lain."));
                frame.render_widget(
                    Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL)),
                    rows[1],
                );
            }
        }
    }

    fn draw_apply_form(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let form = self.wizard.form();
        let job = self.wizard.selected_job().map_or("-", |j| j.title.as_str());
        let mut lines = vec![Line::from(format!("Posisi: {job}")), Line::from("")];
        for field in ApplyField::ALL {
            let value = match field {
                ApplyField::Name => form.full_name.clone(),
                ApplyField::Email => form.email.clone(),
                ApplyField::Phone => form.phone.clone(),
                ApplyField::Cv => form
                    .file()
                    .map_or_else(|| "- (←/→ pilih file)".to_string(), crate::cli::picker::pretty_path),
            };
            let focused = field == self.apply_field;
            let style = if focused {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let marker = if focused { "» " } else { "  " };
            lines.push(Line::from(Span::styled(format!("{marker}{:<14}{value}", field.label()), style)));
        }
        lines.push(Line::from(""));
        let submit = if self.wizard.can_submit() { Color::Green } else { Color::DarkGray };
        lines.push(Line::from(Span::styled("[Enter] Kirim Lamaran", Style::default().fg(submit))));
        if let Some(error) = form.error() {
            lines.push(Line::from(Span::styled(error, Style::default().fg(Color::Red))));
        }
        frame.render_widget(
            Paragraph::new(Text::from(lines)).block(Block::default().title("Data Diri & CV").borders(Borders::ALL)),
            area,
        );
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = if self.search_input.is_some() {
            "type to search  Enter apply  Esc cancel"
        } else {
            match self.tab {
                Tab::Dashboard => "Tab/1-6 tabs  p period  b bias audit  r refresh  q quit",
                Tab::Jobs => "/ search  ←/→ page  ↑/↓ select  R run ranking  Enter ranking  q quit",
                Tab::Candidates => "/ search  ←/→ page  s page size  e export  q quit",
                Tab::Ranking => "←/→ job  space pick  c compare  e csv  E pdf  q quit",
                Tab::Upload => "Enter add  A all  d drop  j job  u upload  x clear done  q quit",
                Tab::Careers => match self.wizard.step() {
                    WizardStep::SelectJob => "↑/↓ select  Enter apply  r refresh  q quit",
                    WizardStep::Details => "↑/↓ field  type to edit  ←/→ CV file  Enter submit  Esc back",
                    WizardStep::Done => "Enter/n apply again  q quit",
                },
            }
        };
        let mut spans = vec![Span::styled(help, Style::default().fg(Color::Gray))];
        if let Some(input) = &self.search_input {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(format!("/{input}"), Style::default().fg(Color::Cyan)));
        } else if !self.status.is_empty() {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(&self.status, Style::default().fg(Color::Yellow)));
        }
        let p = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

fn header_row<'a>(titles: &[&'a str]) -> Row<'a> {
    Row::new(titles.to_vec()).style(Style::default().add_modifier(Modifier::BOLD))
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('.');
    out
}

type Series = (Vec<(f64, f64)>, [f64; 2], [f64; 2]);

/// Chart points and bounds for the applicant trend; `None` when empty.
fn trend_series(trend: &[TrendPoint]) -> Option<Series> {
    if trend.is_empty() {
        return None;
    }
    let points: Vec<(f64, f64)> = trend
        .iter()
        .map(|p| (f64::from(p.date.num_days_from_ce()), p.count as f64))
        .collect();

    let (mut x0, mut x1) = (f64::INFINITY, f64::NEG_INFINITY);
    let mut y1 = 0.0_f64;
    for &(x, y) in &points {
        x0 = x0.min(x);
        x1 = x1.max(x);
        y1 = y1.max(y);
    }
    if x1 <= x0 {
        x0 -= 1.0;
        x1 += 1.0;
    }
    let y1 = if y1 <= 0.0 { 1.0 } else { y1 * 1.05 };
    Some((points, [x0, x1], [0.0, y1]))
}

#[derive(Debug, Clone, Copy)]
struct AxisInsets {
    left: u16,
    right: u16,
    top: u16,
    bottom: u16,
}

fn chart_layout(inner: Rect) -> (Rect, Option<AxisInsets>) {
    let insets = AxisInsets {
        left: 6,
        right: 2,
        top: 1,
        bottom: 1,
    };
    if inner.width <= insets.left + insets.right + 10 || inner.height <= insets.top + insets.bottom + 5 {
        return (inner, None);
    }
    let rect = Rect {
        x: inner.x + insets.left,
        y: inner.y + insets.top,
        width: inner.width - insets.left - insets.right,
        height: inner.height - insets.top - insets.bottom,
    };
    (rect, Some(insets))
}

fn draw_axis_ticks(
    frame: &mut ratatui::Frame<'_>,
    inner: Rect,
    chart: Rect,
    insets: AxisInsets,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
) {
    let ticks = 5usize;
    let style = Style::default().fg(Color::Gray);

    for i in 0..ticks {
        let u = i as f64 / (ticks as f64 - 1.0);
        let label = day_label(x_bounds[0] + u * (x_bounds[1] - x_bounds[0]));
        let x = chart.x + ((chart.width - 1) as f64 * u).round() as u16;
        let start = x.saturating_sub((label.len() / 2) as u16);
        let y = chart.y + chart.height;
        if y >= inner.y + inner.height {
            continue;
        }
        let width = label.len() as u16;
        frame.render_widget(Paragraph::new(label).style(style), Rect { x: start, y, width, height: 1 });
    }

    for i in 0..ticks {
        let u = i as f64 / (ticks as f64 - 1.0);
        let label = format!("{:.0}", y_bounds[0] + u * (y_bounds[1] - y_bounds[0]));
        let y = chart.y + (chart.height - 1) - ((chart.height - 1) as f64 * u).round() as u16;
        let x = inner.x + insets.left.saturating_sub(1);
        let start = x.saturating_sub(label.len() as u16);
        if start < inner.x {
            continue;
        }
        let width = label.len() as u16;
        frame.render_widget(Paragraph::new(label).style(style), Rect { x: start, y, width, height: 1 });
    }
}
