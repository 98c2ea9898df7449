//! Job list and job form state.

use crate::api::{ApiClient, Transport};
use crate::domain::{Job, JobDraft, JobPatch, JobStatus};
use crate::error::AppError;
use crate::messages::Msg;

/// Jobs shown per page on the recruiter job board.
pub const JOBS_PER_PAGE: usize = 10;

/// Skill chips shown on a job card before collapsing into `+N`.
pub const SKILL_CHIPS: usize = 4;

/// Recruiter-facing label for a job status.
pub fn status_label(status: JobStatus) -> &'static str {
    match status {
        JobStatus::Open => "Terbuka",
        JobStatus::Closed => "Ditutup",
        JobStatus::Draft => "Draft",
    }
}

/// Jobs whose title, department or any required skill contains `query`
/// (case-insensitive). A blank query keeps everything.
pub fn filter_jobs<'a>(jobs: &'a [Job], query: &str) -> Vec<&'a Job> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return jobs.iter().collect();
    }
    jobs.iter()
        .filter(|job| {
            job.title.to_lowercase().contains(&needle)
                || job.department.to_lowercase().contains(&needle)
                || job
                    .skills_required
                    .iter()
                    .any(|s| s.to_lowercase().contains(&needle))
        })
        .collect()
}

/// First `limit` skills plus how many were left out.
pub fn skill_chips(skills: &[String], limit: usize) -> (&[String], usize) {
    let shown = skills.len().min(limit);
    (&skills[..shown], skills.len() - shown)
}

/// Client-side paged job list. The server returns one result set; paging
/// happens locally.
#[derive(Debug, Clone, Default)]
pub struct JobBoard {
    jobs: Vec<Job>,
    page: usize,
    search: String,
}

impl JobBoard {
    pub fn new() -> Self {
        Self {
            page: 1,
            ..Self::default()
        }
    }

    /// Replace the result set; always back to page 1.
    pub fn load(&mut self, jobs: Vec<Job>) {
        self.jobs = jobs;
        self.page = 1;
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    /// Search text as a server filter (`None` when blank).
    pub fn search_filter(&self) -> Option<String> {
        let s = self.search.trim();
        (!s.is_empty()).then(|| s.to_string())
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn page(&self) -> usize {
        self.page.max(1)
    }

    pub fn total_pages(&self) -> usize {
        self.jobs.len().div_ceil(JOBS_PER_PAGE)
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.clamp(1, self.total_pages().max(1));
    }

    pub fn next_page(&mut self) {
        self.set_page(self.page() + 1);
    }

    pub fn prev_page(&mut self) {
        self.set_page(self.page().saturating_sub(1));
    }

    /// Jobs on the current page.
    pub fn visible(&self) -> &[Job] {
        let start = (self.page() - 1) * JOBS_PER_PAGE;
        if start >= self.jobs.len() {
            return &[];
        }
        let end = (start + JOBS_PER_PAGE).min(self.jobs.len());
        &self.jobs[start..end]
    }
}

/// Create/edit dialog state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobForm {
    editing: Option<i64>,
    draft: JobDraft,
}

impl JobForm {
    /// Empty draft for a new job.
    pub fn create() -> Self {
        Self::default()
    }

    /// Pre-filled with an existing job's fields.
    pub fn edit(job: &Job) -> Self {
        Self {
            editing: Some(job.id),
            draft: JobDraft::from(job),
        }
    }

    pub fn editing_id(&self) -> Option<i64> {
        self.editing
    }

    pub fn draft(&self) -> &JobDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut JobDraft {
        &mut self.draft
    }

    /// Add a trimmed skill. Blank input and duplicates are ignored.
    pub fn add_skill(&mut self, input: &str) -> bool {
        let skill = input.trim();
        if skill.is_empty() || self.draft.skills_required.iter().any(|s| s == skill) {
            return false;
        }
        self.draft.skills_required.push(skill.to_string());
        true
    }

    pub fn remove_skill(&mut self, skill: &str) {
        self.draft.skills_required.retain(|s| s != skill);
    }

    /// Create or update, returning the saved job and the banner to show.
    pub fn submit<T: Transport>(&self, client: &ApiClient<T>) -> Result<(Job, Msg), AppError> {
        match self.editing {
            Some(id) => {
                let patch = JobPatch::from(self.draft.clone());
                let job = client.update_job(id, &patch)?;
                Ok((job, Msg::JobUpdated))
            }
            None => {
                let job = client.create_job(&self.draft)?;
                Ok((job, Msg::JobCreated))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::api::testing::*;
    use crate::api::Method;

    fn job(id: i64, title: &str, department: &str, skills: &[&str]) -> Job {
        let ts = NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        Job {
            id,
            title: title.to_string(),
            department: department.to_string(),
            description: String::new(),
            requirements: String::new(),
            skills_required: skills.iter().map(|s| s.to_string()).collect(),
            min_experience_years: 0,
            education_level: String::new(),
            status: JobStatus::Open,
            created_by: None,
            created_at: ts,
            updated_at: ts,
        }
    }

    #[test]
    fn filter_matches_title_department_or_skill() {
        let jobs = vec![
            job(1, "Backend Engineer", "IT", &["Rust", "PostgreSQL"]),
            job(2, "Accountant", "Finance", &["Excel"]),
            job(3, "Data Analyst", "IT", &["SQL"]),
        ];
        let ids = |q: &str| filter_jobs(&jobs, q).iter().map(|j| j.id).collect::<Vec<_>>();

        assert_eq!(ids("ENGINEER"), [1]);
        assert_eq!(ids("finance"), [2]);
        assert_eq!(ids("sql"), [1, 3]);
        assert_eq!(ids("  "), [1, 2, 3]);
        assert!(ids("marketing").is_empty());
    }

    #[test]
    fn board_pages_locally_and_resets_on_load() {
        let mut board = JobBoard::new();
        board.load((1..=23).map(|i| job(i, "Job", "", &[])).collect());
        assert_eq!(board.total_pages(), 3);
        assert_eq!(board.visible().len(), 10);

        board.set_page(3);
        assert_eq!(board.visible().len(), 3);
        assert_eq!(board.visible()[0].id, 21);

        board.set_page(9);
        assert_eq!(board.page(), 3);
        board.set_page(0);
        assert_eq!(board.page(), 1);

        board.next_page();
        board.load(vec![job(99, "Solo", "", &[])]);
        assert_eq!(board.page(), 1);
        assert_eq!(board.total_pages(), 1);
    }

    #[test]
    fn empty_board_has_no_pages() {
        let mut board = JobBoard::new();
        assert_eq!(board.total_pages(), 0);
        board.next_page();
        assert_eq!(board.page(), 1);
        assert!(board.visible().is_empty());
    }

    #[test]
    fn skills_are_trimmed_and_deduplicated() {
        let mut form = JobForm::create();
        assert_eq!(form.draft().status, JobStatus::Draft);
        assert!(form.add_skill("  Python "));
        assert!(!form.add_skill("Python"));
        assert!(!form.add_skill("   "));
        assert!(form.add_skill("SQL"));
        assert_eq!(form.draft().skills_required, ["Python", "SQL"]);

        form.remove_skill("Python");
        assert_eq!(form.draft().skills_required, ["SQL"]);
    }

    #[test]
    fn chips_collapse_extra_skills() {
        let skills: Vec<String> = ["a", "b", "c", "d", "e", "f"].iter().map(|s| s.to_string()).collect();
        let (shown, rest) = skill_chips(&skills, SKILL_CHIPS);
        assert_eq!(shown.len(), 4);
        assert_eq!(rest, 2);
    }

    #[test]
    fn submit_creates_or_updates() {
        let client = authed_client("tok");
        client.transport().push_json(200, JOB_JSON);
        client.transport().push_json(200, JOB_JSON);

        let mut form = JobForm::create();
        form.draft_mut().title = "Data Analyst".to_string();
        let (_, msg) = form.submit(&client).unwrap();
        assert_eq!(msg, Msg::JobCreated);

        let existing = job(3, "Data Analyst", "Finance", &["sql"]);
        let (_, msg) = JobForm::edit(&existing).submit(&client).unwrap();
        assert_eq!(msg, Msg::JobUpdated);

        let reqs = client.transport().requests();
        assert_eq!((reqs[0].method, reqs[0].path.as_str()), (Method::Post, "/api/jobs"));
        assert_eq!((reqs[1].method, reqs[1].path.as_str()), (Method::Put, "/api/jobs/3"));
    }

    #[test]
    fn labels() {
        assert_eq!(status_label(JobStatus::Open), "Terbuka");
        assert_eq!(status_label(JobStatus::Closed), "Ditutup");
        assert_eq!(status_label(JobStatus::Draft), "Draft");
    }
}
