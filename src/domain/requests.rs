//! Request bodies, list filters and small response envelopes.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::domain::{Education, Experience, Job, JobStatus, ProcessingStatus};

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
}

/// Body for creating a job. `Default` is the empty draft the job form starts from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobDraft {
    pub title: String,
    pub department: String,
    pub description: String,
    pub requirements: String,
    pub skills_required: Vec<String>,
    pub min_experience_years: u32,
    pub education_level: String,
    pub status: JobStatus,
}

impl From<&Job> for JobDraft {
    fn from(job: &Job) -> Self {
        Self {
            title: job.title.clone(),
            department: job.department.clone(),
            description: job.description.clone(),
            requirements: job.requirements.clone(),
            skills_required: job.skills_required.clone(),
            min_experience_years: job.min_experience_years,
            education_level: job.education_level.clone(),
            status: job.status,
        }
    }
}

/// Partial job update; absent fields are left untouched by the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct JobPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requirements: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills_required: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_experience_years: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub education_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<JobStatus>,
}

impl From<JobDraft> for JobPatch {
    fn from(draft: JobDraft) -> Self {
        Self {
            title: Some(draft.title),
            department: Some(draft.department),
            description: Some(draft.description),
            requirements: Some(draft.requirements),
            skills_required: Some(draft.skills_required),
            min_experience_years: Some(draft.min_experience_years),
            education_level: Some(draft.education_level),
            status: Some(draft.status),
        }
    }
}

impl JobPatch {
    pub fn is_empty(&self) -> bool {
        *self == JobPatch::default()
    }
}

/// Partial candidate update. Identity fields are not editable.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CandidatePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience: Option<Vec<Experience>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub education: Option<Vec<Education>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certifications: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl CandidatePatch {
    pub fn is_empty(&self) -> bool {
        *self == CandidatePatch::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Query parameters for `GET /jobs`. Unset fields are omitted so the
/// server defaults apply.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobFilters {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub search: Option<String>,
    pub status: Option<JobStatus>,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
}

impl JobFilters {
    pub fn open() -> Self {
        Self {
            status: Some(JobStatus::Open),
            ..Self::default()
        }
    }

    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        push_opt(&mut query, "page", self.page);
        push_opt(&mut query, "page_size", self.page_size);
        push_text(&mut query, "search", self.search.as_deref());
        push_opt(&mut query, "status", self.status.map(JobStatus::as_str));
        push_text(&mut query, "sort_by", self.sort_by.as_deref());
        push_opt(&mut query, "sort_order", self.sort_order.map(SortOrder::as_str));
        query
    }
}

/// Query parameters for `GET /candidates`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidateFilters {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub search: Option<String>,
    /// Sent as one comma-separated `skills` parameter.
    pub skills: Vec<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
}

impl CandidateFilters {
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        push_opt(&mut query, "page", self.page);
        push_opt(&mut query, "page_size", self.page_size);
        push_text(&mut query, "search", self.search.as_deref());
        let skills: Vec<&str> = self
            .skills
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect();
        if !skills.is_empty() {
            query.push(("skills".to_string(), skills.join(",")));
        }
        push_text(&mut query, "sort_by", self.sort_by.as_deref());
        push_opt(&mut query, "sort_order", self.sort_order.map(SortOrder::as_str));
        query
    }
}

fn push_opt<V: ToString>(query: &mut Vec<(String, String)>, key: &str, value: Option<V>) {
    if let Some(value) = value {
        query.push((key.to_string(), value.to_string()));
    }
}

/// Blank text is treated like an unset filter.
fn push_text(query: &mut Vec<(String, String)>, key: &str, value: Option<&str>) {
    if let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) {
        query.push((key.to_string(), value.to_string()));
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    #[default]
    Csv,
    Pdf,
}

impl ExportFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Pdf => "pdf",
        }
    }
}

/// Applicant fields posted with the CV on the public portal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplicationDetails {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub job_id: i64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApplyReceipt {
    pub message: String,
    pub candidate_id: i64,
    pub job_title: String,
}

/// Per-file outcome reported by `POST /upload/resume`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UploadResult {
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default)]
    pub task_id: Option<String>,
    #[serde(default)]
    pub candidate_id: Option<i64>,
    #[serde(default)]
    pub status: Option<ProcessingStatus>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UploadReceipt {
    pub task_ids: Vec<String>,
    #[serde(default)]
    pub results: Vec<UploadResult>,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RankingRun {
    pub task_id: String,
    pub message: String,
}

/// A binary download (CSV/PDF/JSON export).
#[derive(Debug, Clone, PartialEq)]
pub struct Download {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
    /// File name suggested by the server's `Content-Disposition` header.
    pub file_name: Option<String>,
}
