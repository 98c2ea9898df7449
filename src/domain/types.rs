//! Records mirrored from API responses.
//!
//! The server owns every one of these: the client decodes them, shows them and
//! re-fetches after each mutation. Decoding is tolerant of what the API
//! actually sends:
//!
//! - optional text/list fields may arrive as `null` and decode to empty values
//! - timestamps are naive ISO-8601 (offset timestamps are normalised to UTC)
//! - bias-report maps keep the server's key order

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use clap::ValueEnum;
use serde::{Deserialize, Deserializer, Serialize};

/// Recruiter account role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Recruiter,
    #[default]
    Viewer,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Recruiter => "recruiter",
            Role::Viewer => "viewer",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub full_name: String,
    #[serde(default)]
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub user: User,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// Job posting lifecycle state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Open,
    Closed,
    #[default]
    Draft,
}

impl JobStatus {
    pub const ALL: [JobStatus; 3] = [JobStatus::Open, JobStatus::Closed, JobStatus::Draft];

    pub fn as_str(self) -> &'static str {
        match self {
            JobStatus::Open => "open",
            JobStatus::Closed => "closed",
            JobStatus::Draft => "draft",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: i64,
    pub title: String,
    #[serde(default, deserialize_with = "nullable")]
    pub department: String,
    #[serde(default, deserialize_with = "nullable")]
    pub description: String,
    #[serde(default, deserialize_with = "nullable")]
    pub requirements: String,
    #[serde(default, deserialize_with = "nullable")]
    pub skills_required: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub min_experience_years: u32,
    #[serde(default, deserialize_with = "nullable")]
    pub education_level: String,
    #[serde(default)]
    pub status: JobStatus,
    #[serde(default)]
    pub created_by: Option<i64>,
    #[serde(with = "timestamp")]
    pub created_at: NaiveDateTime,
    #[serde(with = "timestamp")]
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    #[serde(default, deserialize_with = "nullable")]
    pub company: String,
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    #[serde(default, deserialize_with = "nullable")]
    pub duration: String,
    #[serde(default, deserialize_with = "nullable")]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Education {
    #[serde(default, deserialize_with = "nullable")]
    pub institution: String,
    #[serde(default, deserialize_with = "nullable")]
    pub degree: String,
    #[serde(default, deserialize_with = "nullable")]
    pub year: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: i64,
    #[serde(default, deserialize_with = "nullable")]
    pub full_name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub email: String,
    #[serde(default, deserialize_with = "nullable")]
    pub phone: String,
    #[serde(default, deserialize_with = "nullable")]
    pub skills: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub experience: Vec<Experience>,
    #[serde(default, deserialize_with = "nullable")]
    pub education: Vec<Education>,
    #[serde(default, deserialize_with = "nullable")]
    pub certifications: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub summary: String,
    #[serde(default, deserialize_with = "nullable")]
    pub source: String,
    #[serde(with = "timestamp")]
    pub created_at: NaiveDateTime,
    #[serde(with = "timestamp")]
    pub updated_at: NaiveDateTime,
}

/// Résumé file type accepted by the upload endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Pdf,
    Docx,
}

impl FileType {
    /// Detect the type from a file name's extension (case-insensitive).
    pub fn from_file_name(name: &str) -> Option<Self> {
        let ext = std::path::Path::new(name)
            .extension()
            .and_then(|e| e.to_str())?
            .to_ascii_lowercase();
        match ext.as_str() {
            "pdf" => Some(FileType::Pdf),
            "docx" => Some(FileType::Docx),
            _ => None,
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            FileType::Pdf => "application/pdf",
            FileType::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }
}

/// Server-side résumé processing state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessingStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl ProcessingStatus {
    /// `completed` and `failed` end polling for a task.
    pub fn is_terminal(self) -> bool {
        matches!(self, ProcessingStatus::Completed | ProcessingStatus::Failed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ProcessingStatus::Pending => "pending",
            ProcessingStatus::Processing => "processing",
            ProcessingStatus::Completed => "completed",
            ProcessingStatus::Failed => "failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resume {
    pub id: i64,
    pub candidate_id: i64,
    pub file_path: String,
    pub file_type: FileType,
    pub file_size: u64,
    #[serde(default, deserialize_with = "nullable")]
    pub raw_text: String,
    #[serde(default)]
    pub parsed_data: serde_json::Value,
    pub processing_status: ProcessingStatus,
    #[serde(with = "timestamp")]
    pub uploaded_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ranking {
    pub id: i64,
    pub job_id: i64,
    pub candidate_id: i64,
    #[serde(default)]
    pub candidate: Option<Candidate>,
    pub overall_score: f64,
    pub skill_score: f64,
    pub experience_score: f64,
    pub education_score: f64,
    pub certification_score: f64,
    /// Cosine similarity in `[0, 1]`.
    pub semantic_similarity: f64,
    pub rank_position: u32,
    #[serde(default, deserialize_with = "nullable")]
    pub matched_skills: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub missing_skills: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub explanation: String,
    #[serde(with = "timestamp")]
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsOverview {
    pub total_candidates: u64,
    pub total_jobs: u64,
    pub open_positions: u64,
    pub avg_score: f64,
    pub recent_uploads: u64,
}

/// Server-paginated list response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadStatus {
    pub task_id: String,
    pub status: ProcessingStatus,
    #[serde(default)]
    pub progress: f64,
    #[serde(default, deserialize_with = "nullable")]
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBucket {
    pub range: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceShare {
    pub source: String,
    pub count: u64,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiasReport {
    pub job_id: i64,
    pub total_candidates: u64,
    #[serde(default, with = "ordered_map")]
    pub demographic_distribution: Vec<(String, u64)>,
    #[serde(default, with = "ordered_map")]
    pub score_by_demographic: Vec<(String, f64)>,
    pub four_fifths_compliant: bool,
    #[serde(default, deserialize_with = "nullable")]
    pub details: String,
}

/// Treat an explicit `null` like a missing field.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

pub(crate) mod timestamp {
    use chrono::{DateTime, NaiveDateTime};
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.format("%Y-%m-%dT%H:%M:%S%.f").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid timestamp '{raw}'")))
    }

    pub fn parse(raw: &str) -> Option<NaiveDateTime> {
        let raw = raw.trim();
        if let Ok(dt) = raw.parse::<NaiveDateTime>() {
            return Some(dt);
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.naive_utc());
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f").ok()
    }
}

mod ordered_map {
    use std::fmt;
    use std::marker::PhantomData;

    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[allow(clippy::ptr_arg)]
    pub fn serialize<S, V>(pairs: &Vec<(String, V)>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        V: Serialize,
    {
        let mut map = serializer.serialize_map(Some(pairs.len()))?;
        for (key, value) in pairs {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D, V>(deserializer: D) -> Result<Vec<(String, V)>, D::Error>
    where
        D: Deserializer<'de>,
        V: Deserialize<'de>,
    {
        deserializer.deserialize_any(PairsVisitor(PhantomData))
    }

    struct PairsVisitor<V>(PhantomData<V>);

    impl<'de, V: Deserialize<'de>> Visitor<'de> for PairsVisitor<V> {
        type Value = Vec<(String, V)>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a JSON object")
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut out = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((key, value)) = map.next_entry::<String, V>()? {
                out.push((key, value));
            }
            Ok(out)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_tolerates_nulls() {
        let raw = r#"{
            "id": 7, "title": "Backend Engineer", "department": null,
            "description": "Build APIs", "requirements": null,
            "skills_required": null, "min_experience_years": 2,
            "education_level": null, "status": "open", "created_by": null,
            "created_at": "2025-03-01T09:30:00.123456",
            "updated_at": "2025-03-02T10:00:00"
        }"#;
        let job: Job = serde_json::from_str(raw).unwrap();
        assert_eq!(job.department, "");
        assert!(job.skills_required.is_empty());
        assert_eq!(job.status, JobStatus::Open);
        assert_eq!(job.created_by, None);
        assert_eq!(job.updated_at.format("%Y-%m-%d %H:%M").to_string(), "2025-03-02 10:00");
    }

    #[test]
    fn timestamp_accepts_offset_form() {
        let dt = timestamp::parse("2025-03-01T09:30:00+07:00").unwrap();
        assert_eq!(dt.format("%H:%M").to_string(), "02:30");
        assert!(timestamp::parse("yesterday").is_none());
    }

    #[test]
    fn bias_report_keeps_key_order() {
        let raw = r#"{
            "job_id": 3, "total_candidates": 8,
            "demographic_distribution": {"Kuartil 1 (Bawah)": 2, "Kuartil 2-3 (Tengah)": 4, "Kuartil 4 (Atas)": 2},
            "score_by_demographic": {"Kuartil 1 Rata-rata": 41.5, "Overall Rata-rata": 63.2},
            "four_fifths_compliant": false,
            "details": "Analisis 8 kandidat."
        }"#;
        let report: BiasReport = serde_json::from_str(raw).unwrap();
        let keys: Vec<&str> = report
            .demographic_distribution
            .iter()
            .map(|(k, _)| k.as_str())
            .collect();
        assert_eq!(keys, ["Kuartil 1 (Bawah)", "Kuartil 2-3 (Tengah)", "Kuartil 4 (Atas)"]);
        assert_eq!(report.score_by_demographic[1], ("Overall Rata-rata".to_string(), 63.2));

        let back = serde_json::to_value(&report).unwrap();
        assert_eq!(back["demographic_distribution"]["Kuartil 4 (Atas)"], 2);
    }

    #[test]
    fn ranking_without_embedded_candidate() {
        let raw = r#"{
            "id": 1, "job_id": 3, "candidate_id": 12, "overall_score": 81.5,
            "skill_score": 90.0, "experience_score": 70.0, "education_score": 80.0,
            "certification_score": 50.0, "semantic_similarity": 0.62,
            "rank_position": 1, "matched_skills": ["rust"], "missing_skills": null,
            "explanation": null, "created_at": "2025-03-01T09:30:00"
        }"#;
        let ranking: Ranking = serde_json::from_str(raw).unwrap();
        assert!(ranking.candidate.is_none());
        assert!(ranking.missing_skills.is_empty());
        assert_eq!(ranking.matched_skills, ["rust"]);
    }

    #[test]
    fn resume_decodes_parsed_data() {
        let raw = r#"{
            "id": 4, "candidate_id": 9, "file_path": "uploads/a.pdf", "file_type": "pdf",
            "file_size": 2048, "raw_text": null, "parsed_data": {"skills": ["sql"]},
            "processing_status": "completed", "uploaded_at": "2025-01-05T08:00:00"
        }"#;
        let resume: Resume = serde_json::from_str(raw).unwrap();
        assert_eq!(resume.file_type, FileType::Pdf);
        assert!(resume.processing_status.is_terminal());
        assert_eq!(resume.parsed_data["skills"][0], "sql");
    }

    #[test]
    fn file_type_detection() {
        assert_eq!(FileType::from_file_name("CV Budi.PDF"), Some(FileType::Pdf));
        assert_eq!(FileType::from_file_name("cv.docx"), Some(FileType::Docx));
        assert_eq!(FileType::from_file_name("cv.doc"), None);
        assert_eq!(FileType::from_file_name("README"), None);
    }
}
