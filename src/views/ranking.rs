//! Ranking results, candidate comparison and export naming.

use crate::api::{ApiClient, Transport};
use crate::domain::{Download, ExportFormat, Job, JobFilters, Ranking};
use crate::error::{AppError, EXIT_LOCAL};

/// Most candidates that can be compared side by side.
pub const MAX_COMPARE: usize = 3;
/// Fewest candidates a comparison needs.
pub const MIN_COMPARE: usize = 2;

/// Coarse score grade used for colouring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Good,
    Fair,
    Poor,
}

impl ScoreBand {
    pub fn of(score: f64) -> Self {
        if score >= 80.0 {
            ScoreBand::Good
        } else if score >= 60.0 {
            ScoreBand::Fair
        } else {
            ScoreBand::Poor
        }
    }
}

/// Candidate name, or `Kandidat #{id}` when the ranking carries none.
pub fn display_name(ranking: &Ranking) -> String {
    match &ranking.candidate {
        Some(c) if !c.full_name.trim().is_empty() => c.full_name.clone(),
        _ => format!("Kandidat #{}", ranking.candidate_id),
    }
}

pub fn export_file_name(job_id: i64, format: ExportFormat) -> String {
    format!("ranking-job-{job_id}.{}", format.as_str())
}

/// Candidates picked for comparison, in pick order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompareSelection {
    ids: Vec<i64>,
}

impl CompareSelection {
    /// Select or deselect a candidate. Selecting beyond the limit is ignored.
    /// Returns whether the candidate is selected afterwards.
    pub fn toggle(&mut self, candidate_id: i64) -> bool {
        if let Some(pos) = self.ids.iter().position(|&id| id == candidate_id) {
            self.ids.remove(pos);
            return false;
        }
        if self.ids.len() < MAX_COMPARE {
            self.ids.push(candidate_id);
            return true;
        }
        false
    }

    pub fn contains(&self, candidate_id: i64) -> bool {
        self.ids.contains(&candidate_id)
    }

    pub fn ids(&self) -> &[i64] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn can_compare(&self) -> bool {
        self.ids.len() >= MIN_COMPARE
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}

/// One axis of the comparison chart; one value per compared candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct RadarRow {
    pub metric: &'static str,
    pub values: Vec<f64>,
}

/// Comparison axes. Semantic similarity is scaled to `0..=100` like the
/// other scores.
pub fn radar_rows(compared: &[Ranking]) -> Vec<RadarRow> {
    let row = |metric: &'static str, f: fn(&Ranking) -> f64| RadarRow {
        metric,
        values: compared.iter().map(f).collect(),
    };
    vec![
        row("Skills", |r: &Ranking| r.skill_score),
        row("Pengalaman", |r: &Ranking| r.experience_score),
        row("Pendidikan", |r: &Ranking| r.education_score),
        row("Sertifikasi", |r: &Ranking| r.certification_score),
        row("Kecocokan Semantik", |r: &Ranking| r.semantic_similarity * 100.0),
    ]
}

/// Ranking screen: a job picker, that job's ranking, and a comparison.
#[derive(Debug, Clone, Default)]
pub struct RankingView {
    jobs: Vec<Job>,
    job_id: Option<i64>,
    rankings: Vec<Ranking>,
    selection: CompareSelection,
    comparison: Vec<Ranking>,
}

impl RankingView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Jobs for the picker. A failure leaves the list empty.
    pub fn load_jobs<T: Transport>(&mut self, client: &ApiClient<T>) {
        match client.list_jobs(&JobFilters::default()) {
            Ok(page) => self.jobs = page.items,
            Err(err) => tracing::warn!(error = %err, "could not load jobs for ranking"),
        }
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn job_id(&self) -> Option<i64> {
        self.job_id
    }

    pub fn selected_job(&self) -> Option<&Job> {
        let id = self.job_id?;
        self.jobs.iter().find(|j| j.id == id)
    }

    pub fn rankings(&self) -> &[Ranking] {
        &self.rankings
    }

    pub fn selection(&self) -> &CompareSelection {
        &self.selection
    }

    pub fn comparison(&self) -> &[Ranking] {
        &self.comparison
    }

    /// Switch job and load its ranking. The comparison starts over.
    pub fn select_job<T: Transport>(&mut self, client: &ApiClient<T>, job_id: i64) -> Result<(), AppError> {
        self.job_id = Some(job_id);
        self.selection.clear();
        self.comparison.clear();
        self.rankings.clear();
        self.rankings = client.rankings_for_job(job_id)?;
        Ok(())
    }

    /// Step through the loaded jobs (wrapping) and load the new job's ranking.
    pub fn cycle_job<T: Transport>(&mut self, client: &ApiClient<T>, forward: bool) -> Result<(), AppError> {
        if self.jobs.is_empty() {
            return Ok(());
        }
        let n = self.jobs.len();
        let current = self
            .job_id
            .and_then(|id| self.jobs.iter().position(|j| j.id == id));
        let next = match (current, forward) {
            (None, _) => 0,
            (Some(i), true) => (i + 1) % n,
            (Some(i), false) => (i + n - 1) % n,
        };
        let job_id = self.jobs[next].id;
        self.select_job(client, job_id)
    }

    pub fn toggle_compare(&mut self, candidate_id: i64) -> bool {
        self.selection.toggle(candidate_id)
    }

    pub fn can_compare(&self) -> bool {
        self.job_id.is_some() && self.selection.can_compare()
    }

    pub fn compare<T: Transport>(&mut self, client: &ApiClient<T>) -> Result<&[Ranking], AppError> {
        let job_id = self
            .job_id
            .ok_or_else(|| AppError::new(EXIT_LOCAL, "Select a job first."))?;
        if !self.selection.can_compare() {
            return Err(AppError::new(
                EXIT_LOCAL,
                "Select at least two candidates to compare.",
            ));
        }
        self.comparison = client.compare(self.selection.ids(), job_id)?;
        Ok(&self.comparison)
    }

    /// Export the current job's ranking. Returns the blob and the file name
    /// to save it under.
    pub fn export<T: Transport>(
        &self,
        client: &ApiClient<T>,
        format: ExportFormat,
    ) -> Result<(Download, String), AppError> {
        let job_id = self
            .job_id
            .ok_or_else(|| AppError::new(EXIT_LOCAL, "Select a job first."))?;
        let blob = client.export_ranking(job_id, format)?;
        Ok((blob, export_file_name(job_id, format)))
    }
}
