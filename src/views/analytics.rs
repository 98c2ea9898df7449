//! Dashboard and analytics data.

use crate::api::{ApiClient, Transport};
use crate::domain::{AnalyticsOverview, BiasReport, ScoreBucket, SourceShare, TrendPoint};
use crate::error::AppError;

/// Server bounds for the applicant trend window.
pub const MIN_TREND_DAYS: u32 = 7;
pub const MAX_TREND_DAYS: u32 = 365;
pub const DEFAULT_TREND_DAYS: u32 = 30;

/// Windows offered by the period picker.
pub const TREND_WINDOWS: [u32; 3] = [7, 30, 90];

pub fn clamp_days(days: u32) -> u32 {
    days.clamp(MIN_TREND_DAYS, MAX_TREND_DAYS)
}

pub fn total_scored(buckets: &[ScoreBucket]) -> u64 {
    buckets.iter().map(|b| b.count).sum()
}

pub fn total_applicants(trend: &[TrendPoint]) -> u64 {
    trend.iter().map(|p| p.count).sum()
}

/// `"LinkedIn: 12 (40.0%)"`.
pub fn source_label(share: &SourceShare) -> String {
    format!("{}: {} ({:.1}%)", share.source, share.count, share.percentage)
}

/// One-line verdict for a bias audit.
pub fn bias_summary(report: &BiasReport) -> &'static str {
    if report.four_fifths_compliant {
        "Memenuhi aturan 4/5 (four-fifths rule)"
    } else {
        "Tidak memenuhi aturan 4/5 - perlu ditinjau"
    }
}

/// Everything the dashboard and analytics screens show.
#[derive(Debug, Clone, Default)]
pub struct AnalyticsView {
    days: u32,
    overview: Option<AnalyticsOverview>,
    trend: Vec<TrendPoint>,
    scores: Vec<ScoreBucket>,
    sources: Vec<SourceShare>,
    bias_job: Option<i64>,
    bias: Option<BiasReport>,
}

impl AnalyticsView {
    pub fn new() -> Self {
        Self {
            days: DEFAULT_TREND_DAYS,
            ..Self::default()
        }
    }

    pub fn days(&self) -> u32 {
        self.days
    }

    pub fn set_days(&mut self, days: u32) {
        self.days = clamp_days(days);
    }

    /// Step to the next preset window, wrapping.
    pub fn cycle_days(&mut self) {
        let next = TREND_WINDOWS
            .iter()
            .position(|&d| d == self.days)
            .map_or(0, |i| (i + 1) % TREND_WINDOWS.len());
        self.days = TREND_WINDOWS[next];
    }

    /// Fetch overview, trend, score distribution and sources together.
    /// Nothing is replaced unless all four succeed.
    pub fn load<T: Transport>(&mut self, client: &ApiClient<T>) -> Result<(), AppError> {
        let overview = client.overview()?;
        let trend = client.applicants_trend(self.days)?;
        let scores = client.score_distribution(None)?;
        let sources = client.source_breakdown()?;
        self.overview = Some(overview);
        self.trend = trend;
        self.scores = scores;
        self.sources = sources;
        Ok(())
    }

    /// Load the bias audit for a job. Failures clear the report and are
    /// only logged.
    pub fn load_bias<T: Transport>(&mut self, client: &ApiClient<T>, job_id: i64) {
        self.bias_job = Some(job_id);
        self.bias = match client.bias_report(job_id) {
            Ok(report) => Some(report),
            Err(err) => {
                tracing::warn!(job_id, error = %err, "could not load bias report");
                None
            }
        };
    }

    pub fn overview(&self) -> Option<&AnalyticsOverview> {
        self.overview.as_ref()
    }

    pub fn trend(&self) -> &[TrendPoint] {
        &self.trend
    }

    pub fn scores(&self) -> &[ScoreBucket] {
        &self.scores
    }

    pub fn sources(&self) -> &[SourceShare] {
        &self.sources
    }

    pub fn bias_job(&self) -> Option<i64> {
        self.bias_job
    }

    pub fn bias(&self) -> Option<&BiasReport> {
        self.bias.as_ref()
    }
}
