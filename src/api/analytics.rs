use super::{decode, ApiClient, ApiRequest, Transport};
use crate::domain::{AnalyticsOverview, BiasReport, ScoreBucket, SourceShare, TrendPoint};
use crate::error::AppError;

impl<T: Transport> ApiClient<T> {
    /// `GET /api/analytics/overview`
    pub fn overview(&self) -> Result<AnalyticsOverview, AppError> {
        decode(&self.send_authed(ApiRequest::get("/api/analytics/overview"))?)
    }

    /// `GET /api/analytics/applicants-trend?days=N`. The server accepts 7..=365.
    pub fn applicants_trend(&self, days: u32) -> Result<Vec<TrendPoint>, AppError> {
        let req = ApiRequest::get("/api/analytics/applicants-trend")
            .query(vec![("days".to_string(), days.to_string())]);
        decode(&self.send_authed(req)?)
    }

    /// `GET /api/analytics/score-distribution[?job_id=N]`
    pub fn score_distribution(&self, job_id: Option<i64>) -> Result<Vec<ScoreBucket>, AppError> {
        let query = job_id
            .map(|id| vec![("job_id".to_string(), id.to_string())])
            .unwrap_or_default();
        let req = ApiRequest::get("/api/analytics/score-distribution").query(query);
        decode(&self.send_authed(req)?)
    }

    /// `GET /api/analytics/source-breakdown`
    pub fn source_breakdown(&self) -> Result<Vec<SourceShare>, AppError> {
        decode(&self.send_authed(ApiRequest::get("/api/analytics/source-breakdown"))?)
    }

    /// `GET /api/analytics/bias-report/{job_id}`
    pub fn bias_report(&self, job_id: i64) -> Result<BiasReport, AppError> {
        decode(&self.send_authed(ApiRequest::get(format!("/api/analytics/bias-report/{job_id}")))?)
    }
}

#[cfg(test)]
mod tests {
    use crate::api::testing::*;

    #[test]
    fn trend_decodes_dates() {
        let client = authed_client("tok");
        client.transport().push_json(
            200,
            r#"[{"date": "2025-03-01", "count": 4}, {"date": "2025-03-02", "count": 0}]"#,
        );
        let trend = client.applicants_trend(30).unwrap();
        assert_eq!(trend.len(), 2);
        assert_eq!(trend[0].date.to_string(), "2025-03-01");
        assert_eq!(
            client.transport().requests()[0].query,
            vec![("days".to_string(), "30".to_string())]
        );
    }

    #[test]
    fn score_distribution_job_filter_is_optional() {
        let client = authed_client("tok");
        client
            .transport()
            .push_json(200, r#"[{"range": "0-20", "count": 1}]"#);
        client
            .transport()
            .push_json(200, r#"[{"range": "0-20", "count": 1}]"#);

        client.score_distribution(None).unwrap();
        client.score_distribution(Some(3)).unwrap();

        let reqs = client.transport().requests();
        assert!(reqs[0].query.is_empty());
        assert_eq!(reqs[1].query, vec![("job_id".to_string(), "3".to_string())]);
    }

    #[test]
    fn overview_decodes() {
        let client = authed_client("tok");
        client.transport().push_json(
            200,
            r#"{"total_candidates": 40, "total_jobs": 5, "open_positions": 3, "avg_score": 64.2, "recent_uploads": 7}"#,
        );
        let overview = client.overview().unwrap();
        assert_eq!(overview.open_positions, 3);
        assert_eq!(client.transport().requests()[0].path, "/api/analytics/overview");
    }
}
