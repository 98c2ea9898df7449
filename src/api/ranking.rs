use serde::Serialize;

use super::{decode, download, ApiClient, ApiRequest, ApiResponse, Transport};
use crate::domain::{Download, ExportFormat, Ranking, RankingRun};
use crate::error::{AppError, EXIT_REMOTE};

#[derive(Serialize)]
struct RunRankingRequest {
    job_id: i64,
}

impl<T: Transport> ApiClient<T> {
    /// `POST /api/ranking/run`
    pub fn run_ranking(&self, job_id: i64) -> Result<RankingRun, AppError> {
        let req = ApiRequest::post("/api/ranking/run").json(&RunRankingRequest { job_id })?;
        decode(&self.send_authed(req)?)
    }

    /// `GET /api/ranking/job/{job_id}`, best first.
    pub fn rankings_for_job(&self, job_id: i64) -> Result<Vec<Ranking>, AppError> {
        let resp = self.send_authed(ApiRequest::get(format!("/api/ranking/job/{job_id}")))?;
        ranking_list(&resp)
    }

    /// `GET /api/ranking/compare?candidate_ids=1,2,3&job_id=N`
    pub fn compare(&self, candidate_ids: &[i64], job_id: i64) -> Result<Vec<Ranking>, AppError> {
        let ids: Vec<String> = candidate_ids.iter().map(i64::to_string).collect();
        let req = ApiRequest::get("/api/ranking/compare").query(vec![
            ("candidate_ids".to_string(), ids.join(",")),
            ("job_id".to_string(), job_id.to_string()),
        ]);
        ranking_list(&self.send_authed(req)?)
    }

    /// `GET /api/ranking/export/{job_id}?format=csv|pdf`
    pub fn export_ranking(&self, job_id: i64, format: ExportFormat) -> Result<Download, AppError> {
        let req = ApiRequest::get(format!("/api/ranking/export/{job_id}"))
            .query(vec![("format".to_string(), format.as_str().to_string())]);
        Ok(download(self.send_authed(req)?))
    }
}

/// Anything other than a JSON array counts as "no rankings yet".
fn ranking_list(resp: &ApiResponse) -> Result<Vec<Ranking>, AppError> {
    let value: serde_json::Value = decode(resp)?;
    if !value.is_array() {
        return Ok(Vec::new());
    }
    serde_json::from_value(value)
        .map_err(|e| AppError::new(EXIT_REMOTE, format!("Failed to parse rankings: {e}")))
}

#[cfg(test)]
mod tests {
    use crate::api::testing::*;
    use crate::api::Body;
    use crate::domain::ExportFormat;

    const RANKING_JSON: &str = r#"{
        "id": 1, "job_id": 3, "candidate_id": 12, "overall_score": 81.5,
        "skill_score": 90.0, "experience_score": 70.0, "education_score": 80.0,
        "certification_score": 50.0, "semantic_similarity": 0.62,
        "rank_position": 1, "matched_skills": ["sql"], "missing_skills": [],
        "explanation": "Cocok", "created_at": "2025-03-01T09:30:00"
    }"#;

    #[test]
    fn run_posts_job_id() {
        let client = authed_client("tok");
        client
            .transport()
            .push_json(200, r#"{"task_id": "r1", "message": "Ranking selesai. 4 kandidat di-ranking."}"#);
        let run = client.run_ranking(3).unwrap();
        assert_eq!(run.task_id, "r1");
        assert_eq!(
            client.transport().requests()[0].body,
            Body::Json(serde_json::json!({"job_id": 3}))
        );
    }

    #[test]
    fn non_array_rankings_are_empty() {
        let client = authed_client("tok");
        client.transport().push_json(200, r#"{"items": []}"#);
        assert!(client.rankings_for_job(3).unwrap().is_empty());

        client.transport().push_json(200, &format!("[{RANKING_JSON}]"));
        assert_eq!(client.rankings_for_job(3).unwrap()[0].candidate_id, 12);
    }

    #[test]
    fn compare_joins_ids() {
        let client = authed_client("tok");
        client.transport().push_json(200, &format!("[{RANKING_JSON}]"));
        client.compare(&[12, 15, 20], 3).unwrap();
        assert_eq!(
            client.transport().requests()[0].query,
            vec![
                ("candidate_ids".to_string(), "12,15,20".to_string()),
                ("job_id".to_string(), "3".to_string()),
            ]
        );
    }

    #[test]
    fn export_passes_format() {
        let client = authed_client("tok");
        client.transport().push_json(200, "rank,name\n1,Budi\n");
        let blob = client.export_ranking(3, ExportFormat::Pdf).unwrap();
        assert_eq!(blob.bytes, b"rank,name\n1,Budi\n");
        let req = &client.transport().requests()[0];
        assert_eq!(req.path, "/api/ranking/export/3");
        assert_eq!(req.query, vec![("format".to_string(), "pdf".to_string())]);
    }
}
