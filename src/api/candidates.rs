use super::{decode, download, ApiClient, ApiRequest, Transport};
use crate::domain::{Candidate, CandidateFilters, CandidatePatch, Download, Page};
use crate::error::AppError;

impl<T: Transport> ApiClient<T> {
    /// `GET /api/candidates`
    pub fn list_candidates(&self, filters: &CandidateFilters) -> Result<Page<Candidate>, AppError> {
        let req = ApiRequest::get("/api/candidates").query(filters.to_query());
        decode(&self.send_authed(req)?)
    }

    /// `GET /api/candidates/{id}`
    pub fn get_candidate(&self, id: i64) -> Result<Candidate, AppError> {
        decode(&self.send_authed(ApiRequest::get(format!("/api/candidates/{id}")))?)
    }

    /// `PUT /api/candidates/{id}`
    pub fn update_candidate(&self, id: i64, patch: &CandidatePatch) -> Result<Candidate, AppError> {
        let req = ApiRequest::put(format!("/api/candidates/{id}")).json(patch)?;
        decode(&self.send_authed(req)?)
    }

    /// `DELETE /api/candidates/{id}`
    pub fn delete_candidate(&self, id: i64) -> Result<(), AppError> {
        self.send_authed(ApiRequest::delete(format!("/api/candidates/{id}")))?;
        Ok(())
    }

    /// `GET /api/candidates/{id}/export` (JSON blob of everything stored).
    pub fn export_candidate(&self, id: i64) -> Result<Download, AppError> {
        let resp = self.send_authed(ApiRequest::get(format!("/api/candidates/{id}/export")))?;
        Ok(download(resp))
    }
}

#[cfg(test)]
mod tests {
    use crate::api::testing::*;
    use crate::api::ApiResponse;
    use crate::domain::CandidateFilters;

    #[test]
    fn list_candidates_decodes_page() {
        let client = authed_client("tok");
        client.transport().push_json(
            200,
            &format!(r#"{{"items": [{CANDIDATE_JSON}], "total": 31, "page": 2, "page_size": 10, "total_pages": 4}}"#),
        );
        let page = client
            .list_candidates(&CandidateFilters {
                page: Some(2),
                page_size: Some(10),
                ..CandidateFilters::default()
            })
            .unwrap();
        assert_eq!(page.total, 31);
        assert_eq!(page.items[0].summary, "");
        assert_eq!(
            client.transport().requests()[0].query,
            vec![
                ("page".to_string(), "2".to_string()),
                ("page_size".to_string(), "10".to_string()),
            ]
        );
    }

    #[test]
    fn export_returns_blob() {
        let client = authed_client("tok");
        client.transport().push(Ok(ApiResponse {
            status: 200,
            body: br#"{"candidate": {}}"#.to_vec(),
            content_type: Some("application/json".to_string()),
            content_disposition: Some("attachment; filename=candidate_12.json".to_string()),
        }));
        let blob = client.export_candidate(12).unwrap();
        assert_eq!(blob.file_name.as_deref(), Some("candidate_12.json"));
        assert_eq!(client.transport().requests()[0].path, "/api/candidates/12/export");
    }
}
