use super::{decode, ApiClient, ApiRequest, Transport};
use crate::domain::{Job, JobDraft, JobFilters, JobPatch, Page};
use crate::error::AppError;

impl<T: Transport> ApiClient<T> {
    /// `GET /api/jobs`
    pub fn list_jobs(&self, filters: &JobFilters) -> Result<Page<Job>, AppError> {
        let req = ApiRequest::get("/api/jobs").query(filters.to_query());
        decode(&self.send_authed(req)?)
    }

    /// `GET /api/jobs/{id}`
    pub fn get_job(&self, id: i64) -> Result<Job, AppError> {
        decode(&self.send_authed(ApiRequest::get(format!("/api/jobs/{id}")))?)
    }

    /// `POST /api/jobs`
    pub fn create_job(&self, draft: &JobDraft) -> Result<Job, AppError> {
        let req = ApiRequest::post("/api/jobs").json(draft)?;
        decode(&self.send_authed(req)?)
    }

    /// `PUT /api/jobs/{id}`
    pub fn update_job(&self, id: i64, patch: &JobPatch) -> Result<Job, AppError> {
        let req = ApiRequest::put(format!("/api/jobs/{id}")).json(patch)?;
        decode(&self.send_authed(req)?)
    }

    /// `DELETE /api/jobs/{id}`
    pub fn delete_job(&self, id: i64) -> Result<(), AppError> {
        self.send_authed(ApiRequest::delete(format!("/api/jobs/{id}")))?;
        Ok(())
    }
}
