use super::{decode, ApiClient, ApiRequest, FormField, ProgressFn, Transport, UploadFile};
use crate::domain::{UploadReceipt, UploadStatus};
use crate::error::AppError;

impl<T: Transport> ApiClient<T> {
    /// `POST /api/upload/resume` (multipart: repeated `files`, optional `job_id`).
    pub fn upload_resumes(
        &self,
        files: Vec<UploadFile>,
        job_id: Option<i64>,
        progress: Option<ProgressFn>,
    ) -> Result<UploadReceipt, AppError> {
        let mut fields: Vec<FormField> = files
            .into_iter()
            .map(|upload| FormField::file("files", upload))
            .collect();
        if let Some(job_id) = job_id {
            fields.push(FormField::text("job_id", job_id.to_string()));
        }

        let req = ApiRequest::post("/api/upload/resume")
            .form(fields)
            .progress(progress);
        let receipt: UploadReceipt = decode(&self.send_authed(req)?)?;
        tracing::info!(tasks = receipt.task_ids.len(), "résumés uploaded");
        Ok(receipt)
    }

    /// `GET /api/upload/status/{task_id}`
    pub fn upload_status(&self, task_id: &str) -> Result<UploadStatus, AppError> {
        decode(&self.send_authed(ApiRequest::get(format!("/api/upload/status/{task_id}")))?)
    }
}

#[cfg(test)]
mod tests {
    use crate::api::testing::*;
    use crate::api::{Body, FormField, UploadFile};
    use crate::domain::ProcessingStatus;

    fn pdf(name: &str) -> UploadFile {
        UploadFile {
            file_name: name.to_string(),
            mime: "application/pdf",
            bytes: b"%PDF-1.4".to_vec(),
        }
    }

    #[test]
    fn upload_builds_repeated_file_fields() {
        let client = authed_client("tok");
        client.transport().push_json(
            200,
            r#"{"task_ids": ["t1", "t2"], "results": [
                {"file": "a.pdf", "task_id": "t1", "candidate_id": 5, "status": "completed"},
                {"file": "b.pdf", "task_id": "t2", "status": "failed", "error": "bad pdf"}
            ], "message": "2 files processed"}"#,
        );

        let receipt = client
            .upload_resumes(vec![pdf("a.pdf"), pdf("b.pdf")], Some(3), None)
            .unwrap();
        assert_eq!(receipt.task_ids, ["t1", "t2"]);
        assert_eq!(receipt.results[1].status, Some(ProcessingStatus::Failed));

        let req = &client.transport().requests()[0];
        assert_eq!(req.path, "/api/upload/resume");
        let Body::Form(fields) = &req.body else {
            panic!("expected multipart body");
        };
        assert_eq!(fields.len(), 3);
        assert!(matches!(&fields[0], FormField::File { name, .. } if name == "files"));
        assert_eq!(fields[2], FormField::text("job_id", "3"));
    }

    #[test]
    fn upload_without_job_omits_field() {
        let client = authed_client("tok");
        client
            .transport()
            .push_json(200, r#"{"task_ids": ["t1"], "message": "1 files processed"}"#);
        client.upload_resumes(vec![pdf("a.pdf")], None, None).unwrap();
        let Body::Form(fields) = &client.transport().requests()[0].body else {
            panic!("expected multipart body");
        };
        assert_eq!(fields.len(), 1);
    }

    #[test]
    fn status_decodes() {
        let client = authed_client("tok");
        client.transport().push_json(
            200,
            r#"{"task_id": "t1", "status": "processing", "progress": 40, "message": null}"#,
        );
        let status = client.upload_status("t1").unwrap();
        assert_eq!(status.status, ProcessingStatus::Processing);
        assert_eq!(status.progress, 40.0);
        assert_eq!(client.transport().requests()[0].path, "/api/upload/status/t1");
    }
}
