//! Applicant portal endpoints. These never carry the recruiter's token.

use super::{decode, ApiClient, ApiRequest, FormField, ProgressFn, Transport, UploadFile};
use crate::domain::{ApplicationDetails, ApplyReceipt, Job};
use crate::error::AppError;

impl<T: Transport> ApiClient<T> {
    /// `GET /api/public/jobs` (open postings only).
    pub fn list_open_jobs(&self) -> Result<Vec<Job>, AppError> {
        decode(&self.send_public(ApiRequest::get("/api/public/jobs"))?)
    }

    /// `GET /api/public/jobs/{id}`
    pub fn get_public_job(&self, id: i64) -> Result<Job, AppError> {
        decode(&self.send_public(ApiRequest::get(format!("/api/public/jobs/{id}")))?)
    }

    /// `POST /api/public/apply` (multipart: full_name, email, phone, job_id, file).
    pub fn apply(
        &self,
        details: &ApplicationDetails,
        file: UploadFile,
        progress: Option<ProgressFn>,
    ) -> Result<ApplyReceipt, AppError> {
        let fields = vec![
            FormField::text("full_name", details.full_name.clone()),
            FormField::text("email", details.email.clone()),
            FormField::text("phone", details.phone.clone()),
            FormField::text("job_id", details.job_id.to_string()),
            FormField::file("file", file),
        ];
        let req = ApiRequest::post("/api/public/apply")
            .form(fields)
            .progress(progress);
        let receipt: ApplyReceipt = decode(&self.send_public(req)?)?;
        tracing::info!(candidate = receipt.candidate_id, job = %receipt.job_title, "application submitted");
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use crate::api::testing::*;
    use crate::api::{Body, FormField, UploadFile};
    use crate::domain::ApplicationDetails;

    #[test]
    fn public_calls_never_send_bearer() {
        let client = authed_client("recruiter-token");
        client.transport().push_json(200, &format!("[{JOB_JSON}]"));
        let jobs = client.list_open_jobs().unwrap();
        assert_eq!(jobs.len(), 1);

        let req = &client.transport().requests()[0];
        assert_eq!(req.path, "/api/public/jobs");
        assert_eq!(req.bearer, None);
    }

    #[test]
    fn apply_sends_form_fields_in_order() {
        let client = client();
        client.transport().push_json(
            200,
            r#"{"message": "Lamaran berhasil dikirim! Terima kasih telah melamar.", "candidate_id": 21, "job_title": "Data Analyst"}"#,
        );
        let details = ApplicationDetails {
            full_name: "Siti".to_string(),
            email: "siti@example.com".to_string(),
            phone: String::new(),
            job_id: 3,
        };
        let file = UploadFile {
            file_name: "cv.docx".to_string(),
            mime: "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            bytes: vec![0x50, 0x4b],
        };

        let receipt = client.apply(&details, file, None).unwrap();
        assert_eq!(receipt.job_title, "Data Analyst");

        let req = &client.transport().requests()[0];
        assert_eq!(req.path, "/api/public/apply");
        let Body::Form(fields) = &req.body else {
            panic!("expected multipart body");
        };
        let names: Vec<&str> = fields
            .iter()
            .map(|f| match f {
                FormField::Text { name, .. } | FormField::File { name, .. } => name.as_str(),
            })
            .collect();
        assert_eq!(names, ["full_name", "email", "phone", "job_id", "file"]);
    }
}
