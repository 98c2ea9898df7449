//! Public applicant flow: pick an open job, fill in details with one CV,
//! submit.

use std::path::{Path, PathBuf};

use crate::api::{ApiClient, ProgressFn, Transport, UploadFile};
use crate::domain::{ApplicationDetails, ApplyReceipt, Job};
use crate::error::{AppError, EXIT_LOCAL};
use crate::messages::{failure_banner, Locale, Msg};
use crate::views::upload::{screen_file, RejectReason};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WizardStep {
    #[default]
    SelectJob,
    Details,
    Done,
}

impl WizardStep {
    pub const ALL: [WizardStep; 3] = [WizardStep::SelectJob, WizardStep::Details, WizardStep::Done];

    pub fn label(self) -> &'static str {
        match self {
            WizardStep::SelectJob => "Pilih Posisi",
            WizardStep::Details => "Data Diri & CV",
            WizardStep::Done => "Selesai",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplicationForm {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    file: Option<PathBuf>,
    submitting: bool,
    error: Option<String>,
}

impl ApplicationForm {
    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    /// Select the CV. One file at a time; a new one replaces the old.
    pub fn set_file(&mut self, path: PathBuf, size: u64) -> Result<(), RejectReason> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or(RejectReason::UnsupportedType)?;
        screen_file(name, size)?;
        self.file = Some(path);
        Ok(())
    }

    /// Select a CV from disk, checking its size on the way.
    pub fn set_file_from_disk(&mut self, path: PathBuf) -> Result<(), RejectReason> {
        let size = match std::fs::metadata(&path) {
            Ok(meta) if meta.is_file() => meta.len(),
            _ => return Err(RejectReason::Unreadable),
        };
        self.set_file(path, size)
    }

    pub fn clear_file(&mut self) {
        self.file = None;
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Banner from the last failed submit.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Submit stays disabled until a CV is chosen and name and email are
    /// filled in, and while a submission is in flight.
    pub fn can_submit(&self) -> bool {
        !self.submitting
            && self.file.is_some()
            && !self.full_name.trim().is_empty()
            && !self.email.trim().is_empty()
    }

    pub fn details(&self, job_id: i64) -> ApplicationDetails {
        ApplicationDetails {
            full_name: self.full_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            job_id,
        }
    }

    /// Post the application. A failure is also kept as the form's banner:
    /// the server's `detail`, or the generic "could not send" message.
    pub fn submit<T: Transport>(
        &mut self,
        client: &ApiClient<T>,
        job_id: i64,
        locale: Locale,
        progress: Option<ProgressFn>,
    ) -> Result<ApplyReceipt, AppError> {
        if !self.can_submit() {
            return Err(AppError::new(
                EXIT_LOCAL,
                "Full name, email and a CV file are required.",
            ));
        }
        let Some(path) = self.file.clone() else {
            return Err(AppError::new(EXIT_LOCAL, "No CV file selected."));
        };

        self.submitting = true;
        self.error = None;
        let result = UploadFile::from_path(&path)
            .and_then(|file| client.apply(&self.details(job_id), file, progress));
        self.submitting = false;

        result.inspect_err(|err| {
            self.error = Some(failure_banner(err, Msg::ApplyFailed, locale));
        })
    }
}

/// Three-step applicant wizard.
#[derive(Debug, Clone, Default)]
pub struct ApplyWizard {
    step: WizardStep,
    jobs: Vec<Job>,
    selected: Option<Job>,
    form: ApplicationForm,
    receipt: Option<ApplyReceipt>,
}

impl ApplyWizard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the open jobs. A failed fetch leaves the list empty.
    pub fn load_jobs<T: Transport>(&mut self, client: &ApiClient<T>) {
        self.jobs = match client.list_open_jobs() {
            Ok(jobs) => jobs,
            Err(err) => {
                tracing::warn!(error = %err, "could not load open jobs");
                Vec::new()
            }
        };
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn selected_job(&self) -> Option<&Job> {
        self.selected.as_ref()
    }

    pub fn form(&self) -> &ApplicationForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ApplicationForm {
        &mut self.form
    }

    pub fn receipt(&self) -> Option<&ApplyReceipt> {
        self.receipt.as_ref()
    }

    pub fn select_job(&mut self, job: Job) {
        self.selected = Some(job);
        self.step = WizardStep::Details;
    }

    /// Back to the job list; whatever was typed is kept.
    pub fn back(&mut self) {
        if self.step == WizardStep::Details {
            self.step = WizardStep::SelectJob;
        }
    }

    pub fn can_submit(&self) -> bool {
        self.step == WizardStep::Details && self.selected.is_some() && self.form.can_submit()
    }

    pub fn submit<T: Transport>(
        &mut self,
        client: &ApiClient<T>,
        locale: Locale,
        progress: Option<ProgressFn>,
    ) -> Result<&ApplyReceipt, AppError> {
        let job_id = match (&self.selected, self.step) {
            (Some(job), WizardStep::Details) => job.id,
            _ => return Err(AppError::new(EXIT_LOCAL, "Select a job first.")),
        };
        let receipt = self.form.submit(client, job_id, locale, progress)?;
        self.step = WizardStep::Done;
        Ok(self.receipt.insert(receipt))
    }

    /// Start over with an empty form. The loaded job list stays.
    pub fn reset(&mut self) {
        self.step = WizardStep::SelectJob;
        self.selected = None;
        self.form = ApplicationForm::default();
        self.receipt = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::*;

    const RECEIPT_JSON: &str = r#"{"message": "Lamaran berhasil dikirim! Terima kasih telah melamar.", "candidate_id": 21, "job_title": "Data Analyst"}"#;

    fn filled_form(dir: &Path) -> ApplicationForm {
        let cv = dir.join("cv.pdf");
        std::fs::write(&cv, b"%PDF-1.4").unwrap();
        let mut form = ApplicationForm {
            full_name: "Siti Rahma".to_string(),
            email: "siti@example.com".to_string(),
            ..ApplicationForm::default()
        };
        form.set_file_from_disk(cv).unwrap();
        form
    }

    fn open_job() -> Job {
        serde_json::from_str(JOB_JSON).unwrap()
    }

    #[test]
    fn submit_disabled_without_file() {
        let mut form = ApplicationForm {
            full_name: "Siti".to_string(),
            email: "siti@example.com".to_string(),
            ..ApplicationForm::default()
        };
        assert!(!form.can_submit());

        let client = client();
        assert!(form.submit(&client, 3, Locale::Id, None).is_err());
        assert_eq!(client.transport().request_count(), 0);
    }

    #[test]
    fn submit_disabled_without_name_or_email() {
        let dir = tempfile::tempdir().unwrap();
        let mut form = filled_form(dir.path());
        assert!(form.can_submit());
        form.email = "  ".to_string();
        assert!(!form.can_submit());
        form.email = "siti@example.com".to_string();
        form.full_name.clear();
        assert!(!form.can_submit());
    }

    #[test]
    fn only_cv_formats_are_accepted() {
        let mut form = ApplicationForm::default();
        assert_eq!(
            form.set_file(PathBuf::from("cv.png"), 10),
            Err(RejectReason::UnsupportedType)
        );
        assert_eq!(
            form.set_file(PathBuf::from("cv.pdf"), 11 * 1024 * 1024),
            Err(RejectReason::TooLarge)
        );
        assert!(form.file().is_none());
        form.set_file(PathBuf::from("cv.docx"), 10).unwrap();
        form.set_file(PathBuf::from("cv2.pdf"), 10).unwrap();
        assert_eq!(form.file(), Some(Path::new("cv2.pdf")));
    }

    #[test]
    fn successful_submit_reaches_done() {
        let dir = tempfile::tempdir().unwrap();
        let client = client();
        client.transport().push_json(200, RECEIPT_JSON);

        let mut wizard = ApplyWizard::new();
        assert_eq!(wizard.step(), WizardStep::SelectJob);
        wizard.select_job(open_job());
        assert_eq!(wizard.step(), WizardStep::Details);
        *wizard.form_mut() = filled_form(dir.path());
        assert!(wizard.can_submit());

        let receipt = wizard.submit(&client, Locale::Id, None).unwrap();
        assert_eq!(receipt.job_title, "Data Analyst");
        assert_eq!(wizard.step(), WizardStep::Done);
        assert_eq!(wizard.receipt().map(|r| r.candidate_id), Some(21));
    }

    #[test]
    fn failed_submit_shows_detail_or_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let client = client();
        client
            .transport()
            .push_json(404, r#"{"detail": "Lowongan tidak ditemukan atau sudah ditutup"}"#);
        client.transport().push_json(502, "Bad Gateway");

        let mut wizard = ApplyWizard::new();
        wizard.select_job(open_job());
        *wizard.form_mut() = filled_form(dir.path());

        assert!(wizard.submit(&client, Locale::Id, None).is_err());
        assert_eq!(wizard.step(), WizardStep::Details);
        assert_eq!(
            wizard.form().error(),
            Some("Lowongan tidak ditemukan atau sudah ditutup")
        );
        assert!(!wizard.form().is_submitting());

        assert!(wizard.submit(&client, Locale::Id, None).is_err());
        assert_eq!(
            wizard.form().error(),
            Some("Gagal mengirim lamaran. Silakan coba lagi.")
        );
    }

    #[test]
    fn reset_returns_to_first_step() {
        let dir = tempfile::tempdir().unwrap();
        let client = client();
        client.transport().push_json(200, &format!("[{JOB_JSON}]"));
        client.transport().push_json(200, RECEIPT_JSON);

        let mut wizard = ApplyWizard::new();
        wizard.load_jobs(&client);
        let job = wizard.jobs()[0].clone();
        wizard.select_job(job);
        *wizard.form_mut() = filled_form(dir.path());
        wizard.submit(&client, Locale::Id, None).unwrap();

        wizard.reset();
        assert_eq!(wizard.step(), WizardStep::SelectJob);
        assert!(wizard.selected_job().is_none());
        assert!(wizard.form().full_name.is_empty());
        assert!(wizard.form().file().is_none());
        assert!(wizard.receipt().is_none());
        assert_eq!(wizard.jobs().len(), 1);
    }

    #[test]
    fn failed_job_load_is_empty() {
        let client = client();
        client.transport().push_json(500, "{}");
        let mut wizard = ApplyWizard::new();
        wizard.load_jobs(&client);
        assert!(wizard.jobs().is_empty());
    }
}
