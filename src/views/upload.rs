//! Résumé upload queue.
//!
//! Files are screened on the way in (PDF/DOCX only, at most 10MB), uploaded
//! in one multipart request, and then followed through their processing
//! status by one poller per task id.

use std::path::{Path, PathBuf};

use crate::api::{ApiClient, ProgressFn, Transport, UploadFile, MAX_UPLOAD_BYTES};
use crate::domain::{FileType, ProcessingStatus, UploadReceipt, UploadStatus};
use crate::error::{AppError, EXIT_LOCAL};
use crate::poll::PollEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryStatus {
    Pending,
    Uploading,
    Processing,
    Completed,
    Failed,
}

impl EntryStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            EntryStatus::Pending => "pending",
            EntryStatus::Uploading => "uploading",
            EntryStatus::Processing => "processing",
            EntryStatus::Completed => "completed",
            EntryStatus::Failed => "failed",
        }
    }
}

impl From<ProcessingStatus> for EntryStatus {
    fn from(status: ProcessingStatus) -> Self {
        match status {
            ProcessingStatus::Pending => EntryStatus::Pending,
            ProcessingStatus::Processing => EntryStatus::Processing,
            ProcessingStatus::Completed => EntryStatus::Completed,
            ProcessingStatus::Failed => EntryStatus::Failed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    UnsupportedType,
    TooLarge,
    Unreadable,
}

impl RejectReason {
    pub fn as_str(self) -> &'static str {
        match self {
            RejectReason::UnsupportedType => "only PDF and DOCX are supported",
            RejectReason::TooLarge => "larger than 10MB",
            RejectReason::Unreadable => "cannot be read",
        }
    }
}

/// Whether a résumé of this name and size may be queued.
pub fn screen_file(file_name: &str, size: u64) -> Result<FileType, RejectReason> {
    let file_type = FileType::from_file_name(file_name).ok_or(RejectReason::UnsupportedType)?;
    if size > MAX_UPLOAD_BYTES {
        return Err(RejectReason::TooLarge);
    }
    Ok(file_type)
}

/// `512 B`, `12.5 KB`, `3.2 MB`.
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * 1024;
    if bytes < KB {
        format!("{bytes} B")
    } else if bytes < MB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueuedFile {
    pub path: PathBuf,
    pub file_name: String,
    pub size: u64,
    pub status: EntryStatus,
    /// Server-reported processing progress, `0..=100`.
    pub progress: f64,
    pub task_id: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UploadQueue {
    entries: Vec<QueuedFile>,
    job_id: Option<i64>,
    upload_progress: u8,
    /// Entries sent in the upload request that has not answered yet.
    in_flight: Vec<usize>,
}

impl UploadQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[QueuedFile] {
        &self.entries
    }

    pub fn job_id(&self) -> Option<i64> {
        self.job_id
    }

    /// Job the uploaded candidates are attached to, if any.
    pub fn set_job(&mut self, job_id: Option<i64>) {
        self.job_id = job_id;
    }

    pub fn is_uploading(&self) -> bool {
        !self.in_flight.is_empty()
    }

    /// Byte progress of the running upload request.
    pub fn upload_progress(&self) -> u8 {
        self.upload_progress
    }

    pub fn set_upload_progress(&mut self, pct: u8) {
        self.upload_progress = pct.min(100);
    }

    pub fn completed_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.status == EntryStatus::Completed)
            .count()
    }

    pub fn pending_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.status == EntryStatus::Pending)
            .count()
    }

    /// Queue a file of known size. Rejected files are not queued.
    pub fn add(&mut self, path: PathBuf, size: u64) -> Result<(), RejectReason> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or(RejectReason::UnsupportedType)?
            .to_string();
        screen_file(&file_name, size)?;
        self.entries.push(QueuedFile {
            path,
            file_name,
            size,
            status: EntryStatus::Pending,
            progress: 0.0,
            task_id: None,
            error: None,
        });
        Ok(())
    }

    /// Queue files from disk; returns the ones that were turned away.
    pub fn add_paths(&mut self, paths: &[PathBuf]) -> Vec<(PathBuf, RejectReason)> {
        let mut rejected = Vec::new();
        for path in paths {
            let outcome = match std::fs::metadata(path) {
                Ok(meta) if meta.is_file() => self.add(path.clone(), meta.len()),
                _ => Err(RejectReason::Unreadable),
            };
            if let Err(reason) = outcome {
                tracing::debug!(path = %path.display(), reason = reason.as_str(), "file rejected");
                rejected.push((path.clone(), reason));
            }
        }
        rejected
    }

    /// Remove a file that has not been uploaded yet. Refused while an upload
    /// request is out, since that request refers to entries by position.
    pub fn remove(&mut self, index: usize) -> bool {
        if self.is_uploading() {
            return false;
        }
        match self.entries.get(index) {
            Some(entry) if entry.status == EntryStatus::Pending => {
                self.entries.remove(index);
                true
            }
            _ => false,
        }
    }

    /// Mark every pending entry as uploading and return their indices.
    pub fn begin_upload(&mut self) -> Vec<usize> {
        let indices: Vec<usize> = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.status == EntryStatus::Pending)
            .map(|(i, _)| i)
            .collect();
        for &i in &indices {
            self.entries[i].status = EntryStatus::Uploading;
        }
        self.in_flight = indices.clone();
        self.upload_progress = 0;
        indices
    }

    /// The request failed as a whole: the files go back to pending.
    pub fn upload_failed(&mut self, indices: &[usize]) {
        for &i in indices {
            if let Some(entry) = self.entries.get_mut(i) {
                if entry.status == EntryStatus::Uploading {
                    entry.status = EntryStatus::Pending;
                }
            }
        }
        self.in_flight.clear();
        self.upload_progress = 0;
    }

    /// Attach the returned task ids to the entries that were uploaded.
    ///
    /// Per-file results are matched by file name; without them the task ids
    /// are assigned to the uploaded entries in order. Entries the server
    /// rejected, or that got no task id, end up `failed`. Returns
    /// `(entry index, task id)` for every entry that should be polled.
    pub fn apply_receipt(&mut self, indices: &[usize], receipt: &UploadReceipt) -> Vec<(usize, String)> {
        let mut assigned: Vec<Option<Result<String, String>>> = vec![None; indices.len()];

        if receipt.results.is_empty() {
            for (slot, task_id) in assigned.iter_mut().zip(&receipt.task_ids) {
                *slot = Some(Ok(task_id.clone()));
            }
        } else {
            for result in &receipt.results {
                let Some(file) = result.file.as_deref() else {
                    continue;
                };
                let slot = indices
                    .iter()
                    .zip(assigned.iter_mut())
                    .find(|(i, slot)| slot.is_none() && self.entries[**i].file_name == file)
                    .map(|(_, slot)| slot);
                if let Some(slot) = slot {
                    *slot = Some(match (&result.task_id, &result.error) {
                        (Some(task_id), _) => Ok(task_id.clone()),
                        (None, Some(error)) => Err(error.clone()),
                        (None, None) => Err("no task id returned".to_string()),
                    });
                }
            }
        }

        let mut to_poll = Vec::new();
        for (&i, slot) in indices.iter().zip(assigned) {
            let Some(entry) = self.entries.get_mut(i) else {
                continue;
            };
            match slot {
                Some(Ok(task_id)) => {
                    entry.status = EntryStatus::Processing;
                    entry.task_id = Some(task_id.clone());
                    to_poll.push((i, task_id));
                }
                Some(Err(error)) => {
                    entry.status = EntryStatus::Failed;
                    entry.error = Some(error);
                }
                None => {
                    entry.status = EntryStatus::Failed;
                    entry.error = Some("no task id returned".to_string());
                }
            }
        }
        self.in_flight.clear();
        self.upload_progress = 0;
        to_poll
    }

    /// Mark every pending entry as uploading and read the files.
    ///
    /// Files that can no longer be read are marked failed and skipped. The
    /// returned files go into one `upload_resumes` request whose outcome is
    /// handed to [`UploadQueue::finish_upload`].
    pub fn prepare_upload(&mut self) -> Result<Vec<UploadFile>, AppError> {
        if self.is_uploading() {
            return Err(AppError::new(EXIT_LOCAL, "An upload is already running."));
        }
        let mut indices = self.begin_upload();
        if indices.is_empty() {
            return Err(AppError::new(EXIT_LOCAL, "No pending files to upload."));
        }

        let mut files = Vec::with_capacity(indices.len());
        indices.retain(|&i| match UploadFile::from_path(&self.entries[i].path) {
            Ok(file) => {
                files.push(file);
                true
            }
            Err(err) => {
                self.entries[i].status = EntryStatus::Failed;
                self.entries[i].error = Some(err.message().to_string());
                false
            }
        });
        self.in_flight = indices;
        if files.is_empty() {
            return Err(AppError::new(EXIT_LOCAL, "None of the queued files could be read."));
        }
        Ok(files)
    }

    /// Settle the request started by [`UploadQueue::prepare_upload`].
    ///
    /// Returns the `(index, task id)` pairs to poll. A failed request puts the
    /// files back to pending and passes the error on.
    pub fn finish_upload(
        &mut self,
        outcome: Result<UploadReceipt, AppError>,
    ) -> Result<Vec<(usize, String)>, AppError> {
        let indices = std::mem::take(&mut self.in_flight);
        match outcome {
            Ok(receipt) => Ok(self.apply_receipt(&indices, &receipt)),
            Err(err) => {
                self.upload_failed(&indices);
                Err(err)
            }
        }
    }

    /// Upload every pending entry in one blocking request.
    ///
    /// Returns how many files were sent and the `(index, task id)` pairs to
    /// poll.
    pub fn upload<T: Transport>(
        &mut self,
        client: &ApiClient<T>,
        progress: Option<ProgressFn>,
    ) -> Result<(usize, Vec<(usize, String)>), AppError> {
        let files = self.prepare_upload()?;
        let sent = files.len();
        let outcome = client.upload_resumes(files, self.job_id, progress);
        Ok((sent, self.finish_upload(outcome)?))
    }

    /// Fold a poller event into the entry that owns its task id.
    ///
    /// A failed poll leaves the status as it was and records the error.
    /// Events for entries that were cleared away are ignored.
    pub fn apply_event(&mut self, event: &PollEvent) -> Option<&QueuedFile> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.task_id.as_deref() == Some(event.task_id()))?;
        match event {
            PollEvent::Update { status, .. } | PollEvent::Finished { status, .. } => {
                apply_status(entry, status);
            }
            PollEvent::Failed { error, .. } => {
                entry.error = Some(error.message().to_string());
            }
        }
        Some(entry)
    }

    /// Drop finished entries (completed or failed). Refused while an upload
    /// request is out.
    pub fn clear_finished(&mut self) -> bool {
        if self.is_uploading() {
            return false;
        }
        self.entries
            .retain(|e| !matches!(e.status, EntryStatus::Completed | EntryStatus::Failed));
        true
    }
}

fn apply_status(entry: &mut QueuedFile, status: &UploadStatus) {
    entry.status = status.status.into();
    entry.progress = status.progress.clamp(0.0, 100.0);
    if !status.message.is_empty() && entry.status == EntryStatus::Failed {
        entry.error = Some(status.message.clone());
    }
}

/// Display name for a path (file name only).
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::*;
    use crate::domain::UploadResult;

    fn queue_with(names: &[&str]) -> UploadQueue {
        let mut queue = UploadQueue::new();
        for name in names {
            queue.add(PathBuf::from(name), 2048).unwrap();
        }
        queue
    }

    #[test]
    fn screening_rules() {
        assert_eq!(screen_file("cv.pdf", 1024), Ok(FileType::Pdf));
        assert_eq!(screen_file("cv.DOCX", MAX_UPLOAD_BYTES), Ok(FileType::Docx));
        assert_eq!(screen_file("cv.pdf", MAX_UPLOAD_BYTES + 1), Err(RejectReason::TooLarge));
        assert_eq!(screen_file("cv.doc", 10), Err(RejectReason::UnsupportedType));
        assert_eq!(screen_file("photo.png", 10), Err(RejectReason::UnsupportedType));
    }

    #[test]
    fn sizes() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(1024), "1.0 KB");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(3 * 1024 * 1024 + 200 * 1024), "3.2 MB");
    }

    #[test]
    fn add_paths_reports_rejections() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("a.pdf");
        let bad = dir.path().join("b.txt");
        std::fs::write(&good, b"%PDF").unwrap();
        std::fs::write(&bad, b"text").unwrap();
        let missing = dir.path().join("c.pdf");

        let mut queue = UploadQueue::new();
        let rejected = queue.add_paths(&[good, bad.clone(), missing.clone()]);
        assert_eq!(queue.entries().len(), 1);
        assert_eq!(
            rejected,
            vec![
                (bad, RejectReason::UnsupportedType),
                (missing, RejectReason::Unreadable),
            ]
        );
    }

    #[test]
    fn only_pending_entries_can_be_removed() {
        let mut queue = queue_with(&["a.pdf", "b.pdf"]);
        queue.begin_upload();
        assert!(!queue.remove(0));
        queue.upload_failed(&[0, 1]);
        assert!(queue.remove(0));
        assert_eq!(queue.entries()[0].file_name, "b.pdf");
    }

    #[test]
    fn task_ids_map_onto_uploaded_entries_only() {
        let mut queue = queue_with(&["done.pdf", "a.pdf", "b.pdf"]);
        queue.entries[0].status = EntryStatus::Completed;

        let indices = queue.begin_upload();
        assert_eq!(indices, [1, 2]);
        let receipt = UploadReceipt {
            task_ids: vec!["t-a".to_string(), "t-b".to_string()],
            results: Vec::new(),
            message: String::new(),
        };
        let to_poll = queue.apply_receipt(&indices, &receipt);
        assert_eq!(to_poll, vec![(1, "t-a".to_string()), (2, "t-b".to_string())]);
        assert_eq!(queue.entries()[0].task_id, None);
        assert_eq!(queue.entries()[2].status, EntryStatus::Processing);
        assert!(!queue.is_uploading());
    }

    #[test]
    fn per_file_results_win_over_order() {
        let mut queue = queue_with(&["a.pdf", "b.pdf"]);
        let indices = queue.begin_upload();
        let receipt = UploadReceipt {
            task_ids: vec!["t-b".to_string()],
            results: vec![
                UploadResult {
                    file: Some("a.pdf".to_string()),
                    task_id: None,
                    candidate_id: None,
                    status: None,
                    error: Some("File terlalu besar (max 10MB)".to_string()),
                },
                UploadResult {
                    file: Some("b.pdf".to_string()),
                    task_id: Some("t-b".to_string()),
                    candidate_id: Some(8),
                    status: Some(ProcessingStatus::Completed),
                    error: None,
                },
            ],
            message: "1 files processed".to_string(),
        };
        let to_poll = queue.apply_receipt(&indices, &receipt);
        assert_eq!(to_poll, vec![(1, "t-b".to_string())]);
        assert_eq!(queue.entries()[0].status, EntryStatus::Failed);
        assert_eq!(
            queue.entries()[0].error.as_deref(),
            Some("File terlalu besar (max 10MB)")
        );
    }

    #[test]
    fn poll_events_update_entries() {
        let mut queue = queue_with(&["a.pdf"]);
        let indices = queue.begin_upload();
        queue.apply_receipt(
            &indices,
            &UploadReceipt {
                task_ids: vec!["t1".to_string()],
                results: Vec::new(),
                message: String::new(),
            },
        );
        let status = |s: ProcessingStatus, p: f64| UploadStatus {
            task_id: "t1".to_string(),
            status: s,
            progress: p,
            message: String::new(),
        };

        queue.apply_event(&PollEvent::Update {
            task_id: "t1".to_string(),
            status: status(ProcessingStatus::Processing, 40.0),
        });
        assert_eq!(queue.entries()[0].progress, 40.0);
        queue.apply_event(&PollEvent::Finished {
            task_id: "t1".to_string(),
            status: status(ProcessingStatus::Completed, 100.0),
        });
        assert_eq!(queue.completed_count(), 1);

        queue.apply_event(&PollEvent::Failed {
            task_id: "t1".to_string(),
            error: AppError::new(4, "timeout"),
        });
        assert_eq!(queue.entries()[0].status, EntryStatus::Completed);
        assert_eq!(queue.entries()[0].error.as_deref(), Some("timeout"));

        assert!(queue.clear_finished());
        assert!(queue.entries().is_empty());
    }

    #[test]
    fn late_events_follow_their_task_after_clearing() {
        let mut queue = queue_with(&["a.pdf", "b.pdf"]);
        let indices = queue.begin_upload();
        queue.apply_receipt(
            &indices,
            &UploadReceipt {
                task_ids: vec!["t-a".to_string(), "t-b".to_string()],
                results: Vec::new(),
                message: String::new(),
            },
        );
        let done = |task: &str| UploadStatus {
            task_id: task.to_string(),
            status: ProcessingStatus::Completed,
            progress: 100.0,
            message: String::new(),
        };

        queue.apply_event(&PollEvent::Finished { task_id: "t-a".to_string(), status: done("t-a") });
        assert!(queue.clear_finished());
        queue.add(PathBuf::from("c.pdf"), 10).unwrap();

        let hit = queue
            .apply_event(&PollEvent::Finished { task_id: "t-b".to_string(), status: done("t-b") })
            .map(|e| e.file_name.clone());
        assert_eq!(hit.as_deref(), Some("b.pdf"));
        assert_eq!(queue.entries()[0].file_name, "b.pdf");
        assert_eq!(queue.entries()[0].status, EntryStatus::Completed);
        assert_eq!(queue.entries()[1].file_name, "c.pdf");
        assert_eq!(queue.entries()[1].status, EntryStatus::Pending);

        assert!(queue
            .apply_event(&PollEvent::Finished { task_id: "t-a".to_string(), status: done("t-a") })
            .is_none());
    }

    #[test]
    fn queue_is_frozen_while_a_request_is_out() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.pdf");
        std::fs::write(&path, b"%PDF").unwrap();

        let mut queue = UploadQueue::new();
        queue.add_paths(&[path]);
        queue.add(PathBuf::from("gone.pdf"), 10).unwrap();
        let files = queue.prepare_upload().unwrap();
        assert_eq!(files.len(), 1);
        assert!(queue.is_uploading());
        assert_eq!(queue.entries()[1].status, EntryStatus::Failed);
        assert!(!queue.clear_finished());
        assert!(queue.prepare_upload().is_err());

        queue.set_upload_progress(140);
        assert_eq!(queue.upload_progress(), 100);

        let tasks = queue
            .finish_upload(Ok(UploadReceipt {
                task_ids: vec!["t1".to_string()],
                results: Vec::new(),
                message: String::new(),
            }))
            .unwrap();
        assert_eq!(tasks, vec![(0, "t1".to_string())]);
        assert!(!queue.is_uploading());
        assert_eq!(queue.upload_progress(), 0);
        assert!(queue.clear_finished());
        assert_eq!(queue.entries().len(), 1);
    }

    #[test]
    fn upload_reads_files_and_returns_tasks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cv.pdf");
        std::fs::write(&path, b"%PDF-1.4").unwrap();

        let client = authed_client("tok");
        client
            .transport()
            .push_json(200, r#"{"task_ids": ["t1"], "message": "1 files processed"}"#);

        let mut queue = UploadQueue::new();
        queue.add_paths(&[path]);
        queue.set_job(Some(3));
        let (sent, to_poll) = queue.upload(&client, None).unwrap();
        assert_eq!(sent, 1);
        assert_eq!(to_poll, vec![(0, "t1".to_string())]);
    }

    #[test]
    fn failed_request_returns_files_to_pending() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cv.pdf");
        std::fs::write(&path, b"%PDF-1.4").unwrap();

        let client = authed_client("tok");
        client.transport().push_json(500, "{}");

        let mut queue = UploadQueue::new();
        queue.add_paths(&[path]);
        assert!(queue.upload(&client, None).is_err());
        assert_eq!(queue.pending_count(), 1);
        assert!(!queue.is_uploading());

        let empty = UploadQueue::new().upload(&client, None);
        assert!(empty.is_err());
    }
}
