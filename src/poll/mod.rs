//! Upload status polling.
//!
//! Every task id returned by an upload gets its own poller. A poller waits one
//! interval, fetches the task status, and repeats until the status is
//! terminal (`completed`/`failed`), a request fails, or it is cancelled.
//! There is no retry and no backoff.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use crate::api::{ApiClient, Transport};
use crate::domain::UploadStatus;
use crate::error::AppError;

#[derive(Debug, Clone)]
pub enum PollOutcome {
    Finished(UploadStatus),
    Failed(AppError),
    Cancelled,
}

/// Progress reported by a background poller, tagged with the task it polls.
#[derive(Debug, Clone)]
pub enum PollEvent {
    Update { task_id: String, status: UploadStatus },
    Finished { task_id: String, status: UploadStatus },
    Failed { task_id: String, error: AppError },
}

impl PollEvent {
    pub fn task_id(&self) -> &str {
        match self {
            PollEvent::Update { task_id, .. }
            | PollEvent::Finished { task_id, .. }
            | PollEvent::Failed { task_id, .. } => task_id,
        }
    }

    /// No further events follow for this task.
    pub fn is_last(&self) -> bool {
        !matches!(self, PollEvent::Update { .. })
    }
}

pub struct StatusPoller<'a, T: Transport> {
    client: &'a ApiClient<T>,
    interval: Duration,
}

impl<'a, T: Transport> StatusPoller<'a, T> {
    pub fn new(client: &'a ApiClient<T>, interval: Duration) -> Self {
        Self { client, interval }
    }

    /// Poll `task_id` until it settles.
    ///
    /// A message on `stop`, or its sender going away, cancels the poller at
    /// the next tick. `on_update` sees every fetched status, the terminal one
    /// included.
    pub fn poll<F>(&self, task_id: &str, stop: &Receiver<()>, mut on_update: F) -> PollOutcome
    where
        F: FnMut(&UploadStatus),
    {
        let mut ticks = 0u64;
        loop {
            match stop.recv_timeout(self.interval) {
                Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                    tracing::debug!(task_id, ticks, "poller cancelled");
                    return PollOutcome::Cancelled;
                }
                Err(RecvTimeoutError::Timeout) => {}
            }
            ticks += 1;

            match self.client.upload_status(task_id) {
                Ok(status) => {
                    on_update(&status);
                    if status.status.is_terminal() {
                        tracing::debug!(task_id, ticks, status = status.status.as_str(), "poller done");
                        return PollOutcome::Finished(status);
                    }
                }
                Err(err) => {
                    tracing::warn!(task_id, error = %err, "status poll failed");
                    return PollOutcome::Failed(err);
                }
            }
        }
    }
}

/// A running background poller.
///
/// Dropping the handle cancels the poller at its next tick without waiting
/// for the thread.
pub struct PollHandle {
    stop: Option<Sender<()>>,
    thread: Option<JoinHandle<()>>,
}

impl PollHandle {
    /// Cancel and wait for the thread to exit.
    pub fn cancel(mut self) {
        self.stop.take();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }

    /// Wait for the poller to settle on its own.
    pub fn join(mut self) {
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }

    pub fn is_finished(&self) -> bool {
        self.thread.as_ref().is_none_or(JoinHandle::is_finished)
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.stop.take();
    }
}

/// Start a poller thread that reports through `events`.
pub fn spawn_poller<T>(
    client: Arc<ApiClient<T>>,
    task_id: String,
    interval: Duration,
    events: Sender<PollEvent>,
) -> PollHandle
where
    T: Transport + 'static,
{
    let (stop_tx, stop_rx) = mpsc::channel::<()>();
    let thread = std::thread::spawn(move || {
        let poller = StatusPoller::new(&client, interval);
        let outcome = poller.poll(&task_id, &stop_rx, |status| {
            if !status.status.is_terminal() {
                let _ = events.send(PollEvent::Update {
                    task_id: task_id.clone(),
                    status: status.clone(),
                });
            }
        });
        let last = match outcome {
            PollOutcome::Finished(status) => PollEvent::Finished { task_id, status },
            PollOutcome::Failed(error) => PollEvent::Failed { task_id, error },
            PollOutcome::Cancelled => return,
        };
        let _ = events.send(last);
    });
    PollHandle {
        stop: Some(stop_tx),
        thread: Some(thread),
    }
}
