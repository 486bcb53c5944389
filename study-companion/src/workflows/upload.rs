//! Upload workflow: send study material to the retrieval corpus

use std::time::Instant;

use study_companion_sdk::{FileHandle, StudyClient, TransportResult, UploadAck};
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Shown for every failed upload. Backend detail is logged, not displayed.
pub const UPLOAD_FAILED: &str = "Upload failed. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStatus {
    Idle,
    Uploading,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
}

/// Result of the most recent upload; replaced by the next one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadAttempt {
    pub file_name: String,
    pub outcome: Outcome,
    pub detail: String,
}

/// Invoked with the uploaded file's name after each successful upload
pub type UploadCallback = Box<dyn FnMut(&str) + Send>;

struct Completion {
    file_name: String,
    result: TransportResult<UploadAck>,
}

pub struct UploadWorkflow {
    client: StudyClient,
    runtime: Handle,
    pending: Option<FileHandle>,
    in_flight: Option<String>,
    status: UploadStatus,
    last_attempt: Option<UploadAttempt>,
    on_success: Option<UploadCallback>,
    done_tx: mpsc::UnboundedSender<Completion>,
    done_rx: mpsc::UnboundedReceiver<Completion>,
    started: Option<Instant>,
}

impl UploadWorkflow {
    pub fn new(client: StudyClient, runtime: Handle) -> Self {
        let (done_tx, done_rx) = mpsc::unbounded_channel();
        Self {
            client,
            runtime,
            pending: None,
            in_flight: None,
            status: UploadStatus::Idle,
            last_attempt: None,
            on_success: None,
            done_tx,
            done_rx,
            started: None,
        }
    }

    pub fn set_on_success(&mut self, callback: UploadCallback) {
        self.on_success = Some(callback);
    }

    pub fn status(&self) -> UploadStatus {
        self.status
    }

    pub fn is_uploading(&self) -> bool {
        self.status == UploadStatus::Uploading
    }

    pub fn pending_file(&self) -> Option<&FileHandle> {
        self.pending.as_ref()
    }

    /// Name of the file currently being uploaded
    pub fn in_flight(&self) -> Option<&str> {
        self.in_flight.as_deref()
    }

    pub fn last_attempt(&self) -> Option<&UploadAttempt> {
        self.last_attempt.as_ref()
    }

    pub fn elapsed_seconds(&self) -> Option<u64> {
        self.started.map(|start| start.elapsed().as_secs())
    }

    /// Make `file` the next upload target. No type or size checks.
    pub fn select_file(&mut self, file: FileHandle) {
        debug!(file = file.name(), bytes = file.len(), "upload target selected");
        self.pending = Some(file);
    }

    /// Start uploading the pending file. Returns `false` when an upload is
    /// already running or nothing is selected.
    pub fn submit(&mut self) -> bool {
        if self.status == UploadStatus::Uploading {
            debug!("upload submit ignored: upload in flight");
            return false;
        }
        let Some(file) = self.pending.take() else {
            return false;
        };

        let file_name = file.name().to_string();
        info!(file = %file_name, bytes = file.len(), "upload started");
        self.status = UploadStatus::Uploading;
        self.last_attempt = None;
        self.in_flight = Some(file_name.clone());
        self.started = Some(Instant::now());

        let client = self.client.clone();
        let tx = self.done_tx.clone();
        self.runtime.spawn(async move {
            let result = client.upload(file).await;
            let _ = tx.send(Completion { file_name, result });
        });

        true
    }

    /// Select and submit in one step, as a drop onto the upload area does
    pub fn drop_file(&mut self, file: FileHandle) -> bool {
        if self.status == UploadStatus::Uploading {
            debug!(file = file.name(), "drop ignored: upload in flight");
            return false;
        }
        self.select_file(file);
        self.submit()
    }

    pub fn poll(&mut self) -> bool {
        let mut applied = false;
        while let Ok(completion) = self.done_rx.try_recv() {
            self.apply(completion);
            applied = true;
        }
        applied
    }

    pub async fn wait_for_response(&mut self) -> bool {
        if self.status != UploadStatus::Uploading {
            return false;
        }
        match self.done_rx.recv().await {
            Some(completion) => {
                self.apply(completion);
                true
            }
            None => false,
        }
    }

    fn apply(&mut self, completion: Completion) {
        let Completion { file_name, result } = completion;
        let attempt = match result {
            Ok(ack) => {
                info!(file = %file_name, ack = ?ack.message, "upload succeeded");
                UploadAttempt {
                    detail: format!("Successfully uploaded {}", file_name),
                    file_name,
                    outcome: Outcome::Success,
                }
            }
            Err(e) => {
                warn!(file = %file_name, error = %e, "upload failed");
                UploadAttempt {
                    detail: UPLOAD_FAILED.to_string(),
                    file_name,
                    outcome: Outcome::Failure,
                }
            }
        };

        self.status = UploadStatus::Done;
        self.in_flight = None;
        self.started = None;

        if attempt.outcome == Outcome::Success {
            if let Some(callback) = self.on_success.as_mut() {
                callback(&attempt.file_name);
            }
        }
        self.last_attempt = Some(attempt);
    }
}
