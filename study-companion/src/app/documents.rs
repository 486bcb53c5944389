//! Sidebar listing of the documents the backend has indexed

use study_companion_sdk::{DocumentList, StudyClient, TransportResult};
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::{debug, warn};

pub struct CorpusListing {
    client: StudyClient,
    runtime: Handle,
    names: Vec<String>,
    loading: bool,
    /// A refresh asked for while a fetch was in flight
    refresh_queued: bool,
    error: Option<String>,
    tx: mpsc::UnboundedSender<TransportResult<DocumentList>>,
    rx: mpsc::UnboundedReceiver<TransportResult<DocumentList>>,
}

impl CorpusListing {
    pub fn new(client: StudyClient, runtime: Handle) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            client,
            runtime,
            names: Vec::new(),
            loading: false,
            refresh_queued: false,
            error: None,
            tx,
            rx,
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Start a fetch. While one is running, another is queued to follow it
    /// so the listing reflects changes made mid-flight.
    pub fn refresh(&mut self) {
        if self.loading {
            debug!("document list fetch in flight, queueing another");
            self.refresh_queued = true;
            return;
        }
        self.start_fetch();
    }

    fn start_fetch(&mut self) {
        self.loading = true;
        debug!("refreshing document list");

        let client = self.client.clone();
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let _ = tx.send(client.documents().await);
        });
    }

    /// Apply a finished fetch. Returns the error text when it failed.
    pub fn poll(&mut self) -> Option<String> {
        let mut failure = None;
        while let Ok(result) = self.rx.try_recv() {
            self.loading = false;
            match result {
                Ok(list) => {
                    self.names = list.names();
                    self.error = None;
                }
                Err(e) => {
                    warn!(error = %e, "document list fetch failed");
                    let message = e.detail().map(str::to_string).unwrap_or_else(|| e.to_string());
                    self.error = Some(message.clone());
                    failure = Some(message);
                }
            }
        }
        if !self.loading && self.refresh_queued {
            self.refresh_queued = false;
            self.start_fetch();
        }
        failure
    }
}
