//! Terminal application state
//!
//! The App owns the [`Session`] plus the UI-only pieces around it: the
//! notification stack, the file browser overlay and the corpus listing.
//! Key handling lives in `navigation`.

use std::path::{Path, PathBuf};

use study_companion_sdk::{FileHandle, StudyClient};
use tokio::runtime::Handle;
use tokio::sync::mpsc;

use crate::preview::PreviewRegistry;
use crate::session::Session;
use crate::workflows::{MediaKind, Outcome};

mod commands;
mod documents;
mod file_browser;
mod navigation;
mod notifications;

pub use commands::AppCommand;
pub use documents::CorpusListing;
pub use file_browser::{is_image_path, BrowseTarget, FileBrowser};
pub use notifications::{Notification, NotificationLevel, NotificationManager};

pub struct App {
    pub session: Session,
    pub notifications: NotificationManager,
    pub file_browser: FileBrowser,
    pub documents: CorpusListing,
    pub previews: PreviewRegistry,
    pub backend_url: String,
    pub should_quit: bool,
    commands_rx: mpsc::UnboundedReceiver<AppCommand>,
}

impl App {
    pub fn new(backend_url: impl Into<String>, client: StudyClient, runtime: Handle) -> Self {
        let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("/"));
        let previews = PreviewRegistry::new();
        let (tx, commands_rx) = mpsc::unbounded_channel();

        let mut session = Session::new(client.clone(), runtime.clone(), previews.clone());
        session.on_upload_success(Box::new(move |file_name| {
            let _ = tx.send(AppCommand::ShowNotification {
                level: NotificationLevel::Success,
                title: "Upload complete".to_string(),
                message: format!("{} was added to your study material", file_name),
            });
            let _ = tx.send(AppCommand::RefreshDocuments);
        }));

        let mut app = Self {
            session,
            notifications: NotificationManager::new(),
            file_browser: FileBrowser::new(current_dir),
            documents: CorpusListing::new(client, runtime),
            previews,
            backend_url: backend_url.into(),
            should_quit: false,
            commands_rx,
        };
        app.documents.refresh();
        app
    }

    /// Called once per UI frame: apply finished background work
    pub fn tick(&mut self) {
        let was_uploading = self.session.upload().is_uploading();
        self.session.poll();
        self.session.tick();

        if was_uploading && !self.session.upload().is_uploading() {
            if let Some(attempt) = self.session.upload().last_attempt() {
                if attempt.outcome == Outcome::Failure {
                    let message = format!("{}: {}", attempt.file_name, attempt.detail);
                    self.notifications.error("Upload failed", message);
                }
            }
        }

        if let Some(error) = self.documents.poll() {
            self.notifications.warning("Could not load documents", error);
        }

        self.process_commands();
        self.notifications.cleanup_expired();
    }

    fn process_commands(&mut self) {
        while let Ok(command) = self.commands_rx.try_recv() {
            match command {
                AppCommand::ShowNotification { level, title, message } => {
                    self.notifications.push(level, title, message);
                }
                AppCommand::RefreshDocuments => self.documents.refresh(),
            }
        }
    }

    fn load_file(&mut self, path: &Path) -> Option<FileHandle> {
        match FileHandle::from_path(path) {
            Ok(file) => Some(file),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "cannot read file");
                self.notifications.error("Cannot open file", format!("{}: {}", path.display(), e));
                None
            }
        }
    }

    /// Upload a file from disk, as dropping it on the upload area does
    pub fn upload_path(&mut self, path: &Path) {
        if self.session.upload().is_uploading() {
            self.notifications.warning("Upload in progress", "Wait for the current upload to finish");
            return;
        }
        if let Some(file) = self.load_file(path) {
            self.session.upload_mut().drop_file(file);
        }
    }

    /// Make an image on disk the selection of a media workflow
    pub fn select_media_path(&mut self, kind: MediaKind, path: &Path) {
        if !is_image_path(path) {
            self.notifications.warning("Not an image", format!("{} is not a PNG, JPG or WEBP image", path.display()));
            return;
        }
        if let Some(file) = self.load_file(path) {
            self.session.media_mut(kind).select(file);
        }
    }

    pub fn open_file_browser(&mut self, target: BrowseTarget) {
        self.file_browser.open(target);
    }

    fn apply_browsed_file(&mut self, target: BrowseTarget, path: &Path) {
        match target {
            BrowseTarget::Upload => self.upload_path(path),
            BrowseTarget::Media(kind) => self.select_media_path(kind, path),
        }
    }
}
