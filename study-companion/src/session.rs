//! Session: the active view plus the workflow instances

use study_companion_sdk::StudyClient;
use tokio::runtime::Handle;

use crate::preview::PreviewRegistry;
use crate::workflows::{
    ConversationWorkflow, MediaAnalysisWorkflow, MediaKind, MediaPhase, UploadCallback, UploadWorkflow,
};

const SPINNER: [char; 8] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧'];

/// Which workflow is on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Chat,
    Diagram,
    Equation,
}

impl ActiveView {
    pub const ALL: [ActiveView; 3] = [ActiveView::Chat, ActiveView::Diagram, ActiveView::Equation];

    pub fn title(&self) -> &'static str {
        match self {
            ActiveView::Chat => "Chat with Docs",
            ActiveView::Diagram => "Analyze Diagrams",
            ActiveView::Equation => "Solve Equations",
        }
    }

    pub fn media_kind(&self) -> Option<MediaKind> {
        match self {
            ActiveView::Chat => None,
            ActiveView::Diagram => Some(MediaKind::Diagram),
            ActiveView::Equation => Some(MediaKind::Equation),
        }
    }

    pub fn next(&self) -> Self {
        match self {
            ActiveView::Chat => ActiveView::Diagram,
            ActiveView::Diagram => ActiveView::Equation,
            ActiveView::Equation => ActiveView::Chat,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            ActiveView::Chat => ActiveView::Equation,
            ActiveView::Diagram => ActiveView::Chat,
            ActiveView::Equation => ActiveView::Diagram,
        }
    }
}

/// Composes the workflows. Switching views never touches workflow state,
/// and every workflow is polled regardless of which one is visible.
pub struct Session {
    active_view: ActiveView,
    conversation: ConversationWorkflow,
    diagram: MediaAnalysisWorkflow,
    equation: MediaAnalysisWorkflow,
    upload: UploadWorkflow,
    spinner_frame: usize,
}

impl Session {
    pub fn new(client: StudyClient, runtime: Handle, previews: PreviewRegistry) -> Self {
        Self {
            active_view: ActiveView::default(),
            conversation: ConversationWorkflow::new(client.clone(), runtime.clone()),
            diagram: MediaAnalysisWorkflow::new(MediaKind::Diagram, client.clone(), runtime.clone(), previews.clone()),
            equation: MediaAnalysisWorkflow::new(MediaKind::Equation, client.clone(), runtime.clone(), previews),
            upload: UploadWorkflow::new(client, runtime),
            spinner_frame: 0,
        }
    }

    pub fn active_view(&self) -> ActiveView {
        self.active_view
    }

    pub fn set_active_view(&mut self, view: ActiveView) {
        self.active_view = view;
    }

    pub fn next_view(&mut self) {
        self.active_view = self.active_view.next();
    }

    pub fn previous_view(&mut self) {
        self.active_view = self.active_view.previous();
    }

    /// Register the upload completion hook
    pub fn on_upload_success(&mut self, callback: UploadCallback) {
        self.upload.set_on_success(callback);
    }

    pub fn conversation(&self) -> &ConversationWorkflow {
        &self.conversation
    }

    pub fn conversation_mut(&mut self) -> &mut ConversationWorkflow {
        &mut self.conversation
    }

    pub fn upload(&self) -> &UploadWorkflow {
        &self.upload
    }

    pub fn upload_mut(&mut self) -> &mut UploadWorkflow {
        &mut self.upload
    }

    pub fn media(&self, kind: MediaKind) -> &MediaAnalysisWorkflow {
        match kind {
            MediaKind::Diagram => &self.diagram,
            MediaKind::Equation => &self.equation,
        }
    }

    pub fn media_mut(&mut self, kind: MediaKind) -> &mut MediaAnalysisWorkflow {
        match kind {
            MediaKind::Diagram => &mut self.diagram,
            MediaKind::Equation => &mut self.equation,
        }
    }

    /// The media workflow on screen, if the active view is one
    pub fn active_media_mut(&mut self) -> Option<&mut MediaAnalysisWorkflow> {
        let kind = self.active_view.media_kind()?;
        Some(self.media_mut(kind))
    }

    /// Apply finished background work for every workflow
    pub fn poll(&mut self) -> bool {
        let mut changed = self.conversation.poll();
        changed |= self.diagram.poll();
        changed |= self.equation.poll();
        changed |= self.upload.poll();
        changed
    }

    /// True while any workflow has a request in flight
    pub fn is_busy(&self) -> bool {
        self.conversation.is_awaiting_reply()
            || self.diagram.phase() == MediaPhase::Analyzing
            || self.equation.phase() == MediaPhase::Analyzing
            || self.upload.is_uploading()
    }

    /// Advance the shared busy spinner
    pub fn tick(&mut self) {
        if self.is_busy() {
            self.spinner_frame = (self.spinner_frame + 1) % SPINNER.len();
        }
    }

    pub fn spinner_char(&self) -> char {
        SPINNER[self.spinner_frame]
    }
}
