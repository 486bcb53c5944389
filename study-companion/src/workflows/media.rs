//! Single-image analysis workflow, shared by the diagram parser and the
//! equation solver

use study_companion_sdk::{Endpoint, FileHandle, StudyClient, TransportResult};
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::preview::{PreviewHandle, PreviewRegistry};

/// Which analysis a workflow instance performs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Diagram,
    Equation,
}

impl MediaKind {
    pub fn endpoint(&self) -> Endpoint {
        match self {
            MediaKind::Diagram => Endpoint::ParseDiagram,
            MediaKind::Equation => Endpoint::SolveEquation,
        }
    }

    /// Send `file` to this kind's endpoint and pull out the result text
    pub async fn request(self, client: &StudyClient, file: FileHandle) -> TransportResult<String> {
        match self {
            MediaKind::Diagram => client.parse_diagram(file).await.map(|reply| reply.explanation),
            MediaKind::Equation => client.solve_equation(file).await.map(|reply| reply.solution),
        }
    }

    /// Shown when the backend gives no detail
    pub fn generic_error(&self) -> &'static str {
        match self {
            MediaKind::Diagram => "Failed to parse diagram. Please try again.",
            MediaKind::Equation => "Failed to solve equation. Please try again.",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            MediaKind::Diagram => "Diagram Parser",
            MediaKind::Equation => "Equation Solver",
        }
    }

    pub fn action_label(&self) -> &'static str {
        match self {
            MediaKind::Diagram => "Parse Diagram",
            MediaKind::Equation => "Solve Equation",
        }
    }

    pub fn busy_label(&self) -> &'static str {
        match self {
            MediaKind::Diagram => "Analyzing Diagram...",
            MediaKind::Equation => "Solving Equation...",
        }
    }

    pub fn result_heading(&self) -> &'static str {
        match self {
            MediaKind::Diagram => "Analysis Result",
            MediaKind::Equation => "Solution",
        }
    }

    pub fn empty_prompt(&self) -> &'static str {
        match self {
            MediaKind::Diagram => "Upload Diagram",
            MediaKind::Equation => "Upload Equation",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaPhase {
    Empty,
    Ready,
    Analyzing,
    Complete,
    Failed,
}

/// What happened to a reply taken off the channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyOutcome {
    Applied,
    /// Issued under an older generation; dropped
    Discarded,
}

struct Reply {
    generation: u64,
    result: TransportResult<String>,
}

/// Select → preview → analyze → result/error, for one image at a time.
///
/// Every selection change and every analyze call bumps `generation`; a reply
/// only lands if it was issued under the current generation.
pub struct MediaAnalysisWorkflow {
    kind: MediaKind,
    client: StudyClient,
    runtime: Handle,
    previews: PreviewRegistry,
    selected: Option<FileHandle>,
    preview: Option<PreviewHandle>,
    phase: MediaPhase,
    result: Option<String>,
    error: Option<String>,
    generation: u64,
    reply_tx: mpsc::UnboundedSender<Reply>,
    reply_rx: mpsc::UnboundedReceiver<Reply>,
    result_scroll: u16,
}

impl MediaAnalysisWorkflow {
    pub fn new(kind: MediaKind, client: StudyClient, runtime: Handle, previews: PreviewRegistry) -> Self {
        let (reply_tx, reply_rx) = mpsc::unbounded_channel();
        Self {
            kind,
            client,
            runtime,
            previews,
            selected: None,
            preview: None,
            phase: MediaPhase::Empty,
            result: None,
            error: None,
            generation: 0,
            reply_tx,
            reply_rx,
            result_scroll: 0,
        }
    }

    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    pub fn phase(&self) -> MediaPhase {
        self.phase
    }

    pub fn selected_file(&self) -> Option<&FileHandle> {
        self.selected.as_ref()
    }

    pub fn preview(&self) -> Option<&PreviewHandle> {
        self.preview.as_ref()
    }

    pub fn result(&self) -> Option<&str> {
        self.result.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn can_analyze(&self) -> bool {
        self.phase == MediaPhase::Ready && self.selected.is_some()
    }

    /// Replace the selection. Any previous preview is released before the
    /// new one is built; any previous result or error is discarded.
    pub fn select(&mut self, file: FileHandle) {
        self.generation += 1;
        self.release_preview();

        info!(kind = ?self.kind, file = file.name(), bytes = file.len(), "image selected");
        self.preview = Some(self.previews.create(&file));
        self.selected = Some(file);
        self.result = None;
        self.error = None;
        self.result_scroll = 0;
        self.phase = MediaPhase::Ready;
    }

    /// Drop the selection and everything derived from it
    pub fn clear(&mut self) {
        self.generation += 1;
        self.release_preview();

        self.selected = None;
        self.result = None;
        self.error = None;
        self.result_scroll = 0;
        self.phase = MediaPhase::Empty;
        debug!(kind = ?self.kind, "selection cleared");
    }

    /// Submit the selected image. Returns `false` (and sends nothing)
    /// unless the workflow is `Ready`.
    pub fn analyze(&mut self) -> bool {
        if !self.can_analyze() {
            debug!(kind = ?self.kind, phase = ?self.phase, "analyze ignored");
            return false;
        }
        let Some(file) = self.selected.clone() else {
            return false;
        };

        self.generation += 1;
        let generation = self.generation;
        self.phase = MediaPhase::Analyzing;
        self.result = None;
        self.error = None;
        info!(endpoint = %self.kind.endpoint(), file = file.name(), generation, "analysis started");

        let client = self.client.clone();
        let tx = self.reply_tx.clone();
        let kind = self.kind;
        self.runtime.spawn(async move {
            let result = kind.request(&client, file).await;
            let _ = tx.send(Reply { generation, result });
        });

        true
    }

    /// Apply any finished replies (non-blocking)
    pub fn poll(&mut self) -> bool {
        let mut applied = false;
        while let Ok(reply) = self.reply_rx.try_recv() {
            applied |= self.apply(reply) == ReplyOutcome::Applied;
        }
        applied
    }

    /// Wait for the next reply, whichever generation it belongs to, and
    /// apply or discard it
    pub async fn next_reply(&mut self) -> Option<ReplyOutcome> {
        let reply = self.reply_rx.recv().await?;
        Some(self.apply(reply))
    }

    /// Wait until the current analysis settles. Stale replies that arrive
    /// first are discarded. Returns `false` when nothing is in flight.
    pub async fn wait_for_response(&mut self) -> bool {
        while self.phase == MediaPhase::Analyzing {
            match self.next_reply().await {
                Some(ReplyOutcome::Applied) => return true,
                Some(ReplyOutcome::Discarded) => continue,
                None => return false,
            }
        }
        false
    }

    fn apply(&mut self, reply: Reply) -> ReplyOutcome {
        if reply.generation != self.generation || self.phase != MediaPhase::Analyzing {
            debug!(
                kind = ?self.kind,
                reply_generation = reply.generation,
                current_generation = self.generation,
                "stale reply discarded"
            );
            return ReplyOutcome::Discarded;
        }

        match reply.result {
            Ok(text) => {
                info!(kind = ?self.kind, chars = text.len(), "analysis complete");
                self.result = Some(text);
                self.phase = MediaPhase::Complete;
            }
            Err(e) => {
                warn!(kind = ?self.kind, error = %e, "analysis failed");
                let message = e
                    .detail()
                    .map(str::to_string)
                    .unwrap_or_else(|| self.kind.generic_error().to_string());
                self.error = Some(message);
                self.phase = MediaPhase::Failed;
            }
        }
        ReplyOutcome::Applied
    }

    fn release_preview(&mut self) {
        if let Some(preview) = self.preview.take() {
            preview.release();
        }
    }

    // Result pane scrolling

    pub fn result_scroll(&self) -> u16 {
        self.result_scroll
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.result_scroll = self.result_scroll.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.result_scroll = self.result_scroll.saturating_add(lines);
    }
}
