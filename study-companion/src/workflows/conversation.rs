//! Conversation workflow: question/answer turns against the study corpus

use std::cell::Cell;
use std::time::Instant;

use study_companion_sdk::{ChatReply, StudyClient, TransportResult};
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

pub const GREETING: &str =
    "Hello! I am your Computer Vision study assistant. Upload a chapter or book, and ask me anything about it.";

/// Shown in place of an answer when the chat request fails
pub const APOLOGY: &str = "Sorry, I encountered an error processing your request.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    User,
    Assistant,
}

/// One entry of the message log. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    role: Speaker,
    content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Speaker::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Speaker::Assistant,
            content: content.into(),
        }
    }

    pub fn role(&self) -> Speaker {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationPhase {
    Idle,
    AwaitingReply,
}

/// Chat state: append-only message log, input buffer and at most one
/// request in flight
pub struct ConversationWorkflow {
    messages: Vec<Message>,
    input: String,
    phase: ConversationPhase,
    last_error: Option<String>,
    client: StudyClient,
    runtime: Handle,
    reply_tx: mpsc::UnboundedSender<TransportResult<ChatReply>>,
    reply_rx: mpsc::UnboundedReceiver<TransportResult<ChatReply>>,
    request_started: Option<Instant>,
    /// Lines scrolled up from the newest message; 0 follows the tail
    scroll_from_bottom: u16,
    /// Largest useful `scroll_from_bottom`, set by the renderer
    scroll_limit: Cell<u16>,
}

impl ConversationWorkflow {
    pub fn new(client: StudyClient, runtime: Handle) -> Self {
        let (reply_tx, reply_rx) = mpsc::unbounded_channel();
        Self {
            messages: vec![Message::assistant(GREETING)],
            input: String::new(),
            phase: ConversationPhase::Idle,
            last_error: None,
            client,
            runtime,
            reply_tx,
            reply_rx,
            request_started: None,
            scroll_from_bottom: 0,
            scroll_limit: Cell::new(u16::MAX),
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn phase(&self) -> ConversationPhase {
        self.phase
    }

    pub fn is_awaiting_reply(&self) -> bool {
        self.phase == ConversationPhase::AwaitingReply
    }

    /// Error behind the most recent apology, if the last request failed
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn push_char(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn push_str(&mut self, text: &str) {
        self.input.push_str(text);
    }

    pub fn backspace(&mut self) {
        self.input.pop();
    }

    /// Whether the current input would be accepted by [`Self::submit_input`]
    pub fn can_submit(&self) -> bool {
        self.phase == ConversationPhase::Idle && !self.input.trim().is_empty()
    }

    /// Submit whatever is in the input buffer
    pub fn submit_input(&mut self) -> bool {
        let text = self.input.clone();
        self.submit(&text)
    }

    /// Append the user turn and ask the backend.
    ///
    /// Returns `false` without touching any state when `text` is blank or a
    /// reply is still pending.
    pub fn submit(&mut self, text: &str) -> bool {
        let query = text.trim();
        if query.is_empty() {
            return false;
        }
        if self.phase == ConversationPhase::AwaitingReply {
            debug!("chat submit ignored: reply pending");
            return false;
        }

        self.append(Message::user(query));
        self.input.clear();
        self.phase = ConversationPhase::AwaitingReply;
        self.last_error = None;
        self.request_started = Some(Instant::now());
        info!(chars = query.len(), "chat query submitted");

        let client = self.client.clone();
        let tx = self.reply_tx.clone();
        let query = query.to_string();
        self.runtime.spawn(async move {
            let result = client.chat(&query).await;
            // Receiver lives as long as the workflow
            let _ = tx.send(result);
        });

        true
    }

    /// Apply a finished reply, if any (non-blocking)
    pub fn poll(&mut self) -> bool {
        let mut applied = false;
        while let Ok(result) = self.reply_rx.try_recv() {
            applied |= self.apply(result);
        }
        applied
    }

    /// Wait until the pending reply arrives and apply it.
    /// Returns `false` immediately when nothing is pending.
    pub async fn wait_for_response(&mut self) -> bool {
        if self.phase != ConversationPhase::AwaitingReply {
            return false;
        }
        match self.reply_rx.recv().await {
            Some(result) => self.apply(result),
            None => false,
        }
    }

    fn apply(&mut self, result: TransportResult<ChatReply>) -> bool {
        if self.phase != ConversationPhase::AwaitingReply {
            debug!("chat reply discarded: nothing pending");
            return false;
        }

        match result {
            Ok(reply) => {
                info!(chars = reply.response.len(), "chat reply received");
                self.append(Message::assistant(reply.response));
            }
            Err(e) => {
                warn!(error = %e, "chat request failed");
                self.last_error = Some(e.to_string());
                self.append(Message::assistant(APOLOGY));
            }
        }
        self.phase = ConversationPhase::Idle;
        self.request_started = None;
        true
    }

    fn append(&mut self, message: Message) {
        self.messages.push(message);
        self.scroll_to_bottom();
    }

    // Scrolling

    pub fn scroll_from_bottom(&self) -> u16 {
        self.scroll_from_bottom
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll_from_bottom = self
            .scroll_from_bottom
            .saturating_add(lines)
            .min(self.scroll_limit.get());
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll_from_bottom = self.scroll_from_bottom.saturating_sub(lines);
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_from_bottom = 0;
    }

    /// How far up the rendered log can scroll; `scroll_up` stops there
    pub fn set_scroll_limit(&self, limit: u16) {
        self.scroll_limit.set(limit);
    }

    /// Scroll position clamped to the last recorded limit
    pub fn effective_scroll(&self) -> u16 {
        self.scroll_from_bottom.min(self.scroll_limit.get())
    }

    pub fn elapsed_seconds(&self) -> Option<u64> {
        self.request_started.map(|start| start.elapsed().as_secs())
    }
}
