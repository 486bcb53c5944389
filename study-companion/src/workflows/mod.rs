//! The user-facing workflows
//!
//! Each workflow owns its state exclusively and is mutated only through its
//! own methods. Network calls run on a tokio runtime handle; results come
//! back over the workflow's channel and are applied by `poll()` (UI tick)
//! or `wait_for_response()` (headless mode, tests).

pub mod conversation;
pub mod media;
pub mod upload;

pub use conversation::{ConversationPhase, ConversationWorkflow, Message, Speaker, APOLOGY, GREETING};
pub use media::{MediaAnalysisWorkflow, MediaKind, MediaPhase, ReplyOutcome};
pub use upload::{Outcome, UploadAttempt, UploadCallback, UploadStatus, UploadWorkflow, UPLOAD_FAILED};
