// Workflows over the study backend: upload, chat, image analysis
pub mod workflows;

// Preview resources for selected images
pub mod preview;

// Active view plus workflow instances
pub mod session;

// Configuration, logging and errors
pub mod config;
pub mod error;
pub mod logging;

// Terminal application and rendering
pub mod app;
pub mod ui;

// One-shot commands
pub mod headless;

pub use error::{StudyError, StudyResult};
pub use session::{ActiveView, Session};
