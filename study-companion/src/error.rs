//! Client-side error taxonomy

use std::path::PathBuf;

use study_companion_sdk::TransportError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StudyError {
    /// Rejected before reaching the network (e.g. a blank question)
    #[error("invalid input: {0}")]
    Validation(String),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("cannot read {}: {source}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The workflow finished in its failure state; carries the text the
    /// user would see
    #[error("{0}")]
    Rejected(String),

    #[error("unknown error: {0}")]
    Unknown(String),
}

pub type StudyResult<T> = Result<T, StudyError>;
