//! Request payloads

use std::path::Path;
use std::sync::Arc;

/// An in-memory file ready to be submitted as a multipart `file` part.
///
/// Cloning is cheap; the bytes are shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHandle {
    name: String,
    mime: String,
    bytes: Arc<[u8]>,
}

impl FileHandle {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            bytes: Arc::from(bytes.into()),
        }
    }

    /// Load a file from disk, guessing its MIME type from the extension
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        Ok(Self::from_parts(path, bytes))
    }

    /// Async variant of [`FileHandle::from_path`]
    pub async fn read(path: &Path) -> std::io::Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        Ok(Self::from_parts(path, bytes))
    }

    fn from_parts(path: &Path, bytes: Vec<u8>) -> Self {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload")
            .to_string();
        let mime = mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        Self::new(name, mime, bytes)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn is_image(&self) -> bool {
        self.mime.starts_with("image/")
    }
}

/// Body shapes the backend accepts
#[derive(Debug, Clone)]
pub enum Payload {
    /// No body (GET endpoints)
    Empty,
    /// JSON document
    Json(serde_json::Value),
    /// Multipart form with a single `file` part
    File(FileHandle),
}
