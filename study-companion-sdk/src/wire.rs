//! JSON bodies exchanged with the backend

use serde::{Deserialize, Serialize};

/// Body of `POST /chat`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub query: String,
}

/// Reply of `POST /chat`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
}

/// Reply of `POST /parse-diagram`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagramReply {
    pub explanation: String,
}

/// Reply of `POST /solve-equation`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquationReply {
    pub solution: String,
}

/// Reply of `POST /upload`. The body is backend-defined; only the optional
/// human-readable message is picked out.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UploadAck {
    #[serde(default)]
    pub message: Option<String>,
}

/// Reply of `GET /health`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy")
    }
}

/// Reply of `GET /documents`.
///
/// The backend returns a JSON array whose entries are usually bare file
/// names; object entries are tolerated and shown by their `name`/`filename`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentList(pub Vec<serde_json::Value>);

impl DocumentList {
    pub fn names(&self) -> Vec<String> {
        self.0
            .iter()
            .map(|entry| match entry {
                serde_json::Value::String(name) => name.clone(),
                serde_json::Value::Object(map) => map
                    .get("name")
                    .or_else(|| map.get("filename"))
                    .and_then(|v| v.as_str())
                    .map(str::to_string)
                    .unwrap_or_else(|| entry.to_string()),
                other => other.to_string(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
