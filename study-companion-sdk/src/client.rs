//! Transport seam and its reqwest implementation

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::endpoint::Endpoint;
use crate::error::{extract_detail, TransportError, TransportResult};
use crate::payload::{FileHandle, Payload};
use crate::wire::{
    ChatReply, ChatRequest, DiagramReply, DocumentList, EquationReply, HealthStatus, UploadAck,
};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Raw request/response exchange with the backend.
///
/// One call is one request; implementations never retry. Non-2xx answers
/// must come back as [`TransportError::Status`].
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, endpoint: Endpoint, payload: Payload) -> TransportResult<serde_json::Value>;
}

/// HTTP transport backed by reqwest
pub struct HttpTransport {
    base_url: String,
    client: reqwest::Client,
}

impl HttpTransport {
    /// `timeout` bounds each whole request; `None` waits as long as the
    /// backend takes.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> TransportResult<Self> {
        let parsed = reqwest::Url::parse(base_url)
            .map_err(|e| TransportError::InvalidRequest(format!("bad base URL '{}': {}", base_url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(TransportError::InvalidRequest(format!(
                "base URL must be http or https, got '{}'",
                base_url
            )));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| TransportError::InvalidRequest(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }

    fn file_form(file: &FileHandle) -> TransportResult<Form> {
        let part = Part::bytes(file.bytes().to_vec())
            .file_name(file.name().to_string())
            .mime_str(file.mime())
            .map_err(|e| TransportError::InvalidRequest(format!("bad MIME type '{}': {}", file.mime(), e)))?;
        Ok(Form::new().part("file", part))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, endpoint: Endpoint, payload: Payload) -> TransportResult<serde_json::Value> {
        let url = self.url_for(endpoint);
        let mut request = self.client.request(endpoint.method(), &url);

        request = match &payload {
            Payload::Empty => request,
            Payload::Json(body) => request.json(body),
            Payload::File(file) => {
                debug!(file = file.name(), bytes = file.len(), mime = file.mime(), "attaching file");
                request.multipart(Self::file_form(file)?)
            }
        };

        debug!(%endpoint, %url, "sending request");
        let response = request
            .send()
            .await
            .map_err(|source| TransportError::Network { endpoint, source })?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|source| TransportError::Network { endpoint, source })?;

        if !status.is_success() {
            let detail = extract_detail(&body);
            warn!(%endpoint, status = status.as_u16(), detail = ?detail, "backend returned an error");
            return Err(TransportError::Status {
                endpoint,
                status: status.as_u16(),
                detail,
            });
        }

        if body.is_empty() {
            return Ok(serde_json::Value::Null);
        }

        // Acks may be plain text; callers decide whether they need JSON
        match serde_json::from_slice(&body) {
            Ok(value) => Ok(value),
            Err(_) => Ok(serde_json::Value::String(String::from_utf8_lossy(&body).into_owned())),
        }
    }
}

/// Typed operations over a [`Transport`]
#[derive(Clone)]
pub struct StudyClient {
    transport: Arc<dyn Transport>,
}

impl StudyClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Client talking HTTP to `base_url`
    pub fn http(base_url: &str, timeout: Option<Duration>) -> TransportResult<Self> {
        Ok(Self::new(Arc::new(HttpTransport::new(base_url, timeout)?)))
    }

    pub async fn upload(&self, file: FileHandle) -> TransportResult<UploadAck> {
        let value = self.transport.send(Endpoint::Upload, Payload::File(file)).await?;
        // The ack body is opaque; a 2xx is what counts.
        Ok(serde_json::from_value(value).unwrap_or_default())
    }

    pub async fn chat(&self, query: &str) -> TransportResult<ChatReply> {
        let body = serde_json::to_value(ChatRequest {
            query: query.to_string(),
        })
        .map_err(|e| TransportError::InvalidRequest(e.to_string()))?;
        self.call(Endpoint::Chat, Payload::Json(body)).await
    }

    pub async fn parse_diagram(&self, file: FileHandle) -> TransportResult<DiagramReply> {
        self.call(Endpoint::ParseDiagram, Payload::File(file)).await
    }

    pub async fn solve_equation(&self, file: FileHandle) -> TransportResult<EquationReply> {
        self.call(Endpoint::SolveEquation, Payload::File(file)).await
    }

    pub async fn documents(&self) -> TransportResult<DocumentList> {
        self.call(Endpoint::Documents, Payload::Empty).await
    }

    pub async fn health(&self) -> TransportResult<HealthStatus> {
        self.call(Endpoint::Health, Payload::Empty).await
    }

    async fn call<T: DeserializeOwned>(&self, endpoint: Endpoint, payload: Payload) -> TransportResult<T> {
        let value = self.transport.send(endpoint, payload).await?;
        serde_json::from_value(value).map_err(|e| TransportError::Decode {
            endpoint,
            message: e.to_string(),
        })
    }
}
