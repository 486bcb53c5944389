//! Scripted transport shared by the workflow tests

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde_json::{Map, Value};
use study_companion_sdk::{async_trait, Endpoint, FileHandle, Payload, StudyClient, Transport, TransportError, TransportResult};

/// What the fake backend answers on one endpoint
#[derive(Debug, Clone)]
pub enum Scripted {
    /// 2xx with this body
    Body(Value),
    /// 2xx with `{field: "analyzed <file name>"}`
    EchoFile(&'static str),
    /// Non-2xx with an optional `detail`
    Status(u16, Option<&'static str>),
}

/// One recorded request
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub endpoint: Endpoint,
    pub file_name: Option<String>,
    pub body: Option<Value>,
}

#[derive(Default)]
pub struct FakeTransport {
    script: Mutex<HashMap<Endpoint, Scripted>>,
    calls: Mutex<Vec<Call>>,
}

impl FakeTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, endpoint: Endpoint, response: Scripted) {
        self.script.lock().unwrap().insert(endpoint, response);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self, endpoint: Endpoint) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| c.endpoint == endpoint).count()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn send(&self, endpoint: Endpoint, payload: Payload) -> TransportResult<Value> {
        let (file_name, body) = match &payload {
            Payload::Empty => (None, None),
            Payload::Json(value) => (None, Some(value.clone())),
            Payload::File(file) => (Some(file.name().to_string()), None),
        };
        self.calls.lock().unwrap().push(Call {
            endpoint,
            file_name: file_name.clone(),
            body,
        });

        let scripted = self.script.lock().unwrap().get(&endpoint).cloned();
        match scripted {
            Some(Scripted::Body(value)) => Ok(value),
            Some(Scripted::EchoFile(field)) => {
                let mut body = Map::new();
                let text = format!("analyzed {}", file_name.unwrap_or_default());
                body.insert(field.to_string(), Value::String(text));
                Ok(Value::Object(body))
            }
            Some(Scripted::Status(status, detail)) => Err(TransportError::Status {
                endpoint,
                status,
                detail: detail.map(str::to_string),
            }),
            None => Err(TransportError::Status {
                endpoint,
                status: 404,
                detail: None,
            }),
        }
    }
}

pub fn client(transport: &Arc<FakeTransport>) -> StudyClient {
    StudyClient::new(transport.clone())
}

pub fn image(name: &str) -> FileHandle {
    FileHandle::new(name, "image/png", vec![0x89, b'P', b'N', b'G'])
}

pub fn document(name: &str) -> FileHandle {
    FileHandle::new(name, "application/pdf", b"%PDF-1.4".to_vec())
}
