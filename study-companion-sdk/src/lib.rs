//! Transport layer for the study companion backend
//!
//! Everything that talks HTTP lives here: the endpoint table, request
//! payloads, wire types and the [`Transport`] seam the workflows are
//! written against.

pub mod client;
pub mod endpoint;
pub mod error;
pub mod payload;
pub mod wire;

// Re-export async trait for implementors of `Transport`
pub use async_trait::async_trait;

pub use client::{HttpTransport, StudyClient, Transport, DEFAULT_BASE_URL};
pub use endpoint::Endpoint;
pub use error::{TransportError, TransportResult};
pub use payload::{FileHandle, Payload};
pub use wire::{ChatReply, ChatRequest, DiagramReply, DocumentList, EquationReply, HealthStatus, UploadAck};
