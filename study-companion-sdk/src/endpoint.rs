//! Backend endpoint table

use std::fmt;

/// HTTP endpoints exposed by the inference backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Add a study document to the retrieval corpus
    Upload,
    /// Ask a question against the corpus
    Chat,
    /// Explain a diagram image
    ParseDiagram,
    /// Solve an equation image
    SolveEquation,
    /// List documents in the corpus
    Documents,
    /// Liveness check
    Health,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Upload => "/upload",
            Endpoint::Chat => "/chat",
            Endpoint::ParseDiagram => "/parse-diagram",
            Endpoint::SolveEquation => "/solve-equation",
            Endpoint::Documents => "/documents",
            Endpoint::Health => "/health",
        }
    }

    pub fn method(&self) -> reqwest::Method {
        match self {
            Endpoint::Documents | Endpoint::Health => reqwest::Method::GET,
            _ => reqwest::Method::POST,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method(), self.path())
    }
}
