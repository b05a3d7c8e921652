use std::fmt;

use thiserror::Error;

pub type SubmissionId = u64;

/// Engine-side copy of the staged file: exactly what goes on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoicePayload {
    pub file_name: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
}

/// Parsed success body from the extraction service.
///
/// `raw_text` is the one required field; anything else in the JSON object is
/// kept verbatim under `fields`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExtractionOutput {
    pub raw_text: String,
    pub fields: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    SubmissionCompleted {
        submission_id: SubmissionId,
        result: Result<ExtractionOutput, SubmitError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct SubmitError {
    pub kind: FailureKind,
    pub message: String,
}

impl SubmitError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidEndpoint,
    InvalidMediaType,
    HttpStatus(u16),
    Timeout,
    Network,
    MalformedResponse,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidEndpoint => write!(f, "invalid endpoint"),
            FailureKind::InvalidMediaType => write!(f, "invalid media type"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::MalformedResponse => write!(f, "malformed response"),
        }
    }
}
