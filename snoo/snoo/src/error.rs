pub use anyhow::Result;
use crate::models::Kind;
use thiserror::Error as ErrorTrait;

/// Failures that discard an entire response payload.
#[derive(ErrorTrait, Debug)]
pub enum DecodeError {
    #[error("JSON error: {:?}", .0)]
    Json(#[from] simd_json::Error),
    #[error("Unexpected payload shape: {}", .0)]
    Shape(&'static str),
}

/// Failures that only affect a single envelope. The envelope is kept with the
/// error in place of its payload; siblings decode normally.
#[derive(ErrorTrait, Debug, Clone, PartialEq)]
pub enum ProjectionError {
    #[error("Unknown kind: {}", .0)]
    UnknownKind(String),
    #[error("Malformed envelope: expected {{kind, data}}")]
    MalformedEnvelope,
    #[error("Missing field '{}' for kind {}", .field, .kind)]
    MissingField { kind: Kind, field: &'static str },
    #[error("Invalid field '{}' for kind {}: expected {}", .field, .kind, .expected)]
    InvalidField {
        kind: Kind,
        field: &'static str,
        expected: &'static str,
    },
    #[error("Malformed 'edited' value for kind {}: {}", .kind, .value)]
    MalformedEdited { kind: Kind, value: String },
}
