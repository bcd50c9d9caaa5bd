// Copyright (c) 2025 - Cowboy AI, Inc.
//! Error types for CloudEvent construction and (de)serialization

use thiserror::Error;

/// Errors that can occur while building, encoding or decoding a CloudEvent
#[derive(Debug, Error)]
pub enum CloudEventError {
    /// `source` was empty at construction
    #[error("source cannot be empty")]
    EmptySource,

    /// `eventType` was empty at construction
    #[error("eventType cannot be empty")]
    EmptyEventType,

    /// An extension attribute reused a core attribute name
    #[error("extension attribute {0:?} collides with a reserved CloudEvent attribute")]
    ReservedExtension(String),

    /// Input was not valid JSON
    #[error("malformed CloudEvent JSON: {0}")]
    Syntax(#[source] serde_json::Error),

    /// Input was valid JSON of the wrong shape
    #[error("CloudEvent JSON has the wrong shape: {0}")]
    UnexpectedShape(#[source] serde_json::Error),

    /// A required attribute was absent or empty after decode
    #[error("required field '{0}' was not present, or was empty")]
    MissingField(&'static str),

    /// A present attribute could not be decoded
    #[error("failed to deserialize {field:?}: {source}")]
    Field {
        field: String,
        #[source]
        source: FieldError,
    },

    /// `data` and `data_base64` were both present
    #[error("fields \"data\" and \"data_base64\" are mutually exclusive")]
    ConflictingData,

    /// A member of a batch failed to decode
    #[error("event {index} of batch: {source}")]
    BatchItem {
        index: usize,
        #[source]
        source: Box<CloudEventError>,
    },

    /// The payload could not be interpreted as the requested type
    #[error("failed to decode CloudEvent payload: {0}")]
    Payload(#[source] serde_json::Error),

    /// Payload or envelope serialization failed
    #[error("failed to serialize CloudEvent: {0}")]
    Serialization(#[source] serde_json::Error),
}

impl CloudEventError {
    /// Wrap a field-level failure with the name of the offending attribute
    pub fn field(field: impl Into<String>, source: impl Into<FieldError>) -> Self {
        CloudEventError::Field {
            field: field.into(),
            source: source.into(),
        }
    }

    /// Classify a serde_json failure on a whole document
    pub(crate) fn from_document(err: serde_json::Error) -> Self {
        match err.classify() {
            serde_json::error::Category::Data => CloudEventError::UnexpectedShape(err),
            _ => CloudEventError::Syntax(err),
        }
    }
}

/// Per-attribute decode failures
#[derive(Debug, Error)]
pub enum FieldError {
    /// JSON shape did not match the attribute's expected shape
    #[error("field {field:?} is {actual}, but should be {expected}")]
    Shape {
        field: String,
        actual: &'static str,
        expected: &'static str,
    },

    #[error("{0}")]
    Base64(#[from] base64::DecodeError),

    #[error("{0}")]
    Timestamp(#[from] chrono::ParseError),
}

/// Result type for CloudEvent operations
pub type CloudEventResult<T> = Result<T, CloudEventError>;
