// Copyright (c) 2025 - Cowboy AI, Inc.
//! CloudEvents v1.0 envelope
//!
//! A [`CloudEvent`] is built once, either with [`CloudEvent::new`] or by
//! decoding JSON, and is immutable afterwards.
//!
//! # Wire Format
//!
//! ```text
//! {
//!   "id": "...", "source": "...", "specversion": "1.0", "type": "...",
//!   "time": "2023-06-16T02:54:01.470515Z",
//!   "subject": "...", "dataschema": "...", "datacontenttype": "...",
//!   "data": <json> | "data_base64": "<base64>",
//!   "<extension>": <json>, ...
//! }
//! ```
//!
//! # Module Organization
//!
//! - [`data`] - Binary or JSON payload
//! - [`codec`] - JSON encode/decode and batches
//! - [`field`] - Typed extraction of raw JSON fragments

pub mod codec;
pub mod data;
pub mod field;

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use tracing::debug;
use uuid::Uuid;

use crate::errors::{CloudEventError, CloudEventResult};

pub use codec::{decode_batch, decode_many, encode_batch};
pub use data::CloudEventData;

/// The only CloudEvents spec version produced by this crate
pub const SPEC_VERSION: &str = "1.0";

/// Top-level attribute names that are not extensions
pub const RESERVED_ATTRIBUTES: [&str; 10] = [
    "id",
    "source",
    "specversion",
    "type",
    "time",
    "subject",
    "dataschema",
    "datacontenttype",
    "data",
    "data_base64",
];

/// Extension attributes, keyed by attribute name
pub type Extensions = BTreeMap<String, serde_json::Value>;

/// Returns true when `name` is a core CloudEvent attribute
pub fn is_reserved(name: &str) -> bool {
    RESERVED_ATTRIBUTES.contains(&name)
}

/// Optional attributes for [`CloudEvent::new`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CloudEventOptions {
    /// MIME type of `data`
    pub data_content_type: Option<String>,
    /// URI of the schema `data` adheres to
    pub data_schema: Option<String>,
    /// Extension attributes, flattened into the top level on encode
    pub extensions: Extensions,
    /// Subject of the event in the context of the source
    pub subject: Option<String>,
    /// Defaults to the current UTC time
    pub time: Option<DateTime<Utc>>,
}

impl CloudEventOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.data_content_type = Some(content_type.into());
        self
    }

    pub fn with_data_schema(mut self, schema: impl Into<String>) -> Self {
        self.data_schema = Some(schema.into());
        self
    }

    pub fn with_extension(
        mut self,
        name: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.extensions.insert(name.into(), value.into());
        self
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn with_time(mut self, time: DateTime<Utc>) -> Self {
        self.time = Some(time);
        self
    }
}

/// A CNCF CloudEvents v1.0 envelope
#[derive(Debug, Clone, PartialEq)]
pub struct CloudEvent {
    id: String,
    source: String,
    spec_version: String,
    event_type: String,
    time: Option<DateTime<Utc>>,
    subject: Option<String>,
    data_schema: Option<String>,
    data_content_type: Option<String>,
    data: Option<CloudEventData>,
    extensions: Extensions,
}

impl CloudEvent {
    /// Create a CloudEvent with a fresh id
    ///
    /// # Invariants
    /// - `source` is non-empty
    /// - `event_type` is non-empty
    /// - No extension reuses a reserved attribute name
    ///
    /// # Examples
    ///
    /// ```rust
    /// use azcore_messaging::{CloudEvent, CloudEventData};
    ///
    /// let data = CloudEventData::json("hello world").unwrap();
    /// let event = CloudEvent::new("source", "eventType", Some(data), None).unwrap();
    /// assert_eq!(event.spec_version(), "1.0");
    ///
    /// assert!(CloudEvent::new("", "eventType", None, None).is_err());
    /// ```
    pub fn new(
        source: impl Into<String>,
        event_type: impl Into<String>,
        data: Option<CloudEventData>,
        options: Option<CloudEventOptions>,
    ) -> CloudEventResult<Self> {
        let source = source.into();
        let event_type = event_type.into();

        if source.is_empty() {
            return Err(CloudEventError::EmptySource);
        }

        if event_type.is_empty() {
            return Err(CloudEventError::EmptyEventType);
        }

        let options = options.unwrap_or_default();

        if let Some(name) = options.extensions.keys().find(|name| is_reserved(name)) {
            return Err(CloudEventError::ReservedExtension(name.clone()));
        }

        let extensions = options
            .extensions
            .into_iter()
            .map(|(name, value)| (name, normalize_numbers(value)))
            .collect();

        let event = Self {
            id: Uuid::new_v4().to_string(),
            source,
            spec_version: SPEC_VERSION.to_string(),
            event_type,
            time: Some(options.time.unwrap_or_else(Utc::now)),
            subject: options.subject,
            data_schema: options.data_schema,
            data_content_type: options.data_content_type,
            data,
            extensions,
        };

        debug!(
            id = %event.id,
            source = %event.source,
            event_type = %event.event_type,
            "Constructed CloudEvent"
        );

        Ok(event)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn spec_version(&self) -> &str {
        &self.spec_version
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn time(&self) -> Option<DateTime<Utc>> {
        self.time
    }

    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    pub fn data_schema(&self) -> Option<&str> {
        self.data_schema.as_deref()
    }

    pub fn data_content_type(&self) -> Option<&str> {
        self.data_content_type.as_deref()
    }

    pub fn data(&self) -> Option<&CloudEventData> {
        self.data.as_ref()
    }

    pub fn extensions(&self) -> &Extensions {
        &self.extensions
    }

    /// Take ownership of the payload
    pub fn into_data(self) -> Option<CloudEventData> {
        self.data
    }
}

/// Represent every JSON number as `f64`, recursively
///
/// Extension numbers carry no integer/float distinction on the wire, so
/// values built in code compare equal to the same values decoded from JSON.
pub(crate) fn normalize_numbers(value: serde_json::Value) -> serde_json::Value {
    use serde_json::Value;

    match value {
        Value::Number(number) => match number.as_f64().and_then(serde_json::Number::from_f64) {
            Some(float) => Value::Number(float),
            None => Value::Number(number),
        },
        Value::Array(items) => Value::Array(items.into_iter().map(normalize_numbers).collect()),
        Value::Object(fields) => Value::Object(
            fields
                .into_iter()
                .map(|(name, value)| (name, normalize_numbers(value)))
                .collect(),
        ),
        other => other,
    }
}
