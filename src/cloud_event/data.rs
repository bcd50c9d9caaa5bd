// Copyright (c) 2025 - Cowboy AI, Inc.
//! CloudEvent payload
//!
//! A payload is either raw binary, carried on the wire as `data_base64`, or a
//! JSON value, carried verbatim under `data`. JSON payloads are serialized once
//! when the payload is built and kept as the exact fragment, so decoding an
//! encoded event yields the same bytes.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::value::RawValue;

use crate::errors::{CloudEventError, CloudEventResult};

/// Payload of a CloudEvent
#[derive(Debug, Clone)]
pub enum CloudEventData {
    /// Raw bytes, encoded as `data_base64`
    Binary(Vec<u8>),
    /// A JSON fragment, encoded as `data`
    Json(Box<RawValue>),
}

impl CloudEventData {
    /// Binary payload
    pub fn binary(bytes: impl Into<Vec<u8>>) -> Self {
        CloudEventData::Binary(bytes.into())
    }

    /// JSON payload from any serializable value
    ///
    /// Strings are JSON-encoded, so `"hello"` goes on the wire quoted. Use
    /// [`CloudEventData::binary`] to send string bytes unquoted.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> CloudEventResult<Self> {
        serde_json::value::to_raw_value(value)
            .map(CloudEventData::Json)
            .map_err(CloudEventError::Serialization)
    }

    /// The payload as raw bytes: decoded bytes for binary, JSON text otherwise
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            CloudEventData::Binary(bytes) => bytes,
            CloudEventData::Json(raw) => raw.get().as_bytes(),
        }
    }

    pub fn is_binary(&self) -> bool {
        matches!(self, CloudEventData::Binary(_))
    }

    /// Interpret the payload as `T`
    pub fn deserialize<T: DeserializeOwned>(&self) -> CloudEventResult<T> {
        let result = match self {
            CloudEventData::Binary(bytes) => serde_json::from_slice(bytes),
            CloudEventData::Json(raw) => serde_json::from_str(raw.get()),
        };
        result.map_err(CloudEventError::Payload)
    }

    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            CloudEventData::Binary(bytes) => bytes,
            CloudEventData::Json(raw) => String::from(Box::<str>::from(raw)).into_bytes(),
        }
    }
}

impl PartialEq for CloudEventData {
    fn eq(&self, other: &Self) -> bool {
        self.is_binary() == other.is_binary() && self.as_bytes() == other.as_bytes()
    }
}

impl Eq for CloudEventData {}

impl From<Vec<u8>> for CloudEventData {
    fn from(bytes: Vec<u8>) -> Self {
        CloudEventData::Binary(bytes)
    }
}

impl From<&[u8]> for CloudEventData {
    fn from(bytes: &[u8]) -> Self {
        CloudEventData::Binary(bytes.to_vec())
    }
}
