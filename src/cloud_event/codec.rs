// Copyright (c) 2025 - Cowboy AI, Inc.
//! CloudEvent JSON Codec
//!
//! Encoding writes the reserved attributes in a fixed order, routes the
//! payload to `data` or `data_base64`, and flattens extensions into the top
//! level.
//!
//! Decoding runs in three phases:
//!
//! ```text
//! bytes → { name: raw fragment }      (absent vs null stays visible)
//!       → reserved attributes         (shape checks, fixed order)
//!       → required checks             (id, source, specversion, type)
//!       → extensions                  (every unconsumed fragment)
//! ```
//!
//! Required attributes are checked after every present attribute has been
//! shape-checked, so a malformed `time` is reported even when `id` is missing.

use std::collections::BTreeMap;

use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::value::RawValue;
use tracing::{debug, warn};

use super::data::CloudEventData;
use super::field::{self, get_optional_string, get_value};
use super::{normalize_numbers, CloudEvent, Extensions, SPEC_VERSION};
use crate::errors::{CloudEventError, CloudEventResult};

type RawFields = BTreeMap<String, Box<RawValue>>;

impl CloudEvent {
    /// Encode as a compact JSON object
    pub fn to_json(&self) -> CloudEventResult<Vec<u8>> {
        serde_json::to_vec(self).map_err(CloudEventError::Serialization)
    }

    /// Encode as an indented JSON object
    pub fn to_json_pretty(&self) -> CloudEventResult<Vec<u8>> {
        serde_json::to_vec_pretty(self).map_err(CloudEventError::Serialization)
    }

    /// Decode a single JSON object
    ///
    /// A top-level `null` decodes like `{}` and fails on the missing `id`.
    pub fn from_json(bytes: &[u8]) -> CloudEventResult<Self> {
        let fields = serde_json::from_slice::<Option<RawFields>>(bytes)
            .map_err(CloudEventError::from_document)?;
        decode_fields(fields.unwrap_or_default())
    }
}

impl Serialize for CloudEvent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;

        map.serialize_entry("id", &self.id)?;
        map.serialize_entry("source", &self.source)?;
        map.serialize_entry("specversion", &self.spec_version)?;
        map.serialize_entry("type", &self.event_type)?;

        if let Some(time) = self.time {
            map.serialize_entry("time", &format_time(time))?;
        }
        if let Some(subject) = &self.subject {
            map.serialize_entry("subject", subject)?;
        }
        if let Some(schema) = &self.data_schema {
            map.serialize_entry("dataschema", schema)?;
        }
        if let Some(content_type) = &self.data_content_type {
            map.serialize_entry("datacontenttype", content_type)?;
        }

        match &self.data {
            Some(CloudEventData::Binary(bytes)) => {
                map.serialize_entry("data_base64", &STANDARD.encode(bytes))?;
            }
            Some(CloudEventData::Json(raw)) => {
                map.serialize_entry("data", raw)?;
            }
            None => {}
        }

        for (name, value) in &self.extensions {
            map.serialize_entry(name, value)?;
        }

        map.end()
    }
}

impl<'de> Deserialize<'de> for CloudEvent {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let fields = Option::<RawFields>::deserialize(deserializer)?;
        decode_fields(fields.unwrap_or_default()).map_err(serde::de::Error::custom)
    }
}

/// RFC3339 in UTC with only as many fractional digits as needed
fn format_time(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

fn decode_fields(mut fields: RawFields) -> CloudEventResult<CloudEvent> {
    let id = get_optional_string("id", fields.remove("id").as_deref())?;
    let source = get_optional_string("source", fields.remove("source").as_deref())?;
    let spec_version =
        get_optional_string("specversion", fields.remove("specversion").as_deref())?;
    let event_type = get_optional_string("type", fields.remove("type").as_deref())?;
    let time = decode_time(fields.remove("time").as_deref())?;
    let subject = get_optional_string("subject", fields.remove("subject").as_deref())?;
    let data_schema =
        get_optional_string("dataschema", fields.remove("dataschema").as_deref())?;
    let data_content_type =
        get_optional_string("datacontenttype", fields.remove("datacontenttype").as_deref())?;

    let data = match (fields.remove("data_base64"), fields.remove("data")) {
        (Some(_), Some(_)) => return Err(CloudEventError::ConflictingData),
        (Some(encoded), None) => decode_base64(&encoded)?,
        (None, Some(raw)) => Some(CloudEventData::Json(raw)),
        (None, None) => None,
    };

    let id = required("id", id)?;
    let source = required("source", source)?;
    let spec_version = required("specversion", spec_version)?;
    let event_type = required("type", event_type)?;

    if spec_version != SPEC_VERSION {
        warn!(
            id = %id,
            specversion = %spec_version,
            "Decoded CloudEvent with unexpected specversion"
        );
    }

    let mut extensions = Extensions::new();
    for (name, raw) in fields {
        let value: serde_json::Value = get_value(&name, &raw)?;
        extensions.insert(name, normalize_numbers(value));
    }

    debug!(
        id = %id,
        event_type = %event_type,
        extensions = extensions.len(),
        "Decoded CloudEvent"
    );

    Ok(CloudEvent {
        id,
        source,
        spec_version,
        event_type,
        time,
        subject,
        data_schema,
        data_content_type,
        data,
        extensions,
    })
}

fn required(name: &'static str, value: Option<String>) -> CloudEventResult<String> {
    value
        .filter(|value| !value.is_empty())
        .ok_or(CloudEventError::MissingField(name))
}

fn decode_time(raw: Option<&RawValue>) -> CloudEventResult<Option<DateTime<Utc>>> {
    let Some(text) = get_optional_string("time", raw)? else {
        return Ok(None);
    };

    let time = DateTime::parse_from_rfc3339(&text)
        .map_err(|e| CloudEventError::field("time", e))?;

    Ok(Some(time.with_timezone(&Utc)))
}

fn decode_base64(raw: &RawValue) -> CloudEventResult<Option<CloudEventData>> {
    if field::is_null(raw) {
        return Ok(None);
    }

    let encoded: String = get_value("data_base64", raw)?;
    let bytes = STANDARD
        .decode(encoded.as_bytes())
        .map_err(|e| CloudEventError::field("data_base64", e))?;

    Ok(Some(CloudEventData::Binary(bytes)))
}

/// Encode events as a JSON array
pub fn encode_batch(events: &[CloudEvent]) -> CloudEventResult<Vec<u8>> {
    debug!(count = events.len(), "Encoding CloudEvent batch");
    serde_json::to_vec(events).map_err(CloudEventError::Serialization)
}

/// Decode a JSON array of CloudEvent objects
///
/// The first failing member aborts the batch; its index is reported.
pub fn decode_batch(bytes: &[u8]) -> CloudEventResult<Vec<CloudEvent>> {
    let items = serde_json::from_slice::<Vec<Box<RawValue>>>(bytes)
        .map_err(CloudEventError::from_document)?;

    let events = items
        .iter()
        .enumerate()
        .map(|(index, raw)| {
            CloudEvent::from_json(raw.get().as_bytes()).map_err(|e| CloudEventError::BatchItem {
                index,
                source: Box::new(e),
            })
        })
        .collect::<CloudEventResult<Vec<_>>>()?;

    debug!(count = events.len(), "Decoded CloudEvent batch");
    Ok(events)
}

/// Decode either a single CloudEvent object or an array of them
pub fn decode_many(bytes: &[u8]) -> CloudEventResult<Vec<CloudEvent>> {
    match bytes.iter().find(|b| !b.is_ascii_whitespace()) {
        Some(b'[') => decode_batch(bytes),
        _ => CloudEvent::from_json(bytes).map(|event| vec![event]),
    }
}
