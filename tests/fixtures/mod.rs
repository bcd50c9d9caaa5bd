// Copyright (c) 2025 - Cowboy AI, Inc.
//! Test Fixtures for CloudEvent tests
//!
//! All ids and timestamps are fixed constants so encoded output is reproducible.

#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde_json::json;

use azcore_messaging::{CloudEvent, CloudEventData, CloudEventOptions};

// Fixed test timestamp, microsecond precision
pub const FIXED_TIMESTAMP: &str = "2023-06-16T02:54:01.470515Z";

/// Event serialized by the Python CloudEvents implementation
pub const PYTHON_SERIALIZED_EVENT: &str = r#"{
    "id": "1a8d2e43-4a6c-4f6f-9a77-eb1fa52f6b3d",
    "source": "source",
    "type": "eventtype",
    "specversion": "1.0",
    "time": "2023-06-16T02:54:01.470515Z",
    "subject": "subject",
    "dataschema": "dataschema",
    "datacontenttype": "datacontenttype",
    "data_base64": "AQID",
    "extstr": "extstring",
    "extnum": 1,
    "extbool": true,
    "exturi": "http://microsoft.com"
}"#;

/// Parse the fixed timestamp
pub fn fixed_timestamp() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(FIXED_TIMESTAMP)
        .expect("Invalid timestamp in test fixture")
        .with_timezone(&Utc)
}

/// Options carrying one extension of each scalar JSON shape
pub fn extension_options() -> CloudEventOptions {
    CloudEventOptions::new()
        .with_extension("extstr", "extstring")
        .with_extension("extnum", 1.0)
        .with_extension("extbool", true)
        .with_extension("exturi", "http://microsoft.com")
}

/// Event with every optional attribute set and a binary payload
pub fn full_binary_event() -> CloudEvent {
    let options = extension_options()
        .with_subject("subject")
        .with_data_schema("dataschema")
        .with_data_content_type("application/octet-stream")
        .with_time(fixed_timestamp());

    CloudEvent::new(
        "source",
        "eventtype",
        Some(CloudEventData::binary(vec![1u8, 2, 3])),
        Some(options),
    )
    .expect("Invalid CloudEvent fixture")
}

/// Event with a structured JSON payload
pub fn json_event() -> CloudEvent {
    let data = CloudEventData::json(&json!({"hello": "world", "count": 3}))
        .expect("Invalid payload fixture");
    let options = CloudEventOptions::new()
        .with_data_content_type("application/json")
        .with_time(fixed_timestamp());

    CloudEvent::new("source", "eventtype", Some(data), Some(options))
        .expect("Invalid CloudEvent fixture")
}

/// Decode an encoded event, panicking on failure
pub fn round_trip(event: &CloudEvent) -> CloudEvent {
    let bytes = event.to_json().expect("Failed to encode");
    CloudEvent::from_json(&bytes).expect("Failed to decode")
}
