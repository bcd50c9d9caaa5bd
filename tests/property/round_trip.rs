// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for the CloudEvent codec

use chrono::{DateTime, TimeZone, Utc};
use proptest::prelude::*;
use serde_json::{json, Value};

use azcore_messaging::{CloudEvent, CloudEventData, CloudEventError, CloudEventOptions};

// ============================================================================
// Strategies
// ============================================================================

/// Payloads of either shape
fn payload() -> impl Strategy<Value = Option<CloudEventData>> {
    prop_oneof![
        Just(None),
        prop::collection::vec(any::<u8>(), 0..64)
            .prop_map(|bytes| Some(CloudEventData::binary(bytes))),
        ".{0,32}".prop_map(|s| Some(CloudEventData::json(&s).unwrap())),
        (any::<i32>(), any::<bool>()).prop_map(|(n, flag)| {
            Some(CloudEventData::json(&json!({"n": n, "flag": flag})).unwrap())
        }),
    ]
}

/// Extension values: any finite float, scalars, and nested arrays/objects
fn extension_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        ".{0,16}".prop_map(Value::from),
        any::<bool>().prop_map(Value::from),
        any::<f64>()
            .prop_filter("finite", |f| f.is_finite())
            .prop_map(Value::from),
        Just(Value::Null),
    ];

    leaf.prop_recursive(2, 16, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-z]{1,6}", inner, 0..4)
                .prop_map(|fields| Value::Object(fields.into_iter().collect())),
        ]
    })
}

fn extensions() -> impl Strategy<Value = Vec<(String, Value)>> {
    prop::collection::vec(("ext[a-z]{1,8}", extension_value()), 0..6)
}

/// Timestamps between 1970 and 2100 with nanosecond precision
fn timestamp() -> impl Strategy<Value = DateTime<Utc>> {
    (0i64..4_102_444_800, 0u32..1_000_000_000)
        .prop_map(|(secs, nanos)| Utc.timestamp_opt(secs, nanos).unwrap())
}

fn cloud_event() -> impl Strategy<Value = CloudEvent> {
    (
        "[a-z/]{1,16}",
        "[A-Za-z.]{1,16}",
        payload(),
        prop::option::of("[a-z]{1,8}"),
        prop::option::of("[a-z/]{1,12}"),
        extensions(),
        timestamp(),
    )
        .prop_map(|(source, event_type, data, subject, content_type, exts, time)| {
            let mut options = CloudEventOptions::new().with_time(time);
            options.subject = subject;
            options.data_content_type = content_type;
            for (name, value) in exts {
                options = options.with_extension(name, value);
            }
            CloudEvent::new(source, event_type, data, Some(options)).unwrap()
        })
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: decode(encode(e)) == e
    #[test]
    fn prop_round_trip_is_identity(event in cloud_event()) {
        let bytes = event.to_json().unwrap();
        let decoded = CloudEvent::from_json(&bytes).unwrap();
        prop_assert_eq!(decoded, event);
    }

    /// Property: encoded output is a JSON object with exactly one payload key
    #[test]
    fn prop_payload_key_is_exclusive(event in cloud_event()) {
        let value: Value = serde_json::from_slice(&event.to_json().unwrap()).unwrap();
        let object = value.as_object().unwrap();

        let has_data = object.contains_key("data");
        let has_base64 = object.contains_key("data_base64");
        prop_assert!(!(has_data && has_base64));
        prop_assert_eq!(has_data || has_base64, event.data().is_some());
        prop_assert_eq!(has_base64, event.data().map(|d| d.is_binary()).unwrap_or(false));
    }

    /// Property: removing a required attribute always names that attribute
    #[test]
    fn prop_missing_required_field_is_named(
        event in cloud_event(),
        index in 0usize..4,
    ) {
        let field = ["id", "source", "specversion", "type"][index];
        let mut value: Value = serde_json::from_slice(&event.to_json().unwrap()).unwrap();
        value.as_object_mut().unwrap().remove(field);

        let err = CloudEvent::from_json(&serde_json::to_vec(&value).unwrap()).unwrap_err();
        prop_assert!(matches!(err, CloudEventError::MissingField(name) if name == field));
    }

    /// Property: binary payloads come back byte-for-byte
    #[test]
    fn prop_binary_bytes_preserved(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        let event = CloudEvent::new(
            "source",
            "eventType",
            Some(CloudEventData::binary(bytes.clone())),
            None,
        ).unwrap();

        let decoded = CloudEvent::from_json(&event.to_json().unwrap()).unwrap();
        prop_assert_eq!(decoded.data().unwrap().as_bytes(), bytes.as_slice());
    }
}
