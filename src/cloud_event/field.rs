// Copyright (c) 2025 - Cowboy AI, Inc.
//! Typed extraction of raw JSON fragments
//!
//! Decoding works on a map of attribute name to raw JSON fragment. Each
//! reserved attribute is pulled out of that map through [`get_value`], which
//! either yields a value of the expected shape or an error naming the
//! attribute and both shapes. Values are never coerced.

use serde::de::DeserializeOwned;
use serde_json::value::RawValue;

use crate::errors::{CloudEventError, FieldError};

/// A decode target with a known JSON shape
pub trait FieldShape: DeserializeOwned {
    /// Shape description used in diagnostics, with its article
    const SHAPE: &'static str;
}

impl FieldShape for String {
    const SHAPE: &'static str = "a string";
}

impl FieldShape for serde_json::Value {
    const SHAPE: &'static str = "a JSON value";
}

/// Describe the JSON shape of a raw fragment from its first token
pub fn shape_of(raw: &RawValue) -> &'static str {
    match raw.get().trim_start().as_bytes().first() {
        Some(b'"') => "a string",
        Some(b'{') => "an object",
        Some(b'[') => "an array",
        Some(b't') | Some(b'f') => "a bool",
        Some(b'n') => "null",
        _ => "a number",
    }
}

/// Returns true when the fragment is the JSON literal `null`
pub fn is_null(raw: &RawValue) -> bool {
    raw.get().trim() == "null"
}

/// Decode `raw` as `T`, failing with a diagnostic naming `field` on mismatch
pub fn get_value<T: FieldShape>(field: &str, raw: &RawValue) -> Result<T, CloudEventError> {
    serde_json::from_str::<T>(raw.get()).map_err(|_| {
        CloudEventError::field(
            field,
            FieldError::Shape {
                field: field.to_string(),
                actual: shape_of(raw),
                expected: T::SHAPE,
            },
        )
    })
}

/// Decode an optional string attribute, treating `null` as absent
pub fn get_optional_string(
    field: &str,
    raw: Option<&RawValue>,
) -> Result<Option<String>, CloudEventError> {
    match raw {
        Some(raw) if !is_null(raw) => get_value::<String>(field, raw).map(Some),
        _ => Ok(None),
    }
}
