// Copyright (c) 2025 - Cowboy AI, Inc.
//! CloudEvents for messaging clients
//!
//! This crate builds, validates and (de)serializes CNCF CloudEvents v1.0
//! envelopes. Transport clients hand encoded events to an HTTP body and feed
//! received bodies back through the decoder.
//!
//! # Quick Start
//!
//! ```rust
//! use azcore_messaging::{CloudEvent, CloudEventData, CloudEventOptions};
//!
//! let options = CloudEventOptions::new()
//!     .with_subject("orders/42")
//!     .with_extension("tenant", "contoso");
//!
//! let data = CloudEventData::json(&serde_json::json!({"total": 12.5})).unwrap();
//! let event = CloudEvent::new("/orders", "Order.Created", Some(data), Some(options)).unwrap();
//!
//! let bytes = event.to_json().unwrap();
//! let decoded = CloudEvent::from_json(&bytes).unwrap();
//! assert_eq!(decoded, event);
//! ```
//!
//! # Module Organization
//!
//! - [`cloud_event`] - Envelope, payload and JSON codec
//! - [`config`] - Settings for the `cloudevent-inspect` binary
//! - [`errors`] - Error types

pub mod cloud_event;
pub mod config;
pub mod errors;

// Re-export commonly used types
pub use cloud_event::{
    decode_batch, decode_many, encode_batch, CloudEvent, CloudEventData, CloudEventOptions,
    Extensions, RESERVED_ATTRIBUTES, SPEC_VERSION,
};
pub use config::{ConfigError, DecodeMode, InspectConfig};
pub use errors::{CloudEventError, CloudEventResult, FieldError};
