// Copyright (c) 2025 - Cowboy AI, Inc.
//! Configuration for the `cloudevent-inspect` binary

use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

use crate::cloud_event::{decode_batch, decode_many, CloudEvent};
use crate::errors::CloudEventResult;

/// Configuration errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?} (expected {expected})")]
    InvalidValue {
        var: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// How input documents are interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodeMode {
    /// A single object or an array of objects
    #[default]
    Auto,
    /// Exactly one object
    Single,
    /// An array of objects
    Batch,
}

impl DecodeMode {
    /// Decode `bytes` according to this mode
    pub fn decode(self, bytes: &[u8]) -> CloudEventResult<Vec<CloudEvent>> {
        match self {
            DecodeMode::Auto => decode_many(bytes),
            DecodeMode::Single => CloudEvent::from_json(bytes).map(|event| vec![event]),
            DecodeMode::Batch => decode_batch(bytes),
        }
    }
}

impl FromStr for DecodeMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(DecodeMode::Auto),
            "single" => Ok(DecodeMode::Single),
            "batch" => Ok(DecodeMode::Batch),
            _ => Err(ConfigError::InvalidValue {
                var: "CLOUDEVENT_MODE",
                value: s.to_string(),
                expected: "auto, single or batch",
            }),
        }
    }
}

/// Settings for inspecting CloudEvent documents
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InspectConfig {
    /// Input file; stdin when unset
    pub input: Option<PathBuf>,
    /// Indent re-encoded output
    pub pretty: bool,
    pub mode: DecodeMode,
}

impl InspectConfig {
    /// Load configuration from environment variables
    ///
    /// - `CLOUDEVENT_INPUT` - input path
    /// - `CLOUDEVENT_PRETTY` - `true`/`false`, `1`/`0`
    /// - `CLOUDEVENT_MODE` - `auto`, `single` or `batch`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let input = lookup("CLOUDEVENT_INPUT")
            .filter(|path| !path.is_empty())
            .map(PathBuf::from);

        let pretty = match lookup("CLOUDEVENT_PRETTY") {
            Some(value) => parse_bool("CLOUDEVENT_PRETTY", &value)?,
            None => false,
        };

        let mode = match lookup("CLOUDEVENT_MODE") {
            Some(value) => value.parse()?,
            None => DecodeMode::default(),
        };

        Ok(Self {
            input,
            pretty,
            mode,
        })
    }
}

fn parse_bool(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" | "" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            var,
            value: value.to_string(),
            expected: "a boolean",
        }),
    }
}
