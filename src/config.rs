use crate::error::Result;
use crate::volume::VolumeScale;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Default display name
pub const DEFAULT_NAME: &str = "Marantz Receiver";

/// Default lower volume bound in dB
pub const DEFAULT_MIN_VOLUME: i32 = -71;

/// Default upper volume bound in dB
pub const DEFAULT_MAX_VOLUME: i32 = -1;

/// Platform configuration for one receiver
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MarantzConfig {
    /// Address of the serial-over-ethernet server
    pub host: String,

    #[serde(deserialize_with = "string_or_number")]
    pub port: String,

    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default = "default_min_volume")]
    pub min_volume: i32,

    #[serde(default = "default_max_volume")]
    pub max_volume: i32,

    /// Source code → display name
    #[serde(default)]
    pub sources: BTreeMap<String, String>,

    /// Sound mode code → display name
    #[serde(default, rename = "soundmode")]
    pub sound_modes: BTreeMap<String, String>,
}

fn default_name() -> String {
    DEFAULT_NAME.to_string()
}

fn default_min_volume() -> i32 {
    DEFAULT_MIN_VOLUME
}

fn default_max_volume() -> i32 {
    DEFAULT_MAX_VOLUME
}

/// Accept a port given either as a string or as a bare number
fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {}",
            other
        ))),
    }
}

impl MarantzConfig {
    /// Create a config with defaults for everything but the address
    pub fn new(host: impl Into<String>, port: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: port.into(),
            name: default_name(),
            min_volume: DEFAULT_MIN_VOLUME,
            max_volume: DEFAULT_MAX_VOLUME,
            sources: BTreeMap::new(),
            sound_modes: BTreeMap::new(),
        }
    }

    /// Parse a config from a JSON value
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Parse a config from JSON text
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_volume_range(mut self, min_volume: i32, max_volume: i32) -> Self {
        self.min_volume = min_volume;
        self.max_volume = max_volume;
        self
    }

    pub fn with_source(mut self, code: impl Into<String>, name: impl Into<String>) -> Self {
        self.sources.insert(code.into(), name.into());
        self
    }

    pub fn with_sound_mode(mut self, code: impl Into<String>, name: impl Into<String>) -> Self {
        self.sound_modes.insert(code.into(), name.into());
        self
    }

    /// Check invariants and return the volume scale they describe
    pub fn validate(&self) -> Result<VolumeScale> {
        VolumeScale::new(self.min_volume, self.max_volume)
    }
}
