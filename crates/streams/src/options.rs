use std::time::Duration;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::naming::{NameKey, NameTemplate};

/// Playback settings forwarded to every stream descriptor.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PlaybackOptions {
    /// Start live streams from the beginning of the playlist window.
    pub force_restart: bool,
    /// Seconds to skip from the start.
    pub start_offset: f64,
    /// Seconds to play, unbounded when `None`.
    pub duration: Option<f64>,
}

impl Default for PlaybackOptions {
    fn default() -> Self {
        Self {
            force_restart: false,
            start_offset: 0.0,
            duration: None,
        }
    }
}

/// Request settings passed through untouched to the probe and the descriptors.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct TransportOptions {
    pub headers: FxHashMap<String, String>,
    pub params: FxHashMap<String, String>,
    pub timeout_secs: Option<u64>,
}

impl TransportOptions {
    pub fn with_header<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn with_param<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Options of a single selection run.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct SelectOptions {
    /// Preferred label when `name_fmt` is not set.
    pub name_key: NameKey,
    /// Prepended to every resolved name.
    pub name_prefix: String,
    /// Probe each variant before accepting it.
    pub check_streams: bool,
    /// Overrides `name_key` entirely when set.
    pub name_fmt: Option<NameTemplate>,
    #[serde(flatten)]
    pub playback: PlaybackOptions,
    pub transport: TransportOptions,
}
