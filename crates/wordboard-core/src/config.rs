#![forbid(unsafe_code)]

//! Table configuration, loadable from TOML or JSON.
//!
//! ```toml
//! shuffle_seed = 7
//!
//! [gesture]
//! tap_max_ms = 200
//!
//! [layout]
//! board = ["test", "pls", "ignore"]
//! hand = ["日本", "語", "が", "わかり", "ま", "す"]
//!
//! [deck]
//! words = ["は", "を"]
//! deal_size = 1
//! ```
//!
//! Every field has a default, so an empty document is a valid config.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use web_time::Duration;

use crate::gesture::GestureConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Top-level configuration for a [`WordTable`](crate::table::WordTable).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    pub gesture: GesturePolicy,
    pub layout: LayoutConfig,
    pub deck: DeckConfig,
    /// Fixed seed for shuffles. `None` seeds from the OS.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shuffle_seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GesturePolicy {
    /// Taps must finish in strictly less than this many milliseconds.
    pub tap_max_ms: u64,
}

impl Default for GesturePolicy {
    fn default() -> Self {
        Self { tap_max_ms: 200 }
    }
}

impl GesturePolicy {
    #[must_use]
    pub fn to_gesture_config(&self) -> GestureConfig {
        GestureConfig {
            tap_max_duration: Duration::from_millis(self.tap_max_ms),
        }
    }
}

/// Words placed on the table at startup. Ids are issued board first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub board: Vec<String>,
    pub hand: Vec<String>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            board: ["test", "pls", "ignore"].map(String::from).to_vec(),
            hand: ["日本", "語", "が", "わかり", "ま", "す"]
                .map(String::from)
                .to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckConfig {
    pub words: Vec<String>,
    /// Words drawn per deal.
    pub deal_size: usize,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            words: Vec::new(),
            deal_size: 1,
        }
    }
}

impl TableConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Load by extension: `.json` as JSON, anything else as TOML.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.extension().is_some_and(|ext| ext == "json") {
            Self::from_json_file(path)
        } else {
            Self::from_toml_file(path)
        }
    }

    /// Validate all parameters. An empty list means the config is usable.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.gesture.tap_max_ms == 0 {
            errors.push("gesture.tap_max_ms must be > 0".into());
        }
        if self.deck.deal_size == 0 {
            errors.push("deck.deal_size must be > 0".into());
        }

        let sections = [
            ("layout.board", &self.layout.board),
            ("layout.hand", &self.layout.hand),
            ("deck.words", &self.deck.words),
        ];
        for (name, words) in sections {
            if let Some(i) = words.iter().position(|w| w.trim().is_empty()) {
                errors.push(format!("{name}[{i}] must not be blank"));
            }
        }

        errors
    }
}
