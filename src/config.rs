//! Editor configuration
//!
//! Every policy knob of an editing session, loaded from JSON. All fields are
//! optional; a missing field takes its default.

use serde::{Deserialize, Serialize};

use crate::core::Settings;
use crate::runtime::HistoryLimit;

/// Default pointer travel before a pointer drag activates
pub const DEFAULT_ACTIVATION_DISTANCE: f64 = 8.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorConfig {
    /// How much undo history a session keeps
    #[serde(default)]
    pub history_limit: HistoryLimit,

    /// Envelope given to blocks inserted from the palette (a complete
    /// settings object when present)
    #[serde(default = "Settings::standard_insert")]
    pub insert_settings: Settings,

    #[serde(default)]
    pub drag: DragConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragConfig {
    /// Pixels the pointer travels before a drag starts tracking targets
    #[serde(default = "default_activation_distance")]
    pub activation_distance: f64,
}

fn default_activation_distance() -> f64 {
    DEFAULT_ACTIVATION_DISTANCE
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            activation_distance: DEFAULT_ACTIVATION_DISTANCE,
        }
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_limit: HistoryLimit::Unbounded,
            insert_settings: Settings::standard_insert(),
            drag: DragConfig::default(),
        }
    }
}

impl EditorConfig {
    /// Parse and validate a JSON configuration
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: EditorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history_limit == HistoryLimit::MaxEntries(0) {
            return Err(ConfigError::Invalid(
                "historyLimit must keep at least one entry".into(),
            ));
        }

        let distance = self.drag.activation_distance;
        if !distance.is_finite() || distance < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "drag.activationDistance must be a non-negative number, got {}",
                distance
            )));
        }

        let p = &self.insert_settings.padding;
        let m = &self.insert_settings.margin;
        if [p.top, p.bottom, p.left, p.right, m.top, m.bottom]
            .iter()
            .any(|v| !v.is_finite())
        {
            return Err(ConfigError::Invalid("insertSettings spacing must be finite".into()));
        }
        Ok(())
    }

    pub fn with_history_limit(mut self, limit: HistoryLimit) -> Self {
        self.history_limit = limit;
        self
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Malformed configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
