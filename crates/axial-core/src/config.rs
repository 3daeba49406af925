//! Scale configuration loaded from YAML.
//!
//! ```yaml
//! engine:
//!   kind: fixed
//!   max_interval_width: 60.0
//! settings:
//!   attributes:
//!     floating: true
//! max_major: 8
//! streaming:
//!   enabled: true
//!   factor: 0.05
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::engine::{
    DateTimeMode, DateTimeScaleEngine, EngineSettings, FixedScaleEngine, ScaleEngine,
    ScaleEngineKind,
};
use crate::error::ConfigError;

/// Engine selection with the parameters specific to each engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EngineConfig {
    /// Linear engine.
    #[default]
    Linear,
    /// Log10 engine.
    Log10,
    /// Fixed (streaming) engine.
    Fixed {
        /// Optional cap on the visible width.
        #[serde(default)]
        max_interval_width: Option<f64>,
    },
    /// Date/time engine.
    DateTime {
        /// Display mode.
        #[serde(default)]
        mode: DateTimeMode,
        /// Re-base ticks on the start value.
        #[serde(default)]
        fixed_start: bool,
    },
}

impl EngineConfig {
    /// Engine discriminant.
    #[must_use]
    pub const fn kind(&self) -> ScaleEngineKind {
        match self {
            Self::Linear => ScaleEngineKind::Linear,
            Self::Log10 => ScaleEngineKind::Log10,
            Self::Fixed { .. } => ScaleEngineKind::Fixed,
            Self::DateTime { .. } => ScaleEngineKind::DateTime,
        }
    }
}

/// Streaming optimization parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamingConfig {
    /// Enable the optimization.
    pub enabled: bool,
    /// Relative width change below which a shrinking interval keeps its
    /// previous width.
    pub factor: f64,
    /// Updates closer than this keep the raw data bounds.
    pub fast_update_ms: u64,
}

impl Default for StreamingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            factor: 0.02,
            fast_update_ms: 300,
        }
    }
}

impl StreamingConfig {
    /// Fast update window.
    #[must_use]
    pub const fn fast_update_window(&self) -> Duration {
        Duration::from_millis(self.fast_update_ms)
    }
}

/// Everything needed to compute the division of one axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleConfig {
    /// Engine selection.
    pub engine: EngineConfig,
    /// Shared engine settings.
    pub settings: EngineSettings,
    /// Maximum number of major steps.
    pub max_major: usize,
    /// Maximum number of minor steps per major step.
    pub max_minor: usize,
    /// Recompute the division from the data.
    pub auto_scale: bool,
    /// Streaming optimization.
    pub streaming: StreamingConfig,
    /// Extra relative padding added around the data interval when the
    /// streaming optimization is off.
    pub item_interval_factor: f64,
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            settings: EngineSettings::default(),
            max_major: 10,
            max_minor: 5,
            auto_scale: true,
            streaming: StreamingConfig::default(),
            item_interval_factor: 0.0,
        }
    }
}

impl ScaleConfig {
    /// Parse and validate a configuration.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Check every numeric field against its domain.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_major == 0 {
            return Err(ConfigError::invalid("max_major", "must be at least 1"));
        }
        non_negative("settings.lower_margin", self.settings.lower_margin())?;
        non_negative("settings.upper_margin", self.settings.upper_margin())?;
        if !self.settings.reference.is_finite() {
            return Err(ConfigError::invalid("settings.reference", "must be finite"));
        }
        non_negative("streaming.factor", self.streaming.factor)?;
        non_negative("item_interval_factor", self.item_interval_factor)?;
        if let EngineConfig::Fixed {
            max_interval_width: Some(width),
        } = self.engine
        {
            if !(width.is_finite() && width > 0.0) {
                return Err(ConfigError::invalid(
                    "engine.max_interval_width",
                    "must be a positive number",
                ));
            }
        }
        Ok(())
    }

    /// Build the configured engine.
    #[must_use]
    pub fn build_engine(&self) -> ScaleEngine {
        match self.engine {
            EngineConfig::Fixed { max_interval_width } => {
                let mut engine = FixedScaleEngine::new(self.settings);
                engine.set_max_interval_width(max_interval_width);
                ScaleEngine::Fixed(engine)
            }
            EngineConfig::DateTime { mode, fixed_start } => ScaleEngine::DateTime(
                DateTimeScaleEngine::new(self.settings).with_mode(mode, fixed_start),
            ),
            EngineConfig::Linear | EngineConfig::Log10 => {
                ScaleEngine::from_kind(self.engine.kind(), self.settings)
            }
        }
    }
}

fn non_negative(field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, "must be a finite, non-negative number"))
    }
}
