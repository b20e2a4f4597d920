//! Emitter configuration.
//!
//! Every field has a default, so a config file only needs the fields it
//! changes. Call [`EmitterConfig::validate`] (or construct an `Emitter`, which
//! does) before use.

use crate::animation::EasingType;
use crate::errors::HeartsError;
use crate::heart::DEFAULT_HEART_SIZE;
use crate::types::Color;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::instrument;

/// Lifetime of every shape's timeline.
pub const DEFAULT_DURATION_MS: u64 = 2000;
pub const DEFAULT_RIGHT_MIN: f64 = 50.0;
pub const DEFAULT_RIGHT_MAX: f64 = 150.0;

/// How many shapes a count increase produces.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpawnPolicy {
    /// One shape per increasing update, no matter how large the jump.
    #[default]
    Single,
    /// One shape per unit of increase.
    PerIncrement,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitterConfig {
    /// Palette each new shape picks its color from.
    pub colors: Vec<Color>,
    /// Lower bound (inclusive) of the random horizontal offset.
    pub right_min: f64,
    /// Upper bound (exclusive) of the random horizontal offset.
    pub right_max: f64,
    pub duration_ms: u64,
    /// Scale a shape shrinks to by the time it reaches the top.
    pub shrink_to: f64,
    pub easing: EasingType,
    pub spawn_policy: SpawnPolicy,
    pub heart_size: f64,
    /// Fixed RNG seed; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            colors: vec![
                Color::from_rgba8(255, 0, 0, 255),
                Color::from_rgba8(255, 192, 203, 255),
            ],
            right_min: DEFAULT_RIGHT_MIN,
            right_max: DEFAULT_RIGHT_MAX,
            duration_ms: DEFAULT_DURATION_MS,
            shrink_to: 1.0,
            easing: EasingType::default(),
            spawn_policy: SpawnPolicy::default(),
            heart_size: DEFAULT_HEART_SIZE,
            seed: None,
        }
    }
}

impl EmitterConfig {
    pub fn with_colors(mut self, colors: Vec<Color>) -> Self {
        self.colors = colors;
        self
    }

    pub fn with_offset_range(mut self, min: f64, max: f64) -> Self {
        self.right_min = min;
        self.right_max = max;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_easing(mut self, easing: EasingType) -> Self {
        self.easing = easing;
        self
    }

    pub fn with_spawn_policy(mut self, policy: SpawnPolicy) -> Self {
        self.spawn_policy = policy;
        self
    }

    pub fn with_shrink_to(mut self, shrink_to: f64) -> Self {
        self.shrink_to = shrink_to;
        self
    }

    pub fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// Timeline duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.duration_ms as f64 / 1000.0
    }

    pub fn validate(&self) -> Result<(), HeartsError> {
        if self.colors.is_empty() {
            return Err(HeartsError::EmptyPalette);
        }
        validate_offset_range(self.right_min, self.right_max)?;
        if self.duration_ms == 0 {
            return Err(HeartsError::InvalidDuration);
        }
        if !self.shrink_to.is_finite() || self.shrink_to < 0.0 {
            return Err(HeartsError::InvalidShrink(self.shrink_to));
        }
        if !self.heart_size.is_finite() || self.heart_size <= 0.0 {
            return Err(HeartsError::InvalidHeartSize(self.heart_size));
        }
        Ok(())
    }

    pub fn from_json_str(json: &str) -> Result<Self, HeartsError> {
        let config: EmitterConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    #[instrument(level = "debug", skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, HeartsError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&text)
    }
}

/// Bounds must be finite, ordered, and span a finite width.
pub(crate) fn validate_offset_range(min: f64, max: f64) -> Result<(), HeartsError> {
    if !min.is_finite() || !max.is_finite() || min > max || !(max - min).is_finite() {
        return Err(HeartsError::InvalidOffsetRange { min, max });
    }
    Ok(())
}
