//! Carousel configuration.
//!
//! All fields have production defaults, so an empty TOML document is a valid
//! configuration:
//!
//! ```toml
//! autoplay = true
//! autoplay_interval_ms = 6500
//! swipe_distance_threshold = 50.0
//! swipe_velocity_threshold = 500.0
//! velocity_window_ms = 100
//! ```

use std::path::Path;
use std::time::Duration;

use banner_carousel_core::logging::targets;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default autoplay interval in milliseconds.
pub const DEFAULT_AUTOPLAY_INTERVAL_MS: u64 = 6500;

/// Default minimum horizontal drag distance, in logical pixels, that commits a swipe.
pub const DEFAULT_SWIPE_DISTANCE_THRESHOLD: f32 = 50.0;

/// Default minimum release velocity, in pixels per second, that commits a swipe.
pub const DEFAULT_SWIPE_VELOCITY_THRESHOLD: f32 = 500.0;

/// Default window of pointer samples used to estimate release velocity.
pub const DEFAULT_VELOCITY_WINDOW_MS: u64 = 100;

/// Configuration for a [`Carousel`](crate::Carousel).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CarouselConfig {
    /// Whether slides advance on their own.
    pub autoplay: bool,
    /// Time between automatic advances.
    pub autoplay_interval_ms: u64,
    /// Drag distance that commits a swipe regardless of velocity.
    pub swipe_distance_threshold: f32,
    /// Release velocity that commits a swipe regardless of distance.
    pub swipe_velocity_threshold: f32,
    /// How far back pointer samples are considered when estimating velocity.
    pub velocity_window_ms: u64,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            autoplay: true,
            autoplay_interval_ms: DEFAULT_AUTOPLAY_INTERVAL_MS,
            swipe_distance_threshold: DEFAULT_SWIPE_DISTANCE_THRESHOLD,
            swipe_velocity_threshold: DEFAULT_SWIPE_VELOCITY_THRESHOLD,
            velocity_window_ms: DEFAULT_VELOCITY_WINDOW_MS,
        }
    }
}

impl CarouselConfig {
    /// Parse and validate a configuration from TOML text.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(
            target: targets::CONFIG,
            path = %path.display(),
            ?config,
            "loaded carousel configuration"
        );
        Ok(config)
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> Result<()> {
        if self.autoplay_interval_ms == 0 {
            return Err(Error::invalid_value(
                "autoplay_interval_ms",
                "must be greater than zero",
            ));
        }
        if !(self.swipe_distance_threshold.is_finite() && self.swipe_distance_threshold > 0.0) {
            return Err(Error::invalid_value(
                "swipe_distance_threshold",
                format!("must be a positive number, got {}", self.swipe_distance_threshold),
            ));
        }
        if !(self.swipe_velocity_threshold.is_finite() && self.swipe_velocity_threshold > 0.0) {
            return Err(Error::invalid_value(
                "swipe_velocity_threshold",
                format!("must be a positive number, got {}", self.swipe_velocity_threshold),
            ));
        }
        if self.velocity_window_ms == 0 {
            return Err(Error::invalid_value(
                "velocity_window_ms",
                "must be greater than zero",
            ));
        }
        Ok(())
    }

    /// The autoplay interval as a [`Duration`].
    pub fn autoplay_interval(&self) -> Duration {
        Duration::from_millis(self.autoplay_interval_ms)
    }

    /// The velocity sampling window as a [`Duration`].
    pub fn velocity_window(&self) -> Duration {
        Duration::from_millis(self.velocity_window_ms)
    }

    /// Enable or disable autoplay using builder pattern.
    pub fn with_autoplay(mut self, autoplay: bool) -> Self {
        self.autoplay = autoplay;
        self
    }

    /// Set the autoplay interval using builder pattern.
    ///
    /// Sub-millisecond precision is dropped.
    pub fn with_autoplay_interval(mut self, interval: Duration) -> Self {
        self.autoplay_interval_ms = u64::try_from(interval.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Set both swipe thresholds using builder pattern.
    pub fn with_swipe_thresholds(mut self, distance: f32, velocity: f32) -> Self {
        self.swipe_distance_threshold = distance;
        self.swipe_velocity_threshold = velocity;
        self
    }

    /// Set the velocity sampling window using builder pattern.
    pub fn with_velocity_window(mut self, window: Duration) -> Self {
        self.velocity_window_ms = u64::try_from(window.as_millis()).unwrap_or(u64::MAX);
        self
    }
}
