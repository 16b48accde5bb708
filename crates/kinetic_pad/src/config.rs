//! Pad and player configuration
//!
//! Both configurations deserialize from TOML with every field optional:
//!
//! ```toml
//! direction = "y"
//! autoplay_interval = 3000.0
//!
//! [pad]
//! always_bounce_x = false
//! ```

use kinetic_core::{Axis, AxisMask, ConfigError, Result};
use serde::Deserialize;

/// Default autoplay interval in milliseconds
pub const DEFAULT_AUTOPLAY_INTERVAL_MS: f64 = 5000.0;

/// Configuration for scroll pad behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PadConfig {
    /// Snap resting offsets to multiples of the viewport size
    pub paging_enabled: bool,
    /// Restrict each drag to the axis with the larger initial velocity
    pub directional_lock_enabled: bool,
    /// Allow dragging past the horizontal bounds
    pub always_bounce_x: bool,
    /// Allow dragging past the vertical bounds
    pub always_bounce_y: bool,
    /// Accept pointer input
    pub scroll_enabled: bool,
}

impl Default for PadConfig {
    fn default() -> Self {
        Self {
            paging_enabled: false,
            directional_lock_enabled: false,
            always_bounce_x: true,
            always_bounce_y: true,
            scroll_enabled: true,
        }
    }
}

impl PadConfig {
    /// Paging pad with single-axis drags
    pub fn paged() -> Self {
        Self {
            paging_enabled: true,
            directional_lock_enabled: true,
            ..Default::default()
        }
    }

    /// Pad that never moves past its bounds
    pub fn no_bounce() -> Self {
        Self {
            always_bounce_x: false,
            always_bounce_y: false,
            ..Default::default()
        }
    }

    /// Per-axis bounce flags
    pub fn bounce(&self) -> AxisMask {
        AxisMask::new(self.always_bounce_x, self.always_bounce_y)
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

/// Configuration for the looping carousel player
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub pad: PadConfig,
    /// Carousel scroll axis
    pub direction: Axis,
    pub autoplay_enabled: bool,
    /// Delay between autoplay advances, in milliseconds
    pub autoplay_interval: f64,
    /// Replicate the item so scrolling never reaches an end
    #[serde(rename = "loop")]
    pub loop_enabled: bool,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            pad: PadConfig::paged(),
            direction: Axis::X,
            autoplay_enabled: true,
            autoplay_interval: DEFAULT_AUTOPLAY_INTERVAL_MS,
            loop_enabled: true,
        }
    }
}

impl PlayerConfig {
    /// Vertical carousel with default behavior
    pub fn vertical() -> Self {
        Self {
            direction: Axis::Y,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.autoplay_interval.is_finite() || self.autoplay_interval < 0.0 {
            return Err(ConfigError::InvalidAutoplayInterval(self.autoplay_interval));
        }
        Ok(())
    }

    /// Copy with invalid values replaced by safe ones.
    ///
    /// An invalid autoplay interval disables autoplay.
    pub fn normalized(mut self) -> Self {
        if let Err(err) = self.validate() {
            tracing::warn!("{}; autoplay disabled", err);
            self.autoplay_enabled = false;
            self.autoplay_interval = DEFAULT_AUTOPLAY_INTERVAL_MS;
        }
        self
    }

    /// Pad configuration as applied by the player: the cross axis never
    /// bounces.
    pub fn effective_pad(&self) -> PadConfig {
        let mut pad = self.pad;
        match self.direction {
            Axis::X => pad.always_bounce_y = false,
            Axis::Y => pad.always_bounce_x = false,
        }
        pad
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}
