use crate::error::ConfigError;
use crate::scheduler::ScheduleOptions;
use crate::Color;
use serde::{Deserialize, Serialize};

/// Everything a caller configures for one presentation run.
///
/// Every field has a default, so a partially filled config file deserializes into a usable
/// record. Validation happens eagerly in [`Session::new`](crate::Session::new).
///
/// # Examples
///
/// ```rust
/// use stimtile::SessionConfig;
///
/// let config = SessionConfig::default()
///     .with_region("tl+tr")
///     .with_tile_degrees(4.0)
///     .with_cycles(3)
///     .with_seed(1234);
///
/// assert!(config.validate().is_ok());
/// assert_eq!(config.viewing_distance_cm, 57.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Region specifier, see [`resolve_region`](crate::resolve_region). Default `"full"`.
    pub region: String,
    /// Tile side as a visual angle in degrees. Default 5.
    pub tile_degrees: f64,
    /// Eye-to-screen distance in centimeters. Default 57, where 1 cm spans about 1 degree.
    pub viewing_distance_cm: f64,
    /// Tile side in pixels. Overrides the conversion from `tile_degrees` when set. Default unset.
    pub tile_size_px: Option<u32>,
    /// Number of cycles. Default 1.
    pub n_cycles: u32,
    /// Stimulus frames per trial. Default 1.
    pub frames_per_trial: u32,
    /// Seed of the order generator. Default unset, which seeds from system entropy.
    pub seed: Option<u64>,
    /// Fill of masked areas. Default black.
    pub mask_color: Color,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            region: "full".to_string(),
            tile_degrees: 5.0,
            viewing_distance_cm: 57.0,
            tile_size_px: None,
            n_cycles: 1,
            frames_per_trial: 1,
            seed: None,
            mask_color: Color::BLACK,
        }
    }
}

impl SessionConfig {
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    pub fn with_tile_degrees(mut self, tile_degrees: f64) -> Self {
        self.tile_degrees = tile_degrees;
        self
    }

    pub fn with_viewing_distance_cm(mut self, viewing_distance_cm: f64) -> Self {
        self.viewing_distance_cm = viewing_distance_cm;
        self
    }

    pub fn with_tile_size_px(mut self, tile_size_px: u32) -> Self {
        self.tile_size_px = Some(tile_size_px);
        self
    }

    pub fn with_cycles(mut self, n_cycles: u32) -> Self {
        self.n_cycles = n_cycles;
        self
    }

    pub fn with_frames_per_trial(mut self, frames_per_trial: u32) -> Self {
        self.frames_per_trial = frames_per_trial;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_mask_color(mut self, mask_color: Color) -> Self {
        self.mask_color = mask_color;
        self
    }

    pub fn schedule_options(&self) -> ScheduleOptions {
        ScheduleOptions {
            n_cycles: self.n_cycles,
            frames_per_trial: self.frames_per_trial,
            mask_color: self.mask_color,
        }
    }

    /// Checks the fields that can be judged without knowing the display.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tile_size_px.is_none() {
            if !(is_positive_finite(self.tile_degrees) && self.tile_degrees < 180.0) {
                return Err(ConfigError::InvalidViewingGeometry {
                    field: "tile_degrees",
                    value: self.tile_degrees,
                });
            }
            if !is_positive_finite(self.viewing_distance_cm) {
                return Err(ConfigError::InvalidViewingGeometry {
                    field: "viewing_distance_cm",
                    value: self.viewing_distance_cm,
                });
            }
        }
        if self.tile_size_px == Some(0) {
            return Err(ConfigError::ZeroTileSize);
        }
        self.schedule_options().validate()
    }
}

pub(crate) fn is_positive_finite(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
