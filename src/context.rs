use crate::config::is_positive_finite;
use crate::error::ConfigError;
use crate::util::{degrees_to_pixels, pixels_per_cm};
use crate::{Color, Rect, SessionConfig};

/// Physical description of the display a run is shown on.
///
/// Constructed once by the caller and passed by reference into
/// [`Session::new`](crate::Session::new). Optional fields fall back to a default chosen by the
/// caller at the point of use.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayContext {
    pub screen_width: u32,
    pub screen_height: u32,
    /// Visible width of the display in millimeters.
    pub display_width_mm: f64,
    /// Background between trials, if the backend has a calibrated one.
    pub background: Option<Color>,
}

impl DisplayContext {
    pub fn new(screen_width: u32, screen_height: u32, display_width_mm: f64) -> Self {
        Self {
            screen_width,
            screen_height,
            display_width_mm,
            background: None,
        }
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = Some(background);
        self
    }

    #[inline]
    pub fn screen_size(&self) -> (u32, u32) {
        (self.screen_width, self.screen_height)
    }

    #[inline]
    pub fn screen_rect(&self) -> Rect {
        Rect::screen(self.screen_width, self.screen_height)
    }

    /// The configured background, or `default` when none is set.
    #[inline]
    pub fn background_or(&self, default: Color) -> Color {
        self.background.unwrap_or(default)
    }

    #[inline]
    pub fn pixels_per_cm(&self) -> f64 {
        pixels_per_cm(self.screen_width, self.display_width_mm)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.screen_width == 0 || self.screen_height == 0 {
            return Err(ConfigError::ZeroScreen {
                width: self.screen_width,
                height: self.screen_height,
            });
        }
        if !is_positive_finite(self.display_width_mm) {
            return Err(ConfigError::InvalidViewingGeometry {
                field: "display_width_mm",
                value: self.display_width_mm,
            });
        }
        Ok(())
    }

    /// Tile side in pixels for `config`, checked against the screen size.
    pub fn tile_size_px(&self, config: &SessionConfig) -> Result<u32, ConfigError> {
        let tile_size = match config.tile_size_px {
            Some(tile_size) => tile_size,
            None => degrees_to_pixels(
                config.tile_degrees,
                config.viewing_distance_cm,
                self.pixels_per_cm(),
            ),
        };

        if tile_size == 0 {
            return Err(ConfigError::ZeroTileSize);
        }
        if tile_size > self.screen_width || tile_size > self.screen_height {
            return Err(ConfigError::TileLargerThanScreen {
                tile_size,
                width: self.screen_width,
                height: self.screen_height,
            });
        }
        Ok(tile_size)
    }
}
