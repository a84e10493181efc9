use serde::{Deserialize, Serialize};

/// Represents a color in RGBA format.
///
/// Used for the fill of mask rectangles and for the display background. Each channel is an
/// 8-bit unsigned integer; gamma correction is left to the rendering backend.
///
/// # Examples
///
/// ```
/// use stimtile::Color;
///
/// let gray = Color::MID_GRAY;
/// assert_eq!(gray.to_array(), [128, 128, 128, 255]);
///
/// let red = Color::rgb(255, 0, 0);
/// assert_eq!(red.normalize(), [1.0, 0.0, 0.0, 1.0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Color(pub [u8; 4]);

impl Color {
    /// A transparent color.
    pub const TRANSPARENT: Self = Self([0, 0, 0, 0]);
    /// Opaque black. Default fill of mask rectangles.
    pub const BLACK: Self = Self([0, 0, 0, 255]);
    /// Opaque white.
    pub const WHITE: Self = Self([255, 255, 255, 255]);
    /// Opaque mid-level gray, the usual background between trials.
    pub const MID_GRAY: Self = Self([128, 128, 128, 255]);

    /// Creates a new color with the specified RGB values and full opacity.
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b, 255])
    }

    /// Creates a new color with the specified RGBA values.
    pub fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self([r, g, b, a])
    }

    /// Normalizes the color values to the range [0.0, 1.0].
    pub fn normalize(&self) -> [f32; 4] {
        [
            self.0[0] as f32 / 255.0,
            self.0[1] as f32 / 255.0,
            self.0[2] as f32 / 255.0,
            self.0[3] as f32 / 255.0,
        ]
    }

    /// Returns the color as an array of 4 `u8` values.
    pub fn to_array(&self) -> [u8; 4] {
        self.0
    }
}
