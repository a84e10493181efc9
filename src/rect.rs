//! Integer pixel rectangles.
//!
//! Every piece of geometry handled by this crate (regions, tiles, padding strips and exterior
//! masks) is an axis-aligned [`Rect`] in screen pixels, with the origin at the top-left corner
//! of the screen and `y` growing downwards. Bounds are half-open: a rect covers the pixels
//! `x1..x2` horizontally and `y1..y2` vertically.
//!
//! # Examples
//!
//! ```rust
//! use stimtile::Rect;
//!
//! let left = Rect::new(0, 0, 960, 1080);
//! let top = Rect::new(0, 0, 1920, 540);
//!
//! assert_eq!(left.intersection(&top), Some(Rect::new(0, 0, 960, 540)));
//! assert_eq!(left.union(&top), Rect::new(0, 0, 1920, 1080));
//! assert_eq!(left.width(), 960);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// An axis-aligned pixel rectangle `(x1, y1, x2, y2)` with half-open bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x1: u32,
    pub y1: u32,
    pub x2: u32,
    pub y2: u32,
}

impl Rect {
    #[inline]
    pub const fn new(x1: u32, y1: u32, x2: u32, y2: u32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// The rect covering a whole `width`×`height` screen.
    #[inline]
    pub const fn screen(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Creates a rect from its top-left corner and size.
    #[inline]
    pub const fn from_origin_size(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.x2.saturating_sub(self.x1)
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.y2.saturating_sub(self.y1)
    }

    /// Number of pixels covered by the rect.
    #[inline]
    pub fn area(&self) -> u64 {
        self.width() as u64 * self.height() as u64
    }

    /// True if the rect covers no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x1 >= self.x2 || self.y1 >= self.y2
    }

    /// Geometric center of the rect in pixel coordinates.
    #[inline]
    pub fn center(&self) -> (f64, f64) {
        (
            (self.x1 as f64 + self.x2 as f64) / 2.0,
            (self.y1 as f64 + self.y2 as f64) / 2.0,
        )
    }

    /// Smallest rect containing both `self` and `other`.
    pub fn union(&self, other: &Rect) -> Rect {
        Rect {
            x1: self.x1.min(other.x1),
            y1: self.y1.min(other.y1),
            x2: self.x2.max(other.x2),
            y2: self.y2.max(other.y2),
        }
    }

    /// Overlapping part of two rects, or `None` if they share no pixel.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let rect = Rect {
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
            x2: self.x2.min(other.x2),
            y2: self.y2.min(other.y2),
        };
        (!rect.is_empty()).then_some(rect)
    }

    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.intersection(other).is_some()
    }

    /// True if every pixel of `other` lies inside `self`.
    #[inline]
    pub fn contains_rect(&self, other: &Rect) -> bool {
        self.x1 <= other.x1 && self.y1 <= other.y1 && self.x2 >= other.x2 && self.y2 >= other.y2
    }

    #[inline]
    pub fn contains_point(&self, x: u32, y: u32) -> bool {
        x >= self.x1 && x < self.x2 && y >= self.y1 && y < self.y2
    }

    /// Returns the bounds as `[x1, y1, x2, y2]`.
    #[inline]
    pub fn to_array(&self) -> [u32; 4] {
        [self.x1, self.y1, self.x2, self.y2]
    }
}

impl From<[u32; 4]> for Rect {
    fn from(bounds: [u32; 4]) -> Self {
        Rect::new(bounds[0], bounds[1], bounds[2], bounds[3])
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}, {}]", self.x1, self.y1, self.x2, self.y2)
    }
}
