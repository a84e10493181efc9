//! Subdivides a region into a uniform grid of square tiles.
//!
//! The tiles are packed in the middle of the region. Whatever is left over because the region
//! is not a multiple of the tile size becomes up to four padding strips inside the region, and
//! the screen outside the region is covered by up to four exterior masks. Tiles, padding strips
//! and exterior masks together partition the screen exactly.
//!
//! # Examples
//!
//! ```rust
//! use stimtile::{tile_region, Rect, TileIndex};
//!
//! let grid = tile_region(1920, 1080, 200, Rect::new(0, 0, 960, 540));
//!
//! assert_eq!((grid.nx(), grid.ny()), (4, 2));
//! assert_eq!(grid.len(), 8);
//! assert_eq!(grid.tile(TileIndex(0)), Some(Rect::new(80, 70, 280, 270)));
//! ```

use crate::{Rect, TileIndex};
use smallvec::SmallVec;
use tracing::debug;

/// Which side of an area a strip lies on, in screen coordinates (`y` grows downwards).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Adjacent to the smaller `x` bound.
    MinX,
    /// Adjacent to the larger `x` bound.
    MaxX,
    /// Adjacent to the smaller `y` bound, i.e. the upper edge on screen.
    MinY,
    /// Adjacent to the larger `y` bound, i.e. the lower edge on screen.
    MaxY,
}

/// A padding strip or exterior mask together with the side it lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Strip {
    pub side: Side,
    pub rect: Rect,
}

pub type Strips = SmallVec<[Strip; 4]>;

/// A region subdivided into `nx`×`ny` square tiles.
///
/// Tiles are stored column-major: tile `(ix, iy)` has index `ix * ny + iy`.
#[derive(Debug, Clone, PartialEq)]
pub struct TileGrid {
    screen_size: (u32, u32),
    region: Rect,
    tile_size: u32,
    nx: usize,
    ny: usize,
    x_pad: u32,
    y_pad: u32,
    tiles: Vec<Rect>,
    internal_edges: Strips,
    external_masks: Strips,
}

/// Tiles `region` with `tile_size`×`tile_size` squares.
///
/// When the remainder of the region in one axis is odd, the extra pixel goes to the strip on the
/// larger-coordinate side. If not a single tile fits (including `tile_size == 0`) the returned grid
/// has no tiles; check [`TileGrid::is_empty`] before scheduling.
pub fn tile_region(
    screen_width: u32,
    screen_height: u32,
    tile_size: u32,
    region: Rect,
) -> TileGrid {
    let region_width = region.width();
    let region_height = region.height();

    let (nx, ny) = if tile_size == 0 {
        (0, 0)
    } else {
        (region_width / tile_size, region_height / tile_size)
    };

    let remaining_width = region_width - nx * tile_size;
    let remaining_height = region_height - ny * tile_size;
    let x_pad = remaining_width / 2;
    let y_pad = remaining_height / 2;
    let max_x_pad = remaining_width - x_pad;
    let max_y_pad = remaining_height - y_pad;

    let mut tiles = Vec::with_capacity(nx as usize * ny as usize);
    for ix in 0..nx {
        for iy in 0..ny {
            tiles.push(Rect::from_origin_size(
                region.x1 + x_pad + ix * tile_size,
                region.y1 + y_pad + iy * tile_size,
                tile_size,
                tile_size,
            ));
        }
    }

    let mut internal_edges = Strips::new();
    if x_pad > 0 {
        internal_edges.push(Strip {
            side: Side::MinX,
            rect: Rect::new(region.x1, region.y1, region.x1 + x_pad, region.y2),
        });
    }
    if max_x_pad > 0 {
        internal_edges.push(Strip {
            side: Side::MaxX,
            rect: Rect::new(region.x2 - max_x_pad, region.y1, region.x2, region.y2),
        });
    }
    // The vertical strips own the corners, so these only span the tiled columns.
    let tiled_x1 = region.x1 + x_pad;
    let tiled_x2 = region.x2 - max_x_pad;
    if y_pad > 0 && tiled_x1 < tiled_x2 {
        internal_edges.push(Strip {
            side: Side::MinY,
            rect: Rect::new(tiled_x1, region.y1, tiled_x2, region.y1 + y_pad),
        });
    }
    if max_y_pad > 0 && tiled_x1 < tiled_x2 {
        internal_edges.push(Strip {
            side: Side::MaxY,
            rect: Rect::new(tiled_x1, region.y2 - max_y_pad, tiled_x2, region.y2),
        });
    }

    let external_masks = exterior_masks(screen_width, screen_height, region);

    debug!(
        "Tiled region {} with {}px tiles: {}x{} grid, padding ({}, {}), {} edge strips, {} masks",
        region,
        tile_size,
        nx,
        ny,
        x_pad,
        y_pad,
        internal_edges.len(),
        external_masks.len()
    );

    TileGrid {
        screen_size: (screen_width, screen_height),
        region,
        tile_size,
        nx: nx as usize,
        ny: ny as usize,
        x_pad,
        y_pad,
        tiles,
        internal_edges,
        external_masks,
    }
}

/// Rects covering the screen outside `region`.
///
/// The `MinX`/`MaxX` masks span the full screen height; the `MinY`/`MaxY` masks only span the
/// region's horizontal extent so that no pixel is covered twice.
pub fn exterior_masks(screen_width: u32, screen_height: u32, region: Rect) -> Strips {
    let mut masks = Strips::new();
    if region.x1 > 0 {
        masks.push(Strip {
            side: Side::MinX,
            rect: Rect::new(0, 0, region.x1, screen_height),
        });
    }
    if region.x2 < screen_width {
        masks.push(Strip {
            side: Side::MaxX,
            rect: Rect::new(region.x2, 0, screen_width, screen_height),
        });
    }
    if region.y1 > 0 {
        masks.push(Strip {
            side: Side::MinY,
            rect: Rect::new(region.x1, 0, region.x2, region.y1),
        });
    }
    if region.y2 < screen_height {
        masks.push(Strip {
            side: Side::MaxY,
            rect: Rect::new(region.x1, region.y2, region.x2, screen_height),
        });
    }
    masks
}

impl TileGrid {
    #[inline]
    pub fn screen_size(&self) -> (u32, u32) {
        self.screen_size
    }

    #[inline]
    pub fn region(&self) -> Rect {
        self.region
    }

    #[inline]
    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Number of tile columns.
    #[inline]
    pub fn nx(&self) -> usize {
        self.nx
    }

    /// Number of tile rows.
    #[inline]
    pub fn ny(&self) -> usize {
        self.ny
    }

    /// Width of the padding strip on the `MinX` side.
    #[inline]
    pub fn x_pad(&self) -> u32 {
        self.x_pad
    }

    /// Height of the padding strip on the `MinY` side.
    #[inline]
    pub fn y_pad(&self) -> u32 {
        self.y_pad
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// All tiles in column-major order.
    #[inline]
    pub fn tiles(&self) -> &[Rect] {
        &self.tiles
    }

    #[inline]
    pub fn tile(&self, index: TileIndex) -> Option<Rect> {
        self.tiles.get(index.0).copied()
    }

    /// Column-major index of the tile in column `ix` and row `iy` (both 0-based).
    #[inline]
    pub fn index_of(&self, ix: usize, iy: usize) -> TileIndex {
        TileIndex(ix * self.ny + iy)
    }

    /// Inverse of [`index_of`](Self::index_of).
    #[inline]
    pub fn column_row(&self, index: TileIndex) -> (usize, usize) {
        (index.0 / self.ny, index.0 % self.ny)
    }

    /// Leftover space inside the region that no tile covers.
    ///
    /// `MinX` and `MaxX` strips span the full region height. `MinY` and `MaxY` strips only span
    /// the tiled columns, since the corners already belong to the vertical strips. Tiles and
    /// strips together cover the region exactly once.
    #[inline]
    pub fn internal_edges(&self) -> &[Strip] {
        &self.internal_edges
    }

    /// Screen area outside the region.
    #[inline]
    pub fn external_masks(&self) -> &[Strip] {
        &self.external_masks
    }

    /// Rects that stay masked during every trial: exterior masks followed by padding strips.
    pub fn fixed_masks(&self) -> impl Iterator<Item = Rect> + '_ {
        self.external_masks
            .iter()
            .chain(self.internal_edges.iter())
            .map(|strip| strip.rect)
    }
}
