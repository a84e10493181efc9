use stimtile::{resolve_region, tile_region, Rect, TileGrid};

/// A screen, a region specifier and a tile size, with a label for failure messages.
#[derive(Debug, Clone, Copy)]
pub struct GridScene {
    pub label: &'static str,
    pub screen_width: u32,
    pub screen_height: u32,
    pub region: &'static str,
    pub tile_size: u32,
}

impl GridScene {
    pub const fn new(
        label: &'static str,
        screen_width: u32,
        screen_height: u32,
        region: &'static str,
        tile_size: u32,
    ) -> Self {
        Self {
            label,
            screen_width,
            screen_height,
            region,
            tile_size,
        }
    }

    pub fn screen(&self) -> Rect {
        Rect::screen(self.screen_width, self.screen_height)
    }

    /// Resolves the region. Panics on an invalid specifier; scenes are meant to be valid.
    pub fn region_rect(&self) -> Rect {
        resolve_region(
            self.region,
            self.tile_size,
            self.screen_width,
            self.screen_height,
        )
        .unwrap_or_else(|error| panic!("[{}] {error}", self.label))
    }

    pub fn build(&self) -> TileGrid {
        tile_region(
            self.screen_width,
            self.screen_height,
            self.tile_size,
            self.region_rect(),
        )
    }
}

/// Scenes covering exact fits, odd remainders on either axis, regions touching zero to four
/// screen edges and the centered single tile.
pub fn main_scenes() -> Vec<GridScene> {
    vec![
        GridScene::new("full_hd_top_left", 1920, 1080, "tl", 200),
        GridScene::new("full_hd_full", 1920, 1080, "full", 120),
        GridScene::new("full_hd_centered_tile", 1920, 1080, "fullscreen", 333),
        GridScene::new("sxga_sw_center", 1200, 900, "sw,center", 100),
        GridScene::new("sxga_exact_fit", 1200, 900, "full", 300),
        GridScene::new("odd_right_half", 1001, 777, "r", 64),
        GridScene::new("odd_bottom_half", 1001, 777, "bottom", 97),
        GridScene::new("odd_center_third", 1001, 777, "c", 45),
        GridScene::new("vga_north_south", 640, 480, "n+s", 37),
        GridScene::new("vga_quadrant_pair", 640, 480, "1,4", 51),
        GridScene::new("vga_east", 640, 480, "e", 13),
        GridScene::new("unknown_token", 800, 600, "nowhere", 150),
    ]
}
