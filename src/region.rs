//! Resolves a region specifier string into a single pixel bounding rectangle.
//!
//! A specifier is either the keyword `fullscreen`, which selects one tile-sized square centered
//! on the screen, or a list of region tokens joined with `+` or `,`. Matching ignores case and
//! whitespace. Each token names a fixed part of the screen and the resolved region is the
//! bounding box of all of them.
//!
//! | Tokens | Area |
//! |---|---|
//! | `full` | whole screen |
//! | `left`/`l`, `right`/`r`, `top`/`t`, `bottom`/`b` | screen halves |
//! | `tl`/`1`, `tr`/`2`, `bl`/`3`, `br`/`4` | screen quadrants |
//! | `nw`, `n`, `ne`, `w`, `center`/`c`, `e`, `sw`, `s`, `se` | cells of a 3×3 grid of thirds |
//!
//! Tokens that are not in the table resolve to the whole screen (see
//! [`UNKNOWN_TOKEN_FALLBACK`]).
//!
//! # Examples
//!
//! ```rust
//! use stimtile::{resolve_region, Rect};
//!
//! let region = resolve_region("SW + center", 100, 1200, 900).unwrap();
//! assert_eq!(region, Rect::new(0, 300, 800, 900));
//!
//! let centered = resolve_region("fullscreen", 100, 1200, 900).unwrap();
//! assert_eq!(centered, Rect::new(550, 400, 650, 500));
//! ```

use crate::error::ConfigError;
use crate::Rect;
use tracing::{debug, warn};

/// Keyword selecting a single tile-sized square in the middle of the screen.
pub const CENTERED_TILE_KEYWORD: &str = "fullscreen";

/// Token every unrecognized region code resolves to.
///
/// An unknown code is not an error: it silently widens the region to the whole screen. A typo
/// in a specifier therefore shows up as a full-screen run, and a warning is logged for it.
pub const UNKNOWN_TOKEN_FALLBACK: RegionToken = RegionToken::Full;

/// The closed set of named screen areas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionToken {
    Full,
    Left,
    Right,
    Top,
    Bottom,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    NorthWest,
    North,
    NorthEast,
    West,
    Center,
    East,
    SouthWest,
    South,
    SouthEast,
}

impl RegionToken {
    /// Looks up a normalized (lowercase, whitespace-free) token code.
    pub fn from_code(code: &str) -> Option<Self> {
        let token = match code {
            "full" => RegionToken::Full,
            "left" | "l" => RegionToken::Left,
            "right" | "r" => RegionToken::Right,
            "top" | "t" => RegionToken::Top,
            "bottom" | "b" => RegionToken::Bottom,
            "tl" | "1" => RegionToken::TopLeft,
            "tr" | "2" => RegionToken::TopRight,
            "bl" | "3" => RegionToken::BottomLeft,
            "br" | "4" => RegionToken::BottomRight,
            "nw" => RegionToken::NorthWest,
            "n" => RegionToken::North,
            "ne" => RegionToken::NorthEast,
            "w" => RegionToken::West,
            "center" | "c" => RegionToken::Center,
            "e" => RegionToken::East,
            "sw" => RegionToken::SouthWest,
            "s" => RegionToken::South,
            "se" => RegionToken::SouthEast,
            _ => return None,
        };
        Some(token)
    }

    /// The rect this token covers on a screen with the given split lines.
    pub fn rect(self, splits: &ScreenSplits) -> Rect {
        let ScreenSplits {
            width: w,
            height: h,
            half_x: hx,
            half_y: hy,
            third_x: tx,
            two_third_x: ttx,
            third_y: ty,
            two_third_y: tty,
        } = *splits;

        match self {
            RegionToken::Full => Rect::new(0, 0, w, h),
            RegionToken::Left => Rect::new(0, 0, hx, h),
            RegionToken::Right => Rect::new(hx, 0, w, h),
            RegionToken::Top => Rect::new(0, 0, w, hy),
            RegionToken::Bottom => Rect::new(0, hy, w, h),
            RegionToken::TopLeft => Rect::new(0, 0, hx, hy),
            RegionToken::TopRight => Rect::new(hx, 0, w, hy),
            RegionToken::BottomLeft => Rect::new(0, hy, hx, h),
            RegionToken::BottomRight => Rect::new(hx, hy, w, h),
            RegionToken::NorthWest => Rect::new(0, 0, tx, ty),
            RegionToken::North => Rect::new(tx, 0, ttx, ty),
            RegionToken::NorthEast => Rect::new(ttx, 0, w, ty),
            RegionToken::West => Rect::new(0, ty, tx, tty),
            RegionToken::Center => Rect::new(tx, ty, ttx, tty),
            RegionToken::East => Rect::new(ttx, ty, w, tty),
            RegionToken::SouthWest => Rect::new(0, tty, tx, h),
            RegionToken::South => Rect::new(tx, tty, ttx, h),
            RegionToken::SouthEast => Rect::new(ttx, tty, w, h),
        }
    }
}

/// Split lines of a screen, computed once per resolution.
///
/// Halves split at `floor(size / 2)`, so the second half gets the extra pixel of an odd size.
/// Thirds split at `floor(size / 3)` and `ceil(2 · size / 3)`: the cells need not be equal, but
/// adjacent cells always share a boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenSplits {
    pub width: u32,
    pub height: u32,
    pub half_x: u32,
    pub half_y: u32,
    pub third_x: u32,
    pub two_third_x: u32,
    pub third_y: u32,
    pub two_third_y: u32,
}

impl ScreenSplits {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            half_x: width / 2,
            half_y: height / 2,
            third_x: width / 3,
            two_third_x: ceil_two_thirds(width),
            third_y: height / 3,
            two_third_y: ceil_two_thirds(height),
        }
    }
}

fn ceil_two_thirds(size: u32) -> u32 {
    ((2 * size as u64 + 2) / 3) as u32
}

/// A parsed region specifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionSpec {
    /// The [`CENTERED_TILE_KEYWORD`]: one tile in the middle of the screen.
    CenteredTile,
    /// A list of tokens whose bounding box is the region.
    Tokens {
        tokens: Vec<RegionToken>,
        /// Codes that were not recognized and were replaced by [`UNKNOWN_TOKEN_FALLBACK`].
        unknown: Vec<String>,
    },
}

impl RegionSpec {
    /// Parses a specifier. Fails only if the centered-tile keyword is combined with other tokens.
    pub fn parse(spec: &str) -> Result<Self, ConfigError> {
        let normalized = regex::Regex::new(r"\s+")
            .unwrap()
            .replace_all(spec, "")
            .to_lowercase();

        if normalized == CENTERED_TILE_KEYWORD {
            return Ok(RegionSpec::CenteredTile);
        }

        let mut tokens = Vec::new();
        let mut unknown = Vec::new();
        for code in regex::Regex::new(r"[+,]").unwrap().split(&normalized) {
            if code.is_empty() {
                continue;
            }
            if code == CENTERED_TILE_KEYWORD {
                return Err(ConfigError::ExclusiveRegionToken {
                    spec: spec.to_string(),
                });
            }
            match RegionToken::from_code(code) {
                Some(token) => tokens.push(token),
                None => {
                    warn!(
                        "Unknown region token '{}' in '{}', using the whole screen",
                        code, spec
                    );
                    tokens.push(UNKNOWN_TOKEN_FALLBACK);
                    unknown.push(code.to_string());
                }
            }
        }

        if tokens.is_empty() {
            warn!("Region '{}' names no tokens, using the whole screen", spec);
            tokens.push(UNKNOWN_TOKEN_FALLBACK);
        }

        Ok(RegionSpec::Tokens { tokens, unknown })
    }

    /// Bounding rect of this specifier on a `screen_width`×`screen_height` screen.
    pub fn bounding_rect(&self, tile_size: u32, screen_width: u32, screen_height: u32) -> Rect {
        match self {
            RegionSpec::CenteredTile => {
                let x1 = screen_width.saturating_sub(tile_size) / 2;
                let y1 = screen_height.saturating_sub(tile_size) / 2;
                Rect::from_origin_size(x1, y1, tile_size, tile_size)
            }
            RegionSpec::Tokens { tokens, .. } => {
                let splits = ScreenSplits::new(screen_width, screen_height);
                tokens
                    .iter()
                    .map(|token| token.rect(&splits))
                    .reduce(|bounds, rect| bounds.union(&rect))
                    .unwrap_or_else(|| UNKNOWN_TOKEN_FALLBACK.rect(&splits))
            }
        }
    }
}

/// Resolves a region specifier into its pixel bounding rect.
///
/// See the [module documentation](self) for the token table. Fails with
/// [`ConfigError::TileLargerThanScreen`] when `tile_size` exceeds either screen side, so the
/// resolved region always lies on screen.
pub fn resolve_region(
    spec: &str,
    tile_size: u32,
    screen_width: u32,
    screen_height: u32,
) -> Result<Rect, ConfigError> {
    if tile_size > screen_width || tile_size > screen_height {
        return Err(ConfigError::TileLargerThanScreen {
            tile_size,
            width: screen_width,
            height: screen_height,
        });
    }
    let region = RegionSpec::parse(spec)?.bounding_rect(tile_size, screen_width, screen_height);
    debug!("Region '{}' resolved to {}", spec, region);
    Ok(region)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(spec: &str) -> Rect {
        resolve_region(spec, 100, 1200, 900).unwrap()
    }

    #[test]
    fn thirds_on_divisible_screen() {
        let splits = ScreenSplits::new(1200, 900);
        assert_eq!((splits.third_x, splits.two_third_x), (400, 800));
        assert_eq!((splits.third_y, splits.two_third_y), (300, 600));
    }

    #[test]
    fn thirds_round_outer_boundary_up() {
        let splits = ScreenSplits::new(1000, 700);
        assert_eq!((splits.third_x, splits.two_third_x), (333, 667));
        assert_eq!((splits.third_y, splits.two_third_y), (233, 467));
    }

    #[test]
    fn sw_and_center_union() {
        assert_eq!(resolve("sw"), Rect::new(0, 600, 400, 900));
        assert_eq!(resolve("center"), Rect::new(400, 300, 800, 600));
        assert_eq!(resolve("sw,center"), Rect::new(0, 300, 800, 900));
    }

    #[test]
    fn case_and_whitespace_are_ignored() {
        assert_eq!(resolve(" S W + Center "), resolve("sw+center"));
    }

    #[test]
    fn numeric_aliases_match_quadrant_codes() {
        for (numeric, named) in [("1", "tl"), ("2", "tr"), ("3", "bl"), ("4", "br")] {
            assert_eq!(resolve(numeric), resolve(named), "alias {numeric}");
        }
    }

    #[test]
    fn quadrants_are_intersections_of_halves() {
        let pairs = [
            ("tl", "left", "top"),
            ("tr", "right", "top"),
            ("bl", "left", "bottom"),
            ("br", "right", "bottom"),
        ];
        for (quadrant, horizontal, vertical) in pairs {
            assert_eq!(
                resolve(horizontal).intersection(&resolve(vertical)),
                Some(resolve(quadrant)),
                "quadrant {quadrant}"
            );
        }
    }

    #[test]
    fn odd_screen_halves_share_a_boundary() {
        let left = resolve_region("l", 10, 1001, 601).unwrap();
        let right = resolve_region("r", 10, 1001, 601).unwrap();

        assert_eq!(left, Rect::new(0, 0, 500, 601));
        assert_eq!(right, Rect::new(500, 0, 1001, 601));
    }

    #[test]
    fn all_third_cells_cover_the_screen() {
        let cells = ["nw", "n", "ne", "w", "c", "e", "sw", "s", "se"];
        let splits = ScreenSplits::new(1000, 700);
        let area: u64 = cells
            .iter()
            .map(|code| RegionToken::from_code(code).unwrap().rect(&splits).area())
            .sum();

        assert_eq!(area, 1000 * 700);
        assert_eq!(
            resolve_region(&cells.join("+"), 10, 1000, 700).unwrap(),
            Rect::screen(1000, 700)
        );
    }

    #[test]
    fn unknown_token_falls_back_to_full_screen() {
        assert_eq!(resolve("nowhere"), Rect::screen(1200, 900));

        let spec = RegionSpec::parse("tl,nowhere").unwrap();
        assert_eq!(
            spec,
            RegionSpec::Tokens {
                tokens: vec![RegionToken::TopLeft, RegionToken::Full],
                unknown: vec!["nowhere".to_string()],
            }
        );
    }

    #[test]
    fn empty_spec_falls_back_to_full_screen() {
        assert_eq!(resolve(""), Rect::screen(1200, 900));
        assert_eq!(resolve(" , + "), Rect::screen(1200, 900));
    }

    #[test]
    fn duplicates_are_harmless() {
        assert_eq!(resolve("tl,tl,1"), resolve("tl"));
    }

    #[test]
    fn centered_tile_keyword_is_case_insensitive() {
        assert_eq!(resolve("FullScreen"), Rect::new(550, 400, 650, 500));
    }

    #[test]
    fn centered_tile_floors_odd_margins() {
        let rect = resolve_region("fullscreen", 101, 1920, 1080).unwrap();
        assert_eq!(rect, Rect::new(909, 489, 1010, 590));
    }

    #[test]
    fn centered_tile_keyword_cannot_be_combined() {
        let error = resolve_region("fullscreen+tl", 100, 1200, 900).unwrap_err();
        assert!(matches!(error, ConfigError::ExclusiveRegionToken { .. }));
    }

    #[test]
    fn tile_larger_than_screen_is_rejected() {
        let error = resolve_region("fullscreen", 1200, 1920, 1080).unwrap_err();
        assert_eq!(
            error,
            ConfigError::TileLargerThanScreen {
                tile_size: 1200,
                width: 1920,
                height: 1080,
            }
        );
        assert!(resolve_region("tl", 2000, 1920, 1080).is_err());
    }

    #[test]
    fn tile_as_large_as_the_short_side_stays_on_screen() {
        let rect = resolve_region("fullscreen", 1080, 1920, 1080).unwrap();
        assert_eq!(rect, Rect::new(420, 0, 1500, 1080));
        assert!(Rect::screen(1920, 1080).contains_rect(&rect));
    }
}
