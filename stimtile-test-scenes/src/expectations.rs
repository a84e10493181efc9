use stimtile::{GridPosition, IndexMap, Rect, TileGrid, TrialSequence};

/// Per-pixel cover counts of a screen, used to check that a set of rects tiles an area exactly.
pub struct Coverage {
    width: u32,
    height: u32,
    counts: Vec<u8>,
    offscreen: u64,
}

impl Coverage {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            counts: vec![0; width as usize * height as usize],
            offscreen: 0,
        }
    }

    /// Adds one cover to every pixel of `rect`. Pixels past the screen edge are counted apart
    /// and always reported as strays.
    pub fn add(&mut self, rect: &Rect) {
        let x2 = rect.x2.min(self.width);
        let y2 = rect.y2.min(self.height);
        let onscreen = x2.saturating_sub(rect.x1) as u64 * y2.saturating_sub(rect.y1) as u64;
        self.offscreen += rect.area() - onscreen;
        for y in rect.y1..y2 {
            let row = y as usize * self.width as usize;
            for x in rect.x1..x2 {
                let count = &mut self.counts[row + x as usize];
                *count = count.saturating_add(1);
            }
        }
    }

    /// Describes pixels inside `area` not covered exactly once, and covered pixels outside it.
    ///
    /// Reports at most one gap and one overlap sample plus totals, to keep messages readable.
    pub fn failures(&self, label: &str, area: &Rect) -> Vec<String> {
        let mut gaps = 0usize;
        let mut overlaps = 0usize;
        let mut strays = 0usize;
        let mut first_gap = None;
        let mut first_overlap = None;
        let mut first_stray = None;

        for y in 0..self.height {
            for x in 0..self.width {
                let count = self.counts[y as usize * self.width as usize + x as usize];
                if area.contains_point(x, y) {
                    if count == 0 {
                        gaps += 1;
                        first_gap.get_or_insert((x, y));
                    } else if count > 1 {
                        overlaps += 1;
                        first_overlap.get_or_insert((x, y));
                    }
                } else if count > 0 {
                    strays += 1;
                    first_stray.get_or_insert((x, y));
                }
            }
        }

        let mut failures = Vec::new();
        if let Some((x, y)) = first_gap {
            failures.push(format!(
                "[{label}] {gaps} uncovered pixel(s) inside {area}, first at ({x},{y})"
            ));
        }
        if let Some((x, y)) = first_overlap {
            failures.push(format!(
                "[{label}] {overlaps} pixel(s) covered more than once inside {area}, first at ({x},{y})"
            ));
        }
        if let Some((x, y)) = first_stray {
            failures.push(format!(
                "[{label}] {strays} pixel(s) covered outside {area}, first at ({x},{y})"
            ));
        }
        if self.offscreen > 0 {
            failures.push(format!(
                "[{label}] {} pixel(s) covered past the {}x{} screen",
                self.offscreen, self.width, self.height
            ));
        }
        failures
    }
}

/// Checks that tiles and padding strips cover the grid's region exactly once and nothing else.
pub fn check_region_coverage(label: &str, grid: &TileGrid) -> Vec<String> {
    let (width, height) = grid.screen_size();
    let mut coverage = Coverage::new(width, height);
    for tile in grid.tiles() {
        coverage.add(tile);
    }
    for strip in grid.internal_edges() {
        coverage.add(&strip.rect);
    }
    coverage.failures(label, &grid.region())
}

/// Checks that the region plus the exterior masks cover the screen exactly once.
pub fn check_screen_partition(label: &str, grid: &TileGrid) -> Vec<String> {
    let (width, height) = grid.screen_size();
    let mut coverage = Coverage::new(width, height);
    coverage.add(&grid.region());
    for mask in grid.external_masks() {
        coverage.add(&mask.rect);
    }
    coverage.failures(label, &Rect::screen(width, height))
}

/// Checks a completed sequence: every cycle is a permutation of all positions, and every
/// record's row, column and center agree with the tile the position maps to.
pub fn check_schedule(
    label: &str,
    grid: &TileGrid,
    sequence: &TrialSequence,
    n_cycles: usize,
) -> Vec<String> {
    let mut failures = Vec::new();
    let tile_count = grid.len();
    let index_map = IndexMap::for_grid(grid);
    let (width, height) = grid.screen_size();

    if sequence.len() != tile_count * n_cycles {
        failures.push(format!(
            "[{label}] expected {} records but got {}",
            tile_count * n_cycles,
            sequence.len()
        ));
        return failures;
    }

    for (cycle, records) in sequence.records().chunks(tile_count).enumerate() {
        let mut seen = vec![false; tile_count];
        for record in records {
            let position = record.position.get();
            if position == 0 || position > tile_count || seen[position - 1] {
                failures.push(format!(
                    "[{label}] cycle {} repeats or exceeds position {position}",
                    cycle + 1
                ));
                continue;
            }
            seen[position - 1] = true;
        }
    }

    for (trial, record) in sequence.records().iter().enumerate() {
        let Some(tile) = index_map.get(record.position) else {
            continue;
        };
        let rect = grid.tiles()[tile.get()];
        let (ix, iy) = grid.column_row(tile);
        if (record.row, record.column) != (iy + 1, ix + 1) {
            failures.push(format!(
                "[{label}] trial {} position {} logged row/column ({},{}) but tile is ({},{})",
                trial + 1,
                record.position,
                record.row,
                record.column,
                iy + 1,
                ix + 1,
            ));
        }

        let (center_x, center_y) = rect.center();
        let expected = (center_x / width as f64, center_y / height as f64);
        if (record.x - expected.0).abs() > 1e-12 || (record.y - expected.1).abs() > 1e-12 {
            failures.push(format!(
                "[{label}] trial {} position {} logged center ({},{}) but tile {} is at ({},{})",
                trial + 1,
                record.position,
                record.x,
                record.y,
                rect,
                expected.0,
                expected.1,
            ));
        }

        if record.position != GridPosition((record.row - 1) * grid.nx() + record.column) {
            failures.push(format!(
                "[{label}] trial {} position {} does not match row {} column {}",
                trial + 1,
                record.position,
                record.row,
                record.column,
            ));
        }
    }

    failures
}
