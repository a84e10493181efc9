use crate::{GridPosition, TileGrid, TileIndex};

/// Permutation between the row-major positions used for scheduling and logging and the
/// column-major indices the tiles are stored in.
///
/// The column-major tiles form an `ny`×`nx` grid (row = y-index, column = x-index) where the tile
/// in row `r` and column `c` has index `c * ny + r`. Reading that grid row by row yields
/// `row_to_col`, so `row_to_col[p - 1]` is the tile shown at row-major position `p`.
///
/// Built once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexMap {
    nx: usize,
    ny: usize,
    row_to_col: Vec<TileIndex>,
    col_to_row: Vec<GridPosition>,
}

impl IndexMap {
    pub fn new(nx: usize, ny: usize) -> Self {
        let mut row_to_col = Vec::with_capacity(nx * ny);
        for row in 0..ny {
            for column in 0..nx {
                row_to_col.push(TileIndex(column * ny + row));
            }
        }

        let mut col_to_row = vec![GridPosition(0); nx * ny];
        for (zero_based_position, tile) in row_to_col.iter().enumerate() {
            col_to_row[tile.0] = GridPosition(zero_based_position + 1);
        }

        Self {
            nx,
            ny,
            row_to_col,
            col_to_row,
        }
    }

    pub fn for_grid(grid: &TileGrid) -> Self {
        Self::new(grid.nx(), grid.ny())
    }

    #[inline]
    pub fn nx(&self) -> usize {
        self.nx
    }

    #[inline]
    pub fn ny(&self) -> usize {
        self.ny
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.row_to_col.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.row_to_col.is_empty()
    }

    /// Column-major tile index shown at `position`.
    ///
    /// # Panics
    ///
    /// Panics if `position` is not in `1..=len()`.
    #[inline]
    pub fn tile_index(&self, position: GridPosition) -> TileIndex {
        self.row_to_col[position.0 - 1]
    }

    /// Checked version of [`tile_index`](Self::tile_index).
    pub fn get(&self, position: GridPosition) -> Option<TileIndex> {
        position
            .0
            .checked_sub(1)
            .and_then(|index| self.row_to_col.get(index))
            .copied()
    }

    /// Row-major position of a column-major tile index.
    ///
    /// # Panics
    ///
    /// Panics if `tile` is out of range.
    #[inline]
    pub fn position(&self, tile: TileIndex) -> GridPosition {
        self.col_to_row[tile.0]
    }

    /// 1-based `(row, column)` of `position`.
    #[inline]
    pub fn row_column(&self, position: GridPosition) -> (usize, usize) {
        position.row_column(self.nx)
    }

    /// The whole `row_to_col` table.
    #[inline]
    pub fn as_slice(&self) -> &[TileIndex] {
        &self.row_to_col
    }
}

#[cfg(test)]
mod tests {
    use super::IndexMap;
    use crate::{tile_region, GridPosition, Rect, TileIndex};

    fn indices(map: &IndexMap) -> Vec<usize> {
        map.as_slice().iter().map(|tile| tile.0).collect()
    }

    #[test]
    fn transposes_four_by_two_grid() {
        // Column-major layout (ny = 2):
        //   0 2 4 6
        //   1 3 5 7
        let map = IndexMap::new(4, 2);
        assert_eq!(indices(&map), vec![0, 2, 4, 6, 1, 3, 5, 7]);
    }

    #[test]
    fn transposes_two_by_three_grid() {
        // Column-major layout (ny = 3):
        //   0 3
        //   1 4
        //   2 5
        let map = IndexMap::new(2, 3);
        assert_eq!(indices(&map), vec![0, 3, 1, 4, 2, 5]);
    }

    #[test]
    fn single_row_and_single_column_are_identity() {
        assert_eq!(indices(&IndexMap::new(5, 1)), vec![0, 1, 2, 3, 4]);
        assert_eq!(indices(&IndexMap::new(1, 5)), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn is_a_permutation_with_consistent_inverse() {
        let map = IndexMap::new(7, 4);
        let mut seen = vec![false; map.len()];

        for position in 1..=map.len() {
            let tile = map.tile_index(GridPosition(position));
            assert!(!seen[tile.0], "tile {tile} mapped twice");
            seen[tile.0] = true;
            assert_eq!(map.position(tile), GridPosition(position));
        }
    }

    #[test]
    fn checked_lookup_rejects_out_of_range_positions() {
        let map = IndexMap::new(3, 2);

        assert_eq!(map.get(GridPosition(0)), None);
        assert_eq!(map.get(GridPosition(7)), None);
        assert_eq!(map.get(GridPosition(6)), Some(TileIndex(5)));
    }

    #[test]
    fn row_and_column_locate_the_mapped_tile() {
        let grid = tile_region(1920, 1080, 200, Rect::screen(1920, 1080));
        let map = IndexMap::for_grid(&grid);

        for position in 1..=map.len() {
            let position = GridPosition(position);
            let (row, column) = map.row_column(position);
            let tile = grid.tile(map.tile_index(position)).unwrap();

            assert_eq!(grid.column_row(map.tile_index(position)), (column - 1, row - 1));
            assert_eq!(tile.x1, grid.x_pad() + (column as u32 - 1) * 200);
            assert_eq!(tile.y1, grid.y_pad() + (row as u32 - 1) * 200);
        }
    }
}
