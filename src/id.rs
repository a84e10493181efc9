use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a tile in the column-major tile array of a [`TileGrid`](crate::TileGrid).
///
/// Tile `(ix, iy)` of a grid with `ny` rows has index `ix * ny + iy`. This is the index space
/// the tiles are generated and rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileIndex(pub usize);

impl TileIndex {
    #[inline]
    pub fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for TileIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 1-based row-major position of a tile: left-to-right within rows, rows top-to-bottom.
///
/// Presentation order, logging and row/column bookkeeping are all expressed in this index
/// space. Use [`IndexMap`](crate::IndexMap) to convert to a [`TileIndex`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GridPosition(pub usize);

impl GridPosition {
    #[inline]
    pub fn get(self) -> usize {
        self.0
    }

    /// 1-based `(row, column)` of this position in a grid with `nx` columns.
    ///
    /// # Panics
    ///
    /// Panics if the position is 0 or `nx` is 0.
    #[inline]
    pub fn row_column(self, nx: usize) -> (usize, usize) {
        let zero_based = self.0 - 1;
        (zero_based / nx + 1, zero_based % nx + 1)
    }
}

impl fmt::Display for GridPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::GridPosition;

    #[test]
    fn row_column_wraps_after_nx_positions() {
        assert_eq!(GridPosition(1).row_column(4), (1, 1));
        assert_eq!(GridPosition(4).row_column(4), (1, 4));
        assert_eq!(GridPosition(5).row_column(4), (2, 1));
        assert_eq!(GridPosition(8).row_column(4), (2, 4));
    }

    #[test]
    #[should_panic]
    fn row_column_rejects_position_zero() {
        GridPosition(0).row_column(4);
    }

    #[test]
    #[should_panic]
    fn row_column_rejects_zero_columns() {
        GridPosition(3).row_column(0);
    }

    #[test]
    fn single_column_grid_puts_every_position_in_its_own_row() {
        assert_eq!(GridPosition(3).row_column(1), (3, 1));
    }
}
