use super::IndexMap;
use crate::util::normalize_point;
use crate::{GridPosition, TileGrid};
use serde::Serialize;

/// One presented trial, as written to the output table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrialRecord {
    /// Row-major position of the presented tile.
    #[serde(rename = "Position")]
    pub position: GridPosition,
    /// 1-based row, top row first.
    #[serde(rename = "Row")]
    pub row: usize,
    /// 1-based column, left column first.
    #[serde(rename = "Column")]
    pub column: usize,
    /// Tile center divided by the screen width; 0 is the left screen edge.
    #[serde(rename = "X")]
    pub x: f64,
    /// Tile center divided by the screen height; 0 is the top screen edge.
    #[serde(rename = "Y")]
    pub y: f64,
}

/// The realized presentation order of a completed run, in presentation order across all cycles.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TrialSequence {
    records: Vec<TrialRecord>,
}

impl TrialSequence {
    pub(crate) fn from_positions(
        positions: &[GridPosition],
        index_map: &IndexMap,
        grid: &TileGrid,
    ) -> Self {
        let records = positions
            .iter()
            .map(|&position| {
                let (row, column) = index_map.row_column(position);
                let tile = grid.tiles()[index_map.tile_index(position).0];
                let (x, y) = normalize_point(tile.center(), grid.screen_size());
                TrialRecord {
                    position,
                    row,
                    column,
                    x,
                    y,
                }
            })
            .collect();
        Self { records }
    }

    #[inline]
    pub fn records(&self) -> &[TrialRecord] {
        &self.records
    }

    pub fn positions(&self) -> impl Iterator<Item = GridPosition> + '_ {
        self.records.iter().map(|record| record.position)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> Vec<TrialRecord> {
        self.records
    }
}
