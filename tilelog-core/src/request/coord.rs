use serde::Serialize;
use std::fmt::{Display, Formatter};

/// Deepest zoom level accepted anywhere in the pipeline.
///
/// At zoom 32 the grid is `2^32` cells wide, which covers every `u32` row/column.
pub const MAX_ZOOM: u8 = 32;

/// Quadtree address of one tile: `(zoom, row, column)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TileCoord {
    pub zoom: u8,
    pub row: u32,
    pub column: u32,
}

impl TileCoord {
    /// Builds a coordinate, returning `None` when `zoom` exceeds [`MAX_ZOOM`] or
    /// either axis falls outside `[0, 2^zoom)`.
    pub fn new(zoom: u8, row: u32, column: u32) -> Option<Self> {
        if zoom > MAX_ZOOM {
            return None;
        }

        let span = grid_span(zoom);
        if u64::from(row) >= span || u64::from(column) >= span {
            return None;
        }

        Some(Self { zoom, row, column })
    }

    /// Projects this coordinate onto the grid of a shallower zoom level.
    ///
    /// Returns `None` when `zoom` is deeper than `self.zoom`: a coarse cell
    /// cannot be refined without inventing data.
    pub fn project_to(&self, zoom: u8) -> Option<Self> {
        if zoom > self.zoom {
            return None;
        }

        let shift = u32::from(self.zoom - zoom);
        Some(Self {
            zoom,
            row: self.row.checked_shr(shift).unwrap_or(0),
            column: self.column.checked_shr(shift).unwrap_or(0),
        })
    }
}

impl Display for TileCoord {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.zoom, self.row, self.column)
    }
}

/// Number of cells along one axis at `zoom`.
pub fn grid_span(zoom: u8) -> u64 {
    1u64 << zoom.min(MAX_ZOOM)
}
