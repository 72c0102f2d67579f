use serde::{Deserialize, Serialize};

/// Type alias for tile IDs (u16 allows 0-65,535 unique tiles)
pub type TileId = u16;

/// Cell position inside one tile map, in columns/rows (not pixels)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPos {
    pub column: usize,
    pub row: usize,
}

impl GridPos {
    pub const fn new(column: usize, row: usize) -> Self {
        Self { column, row }
    }
}

impl From<(usize, usize)> for GridPos {
    fn from((column, row): (usize, usize)) -> Self {
        Self::new(column, row)
    }
}

/// Non-owning reference to a tile inside a multi-tile-map grid.
///
/// The owning map cell stays the only owner of the tile; anything else
/// (renderer, editor) keeps one of these and looks the tile up again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileLocation {
    pub map_row: usize,
    pub map_column: usize,
    pub layer: usize,
    pub cell: GridPos,
}
