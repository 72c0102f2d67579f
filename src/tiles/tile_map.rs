use super::{constants::*, tile::Tile, types::*};
use bevy::prelude::*;
use thiserror::Error;

/// Errors raised when building or editing a tile map
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TileMapError {
    #[error("tile map dimensions must be non-zero, got {width}x{height}")]
    EmptyDimensions { width: usize, height: usize },

    #[error("tile size must be positive, got {0}")]
    InvalidTileSize(f32),

    #[error("cell ({column}, {row}) is outside a {width}x{height} tile map")]
    OutOfBounds {
        column: usize,
        row: usize,
        width: usize,
        height: usize,
    },

    #[error("layer {0} does not exist")]
    InvalidLayer(usize),
}

/// Rectangular grid of tiles centered on a fixed world position.
///
/// Cells are addressed `[column][row]` with `(0, 0)` at the top-left.
/// World coordinates are y-down: row indices grow with world y.
/// Each layer is an arena of optional tiles; the cell is the sole owner.
#[derive(Debug, Clone)]
pub struct TileMap {
    center: Vec2,
    width: usize,
    height: usize,
    tile_size: f32,
    /// `NUM_LAYERS` column-major arenas of `width * height` cells
    layers: Vec<Vec<Option<Tile>>>,
}

impl TileMap {
    pub fn new(center: Vec2, width: usize, height: usize, tile_size: f32) -> Result<Self, TileMapError> {
        if width == 0 || height == 0 {
            return Err(TileMapError::EmptyDimensions { width, height });
        }
        if !(tile_size > 0.0) {
            return Err(TileMapError::InvalidTileSize(tile_size));
        }
        Ok(Self {
            center,
            width,
            height,
            tile_size,
            layers: vec![vec![None; width * height]; NUM_LAYERS],
        })
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    pub fn pixel_size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32) * self.tile_size
    }

    pub fn left_edge(&self) -> f32 {
        self.center.x - self.pixel_size().x / 2.0
    }

    pub fn top_edge(&self) -> f32 {
        self.center.y - self.pixel_size().y / 2.0
    }

    /// World-space extent of the map
    pub fn bounds(&self) -> Rect {
        Rect::from_center_size(self.center, self.pixel_size())
    }

    fn index(&self, column: usize, row: usize) -> Option<usize> {
        if column >= self.width || row >= self.height {
            return None;
        }
        Some(column * self.height + row)
    }

    /// Convert a world position to the cell containing it.
    /// Left and top edges are inclusive, right and bottom edges exclusive.
    pub fn grid_position_at(&self, world_pos: Vec2) -> Option<GridPos> {
        let column = ((world_pos.x - self.left_edge()) / self.tile_size).floor();
        let row = ((world_pos.y - self.top_edge()) / self.tile_size).floor();
        if column < 0.0 || row < 0.0 || column >= self.width as f32 || row >= self.height as f32 {
            return None;
        }
        Some(GridPos::new(column as usize, row as usize))
    }

    pub fn contains(&self, world_pos: Vec2) -> bool {
        self.grid_position_at(world_pos).is_some()
    }

    /// World position of a cell's center
    pub fn cell_center(&self, column: usize, row: usize) -> Option<Vec2> {
        self.index(column, row)?;
        Some(Vec2::new(
            self.left_edge() + (column as f32 + 0.5) * self.tile_size,
            self.top_edge() + (row as f32 + 0.5) * self.tile_size,
        ))
    }

    pub fn get_tile(&self, layer: usize, column: usize, row: usize) -> Option<&Tile> {
        let index = self.index(column, row)?;
        self.layers.get(layer)?[index].as_ref()
    }

    /// Id of the tile in a cell, or `INVALID_TILE_ID` when there is none
    pub fn tile_id(&self, layer: usize, column: usize, row: usize) -> TileId {
        self.get_tile(layer, column, row)
            .map_or(INVALID_TILE_ID, Tile::id)
    }

    /// Ground tile under a world position; `None` outside the map
    pub fn get_tile_at_world_position(&self, world_pos: Vec2) -> Option<&Tile> {
        self.get_layer_tile_at_world_position(LAYER_GROUND, world_pos)
    }

    pub fn get_layer_tile_at_world_position(&self, layer: usize, world_pos: Vec2) -> Option<&Tile> {
        let cell = self.grid_position_at(world_pos)?;
        self.get_tile(layer, cell.column, cell.row)
    }

    /// Tiles of every layer under a world position, ground first
    pub fn tiles_at_world_position(&self, world_pos: Vec2) -> impl Iterator<Item = &Tile> + '_ {
        let cell = self.grid_position_at(world_pos);
        (0..NUM_LAYERS).filter_map(move |layer| {
            let cell = cell?;
            self.get_tile(layer, cell.column, cell.row)
        })
    }

    /// Place a tile in a cell, moving it to the cell center.
    /// Returns the tile previously stored there.
    pub fn set_tile(
        &mut self,
        layer: usize,
        column: usize,
        row: usize,
        mut tile: Tile,
    ) -> Result<Option<Tile>, TileMapError> {
        let center = self.checked_cell_center(layer, column, row)?;
        tile.place(center, Vec2::splat(self.tile_size));
        let index = column * self.height + row;
        Ok(self.layers[layer][index].replace(tile))
    }

    /// Remove a tile from a cell
    pub fn clear_tile(&mut self, layer: usize, column: usize, row: usize) -> Result<Option<Tile>, TileMapError> {
        self.checked_cell_center(layer, column, row)?;
        let index = column * self.height + row;
        Ok(self.layers[layer][index].take())
    }

    fn checked_cell_center(&self, layer: usize, column: usize, row: usize) -> Result<Vec2, TileMapError> {
        if layer >= NUM_LAYERS {
            return Err(TileMapError::InvalidLayer(layer));
        }
        self.cell_center(column, row).ok_or(TileMapError::OutOfBounds {
            column,
            row,
            width: self.width,
            height: self.height,
        })
    }

    /// Cells whose area intersects `rect` (strictly, shared edges excluded)
    pub fn cells_overlapping(&self, rect: Rect) -> impl Iterator<Item = GridPos> {
        let first_column = ((rect.min.x - self.left_edge()) / self.tile_size).floor().max(0.0);
        let last_column = ((rect.max.x - self.left_edge()) / self.tile_size).ceil() - 1.0;
        let first_row = ((rect.min.y - self.top_edge()) / self.tile_size).floor().max(0.0);
        let last_row = ((rect.max.y - self.top_edge()) / self.tile_size).ceil() - 1.0;

        let last_column = last_column.min(self.width as f32 - 1.0);
        let last_row = last_row.min(self.height as f32 - 1.0);

        let columns = if rect.is_empty() || last_column < first_column {
            0..0
        } else {
            first_column as usize..last_column as usize + 1
        };
        let rows = if rect.is_empty() || last_row < first_row {
            0..0
        } else {
            first_row as usize..last_row as usize + 1
        };

        columns.flat_map(move |column| rows.clone().map(move |row| GridPos::new(column, row)))
    }

    /// Tiles of every layer whose cells intersect `rect`
    pub fn tiles_overlapping(&self, rect: Rect) -> impl Iterator<Item = &Tile> + '_ {
        self.cells_overlapping(rect).flat_map(move |cell| {
            (0..NUM_LAYERS).filter_map(move |layer| self.get_tile(layer, cell.column, cell.row))
        })
    }

    /// Every stored tile with its layer and cell
    pub fn iter_tiles(&self) -> impl Iterator<Item = (usize, GridPos, &Tile)> + '_ {
        let height = self.height;
        self.layers.iter().enumerate().flat_map(move |(layer, cells)| {
            cells.iter().enumerate().filter_map(move |(index, cell)| {
                cell.as_ref()
                    .map(|tile| (layer, GridPos::new(index / height, index % height), tile))
            })
        })
    }
}
