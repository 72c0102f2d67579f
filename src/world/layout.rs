use crate::tiles::{TileId, LAYER_GROUND, LAYER_OBJECT, TILE_EMPTY};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Tile codes for one tile map, one `[row][column]` array per layer.
/// `TILE_EMPTY` cells get no tile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileMapLayout {
    pub ground: Vec<Vec<TileId>>,
    pub objects: Vec<Vec<TileId>>,
}

impl TileMapLayout {
    /// Ground filled with one tile, no objects
    pub fn filled(width: usize, height: usize, ground: TileId) -> Self {
        Self {
            ground: vec![vec![ground; width]; height],
            objects: vec![vec![TILE_EMPTY; width]; height],
        }
    }

    pub fn layer(&self, layer: usize) -> Option<&Vec<Vec<TileId>>> {
        match layer {
            LAYER_GROUND => Some(&self.ground),
            LAYER_OBJECT => Some(&self.objects),
            _ => None,
        }
    }

    fn layer_mut(&mut self, layer: usize) -> Option<&mut Vec<Vec<TileId>>> {
        match layer {
            LAYER_GROUND => Some(&mut self.ground),
            LAYER_OBJECT => Some(&mut self.objects),
            _ => None,
        }
    }

    pub fn get_tile(&self, layer: usize, column: usize, row: usize) -> Option<TileId> {
        self.layer(layer)?.get(row)?.get(column).copied()
    }

    pub fn set_tile(&mut self, layer: usize, column: usize, row: usize, tile_id: TileId) -> bool {
        match self
            .layer_mut(layer)
            .and_then(|cells| cells.get_mut(row))
            .and_then(|cells| cells.get_mut(column))
        {
            Some(cell) => {
                *cell = tile_id;
                true
            }
            None => false,
        }
    }
}

/// Tile codes for a whole region plus the geometry of its grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionLayout {
    /// World position of the center of the whole region
    pub center: [f32; 2],
    pub width_in_maps: usize,
    pub height_in_maps: usize,
    pub map_width_in_tiles: usize,
    pub map_height_in_tiles: usize,
    pub tile_size: f32,
    /// Row-major, `width_in_maps * height_in_maps` entries
    pub maps: Vec<TileMapLayout>,
}

impl RegionLayout {
    pub fn filled(
        center: Vec2,
        width_in_maps: usize,
        height_in_maps: usize,
        map_width_in_tiles: usize,
        map_height_in_tiles: usize,
        tile_size: f32,
        ground: TileId,
    ) -> Self {
        Self {
            center: center.to_array(),
            width_in_maps,
            height_in_maps,
            map_width_in_tiles,
            map_height_in_tiles,
            tile_size,
            maps: vec![
                TileMapLayout::filled(map_width_in_tiles, map_height_in_tiles, ground);
                width_in_maps * height_in_maps
            ],
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::from(self.center)
    }

    /// Width of the region in tiles
    pub fn total_columns(&self) -> usize {
        self.width_in_maps * self.map_width_in_tiles
    }

    /// Height of the region in tiles
    pub fn total_rows(&self) -> usize {
        self.height_in_maps * self.map_height_in_tiles
    }

    /// World position of the center of a region-wide tile cell
    pub fn cell_center(&self, column: usize, row: usize) -> Vec2 {
        let size = Vec2::new(self.total_columns() as f32, self.total_rows() as f32) * self.tile_size;
        let top_left = self.center() - size / 2.0;
        top_left + Vec2::new(column as f32 + 0.5, row as f32 + 0.5) * self.tile_size
    }

    fn split(&self, column: usize, row: usize) -> Option<(usize, usize, usize)> {
        if column >= self.total_columns() || row >= self.total_rows() {
            return None;
        }
        let map_index = (row / self.map_height_in_tiles) * self.width_in_maps + column / self.map_width_in_tiles;
        Some((map_index, column % self.map_width_in_tiles, row % self.map_height_in_tiles))
    }

    /// Tile code at region-wide tile coordinates
    pub fn get_tile(&self, layer: usize, column: usize, row: usize) -> Option<TileId> {
        let (map_index, local_column, local_row) = self.split(column, row)?;
        self.maps.get(map_index)?.get_tile(layer, local_column, local_row)
    }

    /// Set a tile code at region-wide tile coordinates
    pub fn set_tile(&mut self, layer: usize, column: usize, row: usize, tile_id: TileId) -> bool {
        let Some((map_index, local_column, local_row)) = self.split(column, row) else {
            return false;
        };
        self.maps
            .get_mut(map_index)
            .is_some_and(|map| map.set_tile(layer, local_column, local_row, tile_id))
    }
}

/// Map data for both playable regions, passed to `GameWorld::build`
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldLayout {
    pub overworld: RegionLayout,
    pub ark_interior: RegionLayout,
    /// Preferred player spawn point in the overworld
    pub player_start: [f32; 2],
}
