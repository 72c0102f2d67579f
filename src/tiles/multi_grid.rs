use super::{constants::*, tile::Tile, tile_map::*, types::*};
use bevy::prelude::*;
use thiserror::Error;

/// Errors raised when assembling or editing a multi-tile-map grid
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError {
    #[error("grid dimensions must be non-zero, got {width}x{height} tile maps")]
    EmptyDimensions { width: usize, height: usize },

    #[error("expected {expected} tile maps, got {actual}")]
    WrongMapCount { expected: usize, actual: usize },

    #[error("tile map ({row}, {column}) does not share the dimensions of tile map (0, 0)")]
    MismatchedMap { row: usize, column: usize },

    #[error("tile map ({row}, {column}) is centered at {actual} but must be at {expected}")]
    MisalignedMap {
        row: usize,
        column: usize,
        expected: Vec2,
        actual: Vec2,
    },

    #[error("position {0} is outside the grid")]
    OutsideGrid(Vec2),

    #[error(transparent)]
    TileMap(#[from] TileMapError),
}

/// A contiguous world region made of equally sized tile maps.
///
/// Maps are stored row-major. Neighbouring maps are offset by exactly one
/// map width or height, so lookups are seamless across map boundaries.
#[derive(Debug, Clone)]
pub struct MultiTileMapGrid {
    width: usize,
    height: usize,
    maps: Vec<TileMap>,
}

impl MultiTileMapGrid {
    /// Build a grid of empty tile maps whose combined extent is centered on `center`
    pub fn new(
        center: Vec2,
        width_in_maps: usize,
        height_in_maps: usize,
        map_width_in_tiles: usize,
        map_height_in_tiles: usize,
        tile_size: f32,
    ) -> Result<Self, GridError> {
        let map_pixels = Vec2::new(map_width_in_tiles as f32, map_height_in_tiles as f32) * tile_size;
        let grid_pixels = map_pixels * Vec2::new(width_in_maps as f32, height_in_maps as f32);
        let top_left = center - grid_pixels / 2.0;

        let mut maps = Vec::with_capacity(width_in_maps * height_in_maps);
        for row in 0..height_in_maps {
            for column in 0..width_in_maps {
                let map_center = top_left + map_pixels * Vec2::new(column as f32 + 0.5, row as f32 + 0.5);
                maps.push(TileMap::new(map_center, map_width_in_tiles, map_height_in_tiles, tile_size)?);
            }
        }
        Self::from_tile_maps(width_in_maps, height_in_maps, maps)
    }

    /// Assemble a grid from row-major tile maps, checking they tile the plane seamlessly
    pub fn from_tile_maps(width: usize, height: usize, maps: Vec<TileMap>) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::EmptyDimensions { width, height });
        }
        if maps.len() != width * height {
            return Err(GridError::WrongMapCount {
                expected: width * height,
                actual: maps.len(),
            });
        }

        let origin = &maps[0];
        let map_pixels = origin.pixel_size();
        for (index, map) in maps.iter().enumerate() {
            let (row, column) = (index / width, index % width);
            if map.width() != origin.width()
                || map.height() != origin.height()
                || map.tile_size() != origin.tile_size()
            {
                return Err(GridError::MismatchedMap { row, column });
            }

            let expected = origin.center() + map_pixels * Vec2::new(column as f32, row as f32);
            if (map.center() - expected).abs().max_element() > SEAM_EPSILON {
                return Err(GridError::MisalignedMap {
                    row,
                    column,
                    expected,
                    actual: map.center(),
                });
            }
        }

        Ok(Self { width, height, maps })
    }

    pub fn width_in_maps(&self) -> usize {
        self.width
    }

    pub fn height_in_maps(&self) -> usize {
        self.height
    }

    pub fn tile_size(&self) -> f32 {
        self.maps[0].tile_size()
    }

    /// Pixel size of a single tile map
    pub fn map_pixel_size(&self) -> Vec2 {
        self.maps[0].pixel_size()
    }

    /// Combined world-space extent of every map
    pub fn bounds(&self) -> Rect {
        let first = self.maps[0].bounds();
        let last = self.maps[self.maps.len() - 1].bounds();
        Rect::from_corners(first.min, last.max)
    }

    pub fn contains(&self, world_pos: Vec2) -> bool {
        self.resolve(world_pos).is_some()
    }

    pub fn get_tile_map(&self, row: usize, column: usize) -> Option<&TileMap> {
        if row >= self.height || column >= self.width {
            return None;
        }
        self.maps.get(row * self.width + column)
    }

    pub fn get_tile_map_mut(&mut self, row: usize, column: usize) -> Option<&mut TileMap> {
        if row >= self.height || column >= self.width {
            return None;
        }
        self.maps.get_mut(row * self.width + column)
    }

    /// Every map with its grid row and column
    pub fn iter_maps(&self) -> impl Iterator<Item = (usize, usize, &TileMap)> + '_ {
        let width = self.width;
        self.maps
            .iter()
            .enumerate()
            .map(move |(index, map)| (index / width, index % width, map))
    }

    /// Resolve a world position to (map row, map column, cell).
    ///
    /// Uses one global tile index so that a position on a seam lands in
    /// exactly one map: left/top edges belong to a map, right/bottom don't.
    fn resolve(&self, world_pos: Vec2) -> Option<(usize, usize, GridPos)> {
        let first = &self.maps[0];
        let tile_size = first.tile_size();
        let column = ((world_pos.x - first.left_edge()) / tile_size).floor();
        let row = ((world_pos.y - first.top_edge()) / tile_size).floor();

        let total_columns = self.width * first.width();
        let total_rows = self.height * first.height();
        if column < 0.0 || row < 0.0 || column >= total_columns as f32 || row >= total_rows as f32 {
            return None;
        }

        let (column, row) = (column as usize, row as usize);
        Some((
            row / first.height(),
            column / first.width(),
            GridPos::new(column % first.width(), row % first.height()),
        ))
    }

    /// Tile map containing a world position; `None` outside the grid
    pub fn get_tile_map_at_world_position(&self, world_pos: Vec2) -> Option<&TileMap> {
        let (map_row, map_column, _) = self.resolve(world_pos)?;
        self.get_tile_map(map_row, map_column)
    }

    /// Ground tile under a world position
    pub fn get_tile_at_world_position(&self, world_pos: Vec2) -> Option<&Tile> {
        self.get_layer_tile_at_world_position(LAYER_GROUND, world_pos)
    }

    pub fn get_layer_tile_at_world_position(&self, layer: usize, world_pos: Vec2) -> Option<&Tile> {
        let location = self.locate(layer, world_pos)?;
        self.tile(location)
    }

    /// Location of the cell under a world position, whether or not it holds a tile
    pub fn locate(&self, layer: usize, world_pos: Vec2) -> Option<TileLocation> {
        if layer >= NUM_LAYERS {
            return None;
        }
        let (map_row, map_column, cell) = self.resolve(world_pos)?;
        Some(TileLocation {
            map_row,
            map_column,
            layer,
            cell,
        })
    }

    pub fn tile(&self, location: TileLocation) -> Option<&Tile> {
        self.get_tile_map(location.map_row, location.map_column)?
            .get_tile(location.layer, location.cell.column, location.cell.row)
    }

    /// Replace the tile in the cell under a world position
    pub fn set_tile_at_world_position(
        &mut self,
        layer: usize,
        world_pos: Vec2,
        tile: Tile,
    ) -> Result<Option<Tile>, GridError> {
        let (map_row, map_column, cell) = self.resolve(world_pos).ok_or(GridError::OutsideGrid(world_pos))?;
        let width = self.width;
        let map = &mut self.maps[map_row * width + map_column];
        Ok(map.set_tile(layer, cell.column, cell.row, tile)?)
    }

    /// Tiles of every layer whose cells intersect `rect`
    pub fn tiles_overlapping(&self, rect: Rect) -> impl Iterator<Item = &Tile> + '_ {
        self.maps
            .iter()
            .filter(move |map| !map.bounds().intersect(rect).is_empty())
            .flat_map(move |map| map.tiles_overlapping(rect))
    }

    /// Locations of every tile with the given id
    pub fn find_tiles(&self, id: TileId) -> impl Iterator<Item = TileLocation> + '_ {
        self.iter_maps().flat_map(move |(map_row, map_column, map)| {
            map.iter_tiles()
                .filter(move |(_, _, tile)| tile.id() == id)
                .map(move |(layer, cell, _)| TileLocation {
                    map_row,
                    map_column,
                    layer,
                    cell,
                })
        })
    }

    /// World position of the center of a located cell
    pub fn cell_center(&self, location: TileLocation) -> Option<Vec2> {
        self.get_tile_map(location.map_row, location.map_column)?
            .cell_center(location.cell.column, location.cell.row)
    }
}
