use super::{
    layout::{RegionLayout, WorldLayout},
    Region,
};
use crate::tiles::{GridError, MultiTileMapGrid, TileId, Tileset, NUM_LAYERS, TILE_EMPTY};
use bevy::prelude::*;
use thiserror::Error;

/// Fatal problems found while turning layout data into tile maps
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WorldBuildError {
    #[error("{region} layout has {actual} tile maps, expected {expected}")]
    MapCount {
        region: Region,
        expected: usize,
        actual: usize,
    },

    #[error("{region} tile map ({map_row}, {map_column}) layer {layer} is not {width}x{height} tiles")]
    LayerShape {
        region: Region,
        map_row: usize,
        map_column: usize,
        layer: usize,
        width: usize,
        height: usize,
    },

    #[error("{region} tile map ({map_row}, {map_column}) uses unknown tile id {id} at ({column}, {row})")]
    UnknownTile {
        region: Region,
        map_row: usize,
        map_column: usize,
        column: usize,
        row: usize,
        id: TileId,
    },

    #[error("{region} grid is invalid: {source}")]
    Grid {
        region: Region,
        #[source]
        source: GridError,
    },
}

/// The two playable regions: the overworld and the inside of the ark
#[derive(Resource, Debug, Clone)]
pub struct GameWorld {
    overworld: MultiTileMapGrid,
    ark_interior: MultiTileMapGrid,
}

impl GameWorld {
    pub fn build(layout: &WorldLayout, tileset: &Tileset) -> Result<Self, WorldBuildError> {
        let world = Self {
            overworld: build_region(Region::Overworld, &layout.overworld, tileset)?,
            ark_interior: build_region(Region::ArkInterior, &layout.ark_interior, tileset)?,
        };
        info!("Built world: {}", world.stats());
        Ok(world)
    }

    pub fn region(&self, region: Region) -> &MultiTileMapGrid {
        match region {
            Region::Overworld => &self.overworld,
            Region::ArkInterior => &self.ark_interior,
        }
    }

    pub fn region_mut(&mut self, region: Region) -> &mut MultiTileMapGrid {
        match region {
            Region::Overworld => &mut self.overworld,
            Region::ArkInterior => &mut self.ark_interior,
        }
    }

    /// Get statistics about the world
    pub fn stats(&self) -> WorldStats {
        let count = |grid: &MultiTileMapGrid| {
            grid.iter_maps()
                .map(|(_, _, map)| map.iter_tiles().count())
                .sum::<usize>()
        };
        WorldStats {
            overworld_maps: self.overworld.width_in_maps() * self.overworld.height_in_maps(),
            overworld_tiles: count(&self.overworld),
            ark_interior_maps: self.ark_interior.width_in_maps() * self.ark_interior.height_in_maps(),
            ark_interior_tiles: count(&self.ark_interior),
        }
    }
}

fn build_region(
    region: Region,
    layout: &RegionLayout,
    tileset: &Tileset,
) -> Result<MultiTileMapGrid, WorldBuildError> {
    let mut grid = MultiTileMapGrid::new(
        layout.center(),
        layout.width_in_maps,
        layout.height_in_maps,
        layout.map_width_in_tiles,
        layout.map_height_in_tiles,
        layout.tile_size,
    )
    .map_err(|source| WorldBuildError::Grid { region, source })?;

    let expected = layout.width_in_maps * layout.height_in_maps;
    if layout.maps.len() != expected {
        return Err(WorldBuildError::MapCount {
            region,
            expected,
            actual: layout.maps.len(),
        });
    }

    let (width, height) = (layout.map_width_in_tiles, layout.map_height_in_tiles);
    for (index, map_layout) in layout.maps.iter().enumerate() {
        let (map_row, map_column) = (index / layout.width_in_maps, index % layout.width_in_maps);
        let Some(map) = grid.get_tile_map_mut(map_row, map_column) else {
            return Err(WorldBuildError::MapCount {
                region,
                expected,
                actual: layout.maps.len(),
            });
        };

        for layer in 0..NUM_LAYERS {
            let shape_error = WorldBuildError::LayerShape {
                region,
                map_row,
                map_column,
                layer,
                width,
                height,
            };
            let Some(cells) = map_layout.layer(layer) else {
                return Err(shape_error);
            };
            if cells.len() != height || cells.iter().any(|cells_row| cells_row.len() != width) {
                return Err(shape_error);
            }

            for (row, cells_row) in cells.iter().enumerate() {
                for (column, &id) in cells_row.iter().enumerate() {
                    if id == TILE_EMPTY {
                        continue;
                    }
                    let tile = tileset.create_tile(id).ok_or_else(|| WorldBuildError::UnknownTile {
                        region,
                        map_row,
                        map_column,
                        column,
                        row,
                        id,
                    })?;
                    map.set_tile(layer, column, row, tile)
                        .map_err(|err| WorldBuildError::Grid {
                            region,
                            source: err.into(),
                        })?;
                }
            }
        }
    }

    Ok(grid)
}

/// Statistics about the world
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorldStats {
    pub overworld_maps: usize,
    pub overworld_tiles: usize,
    pub ark_interior_maps: usize,
    pub ark_interior_tiles: usize,
}

impl std::fmt::Display for WorldStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Overworld: {} maps / {} tiles, Ark interior: {} maps / {} tiles",
            self.overworld_maps, self.overworld_tiles, self.ark_interior_maps, self.ark_interior_tiles
        )
    }
}
