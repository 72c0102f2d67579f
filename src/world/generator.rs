use super::layout::{RegionLayout, WorldLayout};
use crate::tiles::*;
use bevy::prelude::*;

/// Width of the water border around the overworld, in tiles
const SHORE_WATER: usize = 2;

/// Tiles around the ark kept free of trees and rocks
const ARK_CLEARING: usize = 4;

/// Ark footprint in the overworld, in region-wide tile coordinates
const ARK_FIRST_COLUMN: usize = 32;
const ARK_LAST_COLUMN: usize = 37;
const ARK_FIRST_ROW: usize = 32;
const ARK_LAST_ROW: usize = 35;
const ARK_DOOR_COLUMN: usize = 35;

/// Stateless integer hash used to scatter trees and rocks deterministically
fn scatter(column: usize, row: usize) -> u32 {
    let mut hash = (column as u32).wrapping_mul(0x9E37_79B1) ^ (row as u32).wrapping_mul(0x85EB_CA77);
    hash ^= hash >> 15;
    hash = hash.wrapping_mul(0x2C1B_3C6D);
    hash ^= hash >> 12;
    hash
}

/// Generate the overworld: grass inland, a sandy shore, water at the edge,
/// scattered trees and rocks, and the ark in the middle.
pub fn generate_overworld() -> RegionLayout {
    let mut layout = RegionLayout::filled(
        Vec2::ZERO,
        OVERWORLD_WIDTH_IN_MAPS,
        OVERWORLD_HEIGHT_IN_MAPS,
        MAP_WIDTH_IN_TILES,
        MAP_HEIGHT_IN_TILES,
        TILE_SIZE,
        TILE_GRASS,
    );
    let columns = layout.total_columns();
    let rows = layout.total_rows();

    for row in 0..rows {
        for column in 0..columns {
            let distance_to_edge = column.min(row).min(columns - 1 - column).min(rows - 1 - row);
            if distance_to_edge < SHORE_WATER {
                layout.set_tile(LAYER_GROUND, column, row, TILE_WATER);
                continue;
            }
            if distance_to_edge == SHORE_WATER {
                layout.set_tile(LAYER_GROUND, column, row, TILE_SAND);
                continue;
            }

            let near_ark = column + ARK_CLEARING >= ARK_FIRST_COLUMN
                && column <= ARK_LAST_COLUMN + ARK_CLEARING
                && row + ARK_CLEARING >= ARK_FIRST_ROW
                && row <= ARK_LAST_ROW + ARK_CLEARING;
            if near_ark {
                continue;
            }

            match scatter(column, row) % 29 {
                0 | 1 => {
                    layout.set_tile(LAYER_OBJECT, column, row, TILE_TREE);
                }
                2 => {
                    layout.set_tile(LAYER_OBJECT, column, row, TILE_ROCK);
                }
                _ => {}
            }
        }
    }

    for row in ARK_FIRST_ROW..=ARK_LAST_ROW {
        for column in ARK_FIRST_COLUMN..=ARK_LAST_COLUMN {
            layout.set_tile(LAYER_OBJECT, column, row, TILE_ARK_WALL);
        }
    }
    layout.set_tile(LAYER_OBJECT, ARK_DOOR_COLUMN, ARK_LAST_ROW, TILE_ARK_DOOR);

    layout
}

/// Generate the ark interior: a floor ringed by walls, with a door in the
/// bottom wall and a few hay bales.
pub fn generate_ark_interior() -> RegionLayout {
    let mut layout = RegionLayout::filled(
        Vec2::ZERO,
        ARK_INTERIOR_WIDTH_IN_MAPS,
        ARK_INTERIOR_HEIGHT_IN_MAPS,
        MAP_WIDTH_IN_TILES,
        MAP_HEIGHT_IN_TILES,
        TILE_SIZE,
        TILE_ARK_FLOOR,
    );
    let columns = layout.total_columns();
    let rows = layout.total_rows();

    for row in 0..rows {
        for column in 0..columns {
            if row == 0 || column == 0 || row == rows - 1 || column == columns - 1 {
                layout.set_tile(LAYER_OBJECT, column, row, TILE_ARK_WALL);
            }
        }
    }
    layout.set_tile(LAYER_OBJECT, columns / 2, rows - 1, TILE_ARK_DOOR);

    for (column, row) in [(2, 2), (columns - 3, 2), (2, rows - 4), (columns - 3, rows - 4)] {
        layout.set_tile(LAYER_OBJECT, column, row, TILE_HAY);
    }

    layout
}

/// The game's built-in world
pub fn default_layout() -> WorldLayout {
    let overworld = generate_overworld();
    // Just below the ark door
    let player_start = overworld.cell_center(ARK_DOOR_COLUMN, ARK_LAST_ROW + 2);
    WorldLayout {
        overworld,
        ark_interior: generate_ark_interior(),
        player_start: player_start.to_array(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(layout: &RegionLayout, layer: usize, id: TileId) -> usize {
        layout
            .maps
            .iter()
            .flat_map(|map| map.layer(layer).into_iter().flatten().flatten())
            .filter(|&&tile| tile == id)
            .count()
    }

    #[test]
    fn test_overworld_shape() {
        let layout = generate_overworld();
        assert_eq!(layout.maps.len(), 49);
        assert_eq!(layout.total_columns(), 70);
        for map in &layout.maps {
            assert_eq!(map.ground.len(), MAP_HEIGHT_IN_TILES);
            assert!(map.ground.iter().all(|row| row.len() == MAP_WIDTH_IN_TILES));
        }
    }

    #[test]
    fn test_overworld_edges_are_water() {
        let layout = generate_overworld();
        let last = layout.total_columns() - 1;
        assert_eq!(layout.get_tile(LAYER_GROUND, 0, 0), Some(TILE_WATER));
        assert_eq!(layout.get_tile(LAYER_GROUND, last, 10), Some(TILE_WATER));
        assert_eq!(layout.get_tile(LAYER_GROUND, 2, 10), Some(TILE_SAND));
    }

    #[test]
    fn test_single_door_per_region() {
        assert_eq!(count(&generate_overworld(), LAYER_OBJECT, TILE_ARK_DOOR), 1);
        assert_eq!(count(&generate_ark_interior(), LAYER_OBJECT, TILE_ARK_DOOR), 1);
    }

    #[test]
    fn test_player_start_is_clear() {
        let layout = default_layout();
        let start = Vec2::from(layout.player_start);
        assert_eq!(start, layout.overworld.cell_center(ARK_DOOR_COLUMN, ARK_LAST_ROW + 2));
        assert_eq!(
            layout.overworld.get_tile(LAYER_OBJECT, ARK_DOOR_COLUMN, ARK_LAST_ROW + 2),
            Some(TILE_EMPTY)
        );
    }

    #[test]
    fn test_generation_is_deterministic() {
        assert_eq!(generate_overworld(), generate_overworld());
    }
}
