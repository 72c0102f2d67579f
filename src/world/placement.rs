use crate::collision::{check_world_blockers, BoundingBox};
use crate::tiles::{MultiTileMapGrid, TileRegistry, TILE_ARK_DOOR};
use bevy::prelude::*;

/// Offsets of every cell at exactly `radius` steps (Chebyshev) from the origin
fn ring(radius: i64) -> Vec<(i64, i64)> {
    let mut cells = Vec::with_capacity((radius as usize * 8).max(1));
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx.abs().max(dy.abs()) == radius {
                cells.push((dx, dy));
            }
        }
    }
    cells
}

/// Find the tile center closest to `near` where a box of `half_size` fits:
/// inside the region, on walkable tiles only, clear of every `occupied` box.
/// Searches outwards ring by ring up to `max_radius` tiles.
pub fn find_open_position(
    grid: &MultiTileMapGrid,
    registry: &TileRegistry,
    near: Vec2,
    half_size: Vec2,
    occupied: &[BoundingBox],
    max_radius: usize,
) -> Option<Vec2> {
    let tile_size = grid.tile_size();
    let origin = grid.bounds().min;
    let start_column = ((near.x - origin.x) / tile_size).floor() as i64;
    let start_row = ((near.y - origin.y) / tile_size).floor() as i64;

    for radius in 0..=max_radius as i64 {
        for (dx, dy) in ring(radius) {
            let (column, row) = (start_column + dx, start_row + dy);
            let center = origin + Vec2::new(column as f32 + 0.5, row as f32 + 0.5) * tile_size;
            let bbox = BoundingBox::from_center_half_size(center, half_size);
            if check_world_blockers(grid, registry, &bbox).is_none()
                && !occupied.iter().any(|other| other.overlaps(&bbox))
            {
                return Some(center);
            }
        }
    }
    None
}

/// Free spot right next to the region's ark door, never on the door itself
pub fn door_arrival(
    grid: &MultiTileMapGrid,
    registry: &TileRegistry,
    half_size: Vec2,
    occupied: &[BoundingBox],
) -> Option<Vec2> {
    let door = grid.find_tiles(TILE_ARK_DOOR).next()?;
    let door_center = grid.cell_center(door)?;
    let door_box = BoundingBox::from_center_half_size(door_center, Vec2::splat(grid.tile_size() / 2.0));

    let mut blocked = occupied.to_vec();
    blocked.push(door_box);
    find_open_position(grid, registry, door_center, half_size, &blocked, 3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiles::*;

    fn tileset() -> Tileset {
        Tileset::from_grid(Handle::default(), 16, 3, &STANDARD_TILES)
    }

    /// One 5x5 map of grass centered on the origin
    fn small_grid() -> MultiTileMapGrid {
        let tileset = tileset();
        let mut grid = MultiTileMapGrid::new(Vec2::ZERO, 1, 1, 5, 5, 16.0).unwrap();
        let map = grid.get_tile_map_mut(0, 0).unwrap();
        for column in 0..5 {
            for row in 0..5 {
                map.set_tile(LAYER_GROUND, column, row, tileset.create_tile(TILE_GRASS).unwrap())
                    .unwrap();
            }
        }
        grid
    }

    fn put(grid: &mut MultiTileMapGrid, column: usize, row: usize, id: TileId) {
        let tile = tileset().create_tile(id).unwrap();
        grid.get_tile_map_mut(0, 0)
            .unwrap()
            .set_tile(LAYER_OBJECT, column, row, tile)
            .unwrap();
    }

    #[test]
    fn test_ring_sizes() {
        assert_eq!(ring(0), vec![(0, 0)]);
        assert_eq!(ring(1).len(), 8);
        assert_eq!(ring(2).len(), 16);
    }

    #[test]
    fn test_open_spot_is_returned_as_is() {
        let grid = small_grid();
        let registry = TileRegistry::standard();
        let spot = find_open_position(&grid, &registry, Vec2::new(3.0, 3.0), Vec2::splat(6.0), &[], 2);
        assert_eq!(spot, Some(Vec2::ZERO));
    }

    #[test]
    fn test_skips_blocked_and_occupied_cells() {
        let mut grid = small_grid();
        put(&mut grid, 2, 2, TILE_ROCK);
        let registry = TileRegistry::standard();
        let occupied = [BoundingBox::from_center_half_size(Vec2::new(-16.0, -16.0), Vec2::splat(6.0))];

        let spot = find_open_position(&grid, &registry, Vec2::ZERO, Vec2::splat(6.0), &occupied, 2).unwrap();
        // The rock and the occupied corner are skipped; next in ring order
        assert_eq!(spot, Vec2::new(0.0, -16.0));

        let bbox = BoundingBox::from_center_half_size(spot, Vec2::splat(6.0));
        assert_eq!(check_world_blockers(&grid, &registry, &bbox), None);
    }

    #[test]
    fn test_no_room_returns_none() {
        let mut grid = small_grid();
        for column in 0..5 {
            for row in 0..5 {
                put(&mut grid, column, row, TILE_WATER);
            }
        }
        let registry = TileRegistry::standard();
        assert_eq!(
            find_open_position(&grid, &registry, Vec2::ZERO, Vec2::splat(6.0), &[], 4),
            None
        );
    }

    #[test]
    fn test_door_arrival_is_beside_the_door() {
        let mut grid = small_grid();
        // Wall along the top row with a door in the middle
        for column in 0..5 {
            put(&mut grid, column, 0, TILE_ARK_WALL);
        }
        put(&mut grid, 2, 0, TILE_ARK_DOOR);
        let registry = TileRegistry::standard();

        let arrival = door_arrival(&grid, &registry, Vec2::splat(7.0), &[]).unwrap();
        let door = grid.cell_center(grid.find_tiles(TILE_ARK_DOOR).next().unwrap()).unwrap();
        assert_ne!(arrival, door);
        assert!((arrival - door).abs().max_element() <= 16.0);
        assert!(arrival.y > door.y);
    }

    #[test]
    fn test_door_arrival_without_door() {
        let grid = small_grid();
        let registry = TileRegistry::standard();
        assert_eq!(door_arrival(&grid, &registry, Vec2::splat(7.0), &[]), None);
    }
}
