use super::{world_to_render, ActiveRegion, GameWorld};
use crate::tiles::{layer_z_position, TileLocation};
use bevy::prelude::*;

/// Marker for a spawned tile sprite, pointing back at the cell that owns the tile
#[derive(Component, Debug, Clone, Copy)]
pub struct RegionTile {
    pub location: TileLocation,
}

/// Respawn tile sprites whenever the active region changes
pub fn spawn_region_tiles(
    mut commands: Commands,
    world: Res<GameWorld>,
    active: Res<ActiveRegion>,
    existing: Query<Entity, With<RegionTile>>,
) {
    if !active.is_changed() {
        return;
    }

    let mut despawned = 0;
    for entity in existing.iter() {
        commands.entity(entity).despawn();
        despawned += 1;
    }

    let grid = world.region(active.0);
    let mut spawned = 0;
    for (map_row, map_column, map) in grid.iter_maps() {
        for (layer, cell, tile) in map.iter_tiles() {
            let sprite = tile.sprite();
            let position = world_to_render(sprite.world_position);
            commands.spawn((
                Sprite {
                    image: sprite.texture.clone(),
                    rect: Some(sprite.region),
                    custom_size: Some(sprite.size()),
                    ..default()
                },
                Transform::from_xyz(position.x, position.y, layer_z_position(layer)),
                RegionTile {
                    location: TileLocation {
                        map_row,
                        map_column,
                        layer,
                        cell,
                    },
                },
            ));
            spawned += 1;
        }
    }

    info!(
        "Entered {}: despawned {} tile sprites, spawned {}",
        active.0, despawned, spawned
    );

    #[cfg(feature = "debug_regions")]
    print_region_grid(&world, active.0);
}

/// Print a walkability map of a region, one character per tile
#[cfg(feature = "debug_regions")]
fn print_region_grid(world: &GameWorld, region: super::Region) {
    use crate::tiles::{TileRegistry, LAYER_GROUND, LAYER_OBJECT, TILE_ARK_DOOR, TILE_WATER};

    let registry = TileRegistry::standard();
    let grid = world.region(region);
    let bounds = grid.bounds();
    let tile_size = grid.tile_size();
    let columns = (bounds.width() / tile_size).round() as usize;
    let rows = (bounds.height() / tile_size).round() as usize;

    let mut text = format!("\n{} ({}x{} tiles)\n", region, columns, rows);
    for row in 0..rows {
        for column in 0..columns {
            let center = bounds.min + Vec2::new(column as f32 + 0.5, row as f32 + 0.5) * tile_size;
            let ground = grid.get_layer_tile_at_world_position(LAYER_GROUND, center);
            let object = grid.get_layer_tile_at_world_position(LAYER_OBJECT, center);
            let symbol = match (ground.map(|t| t.id()), object.map(|t| t.id())) {
                (_, Some(TILE_ARK_DOOR)) => 'D',
                (_, Some(id)) if registry.blocks_movement(id) => '#',
                (Some(TILE_WATER), _) => '~',
                (Some(_), _) => '.',
                (None, _) => ' ',
            };
            text.push(symbol);
        }
        text.push('\n');
    }
    text.push_str("Legend: . = walkable  # = blocked  ~ = water  D = ark door\n");

    info!("{}", text);
}
