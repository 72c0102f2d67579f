use super::{Animal, AnimalSpecies, MovementConfig, MoverBundle, Player, Wander};
use crate::collision::{BoundingBox, MoverKind};
use crate::tiles::MOVER_Z;
use crate::world::{placement, world_to_render, GameWorld, Region};
use bevy::prelude::*;

/// How far (in tiles) to look for free ground around a spawn point
const SPAWN_SEARCH_RADIUS: usize = 8;

fn mover_sprite(texture: Handle<Image>, half_extent: f32) -> Sprite {
    Sprite {
        custom_size: Some(Vec2::splat(half_extent * 2.0)),
        ..Sprite::from_image(texture)
    }
}

/// Spawns the player at the given world position
pub fn spawn_player(
    commands: &mut Commands,
    position: Vec2,
    config: &MovementConfig,
    assets: &AssetServer,
) -> Entity {
    let render = world_to_render(position);
    commands
        .spawn((
            Player,
            MoverBundle::new(MoverKind::Player, position, config.player_half_size, Region::Overworld),
            mover_sprite(assets.load("characters/noah.png"), config.player_half_size),
            Transform::from_xyz(render.x, render.y, MOVER_Z),
        ))
        .id()
}

/// Spawns one animal at the given overworld position
pub fn spawn_animal(
    commands: &mut Commands,
    species: AnimalSpecies,
    position: Vec2,
    config: &MovementConfig,
    assets: &AssetServer,
) -> Entity {
    let render = world_to_render(position);
    commands
        .spawn((
            Animal { species },
            Wander::new(config.wander_interval_secs),
            MoverBundle::new(MoverKind::Animal, position, config.animal_half_size, Region::Overworld),
            mover_sprite(assets.load(species.texture_path()), config.animal_half_size),
            Transform::from_xyz(render.x, render.y, MOVER_Z),
        ))
        .id()
}

/// Preferred spawn point for the n-th species: the center of a tile map,
/// spread over the overworld so pairs don't start on top of each other.
fn species_home(world: &GameWorld, index: usize) -> Vec2 {
    let grid = world.region(Region::Overworld);
    let maps = grid.width_in_maps() * grid.height_in_maps();
    let map_index = (index * 11 + 5) % maps;
    grid.get_tile_map(map_index / grid.width_in_maps(), map_index % grid.width_in_maps())
        .map_or(Vec2::ZERO, |map| map.center())
}

/// Work out where every pair of animals starts. Each placement is added to
/// `occupied` so later animals never overlap earlier ones.
pub fn plan_animal_positions(
    world: &GameWorld,
    registry: &crate::tiles::TileRegistry,
    half_extent: f32,
    occupied: &mut Vec<BoundingBox>,
) -> Vec<(AnimalSpecies, Vec2)> {
    let grid = world.region(Region::Overworld);
    let half_size = Vec2::splat(half_extent);
    let mut placements = Vec::new();

    for (index, species) in AnimalSpecies::ALL.into_iter().enumerate() {
        let home = species_home(world, index);
        for _ in 0..2 {
            match placement::find_open_position(grid, registry, home, half_size, occupied, SPAWN_SEARCH_RADIUS) {
                Some(position) => {
                    occupied.push(BoundingBox::from_center_half_size(position, half_size));
                    placements.push((species, position));
                }
                None => warn!("No room for a {} near {}", species.name(), home),
            }
        }
    }
    placements
}
