use bevy::prelude::*;

mod collision;
mod entities;
mod tiles;
mod world;

use entities::{EntitiesPlugin, MovementConfig};
use tiles::{TileRegistry, Tileset, STANDARD_TILES, TILESET_COLUMNS, TILESET_TILE_PIXELS};
use world::{generator, GameWorld, WorldLayout, WorldPlugin};

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(ImagePlugin::default_nearest()))
        .add_plugins((WorldPlugin, EntitiesPlugin))
        .insert_resource(generator::default_layout())
        .add_systems(Startup, setup_world)
        .run();
}

fn setup_world(
    mut commands: Commands,
    assets: Res<AssetServer>,
    layout: Res<WorldLayout>,
    registry: Res<TileRegistry>,
    config: Res<MovementConfig>,
    mut exit: MessageWriter<AppExit>,
) {
    commands.spawn((Camera2d, Transform::from_xyz(0.0, 0.0, 999.0)));

    let texture = assets.load("tilesets/ark_tiles.png");
    let tileset = Tileset::from_grid(texture, TILESET_TILE_PIXELS, TILESET_COLUMNS, &STANDARD_TILES);

    let world = match GameWorld::build(&layout, &tileset) {
        Ok(world) => world,
        Err(e) => {
            error!("Failed to build the world: {}", e);
            exit.write(AppExit::error());
            return;
        }
    };

    let start = Vec2::from_array(layout.player_start);
    let player_box = entities::CollisionBox::square(config.player_half_size)
        .bounding_box_at(&entities::Position::from(start));
    entities::spawn_player(&mut commands, start, &config, &assets);

    let mut occupied = vec![player_box];
    let animals = entities::plan_animal_positions(&world, &registry, config.animal_half_size, &mut occupied);
    for (species, position) in &animals {
        entities::spawn_animal(&mut commands, *species, *position, &config, &assets);
    }

    info!("World ready: {} animals, player at {}", animals.len(), start);
    commands.insert_resource(tileset);
    commands.insert_resource(world);
}
