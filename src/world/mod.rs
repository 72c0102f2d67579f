pub mod game_world;
pub mod generator;
pub mod layout;
pub mod loader;
pub mod placement;

// Re-export commonly used items
pub use game_world::{GameWorld, WorldBuildError, WorldStats};
pub use layout::{RegionLayout, TileMapLayout, WorldLayout};

use crate::tiles::TileRegistry;
use bevy::prelude::*;

/// One of the two playable multi-tile-map grids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Overworld,
    ArkInterior,
}

impl Region {
    pub const ALL: [Region; 2] = [Region::Overworld, Region::ArkInterior];

    /// The region on the other side of the ark door
    pub fn other(&self) -> Self {
        match self {
            Region::Overworld => Region::ArkInterior,
            Region::ArkInterior => Region::Overworld,
        }
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Region::Overworld => write!(f, "overworld"),
            Region::ArkInterior => write!(f, "ark interior"),
        }
    }
}

/// Region currently being played and drawn
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveRegion(pub Region);

impl Default for ActiveRegion {
    fn default() -> Self {
        Self(Region::Overworld)
    }
}

/// World space is y-down, Bevy's render space is y-up
pub fn world_to_render(world_pos: Vec2) -> Vec2 {
    Vec2::new(world_pos.x, -world_pos.y)
}

/// Plugin for region state and tile rendering
pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ActiveRegion>()
            .init_resource::<TileRegistry>()
            .add_systems(
                Update,
                loader::spawn_region_tiles.run_if(resource_exists::<GameWorld>),
            );
    }
}
