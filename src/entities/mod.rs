pub mod spawning;
pub mod systems;
pub mod types;

pub use spawning::*;
pub use systems::*;
pub use types::*;

use crate::world::GameWorld;
use bevy::prelude::*;

/// Movement tuning shared by input, wandering and spawning
#[derive(Resource, Debug, Clone)]
pub struct MovementConfig {
    /// Pixels per second
    pub player_speed: f32,
    pub animal_speed: f32,
    /// Seconds between wander direction changes
    pub wander_interval_secs: f32,
    pub player_half_size: f32,
    pub animal_half_size: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            player_speed: 64.0,
            animal_speed: 20.0,
            wander_interval_secs: 1.5,
            player_half_size: 7.0,
            animal_half_size: 6.0,
        }
    }
}

/// Plugin for the player, the animals and everything that moves them
pub struct EntitiesPlugin;

impl Plugin for EntitiesPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MovementConfig>().add_systems(
            Update,
            (
                (request_player_movement, update_wandering),
                resolve_movement_requests,
                use_ark_door,
                (update_sprite_facing, sync_position_with_transform, sync_region_visibility),
                follow_player,
            )
                .chain()
                .run_if(resource_exists::<GameWorld>),
        );
    }
}
