use super::{
    CollisionBox, Facing, InRegion, MovementConfig, MovementRequest, Player, Position, Wander,
};
use crate::collision::{resolve_movements, Body, BoundingBox, Direction, MoveOutcome, Movement, MoverKind};
use crate::tiles::{TileRegistry, LAYER_OBJECT, TILE_ARK_DOOR};
use crate::world::{placement, world_to_render, ActiveRegion, GameWorld, Region};
use bevy::prelude::*;
use std::hash::{DefaultHasher, Hash, Hasher};

/// Keyboard bindings, checked in order; the first held key wins
const MOVE_KEYS: [(KeyCode, KeyCode, Direction); 4] = [
    (KeyCode::KeyW, KeyCode::ArrowUp, Direction::Up),
    (KeyCode::KeyS, KeyCode::ArrowDown, Direction::Down),
    (KeyCode::KeyA, KeyCode::ArrowLeft, Direction::Left),
    (KeyCode::KeyD, KeyCode::ArrowRight, Direction::Right),
];

/// Turns held movement keys into a movement request for the player
pub fn request_player_movement(
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    config: Res<MovementConfig>,
    mut query: Query<&mut MovementRequest, With<Player>>,
) {
    let Some(direction) = MOVE_KEYS
        .iter()
        .find(|(key, arrow, _)| keyboard.pressed(*key) || keyboard.pressed(*arrow))
        .map(|(_, _, direction)| *direction)
    else {
        return;
    };

    let distance = config.player_speed * time.delta_secs();
    for mut request in &mut query {
        request.request(Movement::new(direction, distance));
    }
}

/// Pick what a wandering animal does next: one of the four directions, or
/// `None` to stand still. Pure function of the entity and its step counter.
pub fn pick_wander_direction(entity: Entity, step: u64) -> Option<Direction> {
    let mut hasher = DefaultHasher::new();
    entity.to_bits().hash(&mut hasher);
    step.hash(&mut hasher);
    match hasher.finish() % 6 {
        0 => Some(Direction::Up),
        1 => Some(Direction::Down),
        2 => Some(Direction::Left),
        3 => Some(Direction::Right),
        _ => None,
    }
}

/// Ticks wander timers, re-rolls directions, and requests this frame's step
pub fn update_wandering(
    time: Res<Time>,
    config: Res<MovementConfig>,
    mut query: Query<(Entity, &mut Wander, &mut MovementRequest)>,
) {
    let distance = config.animal_speed * time.delta_secs();

    for (entity, mut wander, mut request) in &mut query {
        wander.timer.tick(time.delta());
        if wander.timer.just_finished() {
            wander.step += 1;
            wander.direction = pick_wander_direction(entity, wander.step);
        }

        if let Some(direction) = wander.direction {
            request.request(Movement::new(direction, distance));
        }
    }
}

/// Resolves every pending movement request, one batch per region.
/// Every mover of the region joins the batch, idle ones included, so
/// nobody can walk into a mover that stands still.
pub fn resolve_movement_requests(
    world: Res<GameWorld>,
    registry: Res<TileRegistry>,
    mut query: Query<(
        Entity,
        &MoverKind,
        &mut Position,
        &CollisionBox,
        &mut MovementRequest,
        &mut Facing,
        &InRegion,
    )>,
) {
    for region in Region::ALL {
        let mut batch = Vec::new();
        let mut bodies = Vec::new();
        for (entity, kind, position, collision_box, mut request, _, in_region) in &mut query {
            if in_region.0 != region {
                continue;
            }
            let movement = request.take();
            batch.push((entity, movement));
            bodies.push(Body::new(*kind, position.to_vec2(), collision_box.half_size).with_request(movement));
        }
        if batch.iter().all(|(_, movement)| movement.is_none()) {
            continue;
        }

        let outcomes = resolve_movements(world.region(region), &registry, &mut bodies);

        for (((entity, movement), body), outcome) in batch.iter().zip(&bodies).zip(&outcomes) {
            let Some(movement) = movement else {
                continue;
            };
            let Ok((_, kind, mut position, _, _, mut facing, _)) = query.get_mut(*entity) else {
                continue;
            };
            if movement.direction.is_valid() && facing.0 != movement.direction {
                facing.0 = movement.direction;
            }
            match outcome {
                MoveOutcome::Moved(_) => *position = Position::from(body.position),
                MoveOutcome::Blocked(reason) => {
                    debug!("{:?} {} blocked in {}: {:?}", kind, entity, region, reason)
                }
                MoveOutcome::Idle | MoveOutcome::Ignored => {}
            }
        }
    }
}

/// Is the mover's center standing on an ark door?
pub fn on_ark_door(world: &GameWorld, region: Region, position: Vec2) -> bool {
    world
        .region(region)
        .get_layer_tile_at_world_position(LAYER_OBJECT, position)
        .is_some_and(|tile| tile.id() == TILE_ARK_DOOR)
}

/// Moves the player through the ark door into the other region
pub fn use_ark_door(
    world: Res<GameWorld>,
    registry: Res<TileRegistry>,
    mut active: ResMut<ActiveRegion>,
    mut player: Query<(&mut Position, &CollisionBox, &mut InRegion), With<Player>>,
    others: Query<(&Position, &CollisionBox, &InRegion), Without<Player>>,
) {
    let Ok((mut position, collision_box, mut in_region)) = player.single_mut() else {
        return;
    };
    if !on_ark_door(&world, in_region.0, position.to_vec2()) {
        return;
    }

    let destination = in_region.0.other();
    let occupied: Vec<BoundingBox> = others
        .iter()
        .filter(|(_, _, region)| region.0 == destination)
        .map(|(other, other_box, _)| other_box.bounding_box_at(other))
        .collect();

    match placement::door_arrival(world.region(destination), &registry, collision_box.half_size, &occupied) {
        Some(arrival) => {
            info!("Player walks through the ark door into the {}", destination);
            *position = Position::from(arrival);
            in_region.0 = destination;
            active.0 = destination;
        }
        None => warn!("No free spot behind the ark door in the {}", destination),
    }
}

/// Mirrors the sprite when a mover faces left
pub fn update_sprite_facing(mut query: Query<(&Facing, &mut Sprite), Changed<Facing>>) {
    for (facing, mut sprite) in &mut query {
        match facing.0 {
            Direction::Left => sprite.flip_x = true,
            Direction::Right => sprite.flip_x = false,
            _ => {}
        }
    }
}

/// Syncs entity Position component with Transform for rendering
pub fn sync_position_with_transform(
    mut query: Query<(&Position, &mut Transform), Changed<Position>>,
) {
    for (position, mut transform) in &mut query {
        let render = world_to_render(position.to_vec2());
        transform.translation.x = render.x;
        transform.translation.y = render.y;
    }
}

/// Only movers in the active region are drawn
pub fn sync_region_visibility(
    active: Res<ActiveRegion>,
    mut query: Query<(Ref<InRegion>, &mut Visibility)>,
) {
    for (in_region, mut visibility) in &mut query {
        if !active.is_changed() && !in_region.is_changed() {
            continue;
        }
        *visibility = if in_region.0 == active.0 {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }
}

/// Camera tracks the player
pub fn follow_player(
    player: Query<&Transform, (With<Player>, Without<Camera2d>)>,
    mut camera: Query<&mut Transform, With<Camera2d>>,
) {
    let (Ok(player), Ok(mut camera)) = (player.single(), camera.single_mut()) else {
        return;
    };
    camera.translation.x = player.translation.x;
    camera.translation.y = player.translation.y;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{MoverBundle, Wander};
    use crate::tiles::{Tileset, STANDARD_TILES};
    use crate::world::generator::default_layout;
    use bevy::ecs::system::RunSystemOnce;
    use std::time::Duration;

    fn world() -> GameWorld {
        let tileset = Tileset::from_grid(Handle::default(), 16, 3, &STANDARD_TILES);
        GameWorld::build(&default_layout(), &tileset).unwrap()
    }

    fn player_start() -> Vec2 {
        Vec2::from_array(default_layout().player_start)
    }

    /// ECS world holding the game world and the standard tile registry
    fn ecs_world() -> World {
        let mut ecs = World::new();
        ecs.insert_resource(world());
        ecs.insert_resource(TileRegistry::standard());
        ecs.insert_resource(ActiveRegion::default());
        ecs.insert_resource(MovementConfig::default());
        ecs
    }

    fn spawn_mover(ecs: &mut World, kind: MoverKind, position: Vec2, half_extent: f32, region: Region) -> Entity {
        let entity = ecs.spawn(MoverBundle::new(kind, position, half_extent, region)).id();
        if kind == MoverKind::Player {
            ecs.entity_mut(entity).insert(Player);
        }
        entity
    }

    fn request(ecs: &mut World, entity: Entity, direction: Direction, distance: f32) {
        ecs.get_mut::<MovementRequest>(entity)
            .unwrap()
            .request(Movement::new(direction, distance));
    }

    fn position(ecs: &World, entity: Entity) -> Vec2 {
        ecs.get::<Position>(entity).unwrap().to_vec2()
    }

    #[test]
    fn test_idle_mover_blocks_others() {
        let mut ecs = ecs_world();
        let start = player_start();
        let player = spawn_mover(&mut ecs, MoverKind::Player, start, 7.0, Region::Overworld);
        let animal = spawn_mover(&mut ecs, MoverKind::Animal, start + Vec2::new(16.0, 0.0), 6.0, Region::Overworld);
        request(&mut ecs, player, Direction::Right, 8.0);

        ecs.run_system_once(resolve_movement_requests).unwrap();

        assert_eq!(position(&ecs, player), start);
        assert_eq!(position(&ecs, animal), start + Vec2::new(16.0, 0.0));
        assert_eq!(ecs.get::<Facing>(player).unwrap().0, Direction::Right);
        assert_eq!(ecs.get::<MovementRequest>(player).unwrap().pending(), None);
    }

    #[test]
    fn test_accepted_move_is_written_back() {
        let mut ecs = ecs_world();
        let start = player_start();
        let player = spawn_mover(&mut ecs, MoverKind::Player, start, 7.0, Region::Overworld);
        request(&mut ecs, player, Direction::Down, 4.0);

        ecs.run_system_once(resolve_movement_requests).unwrap();

        assert_eq!(position(&ecs, player), start + Vec2::new(0.0, 4.0));
        assert_eq!(ecs.get::<Facing>(player).unwrap().0, Direction::Down);
    }

    #[test]
    fn test_movers_in_other_regions_do_not_collide() {
        let mut ecs = ecs_world();
        let start = player_start();
        let player = spawn_mover(&mut ecs, MoverKind::Player, start, 7.0, Region::Overworld);
        // Same coordinates, but inside the ark
        spawn_mover(&mut ecs, MoverKind::Animal, start + Vec2::new(16.0, 0.0), 6.0, Region::ArkInterior);
        request(&mut ecs, player, Direction::Right, 8.0);

        ecs.run_system_once(resolve_movement_requests).unwrap();

        assert_eq!(position(&ecs, player), start + Vec2::new(8.0, 0.0));
    }

    #[test]
    fn test_invalid_request_keeps_facing() {
        let mut ecs = ecs_world();
        let start = player_start();
        let player = spawn_mover(&mut ecs, MoverKind::Player, start, 7.0, Region::Overworld);
        request(&mut ecs, player, Direction::Invalid, 8.0);

        ecs.run_system_once(resolve_movement_requests).unwrap();

        assert_eq!(position(&ecs, player), start);
        assert_eq!(ecs.get::<Facing>(player).unwrap().0, Direction::Down);
        assert_eq!(ecs.get::<MovementRequest>(player).unwrap().pending(), None);
    }

    #[test]
    fn test_door_switches_region() {
        let mut ecs = ecs_world();
        let game_world = world();
        let overworld = game_world.region(Region::Overworld);
        let door = overworld.cell_center(overworld.find_tiles(TILE_ARK_DOOR).next().unwrap()).unwrap();
        let player = spawn_mover(&mut ecs, MoverKind::Player, door, 7.0, Region::Overworld);

        ecs.run_system_once(use_ark_door).unwrap();

        assert_eq!(ecs.get::<InRegion>(player).unwrap().0, Region::ArkInterior);
        assert_eq!(ecs.resource::<ActiveRegion>().0, Region::ArkInterior);
        let arrival = position(&ecs, player);
        assert!(!on_ark_door(&game_world, Region::ArkInterior, arrival));
        let expected = placement::door_arrival(
            game_world.region(Region::ArkInterior),
            &TileRegistry::standard(),
            Vec2::splat(7.0),
            &[],
        );
        assert_eq!(Some(arrival), expected);

        // Standing beside the door does nothing
        ecs.run_system_once(use_ark_door).unwrap();
        assert_eq!(ecs.get::<InRegion>(player).unwrap().0, Region::ArkInterior);
        assert_eq!(position(&ecs, player), arrival);
    }

    #[test]
    fn test_door_arrival_avoids_movers_already_there() {
        let mut ecs = ecs_world();
        let game_world = world();
        let registry = TileRegistry::standard();
        let interior = game_world.region(Region::ArkInterior);
        let first_choice = placement::door_arrival(interior, &registry, Vec2::splat(7.0), &[]).unwrap();
        let animal = spawn_mover(&mut ecs, MoverKind::Animal, first_choice, 6.0, Region::ArkInterior);

        let overworld = game_world.region(Region::Overworld);
        let door = overworld.cell_center(overworld.find_tiles(TILE_ARK_DOOR).next().unwrap()).unwrap();
        let player = spawn_mover(&mut ecs, MoverKind::Player, door, 7.0, Region::Overworld);

        ecs.run_system_once(use_ark_door).unwrap();

        let animal_box = BoundingBox::from_center_half_size(position(&ecs, animal), Vec2::splat(6.0));
        let player_box = BoundingBox::from_center_half_size(position(&ecs, player), Vec2::splat(7.0));
        assert_eq!(ecs.get::<InRegion>(player).unwrap().0, Region::ArkInterior);
        assert!(!player_box.overlaps(&animal_box));
    }

    #[test]
    fn test_wandering_requests_a_step() {
        let mut ecs = ecs_world();
        let mut time = Time::<()>::default();
        time.advance_by(Duration::from_secs(2));
        ecs.insert_resource(time);

        let animal = ecs
            .spawn((Wander::new(1.5), MovementRequest::default()))
            .id();

        ecs.run_system_once(update_wandering).unwrap();

        let wander = ecs.get::<Wander>(animal).unwrap();
        assert_eq!(wander.step, 1);
        assert_eq!(wander.direction, pick_wander_direction(animal, 1));
        let pending = ecs.get::<MovementRequest>(animal).unwrap().pending();
        match wander.direction {
            Some(direction) => {
                let expected = MovementConfig::default().animal_speed * 2.0;
                assert_eq!(pending, Some(Movement::new(direction, expected)));
            }
            None => assert_eq!(pending, None),
        }
    }

    #[test]
    fn test_wander_pick_is_deterministic() {
        let entity = Entity::from_bits(42 | (1 << 32));
        for step in 0..20 {
            assert_eq!(pick_wander_direction(entity, step), pick_wander_direction(entity, step));
        }
    }

    #[test]
    fn test_wander_covers_every_choice() {
        let entity = Entity::from_bits(7 | (1 << 32));
        let picks: Vec<_> = (0..200).map(|step| pick_wander_direction(entity, step)).collect();
        for direction in Direction::CARDINAL {
            assert!(picks.contains(&Some(direction)), "never picked {:?}", direction);
        }
        assert!(picks.contains(&None));
    }

    #[test]
    fn test_door_tiles_are_detected() {
        let world = world();
        for region in Region::ALL {
            let grid = world.region(region);
            let door = grid.find_tiles(TILE_ARK_DOOR).next().unwrap();
            let center = grid.cell_center(door).unwrap();
            assert!(on_ark_door(&world, region, center));
            assert!(!on_ark_door(&world, region, center + Vec2::new(0.0, 16.0)));
        }
    }

    #[test]
    fn test_door_arrival_does_not_bounce_back() {
        let world = world();
        let registry = TileRegistry::standard();
        for region in Region::ALL {
            let arrival = placement::door_arrival(world.region(region), &registry, Vec2::splat(7.0), &[]).unwrap();
            assert!(!on_ark_door(&world, region, arrival));
        }
    }

    #[test]
    fn test_player_walks_from_start_to_ark_door() {
        let world = world();
        let registry = TileRegistry::standard();
        let start = Vec2::from_array(default_layout().player_start);
        let mut player = [Body::new(MoverKind::Player, start, Vec2::splat(7.0))];

        let mut steps = 0;
        while !on_ark_door(&world, Region::Overworld, player[0].position) {
            player[0] = player[0].clone().with_request(Some(Movement::new(Direction::Up, 2.0)));
            let outcomes = resolve_movements(world.region(Region::Overworld), &registry, &mut player);
            assert!(outcomes[0].is_moved(), "stuck at {}", player[0].position);
            steps += 1;
            assert!(steps < 64);
        }
    }
}
