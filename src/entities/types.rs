use crate::collision::{BoundingBox, Direction, Movement, MoverKind};
use crate::world::Region;
use bevy::prelude::*;

/// World position component - tracks entity position in world space (pixels, y-down)
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn to_vec2(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

impl From<Vec2> for Position {
    fn from(v: Vec2) -> Self {
        Self::new(v.x, v.y)
    }
}

/// Collision extent of a mover, centered on its position
#[derive(Component, Debug, Clone, Copy)]
pub struct CollisionBox {
    pub half_size: Vec2,
}

impl CollisionBox {
    pub fn square(half_extent: f32) -> Self {
        Self {
            half_size: Vec2::splat(half_extent),
        }
    }

    pub fn bounding_box_at(&self, position: &Position) -> BoundingBox {
        BoundingBox::from_center_half_size(position.to_vec2(), self.half_size)
    }
}

/// At most one outstanding movement per mover; a newer request replaces it
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct MovementRequest(Option<Movement>);

impl MovementRequest {
    pub fn request(&mut self, movement: Movement) {
        self.0 = Some(movement);
    }

    /// Consume the pending movement
    pub fn take(&mut self) -> Option<Movement> {
        self.0.take()
    }

    pub fn pending(&self) -> Option<Movement> {
        self.0
    }
}

/// Direction the mover last tried to go (for sprite orientation)
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Facing(pub Direction);

impl Default for Facing {
    fn default() -> Self {
        Facing(Direction::Down)
    }
}

/// Which region an entity lives in
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct InRegion(pub Region);

/// Marker component for the player character
#[derive(Component)]
pub struct Player;

/// Animal species taken aboard the ark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimalSpecies {
    Dog,
    Cat,
    Sheep,
    Cow,
    Pig,
    Horse,
    Goat,
    Rabbit,
}

impl AnimalSpecies {
    pub const ALL: [AnimalSpecies; 8] = [
        AnimalSpecies::Dog,
        AnimalSpecies::Cat,
        AnimalSpecies::Sheep,
        AnimalSpecies::Cow,
        AnimalSpecies::Pig,
        AnimalSpecies::Horse,
        AnimalSpecies::Goat,
        AnimalSpecies::Rabbit,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            AnimalSpecies::Dog => "dog",
            AnimalSpecies::Cat => "cat",
            AnimalSpecies::Sheep => "sheep",
            AnimalSpecies::Cow => "cow",
            AnimalSpecies::Pig => "pig",
            AnimalSpecies::Horse => "horse",
            AnimalSpecies::Goat => "goat",
            AnimalSpecies::Rabbit => "rabbit",
        }
    }

    pub fn texture_path(&self) -> String {
        format!("animals/{}.png", self.name())
    }
}

/// Animal component
#[derive(Component, Debug, Clone, Copy)]
pub struct Animal {
    pub species: AnimalSpecies,
}

/// Wandering behavior - walks in a straight line, picking a new
/// direction (or a rest) every time the timer fires
#[derive(Component, Debug, Clone)]
pub struct Wander {
    pub timer: Timer,
    /// `None` while resting
    pub direction: Option<Direction>,
    /// Number of direction changes so far, mixed into the next pick
    pub step: u64,
}

impl Wander {
    pub fn new(interval_secs: f32) -> Self {
        Self {
            timer: Timer::from_seconds(interval_secs, TimerMode::Repeating),
            direction: None,
            step: 0,
        }
    }
}

/// Components every mover needs
#[derive(Bundle)]
pub struct MoverBundle {
    pub kind: MoverKind,
    pub position: Position,
    pub collision_box: CollisionBox,
    pub request: MovementRequest,
    pub facing: Facing,
    pub region: InRegion,
}

impl MoverBundle {
    pub fn new(kind: MoverKind, position: Vec2, half_extent: f32, region: Region) -> Self {
        Self {
            kind,
            position: Position::from(position),
            collision_box: CollisionBox::square(half_extent),
            request: MovementRequest::default(),
            facing: Facing::default(),
            region: InRegion(region),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_is_consumed_once() {
        let mut request = MovementRequest::default();
        assert_eq!(request.pending(), None);

        request.request(Movement::new(Direction::Up, 2.0));
        request.request(Movement::new(Direction::Left, 3.0));
        assert_eq!(request.take(), Some(Movement::new(Direction::Left, 3.0)));
        assert_eq!(request.take(), None);
    }

    #[test]
    fn test_collision_box_at_position() {
        let bbox = CollisionBox::square(7.0).bounding_box_at(&Position::new(8.0, 40.0));
        assert_eq!(bbox.min(), Vec2::new(1.0, 33.0));
        assert_eq!(bbox.max(), Vec2::new(15.0, 47.0));
    }

    #[test]
    fn test_species_texture_paths_are_unique() {
        let mut paths: Vec<_> = AnimalSpecies::ALL.iter().map(|s| s.texture_path()).collect();
        paths.sort();
        paths.dedup();
        assert_eq!(paths.len(), AnimalSpecies::ALL.len());
    }
}
