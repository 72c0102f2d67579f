use bevy::prelude::*;

/// Direction of a movement request (world space is y-down)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    #[default]
    Invalid,
}

impl Direction {
    /// All valid directions
    pub const CARDINAL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit vector for the direction, zero for `Invalid`
    pub fn unit_vector(&self) -> Vec2 {
        match self {
            Direction::Up => Vec2::new(0.0, -1.0),
            Direction::Down => Vec2::new(0.0, 1.0),
            Direction::Left => Vec2::new(-1.0, 0.0),
            Direction::Right => Vec2::new(1.0, 0.0),
            Direction::Invalid => Vec2::ZERO,
        }
    }

    pub fn is_valid(&self) -> bool {
        *self != Direction::Invalid
    }
}

/// A proposed, not yet applied displacement
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Movement {
    pub direction: Direction,
    pub distance_in_pixels: f32,
}

impl Movement {
    pub const fn new(direction: Direction, distance_in_pixels: f32) -> Self {
        Self {
            direction,
            distance_in_pixels,
        }
    }

    /// Displacement vector; an invalid direction yields no movement
    pub fn to_vector(&self) -> Vec2 {
        self.direction.unit_vector() * self.distance_in_pixels
    }
}
