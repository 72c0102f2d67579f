pub mod bounds;
pub mod movement;
pub mod resolver;

pub use bounds::BoundingBox;
pub use movement::{Direction, Movement};
pub use resolver::{
    check_world_blockers, resolve_movements, BlockReason, Body, Collider, MoveOutcome, MoverKind,
};
