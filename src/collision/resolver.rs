use super::{bounds::BoundingBox, movement::Movement};
use crate::tiles::{MultiTileMapGrid, TileId, TileRegistry};
use bevy::prelude::*;

/// The closed set of things that move through the world
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoverKind {
    Player,
    Animal,
    Object,
}

/// Capability shared by every mover: a bounding box, one pending
/// movement request, and a way to apply an accepted displacement.
pub trait Collider {
    fn kind(&self) -> MoverKind;

    fn bounding_box(&self) -> BoundingBox;

    /// Replace any pending request with a newer one
    fn request_movement(&mut self, movement: Movement);

    /// Consume the pending request, leaving none behind
    fn take_requested_movement(&mut self) -> Option<Movement>;

    fn move_by(&mut self, displacement: Vec2);
}

/// Plain mover value: a position, a collider size and a pending request
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub kind: MoverKind,
    pub position: Vec2,
    pub half_size: Vec2,
    pending: Option<Movement>,
}

impl Body {
    pub fn new(kind: MoverKind, position: Vec2, half_size: Vec2) -> Self {
        Self {
            kind,
            position,
            half_size,
            pending: None,
        }
    }

    pub fn with_request(mut self, movement: Option<Movement>) -> Self {
        self.pending = movement;
        self
    }

    pub fn has_pending_movement(&self) -> bool {
        self.pending.is_some()
    }
}

impl Collider for Body {
    fn kind(&self) -> MoverKind {
        self.kind
    }

    fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_center_half_size(self.position, self.half_size)
    }

    fn request_movement(&mut self, movement: Movement) {
        self.pending = Some(movement);
    }

    fn take_requested_movement(&mut self) -> Option<Movement> {
        self.pending.take()
    }

    fn move_by(&mut self, displacement: Vec2) {
        self.position += displacement;
    }
}

/// Why a move was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockReason {
    /// Part of the destination lies outside the region
    OutsideWorld,
    /// A non-walkable tile overlaps the destination
    Tile(TileId),
    /// The destination overlaps another mover (index into the batch)
    Mover(usize),
}

/// Result of resolving one mover's request
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveOutcome {
    /// No request was pending
    Idle,
    /// The request had no valid direction and was dropped
    Ignored,
    Blocked(BlockReason),
    Moved(Vec2),
}

impl MoveOutcome {
    pub fn is_moved(&self) -> bool {
        matches!(self, MoveOutcome::Moved(_))
    }
}

/// Check a box against the region's extent and tile walkability
pub fn check_world_blockers(
    grid: &MultiTileMapGrid,
    registry: &TileRegistry,
    bbox: &BoundingBox,
) -> Option<BlockReason> {
    if !bbox.is_within(grid.bounds()) {
        return Some(BlockReason::OutsideWorld);
    }
    grid.tiles_overlapping(bbox.rect())
        .filter(|tile| tile.bounding_box().overlaps(bbox))
        .find(|tile| registry.blocks_movement(tile.id()))
        .map(|tile| BlockReason::Tile(tile.id()))
}

/// Resolve every pending movement in one batch.
///
/// All requests are taken before any is judged, and every judgement is made
/// against the same snapshot: the movers' current boxes plus their candidate
/// boxes. Two movers heading into the same space both stay put, so the
/// outcome never depends on the order of `movers`.
pub fn resolve_movements<C: Collider>(
    grid: &MultiTileMapGrid,
    registry: &TileRegistry,
    movers: &mut [C],
) -> Vec<MoveOutcome> {
    let requests: Vec<Option<Movement>> = movers
        .iter_mut()
        .map(Collider::take_requested_movement)
        .collect();
    let current: Vec<BoundingBox> = movers.iter().map(Collider::bounding_box).collect();
    let candidates: Vec<Option<BoundingBox>> = requests
        .iter()
        .zip(&current)
        .map(|(request, bbox)| {
            request
                .filter(|movement| movement.direction.is_valid())
                .map(|movement| bbox.translated(movement.to_vector()))
        })
        .collect();

    let outcomes: Vec<MoveOutcome> = requests
        .iter()
        .enumerate()
        .map(|(index, request)| {
            let Some(movement) = request else {
                return MoveOutcome::Idle;
            };
            let Some(candidate) = candidates[index] else {
                warn!(
                    "Dropping {:?} movement request with no valid direction: {:?}",
                    movers[index].kind(),
                    movement
                );
                return MoveOutcome::Ignored;
            };
            if let Some(reason) = check_world_blockers(grid, registry, &candidate) {
                return MoveOutcome::Blocked(reason);
            }
            let other_mover = (0..current.len()).filter(|&other| other != index).find(|&other| {
                candidate.overlaps(&current[other])
                    || candidates[other].is_some_and(|theirs| candidate.overlaps(&theirs))
            });
            if let Some(other) = other_mover {
                return MoveOutcome::Blocked(BlockReason::Mover(other));
            }
            MoveOutcome::Moved(movement.to_vector())
        })
        .collect();

    for (mover, outcome) in movers.iter_mut().zip(&outcomes) {
        if let MoveOutcome::Moved(displacement) = outcome {
            mover.move_by(*displacement);
        }
    }
    outcomes
}
