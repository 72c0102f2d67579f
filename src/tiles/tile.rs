use super::types::TileId;
use crate::collision::BoundingBox;
use bevy::prelude::*;

/// Drawable part of a tile: a region of a texture placed in the world
#[derive(Debug, Clone)]
pub struct TileSprite {
    pub texture: Handle<Image>,
    /// Source rectangle inside the texture, in pixels
    pub region: Rect,
    /// Center of the sprite in world space (pixels, y-down)
    pub world_position: Vec2,
    /// Size drawn in world space; the owning map's cell size once placed
    pub world_size: Vec2,
}

impl TileSprite {
    pub fn size(&self) -> Vec2 {
        self.world_size
    }
}

/// One cell of the world grid. The id never changes after creation; the
/// position is assigned by whichever tile map cell takes ownership of it.
#[derive(Debug, Clone)]
pub struct Tile {
    id: TileId,
    sprite: TileSprite,
}

impl Tile {
    pub(crate) fn new(id: TileId, texture: Handle<Image>, region: Rect) -> Self {
        Self {
            id,
            sprite: TileSprite {
                texture,
                region,
                world_position: Vec2::ZERO,
                world_size: region.size(),
            },
        }
    }

    pub fn id(&self) -> TileId {
        self.id
    }

    pub fn sprite(&self) -> &TileSprite {
        &self.sprite
    }

    pub fn world_position(&self) -> Vec2 {
        self.sprite.world_position
    }

    pub fn set_world_position(&mut self, position: Vec2) {
        self.sprite.world_position = position;
    }

    /// Fit the tile to a map cell
    pub(crate) fn place(&mut self, center: Vec2, cell_size: Vec2) {
        self.sprite.world_position = center;
        self.sprite.world_size = cell_size;
    }

    /// Bounding box recomputed from the sprite on every call
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_center_half_size(self.sprite.world_position, self.sprite.size() / 2.0)
    }
}
