use super::{constants::INVALID_TILE_ID, tile::Tile, types::TileId};
use bevy::prelude::*;
use std::collections::HashMap;

/// Texture region registered for a tile id
#[derive(Debug, Clone)]
struct TileTexture {
    texture: Handle<Image>,
    region: Rect,
}

/// Maps tile ids to texture regions and creates unpositioned tiles
#[derive(Resource, Debug, Clone, Default)]
pub struct Tileset {
    textures: HashMap<TileId, TileTexture>,
}

impl Tileset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tileset from an image laid out as a grid of square tiles.
    /// `ids[i]` is mapped to the i-th cell, left to right, top to bottom.
    pub fn from_grid(texture: Handle<Image>, tile_pixels: u32, columns: u32, ids: &[TileId]) -> Self {
        let mut tileset = Self::new();
        let size = tile_pixels as f32;
        for (index, &id) in ids.iter().enumerate() {
            let column = index as u32 % columns;
            let row = index as u32 / columns;
            let min = Vec2::new(column as f32 * size, row as f32 * size);
            tileset.set_tile(id, texture.clone(), Rect::from_corners(min, min + Vec2::splat(size)));
        }
        tileset
    }

    /// Register the texture region for a tile id. Overwrites silently.
    pub fn set_tile(&mut self, id: TileId, texture: Handle<Image>, region: Rect) {
        if id == INVALID_TILE_ID {
            warn!("Ignoring tileset entry for the invalid tile id");
            return;
        }
        self.textures.insert(id, TileTexture { texture, region });
    }

    /// Create a fresh, unpositioned tile. `None` means the id is unknown.
    pub fn create_tile(&self, id: TileId) -> Option<Tile> {
        let entry = self.textures.get(&id)?;
        Some(Tile::new(id, entry.texture.clone(), entry.region))
    }

    pub fn contains(&self, id: TileId) -> bool {
        self.textures.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiles::{TILE_GRASS, TILE_WATER};

    fn tile_rect() -> Rect {
        Rect::new(0.0, 0.0, 16.0, 16.0)
    }

    #[test]
    fn test_unknown_tile_is_none() {
        let tileset = Tileset::new();
        assert!(tileset.create_tile(42).is_none());
        assert!(tileset.is_empty());
    }

    #[test]
    fn test_create_tile_is_idempotent() {
        let mut tileset = Tileset::new();
        tileset.set_tile(TILE_GRASS, Handle::default(), tile_rect());

        let mut first = tileset.create_tile(TILE_GRASS).expect("grass registered");
        let second = tileset.create_tile(TILE_GRASS).expect("grass registered");
        first.set_world_position(Vec2::new(100.0, 100.0));

        assert_eq!(first.id(), second.id());
        assert_eq!(first.sprite().region, second.sprite().region);
        assert_eq!(first.sprite().texture, second.sprite().texture);
        // Each call yields an independently positioned instance
        assert_eq!(second.world_position(), Vec2::ZERO);
    }

    #[test]
    fn test_set_tile_last_write_wins() {
        let mut tileset = Tileset::new();
        tileset.set_tile(TILE_WATER, Handle::default(), tile_rect());
        let replaced = Rect::new(16.0, 0.0, 32.0, 16.0);
        tileset.set_tile(TILE_WATER, Handle::default(), replaced);

        assert_eq!(tileset.len(), 1);
        let tile = tileset.create_tile(TILE_WATER).unwrap();
        assert_eq!(tile.sprite().region, replaced);
    }

    #[test]
    fn test_invalid_id_is_not_registered() {
        let mut tileset = Tileset::new();
        tileset.set_tile(INVALID_TILE_ID, Handle::default(), tile_rect());
        assert!(!tileset.contains(INVALID_TILE_ID));
    }

    #[test]
    fn test_from_grid_regions() {
        let tileset = Tileset::from_grid(Handle::default(), 16, 3, &[1, 2, 3, 4]);
        assert_eq!(tileset.len(), 4);
        // Fourth entry wraps to the second row
        let tile = tileset.create_tile(4).unwrap();
        assert_eq!(tile.sprite().region, Rect::new(0.0, 16.0, 16.0, 32.0));
        let tile = tileset.create_tile(3).unwrap();
        assert_eq!(tile.sprite().region, Rect::new(32.0, 0.0, 48.0, 16.0));
    }
}
