use super::{constants::*, types::TileId};
use bevy::prelude::*;
use std::collections::HashMap;

/// Behavioral properties of a tile type
#[derive(Debug, Clone, PartialEq)]
pub struct TileProperties {
    pub name: &'static str,
    pub walkable: bool,
}

impl TileProperties {
    pub const fn walkable(name: &'static str) -> Self {
        Self { name, walkable: true }
    }

    pub const fn solid(name: &'static str) -> Self {
        Self { name, walkable: false }
    }
}

/// Tile registry for storing tile properties and metadata
#[derive(Resource, Debug, Clone)]
pub struct TileRegistry {
    tiles: HashMap<TileId, TileProperties>,
}

impl TileRegistry {
    /// Empty registry; every id is unknown
    pub fn new() -> Self {
        Self {
            tiles: HashMap::new(),
        }
    }

    /// Registry with every tile type the game ships with
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register(TILE_GRASS, TileProperties::walkable("grass"));
        registry.register(TILE_SAND, TileProperties::walkable("sand"));
        registry.register(TILE_WATER, TileProperties::solid("water"));
        registry.register(TILE_TREE, TileProperties::solid("tree"));
        registry.register(TILE_ROCK, TileProperties::solid("rock"));
        registry.register(TILE_ARK_WALL, TileProperties::solid("ark wall"));
        registry.register(TILE_ARK_FLOOR, TileProperties::walkable("ark floor"));
        registry.register(TILE_ARK_DOOR, TileProperties::walkable("ark door"));
        registry.register(TILE_HAY, TileProperties::solid("hay"));
        registry
    }

    pub fn register(&mut self, id: TileId, properties: TileProperties) {
        self.tiles.insert(id, properties);
    }

    pub fn properties(&self, id: TileId) -> Option<&TileProperties> {
        self.tiles.get(&id)
    }

    /// Unknown tile types block movement
    pub fn blocks_movement(&self, tile_id: TileId) -> bool {
        self.tiles.get(&tile_id).map_or(true, |props| !props.walkable)
    }
}

impl Default for TileRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_walkability() {
        let registry = TileRegistry::standard();
        assert!(!registry.blocks_movement(TILE_GRASS));
        assert!(!registry.blocks_movement(TILE_ARK_DOOR));
        assert!(registry.blocks_movement(TILE_WATER));
        assert!(registry.blocks_movement(TILE_ARK_WALL));
    }

    #[test]
    fn test_unknown_tile_blocks() {
        let registry = TileRegistry::new();
        assert!(registry.blocks_movement(TILE_GRASS));
        assert!(registry.properties(TILE_GRASS).is_none());
        assert!(TileRegistry::standard().blocks_movement(INVALID_TILE_ID));
    }

    #[test]
    fn test_register_overrides() {
        let mut registry = TileRegistry::standard();
        registry.register(TILE_WATER, TileProperties::walkable("shallows"));
        assert!(!registry.blocks_movement(TILE_WATER));
        assert_eq!(registry.properties(TILE_WATER).map(|p| p.name), Some("shallows"));
    }
}
