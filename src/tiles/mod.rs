pub mod constants;
pub mod multi_grid;
pub mod registry;
pub mod tile;
pub mod tile_map;
pub mod tileset;
pub mod types;

// Re-export commonly used items
pub use constants::*;
pub use multi_grid::{GridError, MultiTileMapGrid};
pub use registry::{TileProperties, TileRegistry};
pub use tile::{Tile, TileSprite};
pub use tile_map::{TileMap, TileMapError};
pub use tileset::Tileset;
pub use types::{GridPos, TileId, TileLocation};
