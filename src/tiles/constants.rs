/// Pixel size of each tile
pub const TILE_SIZE: f32 = 16.0;

/// Width of each tile map in tiles
pub const MAP_WIDTH_IN_TILES: usize = 10;

/// Height of each tile map in tiles
pub const MAP_HEIGHT_IN_TILES: usize = 10;

/// Pixel width of each tile map
pub const MAP_PIXEL_WIDTH: f32 = TILE_SIZE * MAP_WIDTH_IN_TILES as f32; // 160 pixels

/// Pixel height of each tile map
pub const MAP_PIXEL_HEIGHT: f32 = TILE_SIZE * MAP_HEIGHT_IN_TILES as f32;

/// Overworld size in tile maps (7x7 = 49 maps)
pub const OVERWORLD_WIDTH_IN_MAPS: usize = 7;
pub const OVERWORLD_HEIGHT_IN_MAPS: usize = 7;

/// The ark interior is a single tile map
pub const ARK_INTERIOR_WIDTH_IN_MAPS: usize = 1;
pub const ARK_INTERIOR_HEIGHT_IN_MAPS: usize = 1;

/// Tolerance used when validating that adjacent tile maps line up
pub const SEAM_EPSILON: f32 = 0.001;

// Layer configuration
/// Number of tile layers per tile map
pub const NUM_LAYERS: usize = 2;

/// Layer indices
pub const LAYER_GROUND: usize = 0; // Terrain the player walks on
pub const LAYER_OBJECT: usize = 1; // Trees, rocks, walls, doors

/// Z-positions for each layer in world space
pub const LAYER_Z_GROUND: f32 = 0.0;
pub const LAYER_Z_OBJECT: f32 = 0.1;

/// Z-position for movers (player, animals), above every tile layer
pub const MOVER_Z: f32 = 1.0;

/// Helper to get Z position for a layer index
pub const fn layer_z_position(layer: usize) -> f32 {
    match layer {
        LAYER_GROUND => LAYER_Z_GROUND,
        LAYER_OBJECT => LAYER_Z_OBJECT,
        _ => LAYER_Z_GROUND,
    }
}

// Tile type constants
/// Empty cell in layout data (no tile is created)
pub const TILE_EMPTY: u16 = 0;

/// Sentinel for "no tile" in id queries
pub const INVALID_TILE_ID: u16 = u16::MAX;

pub const TILE_GRASS: u16 = 1;
pub const TILE_SAND: u16 = 2;
pub const TILE_WATER: u16 = 3;
pub const TILE_TREE: u16 = 4;
pub const TILE_ROCK: u16 = 5;
pub const TILE_ARK_WALL: u16 = 6;
pub const TILE_ARK_FLOOR: u16 = 7;
pub const TILE_ARK_DOOR: u16 = 8;
pub const TILE_HAY: u16 = 9;

/// Every tile type drawn from the standard tileset image, in image order
pub const STANDARD_TILES: [u16; 9] = [
    TILE_GRASS,
    TILE_SAND,
    TILE_WATER,
    TILE_TREE,
    TILE_ROCK,
    TILE_ARK_WALL,
    TILE_ARK_FLOOR,
    TILE_ARK_DOOR,
    TILE_HAY,
];

/// Columns in the standard tileset image
pub const TILESET_COLUMNS: u32 = 3;

/// Pixel size of one tile in the tileset image
pub const TILESET_TILE_PIXELS: u32 = 16;
