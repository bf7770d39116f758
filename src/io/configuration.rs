//! Engine constants and runtime configuration defaults

/// Default side length of the grid
pub const DEFAULT_DIMENSION: usize = 10;

// Keeps a single propagation pass well under a tick
/// Maximum allowed grid dimension
pub const MAX_GRID_DIMENSION: usize = 1_000;

/// Default time between scheduler ticks
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 200;

/// Default pause between a full collapse and the next grid
pub const DEFAULT_RESET_PAUSE_MS: u64 = 2000;

/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;

/// Default number of grids to generate
pub const DEFAULT_CYCLES: usize = 1;

/// Default rendered size of one tile in pixels
pub const DEFAULT_CELL_SIZE: u32 = 32;

/// Largest accepted tile size in pixels
pub const MAX_CELL_SIZE: u32 = 512;

/// Largest side of a rendered grid image in pixels
pub const MAX_RENDERED_SIDE: u32 = 8_192;

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 30;

// Output settings
/// Prefix of exported snapshot and animation files
pub const OUTPUT_PREFIX: &str = "wave-function-collapse";
/// Minimum frame delay that viewers reliably support (in milliseconds)
pub const VIEWER_MIN_FRAME_DELAY_MS: u32 = 50;
/// Longest delay a GIF frame can store (65535 centiseconds)
pub const GIF_MAX_FRAME_DELAY_MS: u32 = 655_350;
/// How many frame delays the final animation frame is held for
pub const FINAL_FRAME_HOLD: u32 = 10;

// Pipe art palette (RGBA)
/// Tile background
pub const TILE_BACKGROUND: [u8; 4] = [34, 34, 34, 255];
/// Pipe colour
pub const PIPE_COLOR: [u8; 4] = [232, 232, 232, 255];
/// Placeholder for uncollapsed cells
pub const PLACEHOLDER_COLOR: [u8; 4] = [0, 0, 0, 255];
/// Pipe width as a fraction of the tile size
pub const PIPE_WIDTH_RATIO: f32 = 0.25;
