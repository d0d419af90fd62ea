/// Rows of the standard grid.
pub const GRID_ROWS: usize = 4;

/// Columns of the standard grid.
pub const GRID_COLS: usize = 12;

/// Number of movable characters the standard grid has room for.
pub const ALPHABET_SIZE: usize = 35;

pub const FINGER_COUNT: usize = 10;
pub const HAND_COUNT: usize = 2;

/// Intra-hand finger id of the thumb.
pub const THUMB: u8 = 4;

/// The value used to represent "No Key" or "Key Not Found" in u8 maps.
/// This effectively limits us to 254 cells on a grid.
pub const KEY_NOT_FOUND_U8: u8 = 255;

/// Keys at or below this effort count as comfortable for roll classification.
pub const COMFORT_EFFORT_MAX: u8 = 2;

/// Target share of presses per finger, left pinky to right pinky.
pub const TARGET_FINGER_USAGE: [f64; FINGER_COUNT] =
    [0.06, 0.10, 0.11, 0.12, 0.11, 0.11, 0.12, 0.11, 0.10, 0.06];

/// Mutations applied per attempt right after a (re)start.
pub const DEFAULT_MUTATION_START: usize = 3;

/// Capacity of the worker -> aggregator channel.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 16;

/// Words below this count are dropped from a word table.
pub const DEFAULT_MIN_WORD_COUNT: u64 = 5000;
