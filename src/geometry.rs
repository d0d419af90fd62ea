use crate::consts::{
    FINGER_COUNT, GRID_COLS, GRID_ROWS, HAND_COUNT, KEY_NOT_FOUND_U8, TARGET_FINGER_USAGE,
};
use crate::error::{KeyGridError, KgResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyNode {
    pub finger: u8,      // 0..=9, left pinky to right pinky
    pub hand: u8,        // 0 = Left, 1 = Right
    pub hand_finger: u8, // 0=Pinky .. 3=Index, 4=Thumb
    pub hand_col: u8,    // Column counted from the outer edge of the hand
    pub effort: u8,      // 0..=9, higher is harder to press
}

/// Finger ownership of every cell on the standard grid.
const STANDARD_FINGER: [[u8; GRID_COLS]; GRID_ROWS] = [
    [1, 1, 1, 2, 3, 3, 6, 6, 7, 8, 8, 8],
    [0, 0, 1, 2, 3, 3, 6, 6, 7, 8, 9, 9],
    [0, 0, 1, 2, 3, 3, 6, 6, 7, 8, 9, 9],
    [0, 4, 4, 4, 4, 4, 5, 5, 6, 7, 8, 9],
];

const STANDARD_HAND_FINGER: [[u8; GRID_COLS]; GRID_ROWS] = [
    [1, 1, 1, 2, 3, 3, 3, 3, 2, 1, 1, 1],
    [0, 0, 1, 2, 3, 3, 3, 3, 2, 1, 0, 0],
    [0, 0, 1, 2, 3, 3, 3, 3, 2, 1, 0, 0],
    [0, 4, 4, 4, 4, 4, 4, 4, 3, 2, 1, 0],
];

const STANDARD_HAND_COL: [u8; GRID_COLS] = [0, 1, 2, 3, 4, 5, 5, 4, 3, 2, 1, 0];

const STANDARD_EFFORT: [[u8; GRID_COLS]; GRID_ROWS] = [
    [7, 4, 1, 1, 4, 7, 5, 4, 1, 1, 3, 5],
    [3, 1, 0, 0, 0, 3, 3, 0, 0, 0, 1, 3],
    [5, 5, 5, 5, 2, 4, 4, 2, 4, 4, 4, 5],
    [7, 9, 9, 7, 1, 0, 0, 1, 0, 0, 0, 0],
];

const STANDARD_HOMES: [Cell; FINGER_COUNT] = [
    Cell::new(1, 1),
    Cell::new(1, 2),
    Cell::new(1, 3),
    Cell::new(1, 4),
    Cell::new(3, 5),
    Cell::new(3, 6),
    Cell::new(1, 7),
    Cell::new(1, 8),
    Cell::new(1, 9),
    Cell::new(1, 10),
];

/// Static physical description of the grid.
///
/// Cells are addressed by row-major index. The pairwise distance matrix is
/// flattened (`a * cell_count + b`) and measured in row/column units.
#[derive(Debug, Clone)]
pub struct KeyboardGeometry {
    pub rows: usize,
    pub cols: usize,
    pub keys: Vec<KeyNode>,
    pub finger_homes: [usize; FINGER_COUNT],
    pub target_finger_usage: [f64; FINGER_COUNT],
    distances: Vec<f64>,
}

impl KeyboardGeometry {
    pub fn new(
        rows: usize,
        cols: usize,
        keys: Vec<KeyNode>,
        finger_homes: [usize; FINGER_COUNT],
    ) -> KgResult<Self> {
        let cell_count = rows * cols;
        if cell_count == 0 || cell_count >= KEY_NOT_FOUND_U8 as usize {
            return Err(KeyGridError::Config(format!(
                "Grid {}x{} must have between 1 and {} cells",
                rows,
                cols,
                KEY_NOT_FOUND_U8 - 1
            )));
        }
        if keys.len() != cell_count {
            return Err(KeyGridError::Config(format!(
                "Grid {}x{} needs {} key definitions, got {}",
                rows,
                cols,
                cell_count,
                keys.len()
            )));
        }
        for (i, k) in keys.iter().enumerate() {
            if k.finger as usize >= FINGER_COUNT || k.hand as usize >= HAND_COUNT {
                return Err(KeyGridError::Validation(format!(
                    "Key {} has finger {} / hand {} out of range",
                    i, k.finger, k.hand
                )));
            }
        }
        if let Some(h) = finger_homes.iter().find(|&&h| h >= cell_count) {
            return Err(KeyGridError::Validation(format!(
                "Finger home {} lies outside the {}-cell grid",
                h, cell_count
            )));
        }

        let mut distances = vec![0.0; cell_count * cell_count];
        for a in 0..cell_count {
            for b in 0..cell_count {
                let h = (a / cols) as f64 - (b / cols) as f64;
                let w = (a % cols) as f64 - (b % cols) as f64;
                distances[a * cell_count + b] = (h * h + w * w).sqrt();
            }
        }

        Ok(Self {
            rows,
            cols,
            keys,
            finger_homes,
            target_finger_usage: TARGET_FINGER_USAGE,
            distances,
        })
    }

    /// The 4x12 split grid the optimizer is tuned for.
    pub fn standard() -> Self {
        let mut keys = Vec::with_capacity(GRID_ROWS * GRID_COLS);
        for r in 0..GRID_ROWS {
            for c in 0..GRID_COLS {
                keys.push(KeyNode {
                    finger: STANDARD_FINGER[r][c],
                    hand: if c < GRID_COLS / 2 { 0 } else { 1 },
                    hand_finger: STANDARD_HAND_FINGER[r][c],
                    hand_col: STANDARD_HAND_COL[c],
                    effort: STANDARD_EFFORT[r][c],
                });
            }
        }
        let homes = STANDARD_HOMES.map(|cell| cell.row * GRID_COLS + cell.col);

        match Self::new(GRID_ROWS, GRID_COLS, keys, homes) {
            Ok(g) => g,
            Err(e) => unreachable!("standard geometry tables are inconsistent: {}", e),
        }
    }

    #[inline(always)]
    pub fn cell_count(&self) -> usize {
        self.keys.len()
    }

    #[inline(always)]
    pub fn index(&self, cell: Cell) -> usize {
        cell.row * self.cols + cell.col
    }

    #[inline(always)]
    pub fn cell(&self, index: usize) -> Cell {
        Cell::new(index / self.cols, index % self.cols)
    }

    #[inline(always)]
    pub fn key(&self, index: usize) -> &KeyNode {
        &self.keys[index]
    }

    #[inline(always)]
    pub fn distance(&self, a: usize, b: usize) -> f64 {
        self.distances[a * self.keys.len() + b]
    }

    #[inline(always)]
    pub fn row_of(&self, index: usize) -> usize {
        index / self.cols
    }
}
