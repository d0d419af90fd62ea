use crate::geometry::{Cell, KeyboardGeometry};
use crate::error::{KeyGridError, KgResult};
use strum_macros::{Display, EnumIter};

/// Fixed-function keys that keep their cell for the whole run.
#[derive(Debug, Clone, Copy, EnumIter, Display, PartialEq, Eq, Hash)]
#[strum(serialize_all = "snake_case")]
pub enum ReservedKey {
    Escape,
    Backspace,
    Control,
    Shift,
    Tab,
    Alt,
    Meta,
    Command,
    Super,
    Left,
    Down,
    Up,
    Right,
}

impl ReservedKey {
    pub fn glyph(&self) -> char {
        match self {
            Self::Escape => '⎋',
            Self::Backspace => '⌫',
            Self::Control => '⎈',
            Self::Shift => '⇧',
            Self::Tab => '↹',
            Self::Alt => '⎇',
            Self::Meta => '◆',
            Self::Command => '⌘',
            Self::Super => '⊞',
            Self::Left => '←',
            Self::Down => '↓',
            Self::Up => '↑',
            Self::Right => '→',
        }
    }
}

const STANDARD_RESERVED: [(Cell, ReservedKey); 13] = [
    (Cell::new(0, 0), ReservedKey::Escape),
    (Cell::new(1, 0), ReservedKey::Backspace),
    (Cell::new(2, 0), ReservedKey::Control),
    (Cell::new(2, 11), ReservedKey::Shift),
    (Cell::new(3, 0), ReservedKey::Tab),
    (Cell::new(3, 2), ReservedKey::Alt),
    (Cell::new(3, 3), ReservedKey::Meta),
    (Cell::new(3, 4), ReservedKey::Command),
    (Cell::new(3, 7), ReservedKey::Super),
    (Cell::new(3, 8), ReservedKey::Left),
    (Cell::new(3, 9), ReservedKey::Down),
    (Cell::new(3, 10), ReservedKey::Up),
    (Cell::new(3, 11), ReservedKey::Right),
];

/// Which cells are pinned to a `ReservedKey`, indexed by cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservedMap {
    cells: Vec<Option<ReservedKey>>,
}

impl ReservedMap {
    pub fn new(entries: &[(Cell, ReservedKey)], geom: &KeyboardGeometry) -> KgResult<Self> {
        let mut cells = vec![None; geom.cell_count()];
        for &(cell, key) in entries {
            if cell.row >= geom.rows || cell.col >= geom.cols {
                return Err(KeyGridError::Config(format!(
                    "Reserved key {} at ({}, {}) is outside the grid",
                    key, cell.row, cell.col
                )));
            }
            let slot = &mut cells[geom.index(cell)];
            if slot.is_some() {
                return Err(KeyGridError::Config(format!(
                    "Cell ({}, {}) is reserved twice",
                    cell.row, cell.col
                )));
            }
            *slot = Some(key);
        }
        Ok(Self { cells })
    }

    /// No reserved cells at all.
    pub fn empty(geom: &KeyboardGeometry) -> Self {
        Self {
            cells: vec![None; geom.cell_count()],
        }
    }

    pub fn standard(geom: &KeyboardGeometry) -> KgResult<Self> {
        Self::new(&STANDARD_RESERVED, geom)
    }

    #[inline(always)]
    pub fn get(&self, index: usize) -> Option<ReservedKey> {
        self.cells.get(index).copied().flatten()
    }

    /// Free cell indices in row-major order.
    pub fn free_cells(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_none())
            .map(|(i, _)| i)
            .collect()
    }

    pub fn reserved_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }
}
