use crate::consts::KEY_NOT_FOUND_U8;
use crate::core_types::Alphabet;
use crate::error::{KeyGridError, KgResult};
use crate::geometry::KeyboardGeometry;
use crate::keycodes::{ReservedKey, ReservedMap};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Reserved(ReservedKey),
    Free(u8),
}

/// A character assignment for every free cell, plus the inverse index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    slots: Vec<Slot>,
    pos_map: [u8; 256],
}

impl Layout {
    /// Shuffles the alphabet with `seed` and deals it into the free cells in
    /// row-major order.
    pub fn random(
        seed: u64,
        alphabet: &Alphabet,
        reserved: &ReservedMap,
        geom: &KeyboardGeometry,
    ) -> KgResult<Self> {
        let mut chars = alphabet.as_bytes().to_vec();
        fastrand::Rng::with_seed(seed).shuffle(&mut chars);
        Self::build(&chars, reserved, geom)
    }

    /// Places `chars` into the free cells in row-major order. `chars` must be a
    /// permutation of the alphabet.
    pub fn from_chars(
        chars: &[u8],
        alphabet: &Alphabet,
        reserved: &ReservedMap,
        geom: &KeyboardGeometry,
    ) -> KgResult<Self> {
        if chars.len() != alphabet.len() {
            return Err(KeyGridError::Validation(format!(
                "Layout has {} characters but the alphabet has {}",
                chars.len(),
                alphabet.len()
            )));
        }
        let mut seen = [false; 256];
        for &b in chars {
            if !alphabet.contains(b) {
                return Err(KeyGridError::Validation(format!(
                    "Layout character '{}' is not in the alphabet",
                    b.escape_ascii()
                )));
            }
            if std::mem::replace(&mut seen[b as usize], true) {
                return Err(KeyGridError::Validation(format!(
                    "Layout character '{}' appears more than once",
                    b.escape_ascii()
                )));
            }
        }
        Self::build(chars, reserved, geom)
    }

    fn build(chars: &[u8], reserved: &ReservedMap, geom: &KeyboardGeometry) -> KgResult<Self> {
        let free = reserved.free_cells();
        if free.len() != chars.len() {
            return Err(KeyGridError::Config(format!(
                "Grid has {} free cells but the alphabet has {} characters",
                free.len(),
                chars.len()
            )));
        }

        let mut slots = Vec::with_capacity(geom.cell_count());
        let mut pos_map = [KEY_NOT_FOUND_U8; 256];
        let mut next = chars.iter();
        for i in 0..geom.cell_count() {
            match reserved.get(i) {
                Some(key) => slots.push(Slot::Reserved(key)),
                None => {
                    // free.len() == chars.len() keeps this in step
                    let Some(&b) = next.next() else {
                        return Err(KeyGridError::Config("Ran out of characters".into()));
                    };
                    pos_map[b as usize] = i as u8;
                    slots.push(Slot::Free(b));
                }
            }
        }

        Ok(Self { slots, pos_map })
    }

    /// Exchanges the characters on two free cells.
    #[inline(always)]
    pub fn swap(&mut self, a: usize, b: usize) {
        if let (Slot::Free(ca), Slot::Free(cb)) = (self.slots[a], self.slots[b]) {
            self.slots.swap(a, b);
            self.pos_map[ca as usize] = b as u8;
            self.pos_map[cb as usize] = a as u8;
        } else {
            debug_assert!(false, "swap touched a reserved cell ({}, {})", a, b);
        }
    }

    /// Exchanges the cells of two placed characters.
    #[inline(always)]
    pub fn swap_chars(&mut self, a: u8, b: u8) {
        let (pa, pb) = (self.pos_map[a as usize], self.pos_map[b as usize]);
        debug_assert!(pa != KEY_NOT_FOUND_U8 && pb != KEY_NOT_FOUND_U8);
        self.swap(pa as usize, pb as usize);
    }

    #[inline(always)]
    pub fn cell_of(&self, byte: u8) -> Option<usize> {
        match self.pos_map[byte as usize] {
            KEY_NOT_FOUND_U8 => None,
            p => Some(p as usize),
        }
    }

    #[inline(always)]
    pub fn pos_map(&self) -> &[u8; 256] {
        &self.pos_map
    }

    pub fn slot(&self, index: usize) -> Slot {
        self.slots[index]
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Free-cell characters in row-major order; feeds back into `from_chars`.
    pub fn free_chars(&self) -> String {
        self.slots
            .iter()
            .filter_map(|s| match s {
                Slot::Free(b) => Some(*b as char),
                Slot::Reserved(_) => None,
            })
            .collect()
    }

    /// Checks that grid and index agree in both directions.
    pub fn is_consistent(&self) -> bool {
        let mut mapped = 0;
        for (i, slot) in self.slots.iter().enumerate() {
            if let Slot::Free(b) = slot {
                if self.pos_map[*b as usize] as usize != i {
                    return false;
                }
                mapped += 1;
            }
        }
        self.pos_map.iter().filter(|&&p| p != KEY_NOT_FOUND_U8).count() == mapped
    }
}
