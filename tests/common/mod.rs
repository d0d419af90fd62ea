#![allow(dead_code)]

use keygrid::core_types::Alphabet;
use keygrid::corpus::Corpus;
use keygrid::geometry::{KeyNode, KeyboardGeometry};
use keygrid::keycodes::ReservedMap;
use keygrid::scorer::Scorer;
use std::sync::Arc;

/// 26 letters, space and 8 punctuation marks: one per free cell.
pub const ALPHABET: &[u8] = b"etaoinshrdlcumwfgypbvkjxqz .,;'-?!/";

pub const SAMPLE_TEXT: &str = "the quick brown fox jumps over the lazy dog. \
pack my box with five dozen liquor jugs; how vexingly quick daft zebras jump! \
is it 'fine'? yes - it is/was.";

pub fn key(finger: u8, hand: u8, hand_finger: u8, hand_col: u8, effort: u8) -> KeyNode {
    KeyNode {
        finger,
        hand,
        hand_finger,
        hand_col,
        effort,
    }
}

pub fn standard_alphabet() -> Alphabet {
    Alphabet::new(ALPHABET).unwrap()
}

pub fn standard_scorer() -> Scorer {
    let geometry = KeyboardGeometry::standard();
    let reserved = ReservedMap::standard(&geometry).unwrap();
    let alphabet = standard_alphabet();
    let corpus = Corpus::new(SAMPLE_TEXT.as_bytes().to_vec(), &alphabet).unwrap();
    Scorer::new(geometry, reserved, alphabet, corpus).unwrap()
}

pub fn shared_scorer() -> Arc<Scorer> {
    Arc::new(standard_scorer())
}

/// A single-row grid with no reserved cells.
pub fn row_geometry(keys: Vec<KeyNode>, homes: [usize; 10]) -> KeyboardGeometry {
    KeyboardGeometry::new(1, keys.len(), keys, homes).unwrap()
}

/// Three left-hand keys on fingers 0, 1, 2, rolling inward left to right.
pub fn three_key_geometry() -> KeyboardGeometry {
    row_geometry(
        vec![key(0, 0, 0, 0, 1), key(1, 0, 1, 1, 1), key(2, 0, 2, 2, 3)],
        [0, 1, 2, 0, 0, 0, 0, 0, 0, 0],
    )
}

/// Text with 38 distinct candidate characters, for CLI runs.
pub fn cli_text() -> String {
    "The quick brown fox jumps over the lazy dog, again; and again: is it? yes! \
it's a \"test\" (really) - done.\n"
        .repeat(20)
}
