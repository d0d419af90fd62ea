mod common;

use common::{standard_alphabet, three_key_geometry, ALPHABET};
use keygrid::core_types::Alphabet;
use keygrid::error::KeyGridError;
use keygrid::geometry::{Cell, KeyboardGeometry};
use keygrid::keycodes::{ReservedKey, ReservedMap};
use keygrid::layout::{Layout, Slot};

fn standard_parts() -> (KeyboardGeometry, ReservedMap, Alphabet) {
    let geom = KeyboardGeometry::standard();
    let reserved = ReservedMap::standard(&geom).unwrap();
    (geom, reserved, standard_alphabet())
}

#[test]
fn test_standard_reserved_cells() {
    let (geom, reserved, _) = standard_parts();
    assert_eq!(reserved.reserved_count(), 13);
    assert_eq!(reserved.free_cells().len(), 35);
    assert_eq!(reserved.get(geom.index(Cell::new(0, 0))), Some(ReservedKey::Escape));
    assert_eq!(reserved.get(geom.index(Cell::new(2, 11))), Some(ReservedKey::Shift));
    assert_eq!(reserved.get(geom.index(Cell::new(3, 11))), Some(ReservedKey::Right));
    assert_eq!(reserved.get(geom.index(Cell::new(1, 1))), None);
}

#[test]
fn test_random_layout_places_every_char_once() {
    let (geom, reserved, alphabet) = standard_parts();
    let layout = Layout::random(11, &alphabet, &reserved, &geom).unwrap();

    assert!(layout.is_consistent());
    for &b in ALPHABET {
        let cell = layout.cell_of(b).expect("char placed");
        assert_eq!(layout.slot(cell), Slot::Free(b));
    }
    for i in 0..geom.cell_count() {
        if let Some(key) = reserved.get(i) {
            assert_eq!(layout.slot(i), Slot::Reserved(key));
        }
    }
}

#[test]
fn test_random_layout_is_seeded() {
    let (geom, reserved, alphabet) = standard_parts();
    let a = Layout::random(5, &alphabet, &reserved, &geom).unwrap();
    let b = Layout::random(5, &alphabet, &reserved, &geom).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_free_chars_round_trip() {
    let (geom, reserved, alphabet) = standard_parts();
    let layout = Layout::random(99, &alphabet, &reserved, &geom).unwrap();
    let chars = layout.free_chars();
    let back = Layout::from_chars(chars.as_bytes(), &alphabet, &reserved, &geom).unwrap();
    assert_eq!(layout, back);
}

#[test]
fn test_swap_updates_both_directions() {
    let geom = three_key_geometry();
    let alphabet = Alphabet::new(b"abc").unwrap();
    let reserved = ReservedMap::empty(&geom);
    let mut layout = Layout::from_chars(b"abc", &alphabet, &reserved, &geom).unwrap();

    layout.swap_chars(b'a', b'c');
    assert_eq!(layout.free_chars(), "cba");
    assert_eq!(layout.cell_of(b'a'), Some(2));
    assert_eq!(layout.cell_of(b'c'), Some(0));
    assert!(layout.is_consistent());

    layout.swap(0, 2);
    assert_eq!(layout.free_chars(), "abc");
}

#[test]
fn test_swap_with_itself_is_a_no_op() {
    let (geom, reserved, alphabet) = standard_parts();
    let mut layout = Layout::random(3, &alphabet, &reserved, &geom).unwrap();
    let before = layout.clone();
    layout.swap_chars(b'e', b'e');
    assert_eq!(layout, before);
}

#[test]
fn test_clone_is_independent() {
    let (geom, reserved, alphabet) = standard_parts();
    let original = Layout::random(8, &alphabet, &reserved, &geom).unwrap();
    let mut copy = original.clone();
    copy.swap_chars(b'e', b'z');

    assert_ne!(copy, original);
    assert!(original.is_consistent());
    assert_eq!(
        original.cell_of(b'e'),
        copy.cell_of(b'z'),
        "copy swapped, original kept"
    );
}

#[test]
fn test_from_chars_rejects_bad_input() {
    let geom = three_key_geometry();
    let alphabet = Alphabet::new(b"abc").unwrap();
    let reserved = ReservedMap::empty(&geom);

    for bad in [&b"ab"[..], &b"abd"[..], &b"aab"[..], &b"abcd"[..]] {
        let res = Layout::from_chars(bad, &alphabet, &reserved, &geom);
        assert!(
            matches!(res, Err(KeyGridError::Validation(_))),
            "{:?} should be rejected",
            String::from_utf8_lossy(bad)
        );
    }
}

#[test]
fn test_free_cell_count_must_match_alphabet() {
    let (geom, reserved, _) = standard_parts();
    let short = Alphabet::new(b"abcdefghij").unwrap();
    let res = Layout::random(1, &short, &reserved, &geom);
    assert!(matches!(res, Err(KeyGridError::Config(_))));
}

#[test]
fn test_reserved_map_rejects_collisions_and_strays() {
    let geom = KeyboardGeometry::standard();
    let twice = [
        (Cell::new(0, 0), ReservedKey::Escape),
        (Cell::new(0, 0), ReservedKey::Tab),
    ];
    assert!(ReservedMap::new(&twice, &geom).is_err());

    let outside = [(Cell::new(4, 0), ReservedKey::Escape)];
    assert!(ReservedMap::new(&outside, &geom).is_err());
}

#[test]
fn test_reserved_key_names() {
    assert_eq!(ReservedKey::Backspace.to_string(), "backspace");
    assert_eq!(ReservedKey::Shift.to_string(), "shift");
    assert_eq!(ReservedKey::Backspace.glyph(), '⌫');
}

#[test]
fn test_reserved_glyphs_are_distinct() {
    use std::collections::HashSet;
    use strum::IntoEnumIterator;

    let glyphs: HashSet<char> = ReservedKey::iter().map(|k| k.glyph()).collect();
    assert_eq!(glyphs.len(), ReservedKey::iter().count());
    assert_eq!(glyphs.len(), 13);
}
