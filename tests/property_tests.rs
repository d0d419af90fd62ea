mod common;

use common::{standard_alphabet, standard_scorer};
use keygrid::geometry::KeyboardGeometry;
use keygrid::keycodes::ReservedMap;
use keygrid::layout::{Layout, Slot};
use keygrid::optimizer::mutation::{mutate, mutate_n};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Any sequence of swaps keeps the grid and its index in agreement.
    #[test]
    fn prop_swaps_preserve_bijection(
        seed in any::<u64>(),
        swaps in prop::collection::vec((0usize..35, 0usize..35), 0..200)
    ) {
        let geom = KeyboardGeometry::standard();
        let reserved = ReservedMap::standard(&geom).unwrap();
        let alphabet = standard_alphabet();
        let mut layout = Layout::random(seed, &alphabet, &reserved, &geom).unwrap();

        for (a, b) in swaps {
            layout.swap_chars(alphabet.get(a), alphabet.get(b));
        }

        prop_assert!(layout.is_consistent());
        let mut placed: Vec<u8> = layout.free_chars().into_bytes();
        placed.sort_unstable();
        let mut expected = alphabet.as_bytes().to_vec();
        expected.sort_unstable();
        prop_assert_eq!(placed, expected);
        prop_assert_eq!(reserved.reserved_count(), 13);
    }

    /// Undoing a swap restores the layout exactly.
    #[test]
    fn prop_swap_is_an_involution(seed in any::<u64>(), a in 0usize..35, b in 0usize..35) {
        let geom = KeyboardGeometry::standard();
        let reserved = ReservedMap::standard(&geom).unwrap();
        let alphabet = standard_alphabet();
        let original = Layout::random(seed, &alphabet, &reserved, &geom).unwrap();

        let mut layout = original.clone();
        layout.swap_chars(alphabet.get(a), alphabet.get(b));
        layout.swap_chars(alphabet.get(a), alphabet.get(b));
        prop_assert_eq!(layout, original);
    }

    #[test]
    fn prop_mutation_never_touches_reserved_cells(seed in any::<u64>(), k in 1usize..8) {
        let geom = KeyboardGeometry::standard();
        let reserved = ReservedMap::standard(&geom).unwrap();
        let alphabet = standard_alphabet();
        let mut layout = Layout::random(seed, &alphabet, &reserved, &geom).unwrap();
        let mut rng = fastrand::Rng::with_seed(seed);

        mutate_n(&mut layout, &alphabet, &mut rng, k);
        let (a, b) = mutate(&mut layout, &alphabet, &mut rng);
        prop_assert!(a < alphabet.len() && b < alphabet.len());

        prop_assert!(layout.is_consistent());
        for i in 0..geom.cell_count() {
            if let Some(key) = reserved.get(i) {
                prop_assert_eq!(layout.slot(i), Slot::Reserved(key));
            }
        }
    }

    /// Usage fractions always describe the whole corpus.
    #[test]
    fn prop_usage_fractions_sum_to_one(seed in any::<u64>()) {
        let scorer = standard_scorer();
        let layout = scorer.random_layout(seed).unwrap();
        let d = scorer.score(&layout).unwrap();

        prop_assert_eq!(d.chars as usize, scorer.corpus.len());
        let fingers: f64 = d.finger_usage.iter().sum();
        let hands: f64 = d.hand_usage.iter().sum();
        prop_assert!((fingers - 1.0).abs() < 1e-9);
        prop_assert!((hands - 1.0).abs() < 1e-9);
        prop_assert!(d.finger_inequality >= 0.0 && d.hand_inequality >= 0.0);
        prop_assert!(d.cost.is_finite());
    }
}
