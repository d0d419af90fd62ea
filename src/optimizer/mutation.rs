use crate::core_types::Alphabet;
use crate::layout::Layout;
use fastrand::Rng;

/// Swaps the cells of two uniformly drawn alphabet characters.
///
/// Draws over the alphabet rather than the grid, so reserved cells are never
/// touched. The two indices may coincide, which leaves the layout unchanged.
#[inline(always)]
pub fn mutate(layout: &mut Layout, alphabet: &Alphabet, rng: &mut Rng) -> (usize, usize) {
    let a = rng.usize(0..alphabet.len());
    let b = rng.usize(0..alphabet.len());
    layout.swap_chars(alphabet.get(a), alphabet.get(b));
    (a, b)
}

/// `k` independent transpositions.
pub fn mutate_n(layout: &mut Layout, alphabet: &Alphabet, rng: &mut Rng, k: usize) {
    for _ in 0..k {
        mutate(layout, alphabet, rng);
    }
}
