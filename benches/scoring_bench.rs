use criterion::{criterion_group, criterion_main, Criterion};
use keygrid::core_types::Alphabet;
use keygrid::corpus::Corpus;
use keygrid::geometry::KeyboardGeometry;
use keygrid::keycodes::ReservedMap;
use keygrid::optimizer::mutation;
use keygrid::scorer::Scorer;
use std::hint::black_box;

const ALPHABET: &[u8] = b"etaoinshrdlcumwfgypbvkjxqz .,;'-?!/";

fn setup_scorer() -> Scorer {
    let geometry = KeyboardGeometry::standard();
    let reserved = ReservedMap::standard(&geometry).expect("standard reserved keys");
    let alphabet = Alphabet::new(ALPHABET).expect("valid alphabet");

    // ~100k bytes of typeable text
    let text = "the quick brown fox jumps over the lazy dog. pack my box with five \
                dozen liquor jugs; how vexingly quick daft zebras jump! is it 'fine'? \
                yes - it is/was, mostly. "
        .repeat(600);
    let corpus = Corpus::new(text.into_bytes(), &alphabet).expect("corpus in alphabet");

    Scorer::new(geometry, reserved, alphabet, corpus).expect("Failed to build scorer")
}

fn criterion_benchmark(c: &mut Criterion) {
    let scorer = setup_scorer();
    let layout = scorer.random_layout(1).expect("random layout");

    c.bench_function("score (100k corpus bytes)", |b| {
        b.iter(|| scorer.score(black_box(&layout)))
    });

    let mut rng = fastrand::Rng::with_seed(7);
    c.bench_function("mutate + score", |b| {
        b.iter(|| {
            let mut candidate = layout.clone();
            mutation::mutate_n(&mut candidate, &scorer.alphabet, &mut rng, 3);
            scorer.score(black_box(&candidate))
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
