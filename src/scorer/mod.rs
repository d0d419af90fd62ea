pub mod costs;
pub mod engine;
pub mod flow;
pub mod physics;
pub mod types;

pub use self::types::ScoreDetails;
use crate::core_types::Alphabet;
use crate::corpus::Corpus;
use crate::error::{KeyGridError, KgResult};
use crate::geometry::KeyboardGeometry;
use crate::keycodes::ReservedMap;
use crate::layout::Layout;
use tracing::debug;

/// Everything a search needs to evaluate layouts. Built once, then shared
/// read-only between workers.
#[derive(Debug, Clone)]
pub struct Scorer {
    pub geometry: KeyboardGeometry,
    pub reserved: ReservedMap,
    pub alphabet: Alphabet,
    pub corpus: Corpus,
}

impl Scorer {
    pub fn new(
        geometry: KeyboardGeometry,
        reserved: ReservedMap,
        alphabet: Alphabet,
        corpus: Corpus,
    ) -> KgResult<Self> {
        let free = reserved.free_cells().len();
        if free != alphabet.len() {
            return Err(KeyGridError::Config(format!(
                "Grid has {} free cells but the alphabet has {} characters",
                free,
                alphabet.len()
            )));
        }
        if let Some(offset) = corpus.bytes().iter().position(|&b| !alphabet.contains(b)) {
            return Err(KeyGridError::Validation(format!(
                "Corpus byte '{}' at offset {} is not in the alphabet",
                corpus.bytes()[offset].escape_ascii(),
                offset
            )));
        }

        debug!(
            "Scorer ready: {} cells, {} reserved, {} corpus bytes",
            geometry.cell_count(),
            reserved.reserved_count(),
            corpus.len()
        );

        Ok(Self {
            geometry,
            reserved,
            alphabet,
            corpus,
        })
    }

    pub fn random_layout(&self, seed: u64) -> KgResult<Layout> {
        Layout::random(seed, &self.alphabet, &self.reserved, &self.geometry)
    }

    pub fn layout_from_str(&self, chars: &str) -> KgResult<Layout> {
        Layout::from_chars(chars.as_bytes(), &self.alphabet, &self.reserved, &self.geometry)
    }

    pub fn score(&self, layout: &Layout) -> KgResult<ScoreDetails> {
        engine::score(layout, &self.corpus, &self.geometry)
    }
}
