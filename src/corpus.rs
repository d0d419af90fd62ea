use crate::core_types::Alphabet;
use crate::error::{KeyGridError, KgResult};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// A validated byte stream where every byte belongs to the alphabet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Corpus {
    bytes: Vec<u8>,
}

impl Corpus {
    pub fn new(bytes: Vec<u8>, alphabet: &Alphabet) -> KgResult<Self> {
        if bytes.is_empty() {
            return Err(KeyGridError::Validation("Corpus is empty".into()));
        }
        if let Some(offset) = bytes.iter().position(|&b| !alphabet.contains(b)) {
            return Err(KeyGridError::Validation(format!(
                "Corpus byte '{}' at offset {} is not in the alphabet",
                bytes[offset].escape_ascii(),
                offset
            )));
        }
        Ok(Self { bytes })
    }

    #[inline(always)]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Everything derived from one pass over a source text.
#[derive(Debug, Clone)]
pub struct CorpusBundle {
    pub alphabet: Alphabet,
    pub corpus: Corpus,
    /// Candidate characters with their counts, most frequent first.
    pub frequencies: Vec<(u8, u64)>,
}

fn is_candidate(b: u8) -> bool {
    b == b' ' || (b.is_ascii_graphic() && !b.is_ascii_digit())
}

/// Picks the `alphabet_size` most frequent characters of `text` and keeps the
/// words that can be typed with them.
pub fn build_from_text(text: &str, alphabet_size: usize) -> KgResult<CorpusBundle> {
    let lowered = text.to_ascii_lowercase();

    let mut counts: HashMap<u8, u64> = HashMap::new();
    for b in lowered.bytes().filter(|&b| is_candidate(b)) {
        *counts.entry(b).or_default() += 1;
    }

    let mut frequencies: Vec<(u8, u64)> = counts.into_iter().collect();
    frequencies.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    if frequencies.len() < alphabet_size {
        return Err(KeyGridError::Validation(format!(
            "Text has only {} distinct usable characters, {} are needed",
            frequencies.len(),
            alphabet_size
        )));
    }

    let chars: Vec<u8> = frequencies.iter().take(alphabet_size).map(|&(b, _)| b).collect();
    let alphabet = Alphabet::new(&chars)?;

    let mut bytes = Vec::with_capacity(lowered.len());
    let mut kept = 0usize;
    let mut dropped = 0usize;
    for word in lowered.split_ascii_whitespace() {
        if !word.bytes().all(|b| alphabet.contains(b)) {
            dropped += 1;
            continue;
        }
        if !bytes.is_empty() {
            if !alphabet.contains(b' ') {
                return Err(KeyGridError::Validation(
                    "Space is not among the most frequent characters".into(),
                ));
            }
            bytes.push(b' ');
        }
        bytes.extend_from_slice(word.as_bytes());
        kept += 1;
    }
    debug!("Corpus words kept: {}, dropped: {}", kept, dropped);

    if kept == 0 {
        return Err(KeyGridError::Validation(
            "No word of the text is typeable with the chosen alphabet".into(),
        ));
    }

    let corpus = Corpus::new(bytes, &alphabet)?;
    Ok(CorpusBundle {
        alphabet,
        corpus,
        frequencies,
    })
}

pub fn load_messages<P: AsRef<Path>>(path: P, alphabet_size: usize) -> KgResult<CorpusBundle> {
    let path = path.as_ref();
    let raw = fs::read(path)?;
    let text = String::from_utf8_lossy(&raw);
    let bundle = build_from_text(&text, alphabet_size)?;
    info!(
        "📚 Loaded {} ({} bytes kept of {})",
        path.display(),
        bundle.corpus.len(),
        raw.len()
    );
    Ok(bundle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidates_skip_digits_and_control_bytes() {
        assert!(is_candidate(b'a'));
        assert!(is_candidate(b' '));
        assert!(is_candidate(b','));
        assert!(!is_candidate(b'7'));
        assert!(!is_candidate(0));
        assert!(!is_candidate(b'\n'));
    }
}
