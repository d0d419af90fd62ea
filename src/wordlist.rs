use crate::error::{KeyGridError, KgResult};
use fastrand::Rng;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

const BANNED: &str = "0123456789&=`@()_:!{}></\\$*#][";
const SINGLE_CHAR_WORDS: &str = "ai-:;!,?.";
const PUNCTUATION: [&str; 6] = [":", ";", ",", "?", "!", "."];

#[derive(Debug, Clone, PartialEq)]
pub struct WordEntry {
    pub word: String,
    pub count: u64,
    pub probability: f64,
    pub cumulative: f64,
}

/// Word frequencies sorted by count, with a running cumulative probability
/// for weighted sampling.
#[derive(Debug, Clone, Default)]
pub struct WordTable {
    entries: Vec<WordEntry>,
}

fn accept_word(word: &str) -> bool {
    if !word.is_ascii() || word.contains(|c| BANNED.contains(c)) {
        return false;
    }
    match word.len() {
        0 => false,
        1 => SINGLE_CHAR_WORDS.contains(word),
        _ => !word.ends_with('.'),
    }
}

impl WordTable {
    /// Reads `word<TAB>count` lines.
    pub fn from_reader<R: Read>(reader: R, min_count: u64) -> KgResult<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .quoting(false)
            .flexible(true)
            .from_reader(reader);

        let mut counts: HashMap<String, u64> = HashMap::new();
        let mut skipped = 0usize;

        for (row, result) in rdr.records().enumerate() {
            let rec = result?;
            if rec.len() < 2 {
                skipped += 1;
                continue;
            }
            let count: u64 = rec[1].trim().parse().map_err(|_| {
                KeyGridError::Validation(format!(
                    "Row {}: count '{}' is not a number",
                    row + 1,
                    &rec[1]
                ))
            })?;

            let word = rec[0].trim().to_lowercase();
            if !accept_word(&word) {
                skipped += 1;
                continue;
            }
            let slot = counts.entry(word).or_default();
            if *slot > 0 {
                debug!("Merging duplicate word '{}'", &rec[0]);
            }
            *slot += count;
        }

        if skipped > 0 {
            debug!("Skipped {} word rows", skipped);
        }

        Ok(Self::from_counts(counts, min_count))
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P, min_count: u64) -> KgResult<Self> {
        let file = File::open(path)?;
        let table = Self::from_reader(file, min_count)?;
        if table.is_empty() {
            warn!("⚠️  Word table is empty after filtering (min count {})", min_count);
        }
        Ok(table)
    }

    pub fn from_counts<I>(counts: I, min_count: u64) -> Self
    where
        I: IntoIterator<Item = (String, u64)>,
    {
        let mut kept: Vec<(String, u64)> = counts
            .into_iter()
            .filter(|(_, c)| *c >= min_count && *c > 0)
            .collect();
        kept.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        let total: f64 = kept.iter().map(|(_, c)| *c as f64).sum();
        let mut running = 0.0;
        let entries = kept
            .into_iter()
            .map(|(word, count)| {
                let probability = count as f64 / total;
                running += probability;
                WordEntry {
                    word,
                    count,
                    probability,
                    cumulative: running,
                }
            })
            .collect();

        Self { entries }
    }

    pub fn entries(&self) -> &[WordEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First entry whose cumulative probability reaches `r`.
    pub fn pick(&self, r: f64) -> Option<&WordEntry> {
        let i = self.entries.partition_point(|e| e.cumulative < r);
        self.entries.get(i).or_else(|| self.entries.last())
    }

    fn draw(&self, rng: &mut Rng, avoid: Option<&str>) -> Option<&WordEntry> {
        let mut entry = self.pick(rng.f64())?;
        if self.entries.len() > 1 {
            while Some(entry.word.as_str()) == avoid {
                entry = self.pick(rng.f64())?;
            }
        }
        Some(entry)
    }

    /// Strings `count` sampled words into sentences.
    ///
    /// Punctuation attaches to the preceding word and never follows a break.
    /// A new sentence starts once the current one runs past a random length
    /// of 5 to 14 words. `pretty` capitalizes sentence starts and "i".
    pub fn generate(&self, count: usize, pretty: bool, rng: &mut Rng) -> String {
        let mut out = String::new();
        let mut since_break = 20usize;
        let mut last: Option<&str> = None;

        for _ in 0..count {
            let Some(entry) = self.draw(rng, last) else {
                break;
            };
            let word = entry.word.as_str();

            if word == "-" || PUNCTUATION.contains(&word) {
                if since_break == 0 || out.is_empty() {
                    continue;
                }
                since_break = 0;
                if word == "-" {
                    out.push(' ');
                }
                out.push_str(word);
            } else if since_break > rng.usize(5..15) {
                since_break = 0;
                out.push_str(". ");
                if pretty {
                    let mut chars = word.chars();
                    if let Some(first) = chars.next() {
                        out.push(first.to_ascii_uppercase());
                        out.push_str(chars.as_str());
                    }
                } else {
                    out.push_str(word);
                }
            } else {
                since_break += 1;
                out.push(' ');
                if pretty && word == "i" {
                    out.push('I');
                } else {
                    out.push_str(word);
                }
            }
            last = Some(word);
        }

        out.strip_prefix(". ")
            .unwrap_or(out.as_str())
            .replace(" 's", "'s")
    }
}
