use crate::consts::{ALPHABET_SIZE, DEFAULT_CHANNEL_CAPACITY, DEFAULT_MIN_WORD_COUNT, DEFAULT_MUTATION_START};
use crate::error::{KeyGridError, KgResult};
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    #[command(flatten)]
    pub search: SearchParams,
    #[command(flatten)]
    pub corpus: CorpusParams,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SearchParams {
    /// Parallel search workers (0 = one per logical CPU)
    #[arg(long, default_value_t = 0)]
    pub workers: usize,
    #[arg(long, default_value_t = DEFAULT_MUTATION_START)]
    pub mutation_start: usize,
    #[arg(long, default_value_t = 0)]
    pub mutation_floor: usize,

    /// Attempts without improvement tolerated per intensity, starting at 1
    #[arg(long, default_value = "100,300,500")]
    pub patience: String,

    #[arg(long, default_value_t = DEFAULT_CHANNEL_CAPACITY)]
    pub channel_capacity: usize,

    /// Attempts per worker before it stops (0 = unlimited)
    #[arg(long, default_value_t = 0)]
    pub attempt_limit: u64,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            workers: 0,
            mutation_start: DEFAULT_MUTATION_START,
            mutation_floor: 0,
            patience: "100,300,500".to_string(),
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            attempt_limit: 0,
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CorpusParams {
    #[arg(long, default_value_t = ALPHABET_SIZE)]
    pub alphabet_size: usize,
    #[arg(long, default_value_t = DEFAULT_MIN_WORD_COUNT)]
    pub min_word_count: u64,
    /// Words to synthesize when the corpus comes from a word table
    #[arg(long, default_value_t = 10_000)]
    pub sentences: usize,
}

impl Default for CorpusParams {
    fn default() -> Self {
        Self {
            alphabet_size: ALPHABET_SIZE,
            min_word_count: DEFAULT_MIN_WORD_COUNT,
            sentences: 10_000,
        }
    }
}

impl SearchParams {
    /// One patience value per intensity level, `1..=mutation_start`.
    pub fn patience_schedule(&self) -> KgResult<Vec<usize>> {
        let values = parse_usize_list(&self.patience, "patience")?;
        if values.len() < self.mutation_start {
            return Err(KeyGridError::Config(format!(
                "--patience needs {} values (one per intensity), got {}",
                self.mutation_start,
                values.len()
            )));
        }
        Ok(values)
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> KgResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Rejects settings the search cannot run with.
    pub fn validate(&self) -> KgResult<()> {
        if self.search.mutation_start <= self.search.mutation_floor {
            return Err(KeyGridError::Config(format!(
                "--mutation-start ({}) must be greater than --mutation-floor ({})",
                self.search.mutation_start, self.search.mutation_floor
            )));
        }
        self.search.patience_schedule()?;
        if self.corpus.alphabet_size == 0 {
            return Err(KeyGridError::Config("--alphabet-size must be positive".into()));
        }
        Ok(())
    }

    /// Overlays only the flags the user actually typed.
    pub fn merge_from_cli(&mut self, cli: &Config, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($section:ident . $field:ident, $arg_name:expr) => {
                if matches.value_source($arg_name) == Some(ValueSource::CommandLine) {
                    self.$section.$field = cli.$section.$field.clone();
                }
            };
        }

        update_if_present!(search.workers, "workers");
        update_if_present!(search.mutation_start, "mutation_start");
        update_if_present!(search.mutation_floor, "mutation_floor");
        update_if_present!(search.patience, "patience");
        update_if_present!(search.channel_capacity, "channel_capacity");
        update_if_present!(search.attempt_limit, "attempt_limit");

        update_if_present!(corpus.alphabet_size, "alphabet_size");
        update_if_present!(corpus.min_word_count, "min_word_count");
        update_if_present!(corpus.sentences, "sentences");
    }
}

fn parse_usize_list(s: &str, name: &str) -> KgResult<Vec<usize>> {
    s.split(',')
        .map(|p| {
            p.trim().parse().map_err(|_| {
                KeyGridError::Config(format!("Invalid number '{}' in --{}", p.trim(), name))
            })
        })
        .collect()
}
