pub mod mutation;
pub mod runner;

use crate::error::{KeyGridError, KgResult};
use crate::layout::Layout;
use crate::scorer::{ScoreDetails, Scorer};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::SyncSender;
use std::sync::Arc;
use tracing::debug;

/// Per-worker search schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerOptions {
    /// Mutations per attempt after a (re)start.
    pub mutation_start: usize,
    /// Reaching this intensity triggers a restart.
    pub mutation_floor: usize,
    /// Attempts without improvement tolerated at intensity `i + 1`.
    pub patience: Vec<usize>,
    pub attempt_limit: Option<u64>,
}

impl Default for WorkerOptions {
    fn default() -> Self {
        Self {
            mutation_start: crate::consts::DEFAULT_MUTATION_START,
            mutation_floor: 0,
            patience: vec![100, 300, 500],
            attempt_limit: None,
        }
    }
}

impl WorkerOptions {
    pub fn validate(&self) -> KgResult<()> {
        if self.mutation_start <= self.mutation_floor {
            return Err(KeyGridError::Config(format!(
                "mutation_start ({}) must be above mutation_floor ({})",
                self.mutation_start, self.mutation_floor
            )));
        }
        if self.patience.is_empty() {
            return Err(KeyGridError::Config("patience schedule is empty".into()));
        }
        Ok(())
    }

    /// Patience at `intensity`; intensities past the list reuse its last entry.
    pub fn patience_for(&self, intensity: usize) -> usize {
        let i = intensity.saturating_sub(1);
        self.patience
            .get(i)
            .or(self.patience.last())
            .copied()
            .unwrap_or(0)
    }
}

/// A new per-worker best, sent to the aggregator by value.
#[derive(Debug, Clone)]
pub struct Improvement {
    pub worker: usize,
    pub generation: u64,
    pub attempts: u64,
    pub mutations: usize,
    /// Attempts since the previous improvement, counting this one.
    pub stagnation: usize,
    pub cost: f64,
    pub details: ScoreDetails,
    pub layout: Layout,
}

#[derive(Debug)]
pub enum WorkerEvent {
    Improved(Box<Improvement>),
    Failed { worker: usize, error: KeyGridError },
}

/// One independent search lane: hill climbing with shrinking mutation
/// intensity and random restarts.
pub struct Worker {
    pub id: usize,
    pub scorer: Arc<Scorer>,
    pub options: WorkerOptions,
    pub rng: fastrand::Rng,

    pub best: Layout,
    pub best_cost: f64,
    pub mutations: usize,
    pub stagnation: usize,
    pub generation: u64,
    pub attempts: u64,
}

impl Worker {
    pub fn new(
        id: usize,
        scorer: Arc<Scorer>,
        options: WorkerOptions,
        seed: Option<u64>,
    ) -> KgResult<Self> {
        options.validate()?;
        let mut rng = if let Some(s) = seed {
            fastrand::Rng::with_seed(s)
        } else {
            fastrand::Rng::new()
        };
        let best = scorer.random_layout(rng.u64(..))?;

        Ok(Self {
            id,
            scorer,
            mutations: options.mutation_start,
            options,
            rng,
            best,
            best_cost: f64::INFINITY,
            stagnation: 0,
            generation: 1,
            attempts: 0,
        })
    }

    /// Throws away the current lineage and starts over from a random layout.
    pub fn restart(&mut self) -> KgResult<()> {
        self.best = self.scorer.random_layout(self.rng.u64(..))?;
        self.best_cost = f64::INFINITY;
        self.mutations = self.options.mutation_start;
        self.stagnation = 0;
        self.generation += 1;
        debug!("Worker {} restarting, generation {}", self.id, self.generation);
        Ok(())
    }

    /// Lowers the intensity once patience runs out; restarts at the floor.
    fn anneal(&mut self) -> KgResult<()> {
        if self.mutations <= self.options.mutation_floor {
            return self.restart();
        }
        if self.stagnation > self.options.patience_for(self.mutations) {
            self.mutations -= 1;
            self.stagnation = 0;
            if self.mutations <= self.options.mutation_floor {
                return self.restart();
            }
        }
        Ok(())
    }

    /// One clone-mutate-score round.
    pub fn attempt(&mut self) -> KgResult<Option<Improvement>> {
        self.anneal()?;

        let mut candidate = self.best.clone();
        mutation::mutate_n(
            &mut candidate,
            &self.scorer.alphabet,
            &mut self.rng,
            self.mutations,
        );
        let details = self.scorer.score(&candidate)?;

        self.attempts += 1;
        self.stagnation += 1;

        if details.cost >= self.best_cost {
            return Ok(None);
        }

        let improvement = Improvement {
            worker: self.id,
            generation: self.generation,
            attempts: self.attempts,
            mutations: self.mutations,
            stagnation: self.stagnation,
            cost: details.cost,
            details,
            layout: candidate.clone(),
        };
        self.best = candidate;
        self.best_cost = improvement.cost;
        self.stagnation = 0;
        Ok(Some(improvement))
    }

    /// Loops until `shutdown` is raised, the attempt limit is hit, or the
    /// receiving side goes away.
    pub fn run(&mut self, tx: &SyncSender<WorkerEvent>, shutdown: &AtomicBool) {
        loop {
            if shutdown.load(Ordering::Relaxed) {
                break;
            }
            if let Some(limit) = self.options.attempt_limit {
                if self.attempts >= limit {
                    break;
                }
            }

            match self.attempt() {
                Ok(Some(imp)) => {
                    if tx.send(WorkerEvent::Improved(Box::new(imp))).is_err() {
                        break;
                    }
                }
                Ok(None) => {}
                Err(error) => {
                    let _ = tx.send(WorkerEvent::Failed {
                        worker: self.id,
                        error,
                    });
                    break;
                }
            }
        }
        debug!(
            "Worker {} stopped after {} attempts ({} generations)",
            self.id, self.attempts, self.generation
        );
    }
}
