use crate::config::Config;
use crate::error::{KeyGridError, KgResult};
use crate::optimizer::{Improvement, Worker, WorkerEvent, WorkerOptions};
use crate::scorer::Scorer;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, info};

pub struct OptimizationOptions {
    pub num_workers: usize,
    pub worker: WorkerOptions,
    pub channel_capacity: usize,
    pub max_time: Option<Duration>,
}

impl TryFrom<&Config> for OptimizationOptions {
    type Error = KeyGridError;

    fn try_from(cfg: &Config) -> KgResult<Self> {
        let num_workers = if cfg.search.workers == 0 {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4)
        } else {
            cfg.search.workers
        };
        Ok(Self {
            num_workers,
            worker: WorkerOptions {
                mutation_start: cfg.search.mutation_start,
                mutation_floor: cfg.search.mutation_floor,
                patience: cfg.search.patience_schedule()?,
                attempt_limit: match cfg.search.attempt_limit {
                    0 => None,
                    n => Some(n),
                },
            },
            channel_capacity: cfg.search.channel_capacity.max(1),
            max_time: None, // Set manually if needed
        })
    }
}

#[derive(Debug)]
pub struct OptimizationResult {
    pub best: Option<Improvement>,
    pub improvements: u64,
    pub elapsed: Duration,
}

/// A trait for receiving improvements as they reach the aggregator.
/// Boolean return value indicates if the search should continue (true) or abort (false).
pub trait ProgressCallback: Send {
    fn on_improvement(&mut self, event: &Improvement, is_global_best: bool) -> bool;
}

impl<F> ProgressCallback for F
where
    F: FnMut(&Improvement, bool) -> bool + Send,
{
    fn on_improvement(&mut self, event: &Improvement, is_global_best: bool) -> bool {
        self(event, is_global_best)
    }
}

pub struct Optimizer {
    scorer: Arc<Scorer>,
    options: OptimizationOptions,
}

impl Optimizer {
    pub fn new(scorer: Arc<Scorer>, options: OptimizationOptions) -> Self {
        Self { scorer, options }
    }

    /// Runs every worker until `shutdown` is raised (by the caller, the
    /// callback, the time limit or a failing worker) or all workers hit
    /// their attempt limit.
    pub fn run<CB: ProgressCallback>(
        &self,
        seed: Option<u64>,
        shutdown: Arc<AtomicBool>,
        mut callback: CB,
    ) -> KgResult<OptimizationResult> {
        let opts = &self.options;
        opts.worker.validate()?;
        if opts.num_workers == 0 {
            return Err(KeyGridError::Config("at least one worker is required".into()));
        }

        // 1. Initialize Workers
        let workers = (0..opts.num_workers)
            .map(|i| {
                let worker_seed = seed.map(|s| s.wrapping_add(i as u64));
                Worker::new(i, self.scorer.clone(), opts.worker.clone(), worker_seed)
            })
            .collect::<KgResult<Vec<_>>>()?;

        // One extra thread for the aggregator.
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(opts.num_workers + 1)
            .thread_name(|i| format!("keygrid-{}", i))
            .build()
            .map_err(|e| KeyGridError::WorkerPool(e.to_string()))?;

        info!("🔥 Spawning {} search workers", opts.num_workers);

        let (tx, rx) = mpsc::sync_channel(opts.channel_capacity);
        let start = Instant::now();

        // 2. Workers produce, the scope body aggregates
        let outcome = pool.scope(|s| {
            for mut worker in workers {
                let tx = tx.clone();
                let shutdown = shutdown.clone();
                s.spawn(move |_| worker.run(&tx, &shutdown));
            }
            drop(tx);
            aggregate(rx, &shutdown, opts.max_time, start, &mut callback)
        });

        let (best, improvements) = outcome?;
        Ok(OptimizationResult {
            best,
            improvements,
            elapsed: start.elapsed(),
        })
    }
}

type Aggregate = KgResult<(Option<Improvement>, u64)>;

fn aggregate<CB: ProgressCallback>(
    rx: Receiver<WorkerEvent>,
    shutdown: &AtomicBool,
    max_time: Option<Duration>,
    start: Instant,
    callback: &mut CB,
) -> Aggregate {
    let mut best: Option<Improvement> = None;
    let mut improvements = 0u64;
    let mut failure: Option<KeyGridError> = None;

    loop {
        // Keep draining after shutdown so no worker stays blocked on send.
        let stopping = shutdown.load(Ordering::Relaxed);
        let event = match max_time {
            Some(limit) if !stopping => {
                let remaining = limit.saturating_sub(start.elapsed());
                let received = if remaining.is_zero() {
                    Err(RecvTimeoutError::Timeout)
                } else {
                    rx.recv_timeout(remaining)
                };
                match received {
                    Ok(ev) => ev,
                    Err(RecvTimeoutError::Timeout) => {
                        info!("⏱️  Time limit reached, stopping workers");
                        shutdown.store(true, Ordering::Relaxed);
                        continue;
                    }
                    Err(RecvTimeoutError::Disconnected) => break,
                }
            }
            _ => match rx.recv() {
                Ok(ev) => ev,
                Err(_) => break,
            },
        };

        match event {
            WorkerEvent::Improved(imp) => {
                improvements += 1;
                let is_global_best = best.as_ref().map_or(true, |b| imp.cost < b.cost);
                if !stopping && !callback.on_improvement(&imp, is_global_best) {
                    shutdown.store(true, Ordering::Relaxed);
                }
                if is_global_best {
                    best = Some(*imp);
                }
            }
            WorkerEvent::Failed { worker, error: e } => {
                error!("❌ Worker {} failed: {}", worker, e);
                shutdown.store(true, Ordering::Relaxed);
                failure.get_or_insert(e);
            }
        }
    }

    match failure {
        Some(e) => Err(e),
        None => Ok((best, improvements)),
    }
}
