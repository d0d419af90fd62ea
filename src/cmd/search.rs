use crate::reports;
use clap::Args;
use keygrid::config::Config;
use keygrid::error::KgResult;
use keygrid::history::HistoryWriter;
use keygrid::optimizer::runner::{OptimizationOptions, Optimizer};
use keygrid::optimizer::Improvement;
use keygrid::scorer::Scorer;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    #[command(flatten)]
    pub config: Config,

    /// Stop after this many seconds
    #[arg(short = 'T', long)]
    pub time: Option<u64>,

    #[arg(short = 'S', long)]
    pub seed: Option<u64>,

    /// Write every improvement to this CSV file, replacing its contents
    #[arg(long)]
    pub history: Option<String>,
}

pub fn run(args: SearchArgs, config: Config, scorer: Arc<Scorer>) -> KgResult<()> {
    let mut options = OptimizationOptions::try_from(&config)?;
    options.max_time = args.time.map(Duration::from_secs);

    let shutdown = Arc::new(AtomicBool::new(false));
    {
        let flag = shutdown.clone();
        if let Err(e) = ctrlc::set_handler(move || {
            flag.store(true, Ordering::Relaxed);
        }) {
            warn!("⚠️  Could not install Ctrl-C handler: {}", e);
        }
    }

    let mut history = match &args.history {
        Some(path) => {
            info!("📝 Recording improvements to {}", path);
            Some(HistoryWriter::create(path)?)
        }
        None => None,
    };

    let geom = &scorer.geometry;
    let callback = |ev: &Improvement, is_global_best: bool| -> bool {
        if let Some(h) = history.as_mut() {
            if let Err(e) = h.record(ev) {
                warn!("⚠️  History write failed: {}", e);
            }
        }
        if is_global_best {
            reports::print_improvement_header(ev);
            reports::print_layout_grid("NEW BEST", &ev.layout, geom);
            reports::print_score_report(&ev.details);
        }
        true
    };

    let optimizer = Optimizer::new(scorer.clone(), options);
    let result = optimizer.run(args.seed, shutdown, callback)?;

    info!(
        "Search finished: {} improvements in {:.1}s",
        result.improvements,
        result.elapsed.as_secs_f64()
    );

    println!("\n=== 🏆 FINAL RESULT ===");
    match result.best {
        Some(best) => {
            reports::print_improvement_header(&best);
            reports::print_layout_grid("OPTIMIZED", &best.layout, &scorer.geometry);
            reports::print_score_report(&best.details);
        }
        None => warn!("⚠️  No layout was scored before the search stopped."),
    }
    Ok(())
}
