use crate::reports;
use clap::Args;
use keygrid::config::Config;
use keygrid::error::{KeyGridError, KgResult};
use keygrid::layout::Layout;
use keygrid::scorer::{ScoreDetails, Scorer};
use rayon::prelude::*;
use std::sync::Arc;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub config: Config,

    /// Free-cell characters in row-major order
    #[arg(short, long)]
    pub layout: Option<String>,

    #[arg(short = 'S', long)]
    pub seed: Option<u64>,

    /// Random layouts to score when no layout is given
    #[arg(long, default_value_t = 1)]
    pub samples: usize,
}

pub fn run(args: ValidateArgs, scorer: Arc<Scorer>) -> KgResult<()> {
    if let Some(chars) = &args.layout {
        let layout = scorer.layout_from_str(chars)?;
        let details = scorer.score(&layout)?;
        reports::print_layout_grid("GIVEN", &layout, &scorer.geometry);
        reports::print_score_report(&details);
        return Ok(());
    }

    if args.samples == 0 {
        return Err(KeyGridError::Config("--samples must be positive".into()));
    }

    let base = args.seed.unwrap_or_else(|| fastrand::u64(..));
    info!("🔎 Scoring {} random layouts (seed {})", args.samples, base);

    let mut scored: Vec<(Layout, ScoreDetails)> = (0..args.samples as u64)
        .into_par_iter()
        .map(|i| -> KgResult<(Layout, ScoreDetails)> {
            let layout = scorer.random_layout(base.wrapping_add(i))?;
            let details = scorer.score(&layout)?;
            Ok((layout, details))
        })
        .collect::<KgResult<Vec<_>>>()?;

    scored.sort_by(|a, b| a.1.cost.total_cmp(&b.1.cost));

    let mean = scored.iter().map(|(_, d)| d.cost).sum::<f64>() / scored.len() as f64;
    let (best_layout, best) = &scored[0];
    let worst = scored[scored.len() - 1].1.cost;

    reports::print_sample_summary(scored.len(), best.cost, mean, worst);
    reports::print_layout_grid("BEST SAMPLE", best_layout, &scorer.geometry);
    reports::print_score_report(best);
    Ok(())
}
