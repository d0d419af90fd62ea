use clap::Args;
use keygrid::config::Config;
use keygrid::error::KgResult;
use keygrid::wordlist::WordTable;
use std::fs;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub config: Config,

    #[arg(short, long)]
    pub output: String,

    /// Capitalize sentence starts and "I"
    #[arg(long, default_value_t = false)]
    pub pretty: bool,

    #[arg(short = 'S', long)]
    pub seed: Option<u64>,
}

pub fn run(args: GenerateArgs, config: Config, table: &WordTable) -> KgResult<()> {
    let mut rng = match args.seed {
        Some(s) => fastrand::Rng::with_seed(s),
        None => fastrand::Rng::new(),
    };
    let text = table.generate(config.corpus.sentences, args.pretty, &mut rng);
    fs::write(&args.output, &text)?;
    info!(
        "✍️  Wrote {} bytes from {} words to {}",
        text.len(),
        config.corpus.sentences,
        args.output
    );
    Ok(())
}
