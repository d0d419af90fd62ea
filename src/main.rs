use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};
use keygrid::config::Config;
use keygrid::corpus::{self, CorpusBundle};
use keygrid::error::{KeyGridError, KgResult};
use keygrid::geometry::KeyboardGeometry;
use keygrid::keycodes::ReservedMap;
use keygrid::scorer::Scorer;
use keygrid::wordlist::WordTable;
use std::process;
use std::sync::Arc;
use tracing::{error, info};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Text the layout is optimized for
    #[arg(global = true, short, long, default_value = "messages.txt")]
    corpus: String,

    /// Word table (`word<TAB>count`); when set, the corpus is synthesized from it
    #[arg(global = true, short, long)]
    words: Option<String>,

    /// JSON config; flags given on the command line still win
    #[arg(global = true, long)]
    config: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Search(cmd::search::SearchArgs),
    Validate(cmd::validate::ValidateArgs),
    Generate(cmd::generate::GenerateArgs),
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let level = if cli.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = execute(&cli, &matches) {
        error!("❌ {}", e);
        process::exit(1);
    }
}

fn execute(cli: &Cli, matches: &ArgMatches) -> KgResult<()> {
    info!("🚀 Initializing KeyGrid...");

    let (name, cli_config, seed) = match &cli.command {
        Commands::Search(args) => ("search", &args.config, args.seed),
        Commands::Validate(args) => ("validate", &args.config, args.seed),
        Commands::Generate(args) => ("generate", &args.config, args.seed),
    };
    let sub_matches = matches
        .subcommand_matches(name)
        .ok_or_else(|| KeyGridError::Config(format!("missing '{}' arguments", name)))?;
    let config = resolve_config(cli.config.as_deref(), cli_config, sub_matches)?;

    if let Commands::Generate(args) = &cli.command {
        let path = cli.words.as_deref().ok_or_else(|| {
            KeyGridError::Config("generate needs a word table (--words)".into())
        })?;
        let table = WordTable::load_from_file(path, config.corpus.min_word_count)?;
        return cmd::generate::run(args.clone(), config, &table);
    }

    let scorer = Arc::new(build_scorer(cli, &config, seed)?);

    match &cli.command {
        Commands::Search(args) => cmd::search::run(args.clone(), config, scorer),
        Commands::Validate(args) => cmd::validate::run(args.clone(), scorer),
        Commands::Generate(_) => Ok(()),
    }
}

fn resolve_config(path: Option<&str>, cli_config: &Config, matches: &ArgMatches) -> KgResult<Config> {
    let config = match path {
        Some(path) => {
            info!("⚙️  Loading config from: {}", path);
            let mut file_config = Config::load_from_file(path)?;
            file_config.merge_from_cli(cli_config, matches);
            file_config
        }
        None => cli_config.clone(),
    };
    config.validate()?;
    Ok(config)
}

fn load_corpus(cli: &Cli, config: &Config, seed: Option<u64>) -> KgResult<CorpusBundle> {
    match &cli.words {
        Some(path) => {
            info!("📂 Synthesizing corpus from word table: {}", path);
            let table = WordTable::load_from_file(path, config.corpus.min_word_count)?;
            let mut rng = match seed {
                Some(s) => fastrand::Rng::with_seed(s),
                None => fastrand::Rng::new(),
            };
            let text = table.generate(config.corpus.sentences, false, &mut rng);
            corpus::build_from_text(&text, config.corpus.alphabet_size)
        }
        None => {
            info!("📂 Loading corpus: {}", cli.corpus);
            corpus::load_messages(&cli.corpus, config.corpus.alphabet_size)
        }
    }
}

fn build_scorer(cli: &Cli, config: &Config, seed: Option<u64>) -> KgResult<Scorer> {
    let bundle = load_corpus(cli, config, seed)?;
    info!(
        "🔤 Alphabet: {}",
        String::from_utf8_lossy(bundle.alphabet.as_bytes())
    );

    let geometry = KeyboardGeometry::standard();
    let reserved = ReservedMap::standard(&geometry)?;
    Scorer::new(geometry, reserved, bundle.alphabet, bundle.corpus)
}
