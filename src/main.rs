use anyhow::{Context, Result};
use clap::Parser;
use searchbox::core::config::load_items;
use searchbox::runtime::{ItemLoader, Runtime};
use searchbox::terminal::Terminal;
use searchbox::{FilterStrategy, SearchConfig, SearchController, sample};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Debounced, filterable selection list for the terminal.
#[derive(Parser, Debug)]
#[command(name = "searchbox", version)]
struct Args {
    /// JSON or YAML array of items; a built-in Pokémon list otherwise
    #[arg(short, long, value_name = "FILE")]
    items: Option<PathBuf>,

    /// JSON or YAML search configuration
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Allow selecting more than one item
    #[arg(short, long)]
    multiple: bool,

    /// Start with input disabled
    #[arg(long)]
    disabled: bool,

    /// Filter on every keystroke
    #[arg(long)]
    no_debounce: bool,

    /// substring, prefix, fuzzy or regex
    #[arg(short, long, value_name = "STRATEGY")]
    filter: Option<FilterStrategy>,

    /// Write logs here; filtered by RUST_LOG
    #[arg(long, value_name = "FILE")]
    log: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log.as_deref())?;

    let config = build_config(&args)?;
    info!(?config, "starting");

    let items_path = args.items.clone();
    let loader = ItemLoader::spawn(move || match items_path {
        Some(path) => load_items(&path),
        None => Ok(sample::pokemon()),
    });

    let terminal = Terminal::new().context("opening terminal")?;
    let search = SearchController::new(Vec::new(), config);
    let mut runtime = Runtime::new(search, terminal).with_loader(loader);
    runtime.run().context("running search")?;

    for item in runtime.into_selection() {
        println!("{item}");
    }
    Ok(())
}

fn build_config(args: &Args) -> Result<SearchConfig> {
    let mut config = match &args.config {
        Some(path) => SearchConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => SearchConfig::default(),
    };
    if args.multiple {
        config = config.with_multiple(true);
    }
    if args.disabled {
        config = config.with_disabled(true);
    }
    if args.no_debounce {
        config = config.with_debounced(false);
    }
    if let Some(filter) = args.filter {
        config = config.with_filter(filter);
    }
    Ok(config)
}

/// Logs go to a file since the terminal is in raw mode.
fn init_tracing(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("installing tracing subscriber")?;
    Ok(())
}
