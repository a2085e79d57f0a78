use anyhow::{bail, Context, Result};
use clap::Parser;
use magique::config::ConfigManager;
use magique::data::{Catalog, Collection};
use magique::engines::construction::DeckBuilder;
use magique::engines::evaluation::{DeckEvaluator, EvaluatorRegistry};
use magique::engines::generation::{EvolutionEngine, LogProgressCallback};
use magique::types::Format;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "magique")]
#[command(about = "Evolves a deck from the cards you own")]
struct Args {
    /// Card catalog (mtgjson-style JSON)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Owned cards, one `count,name` line per stack
    #[arg(long)]
    collection: Option<PathBuf>,

    /// TOML or JSON configuration file
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Card the deck must be built around (repeatable)
    #[arg(short = 'k', long = "key-card")]
    key_cards: Vec<String>,

    #[arg(short = 'f', long)]
    format: Option<Format>,

    #[arg(short = 'g', long)]
    generations: Option<usize>,

    #[arg(short = 's', long)]
    seed: Option<u64>,

    /// Write the deck here instead of stdout
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    dump_config: bool,

    /// Log progress every N generations
    #[arg(long, default_value_t = 10)]
    report_every: usize,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut manager = ConfigManager::load(args.config.as_deref()).context("Failed to load configuration")?;
    manager
        .update(|config| {
            if let Some(format) = args.format {
                config.deck.format = format;
            }
            if !args.key_cards.is_empty() {
                config.deck.key_cards = args.key_cards.clone();
            }
            if let Some(generations) = args.generations {
                config.evolution.generations = generations;
            }
            if args.seed.is_some() {
                config.evolution.seed = args.seed;
            }
        })
        .context("Invalid command line override")?;

    if args.dump_config {
        print!("{}", manager.to_toml()?);
        return Ok(());
    }

    let (Some(catalog_path), Some(collection_path)) = (&args.catalog, &args.collection) else {
        bail!("--catalog and --collection are required unless --dump-config is given");
    };

    let catalog = Catalog::load(catalog_path)
        .with_context(|| format!("Failed to load catalog {}", catalog_path.display()))?;
    let collection = Collection::load(collection_path, &catalog)
        .with_context(|| format!("Failed to load collection {}", collection_path.display()))?;
    log::info!("Loaded {} catalog cards, {} owned copies", catalog.len(), collection.count());

    let config = manager.into_inner();
    let builder = DeckBuilder::from_config(Arc::new(collection), &catalog, &config.deck)
        .context("Failed to resolve key cards")?;
    let registry = EvaluatorRegistry::from_config(&config.scoring, &config.deck)?;
    let evaluator = DeckEvaluator::new(builder, Arc::new(registry));

    let mut engine = EvolutionEngine::new(config.evolution, evaluator)?;
    let outcome = engine.run(LogProgressCallback::new(args.report_every))?;

    let json = outcome.best.to_json_pretty()?;
    match &args.output {
        Some(path) => {
            std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!("Deck written to {}", path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}
