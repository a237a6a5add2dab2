use anyhow::{Context, bail};
use clap::Parser;
use fanout_core::config::FanoutConfig;
use fanout_core::corpus::{read_jsonl, write_jsonl};
use fanout_core::pool::PoolStore;
use fanout_core::telemetry::{init_tracing, level_for_verbosity};
use fanout_core::{GenerationMode, run};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};

const DEFAULT_CONFIG_FILE: &str = "fanout.toml";

/// Multiplies curated (command, stderr, correction) examples into a
/// deduplicated synthetic training corpus.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Base examples, one JSON object per line.
    #[clap(short, long, value_parser)]
    input: Option<PathBuf>,
    /// Where to write the augmented corpus.
    #[clap(short, long, value_parser)]
    output: Option<PathBuf>,
    /// Variations generated per base example.
    #[clap(short = 'n', long)]
    n_variations: Option<usize>,
    /// Generate until the corpus holds this many unique examples (overrides -n).
    #[clap(long)]
    target_count: Option<usize>,
    #[clap(long)]
    seed: Option<u64>,
    /// Consecutive passes without new examples before a target run gives up.
    #[clap(long)]
    stall_limit: Option<usize>,
    /// Directory holding the fetched wordlists.
    #[clap(short, long, value_parser)]
    wordlists: Option<PathBuf>,
    #[clap(short, long, value_parser)]
    config_file: Option<PathBuf>,
    /// Skip a rule by name; repeatable.
    #[clap(long = "disable-rule", value_name = "NAME")]
    disabled_rules: Vec<String>,
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    /// Emit logs as JSON lines.
    #[clap(long)]
    log_json: bool,
}

fn load_config(cli: &Cli) -> anyhow::Result<FanoutConfig> {
    match &cli.config_file {
        Some(config_path) => {
            info!(path = ?config_path, "loading configuration");
            Ok(FanoutConfig::load_from_file(config_path)?)
        }
        None => {
            let default_config_path = PathBuf::from(DEFAULT_CONFIG_FILE);
            if default_config_path.exists() {
                info!(path = ?default_config_path, "loading default configuration");
                Ok(FanoutConfig::load_from_file(&default_config_path)?)
            } else {
                Ok(FanoutConfig::default())
            }
        }
    }
}

fn apply_overrides(config: &mut FanoutConfig, cli: &Cli) {
    if let Some(input) = &cli.input {
        config.io.input = input.clone();
    }
    if let Some(output) = &cli.output {
        config.io.output = output.clone();
    }
    if let Some(dir) = &cli.wordlists {
        config.pools.wordlist_dir = dir.clone();
    }
    if let Some(variations) = cli.n_variations {
        config.run.variations = variations;
    }
    if let Some(count) = cli.target_count {
        config.run.target_count = Some(count);
    }
    if let Some(seed) = cli.seed {
        config.run.seed = seed;
    }
    if let Some(stall_limit) = cli.stall_limit {
        config.run.stall_limit = stall_limit;
    }
    config
        .run
        .disabled_rules
        .extend(cli.disabled_rules.iter().cloned());
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_json, level_for_verbosity(cli.verbose));

    let mut config = load_config(&cli)?;
    apply_overrides(&mut config, &cli);
    let settings = config.run_settings()?;

    let input = &config.io.input;
    if !input.exists() {
        bail!(
            "input {} not found; run the base example generator first",
            input.display()
        );
    }
    let base = read_jsonl(input).with_context(|| format!("reading {}", input.display()))?;
    let pools = PoolStore::load_dir(&config.pools.wordlist_dir).with_context(|| {
        format!(
            "loading pools from {}",
            config.pools.wordlist_dir.display()
        )
    })?;

    match settings.mode {
        GenerationMode::Fixed { variations } => {
            info!(base = base.len(), variations, "augmenting")
        }
        GenerationMode::Target { count } => info!(base = base.len(), target = count, "augmenting"),
    }
    let start_time = Instant::now();
    let outcome = run(&base, pools, &settings).context("building rule table")?;
    if let Some(shortfall) = outcome.report.shortfall {
        warn!(
            target = shortfall.target,
            achieved = shortfall.achieved,
            "substitution space exhausted; add pool entries or base examples to reach the target"
        );
    }

    let output = &config.io.output;
    write_jsonl(output, &outcome.corpus)
        .with_context(|| format!("writing {}", output.display()))?;
    info!(elapsed = ?start_time.elapsed(), "done");

    let stats = outcome.corpus.stats();
    println!(
        "Wrote {} examples to {} ({} new from {} base)",
        stats.total,
        output.display(),
        stats.total.saturating_sub(outcome.report.base_examples),
        outcome.report.base_examples
    );
    println!("  Positive: {}", stats.positive);
    println!("  Negative: {}", stats.negative);
    println!("  Ratio: {:.1}% negative", stats.negative_ratio() * 100.0);
    if let Some(shortfall) = outcome.report.shortfall {
        println!(
            "Warning: reached {} of {} target examples; stalled after {} passes without new examples",
            shortfall.achieved, shortfall.target, shortfall.stall_passes
        );
    }

    Ok(())
}
