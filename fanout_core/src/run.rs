use crate::builder::{
    BuildOutcome, BuildSettings, CorpusBuilder, DEFAULT_STALL_LIMIT, GenerationMode,
};
use crate::example::Example;
use crate::pool::PoolStore;
use crate::rules::{RuleError, RuleTable};
use crate::transform::ExampleTransformer;
use rand_chacha::ChaCha8Rng;
use rand_core::SeedableRng;
use tracing::info;

/// Default generator seed.
pub const DEFAULT_SEED: u64 = 42;

/// Everything that, together with the base examples and pools, determines a
/// run's output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSettings {
    pub seed: u64,
    pub mode: GenerationMode,
    pub stall_limit: usize,
    pub disabled_rules: Vec<String>,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            mode: GenerationMode::Fixed { variations: 100 },
            stall_limit: DEFAULT_STALL_LIMIT,
            disabled_rules: Vec::new(),
        }
    }
}

/// Augments `base` with one generator seeded from `settings.seed`.
///
/// The generator first shuffles the wordlist pools, then drives every rule
/// decision, so identical inputs always produce the identical corpus.
pub fn run(
    base: &[Example],
    mut pools: PoolStore,
    settings: &RunSettings,
) -> Result<BuildOutcome, RuleError> {
    let mut rng = ChaCha8Rng::seed_from_u64(settings.seed);
    pools.shuffle_wordlists(&mut rng);

    let table = RuleTable::standard(&pools)?.without(&settings.disabled_rules)?;
    info!(
        seed = settings.seed,
        rules = table.len(),
        base = base.len(),
        "starting augmentation"
    );
    let transformer = ExampleTransformer::new(table);
    let build = BuildSettings {
        mode: settings.mode,
        stall_limit: settings.stall_limit,
    };
    Ok(CorpusBuilder::new(&transformer, build).build(base, &mut rng))
}
