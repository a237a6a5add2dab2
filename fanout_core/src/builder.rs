use crate::corpus::Corpus;
use crate::example::Example;
use crate::transform::Transformer;
use rand::seq::SliceRandom;
use rand_core::RngCore;
use tracing::{debug, info, warn};

/// Consecutive zero-growth passes tolerated in target mode before giving up.
pub const DEFAULT_STALL_LIMIT: usize = 10;

/// How many variants to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationMode {
    /// `variations` transformer calls per base example, in input order.
    Fixed { variations: usize },
    /// Cycle over shuffled base examples until the corpus holds `count`
    /// unique examples or the pool space is exhausted.
    Target { count: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildSettings {
    pub mode: GenerationMode,
    /// Values below 1 are treated as 1.
    pub stall_limit: usize,
}

impl BuildSettings {
    pub fn fixed(variations: usize) -> Self {
        Self {
            mode: GenerationMode::Fixed { variations },
            stall_limit: DEFAULT_STALL_LIMIT,
        }
    }

    pub fn target(count: usize) -> Self {
        Self {
            mode: GenerationMode::Target { count },
            stall_limit: DEFAULT_STALL_LIMIT,
        }
    }

    pub fn with_stall_limit(mut self, stall_limit: usize) -> Self {
        self.stall_limit = stall_limit;
        self
    }
}

/// A target run that stopped before reaching its goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shortfall {
    pub target: usize,
    pub achieved: usize,
    pub stall_passes: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub base_examples: usize,
    /// Transformer invocations.
    pub transforms: usize,
    /// Full passes over the base examples (fixed mode counts one).
    pub passes: usize,
    pub shortfall: Option<Shortfall>,
}

#[derive(Debug, Clone)]
pub struct BuildOutcome {
    pub corpus: Corpus,
    pub report: BuildReport,
}

/// Grows a deduplicated corpus from base examples by repeated transformation.
pub struct CorpusBuilder<'t, T: Transformer + ?Sized> {
    transformer: &'t T,
    settings: BuildSettings,
}

impl<'t, T: Transformer + ?Sized> CorpusBuilder<'t, T> {
    pub fn new(transformer: &'t T, settings: BuildSettings) -> Self {
        Self {
            transformer,
            settings,
        }
    }

    /// Builds the corpus. Base examples are always inserted first, in input
    /// order; an empty base yields an empty corpus.
    pub fn build(&self, base: &[Example], rng: &mut dyn RngCore) -> BuildOutcome {
        let mut corpus: Corpus = base.iter().cloned().collect();
        let mut report = BuildReport {
            base_examples: base.len(),
            ..BuildReport::default()
        };
        if base.is_empty() {
            warn!("no base examples, nothing to augment");
            return BuildOutcome { corpus, report };
        }

        match self.settings.mode {
            GenerationMode::Fixed { variations } => {
                self.build_fixed(base, variations, &mut corpus, &mut report, rng)
            }
            GenerationMode::Target { count } => {
                self.build_target(base, count, &mut corpus, &mut report, rng)
            }
        }

        info!(
            total = corpus.len(),
            transforms = report.transforms,
            passes = report.passes,
            "corpus built"
        );
        BuildOutcome { corpus, report }
    }

    fn build_fixed(
        &self,
        base: &[Example],
        variations: usize,
        corpus: &mut Corpus,
        report: &mut BuildReport,
        rng: &mut dyn RngCore,
    ) {
        for example in base {
            for _ in 0..variations {
                corpus.insert(self.transformer.transform(example, rng));
                report.transforms += 1;
            }
        }
        report.passes = 1;
        debug!(size = corpus.len(), "fixed pass done");
    }

    fn build_target(
        &self,
        base: &[Example],
        target: usize,
        corpus: &mut Corpus,
        report: &mut BuildReport,
        rng: &mut dyn RngCore,
    ) {
        let stall_limit = self.settings.stall_limit.max(1);
        let mut working: Vec<&Example> = base.iter().collect();
        let mut stall_passes = 0;

        while corpus.len() < target {
            let before = corpus.len();
            working.shuffle(rng);
            for example in &working {
                corpus.insert(self.transformer.transform(example, rng));
                report.transforms += 1;
                if corpus.len() >= target {
                    break;
                }
            }
            report.passes += 1;

            let added = corpus.len() - before;
            debug!(pass = report.passes, added, size = corpus.len(), "target pass done");
            if added > 0 {
                stall_passes = 0;
                continue;
            }
            stall_passes += 1;
            if stall_passes >= stall_limit {
                warn!(
                    target,
                    achieved = corpus.len(),
                    "stalled at {} after {} passes without new examples",
                    corpus.len(),
                    stall_passes
                );
                report.shortfall = Some(Shortfall {
                    target,
                    achieved: corpus.len(),
                    stall_passes,
                });
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::example::NO_CORRECTION;
    use crate::pool::test_utils::small_store;
    use crate::transform::ExampleTransformer;
    use rand::Rng;
    use rand_chacha::ChaCha8Rng;
    use rand_core::SeedableRng;

    /// Appends a number in `0..space` to the command, giving a bounded
    /// substitution space per example.
    struct Suffix {
        space: u32,
    }

    impl Transformer for Suffix {
        fn transform(&self, example: &Example, rng: &mut dyn RngCore) -> Example {
            let n = rng.random_range(0..self.space);
            Example::new(
                format!("{} {n}", example.command),
                example.stderr.clone(),
                example.correction.clone(),
            )
        }
    }

    fn base(n: usize) -> Vec<Example> {
        (0..n)
            .map(|i| Example::new(format!("cmd{i}"), format!("err{i}"), NO_CORRECTION))
            .collect()
    }

    #[test]
    fn fixed_mode_calls_transformer_per_example() {
        let transformer = Suffix { space: 1_000_000 };
        let builder = CorpusBuilder::new(&transformer, BuildSettings::fixed(5));
        let outcome = builder.build(&base(3), &mut ChaCha8Rng::seed_from_u64(1));
        assert_eq!(outcome.report.transforms, 15);
        assert_eq!(outcome.report.passes, 1);
        assert!(outcome.report.shortfall.is_none());
        assert!(outcome.corpus.len() <= 18);
        assert_eq!(&outcome.corpus.entries()[..3], base(3).as_slice());
    }

    #[test]
    fn target_mode_stops_exactly_at_target() {
        let transformer = Suffix { space: 1_000 };
        let builder = CorpusBuilder::new(&transformer, BuildSettings::target(50));
        let outcome = builder.build(&base(4), &mut ChaCha8Rng::seed_from_u64(2));
        assert_eq!(outcome.corpus.len(), 50);
        assert!(outcome.report.shortfall.is_none());
    }

    #[test]
    fn exhausted_space_stalls_with_shortfall() {
        let transformer = Suffix { space: 3 };
        let settings = BuildSettings::target(1_000).with_stall_limit(4);
        let outcome = CorpusBuilder::new(&transformer, settings)
            .build(&base(2), &mut ChaCha8Rng::seed_from_u64(3));
        // 2 base examples plus at most 3 suffixes each.
        assert!(outcome.corpus.len() <= 8);
        let shortfall = outcome.report.shortfall.unwrap();
        assert_eq!(shortfall.target, 1_000);
        assert_eq!(shortfall.achieved, outcome.corpus.len());
        assert_eq!(shortfall.stall_passes, 4);
    }

    #[test]
    fn target_below_base_size_keeps_every_base_example() {
        let transformer = Suffix { space: 10 };
        let outcome = CorpusBuilder::new(&transformer, BuildSettings::target(2))
            .build(&base(5), &mut ChaCha8Rng::seed_from_u64(4));
        assert_eq!(outcome.corpus.entries(), base(5).as_slice());
        assert_eq!(outcome.report.transforms, 0);
    }

    #[test]
    fn million_target_from_twenty_examples_terminates() {
        let transformer = ExampleTransformer::standard(&small_store()).unwrap();
        let base: Vec<Example> = (0..20)
            .map(|i| {
                Example::new(
                    format!("podman run ubuntu ./job-{i}"),
                    format!("Error: ubuntu: image not known (job {i})"),
                    format!("podman pull ubuntu && podman run ubuntu ./job-{i}"),
                )
            })
            .collect();
        let outcome = CorpusBuilder::new(&transformer, BuildSettings::target(1_000_000))
            .build(&base, &mut ChaCha8Rng::seed_from_u64(42));
        let shortfall = outcome.report.shortfall.unwrap();
        // Two docker images give each base example at most one sibling.
        assert!(shortfall.achieved <= 40);
        assert_eq!(shortfall.stall_passes, DEFAULT_STALL_LIMIT);
        for example in &base {
            assert!(outcome.corpus.contains(example));
        }
    }

    #[test]
    fn same_seed_same_corpus() {
        let transformer = Suffix { space: 100 };
        let builder = CorpusBuilder::new(&transformer, BuildSettings::target(120));
        let a = builder.build(&base(6), &mut ChaCha8Rng::seed_from_u64(9));
        let b = builder.build(&base(6), &mut ChaCha8Rng::seed_from_u64(9));
        assert_eq!(a.corpus.entries(), b.corpus.entries());
        assert_eq!(a.report, b.report);
    }
}
