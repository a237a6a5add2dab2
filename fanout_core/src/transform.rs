use crate::example::Example;
use crate::pool::PoolStore;
use crate::rules::{RuleError, RuleTable};
use rand_core::RngCore;

/// Produces one new variant of an example.
///
/// Implementations never modify `example` and must draw every random decision
/// from `rng`, so a seeded generator reproduces the same sequence of variants.
pub trait Transformer {
    fn transform(&self, example: &Example, rng: &mut dyn RngCore) -> Example;
}

/// Runs a [`RuleTable`] over a working copy of each example.
pub struct ExampleTransformer {
    table: RuleTable,
}

impl ExampleTransformer {
    pub fn new(table: RuleTable) -> Self {
        Self { table }
    }

    /// Transformer over the standard rule table built from `pools`.
    pub fn standard(pools: &PoolStore) -> Result<Self, RuleError> {
        Ok(Self::new(RuleTable::standard(pools)?))
    }
}

impl Transformer for ExampleTransformer {
    fn transform(&self, example: &Example, rng: &mut dyn RngCore) -> Example {
        let mut variant = example.clone();
        self.table.apply_all(&mut variant, rng);
        variant
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::example::NO_CORRECTION;
    use crate::pool::Category;
    use crate::pool::test_utils::{single_entry_store, small_store};
    use crate::rules::Rule;
    use rand_chacha::ChaCha8Rng;
    use rand_core::SeedableRng;

    fn git_push() -> Example {
        Example::new(
            "git push",
            "fatal: The current branch feature-login has no upstream branch.\n\
             To push the current branch and set the remote as upstream, use\n\n    \
             git push --set-upstream origin feature-login",
            "git push --set-upstream origin feature-login",
        )
    }

    #[test]
    fn full_table_renames_branch_and_nothing_else() {
        let store = single_entry_store(&[(Category::Branch, "hotfix-critical")]);
        let transformer = ExampleTransformer::standard(&store).unwrap();
        let source = git_push();
        let variant = transformer.transform(&source, &mut ChaCha8Rng::seed_from_u64(42));

        assert_eq!(variant.command, "git push");
        assert_eq!(
            variant.stderr,
            "fatal: The current branch hotfix-critical has no upstream branch.\n\
             To push the current branch and set the remote as upstream, use\n\n    \
             git push --set-upstream origin hotfix-critical"
        );
        assert_eq!(
            variant.correction,
            "git push --set-upstream origin hotfix-critical"
        );
        assert_eq!(source, git_push());
    }

    struct Append(&'static str);

    impl Rule for Append {
        fn name(&self) -> &'static str {
            self.0
        }

        fn apply(&self, example: &mut Example, _rng: &mut dyn RngCore) {
            example.command.push_str(self.0);
        }
    }

    #[test]
    fn custom_table_runs_rules_in_given_order() {
        let table = RuleTable::from_rules(vec![
            Box::new(Append("-a")),
            Box::new(Append("-b")),
            Box::new(Append("-c")),
        ]);
        assert_eq!(table.names(), vec!["-a", "-b", "-c"]);
        let transformer = ExampleTransformer::new(table);
        let source = Example::new("make", "make: *** No rule", "make all");
        let variant = transformer.transform(&source, &mut ChaCha8Rng::seed_from_u64(0));
        assert_eq!(variant.command, "make-a-b-c");
        assert_eq!(source.command, "make");
    }

    #[test]
    fn negative_examples_stay_negative() {
        let transformer = ExampleTransformer::standard(&small_store()).unwrap();
        let sources = [
            Example::new("xyzzy", "bash: xyzzy: command not found", NO_CORRECTION),
            Example::new("kill 12345", "kill: (12345) - No such process", NO_CORRECTION),
            Example::new(
                "npm install react --port :3000",
                "npm ERR! code E404",
                NO_CORRECTION,
            ),
        ];
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for source in &sources {
            for _ in 0..50 {
                let variant = transformer.transform(source, &mut rng);
                assert_eq!(variant.correction, NO_CORRECTION);
            }
        }
    }

    #[test]
    fn same_seed_same_variants() {
        let transformer = ExampleTransformer::standard(&small_store()).unwrap();
        let source = Example::new(
            "ssh deploy@10.0.0.5 'systemctl restart nginx'",
            "ssh: connect to host 10.0.0.5 port 22: Connection refused",
            "ssh -p 2222 deploy@10.0.0.5 'systemctl restart nginx'",
        );
        let run = |seed| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            (0..20)
                .map(|_| transformer.transform(&source, &mut rng))
                .collect::<Vec<_>>()
        };
        assert_eq!(run(3), run(3));
        assert_ne!(run(3), run(4));
    }
}
