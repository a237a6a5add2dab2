use super::{Rule, RuleError};
use crate::example::{Example, Field};
use crate::pool::{Category, Pool, PoolStore};
use rand_core::RngCore;

pub(super) const FILE_PATH: &str = "file-path";
pub(super) const DIR_PATH: &str = "dir-path";
pub(super) const GENERIC_DIR: &str = "generic-dir";
pub(super) const SCRIPT_NAME: &str = "script-name";

/// Swaps the first known literal of a category for another value from the
/// same list.
///
/// The pool doubles as a priority list: entries are tried in order and only
/// the first one found is replaced, so two known values sharing a substring
/// (`src/main.rs` and `main.rs`) cannot both fire in one pass.
#[derive(Debug, Clone)]
pub struct SlotRule {
    name: &'static str,
    pool: Pool,
    scan: &'static [Field],
}

impl SlotRule {
    pub fn new(name: &'static str, pool: Pool, scan: &'static [Field]) -> Self {
        Self { name, pool, scan }
    }

    fn from_store(
        name: &'static str,
        category: Category,
        pools: &PoolStore,
        scan: &'static [Field],
    ) -> Result<Self, RuleError> {
        Ok(Self::new(name, pools.get(category)?.clone(), scan))
    }

    pub fn file_path(pools: &PoolStore) -> Result<Self, RuleError> {
        Self::from_store(FILE_PATH, Category::FilePath, pools, &Field::ALL)
    }

    pub fn dir_path(pools: &PoolStore) -> Result<Self, RuleError> {
        Self::from_store(DIR_PATH, Category::DirPath, pools, &Field::ALL)
    }

    /// Short single-segment directory names from `cd`/`mkdir` errors.
    pub fn generic_dir(pools: &PoolStore) -> Result<Self, RuleError> {
        Self::from_store(
            GENERIC_DIR,
            Category::GenericDir,
            pools,
            &[Field::Command, Field::Stderr],
        )
    }

    pub fn script_name(pools: &PoolStore) -> Result<Self, RuleError> {
        Self::from_store(SCRIPT_NAME, Category::ScriptName, pools, &Field::ALL)
    }
}

impl Rule for SlotRule {
    fn name(&self) -> &'static str {
        self.name
    }

    fn apply(&self, example: &mut Example, rng: &mut dyn RngCore) {
        let Some(old) = self
            .pool
            .entries()
            .iter()
            .find(|candidate| example.any_contains(self.scan, candidate))
        else {
            return;
        };
        let new = self.pool.pick(rng);
        example.rewrite_each(&Field::ALL, |text| text.replace(old.as_str(), new));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::test_utils::{single_entry_store, small_store};
    use rand_chacha::ChaCha8Rng;
    use rand_core::SeedableRng;

    #[test]
    fn only_first_priority_hit_is_replaced() {
        let mut store = small_store();
        store.insert(
            Category::FilePath,
            Pool::new(Category::FilePath, ["src/main.rs", "src/lib.rs", "Cargo.toml"]).unwrap(),
        );
        let rule = SlotRule::file_path(&store).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for _ in 0..20 {
            let mut example = Example::new(
                "cargo run",
                "error[E0425]: cannot find value `x` in src/lib.rs\n --> Cargo.toml",
                "vim src/lib.rs",
            );
            rule.apply(&mut example, &mut rng);
            // `src/main.rs` is absent, so `src/lib.rs` is the slot; Cargo.toml stays.
            assert!(example.stderr.ends_with(" --> Cargo.toml"));
            let new = example.correction.strip_prefix("vim ").unwrap();
            assert!(example.stderr.contains(&format!("in {new}\n")));
        }
    }

    #[test]
    fn generic_dir_ignores_correction_only_hits_but_rewrites_it() {
        let store = single_entry_store(&[(Category::GenericDir, "outdir")]);
        let rule = SlotRule::generic_dir(&store).unwrap();

        let mut untouched = Example::new("ls", "", "mkdir outdir");
        let before = untouched.clone();
        rule.apply(&mut untouched, &mut ChaCha8Rng::seed_from_u64(0));
        assert_eq!(untouched, before);

        let store = small_store();
        let rule = SlotRule::generic_dir(&store).unwrap();
        let mut example = Example::new(
            "cd mydir",
            "cd: no such file or directory: mydir",
            "mkdir mydir && cd mydir",
        );
        rule.apply(&mut example, &mut ChaCha8Rng::seed_from_u64(9));
        let new = example.command.strip_prefix("cd ").unwrap().to_string();
        assert_eq!(example.stderr, format!("cd: no such file or directory: {new}"));
        assert_eq!(example.correction, format!("mkdir {new} && cd {new}"));
    }
}
