use super::text::{alternation, compile, distinct_matches, substitute};
use super::{Rule, RuleError};
use crate::example::{Example, Field};
use crate::pool::{Category, Pool, PoolStore};
use rand_core::RngCore;
use regex::Regex;
use std::collections::HashMap;

pub(super) const BRANCH: &str = "branch";
pub(super) const PACKAGE: &str = "package";
pub(super) const SYSTEM_PACKAGE: &str = "system-package";
pub(super) const SERVICE: &str = "service";
pub(super) const DOCKER_IMAGE: &str = "docker-image";

const BRANCH_PATTERN: &str = r"\b(?:feature[-/]\w[\w-]*|fix[-/]\w[\w-]*|hotfix[-/]\w[\w-]*|release[-/][\w.]+|refactor[-/]\w[\w-]*|chore[-/]\w[\w-]*|ci[-/]\w[\w-]*|test[-/]\w[\w-]*|docs[-/]\w[\w-]*|main|master|develop|staging|production|trunk|stable)\b";

/// Replaces every distinct entity of one category with its own random pool
/// entry.
///
/// Detection scans only `scan`; replacement covers all three fields, so a
/// package named in the command is renamed in the error output too. The same
/// old value always maps to one new value within an example.
#[derive(Debug, Clone)]
pub struct EntityRule {
    name: &'static str,
    pattern: Regex,
    pool: Pool,
    scan: &'static [Field],
}

impl EntityRule {
    pub fn new(name: &'static str, pattern: Regex, pool: Pool, scan: &'static [Field]) -> Self {
        Self {
            name,
            pattern,
            pool,
            scan,
        }
    }

    /// Detects entities using the pool's own entries as the vocabulary.
    fn from_pool(
        name: &'static str,
        category: Category,
        pools: &PoolStore,
        scan: &'static [Field],
    ) -> Result<Self, RuleError> {
        let pool = pools.get(category)?.clone();
        let pattern = compile(name, &alternation(pool.entries(), true))?;
        Ok(Self::new(name, pattern, pool, scan))
    }

    /// Git branch names: prefixed topic branches and well-known mainlines.
    pub fn branch(pools: &PoolStore) -> Result<Self, RuleError> {
        let pool = pools.get(Category::Branch)?.clone();
        let pattern = compile(BRANCH, BRANCH_PATTERN)?;
        Ok(Self::new(
            BRANCH,
            pattern,
            pool,
            &[Field::Command, Field::Stderr],
        ))
    }

    pub fn package(pools: &PoolStore) -> Result<Self, RuleError> {
        Self::from_pool(
            PACKAGE,
            Category::Package,
            pools,
            &[Field::Command, Field::Correction],
        )
    }

    /// Distribution packages (apt, pacman, brew); only commands are scanned.
    pub fn system_package(pools: &PoolStore) -> Result<Self, RuleError> {
        Self::from_pool(
            SYSTEM_PACKAGE,
            Category::SystemPackage,
            pools,
            &[Field::Command],
        )
    }

    pub fn service(pools: &PoolStore) -> Result<Self, RuleError> {
        Self::from_pool(
            SERVICE,
            Category::Service,
            pools,
            &[Field::Command, Field::Correction],
        )
    }

    pub fn docker_image(pools: &PoolStore) -> Result<Self, RuleError> {
        Self::from_pool(
            DOCKER_IMAGE,
            Category::DockerImage,
            pools,
            &[Field::Command, Field::Correction],
        )
    }
}

impl Rule for EntityRule {
    fn name(&self) -> &'static str {
        self.name
    }

    fn apply(&self, example: &mut Example, rng: &mut dyn RngCore) {
        let found = distinct_matches(
            &self.pattern,
            self.scan.iter().map(|&field| example.field(field)),
        );
        if found.is_empty() {
            return;
        }
        let mapping: HashMap<String, String> = found
            .into_iter()
            .map(|old| {
                let new = self.pool.pick(rng).to_string();
                (old, new)
            })
            .collect();
        example.rewrite_each(&Field::ALL, |text| substitute(&self.pattern, text, &mapping));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::example::NO_CORRECTION;
    use crate::pool::test_utils::{single_entry_store, small_store};
    use rand_chacha::ChaCha8Rng;
    use rand_core::SeedableRng;

    #[test]
    fn branch_is_renamed_consistently_across_fields() {
        let store = single_entry_store(&[(Category::Branch, "hotfix-critical")]);
        let rule = EntityRule::branch(&store).unwrap();
        let mut example = Example::new(
            "git push",
            "fatal: The current branch feature-login has no upstream branch.\n\
             ...git push --set-upstream origin feature-login",
            "git push --set-upstream origin feature-login",
        );
        rule.apply(&mut example, &mut ChaCha8Rng::seed_from_u64(0));
        assert_eq!(example.command, "git push");
        assert_eq!(
            example.stderr,
            "fatal: The current branch hotfix-critical has no upstream branch.\n\
             ...git push --set-upstream origin hotfix-critical"
        );
        assert_eq!(
            example.correction,
            "git push --set-upstream origin hotfix-critical"
        );
    }

    #[test]
    fn each_distinct_entity_maps_to_one_value() {
        let rule = EntityRule::branch(&small_store()).unwrap();
        for seed in 0..20 {
            let mut example = Example::new(
                "git merge develop into main",
                "error: develop diverged from main; main is protected",
                "git checkout main && git merge develop",
            );
            rule.apply(&mut example, &mut ChaCha8Rng::seed_from_u64(seed));
            let words: Vec<&str> = example.correction.split_whitespace().collect();
            let new_main = words[2];
            let new_develop = words[6];
            assert_eq!(
                example.command,
                format!("git merge {new_develop} into {new_main}")
            );
            assert_eq!(
                example.stderr,
                format!("error: {new_develop} diverged from {new_main}; {new_main} is protected")
            );
        }
    }

    #[test]
    fn package_scan_ignores_stderr_only_mentions() {
        let store = small_store();
        let rule = EntityRule::package(&store).unwrap();
        let mut example = Example::new("python app.py", "No module named 'requests'", NO_CORRECTION);
        let before = example.clone();
        rule.apply(&mut example, &mut ChaCha8Rng::seed_from_u64(1));
        assert_eq!(example, before);
    }

    #[test]
    fn package_prefers_longest_name_and_rewrites_stderr() {
        let store = small_store();
        let packages = store.get(Category::Package).unwrap().clone();
        let rule = EntityRule::package(&store).unwrap();
        for seed in 0..20 {
            let mut example = Example::new(
                "npm install react-dom",
                "npm ERR! 404 'react-dom' is not in this registry",
                "npm install react-dom",
            );
            rule.apply(&mut example, &mut ChaCha8Rng::seed_from_u64(seed));
            let new = example.command.strip_prefix("npm install ").unwrap();
            assert!(packages.contains(new), "partial rename: {new}");
            assert_eq!(example.correction, example.command);
            assert_eq!(
                example.stderr,
                format!("npm ERR! 404 '{new}' is not in this registry")
            );
        }
    }

    #[test]
    fn no_match_is_a_noop() {
        let rule = EntityRule::docker_image(&small_store()).unwrap();
        let mut example = Example::new("ls -la", "ls: cannot access", "ls -la");
        let before = example.clone();
        rule.apply(&mut example, &mut ChaCha8Rng::seed_from_u64(3));
        assert_eq!(example, before);
    }
}
