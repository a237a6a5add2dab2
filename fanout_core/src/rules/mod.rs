//! Category rules: pattern detection plus consistent replacement, one rule per
//! entity category, applied in a fixed order.

mod entity;
mod shell;
mod slot;
mod structured;
pub(crate) mod text;

pub use entity::EntityRule;
pub use shell::{CommandNotFoundRule, ShellPrefixRule, TrailingSlashRule};
pub use slot::SlotRule;
pub use structured::{
    BarePortRule, CommitHashRule, CommitMessageRule, GitTagRule, GithubUrlRule, IpAddressRule,
    LineNumberRule, PortRule, ProcessIdRule, SshKeyRule, UserHostRule,
};

use crate::example::Example;
use crate::pool::{PoolError, PoolStore};
use rand_core::RngCore;
use thiserror::Error;
use tracing::debug;

/// Errors raised while assembling the rule table.
#[derive(Error, Debug)]
pub enum RuleError {
    /// A rule depends on a pool the store does not hold.
    #[error("rule table needs a pool that is not loaded: {0}")]
    MissingPool(#[from] PoolError),

    /// A detection pattern failed to compile.
    #[error("pattern for rule '{rule}' failed to compile: {source}")]
    Pattern {
        rule: &'static str,
        #[source]
        source: regex::Error,
    },

    /// A rule name given in configuration does not exist.
    #[error("unknown rule '{0}'; known rules: {known}", known = RuleTable::NAMES.join(", "))]
    UnknownRule(String),
}

/// A single detect-and-replace step over an example's three fields.
///
/// Rules receive a working copy of the example and may rewrite any of its
/// fields. A rule that finds nothing to replace leaves the copy untouched;
/// non-matching is never an error.
///
/// Every random decision must be drawn from `rng` so that the output is fully
/// determined by the input example and the generator state.
pub trait Rule: Send + Sync {
    /// Stable identifier, used to disable the rule from configuration.
    fn name(&self) -> &'static str;

    /// Detects entities in `example` and rewrites them in place.
    fn apply(&self, example: &mut Example, rng: &mut dyn RngCore);
}

/// The ordered sequence of rules applied to every example.
pub struct RuleTable {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleTable {
    /// Names of the standard rules, in application order.
    pub const NAMES: [&'static str; 23] = [
        entity::BRANCH,
        entity::PACKAGE,
        entity::SYSTEM_PACKAGE,
        slot::FILE_PATH,
        slot::DIR_PATH,
        slot::GENERIC_DIR,
        slot::SCRIPT_NAME,
        structured::USER_HOST,
        structured::PORT,
        structured::BARE_PORT,
        structured::SSH_KEY,
        entity::SERVICE,
        entity::DOCKER_IMAGE,
        structured::GIT_TAG,
        structured::GITHUB_URL,
        shell::SHELL_PREFIX,
        structured::COMMIT_HASH,
        structured::PROCESS_ID,
        structured::IP_ADDRESS,
        structured::LINE_NUMBER,
        structured::COMMIT_MESSAGE,
        shell::COMMAND_NOT_FOUND,
        shell::TRAILING_SLASH,
    ];

    /// Builds the standard table from `pools`.
    ///
    /// Each rule copies the pools it needs, so later changes to the store do
    /// not affect a built table. Fails if any required pool is missing.
    pub fn standard(pools: &PoolStore) -> Result<Self, RuleError> {
        let rules: Vec<Box<dyn Rule>> = vec![
            Box::new(EntityRule::branch(pools)?),
            Box::new(EntityRule::package(pools)?),
            Box::new(EntityRule::system_package(pools)?),
            Box::new(SlotRule::file_path(pools)?),
            Box::new(SlotRule::dir_path(pools)?),
            Box::new(SlotRule::generic_dir(pools)?),
            Box::new(SlotRule::script_name(pools)?),
            Box::new(UserHostRule::new(pools)?),
            Box::new(PortRule::new(pools)?),
            Box::new(BarePortRule::new(pools)?),
            Box::new(SshKeyRule::new(pools)?),
            Box::new(EntityRule::service(pools)?),
            Box::new(EntityRule::docker_image(pools)?),
            Box::new(GitTagRule::new()?),
            Box::new(GithubUrlRule::new(pools)?),
            Box::new(ShellPrefixRule::new(pools)?),
            Box::new(CommitHashRule::new()?),
            Box::new(ProcessIdRule::new(pools)?),
            Box::new(IpAddressRule::new(pools)?),
            Box::new(LineNumberRule::new(pools)?),
            Box::new(CommitMessageRule::new(pools)?),
            Box::new(CommandNotFoundRule::new(pools)?),
            Box::new(TrailingSlashRule::new()?),
        ];
        debug!(rules = rules.len(), "built standard rule table");
        Ok(Self { rules })
    }

    pub fn from_rules(rules: Vec<Box<dyn Rule>>) -> Self {
        Self { rules }
    }

    /// Drops the named rules, keeping the order of the rest.
    pub fn without<S: AsRef<str>>(mut self, disabled: &[S]) -> Result<Self, RuleError> {
        for name in disabled {
            let name = name.as_ref();
            if !Self::NAMES.iter().any(|known| *known == name) {
                return Err(RuleError::UnknownRule(name.to_string()));
            }
        }
        self.rules
            .retain(|rule| !disabled.iter().any(|d| d.as_ref() == rule.name()));
        Ok(self)
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Runs every rule, in order, over `example`.
    pub fn apply_all(&self, example: &mut Example, rng: &mut dyn RngCore) {
        for rule in &self.rules {
            rule.apply(example, rng);
        }
    }
}
