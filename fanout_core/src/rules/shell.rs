use super::text::{alternation, compile, replace_word};
use super::{Rule, RuleError};
use crate::example::{Example, Field};
use crate::pool::{Category, Pool, PoolStore};
use rand::Rng;
use rand_core::RngCore;
use regex::{Captures, NoExpand, Regex};

pub(super) const SHELL_PREFIX: &str = "shell-prefix";
pub(super) const COMMAND_NOT_FOUND: &str = "command-not-found";
pub(super) const TRAILING_SLASH: &str = "trailing-slash";

/// Misspellings of real tools. Their "command not found" examples teach the
/// typo itself, so the token must survive augmentation.
const KNOWN_TYPOS: &[&str] = &[
    "gti", "sl", "pytohn", "ndoe", "dcoker", "kubeclt", "teh", "grpe", "maek", "carog", "dc",
];

/// Shells whose `name: ` line prefix is recognized, whatever the replacement
/// pool holds.
const KNOWN_SHELLS: &[&str] = &["bash", "zsh", "sh", "fish"];

const DIR_ARGS: &[&str] = &["src", "dist", "build", "lib", "bin", "tmp"];

/// Swaps the shell named at the start of error lines (`bash: ...`) half of
/// the time.
#[derive(Debug, Clone)]
pub struct ShellPrefixRule {
    pattern: Regex,
    shells: Pool,
}

impl ShellPrefixRule {
    pub fn new(pools: &PoolStore) -> Result<Self, RuleError> {
        let pattern = format!("(?m)^{}: ", alternation(KNOWN_SHELLS, false));
        Ok(Self {
            pattern: compile(SHELL_PREFIX, &pattern)?,
            shells: pools.get(Category::Shell)?.clone(),
        })
    }
}

impl Rule for ShellPrefixRule {
    fn name(&self) -> &'static str {
        SHELL_PREFIX
    }

    fn apply(&self, example: &mut Example, rng: &mut dyn RngCore) {
        if !self.pattern.is_match(&example.stderr) || !rng.random_bool(0.5) {
            return;
        }
        let prefix = format!("{}: ", self.shells.pick(rng));
        example.rewrite(Field::Stderr, |text| {
            self.pattern.replace_all(text, NoExpand(&prefix)).into_owned()
        });
    }
}

/// Renames the unknown program in a negative "command not found" example.
///
/// Known typos of real tools are kept; anything else is treated as gibberish
/// and replaced by another gibberish word.
#[derive(Debug, Clone)]
pub struct CommandNotFoundRule {
    pattern: Regex,
    gibberish: Pool,
}

impl CommandNotFoundRule {
    pub fn new(pools: &PoolStore) -> Result<Self, RuleError> {
        Ok(Self {
            pattern: compile(COMMAND_NOT_FOUND, r"(?m)^(\S+): command not found")?,
            gibberish: pools.get(Category::Gibberish)?.clone(),
        })
    }

    fn is_replaceable(&self, token: &str) -> bool {
        self.gibberish.contains(token) || !KNOWN_TYPOS.iter().any(|typo| *typo == token)
    }
}

impl Rule for CommandNotFoundRule {
    fn name(&self) -> &'static str {
        COMMAND_NOT_FOUND
    }

    fn apply(&self, example: &mut Example, rng: &mut dyn RngCore) {
        if !example.is_negative() {
            return;
        }
        let Some(old) = self
            .pattern
            .captures(&example.stderr)
            .map(|caps| caps[1].to_string())
        else {
            return;
        };
        if !self.is_replaceable(&old) {
            return;
        }
        let new = self.gibberish.pick(rng);
        example.rewrite(Field::Command, |text| {
            if text.split_whitespace().next() == Some(old.as_str()) {
                text.replacen(old.as_str(), new, 1)
            } else {
                text.to_string()
            }
        });
        example.rewrite(Field::Stderr, |text| replace_word(text, &old, new));
    }
}

/// Adds a trailing `/` to bare directory arguments in a quarter of commands,
/// each occurrence with even odds.
#[derive(Debug, Clone)]
pub struct TrailingSlashRule {
    pattern: Regex,
}

impl TrailingSlashRule {
    pub fn new() -> Result<Self, RuleError> {
        Ok(Self {
            pattern: compile(TRAILING_SLASH, &alternation(DIR_ARGS, true))?,
        })
    }
}

impl Rule for TrailingSlashRule {
    fn name(&self) -> &'static str {
        TRAILING_SLASH
    }

    fn apply(&self, example: &mut Example, rng: &mut dyn RngCore) {
        if !rng.random_bool(0.25) {
            return;
        }
        example.rewrite(Field::Command, |text| {
            self.pattern
                .replace_all(text, |caps: &Captures| {
                    let slashed = caps
                        .get(0)
                        .is_some_and(|m| text[m.end()..].starts_with('/'));
                    if !slashed && rng.random_bool(0.5) {
                        format!("{}/", &caps[0])
                    } else {
                        caps[0].to_string()
                    }
                })
                .into_owned()
        });
    }
}
