//! Rules for entities with internal structure: they extract components from a
//! structural pattern and regenerate a value of the same shape.

use super::text::{alternation, compile, distinct_matches, replace_word, substitute};
use super::{Rule, RuleError};
use crate::example::{Example, Field};
use crate::pool::{Category, Pool, PoolStore};
use rand::Rng;
use rand_core::RngCore;
use regex::{Captures, NoExpand, Regex};
use std::collections::HashMap;

pub(super) const USER_HOST: &str = "user-host";
pub(super) const PORT: &str = "port";
pub(super) const BARE_PORT: &str = "bare-port";
pub(super) const SSH_KEY: &str = "ssh-key";
pub(super) const GIT_TAG: &str = "git-tag";
pub(super) const GITHUB_URL: &str = "github-url";
pub(super) const COMMIT_HASH: &str = "commit-hash";
pub(super) const PROCESS_ID: &str = "process-id";
pub(super) const IP_ADDRESS: &str = "ip-address";
pub(super) const LINE_NUMBER: &str = "line-number";
pub(super) const COMMIT_MESSAGE: &str = "commit-message";

/// Dev-server ports that show up without a leading `:` (`fuser -k 3000/tcp`).
const BARE_PORTS: &[&str] = &["3000", "5000", "8080", "8000", "4000", "3001"];

/// Key file names recognized in error output and corrections. Replacements
/// come from the ssh-key pool.
const KNOWN_SSH_KEYS: &[&str] = &[
    "id_rsa", "id_ed25519", "id_ecdsa", "id_dsa", "deploy_key", "github_key", "work_key",
];

fn first_capture(pattern: &Regex, text: &str, group: usize) -> Option<String> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(group))
        .map(|m| m.as_str().to_string())
}

/// `user@host` in the command; both halves are redrawn together.
#[derive(Debug, Clone)]
pub struct UserHostRule {
    pattern: Regex,
    users: Pool,
    hosts: Pool,
}

impl UserHostRule {
    pub fn new(pools: &PoolStore) -> Result<Self, RuleError> {
        Ok(Self {
            pattern: compile(USER_HOST, r"\w[\w-]*@[\w.\-]+")?,
            users: pools.get(Category::Username)?.clone(),
            hosts: pools.get(Category::Host)?.clone(),
        })
    }
}

impl Rule for UserHostRule {
    fn name(&self) -> &'static str {
        USER_HOST
    }

    fn apply(&self, example: &mut Example, rng: &mut dyn RngCore) {
        let Some(old) = first_capture(&self.pattern, &example.command, 0) else {
            return;
        };
        let user = self.users.pick(rng);
        let host = self.hosts.pick(rng);
        let new = format!("{user}@{host}");
        example.rewrite_each(&Field::ALL, |text| text.replace(&old, &new));
    }
}

/// `:PORT` in the command.
///
/// Besides the `:old` occurrences, a positive correction that mentions
/// `old + 1` as a standalone number (the "try the next port" fix) gets
/// `new + 1`.
#[derive(Debug, Clone)]
pub struct PortRule {
    pattern: Regex,
    ports: Pool,
}

impl PortRule {
    pub fn new(pools: &PoolStore) -> Result<Self, RuleError> {
        Ok(Self {
            pattern: compile(PORT, r":(\d{2,5})\b")?,
            ports: pools.get(Category::Port)?.clone(),
        })
    }

    fn swap_colon_port(&self, text: &str, old: &str, new: &str) -> String {
        self.pattern
            .replace_all(text, |caps: &Captures| {
                if &caps[1] == old {
                    format!(":{new}")
                } else {
                    caps[0].to_string()
                }
            })
            .into_owned()
    }
}

impl Rule for PortRule {
    fn name(&self) -> &'static str {
        PORT
    }

    fn apply(&self, example: &mut Example, rng: &mut dyn RngCore) {
        let Some(old) = first_capture(&self.pattern, &example.command, 1) else {
            return;
        };
        let new = self.ports.pick(rng);
        example.rewrite_each(&[Field::Command, Field::Stderr], |text| {
            self.swap_colon_port(text, &old, new)
        });
        let next_ports = match (old.parse::<u32>(), new.parse::<u32>()) {
            (Ok(o), Ok(n)) => o
                .checked_add(1)
                .zip(n.checked_add(1))
                .map(|(o, n)| (o.to_string(), n.to_string())),
            _ => None,
        };
        example.rewrite(Field::Correction, |text| {
            let shifted = match &next_ports {
                Some((old_next, new_next)) => replace_word(text, old_next, new_next),
                None => text.to_string(),
            };
            self.swap_colon_port(&shifted, &old, new)
        });
    }
}

/// A common dev port written without a colon, only when the command has no
/// `:` at all (otherwise [`PortRule`] owns it).
#[derive(Debug, Clone)]
pub struct BarePortRule {
    pattern: Regex,
    ports: Pool,
}

impl BarePortRule {
    pub fn new(pools: &PoolStore) -> Result<Self, RuleError> {
        Ok(Self {
            pattern: compile(BARE_PORT, &alternation(BARE_PORTS, true))?,
            ports: pools.get(Category::Port)?.clone(),
        })
    }
}

impl Rule for BarePortRule {
    fn name(&self) -> &'static str {
        BARE_PORT
    }

    fn apply(&self, example: &mut Example, rng: &mut dyn RngCore) {
        if example.command.contains(':') {
            return;
        }
        let Some(old) = first_capture(&self.pattern, &example.command, 0) else {
            return;
        };
        let new = self.ports.pick(rng);
        example.rewrite_each(&Field::ALL, |text| replace_word(text, &old, new));
    }
}

/// SSH key file names, detected in the error output first and then in the
/// correction.
#[derive(Debug, Clone)]
pub struct SshKeyRule {
    pattern: Regex,
    keys: Pool,
}

impl SshKeyRule {
    pub fn new(pools: &PoolStore) -> Result<Self, RuleError> {
        Ok(Self {
            pattern: compile(SSH_KEY, &alternation(KNOWN_SSH_KEYS, false))?,
            keys: pools.get(Category::SshKey)?.clone(),
        })
    }
}

impl Rule for SshKeyRule {
    fn name(&self) -> &'static str {
        SSH_KEY
    }

    fn apply(&self, example: &mut Example, rng: &mut dyn RngCore) {
        let old = first_capture(&self.pattern, &example.stderr, 0)
            .or_else(|| first_capture(&self.pattern, &example.correction, 0));
        let Some(old) = old else {
            return;
        };
        let new = self.keys.pick(rng);
        example.rewrite_each(&Field::ALL, |text| text.replace(&old, new));
    }
}

/// Semver tags `vX.Y.Z`; every tag in the example becomes one freshly drawn
/// tag with independently chosen components.
#[derive(Debug, Clone)]
pub struct GitTagRule {
    pattern: Regex,
}

impl GitTagRule {
    pub fn new() -> Result<Self, RuleError> {
        Ok(Self {
            pattern: compile(GIT_TAG, r"\bv(\d+)\.(\d+)\.(\d+)\b")?,
        })
    }
}

impl Rule for GitTagRule {
    fn name(&self) -> &'static str {
        GIT_TAG
    }

    fn apply(&self, example: &mut Example, rng: &mut dyn RngCore) {
        if !self.pattern.is_match(&example.command) && !self.pattern.is_match(&example.stderr) {
            return;
        }
        let major = rng.random_range(0..=5u32);
        let minor = rng.random_range(0..=20u32);
        let patch = rng.random_range(0..=10u32);
        let tag = format!("v{major}.{minor}.{patch}");
        example.rewrite_each(&Field::ALL, |text| {
            self.pattern.replace_all(text, NoExpand(&tag)).into_owned()
        });
    }
}

/// `github.com/user/repo` (HTTPS) and `github.com:user/repo` (SSH) remotes.
#[derive(Debug, Clone)]
pub struct GithubUrlRule {
    pattern: Regex,
    users: Pool,
    repos: Pool,
}

impl GithubUrlRule {
    pub fn new(pools: &PoolStore) -> Result<Self, RuleError> {
        Ok(Self {
            pattern: compile(GITHUB_URL, r"github\.com([:/])([\w-]+)/([\w.-]+)")?,
            users: pools.get(Category::GithubUser)?.clone(),
            repos: pools.get(Category::RepoName)?.clone(),
        })
    }
}

impl Rule for GithubUrlRule {
    fn name(&self) -> &'static str {
        GITHUB_URL
    }

    fn apply(&self, example: &mut Example, rng: &mut dyn RngCore) {
        if !self.pattern.is_match(&example.command) && !self.pattern.is_match(&example.stderr) {
            return;
        }
        let user = self.users.pick(rng);
        let repo = self.repos.pick(rng);
        example.rewrite_each(&Field::ALL, |text| {
            self.pattern
                .replace_all(text, |caps: &Captures| {
                    format!("github.com{}{user}/{repo}.git", &caps[1])
                })
                .into_owned()
        });
    }
}

/// Abbreviated or full commit hashes in the error output or correction.
///
/// Each distinct hash gets its own fresh value, rewritten in every field so a
/// hash echoed in the command stays in sync.
#[derive(Debug, Clone)]
pub struct CommitHashRule {
    pattern: Regex,
}

impl CommitHashRule {
    pub fn new() -> Result<Self, RuleError> {
        Ok(Self {
            pattern: compile(COMMIT_HASH, r"\b[0-9a-f]{7,40}\b")?,
        })
    }
}

impl Rule for CommitHashRule {
    fn name(&self) -> &'static str {
        COMMIT_HASH
    }

    fn apply(&self, example: &mut Example, rng: &mut dyn RngCore) {
        let found = distinct_matches(
            &self.pattern,
            [example.stderr.as_str(), example.correction.as_str()],
        );
        if found.is_empty() {
            return;
        }
        let mapping: HashMap<String, String> = found
            .into_iter()
            .map(|old| (old, format!("{:07x}", rng.random::<u32>())))
            .collect();
        example.rewrite_each(&Field::ALL, |text| substitute(&self.pattern, text, &mapping));
    }
}

/// Process IDs in `kill` commands.
#[derive(Debug, Clone)]
pub struct ProcessIdRule {
    pattern: Regex,
    pids: Pool,
}

impl ProcessIdRule {
    pub fn new(pools: &PoolStore) -> Result<Self, RuleError> {
        Ok(Self {
            pattern: compile(PROCESS_ID, r"\b\d{4,6}\b")?,
            pids: pools.get(Category::ProcessId)?.clone(),
        })
    }
}

impl Rule for ProcessIdRule {
    fn name(&self) -> &'static str {
        PROCESS_ID
    }

    fn apply(&self, example: &mut Example, rng: &mut dyn RngCore) {
        if !example.command.contains("kill") {
            return;
        }
        let Some(old) = first_capture(&self.pattern, &example.command, 0) else {
            return;
        };
        let new = self.pids.pick(rng);
        example.rewrite_each(&Field::ALL, |text| replace_word(text, &old, new));
    }
}

/// IPv4-shaped tokens, taken from the command or else the error output.
#[derive(Debug, Clone)]
pub struct IpAddressRule {
    pattern: Regex,
    addresses: Pool,
}

impl IpAddressRule {
    pub fn new(pools: &PoolStore) -> Result<Self, RuleError> {
        Ok(Self {
            pattern: compile(IP_ADDRESS, r"\b\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}\b")?,
            addresses: pools.get(Category::IpAddress)?.clone(),
        })
    }
}

impl Rule for IpAddressRule {
    fn name(&self) -> &'static str {
        IP_ADDRESS
    }

    fn apply(&self, example: &mut Example, rng: &mut dyn RngCore) {
        let old = first_capture(&self.pattern, &example.command, 0)
            .or_else(|| first_capture(&self.pattern, &example.stderr, 0));
        let Some(old) = old else {
            return;
        };
        let new = self.addresses.pick(rng);
        example.rewrite_each(&Field::ALL, |text| replace_word(text, &old, new));
    }
}

#[derive(Debug, Clone)]
pub struct LineNumberRule {
    pattern: Regex,
    lines: Pool,
}

impl LineNumberRule {
    pub fn new(pools: &PoolStore) -> Result<Self, RuleError> {
        Ok(Self {
            pattern: compile(LINE_NUMBER, r"\bline \d+\b")?,
            lines: pools.get(Category::LineNumber)?.clone(),
        })
    }
}

impl Rule for LineNumberRule {
    fn name(&self) -> &'static str {
        LINE_NUMBER
    }

    fn apply(&self, example: &mut Example, rng: &mut dyn RngCore) {
        if !self.pattern.is_match(&example.stderr) {
            return;
        }
        let line = format!("line {}", self.lines.pick(rng));
        example.rewrite(Field::Stderr, |text| {
            self.pattern.replace_all(text, NoExpand(&line)).into_owned()
        });
    }
}

/// The quoted message of `git commit -m '...'`.
#[derive(Debug, Clone)]
pub struct CommitMessageRule {
    pattern: Regex,
    messages: Pool,
}

impl CommitMessageRule {
    pub fn new(pools: &PoolStore) -> Result<Self, RuleError> {
        Ok(Self {
            pattern: compile(COMMIT_MESSAGE, r"git commit -m '[^']+'")?,
            messages: pools.get(Category::CommitMessage)?.clone(),
        })
    }
}

impl Rule for CommitMessageRule {
    fn name(&self) -> &'static str {
        COMMIT_MESSAGE
    }

    fn apply(&self, example: &mut Example, rng: &mut dyn RngCore) {
        if !self.pattern.is_match(&example.command) {
            return;
        }
        let commit = format!("git commit -m '{}'", self.messages.pick(rng));
        example.rewrite_each(&[Field::Command, Field::Correction], |text| {
            self.pattern.replace_all(text, NoExpand(&commit)).into_owned()
        });
    }
}
