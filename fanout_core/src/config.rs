use crate::builder::{DEFAULT_STALL_LIMIT, GenerationMode};
use crate::rules::RuleTable;
use crate::run::{DEFAULT_SEED, RunSettings};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse TOML from config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default = "default_variations")]
    pub variations: usize,
    /// Switches to target-count mode when set.
    #[serde(default)]
    pub target_count: Option<usize>,
    #[serde(default = "default_stall_limit")]
    pub stall_limit: usize,
    #[serde(default)]
    pub disabled_rules: Vec<String>,
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

pub fn default_variations() -> usize {
    100
}

fn default_stall_limit() -> usize {
    DEFAULT_STALL_LIMIT
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            variations: default_variations(),
            target_count: None,
            stall_limit: default_stall_limit(),
            disabled_rules: Vec::new(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
#[serde(deny_unknown_fields)]
pub struct PoolConfig {
    #[serde(default = "default_wordlist_dir")]
    pub wordlist_dir: PathBuf,
}

pub fn default_wordlist_dir() -> PathBuf {
    PathBuf::from("wordlists")
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            wordlist_dir: default_wordlist_dir(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
#[serde(deny_unknown_fields)]
pub struct IoConfig {
    #[serde(default = "default_input")]
    pub input: PathBuf,
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

pub fn default_input() -> PathBuf {
    PathBuf::from("data/base_examples.jsonl")
}

pub fn default_output() -> PathBuf {
    PathBuf::from("data/augmented.jsonl")
}

impl Default for IoConfig {
    fn default() -> Self {
        Self {
            input: default_input(),
            output: default_output(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
#[serde(deny_unknown_fields)]
pub struct FanoutConfig {
    #[serde(default)]
    pub run: RunConfig,
    #[serde(default)]
    pub pools: PoolConfig,
    #[serde(default)]
    pub io: IoConfig,
}

impl FanoutConfig {
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Validates the `[run]` section and turns it into run settings.
    pub fn run_settings(&self) -> Result<RunSettings, ConfigError> {
        let run = &self.run;
        if run.stall_limit == 0 {
            return Err(ConfigError::Invalid(
                "stall-limit must be at least 1".to_string(),
            ));
        }
        if let Some(unknown) = run
            .disabled_rules
            .iter()
            .find(|name| !RuleTable::NAMES.iter().any(|known| *known == name.as_str()))
        {
            return Err(ConfigError::Invalid(format!(
                "unknown rule '{unknown}' in disabled-rules; known rules: {}",
                RuleTable::NAMES.join(", ")
            )));
        }
        let mode = match run.target_count {
            Some(count) => GenerationMode::Target { count },
            None => GenerationMode::Fixed {
                variations: run.variations,
            },
        };
        Ok(RunSettings {
            seed: run.seed,
            mode,
            stall_limit: run.stall_limit,
            disabled_rules: run.disabled_rules.clone(),
        })
    }
}
