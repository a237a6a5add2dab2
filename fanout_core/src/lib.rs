pub mod builder;
mod builtin;
pub mod config;
pub mod corpus;
pub mod example;
pub mod pool;
pub mod rules;
pub mod run;
pub mod telemetry;
pub mod transform;

pub use builder::{
    BuildOutcome, BuildReport, BuildSettings, CorpusBuilder, GenerationMode, Shortfall,
};
pub use config::{ConfigError, FanoutConfig};
pub use corpus::{Corpus, CorpusError, CorpusStats};
pub use example::{Example, Field, NO_CORRECTION};
pub use pool::{
    Category, InMemoryPoolSource, OnDiskPoolSource, Pool, PoolError, PoolSource, PoolStore,
};
pub use rules::{Rule, RuleError, RuleTable};
pub use run::{RunSettings, run};
pub use transform::{ExampleTransformer, Transformer};
