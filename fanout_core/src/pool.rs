use crate::builtin;
use rand::seq::SliceRandom;
use rand::Rng;
use rand_core::RngCore;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors raised while loading or querying substitution pools.
#[derive(Error, Debug)]
pub enum PoolError {
    /// A wordlist resource required by a category could not be found.
    #[error(
        "wordlist '{resource}' for category '{category}' not found (looked in {location}); \
         fetch the wordlists before augmenting"
    )]
    MissingResource {
        category: Category,
        resource: String,
        location: String,
    },

    /// A category resolved to zero usable entries.
    #[error("pool for category '{0}' is empty")]
    Empty(Category),

    /// The store was queried for a category it never loaded.
    #[error("no pool loaded for category '{0}'")]
    NotLoaded(Category),

    /// Reading a resource from its backing storage failed.
    #[error("failed to read pool resource {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A class of textual entity subject to substitution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Branch,
    Package,
    SystemPackage,
    Username,
    Host,
    Port,
    FilePath,
    DirPath,
    GenericDir,
    ScriptName,
    SshKey,
    Service,
    DockerImage,
    RepoName,
    GithubUser,
    CommitMessage,
    ProcessId,
    LineNumber,
    IpAddress,
    Shell,
    Gibberish,
}

impl Category {
    pub const ALL: [Category; 21] = [
        Category::Branch,
        Category::Package,
        Category::SystemPackage,
        Category::Username,
        Category::Host,
        Category::Port,
        Category::FilePath,
        Category::DirPath,
        Category::GenericDir,
        Category::ScriptName,
        Category::SshKey,
        Category::Service,
        Category::DockerImage,
        Category::RepoName,
        Category::GithubUser,
        Category::CommitMessage,
        Category::ProcessId,
        Category::LineNumber,
        Category::IpAddress,
        Category::Shell,
        Category::Gibberish,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Category::Branch => "branches",
            Category::Package => "packages",
            Category::SystemPackage => "system-packages",
            Category::Username => "usernames",
            Category::Host => "hosts",
            Category::Port => "ports",
            Category::FilePath => "file-paths",
            Category::DirPath => "dir-paths",
            Category::GenericDir => "generic-dirs",
            Category::ScriptName => "script-names",
            Category::SshKey => "ssh-keys",
            Category::Service => "services",
            Category::DockerImage => "docker-images",
            Category::RepoName => "repo-names",
            Category::GithubUser => "github-users",
            Category::CommitMessage => "commit-messages",
            Category::ProcessId => "process-ids",
            Category::LineNumber => "line-numbers",
            Category::IpAddress => "ip-addresses",
            Category::Shell => "shells",
            Category::Gibberish => "gibberish",
        }
    }

    /// Resources that must all be present for a wordlist category, concatenated
    /// in this order. Empty for categories with a built-in list.
    pub fn wordlist_resources(&self) -> &'static [&'static str] {
        match self {
            Category::Package => &["packages-python", "packages-node", "packages-rust"],
            Category::SystemPackage => &["system-packages"],
            Category::DockerImage => &["docker-images"],
            Category::RepoName => &["repo-names"],
            Category::GithubUser => &["github-users"],
            _ => &[],
        }
    }

    /// Wordlist categories come only from external resources and are
    /// reshuffled once per run.
    pub fn is_wordlist(&self) -> bool {
        !self.wordlist_resources().is_empty()
    }

    fn builtin(&self) -> Vec<String> {
        let entries: &[&str] = match self {
            Category::Branch => builtin::BRANCHES,
            Category::Username => builtin::USERNAMES,
            Category::Host => builtin::HOSTS,
            Category::Port => builtin::PORTS,
            Category::FilePath => builtin::FILE_PATHS,
            Category::DirPath => builtin::DIR_PATHS,
            Category::GenericDir => builtin::GENERIC_DIRS,
            Category::ScriptName => builtin::SCRIPT_NAMES,
            Category::SshKey => builtin::SSH_KEYS,
            Category::Service => builtin::SERVICES,
            Category::CommitMessage => builtin::COMMIT_MESSAGES,
            Category::ProcessId => builtin::PROCESS_IDS,
            Category::LineNumber => return builtin::line_numbers(),
            Category::IpAddress => builtin::IP_ADDRESSES,
            Category::Shell => builtin::SHELLS,
            Category::Gibberish => builtin::GIBBERISH,
            _ => &[],
        };
        entries.iter().map(|s| s.to_string()).collect()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An ordered, non-empty list of unique candidate values for one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pool {
    entries: Vec<String>,
}

impl Pool {
    /// Builds a pool from raw entries: trims each, drops blanks and repeats
    /// (keeping the first occurrence). Fails if nothing remains.
    pub fn new<I, S>(category: Category, raw: I) -> Result<Self, PoolError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut entries = Vec::new();
        for item in raw {
            let trimmed = item.as_ref().trim();
            if !trimmed.is_empty() && seen.insert(trimmed.to_string()) {
                entries.push(trimmed.to_string());
            }
        }
        if entries.is_empty() {
            return Err(PoolError::Empty(category));
        }
        Ok(Self { entries })
    }

    /// Draws one entry uniformly at random.
    pub fn pick(&self, rng: &mut dyn RngCore) -> &str {
        let index = rng.random_range(0..self.entries.len());
        &self.entries[index]
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, value: &str) -> bool {
        self.entries.iter().any(|e| e == value)
    }

    fn shuffle(&mut self, rng: &mut dyn RngCore) {
        self.entries.shuffle(rng);
    }
}

/// A backing store that resolves named resources to raw line lists.
///
/// Implementations return `Ok(None)` for a resource they do not have, leaving
/// it to [`PoolStore::load`] to decide between a built-in fallback and a fatal
/// error.
pub trait PoolSource {
    /// Loads the resource `name`, one entry per element.
    fn load(&self, name: &str) -> Result<Option<Vec<String>>, PoolError>;

    /// Human-readable description of where resources are looked up, used in
    /// error messages.
    fn location(&self) -> String;
}

/// Reads resources from `<root>/<name>.txt`, one entry per line.
#[derive(Debug, Clone)]
pub struct OnDiskPoolSource {
    root: PathBuf,
}

impl OnDiskPoolSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resource_path(&self, name: &str) -> PathBuf {
        self.root.join(name).with_extension("txt")
    }
}

impl PoolSource for OnDiskPoolSource {
    fn load(&self, name: &str) -> Result<Option<Vec<String>>, PoolError> {
        let path = self.resource_path(name);
        if !path.is_file() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path).map_err(|source| PoolError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(Some(content.lines().map(str::to_string).collect()))
    }

    fn location(&self) -> String {
        format!("{:?}", self.root)
    }
}

/// Serves resources from memory; used by tests and by embedders that fetch
/// their lists elsewhere.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPoolSource {
    resources: HashMap<String, Vec<String>>,
}

impl InMemoryPoolSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<S: AsRef<str>>(mut self, name: &str, entries: &[S]) -> Self {
        self.resources.insert(
            name.to_string(),
            entries.iter().map(|e| e.as_ref().to_string()).collect(),
        );
        self
    }
}

impl PoolSource for InMemoryPoolSource {
    fn load(&self, name: &str) -> Result<Option<Vec<String>>, PoolError> {
        Ok(self.resources.get(name).cloned())
    }

    fn location(&self) -> String {
        "in-memory pool source".to_string()
    }
}

/// One pool per [`Category`], loaded once per run.
#[derive(Debug, Clone, Default)]
pub struct PoolStore {
    pools: BTreeMap<Category, Pool>,
}

impl PoolStore {
    /// Resolves every category against `source`.
    ///
    /// Wordlist categories need all of their resources. Other categories use
    /// a resource named after the category when the source has one, and their
    /// built-in list otherwise.
    pub fn load(source: &dyn PoolSource) -> Result<Self, PoolError> {
        let mut pools = BTreeMap::new();
        for category in Category::ALL {
            let raw = if category.is_wordlist() {
                let mut combined = Vec::new();
                for resource in category.wordlist_resources() {
                    let entries =
                        source
                            .load(resource)?
                            .ok_or_else(|| PoolError::MissingResource {
                                category,
                                resource: resource.to_string(),
                                location: source.location(),
                            })?;
                    combined.extend(entries);
                }
                combined
            } else {
                match source.load(category.name())? {
                    Some(entries) => {
                        debug!(%category, "using pool override from source");
                        entries
                    }
                    None => category.builtin(),
                }
            };
            let pool = Pool::new(category, raw)?;
            debug!(%category, entries = pool.len(), "pool loaded");
            pools.insert(category, pool);
        }
        Ok(Self { pools })
    }

    /// Loads from a wordlist directory on disk.
    pub fn load_dir(root: &Path) -> Result<Self, PoolError> {
        Self::load(&OnDiskPoolSource::new(root))
    }

    /// Inserts or replaces the pool for `category`.
    pub fn insert(&mut self, category: Category, pool: Pool) {
        self.pools.insert(category, pool);
    }

    pub fn get(&self, category: Category) -> Result<&Pool, PoolError> {
        self.pools
            .get(&category)
            .ok_or(PoolError::NotLoaded(category))
    }

    pub fn len(&self) -> usize {
        self.pools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }

    /// Reorders every wordlist pool, in category order, with `rng`.
    pub fn shuffle_wordlists(&mut self, rng: &mut dyn RngCore) {
        for (category, pool) in self.pools.iter_mut() {
            if category.is_wordlist() {
                pool.shuffle(rng);
            }
        }
    }
}
