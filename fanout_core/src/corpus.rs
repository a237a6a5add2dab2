use crate::example::Example;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors raised while reading or writing a corpus file.
#[derive(Error, Debug)]
pub enum CorpusError {
    /// The input corpus does not exist.
    #[error("input corpus {0:?} not found")]
    InputNotFound(PathBuf),

    /// A line of the input is not a `{command, stderr, correction}` record.
    #[error("{path:?} line {line}: malformed record: {source}")]
    MalformedRecord {
        path: PathBuf,
        /// 1-based line number.
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("corpus I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Counts of positive and negative examples in a corpus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CorpusStats {
    pub total: usize,
    pub positive: usize,
    pub negative: usize,
}

impl CorpusStats {
    /// Share of negative examples, `0.0` for an empty corpus.
    pub fn negative_ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.negative as f64 / self.total as f64
        }
    }
}

/// Insertion-ordered set of examples, unique by full content.
///
/// Lookups go through an md5 fingerprint of the three fields; examples that
/// share a fingerprint are compared in full, so a collision never drops a
/// distinct example.
#[derive(Debug, Default, Clone)]
pub struct Corpus {
    entries: Vec<Example>,
    index: HashMap<[u8; 16], Vec<usize>>,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `example` unless an identical one is already present. Returns
    /// whether it was added.
    pub fn insert(&mut self, example: Example) -> bool {
        let slots = self.index.entry(example.fingerprint()).or_default();
        if slots.iter().any(|&i| self.entries[i] == example) {
            return false;
        }
        slots.push(self.entries.len());
        self.entries.push(example);
        true
    }

    pub fn contains(&self, example: &Example) -> bool {
        self.index
            .get(&example.fingerprint())
            .is_some_and(|slots| slots.iter().any(|&i| self.entries[i] == *example))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Example] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &Example> {
        self.entries.iter()
    }

    pub fn into_entries(self) -> Vec<Example> {
        self.entries
    }

    pub fn stats(&self) -> CorpusStats {
        let negative = self.entries.iter().filter(|e| e.is_negative()).count();
        CorpusStats {
            total: self.entries.len(),
            positive: self.entries.len() - negative,
            negative,
        }
    }
}

impl FromIterator<Example> for Corpus {
    fn from_iter<T: IntoIterator<Item = Example>>(iter: T) -> Self {
        let mut corpus = Corpus::new();
        for example in iter {
            corpus.insert(example);
        }
        corpus
    }
}

/// Parses JSONL examples from `reader`, skipping blank lines. `path` only
/// labels errors.
pub fn read_examples<R: BufRead>(reader: R, path: &Path) -> Result<Vec<Example>, CorpusError> {
    let mut examples = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| CorpusError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if line.trim().is_empty() {
            continue;
        }
        let example: Example =
            serde_json::from_str(&line).map_err(|source| CorpusError::MalformedRecord {
                path: path.to_path_buf(),
                line: idx + 1,
                source,
            })?;
        examples.push(example);
    }
    Ok(examples)
}

/// Reads the base examples from a JSONL file.
pub fn read_jsonl(path: &Path) -> Result<Vec<Example>, CorpusError> {
    if !path.exists() {
        return Err(CorpusError::InputNotFound(path.to_path_buf()));
    }
    let file = File::open(path).map_err(|source| CorpusError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let examples = read_examples(BufReader::new(file), path)?;
    debug!(path = ?path, count = examples.len(), "read base examples");
    Ok(examples)
}

/// Writes one JSON object per line, in iteration order.
pub fn write_examples<'a, W, I>(writer: &mut W, examples: I) -> std::io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a Example>,
{
    for example in examples {
        serde_json::to_writer(&mut *writer, example)?;
        writer.write_all(b"\n")?;
    }
    Ok(())
}

/// Writes `corpus` to `path` as JSONL, creating parent directories.
pub fn write_jsonl(path: &Path, corpus: &Corpus) -> Result<(), CorpusError> {
    let io_err = |source: std::io::Error| CorpusError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    let mut writer = BufWriter::new(File::create(path).map_err(io_err)?);
    write_examples(&mut writer, corpus.iter()).map_err(io_err)?;
    writer.flush().map_err(io_err)?;
    debug!(path = ?path, count = corpus.len(), "wrote corpus");
    Ok(())
}
