use include_dir::{include_dir, Dir};
use rand::Rng;
use serde::Deserialize;
use thiserror::Error;

static PASSAGE_DIR: Dir = include_dir!("src/passages");

/// Name of the corpus compiled into the binary.
pub const DEFAULT_CORPUS: &str = "english";

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("passage file `{0}` not found")]
    Missing(String),
    #[error("passage file `{0}` is not valid utf-8")]
    NotUtf8(String),
    #[error("failed to parse passage file: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("corpus `{0}` contains no passages")]
    Empty(String),
    #[error("corpus `{name}` has a blank passage at index {index}")]
    BlankPassage { name: String, index: usize },
}

#[derive(Deserialize)]
struct RawCorpus {
    name: String,
    passages: Vec<String>,
}

/// Fixed list of candidate passages. Never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Corpus {
    name: String,
    passages: Vec<String>,
}

impl Corpus {
    pub fn new(name: impl Into<String>, passages: Vec<String>) -> Result<Self, CorpusError> {
        let name = name.into();
        if passages.is_empty() {
            return Err(CorpusError::Empty(name));
        }
        if let Some(index) = passages.iter().position(|p| p.trim().is_empty()) {
            return Err(CorpusError::BlankPassage { name, index });
        }
        Ok(Self { name, passages })
    }

    /// Loads one of the corpora bundled under `src/passages`.
    pub fn bundled(name: &str) -> Result<Self, CorpusError> {
        let file_name = format!("{name}.json");
        let file = PASSAGE_DIR
            .get_file(&file_name)
            .ok_or_else(|| CorpusError::Missing(file_name.clone()))?;
        let contents = file
            .contents_utf8()
            .ok_or(CorpusError::NotUtf8(file_name))?;
        let raw: RawCorpus = serde_json::from_str(contents)?;
        Self::new(raw.name, raw.passages)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.passages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passages.is_empty()
    }

    /// Uniformly random passage.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        &self.passages[rng.gen_range(0..self.passages.len())]
    }
}
