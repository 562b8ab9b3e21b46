//! The word list that utterances are drawn from.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::error::{Result, VeilError};

/// Largest lexicon whose every index fits a 2-byte log entry.
pub const MAX_LEXICON_SIZE: usize = u16::MAX as usize + 1;

/// Immutable, cheaply clonable word list.
///
/// An empty lexicon is valid and stands for "not loaded yet": the engine
/// skips ticks until words are available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexicon {
    words: Arc<[String]>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self {
            words: Vec::new().into(),
        }
    }
}

impl Lexicon {
    /// A lexicon with no words.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from words in order, truncating past [`MAX_LEXICON_SIZE`].
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut words: Vec<String> = words.into_iter().map(Into::into).collect();
        if words.len() > MAX_LEXICON_SIZE {
            tracing::warn!(
                "Lexicon has {} entries; only the first {} are addressable",
                words.len(),
                MAX_LEXICON_SIZE
            );
            words.truncate(MAX_LEXICON_SIZE);
        }
        Self { words: words.into() }
    }

    /// Parse newline-delimited text. Lines are trimmed; blank lines skipped.
    pub fn from_text(text: &str) -> Self {
        Self::from_words(text.lines().map(str::trim).filter(|l| !l.is_empty()))
    }

    /// Parse a JSON array of strings.
    pub fn from_json(json: &str) -> Result<Self> {
        let words: Vec<String> = serde_json::from_str(json)
            .map_err(|e| VeilError::Lexicon(format!("Invalid word list JSON: {}", e)))?;
        Ok(Self::from_words(words))
    }

    /// Load a word list from disk. `.json` files are parsed as a JSON
    /// array, anything else as one word per line.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            VeilError::Lexicon(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let is_json = path
            .extension()
            .map_or(false, |ext| ext.eq_ignore_ascii_case("json"));
        let lexicon = if is_json {
            Self::from_json(&content)?
        } else {
            Self::from_text(&content)
        };

        tracing::info!("Loaded {} words from {}", lexicon.len(), path.display());
        Ok(lexicon)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// The word at `index`, if any.
    pub fn word(&self, index: usize) -> Option<&str> {
        self.words.get(index).map(String::as_str)
    }

    /// Render a log as words. Indices outside the lexicon render as `#n`.
    pub fn render(&self, log: &[u16]) -> Vec<String> {
        log.iter()
            .map(|&idx| {
                self.word(idx as usize)
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("#{}", idx))
            })
            .collect()
    }
}
