/// Word bank — sample values per semantic type for auto-fill.

use rand::seq::SliceRandom;
use rand::Rng;
use rustc_hash::FxHashMap;
use std::path::Path;
use thiserror::Error;

use crate::schema::semantic_type::SemanticType;

const BUILTIN_WORDS: &str = include_str!("../../story_data/word_bank.ron");

/// Returned when neither the requested type nor "noun" has any entries.
pub const FALLBACK_WORD: &str = "thing";

#[derive(Debug, Error)]
pub enum WordBankError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// Sample strings keyed by semantic type. Entries are trusted to satisfy
/// their own type's validator; nothing re-checks them.
#[derive(Debug, Clone, Default)]
pub struct WordBank {
    pub words: FxHashMap<SemanticType, Vec<String>>,
}

impl WordBank {
    /// The stock word lists shipped with the crate.
    pub fn builtin() -> WordBank {
        Self::parse_ron(BUILTIN_WORDS).unwrap_or_else(|e| {
            tracing::error!(error = %e, "built-in word bank failed to parse");
            WordBank::default()
        })
    }

    /// Load a word bank from a RON file.
    pub fn load_from_ron(path: &Path) -> Result<WordBank, WordBankError> {
        let contents = std::fs::read_to_string(path)?;
        let bank = Self::parse_ron(&contents)?;
        tracing::info!(path = %path.display(), types = bank.words.len(), "loaded word bank");
        Ok(bank)
    }

    /// Parse a word bank from a RON map of type tag to word list.
    pub fn parse_ron(input: &str) -> Result<WordBank, WordBankError> {
        let words: FxHashMap<SemanticType, Vec<String>> = ron::from_str(input)?;
        Ok(WordBank { words })
    }

    /// Merge another bank into this one. Lists from `other` replace lists
    /// for the same type.
    pub fn merge(&mut self, other: WordBank) {
        for (kind, list) in other.words {
            self.words.insert(kind, list);
        }
    }

    /// Entries for `kind`, or an empty slice.
    pub fn entries(&self, kind: &SemanticType) -> &[String] {
        self.words.get(kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Pick a uniformly random value for `kind`.
    ///
    /// Unknown or empty types fall back to the noun list, then to
    /// [`FALLBACK_WORD`].
    pub fn random_example<R: Rng + ?Sized>(&self, kind: &SemanticType, rng: &mut R) -> String {
        let mut list = self.entries(kind);
        if list.is_empty() {
            list = self.entries(&SemanticType::Noun);
        }
        list.choose(rng)
            .cloned()
            .unwrap_or_else(|| FALLBACK_WORD.to_string())
    }
}
