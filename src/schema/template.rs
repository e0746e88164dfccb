/// Story templates — a story with `{key}` markers plus its declared blanks.

use regex::Regex;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use super::semantic_type::SemanticType;

/// Matches a `{key}` marker. Keys are ASCII letters and underscores.
pub static MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([a-zA-Z_]+)\}").unwrap());

/// One declared blank in a template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceholderSpec {
    pub key: String,
    pub kind: SemanticType,
    pub label: String,
    #[serde(default)]
    pub example: Option<String>,
}

impl PlaceholderSpec {
    pub fn new(key: &str, kind: SemanticType, label: &str) -> Self {
        Self {
            key: key.to_string(),
            kind,
            label: label.to_string(),
            example: None,
        }
    }

    pub fn with_example(mut self, example: &str) -> Self {
        self.example = Some(example.to_string());
        self
    }
}

/// A story definition. Read-only once loaded.
///
/// A key may be declared more than once (e.g. "An adjective" then
/// "Another adjective"); only the first declaration is ever asked for and
/// every marker with that key receives the same value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    pub title: String,
    pub story: String,
    pub placeholders: Vec<PlaceholderSpec>,
}

impl Template {
    pub fn new(id: &str, title: &str, story: &str, placeholders: Vec<PlaceholderSpec>) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            story: story.to_string(),
            placeholders,
        }
    }

    /// Distinct marker keys in the story, in order of first appearance.
    pub fn markers(&self) -> Vec<&str> {
        let mut seen = FxHashSet::default();
        MARKER_RE
            .captures_iter(&self.story)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str())
            .filter(|key| seen.insert(*key))
            .collect()
    }

    /// First declaration for `key`, if any.
    pub fn placeholder(&self, key: &str) -> Option<&PlaceholderSpec> {
        self.placeholders.iter().find(|p| p.key == key)
    }

    /// Story markers that have no declaration at all.
    pub fn undeclared_markers(&self) -> Vec<&str> {
        self.markers()
            .into_iter()
            .filter(|key| self.placeholder(key).is_none())
            .collect()
    }
}
