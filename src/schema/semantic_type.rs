use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of word or phrase a blank expects.
///
/// The type decides which validator runs on interactive input and which
/// word-bank list feeds auto-fill. Tags the engine does not know survive
/// as `Custom` and accept any non-empty text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SemanticType {
    Name,
    Place,
    Adjective,
    Noun,
    PluralNoun,
    Verb,
    VerbPast,
    VerbIng,
    Number,
    Animal,
    Emotion,
    VillainName,
    Custom(String),
}

impl SemanticType {
    /// All built-in types, in the order the stock word bank lists them.
    pub const BUILTIN: [SemanticType; 12] = [
        Self::Name,
        Self::Place,
        Self::Adjective,
        Self::Noun,
        Self::PluralNoun,
        Self::Verb,
        Self::VerbPast,
        Self::VerbIng,
        Self::Number,
        Self::Animal,
        Self::Emotion,
        Self::VillainName,
    ];

    /// Returns the tag string for this type (e.g., "plural_noun").
    pub fn tag(&self) -> &str {
        match self {
            Self::Name => "name",
            Self::Place => "place",
            Self::Adjective => "adjective",
            Self::Noun => "noun",
            Self::PluralNoun => "plural_noun",
            Self::Verb => "verb",
            Self::VerbPast => "verb_past",
            Self::VerbIng => "verb_ing",
            Self::Number => "number",
            Self::Animal => "animal",
            Self::Emotion => "emotion",
            Self::VillainName => "villain_name",
            Self::Custom(tag) => tag,
        }
    }

    /// Parse a tag string. Never fails: unknown tags become `Custom`.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "name" => Self::Name,
            "place" => Self::Place,
            "adjective" => Self::Adjective,
            "noun" => Self::Noun,
            "plural_noun" => Self::PluralNoun,
            "verb" => Self::Verb,
            "verb_past" => Self::VerbPast,
            "verb_ing" => Self::VerbIng,
            "number" => Self::Number,
            "animal" => Self::Animal,
            "emotion" => Self::Emotion,
            "villain_name" => Self::VillainName,
            other => Self::Custom(other.to_string()),
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Self::Custom(_))
    }
}

impl From<String> for SemanticType {
    fn from(tag: String) -> Self {
        Self::from_tag(&tag)
    }
}

impl From<SemanticType> for String {
    fn from(kind: SemanticType) -> Self {
        kind.tag().to_string()
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
