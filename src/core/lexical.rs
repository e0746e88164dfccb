/// Lexical checks — per-type validators and the vowel-sound heuristic
/// behind "a"/"an" agreement.

use regex::Regex;
use rustc_hash::FxHashSet;
use std::sync::LazyLock;

use crate::schema::semantic_type::SemanticType;

/// Vowel-letter words that are spoken with a consonant sound ("a unicorn").
static CONSONANT_SOUND_WORDS: LazyLock<FxHashSet<&'static str>> = LazyLock::new(|| {
    [
        "university",
        "unicorn",
        "european",
        "one",
        "use",
        "user",
        "ubiquitous",
    ]
    .into_iter()
    .collect()
});

/// Consonant-letter words that are spoken with a vowel sound ("an hour").
static VOWEL_SOUND_WORDS: LazyLock<FxHashSet<&'static str>> =
    LazyLock::new(|| ["honest", "honor", "hour", "heir", "herb"].into_iter().collect());

static IRREGULAR_PAST: LazyLock<FxHashSet<&'static str>> = LazyLock::new(|| {
    [
        "went", "ran", "ate", "saw", "came", "bought", "brought", "caught", "taught", "thought",
        "made", "did", "had", "was",
    ]
    .into_iter()
    .collect()
});

static IRREGULAR_PLURALS: LazyLock<FxHashSet<&'static str>> = LazyLock::new(|| {
    [
        "children", "men", "women", "mice", "geese", "teeth", "feet", "people",
    ]
    .into_iter()
    .collect()
});

static NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^-?\d+(\.\d+)?$").unwrap());

/// Short acronyms whose first letter name starts with a vowel sound: "an FBI agent", "an M.D.".
static VOWEL_ACRONYM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[AEFHILMNORSX]\.?[A-Z]\.?[A-Z]?$").unwrap());

/// Integer or decimal, optionally negative. Surrounding whitespace is ignored.
pub fn is_number(s: &str) -> bool {
    NUMBER_RE.is_match(s.trim())
}

/// Anything ending in "ing". No stem check.
pub fn is_present_participle(s: &str) -> bool {
    s.to_lowercase().ends_with("ing")
}

pub fn is_past_tense(s: &str) -> bool {
    let w = s.to_lowercase();
    IRREGULAR_PAST.contains(w.as_str()) || w.ends_with("ed")
}

pub fn is_plural_noun(s: &str) -> bool {
    let w = s.to_lowercase();
    IRREGULAR_PLURALS.contains(w.as_str()) || w.ends_with('s') || w.ends_with("es")
}

/// Check `value` against the validator for `kind`.
///
/// Only number, verb_ing, verb_past and plural_noun are checked; every
/// other type (custom tags included) accepts free text.
pub fn validate(kind: &SemanticType, value: &str) -> bool {
    match kind {
        SemanticType::Number => is_number(value),
        SemanticType::VerbIng => is_present_participle(value),
        SemanticType::VerbPast => is_past_tense(value),
        SemanticType::PluralNoun => is_plural_noun(value),
        _ => true,
    }
}

/// Whether `word` should take "an" rather than "a".
pub fn begins_with_vowel_sound(word: &str) -> bool {
    let w = word.to_lowercase();

    if CONSONANT_SOUND_WORDS.contains(w.as_str()) {
        return false;
    }
    if VOWEL_SOUND_WORDS.contains(w.as_str()) {
        return true;
    }
    // Case-sensitive: only uppercase tokens read as letter names.
    if VOWEL_ACRONYM_RE.is_match(word) {
        return true;
    }
    if w.starts_with(['a', 'e', 'i', 'o', 'u']) {
        return true;
    }
    // Never reached: every "one..." word already matched the vowel-letter
    // rule above. Left in place; its result matches the default.
    if w.starts_with("one") {
        return false;
    }
    false
}
