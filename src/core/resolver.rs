/// Blank resolution — which blanks a template needs, and filling them
/// interactively or from the word bank.

use rand::Rng;
use rustc_hash::FxHashSet;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

use crate::core::lexical;
use crate::core::word_bank::WordBank;
use crate::schema::semantic_type::SemanticType;
use crate::schema::template::{PlaceholderSpec, Template};

/// Blank key to resolved value, for one play-through.
pub type AnswerMap = HashMap<String, String>;

#[derive(Debug, Error)]
pub enum ResolveError {
    /// The user cancelled while a prompt was open.
    #[error("interrupted")]
    Interrupted,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Why an answer was refused. The `Display` text is what the user sees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    Empty,
    Invalid(SemanticType),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("Please enter something."),
            Self::Invalid(kind) => write!(f, "That doesn't look right for {kind} - try again."),
        }
    }
}

/// Supplies answers for blanks, one per call. Implemented by the
/// interactive front end; tests use scripted sources.
pub trait ValueSource {
    /// Ask for a value for `blank`. Blocks until one is available.
    fn request(&mut self, blank: &PlaceholderSpec) -> Result<String, ResolveError>;

    /// The last answer for `blank` was refused; `request` is called again next.
    fn rejected(&mut self, blank: &PlaceholderSpec, reason: &Rejection);
}

/// How blanks get their values.
pub enum FillMode<'a> {
    Interactive(&'a mut dyn ValueSource),
    Random,
}

/// The blanks to ask for, in declaration order.
///
/// A declaration is kept when its key appears in the story and no earlier
/// declaration used the same key.
pub fn blanks(template: &Template) -> Vec<&PlaceholderSpec> {
    let in_story: FxHashSet<&str> = template.markers().into_iter().collect();
    let mut seen = FxHashSet::default();
    template
        .placeholders
        .iter()
        .filter(|p| in_story.contains(p.key.as_str()) && seen.insert(p.key.as_str()))
        .collect()
}

/// Ask `source` for every blank, re-asking until each answer is non-empty
/// and passes its type's validator.
pub fn resolve_interactive(
    template: &Template,
    source: &mut dyn ValueSource,
) -> Result<AnswerMap, ResolveError> {
    let mut answers = AnswerMap::new();
    for blank in blanks(template) {
        let value = ask_until_valid(blank, source)?;
        tracing::debug!(key = %blank.key, value = %value, "blank filled");
        answers.insert(blank.key.clone(), value);
    }
    Ok(answers)
}

fn ask_until_valid(
    blank: &PlaceholderSpec,
    source: &mut dyn ValueSource,
) -> Result<String, ResolveError> {
    loop {
        let raw = source.request(blank)?;
        let value = raw.trim();
        let rejection = if value.is_empty() {
            Rejection::Empty
        } else if !lexical::validate(&blank.kind, value) {
            Rejection::Invalid(blank.kind.clone())
        } else {
            return Ok(value.to_string());
        };
        tracing::debug!(key = %blank.key, input = %value, reason = %rejection, "answer rejected");
        source.rejected(blank, &rejection);
    }
}

/// Fill every blank with a random word-bank entry for its type.
pub fn resolve_random<R: Rng + ?Sized>(template: &Template, bank: &WordBank, rng: &mut R) -> AnswerMap {
    blanks(template)
        .into_iter()
        .map(|blank| (blank.key.clone(), bank.random_example(&blank.kind, rng)))
        .collect()
}

/// Resolve all blanks of `template` with the given mode.
pub fn resolve<R: Rng + ?Sized>(
    template: &Template,
    mode: FillMode<'_>,
    bank: &WordBank,
    rng: &mut R,
) -> Result<AnswerMap, ResolveError> {
    match mode {
        FillMode::Interactive(source) => resolve_interactive(template, source),
        FillMode::Random => Ok(resolve_random(template, bank, rng)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::VecDeque;

    /// Replays canned answers and records every prompt and rejection.
    struct Scripted {
        answers: VecDeque<&'static str>,
        asked: Vec<String>,
        rejections: Vec<(String, Rejection)>,
    }

    impl Scripted {
        fn new(answers: &[&'static str]) -> Self {
            Self {
                answers: answers.iter().copied().collect(),
                asked: Vec::new(),
                rejections: Vec::new(),
            }
        }
    }

    impl ValueSource for Scripted {
        fn request(&mut self, blank: &PlaceholderSpec) -> Result<String, ResolveError> {
            self.asked.push(blank.key.clone());
            self.answers
                .pop_front()
                .map(str::to_string)
                .ok_or(ResolveError::Interrupted)
        }

        fn rejected(&mut self, blank: &PlaceholderSpec, reason: &Rejection) {
            self.rejections.push((blank.key.clone(), reason.clone()));
        }
    }

    fn aba() -> Template {
        Template::new(
            "aba",
            "ABA",
            "{a}{b}{a}",
            vec![
                PlaceholderSpec::new("a", SemanticType::Noun, "A noun"),
                PlaceholderSpec::new("b", SemanticType::Number, "A number"),
            ],
        )
    }

    #[test]
    fn blanks_deduplicate_in_declaration_order() {
        let t = Template::new(
            "t",
            "T",
            "{noun} then {adjective} then {adjective} {noun}",
            vec![
                PlaceholderSpec::new("adjective", SemanticType::Adjective, "An adjective"),
                PlaceholderSpec::new("noun", SemanticType::Noun, "A noun"),
                PlaceholderSpec::new("adjective", SemanticType::Adjective, "Another adjective"),
                PlaceholderSpec::new("unused", SemanticType::Animal, "An animal"),
            ],
        );
        let labels: Vec<&str> = blanks(&t).iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["An adjective", "A noun"]);
    }

    #[test]
    fn undeclared_markers_are_not_blanks() {
        let t = Template::new("t", "T", "A {x} walked.", Vec::new());
        assert!(blanks(&t).is_empty());
    }

    #[test]
    fn interactive_asks_once_per_key() {
        let mut source = Scripted::new(&["kite", "3"]);
        let answers = resolve_interactive(&aba(), &mut source).unwrap();

        assert_eq!(answers.len(), 2);
        assert_eq!(answers["a"], "kite");
        assert_eq!(answers["b"], "3");
        assert_eq!(source.asked, vec!["a", "b"]);
        assert!(source.rejections.is_empty());
    }

    #[test]
    fn interactive_reprompts_on_empty_and_invalid() {
        let mut source = Scripted::new(&["  kite  ", "", "lots", "-2.5"]);
        let answers = resolve_interactive(&aba(), &mut source).unwrap();

        assert_eq!(answers["a"], "kite");
        assert_eq!(answers["b"], "-2.5");
        assert_eq!(source.asked, vec!["a", "b", "b", "b"]);
        assert_eq!(
            source.rejections,
            vec![
                ("b".to_string(), Rejection::Empty),
                ("b".to_string(), Rejection::Invalid(SemanticType::Number)),
            ]
        );
    }

    #[test]
    fn interrupt_propagates() {
        let mut source = Scripted::new(&["kite"]);
        let result = resolve_interactive(&aba(), &mut source);
        assert!(matches!(result, Err(ResolveError::Interrupted)));
    }

    #[test]
    fn random_fills_every_blank_from_bank() {
        let bank = WordBank::builtin();
        let mut rng = StdRng::seed_from_u64(42);
        let answers = resolve_random(&aba(), &bank, &mut rng);

        assert_eq!(answers.len(), 2);
        assert!(bank.entries(&SemanticType::Noun).contains(&answers["a"]));
        assert!(lexical::is_number(&answers["b"]));
    }

    #[test]
    fn resolve_dispatches_on_mode() {
        let bank = WordBank::builtin();
        let mut rng = StdRng::seed_from_u64(3);
        let mut source = Scripted::new(&["kite", "9"]);

        let interactive = resolve(&aba(), FillMode::Interactive(&mut source), &bank, &mut rng).unwrap();
        assert_eq!(interactive["b"], "9");

        let random = resolve(&aba(), FillMode::Random, &bank, &mut rng).unwrap();
        assert_eq!(random.len(), 2);
    }

    #[test]
    fn rejection_messages() {
        assert_eq!(Rejection::Empty.to_string(), "Please enter something.");
        assert_eq!(
            Rejection::Invalid(SemanticType::VerbPast).to_string(),
            "That doesn't look right for verb_past - try again."
        );
    }
}
