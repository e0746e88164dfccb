/// Rendering — marker substitution followed by article agreement.

use regex::{Captures, Regex};
use std::sync::LazyLock;

use crate::core::lexical::begins_with_vowel_sound;
use crate::core::resolver::AnswerMap;
use crate::schema::template::{Template, MARKER_RE};

/// An article ("a"/"an", any case), whitespace, then the word it governs.
static ARTICLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(an|a)\s+([a-z][\w'-]*)").unwrap());

/// Replace every `{key}` marker with its answer. Keys without an answer
/// render as `<key>` so the gap is visible.
pub fn substitute(story: &str, answers: &AnswerMap) -> String {
    MARKER_RE
        .replace_all(story, |caps: &Captures| {
            let key = &caps[1];
            match answers.get(key) {
                Some(value) => value.clone(),
                None => {
                    tracing::warn!(key, "no answer for marker");
                    format!("<{key}>")
                }
            }
        })
        .into_owned()
}

/// Re-pick every "a"/"an" from the sound of the following word.
///
/// Articles match in any case, and the rewritten article keeps the case of
/// its first letter: "A owl" becomes "An owl", not "an owl". A plain
/// lowercase "a "/"an " replacement would lowercase sentence openers, and
/// matching only lowercase articles would leave "A owl" alone; this pass
/// does neither. The whitespace after the article collapses to one space.
/// Idempotent.
pub fn fix_articles(text: &str) -> String {
    ARTICLE_RE
        .replace_all(text, |caps: &Captures| {
            let article = &caps[1];
            let word = &caps[2];
            let an = begins_with_vowel_sound(word);
            let capital = article.starts_with('A');
            let fixed = match (capital, an) {
                (false, false) => "a",
                (false, true) => "an",
                (true, false) => "A",
                (true, true) => "An",
            };
            format!("{fixed} {word}")
        })
        .into_owned()
}

/// Substitute answers into `template`'s story and fix articles.
pub fn render(template: &Template, answers: &AnswerMap) -> String {
    render_story(&template.story, answers)
}

/// As [`render`], for a bare story string.
pub fn render_story(story: &str, answers: &AnswerMap) -> String {
    fix_articles(&substitute(story, answers))
}
