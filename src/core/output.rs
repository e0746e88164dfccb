/// Output helpers — line wrapping for display and saving a finished story.

use std::path::{Path, PathBuf};

/// Default column for wrapped display.
pub const DEFAULT_WIDTH: usize = 88;

/// Default save destination.
pub const DEFAULT_SAVE_PATH: &str = "mad_lib_story.txt";

/// Greedy word wrap, like Python's `textwrap.fill`.
///
/// A word longer than `width` is split: its first piece fills what is left
/// of the current line and the rest continues in `width`-sized chunks.
/// Unlike `textwrap`, every whitespace run collapses to one space, including
/// runs in the middle of a line.
pub fn wrap(text: &str, width: usize) -> String {
    let width = width.max(1);
    let mut lines: Vec<String> = Vec::new();
    let mut line = String::new();
    let mut line_chars = 0;

    for word in text.split_whitespace() {
        let mut rest = word;
        loop {
            let rest_chars = rest.chars().count();
            let sep = usize::from(line_chars > 0);
            if line_chars + sep + rest_chars <= width {
                push_word(&mut line, &mut line_chars, rest, rest_chars);
                break;
            }
            if rest_chars <= width {
                lines.push(std::mem::take(&mut line));
                line_chars = 0;
                push_word(&mut line, &mut line_chars, rest, rest_chars);
                break;
            }

            // Longer than a whole line: fill what is left of this one.
            let room = width.saturating_sub(line_chars + sep);
            if room > 0 {
                let split = rest
                    .char_indices()
                    .nth(room)
                    .map(|(i, _)| i)
                    .unwrap_or(rest.len());
                push_word(&mut line, &mut line_chars, &rest[..split], room);
                rest = &rest[split..];
            }
            lines.push(std::mem::take(&mut line));
            line_chars = 0;
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines.join("\n")
}

fn push_word(line: &mut String, line_chars: &mut usize, word: &str, word_chars: usize) {
    if *line_chars > 0 {
        line.push(' ');
        *line_chars += 1;
    }
    line.push_str(word);
    *line_chars += word_chars;
}

/// Write `text` plus a trailing newline to `path`, returning the path written.
pub fn save_story(path: &Path, text: &str) -> std::io::Result<PathBuf> {
    std::fs::write(path, format!("{text}\n"))?;
    tracing::info!(path = %path.display(), "story saved");
    Ok(path.to_path_buf())
}
