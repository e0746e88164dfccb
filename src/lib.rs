//! Mad Libs — story templates with typed blanks.
//!
//! Templates declare a story with `{key}` markers and an ordered list of
//! blanks. Blanks are filled interactively (with per-type validation) or
//! from a word bank, substituted into the story, and the result gets an
//! article-agreement pass so "a elephant" reads "an elephant".

pub mod core;
pub mod schema;
