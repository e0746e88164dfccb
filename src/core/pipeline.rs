/// The play-through pipeline: Template → blanks → answers → rendered text.
///
/// Wires together the template catalog, word bank, blank resolver, and
/// renderer behind one engine.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use thiserror::Error;

use crate::core::catalog::{CatalogError, TemplateCatalog};
use crate::core::render;
use crate::core::resolver::{self, AnswerMap, FillMode, ResolveError, ValueSource};
use crate::core::word_bank::{WordBank, WordBankError};
use crate::schema::template::Template;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
    #[error("word bank error: {0}")]
    WordBank(#[from] WordBankError),
    #[error("resolve error: {0}")]
    Resolve(#[from] ResolveError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// The top-level engine. Built via `MadLibsEngine::builder()`.
pub struct MadLibsEngine {
    catalog: TemplateCatalog,
    word_bank: WordBank,
    rng: StdRng,
    seed: Option<u64>,
}

/// Builder for constructing a `MadLibsEngine`.
pub struct MadLibsEngineBuilder {
    builtin: bool,
    templates_path: Option<PathBuf>,
    words_path: Option<PathBuf>,
    seed: Option<u64>,
    /// Directly provided templates (for testing without files).
    catalog: Option<TemplateCatalog>,
    /// Directly provided word bank (for testing without files).
    word_bank: Option<WordBank>,
}

impl MadLibsEngine {
    pub fn builder() -> MadLibsEngineBuilder {
        MadLibsEngineBuilder {
            builtin: true,
            templates_path: None,
            words_path: None,
            seed: None,
            catalog: None,
            word_bank: None,
        }
    }

    pub fn catalog(&self) -> &TemplateCatalog {
        &self.catalog
    }

    pub fn word_bank(&self) -> &WordBank {
        &self.word_bank
    }

    /// The auto-fill seed, if one was fixed at build time.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Resolve a menu choice (1-based index or id).
    pub fn select(&self, choice: &str) -> Option<&Template> {
        self.catalog.select(choice)
    }

    /// Fill every blank from the word bank.
    pub fn autofill(&mut self, template: &Template) -> AnswerMap {
        resolver::resolve_random(template, &self.word_bank, &mut self.rng)
    }

    /// Fill every blank by asking `source`, re-asking on bad answers.
    pub fn fill(
        &self,
        template: &Template,
        source: &mut dyn ValueSource,
    ) -> Result<AnswerMap, ResolveError> {
        resolver::resolve_interactive(template, source)
    }

    /// Substitute answers and fix articles.
    pub fn render(&self, template: &Template, answers: &AnswerMap) -> String {
        render::render(template, answers)
    }

    /// One full play-through: resolve blanks with `mode`, then render.
    pub fn play(&mut self, template: &Template, mode: FillMode<'_>) -> Result<String, PipelineError> {
        let answers = resolver::resolve(template, mode, &self.word_bank, &mut self.rng)?;
        tracing::info!(template = %template.id, blanks = answers.len(), "story rendered");
        Ok(render::render(template, &answers))
    }
}

impl MadLibsEngineBuilder {
    /// Skip the built-in templates and word bank.
    pub fn without_builtin(mut self) -> Self {
        self.builtin = false;
        self
    }

    /// Load templates from a `.ron` file or a directory of them, merged
    /// over the built-ins.
    pub fn templates_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.templates_path = Some(path.into());
        self
    }

    /// Load a word bank from a `.ron` file, merged over the built-in lists.
    pub fn words_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.words_path = Some(path.into());
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Provide templates directly (for testing without files).
    pub fn with_catalog(mut self, catalog: TemplateCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Provide a word bank directly (for testing without files).
    pub fn with_word_bank(mut self, word_bank: WordBank) -> Self {
        self.word_bank = Some(word_bank);
        self
    }

    pub fn build(self) -> Result<MadLibsEngine, PipelineError> {
        let mut catalog = if self.builtin {
            TemplateCatalog::builtin()
        } else {
            TemplateCatalog::default()
        };
        let mut word_bank = if self.builtin {
            WordBank::builtin()
        } else {
            WordBank::default()
        };

        if let Some(provided) = self.catalog {
            catalog.merge(provided);
        }
        if let Some(provided) = self.word_bank {
            word_bank.merge(provided);
        }

        // Files override built-in and directly provided content.
        if let Some(ref path) = self.templates_path {
            catalog.merge(TemplateCatalog::load_from_path(path)?);
        }
        if let Some(ref path) = self.words_path {
            word_bank.merge(WordBank::load_from_ron(path)?);
        }

        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(MadLibsEngine {
            catalog,
            word_bank,
            rng,
            seed: self.seed,
        })
    }
}
