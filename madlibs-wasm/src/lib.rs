//! WASM bindings for madlibs — powers the in-browser story filler.

use std::collections::BTreeMap;
use wasm_bindgen::prelude::*;

use madlibs::core::lexical;
use madlibs::core::pipeline::MadLibsEngine;
use madlibs::core::render;
use madlibs::core::resolver::{self, AnswerMap, FillMode};
use madlibs::schema::semantic_type::SemanticType;
use madlibs::schema::template::Template;

// ---------------------------------------------------------------------------
// JSON helper types for communication across the WASM boundary
// ---------------------------------------------------------------------------
#[derive(serde::Serialize)]
struct BlankInfo {
    key: String,
    kind: String,
    label: String,
    example: Option<String>,
}

#[derive(serde::Serialize)]
struct TemplateInfo {
    id: String,
    title: String,
    blanks: Vec<BlankInfo>,
}

fn template_info(t: &Template) -> TemplateInfo {
    TemplateInfo {
        id: t.id.clone(),
        title: t.title.clone(),
        blanks: resolver::blanks(t)
            .into_iter()
            .map(|b| BlankInfo {
                key: b.key.clone(),
                kind: b.kind.tag().to_string(),
                label: b.label.clone(),
                example: b.example.clone(),
            })
            .collect(),
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsError> {
    serde_json::to_string(value).map_err(|e| JsError::new(&format!("Serialization error: {e}")))
}

// ---------------------------------------------------------------------------
// MadLibsDemo — the main exported struct
// ---------------------------------------------------------------------------
#[wasm_bindgen]
pub struct MadLibsDemo {
    engine: MadLibsEngine,
}

#[wasm_bindgen]
impl MadLibsDemo {
    /// Create a demo over the built-in templates with a fixed auto-fill seed.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64) -> Result<MadLibsDemo, JsError> {
        let engine = MadLibsEngine::builder()
            .seed(seed)
            .build()
            .map_err(|e| JsError::new(&format!("Engine build error: {e}")))?;
        Ok(MadLibsDemo { engine })
    }

    /// JSON array of templates with the blanks each one asks for, in prompt order.
    pub fn templates(&self) -> Result<String, JsError> {
        let infos: Vec<TemplateInfo> = self
            .engine
            .catalog()
            .templates()
            .iter()
            .map(template_info)
            .collect();
        to_json(&infos)
    }

    /// Random answers for template `id`, as a JSON object of key to value.
    pub fn autofill(&mut self, id: &str) -> Result<String, JsError> {
        let template = self.template(id)?;
        let answers: BTreeMap<String, String> = self.engine.autofill(&template).into_iter().collect();
        to_json(&answers)
    }

    /// Render template `id` with answers given as a JSON object.
    ///
    /// Answers are checked like interactive input; the first bad one is
    /// reported as an error naming its key.
    pub fn render(&self, id: &str, answers_json: &str) -> Result<String, JsError> {
        let template = self.template(id)?;
        let answers: AnswerMap = serde_json::from_str(answers_json)
            .map_err(|e| JsError::new(&format!("Invalid answers JSON: {e}")))?;

        for blank in resolver::blanks(&template) {
            let value = answers.get(&blank.key).map(|v| v.trim()).unwrap_or("");
            if value.is_empty() {
                return Err(JsError::new(&format!("Missing answer for '{}'", blank.key)));
            }
            if !lexical::validate(&blank.kind, value) {
                return Err(JsError::new(&format!(
                    "'{}' doesn't look right for {} ({})",
                    value, blank.kind, blank.key
                )));
            }
        }
        Ok(self.engine.render(&template, &answers))
    }

    /// Auto-fill and render template `id` in one step.
    pub fn play_random(&mut self, id: &str) -> Result<String, JsError> {
        let template = self.template(id)?;
        self.engine
            .play(&template, FillMode::Random)
            .map_err(|e| JsError::new(&format!("Render error: {e}")))
    }

    /// Whether `value` passes the validator for type tag `kind`.
    pub fn validate(kind: &str, value: &str) -> bool {
        lexical::validate(&SemanticType::from_tag(kind), value)
    }

    /// Run only the article-agreement pass over `text`.
    pub fn fix_articles(text: &str) -> String {
        render::fix_articles(text)
    }

    /// Reset the auto-fill RNG with a new seed.
    pub fn reset(&mut self, seed: u64) -> Result<(), JsError> {
        *self = MadLibsDemo::new(seed)?;
        Ok(())
    }
}

// Private helpers
impl MadLibsDemo {
    fn template(&self, id: &str) -> Result<Template, JsError> {
        self.engine
            .catalog()
            .get(id)
            .cloned()
            .ok_or_else(|| JsError::new(&format!("Unknown template: {id}")))
    }
}
