/// Template catalog — loading, merging, selection, and linting of stories.

use rustc_hash::FxHashSet;
use std::fmt;
use std::path::Path;
use thiserror::Error;

use crate::core::lexical;
use crate::schema::template::Template;

const BUILTIN_TEMPLATES: &str = include_str!("../../story_data/templates.ron");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("duplicate template id: {0}")]
    DuplicateId(String),
    #[error("template with title '{0}' has an empty id")]
    EmptyId(String),
}

/// An ordered set of templates with unique ids.
#[derive(Debug, Clone, Default)]
pub struct TemplateCatalog {
    templates: Vec<Template>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

/// A problem found by [`TemplateCatalog::lint`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintIssue {
    pub severity: Severity,
    pub template_id: String,
    pub message: String,
}

impl fmt::Display for LintIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity {
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
        };
        write!(f, "{}: [{}] {}", level, self.template_id, self.message)
    }
}

impl TemplateCatalog {
    /// The stock stories shipped with the crate.
    pub fn builtin() -> TemplateCatalog {
        Self::parse_ron(BUILTIN_TEMPLATES).unwrap_or_else(|e| {
            tracing::error!(error = %e, "built-in templates failed to parse");
            TemplateCatalog::default()
        })
    }

    /// Build a catalog from templates, rejecting empty or duplicate ids.
    pub fn from_templates(templates: Vec<Template>) -> Result<TemplateCatalog, CatalogError> {
        let mut seen = FxHashSet::default();
        for t in &templates {
            if t.id.is_empty() {
                return Err(CatalogError::EmptyId(t.title.clone()));
            }
            if !seen.insert(t.id.as_str()) {
                return Err(CatalogError::DuplicateId(t.id.clone()));
            }
            for key in t.undeclared_markers() {
                tracing::warn!(template = %t.id, key, "story marker has no declared blank");
            }
        }
        Ok(TemplateCatalog { templates })
    }

    /// Load a catalog from a RON file.
    pub fn load_from_ron(path: &Path) -> Result<TemplateCatalog, CatalogError> {
        let contents = std::fs::read_to_string(path)?;
        let catalog = Self::parse_ron(&contents)?;
        tracing::info!(path = %path.display(), templates = catalog.len(), "loaded templates");
        Ok(catalog)
    }

    /// Load every `.ron` file directly inside `dir`, in file-name order.
    /// Later files replace earlier templates with the same id. Other files
    /// and subdirectories are skipped.
    pub fn load_from_dir(dir: &Path) -> Result<TemplateCatalog, CatalogError> {
        let mut paths = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("ron") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut catalog = TemplateCatalog::default();
        for path in &paths {
            catalog.merge(Self::load_from_ron(path)?);
        }
        Ok(catalog)
    }

    /// Load from a single RON file or a directory of them.
    pub fn load_from_path(path: &Path) -> Result<TemplateCatalog, CatalogError> {
        if path.is_dir() {
            Self::load_from_dir(path)
        } else {
            Self::load_from_ron(path)
        }
    }

    /// Parse a catalog from a RON list of templates.
    pub fn parse_ron(input: &str) -> Result<TemplateCatalog, CatalogError> {
        let templates: Vec<Template> = ron::from_str(input)?;
        Self::from_templates(templates)
    }

    /// Merge another catalog into this one. A template from `other`
    /// replaces the one with the same id in place; new ids are appended.
    pub fn merge(&mut self, other: TemplateCatalog) {
        for t in other.templates {
            match self.templates.iter_mut().find(|existing| existing.id == t.id) {
                Some(existing) => *existing = t,
                None => self.templates.push(t),
            }
        }
    }

    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.id == id)
    }

    /// Resolve a menu choice: a 1-based index or a template id.
    pub fn select(&self, choice: &str) -> Option<&Template> {
        let choice = choice.trim();
        if !choice.is_empty() && choice.bytes().all(|b| b.is_ascii_digit()) {
            if let Some(t) = choice
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|idx| self.templates.get(idx))
            {
                return Some(t);
            }
        }
        self.get(choice)
    }

    /// Check every template for authoring mistakes.
    pub fn lint(&self) -> Vec<LintIssue> {
        let mut issues = Vec::new();
        for t in &self.templates {
            lint_template(t, &mut issues);
        }
        issues
    }
}

fn lint_template(t: &Template, issues: &mut Vec<LintIssue>) {
    let mut push = |severity, message: String| {
        issues.push(LintIssue {
            severity,
            template_id: t.id.clone(),
            message,
        })
    };

    let markers = t.markers();
    if markers.is_empty() {
        push(Severity::Warning, "story has no {key} markers".to_string());
    }

    for key in t.undeclared_markers() {
        push(
            Severity::Error,
            format!("marker '{{{key}}}' has no declared placeholder"),
        );
    }

    let mut reported = FxHashSet::default();
    for spec in &t.placeholders {
        if !markers.contains(&spec.key.as_str()) && reported.insert(spec.key.as_str()) {
            push(
                Severity::Warning,
                format!("placeholder '{}' is never used in the story", spec.key),
            );
        }
        if let Some(example) = &spec.example {
            if !lexical::validate(&spec.kind, example) {
                push(
                    Severity::Warning,
                    format!(
                        "example '{}' for '{}' fails the {} check",
                        example, spec.key, spec.kind
                    ),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::semantic_type::SemanticType;
    use crate::schema::template::PlaceholderSpec;

    fn tiny(id: &str, story: &str) -> Template {
        Template::new(
            id,
            id,
            story,
            vec![PlaceholderSpec::new("noun", SemanticType::Noun, "A noun")],
        )
    }

    #[test]
    fn builtin_has_stock_stories_in_order() {
        let catalog = TemplateCatalog::builtin();
        let ids: Vec<&str> = catalog.templates().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["space-caper", "school-day", "mystery"]);
    }

    #[test]
    fn select_by_index_and_id() {
        let catalog = TemplateCatalog::builtin();
        assert_eq!(catalog.select("1").unwrap().id, "space-caper");
        assert_eq!(catalog.select(" 3 ").unwrap().id, "mystery");
        assert_eq!(catalog.select("school-day").unwrap().title, "A Very Normal School Day");
    }

    #[test]
    fn select_rejects_bad_choices() {
        let catalog = TemplateCatalog::builtin();
        assert!(catalog.select("0").is_none());
        assert!(catalog.select("4").is_none());
        assert!(catalog.select("-1").is_none());
        assert!(catalog.select("").is_none());
        assert!(catalog.select("Space Caper").is_none());
        assert!(catalog.select("99999999999999999999999").is_none());
    }

    #[test]
    fn duplicate_ids_rejected() {
        let result = TemplateCatalog::from_templates(vec![tiny("a", "{noun}"), tiny("a", "{noun}")]);
        assert!(matches!(result, Err(CatalogError::DuplicateId(id)) if id == "a"));
    }

    #[test]
    fn empty_id_rejected() {
        let result = TemplateCatalog::from_templates(vec![tiny("", "{noun}")]);
        assert!(matches!(result, Err(CatalogError::EmptyId(_))));
    }

    #[test]
    fn merge_replaces_in_place_and_appends() {
        let mut base = TemplateCatalog::builtin();
        let extra = TemplateCatalog::from_templates(vec![
            tiny("school-day", "A {noun} at school."),
            tiny("picnic", "A {noun} at the picnic."),
        ])
        .unwrap();
        base.merge(extra);

        assert_eq!(base.len(), 4);
        assert_eq!(base.templates()[1].story, "A {noun} at school.");
        assert_eq!(base.templates()[3].id, "picnic");
    }

    #[test]
    fn builtin_lints_clean() {
        let issues = TemplateCatalog::builtin().lint();
        assert!(issues.is_empty(), "unexpected lint issues: {issues:?}");
    }

    #[test]
    fn lint_flags_authoring_mistakes() {
        let broken = Template::new(
            "broken",
            "Broken",
            "A {noun} met a {villain}.",
            vec![
                PlaceholderSpec::new("noun", SemanticType::Noun, "A noun"),
                PlaceholderSpec::new("count", SemanticType::Number, "A number").with_example("lots"),
            ],
        );
        let catalog = TemplateCatalog::from_templates(vec![broken, tiny("flat", "No blanks.")]).unwrap();
        let issues = catalog.lint();

        let errors: Vec<_> = issues.iter().filter(|i| i.severity == Severity::Error).collect();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("{villain}"));

        assert!(issues.iter().any(|i| i.message.contains("'count' is never used")));
        assert!(issues.iter().any(|i| i.message.contains("example 'lots'")));
        assert!(issues
            .iter()
            .any(|i| i.template_id == "flat" && i.message.contains("no {key} markers")));
    }

    #[test]
    fn lint_issue_display() {
        let issue = LintIssue {
            severity: Severity::Error,
            template_id: "t".to_string(),
            message: "bad".to_string(),
        };
        assert_eq!(issue.to_string(), "ERROR: [t] bad");
    }

    fn write_template(dir: &Path, file: &str, id: &str, story: &str) {
        let ron = format!(
            r#"[(id: "{id}", title: "{id}", story: "{story}", placeholders: [
                (key: "animal", kind: "animal", label: "An animal"),
            ])]"#
        );
        std::fs::write(dir.join(file), ron).unwrap();
    }

    #[test]
    fn load_from_dir_reads_ron_files_in_name_order() {
        let dir = tempfile::tempdir().unwrap();
        write_template(dir.path(), "b.ron", "zoo", "Second {animal}.");
        write_template(dir.path(), "a.ron", "zoo", "First {animal}.");
        write_template(dir.path(), "c.ron", "farm", "A {animal}.");
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        write_template(&dir.path().join("nested"), "d.ron", "deep", "A {animal}.");

        let catalog = TemplateCatalog::load_from_dir(dir.path()).unwrap();
        let ids: Vec<&str> = catalog.templates().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["zoo", "farm"]);
        assert_eq!(catalog.get("zoo").unwrap().story, "Second {animal}.");
    }

    #[test]
    fn load_from_dir_missing_dir_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = TemplateCatalog::load_from_dir(&dir.path().join("gone"));
        assert!(matches!(result, Err(CatalogError::Io(_))));
    }

    #[test]
    fn load_from_dir_reports_bad_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("broken.ron"), "[(id: ").unwrap();
        let result = TemplateCatalog::load_from_dir(dir.path());
        assert!(matches!(result, Err(CatalogError::Ron(_))));
    }

    #[test]
    fn load_from_path_accepts_file_or_dir() {
        let dir = tempfile::tempdir().unwrap();
        write_template(dir.path(), "zoo.ron", "zoo", "A {animal}.");

        let from_file = TemplateCatalog::load_from_path(&dir.path().join("zoo.ron")).unwrap();
        let from_dir = TemplateCatalog::load_from_path(dir.path()).unwrap();
        assert_eq!(from_file.len(), 1);
        assert_eq!(from_dir.len(), 1);
        assert!(matches!(
            TemplateCatalog::load_from_path(&dir.path().join("none.ron")),
            Err(CatalogError::Io(_))
        ));
    }
}
