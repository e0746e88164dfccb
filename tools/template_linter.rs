/// Template Linter — validates story templates and word banks.
///
/// Usage: template_linter <templates_path> [--words <file>]

use madlibs::core::catalog::{Severity, TemplateCatalog};
use madlibs::core::lexical;
use madlibs::core::resolver::blanks;
use madlibs::core::word_bank::WordBank;
use std::path::Path;
use std::process;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        println!("Usage: template_linter <templates_path> [--words <file>]");
        process::exit(0);
    }

    let templates_path = Path::new(&args[1]);
    let mut words_path = None;

    let mut i = 2;
    while i < args.len() {
        if args[i] == "--words" && i + 1 < args.len() {
            i += 1;
            words_path = Some(args[i].clone());
        }
        i += 1;
    }

    if !templates_path.exists() {
        eprintln!("ERROR: Path '{}' does not exist", templates_path.display());
        process::exit(1);
    }
    let catalog = match TemplateCatalog::load_from_path(templates_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("ERROR: Failed to load templates: {}", e);
            process::exit(1);
        }
    };

    println!("Loaded {} templates", catalog.len());

    let bank = match words_path {
        Some(ref path) => match WordBank::load_from_ron(Path::new(path)) {
            Ok(bank) => bank,
            Err(e) => {
                eprintln!("ERROR: Failed to load word bank: {}", e);
                process::exit(1);
            }
        },
        None => WordBank::builtin(),
    };

    let issues = catalog.lint();
    let mut errors = issues
        .iter()
        .filter(|issue| issue.severity == Severity::Error)
        .count();
    let mut warnings = issues.len() - errors;
    let mut messages: Vec<String> = issues.iter().map(|issue| issue.to_string()).collect();

    // Word bank checks: entries must pass their validator, and every blank
    // type used by a template should have something to auto-fill with.
    for (kind, words) in &bank.words {
        for word in words {
            if !lexical::validate(kind, word) {
                messages.push(format!(
                    "ERROR: word bank entry '{}' fails the {} check",
                    word, kind
                ));
                errors += 1;
            }
        }
    }
    for t in catalog.templates() {
        for blank in blanks(t) {
            if bank.entries(&blank.kind).is_empty() {
                messages.push(format!(
                    "WARNING: [{}] no word bank entries for '{}' ({}); auto-fill uses nouns",
                    t.id, blank.key, blank.kind
                ));
                warnings += 1;
            }
        }
    }

    println!("\n=== Template Lint Report ===\n");

    if messages.is_empty() {
        println!("All checks passed!");
    }
    for message in &messages {
        println!("{}", message);
    }

    println!("\nSummary: {} errors, {} warnings", errors, warnings);

    if errors == 0 {
        process::exit(0);
    } else {
        process::exit(1);
    }
}
