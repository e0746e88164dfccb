/// Mad Libs — interactive story filler.
///
/// Usage: madlibs [--templates <path>] [--words <path>] [--seed <n>]
///                [--output <file>] [--width <n>]
///
/// Loop: pick a template → auto-fill y/n → fill blanks → show story →
/// save y/n → play again y/n. Ctrl-C or end of input (Ctrl-D) at any
/// prompt ends the session with a farewell.

use madlibs::core::output::{self, DEFAULT_SAVE_PATH, DEFAULT_WIDTH};
use madlibs::core::pipeline::{MadLibsEngine, PipelineError};
use madlibs::core::resolver::{FillMode, Rejection, ResolveError, ValueSource};
use madlibs::schema::template::{PlaceholderSpec, Template};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const FAREWELL: &str = "Bye!";
const INTERRUPTED: &str = "\nInterrupted. Goodbye!";

struct Options {
    templates: Option<PathBuf>,
    words: Option<PathBuf>,
    seed: Option<u64>,
    output: PathBuf,
    width: usize,
}

/// Reads answers from stdin, echoing prompts to stdout.
struct Console {
    stdin: io::Stdin,
    stdout: io::Stdout,
}

impl Console {
    fn new() -> Self {
        Self {
            stdin: io::stdin(),
            stdout: io::stdout(),
        }
    }

    /// Print `prompt` and read one trimmed line. End of input is an interrupt.
    fn ask(&mut self, prompt: &str) -> Result<String, ResolveError> {
        print!("{}", prompt);
        self.stdout.flush()?;

        let mut line = String::new();
        if self.stdin.lock().read_line(&mut line)? == 0 {
            return Err(ResolveError::Interrupted);
        }
        Ok(line.trim().to_string())
    }

    fn confirm(&mut self, prompt: &str) -> Result<bool, ResolveError> {
        Ok(self.ask(prompt)?.to_lowercase().starts_with('y'))
    }
}

impl ValueSource for Console {
    fn request(&mut self, blank: &PlaceholderSpec) -> Result<String, ResolveError> {
        let hint = match &blank.example {
            Some(example) if !example.is_empty() => format!(" e.g. {}", example),
            _ => String::new(),
        };
        self.ask(&format!("{} ({}{}): ", blank.label, blank.kind, hint))
    }

    fn rejected(&mut self, _blank: &PlaceholderSpec, reason: &Rejection) {
        println!("  → {}", reason);
    }
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let options = parse_args();

    if let Err(e) = install_interrupt_handler() {
        tracing::warn!(error = %e, "could not install Ctrl-C handler");
    }

    let mut builder = MadLibsEngine::builder();
    if let Some(ref path) = options.templates {
        builder = builder.templates_path(path);
    }
    if let Some(ref path) = options.words {
        builder = builder.words_path(path);
    }
    if let Some(seed) = options.seed {
        builder = builder.seed(seed);
    }

    let mut engine = match builder.build() {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            std::process::exit(1);
        }
    };
    if engine.catalog().is_empty() {
        eprintln!("ERROR: no templates loaded");
        std::process::exit(1);
    }

    let mut console = Console::new();
    println!("=== Mad Libs Generator ===");

    let (message, code) = session_outcome(&run(&mut engine, &mut console, &options));
    if code == 0 {
        println!("{}", message);
    } else {
        eprintln!("{}", message);
    }
    std::process::exit(code);
}

/// Ctrl-C ends the session like end of input does. Nothing is saved.
fn install_interrupt_handler() -> Result<(), ctrlc::Error> {
    ctrlc::set_handler(|| {
        println!("{}", INTERRUPTED);
        std::process::exit(0);
    })
}

/// Closing message and exit code for a finished session.
fn session_outcome(result: &Result<(), PipelineError>) -> (String, i32) {
    match result {
        Ok(()) => (FAREWELL.to_string(), 0),
        Err(PipelineError::Resolve(ResolveError::Interrupted)) => (INTERRUPTED.to_string(), 0),
        Err(e) => (format!("ERROR: {}", e), 1),
    }
}

fn run(engine: &mut MadLibsEngine, console: &mut Console, options: &Options) -> Result<(), PipelineError> {
    loop {
        play_once(engine, console, options)?;
        if console.ask("Play again? (Y/n): ")?.to_lowercase() == "n" {
            return Ok(());
        }
    }
}

fn play_once(engine: &mut MadLibsEngine, console: &mut Console, options: &Options) -> Result<(), PipelineError> {
    let template = pick_template(engine, console)?;
    println!("\nYou chose: {}\n", template.title);

    let mode = if console.confirm("Auto-fill with random words? (y/N): ")? {
        FillMode::Random
    } else {
        println!("\nFill the blanks:");
        FillMode::Interactive(&mut *console)
    };
    let story = engine.play(&template, mode)?;

    println!("\n— Your Story —\n");
    println!("{}", output::wrap(&story, options.width));
    println!("\n— End —\n");

    if console.confirm("Save to file? (y/N): ")? {
        let path = output::save_story(&options.output, &story)?;
        println!("\nSaved to {}\n", path.display());
    }
    Ok(())
}

fn pick_template(engine: &MadLibsEngine, console: &mut Console) -> Result<Template, ResolveError> {
    println!("\nAvailable templates:");
    for (i, t) in engine.catalog().templates().iter().enumerate() {
        println!("  {}. {}  (id: {})", i + 1, t.title, t.id);
    }
    println!();

    loop {
        let choice = console.ask("Pick a template by number (or type id): ")?;
        if let Some(t) = engine.select(&choice) {
            return Ok(t.clone());
        }
        println!("  → Invalid selection, try again.");
    }
}

fn parse_args() -> Options {
    let args: Vec<String> = std::env::args().collect();
    let mut options = Options {
        templates: None,
        words: None,
        seed: None,
        output: PathBuf::from(DEFAULT_SAVE_PATH),
        width: DEFAULT_WIDTH,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            "--templates" if i + 1 < args.len() => {
                i += 1;
                options.templates = Some(PathBuf::from(&args[i]));
            }
            "--words" if i + 1 < args.len() => {
                i += 1;
                options.words = Some(PathBuf::from(&args[i]));
            }
            "--seed" if i + 1 < args.len() => {
                i += 1;
                match args[i].parse() {
                    Ok(seed) => options.seed = Some(seed),
                    Err(_) => usage_error(&format!("Invalid seed: {}", args[i])),
                }
            }
            "--output" if i + 1 < args.len() => {
                i += 1;
                options.output = PathBuf::from(&args[i]);
            }
            "--width" if i + 1 < args.len() => {
                i += 1;
                match args[i].parse() {
                    Ok(width) if width > 0 => options.width = width,
                    _ => usage_error(&format!("Invalid width: {}", args[i])),
                }
            }
            other => usage_error(&format!("Unknown argument: {}", other)),
        }
        i += 1;
    }
    options
}

fn usage_error(message: &str) -> ! {
    eprintln!("{}", message);
    print_usage();
    std::process::exit(1);
}

fn print_usage() {
    println!("Mad Libs — fill story templates with your own words.");
    println!();
    println!("Usage: madlibs [--templates <path>] [--words <path>] [--seed <n>] [--output <file>] [--width <n>]");
    println!();
    println!("  --templates <path>  Extra templates: a .ron file or a directory of them");
    println!("  --words <path>      Extra word bank (.ron), merged over the built-in lists");
    println!("  --seed <n>          Fix the random seed used by auto-fill");
    println!("  --output <file>     Where 'save' writes the story (default: {})", DEFAULT_SAVE_PATH);
    println!("  --width <n>         Wrap column for the displayed story (default: {})", DEFAULT_WIDTH);
    println!();
    println!("Set RUST_LOG=debug to see rejected answers and loaded files on stderr.");
}
