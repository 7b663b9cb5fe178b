//! Build a Zettelkasten prompt from the command line.
//!
//! Log output goes to stderr and is controlled by `ZETTEL_LOG`
//! (e.g. `ZETTEL_LOG=debug`). stdout only ever carries the prompt, the
//! option listing, or the schema.
//!
//! # Examples
//!
//! ```sh
//! # Defaults plus a briefing
//! zettel generate --briefing "Plastizität (Malabou) mit Predictive Processing koppeln"
//!
//! # Selections by name or 1-based index, criteria picks and free text
//! zettel generate --denkhorizont 2 --ziel "Gegenzettel erzeugen" --length 700 \
//!   --struktur leitidee --struktur offene_fragen \
//!   --must 1 --must-text "- Luhmann explizit zitieren" \
//!   --stdin < briefing.md
//!
//! # Save zettel_prompt.txt and copy to the clipboard
//! zettel generate --preset preset.json --out ./out --copy
//!
//! # Inspect the catalog, the header schema, or a saved prompt
//! zettel options
//! zettel schema
//! zettel check out/zettel_prompt.txt
//! ```

use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;

use clap::{Args, Parser, Subcommand};
use tracing::warn;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use zettel_cli::{CommandClipboard, PromptConfig};
use zettel_rs::catalog::{
    DEFAULT_STRUKTUR, EXCLUDE_SUGGESTIONS, MUST_SUGGESTIONS, NICE_SUGGESTIONS, OptionSet,
    SELECTIONS, STRUKTUR, WORD_COUNTS, WordCount,
};
use zettel_rs::check::{check_prompt, header_schema};
use zettel_rs::export::Clipboard;
use zettel_rs::session::Session;

/// Zettelkasten prompt builder.
#[derive(Parser)]
#[command(name = "zettel", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a prompt and print it to stdout.
    Generate(GenerateArgs),
    /// List every option set with its default marked `*`.
    Options,
    /// Print the JSON Schema of the prompt header.
    Schema,
    /// Validate a saved prompt file.
    Check {
        /// Prompt file to check.
        file: PathBuf,
    },
}

#[derive(Args)]
struct GenerateArgs {
    /// JSON preset file; flags override its values
    #[arg(long)]
    preset: Option<PathBuf>,

    // ── Selections ─────────────────────────────────────────────
    /// Thinking horizon (name or 1-based index)
    #[arg(long)]
    denkhorizont: Option<String>,

    /// Style of expression (name or 1-based index)
    #[arg(long)]
    ausdrucksmodus: Option<String>,

    /// Kind of note (name or 1-based index)
    #[arg(long)]
    ziel: Option<String>,

    /// Output format (name or 1-based index)
    #[arg(long = "format")]
    ausgabe_format: Option<String>,

    /// Target length in words
    #[arg(long = "length")]
    laenge_woerter: Option<u32>,

    /// Structure element; repeat for several (replaces the default set)
    #[arg(long)]
    struktur: Vec<String>,

    // ── Criteria ───────────────────────────────────────────────
    /// Must-criterion suggestion (name or 1-based index); repeatable
    #[arg(long)]
    must: Vec<String>,

    /// Free-text must-criteria, one per line
    #[arg(long)]
    must_text: Option<String>,

    /// Nice-to-have suggestion (name or 1-based index); repeatable
    #[arg(long)]
    nice: Vec<String>,

    /// Free-text nice-to-have criteria, one per line
    #[arg(long)]
    nice_text: Option<String>,

    /// Exclusion suggestion (name or 1-based index); repeatable
    #[arg(long)]
    exclude: Vec<String>,

    /// Free-text exclusions, one per line
    #[arg(long)]
    exclude_text: Option<String>,

    // ── Briefing ───────────────────────────────────────────────
    /// Briefing text
    #[arg(long, conflicts_with_all = ["briefing_file", "stdin"])]
    briefing: Option<String>,

    /// Read the briefing from a file
    #[arg(long, conflicts_with = "stdin")]
    briefing_file: Option<PathBuf>,

    /// Read the briefing from stdin
    #[arg(long)]
    stdin: bool,

    // ── Output ─────────────────────────────────────────────────
    /// Write zettel_prompt.txt into this directory
    #[arg(long)]
    out: Option<PathBuf>,

    /// Copy the prompt to the clipboard
    #[arg(long)]
    copy: bool,

    /// Clipboard command that reads from stdin (default: detected)
    #[arg(long, requires = "copy")]
    clipboard_cmd: Option<String>,

    /// Do not print the prompt to stdout
    #[arg(long)]
    quiet: bool,
}

// ── Helpers ────────────────────────────────────────────────────────

fn init_tracing() {
    let filter = EnvFilter::try_from_env("ZETTEL_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn read_briefing(args: &GenerateArgs) -> Result<Option<String>, String> {
    if let Some(text) = &args.briefing {
        return Ok(Some(text.clone()));
    }
    if let Some(path) = &args.briefing_file {
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read briefing '{}': {e}", path.display()))?;
        return Ok(Some(text));
    }
    if args.stdin {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| format!("failed to read stdin: {e}"))?;
        return Ok(Some(buf));
    }
    Ok(None)
}

/// Defaults, then the preset, then individual flags.
fn build_config(args: &GenerateArgs) -> Result<PromptConfig, String> {
    let mut config = match &args.preset {
        Some(path) => PromptConfig::from_file(path)?,
        None => PromptConfig::default(),
    };

    let overrides = [
        (&args.denkhorizont, &mut config.denkhorizont),
        (&args.ausdrucksmodus, &mut config.ausdrucksmodus),
        (&args.ziel, &mut config.ziel),
        (&args.ausgabe_format, &mut config.ausgabe_format),
        (&args.must_text, &mut config.must_text),
        (&args.nice_text, &mut config.nice_text),
        (&args.exclude_text, &mut config.exclude_text),
    ];
    for (flag, field) in overrides {
        if let Some(value) = flag {
            *field = value.clone();
        }
    }

    let lists = [
        (&args.struktur, &mut config.struktur),
        (&args.must, &mut config.must),
        (&args.nice, &mut config.nice_to_have),
        (&args.exclude, &mut config.exclude),
    ];
    for (flag, field) in lists {
        if !flag.is_empty() {
            *field = flag.clone();
        }
    }

    if let Some(n) = args.laenge_woerter {
        config.laenge_woerter = n;
    }
    if let Some(text) = read_briefing(args)? {
        config.briefing = text;
    }
    Ok(config)
}

fn run_generate(args: &GenerateArgs) -> Result<(), String> {
    let config = build_config(args)?;
    let mut session = Session::with_form(config.build_form_state()?);
    let prompt = session.generate();

    if !args.quiet {
        println!("{prompt}");
    }

    if let Some(dir) = &args.out {
        let path = prompt.download().write_into(dir)?;
        eprintln!("Saved {}", path.display());
    }

    if args.copy {
        let clipboard = match &args.clipboard_cmd {
            Some(cmd) => Some(CommandClipboard::new(cmd.clone())),
            None => CommandClipboard::detect(),
        };
        // Clipboard trouble never invalidates the prompt that was printed or saved.
        match clipboard {
            Some(clipboard) => match clipboard.copy(prompt.as_str()) {
                Ok(()) => eprintln!("Copied to clipboard ({})", clipboard.command()),
                Err(e) => {
                    warn!("clipboard copy failed: {e}");
                    eprintln!("Warning: {e}");
                }
            },
            None => eprintln!("Warning: no clipboard program found, use --clipboard-cmd"),
        }
    }

    Ok(())
}

fn print_option_set(set: &OptionSet, defaults: &[&str]) {
    println!("{}", set.label);
    for (i, option) in set.options.iter().enumerate() {
        let mark = if defaults.contains(option) { "*" } else { " " };
        println!("  {mark} {:>2}. {option}", i + 1);
    }
    println!();
}

fn run_options() {
    for set in &SELECTIONS {
        print_option_set(set, &[set.default_value()]);
    }

    println!("Ziellänge (Wörter)");
    for n in WORD_COUNTS {
        let mark = if n == WordCount::DEFAULT.get() { "*" } else { " " };
        println!("  {mark} {n}");
    }
    println!();

    print_option_set(&STRUKTUR, &DEFAULT_STRUKTUR);
    for set in [&MUST_SUGGESTIONS, &NICE_SUGGESTIONS, &EXCLUDE_SUGGESTIONS] {
        print_option_set(set, &[]);
    }
}

fn run_schema() -> Result<(), String> {
    let schema = serde_json::to_string_pretty(&header_schema())
        .map_err(|e| format!("failed to format schema: {e}"))?;
    println!("{schema}");
    Ok(())
}

fn run_check(file: &Path) -> Result<(), String> {
    let text = std::fs::read_to_string(file)
        .map_err(|e| format!("failed to read '{}': {e}", file.display()))?;
    let report = check_prompt(&text);

    for problem in &report.problems {
        eprintln!("problem: {problem}");
    }
    for warning in &report.warnings {
        eprintln!("warning: {warning}");
    }

    if report.is_ok() {
        eprintln!(
            "{}: ok ({} warning(s))",
            file.display(),
            report.warnings.len()
        );
        Ok(())
    } else {
        Err(format!(
            "{}: {} problem(s)",
            file.display(),
            report.problems.len()
        ))
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    let result = match &cli.command {
        Command::Generate(args) => run_generate(args),
        Command::Options => {
            run_options();
            Ok(())
        }
        Command::Schema => run_schema(),
        Command::Check { file } => run_check(file),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generate_args(argv: &[&str]) -> GenerateArgs {
        let cli = Cli::try_parse_from(argv).unwrap();
        match cli.command {
            Command::Generate(args) => args,
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn flags_override_defaults() {
        let args = generate_args(&[
            "zettel", "generate", "--ziel", "1", "--length", "150", "--struktur", "verweise",
            "--must", "2", "--briefing", "Thema",
        ]);
        let form = build_config(&args).unwrap().build_form_state().unwrap();
        assert_eq!(form.selections.ziel, "Begriff klären");
        assert_eq!(form.selections.laenge_woerter.get(), 150);
        assert_eq!(form.struktur, vec!["verweise"]);
        assert_eq!(form.must_select, vec!["prägnant, keine Füllwörter"]);
        assert_eq!(form.briefing, "Thema");
    }

    #[test]
    fn flags_override_preset() {
        let dir = tempfile::tempdir().unwrap();
        let preset = dir.path().join("preset.json");
        std::fs::write(&preset, r#"{ "ziel": "Analogie entwerfen", "briefing": "aus Datei" }"#)
            .unwrap();
        let preset = preset.to_string_lossy().to_string();

        let args = generate_args(&["zettel", "generate", "--preset", &preset, "--format", "json"]);
        let config = build_config(&args).unwrap();
        assert_eq!(config.ziel, "Analogie entwerfen");
        assert_eq!(config.ausgabe_format, "json");
        assert_eq!(config.briefing, "aus Datei");
    }

    #[test]
    fn briefing_sources_conflict() {
        assert!(Cli::try_parse_from(["zettel", "generate", "--briefing", "a", "--stdin"]).is_err());
    }

    #[test]
    fn clipboard_cmd_requires_copy() {
        assert!(Cli::try_parse_from(["zettel", "generate", "--clipboard-cmd", "cat"]).is_err());
    }

    #[test]
    fn generate_writes_download_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().to_string_lossy().to_string();
        let args = generate_args(&["zettel", "generate", "--quiet", "--out", &out, "--briefing", "x"]);
        run_generate(&args).unwrap();

        let text = std::fs::read_to_string(dir.path().join("zettel_prompt.txt")).unwrap();
        assert!(text.ends_with("[CONTENT_START]\nx\n[CONTENT_END]"));
        assert!(run_check(&dir.path().join("zettel_prompt.txt")).is_ok());
    }

    #[test]
    fn check_fails_on_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kaputt.txt");
        std::fs::write(&path, "kein Prompt").unwrap();
        assert!(run_check(&path).is_err());
    }
}
