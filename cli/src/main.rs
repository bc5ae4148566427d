//! augur CLI - reading response normalization tool

use std::collections::HashSet;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use log::Level;

use augur::{
    accept, fallback_reading, normalize_batch, normalize_with_options, Document, JsonFormat,
    NormalizeOptions, ReadingKind, RenderOptions, Subject, TarotCard, TarotSpread,
};

#[derive(Parser)]
#[command(name = "augur")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Normalize generated reading responses to Markdown, text, and JSON", long_about = None)]
struct Cli {
    /// Input response file ("-" for stdin)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize a response and render it
    #[command(alias = "n")]
    Normalize {
        /// Input response file ("-" for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "markdown")]
        format: Format,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Include YAML frontmatter in Markdown
        #[arg(long)]
        frontmatter: bool,

        /// Vocabulary for section titles and keywords
        #[arg(long, value_enum, default_value = "vi")]
        locale: LocaleArg,

        /// Print pipeline diagnostics to stderr
        #[arg(short, long)]
        diagnostics: bool,
    },

    /// Check whether a response is an acceptable reading
    Check {
        /// Input response file ("-" for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Requested reading kind
        #[arg(short, long, value_enum)]
        kind: KindArg,

        #[command(flatten)]
        subject: SubjectArgs,

        /// Print a fallback reading instead of failing
        #[arg(long)]
        fallback: bool,
    },

    /// Print the fallback reading for a subject
    Fallback {
        /// Requested reading kind
        #[arg(short, long, value_enum)]
        kind: KindArg,

        #[command(flatten)]
        subject: SubjectArgs,
    },

    /// Normalize many responses into a directory
    Batch {
        /// Input response files
        #[arg(value_name = "FILES", required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "markdown")]
        format: Format,

        /// Vocabulary for section titles and keywords
        #[arg(long, value_enum, default_value = "vi")]
        locale: LocaleArg,
    },

    /// Show version information
    Version,
}

/// Who the fallback reading is about
#[derive(Args)]
struct SubjectArgs {
    /// Subject name
    #[arg(long)]
    name: Option<String>,

    /// Subject birth date (dd/mm/yyyy)
    #[arg(long)]
    birth_date: Option<String>,

    /// Question asked of the cards
    #[arg(long)]
    question: Option<String>,

    /// Drawn card as "NAME|NAME_VI|MEANING", in position order
    #[arg(long = "card", value_name = "CARD", value_parser = parse_card)]
    cards: Vec<TarotCard>,

    /// Three-card spread layout (a to h)
    #[arg(long, value_parser = parse_spread, default_value = "a")]
    spread: TarotSpread,
}

impl From<SubjectArgs> for Subject {
    fn from(args: SubjectArgs) -> Self {
        let mut subject = Subject::new().with_spread(args.spread);
        if let Some(name) = args.name {
            subject = subject.with_name(name);
        }
        if let Some(birth_date) = args.birth_date {
            subject = subject.with_birth_date(birth_date);
        }
        if let Some(question) = args.question {
            subject = subject.with_question(question);
        }
        args.cards
            .into_iter()
            .fold(subject, |subject, card| subject.with_card(card))
    }
}

fn parse_card(value: &str) -> Result<TarotCard, String> {
    let parts: Vec<&str> = value.split('|').map(str::trim).collect();
    match parts.as_slice() {
        [name, name_vi, meaning] if !name.is_empty() && !name_vi.is_empty() => {
            Ok(TarotCard::new(*name, *name_vi, *meaning))
        }
        _ => Err(format!("expected NAME|NAME_VI|MEANING, got '{}'", value)),
    }
}

fn parse_spread(value: &str) -> Result<TarotSpread, String> {
    TarotSpread::from_code(value)
        .ok_or_else(|| format!("unknown spread '{}', expected a to h", value))
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Markdown with callouts for notes
    Markdown,
    /// Plain text
    Text,
    /// Normalized document as JSON
    Json,
    /// Rebuilt upstream JSON (structured responses only)
    Source,
}

impl Format {
    fn extension(self) -> &'static str {
        match self {
            Format::Markdown => "md",
            Format::Text => "txt",
            Format::Json | Format::Source => "json",
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum LocaleArg {
    /// Vietnamese
    Vi,
    /// English
    En,
}

impl From<LocaleArg> for augur::Locale {
    fn from(locale: LocaleArg) -> Self {
        match locale {
            LocaleArg::Vi => augur::Locale::Vietnamese,
            LocaleArg::En => augur::Locale::English,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum KindArg {
    /// Basic reading
    Basic,
    /// Detailed reading
    Detailed,
    /// Numerology reading
    Numerology,
    /// Single tarot card
    TarotSingleCard,
    /// Three tarot cards
    TarotThreeCards,
}

impl From<KindArg> for ReadingKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Basic => ReadingKind::Basic,
            KindArg::Detailed => ReadingKind::Detailed,
            KindArg::Numerology => ReadingKind::Numerology,
            KindArg::TarotSingleCard => ReadingKind::TarotSingleCard,
            KindArg::TarotThreeCards => ReadingKind::TarotThreeCards,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Normalize {
            input,
            output,
            format,
            compact,
            frontmatter,
            locale,
            diagnostics,
        }) => cmd_normalize(
            &input,
            output.as_deref(),
            format,
            compact,
            frontmatter,
            locale,
            diagnostics,
        ),
        Some(Commands::Check {
            input,
            kind,
            subject,
            fallback,
        }) => cmd_check(&input, kind, subject.into(), fallback),
        Some(Commands::Fallback { kind, subject }) => {
            println!("{}", fallback_reading(kind.into(), &subject.into()));
            Ok(())
        }
        Some(Commands::Batch {
            inputs,
            output,
            format,
            locale,
        }) => cmd_batch(&inputs, &output, format, locale),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: print Markdown if input is provided
            if let Some(input) = cli.input {
                cmd_normalize(
                    &input,
                    None,
                    Format::Markdown,
                    false,
                    false,
                    LocaleArg::Vi,
                    false,
                )
            } else {
                println!("{}", "Usage: augur <FILE>".yellow());
                println!("       augur --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn read_input(input: &Path) -> std::io::Result<String> {
    let data = if input == Path::new("-") {
        let mut data = Vec::new();
        std::io::stdin().read_to_end(&mut data)?;
        data
    } else {
        fs::read(input)?
    };
    Ok(String::from_utf8_lossy(&data).into_owned())
}

fn render(
    doc: &Document,
    format: Format,
    compact: bool,
    render_options: &RenderOptions,
) -> augur::Result<String> {
    let json_format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    match format {
        Format::Markdown => augur::render::to_markdown(doc, render_options),
        Format::Text => augur::render::to_text(doc, render_options),
        Format::Json => augur::render::to_json(doc, json_format),
        Format::Source => augur::render::to_source_json(doc, json_format),
    }
}

fn write_output(output: Option<&Path>, content: &str) -> std::io::Result<()> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_normalize(
    input: &Path,
    output: Option<&Path>,
    format: Format,
    compact: bool,
    frontmatter: bool,
    locale: LocaleArg,
    show_diagnostics: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let raw = read_input(input)?;
    let options = NormalizeOptions::new().with_locale(locale.into());
    let normalized = normalize_with_options(&raw, &options);
    normalized.diagnostics.emit();

    if show_diagnostics {
        for event in &normalized.diagnostics {
            let label = match event.level {
                Level::Error | Level::Warn => event.stage.as_str().yellow(),
                _ => event.stage.as_str().dimmed(),
            };
            eprintln!("{} {}", label, event.message);
        }
        eprintln!(
            "{} {} ({} sections)",
            "origin".cyan(),
            normalized.document.origin(),
            normalized.document.len()
        );
    }

    let render_options = RenderOptions::new().with_frontmatter(frontmatter);
    let content = render(&normalized.document, format, compact, &render_options)?;
    write_output(output, &content)?;

    Ok(())
}

fn cmd_check(
    input: &Path,
    kind: KindArg,
    subject: Subject,
    fallback: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let raw = read_input(input)?;

    let kind = ReadingKind::from(kind);
    match accept(&raw, kind) {
        Ok(accepted) => {
            eprintln!("{}", "Accepted".green().bold());
            if kind.expects_json() {
                let value: serde_json::Value = serde_json::from_str(&accepted)?;
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                println!("{}", accepted);
            }
            Ok(())
        }
        Err(rejection) if fallback => {
            eprintln!("{} {}", "Rejected:".yellow().bold(), rejection);
            println!("{}", fallback_reading(kind, &subject));
            Ok(())
        }
        Err(rejection) => Err(rejection.into()),
    }
}

fn cmd_batch(
    inputs: &[PathBuf],
    output_dir: &Path,
    format: Format,
    locale: LocaleArg,
) -> Result<(), Box<dyn std::error::Error>> {
    fs::create_dir_all(output_dir)?;

    let pb = ProgressBar::new(inputs.len() as u64 * 2);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    pb.set_message("Reading responses...");
    let mut raws = Vec::with_capacity(inputs.len());
    for input in inputs {
        raws.push(read_input(input)?);
        pb.inc(1);
    }

    pb.set_message("Normalizing...");
    let options = NormalizeOptions::new().with_locale(locale.into());
    let docs = normalize_batch(&raws, &options);

    let render_options = RenderOptions::new();
    let mut written = Vec::with_capacity(docs.len());
    let mut used = HashSet::with_capacity(docs.len());
    let mut skipped = 0usize;
    for (input, doc) in inputs.iter().zip(&docs) {
        let filename = output_name(input, format, &mut used);
        pb.set_message(filename.clone());

        match render(doc, format, false, &render_options) {
            Ok(content) => {
                fs::write(output_dir.join(&filename), content)?;
                written.push((filename, doc.origin()));
            }
            Err(augur::Error::NotStructured) => {
                log::warn!("{} is not structured, skipped", input.display());
                skipped += 1;
            }
            Err(e) => return Err(e.into()),
        }
        pb.inc(1);
    }

    pb.finish_with_message("Done!");

    println!("\n{}", "Output files:".green().bold());
    for (i, (filename, origin)) in written.iter().enumerate() {
        let branch = if i + 1 == written.len() { "└─" } else { "├─" };
        let origin = format!("({})", origin);
        println!("  {} {} {}", branch.dimmed(), filename, origin.as_str().dimmed());
    }
    if skipped > 0 {
        println!("{} {} prose responses skipped", "Note:".yellow(), skipped);
    }

    Ok(())
}

/// Output file name for an input, suffixed `-2`, `-3`, ... when the stem was
/// already used in this run.
fn output_name(input: &Path, format: Format, used: &mut HashSet<String>) -> String {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    let mut filename = format!("{}.{}", stem, format.extension());
    let mut n = 2;
    while !used.insert(filename.clone()) {
        filename = format!("{}-{}.{}", stem, n, format.extension());
        n += 1;
    }
    filename
}

fn cmd_version() {
    println!("{} {}", "augur".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Reading response normalization tool");
    println!();
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_input_replaces_invalid_utf8() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[b'o', b'k', 0xFF]).unwrap();
        assert_eq!(read_input(file.path()).unwrap(), "ok\u{FFFD}");
    }

    #[test]
    fn test_render_source_rejects_prose() {
        let doc = augur::normalize("## A\nfoo");
        let result = render(&doc, Format::Source, false, &RenderOptions::default());
        assert!(matches!(result, Err(augur::Error::NotStructured)));
    }

    #[test]
    fn test_batch_writes_files() {
        let input_dir = tempfile::tempdir().unwrap();
        let output_dir = tempfile::tempdir().unwrap();
        let input = input_dir.path().join("reading.txt");
        fs::write(&input, r#"{"tongQuan": "x", "diemNoiBat": "y"}"#).unwrap();

        cmd_batch(&[input], output_dir.path(), Format::Markdown, LocaleArg::Vi).unwrap();

        let written = fs::read_to_string(output_dir.path().join("reading.md")).unwrap();
        assert!(written.starts_with("## Tổng Quan"));
    }

    #[test]
    fn test_batch_keeps_inputs_with_same_stem() {
        let input_dir = tempfile::tempdir().unwrap();
        let output_dir = tempfile::tempdir().unwrap();
        let first = input_dir.path().join("a").join("reading.txt");
        let second = input_dir.path().join("b").join("reading.txt");
        fs::create_dir_all(first.parent().unwrap()).unwrap();
        fs::create_dir_all(second.parent().unwrap()).unwrap();
        fs::write(&first, r#"{"tongQuan": "một", "diemNoiBat": "x"}"#).unwrap();
        fs::write(&second, r#"{"tongQuan": "hai", "diemNoiBat": "y"}"#).unwrap();

        cmd_batch(&[first, second], output_dir.path(), Format::Markdown, LocaleArg::Vi).unwrap();

        let a = fs::read_to_string(output_dir.path().join("reading.md")).unwrap();
        let b = fs::read_to_string(output_dir.path().join("reading-2.md")).unwrap();
        assert!(a.contains("một"));
        assert!(b.contains("hai"));
    }

    #[test]
    fn test_output_name_suffixes() {
        let mut used = HashSet::new();
        let names: Vec<String> = ["x/r.txt", "y/r.txt", "z/r.txt", "r-2.txt"]
            .iter()
            .map(|p| output_name(Path::new(p), Format::Text, &mut used))
            .collect();
        assert_eq!(names, vec!["r.txt", "r-2.txt", "r-3.txt", "r-2-2.txt"]);
    }

    #[test]
    fn test_parse_card() {
        let card = parse_card("The Sun|Mặt Trời|Niềm vui").unwrap();
        assert_eq!(card, TarotCard::new("The Sun", "Mặt Trời", "Niềm vui"));
        assert!(parse_card("The Sun").is_err());
        assert!(parse_card("|Mặt Trời|x").is_err());
    }

    #[test]
    fn test_subject_args() {
        let cli = Cli::parse_from([
            "augur",
            "fallback",
            "--kind",
            "tarot-three-cards",
            "--question",
            "Công việc?",
            "--card",
            "The Sun|Mặt Trời|Niềm vui",
            "--spread",
            "c",
        ]);
        let Some(Commands::Fallback { kind, subject }) = cli.command else {
            panic!("expected fallback command");
        };
        assert!(kind == KindArg::TarotThreeCards);
        let subject = Subject::from(subject);
        assert_eq!(subject.question.as_deref(), Some("Công việc?"));
        assert_eq!(subject.cards.len(), 1);
        assert_eq!(subject.spread, TarotSpread::C);
        assert_eq!(subject.name, None);
    }

    #[test]
    fn test_format_extension() {
        assert_eq!(Format::Markdown.extension(), "md");
        assert_eq!(Format::Source.extension(), "json");
    }
}
