use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use dupscout::{
    check_batch,
    config::{ConfigOverrides, DetectorConfig},
    normalize::normalize_with_map,
    render::PairMarkup,
    results::{AuxTable, BatchReport, PairRecord, PairStatus, Role, Span},
    search::{Algorithm, Fidelity},
    validation::prepare_sentences,
    DupError,
};
use std::io::Read;
use std::{fs, num::NonZeroUsize, path::PathBuf};
use tracing_subscriber::EnvFilter;

type Result<T> = std::result::Result<T, DupError>;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Yaml,
}

#[derive(Parser)]
struct CliCheckConfig {
    /// Sentences to compare (reads --file or stdin when omitted)
    #[arg(conflicts_with = "file")]
    sentences: Vec<String>,

    /// File with one sentence per line
    #[arg(short = 'f', long)]
    file: Option<PathBuf>,

    /// Search algorithm (naive|kmp|bm)
    #[arg(short = 'a', long)]
    algorithm: Option<Algorithm>,

    /// Fidelity (fast|trace)
    #[arg(short = 'm', long = "mode")]
    fidelity: Option<Fidelity>,

    /// Trace steps before a traced search is cut off
    #[arg(long)]
    step_budget: Option<usize>,

    /// Number of threads to use
    #[arg(short = 'j', long)]
    threads: Option<NonZeroUsize>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Render sentences as HTML with <mark> around the evidence
    #[arg(long)]
    html: bool,

    /// Show only the summary, not individual pairs
    #[arg(short, long)]
    stats: bool,

    /// Configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check all pairs of sentences for duplicates
    Check(Box<CliCheckConfig>),

    /// Show the normalized form of sentences
    Normalize {
        /// Sentences to normalize
        #[arg(required = true)]
        sentences: Vec<String>,

        /// Also print the position map into the original
        #[arg(long)]
        map: bool,
    },

    /// List the available algorithms
    Algorithms,
}

// Exit code for input rejected by validation; other failures exit with 1
const EXIT_INVALID_INPUT: i32 = 3;

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {}", "error:".red().bold(), e);
        let code = if e.is_validation() {
            EXIT_INVALID_INPUT
        } else {
            1
        };
        std::process::exit(code);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check(args) => {
            let config = DetectorConfig::load_from(args.config.as_deref())?.merge_with_cli(
                ConfigOverrides {
                    algorithm: args.algorithm,
                    fidelity: args.fidelity,
                    step_budget: args.step_budget,
                    thread_count: args.threads,
                    log_level: args.log_level.clone(),
                },
            );
            config.validate()?;
            init_logging(&config.log_level);

            let raw = read_sentences(&args)?;
            let sentences = prepare_sentences(&raw, &config)?;
            let report = check_batch(&sentences, config.algorithm, config.fidelity, &config);

            match args.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
                OutputFormat::Yaml => print!("{}", serde_yaml::to_string(&report)?),
                OutputFormat::Text => print_report(&report, args.stats, args.html),
            }
            Ok(())
        }
        Commands::Normalize { sentences, map } => {
            for sentence in &sentences {
                let normalized = normalize_with_map(sentence);
                println!("{}", normalized.text);
                if map {
                    println!("  map: {:?}", normalized.map);
                }
            }
            Ok(())
        }
        Commands::Algorithms => {
            for algorithm in Algorithm::ALL {
                println!("{} - {}", algorithm.name().green(), algorithm.label().bold());
                println!("  {}", algorithm.explain());
            }
            Ok(())
        }
    }
}

fn init_logging(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    // a subscriber may already be installed when embedded
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn read_sentences(args: &CliCheckConfig) -> Result<Vec<String>> {
    if !args.sentences.is_empty() {
        return Ok(args.sentences.clone());
    }
    let content = match &args.file {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };
    Ok(content.lines().map(str::to_string).collect())
}

fn highlight_terminal(original: &str, span: Span) -> String {
    let (start, end) = (span.start.min(original.len()), span.end.min(original.len()));
    match (
        original.get(..start),
        original.get(start..end),
        original.get(end..),
    ) {
        (Some(left), Some(mid), Some(right)) if start < end => {
            format!("{}{}{}", left, mid.black().on_yellow(), right)
        }
        _ => original.to_string(),
    }
}

fn marked_sentences(record: &PairRecord, html: bool) -> (String, String) {
    if html {
        let markup = PairMarkup::for_record(record);
        return (markup.a, markup.b);
    }
    let outcome = &record.outcome;
    match (outcome.highlight, outcome.text_source) {
        (Some(h), Role::A) => (
            highlight_terminal(&record.a, h.text),
            highlight_terminal(&record.b, h.pattern),
        ),
        (Some(h), Role::B) => (
            highlight_terminal(&record.a, h.pattern),
            highlight_terminal(&record.b, h.text),
        ),
        (None, _) => (record.a.clone(), record.b.clone()),
    }
}

fn print_record(record: &PairRecord, html: bool) {
    let outcome = &record.outcome;
    let status = match record.status {
        PairStatus::Duplicate => record.status.label().red().bold(),
        PairStatus::NotDuplicate => record.status.label().green(),
        PairStatus::TraceTruncated => record.status.label().yellow(),
    };
    println!(
        "\n{} {}",
        format!("Pair {} x {}:", record.first, record.second).blue(),
        status
    );

    let (a, b) = marked_sentences(record, html);
    println!("  A: {}", a);
    println!("  B: {}", b);
    println!(
        "  TEXT = {}, PATTERN = {} | {} | {} comparisons | {:.3} ms",
        outcome.text_source,
        outcome.pattern_source,
        outcome.run.outcome,
        outcome.run.comparisons,
        outcome.elapsed.as_secs_f64() * 1000.0
    );
    if !outcome.matched_normalized.is_empty() {
        println!("  Match (normalized): {}", outcome.matched_normalized);
    }
    match &outcome.run.table {
        AuxTable::Lps(lps) => println!("  LPS table: {:?}", lps),
        AuxTable::LastOccurrence(last) => println!("  Last occurrence table: {:?}", last),
        AuxTable::None => {}
    }
    if let Some(trace) = &outcome.run.trace {
        for line in trace {
            println!("    {}", line.dimmed());
        }
    }
}

fn print_report(report: &BatchReport, stats_only: bool, html: bool) {
    if !stats_only {
        for record in &report.records {
            print_record(record, html);
        }
    }

    println!(
        "\n{} with {} ({}): {} duplicate and {} non-duplicate pairs out of {} ({} sentences)",
        "Summary".bold(),
        report.algorithm.label(),
        report.fidelity,
        report.duplicate_count,
        report.non_duplicate_count,
        report.total_pairs,
        report.sentence_count
    );
    if report.truncated_count > 0 {
        println!(
            "{} traces were too long to display in full",
            report.truncated_count
        );
    }
    println!(
        "Search time: {} total, {} per pair",
        humantime::format_duration(report.total_elapsed),
        humantime::format_duration(report.average_elapsed)
    );
}
