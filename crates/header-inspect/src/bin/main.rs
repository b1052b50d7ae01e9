#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::indexing_slicing))]

use clap::Parser;
use header_common::{AccountId, Hash, Header, HeaderExtended, ValidatorSet};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

#[derive(Parser)]
#[command(name = "header-inspect", version = header_common::VERSION)]
#[command(about = "Decodes a SCALE block header, resolves its author and prints it as JSON.", long_about = None)]
struct Args {
    /// Hex-encoded header, with or without a 0x prefix.
    #[arg(required_unless_present = "file", conflicts_with = "file")]
    pub header: Option<String>,

    /// Read the hex-encoded header from a file. Whitespace is ignored.
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Validator account id in hex. Repeat in validator set order.
    #[arg(long = "validator")]
    pub validators: Vec<AccountId>,

    /// JSON file holding an array of hex account ids, appended after any
    /// --validator arguments.
    #[arg(long = "validators")]
    pub validators_file: Option<PathBuf>,

    /// Print JSON on a single line.
    #[arg(long, default_value_t = false)]
    pub compact: bool,

    /// Enable verbose logging.
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    /// Disable colored output.
    #[arg(long, default_value_t = false)]
    pub no_color: bool,
}

/// Printed output: the block hash followed by the header and its author.
#[derive(Serialize)]
struct Report {
    hash: Hash,
    #[serde(flatten)]
    header: HeaderExtended,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    init_tracing(&args)?;

    let report = run(&args)?;
    let json = if args.compact {
        serde_json::to_string(&report)?
    } else {
        serde_json::to_string_pretty(&report)?
    };
    println!("{json}");

    Ok(())
}

fn run(args: &Args) -> Result<Report, Box<dyn std::error::Error>> {
    let header_hex = match (&args.header, &args.file) {
        (_, Some(path)) => fs::read_to_string(path)?,
        (Some(hex), None) => hex.clone(),
        (None, None) => return Err("no header given".into()),
    };
    let header = Header::from_hex(&strip_whitespace(&header_hex))?;
    let hash = header.hash();
    info!(number = header.number(), hash = ?hash, "Decoded header");

    let validators = load_validators(args)?;
    debug!(count = validators.len(), "Loaded validator set");

    Ok(Report {
        hash,
        header: HeaderExtended::new(header, &validators),
    })
}

fn load_validators(args: &Args) -> Result<ValidatorSet, Box<dyn std::error::Error>> {
    let mut validators = args.validators.clone();
    if let Some(path) = &args.validators_file {
        let from_file: Vec<AccountId> = serde_json::from_str(&fs::read_to_string(path)?)?;
        validators.extend(from_file);
    }
    Ok(ValidatorSet::new(validators))
}

fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

fn init_tracing(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let level = match args.log_level.as_str() {
        "error" => tracing::Level::ERROR,
        "warn" => tracing::Level::WARN,
        "info" => tracing::Level::INFO,
        "debug" => tracing::Level::DEBUG,
        "trace" => tracing::Level::TRACE,
        _ => {
            eprintln!(
                "Invalid log level: {}. Using 'warn' as default.",
                args.log_level
            );
            tracing::Level::WARN
        }
    };

    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let use_ansi = std::io::IsTerminal::is_terminal(&std::io::stderr()) && !args.no_color;

    // Logs go to stderr, stdout carries the JSON
    let subscriber = Registry::default().with(env_filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_level(true)
            .with_target(true)
            .with_thread_ids(args.verbose)
            .with_thread_names(args.verbose)
            .with_ansi(use_ansi)
            .with_file(args.verbose)
            .with_line_number(args.verbose)
            .with_timer(ChronoUtc::rfc_3339()),
    );

    subscriber.try_init()?;

    Ok(())
}
