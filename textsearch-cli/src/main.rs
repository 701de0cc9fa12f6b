mod console;
mod report;
mod session;

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use textsearch::{EncodingMode, Settings, SettingsOverrides, SettingsSources, UnreadablePolicy};
use tracing_subscriber::EnvFilter;

use console::Console;
use session::SessionOptions;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file layered over the default locations
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Root directory used when the path prompt is left blank
    #[arg(short = 'd', long)]
    default_path: Option<PathBuf>,

    /// Number of threads to scan files with (0 for one per CPU)
    #[arg(short = 'j', long)]
    threads: Option<usize>,

    /// How to handle invalid UTF-8 sequences (lossy|failfast)
    #[arg(long)]
    encoding: Option<String>,

    /// What to do with files that cannot be read (abort|skip)
    #[arg(long)]
    on_unreadable: Option<String>,

    /// Exit on the first failed search instead of prompting again
    #[arg(long)]
    exit_on_error: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Do not clear the screen between searches
    #[arg(long)]
    no_clear: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if cli.no_color {
        colored::control::set_override(false);
    }

    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout(), !cli.no_clear);

    match run(&cli, &mut console) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let _ = console.error(&format!("Error: {:#}", e), true);
            ExitCode::FAILURE
        }
    }
}

fn run<R: io::BufRead, W: io::Write>(cli: &Cli, console: &mut Console<R, W>) -> Result<()> {
    let overrides = SettingsOverrides {
        default_path: cli.default_path.clone(),
        log_level: cli.log_level.clone(),
        thread_count: cli.threads,
        encoding_mode: cli.encoding.as_deref().map(parse_encoding).transpose()?,
        unreadable_policy: cli
            .on_unreadable
            .as_deref()
            .map(parse_unreadable_policy)
            .transpose()?,
    };

    let sources = SettingsSources::default();
    let settings = Settings::load_with(&sources, cli.config.as_deref())
        .context("Failed to load settings")?
        .merge_with_cli(&overrides);
    init_logging(&settings.log_level);

    let options = SessionOptions {
        sources,
        config_path: cli.config.clone(),
        overrides,
        exit_on_error: cli.exit_on_error,
    };
    session::run(console, &options)
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn parse_encoding(value: &str) -> Result<EncodingMode> {
    match value.to_lowercase().as_str() {
        "failfast" => Ok(EncodingMode::FailFast),
        "lossy" => Ok(EncodingMode::Lossy),
        other => bail!("Unknown encoding mode '{}' (expected failfast or lossy)", other),
    }
}

fn parse_unreadable_policy(value: &str) -> Result<UnreadablePolicy> {
    match value.to_lowercase().as_str() {
        "abort" => Ok(UnreadablePolicy::Abort),
        "skip" => Ok(UnreadablePolicy::Skip),
        other => bail!("Unknown unreadable policy '{}' (expected abort or skip)", other),
    }
}
