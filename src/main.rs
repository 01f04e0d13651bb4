//! # kubeyaml CLI entry point
//!
//! Reads one manifest from stdin (or `--file`), validates it against every
//! configured Kubernetes version and prints the findings.
//!
//! Exit codes: 0 when every version accepts the document, 1 otherwise.

use std::io::{Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, bail};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use kubeyaml::serialize::serialize_load_error;
use kubeyaml::version::split_versions;
use kubeyaml::{Config, DirectorySource, OutputFormat, Orchestrator, load_document, load_stores};

/// Validate a Kubernetes manifest against several Kubernetes versions.
#[derive(Parser, Debug)]
#[command(name = "kubeyaml", version, about, long_about = None)]
struct Cli {
    /// Comma-separated list of Kubernetes versions to validate against.
    #[arg(long)]
    versions: Option<String>,

    /// Directory holding `swagger-<version>.json` schema documents.
    #[arg(long)]
    schema_dir: Option<PathBuf>,

    /// Path to a YAML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Read the manifest from this file instead of stdin.
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Output format: text, json or yaml.
    #[arg(short, long, default_value = "text")]
    output: OutputFormat,

    /// Print nothing; only the exit code reports the outcome.
    #[arg(long)]
    silent: bool,

    /// Validate versions concurrently.
    #[arg(long)]
    parallel: bool,

    /// Enable verbose logging. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_level(cli.silent, cli.verbose)))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(&cli, &mut std::io::stdout().lock()) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

/// `--silent` wins over any `-v`.
fn log_level(silent: bool, verbose: u8) -> &'static str {
    match (silent, verbose) {
        (true, _) => "off",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    }
}

/// Validate the manifest and write the report to `out`. Returns the exit
/// code: 0 only when every configured version was evaluated and valid.
fn run<W: Write>(cli: &Cli, out: &mut W) -> anyhow::Result<u8> {
    let config = resolve_config(cli)?;
    tracing::debug!(?config, "resolved configuration");

    let input = read_input(cli.file.as_deref())?;

    let doc = match load_document(&input) {
        Ok(doc) => doc,
        Err(e) => {
            tracing::info!(error = %e, "document failed to load");
            if !cli.silent {
                write!(out, "{}", serialize_load_error(&e, cli.output)?)?;
            }
            return Ok(1);
        }
    };

    let source = DirectorySource::new(&config.schema_dir);
    let loaded = load_stores(&source, &config.versions);
    if loaded.stores.is_empty() {
        bail!(
            "no schema could be loaded from {} for versions {}",
            config.schema_dir.display(),
            config.versions.join(",")
        );
    }

    let orchestrator = Orchestrator::new(config.keyer(), loaded.stores).parallel(config.parallel);
    let report = orchestrator
        .validate(&doc)
        .with_unavailable(&config.versions, &loaded.failures);

    tracing::info!(
        kind = %doc.kind,
        api_version = %doc.api_version,
        valid = ?report.valid_versions(),
        failing = ?report.failing_versions(),
        not_evaluated = ?report.not_evaluated_versions(),
        "validation finished"
    );

    if !cli.silent {
        write!(out, "{}", kubeyaml::serialize_report(&report, cli.output)?)?;
    }

    Ok(if report.all_valid() { 0 } else { 1 })
}

/// Defaults, then the config file, then environment, then flags.
fn resolve_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    }
    .apply_env()?;

    if let Some(versions) = &cli.versions {
        config.versions = split_versions(versions);
    }
    if let Some(dir) = &cli.schema_dir {
        config.schema_dir = dir.clone();
    }
    if cli.parallel {
        config.parallel = true;
    }
    Ok(config.validated()?)
}

fn read_input(file: Option<&std::path::Path>) -> anyhow::Result<Vec<u8>> {
    match file {
        Some(path) => {
            std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))
        }
        None => {
            let mut buf = Vec::new();
            std::io::stdin()
                .read_to_end(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}
