//! a rabe-bench console application.
//!
//! `rabe-bench bench` sweeps the configured schemes and curves and writes one
//! result artifact per pair, `rabe-bench plot` turns the artifacts into charts.
use std::{num::NonZeroUsize, path::PathBuf, process::ExitCode};
use clap::{
    crate_authors, crate_description, crate_version, value_parser, Arg, ArgAction, ArgMatches, Command,
};
use rabe_bench::{
    config::BenchConfig,
    error::BenchError,
    orchestrator::Sweep,
    render::{load_all, render, RenderOptions},
    store::ResultStore,
};
use tracing::{error, info, warn, Level};

// Application commands
const CMD_BENCH: &str = "bench";
const CMD_PLOT: &str = "plot";

// Argument names
const VERBOSE: &str = "verbose";
const CONFIG: &str = "config";
const SCHEME: &str = "scheme";
const CURVE: &str = "curve";
const MAX_ATTRIBUTES: &str = "max-attributes";
const ITERATIONS: &str = "iterations";
const OUT: &str = "out";
const DIR: &str = "dir";
const PREFIX: &str = "prefix";

fn selection_args() -> [Arg; 3] {
    [
        Arg::new(CONFIG)
            .long(CONFIG)
            .help("JSON configuration file.")
            .value_parser(value_parser!(PathBuf)),
        Arg::new(SCHEME)
            .long(SCHEME)
            .action(ArgAction::Append)
            .help("scheme(s) to use, replaces the configured list."),
        Arg::new(CURVE)
            .long(CURVE)
            .action(ArgAction::Append)
            .help("curve(s) to use, replaces the configured list."),
    ]
}

fn app() -> Command {
    Command::new("rabe-bench")
        .version(crate_version!())
        .author(crate_authors!("\n"))
        .about(crate_description!())
        .subcommand_required(true)
        .arg(
            Arg::new(VERBOSE)
                .short('v')
                .long(VERBOSE)
                .action(ArgAction::Count)
                .global(true)
                .help("more log output, repeat for trace output."),
        )
        .subcommand(
            Command::new(CMD_BENCH)
                .about("measures setup, keygen, encrypt and decrypt of every scheme on every curve.")
                .args(selection_args())
                .arg(
                    Arg::new(MAX_ATTRIBUTES)
                        .long(MAX_ATTRIBUTES)
                        .help("largest attribute count of the sweep.")
                        .value_parser(value_parser!(NonZeroUsize)),
                )
                .arg(
                    Arg::new(ITERATIONS)
                        .long(ITERATIONS)
                        .help("timed calls per operation.")
                        .value_parser(value_parser!(NonZeroUsize)),
                )
                .arg(
                    Arg::new(OUT)
                        .long(OUT)
                        .help("directory for the result artifacts.")
                        .value_parser(value_parser!(PathBuf)),
                ),
        )
        .subcommand(
            Command::new(CMD_PLOT)
                .about("renders comparison charts from the result artifacts.")
                .args(selection_args())
                .arg(
                    Arg::new(DIR)
                        .long(DIR)
                        .help("directory holding the result artifacts.")
                        .value_parser(value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new(OUT)
                        .long(OUT)
                        .help("directory for the charts, defaults to the artifact directory.")
                        .value_parser(value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new(PREFIX)
                        .long(PREFIX)
                        .default_value("cp-abe")
                        .help("file name prefix of the charts."),
                ),
        )
}

/// The configuration file (or the defaults) with the selection flags applied.
fn load_config(matches: &ArgMatches) -> Result<BenchConfig, BenchError> {
    let mut config = match matches.get_one::<PathBuf>(CONFIG) {
        Some(path) => BenchConfig::from_file(path)?,
        None => BenchConfig::default(),
    };
    if let Some(schemes) = matches.get_many::<String>(SCHEME) {
        config.schemes = schemes.cloned().collect();
    }
    if let Some(curves) = matches.get_many::<String>(CURVE) {
        config.curves = curves.cloned().collect();
    }
    config.validate()?;
    Ok(config)
}

fn run_bench(matches: &ArgMatches) -> Result<bool, BenchError> {
    let mut config = load_config(matches)?;
    if let Some(max_attributes) = matches.get_one::<NonZeroUsize>(MAX_ATTRIBUTES) {
        config.max_attributes = *max_attributes;
    }
    if let Some(iterations) = matches.get_one::<NonZeroUsize>(ITERATIONS) {
        config.iterations = *iterations;
    }
    if let Some(out) = matches.get_one::<PathBuf>(OUT) {
        config.output_dir = out.clone();
    }
    info!(
        max_attributes = config.max_attributes.get(),
        iterations = config.iterations.get(),
        schemes = ?config.schemes,
        curves = ?config.curves,
        "starting sweep"
    );
    let summary = Sweep::new(&config).run();
    for (key, e) in summary.failed.iter() {
        error!(%key, error = %e, "pair failed");
    }
    if !summary.mismatches.is_empty() {
        warn!(count = summary.mismatches.len(), "correctness mismatches were recorded");
    }
    info!(written = summary.written.len(), failed = summary.failed.len(), "sweep finished");
    Ok(summary.is_success())
}

fn run_plot(matches: &ArgMatches) -> Result<(), BenchError> {
    let config = load_config(matches)?;
    let dir = matches
        .get_one::<PathBuf>(DIR)
        .cloned()
        .unwrap_or_else(|| config.output_dir.clone());
    let options = RenderOptions {
        prefix: matches
            .get_one::<String>(PREFIX)
            .cloned()
            .unwrap_or_else(|| RenderOptions::default().prefix),
        output_dir: matches.get_one::<PathBuf>(OUT).cloned().unwrap_or_else(|| dir.clone()),
        ..RenderOptions::default()
    };
    let store = ResultStore::new(dir);
    let results = load_all(&store, &config.schemes, &config.curves);
    let written = render(&results, &config.schemes, &config.curves, &options)?;
    info!(charts = written.len(), skipped = results.skipped.len(), "plotting finished");
    Ok(())
}

fn main() -> ExitCode {
    let matches = app().get_matches();

    let level = match matches.get_count(VERBOSE) {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    let outcome = match matches.subcommand() {
        Some((CMD_BENCH, matches)) => run_bench(matches),
        Some((CMD_PLOT, matches)) => run_plot(matches).map(|_| true),
        _ => Ok(false),
    };
    match outcome {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!(error = %e, "aborted");
            ExitCode::FAILURE
        }
    }
}
