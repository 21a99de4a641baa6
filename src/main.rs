#![forbid(unsafe_code)]

mod cli;
mod color;
mod config;
mod constants;
mod eraser;
mod error;
mod font;
mod keyfile;
mod migrate;
mod report;
mod store;
mod validate;

use anyhow::{Context, Result};
use clap::Parser;
use std::process::ExitCode;
use tracing::{debug, Level as TraceLevel};
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Command, SaveArgs};
use config::{Section, ZeroPolicy};
use migrate::ConfigPaths;
use report::SectionReport;
use store::{DefaultOutcome, SectionStore};
use validate::ValidationReport;

fn open_store(cli: &Cli) -> SectionStore {
    let path = match &cli.file {
        Some(path) => path.clone(),
        None => {
            let paths = ConfigPaths::resolve();
            paths.migrate();
            paths.current
        }
    };
    let policy = if cli.zero_as_absent {
        ZeroPolicy::TreatZeroAsAbsent
    } else {
        ZeroPolicy::Explicit
    };
    debug!(path = %path.display(), ?policy, "Using configuration file");
    SectionStore::new(path).with_zero_policy(policy)
}

fn print_warnings(report: &ValidationReport) {
    for warning in report.warnings() {
        eprintln!("warning: {warning}");
    }
}

fn run_save(store: &SectionStore, args: &SaveArgs) -> Result<()> {
    let mut section = match &args.from {
        Some(from) => {
            let (mut base, report) = store
                .load_validated(from)
                .with_context(|| format!("Failed to load section [{from}]"))?;
            print_warnings(&report);
            base.name = args.section.clone();
            base
        }
        None if store.path().exists()
            && store.section_names()?.iter().any(|s| *s == args.section) =>
        {
            let (base, report) = store.load_validated(&args.section)?;
            print_warnings(&report);
            base
        }
        None => Section::hard_default(&args.section),
    };

    args.apply_to(&mut section);
    print_warnings(&section.validate());

    store
        .save(&section)
        .with_context(|| format!("Failed to save section [{}]", args.section))?;
    println!("Configuration [{}] saved to {}", section.name, store.path().display());
    Ok(())
}

fn run() -> Result<()> {
    let log_level = match std::env::var("LOG_LEVEL")
        .unwrap_or_else(|_| "warn".to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => TraceLevel::TRACE,
        "debug" => TraceLevel::DEBUG,
        "info" => TraceLevel::INFO,
        "error" => TraceLevel::ERROR,
        _ => TraceLevel::WARN,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();
    let store = open_store(&cli);

    match &cli.command {
        Command::Init => {
            let (_, outcome) = store.ensure_default_section_exists();
            match outcome {
                DefaultOutcome::Created { path } => {
                    println!("Created {} with a [default] section", path.display());
                }
                DefaultOutcome::Loaded { report } => {
                    print_warnings(&report);
                    println!("[default] loaded from {}", store.path().display());
                }
                DefaultOutcome::FellBack { error } => {
                    eprintln!("warning: {error}");
                    println!("Using built-in defaults; {} was left unchanged", store.path().display());
                }
            }
        }
        Command::List => {
            for name in store.section_names().context("Failed to read configuration file")? {
                println!("{name}");
            }
        }
        Command::Dump { section, json } => {
            let (loaded, report) = store
                .load_validated(section)
                .with_context(|| format!("Failed to load section [{section}]"))?;
            print_warnings(&report);
            if *json {
                println!("{}", serde_json::to_string_pretty(&loaded)?);
            } else {
                print!("{}", SectionReport(&loaded));
            }
        }
        Command::Save(args) => run_save(&store, args)?,
        Command::Remove { section } => {
            store
                .remove(section)
                .with_context(|| format!("Failed to remove section [{section}]"))?;
            println!("Section [{section}] removed");
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
