use anyhow::{Context, Result};
use clap::Parser;
use serde_json::Value;
use std::io::Write;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod baseline;
mod classify;
mod cli;
mod color;
mod config;
mod error;
mod fetch;
mod merge;
mod mode;
mod normalize;
mod output;
mod schema;
mod sync;
mod tokens;

use classify::TokenCategory;
use cli::{Command, MergeArgs, RootArgs, SyncArgs};
use config::SyncConfig;
use sync::{SyncOutcome, SyncRun};

fn main() -> Result<ExitCode> {
    let args = RootArgs::parse();
    init_logging(args.verbose);

    match args.command {
        Command::Sync(args) => cmd_sync(args),
        Command::Merge(args) => cmd_merge(args),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn cmd_sync(args: SyncArgs) -> Result<ExitCode> {
    let config = SyncConfig::from_args(&args);
    let run = sync::run(&config)?;

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&run.summary).context("serialize summary")?
        );
    } else {
        println!("{}", describe_run(&run));
    }

    Ok(if run.is_failure() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn describe_run(run: &SyncRun) -> String {
    let s = &run.summary;
    let head = match &run.outcome {
        SyncOutcome::Synced => {
            let mode = match (&s.mode_name, &s.mode_id) {
                (Some(name), Some(id)) => format!("{name} ({id})"),
                (None, Some(id)) => id.clone(),
                _ => "<unknown>".to_string(),
            };
            let counts: Vec<String> = TokenCategory::ALL
                .iter()
                .map(|category| format!("{} {}", category.key(), s.count(*category)))
                .collect();
            format!(
                "Synced mode {mode}: {}, unresolved {}.",
                counts.join(", "),
                s.unresolved
            )
        }
        SyncOutcome::Fallback => "No Figma credentials; wrote baseline-only artifacts.".to_string(),
        SyncOutcome::Failed(err) => format!("Sync failed ({err}); wrote baseline-only artifacts."),
    };
    format!(
        "{head}\nOverrides: {}\nReport: {}\nModule: {}\nTheme cache: {}",
        if run.tokens.has_overrides() { "yes" } else { "no" },
        run.artifacts.report.display(),
        run.artifacts.module.display(),
        run.artifacts.theme_cache.display()
    )
}

fn cmd_merge(args: MergeArgs) -> Result<ExitCode> {
    let baseline = baseline::load_baseline(args.baseline.as_deref())?;
    let text = std::fs::read_to_string(&args.overrides)
        .with_context(|| format!("read {}", args.overrides.display()))?;
    let raw: Value = serde_json::from_str(&text)
        .with_context(|| format!("parse {}", args.overrides.display()))?;
    // A sync report wraps the tree in `tokens`.
    let overrides = match raw.get("tokens") {
        Some(tokens) if raw.get("summary").is_some() => tokens.clone(),
        _ => raw,
    };
    let theme = merge::deep_merge(&baseline, &overrides);

    match &args.out {
        Some(out) => {
            let dir = out.parent().unwrap_or_else(|| std::path::Path::new(""));
            let name = out
                .file_name()
                .and_then(|name| name.to_str())
                .context("merge output path has no file name")?;
            let written = output::write_json(dir, name, &theme)?;
            println!("Wrote merged theme to {}", written.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            serde_json::to_writer_pretty(&mut stdout, &theme).context("serialize theme")?;
            writeln!(stdout)?;
        }
    }
    Ok(ExitCode::SUCCESS)
}
