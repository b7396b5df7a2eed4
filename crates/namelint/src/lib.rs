//! The `namelint` command line driver.
//!
//! Collects TypeScript files, lints them as one program and reports or fixes
//! the diagnostics.

pub mod cli;
pub mod discover;
pub mod lint;
pub mod logging;
pub mod printer;

use std::env;
use std::io;
use std::process::ExitCode;

use anyhow::{Context, Result};
use namelint_config::{Config, find_config_file};
use namelint_diagnostics::Applicability;

use cli::Cli;

/// Loads `--config`, or the closest `namelint.toml`, or the defaults.
pub fn load_config(cli: &Cli) -> Result<Config> {
    if let Some(path) = &cli.config {
        return Config::load(path).with_context(|| format!("failed to load {}", path.display()));
    }
    let cwd = env::current_dir().context("failed to read the current directory")?;
    match find_config_file(&cwd) {
        Some(path) => Config::load(&path).with_context(|| format!("failed to load {}", path.display())),
        None => {
            tracing::debug!("no configuration file found, every rule enabled");
            Ok(Config::default())
        }
    }
}

/// Runs one lint (and fix) pass. Exits with 1 when violations remain.
pub fn run(cli: &Cli) -> Result<ExitCode> {
    let config = load_config(cli)?;
    let files = discover::collect_files(&cli.paths);
    let mut reports = lint::lint_paths(&files, &config)?;

    let mut fixed = 0;
    if cli.fix {
        let applicability = if cli.unsafe_fixes {
            Applicability::Unsafe
        } else {
            Applicability::Safe
        };
        let summary = lint::fix_reports(&reports, applicability)?;
        fixed = summary.fixes_applied;
        if summary.files_changed > 0 {
            reports = lint::lint_paths(&files, &config)?;
        }
    }

    let mut stdout = io::stdout().lock();
    let remaining = printer::print_reports(&mut stdout, &reports)?;
    printer::print_summary(&mut stdout, remaining, fixed)?;

    Ok(if remaining == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
