//! Parse, bind and lint a set of files.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use namelint_ast::{Program, SourceTree, lower_with};
use namelint_config::Config;
use namelint_diagnostics::{Applicability, Diagnostic, apply_fixes};
use namelint_linter::Linter;
use namelint_ts_parser::TsParser;
use rayon::prelude::*;

/// Diagnostics of one file.
#[derive(Debug)]
pub struct FileReport {
    pub path: PathBuf,
    pub source: String,
    pub diagnostics: Vec<Diagnostic>,
}

/// Outcome of writing fixes back to a file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixSummary {
    pub files_changed: usize,
    pub fixes_applied: usize,
}

/// Lints `paths` as one program so heritage and enum lookups see every file.
///
/// Files that cannot be read abort the run. Files tree-sitter cannot parse
/// are skipped with a warning.
pub fn lint_paths(paths: &[PathBuf], config: &Config) -> Result<Vec<FileReport>> {
    let linter = Linter::from_config(config).context("invalid rule configuration")?;

    let sources = paths
        .par_iter()
        .map(|path| {
            fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))
                .map(|source| (path.clone(), source))
        })
        .collect::<Result<Vec<_>>>()?;

    let (paths, trees): (Vec<PathBuf>, Vec<SourceTree>) = sources
        .par_iter()
        .map_init(TsParser::new, |parser, (path, source)| {
            let file_name = path.to_string_lossy();
            match lower_with(parser, &file_name, source) {
                Ok(tree) => Some((path.clone(), tree)),
                Err(err) => {
                    tracing::warn!("skipping {}: {err}", path.display());
                    None
                }
            }
        })
        .flatten()
        .unzip();

    let program = Program::new(trees);
    let reports = program
        .files()
        .collect::<Vec<_>>()
        .into_par_iter()
        .zip(paths)
        .map(|((file, tree), path)| FileReport {
            path,
            source: tree.text().to_string(),
            diagnostics: linter.check(&program, file),
        })
        .collect();
    Ok(reports)
}

/// Applies fixes of at least `applicability` and rewrites changed files.
///
/// The reports keep the pre-fix diagnostics; lint again to see what remains.
pub fn fix_reports(reports: &[FileReport], applicability: Applicability) -> Result<FixSummary> {
    let mut summary = FixSummary::default();
    for report in reports {
        let result = apply_fixes(&report.source, &report.diagnostics, applicability);
        if result.applied == 0 {
            continue;
        }
        write_file(&report.path, &result.output)?;
        tracing::debug!(
            path = %report.path.display(),
            applied = result.applied,
            skipped = result.skipped,
            "fixed"
        );
        summary.files_changed += 1;
        summary.fixes_applied += result.applied;
    }
    Ok(summary)
}

fn write_file(path: &Path, text: &str) -> Result<()> {
    fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))
}
