//! Human-readable diagnostic output.

use std::io::{self, Write};

use colored::Colorize;
use namelint_source_file::{LineIndex, SourceCode};

use crate::lint::FileReport;

/// Writes `path:line:col: rule message` for every diagnostic.
pub fn print_reports(out: &mut impl Write, reports: &[FileReport]) -> io::Result<usize> {
    let mut count = 0;
    for report in reports {
        if report.diagnostics.is_empty() {
            continue;
        }
        let index = LineIndex::from_source_text(&report.source);
        let code = SourceCode::new(&report.source, &index);
        let path = report.path.display().to_string();

        for diagnostic in &report.diagnostics {
            let location = code.line_column(diagnostic.range.start());
            let fixable = if diagnostic.fix.is_some() { " [*]" } else { "" };
            writeln!(
                out,
                "{}:{}:{}: {} {}{}",
                path.bold(),
                location.line,
                location.column,
                diagnostic.rule.unwrap_or_default().red().bold(),
                diagnostic.message(),
                fixable.cyan()
            )?;
            count += 1;
        }
    }
    Ok(count)
}

/// One-line totals after the diagnostics.
pub fn print_summary(out: &mut impl Write, remaining: usize, fixed: usize) -> io::Result<()> {
    if fixed > 0 {
        writeln!(out, "Fixed {fixed} violation{}.", plural(fixed))?;
    }
    match remaining {
        0 if fixed == 0 => writeln!(out, "{}", "All checks passed!".green()),
        0 => Ok(()),
        n => writeln!(out, "Found {n} violation{}.", plural(n)),
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}
