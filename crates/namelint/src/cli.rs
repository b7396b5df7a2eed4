//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(
    name = "namelint",
    version,
    about = "Naming-convention linter for TypeScript",
    long_about = "Checks TypeScript sources against naming rules configured in namelint.toml.\n\nThe closest namelint.toml above the current directory is used unless --config is given.",
    after_help = "Examples:\n  namelint src\n  namelint --config tools/namelint.toml --fix web/app"
)]
pub struct Cli {
    /// Files or directories to lint.
    #[arg(default_value = ".")]
    pub paths: Vec<PathBuf>,

    /// Path to namelint.toml.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Apply safe fixes and rewrite files.
    #[arg(long)]
    pub fix: bool,

    /// Also apply fixes that rename declarations.
    #[arg(long, requires = "fix")]
    pub unsafe_fixes: bool,

    /// Log debug output to stderr.
    #[arg(short, long)]
    pub verbose: bool,
}
