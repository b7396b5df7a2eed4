use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;
use namelint::cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();
    namelint::logging::init(cli.verbose);

    match namelint::run(&cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            ExitCode::from(2)
        }
    }
}
