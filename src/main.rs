use clap::Parser;
use dirsort::cli::{Cli, run};
use dirsort::output::OutputFormatter;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    cli.setup_logging();

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            OutputFormatter::error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}
