//! Command-line interface module for dirsort.
//!
//! This module handles all CLI-related functionality including:
//! - Argument parsing
//! - Settings and logging setup
//! - One-shot organization of a folder given on the command line
//! - The interactive session used when no folder is given

use crate::config::{ConfigError, Settings};
use crate::organizer::{Organizer, ScanObserver};
use crate::output::{OutputFormatter, SpinnerObserver};
use crate::result::OrganizeResult;
use crate::session::Session;
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Sort the files of a folder into category subfolders by extension.
#[derive(Parser, Debug)]
#[command(name = "dirsort", version, about)]
pub struct Cli {
    /// Folder to organize. Without it, an interactive session starts.
    pub path: Option<PathBuf>,

    /// Do not ask for confirmation
    #[arg(short, long)]
    pub yes: bool,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,

    /// Debug logging and the full list of errors
    #[arg(short, long)]
    pub verbose: bool,

    /// Settings file to use instead of the default locations
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

/// Errors that end the program.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Error loading configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Terminal I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Cannot serialize result: {0}")]
    Json(#[from] serde_json::Error),
}

/// Exit status when the sweep ran but some files could not be moved.
const PARTIAL_FAILURE: u8 = 2;

impl Cli {
    /// Installs the tracing subscriber. `RUST_LOG` takes precedence over
    /// `--verbose`.
    pub fn setup_logging(&self) {
        let default_level = if self.verbose { "debug" } else { "warn" };
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_level));

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(io::stderr)
            .init();
    }
}

/// Runs the application for parsed arguments.
///
/// # Errors
///
/// Fails if the settings cannot be loaded or the terminal cannot be read or
/// written. Failures while organizing are part of the result, not errors.
pub fn run(cli: &Cli) -> Result<ExitCode, CliError> {
    let settings = Settings::load(cli.config.as_deref())?;
    if cli.no_color || !settings.interface.color {
        colored::control::set_override(false);
    }

    let organizer = Organizer::new().with_category_capacity(settings.organizer.capacity());
    let confirm = settings.interface.confirm && !cli.yes;

    match &cli.path {
        Some(path) => run_once(cli, &organizer, path, confirm),
        None => {
            let mut session = Session::new(organizer, settings.interface.history_size);
            let options = SessionOptions {
                confirm,
                verbose: cli.verbose,
            };
            let stdin = io::stdin();
            run_session(
                &mut session,
                stdin.lock(),
                &mut io::stdout(),
                &mut SpinnerObserver::new(),
                &options,
            )?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn run_once(
    cli: &Cli,
    organizer: &Organizer,
    path: &Path,
    confirm: bool,
) -> Result<ExitCode, CliError> {
    // The prompt goes to stderr so --json output stays clean
    if confirm && !ask_confirmation(&mut io::stdin().lock(), &mut io::stderr(), path)? {
        OutputFormatter::warning("Cancelled, nothing was moved.");
        return Ok(ExitCode::SUCCESS);
    }

    if cli.json {
        let result = organizer.organize(path);
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(exit_code(&result));
    }

    OutputFormatter::info(&format!("Organizing contents of: {}", path.display()));
    let result = organizer.organize_with(path, &mut SpinnerObserver::new());
    print!("{}", OutputFormatter::summary_table(&result, cli.verbose));
    println!("\n{}", OutputFormatter::completion_notice(&result));
    if result.is_success() && result.files_moved() == 0 {
        OutputFormatter::success("Nothing to move, the folder is already tidy.");
    }
    Ok(exit_code(&result))
}

fn exit_code(result: &OrganizeResult) -> ExitCode {
    if result.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(PARTIAL_FAILURE)
    }
}

/// Behaviour switches for [`run_session`].
#[derive(Debug, Clone, Copy)]
pub struct SessionOptions {
    /// Ask before each sweep.
    pub confirm: bool,
    /// List every per-file error in summaries.
    pub verbose: bool,
}

/// Runs the interactive session until `q` or end of input.
///
/// Each line read from `input` is one command:
/// - a folder path selects it
/// - an empty line selects the most recently organized folder
/// - `h` lists the recent folders
/// - `q` quits
///
/// A selected folder is organized once confirmed, then its summary is shown.
pub fn run_session<R, W>(
    session: &mut Session,
    mut input: R,
    out: &mut W,
    observer: &mut dyn ScanObserver,
    options: &SessionOptions,
) -> io::Result<()>
where
    R: BufRead,
    W: Write,
{
    loop {
        write!(
            out,
            "\nFolder to organize ([Enter] most recent, h history, r reset, q quit): "
        )?;
        out.flush()?;

        let Some(line) = read_line(&mut input)? else {
            writeln!(out)?;
            return Ok(());
        };

        match line.as_str() {
            "q" | "quit" => return Ok(()),
            "h" | "history" => {
                write!(out, "{}", OutputFormatter::history(session.history()))?;
                continue;
            }
            "r" | "reset" => {
                session.reset();
                writeln!(out, "Selection cleared.")?;
                continue;
            }
            "" => {
                if !session.select_recent() {
                    writeln!(out, "No folder organized yet.")?;
                    continue;
                }
            }
            path => session.select(unquote(path)),
        }

        let Some(path) = session.selected_path().map(Path::to_path_buf) else {
            continue;
        };
        if options.confirm && !ask_confirmation(&mut input, out, &path)? {
            session.cancel();
            writeln!(out, "Cancelled, nothing was moved.")?;
            continue;
        }

        if let Some(result) = session.confirm(observer) {
            write!(out, "{}", OutputFormatter::summary_table(result, options.verbose))?;
            writeln!(out, "\n{}", OutputFormatter::completion_notice(result))?;
        }
        session.acknowledge();
    }
}

/// Asks whether `path` should be organized. Anything but `y`/`yes` declines.
pub fn ask_confirmation<R, W>(input: &mut R, out: &mut W, path: &Path) -> io::Result<bool>
where
    R: BufRead,
    W: Write,
{
    write!(
        out,
        "Organize {}? Files will be moved into category folders. [y/N] ",
        path.display()
    )?;
    out.flush()?;

    Ok(read_line(input)?.is_some_and(|answer| {
        answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
    }))
}

/// Reads one trimmed line, or `None` at end of input.
fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Strips one pair of surrounding quotes, as left by terminals when a folder
/// is dragged in.
fn unquote(path: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = path
            .strip_prefix(quote)
            .and_then(|p| p.strip_suffix(quote))
        {
            return inner;
        }
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::organizer::FileOutcome;
    use std::fs;
    use std::io::Cursor;
    use tempfile::TempDir;

    struct Ignore;

    impl ScanObserver for Ignore {
        fn on_file(&mut self, _: &str, _: &FileOutcome<'_>) {}
    }

    fn drive(session: &mut Session, script: &str, confirm: bool) -> String {
        colored::control::set_override(false);
        let mut out = Vec::new();
        let options = SessionOptions {
            confirm,
            verbose: false,
        };
        run_session(session, Cursor::new(script), &mut out, &mut Ignore, &options)
            .expect("session I/O on memory buffers cannot fail");
        String::from_utf8(out).expect("output is UTF-8")
    }

    #[test]
    fn test_cli_parses_flags() {
        let cli = Cli::parse_from(["dirsort", "/tmp/x", "--yes", "--json", "-v"]);
        assert_eq!(cli.path, Some(PathBuf::from("/tmp/x")));
        assert!(cli.yes && cli.json && cli.verbose);
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_cli_without_path() {
        let cli = Cli::parse_from(["dirsort", "--config", "my.toml"]);
        assert!(cli.path.is_none());
        assert_eq!(cli.config, Some(PathBuf::from("my.toml")));
    }

    #[test]
    fn test_session_confirm_and_organize() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        fs::write(temp_dir.path().join("a.pdf"), "pdf").unwrap();
        let mut session = Session::new(Organizer::new(), 10);

        let script = format!("{}\ny\nq\n", temp_dir.path().display());
        let output = drive(&mut session, &script, true);

        assert!(output.contains("Organization complete!"));
        assert!(temp_dir.path().join("Documents").join("a.pdf").exists());
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_session_decline() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        fs::write(temp_dir.path().join("a.pdf"), "pdf").unwrap();
        let mut session = Session::new(Organizer::new(), 10);

        let script = format!("{}\nn\n", temp_dir.path().display());
        let output = drive(&mut session, &script, true);

        assert!(output.contains("Cancelled"));
        assert!(temp_dir.path().join("a.pdf").exists());
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_session_empty_line_reuses_recent_folder() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        fs::write(temp_dir.path().join("a.pdf"), "pdf").unwrap();
        let mut session = Session::new(Organizer::new(), 10);

        let script = format!("\n'{}'\n\nh\n", temp_dir.path().display());
        let output = drive(&mut session, &script, false);

        assert!(output.contains("No folder organized yet."));
        assert_eq!(session.history().len(), 2);
        assert_eq!(session.last_result().unwrap().files_moved(), 0);
        assert!(output.contains("Recent folders"));
    }

    #[test]
    fn test_session_reset_command() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let mut session = Session::new(Organizer::new(), 10);

        let script = format!("{}
r
", temp_dir.path().display());
        let output = drive(&mut session, &script, false);

        assert!(output.contains("Selection cleared."));
        assert!(session.last_result().is_none());
        assert!(session.selected_path().is_none());
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_ask_confirmation_answers() {
        for (answer, expected) in [("y\n", true), ("YES\n", true), ("n\n", false), ("", false)] {
            let mut out = Vec::new();
            let accepted =
                ask_confirmation(&mut Cursor::new(answer), &mut out, Path::new("/tmp")).unwrap();
            assert_eq!(accepted, expected, "answer {answer:?}");
        }
    }

    #[test]
    fn test_unquote() {
        assert_eq!(unquote("\"/a b\""), "/a b");
        assert_eq!(unquote("'/a'"), "/a");
        assert_eq!(unquote("/a"), "/a");
        assert_eq!(unquote("\""), "\"");
    }
}
