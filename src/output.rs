//! Output formatting and styling module.
//!
//! Provides colored status lines, the progress spinner shown during a sweep
//! and the summary table printed after it. Rendering functions return
//! strings so the interactive session can write them to any sink.

use crate::organizer::{FileOutcome, ScanObserver};
use crate::result::OrganizeResult;
use crate::session::History;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::fmt::Write as _;
use std::time::Duration;

/// Manages all CLI output with consistent styling.
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints a success message in green with a checkmark.
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Prints an error message in red with an X mark.
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Prints a warning message in yellow with a warning symbol.
    pub fn warning(message: &str) {
        println!("{} {}", "⚠".yellow(), message);
    }

    /// Prints an info message in cyan.
    pub fn info(message: &str) {
        println!("{}", message.cyan());
    }

    /// Renders the notice shown once a sweep is over.
    pub fn completion_notice(result: &OrganizeResult) -> String {
        if result.is_success() {
            format!("{} {}", "✓".green(), "Organization complete!")
        } else {
            format!(
                "{} Organization finished with {} {}",
                "⚠".yellow(),
                result.errors(),
                if result.errors() == 1 { "error" } else { "errors" }
            )
        }
    }

    /// Renders the results of a sweep as a table.
    ///
    /// Lists per-category counts, the totals and the last error message.
    /// With `verbose`, every per-file failure is listed as well.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use dirsort::{OutputFormatter, organize_directory};
    ///
    /// let result = organize_directory("/home/me/Downloads");
    /// print!("{}", OutputFormatter::summary_table(&result, false));
    /// ```
    pub fn summary_table(result: &OrganizeResult, verbose: bool) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "\n{}", "SUMMARY".bold());

        let width = result
            .categories()
            .iter()
            .map(|s| s.category.dir_name().len())
            .chain(["Without extension".len()])
            .max()
            .unwrap_or(0);

        let _ = writeln!(
            out,
            "{:<width$} | {}",
            "Category".bold(),
            "Files".bold(),
            width = width
        );
        let _ = writeln!(out, "{}", "-".repeat(width + 10));

        for stat in result.categories() {
            let _ = writeln!(
                out,
                "{:<width$} | {} {}",
                stat.category.dir_name(),
                stat.count.to_string().green(),
                plural(stat.count),
                width = width
            );
        }

        let _ = writeln!(out, "{}", "-".repeat(width + 10));
        let rows = [
            ("Moved", result.files_moved()),
            ("Scanned", result.total_files_scanned()),
            ("Without extension", result.files_without_extension()),
            ("Skipped", result.files_skipped()),
        ];
        for (label, count) in rows {
            let _ = writeln!(
                out,
                "{:<width$} | {} {}",
                label.bold(),
                count.to_string().green().bold(),
                plural(count),
                width = width
            );
        }

        let errors = result.errors().to_string();
        let errors = if result.is_success() {
            errors.green()
        } else {
            errors.red()
        };
        let _ = writeln!(
            out,
            "{:<width$} | {}",
            "Errors".bold(),
            errors.bold(),
            width = width
        );

        if let Some(last) = result.last_error() {
            let _ = writeln!(out, "\n{} {}", "Last error:".red(), last);
        }
        if verbose && result.failures().len() > 1 {
            let _ = writeln!(out, "{}", "All errors:".red());
            for failure in result.failures() {
                let _ = writeln!(out, "  - {}", failure.message);
            }
        }
        out
    }

    /// Renders the recent folders list.
    pub fn history(history: &History) -> String {
        if history.is_empty() {
            return format!("{}\n", "No folder organized yet.".dimmed());
        }
        let mut out = format!("{}\n", "Recent folders".bold());
        for (i, item) in history.iter().enumerate() {
            let _ = writeln!(
                out,
                "  {}. {}  {}",
                i + 1,
                item.path.display(),
                item.timestamp.format("%Y-%m-%d %H:%M:%S").to_string().dimmed()
            );
        }
        out
    }

    /// Creates the spinner shown while a sweep runs.
    pub fn create_spinner() -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) =
            ProgressStyle::default_spinner().template("{spinner:.cyan} {pos} scanned {msg}")
        {
            pb.set_style(style);
        }
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "file" } else { "files" }
}

/// Drives a spinner from sweep progress.
///
/// The spinner appears with the first scanned file and is cleared when the
/// sweep finishes, so one observer can serve several sweeps.
#[derive(Default)]
pub struct SpinnerObserver {
    bar: Option<ProgressBar>,
}

impl SpinnerObserver {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScanObserver for SpinnerObserver {
    fn on_file(&mut self, file_name: &str, outcome: &FileOutcome<'_>) {
        let bar = self.bar.get_or_insert_with(OutputFormatter::create_spinner);
        bar.inc(1);
        match outcome {
            FileOutcome::Moved(category) => {
                bar.set_message(format!("{} → {}/", file_name, category));
            }
            FileOutcome::Failed(message) => {
                bar.println(format!("{} {}", "✗".red(), message));
            }
            FileOutcome::AlreadyInPlace | FileOutcome::Skipped => {}
        }
    }

    fn on_finish(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}
