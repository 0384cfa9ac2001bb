/// The directory sweep.
///
/// [`Organizer`] scans the immediate entries of a root directory, classifies
/// each visible regular file by extension and moves it into the matching
/// category subdirectory. Subdirectories are never entered.
use crate::error::{OrganizeError, RelocateError, Result};
use crate::file_category::{Category, extract_extension, get_category, is_extension_safe};
use crate::relocate::{FileRelocator, Relocation};
use crate::result::{MAX_CATEGORIES, OrganizeResult};
use crate::validate::check_directory;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// What happened to one scanned file, as reported to a [`ScanObserver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome<'a> {
    /// Moved into the category's directory.
    Moved(Category),
    /// Already at its destination, left alone.
    AlreadyInPlace,
    /// Extension too long to classify, left alone.
    Skipped,
    /// Could not be moved.
    Failed(&'a str),
}

/// Receives per-file progress during a sweep.
pub trait ScanObserver {
    /// Called after each scanned file is handled. `file_name` is empty when
    /// the directory entry itself could not be read.
    fn on_file(&mut self, file_name: &str, outcome: &FileOutcome<'_>);

    /// Called once when the sweep is over, whether or not it started.
    fn on_finish(&mut self) {}
}

/// Observer that ignores everything.
struct Silent;

impl ScanObserver for Silent {
    fn on_file(&mut self, _file_name: &str, _outcome: &FileOutcome<'_>) {}
}

/// Sorts the files of a directory into category subdirectories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Organizer {
    category_capacity: Option<usize>,
}

impl Default for Organizer {
    fn default() -> Self {
        Self {
            category_capacity: Some(MAX_CATEGORIES),
        }
    }
}

/// A directory entry as seen by the sweep.
struct DirectoryEntry {
    name: OsString,
    path: PathBuf,
    is_dir: bool,
}

impl DirectoryEntry {
    fn from_fs(entry: &fs::DirEntry) -> Self {
        let path = entry.path();
        // Follow symlinks so a link to a directory is treated as one
        let is_dir = match entry.file_type() {
            Ok(ft) if !ft.is_symlink() => ft.is_dir(),
            _ => fs::metadata(&path).is_ok_and(|m| m.is_dir()),
        };
        Self {
            name: entry.file_name(),
            path,
            is_dir,
        }
    }
}

impl Organizer {
    /// Creates an organizer with the default category list capacity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Limits how many distinct categories the result lists. `None` removes
    /// the limit. Moves are counted in `files_moved` regardless.
    pub fn with_category_capacity(mut self, capacity: Option<usize>) -> Self {
        self.category_capacity = capacity;
        self
    }

    pub fn category_capacity(&self) -> Option<usize> {
        self.category_capacity
    }

    /// Organizes `path` and returns the summary.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use dirsort::Organizer;
    ///
    /// let result = Organizer::new().organize("/home/me/Downloads");
    /// println!("{} files moved, {} errors", result.files_moved(), result.errors());
    /// ```
    pub fn organize(&self, path: impl AsRef<Path>) -> OrganizeResult {
        self.organize_with(path, &mut Silent)
    }

    /// Organizes `path`, reporting each scanned file to `observer`.
    ///
    /// A path that is not a usable directory, or a directory that cannot be
    /// opened, gives a result with one error and nothing scanned. Failures on
    /// individual files are counted and the sweep carries on.
    pub fn organize_with(
        &self,
        path: impl AsRef<Path>,
        observer: &mut dyn ScanObserver,
    ) -> OrganizeResult {
        let root = path.as_ref();
        let outcome = self.sweep(root, observer);
        observer.on_finish();
        match outcome {
            Ok(result) => {
                info!(
                    root = %root.display(),
                    scanned = result.total_files_scanned(),
                    moved = result.files_moved(),
                    errors = result.errors(),
                    "sweep finished"
                );
                result
            }
            Err(e) => {
                warn!("{}", e);
                OrganizeResult::failed(&e, self.category_capacity)
            }
        }
    }

    fn sweep(&self, root: &Path, observer: &mut dyn ScanObserver) -> Result<OrganizeResult> {
        check_directory(root)?;

        let entries = fs::read_dir(root).map_err(|source| OrganizeError::OpenFailed {
            path: root.to_path_buf(),
            source,
        })?;

        let mut result = OrganizeResult::new(self.category_capacity);
        for entry in entries {
            match entry {
                Ok(entry) => {
                    let entry = DirectoryEntry::from_fs(&entry);
                    self.process_entry(root, &entry, &mut result, observer);
                }
                Err(e) => {
                    let message = RelocateError::UnreadableEntry(e).to_string();
                    warn!("{}", message);
                    observer.on_file("", &FileOutcome::Failed(&message));
                    result.record_failure(String::new(), message);
                }
            }
        }
        Ok(result)
    }

    fn process_entry(
        &self,
        root: &Path,
        entry: &DirectoryEntry,
        result: &mut OrganizeResult,
        observer: &mut dyn ScanObserver,
    ) {
        let name = entry.name.to_string_lossy();
        if entry.is_dir || name.is_empty() || name.starts_with('.') {
            return;
        }

        result.record_scanned();

        let category = match extract_extension(&name) {
            Some(ext) if is_extension_safe(ext) => get_category(Some(ext)),
            Some(_) => {
                debug!(file = %name, "extension too long, leaving in place");
                result.record_skipped();
                observer.on_file(&name, &FileOutcome::Skipped);
                return;
            }
            None => {
                result.record_without_extension();
                Category::Autres
            }
        };

        match FileRelocator::relocate(root, category.dir_name(), &entry.path, &entry.name) {
            Ok(Relocation::Moved(destination)) => {
                debug!(file = %name, to = %destination.display(), "moved");
                result.record_move(category);
                observer.on_file(&name, &FileOutcome::Moved(category));
            }
            Ok(Relocation::AlreadyInPlace) => {
                observer.on_file(&name, &FileOutcome::AlreadyInPlace);
            }
            Err(e) => {
                let message = e.to_string();
                warn!(file = %name, "{}", message);
                observer.on_file(&name, &FileOutcome::Failed(&message));
                result.record_failure(name.into_owned(), message);
            }
        }
    }
}

/// Organizes `path` with default settings.
///
/// Shorthand for `Organizer::new().organize(path)`.
pub fn organize_directory(path: impl AsRef<Path>) -> OrganizeResult {
    Organizer::new().organize(path)
}
