/// Moving files into category directories.
///
/// This module creates the category subdirectory beneath the root when needed
/// and renames a file into it. Files are always renamed, never copied, so a
/// move across filesystems fails instead of falling back to a copy.
use crate::error::RelocateError;
use crate::validate::MAX_PATH_LENGTH;
use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// What happened to a file handed to [`FileRelocator::relocate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Relocation {
    /// The file now lives at this path.
    Moved(PathBuf),
    /// The file already sat at its destination; nothing was done.
    AlreadyInPlace,
}

/// Moves files into `root/category/` subdirectories.
pub struct FileRelocator;

impl FileRelocator {
    /// Moves `file_path` to `root/category/file_name`.
    ///
    /// The category directory is created if it is missing. If the computed
    /// destination is the file's current path the call is a no-op and returns
    /// [`Relocation::AlreadyInPlace`]. An existing entry at the destination is
    /// never overwritten.
    ///
    /// # Errors
    ///
    /// * [`RelocateError::DestinationTooLong`] if either destination path
    ///   reaches [`MAX_PATH_LENGTH`]
    /// * [`RelocateError::DirectoryCreationFailed`] if the category directory
    ///   cannot be created
    /// * [`RelocateError::DestinationExists`] if another entry already uses
    ///   the destination name
    /// * [`RelocateError::MoveFailed`] if the rename itself fails
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use dirsort::relocate::{FileRelocator, Relocation};
    /// use std::ffi::OsStr;
    /// use std::path::Path;
    ///
    /// let outcome = FileRelocator::relocate(
    ///     Path::new("/home/me/Downloads"),
    ///     "Images",
    ///     Path::new("/home/me/Downloads/cat.png"),
    ///     OsStr::new("cat.png"),
    /// );
    /// match outcome {
    ///     Ok(Relocation::Moved(to)) => println!("Moved to {}", to.display()),
    ///     Ok(Relocation::AlreadyInPlace) => {}
    ///     Err(e) => eprintln!("{}", e),
    /// }
    /// ```
    pub fn relocate(
        root: &Path,
        category: &str,
        file_path: &Path,
        file_name: &OsStr,
    ) -> Result<Relocation, RelocateError> {
        let display_name = file_name.to_string_lossy();

        let category_path = root.join(category);
        if category_path.as_os_str().len() >= MAX_PATH_LENGTH {
            return Err(RelocateError::DestinationTooLong(display_name.into_owned()));
        }

        Self::ensure_dir(&category_path)?;

        let destination = category_path.join(file_name);
        if destination.as_os_str().len() >= MAX_PATH_LENGTH {
            return Err(RelocateError::DestinationTooLong(display_name.into_owned()));
        }

        if destination == file_path {
            return Ok(Relocation::AlreadyInPlace);
        }

        // rename(2) would silently replace an existing file
        if fs::symlink_metadata(&destination).is_ok() {
            return Err(RelocateError::DestinationExists {
                name: display_name.into_owned(),
                destination,
            });
        }

        fs::rename(file_path, &destination).map_err(|e| RelocateError::MoveFailed {
            name: display_name.into_owned(),
            source: e,
        })?;

        Ok(Relocation::Moved(destination))
    }

    /// Creates `path` as a directory unless something already exists there.
    fn ensure_dir(path: &Path) -> Result<(), RelocateError> {
        match create_dir(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(()),
            Err(e) => Err(RelocateError::DirectoryCreationFailed {
                path: path.to_path_buf(),
                source: e,
            }),
        }
    }
}

#[cfg(unix)]
fn create_dir(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;
    fs::DirBuilder::new().mode(0o755).create(path)
}

#[cfg(not(unix))]
fn create_dir(path: &Path) -> io::Result<()> {
    fs::DirBuilder::new().create(path)
}
