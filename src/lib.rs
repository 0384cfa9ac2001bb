//! dirsort - sort the files of a folder by extension
//!
//! This library scans the top level of a directory and moves each visible
//! regular file into a `Documents`, `Images`, `Videos`, `Music`, `Archives` or
//! `Autres` subfolder of that same directory, returning a per-category
//! summary. The terminal front end lives in [`cli`], [`output`] and
//! [`session`].

pub mod cli;
pub mod config;
pub mod error;
pub mod file_category;
pub mod organizer;
pub mod output;
pub mod relocate;
pub mod result;
pub mod session;
pub mod validate;

pub use config::{ConfigError, Settings};
pub use error::{OrganizeError, RelocateError};
pub use file_category::{Category, get_category};
pub use organizer::{FileOutcome, Organizer, ScanObserver, organize_directory};
pub use output::OutputFormatter;
pub use result::{CategoryStat, FileFailure, OrganizeResult};
pub use session::{History, Session};
pub use validate::is_valid_directory;

pub use cli::{Cli, run};
