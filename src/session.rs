//! Front-end state: the selected folder, the last result and the list of
//! recently organized folders.
//!
//! A [`Session`] walks through `Idle → Confirmation → Organizing → Results`
//! and back to `Idle`. Only one sweep can run at a time because
//! [`Session::confirm`] takes the session mutably for the whole sweep.

use crate::organizer::{Organizer, ScanObserver};
use crate::result::OrganizeResult;
use chrono::{DateTime, Local};
use serde::Serialize;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};

/// Where the session is in the organize cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Idle,
    Confirmation,
    Organizing,
    Results,
}

/// A folder that was organized, and when.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryItem {
    pub path: PathBuf,
    pub timestamp: DateTime<Local>,
}

/// Recently organized folders, most recent first.
///
/// The same folder may appear more than once. When full, the oldest entry
/// is dropped.
#[derive(Debug, Clone)]
pub struct History {
    items: VecDeque<HistoryItem>,
    capacity: usize,
}

impl History {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Records `path` as the most recent entry.
    pub fn push(&mut self, path: PathBuf) {
        if self.capacity == 0 {
            return;
        }
        if self.items.len() == self.capacity {
            self.items.pop_back();
        }
        self.items.push_front(HistoryItem {
            path,
            timestamp: Local::now(),
        });
    }

    pub fn most_recent(&self) -> Option<&HistoryItem> {
        self.items.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Application state owned by the front end.
#[derive(Debug)]
pub struct Session {
    state: AppState,
    selected_path: Option<PathBuf>,
    last_result: Option<OrganizeResult>,
    history: History,
    organizer: Organizer,
}

impl Session {
    pub fn new(organizer: Organizer, history_size: usize) -> Self {
        Self {
            state: AppState::Idle,
            selected_path: None,
            last_result: None,
            history: History::new(history_size),
            organizer,
        }
    }

    pub fn state(&self) -> AppState {
        self.state
    }

    pub fn selected_path(&self) -> Option<&Path> {
        self.selected_path.as_deref()
    }

    pub fn last_result(&self) -> Option<&OrganizeResult> {
        self.last_result.as_ref()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Selects a folder and asks for confirmation.
    pub fn select(&mut self, path: impl Into<PathBuf>) {
        self.selected_path = Some(path.into());
        self.state = AppState::Confirmation;
    }

    /// Selects the most recently organized folder. Returns false if the
    /// history is empty.
    pub fn select_recent(&mut self) -> bool {
        match self.history.most_recent() {
            Some(item) => {
                let path = item.path.clone();
                self.select(path);
                true
            }
            None => false,
        }
    }

    /// Drops the pending selection.
    pub fn cancel(&mut self) {
        self.state = AppState::Idle;
    }

    /// Organizes the selected folder and records it in the history.
    ///
    /// Returns `None` unless a folder is awaiting confirmation.
    pub fn confirm(&mut self, observer: &mut dyn ScanObserver) -> Option<&OrganizeResult> {
        if self.state != AppState::Confirmation {
            return None;
        }
        let path = self.selected_path.clone()?;

        self.state = AppState::Organizing;
        let result = self.organizer.organize_with(&path, observer);
        self.history.push(path);
        self.state = AppState::Results;
        self.last_result = Some(result);
        self.last_result.as_ref()
    }

    /// Leaves the results screen. The folder is deselected; the last result
    /// stays available until [`Session::reset`].
    pub fn acknowledge(&mut self) {
        if self.state == AppState::Results {
            self.state = AppState::Idle;
            self.selected_path = None;
        }
    }

    /// Forgets the selection and the last result. History is kept.
    pub fn reset(&mut self) {
        self.state = AppState::Idle;
        self.selected_path = None;
        self.last_result = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::organizer::FileOutcome;
    use std::fs;
    use tempfile::TempDir;

    struct Ignore;

    impl ScanObserver for Ignore {
        fn on_file(&mut self, _: &str, _: &FileOutcome<'_>) {}
    }

    #[test]
    fn test_history_most_recent_first() {
        let mut history = History::new(10);
        history.push(PathBuf::from("/a"));
        history.push(PathBuf::from("/b"));
        history.push(PathBuf::from("/a"));

        let paths: Vec<_> = history.iter().map(|i| i.path.clone()).collect();
        assert_eq!(paths, [PathBuf::from("/a"), PathBuf::from("/b"), PathBuf::from("/a")]);
    }

    #[test]
    fn test_history_evicts_oldest() {
        let mut history = History::new(10);
        for i in 0..12 {
            history.push(PathBuf::from(format!("/dir{i}")));
        }

        assert_eq!(history.len(), 10);
        assert_eq!(history.most_recent().unwrap().path, PathBuf::from("/dir11"));
        assert_eq!(history.iter().last().unwrap().path, PathBuf::from("/dir2"));
    }

    #[test]
    fn test_zero_capacity_history_stays_empty() {
        let mut history = History::new(0);
        history.push(PathBuf::from("/a"));
        assert!(history.is_empty());
    }

    #[test]
    fn test_session_cycle() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        fs::write(temp_dir.path().join("a.pdf"), "pdf").unwrap();

        let mut session = Session::new(Organizer::new(), 10);
        assert_eq!(session.state(), AppState::Idle);
        assert!(session.confirm(&mut Ignore).is_none());

        session.select(temp_dir.path());
        assert_eq!(session.state(), AppState::Confirmation);

        let moved = session.confirm(&mut Ignore).map(|r| r.files_moved());
        assert_eq!(moved, Some(1));
        assert_eq!(session.state(), AppState::Results);
        assert_eq!(session.history().len(), 1);

        session.acknowledge();
        assert_eq!(session.state(), AppState::Idle);
        assert!(session.selected_path().is_none());
        assert_eq!(session.last_result().unwrap().files_moved(), 1);
    }

    #[test]
    fn test_reset_clears_selection_and_result() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let mut session = Session::new(Organizer::new(), 10);
        session.select(temp_dir.path());
        session.confirm(&mut Ignore);

        session.reset();
        assert_eq!(session.state(), AppState::Idle);
        assert!(session.selected_path().is_none());
        assert!(session.last_result().is_none());
        assert_eq!(session.history().len(), 1);

        session.select(temp_dir.path());
        session.reset();
        assert!(session.confirm(&mut Ignore).is_none());
    }

    #[test]
    fn test_cancel_does_not_organize() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        fs::write(temp_dir.path().join("a.pdf"), "pdf").unwrap();

        let mut session = Session::new(Organizer::new(), 10);
        session.select(temp_dir.path());
        session.cancel();

        assert_eq!(session.state(), AppState::Idle);
        assert!(session.confirm(&mut Ignore).is_none());
        assert!(temp_dir.path().join("a.pdf").exists());
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_select_recent() {
        let mut session = Session::new(Organizer::new(), 10);
        assert!(!session.select_recent());

        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        session.select(temp_dir.path());
        session.confirm(&mut Ignore);
        session.acknowledge();

        assert!(session.select_recent());
        assert_eq!(session.selected_path(), Some(temp_dir.path()));
        assert_eq!(session.state(), AppState::Confirmation);
    }

    #[test]
    fn test_failed_sweep_still_recorded() {
        let mut session = Session::new(Organizer::new(), 10);
        session.select("/non/existent/path");

        let errors = session.confirm(&mut Ignore).map(|r| r.errors());
        assert_eq!(errors, Some(1));
        assert_eq!(session.history().len(), 1);
    }
}
