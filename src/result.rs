//! Summary of one sweep.

use crate::error::OrganizeError;
use crate::file_category::Category;
use serde::Serialize;

/// Default number of distinct categories tracked in
/// [`OrganizeResult::categories`].
pub const MAX_CATEGORIES: usize = 10;

/// Longest `last_error` kept, in bytes.
pub const MAX_ERROR_LENGTH: usize = 255;

/// Number of files moved into one category during a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryStat {
    pub category: Category,
    pub count: usize,
}

/// A file that could not be moved, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileFailure {
    pub file_name: String,
    pub message: String,
}

/// The outcome of [`crate::organize_directory`].
///
/// A result is built during a single sweep and cannot be changed afterwards.
/// `last_error` keeps only the most recent message; `failures` keeps all of
/// them in the order they happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrganizeResult {
    files_moved: usize,
    errors: usize,
    last_error: Option<String>,
    total_files_scanned: usize,
    files_without_extension: usize,
    files_skipped: usize,
    categories: Vec<CategoryStat>,
    failures: Vec<FileFailure>,
    #[serde(skip)]
    category_capacity: Option<usize>,
}

impl OrganizeResult {
    /// An empty result whose category list holds at most `category_capacity`
    /// entries (`None` for no limit).
    pub(crate) fn new(category_capacity: Option<usize>) -> Self {
        Self {
            files_moved: 0,
            errors: 0,
            last_error: None,
            total_files_scanned: 0,
            files_without_extension: 0,
            files_skipped: 0,
            categories: Vec::new(),
            failures: Vec::new(),
            category_capacity,
        }
    }

    /// A result for a sweep that never started.
    pub(crate) fn failed(error: &OrganizeError, category_capacity: Option<usize>) -> Self {
        let mut result = Self::new(category_capacity);
        result.errors = 1;
        result.last_error = Some(bounded(error.to_string()));
        result
    }

    pub(crate) fn record_scanned(&mut self) {
        self.total_files_scanned += 1;
    }

    pub(crate) fn record_without_extension(&mut self) {
        self.files_without_extension += 1;
    }

    pub(crate) fn record_skipped(&mut self) {
        self.files_skipped += 1;
    }

    /// Counts a move. The category gets a slot if it has none yet and the
    /// list is not full; the move is counted either way.
    pub(crate) fn record_move(&mut self, category: Category) {
        self.files_moved += 1;

        if let Some(stat) = self.categories.iter_mut().find(|s| s.category == category) {
            stat.count += 1;
            return;
        }
        let has_room = self
            .category_capacity
            .is_none_or(|cap| self.categories.len() < cap);
        if has_room {
            self.categories.push(CategoryStat { category, count: 1 });
        }
    }

    pub(crate) fn record_failure(&mut self, file_name: String, message: String) {
        self.errors += 1;
        self.last_error = Some(bounded(message.clone()));
        self.failures.push(FileFailure { file_name, message });
    }

    pub fn files_moved(&self) -> usize {
        self.files_moved
    }

    pub fn errors(&self) -> usize {
        self.errors
    }

    /// The most recent error message, truncated to [`MAX_ERROR_LENGTH`] bytes.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn total_files_scanned(&self) -> usize {
        self.total_files_scanned
    }

    pub fn files_without_extension(&self) -> usize {
        self.files_without_extension
    }

    /// Files left in place because their extension was too long to classify.
    pub fn files_skipped(&self) -> usize {
        self.files_skipped
    }

    /// Per-category move counts, in order of first move.
    pub fn categories(&self) -> &[CategoryStat] {
        &self.categories
    }

    /// Every per-file failure, oldest first.
    pub fn failures(&self) -> &[FileFailure] {
        &self.failures
    }

    /// Number of files moved into `category`, or 0 if it has no slot.
    pub fn count_for(&self, category: Category) -> usize {
        self.categories
            .iter()
            .find(|s| s.category == category)
            .map_or(0, |s| s.count)
    }

    pub fn is_success(&self) -> bool {
        self.errors == 0
    }
}

fn bounded(mut message: String) -> String {
    if message.len() > MAX_ERROR_LENGTH {
        let mut end = MAX_ERROR_LENGTH;
        while !message.is_char_boundary(end) {
            end -= 1;
        }
        message.truncate(end);
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_record_move_aggregates_by_category() {
        let mut result = OrganizeResult::new(Some(MAX_CATEGORIES));
        result.record_move(Category::Documents);
        result.record_move(Category::Images);
        result.record_move(Category::Documents);

        assert_eq!(result.files_moved(), 3);
        assert_eq!(
            result.categories(),
            &[
                CategoryStat {
                    category: Category::Documents,
                    count: 2,
                },
                CategoryStat {
                    category: Category::Images,
                    count: 1,
                },
            ]
        );
    }

    #[test]
    fn test_category_list_saturates() {
        let mut result = OrganizeResult::new(Some(2));
        for category in Category::ALL {
            result.record_move(category);
        }
        result.record_move(Category::Documents);
        result.record_move(Category::Autres);

        assert_eq!(result.files_moved(), 8);
        assert_eq!(result.categories().len(), 2);
        assert_eq!(result.count_for(Category::Documents), 2);
        assert_eq!(result.count_for(Category::Autres), 0);
    }

    #[test]
    fn test_unbounded_category_list() {
        let mut result = OrganizeResult::new(None);
        for category in Category::ALL {
            result.record_move(category);
        }
        assert_eq!(result.categories().len(), Category::ALL.len());
    }

    #[test]
    fn test_zero_capacity_still_counts_moves() {
        let mut result = OrganizeResult::new(Some(0));
        result.record_move(Category::Music);
        assert_eq!(result.files_moved(), 1);
        assert!(result.categories().is_empty());
    }

    #[test]
    fn test_last_error_is_overwritten() {
        let mut result = OrganizeResult::new(None);
        result.record_failure("a.txt".into(), "first".into());
        result.record_failure("b.txt".into(), "second".into());

        assert_eq!(result.errors(), 2);
        assert_eq!(result.last_error(), Some("second"));
        assert_eq!(result.failures().len(), 2);
        assert_eq!(result.failures()[0].file_name, "a.txt");
        assert!(!result.is_success());
    }

    #[test]
    fn test_last_error_is_bounded() {
        let mut result = OrganizeResult::new(None);
        let long = "é".repeat(MAX_ERROR_LENGTH);
        result.record_failure("x".into(), long.clone());

        let kept = result.last_error().unwrap();
        assert!(kept.len() <= MAX_ERROR_LENGTH);
        assert!(long.starts_with(kept));
        assert_eq!(result.failures()[0].message, long);
    }

    #[test]
    fn test_failed_result_shape() {
        let error = OrganizeError::NotADirectory(PathBuf::from("/nowhere"));
        let result = OrganizeResult::failed(&error, Some(MAX_CATEGORIES));

        assert_eq!(result.errors(), 1);
        assert_eq!(result.total_files_scanned(), 0);
        assert_eq!(result.files_moved(), 0);
        assert!(result.last_error().unwrap().contains("/nowhere"));
        assert!(result.failures().is_empty());
    }
}
