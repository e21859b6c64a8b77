//! Per-category file counts for a directory tree.
//!
//! Unlike an organize run, the summary walks the whole tree, so it also
//! counts files already sitting in category folders.

use crate::file_category::CategoryTable;
use crate::file_organizer::{OrganizeError, OrganizeResult, exists};
use std::path::Path;
use walkdir::WalkDir;

/// File count of one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    pub category: String,
    pub files: usize,
}

/// Counts of every category in table order, zeros included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySummary {
    pub counts: Vec<CategoryCount>,
    /// Entries the walk could not read.
    pub unreadable: usize,
}

impl CategorySummary {
    pub fn total_files(&self) -> usize {
        self.counts.iter().map(|c| c.files).sum()
    }

    pub fn count_for(&self, category: &str) -> Option<usize> {
        self.counts
            .iter()
            .find(|c| c.category == category)
            .map(|c| c.files)
    }
}

/// Walks `root` recursively and counts its files by category.
pub fn summarize(root: &Path, table: &CategoryTable) -> OrganizeResult<CategorySummary> {
    if !exists(root) {
        return Err(OrganizeError::DirectoryNotFound(root.to_path_buf()));
    }

    let mut counts: Vec<CategoryCount> = table
        .names()
        .map(|name| CategoryCount {
            category: name.to_string(),
            files: 0,
        })
        .collect();
    let mut unreadable = 0;

    for entry in WalkDir::new(root).min_depth(1) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::debug!("Skipping unreadable entry: {}", e);
                unreadable += 1;
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy();
        let category = table.classify_file_name(&file_name);
        if let Some(count) = counts.iter_mut().find(|c| c.category == category) {
            count.files += 1;
        }
    }

    Ok(CategorySummary { counts, unreadable })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_summary_counts_recursively() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();
        fs::create_dir_all(base.join("nested/deeper")).unwrap();
        fs::write(base.join("a.pdf"), "").unwrap();
        fs::write(base.join("nested/b.txt"), "").unwrap();
        fs::write(base.join("nested/deeper/c.png"), "").unwrap();
        fs::write(base.join("nested/deeper/d.unknown"), "").unwrap();

        let summary = summarize(base, CategoryTable::standard()).expect("summary failed");

        assert_eq!(summary.count_for("Documents"), Some(2));
        assert_eq!(summary.count_for("Images"), Some(1));
        assert_eq!(summary.count_for("Others"), Some(1));
        assert_eq!(summary.total_files(), 4);
        assert_eq!(summary.unreadable, 0);
    }

    #[test]
    fn test_summary_lists_every_category() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");

        let summary = summarize(temp_dir.path(), CategoryTable::standard()).unwrap();

        let names: Vec<_> = summary.counts.iter().map(|c| c.category.as_str()).collect();
        let expected: Vec<_> = CategoryTable::standard().names().collect();
        assert_eq!(names, expected);
        assert_eq!(summary.total_files(), 0);
    }

    #[test]
    fn test_summary_missing_directory() {
        let result = summarize(Path::new("/no/such/dir"), CategoryTable::standard());
        assert!(matches!(result, Err(OrganizeError::DirectoryNotFound(_))));
    }
}
