//! Moving a directory's files into category folders.
//!
//! An organize run is a single synchronous pass over the direct entries of
//! the target directory. Category folders are created first, then every
//! file is classified and moved. A failed move is recorded and the pass
//! carries on; nothing is rolled back.

use crate::config::CompiledFilters;
use crate::file_category::CategoryTable;
use crate::report::{EntryOutcome, MoveError, OrganizeReport};
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that abort a run as a whole.
#[derive(Debug, Error)]
pub enum OrganizeError {
    /// The target is missing or is not a directory. Raised before any change.
    #[error("Directory does not exist: {}", .0.display())]
    DirectoryNotFound(PathBuf),
    #[error("Failed to create directory {}: {source}", .path.display())]
    DirectoryCreationFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to read directory {}: {source}", .path.display())]
    ReadDirFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type OrganizeResult<T> = Result<T, OrganizeError>;

/// Returns true if `path` exists and is a directory.
pub fn exists(path: &Path) -> bool {
    path.is_dir()
}

/// Organizes `target` with the standard table and no filters.
///
/// ```no_run
/// use foldersort::file_organizer::{exists, organize};
/// use std::path::Path;
///
/// let dir = Path::new("/home/user/Downloads");
/// if exists(dir) {
///     let report = organize(dir).expect("organize failed");
///     println!("moved {} files", report.moved_count());
/// }
/// ```
pub fn organize(target: &Path) -> OrganizeResult<OrganizeReport> {
    Organizer::new(CategoryTable::standard()).organize(target)
}

/// Receives progress notifications during a run.
pub trait OrganizeObserver {
    /// Called once, after scanning, with the number of files to process.
    fn started(&mut self, _total: usize) {}

    /// Called after each file has been handled.
    fn entry_done(&mut self, _outcome: &EntryOutcome) {}
}

impl OrganizeObserver for () {}

/// A file that a run would move, as computed by [`Organizer::plan`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedMove {
    pub file_name: String,
    pub category: String,
    pub destination: PathBuf,
    /// The destination is already occupied, so the move would fail.
    pub conflict: bool,
}

/// A top-level file found while scanning.
///
/// `file_name` is a lossy rendering used for classification, filters and
/// reporting; the destination is always built from `os_name`.
struct Candidate {
    file_name: String,
    os_name: OsString,
    path: PathBuf,
}

/// Sorts files into the folders of a category table.
pub struct Organizer<'a> {
    table: &'a CategoryTable,
    filters: CompiledFilters,
}

impl<'a> Organizer<'a> {
    /// Creates an organizer that moves every file.
    pub fn new(table: &'a CategoryTable) -> Self {
        Self {
            table,
            filters: CompiledFilters::default(),
        }
    }

    /// Restricts which files are moved.
    pub fn with_filters(mut self, filters: CompiledFilters) -> Self {
        self.filters = filters;
        self
    }

    pub fn table(&self) -> &CategoryTable {
        self.table
    }

    /// Organizes `target`, see [`Organizer::organize_with`].
    pub fn organize(&self, target: &Path) -> OrganizeResult<OrganizeReport> {
        self.organize_with(target, &mut ())
    }

    /// Creates the category folders under `target` and moves each top-level
    /// file into the folder of its category.
    ///
    /// Directories are never moved or descended into. A failed move is
    /// recorded in the report and does not stop the run.
    ///
    /// # Errors
    ///
    /// Returns [`OrganizeError::DirectoryNotFound`] without touching the
    /// filesystem if `target` is not a directory. Failing to create a
    /// category folder or to list `target` also aborts the run.
    pub fn organize_with(
        &self,
        target: &Path,
        observer: &mut dyn OrganizeObserver,
    ) -> OrganizeResult<OrganizeReport> {
        ensure_exists(target)?;

        let mut report = OrganizeReport::new(target.to_path_buf());
        report.created_folders = self.ensure_category_folders(target)?;

        let candidates = scan_files(target)?;
        observer.started(candidates.len());

        for candidate in candidates {
            let outcome = self.process(target, candidate);
            observer.entry_done(&outcome);
            report.record(outcome);
        }

        tracing::info!(
            "Organized {}: {} moved, {} failed, {} excluded",
            target.display(),
            report.moved_count(),
            report.failures().count(),
            report.excluded_count()
        );

        Ok(report)
    }

    /// Computes the moves a run would make, without changing anything.
    ///
    /// Excluded files are left out of the plan.
    pub fn plan(&self, target: &Path) -> OrganizeResult<Vec<PlannedMove>> {
        ensure_exists(target)?;

        let plan = scan_files(target)?
            .into_iter()
            .filter(|c| self.filters.should_include(&c.file_name))
            .map(|c| {
                let category = self.table.classify_file_name(&c.file_name).to_string();
                let destination = target.join(&category).join(&c.os_name);
                PlannedMove {
                    conflict: destination.exists(),
                    file_name: c.file_name,
                    category,
                    destination,
                }
            })
            .collect();

        Ok(plan)
    }

    /// Creates missing category folders and returns the names it created.
    fn ensure_category_folders(&self, target: &Path) -> OrganizeResult<Vec<String>> {
        let mut created = Vec::new();

        for name in self.table.names() {
            let folder = target.join(name);
            if folder.exists() {
                continue;
            }

            match fs::create_dir(&folder) {
                Ok(()) => {
                    tracing::info!("Created folder: {}", name);
                    created.push(name.to_string());
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {}
                Err(source) => {
                    return Err(OrganizeError::DirectoryCreationFailed {
                        path: folder,
                        source,
                    });
                }
            }
        }

        Ok(created)
    }

    fn process(&self, target: &Path, candidate: Candidate) -> EntryOutcome {
        let Candidate {
            file_name,
            os_name,
            path,
        } = candidate;

        if !self.filters.should_include(&file_name) {
            tracing::debug!("Excluded by filters: {}", file_name);
            return EntryOutcome::Excluded { file_name };
        }

        let category = self.table.classify_file_name(&file_name).to_string();
        let destination = target.join(&category).join(&os_name);

        match move_file(&path, &destination) {
            Ok(()) => {
                tracing::debug!("Moved: {} => {}/", file_name, category);
                EntryOutcome::Moved {
                    file_name,
                    category,
                    destination,
                }
            }
            Err(error) => {
                tracing::warn!("Error moving {}: {}", file_name, error);
                EntryOutcome::Failed {
                    file_name,
                    category,
                    error,
                }
            }
        }
    }
}

fn ensure_exists(target: &Path) -> OrganizeResult<()> {
    if !exists(target) {
        return Err(OrganizeError::DirectoryNotFound(target.to_path_buf()));
    }
    Ok(())
}

/// Lists the non-directory entries directly under `target`, sorted by name.
fn scan_files(target: &Path) -> OrganizeResult<Vec<Candidate>> {
    let entries = fs::read_dir(target).map_err(|source| OrganizeError::ReadDirFailed {
        path: target.to_path_buf(),
        source,
    })?;

    let mut candidates = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Skipping unreadable entry in {}: {}", target.display(), e);
                continue;
            }
        };

        // Follows symlinks, so a link to a directory counts as a directory.
        let path = entry.path();
        if path.is_dir() {
            continue;
        }

        let os_name = entry.file_name();
        candidates.push(Candidate {
            file_name: os_name.to_string_lossy().into_owned(),
            os_name,
            path,
        });
    }

    candidates.sort_by(|a, b| a.os_name.cmp(&b.os_name));
    Ok(candidates)
}

/// Moves `source` to `destination`, refusing to overwrite.
///
/// Falls back to copy-and-delete when the rename crosses filesystems.
fn move_file(source: &Path, destination: &Path) -> Result<(), MoveError> {
    if destination.symlink_metadata().is_ok() {
        return Err(MoveError::DestinationExists(destination.to_path_buf()));
    }

    let io_error = |err: io::Error| MoveError::Io {
        destination: destination.to_path_buf(),
        source: err,
    };

    match fs::rename(source, destination) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            copy_then_remove(source, destination).map_err(io_error)
        }
        Err(e) => Err(io_error(e)),
    }
}

/// Copies `source` to `destination`, then removes `source`.
///
/// On any failure the copy at `destination` is removed again, so the file
/// ends up in exactly one place.
fn copy_then_remove(source: &Path, destination: &Path) -> io::Result<()> {
    if let Err(e) = fs::copy(source, destination) {
        discard_copy(destination);
        return Err(e);
    }

    if let Err(e) = fs::remove_file(source) {
        discard_copy(destination);
        return Err(e);
    }

    Ok(())
}

/// Removes a copy left at `destination`, if any.
fn discard_copy(destination: &Path) {
    match fs::remove_file(destination) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!(
            "Could not remove copy at {}: {}; the file now exists twice",
            destination.display(),
            e
        ),
    }
}
