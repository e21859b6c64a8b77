//! Outcome of a single organize run.
//!
//! The report records what happened to each top-level file. It lives only
//! for the run; `save_json` writes a copy for the user but nothing reads it
//! back.

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Why moving one file failed.
#[derive(Debug, Error)]
pub enum MoveError {
    /// A file of the same name already sits in the category folder.
    #[error("destination {} already exists", .0.display())]
    DestinationExists(PathBuf),
    /// Rename, copy or removal of the source failed.
    #[error("failed to move to {}: {source}", .destination.display())]
    Io {
        destination: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised while writing a report to disk.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write report to {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn serialize_display<T: std::fmt::Display, S: Serializer>(
    value: &T,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

/// What happened to one top-level file.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EntryOutcome {
    Moved {
        file_name: String,
        category: String,
        destination: PathBuf,
    },
    Failed {
        file_name: String,
        category: String,
        #[serde(rename = "reason", serialize_with = "serialize_display")]
        error: MoveError,
    },
    /// Left in place by the filter configuration.
    Excluded { file_name: String },
}

impl EntryOutcome {
    pub fn file_name(&self) -> &str {
        match self {
            Self::Moved { file_name, .. }
            | Self::Failed { file_name, .. }
            | Self::Excluded { file_name } => file_name,
        }
    }

    /// The category the file was classified into, if it was classified.
    pub fn category(&self) -> Option<&str> {
        match self {
            Self::Moved { category, .. } | Self::Failed { category, .. } => Some(category),
            Self::Excluded { .. } => None,
        }
    }

    pub fn is_moved(&self) -> bool {
        matches!(self, Self::Moved { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Accumulated result of organizing one directory.
#[derive(Debug, Serialize)]
pub struct OrganizeReport {
    pub target: PathBuf,
    pub started_at: DateTime<Utc>,
    /// Category folders this run had to create.
    pub created_folders: Vec<String>,
    pub outcomes: Vec<EntryOutcome>,
}

impl OrganizeReport {
    pub fn new(target: PathBuf) -> Self {
        Self {
            target,
            started_at: Utc::now(),
            created_folders: Vec::new(),
            outcomes: Vec::new(),
        }
    }

    pub fn record(&mut self, outcome: EntryOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn moved_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_moved()).count()
    }

    pub fn excluded_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, EntryOutcome::Excluded { .. }))
            .count()
    }

    /// Entries whose move failed, in processing order.
    pub fn failures(&self) -> impl Iterator<Item = &EntryOutcome> {
        self.outcomes.iter().filter(|o| o.is_failed())
    }

    /// True when no move failed.
    pub fn is_complete_success(&self) -> bool {
        !self.outcomes.iter().any(|o| o.is_failed())
    }

    /// Number of files moved into each category.
    pub fn moved_per_category(&self) -> HashMap<&str, usize> {
        let mut counts = HashMap::new();
        for outcome in &self.outcomes {
            if let EntryOutcome::Moved { category, .. } = outcome {
                *counts.entry(category.as_str()).or_insert(0) += 1;
            }
        }
        counts
    }

    /// Writes the report as pretty-printed JSON.
    pub fn save_json(&self, path: &Path) -> Result<(), ReportError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| ReportError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!("Report written to {}", path.display());
        Ok(())
    }
}
