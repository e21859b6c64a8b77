//! foldersort - sort a directory's files into category folders
//!
//! This library provides the extension-to-category table, the organize pass
//! that moves top-level files into one folder per category, per-run reports,
//! per-category summaries of a tree, and optional TOML file filters.

pub mod cli;
pub mod config;
pub mod file_category;
pub mod file_organizer;
pub mod output;
pub mod report;
pub mod summary;

pub use config::{CompiledFilters, ConfigError, FilterConfig};
pub use file_category::{CategoryTable, classify, classify_file_name};
pub use file_organizer::{OrganizeError, Organizer, exists, organize};
pub use report::{EntryOutcome, MoveError, OrganizeReport};
pub use summary::{CategorySummary, summarize};

pub use cli::{OrganizeCommand, run_cli};
