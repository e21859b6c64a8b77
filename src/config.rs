//! File filtering configuration.
//!
//! Filters decide which top-level files an organize run leaves alone. The
//! category table itself is fixed; only the set of files that get moved can
//! be narrowed. Rules are read from a TOML file:
//!
//! ```toml
//! [filters]
//! include_hidden = true
//!
//! [filters.exclude]
//! filenames = ["desktop.ini", "Thumbs.db"]
//! patterns = ["*.part"]
//! extensions = ["crdownload"]
//! regex = []
//!
//! [filters.include]
//! patterns = []
//! ```
//!
//! The default configuration excludes nothing.

use crate::file_category::extension_of;
use glob::Pattern;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name looked up in the working directory when no path is given.
pub const LOCAL_CONFIG_FILE: &str = ".foldersortrc.toml";

/// Errors that can occur while loading or compiling filter configuration.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),
    #[error("Invalid configuration: {0}")]
    ConfigInvalid(String),
    #[error("Invalid glob pattern '{0}'")]
    InvalidGlobPattern(String),
    #[error("Invalid regex pattern '{pattern}': {reason}")]
    InvalidRegexPattern { pattern: String, reason: String },
    #[error("IO error reading configuration: {0}")]
    IoError(String),
}

/// Top-level configuration document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterConfig {
    #[serde(default)]
    pub filters: FilterRules,
}

/// Filter rules applied to each top-level file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterRules {
    /// Whether files whose name starts with '.' are organized.
    #[serde(default = "default_include_hidden")]
    pub include_hidden: bool,

    #[serde(default)]
    pub exclude: ExcludeRules,

    /// Whitelist that wins over every exclude rule.
    #[serde(default)]
    pub include: IncludeRules,
}

fn default_include_hidden() -> bool {
    true
}

impl Default for FilterRules {
    fn default() -> Self {
        Self {
            include_hidden: default_include_hidden(),
            exclude: ExcludeRules::default(),
            include: IncludeRules::default(),
        }
    }
}

/// Rules that keep a file in place.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExcludeRules {
    /// Exact file names.
    #[serde(default)]
    pub filenames: Vec<String>,

    /// Glob patterns matched against the file name.
    #[serde(default)]
    pub patterns: Vec<String>,

    /// Extensions without the leading '.', compared case-insensitively.
    #[serde(default)]
    pub extensions: Vec<String>,

    /// Regular expressions matched against the file name.
    #[serde(default)]
    pub regex: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IncludeRules {
    #[serde(default)]
    pub patterns: Vec<String>,
}

impl FilterConfig {
    /// Loads configuration, falling back to defaults.
    ///
    /// Lookup order:
    /// 1. `config_path`, if given (must exist)
    /// 2. `.foldersortrc.toml` in the current directory
    /// 3. `foldersort/config.toml` under the user's config directory
    /// 4. Defaults
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            return Self::load_from_file(path);
        }

        let local_config = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_config.is_file() {
            return Self::load_from_file(&local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("foldersort").join("config.toml");
            if user_config.is_file() {
                return Self::load_from_file(&user_config);
            }
        }

        Ok(Self::default())
    }

    /// Loads configuration from a specific file.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::ConfigNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;
        tracing::debug!("Loaded configuration from {}", path.display());

        Self::from_toml(&content)
    }

    /// Parses configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ConfigInvalid(e.to_string()))
    }

    /// Compiles the rules into matchers.
    ///
    /// # Errors
    ///
    /// Returns an error if any glob or regex pattern is invalid.
    pub fn compile(self) -> Result<CompiledFilters, ConfigError> {
        CompiledFilters::new(self.filters)
    }
}

/// Pre-compiled filter rules.
#[derive(Debug, Clone)]
pub struct CompiledFilters {
    include_hidden: bool,
    exclude_filenames: HashSet<String>,
    exclude_extensions: HashSet<String>,
    exclude_patterns: Vec<Pattern>,
    exclude_regexes: Vec<Regex>,
    include_patterns: Vec<Pattern>,
}

impl Default for CompiledFilters {
    /// Filters that accept every file.
    fn default() -> Self {
        Self {
            include_hidden: true,
            exclude_filenames: HashSet::new(),
            exclude_extensions: HashSet::new(),
            exclude_patterns: Vec::new(),
            exclude_regexes: Vec::new(),
            include_patterns: Vec::new(),
        }
    }
}

fn compile_globs(patterns: &[String]) -> Result<Vec<Pattern>, ConfigError> {
    patterns
        .iter()
        .map(|pattern| {
            Pattern::new(pattern).map_err(|_| ConfigError::InvalidGlobPattern(pattern.clone()))
        })
        .collect()
}

impl CompiledFilters {
    fn new(rules: FilterRules) -> Result<Self, ConfigError> {
        let exclude_patterns = compile_globs(&rules.exclude.patterns)?;
        let include_patterns = compile_globs(&rules.include.patterns)?;

        let exclude_regexes = rules
            .exclude
            .regex
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|e| ConfigError::InvalidRegexPattern {
                    pattern: pattern.clone(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            include_hidden: rules.include_hidden,
            exclude_filenames: rules.exclude.filenames.into_iter().collect(),
            exclude_extensions: rules
                .exclude
                .extensions
                .iter()
                .map(|ext| ext.trim_start_matches('.').to_lowercase())
                .collect(),
            exclude_patterns,
            exclude_regexes,
            include_patterns,
        })
    }

    /// Returns true if the file should be organized.
    ///
    /// Checked in order, first decisive rule wins:
    /// 1. Include patterns - include
    /// 2. Hidden file while hidden files are off - exclude
    /// 3. Exact file name, extension, glob, regex - exclude
    /// 4. Otherwise include
    pub fn should_include(&self, file_name: &str) -> bool {
        if self.include_patterns.iter().any(|p| p.matches(file_name)) {
            return true;
        }

        if !self.include_hidden && file_name.starts_with('.') {
            return false;
        }

        if self.exclude_filenames.contains(file_name) {
            return false;
        }

        let ext = extension_of(file_name).trim_start_matches('.');
        if !ext.is_empty() && self.exclude_extensions.contains(&ext.to_lowercase()) {
            return false;
        }

        if self.exclude_patterns.iter().any(|p| p.matches(file_name)) {
            return false;
        }

        !self.exclude_regexes.iter().any(|r| r.is_match(file_name))
    }
}
