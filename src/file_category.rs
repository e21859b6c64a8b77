//! Extension-based file categorization.
//!
//! This module holds the ordered table that maps category names to the file
//! extensions they recognize, and the lookup that resolves an extension to a
//! category name.
//!
//! # Examples
//!
//! ```
//! use foldersort::file_category::{classify, classify_file_name};
//!
//! assert_eq!(classify(".pdf"), "Documents");
//! assert_eq!(classify(".JPG"), "Images");
//! assert_eq!(classify(".xyz"), "Others");
//! assert_eq!(classify_file_name("notes.TXT"), "Documents");
//! ```

use serde::Serialize;
use std::collections::HashSet;
use std::sync::LazyLock;
use thiserror::Error;

/// Name of the category that receives every unlisted extension.
pub const FALLBACK_CATEGORY: &str = "Others";

/// The standard table, in lookup order.
const STANDARD_CATEGORIES: &[(&str, &[&str])] = &[
    (
        "Documents",
        &[
            ".pdf", ".docx", ".txt", ".pptx", ".xlsx", ".xls", ".odt", ".ods", ".csv",
        ],
    ),
    (
        "Images",
        &[
            ".jpg", ".png", ".jpeg", ".gif", ".svg", ".tiff", ".ai", ".raw", ".webp",
        ],
    ),
    (
        "Audio",
        &[".mp3", ".wav", ".aac", ".flac", ".ogg", ".m4a", ".wma", ".opus"],
    ),
    ("Videos", &[".mp4", ".mov", ".avi", ".mkv", ".flv", ".3gb"]),
    ("Archives", &[".zip", ".rar", ".tar", ".gz", ".iso", ".phg"]),
    (
        "Python Work",
        &[".py", ".ipynb", ".pyc", ".pyd", ".pyo", ".pyw"],
    ),
    ("Java Work", &[".java", ".jar", ".war", ".class", ".kt"]),
    (
        "C++ Work",
        &[".cpp", ".c", ".h", ".hpp", ".cxx", ".obj", ".cc"],
    ),
    (
        "JS-Web Work",
        &[".js", ".ts", ".jsx", ".tsx", ".json", ".html", ".css", ".sass"],
    ),
    ("Executables", &[".exe", ".msi", ".app", ".apk", ".ipa", ".rmp"]),
    (
        "Database",
        &[".db", ".sqlite", ".sql", ".dbf", ".mdb", ".accdb"],
    ),
    (
        "System files",
        &[".ini", ".reg", ".bat", ".cmd", ".sys", ".bash", ".log"],
    ),
    (FALLBACK_CATEGORY, &[]),
];

static STANDARD_TABLE: LazyLock<CategoryTable> = LazyLock::new(|| {
    let entries = STANDARD_CATEGORIES.iter().map(|(name, extensions)| {
        (
            name.to_string(),
            extensions.iter().map(|ext| ext.to_string()).collect(),
        )
    });
    CategoryTable::from_entries(entries, FALLBACK_CATEGORY)
        .unwrap_or_else(|e| unreachable!("standard category table is invalid: {e}"))
});

/// Errors raised while building a custom [`CategoryTable`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CategoryTableError {
    /// Two entries share the same category name.
    #[error("duplicate category name '{0}'")]
    DuplicateCategory(String),
    /// A category name is empty or contains a path separator.
    #[error("invalid category name '{0}': must be a single non-empty path component")]
    InvalidCategoryName(String),
}

/// A named group of recognized extensions.
#[derive(Debug, Clone, Serialize)]
pub struct Category {
    name: String,
    extensions: Vec<String>,
    #[serde(skip)]
    lookup: HashSet<String>,
}

impl Category {
    /// The category name, which is also its folder name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Extensions in the order they were declared, lowercased.
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// Returns true if this category lists the (already lowercased) extension.
    pub fn contains(&self, extension: &str) -> bool {
        self.lookup.contains(extension)
    }
}

/// Ordered mapping from category name to the extensions it recognizes.
///
/// Lookups walk the categories in table order and return the first one
/// listing the extension, so table order breaks ties between duplicated
/// extensions. The fallback category is always present.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryTable {
    categories: Vec<Category>,
    fallback: String,
}

impl CategoryTable {
    /// The process-wide standard table.
    pub fn standard() -> &'static CategoryTable {
        &STANDARD_TABLE
    }

    /// Builds a table from `(name, extensions)` pairs, preserving their order.
    ///
    /// Extensions are stored lowercased. If `fallback` is not among the
    /// entries it is appended as an empty category.
    ///
    /// # Errors
    ///
    /// Returns an error if a name repeats or cannot be used as a folder name.
    pub fn from_entries<I>(entries: I, fallback: &str) -> Result<Self, CategoryTableError>
    where
        I: IntoIterator<Item = (String, Vec<String>)>,
    {
        let mut categories: Vec<Category> = Vec::new();

        for (name, extensions) in entries {
            validate_name(&name)?;
            if categories.iter().any(|c| c.name == name) {
                return Err(CategoryTableError::DuplicateCategory(name));
            }

            let extensions: Vec<String> = extensions.iter().map(|e| e.to_lowercase()).collect();
            let lookup = extensions.iter().cloned().collect();
            categories.push(Category {
                name,
                extensions,
                lookup,
            });
        }

        validate_name(fallback)?;
        if !categories.iter().any(|c| c.name == fallback) {
            categories.push(Category {
                name: fallback.to_string(),
                extensions: Vec::new(),
                lookup: HashSet::new(),
            });
        }

        Ok(Self {
            categories,
            fallback: fallback.to_string(),
        })
    }

    /// All categories in table order, fallback included.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Category names in table order, fallback included.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.name.as_str())
    }

    /// The name of the fallback category.
    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Maps an extension such as `".pdf"` to a category name.
    ///
    /// The comparison is case-insensitive. The extension must include its
    /// leading '.', as stored in the table; anything unmatched (including
    /// the empty string) resolves to the fallback category.
    pub fn classify(&self, extension: &str) -> &str {
        let extension = extension.to_lowercase();
        self.categories
            .iter()
            .find(|c| c.contains(&extension))
            .map(|c| c.name.as_str())
            .unwrap_or(self.fallback.as_str())
    }

    /// Classifies a file by the extension of its name.
    pub fn classify_file_name(&self, file_name: &str) -> &str {
        self.classify(extension_of(file_name))
    }
}

fn validate_name(name: &str) -> Result<(), CategoryTableError> {
    let invalid = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains('/')
        || name.contains('\\');
    if invalid {
        return Err(CategoryTableError::InvalidCategoryName(name.to_string()));
    }
    Ok(())
}

/// Returns the extension of a file name, leading '.' included.
///
/// The extension runs from the last '.' to the end of the name. Leading dots
/// only mark a hidden file, so `".bashrc"` has no extension.
///
/// ```
/// use foldersort::file_category::extension_of;
///
/// assert_eq!(extension_of("report.final.PDF"), ".PDF");
/// assert_eq!(extension_of("archive.tar.gz"), ".gz");
/// assert_eq!(extension_of("Makefile"), "");
/// assert_eq!(extension_of(".bashrc"), "");
/// ```
pub fn extension_of(file_name: &str) -> &str {
    let stem_start = file_name.len() - file_name.trim_start_matches('.').len();
    match file_name[stem_start..].rfind('.') {
        Some(idx) => &file_name[stem_start + idx..],
        None => "",
    }
}

/// Classifies an extension against the standard table.
pub fn classify(extension: &str) -> &'static str {
    CategoryTable::standard().classify(extension)
}

/// Classifies a file name against the standard table.
pub fn classify_file_name(file_name: &str) -> &'static str {
    CategoryTable::standard().classify_file_name(file_name)
}
