//! Terminal output.
//!
//! All user-facing printing goes through [`OutputFormatter`] so styling stays
//! consistent. Diagnostics go through `tracing` instead.

use crate::file_category::CategoryTable;
use crate::file_organizer::{OrganizeObserver, PlannedMove};
use crate::report::{EntryOutcome, OrganizeReport};
use crate::summary::CategorySummary;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints a success message in green with a checkmark.
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Prints an error message in red with an X mark.
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Prints a warning message in yellow.
    pub fn warning(message: &str) {
        println!("{} {}", "⚠".yellow(), message);
    }

    pub fn info(message: &str) {
        println!("{}", message.cyan());
    }

    pub fn plain(message: &str) {
        println!("{}", message);
    }

    pub fn header(header: &str) {
        println!("\n{}", header.bold());
    }

    pub fn dry_run_notice(message: &str) {
        println!("{}", format!("[DRY RUN] {}", message).yellow());
    }

    /// Creates a progress bar for `total` file operations.
    pub fn create_progress_bar(total: u64) -> ProgressBar {
        let pb = ProgressBar::new(total);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░");
        pb.set_style(style);
        pb
    }

    /// Prints the outcome of an organize run.
    pub fn organize_report(report: &OrganizeReport) {
        for name in &report.created_folders {
            Self::plain(&format!("Created folder: {}", name));
        }

        Self::header("Files:");
        if report.outcomes.is_empty() {
            Self::plain("No files found to organize.");
        }
        for outcome in &report.outcomes {
            match outcome {
                EntryOutcome::Moved {
                    file_name,
                    category,
                    ..
                } => Self::success(&format!("{} => {}/", file_name, category)),
                EntryOutcome::Failed {
                    file_name, error, ..
                } => Self::error(&format!("Error moving {}: {}", file_name, error)),
                EntryOutcome::Excluded { file_name } => {
                    Self::plain(&format!("  {} (excluded)", file_name.dimmed()))
                }
            }
        }

        let failed = report.failures().count();
        Self::header("SUMMARY");
        Self::plain(&format!(
            "Moved: {}  Failed: {}  Excluded: {}",
            report.moved_count().to_string().green(),
            failed.to_string().red(),
            report.excluded_count()
        ));

        if failed == 0 {
            Self::success("All files organized successfully!");
        } else {
            Self::warning("Some files could not be organized. Please review errors above.");
        }
    }

    /// Prints a dry-run plan in processing order.
    pub fn plan(plan: &[PlannedMove]) {
        if plan.is_empty() {
            Self::dry_run_notice("No files found to organize.");
            return;
        }

        Self::dry_run_notice("Files would be organized as follows:");
        for planned in plan {
            if planned.conflict {
                Self::warning(&format!(
                    "{} → {}/ (destination already exists, would fail)",
                    planned.file_name, planned.category
                ));
            } else {
                Self::plain(&format!(" - {} → {}/", planned.file_name, planned.category));
            }
        }

        Self::dry_run_notice(&format!(
            "{} {}. No files were modified.",
            plan.len(),
            if plan.len() == 1 { "file" } else { "files" }
        ));
    }

    /// Prints category counts as a table, in table order.
    pub fn summary_table(summary: &CategorySummary) {
        Self::header("SUMMARY");

        let width = summary
            .counts
            .iter()
            .map(|c| c.category.len())
            .max()
            .unwrap_or(0)
            .max(8);

        println!(
            "{:<width$} | {}",
            "Category".bold(),
            "Files".bold(),
            width = width
        );
        println!("{}", "-".repeat(width + 10));

        for count in &summary.counts {
            let bar = "█".repeat(count.files.min(40));
            println!(
                "{:<width$} | {:>5} {}",
                count.category,
                count.files.to_string().green(),
                bar.cyan(),
                width = width
            );
        }

        println!("{}", "-".repeat(width + 10));
        let total = summary.total_files();
        println!(
            "{:<width$} | {:>5} {}",
            "Total".bold(),
            total.to_string().green().bold(),
            if total == 1 { "file" } else { "files" },
            width = width
        );

        if summary.unreadable > 0 {
            Self::warning(&format!("{} entries could not be read", summary.unreadable));
        }
    }

    /// Prints each category with its extensions.
    pub fn category_table(table: &CategoryTable) {
        Self::header("Categories");
        for category in table.categories() {
            let extensions = if category.name() == table.fallback() {
                "(everything else)".dimmed().to_string()
            } else {
                category.extensions().join(" ")
            };
            println!("{:<14} {}", category.name().bold(), extensions);
        }
    }
}

/// Drives a progress bar from organize notifications.
pub struct ProgressObserver {
    bar: Option<ProgressBar>,
}

impl ProgressObserver {
    pub fn new() -> Self {
        Self { bar: None }
    }

    /// Clears the bar once the run is over.
    pub fn finish(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl OrganizeObserver for ProgressObserver {
    fn started(&mut self, total: usize) {
        self.bar = Some(OutputFormatter::create_progress_bar(total as u64));
    }

    fn entry_done(&mut self, outcome: &EntryOutcome) {
        if let Some(bar) = &self.bar {
            bar.set_message(outcome.file_name().to_string());
            bar.inc(1);
        }
    }
}
