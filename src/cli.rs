//! Command-line interface.
//!
//! Parses arguments, checks the target directory before anything else runs,
//! and renders results through [`OutputFormatter`].

use crate::config::FilterConfig;
use crate::file_category::CategoryTable;
use crate::file_organizer::{Organizer, exists};
use crate::output::{OutputFormatter, ProgressObserver};
use crate::summary::summarize;
use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(name = "foldersort", version, about = "Sort files into category folders by extension")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: OrganizeCommand,
}

#[derive(Debug, Clone, Subcommand)]
pub enum OrganizeCommand {
    /// Move the files of a directory into category folders
    Organize(OrganizeArgs),
    /// Count the files of a directory tree per category
    Summary {
        /// Directory to inspect
        directory: PathBuf,
    },
    /// List the categories and their extensions
    Categories {
        /// Print the table as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Args)]
pub struct OrganizeArgs {
    /// Directory to organize
    pub directory: PathBuf,

    /// Show what would be moved without changing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Filter configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write a JSON report of the run
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Skip the per-category summary after organizing
    #[arg(long)]
    pub no_summary: bool,
}

/// Runs one command.
///
/// # Errors
///
/// Fails if the target directory does not exist, the configuration is
/// invalid, or the run aborts. Individual move failures are printed, not
/// returned.
pub fn run_cli(command: OrganizeCommand) -> anyhow::Result<()> {
    match command {
        OrganizeCommand::Organize(args) => {
            if args.dry_run {
                organize_dry_run(&args)
            } else {
                organize_directory(&args)
            }
        }
        OrganizeCommand::Summary { directory } => show_summary(&directory),
        OrganizeCommand::Categories { json } => list_categories(json),
    }
}

fn require_directory(directory: &Path) -> anyhow::Result<()> {
    if !exists(directory) {
        OutputFormatter::error("Directory does not exist!");
        bail!("directory does not exist: {}", directory.display());
    }
    Ok(())
}

fn build_organizer(config_path: Option<&Path>) -> anyhow::Result<Organizer<'static>> {
    let filters = FilterConfig::load(config_path)
        .context("loading configuration")?
        .compile()
        .context("compiling filters")?;
    Ok(Organizer::new(CategoryTable::standard()).with_filters(filters))
}

fn organize_directory(args: &OrganizeArgs) -> anyhow::Result<()> {
    require_directory(&args.directory)?;
    let organizer = build_organizer(args.config.as_deref())?;

    OutputFormatter::info(&format!(
        "Organizing contents of: {}",
        args.directory.display()
    ));

    let mut progress = ProgressObserver::new();
    let result = organizer.organize_with(&args.directory, &mut progress);
    progress.finish();
    let report =
        result.with_context(|| format!("organizing {}", args.directory.display()))?;

    OutputFormatter::organize_report(&report);

    if let Some(path) = &args.report {
        match report.save_json(path) {
            Ok(()) => OutputFormatter::success(&format!("Report saved to {}", path.display())),
            Err(e) => OutputFormatter::warning(&format!("Could not save report: {}", e)),
        }
    }

    if !args.no_summary {
        show_summary(&args.directory)?;
    }

    Ok(())
}

fn organize_dry_run(args: &OrganizeArgs) -> anyhow::Result<()> {
    require_directory(&args.directory)?;
    let organizer = build_organizer(args.config.as_deref())?;

    OutputFormatter::dry_run_notice(&format!(
        "Analyzing contents of: {}",
        args.directory.display()
    ));

    let plan = organizer
        .plan(&args.directory)
        .with_context(|| format!("planning {}", args.directory.display()))?;
    OutputFormatter::plan(&plan);

    Ok(())
}

fn show_summary(directory: &Path) -> anyhow::Result<()> {
    require_directory(directory)?;
    let summary = summarize(directory, CategoryTable::standard())
        .with_context(|| format!("summarizing {}", directory.display()))?;
    OutputFormatter::summary_table(&summary);
    Ok(())
}

fn list_categories(json: bool) -> anyhow::Result<()> {
    let table = CategoryTable::standard();
    if json {
        let rendered =
            serde_json::to_string_pretty(table).context("serializing category table")?;
        OutputFormatter::plain(&rendered);
    } else {
        OutputFormatter::category_table(table);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_organize_flags() {
        let cli = Cli::parse_from([
            "foldersort",
            "-vv",
            "organize",
            "/tmp/downloads",
            "--dry-run",
            "--report",
            "run.json",
        ]);

        assert_eq!(cli.verbose, 2);
        match cli.command {
            OrganizeCommand::Organize(args) => {
                assert_eq!(args.directory, PathBuf::from("/tmp/downloads"));
                assert!(args.dry_run);
                assert_eq!(args.report, Some(PathBuf::from("run.json")));
                assert!(args.config.is_none());
                assert!(!args.no_summary);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_summary_and_categories() {
        let cli = Cli::parse_from(["foldersort", "summary", "."]);
        assert!(matches!(cli.command, OrganizeCommand::Summary { .. }));

        let cli = Cli::parse_from(["foldersort", "categories", "--json"]);
        assert!(matches!(
            cli.command,
            OrganizeCommand::Categories { json: true }
        ));
    }

    #[test]
    fn test_organize_requires_directory_argument() {
        assert!(Cli::try_parse_from(["foldersort", "organize"]).is_err());
    }
}
