//! Command-line interface for the harvester.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use crate::config::{base_url, validate_boe_id, DEFAULT_MAX_RESPONSE_SIZE};
use crate::error::{HarvesterError, Result};
use crate::extractor::extract_articles_from_boe;
use crate::harvester::download_law_from;
use crate::normalize::compare_content;
use crate::output::{render, save_law, write_atomic, OutputFormat};
use crate::sync::{plan_sync, StoredArticle, SyncPlan, VerificationSummary};
use crate::types::ExtractionOptions;

/// BOE Harvester - Extract articles from consolidated Spanish legislation.
#[derive(Parser)]
#[command(name = "boe-harvester")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract articles from a saved consolidated-text HTML page.
    Extract {
        /// HTML file to read
        file: PathBuf,

        /// Also extract dispositions (adicionales, transitorias, ...)
        #[arg(short, long)]
        disposiciones: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Download a law by BOE ID and save the extracted articles.
    Download {
        /// BOE identifier (e.g., BOE-A-2015-10565)
        boe_id: String,

        /// Also extract dispositions (adicionales, transitorias, ...)
        #[arg(short, long)]
        disposiciones: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Output directory (default: boe/)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Maximum accepted page size in bytes
        #[arg(long, default_value_t = DEFAULT_MAX_RESPONSE_SIZE)]
        max_size: u64,
    },

    /// Compare two text files the way stored and fresh content are compared.
    Compare {
        /// First text file
        a: PathBuf,

        /// Second text file
        b: PathBuf,
    },

    /// Plan the sync of stored articles (JSON) against a fresh HTML page.
    Sync {
        /// JSON array of stored articles
        stored: PathBuf,

        /// HTML file to extract from
        file: PathBuf,

        /// Include a verification summary for this BOE identifier
        #[arg(long)]
        boe_id: Option<String>,

        /// Also extract dispositions (adicionales, transitorias, ...)
        #[arg(short, long)]
        disposiciones: bool,
    },
}

#[derive(Serialize)]
struct SyncReport<'a> {
    plan: &'a SyncPlan,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<VerificationSummary>,
}

fn options_for(disposiciones: bool) -> ExtractionOptions {
    ExtractionOptions {
        include_disposiciones: disposiciones,
    }
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Extract {
            file,
            disposiciones,
            format,
            output,
        } => extract_command(&file, options_for(disposiciones), format, output.as_deref()),
        Commands::Download {
            boe_id,
            disposiciones,
            format,
            output,
            max_size,
        } => download_command(
            &boe_id,
            options_for(disposiciones),
            format,
            output.as_deref(),
            max_size,
        ),
        Commands::Compare { a, b } => compare_command(&a, &b),
        Commands::Sync {
            stored,
            file,
            boe_id,
            disposiciones,
        } => sync_command(
            &stored,
            &file,
            boe_id.as_deref(),
            options_for(disposiciones),
        ),
    }
}

/// Execute the extract command.
fn extract_command(
    file: &Path,
    options: ExtractionOptions,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<()> {
    let html = fs::read_to_string(file)?;
    let articles = extract_articles_from_boe(&html, &options);
    let text = render(&articles, format)?;

    match output {
        Some(path) => {
            write_atomic(path, &text)?;
            eprintln!(
                "{} {} articles to {}",
                style("Wrote").green().bold(),
                articles.len(),
                path.display()
            );
        }
        None => print!("{text}"),
    }
    Ok(())
}

/// Execute the download command.
fn download_command(
    boe_id: &str,
    options: ExtractionOptions,
    format: OutputFormat,
    output: Option<&Path>,
    max_size: u64,
) -> Result<()> {
    // Validate inputs before making HTTP requests
    validate_boe_id(boe_id)?;

    if let Some(output_dir) = output {
        if output_dir.exists() && !output_dir.is_dir() {
            return Err(HarvesterError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("Output path is not a directory: {}", output_dir.display()),
            )));
        }
    }

    println!("{} {}", style("Downloading").bold(), style(boe_id).cyan());
    println!();

    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.set_message("Downloading consolidated text...");
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let law = match download_law_from(&base_url(), boe_id, &options, max_size) {
        Ok(law) => law,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    let dispositions = law.articles.iter().filter(|a| a.is_disposition()).count();
    println!("  Articles: {}", law.articles.len() - dispositions);
    if options.include_disposiciones {
        println!("  Dispositions: {dispositions}");
    }
    if law.articles.is_empty() {
        println!("  {}", style("No articles found").yellow().bold());
    }

    pb.set_message("Saving...");
    let output_path = match save_law(&law, format, output) {
        Ok(path) => path,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };
    pb.finish_and_clear();

    println!();
    println!(
        "{} {}",
        style("Saved to:").green().bold(),
        output_path.display()
    );
    Ok(())
}

/// Execute the compare command.
fn compare_command(a: &Path, b: &Path) -> Result<()> {
    let comparison = compare_content(&fs::read_to_string(a)?, &fs::read_to_string(b)?);

    let verdict = if comparison.matches {
        style("match").green().bold()
    } else {
        style("differs").yellow().bold()
    };
    println!("Similarity: {}% ({verdict})", comparison.similarity);
    Ok(())
}

/// Execute the sync command.
fn sync_command(
    stored: &Path,
    file: &Path,
    boe_id: Option<&str>,
    options: ExtractionOptions,
) -> Result<()> {
    if let Some(id) = boe_id {
        validate_boe_id(id)?;
    }

    let rows: Vec<StoredArticle> = serde_json::from_str(&fs::read_to_string(stored)?)?;
    let html = fs::read_to_string(file)?;
    let articles = extract_articles_from_boe(&html, &options);

    let plan = plan_sync(&rows, &articles);
    let report = SyncReport {
        plan: &plan,
        summary: boe_id.map(|id| plan.summary(id)),
    };
    print!("{}", render(&report, OutputFormat::Json)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_download() {
        let cli = Cli::parse_from(["boe-harvester", "download", "BOE-A-2015-10565"]);

        let Commands::Download {
            boe_id,
            disposiciones,
            format,
            output,
            max_size,
        } = cli.command
        else {
            panic!("expected download command");
        };
        assert_eq!(boe_id, "BOE-A-2015-10565");
        assert!(!disposiciones);
        assert_eq!(format, OutputFormat::Json);
        assert!(output.is_none());
        assert_eq!(max_size, DEFAULT_MAX_RESPONSE_SIZE);
    }

    #[test]
    fn test_cli_parse_extract_with_options() {
        let cli = Cli::parse_from([
            "boe-harvester",
            "extract",
            "page.html",
            "--disposiciones",
            "--format",
            "yaml",
            "-o",
            "out.yaml",
        ]);

        let Commands::Extract {
            file,
            disposiciones,
            format,
            output,
        } = cli.command
        else {
            panic!("expected extract command");
        };
        assert_eq!(file, PathBuf::from("page.html"));
        assert!(disposiciones);
        assert_eq!(format, OutputFormat::Yaml);
        assert_eq!(output, Some(PathBuf::from("out.yaml")));
    }

    #[test]
    fn test_cli_parse_sync() {
        let cli = Cli::parse_from([
            "boe-harvester",
            "sync",
            "stored.json",
            "page.html",
            "--boe-id",
            "BOE-A-2015-10565",
        ]);

        let Commands::Sync { boe_id, .. } = cli.command else {
            panic!("expected sync command");
        };
        assert_eq!(boe_id.as_deref(), Some("BOE-A-2015-10565"));
    }

    #[test]
    fn test_cli_rejects_unknown_format() {
        let result = Cli::try_parse_from(["boe-harvester", "extract", "a.html", "-f", "xml"]);
        assert!(result.is_err());
    }
}
