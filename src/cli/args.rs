//! CLI argument definitions and parsing structures
//!
//! This module defines the command-line interface structure using clap.

use clap::Parser;
use std::path::PathBuf;

/// chartprep - provisioning tool for Asterix chart runs
#[derive(Parser, Debug)]
#[command(name = "chartprep")]
#[command(about = "Provision a timestamped project folder and run the chart generator over a summary CSV")]
#[command(long_about = r#"
chartprep automates the manual steps around an Asterix chart run: it checks
that the summary CSV is present, creates a Project_<date>_<time> folder,
copies the CSV into it, runs the chart generator with that folder as its
working directory, and - only when the generator succeeds - removes the
top-level CSV, keeping the copy in the project folder as the backup of
record.

EXAMPLES:
  # Provision and run in the current directory
  chartprep

  # Run against another directory, keeping the top-level CSV
  chartprep --directory /data/runs --keep-original

  # See what would happen without touching anything
  chartprep --dry-run

  # Use a different generator binary and a shorter timeout
  chartprep --collaborator ./my-chartgen --timeout 120

CONFIGURATION:
  Configuration is loaded with precedence: CLI flags > config file > defaults
  Config file is discovered by searching upward from the run directory for
  .chartprep/config.toml; use --config to specify an explicit path

EXIT CODES:
  0 success, 2 bad arguments/config, 3 input CSV missing, 4 folder creation
  failed, 5 folder already exists, 6 staging copy failed, 70 chart generator
  failed, 1 other errors
"#)]
#[command(version)]
pub struct Cli {
    /// Path to configuration file (overrides discovery)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Base directory for the run (default: current working directory)
    #[arg(long)]
    pub directory: Option<PathBuf>,

    /// Input CSV file name expected in the run directory
    #[arg(long)]
    pub input: Option<String>,

    /// Prefix for the derived project folder name
    #[arg(long)]
    pub prefix: Option<String>,

    /// Subdirectory the chart generator writes into
    #[arg(long)]
    pub charts_dir: Option<String>,

    /// External chart generator program to invoke
    #[arg(long)]
    pub collaborator: Option<String>,

    /// Seconds the chart generator may run before being killed
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Keep the top-level CSV after a successful run
    #[arg(long)]
    pub keep_original: bool,

    /// Resolve and print the plan without touching the filesystem
    #[arg(long)]
    pub dry_run: bool,

    /// Emit the completion report as JSON
    #[arg(long)]
    pub json: bool,

    /// Never wait for Enter (pauses are also skipped when stdin is not a terminal)
    #[arg(long)]
    pub no_pause: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_defaults() {
        let cli = Cli::try_parse_from(["chartprep"]).unwrap();
        assert!(cli.input.is_none());
        assert!(!cli.dry_run);
        assert!(!cli.keep_original);
        assert!(!cli.json);
    }

    #[test]
    fn test_cli_parses_all_flags() {
        let cli = Cli::try_parse_from([
            "chartprep",
            "--directory",
            "/data/runs",
            "--input",
            "batch.csv",
            "--prefix",
            "Run",
            "--charts-dir",
            "plots",
            "--collaborator",
            "./gen",
            "--timeout",
            "120",
            "--keep-original",
            "--dry-run",
            "--json",
            "--no-pause",
            "--verbose",
        ])
        .unwrap();
        assert_eq!(cli.directory.as_deref(), Some(std::path::Path::new("/data/runs")));
        assert_eq!(cli.input.as_deref(), Some("batch.csv"));
        assert_eq!(cli.prefix.as_deref(), Some("Run"));
        assert_eq!(cli.charts_dir.as_deref(), Some("plots"));
        assert_eq!(cli.collaborator.as_deref(), Some("./gen"));
        assert_eq!(cli.timeout, Some(120));
        assert!(cli.keep_original && cli.dry_run && cli.json && cli.no_pause && cli.verbose);
    }

    #[test]
    fn test_cli_rejects_unknown_flag() {
        assert!(Cli::try_parse_from(["chartprep", "--nonsense"]).is_err());
    }
}
