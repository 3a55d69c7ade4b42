use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub use crate::runner::RunnerError;

/// Library-level error type with rich context and user-friendly reporting.
///
/// `ChartPrepError` is the primary error type returned by chartprep library
/// operations. It provides:
/// - Detailed error information for programmatic handling
/// - User-friendly messages with context and actionable suggestions
/// - Mapping to CLI exit codes via [`to_exit_code()`](Self::to_exit_code)
///
/// # Exit Code Mapping
///
/// | Exit Code | Error Type |
/// |-----------|------------|
/// | 2 | Configuration/CLI argument errors |
/// | 3 | Input CSV missing |
/// | 4 | Project folder creation failed |
/// | 5 | Project folder already exists |
/// | 6 | Staging copy failed |
/// | 70 | Collaborator launch/exit/timeout failure |
/// | 1 | Other errors |
///
/// Library code returns `ChartPrepError` and does NOT call
/// `std::process::exit()`; only the CLI maps errors to process exit.
#[derive(Error, Debug)]
pub enum ChartPrepError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Input file not found: {path}")]
    MissingInput { path: PathBuf },

    #[error("Project folder already exists: {path}")]
    FolderCollision { path: PathBuf },

    #[error("Failed to create project folder {path}: {source}")]
    FolderCreation {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to stage {input} into {dest}: {source}")]
    Staging {
        input: PathBuf,
        dest: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Collaborator error: {0}")]
    Runner(#[from] RunnerError),

    #[error("Collaborator {program} exited with {}", display_exit(.exit_code))]
    CollaboratorFailed {
        program: String,
        exit_code: Option<i32>,
    },

    #[error("Failed to remove original input {path}: {source}")]
    Cleanup {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

fn display_exit(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("code {c}"),
        None => "signal".to_string(),
    }
}

/// Configuration file and value errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    #[error("invalid config file {path}: {reason}")]
    ParseFailed { path: PathBuf, reason: String },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Trait for providing user-friendly error reporting with context and suggestions.
pub trait UserFriendlyError {
    /// Get a user-friendly error message
    fn user_message(&self) -> String;

    /// Get contextual information about the error
    fn context(&self) -> Option<String>;

    /// Get actionable suggestions for resolving the error
    fn suggestions(&self) -> Vec<String>;
}

impl UserFriendlyError for ChartPrepError {
    fn user_message(&self) -> String {
        match self {
            Self::Config(e) => format!("Configuration problem: {e}"),
            Self::MissingInput { path } => {
                format!("Input file not found: {}", path.display())
            }
            Self::FolderCollision { path } => {
                format!("Project folder already exists: {}", path.display())
            }
            Self::FolderCreation { path, source } => {
                format!(
                    "Could not create project folder {}: {source}",
                    path.display()
                )
            }
            Self::Staging { input, dest, source } => {
                format!(
                    "Could not copy {} to {}: {source}",
                    input.display(),
                    dest.display()
                )
            }
            Self::Runner(e) => format!("Chart generator failed to run: {e}"),
            Self::CollaboratorFailed { program, exit_code } => match exit_code {
                Some(code) => format!("Chart generator '{program}' failed with exit code {code}"),
                None => format!("Chart generator '{program}' was terminated by a signal"),
            },
            Self::Cleanup { path, source } => {
                format!(
                    "Charts were generated, but the original {} could not be removed: {source}",
                    path.display()
                )
            }
            Self::Io(e) => format!("IO error: {e}"),
        }
    }

    fn context(&self) -> Option<String> {
        match self {
            Self::MissingInput { .. } => {
                Some("The run starts from the summary CSV exported from your tracking sheet.".to_string())
            }
            Self::FolderCollision { .. } => Some(
                "Folder names are derived from the current date and minute; a folder from an earlier run within the same minute is still present.".to_string(),
            ),
            Self::Runner(_) | Self::CollaboratorFailed { .. } => Some(
                "The original input file was left in place; no cleanup was performed.".to_string(),
            ),
            Self::Staging { .. } => Some(
                "The original input file is untouched; the partially provisioned folder was removed.".to_string(),
            ),
            _ => None,
        }
    }

    fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MissingInput { path } => {
                let name = path
                    .file_name()
                    .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
                vec![
                    "Export your Summary tab as CSV".to_string(),
                    format!("Save it as '{name}'"),
                    "Put it in the folder you are running chartprep from".to_string(),
                ]
            }
            Self::FolderCollision { .. } => vec![
                "Wait a minute and run again, or rename the existing folder".to_string(),
            ],
            Self::Runner(RunnerError::Spawn { .. }) => vec![
                "Check that the chart generator is installed and on PATH".to_string(),
                "Use --collaborator to point at the right program".to_string(),
            ],
            Self::Runner(RunnerError::Timeout { .. }) => vec![
                "Raise the limit with --timeout if chart generation legitimately takes longer".to_string(),
            ],
            Self::CollaboratorFailed { .. } => vec![
                "Check the chart generator's output above for details".to_string(),
                "Re-run after fixing the reported problem; the staged copy is kept in the project folder".to_string(),
            ],
            _ => Vec::new(),
        }
    }
}

impl ChartPrepError {
    /// Format this error for terminal display: message, context, and
    /// suggestions in a single block.
    #[must_use]
    pub fn display_for_user(&self) -> String {
        let mut out = format!("Error: {}", self.user_message());
        if let Some(ctx) = self.context() {
            out.push_str(&format!("\n\n{ctx}"));
        }
        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str("\n\nPlease make sure you:");
            for (i, s) in suggestions.iter().enumerate() {
                out.push_str(&format!("\n{}. {s}", i + 1));
            }
        }
        out
    }
}
