//! Exit code constants and error mapping for chartprep.
//!
//! # Exit Code Table
//!
//! | Code | Constant | Description |
//! |------|----------|-------------|
//! | 0 | `SUCCESS` | Run completed successfully |
//! | 1 | `INTERNAL` | General/internal failure |
//! | 2 | `CLI_ARGS` | Invalid CLI arguments or configuration |
//! | 3 | `MISSING_INPUT` | Input CSV absent from the run directory |
//! | 4 | `FOLDER_CREATION` | Project folder could not be created |
//! | 5 | `FOLDER_COLLISION` | Derived project folder already exists |
//! | 6 | `STAGING` | Input CSV could not be copied into the project folder |
//! | 70 | `COLLABORATOR_FAILURE` | Chart generator invocation failed |

use crate::error::ChartPrepError;

/// Exit codes matching the documented exit code table.
///
/// Use the named constants for common exit codes, or
/// [`as_i32()`](Self::as_i32) to get the numeric value for
/// `std::process::exit()`. The numeric values are part of the public API
/// and will not change in 1.x releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(i32);

impl ExitCode {
    /// Success - run completed successfully
    pub const SUCCESS: ExitCode = ExitCode(0);

    /// Internal error - general failure
    pub const INTERNAL: ExitCode = ExitCode(1);

    /// CLI arguments error - invalid or missing command-line arguments or config
    pub const CLI_ARGS: ExitCode = ExitCode(2);

    /// Missing input - the input CSV is absent from the run directory
    pub const MISSING_INPUT: ExitCode = ExitCode(3);

    /// Folder creation - the project folder could not be created
    pub const FOLDER_CREATION: ExitCode = ExitCode(4);

    /// Folder collision - the derived project folder name already exists
    pub const FOLDER_COLLISION: ExitCode = ExitCode(5);

    /// Staging - the input CSV could not be copied into the project folder
    pub const STAGING: ExitCode = ExitCode(6);

    /// Collaborator failure - the chart generator could not be launched,
    /// timed out, or exited non-zero
    pub const COLLABORATOR_FAILURE: ExitCode = ExitCode(70);

    /// Get the numeric exit code value.
    ///
    /// Use this with `std::process::exit()`.
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        self.0
    }

    /// Create an `ExitCode` from a raw i32 value.
    ///
    /// Prefer using the named constants when possible.
    #[must_use]
    pub const fn from_i32(code: i32) -> Self {
        ExitCode(code)
    }
}

impl From<i32> for ExitCode {
    fn from(code: i32) -> Self {
        ExitCode(code)
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code.0
    }
}

impl ChartPrepError {
    /// Map this error to its CLI exit code.
    #[must_use]
    pub fn to_exit_code(&self) -> ExitCode {
        match self {
            Self::Config(_) => ExitCode::CLI_ARGS,
            Self::MissingInput { .. } => ExitCode::MISSING_INPUT,
            Self::FolderCreation { .. } => ExitCode::FOLDER_CREATION,
            Self::FolderCollision { .. } => ExitCode::FOLDER_COLLISION,
            Self::Staging { .. } => ExitCode::STAGING,
            Self::Runner(_) | Self::CollaboratorFailed { .. } => ExitCode::COLLABORATOR_FAILURE,
            Self::Cleanup { .. } | Self::Io(_) => ExitCode::INTERNAL,
        }
    }
}
