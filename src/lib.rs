//! chartprep - provisioning CLI for Asterix chart runs
//!
//! This crate automates the manual workflow around an external chart
//! generator: verify the summary CSV exists, create a timestamped project
//! folder, stage the CSV into it, run the generator with that folder as its
//! working directory, and - only on success - remove the top-level original,
//! keeping the staged copy as the backup of record.
//!
//! chartprep can be used in two ways:
//! - **CLI**: Install via `cargo install chartprep` and run from the command
//!   line
//! - **Library**: Add as a dependency and drive [`Workflow`] directly with
//!   your own [`Clock`] and [`ProcessRunner`] implementations
//!
//! # Quick Start (CLI)
//!
//! ```bash
//! # Provision and run in the current directory
//! chartprep
//!
//! # See the plan without touching anything
//! chartprep --dry-run
//!
//! # Machine-readable completion report
//! chartprep --json
//! ```
//!
//! # Quick Start (Library)
//!
//! ```rust,no_run
//! use chartprep::{Config, NativeRunner, SystemClock, Workflow};
//!
//! let config = Config::builder().build().expect("valid defaults");
//! let clock = SystemClock;
//! let runner = NativeRunner;
//! let workflow = Workflow::new(&config, "/data/runs", &clock, &runner);
//! let report = workflow.run().expect("provisioning failed");
//! println!("{}", report.render_human());
//! ```
//!
//! # Stable Public API
//!
//! The following types are part of the stable public API for 1.x releases:
//!
//! - [`Config`] and [`ConfigBuilder`] - configuration management
//! - [`Workflow`] and [`WorkflowState`] - the provisioning run
//! - [`ChartPrepError`] - library error type
//! - [`ExitCode`] - CLI exit codes
//! - [`RunReport`] - completion report
//! - [`Clock`] / [`SystemClock`] - time source for folder naming
//! - [`ProcessRunner`] / [`NativeRunner`] / [`CommandSpec`] - collaborator
//!   invocation
//!
//! Library code returns [`ChartPrepError`] and does NOT call
//! `std::process::exit()`; only the CLI maps errors to process exit.

pub use crate::config::{Config, ConfigBuilder};
pub use crate::error::{ChartPrepError, UserFriendlyError};
pub use crate::exit_codes::ExitCode;
pub use crate::naming::{Clock, SystemClock, project_folder_name};
pub use crate::report::RunReport;
pub use crate::runner::{CommandSpec, NativeRunner, ProcessRunner, ProcessStatus};
pub use crate::workflow::{Workflow, WorkflowState};

#[cfg(any(test, feature = "test-utils"))]
pub use crate::naming::FixedClock;

pub mod config;
pub mod error;
pub mod exit_codes;
pub mod logging;
pub mod naming;
pub mod paths;
pub mod report;
pub mod runner;
pub mod workflow;

// CLI module - internal implementation detail, not part of stable public API
#[doc(hidden)]
pub mod cli;
