//! The provisioning workflow.
//!
//! A single forward pass with no retries:
//! validate → provision → stage → delegate → cleanup → report.
//!
//! Failure semantics:
//! - nothing is created or modified before validation passes;
//! - a staging failure removes the partially provisioned folder, returning
//!   the filesystem to its pre-run state;
//! - a collaborator failure leaves both the original input and the project
//!   folder (with its staged copy) in place, and skips cleanup;
//! - the top-level original is deleted only after the collaborator
//!   succeeds.
//!
//! Interruption mid-run leaves whatever intermediate state existed at that
//! point; there is no rollback on cancellation.

use std::fmt;
use std::fs;
use std::io;
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::ChartPrepError;
use crate::naming::{Clock, project_folder_name};
use crate::paths::RunPaths;
use crate::report::RunReport;
use crate::runner::{CommandSpec, ProcessRunner};

/// States a run moves through, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowState {
    /// Input present, paths resolved, nothing touched yet.
    Validated,
    /// Project folder created.
    Provisioned,
    /// Input copied into the project folder.
    Staged,
    /// Collaborator ran to completion with exit code 0.
    Delegated,
    /// Original removed (or kept on request); run finished.
    Completed,
}

impl fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Validated => "validated",
            Self::Provisioned => "provisioned",
            Self::Staged => "staged",
            Self::Delegated => "delegated",
            Self::Completed => "completed",
        };
        f.write_str(s)
    }
}

/// Orchestrates one provisioning run.
///
/// The clock and process runner are injected so the whole workflow can be
/// driven deterministically in tests.
pub struct Workflow<'a> {
    config: &'a Config,
    base_dir: PathBuf,
    clock: &'a dyn Clock,
    runner: &'a dyn ProcessRunner,
}

impl<'a> Workflow<'a> {
    #[must_use]
    pub fn new(
        config: &'a Config,
        base_dir: impl Into<PathBuf>,
        clock: &'a dyn Clock,
        runner: &'a dyn ProcessRunner,
    ) -> Self {
        Self {
            config,
            base_dir: base_dir.into(),
            clock,
            runner,
        }
    }

    /// Validate the precondition and resolve every path the run would
    /// touch, without mutating anything. This is the whole of `--dry-run`.
    pub fn plan(&self) -> Result<RunPaths, ChartPrepError> {
        let input = self.base_dir.join(&self.config.input_file);
        if !input.is_file() {
            return Err(ChartPrepError::MissingInput { path: input });
        }
        let name = project_folder_name(&self.config.folder_prefix, self.clock.now());
        let paths = RunPaths::resolve(&self.base_dir, self.config, &name);
        if paths.project_dir.exists() {
            return Err(ChartPrepError::FolderCollision {
                path: paths.project_dir,
            });
        }
        Ok(paths)
    }

    /// Execute the full run.
    pub fn run(&self) -> Result<RunReport, ChartPrepError> {
        let paths = self.plan()?;
        info!(state = %WorkflowState::Validated, input = %paths.input.display(), "input present");

        self.provision(&paths)?;
        info!(state = %WorkflowState::Provisioned, project_dir = %paths.project_dir.display(), "project folder created");

        self.stage(&paths)?;
        info!(state = %WorkflowState::Staged, staged = %paths.staged_input.display(), "input staged");

        self.delegate(&paths)?;
        info!(state = %WorkflowState::Delegated, charts_dir = %paths.charts_dir.display(), "collaborator finished");

        self.cleanup(&paths)?;
        info!(state = %WorkflowState::Completed, "run complete");

        Ok(RunReport::from_paths(&paths))
    }

    fn provision(&self, paths: &RunPaths) -> Result<(), ChartPrepError> {
        match fs::create_dir(&paths.project_dir) {
            Ok(()) => Ok(()),
            // Lost the race between plan() and here
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                Err(ChartPrepError::FolderCollision {
                    path: paths.project_dir.clone(),
                })
            }
            Err(e) => Err(ChartPrepError::FolderCreation {
                path: paths.project_dir.clone(),
                source: e,
            }),
        }
    }

    fn stage(&self, paths: &RunPaths) -> Result<(), ChartPrepError> {
        if let Err(e) = fs::copy(&paths.input, &paths.staged_input) {
            self.compensate_staging(paths);
            return Err(ChartPrepError::Staging {
                input: paths.input.clone(),
                dest: paths.staged_input.clone(),
                source: e,
            });
        }
        Ok(())
    }

    // Staging failed: remove the folder we just created so the filesystem
    // matches its pre-run state. The original input is never touched here.
    fn compensate_staging(&self, paths: &RunPaths) {
        if paths.staged_input.exists() {
            if let Err(e) = fs::remove_file(&paths.staged_input) {
                warn!(path = %paths.staged_input.display(), error = %e, "could not remove partial staged copy");
                return;
            }
        }
        if let Err(e) = fs::remove_dir(&paths.project_dir) {
            warn!(path = %paths.project_dir.display(), error = %e, "could not remove project folder");
        }
    }

    fn delegate(&self, paths: &RunPaths) -> Result<(), ChartPrepError> {
        let cmd = CommandSpec::new(&self.config.collaborator_program)
            .args(&self.config.collaborator_args)
            .cwd(&paths.project_dir);
        debug!(program = %cmd.program_name(), cwd = %paths.project_dir.display(), "invoking collaborator");

        let status = self.runner.run(&cmd, self.config.collaborator_timeout)?;
        if !status.success() {
            return Err(ChartPrepError::CollaboratorFailed {
                program: self.config.collaborator_program.clone(),
                exit_code: status.exit_code,
            });
        }
        Ok(())
    }

    fn cleanup(&self, paths: &RunPaths) -> Result<(), ChartPrepError> {
        if self.config.keep_original {
            debug!(input = %paths.input.display(), "keeping top-level original on request");
            return Ok(());
        }
        fs::remove_file(&paths.input).map_err(|e| ChartPrepError::Cleanup {
            path: paths.input.clone(),
            source: e,
        })
    }
}
