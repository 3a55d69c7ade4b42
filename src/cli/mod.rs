//! Command-line interface for chartprep
//!
//! ## Module Structure
//!
//! - `args`: CLI argument definitions and parsing structures (clap)
//! - `run`: Main entry point and execution

pub mod args;
mod run;

pub use args::Cli;
pub use run::run;
