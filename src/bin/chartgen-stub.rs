//! Stub chart generator for development testing
//!
//! This binary mimics the external chart generator for testing chartprep
//! without a real rendering toolchain. It follows the same contract: read
//! `summary_data.csv` from the working directory, write PNG files into
//! `asterix_charts/`, exit 0 on success.
//!
//! The orchestrator invokes the generator without arguments, so scenarios
//! are selected through the environment:
//!
//! - `CHARTGEN_STUB_SCENARIO`: `success` (default), `fail`,
//!   `missing-input`, or `hang`
//! - `CHARTGEN_STUB_INPUT`: input file name (default `summary_data.csv`)
//! - `CHARTGEN_STUB_OUTPUT_DIR`: output directory (default `asterix_charts`)
//! - `CHARTGEN_STUB_HANG_SECS`: sleep duration for the `hang` scenario
//!   (default 10 seconds)

use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::path::Path;
use std::thread;
use std::time::Duration;

use chartprep::paths::ensure_dir_all;

// Matches the chart set the real generator produces
const CHART_FILES: &[&str] = &["LF_Media.png", "Expression_Level.png", "WCW_gL.png"];

const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";

fn main() -> Result<()> {
    let scenario =
        env::var("CHARTGEN_STUB_SCENARIO").unwrap_or_else(|_| "success".to_string());
    let input =
        env::var("CHARTGEN_STUB_INPUT").unwrap_or_else(|_| "summary_data.csv".to_string());
    let output_dir =
        env::var("CHARTGEN_STUB_OUTPUT_DIR").unwrap_or_else(|_| "asterix_charts".to_string());

    match scenario.as_str() {
        "fail" => run_fail(&output_dir),
        "missing-input" => run_missing_input(&input),
        "hang" => run_hang(),
        _ => run_success(&input, &output_dir),
    }
}

fn run_success(input: &str, output_dir: &str) -> Result<()> {
    let cwd = env::current_dir().context("failed to read working directory")?;
    let input_path = cwd.join(input);
    if !input_path.is_file() {
        eprintln!("Error: {input} not found!");
        std::process::exit(2);
    }

    let rows = count_data_rows(&input_path)?;
    println!("Read {rows} data rows from {input}");

    let out = cwd.join(output_dir);
    ensure_dir_all(&out).with_context(|| format!("failed to create {}", out.display()))?;

    for name in CHART_FILES {
        let mut bytes = PNG_MAGIC.to_vec();
        bytes.extend_from_slice(name.as_bytes());
        fs::write(out.join(name), bytes)
            .with_context(|| format!("failed to write {name}"))?;
    }

    // Record what this process observed, for inspection by callers
    let manifest = format!("cwd={}\ninput_rows={rows}\ncharts={}\n", cwd.display(), CHART_FILES.len());
    fs::write(out.join("manifest.txt"), manifest).context("failed to write manifest")?;

    println!("Generated {} charts in {output_dir}/", CHART_FILES.len());
    Ok(())
}

fn run_fail(output_dir: &str) -> Result<()> {
    // Leave partial output behind, like a renderer dying mid-run
    let out = Path::new(output_dir);
    ensure_dir_all(out)?;
    fs::write(out.join("LF_Media.png"), PNG_MAGIC)?;
    eprintln!("Error: chart rendering failed on column 19");
    std::process::exit(1);
}

fn run_missing_input(input: &str) -> Result<()> {
    eprintln!("Error: {input} not found!");
    std::process::exit(2);
}

/// Blocks for a configurable duration to test timeout handling.
fn run_hang() -> Result<()> {
    let hang_secs: u64 = env::var("CHARTGEN_STUB_HANG_SECS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(10);
    thread::sleep(Duration::from_secs(hang_secs));
    println!("Hang scenario completed after {hang_secs} seconds");
    Ok(())
}

fn count_data_rows(path: &Path) -> Result<usize> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    // First line is the header
    Ok(raw.lines().count().saturating_sub(1))
}
