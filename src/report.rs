//! Completion report for a successful run.

use serde::Serialize;
use std::path::PathBuf;

use crate::paths::RunPaths;

/// What a successful run produced: the project folder, the expected chart
/// output location, and the CSV backup of record.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub project_dir: PathBuf,
    pub charts_dir: PathBuf,
    pub backup_csv: PathBuf,
}

impl RunReport {
    #[must_use]
    pub fn from_paths(paths: &RunPaths) -> Self {
        Self {
            project_dir: paths.project_dir.clone(),
            charts_dir: paths.charts_dir.clone(),
            backup_csv: paths.staged_input.clone(),
        }
    }

    /// Human-readable completion block.
    #[must_use]
    pub fn render_human(&self) -> String {
        format!(
            "Project provisioned successfully.\n\n  \
             Project folder: {}\n  \
             Charts output:  {}\n  \
             CSV backup:     {}\n",
            self.project_dir.display(),
            self.charts_dir.display(),
            self.backup_csv.display()
        )
    }

    /// JSON rendering for `--json`.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use std::path::Path;

    fn report() -> RunReport {
        let config = Config::builder().build().unwrap();
        let paths = RunPaths::resolve(Path::new("/work"), &config, "Project_03_05_2024_1407");
        RunReport::from_paths(&paths)
    }

    #[test]
    fn test_render_human_lists_all_paths() {
        let text = report().render_human();
        assert!(text.contains("Project_03_05_2024_1407"));
        assert!(text.contains("asterix_charts"));
        assert!(text.contains("summary_data.csv"));
    }

    #[test]
    fn test_json_report_keys() {
        let json = report().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value.get("project_dir").is_some());
        assert!(value.get("charts_dir").is_some());
        assert!(value.get("backup_csv").is_some());
    }
}
