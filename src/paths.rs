use std::path::{Path, PathBuf};

use crate::config::Config;

/// Resolved filesystem locations for one provisioning run.
///
/// All paths are children of the run directory; nothing outside it is ever
/// touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPaths {
    /// Top-level input CSV (the user-supplied original).
    pub input: PathBuf,
    /// Project folder derived from the clock.
    pub project_dir: PathBuf,
    /// Staged copy of the input inside the project folder.
    pub staged_input: PathBuf,
    /// Where the collaborator is expected to write chart files.
    pub charts_dir: PathBuf,
}

impl RunPaths {
    #[must_use]
    pub fn resolve(base_dir: &Path, config: &Config, folder_name: &str) -> Self {
        let project_dir = base_dir.join(folder_name);
        Self {
            input: base_dir.join(&config.input_file),
            staged_input: project_dir.join(&config.input_file),
            charts_dir: project_dir.join(&config.charts_dir),
            project_dir,
        }
    }
}

/// mkdir -p; treat `AlreadyExists` as success (removes TOCTTOU races)
pub fn ensure_dir_all<P: AsRef<Path>>(p: P) -> std::io::Result<()> {
    match std::fs::create_dir_all(&p) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => Ok(()),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_paths() {
        let config = Config::builder().build().unwrap();
        let paths = RunPaths::resolve(Path::new("/work"), &config, "Project_03_05_2024_1407");

        assert_eq!(paths.input, Path::new("/work/summary_data.csv"));
        assert_eq!(paths.project_dir, Path::new("/work/Project_03_05_2024_1407"));
        assert_eq!(
            paths.staged_input,
            Path::new("/work/Project_03_05_2024_1407/summary_data.csv")
        );
        assert_eq!(
            paths.charts_dir,
            Path::new("/work/Project_03_05_2024_1407/asterix_charts")
        );
    }

    #[test]
    fn test_ensure_dir_all_idempotent() {
        let tmp = tempfile::TempDir::new().unwrap();
        let dir = tmp.path().join("a").join("b");
        ensure_dir_all(&dir).unwrap();
        ensure_dir_all(&dir).unwrap();
        assert!(dir.is_dir());
    }
}
