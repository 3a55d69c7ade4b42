//! Configuration management for chartprep.
//!
//! Hierarchical configuration with discovery and precedence:
//! CLI > file > defaults. The config file is `.chartprep/config.toml`,
//! discovered by searching upward from the run directory; `--config`
//! overrides discovery.
//!
//! ```toml
//! [provision]
//! input_file = "summary_data.csv"
//! folder_prefix = "Project"
//! charts_dir = "asterix_charts"
//! keep_original = false
//!
//! [collaborator]
//! program = "chartgen"
//! args = []
//! timeout_seconds = 600
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;

/// Built-in defaults.
pub const DEFAULT_INPUT_FILE: &str = "summary_data.csv";
pub const DEFAULT_FOLDER_PREFIX: &str = "Project";
pub const DEFAULT_CHARTS_DIR: &str = "asterix_charts";
pub const DEFAULT_COLLABORATOR: &str = "chartgen";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 600;

const CONFIG_DIR: &str = ".chartprep";
const CONFIG_FILE: &str = "config.toml";

/// Resolved configuration for a run.
///
/// Construct via [`Config::discover_from`] for CLI-like behavior or
/// [`Config::builder`] for programmatic configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Input CSV file name, expected in the run directory.
    pub input_file: String,
    /// Prefix for the derived project folder name.
    pub folder_prefix: String,
    /// Subdirectory the collaborator writes chart files into.
    pub charts_dir: String,
    /// Skip deleting the top-level original after a successful run.
    pub keep_original: bool,
    /// External chart generator program.
    pub collaborator_program: String,
    /// Extra arguments passed to the collaborator (default: none).
    pub collaborator_args: Vec<String>,
    /// How long the collaborator may run before being killed.
    pub collaborator_timeout: Duration,
}

/// CLI-provided overrides, highest precedence.
///
/// Filled in by the CLI layer from parsed flags; `None` means "not given".
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub config: Option<PathBuf>,
    pub input_file: Option<String>,
    pub folder_prefix: Option<String>,
    pub charts_dir: Option<String>,
    pub collaborator_program: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub keep_original: bool,
}

/// On-disk config file schema. All fields optional; missing values fall
/// through to the next layer.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ConfigFile {
    pub provision: Option<ProvisionSection>,
    pub collaborator: Option<CollaboratorSection>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ProvisionSection {
    pub input_file: Option<String>,
    pub folder_prefix: Option<String>,
    pub charts_dir: Option<String>,
    pub keep_original: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CollaboratorSection {
    pub program: Option<String>,
    pub args: Option<Vec<String>>,
    pub timeout_seconds: Option<u64>,
}

impl Config {
    /// Discover and resolve configuration starting from `start_dir`.
    ///
    /// Precedence: CLI overrides > discovered (or explicit) config file >
    /// built-in defaults.
    pub fn discover_from(start_dir: &Path, cli: &CliOverrides) -> Result<Self, ConfigError> {
        let file = match &cli.config {
            Some(path) => Some(load_config_file(path)?),
            None => match discover_config_file_from(start_dir) {
                Some(path) => Some(load_config_file(&path)?),
                None => None,
            },
        };
        let file = file.unwrap_or_default();
        let provision = file.provision.unwrap_or_default();
        let collaborator = file.collaborator.unwrap_or_default();

        let mut builder = Config::builder();
        if let Some(v) = provision.input_file {
            builder = builder.input_file(v);
        }
        if let Some(v) = provision.folder_prefix {
            builder = builder.folder_prefix(v);
        }
        if let Some(v) = provision.charts_dir {
            builder = builder.charts_dir(v);
        }
        if let Some(v) = provision.keep_original {
            builder = builder.keep_original(v);
        }
        if let Some(v) = collaborator.program {
            builder = builder.collaborator_program(v);
        }
        if let Some(v) = collaborator.args {
            builder = builder.collaborator_args(v);
        }
        if let Some(v) = collaborator.timeout_seconds {
            builder = builder.timeout_seconds(v);
        }

        // CLI layer wins over the file layer.
        if let Some(v) = &cli.input_file {
            builder = builder.input_file(v.clone());
        }
        if let Some(v) = &cli.folder_prefix {
            builder = builder.folder_prefix(v.clone());
        }
        if let Some(v) = &cli.charts_dir {
            builder = builder.charts_dir(v.clone());
        }
        if let Some(v) = &cli.collaborator_program {
            builder = builder.collaborator_program(v.clone());
        }
        if let Some(v) = cli.timeout_seconds {
            builder = builder.timeout_seconds(v);
        }
        if cli.keep_original {
            builder = builder.keep_original(true);
        }

        builder.build()
    }

    /// Builder with built-in defaults.
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for programmatic configuration.
///
/// Starts from the built-in defaults; `build()` validates the result.
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    input_file: String,
    folder_prefix: String,
    charts_dir: String,
    keep_original: bool,
    collaborator_program: String,
    collaborator_args: Vec<String>,
    timeout_seconds: u64,
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self {
            input_file: DEFAULT_INPUT_FILE.to_string(),
            folder_prefix: DEFAULT_FOLDER_PREFIX.to_string(),
            charts_dir: DEFAULT_CHARTS_DIR.to_string(),
            keep_original: false,
            collaborator_program: DEFAULT_COLLABORATOR.to_string(),
            collaborator_args: Vec::new(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl ConfigBuilder {
    #[must_use]
    pub fn input_file(mut self, v: impl Into<String>) -> Self {
        self.input_file = v.into();
        self
    }

    #[must_use]
    pub fn folder_prefix(mut self, v: impl Into<String>) -> Self {
        self.folder_prefix = v.into();
        self
    }

    #[must_use]
    pub fn charts_dir(mut self, v: impl Into<String>) -> Self {
        self.charts_dir = v.into();
        self
    }

    #[must_use]
    pub fn keep_original(mut self, v: bool) -> Self {
        self.keep_original = v;
        self
    }

    #[must_use]
    pub fn collaborator_program(mut self, v: impl Into<String>) -> Self {
        self.collaborator_program = v.into();
        self
    }

    #[must_use]
    pub fn collaborator_args(mut self, v: Vec<String>) -> Self {
        self.collaborator_args = v;
        self
    }

    #[must_use]
    pub fn timeout_seconds(mut self, v: u64) -> Self {
        self.timeout_seconds = v;
        self
    }

    /// Validate and build the resolved [`Config`].
    pub fn build(self) -> Result<Config, ConfigError> {
        validate_file_name("provision.input_file", &self.input_file)?;
        validate_file_name("provision.folder_prefix", &self.folder_prefix)?;
        validate_file_name("provision.charts_dir", &self.charts_dir)?;
        if self.collaborator_program.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "collaborator.program".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if self.timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                field: "collaborator.timeout_seconds".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(Config {
            input_file: self.input_file,
            folder_prefix: self.folder_prefix,
            charts_dir: self.charts_dir,
            keep_original: self.keep_original,
            collaborator_program: self.collaborator_program,
            collaborator_args: self.collaborator_args,
            collaborator_timeout: Duration::from_secs(self.timeout_seconds),
        })
    }
}

// Folder prefix, input file, and charts dir all name a single directory
// entry under the run directory.
fn validate_file_name(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::InvalidValue {
            field: field.to_string(),
            reason: "must not be empty".to_string(),
        });
    }
    if value.contains('/') || value.contains('\\') || value == "." || value == ".." {
        return Err(ConfigError::InvalidValue {
            field: field.to_string(),
            reason: "must be a plain file name, not a path".to_string(),
        });
    }
    Ok(())
}

/// Search upward from `start_dir` for `.chartprep/config.toml`.
#[must_use]
pub fn discover_config_file_from(start_dir: &Path) -> Option<PathBuf> {
    let mut dir = start_dir;
    loop {
        let candidate = dir.join(CONFIG_DIR).join(CONFIG_FILE);
        if candidate.is_file() {
            return Some(candidate);
        }
        dir = dir.parent()?;
    }
}

fn load_config_file(path: &Path) -> Result<ConfigFile, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    toml::from_str(&raw).map_err(|e| ConfigError::ParseFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_builder_defaults() {
        let config = Config::builder().build().unwrap();
        assert_eq!(config.input_file, "summary_data.csv");
        assert_eq!(config.folder_prefix, "Project");
        assert_eq!(config.charts_dir, "asterix_charts");
        assert_eq!(config.collaborator_program, "chartgen");
        assert!(config.collaborator_args.is_empty());
        assert_eq!(config.collaborator_timeout, Duration::from_secs(600));
        assert!(!config.keep_original);
    }

    #[test]
    fn test_builder_rejects_zero_timeout() {
        let err = Config::builder().timeout_seconds(0).build().unwrap_err();
        assert!(err.to_string().contains("timeout_seconds"));
    }

    #[test]
    fn test_builder_rejects_path_values() {
        let err = Config::builder()
            .input_file("data/summary.csv")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("input_file"));

        let err = Config::builder().folder_prefix("").build().unwrap_err();
        assert!(err.to_string().contains("folder_prefix"));
    }

    #[test]
    fn test_discover_no_file_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = Config::discover_from(tmp.path(), &CliOverrides::default()).unwrap();
        assert_eq!(config.input_file, DEFAULT_INPUT_FILE);
    }

    #[test]
    fn test_discover_reads_config_file() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join(CONFIG_DIR);
        fs::create_dir(&dir).unwrap();
        fs::write(
            dir.join(CONFIG_FILE),
            "[provision]\ninput_file = \"other.csv\"\n\n[collaborator]\nprogram = \"mychartgen\"\ntimeout_seconds = 30\n",
        )
        .unwrap();

        let config = Config::discover_from(tmp.path(), &CliOverrides::default()).unwrap();
        assert_eq!(config.input_file, "other.csv");
        assert_eq!(config.collaborator_program, "mychartgen");
        assert_eq!(config.collaborator_timeout, Duration::from_secs(30));
        // Untouched fields keep defaults
        assert_eq!(config.folder_prefix, DEFAULT_FOLDER_PREFIX);
    }

    #[test]
    fn test_discovery_walks_upward() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join(CONFIG_DIR);
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join(CONFIG_FILE), "[provision]\nfolder_prefix = \"Run\"\n").unwrap();

        let nested = tmp.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();

        let config = Config::discover_from(&nested, &CliOverrides::default()).unwrap();
        assert_eq!(config.folder_prefix, "Run");
    }

    #[test]
    fn test_cli_overrides_win_over_file() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join(CONFIG_DIR);
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join(CONFIG_FILE), "[provision]\ninput_file = \"file.csv\"\n").unwrap();

        let cli = CliOverrides {
            input_file: Some("cli.csv".to_string()),
            keep_original: true,
            ..Default::default()
        };
        let config = Config::discover_from(tmp.path(), &cli).unwrap();
        assert_eq!(config.input_file, "cli.csv");
        assert!(config.keep_original);
    }

    #[test]
    fn test_explicit_config_path_overrides_discovery() {
        let tmp = TempDir::new().unwrap();
        let explicit = tmp.path().join("explicit.toml");
        fs::write(&explicit, "[collaborator]\nargs = [\"--quiet\"]\n").unwrap();

        let cli = CliOverrides {
            config: Some(explicit),
            ..Default::default()
        };
        let config = Config::discover_from(tmp.path(), &cli).unwrap();
        assert_eq!(config.collaborator_args, vec!["--quiet".to_string()]);
    }

    #[test]
    fn test_invalid_toml_is_a_parse_error() {
        let tmp = TempDir::new().unwrap();
        let bad = tmp.path().join("bad.toml");
        fs::write(&bad, "this is not toml [").unwrap();

        let cli = CliOverrides {
            config: Some(bad),
            ..Default::default()
        };
        let err = Config::discover_from(tmp.path(), &cli).unwrap_err();
        assert!(matches!(err, ConfigError::ParseFailed { .. }));
    }

    #[test]
    fn test_missing_explicit_config_is_a_read_error() {
        let tmp = TempDir::new().unwrap();
        let cli = CliOverrides {
            config: Some(tmp.path().join("nope.toml")),
            ..Default::default()
        };
        let err = Config::discover_from(tmp.path(), &cli).unwrap_err();
        assert!(matches!(err, ConfigError::ReadFailed { .. }));
    }
}
