//! Configuration for monty-sync.
//!
//! Every field has a default matching the repository layout; an optional
//! `monty-sync.toml` (or `.monty-sync.toml`) in the repository root
//! overrides individual fields:
//!
//! ```toml
//! fork_branch = "zamburak"
//! verification_targets = ["lint", "test"]
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Project-level config file names, checked in order.
const PROJECT_CONFIG_NAMES: &[&str] = &["monty-sync.toml", ".monty-sync.toml"];

/// Repository and remote settings for a sync run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SyncConfig {
    /// Superproject checkout root. Always taken from the runtime, never
    /// from the config file.
    #[serde(skip)]
    pub repo_root: PathBuf,
    /// Submodule path relative to the repository root.
    pub submodule_path: PathBuf,
    /// Remote holding the fork.
    pub fork_remote: String,
    /// Fork branch to refresh.
    pub fork_branch: String,
    /// Remote name for upstream.
    pub upstream_remote: String,
    /// Upstream repository URL.
    pub upstream_url: String,
    /// Upstream branch to fast-forward onto.
    pub upstream_branch: String,
    /// `make` targets run after the sync.
    pub verification_targets: Vec<String>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            repo_root: PathBuf::from("."),
            submodule_path: PathBuf::from("third_party/full-monty"),
            fork_remote: "origin".to_string(),
            fork_branch: "main".to_string(),
            upstream_remote: "upstream".to_string(),
            upstream_url: "https://github.com/pydantic/monty.git".to_string(),
            upstream_branch: "main".to_string(),
            verification_targets: vec![
                "check-fmt".to_string(),
                "lint".to_string(),
                "test".to_string(),
            ],
        }
    }
}

impl SyncConfig {
    /// Default settings rooted at `repo_root`.
    #[must_use]
    pub fn new(repo_root: impl Into<PathBuf>) -> Self {
        Self {
            repo_root: repo_root.into(),
            ..Self::default()
        }
    }

    /// Absolute path of the submodule checkout.
    #[must_use]
    pub fn submodule_root(&self) -> PathBuf {
        self.repo_root.join(&self.submodule_path)
    }

    /// Submodule path as passed to git (forward slashes).
    #[must_use]
    pub fn submodule_arg(&self) -> String {
        self.submodule_path
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Parses overrides from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid or names an unknown field.
    pub fn parse(content: &str, repo_root: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;
        config.repo_root = repo_root.into();
        Ok(config)
    }

    /// Loads overrides from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path, repo_root: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content, repo_root)
    }

    /// Loads the project config for `repo_root`, or defaults when none exists.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be loaded.
    pub fn load(repo_root: &Path) -> Result<Self, ConfigError> {
        match resolve(repo_root) {
            ConfigSource::Project(path) => {
                tracing::info!("Using config: {}", path.display());
                Self::from_file(&path, repo_root)
            }
            ConfigSource::Default => Ok(Self::new(repo_root)),
        }
    }
}

/// Where the configuration was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Found in the repository root.
    Project(PathBuf),
    /// No config found; defaults will be used.
    Default,
}

/// Resolves the project configuration file, if any.
#[must_use]
pub fn resolve(repo_root: &Path) -> ConfigSource {
    for name in PROJECT_CONFIG_NAMES {
        let candidate = repo_root.join(name);
        if candidate.is_file() {
            tracing::debug!("Found project config: {}", candidate.display());
            return ConfigSource::Project(candidate);
        }
    }
    ConfigSource::Default
}
