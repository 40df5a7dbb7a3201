//! Run configuration
//!
//! Loaded from a TOML file (`.tsmrc` by default):
//!
//! ```toml
//! TarsnapBin = "/usr/local/bin/tarsnap"
//! TarsnapArgs = ["--one-file-system", "--exclude", "*.tmp"]
//! BackupDirs = ["/etc", "/home"]
//! KeepWeeks = 4
//! KeepMonths = 6
//! ExpireBackups = true
//! ListCurrent = false
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tarsnap::DEFAULT_TARSNAP_BIN;
use thiserror::Error;
use tsm_core::RetentionPolicy;

/// Default config file, relative to the working directory
pub const DEFAULT_CONFIG_FILE: &str = ".tsmrc";

/// Missing or invalid configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("missing config value {0}")]
    Missing(&'static str),
}

/// File layout, before validation
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
struct ConfigFile {
    tarsnap_bin: Option<PathBuf>,
    #[serde(default)]
    tarsnap_args: Vec<String>,
    #[serde(default)]
    backup_dirs: Vec<String>,
    keep_weeks: Option<u32>,
    keep_months: Option<u32>,
    #[serde(default)]
    expire_backups: bool,
    #[serde(default)]
    list_current: bool,
}

/// Validated configuration for one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// tarsnap binary to run
    pub tarsnap_bin: PathBuf,
    /// Extra arguments passed to tarsnap when creating an archive
    pub tarsnap_args: Vec<String>,
    /// Paths included in every new archive
    pub backup_dirs: Vec<String>,
    pub retention: RetentionPolicy,
    /// Run expiry after a nightly backup
    pub expire_backups: bool,
    /// Include kept archives in `list-expired` output
    pub list_current: bool,
}

impl Config {
    /// Load and validate the config file at `path`
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(&text, &path.display().to_string())
    }

    /// Parse config text; `origin` names the source in error messages
    pub fn parse(text: &str, origin: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(text).map_err(|source| ConfigError::Parse {
            origin: origin.to_string(),
            source,
        })?;

        let keep_weeks = file.keep_weeks.ok_or(ConfigError::Missing("KeepWeeks"))?;
        let keep_months = file.keep_months.ok_or(ConfigError::Missing("KeepMonths"))?;

        let tarsnap_bin = file
            .tarsnap_bin
            .filter(|bin| !bin.as_os_str().is_empty())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TARSNAP_BIN));

        Ok(Self {
            tarsnap_bin,
            tarsnap_args: file.tarsnap_args,
            backup_dirs: file.backup_dirs,
            retention: RetentionPolicy::new(keep_weeks, keep_months),
            expire_backups: file.expire_backups,
            list_current: file.list_current,
        })
    }

    /// Paths to back up; creating an archive requires at least one
    pub fn backup_paths(&self) -> Result<&[String], ConfigError> {
        if self.backup_dirs.is_empty() {
            return Err(ConfigError::Missing("BackupDirs"));
        }
        Ok(&self.backup_dirs)
    }
}
