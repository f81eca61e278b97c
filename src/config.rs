//! Configuration loading and path resolution.
//!
//! Supports HOSTMAN_HOME env var override for testing.

use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use crate::hosts::{read_shared, write_locked};

/// Number of snapshots kept in the default backup directory.
pub const DEFAULT_RETENTION: usize = 10;

/// Paths for hostman data store.
#[derive(Debug, Clone)]
pub struct HostmanPaths {
    pub config_dir: PathBuf,
    pub config_file: PathBuf,
    pub backup_dir: PathBuf,
}

impl HostmanPaths {
    /// Build paths from base directory (e.g. ProjectDirs data dir or HOSTMAN_HOME).
    pub fn from_base(base: PathBuf) -> Self {
        Self {
            config_file: base.join("config.toml"),
            backup_dir: base.join("backups"),
            config_dir: base,
        }
    }

    /// Paths for testing: use a temp dir as base.
    pub fn for_test(base: impl AsRef<Path>) -> Self {
        Self::from_base(base.as_ref().to_path_buf())
    }

    /// Get default hostman paths (respects HOSTMAN_HOME).
    pub fn default_paths() -> Self {
        let base = if let Ok(home) = std::env::var("HOSTMAN_HOME") {
            PathBuf::from(home)
        } else if let Some(dirs) = directories::ProjectDirs::from("dev", "hostman", "hostman") {
            dirs.data_dir().to_path_buf()
        } else {
            PathBuf::from(".hostman")
        };
        Self::from_base(base)
    }
}

/// Optional config.toml structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hosts_file: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backup_dir: Option<PathBuf>,
}

impl Config {
    /// Read `config.toml` under a shared lock; a missing file is the default.
    pub fn load(paths: &HostmanPaths) -> Result<Config> {
        if !paths.config_file.is_file() {
            return Ok(Config::default());
        }
        let text = read_shared(&paths.config_file)
            .with_context(|| format!("reading {}", paths.config_file.display()))?;
        Ok(toml::from_str(&text)?)
    }

    /// Write `config.toml`, creating parent dirs. The file is truncated only
    /// after the exclusive lock is held.
    pub fn save(&self, paths: &HostmanPaths) -> Result<()> {
        if let Some(parent) = paths.config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let text = toml::to_string_pretty(self)?;
        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&paths.config_file)?;
        fs2::FileExt::lock_exclusive(&file)?;
        write_locked(&mut file, &text)
            .with_context(|| format!("writing {}", paths.config_file.display()))?;
        Ok(())
    }
}

/// Everything a [`HostsFile`](crate::hosts::HostsFile) needs; no ambient state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostsSettings {
    pub hosts_file: PathBuf,
    pub backup_dir: PathBuf,
    pub retention: usize,
}

impl HostsSettings {
    pub fn new(hosts_file: impl Into<PathBuf>, backup_dir: impl Into<PathBuf>) -> Self {
        Self {
            hosts_file: hosts_file.into(),
            backup_dir: backup_dir.into(),
            retention: DEFAULT_RETENTION,
        }
    }

    /// Resolve settings: explicit path > HOSTMAN_HOSTS_FILE > config.toml >
    /// platform default.
    pub fn resolve(paths: &HostmanPaths, hosts_override: Option<PathBuf>) -> Result<Self> {
        let config = Config::load(paths)?;
        let hosts_file = hosts_override
            .or_else(crate::platform::hosts_path_from_env)
            .or(config.hosts_file)
            .unwrap_or_else(crate::platform::system_hosts_path);
        let backup_dir = config.backup_dir.unwrap_or_else(|| paths.backup_dir.clone());
        Ok(Self::new(hosts_file, backup_dir))
    }
}
