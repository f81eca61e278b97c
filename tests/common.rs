//! Shared test helpers.

#![allow(dead_code)]

use hostman::config::HostsSettings;
use hostman::HostsFile;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Create a temp directory for use as HOSTMAN_HOME.
/// Uses current dir (workspace) so sandbox allows full access.
pub fn temp_home() -> TempDir {
    tempfile::Builder::new()
        .prefix("hostman_test_")
        .tempdir_in(std::env::current_dir().unwrap_or_else(|_| std::path::Path::new(".").into()))
        .expect("temp dir")
}

/// Write `content` to `<dir>/hosts` and return a service over it with
/// snapshots in `<dir>/backups`.
pub fn hosts_with(dir: &Path, content: &str) -> HostsFile {
    let hosts_path = dir.join("hosts");
    std::fs::write(&hosts_path, content).unwrap();
    HostsFile::new(HostsSettings::new(hosts_path, dir.join("backups")))
}

pub fn read_hosts(dir: &Path) -> String {
    std::fs::read_to_string(dir.join("hosts")).unwrap()
}

pub fn backup_files(dir: &Path) -> Vec<PathBuf> {
    match std::fs::read_dir(dir.join("backups")) {
        Ok(rd) => rd.map(|e| e.unwrap().path()).collect(),
        Err(_) => Vec::new(),
    }
}

/// Sample file with one ungrouped entry and one group.
pub const WORK_HOSTS: &str =
    "127.0.0.1\tlocalhost\n---[Work]---\n10.0.0.1\tintra.work\n---[>Work<]---\n";
