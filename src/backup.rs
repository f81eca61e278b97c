//! Hosts file snapshots and retention.
//!
//! Callers hand in the bytes they read under the hosts file lock, so a
//! snapshot never observes a half-written file.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::error::{HostsError, Result};

/// Extension of snapshot files managed in the retention directory.
pub const BACKUP_EXTENSION: &str = "backup";

/// A snapshot file in the retention directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupEntry {
    pub path: PathBuf,
    pub modified: SystemTime,
}

/// Write `contents` into `backup_dir` under a new timestamped name and prune
/// the directory to the newest `keep` snapshots.
///
/// Prune failures are logged and do not fail the snapshot.
pub fn snapshot(contents: &[u8], backup_dir: &Path, keep: usize) -> Result<PathBuf> {
    fs::create_dir_all(backup_dir).map_err(|source| HostsError::Backup {
        path: backup_dir.to_path_buf(),
        source,
    })?;
    let target = write_new(backup_dir, contents)?;
    tracing::debug!(path = %target.display(), "Created hosts snapshot");

    match prune(backup_dir, keep) {
        Ok(0) => {}
        Ok(removed) => {
            tracing::debug!(removed, dir = %backup_dir.display(), "Pruned old snapshots");
        }
        Err(e) => tracing::warn!(error = %e, "Failed to prune old snapshots"),
    }
    Ok(target)
}

/// Write `contents` to an explicit path. Parent directories are created;
/// nothing is pruned.
pub fn backup_to(contents: &[u8], target: &Path) -> Result<PathBuf> {
    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| HostsError::Backup {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(target, contents).map_err(|source| HostsError::Backup {
        path: target.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %target.display(), "Wrote hosts backup");
    Ok(target.to_path_buf())
}

/// Snapshots in `backup_dir`, newest first. A missing directory has none.
pub fn list_backups(backup_dir: &Path) -> Result<Vec<BackupEntry>> {
    if !backup_dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut entries = Vec::new();
    for entry in fs::read_dir(backup_dir)? {
        let path = entry?.path();
        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some(BACKUP_EXTENSION) {
            continue;
        }
        let modified = fs::metadata(&path)?.modified()?;
        entries.push(BackupEntry { path, modified });
    }
    // Names embed the creation time, so they break mtime ties.
    entries.sort_by(|a, b| b.modified.cmp(&a.modified).then_with(|| b.path.cmp(&a.path)));
    Ok(entries)
}

/// Delete all but the newest `keep` snapshots. Returns how many were removed.
pub fn prune(backup_dir: &Path, keep: usize) -> Result<usize> {
    let entries = list_backups(backup_dir)?;
    let mut removed = 0;
    for old in entries.iter().skip(keep) {
        fs::remove_file(&old.path).map_err(|source| HostsError::Backup {
            path: old.path.clone(),
            source,
        })?;
        removed += 1;
    }
    Ok(removed)
}

/// Create `hosts-<utc timestamp>.backup` (suffixed with a counter if taken)
/// with `create_new`, so concurrent snapshots never share a file.
fn write_new(backup_dir: &Path, contents: &[u8]) -> Result<PathBuf> {
    let stamp = chrono::Utc::now().format("%Y-%m-%dT%H-%M-%S-%6fZ").to_string();
    let mut n = 0;
    loop {
        let name = if n == 0 {
            format!("hosts-{stamp}.{BACKUP_EXTENSION}")
        } else {
            format!("hosts-{stamp}_{n}.{BACKUP_EXTENSION}")
        };
        let path = backup_dir.join(name);
        let written = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .and_then(|mut file| file.write_all(contents));
        match written {
            Ok(()) => return Ok(path),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => n += 1,
            Err(source) => return Err(HostsError::Backup { path, source }),
        }
    }
}
