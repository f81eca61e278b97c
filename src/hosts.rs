//! Hosts file service.
//!
//! [`HostsFile`] keeps no state between calls besides its settings. Every call
//! re-reads the file; every mutation runs the same sequence:
//!
//! 1. open and exclusively lock the hosts file, read it,
//! 2. snapshot the text just read into the backup directory (failure is
//!    logged only),
//! 3. apply the edit to the parsed [`Document`],
//! 4. truncate and write the new text through the same locked handle.
//!
//! A failed edit returns before step 4, leaving the file untouched.

use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use crate::backup::{self, BackupEntry};
use crate::config::HostsSettings;
use crate::document::{Document, Group, HostRecord, DEFAULT_GROUP};
use crate::error::{HostsError, Result};
use crate::validate;

/// Stateless service over one hosts file.
#[derive(Debug, Clone)]
pub struct HostsFile {
    settings: HostsSettings,
}

impl HostsFile {
    pub fn new(settings: HostsSettings) -> Self {
        Self { settings }
    }

    pub fn path(&self) -> &Path {
        &self.settings.hosts_file
    }

    /// Read and parse the file under a shared lock.
    pub fn load(&self) -> Result<Document> {
        Ok(Document::parse(&read_shared(&self.settings.hosts_file)?))
    }

    pub fn list_hosts(&self) -> Result<Vec<HostRecord>> {
        Ok(self.load()?.records())
    }

    pub fn list_groups(&self) -> Result<Vec<Group>> {
        Ok(self.load()?.groups())
    }

    /// Add an active entry. `group` defaults to `Default` (end of file).
    pub fn add_host(
        &self,
        address: &str,
        domain: &str,
        comment: Option<&str>,
        group: Option<&str>,
    ) -> Result<()> {
        validate::check_entry(address, domain)?;
        let group = group.unwrap_or(DEFAULT_GROUP);
        self.mutate(|doc| doc.add_host(address, domain, comment.unwrap_or(""), group))?;
        tracing::info!(address = %address, domain = %domain, group = %group, "Added host entry");
        Ok(())
    }

    pub fn remove_host(&self, address: &str, domain: &str) -> Result<()> {
        self.mutate(|doc| doc.remove_host(address, domain))?;
        tracing::info!(address = %address, domain = %domain, "Removed host entry");
        Ok(())
    }

    /// Flip an entry between active and commented out. Returns the new state.
    pub fn toggle_host(&self, address: &str, domain: &str) -> Result<bool> {
        let active = self.mutate(|doc| doc.toggle_host(address, domain))?;
        tracing::info!(address = %address, domain = %domain, active, "Toggled host entry");
        Ok(active)
    }

    pub fn update_host(
        &self,
        old_address: &str,
        old_domain: &str,
        address: &str,
        domain: &str,
        comment: Option<&str>,
    ) -> Result<()> {
        validate::check_entry(address, domain)?;
        self.mutate(|doc| {
            doc.update_host(old_address, old_domain, address, domain, comment.unwrap_or(""))
        })?;
        tracing::info!(
            old_address = %old_address,
            old_domain = %old_domain,
            address = %address,
            domain = %domain,
            "Updated host entry"
        );
        Ok(())
    }

    pub fn move_host_to_group(&self, address: &str, domain: &str, group: &str) -> Result<()> {
        self.mutate(|doc| doc.move_host(address, domain, group))?;
        tracing::info!(address = %address, domain = %domain, group = %group, "Moved host entry");
        Ok(())
    }

    pub fn create_group(&self, name: &str) -> Result<()> {
        validate::check_group_name(name)?;
        self.mutate(|doc| doc.create_group(name))?;
        tracing::info!(group = %name, "Created group");
        Ok(())
    }

    pub fn rename_group(&self, old: &str, new: &str) -> Result<()> {
        validate::check_group_name(new)?;
        self.mutate(|doc| doc.rename_group(old, new))?;
        tracing::info!(old = %old, new = %new, "Renamed group");
        Ok(())
    }

    /// Delete a group block and every line inside it.
    pub fn delete_group(&self, name: &str) -> Result<()> {
        let removed = self.mutate(|doc| doc.delete_group(name))?;
        tracing::info!(group = %name, lines = removed, "Deleted group");
        Ok(())
    }

    /// Write a backup of the file as read under a shared lock. With
    /// `target`, write to that path and skip pruning; otherwise snapshot into
    /// the backup directory and prune it.
    pub fn backup(&self, target: Option<&Path>) -> Result<PathBuf> {
        let hosts_file = &self.settings.hosts_file;
        let mut contents = Vec::new();
        File::open(hosts_file)
            .and_then(|file| {
                fs2::FileExt::lock_shared(&file)?;
                Ok(file)
            })
            .and_then(|mut file| file.read_to_end(&mut contents))
            .map_err(|source| HostsError::Backup {
                path: hosts_file.clone(),
                source,
            })?;
        match target {
            Some(path) => backup::backup_to(&contents, path),
            None => self.snapshot(&contents),
        }
    }

    /// Snapshots in the backup directory, newest first.
    pub fn list_backups(&self) -> Result<Vec<BackupEntry>> {
        backup::list_backups(&self.settings.backup_dir)
    }

    fn snapshot(&self, contents: &[u8]) -> Result<PathBuf> {
        backup::snapshot(contents, &self.settings.backup_dir, self.settings.retention)
    }

    fn mutate<T>(&self, edit: impl FnOnce(&mut Document) -> Result<T>) -> Result<T> {
        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(&self.settings.hosts_file)?;
        fs2::FileExt::lock_exclusive(&file)?;
        let mut text = String::new();
        file.read_to_string(&mut text)?;

        if let Err(e) = self.snapshot(text.as_bytes()) {
            tracing::warn!(error = %e, "Snapshot before edit failed, continuing");
        }

        let mut doc = Document::parse(&text);
        let out = edit(&mut doc)?;

        write_locked(&mut file, &doc.to_text())?;
        Ok(out)
    }
}

/// Read a whole file under a shared `fs2` lock.
pub(crate) fn read_shared(path: &Path) -> io::Result<String> {
    let mut file = File::open(path)?;
    fs2::FileExt::lock_shared(&file)?;
    let mut text = String::new();
    file.read_to_string(&mut text)?;
    Ok(text)
}

/// Replace the contents of a file the caller holds an exclusive lock on.
pub(crate) fn write_locked(file: &mut File, text: &str) -> io::Result<()> {
    file.seek(SeekFrom::Start(0))?;
    file.set_len(0)?;
    file.write_all(text.as_bytes())?;
    file.sync_all()
}
