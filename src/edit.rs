//! Structural edits on a [`Document`].
//!
//! Every edit touches only the lines it names; all other lines are kept
//! verbatim. Preconditions are checked before the line sequence changes, so a
//! failed edit leaves the document as it was.

use crate::document::{Document, DEFAULT_GROUP};
use crate::error::{HostsError, Result};
use crate::line;

impl Document {
    /// Insert a new active entry at the end of `group`, or at the end of the
    /// file for `Default` or a group without a start marker.
    pub fn add_host(
        &mut self,
        address: &str,
        domain: &str,
        comment: &str,
        group: &str,
    ) -> Result<()> {
        if self
            .records()
            .iter()
            .any(|r| r.address == address && r.domain == domain)
        {
            return Err(HostsError::DuplicateEntry {
                address: address.to_string(),
                domain: domain.to_string(),
            });
        }
        let at = self.insertion_point(group);
        self.lines.insert(at, line::format_host(address, domain, comment));
        Ok(())
    }

    /// Remove the first line for this pair, commented or not.
    pub fn remove_host(&mut self, address: &str, domain: &str) -> Result<String> {
        let idx = self.find_host(address, domain)?;
        Ok(self.lines.remove(idx))
    }

    /// Comment out an active entry or re-activate a commented one.
    ///
    /// Activating strips exactly one `#` and keeps the rest of the line;
    /// deactivating prefixes the whole original line, so two toggles restore
    /// the original text. Returns the new active state.
    pub fn toggle_host(&mut self, address: &str, domain: &str) -> Result<bool> {
        let idx = self.find_host(address, domain)?;
        let current = &self.lines[idx];
        let (toggled, active) = match current.trim().strip_prefix('#') {
            Some(rest) => (rest.to_string(), true),
            None => (format!("#{current}"), false),
        };
        self.lines[idx] = toggled;
        Ok(active)
    }

    /// Rewrite an entry in place, keeping its commented-out state.
    pub fn update_host(
        &mut self,
        old_address: &str,
        old_domain: &str,
        address: &str,
        domain: &str,
        comment: &str,
    ) -> Result<()> {
        let idx = self.find_host(old_address, old_domain)?;
        let commented = self.lines[idx].trim().starts_with('#');
        let entry = line::format_host(address, domain, comment);
        self.lines[idx] = if commented { format!("#{entry}") } else { entry };
        Ok(())
    }

    /// Cut the entry's line (unchanged) and re-insert it at the end of `group`.
    pub fn move_host(&mut self, address: &str, domain: &str, group: &str) -> Result<()> {
        let idx = self.find_host(address, domain)?;
        let moved = self.lines.remove(idx);
        let at = self.insertion_point(group);
        self.lines.insert(at, moved);
        Ok(())
    }

    /// Append an empty group block.
    pub fn create_group(&mut self, name: &str) -> Result<()> {
        if self.groups().iter().any(|g| g.name == name) {
            return Err(HostsError::GroupExists(name.to_string()));
        }
        let at = self.end_of_file();
        let block = [
            String::new(),
            line::start_marker(name),
            String::new(),
            line::end_marker(name),
        ];
        self.lines.splice(at..at, block);
        Ok(())
    }

    /// Rewrite the start marker (and the new-form end marker, if present).
    pub fn rename_group(&mut self, old: &str, new: &str) -> Result<()> {
        if new.trim().is_empty() {
            return Err(HostsError::InvalidArgument(
                "new group name cannot be empty".to_string(),
            ));
        }
        let (old_start, old_end) = (line::start_marker(old), line::end_marker(old));
        if !self.lines.iter().any(|l| l.trim() == old_start) {
            return Err(HostsError::GroupNotFound(old.to_string()));
        }
        let (new_start, new_end) = (line::start_marker(new), line::end_marker(new));
        for l in &mut self.lines {
            let trimmed = l.trim();
            if trimmed == old_start {
                *l = new_start.clone();
            } else if trimmed == old_end {
                *l = new_end.clone();
            }
        }
        Ok(())
    }

    /// Drop everything from the start marker through the matching end marker
    /// (or the legacy rule), whatever lies between them. Returns the number of
    /// lines removed.
    pub fn delete_group(&mut self, name: &str) -> Result<usize> {
        let (start, end) = (line::start_marker(name), line::end_marker(name));
        let before = self.lines.len();
        let mut found = false;
        let mut inside = false;
        self.lines.retain(|l| {
            let trimmed = l.trim();
            if trimmed == start {
                found = true;
                inside = true;
                return false;
            }
            if inside && (trimmed == end || trimmed == line::LEGACY_SEPARATOR) {
                inside = false;
                return false;
            }
            !inside
        });
        if !found {
            return Err(HostsError::GroupNotFound(name.to_string()));
        }
        Ok(before - self.lines.len())
    }

    fn find_host(&self, address: &str, domain: &str) -> Result<usize> {
        self.lines
            .iter()
            .position(|l| line::matches_host(l, address, domain))
            .ok_or_else(|| HostsError::HostNotFound {
                address: address.to_string(),
                domain: domain.to_string(),
            })
    }

    /// Index just before the first block boundary after `group`'s start marker.
    fn insertion_point(&self, group: &str) -> usize {
        if group == DEFAULT_GROUP {
            return self.end_of_file();
        }
        let start = line::start_marker(group);
        let Some(start_idx) = self.lines.iter().position(|l| l.trim() == start) else {
            tracing::warn!(group = %group, "Group marker not found, appending at end of file");
            return self.end_of_file();
        };
        self.lines[start_idx + 1..]
            .iter()
            .position(|l| line::is_block_boundary(l))
            .map_or_else(|| self.end_of_file(), |offset| start_idx + 1 + offset)
    }

    /// Append position that keeps a trailing newline at the end of the file.
    fn end_of_file(&self) -> usize {
        match self.lines.last() {
            Some(last) if last.is_empty() => self.lines.len() - 1,
            _ => self.lines.len(),
        }
    }
}
