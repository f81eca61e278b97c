//! Error types.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias for hosts file operations.
pub type Result<T> = std::result::Result<T, HostsError>;

/// Errors returned by hosts file operations.
#[derive(Debug, Error)]
pub enum HostsError {
    /// Address is neither a dotted-quad IPv4 nor a full 8-group IPv6 literal.
    #[error("invalid IP address: {0}")]
    InvalidAddress(String),

    #[error("invalid domain name: {0}")]
    InvalidDomain(String),

    /// An entry with the same address and domain already exists (active or not).
    #[error("host entry already exists: {address} {domain}")]
    DuplicateEntry { address: String, domain: String },

    #[error("host entry not found: {address} {domain}")]
    HostNotFound { address: String, domain: String },

    #[error("group \"{0}\" not found")]
    GroupNotFound(String),

    #[error("group \"{0}\" already exists")]
    GroupExists(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Snapshot could not be written or the retention directory could not be pruned.
    #[error("backup failed for {}: {source}", .path.display())]
    Backup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Filesystem I/O failed (typically `PermissionDenied` on the system hosts file).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl HostsError {
    /// Returns `true` for a missing host entry or group.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::HostNotFound { .. } | Self::GroupNotFound(_))
    }

    /// Returns `true` if the underlying I/O error is `PermissionDenied`.
    #[must_use]
    pub fn is_permission_denied(&self) -> bool {
        match self {
            Self::Io(e) | Self::Backup { source: e, .. } => {
                e.kind() == std::io::ErrorKind::PermissionDenied
            }
            _ => false,
        }
    }
}
