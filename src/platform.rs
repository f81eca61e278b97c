//! Platform defaults for the system hosts file.

use std::path::PathBuf;

/// Env var that overrides the hosts file location (e.g. in tests).
pub const HOSTS_FILE_ENV: &str = "HOSTMAN_HOSTS_FILE";

/// Location of the OS hosts file.
pub fn system_hosts_path() -> PathBuf {
    #[cfg(windows)]
    return PathBuf::from(std::env::var_os("SYSTEMROOT").unwrap_or_else(|| r"C:\Windows".into()))
        .join(r"System32\drivers\etc\hosts");

    #[cfg(not(windows))]
    return PathBuf::from("/etc/hosts");
}

/// Hosts file path from `HOSTMAN_HOSTS_FILE`, if set.
pub fn hosts_path_from_env() -> Option<PathBuf> {
    std::env::var_os(HOSTS_FILE_ENV).map(PathBuf::from)
}
