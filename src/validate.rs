//! Address and domain validation.
//!
//! IPv6 must be written out in full (8 groups, 7 colons). Compressed `::`
//! and IPv4-mapped forms are rejected.

use crate::error::{HostsError, Result};

/// Maximum total length of a domain name.
pub const MAX_DOMAIN_LEN: usize = 253;

const MAX_LABEL_LEN: usize = 63;

/// True for a dotted-quad IPv4 or a full 8-group IPv6 literal.
pub fn validate_address(address: &str) -> bool {
    is_ipv4(address) || is_full_ipv6(address)
}

/// True for a hostname of alphanumeric labels with inner hyphens, at most
/// 253 characters.
pub fn validate_domain(domain: &str) -> bool {
    if domain.is_empty() || domain.len() > MAX_DOMAIN_LEN {
        return false;
    }
    domain.split('.').all(is_label)
}

/// Check both fields of an entry before a write.
pub fn check_entry(address: &str, domain: &str) -> Result<()> {
    if !validate_address(address) {
        return Err(HostsError::InvalidAddress(address.to_string()));
    }
    if !validate_domain(domain) {
        return Err(HostsError::InvalidDomain(domain.to_string()));
    }
    Ok(())
}

/// Group names end up inside marker lines, so marker syntax is not allowed.
pub fn check_group_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(HostsError::InvalidArgument(
            "group name cannot be empty".to_string(),
        ));
    }
    if let Some(c) = name.chars().find(|c| matches!(c, '[' | ']' | '<' | '>' | '\n' | '\r')) {
        return Err(HostsError::InvalidArgument(format!(
            "group name cannot contain {c:?}"
        )));
    }
    Ok(())
}

fn is_ipv4(s: &str) -> bool {
    let octets: Vec<&str> = s.split('.').collect();
    octets.len() == 4
        && octets.iter().all(|o| {
            (1..=3).contains(&o.len())
                && o.bytes().all(|b| b.is_ascii_digit())
                && o.parse::<u16>().is_ok_and(|v| v <= 255)
        })
}

fn is_full_ipv6(s: &str) -> bool {
    let groups: Vec<&str> = s.split(':').collect();
    groups.len() == 8
        && groups
            .iter()
            .all(|g| (1..=4).contains(&g.len()) && g.bytes().all(|b| b.is_ascii_hexdigit()))
}

fn is_label(label: &str) -> bool {
    if label.is_empty() || label.len() > MAX_LABEL_LEN {
        return false;
    }
    if label.starts_with('-') || label.ends_with('-') {
        return false;
    }
    label.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
}
