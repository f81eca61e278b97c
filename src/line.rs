//! Line classification and host line parsing.
//!
//! Group blocks are delimited by plain text lines layered on top of the
//! hosts file format:
//!
//! ```text
//! ---[Work]---
//! 10.0.0.1	intra.work
//! ---[>Work<]---
//! ```
//!
//! Older files close a block with a 43-dash rule instead of the `---[>Name<]---`
//! form. That form is still read but never written.

/// Legacy end-of-group rule (43 dashes).
pub const LEGACY_SEPARATOR: &str = "-------------------------------------------";

const START_PREFIX: &str = "---[";
const START_SUFFIX: &str = "]---";
const END_PREFIX: &str = "---[>";
const END_SUFFIX: &str = "<]---";

/// Classification of a single hosts file line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    Blank,
    GroupStart(String),
    GroupEnd,
    Host,
}

/// Classify a raw line. Group markers take precedence over host parsing.
pub fn classify(line: &str) -> LineKind {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return LineKind::Blank;
    }
    if trimmed.starts_with(START_PREFIX) && trimmed.contains(START_SUFFIX) && !trimmed.contains('>')
    {
        if let Some(name) = bracketed_name(trimmed) {
            return LineKind::GroupStart(name.to_string());
        }
    }
    if is_group_end(trimmed) {
        return LineKind::GroupEnd;
    }
    LineKind::Host
}

/// First non-empty `[...]` segment of a start marker.
fn bracketed_name(trimmed: &str) -> Option<&str> {
    let mut rest = trimmed;
    while let Some(open) = rest.find('[') {
        let after = &rest[open + 1..];
        match after.find(']') {
            Some(0) => rest = after,
            Some(close) => return Some(&after[..close]),
            None => return None,
        }
    }
    None
}

fn is_group_end(trimmed: &str) -> bool {
    (trimmed.starts_with(END_PREFIX) && trimmed.contains(END_SUFFIX)) || trimmed == LEGACY_SEPARATOR
}

/// True for any line that closes the block an insertion targets: the start of
/// another group, either end marker form, or the legacy rule.
pub(crate) fn is_block_boundary(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.starts_with(START_PREFIX) || trimmed == LEGACY_SEPARATOR
}

/// `---[name]---`
pub fn start_marker(name: &str) -> String {
    format!("{START_PREFIX}{name}{START_SUFFIX}")
}

/// `---[>name<]---`
pub fn end_marker(name: &str) -> String {
    format!("{END_PREFIX}{name}{END_SUFFIX}")
}

/// Fields of a host line, borrowed from the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostLine<'a> {
    pub address: &'a str,
    pub domain: &'a str,
    /// Tokens after the domain, joined by single spaces.
    pub comment: String,
    pub commented_out: bool,
}

/// Parse a host line. Returns `None` when fewer than two tokens remain after
/// stripping one leading `#`; such lines stay in the document untouched.
///
/// The address is not validated here so that legacy entries still show up.
pub fn parse_host(line: &str) -> Option<HostLine<'_>> {
    let trimmed = line.trim();
    let (commented_out, clean) = match trimmed.strip_prefix('#') {
        Some(rest) => (true, rest.trim()),
        None => (false, trimmed),
    };
    let mut tokens = clean.split_whitespace();
    let address = tokens.next()?;
    let domain = tokens.next()?;
    let comment = tokens.collect::<Vec<_>>().join(" ");
    Some(HostLine {
        address,
        domain,
        comment,
        commented_out,
    })
}

/// True if `line` is a host line (active or commented) for exactly this pair.
pub(crate) fn matches_host(line: &str, address: &str, domain: &str) -> bool {
    if line.trim().is_empty() {
        return false;
    }
    parse_host(line).is_some_and(|h| h.address == address && h.domain == domain)
}

/// Serialize an entry as `address<TAB>domain[<TAB># comment]`.
pub fn format_host(address: &str, domain: &str, comment: &str) -> String {
    if comment.is_empty() {
        format!("{address}\t{domain}")
    } else {
        format!("{address}\t{domain}\t# {comment}")
    }
}
