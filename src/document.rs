//! Hosts file document and the record/group views derived from it.
//!
//! The line sequence is the single source of truth. Records and groups are
//! rebuilt from it on every read and never written back directly.

use serde::Serialize;

use crate::line::{self, LineKind};

/// Name of the implicit group that holds every ungrouped record.
pub const DEFAULT_GROUP: &str = "Default";

/// One address-to-domain mapping line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HostRecord {
    pub address: String,
    pub domain: String,
    pub comment: String,
    pub is_active: bool,
    pub is_commented_out: bool,
    /// The line exactly as read, including surrounding whitespace.
    pub raw_original_line: String,
    pub group: String,
}

/// A named block of records plus its active count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub name: String,
    pub members: Vec<HostRecord>,
    pub active_count: usize,
}

impl Group {
    fn new(name: String, members: Vec<HostRecord>) -> Self {
        let active_count = members.iter().filter(|h| h.is_active).count();
        Self {
            name,
            members,
            active_count,
        }
    }
}

/// Hosts file contents as an ordered sequence of lines.
///
/// Lines are split on `\n` only, so `Document::parse(s).to_text() == s` for
/// any input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub(crate) lines: Vec<String>,
}

impl Document {
    pub fn parse(text: &str) -> Self {
        Self {
            lines: text.split('\n').map(String::from).collect(),
        }
    }

    pub fn to_text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// All host records in file order.
    pub fn records(&self) -> Vec<HostRecord> {
        self.scan().records
    }

    /// Explicit groups in file order, followed by the synthesized `Default`
    /// group when ungrouped records exist.
    pub fn groups(&self) -> Vec<Group> {
        let Scan {
            records,
            mut groups,
        } = self.scan();

        let defaults: Vec<HostRecord> = records
            .into_iter()
            .filter(|r| r.group == DEFAULT_GROUP)
            .collect();

        if groups.is_empty() {
            return vec![Group::new(DEFAULT_GROUP.to_string(), defaults)];
        }
        if !defaults.is_empty() && !groups.iter().any(|g| g.name == DEFAULT_GROUP) {
            groups.push(Group::new(DEFAULT_GROUP.to_string(), defaults));
        }
        groups
    }

    /// Single pass building both the flat record list and the explicit groups.
    fn scan(&self) -> Scan {
        let mut records = Vec::new();
        let mut groups = Vec::new();
        let mut current: Option<(String, Vec<HostRecord>)> = None;

        for raw in &self.lines {
            match line::classify(raw) {
                LineKind::Blank => {}
                LineKind::GroupStart(name) => {
                    if let Some((prev, hosts)) = current.take() {
                        groups.push(Group::new(prev, hosts));
                    }
                    current = Some((name, Vec::new()));
                }
                LineKind::GroupEnd => {
                    if let Some((name, hosts)) = current.take() {
                        groups.push(Group::new(name, hosts));
                    }
                }
                LineKind::Host => {
                    let Some(host) = line::parse_host(raw) else {
                        continue;
                    };
                    let record = HostRecord {
                        address: host.address.to_string(),
                        domain: host.domain.to_string(),
                        comment: host.comment,
                        is_active: !host.commented_out,
                        is_commented_out: host.commented_out,
                        raw_original_line: raw.clone(),
                        group: current
                            .as_ref()
                            .map_or_else(|| DEFAULT_GROUP.to_string(), |(name, _)| name.clone()),
                    };
                    if let Some((_, hosts)) = current.as_mut() {
                        hosts.push(record.clone());
                    }
                    records.push(record);
                }
            }
        }
        if let Some((name, hosts)) = current {
            groups.push(Group::new(name, hosts));
        }

        Scan { records, groups }
    }
}

struct Scan {
    records: Vec<HostRecord>,
    groups: Vec<Group>,
}
