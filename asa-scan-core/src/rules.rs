//! Access-list entry pipeline.
//!
//! A single pass over the config classifies each line in priority
//! order: context directive, hostname directive, remark directive,
//! rule entry. Rule entries are single-line and finalized immediately;
//! anything that matches no pattern is skipped without diagnostics so
//! that unmodeled directives never abort a run.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::context::ContextTracker;
use crate::remark::RemarkBuffer;
use crate::ScanError;

static RULE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?x)
        ^access-list\s+(\S+)\s+extended\s+
        (permit|deny)\s+
        (?:object-group\s+)?(\S+)\s+                # protocol
        (?:object-group\s+|object\s+|host\s+)?(\S+)\s+  # source
        (?:object-group\s+|object\s+|host\s+)?(\S+)     # destination
        (?:\s+(?:eq|range|lt|gt|neq)\s+\S+)?        # port spec, discarded
        (?:\s+(log|log\sdisable|log\sinterval\s\d+))?",
    )
    .unwrap()
});
static REMARK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^access-list\s+(\S+)\s+remark\s+(.*)").unwrap());

/// permit/deny disposition of an access-list entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleAction {
    Permit,
    Deny,
}

impl RuleAction {
    pub fn as_str(self) -> &'static str {
        match self {
            RuleAction::Permit => "permit",
            RuleAction::Deny => "deny",
        }
    }
}

/// One finalized access-list entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleEntry {
    pub context: String,
    pub list_name: String,
    pub action: RuleAction,
    pub protocol: String,
    pub source: String,
    pub destination: String,
    /// Literal matched log clause, or `"no"` when absent.
    pub log: String,
    /// Remarks queued for this list name before the entry, `"; "`-joined.
    pub remarks: String,
}

/// Scan access-list entries from a reader in one pass, in input order.
pub fn parse_rules<R: BufRead>(reader: R) -> Result<Vec<RuleEntry>, ScanError> {
    let mut contexts = ContextTracker::new();
    let mut remarks = RemarkBuffer::new();
    let mut entries = Vec::new();

    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if contexts.observe(line) {
            continue;
        }
        if let Some(caps) = REMARK_RE.captures(line) {
            remarks.add(&caps[1], &caps[2]);
            continue;
        }
        if let Some(caps) = RULE_RE.captures(line) {
            let list_name = caps[1].to_string();
            let pending = remarks.drain(&list_name);
            entries.push(RuleEntry {
                context: contexts.resolve(),
                action: if &caps[2] == "permit" {
                    RuleAction::Permit
                } else {
                    RuleAction::Deny
                },
                protocol: caps[3].to_string(),
                source: caps[4].to_string(),
                destination: caps[5].to_string(),
                log: caps
                    .get(6)
                    .map(|m| m.as_str().to_string())
                    .unwrap_or_else(|| "no".to_string()),
                remarks: pending,
                list_name,
            });
        }
    }

    Ok(entries)
}

/// Scan access-list entries from a file.
pub fn parse_rules_file(path: &Path) -> Result<Vec<RuleEntry>, ScanError> {
    let file = File::open(path)?;
    parse_rules(BufReader::new(file))
}
