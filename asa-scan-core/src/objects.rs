//! Object and object-group pipeline.
//!
//! Definitions span multiple lines: a header announces the name and
//! category, then indented subordinate lines fill in the value. The
//! accumulator keeps exactly one record in progress; the next header
//! (or end of input) flushes it. A bare `object network NAME` header
//! only announces the category — the concrete kind (`host`, `subnet`,
//! `range`, `fqdn`, ...) is taken from the first qualifying
//! subordinate line, which replaces the kind on the in-progress record.

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Serialize, Serializer};

use crate::context::ContextTracker;
use crate::ScanError;

static OBJECT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^object (network|service) (\S+)").unwrap());
static NETWORK_GROUP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^object-group network (\S+)").unwrap());
static SERVICE_GROUP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^object-group service (\S+)(?:\s+(tcp|udp|tcp-udp))?").unwrap());

static PORT_OBJECT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s+port-object (eq|range) (\S+)(?:\s+(\S+))?").unwrap());
static NETWORK_MEMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s+network-object object (\S+)").unwrap());

static HOST_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s+host (\S+)").unwrap());
static SUBNET_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s+subnet (\S+ \S+)").unwrap());
static RANGE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s+range (\S+ \S+)").unwrap());
static FQDN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s+fqdn(?:\s+v4|\s+v6)?\s+(\S+)").unwrap());
static SERVICE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s+service (tcp|udp) (.*)").unwrap());
static ICMP_TYPE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s+icmp-type (\S+)").unwrap());

/// Protocol qualifier on a service group header; absent means `mixed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupProto {
    Tcp,
    Udp,
    TcpUdp,
    Mixed,
}

impl GroupProto {
    fn from_token(token: Option<&str>) -> Self {
        match token {
            Some("tcp") => GroupProto::Tcp,
            Some("udp") => GroupProto::Udp,
            Some("tcp-udp") => GroupProto::TcpUdp,
            _ => GroupProto::Mixed,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GroupProto::Tcp => "tcp",
            GroupProto::Udp => "udp",
            GroupProto::TcpUdp => "tcp-udp",
            GroupProto::Mixed => "mixed",
        }
    }
}

/// Kind of a policy object record.
///
/// `Network` and `Service` are the category kinds a header starts
/// with; the scalar sub-kinds replace them once a qualifying
/// subordinate line is seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Network,
    Service,
    Host,
    Subnet,
    Range,
    Fqdn,
    ServiceTcp,
    ServiceUdp,
    IcmpType,
    NetworkGroup,
    ServiceGroup(GroupProto),
}

enum ScalarFamily {
    Network,
    Service,
}

impl ObjectKind {
    /// Scalar pattern family this kind belongs to, if any.
    fn scalar_family(self) -> Option<ScalarFamily> {
        match self {
            ObjectKind::Network
            | ObjectKind::Host
            | ObjectKind::Subnet
            | ObjectKind::Range
            | ObjectKind::Fqdn => Some(ScalarFamily::Network),
            ObjectKind::Service
            | ObjectKind::ServiceTcp
            | ObjectKind::ServiceUdp
            | ObjectKind::IcmpType => Some(ScalarFamily::Service),
            ObjectKind::NetworkGroup | ObjectKind::ServiceGroup(_) => None,
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectKind::Network => f.write_str("network"),
            ObjectKind::Service => f.write_str("service"),
            ObjectKind::Host => f.write_str("host"),
            ObjectKind::Subnet => f.write_str("subnet"),
            ObjectKind::Range => f.write_str("range"),
            ObjectKind::Fqdn => f.write_str("fqdn"),
            ObjectKind::ServiceTcp => f.write_str("service-tcp"),
            ObjectKind::ServiceUdp => f.write_str("service-udp"),
            ObjectKind::IcmpType => f.write_str("icmp-type"),
            ObjectKind::NetworkGroup => f.write_str("network-group"),
            ObjectKind::ServiceGroup(proto) => write!(f, "service-group-{}", proto.as_str()),
        }
    }
}

impl Serialize for ObjectKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Scalar payload or ordered member list, depending on the kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ObjectValue {
    Scalar(String),
    Members(Vec<String>),
}

impl ObjectValue {
    /// Flat form used by the tabular output: members join with `"; "`.
    pub fn render(&self) -> String {
        match self {
            ObjectValue::Scalar(value) => value.clone(),
            ObjectValue::Members(members) => members.join("; "),
        }
    }

    fn push(&mut self, member: String) {
        if let ObjectValue::Members(members) = self {
            members.push(member);
        }
    }
}

/// One finalized object or object-group definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigObject {
    pub context: String,
    pub name: String,
    pub kind: ObjectKind,
    pub value: ObjectValue,
    pub description: String,
    /// 1-based line number of the record's header line.
    pub reference: usize,
}

/// Idle/Collecting accumulator for multi-line definitions.
///
/// Holds at most one in-progress record; starting a new one flushes
/// the previous record to the output sequence.
#[derive(Debug, Default)]
struct ObjectAccumulator {
    current: Option<ConfigObject>,
    finished: Vec<ConfigObject>,
}

impl ObjectAccumulator {
    fn start(&mut self, record: ConfigObject) {
        self.flush();
        self.current = Some(record);
    }

    fn flush(&mut self) {
        if let Some(record) = self.current.take() {
            self.finished.push(record);
        }
    }

    fn finish(mut self) -> Vec<ConfigObject> {
        self.flush();
        self.finished
    }
}

/// Scan object and object-group definitions from a reader in one pass.
pub fn parse_objects<R: BufRead>(reader: R) -> Result<Vec<ConfigObject>, ScanError> {
    let mut contexts = ContextTracker::new();
    let mut accumulator = ObjectAccumulator::default();

    for (index, line) in reader.lines().enumerate() {
        let raw = line?;
        let line_number = index + 1;
        let stripped = raw.trim();
        if stripped.is_empty() {
            continue;
        }
        if contexts.observe(stripped) {
            continue;
        }

        if let Some(caps) = SERVICE_GROUP_RE.captures(stripped) {
            let proto = GroupProto::from_token(caps.get(2).map(|m| m.as_str()));
            accumulator.start(ConfigObject {
                context: contexts.resolve(),
                name: caps[1].to_string(),
                kind: ObjectKind::ServiceGroup(proto),
                value: ObjectValue::Members(Vec::new()),
                description: String::new(),
                reference: line_number,
            });
            continue;
        }
        if let Some(caps) = NETWORK_GROUP_RE.captures(stripped) {
            accumulator.start(ConfigObject {
                context: contexts.resolve(),
                name: caps[1].to_string(),
                kind: ObjectKind::NetworkGroup,
                value: ObjectValue::Members(Vec::new()),
                description: String::new(),
                reference: line_number,
            });
            continue;
        }
        if let Some(caps) = OBJECT_RE.captures(stripped) {
            let kind = if &caps[1] == "network" {
                ObjectKind::Network
            } else {
                ObjectKind::Service
            };
            accumulator.start(ConfigObject {
                context: contexts.resolve(),
                name: caps[2].to_string(),
                kind,
                value: ObjectValue::Scalar(String::new()),
                description: String::new(),
                reference: line_number,
            });
            continue;
        }

        if let Some(record) = accumulator.current.as_mut() {
            apply_subordinate(record, &raw, stripped);
        }
    }

    Ok(accumulator.finish())
}

/// Scan object and object-group definitions from a file.
pub fn parse_objects_file(path: &Path) -> Result<Vec<ConfigObject>, ScanError> {
    let file = File::open(path)?;
    parse_objects(BufReader::new(file))
}

fn apply_subordinate(record: &mut ConfigObject, raw: &str, stripped: &str) {
    match record.kind {
        ObjectKind::ServiceGroup(_) => {
            if let Some(caps) = PORT_OBJECT_RE.captures(raw) {
                match &caps[1] {
                    "eq" => record.value.push(caps[2].to_string()),
                    _ => {
                        if let Some(high) = caps.get(3) {
                            record.value.push(format!("{}-{}", &caps[2], high.as_str()));
                        }
                    }
                }
            }
        }
        ObjectKind::NetworkGroup => {
            if let Some(caps) = NETWORK_MEMBER_RE.captures(raw) {
                record.value.push(caps[1].to_string());
            }
        }
        _ => {
            // Scalar value lines must be indented; headers are not.
            if raw.starts_with([' ', '\t']) {
                apply_scalar_value(record, raw);
            }
        }
    }

    if let Some(text) = stripped.strip_prefix("description ") {
        record.description = text.to_string();
    }
}

fn apply_scalar_value(record: &mut ConfigObject, raw: &str) {
    let Some(family) = record.kind.scalar_family() else {
        return;
    };
    match family {
        ScalarFamily::Network => {
            if let Some(caps) = HOST_RE.captures(raw) {
                record.kind = ObjectKind::Host;
                record.value = ObjectValue::Scalar(caps[1].to_string());
            } else if let Some(caps) = SUBNET_RE.captures(raw) {
                record.kind = ObjectKind::Subnet;
                record.value = ObjectValue::Scalar(caps[1].to_string());
            } else if let Some(caps) = RANGE_RE.captures(raw) {
                record.kind = ObjectKind::Range;
                record.value = ObjectValue::Scalar(caps[1].to_string());
            } else if let Some(caps) = FQDN_RE.captures(raw) {
                record.kind = ObjectKind::Fqdn;
                record.value = ObjectValue::Scalar(caps[1].to_string());
            }
        }
        ScalarFamily::Service => {
            if let Some(caps) = SERVICE_RE.captures(raw) {
                record.kind = if &caps[1] == "tcp" {
                    ObjectKind::ServiceTcp
                } else {
                    ObjectKind::ServiceUdp
                };
                record.value = ObjectValue::Scalar(caps[2].to_string());
            } else if let Some(caps) = ICMP_TYPE_RE.captures(raw) {
                record.kind = ObjectKind::IcmpType;
                record.value = ObjectValue::Scalar(caps[1].to_string());
            }
        }
    }
}
