//! Single-pass scanning of multi-context ASA firewall configurations
//! into normalized tabular records.
//!
//! Two independent pipelines share one shape: a line-oriented scan
//! with local mutable state, advancing through the input exactly once.
//!
//! - [`rules`] — classifies access-list lines (context, hostname,
//!   remark, rule entry) and emits one [`rules::RuleEntry`] per rule
//!   line, with forward-declared remarks attached.
//! - [`objects`] — accumulates multi-line object and object-group
//!   definitions into [`objects::ConfigObject`] records, flushed at
//!   the next header or end of input.
//!
//! Both pipelines resolve the active context through
//! [`context::ContextTracker`] at the moment a record is created.
//! Lines matching no known pattern are skipped silently: configs
//! routinely contain directives outside the modeled grammar, and an
//! unanticipated one must never abort a run. [`csv`] renders the
//! record vectors into the fixed-column reports.

pub mod context;
pub mod csv;
pub mod objects;
pub mod remark;
pub mod rules;

pub use context::ContextTracker;
pub use csv::{
    render_objects_csv, render_rules_csv, write_objects_csv, write_rules_csv, WriteError,
};
pub use objects::{
    parse_objects, parse_objects_file, ConfigObject, GroupProto, ObjectKind, ObjectValue,
};
pub use remark::RemarkBuffer;
pub use rules::{parse_rules, parse_rules_file, RuleAction, RuleEntry};

use thiserror::Error;

/// Errors that can occur while scanning a configuration.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Failed to read the input.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
}
