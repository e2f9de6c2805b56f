//! CSV rendering for scanned records.
//!
//! Column sets are fixed per record kind and rows follow discovery
//! order. Fields containing a delimiter, quote, or line break are
//! quoted with embedded quotes doubled.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::objects::ConfigObject;
use crate::rules::RuleEntry;

/// Column order of the access-list report.
pub const RULE_COLUMNS: [&str; 8] = [
    "Context_name",
    "name_of_Access_List",
    "Action",
    "Type",
    "Source",
    "Destination",
    "Log",
    "Remark",
];

/// Column order of the object report.
pub const OBJECT_COLUMNS: [&str; 6] = [
    "Context Name",
    "Object Name",
    "Object Type",
    "Object Value",
    "Object Description",
    "Reference",
];

/// Errors that can occur while writing a CSV report.
#[derive(Debug, Error)]
pub enum WriteError {
    /// Failed to write the output file.
    #[error("failed to write CSV file: {0}")]
    Io(#[from] std::io::Error),
}

/// Render access-list entries as CSV.
pub fn render_rules_csv(entries: &[RuleEntry]) -> String {
    let mut out = String::new();
    push_row(&mut out, &RULE_COLUMNS);
    for entry in entries {
        push_row(
            &mut out,
            &[
                &entry.context,
                &entry.list_name,
                entry.action.as_str(),
                &entry.protocol,
                &entry.source,
                &entry.destination,
                &entry.log,
                &entry.remarks,
            ],
        );
    }
    out
}

/// Render object records as CSV.
pub fn render_objects_csv(objects: &[ConfigObject]) -> String {
    let mut out = String::new();
    push_row(&mut out, &OBJECT_COLUMNS);
    for object in objects {
        let kind = object.kind.to_string();
        let value = object.value.render();
        let reference = object.reference.to_string();
        push_row(
            &mut out,
            &[
                &object.context,
                &object.name,
                &kind,
                &value,
                &object.description,
                &reference,
            ],
        );
    }
    out
}

/// Render access-list entries and write them to `path`.
pub fn write_rules_csv(entries: &[RuleEntry], path: &Path) -> Result<(), WriteError> {
    fs::write(path, render_rules_csv(entries))?;
    Ok(())
}

/// Render object records and write them to `path`.
pub fn write_objects_csv(objects: &[ConfigObject], path: &Path) -> Result<(), WriteError> {
    fs::write(path, render_objects_csv(objects))?;
    Ok(())
}

fn push_row(out: &mut String, fields: &[&str]) {
    for (index, field) in fields.iter().enumerate() {
        if index > 0 {
            out.push(',');
        }
        push_field(out, field);
    }
    out.push_str("\r\n");
}

fn push_field(out: &mut String, field: &str) {
    if field.contains([',', '"', '\n', '\r']) {
        out.push('"');
        out.push_str(&field.replace('"', "\"\""));
        out.push('"');
    } else {
        out.push_str(field);
    }
}
