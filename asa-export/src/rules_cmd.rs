use std::fs;

use anyhow::{Context, Result};
use asa_scan_core::{parse_rules_file, render_rules_csv};

use crate::cli::{OutputFormat, RulesArgs};

pub fn run_rules(args: RulesArgs) -> Result<()> {
    let entries = parse_rules_file(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;

    let rendered = match args.format {
        OutputFormat::Csv => render_rules_csv(&entries),
        OutputFormat::Json => serde_json::to_string_pretty(&entries)?,
    };
    fs::write(&args.output, rendered)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    println!(
        "Processed {} ACL entries, output written to {}",
        entries.len(),
        args.output.display()
    );
    Ok(())
}
