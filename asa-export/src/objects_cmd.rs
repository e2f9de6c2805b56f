use std::fs;

use anyhow::{Context, Result};
use asa_scan_core::{parse_objects_file, render_objects_csv};

use crate::cli::{ObjectsArgs, OutputFormat};

pub fn run_objects(args: ObjectsArgs) -> Result<()> {
    let objects = parse_objects_file(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;

    let rendered = match args.format {
        OutputFormat::Csv => render_objects_csv(&objects),
        OutputFormat::Json => serde_json::to_string_pretty(&objects)?,
    };
    fs::write(&args.output, rendered)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    println!(
        "Processed {} objects, output written to {}",
        objects.len(),
        args.output.display()
    );
    Ok(())
}
