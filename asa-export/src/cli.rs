use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "asa-export")]
#[command(about = "Export ASA access-lists and policy objects to tabular reports")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Export access-list entries from one config file.
    Rules(RulesArgs),
    /// Export object and object-group definitions from one config file.
    Objects(ObjectsArgs),
}

#[derive(Parser, Debug)]
pub struct RulesArgs {
    /// Config file to scan.
    pub input: PathBuf,
    /// Report file to write.
    pub output: PathBuf,
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
    pub format: OutputFormat,
}

#[derive(Parser, Debug)]
pub struct ObjectsArgs {
    /// Config file to scan.
    pub input: PathBuf,
    /// Report file to write.
    pub output: PathBuf,
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    Csv,
    Json,
}
