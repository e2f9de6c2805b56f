use anyhow::Result;
use clap::Parser;

mod cli;
mod objects_cmd;
mod rules_cmd;

use cli::{Cli, Command};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Rules(args) => rules_cmd::run_rules(args),
        Command::Objects(args) => objects_cmd::run_objects(args),
    }
}
