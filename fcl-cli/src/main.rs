//! FCL CLI - Command line tool for capturing fishing catch records.

use clap::Parser;

#[derive(Parser)]
#[command(name = "fcl-cli", version, about = "Fishing catch log toolkit")]
struct Cli {
    /// Path to the master CSV file
    #[arg(short, long, default_value = "catch_log.csv", global = true)]
    data: String,

    #[command(subcommand)]
    command: fcl_cmd::Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    fcl_cmd::run(&cli.data, cli.command)
}
