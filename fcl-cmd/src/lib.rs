//! Command implementations for the catch log CLI.
//!
//! Each subcommand runs one full interaction cycle against the master CSV
//! file: load, mutate, save. There is no lock across the cycle, so two
//! overlapping invocations against the same file are a last-writer-wins
//! race; this is an accepted limitation of the single-user design.

use clap::Subcommand;

pub mod add;
pub mod maintain;
pub mod show;

/// Default shared secret guarding the clear command.
pub const DEFAULT_CLEAR_SECRET: &str = "fisherman";

#[derive(Subcommand)]
pub enum Command {
    /// Create an empty master file if none exists
    Init,

    /// Validate and append one catch record
    Add(add::AddArgs),

    /// Print the current dataset
    Show,

    /// Replace the master file with an incoming CSV (must carry every canonical column)
    Replace {
        /// Path to the incoming CSV file
        #[arg(short, long)]
        incoming: String,
    },

    /// Wipe the master file back to zero records
    Clear {
        /// Shared secret; must exactly match the expected secret
        #[arg(short, long)]
        secret: String,

        /// The expected secret value
        #[arg(long, default_value = DEFAULT_CLEAR_SECRET)]
        expected_secret: String,
    },

    /// Copy the master file, byte for byte, to a destination path
    Export {
        /// Destination path
        #[arg(long)]
        dest: String,
    },
}

pub fn run(data_csv: &str, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Init => maintain::run_init(data_csv),
        Command::Add(args) => add::run_add(data_csv, args),
        Command::Show => show::run_show(data_csv),
        Command::Replace { incoming } => maintain::run_replace(data_csv, &incoming),
        Command::Clear {
            secret,
            expected_secret,
        } => maintain::run_clear(data_csv, &secret, &expected_secret),
        Command::Export { dest } => maintain::run_export(data_csv, &dest),
    }
}
