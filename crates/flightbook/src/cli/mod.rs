//! Command-line interface for flightbook.
//!
//! Without a subcommand the binary starts the interactive menu; each
//! subcommand runs one operation and exits.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    AuditCommand, BookingsCommand, ConfigCommand, FlightsCommand, OutputFormat, SearchCommand,
    StatusCommand,
};

/// flightbook - Keep track of flights and seat bookings
///
/// Flights and bookings are stored as JSON files in a local data directory.
/// Run without a command for the interactive menu.
#[derive(Debug, Parser)]
#[command(name = "flightbook")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory holding flights.json and bookings.json
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute (interactive menu if omitted)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add, list, search or remove flights
    #[command(subcommand)]
    Flights(FlightsCommand),

    /// Add, list or cancel bookings
    #[command(subcommand)]
    Bookings(BookingsCommand),

    /// Show totals for the stored data
    Status(StatusCommand),

    /// Check flight seat counters against bookings
    Audit(AuditCommand),

    /// View configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}
