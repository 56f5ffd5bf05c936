//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use chrono::{NaiveDate, NaiveDateTime};
use clap::{Args, Subcommand, ValueEnum};

use crate::model::timestamp::{parse_date, parse_datetime};

/// Flight commands.
#[derive(Debug, Subcommand)]
pub enum FlightsCommand {
    /// Add a flight
    Add {
        /// Unique flight number
        number: String,

        /// Departure airport or city
        #[arg(long)]
        origin: String,

        /// Arrival airport or city
        #[arg(long)]
        destination: String,

        /// Departure time ("YYYY-MM-DD HH:MM")
        #[arg(long, value_parser = timestamp_arg)]
        departure: NaiveDateTime,

        /// Arrival time ("YYYY-MM-DD HH:MM")
        #[arg(long, value_parser = timestamp_arg)]
        arrival: NaiveDateTime,

        /// Number of seats
        #[arg(long)]
        capacity: u32,
    },

    /// List all flights
    List {
        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Search flights by origin, destination and date
    Search(SearchCommand),

    /// Remove a flight (its bookings are kept)
    Remove {
        /// Flight number to remove
        number: String,
    },
}

/// Flight search arguments.
#[derive(Debug, Args)]
pub struct SearchCommand {
    /// Filter by origin (case-insensitive)
    #[arg(long)]
    pub origin: Option<String>,

    /// Filter by destination (case-insensitive)
    #[arg(long)]
    pub destination: Option<String>,

    /// Filter by departure date ("YYYY-MM-DD")
    #[arg(long, value_parser = date_arg)]
    pub date: Option<NaiveDate>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Booking commands.
#[derive(Debug, Subcommand)]
pub enum BookingsCommand {
    /// Book seats on a flight
    Add {
        /// Flight to book
        flight_number: String,

        /// Passenger name
        #[arg(long)]
        name: String,

        /// Passenger email
        #[arg(long)]
        email: String,

        /// Passenger phone
        #[arg(long)]
        phone: String,

        /// Seats to book
        #[arg(short, long, default_value = "1")]
        seats: u32,
    },

    /// List all bookings
    List {
        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Cancel a booking and release its seats
    Cancel {
        /// Booking id
        booking_id: String,
    },
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Audit command arguments.
#[derive(Debug, Args)]
pub struct AuditCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,
}

/// Output format for listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One summary line per record
    #[default]
    Table,
    /// JSON array in the stored record shape
    Json,
}

fn timestamp_arg(value: &str) -> Result<NaiveDateTime, String> {
    parse_datetime(value).map_err(|e| e.to_string())
}

fn date_arg(value: &str) -> Result<NaiveDate, String> {
    parse_date(value).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Table);
    }

    #[test]
    fn test_timestamp_arg() {
        assert!(timestamp_arg("2024-01-01 08:00").is_ok());
        let err = timestamp_arg("2024-01-01").unwrap_err();
        assert!(err.contains("YYYY-MM-DD HH:MM"));
    }

    #[test]
    fn test_date_arg() {
        assert_eq!(
            date_arg("2024-01-01").unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
        assert!(date_arg("yesterday").is_err());
    }

    #[test]
    fn test_search_command_debug() {
        let cmd = SearchCommand {
            origin: Some("JFK".to_string()),
            destination: None,
            date: None,
            format: OutputFormat::Json,
        };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("JFK"));
        assert!(debug_str.contains("Json"));
    }
}
