//! `flightbook` - CLI for the flight booking record-keeper
//!
//! Runs the interactive menu by default, or a single operation when given a
//! subcommand.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use anyhow::{bail, Context};
use clap::Parser;
use tracing::debug;

use flightbook::cli::{BookingsCommand, Cli, Command, ConfigCommand, FlightsCommand, OutputFormat};
use flightbook::shell::{self, LineEditor, Shell};
use flightbook::{Booking, Config, Flight, FlightManager, FlightQuery, NewFlight, Passenger};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    flightbook::init_logging(cli.verbosity());

    // Load configuration, letting --data-dir win over every other source
    let mut config = Config::load_from(cli.config.clone()).context("loading configuration")?;
    if let Some(data_dir) = cli.data_dir.clone() {
        config.storage.data_dir = Some(data_dir);
        config.validate()?;
    }

    let manager = FlightManager::from_config(&config);
    debug!(
        "Using data directory {}",
        manager.storage().data_dir().display()
    );

    match cli.command {
        None => run_interactive(&manager),
        Some(Command::Flights(cmd)) => handle_flights(&manager, cmd),
        Some(Command::Bookings(cmd)) => handle_bookings(&manager, cmd),
        Some(Command::Status(cmd)) => handle_status(&manager, cmd.json),
        Some(Command::Audit(cmd)) => handle_audit(&manager, cmd.json),
        Some(Command::Config(cmd)) => handle_config(&config, &cmd),
    }
}

fn run_interactive(manager: &FlightManager) -> anyhow::Result<()> {
    let prompt = LineEditor::new().context("starting line editor")?;
    let stdout = std::io::stdout();
    Shell::new(manager, prompt, stdout.lock()).run()?;
    Ok(())
}

fn handle_flights(manager: &FlightManager, cmd: FlightsCommand) -> anyhow::Result<()> {
    match cmd {
        FlightsCommand::Add {
            number,
            origin,
            destination,
            departure,
            arrival,
            capacity,
        } => {
            let flight = manager.add_flight(NewFlight {
                number,
                origin,
                destination,
                departure,
                arrival,
                capacity,
            })?;
            println!("Added flight {}", flight.number);
        }
        FlightsCommand::List { format } => {
            print_flights(&manager.list_flights()?, format)?;
        }
        FlightsCommand::Search(search) => {
            let mut query = FlightQuery::new();
            if let Some(origin) = search.origin {
                query = query.origin(origin);
            }
            if let Some(destination) = search.destination {
                query = query.destination(destination);
            }
            if let Some(date) = search.date {
                query = query.on_date(date);
            }
            print_flights(&manager.search_flights(&query)?, search.format)?;
        }
        FlightsCommand::Remove { number } => {
            let flight = manager.remove_flight(&number)?;
            println!("Removed flight {}", flight.number);
        }
    }
    Ok(())
}

fn handle_bookings(manager: &FlightManager, cmd: BookingsCommand) -> anyhow::Result<()> {
    match cmd {
        BookingsCommand::Add {
            flight_number,
            name,
            email,
            phone,
            seats,
        } => {
            let booking =
                manager.add_booking(&flight_number, Passenger::new(name, email, phone), seats)?;
            println!("Booking confirmed with ID {}", booking.booking_id);
        }
        BookingsCommand::List { format } => {
            print_bookings(&manager.list_bookings()?, format)?;
        }
        BookingsCommand::Cancel { booking_id } => {
            manager.cancel_booking(&booking_id)?;
            println!("Booking cancelled");
        }
    }
    Ok(())
}

fn handle_status(manager: &FlightManager, json: bool) -> anyhow::Result<()> {
    let stats = manager.stats()?;
    let data_dir = manager.storage().data_dir();

    if json {
        let status = serde_json::json!({
            "data_dir": data_dir,
            "stats": stats,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("flightbook status");
        println!("-----------------");
        println!("Data directory: {}", data_dir.display());
        println!("Flights:        {}", stats.flights);
        println!(
            "Bookings:       {} ({} confirmed, {} cancelled)",
            stats.bookings, stats.confirmed_bookings, stats.cancelled_bookings
        );
        println!(
            "Seats booked:   {} of {}",
            stats.booked_seats, stats.total_capacity
        );
    }
    Ok(())
}

fn handle_audit(manager: &FlightManager, json: bool) -> anyhow::Result<()> {
    let report = manager.audit()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if report.is_consistent() {
        println!(
            "Checked {} flights and {} bookings: no problems found",
            report.flights_checked, report.bookings_checked
        );
    } else {
        for drift in &report.drift {
            println!(
                "{}: counter says {} booked, confirmed bookings hold {}",
                drift.flight_number, drift.recorded, drift.confirmed
            );
        }
        for booking_id in &report.orphaned_bookings {
            println!("{booking_id}: confirmed booking for a flight that no longer exists");
        }
    }

    if !report.is_consistent() {
        bail!(
            "audit found {} problem(s)",
            report.drift.len() + report.orphaned_bookings.len()
        );
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: &ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if *json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Data directory:     {}", config.data_dir().display());
                println!("  Pretty JSON:        {}", config.storage.pretty);
                println!();
                println!("[Booking]");
                println!("  Id length:          {}", config.booking.id_length);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
    }
    Ok(())
}

fn print_flights(flights: &[Flight], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => shell::write_flights(&mut std::io::stdout().lock(), flights)?,
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(flights)?),
    }
    Ok(())
}

fn print_bookings(bookings: &[Booking], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => shell::write_bookings(&mut std::io::stdout().lock(), bookings)?,
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(bookings)?),
    }
    Ok(())
}
