//! Interactive menu for operators.
//!
//! The shell reads one field per line through a [`Prompt`], calls the
//! matching [`FlightManager`] operation and prints the outcome. Operation
//! errors are printed and the menu comes back; only fatal storage errors end
//! the session.

use std::io::Write;

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::{debug, error};

use crate::error::{Error, Result};
use crate::manager::{FlightManager, FlightQuery};
use crate::model::timestamp::{format_datetime, parse_date, parse_datetime};
use crate::model::{Booking, Flight, NewFlight, Passenger};

const MENU: &str = "\
Flight Management System
1. Add Flight
2. List Flights
3. Search Flights
4. Add Booking
5. List Bookings
6. Cancel Booking
0. Exit";

/// Source of operator input, one line at a time.
pub trait Prompt {
    /// Show `prompt` and read a line.
    ///
    /// Returns `None` when the operator ends input (end of file or an
    /// interrupt).
    ///
    /// # Errors
    ///
    /// Returns an error if the input device fails.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;
}

/// Terminal prompt with line editing and history.
pub struct LineEditor {
    editor: DefaultEditor,
}

impl std::fmt::Debug for LineEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineEditor").finish_non_exhaustive()
    }
}

impl LineEditor {
    /// Attach to the controlling terminal.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be initialized.
    pub fn new() -> Result<Self> {
        let editor = DefaultEditor::new().map_err(readline_error)?;
        Ok(Self { editor })
    }
}

impl Prompt for LineEditor {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = self.editor.add_history_entry(line.as_str());
                }
                Ok(Some(line))
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => Ok(None),
            Err(err) => Err(readline_error(err)),
        }
    }
}

fn readline_error(err: ReadlineError) -> Error {
    match err {
        ReadlineError::Io(io) => Error::Io(io),
        other => Error::Io(std::io::Error::other(other.to_string())),
    }
}

/// Why a menu action stopped before finishing.
enum Stop {
    /// The operator ended input mid-action.
    Quit,
    /// The operation failed.
    Failed(Error),
}

impl From<Error> for Stop {
    fn from(err: Error) -> Self {
        Self::Failed(err)
    }
}

impl From<std::io::Error> for Stop {
    fn from(err: std::io::Error) -> Self {
        Self::Failed(err.into())
    }
}

type Action = std::result::Result<(), Stop>;

/// The numbered-menu loop.
#[derive(Debug)]
pub struct Shell<'a, P, W> {
    manager: &'a FlightManager,
    prompt: P,
    out: W,
}

impl<'a, P: Prompt, W: Write> Shell<'a, P, W> {
    /// Create a shell reading from `prompt` and printing to `out`.
    pub fn new(manager: &'a FlightManager, prompt: P, out: W) -> Self {
        Self {
            manager,
            prompt,
            out,
        }
    }

    /// Run until the operator exits.
    ///
    /// # Errors
    ///
    /// Returns the first fatal storage error, or an error writing output.
    pub fn run(&mut self) -> Result<()> {
        loop {
            writeln!(self.out, "\n{MENU}")?;
            self.out.flush()?;

            let Some(choice) = self.prompt.read_line("Select option: ")? else {
                writeln!(self.out)?;
                return Ok(());
            };

            let outcome = match choice.trim() {
                "0" => {
                    writeln!(self.out, "Goodbye")?;
                    return Ok(());
                }
                "1" => self.add_flight(),
                "2" => self.list_flights(),
                "3" => self.search_flights(),
                "4" => self.add_booking(),
                "5" => self.list_bookings(),
                "6" => self.cancel_booking(),
                other => {
                    debug!("Unknown menu option {:?}", other);
                    writeln!(self.out, "Invalid option\n")?;
                    continue;
                }
            };

            match outcome {
                Ok(()) => {}
                Err(Stop::Quit) => return Ok(()),
                Err(Stop::Failed(err)) if err.is_fatal() => {
                    error!("Stopping after storage failure: {}", err);
                    return Err(err);
                }
                Err(Stop::Failed(err)) => writeln!(self.out, "Error: {err}\n")?,
            }
        }
    }

    /// Consume the shell, returning its output sink.
    pub fn into_output(self) -> W {
        self.out
    }

    fn ask(&mut self, label: &str) -> std::result::Result<String, Stop> {
        match self.prompt.read_line(label)? {
            Some(line) => Ok(line.trim().to_string()),
            None => Err(Stop::Quit),
        }
    }

    fn add_flight(&mut self) -> Action {
        let number = self.ask("Flight number: ")?;
        let origin = self.ask("Origin: ")?;
        let destination = self.ask("Destination: ")?;
        let departure = parse_datetime(&self.ask("Departure (YYYY-MM-DD HH:MM): ")?)?;
        let arrival = parse_datetime(&self.ask("Arrival (YYYY-MM-DD HH:MM): ")?)?;
        let capacity = parse_count(&self.ask("Capacity: ")?, "capacity")?;

        let flight = self.manager.add_flight(NewFlight {
            number,
            origin,
            destination,
            departure,
            arrival,
            capacity,
        })?;
        writeln!(self.out, "Added flight {}", flight.number)?;
        Ok(())
    }

    fn list_flights(&mut self) -> Action {
        let flights = self.manager.list_flights()?;
        write_flights(&mut self.out, &flights)?;
        Ok(())
    }

    fn search_flights(&mut self) -> Action {
        let origin = self.ask("Origin (blank to skip): ")?;
        let destination = self.ask("Destination (blank to skip): ")?;
        let date = self.ask("Date YYYY-MM-DD (blank to skip): ")?;

        let mut query = FlightQuery::new().origin(origin).destination(destination);
        if !date.is_empty() {
            query = query.on_date(parse_date(&date)?);
        }
        let flights = self.manager.search_flights(&query)?;
        write_flights(&mut self.out, &flights)?;
        Ok(())
    }

    fn add_booking(&mut self) -> Action {
        let flight_number = self.ask("Flight number: ")?;
        let name = self.ask("Passenger name: ")?;
        let email = self.ask("Passenger email: ")?;
        let phone = self.ask("Passenger phone: ")?;
        let seats = parse_count(&self.ask("Seats to book: ")?, "seats")?;

        let booking =
            self.manager
                .add_booking(&flight_number, Passenger::new(name, email, phone), seats)?;
        writeln!(self.out, "Booking confirmed with ID {}", booking.booking_id)?;
        Ok(())
    }

    fn list_bookings(&mut self) -> Action {
        let bookings = self.manager.list_bookings()?;
        write_bookings(&mut self.out, &bookings)?;
        Ok(())
    }

    fn cancel_booking(&mut self) -> Action {
        let booking_id = self.ask("Booking ID to cancel: ")?;
        self.manager.cancel_booking(&booking_id)?;
        writeln!(self.out, "Booking cancelled")?;
        Ok(())
    }
}

/// Parse a non-negative whole number typed by the operator.
///
/// # Errors
///
/// Returns [`Error::Format`] if the text is not a whole number.
pub fn parse_count(text: &str, field: &str) -> Result<u32> {
    text.trim()
        .parse()
        .map_err(|_| Error::format(format!("{field} must be a whole number, got '{text}'")))
}

/// One-line summary of a flight.
#[must_use]
pub fn format_flight(flight: &Flight) -> String {
    format!(
        "{}: {} -> {} | {} - {} | Capacity: {} | Booked: {} | Available: {}",
        flight.number,
        flight.origin,
        flight.destination,
        format_datetime(&flight.departure),
        format_datetime(&flight.arrival),
        flight.capacity,
        flight.booked_seats,
        flight.available_seats()
    )
}

/// One-line summary of a booking.
#[must_use]
pub fn format_booking(booking: &Booking) -> String {
    format!(
        "{}: Flight {} | Passenger: {} | Seats: {} | Status: {}",
        booking.booking_id,
        booking.flight_number,
        booking.passenger.name,
        booking.seats,
        booking.status
    )
}

/// Print flights one per line, or a placeholder when there are none.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_flights(out: &mut impl Write, flights: &[Flight]) -> std::io::Result<()> {
    if flights.is_empty() {
        return writeln!(out, "No flights found");
    }
    for flight in flights {
        writeln!(out, "{}", format_flight(flight))?;
    }
    Ok(())
}

/// Print bookings one per line, or a placeholder when there are none.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_bookings(out: &mut impl Write, bookings: &[Booking]) -> std::io::Result<()> {
    if bookings.is_empty() {
        return writeln!(out, "No bookings found");
    }
    for booking in bookings {
        writeln!(out, "{}", format_booking(booking))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;
    use crate::storage::Storage;

    /// Prompt that replays canned answers and then reports end of input.
    #[derive(Debug, Default)]
    struct ScriptedPrompt {
        lines: VecDeque<String>,
        prompts: Vec<String>,
    }

    impl ScriptedPrompt {
        fn new(lines: &[&str]) -> Self {
            Self {
                lines: lines.iter().map(ToString::to_string).collect(),
                prompts: Vec::new(),
            }
        }
    }

    impl Prompt for ScriptedPrompt {
        fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
            self.prompts.push(prompt.to_string());
            Ok(self.lines.pop_front())
        }
    }

    fn create_test_manager() -> (tempfile::TempDir, FlightManager) {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let manager = FlightManager::new(Storage::new(dir.path()));
        (dir, manager)
    }

    fn run_script(manager: &FlightManager, lines: &[&str]) -> String {
        let mut shell = Shell::new(manager, ScriptedPrompt::new(lines), Vec::new());
        shell.run().unwrap();
        String::from_utf8(shell.into_output()).unwrap()
    }

    const ADD_AA100: [&str; 7] = [
        "1",
        "AA100",
        "JFK",
        "LAX",
        "2024-01-01 08:00",
        "2024-01-01 11:00",
        "2",
    ];

    #[test]
    fn test_exit_immediately() {
        let (_dir, manager) = create_test_manager();
        let output = run_script(&manager, &["0"]);
        assert!(output.contains("Flight Management System"));
        assert!(output.contains("6. Cancel Booking"));
        assert!(output.trim_end().ends_with("Goodbye"));
    }

    #[test]
    fn test_end_of_input_exits_cleanly() {
        let (_dir, manager) = create_test_manager();
        let output = run_script(&manager, &[]);
        assert!(!output.contains("Goodbye"));
    }

    #[test]
    fn test_invalid_option() {
        let (_dir, manager) = create_test_manager();
        let output = run_script(&manager, &["9", "0"]);
        assert!(output.contains("Invalid option"));
    }

    #[test]
    fn test_add_and_list_flight() {
        let (_dir, manager) = create_test_manager();
        let mut lines = ADD_AA100.to_vec();
        lines.extend(["2", "0"]);

        let output = run_script(&manager, &lines);
        assert!(output.contains("Added flight AA100"));
        assert!(output.contains(
            "AA100: JFK -> LAX | 2024-01-01 08:00 - 2024-01-01 11:00 | Capacity: 2 | Booked: 0 | Available: 2"
        ));
    }

    #[test]
    fn test_list_empty() {
        let (_dir, manager) = create_test_manager();
        let output = run_script(&manager, &["2", "5", "0"]);
        assert!(output.contains("No flights found"));
        assert!(output.contains("No bookings found"));
    }

    #[test]
    fn test_bad_capacity_reports_and_continues() {
        let (_dir, manager) = create_test_manager();
        let mut lines = ADD_AA100.to_vec();
        lines[6] = "lots";
        lines.push("0");

        let output = run_script(&manager, &lines);
        assert!(output.contains("Error: invalid input: capacity must be a whole number"));
        assert!(output.trim_end().ends_with("Goodbye"));
        assert!(manager.list_flights().unwrap().is_empty());
    }

    #[test]
    fn test_bad_timestamp_reports_error() {
        let (_dir, manager) = create_test_manager();
        let output = run_script(
            &manager,
            &["1", "AA100", "JFK", "LAX", "tomorrow", "0"],
        );
        assert!(output.contains("Error: invalid input"));
    }

    #[test]
    fn test_duplicate_flight_reports_error() {
        let (_dir, manager) = create_test_manager();
        let mut lines = ADD_AA100.to_vec();
        lines.extend(ADD_AA100);
        lines.push("0");

        let output = run_script(&manager, &lines);
        assert!(output.contains("Error: flight number AA100 already exists"));
        assert_eq!(manager.list_flights().unwrap().len(), 1);
    }

    #[test]
    fn test_booking_flow() {
        let (_dir, manager) = create_test_manager();
        let mut lines = ADD_AA100.to_vec();
        lines.extend([
            "4", "AA100", "Jane Doe", "jane@x.com", "5551234567", "2",
            "4", "AA100", "John Roe", "john@x.com", "5559876543", "1",
            "5", "0",
        ]);

        let output = run_script(&manager, &lines);
        assert!(output.contains("Booking confirmed with ID "));
        assert!(output.contains("Error: not enough seats available on flight AA100"));
        assert!(output.contains("Passenger: Jane Doe | Seats: 2 | Status: CONFIRMED"));
        assert_eq!(manager.list_bookings().unwrap().len(), 1);
    }

    #[test]
    fn test_cancel_flow() {
        let (_dir, manager) = create_test_manager();
        manager
            .add_flight(NewFlight {
                number: "AA100".to_string(),
                origin: "JFK".to_string(),
                destination: "LAX".to_string(),
                departure: parse_datetime("2024-01-01 08:00").unwrap(),
                arrival: parse_datetime("2024-01-01 11:00").unwrap(),
                capacity: 2,
            })
            .unwrap();
        let booking = manager
            .add_booking("AA100", Passenger::new("Jane Doe", "jane@x.com", "5551234567"), 2)
            .unwrap();

        let output = run_script(
            &manager,
            &["6", booking.booking_id.as_str(), "6", "nope", "0"],
        );
        assert!(output.contains("Booking cancelled"));
        assert!(output.contains("Error: booking nope not found"));
        assert_eq!(manager.get_flight("AA100").unwrap().unwrap().available_seats(), 2);
    }

    #[test]
    fn test_search_flow() {
        let (_dir, manager) = create_test_manager();
        let mut lines = ADD_AA100.to_vec();
        lines.extend(["3", "jfk", "", "2024-01-01", "3", "", "SFO", "", "0"]);

        let output = run_script(&manager, &lines);
        assert!(output.contains("AA100: JFK -> LAX"));
        assert!(output.contains("No flights found"));
    }

    #[test]
    fn test_search_bad_date() {
        let (_dir, manager) = create_test_manager();
        let output = run_script(&manager, &["3", "", "", "01/01/2024", "0"]);
        assert!(output.contains("Error: invalid input: expected YYYY-MM-DD"));
    }

    #[test]
    fn test_end_of_input_mid_action() {
        let (_dir, manager) = create_test_manager();
        let output = run_script(&manager, &["1", "AA100", "JFK"]);
        assert!(!output.contains("Error"));
        assert!(manager.list_flights().unwrap().is_empty());
    }

    #[test]
    fn test_fatal_storage_error_ends_run() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "file").unwrap();
        let manager = FlightManager::new(Storage::new(blocker.join("data")));

        let mut shell = Shell::new(&manager, ScriptedPrompt::new(&["2", "0"]), Vec::new());
        let err = shell.run().unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn test_prompts_shown() {
        let (_dir, manager) = create_test_manager();
        let mut shell = Shell::new(&manager, ScriptedPrompt::new(&["6", "x", "0"]), Vec::new());
        shell.run().unwrap();
        assert_eq!(
            shell.prompt.prompts,
            vec!["Select option: ", "Booking ID to cancel: ", "Select option: "]
        );
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count(" 12 ", "seats").unwrap(), 12);
        assert!(matches!(
            parse_count("-1", "seats").unwrap_err(),
            Error::Format { .. }
        ));
        assert!(parse_count("1.5", "seats").is_err());
    }
}
