//! Flight and booking operations.
//!
//! Every operation reloads the collections it needs from [`Storage`],
//! changes them in memory, validates, and writes them back whole. Nothing is
//! cached between calls.

mod audit;
mod query;

use tracing::{debug, warn};
use uuid::Uuid;

pub use audit::{AuditReport, LedgerStats, SeatDrift};
pub use query::FlightQuery;

use crate::config::{Config, MAX_ID_LENGTH, MIN_ID_LENGTH};
use crate::error::{Error, Result};
use crate::model::{Booking, Flight, NewFlight, Passenger};
use crate::storage::Storage;

/// Default number of hex characters in a booking id.
const DEFAULT_ID_LENGTH: usize = 8;

/// Use cases over the flights and bookings collections.
#[derive(Debug, Clone)]
pub struct FlightManager {
    storage: Storage,
    id_length: usize,
}

impl FlightManager {
    /// Create a manager over the given storage.
    #[must_use]
    pub fn new(storage: Storage) -> Self {
        Self {
            storage,
            id_length: DEFAULT_ID_LENGTH,
        }
    }

    /// Create a manager from loaded configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let storage = Storage::new(config.data_dir()).with_pretty(config.storage.pretty);
        Self::new(storage).with_id_length(config.booking.id_length)
    }

    /// Set the length of generated booking ids.
    #[must_use]
    pub fn with_id_length(mut self, id_length: usize) -> Self {
        self.id_length = id_length.clamp(MIN_ID_LENGTH, MAX_ID_LENGTH);
        self
    }

    /// Get the underlying storage.
    #[must_use]
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Create and store a new flight.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateFlight`] if the number is taken,
    /// [`Error::Validation`] if the flight is invalid, or a storage error.
    pub fn add_flight(&self, new: NewFlight) -> Result<Flight> {
        let mut flights = self.storage.load_flights()?;
        if flights.iter().any(|f| f.number == new.number) {
            return Err(Error::DuplicateFlight { number: new.number });
        }

        let flight = Flight::from(new);
        flight.validate()?;
        flights.push(flight.clone());
        self.storage.save_flights(&flights)?;

        debug!(
            "Added flight {} ({} -> {}, {} seats)",
            flight.number, flight.origin, flight.destination, flight.capacity
        );
        Ok(flight)
    }

    /// All flights in storage order.
    ///
    /// # Errors
    ///
    /// Returns a storage error.
    pub fn list_flights(&self) -> Result<Vec<Flight>> {
        self.storage.load_flights()
    }

    /// Look up a flight by number.
    ///
    /// # Errors
    ///
    /// Returns a storage error.
    pub fn get_flight(&self, number: &str) -> Result<Option<Flight>> {
        let flights = self.storage.load_flights()?;
        Ok(flights.into_iter().find(|f| f.number == number))
    }

    /// Flights matching every filter in the query, in storage order.
    ///
    /// # Errors
    ///
    /// Returns a storage error.
    pub fn search_flights(&self, query: &FlightQuery) -> Result<Vec<Flight>> {
        let flights = self.storage.load_flights()?;
        Ok(flights.into_iter().filter(|f| query.matches(f)).collect())
    }

    /// Delete a flight.
    ///
    /// Bookings referencing the flight are left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FlightNotFound`] if no flight has that number, or a
    /// storage error.
    pub fn remove_flight(&self, number: &str) -> Result<Flight> {
        let mut flights = self.storage.load_flights()?;
        let index = flights
            .iter()
            .position(|f| f.number == number)
            .ok_or_else(|| Error::FlightNotFound {
                number: number.to_string(),
            })?;

        let removed = flights.remove(index);
        self.storage.save_flights(&flights)?;

        debug!("Removed flight {}", removed.number);
        Ok(removed)
    }

    /// Book seats on a flight.
    ///
    /// The booking is saved before the flight's counter; a failure between the
    /// two writes leaves the counter short (see [`FlightManager::audit`]).
    ///
    /// # Errors
    ///
    /// Returns [`Error::FlightNotFound`] for an unknown flight,
    /// [`Error::InsufficientSeats`] if the flight cannot hold `seats`,
    /// [`Error::Validation`] for an invalid passenger or seat count, or a
    /// storage error.
    pub fn add_booking(
        &self,
        flight_number: &str,
        passenger: Passenger,
        seats: u32,
    ) -> Result<Booking> {
        let mut flights = self.storage.load_flights()?;
        let flight = flights
            .iter_mut()
            .find(|f| f.number == flight_number)
            .ok_or_else(|| Error::FlightNotFound {
                number: flight_number.to_string(),
            })?;

        let available = flight.available_seats();
        if seats > available {
            return Err(Error::InsufficientSeats {
                number: flight.number.clone(),
                requested: seats,
                available,
            });
        }

        passenger.validate()?;
        let mut bookings = self.storage.load_bookings()?;
        let booking = Booking::new(
            self.next_booking_id(&bookings),
            flight.number.clone(),
            passenger,
            seats,
        );
        booking.validate()?;

        bookings.push(booking.clone());
        self.storage.save_bookings(&bookings)?;

        flight.hold_seats(seats);
        flight.validate()?;
        self.storage.save_flights(&flights)?;

        debug!(
            "Booked {} seat(s) on {} as {}",
            booking.seats, booking.flight_number, booking.booking_id
        );
        Ok(booking)
    }

    /// Cancel a booking and release its seats.
    ///
    /// Cancelling an already-cancelled booking changes nothing. If the
    /// booked flight has since been removed, only the booking is updated.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BookingNotFound`] for an unknown id, or a storage
    /// error.
    pub fn cancel_booking(&self, booking_id: &str) -> Result<Booking> {
        let mut bookings = self.storage.load_bookings()?;
        let booking = bookings
            .iter_mut()
            .find(|b| b.booking_id == booking_id)
            .ok_or_else(|| Error::BookingNotFound {
                booking_id: booking_id.to_string(),
            })?;

        if !booking.is_confirmed() {
            debug!("Booking {} already cancelled", booking.booking_id);
            return Ok(booking.clone());
        }

        let mut flights = self.storage.load_flights()?;
        if let Some(flight) = flights.iter_mut().find(|f| f.number == booking.flight_number) {
            flight.release_seats(booking.seats);
            flight.validate()?;
            self.storage.save_flights(&flights)?;
        } else {
            warn!(
                "Flight {} for booking {} no longer exists; releasing nothing",
                booking.flight_number, booking.booking_id
            );
        }

        booking.cancel();
        let cancelled = booking.clone();
        self.storage.save_bookings(&bookings)?;

        debug!("Cancelled booking {}", cancelled.booking_id);
        Ok(cancelled)
    }

    /// All bookings in storage order.
    ///
    /// # Errors
    ///
    /// Returns a storage error.
    pub fn list_bookings(&self) -> Result<Vec<Booking>> {
        self.storage.load_bookings()
    }

    /// Compare flight counters against confirmed bookings.
    ///
    /// # Errors
    ///
    /// Returns a storage error.
    pub fn audit(&self) -> Result<AuditReport> {
        let flights = self.storage.load_flights()?;
        let bookings = self.storage.load_bookings()?;
        let report = AuditReport::from_collections(&flights, &bookings);

        for drift in &report.drift {
            warn!(
                "Flight {} records {} booked seats but confirmed bookings hold {}",
                drift.flight_number, drift.recorded, drift.confirmed
            );
        }
        for booking_id in &report.orphaned_bookings {
            warn!("Booking {} references a missing flight", booking_id);
        }
        Ok(report)
    }

    /// Totals across both collections.
    ///
    /// # Errors
    ///
    /// Returns a storage error.
    pub fn stats(&self) -> Result<LedgerStats> {
        let flights = self.storage.load_flights()?;
        let bookings = self.storage.load_bookings()?;
        Ok(LedgerStats::from_collections(&flights, &bookings))
    }

    /// A fresh id not used by any existing booking.
    fn next_booking_id(&self, bookings: &[Booking]) -> String {
        loop {
            let mut id = Uuid::new_v4().simple().to_string();
            id.truncate(self.id_length);
            if bookings.iter().all(|b| b.booking_id != id) {
                return id;
            }
            debug!("Booking id {} already taken, regenerating", id);
        }
    }
}
