//! Cross-collection consistency checks and summary statistics.
//!
//! A flight's `booked_seats` counter is updated step by step as bookings are
//! made and cancelled. The two snapshot files are written separately, so a
//! crash or a hand edit can leave them disagreeing. Nothing here repairs the
//! data; it only reports what it finds.

use std::collections::HashMap;

use serde::Serialize;

use crate::model::{Booking, Flight};

/// A flight whose counter disagrees with its confirmed bookings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeatDrift {
    /// Flight number.
    pub flight_number: String,
    /// Value of the flight's `booked_seats` counter.
    pub recorded: u32,
    /// Sum of seats over the flight's confirmed bookings.
    pub confirmed: u32,
}

/// Result of comparing the flights and bookings collections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuditReport {
    /// Number of flights examined.
    pub flights_checked: usize,
    /// Number of bookings examined.
    pub bookings_checked: usize,
    /// Flights whose counter is off.
    pub drift: Vec<SeatDrift>,
    /// Confirmed bookings that reference a flight which no longer exists.
    pub orphaned_bookings: Vec<String>,
}

impl AuditReport {
    /// Compare the two collections.
    #[must_use]
    pub fn from_collections(flights: &[Flight], bookings: &[Booking]) -> Self {
        let mut confirmed: HashMap<&str, u32> = HashMap::new();
        for booking in bookings.iter().filter(|b| b.is_confirmed()) {
            let seats = confirmed.entry(booking.flight_number.as_str()).or_default();
            *seats = seats.saturating_add(booking.seats);
        }

        let drift = flights
            .iter()
            .filter_map(|flight| {
                let held = confirmed.get(flight.number.as_str()).copied().unwrap_or(0);
                (held != flight.booked_seats).then(|| SeatDrift {
                    flight_number: flight.number.clone(),
                    recorded: flight.booked_seats,
                    confirmed: held,
                })
            })
            .collect();

        let orphaned_bookings = bookings
            .iter()
            .filter(|b| b.is_confirmed())
            .filter(|b| !flights.iter().any(|f| f.number == b.flight_number))
            .map(|b| b.booking_id.clone())
            .collect();

        Self {
            flights_checked: flights.len(),
            bookings_checked: bookings.len(),
            drift,
            orphaned_bookings,
        }
    }

    /// Whether nothing was found.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.drift.is_empty() && self.orphaned_bookings.is_empty()
    }
}

/// Totals across both collections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LedgerStats {
    /// Number of stored flights.
    pub flights: usize,
    /// Number of stored bookings.
    pub bookings: usize,
    /// Bookings still holding seats.
    pub confirmed_bookings: usize,
    /// Bookings that were cancelled.
    pub cancelled_bookings: usize,
    /// Sum of flight capacities.
    pub total_capacity: u64,
    /// Sum of flight `booked_seats` counters.
    pub booked_seats: u64,
}

impl LedgerStats {
    /// Summarize the two collections.
    #[must_use]
    pub fn from_collections(flights: &[Flight], bookings: &[Booking]) -> Self {
        let confirmed_bookings = bookings.iter().filter(|b| b.is_confirmed()).count();
        Self {
            flights: flights.len(),
            bookings: bookings.len(),
            confirmed_bookings,
            cancelled_bookings: bookings.len() - confirmed_bookings,
            total_capacity: flights.iter().map(|f| u64::from(f.capacity)).sum(),
            booked_seats: flights.iter().map(|f| u64::from(f.booked_seats)).sum(),
        }
    }
}
