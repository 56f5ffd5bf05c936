//! Seat reservations against a flight.

use serde::{Deserialize, Serialize};

use super::Passenger;
use crate::error::{Error, Result};

/// Lifecycle state of a booking.
///
/// The only transition is `Confirmed` to `Cancelled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    /// Seats are held on the flight.
    #[default]
    Confirmed,
    /// Seats have been released.
    Cancelled,
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Confirmed => write!(f, "CONFIRMED"),
            Self::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

/// A passenger's reservation of one or more seats on a flight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    /// Short unique identifier.
    pub booking_id: String,
    /// Number of the booked flight. Only checked when the booking is made.
    pub flight_number: String,
    /// Who is travelling.
    pub passenger: Passenger,
    /// Seats reserved.
    pub seats: u32,
    /// Current state.
    #[serde(default)]
    pub status: BookingStatus,
}

impl Booking {
    /// Create a confirmed booking.
    #[must_use]
    pub fn new(
        booking_id: impl Into<String>,
        flight_number: impl Into<String>,
        passenger: Passenger,
        seats: u32,
    ) -> Self {
        Self {
            booking_id: booking_id.into(),
            flight_number: flight_number.into(),
            passenger,
            seats,
            status: BookingStatus::Confirmed,
        }
    }

    /// Whether the booking still holds seats.
    #[must_use]
    pub fn is_confirmed(&self) -> bool {
        self.status == BookingStatus::Confirmed
    }

    /// Mark the booking cancelled.
    ///
    /// Returns `false` if it was already cancelled.
    pub fn cancel(&mut self) -> bool {
        if self.status == BookingStatus::Cancelled {
            return false;
        }
        self.status = BookingStatus::Cancelled;
        true
    }

    /// Check the seat count and the embedded passenger.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if no seats are booked or the passenger
    /// is invalid.
    pub fn validate(&self) -> Result<()> {
        if self.seats == 0 {
            return Err(Error::validation("Seats booked must be positive"));
        }
        self.passenger.validate()
    }
}
