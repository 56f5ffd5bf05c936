//! Scheduled flights and their seat counters.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::timestamp;
use crate::error::{Error, Result};

/// A scheduled flight.
///
/// `booked_seats` is a running counter kept in step with bookings by the
/// operations layer; it is never recomputed from the booking records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flight {
    /// Unique flight number, e.g. `AA100`.
    pub number: String,
    /// Departure airport or city.
    pub origin: String,
    /// Arrival airport or city.
    pub destination: String,
    /// Scheduled departure.
    #[serde(with = "timestamp::minutes")]
    pub departure: NaiveDateTime,
    /// Scheduled arrival.
    #[serde(with = "timestamp::minutes")]
    pub arrival: NaiveDateTime,
    /// Total seats on the aircraft.
    pub capacity: u32,
    /// Seats held by confirmed bookings.
    #[serde(default)]
    pub booked_seats: u32,
}

/// Operator-supplied fields for a new flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFlight {
    /// Unique flight number.
    pub number: String,
    /// Departure airport or city.
    pub origin: String,
    /// Arrival airport or city.
    pub destination: String,
    /// Scheduled departure.
    pub departure: NaiveDateTime,
    /// Scheduled arrival.
    pub arrival: NaiveDateTime,
    /// Total seats.
    pub capacity: u32,
}

impl From<NewFlight> for Flight {
    fn from(new: NewFlight) -> Self {
        Self {
            number: new.number,
            origin: new.origin,
            destination: new.destination,
            departure: new.departure,
            arrival: new.arrival,
            capacity: new.capacity,
            booked_seats: 0,
        }
    }
}

impl Flight {
    /// Seats still free, never negative.
    #[must_use]
    pub fn available_seats(&self) -> u32 {
        self.capacity.saturating_sub(self.booked_seats)
    }

    /// Whether the flight leaves on the given calendar date.
    #[must_use]
    pub fn departs_on(&self, date: NaiveDate) -> bool {
        self.departure.date() == date
    }

    /// Add seats to the booked counter.
    ///
    /// Does not check capacity; call [`Flight::validate`] afterwards.
    pub fn hold_seats(&mut self, seats: u32) {
        self.booked_seats = self.booked_seats.saturating_add(seats);
    }

    /// Remove seats from the booked counter, stopping at zero.
    pub fn release_seats(&mut self, seats: u32) {
        self.booked_seats = self.booked_seats.saturating_sub(seats);
    }

    /// Check the flight's schedule and seat counters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if origin equals destination, departure
    /// is not before arrival, capacity is zero, or more seats are booked
    /// than exist.
    pub fn validate(&self) -> Result<()> {
        if self.origin == self.destination {
            return Err(Error::validation("Origin and destination must differ"));
        }
        if self.departure >= self.arrival {
            return Err(Error::validation(
                "Departure time must be before arrival time",
            ));
        }
        if self.capacity == 0 {
            return Err(Error::validation("Capacity must be positive"));
        }
        if self.booked_seats > self.capacity {
            return Err(Error::validation("Booked seats must be within capacity"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::timestamp::parse_datetime;

    fn aa100() -> Flight {
        Flight::from(NewFlight {
            number: "AA100".to_string(),
            origin: "JFK".to_string(),
            destination: "LAX".to_string(),
            departure: parse_datetime("2024-01-01 08:00").unwrap(),
            arrival: parse_datetime("2024-01-01 11:00").unwrap(),
            capacity: 2,
        })
    }

    #[test]
    fn test_new_flight_starts_empty() {
        let flight = aa100();
        assert_eq!(flight.booked_seats, 0);
        assert_eq!(flight.available_seats(), 2);
        assert!(flight.validate().is_ok());
    }

    #[test]
    fn test_available_seats_floors_at_zero() {
        let mut flight = aa100();
        flight.booked_seats = 5;
        assert_eq!(flight.available_seats(), 0);
    }

    #[test]
    fn test_available_seats_matches_difference() {
        let mut flight = aa100();
        flight.capacity = 180;
        for booked in [0, 1, 90, 179, 180] {
            flight.booked_seats = booked;
            assert_eq!(flight.available_seats(), 180 - booked);
        }
    }

    #[test]
    fn test_same_origin_and_destination() {
        let mut flight = aa100();
        flight.destination = "JFK".to_string();
        let err = flight.validate().unwrap_err();
        assert!(err.to_string().contains("must differ"));
    }

    #[test]
    fn test_departure_must_precede_arrival() {
        let mut flight = aa100();
        flight.arrival = flight.departure;
        assert!(matches!(flight.validate(), Err(Error::Validation { .. })));
    }

    #[test]
    fn test_zero_capacity() {
        let mut flight = aa100();
        flight.capacity = 0;
        let err = flight.validate().unwrap_err();
        assert!(err.to_string().contains("Capacity"));
    }

    #[test]
    fn test_overbooked_is_invalid() {
        let mut flight = aa100();
        flight.hold_seats(3);
        assert!(flight.validate().is_err());
    }

    #[test]
    fn test_release_seats_floors_at_zero() {
        let mut flight = aa100();
        flight.hold_seats(1);
        flight.release_seats(4);
        assert_eq!(flight.booked_seats, 0);
    }

    #[test]
    fn test_departs_on() {
        let flight = aa100();
        assert!(flight.departs_on(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()));
        assert!(!flight.departs_on(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()));
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(aa100()).unwrap();
        assert_eq!(json["departure"], "2024-01-01 08:00");
        assert_eq!(json["arrival"], "2024-01-01 11:00");
        assert_eq!(json["booked_seats"], 0);
    }

    #[test]
    fn test_booked_seats_defaults_when_missing() {
        let json = r#"{
            "number": "BA1", "origin": "LHR", "destination": "JFK",
            "departure": "2024-05-01 10:00", "arrival": "2024-05-01 18:00",
            "capacity": 100
        }"#;
        let flight: Flight = serde_json::from_str(json).unwrap();
        assert_eq!(flight.booked_seats, 0);
    }

    #[test]
    fn test_bad_timestamp_is_rejected() {
        let json = r#"{
            "number": "BA1", "origin": "LHR", "destination": "JFK",
            "departure": "2024-05-01T10:00:00", "arrival": "2024-05-01 18:00",
            "capacity": 100
        }"#;
        assert!(serde_json::from_str::<Flight>(json).is_err());
    }
}
