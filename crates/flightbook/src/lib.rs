//! `flightbook` - A single-operator flight booking record-keeper
//!
//! This library provides the domain model, JSON snapshot storage and booking
//! operations behind the `flightbook` binary: flights are created and
//! searched, seats are booked against them, and bookings are cancelled.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod manager;
pub mod model;
pub mod shell;
pub mod storage;

pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use manager::{AuditReport, FlightManager, FlightQuery, LedgerStats};
pub use model::{Booking, BookingStatus, Flight, NewFlight, Passenger};
pub use storage::Storage;
