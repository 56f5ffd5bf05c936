//! Domain types for flightbook.
//!
//! Plain data plus the validation rules each entity must satisfy. Nothing in
//! here touches the filesystem.

mod booking;
mod flight;
mod passenger;
pub mod timestamp;

pub use booking::{Booking, BookingStatus};
pub use flight::{Flight, NewFlight};
pub use passenger::Passenger;
