//! Error types for flightbook.
//!
//! Every failure an operation can report is a variant of [`Error`]. The
//! interactive shell prints them and keeps going; only the storage I/O
//! variants (see [`Error::is_fatal`]) end a run.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for flightbook operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Domain Errors ===
    /// An entity failed one of its validation rules.
    #[error("{message}")]
    Validation {
        /// Which rule was broken.
        message: String,
    },

    /// A flight with the same number is already stored.
    #[error("flight number {number} already exists")]
    DuplicateFlight {
        /// The colliding flight number.
        number: String,
    },

    /// No flight has the given number.
    #[error("flight {number} not found")]
    FlightNotFound {
        /// The requested flight number.
        number: String,
    },

    /// No booking has the given id.
    #[error("booking {booking_id} not found")]
    BookingNotFound {
        /// The requested booking id.
        booking_id: String,
    },

    /// The flight cannot hold the requested seats.
    #[error("not enough seats available on flight {number}: requested {requested}, available {available}")]
    InsufficientSeats {
        /// Flight number.
        number: String,
        /// Seats asked for.
        requested: u32,
        /// Seats still free.
        available: u32,
    },

    // === Format Errors ===
    /// Operator input could not be parsed.
    #[error("invalid input: {message}")]
    Format {
        /// Description of the malformed value.
        message: String,
    },

    /// A stored snapshot file could not be decoded.
    #[error("malformed data in {path}: {source}")]
    CorruptSnapshot {
        /// Path to the snapshot file.
        path: PathBuf,
        /// The underlying decode error.
        #[source]
        source: serde_json::Error,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create the data directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a snapshot file.
    #[error("failed to write {path}: {source}")]
    SnapshotWrite {
        /// Path of the snapshot being replaced.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for flightbook operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a new validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new input format error.
    #[must_use]
    pub fn format(message: impl Into<String>) -> Self {
        Self::Format {
            message: message.into(),
        }
    }

    /// Check if this error is one of the not-found variants.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::FlightNotFound { .. } | Self::BookingNotFound { .. }
        )
    }

    /// Check if this error should end an interactive session.
    ///
    /// Only storage I/O failures are fatal; everything else is reported and
    /// the operator may try again.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::Io(_) | Self::DirectoryCreate { .. } | Self::SnapshotWrite { .. }
        )
    }
}
