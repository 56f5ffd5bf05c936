//! Storage layer for flightbook.
//!
//! Flights and bookings live in two independent JSON snapshot files inside a
//! data directory. Every load returns the whole collection and every save
//! replaces it; there are no partial updates and no locking, so two
//! processes writing the same data directory can overwrite each other.

mod snapshot;

use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{Error, Result};
use crate::model::{Booking, Flight};

/// File name of the flights snapshot.
pub const FLIGHTS_FILE_NAME: &str = "flights.json";

/// File name of the bookings snapshot.
pub const BOOKINGS_FILE_NAME: &str = "bookings.json";

/// Snapshot storage for the two collections.
///
/// The data directory is created the first time a collection is loaded or
/// saved, not when the `Storage` is constructed.
#[derive(Debug, Clone)]
pub struct Storage {
    /// Directory holding the snapshot files.
    data_dir: PathBuf,
    /// Pretty-print snapshots with two-space indentation.
    pretty: bool,
}

impl Storage {
    /// Create storage rooted at the given data directory.
    #[must_use]
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
            pretty: true,
        }
    }

    /// Choose between indented and compact snapshot output.
    #[must_use]
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Get the data directory.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Get the path of the flights snapshot.
    #[must_use]
    pub fn flights_path(&self) -> PathBuf {
        self.data_dir.join(FLIGHTS_FILE_NAME)
    }

    /// Get the path of the bookings snapshot.
    #[must_use]
    pub fn bookings_path(&self) -> PathBuf {
        self.data_dir.join(BOOKINGS_FILE_NAME)
    }

    /// Load every stored flight, in storage order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CorruptSnapshot`] if a record is malformed, or an I/O
    /// error if the data directory or file cannot be read.
    pub fn load_flights(&self) -> Result<Vec<Flight>> {
        self.ensure_data_dir()?;
        snapshot::read(&self.flights_path())
    }

    /// Replace the stored flights.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written.
    pub fn save_flights(&self, flights: &[Flight]) -> Result<()> {
        self.ensure_data_dir()?;
        snapshot::write(&self.flights_path(), flights, self.pretty)
    }

    /// Load every stored booking, in storage order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CorruptSnapshot`] if a record is malformed, or an I/O
    /// error if the data directory or file cannot be read.
    pub fn load_bookings(&self) -> Result<Vec<Booking>> {
        self.ensure_data_dir()?;
        snapshot::read(&self.bookings_path())
    }

    /// Replace the stored bookings.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written.
    pub fn save_bookings(&self, bookings: &[Booking]) -> Result<()> {
        self.ensure_data_dir()?;
        snapshot::write(&self.bookings_path(), bookings, self.pretty)
    }

    fn ensure_data_dir(&self) -> Result<()> {
        if !self.data_dir.exists() {
            std::fs::create_dir_all(&self.data_dir).map_err(|source| Error::DirectoryCreate {
                path: self.data_dir.clone(),
                source,
            })?;
            info!("Created data directory {}", self.data_dir.display());
        }
        Ok(())
    }
}
