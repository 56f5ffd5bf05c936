//! Whole-collection JSON snapshot files.
//!
//! A snapshot is a JSON array holding every record of one collection. It is
//! always read and written as a unit.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, trace};

use crate::error::{Error, Result};

/// Read every record from a snapshot file.
///
/// A missing file is an empty collection.
pub(crate) fn read<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            trace!("No snapshot at {}, starting empty", path.display());
            return Ok(Vec::new());
        }
        Err(err) => return Err(err.into()),
    };

    let records: Vec<T> = serde_json::from_slice(&bytes).map_err(|source| Error::CorruptSnapshot {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Replace a snapshot file with the given records.
///
/// The data goes to a sibling temporary file first and is renamed into
/// place, so a reader sees either the old snapshot or the new one.
pub(crate) fn write<T: Serialize>(path: &Path, records: &[T], pretty: bool) -> Result<()> {
    let mut json = if pretty {
        serde_json::to_vec_pretty(records)?
    } else {
        serde_json::to_vec(records)?
    };
    json.push(b'\n');

    let staging = staging_path(path);
    let write_err = |source: std::io::Error| Error::SnapshotWrite {
        path: path.to_path_buf(),
        source,
    };
    fs::write(&staging, &json).map_err(write_err)?;
    fs::rename(&staging, path).map_err(write_err)?;

    debug!("Saved {} records to {}", records.len(), path.display());
    Ok(())
}

/// Path of the temporary file used while replacing `path`.
fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(ToOwned::to_owned).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
