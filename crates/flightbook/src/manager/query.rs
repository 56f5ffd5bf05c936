//! Flight search filters.

use chrono::NaiveDate;

use crate::model::Flight;

/// Conjunctive filter over flights.
///
/// Each field is optional; an absent field matches every flight. Origin and
/// destination compare case-insensitively, the date compares against the
/// calendar day of departure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlightQuery {
    /// Required origin.
    pub origin: Option<String>,
    /// Required destination.
    pub destination: Option<String>,
    /// Required departure date.
    pub date: Option<NaiveDate>,
}

impl FlightQuery {
    /// A query that matches every flight.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to flights leaving from `origin`. Blank text clears the filter.
    #[must_use]
    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = non_blank(origin.into());
        self
    }

    /// Restrict to flights arriving at `destination`. Blank text clears the filter.
    #[must_use]
    pub fn destination(mut self, destination: impl Into<String>) -> Self {
        self.destination = non_blank(destination.into());
        self
    }

    /// Restrict to flights departing on `date`.
    #[must_use]
    pub fn on_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Whether no filter is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.origin.is_none() && self.destination.is_none() && self.date.is_none()
    }

    /// Check a flight against every set filter.
    #[must_use]
    pub fn matches(&self, flight: &Flight) -> bool {
        self.origin
            .as_deref()
            .map_or(true, |origin| same_place(&flight.origin, origin))
            && self
                .destination
                .as_deref()
                .map_or(true, |destination| same_place(&flight.destination, destination))
            && self.date.map_or(true, |date| flight.departs_on(date))
    }
}

fn non_blank(text: String) -> Option<String> {
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

fn same_place(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}
