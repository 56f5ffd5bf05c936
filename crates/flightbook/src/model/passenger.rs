//! The traveller attached to a booking.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Minimum name length after trimming.
const MIN_NAME_CHARS: usize = 2;

/// Minimum number of digits in a phone number.
const MIN_PHONE_DIGITS: usize = 10;

/// Contact details for the person travelling on a booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passenger {
    /// Full name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Contact phone; formatting characters are allowed.
    pub phone: String,
}

impl Passenger {
    /// Create a passenger. Call [`Passenger::validate`] before storing it.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
        }
    }

    /// Number of digit characters in the phone number.
    #[must_use]
    pub fn phone_digits(&self) -> usize {
        self.phone.chars().filter(char::is_ascii_digit).count()
    }

    /// Check the passenger's contact details.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the name is shorter than two
    /// characters, the email lacks `@` or `.`, or the phone has fewer than
    /// ten digits.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().chars().count() < MIN_NAME_CHARS {
            return Err(Error::validation(
                "Passenger name must be at least 2 characters",
            ));
        }
        if !self.email.contains('@') || !self.email.contains('.') {
            return Err(Error::validation("Invalid email address"));
        }
        if self.phone_digits() < MIN_PHONE_DIGITS {
            return Err(Error::validation(
                "Phone number must have at least 10 digits",
            ));
        }
        Ok(())
    }
}
