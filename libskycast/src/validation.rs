//! Input validation for required command-line values

use secrecy::{ExposeSecret, SecretString};

use crate::error::{MissingInput, Result};

/// Reject a blank required value before any request is made.
pub fn require<'a>(value: &'a str, missing: MissingInput) -> Result<&'a str> {
    if value.trim().is_empty() {
        return Err(missing.into());
    }
    Ok(value)
}

/// Same as [`require`] for values that must stay wrapped.
pub fn require_secret(value: &SecretString, missing: MissingInput) -> Result<()> {
    require(value.expose_secret(), missing).map(|_| ())
}
