//! Email address value object.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Email address as entered, trimmed of surrounding whitespace.
///
/// Construction never fails; the format is checked by the user validator via
/// [`Email::is_valid`] so an invalid address surfaces as a field failure
/// instead of a construction error.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Wraps an address.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Self {
        let raw = address.into();
        let trimmed = raw.trim();
        if trimmed.len() == raw.len() {
            Self(raw)
        } else {
            Self(trimmed.to_owned())
        }
    }

    /// Returns the address.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` when the wrapped address is well formed.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        Self::is_valid(&self.0)
    }

    /// Checks the shape `local@domain.tld`.
    ///
    /// The address must be non-blank, contain no whitespace, contain exactly
    /// one `@` with a non-empty local part, and have a domain with a dot that
    /// is neither its first nor its last character. No DNS or mailbox checks
    /// are made.
    ///
    /// # Examples
    ///
    /// ```
    /// use taskboard::user::domain::Email;
    ///
    /// assert!(Email::is_valid("ana@example.com"));
    /// assert!(!Email::is_valid("ana@example"));
    /// assert!(!Email::is_valid("ana@@example.com"));
    /// ```
    #[must_use]
    pub fn is_valid(address: &str) -> bool {
        if address.trim().is_empty() || address.chars().any(char::is_whitespace) {
            return false;
        }
        let mut parts = address.split('@');
        let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
            return false;
        };
        if local.is_empty() {
            return false;
        }
        let last = domain.chars().count().saturating_sub(1);
        domain
            .chars()
            .enumerate()
            .any(|(index, ch)| ch == '.' && index > 0 && index < last)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
