//! User entity.

use super::{Email, UserId, validator};
use crate::persistence::Entity;
use crate::validation::FieldFailure;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    name: String,
    email: Email,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedUserData {
    /// Persisted user identifier.
    pub id: UserId,
    /// Persisted display name.
    pub name: String,
    /// Persisted email address.
    pub email: Email,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates a new user with a fresh identifier.
    ///
    /// Performs no validation and no I/O; call
    /// [`Validate::validate`](crate::validation::Validate::validate) to check
    /// the result.
    #[must_use]
    pub fn create(name: &str, email: &str, clock: &impl Clock) -> Self {
        Self {
            id: UserId::new(),
            name: name.trim().to_owned(),
            email: Email::new(email),
            created_at: clock.utc(),
        }
    }

    /// Reconstructs a user from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedUserData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            email: data.email,
            created_at: data.created_at,
        }
    }

    /// Builds a replacement carrying this user's identity and creation time.
    #[must_use]
    pub fn with_details(&self, name: &str, email: &str) -> Self {
        Self {
            id: self.id,
            name: name.trim().to_owned(),
            email: Email::new(email),
            created_at: self.created_at,
        }
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the trimmed display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the email address.
    #[must_use]
    pub const fn email(&self) -> &Email {
        &self.email
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Renames the user.
    ///
    /// # Errors
    ///
    /// Returns a `Name` failure and leaves the user unchanged when the name
    /// is blank or outside the allowed length.
    pub fn rename(&mut self, name: &str) -> Result<(), FieldFailure> {
        let trimmed = name.trim();
        if let Some(failure) = validator::name_failure(trimmed) {
            return Err(failure);
        }
        self.name = trimmed.to_owned();
        Ok(())
    }

    /// Changes the email address.
    ///
    /// # Errors
    ///
    /// Returns an `Email` failure and leaves the user unchanged when the
    /// address is malformed or too long.
    pub fn change_email(&mut self, email: &str) -> Result<(), FieldFailure> {
        let candidate = Email::new(email);
        if let Some(failure) = validator::email_failure(&candidate) {
            return Err(failure);
        }
        self.email = candidate;
        Ok(())
    }
}

impl Entity for User {
    type Id = UserId;

    fn id(&self) -> UserId {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
