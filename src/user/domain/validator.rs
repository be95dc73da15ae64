//! Rule set for users.

use super::{Email, User};
use crate::validation::{FieldFailure, Validate, ValidationOutcome, rules};
use std::ops::RangeInclusive;

/// Field key for the display name.
pub const NAME_KEY: &str = "Name";
/// Field key for the email address.
pub const EMAIL_KEY: &str = "Email";

/// Allowed name length in characters.
pub const NAME_LENGTH_BOUNDS: RangeInclusive<usize> = 2..=100;
/// Maximum email length in characters, matching the storage column.
pub const EMAIL_MAX_CHARS: usize = 320;

/// Message reported for a blank name.
pub const NAME_REQUIRED: &str = "user name is required";
/// Message reported for a name outside [`NAME_LENGTH_BOUNDS`].
pub const NAME_LENGTH: &str = "user name must be between 2 and 100 characters";
/// Message reported for a malformed email address.
pub const EMAIL_INVALID: &str = "user email is in an invalid format";
/// Message reported for an email longer than [`EMAIL_MAX_CHARS`].
pub const EMAIL_TOO_LONG: &str = "user email must not exceed 320 characters";

pub(super) fn name_failure(name: &str) -> Option<FieldFailure> {
    rules::required(NAME_KEY, name, NAME_REQUIRED)
        .or_else(|| rules::length_between(NAME_KEY, name, NAME_LENGTH_BOUNDS, NAME_LENGTH))
}

pub(super) fn email_failure(email: &Email) -> Option<FieldFailure> {
    rules::must(EMAIL_KEY, email.is_well_formed(), EMAIL_INVALID).or_else(|| {
        rules::max_length(
            EMAIL_KEY,
            Some(email.as_str()),
            EMAIL_MAX_CHARS,
            EMAIL_TOO_LONG,
        )
    })
}

impl Validate for User {
    fn validate(&self) -> ValidationOutcome {
        let name = name_failure(self.name());
        let email = email_failure(self.email());

        ValidationOutcome::from_failures([name, email].into_iter().flatten())
    }
}
