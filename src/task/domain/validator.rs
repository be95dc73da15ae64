//! Rule set for tasks.

use super::Task;
use crate::validation::{FieldFailure, Validate, ValidationOutcome, rules};
use chrono::{DateTime, Utc};
use std::ops::RangeInclusive;

/// Field key for the title.
pub const TITLE_KEY: &str = "Title";
/// Field key for the description.
pub const DESCRIPTION_KEY: &str = "Description";
/// Field key for the due date.
pub const DUE_DATE_KEY: &str = "DueDate";
/// Field key for the owning user identifier.
pub const USER_ID_KEY: &str = "UserId";

/// Allowed title length in characters.
pub const TITLE_LENGTH_BOUNDS: RangeInclusive<usize> = 2..=200;
/// Maximum description length in characters.
pub const DESCRIPTION_MAX_CHARS: usize = 1000;

/// Message reported for a blank title.
pub const TITLE_REQUIRED: &str = "task title is required";
/// Message reported for a title outside [`TITLE_LENGTH_BOUNDS`].
pub const TITLE_LENGTH: &str = "task title must be between 2 and 200 characters";
/// Message reported for a description longer than [`DESCRIPTION_MAX_CHARS`].
pub const DESCRIPTION_TOO_LONG: &str = "task description must not exceed 1000 characters";
/// Message reported for a due date that is not in the future.
pub const DUE_DATE_PAST: &str = "task due date must be in the future";
/// Message reported for a nil owner identifier.
pub const USER_ID_REQUIRED: &str = "task owner id is required";

pub(super) fn title_failure(title: &str) -> Option<FieldFailure> {
    rules::required(TITLE_KEY, title, TITLE_REQUIRED)
        .or_else(|| rules::length_between(TITLE_KEY, title, TITLE_LENGTH_BOUNDS, TITLE_LENGTH))
}

pub(super) fn description_failure(description: Option<&str>) -> Option<FieldFailure> {
    rules::max_length(
        DESCRIPTION_KEY,
        description,
        DESCRIPTION_MAX_CHARS,
        DESCRIPTION_TOO_LONG,
    )
}

pub(super) fn due_date_failure(
    due_date: Option<&DateTime<Utc>>,
    reference: &DateTime<Utc>,
) -> Option<FieldFailure> {
    rules::after(DUE_DATE_KEY, due_date, reference, DUE_DATE_PAST)
}

impl Validate for Task {
    /// Checks the task's own fields, then appends the failures of the
    /// attached owner, if one is loaded.
    ///
    /// The due date is compared with [`Task::updated_at`], the instant the
    /// task was last written, so the outcome only depends on the task's state.
    fn validate(&self) -> ValidationOutcome {
        let due_date = self.due_date();
        let own = [
            title_failure(self.title()),
            description_failure(self.description()),
            due_date_failure(due_date.as_ref(), &self.updated_at()),
            rules::not_nil(USER_ID_KEY, self.user_id().as_ref(), USER_ID_REQUIRED),
        ];
        let owner = self
            .owner()
            .map_or_else(ValidationOutcome::valid, Validate::validate);

        ValidationOutcome::from_failures(own.into_iter().flatten()).chain(owner)
    }
}
