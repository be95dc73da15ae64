//! Individual validation rule implementations.
//!
//! Each rule is a pure function returning `Some(FieldFailure)` when the value
//! breaks the rule and `None` otherwise. Rules for one field are chained with
//! [`Option::or_else`] so a field reports at most one failure, while rules for
//! different fields are evaluated independently.

use super::FieldFailure;
use std::ops::RangeInclusive;
use uuid::Uuid;

/// Fails when the value is empty after trimming.
#[must_use]
pub fn required(key: &str, value: &str, message: &str) -> Option<FieldFailure> {
    value
        .trim()
        .is_empty()
        .then(|| FieldFailure::new(key, message))
}

/// Fails when the character count of a non-empty value falls outside
/// `bounds`.
///
/// Empty values pass so that [`required`] remains the only rule reporting
/// them.
#[must_use]
pub fn length_between(
    key: &str,
    value: &str,
    bounds: RangeInclusive<usize>,
    message: &str,
) -> Option<FieldFailure> {
    if value.is_empty() {
        return None;
    }
    let length = value.chars().count();
    (!bounds.contains(&length)).then(|| FieldFailure::new(key, message))
}

/// Fails when an optional value exceeds `max` characters.
#[must_use]
pub fn max_length(
    key: &str,
    value: Option<&str>,
    max: usize,
    message: &str,
) -> Option<FieldFailure> {
    let length = value.map_or(0, |text| text.chars().count());
    (length > max).then(|| FieldFailure::new(key, message))
}

/// Fails when an optional value is present and not strictly after
/// `reference`.
#[must_use]
pub fn after<T: PartialOrd>(
    key: &str,
    value: Option<&T>,
    reference: &T,
    message: &str,
) -> Option<FieldFailure> {
    value
        .filter(|candidate| *candidate <= reference)
        .map(|_| FieldFailure::new(key, message))
}

/// Fails when the identifier is the nil UUID.
#[must_use]
pub fn not_nil(key: &str, value: &Uuid, message: &str) -> Option<FieldFailure> {
    value.is_nil().then(|| FieldFailure::new(key, message))
}

/// Fails when `predicate` does not hold.
#[must_use]
pub fn must(key: &str, predicate: bool, message: &str) -> Option<FieldFailure> {
    (!predicate).then(|| FieldFailure::new(key, message))
}
