//! Primitive field validators.
//!
//! Each validator answers "is this value set and well formed" for one
//! optional field. They never record anything and never fail; call sites
//! pair them with a violation message through
//! [`OrError`](crate::enforcement::OrError).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::enforcement::{Accumulator, OrError};
use crate::records::{Checksum, Date, Identifier, Money, Timestamp};

/// True when `value` is present and differs from its type's default.
#[must_use]
pub fn is_set<T: Default + PartialEq>(value: Option<&T>) -> bool {
    value.is_some_and(|value| *value != T::default())
}

/// True when `text` holds something other than whitespace.
#[must_use]
pub fn is_not_blank(text: &str) -> bool {
    !text.trim().is_empty()
}

/// True when `id` is set, non-blank and parses as a UUID.
#[must_use]
pub fn is_valid_identifier(id: Option<&Identifier>) -> bool {
    is_set(id)
        && id.is_some_and(|id| {
            is_not_blank(&id.value) && uuid::Uuid::parse_str(id.value.trim()).is_ok()
        })
}

/// True when `checksum` is set and its checksum text is non-blank.
///
/// The algorithm is not required here; see [`require_checksum_structure`].
#[must_use]
pub fn is_valid_checksum(checksum: Option<&Checksum>) -> bool {
    is_set(checksum) && checksum.is_some_and(|checksum| is_not_blank(&checksum.checksum))
}

/// Records a violation when exactly one of checksum text and algorithm is
/// filled in.
///
/// `subject` names the owning record in the message, e.g. `"Document"`.
pub fn require_checksum_structure(acc: &mut Accumulator, subject: &str, checksum: Option<&Checksum>) {
    let Some(checksum) = checksum else {
        return;
    };
    let has_value = is_not_blank(&checksum.checksum);
    let has_algorithm = is_not_blank(&checksum.algorithm);
    acc.require_all([
        (!has_value || has_algorithm).or_error(format!("{subject} checksum is missing algorithm")),
        (has_value || !has_algorithm)
            .or_error(format!("{subject} checksum algorithm is set without a checksum")),
    ]);
}

/// True when `date` is set and its text is non-blank.
#[must_use]
pub fn is_valid_date(date: Option<&Date>) -> bool {
    is_set(date) && date.is_some_and(|date| is_not_blank(&date.value))
}

/// True when `timestamp` is present. No chronology is assumed.
#[must_use]
pub fn is_valid_timestamp(timestamp: Option<&Timestamp>) -> bool {
    timestamp.is_some()
}

/// True when `timestamp` is present, after the Unix epoch and not later
/// than `now`.
#[must_use]
pub fn is_valid_past_timestamp(timestamp: Option<&Timestamp>, now: DateTime<Utc>) -> bool {
    timestamp.is_some_and(|timestamp| *timestamp != DateTime::UNIX_EPOCH && *timestamp <= now)
}

/// True when `money` is present. Magnitude rules belong to the call site.
#[must_use]
pub fn is_valid_money(money: Option<&Money>) -> bool {
    is_set(money)
}

/// True when the amount parses as a decimal that is zero or greater.
#[must_use]
pub fn is_non_negative_amount(money: &Money) -> bool {
    money
        .amount
        .trim()
        .parse::<Decimal>()
        .is_ok_and(|amount| !amount.is_sign_negative())
}
