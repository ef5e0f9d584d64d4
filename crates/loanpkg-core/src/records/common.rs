//! Scalar value records shared by every record kind.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Point in time carried by loan package records.
pub type Timestamp = DateTime<Utc>;

/// A UUID carried as its string literal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identifier {
    /// The UUID literal.
    pub value: String,
}

impl Identifier {
    /// Wraps a UUID literal.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// Generates a random identifier.
    #[must_use]
    pub fn random() -> Self {
        Self::new(uuid::Uuid::new_v4().to_string())
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.value)
    }
}

/// A content checksum and the algorithm that produced it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Checksum {
    /// The checksum text.
    pub checksum: String,
    /// Algorithm name, e.g. `SHA-512`.
    pub algorithm: String,
}

impl Checksum {
    /// Creates a checksum record.
    #[must_use]
    pub fn new(checksum: impl Into<String>, algorithm: impl Into<String>) -> Self {
        Self {
            checksum: checksum.into(),
            algorithm: algorithm.into(),
        }
    }
}

/// A calendar date in ISO-8601 text form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Date {
    /// The date text.
    pub value: String,
}

impl Date {
    /// Wraps a date string.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

/// A monetary amount in decimal text form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Money {
    /// Decimal amount, e.g. `"1250.00"`.
    pub amount: String,
    /// ISO-4217 currency code.
    pub currency: String,
}

impl Money {
    /// Creates a money record.
    #[must_use]
    pub fn new(amount: impl Into<String>, currency: impl Into<String>) -> Self {
        Self {
            amount: amount.into(),
            currency: currency.into(),
        }
    }
}

/// A postal address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Address {
    /// Street lines.
    pub street: Vec<String>,
    /// City.
    pub city: String,
    /// State or province.
    pub state: String,
    /// Postal code.
    pub zip: String,
    /// Country.
    pub country: String,
}

/// A named status with the time it took effect.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Status {
    /// Status name.
    pub status: String,
    /// When the status took effect.
    pub effective_time: Option<Timestamp>,
}

impl Status {
    /// Creates a status without an effective time.
    #[must_use]
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            effective_time: None,
        }
    }
}
