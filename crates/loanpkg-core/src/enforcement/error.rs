//! Error types raised at the end of a validation pass.

use thiserror::Error;

use super::violations::ViolationMap;

/// Banner prefixed to every invalid-input report.
pub const INVALID_INPUT_BANNER: &str = "The contract input was invalid";

/// Banner prefixed to every illegal-state report.
pub const ILLEGAL_STATE_BANNER: &str = "The contract state was invalid";

/// Errors that abort a contract invocation.
///
/// None of these are caught inside the engine. The host discards the
/// transaction when any of them reaches it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ContractError {
    /// The submitted input broke one or more rules.
    ///
    /// The caller can fix the input and resubmit.
    #[error("The contract input was invalid: {details}")]
    Violation {
        /// Sum of all occurrence counts in the pass.
        violation_count: usize,
        /// Distinct violations joined with `"; "`.
        details: String,
    },

    /// The persisted state cannot accept this operation.
    #[error("The contract state was invalid: {details}")]
    IllegalState {
        /// Distinct violations joined with `"; "`.
        details: String,
    },

    /// A stored or submitted value did not have the shape the contract
    /// relies on.
    #[error("unexpected contract state: {message}")]
    UnexpectedState {
        /// What could not be interpreted.
        message: String,
    },

    /// No contract is registered under the requested name.
    #[error("no contract registered under name: {name}")]
    UnknownContract {
        /// The requested contract name.
        name: String,
    },
}

impl ContractError {
    /// Builds an invalid-input error from a non-empty violation map.
    #[must_use]
    pub fn invalid_input(violations: &ViolationMap) -> Self {
        Self::Violation {
            violation_count: violations.total(),
            details: violations.summary(),
        }
    }

    /// Builds an illegal-state error from a non-empty violation map.
    #[must_use]
    pub fn illegal_state(violations: &ViolationMap) -> Self {
        Self::IllegalState {
            details: violations.summary(),
        }
    }

    /// Shorthand for [`ContractError::UnexpectedState`].
    #[must_use]
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::UnexpectedState {
            message: message.into(),
        }
    }

    /// Returns the occurrence count for invalid-input errors.
    #[must_use]
    pub const fn violation_count(&self) -> Option<usize> {
        match self {
            Self::Violation {
                violation_count, ..
            } => Some(*violation_count),
            _ => None,
        }
    }

    /// Returns the joined violation details, if this error carries any.
    #[must_use]
    pub fn details(&self) -> Option<&str> {
        match self {
            Self::Violation { details, .. } | Self::IllegalState { details } => Some(details),
            _ => None,
        }
    }
}
