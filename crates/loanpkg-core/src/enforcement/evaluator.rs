//! The single decision point of a validation pass.

use super::accumulator::{Accumulator, ValidationEnv};
use super::error::ContractError;
use super::violations::{Enforcement, Violation, ViolationMap};

/// What a failed pass says about the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequirementCategory {
    /// The submitted input is malformed.
    InvalidInput,
    /// The existing state is unusable for this operation.
    IllegalState,
}

impl RequirementCategory {
    /// Turns a non-empty violation map into the error for this category.
    #[must_use]
    pub fn error(self, violations: &ViolationMap) -> ContractError {
        match self {
            Self::InvalidInput => ContractError::invalid_input(violations),
            Self::IllegalState => ContractError::illegal_state(violations),
        }
    }
}

/// Runs `body` against a fresh [`Accumulator`] and returns its value when
/// nothing was recorded.
///
/// # Errors
///
/// Returns the category's [`ContractError`] summarising every violation the
/// body recorded.
pub fn validate_requirements<T>(
    category: RequirementCategory,
    env: ValidationEnv,
    body: impl FnOnce(&mut Accumulator) -> T,
) -> Result<T, ContractError> {
    let mut acc = Accumulator::new(env);
    let value = body(&mut acc);
    if acc.is_clean() {
        return Ok(value);
    }
    let violations = acc.into_violations();
    tracing::warn!(
        category = ?category,
        distinct = violations.len(),
        total = violations.total(),
        "validation pass failed"
    );
    Err(category.error(&violations))
}

/// Flat form of [`validate_requirements`] for plain leaf checks.
///
/// # Errors
///
/// Returns the category's [`ContractError`] when any enforcement failed.
pub fn check_requirements(
    category: RequirementCategory,
    enforcements: impl IntoIterator<Item = Enforcement>,
) -> Result<(), ContractError> {
    validate_requirements(category, ValidationEnv::default(), |acc| {
        acc.require_all(enforcements);
    })
}

/// Unwraps a value the operation cannot proceed without.
///
/// # Errors
///
/// Returns the category's [`ContractError`] carrying `violation` when
/// `value` is `None`.
pub fn require_some<T>(
    category: RequirementCategory,
    value: Option<T>,
    violation: impl Into<Violation>,
) -> Result<T, ContractError> {
    value.ok_or_else(|| {
        let violations: ViolationMap = std::iter::once(violation.into()).collect();
        category.error(&violations)
    })
}
