//! Violation accumulation and requirement evaluation.
//!
//! Every contract rule runs through this module. Rules do not fail fast:
//! each failed rule is recorded on an [`Accumulator`] and the pass keeps
//! going, so the caller sees every problem with its input in one error.
//!
//! # Architecture
//!
//! ```text
//! validate_requirements(category, env, body)
//!         |
//!         v
//!   Accumulator --require / require_all--> ViolationMap (message -> count)
//!         |
//!         +--require_each--> scoped Accumulator per element
//!         |                      (grouped, "[Iteration i, j]" tagged)
//!         v
//!   empty map  -> Ok(body value)
//!   otherwise  -> ContractError::{Violation, IllegalState}
//! ```
//!
//! # Example
//!
//! ```rust
//! use loanpkg_core::enforcement::{
//!     OrError, RequirementCategory, ValidationEnv, validate_requirements,
//! };
//!
//! let names = ["alpha", "", "gamma", ""];
//! let err = validate_requirements(
//!     RequirementCategory::InvalidInput,
//!     ValidationEnv::default(),
//!     |acc| {
//!         acc.require_each(names, |acc, name| {
//!             acc.require((!name.is_empty()).or_error("Name must not be blank"));
//!         });
//!     },
//! )
//! .unwrap_err();
//!
//! assert_eq!(err.violation_count(), Some(2));
//! assert_eq!(
//!     err.to_string(),
//!     "The contract input was invalid: Name must not be blank [Iteration 1, 3] (2 occurrences)"
//! );
//! ```

mod accumulator;
mod error;
mod evaluator;
mod iterated;
mod violations;


pub use accumulator::{Accumulator, DEFAULT_ITERATION_LIMIT, ValidationEnv};
pub use error::{ContractError, ILLEGAL_STATE_BANNER, INVALID_INPUT_BANNER};
pub use evaluator::{
    RequirementCategory, check_requirements, require_some, validate_requirements,
};
pub use iterated::tag_iterations;
pub use violations::{Enforcement, OrError, SUMMARY_SEPARATOR, Violation, ViolationMap};
