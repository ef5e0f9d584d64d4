//! Validation-and-merge engine for loan package records.
//!
//! A host platform stores the records of one loan (asset, documents,
//! servicing data, validation results, eNote) and calls a contract for
//! every mutation. Each contract runs a single validation pass over its
//! input, collecting every violated rule instead of stopping at the first,
//! and only then either rejects the whole submission or returns the merged
//! record for the host to persist.
//!
//! # Modules
//!
//! - [`enforcement`]: violation accumulation, iteration tagging and the
//!   error raised when a pass fails
//! - [`fields`]: primitive "is this value set" validators
//! - [`records`]: the loan package record types
//! - [`merge`]: append-only merges for documents and loan states
//! - [`funding`]: the funding and disbursement tree validator
//! - [`contracts`]: contract entrypoints and their registry
//! - [`config`]: engine configuration
//!
//! # Example
//!
//! ```rust
//! use loanpkg_core::contracts::{ContractRegistry, LoanScope};
//! use loanpkg_core::enforcement::{ContractError, ValidationEnv};
//!
//! let registry = ContractRegistry::with_defaults();
//! let err = registry
//!     .execute(
//!         "append-loan-documents",
//!         &LoanScope::default(),
//!         serde_json::json!([]),
//!         ValidationEnv::default(),
//!     )
//!     .unwrap_err();
//!
//! assert!(matches!(err, ContractError::Violation { .. }));
//! assert_eq!(err.details(), Some("Must supply at least one document"));
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod contracts;
pub mod enforcement;
pub mod fields;
pub mod funding;
pub mod merge;
pub mod records;

#[cfg(test)]
mod test_support;

pub use config::{ConfigError, EngineConfig};
pub use contracts::{Contract, ContractRegistry, LoanScope, ScopeUpdate};
pub use enforcement::{Accumulator, ContractError, ValidationEnv};
