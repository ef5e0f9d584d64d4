//! Contract entrypoints over a loan scope.
//!
//! A contract takes the prior [`LoanScope`] and a typed input, runs one
//! validation pass and returns the [`ScopeUpdate`] the host persists.
//! Contracts are looked up by name in an explicit [`ContractRegistry`].
//!
//! # Architecture
//!
//! ```text
//! name + JSON input
//!         |
//!         v
//!   ContractRegistry --decode--> Contract::Input
//!         |
//!         v
//!   Contract::execute(scope, input, env)
//!         |
//!         +--> IllegalState checks on scope
//!         +--> InvalidInput pass (merge / funding / field rules)
//!         v
//!   ScopeUpdate --LoanScope::apply--> next scope
//! ```

mod enote;
mod loan;
mod registry;
mod scope;
mod servicing;
mod validation;


pub use enote::{UpdateENoteController, UpdateENoteDocument, validate_controller, validate_enote};
pub use loan::{RecordLoan, RecordLoanFunding, validate_asset};
pub use registry::{Contract, ContractRegistry};
pub use scope::{LoanScope, ScopeUpdate};
pub use servicing::{
    AppendLoanDocuments, AppendLoanStates, AppendServicingDocuments, UpdateServicingRights,
    validate_servicing_data, validate_servicing_rights,
};
pub use validation::{
    RecordValidationRequest, RecordValidationResults, merge_validation, validate_request,
    validate_results,
};

impl ContractRegistry {
    /// Creates a registry holding every loan package contract.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry
            .register(RecordLoan)
            .register(AppendLoanDocuments)
            .register(AppendLoanStates)
            .register(AppendServicingDocuments)
            .register(UpdateServicingRights)
            .register(RecordLoanFunding)
            .register(RecordValidationRequest)
            .register(RecordValidationResults)
            .register(UpdateENoteController)
            .register(UpdateENoteDocument);
        registry
    }
}
