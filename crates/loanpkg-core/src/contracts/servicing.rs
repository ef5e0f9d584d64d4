//! Loan documents, servicing rights and servicing data.

use super::registry::Contract;
use super::scope::{LoanScope, ScopeUpdate};
use crate::enforcement::{
    Accumulator, ContractError, OrError, RequirementCategory, ValidationEnv, require_some,
    validate_requirements,
};
use crate::fields::{is_not_blank, is_valid_identifier};
use crate::merge::{append_documents, append_loan_states, merge_documents, merge_loan_states};
use crate::records::{DocumentMetadata, LoanStateMetadata, ServicingData, ServicingRights};

/// Appends documents to the loan's document list.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppendLoanDocuments;

impl Contract for AppendLoanDocuments {
    const NAME: &'static str = "append-loan-documents";
    type Input = Vec<DocumentMetadata>;

    fn execute(
        &self,
        scope: &LoanScope,
        input: Vec<DocumentMetadata>,
        env: ValidationEnv,
    ) -> Result<ScopeUpdate, ContractError> {
        append_documents(env, &scope.documents, &input).map(ScopeUpdate::Documents)
    }
}

/// Appends loan state snapshots to the servicing data.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppendLoanStates;

impl Contract for AppendLoanStates {
    const NAME: &'static str = "append-loan-states";
    type Input = Vec<LoanStateMetadata>;

    fn execute(
        &self,
        scope: &LoanScope,
        input: Vec<LoanStateMetadata>,
        env: ValidationEnv,
    ) -> Result<ScopeUpdate, ContractError> {
        let servicing = require_some(
            RequirementCategory::IllegalState,
            scope.servicing_data.as_ref(),
            "Cannot append loan states without existing servicing data",
        )?;
        let loan_state = append_loan_states(env, &servicing.loan_state, &input)?;
        Ok(ScopeUpdate::ServicingData(ServicingData {
            loan_state,
            ..servicing.clone()
        }))
    }
}

/// Appends documents to the servicing data.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppendServicingDocuments;

impl Contract for AppendServicingDocuments {
    const NAME: &'static str = "append-servicing-documents";
    type Input = Vec<DocumentMetadata>;

    fn execute(
        &self,
        scope: &LoanScope,
        input: Vec<DocumentMetadata>,
        env: ValidationEnv,
    ) -> Result<ScopeUpdate, ContractError> {
        let servicing = require_some(
            RequirementCategory::IllegalState,
            scope.servicing_data.as_ref(),
            "Cannot append servicing documents without existing servicing data",
        )?;
        let doc_meta = append_documents(env, &servicing.doc_meta, &input)?;
        Ok(ScopeUpdate::ServicingData(ServicingData {
            doc_meta,
            ..servicing.clone()
        }))
    }
}

/// Replaces the servicing rights.
#[derive(Debug, Clone, Copy, Default)]
pub struct UpdateServicingRights;

impl Contract for UpdateServicingRights {
    const NAME: &'static str = "update-servicing-rights";
    type Input = ServicingRights;

    fn execute(
        &self,
        _scope: &LoanScope,
        input: ServicingRights,
        env: ValidationEnv,
    ) -> Result<ScopeUpdate, ContractError> {
        validate_requirements(RequirementCategory::InvalidInput, env, |acc| {
            validate_servicing_rights(acc, &input);
        })?;
        Ok(ScopeUpdate::ServicingRights(input))
    }
}

/// Validates a servicer.
pub fn validate_servicing_rights(acc: &mut Accumulator, rights: &ServicingRights) {
    acc.require_all([
        is_valid_identifier(rights.servicer_id.as_ref())
            .or_error("Servicing rights must have valid servicer ID"),
        is_not_blank(&rights.servicer_name).or_error("Servicing rights are missing servicer name"),
    ]);
}

/// Validates submitted servicing data and merges its loan states and
/// documents into `existing`.
///
/// The result keeps the submitted loan ID and asset type; the collections
/// are `existing` followed by whatever was accepted.
pub fn validate_servicing_data(
    acc: &mut Accumulator,
    existing: Option<&ServicingData>,
    incoming: ServicingData,
) -> ServicingData {
    acc.require_all([
        is_valid_identifier(incoming.loan_id.as_ref())
            .or_error("Servicing data must have valid loan ID"),
        is_not_blank(&incoming.asset_type).or_error("Servicing data is missing asset type"),
    ]);

    let (prior_states, prior_docs) = existing
        .map(|data| (data.loan_state.as_slice(), data.doc_meta.as_slice()))
        .unwrap_or_default();

    let loan_state = if incoming.loan_state.is_empty() {
        prior_states.to_vec()
    } else {
        merge_loan_states(acc, prior_states, &incoming.loan_state)
    };
    let doc_meta = if incoming.doc_meta.is_empty() {
        prior_docs.to_vec()
    } else {
        merge_documents(acc, prior_docs, &incoming.doc_meta)
    };

    ServicingData {
        loan_state,
        doc_meta,
        ..incoming
    }
}
