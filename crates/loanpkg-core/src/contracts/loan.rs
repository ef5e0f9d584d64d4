//! Contracts that record the loan itself: the whole package and its
//! funding.

use super::enote::validate_enote;
use super::registry::Contract;
use super::scope::{LoanScope, ScopeUpdate};
use super::servicing::{validate_servicing_data, validate_servicing_rights};
use super::validation::merge_validation;
use crate::enforcement::{
    Accumulator, ContractError, OrError, RequirementCategory, ValidationEnv,
    validate_requirements,
};
use crate::fields::{is_not_blank, is_valid_identifier};
use crate::funding::record_funding;
use crate::merge::merge_documents;
use crate::records::{Asset, Funding};

/// Records a complete loan package in one pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordLoan;

impl Contract for RecordLoan {
    const NAME: &'static str = "record-loan";
    type Input = LoanScope;

    fn execute(
        &self,
        scope: &LoanScope,
        input: LoanScope,
        env: ValidationEnv,
    ) -> Result<ScopeUpdate, ContractError> {
        let recorded = validate_requirements(RequirementCategory::InvalidInput, env, |acc| {
            record_package(acc, scope, input)
        })?;
        tracing::debug!(
            documents = recorded.documents.len(),
            "recorded loan package"
        );
        Ok(ScopeUpdate::Scope(Box::new(recorded)))
    }
}

/// Attaches funding to the loan stored on the asset.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordLoanFunding;

impl Contract for RecordLoanFunding {
    const NAME: &'static str = "record-loan-funding";
    type Input = Funding;

    fn execute(
        &self,
        scope: &LoanScope,
        input: Funding,
        env: ValidationEnv,
    ) -> Result<ScopeUpdate, ContractError> {
        record_funding(env, scope.asset.as_ref(), &input).map(ScopeUpdate::Asset)
    }
}

/// Validates an asset and, when one is already recorded, that it keeps the
/// same ID.
pub fn validate_asset(acc: &mut Accumulator, asset: &Asset, existing: Option<&Asset>) {
    acc.require_all([
        is_valid_identifier(asset.id.as_ref()).or_error("Asset must have valid ID"),
        is_not_blank(&asset.asset_type).or_error("Asset is missing type"),
    ]);
    match asset.loan() {
        Ok(loan) => acc.require(loan.is_some().or_error("Asset is missing loan data")),
        Err(err) => {
            tracing::debug!(error = %err, "asset loan payload did not decode");
            acc.violation("Asset loan data could not be read");
        },
    }
    if let Some(existing) = existing {
        acc.require((existing.id == asset.id).or_error("Cannot change asset ID"));
    }
}

/// Validates every part of `package` against `scope` and builds the scope
/// to persist.
fn record_package(acc: &mut Accumulator, scope: &LoanScope, package: LoanScope) -> LoanScope {
    let LoanScope {
        asset,
        documents,
        servicing_rights,
        servicing_data,
        validation,
        e_note,
    } = package;

    acc.require(asset.is_some().or_error("Must supply an asset"));
    if let Some(asset) = &asset {
        validate_asset(acc, asset, scope.asset.as_ref());
    }

    let documents = if documents.is_empty() {
        scope.documents.clone()
    } else {
        merge_documents(acc, &scope.documents, &documents)
    };

    acc.require(servicing_rights.is_some().or_error("Must supply servicing rights"));
    if let Some(rights) = &servicing_rights {
        validate_servicing_rights(acc, rights);
    }

    acc.require(servicing_data.is_some().or_error("Must supply servicing data"));
    let servicing_data = servicing_data
        .map(|data| validate_servicing_data(acc, scope.servicing_data.as_ref(), data));

    let validation = match validation {
        Some(validation) => Some(merge_validation(
            acc,
            scope.validation.as_ref(),
            validation.iteration,
        )),
        None => scope.validation.clone(),
    };

    if let Some(e_note) = &e_note {
        validate_enote(acc, e_note);
    }

    LoanScope {
        asset,
        documents,
        servicing_rights,
        servicing_data,
        validation,
        e_note: e_note.or_else(|| scope.e_note.clone()),
    }
}
