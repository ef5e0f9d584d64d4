//! Third-party validation requests and results.

use std::collections::HashSet;

use super::registry::Contract;
use super::scope::{LoanScope, ScopeUpdate};
use crate::enforcement::{
    Accumulator, ContractError, OrError, RequirementCategory, ValidationEnv, require_some,
    validate_requirements,
};
use crate::fields::{is_not_blank, is_valid_identifier, is_valid_past_timestamp};
use crate::records::{
    LoanValidation, ValidationIteration, ValidationRequest, ValidationResponse, ValidationResults,
    id_key,
};

/// Opens a new validation iteration.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordValidationRequest;

impl Contract for RecordValidationRequest {
    const NAME: &'static str = "record-validation-request";
    type Input = ValidationRequest;

    fn execute(
        &self,
        scope: &LoanScope,
        input: ValidationRequest,
        env: ValidationEnv,
    ) -> Result<ScopeUpdate, ContractError> {
        let mut validation = scope.validation.clone().unwrap_or_default();
        validate_requirements(RequirementCategory::InvalidInput, env, |acc| {
            validate_request(acc, &input);
            if let Some(id) = id_key(input.request_id.as_ref()) {
                acc.require(
                    validation
                        .find(id)
                        .is_none()
                        .or_error(format!("Validation request with ID {id} already exists")),
                );
            }
        })?;
        validation.iteration.push(ValidationIteration {
            request: input,
            results: None,
        });
        Ok(ScopeUpdate::Validation(validation))
    }
}

/// Records a validator's results against an open request.
///
/// The response is validated before the request is looked up, so a
/// malformed response is reported as invalid input even when the request
/// does not exist.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordValidationResults;

impl Contract for RecordValidationResults {
    const NAME: &'static str = "record-validation-results";
    type Input = ValidationResponse;

    fn execute(
        &self,
        scope: &LoanScope,
        input: ValidationResponse,
        env: ValidationEnv,
    ) -> Result<ScopeUpdate, ContractError> {
        let (request_id, results) =
            validate_requirements(RequirementCategory::InvalidInput, env, |acc| {
                acc.require_all([
                    is_valid_identifier(input.request_id.as_ref())
                        .or_error("Validation response must have valid request ID"),
                    input
                        .results
                        .is_some()
                        .or_error("Validation response must include results"),
                ]);
                if let Some(results) = &input.results {
                    validate_results(acc, results);
                }
                id_key(input.request_id.as_ref())
                    .map(str::to_string)
                    .zip(input.results.clone())
            })?
            .ok_or_else(|| ContractError::unexpected("validated response has no request ID"))?;

        let mut validation = scope.validation.clone().unwrap_or_default();
        let iteration = require_some(
            RequirementCategory::IllegalState,
            validation.iteration.iter_mut().find(|iteration| {
                id_key(iteration.request.request_id.as_ref()) == Some(request_id.as_str())
            }),
            format!("No validation request with ID {request_id} exists"),
        )?;
        validate_requirements(RequirementCategory::IllegalState, env, |acc| {
            acc.require(iteration.results.is_none().or_error(format!(
                "Results for validation request {request_id} are already recorded"
            )));
        })?;

        iteration.results = Some(results);
        tracing::debug!(request_id = %request_id, "recorded validation results");
        Ok(ScopeUpdate::Validation(validation))
    }
}

/// Validates a request's own fields. Uniqueness is the caller's concern.
pub fn validate_request(acc: &mut Accumulator, request: &ValidationRequest) {
    let now = acc.now();
    acc.require_all([
        is_valid_identifier(request.request_id.as_ref())
            .or_error("Validation request must have valid request ID"),
        is_valid_identifier(request.rule_set_id.as_ref())
            .or_error("Validation request must have valid rule set ID"),
        is_valid_past_timestamp(request.effective_time.as_ref(), now)
            .or_error("Validation request must have valid effective time"),
        is_not_blank(&request.validator_name)
            .or_error("Validation request is missing validator name"),
        is_not_blank(&request.requester_name)
            .or_error("Validation request is missing requester name"),
    ]);
}

/// Validates a result set and each of its items.
pub fn validate_results(acc: &mut Accumulator, results: &ValidationResults) {
    let now = acc.now();
    acc.require_all([
        is_valid_identifier(results.result_set_uuid.as_ref())
            .or_error("Validation results must have valid result set ID"),
        is_valid_past_timestamp(results.result_set_effective_time.as_ref(), now)
            .or_error("Validation results must have valid effective time"),
        is_not_blank(&results.result_set_provider)
            .or_error("Validation results are missing provider name"),
    ]);
    acc.require_each(&results.validation_items, |acc, item| {
        acc.require_all([
            is_not_blank(&item.description).or_error("Validation item is missing description"),
            is_not_blank(&item.status).or_error("Validation item is missing status"),
        ]);
    });
}

/// Validates whole iterations submitted with a loan package and appends the
/// accepted ones to `existing`.
///
/// Request IDs must be new to `existing` and appear once in the batch.
pub fn merge_validation(
    acc: &mut Accumulator,
    existing: Option<&LoanValidation>,
    incoming: Vec<ValidationIteration>,
) -> LoanValidation {
    let mut merged = existing.cloned().unwrap_or_default();
    let known: HashSet<String> = merged
        .iteration
        .iter()
        .filter_map(|iteration| id_key(iteration.request.request_id.as_ref()))
        .map(str::to_string)
        .collect();
    let mut incoming_ids: HashSet<String> = HashSet::new();
    let mut accepted = Vec::new();

    acc.require_each(incoming, |acc, iteration| {
        let before = acc.total();
        validate_request(acc, &iteration.request);
        if let Some(results) = &iteration.results {
            validate_results(acc, results);
        }
        let id = id_key(iteration.request.request_id.as_ref()).map(str::to_string);
        if let Some(id) = &id {
            acc.require_all([
                (!known.contains(id))
                    .or_error(format!("Validation request with ID {id} already exists")),
                (!incoming_ids.contains(id)).or_error(format!(
                    "Validation request with ID {id} is provided more than once in input"
                )),
            ]);
        }
        if acc.total() == before {
            incoming_ids.extend(id);
            accepted.push(iteration);
        }
    });

    merged.iteration.extend(accepted);
    merged
}
