//! Loan state append-merge.

use std::collections::HashSet;

use crate::enforcement::{
    Accumulator, ContractError, OrError, RequirementCategory, ValidationEnv,
    validate_requirements,
};
use crate::fields::{
    is_not_blank, is_valid_checksum, is_valid_identifier, is_valid_past_timestamp,
    require_checksum_structure,
};
use crate::records::{LoanStateMetadata, Timestamp};

/// Records every field-level violation of `loan_state`.
pub fn validate_loan_state(acc: &mut Accumulator, loan_state: &LoanStateMetadata) {
    let now = acc.now();
    acc.require_all([
        is_valid_identifier(loan_state.id.as_ref()).or_error("Loan state must have valid ID"),
        is_not_blank(&loan_state.uri).or_error("Loan state is missing URI"),
        is_valid_checksum(loan_state.checksum.as_ref()).or_error("Loan state is missing checksum"),
        is_valid_past_timestamp(loan_state.effective_time.as_ref(), now)
            .or_error("Loan state must have valid effective time"),
    ]);
    require_checksum_structure(acc, "Loan state", loan_state.checksum.as_ref());
}

/// Merges `incoming` loan states into `existing`, recording violations on
/// `acc`.
///
/// Checksum, ID and effective time must each be new, both against history
/// and within the batch. Unlike documents, a loan state can never be
/// re-committed under an existing checksum.
pub fn merge_loan_states(
    acc: &mut Accumulator,
    existing: &[LoanStateMetadata],
    incoming: &[LoanStateMetadata],
) -> Vec<LoanStateMetadata> {
    acc.require((!incoming.is_empty()).or_error("Must supply at least one loan state"));

    let existing_checksums: HashSet<&str> = existing
        .iter()
        .filter_map(LoanStateMetadata::checksum_key)
        .collect();
    let existing_ids: HashSet<&str> = existing.iter().filter_map(LoanStateMetadata::id_key).collect();
    let existing_times: HashSet<Timestamp> =
        existing.iter().filter_map(|state| state.effective_time).collect();

    let mut seen_checksums: HashSet<&str> = HashSet::new();
    let mut seen_ids: HashSet<&str> = HashSet::new();
    let mut seen_times: HashSet<Timestamp> = HashSet::new();
    let mut merged = existing.to_vec();

    for loan_state in incoming {
        let before = acc.total();
        validate_loan_state(acc, loan_state);

        let checksum = loan_state.checksum_key();
        let id = loan_state.id_key();
        let effective_time = loan_state.effective_time;

        if let Some(checksum) = checksum {
            acc.require_all([
                (!existing_checksums.contains(checksum))
                    .or_error(format!("Loan state with checksum {checksum} already exists")),
                (!seen_checksums.contains(checksum)).or_error(format!(
                    "Loan state with checksum {checksum} is provided more than once in input"
                )),
            ]);
        }
        if let Some(id) = id {
            acc.require_all([
                (!existing_ids.contains(id))
                    .or_error(format!("Loan state with ID {id} already exists")),
                (!seen_ids.contains(id))
                    .or_error(format!("Loan state with ID {id} is provided more than once in input")),
            ]);
        }
        if let Some(time) = effective_time {
            let shown = time.to_rfc3339();
            acc.require_all([
                (!existing_times.contains(&time))
                    .or_error(format!("Loan state with effective time {shown} already exists")),
                (!seen_times.contains(&time)).or_error(format!(
                    "Loan state with effective time {shown} is provided more than once in input"
                )),
            ]);
        }

        if acc.total() == before {
            seen_checksums.extend(checksum);
            seen_ids.extend(id);
            seen_times.extend(effective_time);
            merged.push(loan_state.clone());
        }
    }

    tracing::debug!(
        existing = existing.len(),
        incoming = incoming.len(),
        merged = merged.len(),
        "merged loan states"
    );
    merged
}

/// Validates `incoming` and appends it to `existing` in one pass.
///
/// # Errors
///
/// Returns [`ContractError::Violation`] listing every problem found in the
/// batch. Nothing is merged in that case.
pub fn append_loan_states(
    env: ValidationEnv,
    existing: &[LoanStateMetadata],
    incoming: &[LoanStateMetadata],
) -> Result<Vec<LoanStateMetadata>, ContractError> {
    validate_requirements(RequirementCategory::InvalidInput, env, |acc| {
        merge_loan_states(acc, existing, incoming)
    })
}
