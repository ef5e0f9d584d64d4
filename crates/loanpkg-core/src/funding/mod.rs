//! Funding and disbursement validation.
//!
//! Funding is validated as a tree, depth first:
//!
//! ```text
//! Funding (status, started, completed)
//!   +-- disbursement IDs unique across the list
//!   +-- Disbursement[i] (id, times, amount, status)
//!         +-- DisburseAccount: financial XOR provenance
//!               +-- FinancialAccount (id, account number, routing number)
//!               |     +-- MoneyMovement[j]: ach XOR wire
//!               |           +-- AchMovement (recognised account type)
//!               |           +-- WireMovement (address, instructions, SWIFT)
//!               +-- ProvenanceAccount (address)
//! ```
//!
//! Every list level goes through [`Accumulator::require_each`], so a
//! problem deep in the tree is reported once per distinct message with the
//! positions that produced it.

use std::collections::HashMap;

use crate::enforcement::{
    Accumulator, ContractError, OrError, RequirementCategory, ValidationEnv, require_some,
    validate_requirements,
};
use crate::fields::{
    is_non_negative_amount, is_not_blank, is_set, is_valid_identifier, is_valid_money,
    is_valid_past_timestamp,
};
use crate::records::{
    Asset, Disbursement, FinancialAccount, Funding, MoneyMovement,
    ProvenanceAccount, Status, Timestamp, WireMovement, id_key,
};

#[cfg(test)]
mod tests;

/// Minimum length of a bank account number.
pub const ACCOUNT_NUMBER_MIN_LEN: usize = 4;

/// Maximum length of a bank account number.
pub const ACCOUNT_NUMBER_MAX_LEN: usize = 17;

/// Length of an ABA routing number.
pub const ROUTING_NUMBER_LEN: usize = 9;

fn exactly_one(left: bool, right: bool) -> bool {
    left ^ right
}

fn is_valid_status(status: Option<&Status>) -> bool {
    is_set(status) && status.is_some_and(|status| is_not_blank(&status.status))
}

/// Records the rules shared by anything with a start and optional
/// completion time.
fn require_period(
    acc: &mut Accumulator,
    subject: &str,
    started: Option<&Timestamp>,
    completed: Option<&Timestamp>,
) {
    let now = acc.now();
    acc.require(
        is_valid_past_timestamp(started, now).or_error(format!("{subject} must have valid start time")),
    );
    if let Some(completed) = completed {
        acc.require(
            is_valid_past_timestamp(Some(completed), now)
                .or_error(format!("{subject} must have valid completion time")),
        );
    }
}

/// Records every violation of `funding` and its nested records.
pub fn validate_funding(acc: &mut Accumulator, funding: &Funding) {
    acc.require(is_valid_status(funding.status.as_ref()).or_error("Funding must have a status"));
    require_period(acc, "Funding", funding.started.as_ref(), funding.completed.as_ref());
    require_unique_disbursement_ids(acc, &funding.disbursements);
    acc.require_each(&funding.disbursements, validate_disbursement);
}

/// Records one violation per disbursement ID used more than once, with the
/// number of usages.
pub fn require_unique_disbursement_ids(acc: &mut Accumulator, disbursements: &[Disbursement]) {
    let mut order: Vec<&str> = Vec::new();
    let mut usages: HashMap<&str, usize> = HashMap::new();
    for id in disbursements
        .iter()
        .filter_map(|disbursement| id_key(disbursement.id.as_ref()))
    {
        let count = usages.entry(id).or_insert(0);
        if *count == 0 {
            order.push(id);
        }
        *count += 1;
    }
    for id in order {
        let count = usages[id];
        acc.require((count == 1).or_error(format!("Disbursement ID {id} is not unique ({count} usages)")));
    }
}

/// Records every violation of one disbursement.
pub fn validate_disbursement(acc: &mut Accumulator, disbursement: &Disbursement) {
    acc.require_all([
        is_valid_identifier(disbursement.id.as_ref()).or_error("Disbursement must have valid ID"),
        is_valid_status(disbursement.status.as_ref()).or_error("Disbursement must have a status"),
        is_valid_money(disbursement.amount.as_ref()).or_error("Disbursement must have an amount"),
    ]);
    require_period(
        acc,
        "Disbursement",
        disbursement.started.as_ref(),
        disbursement.completed.as_ref(),
    );
    if let Some(amount) = disbursement.amount.as_ref().filter(|money| is_valid_money(Some(*money))) {
        acc.require_all([
            is_non_negative_amount(amount)
                .or_error("Disbursement amount must be a non-negative number"),
            is_not_blank(&amount.currency).or_error("Disbursement amount is missing currency"),
        ]);
    }

    let account = disbursement.disburse_account.as_ref();
    let financial = account.and_then(|account| account.financial.as_ref());
    let provenance = account.and_then(|account| account.provenance.as_ref());
    acc.require(
        exactly_one(financial.is_some(), provenance.is_some())
            .or_error("Disbursement account must be exactly one of financial or Provenance account"),
    );
    validate_disburse_account(acc, financial, provenance);
}

fn validate_disburse_account(
    acc: &mut Accumulator,
    financial: Option<&FinancialAccount>,
    provenance: Option<&ProvenanceAccount>,
) {
    if let Some(financial) = financial {
        validate_financial_account(acc, financial);
    }
    if let Some(provenance) = provenance {
        acc.require(
            is_not_blank(&provenance.address).or_error("Provenance account must have an address"),
        );
    }
}

/// Records every violation of a bank account and its money movements.
pub fn validate_financial_account(acc: &mut Accumulator, account: &FinancialAccount) {
    let number_len = account.account_number.trim().chars().count();
    let routing_len = account.routing_number.trim().chars().count();
    acc.require_all([
        is_valid_identifier(account.id.as_ref()).or_error("Financial account must have valid ID"),
        (ACCOUNT_NUMBER_MIN_LEN..=ACCOUNT_NUMBER_MAX_LEN)
            .contains(&number_len)
            .or_error(format!(
                "Financial account number must be between {ACCOUNT_NUMBER_MIN_LEN} and \
                 {ACCOUNT_NUMBER_MAX_LEN} characters"
            )),
        (routing_len == ROUTING_NUMBER_LEN).or_error(format!(
            "Financial account routing number must be {ROUTING_NUMBER_LEN} characters"
        )),
        (!account.movement.is_empty())
            .or_error("Financial account must have at least one money movement"),
    ]);
    acc.require_each(&account.movement, validate_money_movement);
}

/// Records every violation of one money movement.
pub fn validate_money_movement(acc: &mut Accumulator, movement: &MoneyMovement) {
    acc.require(
        exactly_one(movement.ach.is_some(), movement.wire.is_some())
            .or_error("Money movement must be exactly one of ACH or wire"),
    );
    if let Some(ach) = &movement.ach {
        acc.require(
            ach.account_type
                .is_recognized()
                .or_error("ACH movement must have a recognized account type"),
        );
    }
    if let Some(wire) = &movement.wire {
        validate_wire(acc, wire);
    }
}

fn validate_wire(acc: &mut Accumulator, wire: &WireMovement) {
    acc.require_all([
        is_set(wire.address.as_ref()).or_error("Wire movement must have an address"),
        is_not_blank(&wire.wire_instructions).or_error("Wire movement must have wire instructions"),
    ]);
    if let Some(swift) = &wire.swift_instructions {
        acc.require_all([
            is_not_blank(&swift.swift_id).or_error("SWIFT instructions must have a SWIFT ID"),
            is_set(swift.swift_bank_mailing_address.as_ref())
                .or_error("SWIFT instructions must have a bank mailing address"),
        ]);
    }
}

/// Validates `funding` and attaches it to the loan stored on `asset`.
///
/// The asset must already carry a loan payload; that precondition is
/// checked first and reported as illegal state.
///
/// # Errors
///
/// - [`ContractError::IllegalState`] when there is no asset or no loan
///   payload
/// - [`ContractError::UnexpectedState`] when the stored payload is not a
///   loan
/// - [`ContractError::Violation`] listing every funding violation
pub fn record_funding(
    env: ValidationEnv,
    asset: Option<&Asset>,
    funding: &Funding,
) -> Result<Asset, ContractError> {
    let asset = require_some(
        RequirementCategory::IllegalState,
        asset.filter(|asset| asset.has_loan()),
        "Cannot record funding for an asset without loan data",
    )?;
    let mut loan = asset
        .loan()?
        .ok_or_else(|| ContractError::unexpected("asset lost its loan payload"))?;

    validate_requirements(RequirementCategory::InvalidInput, env, |acc| {
        validate_funding(acc, funding);
    })?;

    loan.funding = Some(funding.clone());
    let updated = asset.with_loan(&loan)?;
    tracing::debug!(
        disbursements = funding.disbursements.len(),
        "recorded loan funding"
    );
    Ok(updated)
}
