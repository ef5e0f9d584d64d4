//! Funding, disbursement and money movement records.

use serde::{Deserialize, Serialize};

use super::common::{Address, Identifier, Money, Status, Timestamp};

/// Funding of a loan: overall status and its disbursements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Funding {
    /// Overall funding status.
    pub status: Option<Status>,
    /// When funding started.
    pub started: Option<Timestamp>,
    /// When funding completed, if it has.
    pub completed: Option<Timestamp>,
    /// Individual disbursements.
    pub disbursements: Vec<Disbursement>,
}

/// One payout of loan funds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Disbursement {
    /// Disbursement identifier, unique within the funding.
    pub id: Option<Identifier>,
    /// When the disbursement started.
    pub started: Option<Timestamp>,
    /// When the disbursement completed, if it has.
    pub completed: Option<Timestamp>,
    /// Amount paid out.
    pub amount: Option<Money>,
    /// Disbursement status.
    pub status: Option<Status>,
    /// Where the funds go.
    pub disburse_account: Option<DisburseAccount>,
}

/// Destination of a disbursement. Exactly one side must be set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DisburseAccount {
    /// A bank account reached through money movements.
    pub financial: Option<FinancialAccount>,
    /// An on-chain Provenance account.
    pub provenance: Option<ProvenanceAccount>,
}

/// A bank account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FinancialAccount {
    /// Account identifier.
    pub id: Option<Identifier>,
    /// Account holder name.
    pub account_owner: String,
    /// Bank account number, 4 to 17 characters.
    pub account_number: String,
    /// ABA routing number, 9 characters.
    pub routing_number: String,
    /// Ways funds move into the account.
    pub movement: Vec<MoneyMovement>,
}

/// An on-chain account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProvenanceAccount {
    /// Account address.
    pub address: String,
    /// Denomination of the funds.
    pub denom: String,
}

/// How funds move to a financial account. Exactly one side must be set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MoneyMovement {
    /// ACH transfer details.
    pub ach: Option<AchMovement>,
    /// Wire transfer details.
    pub wire: Option<WireMovement>,
}

/// Kind of account an ACH transfer targets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AchAccountType {
    /// Not specified.
    #[default]
    Unknown,
    /// Checking account.
    Checking,
    /// Savings account.
    Savings,
    /// A value this version does not understand.
    #[serde(other)]
    Unrecognized,
}

impl AchAccountType {
    /// Returns true unless this is one of the placeholder values.
    #[must_use]
    pub const fn is_recognized(self) -> bool {
        matches!(self, Self::Checking | Self::Savings)
    }
}

/// ACH transfer details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AchMovement {
    /// Target account type.
    pub account_type: AchAccountType,
}

/// Wire transfer details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WireMovement {
    /// Beneficiary address.
    pub address: Option<Address>,
    /// Free-text wire instructions.
    pub wire_instructions: String,
    /// International routing details.
    pub swift_instructions: Option<SwiftInstructions>,
}

/// SWIFT routing details for an international wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SwiftInstructions {
    /// SWIFT / BIC code.
    pub swift_id: String,
    /// Mailing address of the receiving bank.
    pub swift_bank_mailing_address: Option<Address>,
}
