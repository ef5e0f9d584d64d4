//! Loan package records.
//!
//! These are the structured values the host hands to a contract as prior
//! state and as input. Every field is optional or defaulted so a record can
//! express "set or not" the same way its schema does; the validators in
//! [`crate::fields`] decide what counts as set.

mod asset;
mod common;
mod documents;
mod enote;
mod funding;
mod servicing;
mod validation;

pub use asset::{Asset, LOAN_KEY, LOAN_TYPE_URL, Loan, PackedValue};
pub use common::{Address, Checksum, Date, Identifier, Money, Status, Timestamp};
pub use documents::{DocumentMetadata, LoanStateMetadata};
pub(crate) use documents::id_key;
pub use enote::{Controller, ENote};
pub use funding::{
    AchAccountType, AchMovement, DisburseAccount, Disbursement, FinancialAccount, Funding,
    MoneyMovement, ProvenanceAccount, SwiftInstructions, WireMovement,
};
pub use servicing::{ServicingData, ServicingRights};
pub use validation::{
    LoanValidation, ValidationItem, ValidationIteration, ValidationRequest, ValidationResponse,
    ValidationResults,
};
