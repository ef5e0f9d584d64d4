//! The loan asset and its packed payloads.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::common::Identifier;
use super::funding::Funding;
use crate::enforcement::ContractError;

/// Key under which the loan payload is stored in [`Asset::kv`].
pub const LOAN_KEY: &str = "loan";

/// Type URL of a packed [`Loan`].
pub const LOAN_TYPE_URL: &str = "type.loanpkg.dev/loanpkg.loan.v1.Loan";

/// A typed value stored in an asset's key-value map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PackedValue {
    /// Identifies the type of `value`.
    pub type_url: String,
    /// The encoded value.
    pub value: serde_json::Value,
}

impl PackedValue {
    /// Packs `value` under `type_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::UnexpectedState`] if `value` cannot be
    /// encoded.
    pub fn pack<T: Serialize>(type_url: &str, value: &T) -> Result<Self, ContractError> {
        let value = serde_json::to_value(value).map_err(|e| {
            ContractError::unexpected(format!("failed to pack value as {type_url}: {e}"))
        })?;
        Ok(Self {
            type_url: type_url.to_string(),
            value,
        })
    }

    /// Decodes the value, requiring it to be packed under `type_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::UnexpectedState`] on a type URL mismatch or
    /// when the value does not decode as `T`.
    pub fn unpack<T: serde::de::DeserializeOwned>(&self, type_url: &str) -> Result<T, ContractError> {
        if self.type_url != type_url {
            return Err(ContractError::unexpected(format!(
                "expected packed value of type {type_url}, found {}",
                self.type_url
            )));
        }
        serde_json::from_value(self.value.clone()).map_err(|e| {
            ContractError::unexpected(format!("failed to unpack value as {type_url}: {e}"))
        })
    }
}

/// The loan asset recorded in a scope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Asset {
    /// Asset identifier.
    pub id: Option<Identifier>,
    /// Asset type, e.g. `MORTGAGE`.
    #[serde(rename = "type")]
    pub asset_type: String,
    /// Free-form description.
    pub description: String,
    /// Typed payloads keyed by name.
    pub kv: BTreeMap<String, PackedValue>,
}

impl Asset {
    /// Returns true when a loan payload is stored.
    #[must_use]
    pub fn has_loan(&self) -> bool {
        self.kv.contains_key(LOAN_KEY)
    }

    /// Decodes the stored loan payload.
    ///
    /// Returns `Ok(None)` when no payload is stored.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::UnexpectedState`] when the payload is not a
    /// loan.
    pub fn loan(&self) -> Result<Option<Loan>, ContractError> {
        self.kv
            .get(LOAN_KEY)
            .map(|packed| packed.unpack(LOAN_TYPE_URL))
            .transpose()
    }

    /// Returns a copy of this asset with `loan` packed under [`LOAN_KEY`].
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::UnexpectedState`] if the loan cannot be
    /// encoded.
    pub fn with_loan(&self, loan: &Loan) -> Result<Self, ContractError> {
        let mut kv = self.kv.clone();
        kv.insert(LOAN_KEY.to_string(), PackedValue::pack(LOAN_TYPE_URL, loan)?);
        Ok(Self { kv, ..self.clone() })
    }
}

/// The loan payload carried by an asset.
///
/// Only the fields the contracts inspect are typed. Everything else in the
/// payload is carried through unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Loan {
    /// Loan identifier.
    pub id: Option<Identifier>,
    /// Name of the originating lender.
    pub originator_name: String,
    /// Funding and disbursement details, once recorded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub funding: Option<Funding>,
    /// Remaining payload fields.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}
