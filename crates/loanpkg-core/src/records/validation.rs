//! Third-party validation requests and their results.

use serde::{Deserialize, Serialize};

use super::common::{Identifier, Timestamp};

/// All validation iterations recorded for a loan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoanValidation {
    /// Request/result pairs, in request order.
    pub iteration: Vec<ValidationIteration>,
}

impl LoanValidation {
    /// Finds the iteration for `request_id`, ignoring surrounding
    /// whitespace on either side.
    #[must_use]
    pub fn find(&self, request_id: &str) -> Option<&ValidationIteration> {
        let request_id = request_id.trim();
        self.iteration.iter().find(|iteration| {
            super::id_key(iteration.request.request_id.as_ref()) == Some(request_id)
        })
    }
}

/// One validation request and, once recorded, its results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ValidationIteration {
    /// The request.
    pub request: ValidationRequest,
    /// The results, once the validator responded.
    pub results: Option<ValidationResults>,
}

/// A request for a validator to check the loan package.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ValidationRequest {
    /// Request identifier.
    pub request_id: Option<Identifier>,
    /// Rule set the validator applies.
    pub rule_set_id: Option<Identifier>,
    /// When the request was made.
    pub effective_time: Option<Timestamp>,
    /// Name of the validating party.
    pub validator_name: String,
    /// Name of the requesting party.
    pub requester_name: String,
}

/// Results a validator submits for an earlier request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ValidationResponse {
    /// The request being answered.
    pub request_id: Option<Identifier>,
    /// The results.
    pub results: Option<ValidationResults>,
}

/// A validator's result set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ValidationResults {
    /// Result set identifier.
    pub result_set_uuid: Option<Identifier>,
    /// When the results were produced.
    pub result_set_effective_time: Option<Timestamp>,
    /// Name of the party that produced the results.
    pub result_set_provider: String,
    /// Number of items with exception status.
    pub validation_exception_count: u32,
    /// Number of items with warning status.
    pub validation_warning_count: u32,
    /// Individual findings.
    pub validation_items: Vec<ValidationItem>,
}

/// One finding within a result set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ValidationItem {
    /// Rule that produced the finding.
    pub rule_id: String,
    /// Human-readable finding.
    pub description: String,
    /// Finding status, e.g. `PASS`, `WARNING`, `EXCEPTION`.
    pub status: String,
}
