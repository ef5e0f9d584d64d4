use serde::{Deserialize, Serialize};

use super::common::Identifier;
use super::documents::{DocumentMetadata, LoanStateMetadata};

/// Servicing history for a loan: loan state snapshots and servicing
/// documents, both append-only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServicingData {
    /// Identifier of the serviced loan.
    pub loan_id: Option<Identifier>,
    /// Asset type of the serviced loan.
    pub asset_type: String,
    /// Loan state snapshots, oldest first.
    pub loan_state: Vec<LoanStateMetadata>,
    /// Servicing documents.
    pub doc_meta: Vec<DocumentMetadata>,
}

/// The party currently holding servicing rights.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServicingRights {
    /// Servicer identifier.
    pub servicer_id: Option<Identifier>,
    /// Servicer display name.
    pub servicer_name: String,
}
