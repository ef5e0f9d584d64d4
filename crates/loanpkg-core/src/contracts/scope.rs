//! Prior state handed to a contract and the record it hands back.

use serde::{Deserialize, Serialize};

use crate::records::{
    Asset, DocumentMetadata, ENote, LoanValidation, ServicingData, ServicingRights,
};

/// Every record the host keeps for one loan.
///
/// Also used as the input of `record-loan`, where it carries the whole
/// package being recorded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoanScope {
    /// The loan asset.
    pub asset: Option<Asset>,
    /// Loan documents.
    pub documents: Vec<DocumentMetadata>,
    /// Current servicer.
    pub servicing_rights: Option<ServicingRights>,
    /// Servicing history.
    pub servicing_data: Option<ServicingData>,
    /// Third-party validation history.
    pub validation: Option<LoanValidation>,
    /// Electronic promissory note.
    pub e_note: Option<ENote>,
}

impl LoanScope {
    /// Returns the scope after the host persists `update`.
    #[must_use]
    pub fn apply(self, update: ScopeUpdate) -> Self {
        match update {
            ScopeUpdate::Scope(scope) => *scope,
            ScopeUpdate::Asset(asset) => Self {
                asset: Some(asset),
                ..self
            },
            ScopeUpdate::Documents(documents) => Self { documents, ..self },
            ScopeUpdate::ServicingRights(rights) => Self {
                servicing_rights: Some(rights),
                ..self
            },
            ScopeUpdate::ServicingData(data) => Self {
                servicing_data: Some(data),
                ..self
            },
            ScopeUpdate::Validation(validation) => Self {
                validation: Some(validation),
                ..self
            },
            ScopeUpdate::ENote(e_note) => Self {
                e_note: Some(e_note),
                ..self
            },
        }
    }
}

/// The record a contract returns for the host to persist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "record", content = "value", rename_all = "camelCase")]
pub enum ScopeUpdate {
    /// Every record at once.
    Scope(Box<LoanScope>),
    /// The asset.
    Asset(Asset),
    /// The loan documents.
    Documents(Vec<DocumentMetadata>),
    /// The servicing rights.
    ServicingRights(ServicingRights),
    /// The servicing data.
    ServicingData(ServicingData),
    /// The validation history.
    Validation(LoanValidation),
    /// The eNote.
    ENote(ENote),
}
