use serde::{Deserialize, Serialize};

use super::common::{Date, Identifier};
use super::documents::DocumentMetadata;

/// An electronic promissory note held in an eVault.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ENote {
    /// Party in control of the note.
    pub controller: Option<Controller>,
    /// The note document.
    pub e_note: Option<DocumentMetadata>,
    /// Date the note was signed.
    pub signed_date: Option<Date>,
    /// Name of the eVault holding the note.
    pub vault_name: String,
}

/// The controller of an eNote.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Controller {
    /// Controller identifier.
    pub controller_uuid: Option<Identifier>,
    /// Controller display name.
    pub controller_name: String,
}
