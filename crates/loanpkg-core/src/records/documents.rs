//! Content-addressed document and loan state records.

use serde::{Deserialize, Serialize};

use super::common::{Checksum, Identifier, Timestamp};

/// Metadata describing one stored loan document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DocumentMetadata {
    /// Document identifier.
    pub id: Option<Identifier>,
    /// Original file name. Not part of the document's identity.
    pub file_name: String,
    /// Location of the document content.
    pub uri: String,
    /// MIME type of the content.
    pub content_type: String,
    /// Business document type, e.g. `PROMISSORY_NOTE`.
    pub document_type: String,
    /// Checksum of the content.
    pub checksum: Option<Checksum>,
}

impl DocumentMetadata {
    /// The document's checksum text, when one is present and non-blank.
    #[must_use]
    pub fn checksum_key(&self) -> Option<&str> {
        self.checksum
            .as_ref()
            .map(|checksum| checksum.checksum.as_str())
            .filter(|checksum| !checksum.trim().is_empty())
    }

    /// The document's identifier text, when one is present and non-blank.
    #[must_use]
    pub fn id_key(&self) -> Option<&str> {
        id_key(self.id.as_ref())
    }
}

/// Metadata for one servicing snapshot of the loan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoanStateMetadata {
    /// Loan state identifier.
    pub id: Option<Identifier>,
    /// When the snapshot took effect.
    pub effective_time: Option<Timestamp>,
    /// Location of the snapshot content.
    pub uri: String,
    /// Checksum of the snapshot content.
    pub checksum: Option<Checksum>,
}

impl LoanStateMetadata {
    /// The loan state's checksum text, when present and non-blank.
    #[must_use]
    pub fn checksum_key(&self) -> Option<&str> {
        self.checksum
            .as_ref()
            .map(|checksum| checksum.checksum.as_str())
            .filter(|checksum| !checksum.trim().is_empty())
    }

    /// The loan state's identifier text, when present and non-blank.
    #[must_use]
    pub fn id_key(&self) -> Option<&str> {
        id_key(self.id.as_ref())
    }
}

/// Identifier text as compared for uniqueness, with surrounding whitespace
/// removed.
pub(crate) fn id_key(id: Option<&Identifier>) -> Option<&str> {
    id.map(|id| id.value.trim())
        .filter(|value| !value.is_empty())
}
