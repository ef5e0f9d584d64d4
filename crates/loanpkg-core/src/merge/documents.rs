//! Document append-merge.

use std::collections::{HashMap, HashSet};

use crate::enforcement::{
    Accumulator, ContractError, OrError, RequirementCategory, ValidationEnv,
    validate_requirements,
};
use crate::fields::{is_not_blank, is_valid_checksum, is_valid_identifier, require_checksum_structure};
use crate::records::DocumentMetadata;

/// Records every field-level violation of `document`.
pub fn validate_document(acc: &mut Accumulator, document: &DocumentMetadata) {
    acc.require_all([
        is_valid_identifier(document.id.as_ref()).or_error("Document must have valid ID"),
        is_not_blank(&document.uri).or_error("Document is missing URI"),
        is_not_blank(&document.content_type).or_error("Document is missing content type"),
        is_not_blank(&document.document_type).or_error("Document is missing document type"),
        is_valid_checksum(document.checksum.as_ref()).or_error("Document is missing checksum"),
    ]);
    require_checksum_structure(acc, "Document", document.checksum.as_ref());
}

/// Records a violation for each identity field `incoming` changes relative
/// to `existing`, which shares its checksum.
fn require_unchanged(
    acc: &mut Accumulator,
    checksum: &str,
    existing: &DocumentMetadata,
    incoming: &DocumentMetadata,
) {
    acc.require_all([
        (existing.id == incoming.id)
            .or_error(format!("Cannot change ID of document with checksum {checksum}")),
        (existing.uri == incoming.uri)
            .or_error(format!("Cannot change URI of document with checksum {checksum}")),
        (existing.content_type == incoming.content_type).or_error(format!(
            "Cannot change content type of document with checksum {checksum}"
        )),
        (existing.document_type == incoming.document_type).or_error(format!(
            "Cannot change document type of document with checksum {checksum}"
        )),
    ]);
}

/// Merges `incoming` into `existing`, recording violations on `acc`.
///
/// The returned collection is `existing` followed by every incoming
/// document that passed its checks. It is only meaningful when `acc` ends
/// the pass clean; callers hand it back through
/// [`validate_requirements`], which discards it otherwise.
///
/// A document whose checksum is already committed is accepted as a second
/// entry as long as its ID, URI, content type and document type are
/// unchanged. Only the file name may differ.
pub fn merge_documents(
    acc: &mut Accumulator,
    existing: &[DocumentMetadata],
    incoming: &[DocumentMetadata],
) -> Vec<DocumentMetadata> {
    acc.require((!incoming.is_empty()).or_error("Must supply at least one document"));

    let by_checksum: HashMap<&str, &DocumentMetadata> = existing
        .iter()
        .filter_map(|document| document.checksum_key().map(|checksum| (checksum, document)))
        .collect();
    let existing_ids: HashSet<&str> = existing.iter().filter_map(DocumentMetadata::id_key).collect();

    let mut seen_checksums: HashSet<&str> = HashSet::new();
    let mut seen_ids: HashSet<&str> = HashSet::new();
    let mut merged = existing.to_vec();

    for document in incoming {
        let before = acc.total();
        validate_document(acc, document);

        let checksum = document.checksum_key();
        let id = document.id_key();

        let committed = checksum
            .and_then(|checksum| by_checksum.get(checksum).map(|&committed| (checksum, committed)));
        if let Some((checksum, committed)) = committed {
            require_unchanged(acc, checksum, committed, document);
        } else if let Some(id) = id {
            acc.require(
                (!existing_ids.contains(id))
                    .or_error(format!("Document with ID {id} already exists")),
            );
        }

        if let Some(checksum) = checksum {
            acc.require((!seen_checksums.contains(checksum)).or_error(format!(
                "Document with checksum {checksum} is provided more than once in input"
            )));
        }
        if let Some(id) = id {
            acc.require(
                (!seen_ids.contains(id))
                    .or_error(format!("Document with ID {id} is provided more than once in input")),
            );
        }

        if acc.total() == before {
            seen_checksums.extend(checksum);
            seen_ids.extend(id);
            merged.push(document.clone());
        }
    }

    tracing::debug!(
        existing = existing.len(),
        incoming = incoming.len(),
        merged = merged.len(),
        "merged documents"
    );
    merged
}

/// Validates `incoming` and appends it to `existing` in one pass.
///
/// # Errors
///
/// Returns [`ContractError::Violation`] listing every problem found in the
/// batch. Nothing is merged in that case.
pub fn append_documents(
    env: ValidationEnv,
    existing: &[DocumentMetadata],
    incoming: &[DocumentMetadata],
) -> Result<Vec<DocumentMetadata>, ContractError> {
    validate_requirements(RequirementCategory::InvalidInput, env, |acc| {
        merge_documents(acc, existing, incoming)
    })
}
