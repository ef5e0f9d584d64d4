//! Tests for document and loan state merges.

use chrono::Duration;
use proptest::prelude::*;

use crate::enforcement::ContractError;
use crate::merge::{append_documents, append_loan_states};
use crate::records::{Checksum, DocumentMetadata, Identifier};
use crate::test_support::{document, env, loan_state, now, uuid};

fn details(err: &ContractError) -> &str {
    err.details().unwrap_or_default()
}

// ============================================================
// Documents
// ============================================================

#[test]
fn test_append_to_empty_keeps_submitted_order() {
    let batch = vec![document(3), document(1), document(2)];
    let merged = append_documents(env(), &[], &batch).unwrap();
    assert_eq!(merged, batch);
}

#[test]
fn test_append_keeps_existing_first() {
    let existing = vec![document(1)];
    let merged = append_documents(env(), &existing, &[document(2)]).unwrap();
    assert_eq!(merged, vec![document(1), document(2)]);
}

#[test]
fn test_empty_batch_is_rejected() {
    let err = append_documents(env(), &[document(1)], &[]).unwrap_err();
    assert_eq!(err.violation_count(), Some(1));
    assert_eq!(details(&err), "Must supply at least one document");
}

#[test]
fn test_recommit_with_new_file_name_appends_second_entry() {
    let existing = vec![document(1)];
    let resubmitted = DocumentMetadata {
        file_name: "new.pdf".to_string(),
        ..document(1)
    };

    let merged = append_documents(env(), &existing, &[resubmitted.clone()]).unwrap();
    assert_eq!(merged.len(), 2);
    assert_eq!(merged[1], resubmitted);
}

#[test]
fn test_recommit_reports_each_changed_field() {
    let existing = vec![document(1)];
    let changed = DocumentMetadata {
        id: Some(uuid(99)),
        uri: "gs://elsewhere".to_string(),
        content_type: "image/png".to_string(),
        document_type: "APPRAISAL".to_string(),
        ..document(1)
    };

    let err = append_documents(env(), &existing, &[changed]).unwrap_err();
    assert_eq!(err.violation_count(), Some(4));
    assert_eq!(
        details(&err),
        "Cannot change ID of document with checksum checksum-1; \
         Cannot change URI of document with checksum checksum-1; \
         Cannot change content type of document with checksum checksum-1; \
         Cannot change document type of document with checksum checksum-1"
    );
}

#[test]
fn test_recommit_with_changed_uri_names_field_and_checksum() {
    let changed = DocumentMetadata {
        uri: "gs://elsewhere".to_string(),
        ..document(1)
    };
    let err = append_documents(env(), &[document(1)], &[changed]).unwrap_err();
    assert_eq!(
        details(&err),
        "Cannot change URI of document with checksum checksum-1"
    );
}

#[test]
fn test_existing_id_under_new_checksum_already_exists() {
    let reused_id = DocumentMetadata {
        checksum: Some(Checksum::new("fresh", "SHA-512")),
        ..document(1)
    };
    let err = append_documents(env(), &[document(1)], &[reused_id]).unwrap_err();
    assert_eq!(
        details(&err),
        format!("Document with ID {} already exists", uuid(1))
    );
}

#[test]
fn test_duplicate_id_within_batch_reported_once() {
    let first = document(1);
    let second = DocumentMetadata {
        checksum: Some(Checksum::new("other", "SHA-512")),
        ..document(1)
    };

    let err = append_documents(env(), &[], &[first, second]).unwrap_err();
    assert_eq!(err.violation_count(), Some(1));
    assert_eq!(
        details(&err),
        format!("Document with ID {} is provided more than once in input", uuid(1))
    );
}

#[test]
fn test_padded_id_matches_existing_id() {
    let padded = DocumentMetadata {
        id: Some(Identifier::new(format!("  {}  ", uuid(1)))),
        checksum: Some(Checksum::new("fresh", "SHA-512")),
        ..document(1)
    };
    let err = append_documents(env(), &[document(1)], &[padded]).unwrap_err();
    assert_eq!(
        details(&err),
        format!("Document with ID {} already exists", uuid(1))
    );
}

#[test]
fn test_duplicate_checksum_within_batch() {
    let first = document(1);
    let second = DocumentMetadata {
        id: Some(uuid(2)),
        ..document(1)
    };

    let err = append_documents(env(), &[], &[first, second]).unwrap_err();
    assert_eq!(
        details(&err),
        "Document with checksum checksum-1 is provided more than once in input"
    );
}

#[test]
fn test_all_bad_documents_reported_together() {
    let blank = DocumentMetadata::default();
    let bad_id = DocumentMetadata {
        id: Some(Identifier::new("nope")),
        ..document(2)
    };

    let err = append_documents(env(), &[], &[blank, bad_id, document(3)]).unwrap_err();
    assert_eq!(
        details(&err),
        "Document must have valid ID (2 occurrences); \
         Document is missing URI; \
         Document is missing content type; \
         Document is missing document type; \
         Document is missing checksum"
    );
    assert_eq!(err.violation_count(), Some(6));
}

#[test]
fn test_checksum_without_algorithm_is_rejected() {
    let doc = DocumentMetadata {
        checksum: Some(Checksum::new("abc", "")),
        ..document(1)
    };
    let err = append_documents(env(), &[], &[doc]).unwrap_err();
    assert_eq!(details(&err), "Document checksum is missing algorithm");
}

// ============================================================
// Loan states
// ============================================================

#[test]
fn test_append_loan_states_in_order() {
    let batch = vec![loan_state(1), loan_state(2)];
    let merged = append_loan_states(env(), &[loan_state(0)], &batch).unwrap();
    assert_eq!(merged, vec![loan_state(0), loan_state(1), loan_state(2)]);
}

#[test]
fn test_empty_loan_state_batch_is_rejected() {
    let err = append_loan_states(env(), &[], &[]).unwrap_err();
    assert_eq!(details(&err), "Must supply at least one loan state");
    assert_eq!(err.violation_count(), Some(1));
}

#[test]
fn test_loan_state_history_collisions() {
    let existing = vec![loan_state(1)];
    let err = append_loan_states(env(), &existing, &[loan_state(1)]).unwrap_err();

    let time = loan_state(1).effective_time.unwrap().to_rfc3339();
    assert_eq!(
        details(&err),
        format!(
            "Loan state with checksum state-checksum-1 already exists; \
             Loan state with ID {} already exists; \
             Loan state with effective time {time} already exists",
            uuid(1001)
        )
    );
}

#[test]
fn test_loan_state_duplicate_effective_time_in_batch() {
    let mut second = loan_state(2);
    second.effective_time = loan_state(1).effective_time;

    let err = append_loan_states(env(), &[], &[loan_state(1), second]).unwrap_err();
    let time = loan_state(1).effective_time.unwrap().to_rfc3339();
    assert_eq!(
        details(&err),
        format!("Loan state with effective time {time} is provided more than once in input")
    );
}

#[test]
fn test_future_loan_state_is_rejected() {
    let mut future = loan_state(1);
    future.effective_time = Some(now() + Duration::hours(1));

    let err = append_loan_states(env(), &[], &[future]).unwrap_err();
    assert_eq!(details(&err), "Loan state must have valid effective time");
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Splitting a batch of distinct documents between history and input
    /// always yields the full batch in submitted order.
    #[test]
    fn prop_append_preserves_order(
        ids in prop::collection::btree_set(0u32..500, 1..20),
        split in 0usize..20,
    ) {
        let all: Vec<DocumentMetadata> = ids.into_iter().map(document).collect();
        let split = split.min(all.len() - 1);
        let (existing, incoming) = all.split_at(split);

        let merged = append_documents(env(), existing, incoming).unwrap();
        prop_assert_eq!(merged, all);
    }
}
