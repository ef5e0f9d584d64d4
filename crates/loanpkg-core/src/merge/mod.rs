//! Append-merge of content-addressed records.
//!
//! Documents and loan states are append-only. A merge validates each
//! incoming record, checks its checksum, ID and (for loan states) effective
//! time against both the committed history and the rest of the batch, and
//! builds `existing ++ accepted` as a new collection. The collection only
//! leaves the pass when no violation was recorded, so a failed merge never
//! exposes a partial result.
//!
//! # Key Concepts
//!
//! - **History collision**: a key already committed, reported as
//!   `"... already exists"`
//! - **Batch collision**: a key repeated within the batch, reported as
//!   `"... is provided more than once in input"`
//! - **Re-commit**: a document resubmitted under a committed checksum; its
//!   ID, URI, content type and document type must be unchanged, and it is
//!   appended as a second entry

mod documents;
mod loan_states;

#[cfg(test)]
mod tests;

pub use documents::{append_documents, merge_documents, validate_document};
pub use loan_states::{append_loan_states, merge_loan_states, validate_loan_state};
