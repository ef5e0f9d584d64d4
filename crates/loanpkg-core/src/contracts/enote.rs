//! eNote contracts.

use super::registry::Contract;
use super::scope::{LoanScope, ScopeUpdate};
use crate::enforcement::{
    Accumulator, ContractError, OrError, RequirementCategory, ValidationEnv, require_some,
    validate_requirements,
};
use crate::fields::{is_not_blank, is_valid_date, is_valid_identifier};
use crate::merge::validate_document;
use crate::records::{Controller, DocumentMetadata, ENote};

/// Hands control of the eNote to a new controller.
#[derive(Debug, Clone, Copy, Default)]
pub struct UpdateENoteController;

impl Contract for UpdateENoteController {
    const NAME: &'static str = "update-enote-controller";
    type Input = Controller;

    fn execute(
        &self,
        scope: &LoanScope,
        input: Controller,
        env: ValidationEnv,
    ) -> Result<ScopeUpdate, ContractError> {
        let e_note = require_some(
            RequirementCategory::IllegalState,
            scope.e_note.as_ref(),
            "Cannot update controller of a nonexistent eNote",
        )?;
        validate_requirements(RequirementCategory::InvalidInput, env, |acc| {
            validate_controller(acc, &input);
        })?;
        Ok(ScopeUpdate::ENote(ENote {
            controller: Some(input),
            ..e_note.clone()
        }))
    }
}

/// Replaces the eNote document.
#[derive(Debug, Clone, Copy, Default)]
pub struct UpdateENoteDocument;

impl Contract for UpdateENoteDocument {
    const NAME: &'static str = "update-enote-document";
    type Input = DocumentMetadata;

    fn execute(
        &self,
        scope: &LoanScope,
        input: DocumentMetadata,
        env: ValidationEnv,
    ) -> Result<ScopeUpdate, ContractError> {
        let e_note = require_some(
            RequirementCategory::IllegalState,
            scope.e_note.as_ref(),
            "Cannot update document of a nonexistent eNote",
        )?;
        validate_requirements(RequirementCategory::InvalidInput, env, |acc| {
            validate_document(acc, &input);
        })?;
        Ok(ScopeUpdate::ENote(ENote {
            e_note: Some(input),
            ..e_note.clone()
        }))
    }
}

/// Validates an eNote controller.
pub fn validate_controller(acc: &mut Accumulator, controller: &Controller) {
    acc.require_all([
        is_valid_identifier(controller.controller_uuid.as_ref())
            .or_error("eNote controller must have valid ID"),
        is_not_blank(&controller.controller_name).or_error("eNote controller is missing name"),
    ]);
}

/// Validates a complete eNote.
pub fn validate_enote(acc: &mut Accumulator, e_note: &ENote) {
    acc.require(e_note.controller.is_some().or_error("eNote must have a controller"));
    if let Some(controller) = &e_note.controller {
        validate_controller(acc, controller);
    }
    acc.require(e_note.e_note.is_some().or_error("eNote must have a document"));
    if let Some(document) = &e_note.e_note {
        validate_document(acc, document);
    }
    acc.require_all([
        is_valid_date(e_note.signed_date.as_ref()).or_error("eNote must have a signed date"),
        is_not_blank(&e_note.vault_name).or_error("eNote is missing vault name"),
    ]);
}
