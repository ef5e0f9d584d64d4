//! Shared fixtures for unit tests.

use chrono::{Duration, TimeZone, Utc};

use crate::contracts::LoanScope;
use crate::enforcement::ValidationEnv;
use crate::records::{
    AchAccountType, AchMovement, Address, Asset, Checksum, Controller, Date, DisburseAccount,
    Disbursement, DocumentMetadata, ENote, FinancialAccount, Funding, Identifier, Loan,
    LoanStateMetadata, Money, MoneyMovement, ServicingData, ServicingRights, Status, Timestamp,
    ValidationItem, ValidationRequest, ValidationResults,
};

/// Fixed evaluation time used by every test.
pub(crate) fn now() -> Timestamp {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

pub(crate) fn env() -> ValidationEnv {
    ValidationEnv::at(now())
}

/// A deterministic UUID literal for `n`.
pub(crate) fn uuid(n: u32) -> Identifier {
    Identifier::new(format!("00000000-0000-4000-8000-{n:012}"))
}

pub(crate) fn document(n: u32) -> DocumentMetadata {
    DocumentMetadata {
        id: Some(uuid(n)),
        file_name: format!("doc-{n}.pdf"),
        uri: format!("gs://loan-docs/doc-{n}"),
        content_type: "application/pdf".to_string(),
        document_type: "PROMISSORY_NOTE".to_string(),
        checksum: Some(Checksum::new(format!("checksum-{n}"), "SHA-512")),
    }
}

pub(crate) fn loan_state(n: u32) -> LoanStateMetadata {
    LoanStateMetadata {
        id: Some(uuid(1000 + n)),
        effective_time: Some(now() - Duration::days(i64::from(n) + 1)),
        uri: format!("gs://loan-states/state-{n}"),
        checksum: Some(Checksum::new(format!("state-checksum-{n}"), "SHA-512")),
    }
}

pub(crate) fn ach_movement() -> MoneyMovement {
    MoneyMovement {
        ach: Some(AchMovement {
            account_type: AchAccountType::Checking,
        }),
        wire: None,
    }
}

pub(crate) fn address() -> Address {
    Address {
        street: vec!["1 Main St".to_string()],
        city: "Springfield".to_string(),
        state: "IL".to_string(),
        zip: "62701".to_string(),
        country: "US".to_string(),
    }
}

pub(crate) fn disbursement(n: u32) -> Disbursement {
    Disbursement {
        id: Some(uuid(2000 + n)),
        started: Some(now() - Duration::days(2)),
        completed: Some(now() - Duration::days(1)),
        amount: Some(Money::new("1250.00", "USD")),
        status: Some(Status::new("COMPLETED")),
        disburse_account: Some(DisburseAccount {
            financial: Some(FinancialAccount {
                id: Some(uuid(3000 + n)),
                account_owner: "Jane Borrower".to_string(),
                account_number: "000123456789".to_string(),
                routing_number: "021000021".to_string(),
                movement: vec![ach_movement()],
            }),
            provenance: None,
        }),
    }
}

pub(crate) fn funding(disbursements: Vec<Disbursement>) -> Funding {
    Funding {
        status: Some(Status::new("FUNDED")),
        started: Some(now() - Duration::days(3)),
        completed: Some(now() - Duration::days(1)),
        disbursements,
    }
}

pub(crate) fn asset() -> Asset {
    let asset = Asset {
        id: Some(uuid(1)),
        asset_type: "MORTGAGE".to_string(),
        description: "30 year fixed".to_string(),
        ..Asset::default()
    };
    asset
        .with_loan(&Loan {
            id: Some(uuid(2)),
            originator_name: "First Lender".to_string(),
            ..Loan::default()
        })
        .unwrap()
}

pub(crate) fn servicing_rights() -> ServicingRights {
    ServicingRights {
        servicer_id: Some(uuid(4000)),
        servicer_name: "Main Street Servicing".to_string(),
    }
}

pub(crate) fn servicing_data() -> ServicingData {
    ServicingData {
        loan_id: Some(uuid(2)),
        asset_type: "MORTGAGE".to_string(),
        loan_state: vec![loan_state(1)],
        doc_meta: vec![document(100)],
    }
}

pub(crate) fn validation_request(n: u32) -> ValidationRequest {
    ValidationRequest {
        request_id: Some(uuid(5000 + n)),
        rule_set_id: Some(uuid(6000)),
        effective_time: Some(now() - Duration::hours(1)),
        validator_name: "Package Checkers".to_string(),
        requester_name: "First Lender".to_string(),
    }
}

pub(crate) fn validation_results() -> ValidationResults {
    ValidationResults {
        result_set_uuid: Some(uuid(7000)),
        result_set_effective_time: Some(now() - Duration::minutes(5)),
        result_set_provider: "Package Checkers".to_string(),
        validation_exception_count: 0,
        validation_warning_count: 1,
        validation_items: vec![ValidationItem {
            rule_id: "R-001".to_string(),
            description: "Appraisal is older than 90 days".to_string(),
            status: "WARNING".to_string(),
        }],
    }
}

pub(crate) fn controller(n: u32) -> Controller {
    Controller {
        controller_uuid: Some(uuid(8000 + n)),
        controller_name: format!("Controller {n}"),
    }
}

pub(crate) fn e_note() -> ENote {
    ENote {
        controller: Some(controller(1)),
        e_note: Some(document(200)),
        signed_date: Some(Date::new("2024-05-15")),
        vault_name: "Primary eVault".to_string(),
    }
}

/// A complete package accepted by `record-loan` on an empty scope.
pub(crate) fn package() -> LoanScope {
    LoanScope {
        asset: Some(asset()),
        documents: vec![document(1), document(2)],
        servicing_rights: Some(servicing_rights()),
        servicing_data: Some(servicing_data()),
        validation: None,
        e_note: Some(e_note()),
    }
}
