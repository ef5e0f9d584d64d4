//! Tests for funding validation.

use std::collections::BTreeMap;

use chrono::Duration;

use crate::enforcement::{
    ContractError, RequirementCategory, ValidationEnv, validate_requirements,
};
use crate::funding::{record_funding, validate_funding};
use crate::records::{
    AchAccountType, AchMovement, Asset, DisburseAccount, Funding, LOAN_KEY, Loan, Money,
    MoneyMovement, PackedValue, ProvenanceAccount, SwiftInstructions, WireMovement,
};
use crate::test_support::{address, asset, disbursement, env, funding, now, uuid};

fn check(funding: &Funding) -> Result<(), ContractError> {
    check_with(env(), funding)
}

fn check_with(env: ValidationEnv, funding: &Funding) -> Result<(), ContractError> {
    validate_requirements(RequirementCategory::InvalidInput, env, |acc| {
        validate_funding(acc, funding);
    })
}

// ============================================================
// Funding tree
// ============================================================

#[test]
fn test_valid_funding_passes() {
    let funding = funding(vec![disbursement(1), disbursement(2)]);
    assert!(check(&funding).is_ok());
}

#[test]
fn test_funding_level_rules() {
    let mut funding = funding(vec![]);
    funding.status = None;
    funding.completed = Some(now() + Duration::days(1));

    let err = check(&funding).unwrap_err();
    assert_eq!(
        err.details(),
        Some("Funding must have a status; Funding must have valid completion time")
    );
}

#[test]
fn test_duplicate_disbursement_ids_report_usages() {
    let mut duplicate = disbursement(2);
    duplicate.id = disbursement(1).id;
    let funding = funding(vec![disbursement(1), duplicate, disbursement(3)]);

    let err = check(&funding).unwrap_err();
    assert_eq!(
        err.details(),
        Some(format!("Disbursement ID {} is not unique (2 usages)", uuid(2001)).as_str())
    );
    assert_eq!(err.violation_count(), Some(1));
}

#[test]
fn test_disbursement_failures_are_tagged_by_position() {
    let mut negative = disbursement(2);
    negative.amount = Some(Money::new("-10", "USD"));
    let mut also_negative = disbursement(4);
    also_negative.amount = Some(Money::new("-1", "USD"));
    let funding = funding(vec![
        disbursement(1),
        disbursement(2),
        negative,
        disbursement(3),
        also_negative,
    ]);

    let err = check(&funding).unwrap_err();
    let details = err.details().unwrap();
    assert!(details.contains(&format!("Disbursement ID {} is not unique (2 usages)", uuid(2002))));
    assert!(details.contains("Disbursement amount must be a non-negative number [Iteration 2, 4]"));
}

#[test]
fn test_account_must_be_exactly_one_side() {
    let mut both = disbursement(1);
    if let Some(account) = both.disburse_account.as_mut() {
        account.provenance = Some(ProvenanceAccount {
            address: "pb1xyz".to_string(),
            denom: "nhash".to_string(),
        });
    }
    let mut neither = disbursement(2);
    neither.disburse_account = Some(DisburseAccount::default());
    let mut missing = disbursement(3);
    missing.disburse_account = None;

    let err = check(&funding(vec![both, neither, missing])).unwrap_err();
    assert_eq!(
        err.details(),
        Some(
            "Disbursement account must be exactly one of financial or Provenance account \
             [Iteration 0, 1, 2] (3 occurrences)"
        )
    );
}

#[test]
fn test_provenance_account_requires_address() {
    let mut on_chain = disbursement(1);
    on_chain.disburse_account = Some(DisburseAccount {
        financial: None,
        provenance: Some(ProvenanceAccount::default()),
    });

    let err = check(&funding(vec![on_chain])).unwrap_err();
    assert_eq!(
        err.details(),
        Some("Provenance account must have an address [Iteration 0]")
    );
}

#[test]
fn test_financial_account_and_movement_rules_nest_tags() {
    let mut bad = disbursement(1);
    let account = bad
        .disburse_account
        .as_mut()
        .and_then(|account| account.financial.as_mut())
        .unwrap();
    account.account_number = "123".to_string();
    account.routing_number = "12345".to_string();
    account.movement = vec![
        MoneyMovement {
            ach: Some(AchMovement {
                account_type: AchAccountType::Unknown,
            }),
            wire: None,
        },
        MoneyMovement::default(),
        MoneyMovement {
            ach: None,
            wire: Some(WireMovement {
                address: None,
                wire_instructions: " ".to_string(),
                swift_instructions: Some(SwiftInstructions::default()),
            }),
        },
    ];

    let err = check(&funding(vec![disbursement(0), bad])).unwrap_err();
    assert_eq!(
        err.details(),
        Some(
            "Financial account number must be between 4 and 17 characters [Iteration 1]; \
             Financial account routing number must be 9 characters [Iteration 1]; \
             ACH movement must have a recognized account type [Iteration 0] [Iteration 1]; \
             Money movement must be exactly one of ACH or wire [Iteration 1] [Iteration 1]; \
             Wire movement must have an address [Iteration 2] [Iteration 1]; \
             Wire movement must have wire instructions [Iteration 2] [Iteration 1]; \
             SWIFT instructions must have a SWIFT ID [Iteration 2] [Iteration 1]; \
             SWIFT instructions must have a bank mailing address [Iteration 2] [Iteration 1]"
        )
    );
    assert_eq!(err.violation_count(), Some(8));
}

#[test]
fn test_complete_wire_with_swift_passes() {
    let mut wired = disbursement(1);
    if let Some(account) = wired
        .disburse_account
        .as_mut()
        .and_then(|account| account.financial.as_mut())
    {
        account.movement = vec![MoneyMovement {
            ach: None,
            wire: Some(WireMovement {
                address: Some(address()),
                wire_instructions: "FFC Jane Borrower".to_string(),
                swift_instructions: Some(SwiftInstructions {
                    swift_id: "DEUTDEFF".to_string(),
                    swift_bank_mailing_address: Some(address()),
                }),
            }),
        }];
    }
    assert!(check(&funding(vec![wired])).is_ok());
}

#[test]
fn test_many_failures_are_truncated() {
    let disbursements = (0..14)
        .map(|n| {
            let mut d = disbursement(n);
            d.status = None;
            d
        })
        .collect();
    let err = check(&funding(disbursements)).unwrap_err();
    assert_eq!(
        err.details(),
        Some(
            "Disbursement must have a status [Iteration 0, 1, 2, 3, 4, 5, 6, 7, 8, 9] \
             (4 more omitted) (14 occurrences)"
        )
    );
}

// ============================================================
// Recording on an asset
// ============================================================

#[test]
fn test_record_funding_requires_loan_payload() {
    let err = record_funding(env(), None, &funding(vec![])).unwrap_err();
    assert_eq!(
        err.to_string(),
        "The contract state was invalid: Cannot record funding for an asset without loan data"
    );

    let bare = Asset::default();
    let err = record_funding(env(), Some(&bare), &funding(vec![])).unwrap_err();
    assert!(matches!(err, ContractError::IllegalState { .. }));
}

#[test]
fn test_record_funding_rejects_foreign_payload() {
    let mut asset = asset();
    asset.kv.insert(
        LOAN_KEY.to_string(),
        PackedValue {
            type_url: "type.example/Other".to_string(),
            value: serde_json::json!({}),
        },
    );
    let err = record_funding(env(), Some(&asset), &funding(vec![])).unwrap_err();
    assert!(matches!(err, ContractError::UnexpectedState { .. }));
}

#[test]
fn test_record_funding_replaces_funding_and_keeps_payload() {
    let mut asset = asset();
    let mut extra = BTreeMap::new();
    extra.insert("interestRate".to_string(), serde_json::json!("6.25"));
    let loan = Loan {
        extra,
        ..asset.loan().unwrap().unwrap()
    };
    asset = asset.with_loan(&loan).unwrap();

    let funding = funding(vec![disbursement(1)]);
    let updated = record_funding(env(), Some(&asset), &funding).unwrap();
    let stored = updated.loan().unwrap().unwrap();

    assert_eq!(stored.funding, Some(funding));
    assert_eq!(stored.extra.get("interestRate"), Some(&serde_json::json!("6.25")));
    assert_eq!(updated.id, asset.id);
}

#[test]
fn test_record_funding_reports_input_after_state() {
    let mut funding = funding(vec![disbursement(1)]);
    funding.status = None;
    let err = record_funding(env(), Some(&asset()), &funding).unwrap_err();
    assert_eq!(err.violation_count(), Some(1));
}
