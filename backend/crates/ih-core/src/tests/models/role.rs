use crate::{CoreError, ReconciliationState, Role};

use std::str::FromStr;

#[test]
fn test_role_as_str() {
    assert_eq!(Role::Candidate.as_str(), "candidate");
    assert_eq!(Role::Interviewer.as_str(), "interviewer");
}

#[test]
fn test_role_from_str() {
    assert_eq!(Role::from_str("candidate").unwrap(), Role::Candidate);
    assert_eq!(Role::from_str("interviewer").unwrap(), Role::Interviewer);
}

#[test]
fn test_role_from_str_rejects_other_literals() {
    for literal in ["admin", "Candidate", "INTERVIEWER", ""] {
        let result = Role::from_str(literal);
        assert!(
            matches!(result, Err(CoreError::InvalidRole { ref value, .. }) if value == literal),
            "expected InvalidRole for {literal:?}"
        );
    }
}

#[test]
fn test_role_default_is_candidate() {
    assert_eq!(Role::default(), Role::Candidate);
}

#[test]
fn test_role_serde_uses_wire_literals() {
    assert_eq!(
        serde_json::to_string(&Role::Interviewer).unwrap(),
        "\"interviewer\""
    );
    assert_eq!(
        serde_json::from_str::<Role>("\"candidate\"").unwrap(),
        Role::Candidate
    );
    assert!(serde_json::from_str::<Role>("\"admin\"").is_err());
}

#[test]
fn test_role_all_is_what_an_unresolved_session_offers() {
    assert_eq!(Role::all(), &[Role::Candidate, Role::Interviewer]);
    assert_eq!(
        ReconciliationState::AwaitingSelection.available_selections(),
        Role::all()
    );
    assert!(
        ReconciliationState::Resolved(Role::Candidate)
            .available_selections()
            .is_empty()
    );
}
